//! Billing record model
//!
//! One rent charge with a due date and payment status. Status transitions
//! (to Paid or Overdue) are decided outside this application; records are
//! displayed with whatever status they carry. The only change EmDia makes to a
//! record is marking that a reminder went out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::BillingId;
use super::money::Money;
use crate::storage::Record;

/// Payment state of a billing record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingStatus {
    Paid,
    Pending,
    Overdue,
    Scheduled,
}

impl BillingStatus {
    /// All statuses, in dashboard order
    pub const ALL: [BillingStatus; 4] = [
        BillingStatus::Paid,
        BillingStatus::Pending,
        BillingStatus::Overdue,
        BillingStatus::Scheduled,
    ];

    /// Parse a status from string
    ///
    /// Accepts the English names and the Portuguese labels used on the
    /// dashboard (`pago`, `pendente`, `atrasado`, `agendado`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "paid" | "pago" => Some(Self::Paid),
            "pending" | "pendente" => Some(Self::Pending),
            "overdue" | "late" | "atrasado" => Some(Self::Overdue),
            "scheduled" | "agendado" => Some(Self::Scheduled),
            _ => None,
        }
    }

    /// Portuguese label shown on status badges
    pub fn label_pt(&self) -> &'static str {
        match self {
            Self::Paid => "Pago",
            Self::Pending => "Pendente",
            Self::Overdue => "Atrasado",
            Self::Scheduled => "Agendado",
        }
    }

    /// Whether a record may be created with this status
    pub fn is_initial(&self) -> bool {
        matches!(self, Self::Pending | Self::Scheduled)
    }
}

impl fmt::Display for BillingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paid => write!(f, "Paid"),
            Self::Pending => write!(f, "Pending"),
            Self::Overdue => write!(f, "Overdue"),
            Self::Scheduled => write!(f, "Scheduled"),
        }
    }
}

impl FromStr for BillingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!(
                "invalid status '{}' (expected paid, pending, overdue or scheduled)",
                s
            )
        })
    }
}

/// A rent charge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingRecord {
    pub id: BillingId,
    pub tenant_name: String,
    pub property_label: String,
    pub amount: Money,
    pub due_date: NaiveDate,
    pub status: BillingStatus,

    /// Set iff status is Paid
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,

    #[serde(default)]
    pub reminder_sent: bool,
}

impl BillingRecord {
    /// Create a new charge
    ///
    /// New charges start without a payment date and without a reminder sent.
    pub fn new(
        id: BillingId,
        tenant_name: impl Into<String>,
        property_label: impl Into<String>,
        amount: Money,
        due_date: NaiveDate,
        status: BillingStatus,
    ) -> Self {
        Self {
            id,
            tenant_name: tenant_name.into().trim().to_string(),
            property_label: property_label.into().trim().to_string(),
            amount,
            due_date,
            status,
            payment_date: None,
            reminder_sent: false,
        }
    }

    /// Return a copy flagged as reminded
    pub fn with_reminder_sent(&self) -> Self {
        Self {
            reminder_sent: true,
            ..self.clone()
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == BillingStatus::Paid
    }

    /// Whether the "charge" action is available for this record
    ///
    /// Paid records have no actions. Overdue records can always be charged
    /// again; the others only until the first reminder went out.
    pub fn can_send_reminder(&self) -> bool {
        match self.status {
            BillingStatus::Paid => false,
            BillingStatus::Overdue => true,
            BillingStatus::Pending | BillingStatus::Scheduled => !self.reminder_sent,
        }
    }

    /// Days from the due date to `today` (negative while not yet due)
    pub fn days_past_due(&self, today: NaiveDate) -> i64 {
        (today - self.due_date).num_days()
    }

    /// Validate the record
    pub fn validate(&self) -> Result<(), BillingValidationError> {
        if self.tenant_name.trim().is_empty() {
            return Err(BillingValidationError::EmptyTenant);
        }

        if self.property_label.trim().is_empty() {
            return Err(BillingValidationError::EmptyProperty);
        }

        if self.amount.is_negative() {
            return Err(BillingValidationError::NegativeAmount);
        }

        if self.amount > Money::MAX_AMOUNT {
            return Err(BillingValidationError::AmountTooLarge(self.amount));
        }

        match (self.status, self.payment_date) {
            (BillingStatus::Paid, None) => Err(BillingValidationError::MissingPaymentDate),
            (status, Some(_)) if status != BillingStatus::Paid => {
                Err(BillingValidationError::UnexpectedPaymentDate(status))
            }
            _ => Ok(()),
        }
    }
}

impl Record for BillingRecord {
    type Id = BillingId;
    const ENTITY: &'static str = "Billing";

    fn id(&self) -> BillingId {
        self.id
    }
}

/// Validation errors for billing records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingValidationError {
    EmptyTenant,
    EmptyProperty,
    NegativeAmount,
    AmountTooLarge(Money),
    MissingPaymentDate,
    UnexpectedPaymentDate(BillingStatus),
}

impl fmt::Display for BillingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTenant => write!(f, "Billing tenant name cannot be empty"),
            Self::EmptyProperty => write!(f, "Billing property cannot be empty"),
            Self::NegativeAmount => write!(f, "Billing amount cannot be negative"),
            Self::AmountTooLarge(amount) => write!(
                f,
                "Billing amount {} exceeds the limit of {}",
                amount,
                Money::MAX_AMOUNT
            ),
            Self::MissingPaymentDate => write!(f, "A paid billing must have a payment date"),
            Self::UnexpectedPaymentDate(status) => {
                write!(f, "A {} billing cannot have a payment date", status)
            }
        }
    }
}

impl std::error::Error for BillingValidationError {}
