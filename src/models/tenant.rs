//! Tenant model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TenantId;
use super::money::Money;
use crate::storage::Record;

/// Standing of a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    #[default]
    Active,
    /// Behind on rent
    Late,
}

impl TenantStatus {
    /// Parse a status from string (English or Portuguese)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" | "ativo" => Some(Self::Active),
            "late" | "atrasado" => Some(Self::Late),
            _ => None,
        }
    }
}

impl fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Late => write!(f, "Late"),
        }
    }
}

/// A tenant renting one property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    pub email: String,
    pub phone: String,

    /// Address of the rented property
    pub property: String,

    pub rent: Money,

    /// Day of the month rent is due (1-31)
    pub due_day: u8,

    #[serde(default)]
    pub status: TenantStatus,
}

/// Partial update for a tenant; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct TenantUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rent: Option<Money>,
    pub due_day: Option<u8>,
    pub status: Option<TenantStatus>,
}

impl TenantUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.rent.is_none()
            && self.due_day.is_none()
            && self.status.is_none()
    }
}

impl Tenant {
    /// Create a new active tenant
    pub fn new(
        id: TenantId,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        property: impl Into<String>,
        rent: Money,
        due_day: u8,
    ) -> Self {
        Self {
            id,
            name: name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            phone: phone.into().trim().to_string(),
            property: property.into().trim().to_string(),
            rent,
            due_day,
            status: TenantStatus::Active,
        }
    }

    /// Return a copy with the update applied
    pub fn updated(&self, update: &TenantUpdate) -> Self {
        let text = |new: &Option<String>, old: &String| {
            new.as_deref()
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| old.clone())
        };

        Self {
            name: text(&update.name, &self.name),
            email: text(&update.email, &self.email),
            phone: text(&update.phone, &self.phone),
            rent: update.rent.unwrap_or(self.rent),
            due_day: update.due_day.unwrap_or(self.due_day),
            status: update.status.unwrap_or(self.status),
            ..self.clone()
        }
    }

    /// Check if this tenant matches a name (case-insensitive)
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    /// Validate the tenant
    pub fn validate(&self) -> Result<(), TenantValidationError> {
        if self.name.trim().is_empty() {
            return Err(TenantValidationError::EmptyName);
        }

        if !self.email.contains('@') {
            return Err(TenantValidationError::InvalidEmail(self.email.clone()));
        }

        if self.property.trim().is_empty() {
            return Err(TenantValidationError::MissingProperty);
        }

        if !(1..=31).contains(&self.due_day) {
            return Err(TenantValidationError::InvalidDueDay(self.due_day));
        }

        if self.rent.is_negative() {
            return Err(TenantValidationError::NegativeRent);
        }

        if self.rent > Money::MAX_AMOUNT {
            return Err(TenantValidationError::RentTooLarge(self.rent));
        }

        Ok(())
    }
}

impl Record for Tenant {
    type Id = TenantId;
    const ENTITY: &'static str = "Tenant";

    fn id(&self) -> TenantId {
        self.id
    }
}

impl fmt::Display for Tenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for tenants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantValidationError {
    EmptyName,
    InvalidEmail(String),
    MissingProperty,
    InvalidDueDay(u8),
    NegativeRent,
    RentTooLarge(Money),
}

impl fmt::Display for TenantValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Tenant name cannot be empty"),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: '{}'", email),
            Self::MissingProperty => write!(f, "Tenant must be assigned to a property"),
            Self::InvalidDueDay(day) => {
                write!(f, "Due day must be between 1 and 31, got {}", day)
            }
            Self::NegativeRent => write!(f, "Rent cannot be negative"),
            Self::RentTooLarge(rent) => {
                write!(f, "Rent {} exceeds the limit of {}", rent, Money::MAX_AMOUNT)
            }
        }
    }
}

impl std::error::Error for TenantValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tenant {
        Tenant::new(
            TenantId::new(1),
            "João Silva",
            "joao@email.com",
            "(11) 99999-9999",
            "Rua das Flores, 123 - Centro",
            Money::from_reais(850),
            5,
        )
    }

    #[test]
    fn test_new_tenant_is_active() {
        let tenant = sample();
        assert_eq!(tenant.status, TenantStatus::Active);
        assert!(tenant.validate().is_ok());
    }

    #[test]
    fn test_update() {
        let tenant = sample();
        let updated = tenant.updated(&TenantUpdate {
            phone: Some(" (11) 90000-0000 ".into()),
            status: Some(TenantStatus::Late),
            ..Default::default()
        });

        assert_eq!(updated.phone, "(11) 90000-0000");
        assert_eq!(updated.status, TenantStatus::Late);
        assert_eq!(updated.name, tenant.name);
        assert_eq!(tenant.status, TenantStatus::Active);
    }

    #[test]
    fn test_validation() {
        let mut tenant = sample();
        tenant.due_day = 0;
        assert_eq!(tenant.validate(), Err(TenantValidationError::InvalidDueDay(0)));

        let mut tenant = sample();
        tenant.email = "joao.email.com".into();
        assert!(matches!(
            tenant.validate(),
            Err(TenantValidationError::InvalidEmail(_))
        ));

        let mut tenant = sample();
        tenant.name = String::new();
        assert_eq!(tenant.validate(), Err(TenantValidationError::EmptyName));

        let mut tenant = sample();
        tenant.rent = Money::from_reais(10_000_001);
        assert!(matches!(
            tenant.validate(),
            Err(TenantValidationError::RentTooLarge(_))
        ));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(TenantStatus::parse("Ativo"), Some(TenantStatus::Active));
        assert_eq!(TenantStatus::parse("late"), Some(TenantStatus::Late));
        assert_eq!(TenantStatus::parse("gone"), None);
    }
}
