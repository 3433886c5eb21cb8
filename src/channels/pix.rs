//! Simulated PIX charges

use serde::Serialize;

use crate::config::{PaymentSettings, PixKeyType};
use crate::error::{EmDiaError, EmDiaResult};
use crate::models::{BillingId, BillingRecord, Money};

/// A PIX charge for one billing record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PixCharge {
    pub billing_id: BillingId,
    pub amount: Money,
    pub key: String,
    pub key_type: PixKeyType,
    /// Payment link handed to the tenant as `{link_pix}`
    pub link: String,
}

/// Build the charge for a record using the configured receiving key
///
/// Paid records have nothing left to charge.
pub fn generate_charge(record: &BillingRecord, payment: &PaymentSettings) -> EmDiaResult<PixCharge> {
    if record.is_paid() {
        return Err(EmDiaError::Validation(format!(
            "{} is already paid",
            record.id
        )));
    }

    let key = payment.pix_key.trim();
    if key.is_empty() {
        return Err(EmDiaError::Config("No PIX key configured".into()));
    }

    Ok(PixCharge {
        billing_id: record.id,
        amount: record.amount,
        key: key.to_string(),
        key_type: payment.pix_key_type,
        link: payment_link(key, record),
    })
}

/// Link for a record, without checking whether it is still payable
pub fn payment_link(key: &str, record: &BillingRecord) -> String {
    format!(
        "pix:{}?amount={}.{:02}&ref={}",
        key,
        record.amount.reais(),
        record.amount.cents_part(),
        record.id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::test_support::record;
    use crate::models::BillingStatus;

    #[test]
    fn test_charge_for_pending_record() {
        let pending = record(3, BillingStatus::Pending, 75_050);
        let charge = generate_charge(&pending, &PaymentSettings::default()).unwrap();

        assert_eq!(charge.amount, Money::from_cents(75_050));
        assert_eq!(charge.key_type, PixKeyType::Email);
        assert_eq!(
            charge.link,
            "pix:exemplo@chavepix.com.br?amount=750.50&ref=bil-3"
        );
    }

    #[test]
    fn test_paid_record_has_no_charge() {
        let paid = record(1, BillingStatus::Paid, 85_000);
        let err = generate_charge(&paid, &PaymentSettings::default()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let payment = PaymentSettings {
            pix_key: " ".into(),
            ..Default::default()
        };
        let pending = record(2, BillingStatus::Overdue, 100);
        assert!(matches!(
            generate_charge(&pending, &payment),
            Err(EmDiaError::Config(_))
        ));
    }
}
