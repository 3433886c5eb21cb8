//! Standard template variables
//!
//! The names offered when editing a template, and how they are filled from a
//! billing record.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

use super::render::TemplateValues;
use crate::models::BillingRecord;

/// A placeholder every template may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateVariable {
    TenantName,
    Amount,
    DueDate,
    Property,
    PixLink,
}

impl TemplateVariable {
    pub const ALL: [TemplateVariable; 5] = [
        TemplateVariable::TenantName,
        TemplateVariable::Amount,
        TemplateVariable::DueDate,
        TemplateVariable::Property,
        TemplateVariable::PixLink,
    ];

    /// Placeholder name, without braces
    pub fn key(&self) -> &'static str {
        match self {
            Self::TenantName => "nome",
            Self::Amount => "valor",
            Self::DueDate => "vencimento",
            Self::Property => "imovel",
            Self::PixLink => "link_pix",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::TenantName => "Tenant name",
            Self::Amount => "Rent amount",
            Self::DueDate => "Due date",
            Self::Property => "Property address",
            Self::PixLink => "PIX payment link",
        }
    }

    /// The token as written in a template body, e.g. `{nome}`
    pub fn token(&self) -> String {
        format!("{{{}}}", self.key())
    }
}

/// Fill the standard variables from a billing record
///
/// `valor` is formatted without the currency symbol because the stock
/// templates already write `R$ {valor}`. `link_pix` is only set when a link
/// is supplied.
pub fn billing_values(
    record: &BillingRecord,
    pix_link: Option<&str>,
    date_format: &str,
) -> TemplateValues {
    let mut values = TemplateValues::new();
    values.insert(
        TemplateVariable::TenantName.key().to_string(),
        record.tenant_name.clone(),
    );
    values.insert(
        TemplateVariable::Amount.key().to_string(),
        record.amount.format_plain(),
    );
    values.insert(
        TemplateVariable::DueDate.key().to_string(),
        format_date(record.due_date, date_format),
    );
    values.insert(
        TemplateVariable::Property.key().to_string(),
        record.property_label.clone(),
    );
    if let Some(link) = pix_link {
        values.insert(TemplateVariable::PixLink.key().to_string(), link.to_string());
    }
    values
}

/// Used when a configured date format cannot render a date
pub const FALLBACK_DATE_FORMAT: &str = "%d/%m/%Y";

/// Format a date with a strftime pattern
///
/// Patterns that cannot render a plain date (unknown specifiers, time or
/// offset fields) fall back to [`FALLBACK_DATE_FORMAT`].
pub fn format_date(date: NaiveDate, date_format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(date_format)).is_ok() {
        return out;
    }

    out.clear();
    let _ = write!(out, "{}", date.format(FALLBACK_DATE_FORMAT));
    out
}

/// Check that a strftime pattern can render a plain date
pub fn check_date_format(date_format: &str) -> Result<(), String> {
    if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
        return Err(format!("Invalid date format '{}'", date_format));
    }

    let mut rendered = String::new();
    write!(rendered, "{}", NaiveDate::default().format(date_format)).map_err(|_| {
        format!(
            "Date format '{}' uses time or time zone fields, which dates do not have",
            date_format
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BillingId, BillingStatus, Money};
    use crate::templates::render;

    fn record() -> BillingRecord {
        BillingRecord::new(
            BillingId::new(2),
            "Maria Santos",
            "Casa - Jardins",
            Money::from_reais(1200),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            BillingStatus::Pending,
        )
    }

    #[test]
    fn test_tokens() {
        assert_eq!(TemplateVariable::TenantName.token(), "{nome}");
        assert_eq!(TemplateVariable::PixLink.token(), "{link_pix}");
    }

    #[test]
    fn test_billing_values() {
        let values = billing_values(&record(), None, "%d/%m/%Y");
        assert_eq!(values["nome"], "Maria Santos");
        assert_eq!(values["valor"], "1.200,00");
        assert_eq!(values["vencimento"], "10/03/2024");
        assert_eq!(values["imovel"], "Casa - Jardins");
        assert!(!values.contains_key("link_pix"));

        let values = billing_values(&record(), Some("pix:abc"), "%Y-%m-%d");
        assert_eq!(values["vencimento"], "2024-03-10");
        assert_eq!(values["link_pix"], "pix:abc");
    }

    #[test]
    fn test_check_date_format() {
        assert!(check_date_format("%d/%m/%Y").is_ok());
        assert!(check_date_format("%Y-%m-%d (%a)").is_ok());
        assert!(check_date_format("%Q").unwrap_err().contains("Invalid date format"));
        assert!(check_date_format("%H:%M").unwrap_err().contains("time"));
        assert!(check_date_format("%d %z").is_err());
    }

    #[test]
    fn test_format_date_falls_back() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(format_date(date, "%Y-%m-%d"), "2024-03-10");
        assert_eq!(format_date(date, "%H:%M"), "10/03/2024");
        assert_eq!(format_date(date, "%Q"), "10/03/2024");
    }

    #[test]
    fn test_render_stock_reminder() {
        let body = "Olá {nome}, lembro que o aluguel no valor de R$ {valor} vence no dia {vencimento}. Link: {link_pix}";
        let rendered = render(body, &billing_values(&record(), None, "%d/%m/%Y"));
        assert_eq!(
            rendered,
            "Olá Maria Santos, lembro que o aluguel no valor de R$ 1.200,00 vence no dia 10/03/2024. Link: {link_pix}"
        );
    }
}
