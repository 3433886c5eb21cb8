//! User settings for EmDia
//!
//! Mirrors the four settings forms of the dashboard (general, notifications,
//! payment, WhatsApp) plus display, template and logging preferences. Changes
//! made during a session are not written back; `save` is only used by
//! `config init` to scaffold a settings file.

use serde::{Deserialize, Serialize};

use super::paths::EmDiaPaths;
use crate::error::{EmDiaError, EmDiaResult};
use crate::storage::file_io::{is_yaml, write_atomic, write_json_atomic};
use crate::templates::{check_date_format, PlaceholderPolicy};

/// Business identity shown on messages and receipts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    pub company_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            company_name: "EmDia Gestão de Aluguéis".to_string(),
            owner_name: "Seu Nome".to_string(),
            email: "seu.email@exemplo.com".to_string(),
            phone: "(11) 99999-9999".to_string(),
        }
    }
}

/// When automatic reminders and notices go out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// Days before the due date to send the upcoming-rent reminder
    pub days_before_due: u32,
    pub send_reminders: bool,
    pub send_receipts: bool,
    pub send_late_notices: bool,
    /// Days after the due date on which a late notice is sent
    pub late_notice_days: Vec<u32>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            days_before_due: 3,
            send_reminders: true,
            send_receipts: true,
            send_late_notices: true,
            late_notice_days: vec![3, 7, 15],
        }
    }
}

/// Kind of PIX key registered for receiving payments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PixKeyType {
    Cpf,
    Cnpj,
    #[default]
    Email,
    Phone,
    Random,
}

impl PixKeyType {
    /// Parse a key type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cpf" => Some(Self::Cpf),
            "cnpj" => Some(Self::Cnpj),
            "email" | "e-mail" => Some(Self::Email),
            "phone" | "telefone" | "celular" => Some(Self::Phone),
            "random" | "aleatoria" | "aleatória" | "evp" => Some(Self::Random),
            _ => None,
        }
    }
}

impl std::fmt::Display for PixKeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cpf => write!(f, "CPF"),
            Self::Cnpj => write!(f, "CNPJ"),
            Self::Email => write!(f, "Email"),
            Self::Phone => write!(f, "Phone"),
            Self::Random => write!(f, "Random key"),
        }
    }
}

/// Where rent payments are received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentSettings {
    pub pix_key: String,
    pub pix_key_type: PixKeyType,
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub branch: String,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            pix_key: "exemplo@chavepix.com.br".to_string(),
            pix_key_type: PixKeyType::Email,
            bank_name: "Banco XYZ".to_string(),
            account_name: "Seu Nome".to_string(),
            account_number: "12345-6".to_string(),
            branch: "0001".to_string(),
        }
    }
}

/// WhatsApp channel preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhatsappSettings {
    pub use_whatsapp: bool,
    pub phone_number: String,
}

impl Default for WhatsappSettings {
    fn default() -> Self {
        Self {
            use_whatsapp: true,
            phone_number: "(11) 99999-9999".to_string(),
        }
    }
}

/// Terminal formatting preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub currency_symbol: String,
    /// strftime format used for dates in tables and messages
    pub date_format: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency_symbol: "R$".to_string(),
            date_format: "%d/%m/%Y".to_string(),
        }
    }
}

/// Which templates reminders use and how unknown placeholders are treated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    pub unresolved: PlaceholderPolicy,
    pub reminder_template: String,
    pub late_notice_template: String,
    /// Sent to confirm a payment when `notifications.send_receipts` is on
    pub receipt_template: String,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            unresolved: PlaceholderPolicy::default(),
            reminder_template: "Lembrete de Aluguel".to_string(),
            late_notice_template: "Aluguel Atrasado".to_string(),
            receipt_template: "Confirmação de Pagamento".to_string(),
        }
    }
}

/// User settings for EmDia
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub general: GeneralSettings,

    #[serde(default)]
    pub notifications: NotificationSettings,

    #[serde(default)]
    pub payment: PaymentSettings,

    #[serde(default)]
    pub whatsapp: WhatsappSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub templates: TemplateSettings,

    /// Default tracing filter when neither RUST_LOG nor -v is given
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            general: GeneralSettings::default(),
            notifications: NotificationSettings::default(),
            payment: PaymentSettings::default(),
            whatsapp: WhatsappSettings::default(),
            display: DisplaySettings::default(),
            templates: TemplateSettings::default(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &EmDiaPaths) -> EmDiaResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| EmDiaError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings = if is_yaml(&settings_path) {
            serde_yaml::from_str::<Settings>(&contents).map_err(|e| {
                EmDiaError::Config(format!("Failed to parse settings file: {}", e))
            })?
        } else {
            serde_json::from_str::<Settings>(&contents).map_err(|e| {
                EmDiaError::Config(format!("Failed to parse settings file: {}", e))
            })?
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &EmDiaPaths) -> EmDiaResult<()> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        if is_yaml(&settings_path) {
            write_atomic(&settings_path, |writer| {
                serde_yaml::to_writer(writer, self).map_err(EmDiaError::from)
            })
        } else {
            write_json_atomic(&settings_path, self)
        }
    }

    /// Check the cross-field rules the settings forms enforce
    pub fn validate(&self) -> EmDiaResult<()> {
        if !self.general.email.contains('@') {
            return Err(EmDiaError::Validation(format!(
                "Invalid email address: '{}'",
                self.general.email
            )));
        }

        if self.payment.pix_key.trim().is_empty() {
            return Err(EmDiaError::Validation("PIX key cannot be empty".into()));
        }

        if self.notifications.days_before_due > 30 {
            return Err(EmDiaError::Validation(format!(
                "Reminder lead time must be at most 30 days, got {}",
                self.notifications.days_before_due
            )));
        }

        check_date_format(&self.display.date_format).map_err(EmDiaError::Validation)?;

        Ok(())
    }

    /// Update a single field addressed as `section.field`
    ///
    /// Returns the section name so callers can report what was saved. The
    /// previous value is kept if the result fails validation.
    pub fn set(&mut self, key: &str, value: &str) -> EmDiaResult<&'static str> {
        let mut updated = self.clone();
        let section = updated.apply(key, value)?;
        updated.validate()?;
        *self = updated;
        Ok(section)
    }

    fn apply(&mut self, key: &str, value: &str) -> EmDiaResult<&'static str> {
        let (section, field) = key.split_once('.').ok_or_else(|| {
            EmDiaError::Validation(format!("Expected 'section.field', got '{}'", key))
        })?;

        let unknown = || EmDiaError::Validation(format!("Unknown setting: '{}'", key));
        let value = value.trim();

        match section {
            "general" => {
                let target = match field {
                    "company_name" => &mut self.general.company_name,
                    "owner_name" => &mut self.general.owner_name,
                    "email" => &mut self.general.email,
                    "phone" => &mut self.general.phone,
                    _ => return Err(unknown()),
                };
                *target = value.to_string();
                Ok("general")
            }
            "notifications" => {
                let n = &mut self.notifications;
                match field {
                    "days_before_due" => n.days_before_due = parse_number(key, value)?,
                    "send_reminders" => n.send_reminders = parse_bool(key, value)?,
                    "send_receipts" => n.send_receipts = parse_bool(key, value)?,
                    "send_late_notices" => n.send_late_notices = parse_bool(key, value)?,
                    "late_notice_days" => {
                        n.late_notice_days = value
                            .split(',')
                            .filter(|s| !s.trim().is_empty())
                            .map(|s| parse_number(key, s.trim()))
                            .collect::<EmDiaResult<Vec<u32>>>()?;
                    }
                    _ => return Err(unknown()),
                }
                Ok("notifications")
            }
            "payment" => {
                let p = &mut self.payment;
                match field {
                    "pix_key" => p.pix_key = value.to_string(),
                    "pix_key_type" => {
                        p.pix_key_type = PixKeyType::parse(value).ok_or_else(|| {
                            EmDiaError::Validation(format!(
                                "Invalid PIX key type: '{}'. Valid types: cpf, cnpj, email, phone, random",
                                value
                            ))
                        })?;
                    }
                    "bank_name" => p.bank_name = value.to_string(),
                    "account_name" => p.account_name = value.to_string(),
                    "account_number" => p.account_number = value.to_string(),
                    "branch" => p.branch = value.to_string(),
                    _ => return Err(unknown()),
                }
                Ok("payment")
            }
            "whatsapp" => {
                let w = &mut self.whatsapp;
                match field {
                    "use_whatsapp" => w.use_whatsapp = parse_bool(key, value)?,
                    "phone_number" => w.phone_number = value.to_string(),
                    _ => return Err(unknown()),
                }
                Ok("whatsapp")
            }
            "display" => {
                match field {
                    "currency_symbol" => self.display.currency_symbol = value.to_string(),
                    "date_format" => self.display.date_format = value.to_string(),
                    _ => return Err(unknown()),
                }
                Ok("display")
            }
            "templates" => {
                let t = &mut self.templates;
                match field {
                    "unresolved" => {
                        t.unresolved = PlaceholderPolicy::parse(value).ok_or_else(|| {
                            EmDiaError::Validation(format!(
                                "Invalid placeholder policy: '{}'. Valid values: verbatim, reject",
                                value
                            ))
                        })?;
                    }
                    "reminder_template" => t.reminder_template = value.to_string(),
                    "late_notice_template" => t.late_notice_template = value.to_string(),
                    "receipt_template" => t.receipt_template = value.to_string(),
                    _ => return Err(unknown()),
                }
                Ok("templates")
            }
            _ => Err(unknown()),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> EmDiaResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" | "sim" => Ok(true),
        "false" | "no" | "off" | "0" | "nao" | "não" => Ok(false),
        _ => Err(EmDiaError::Validation(format!(
            "Expected a boolean for '{}', got '{}'",
            key, value
        ))),
    }
}

fn parse_number(key: &str, value: &str) -> EmDiaResult<u32> {
    value.parse().map_err(|_| {
        EmDiaError::Validation(format!("Expected a number for '{}', got '{}'", key, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.notifications.days_before_due, 3);
        assert_eq!(settings.notifications.late_notice_days, vec![3, 7, 15]);
        assert_eq!(settings.payment.pix_key_type, PixKeyType::Email);
        assert!(settings.whatsapp.use_whatsapp);
        assert_eq!(settings.templates.unresolved, PlaceholderPolicy::Verbatim);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EmDiaPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.general.company_name = "Imobiliária Teste".into();
        settings.notifications.send_receipts = false;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_partial_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("emdia.yaml");
        std::fs::write(
            &file,
            "payment:\n  pix_key: \"12.345.678/0001-90\"\n  pix_key_type: cnpj\nlog_level: debug\n",
        )
        .unwrap();

        let paths = EmDiaPaths::with_base_dir(temp_dir.path().to_path_buf()).with_config_file(&file);
        let loaded = Settings::load_or_create(&paths).unwrap();

        assert_eq!(loaded.payment.pix_key_type, PixKeyType::Cnpj);
        assert_eq!(loaded.payment.bank_name, "Banco XYZ");
        assert_eq!(loaded.log_level, "debug");
        assert_eq!(loaded.general, GeneralSettings::default());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EmDiaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_set_fields() {
        let mut settings = Settings::default();

        assert_eq!(
            settings.set("notifications.days_before_due", "5").unwrap(),
            "notifications"
        );
        assert_eq!(settings.notifications.days_before_due, 5);

        settings.set("notifications.late_notice_days", "1, 10").unwrap();
        assert_eq!(settings.notifications.late_notice_days, vec![1, 10]);

        settings.set("whatsapp.use_whatsapp", "off").unwrap();
        assert!(!settings.whatsapp.use_whatsapp);

        settings.set("payment.pix_key_type", "cpf").unwrap();
        assert_eq!(settings.payment.pix_key_type, PixKeyType::Cpf);

        settings.set("templates.unresolved", "reject").unwrap();
        assert_eq!(settings.templates.unresolved, PlaceholderPolicy::Reject);

        settings.set("templates.receipt_template", "Recibo").unwrap();
        assert_eq!(settings.templates.receipt_template, "Recibo");
        assert!(settings.set("whatsapp.connect_whatsapp_web", "true").is_err());
    }

    #[test]
    fn test_set_rejects_bad_input_and_keeps_old_value() {
        let mut settings = Settings::default();

        assert!(settings.set("general.email", "not-an-email").is_err());
        assert_eq!(settings.general.email, "seu.email@exemplo.com");

        assert!(settings.set("notifications.send_reminders", "maybe").is_err());
        assert!(settings.set("unknown.field", "x").is_err());
        assert!(settings.set("nodot", "x").is_err());
    }

    #[test]
    fn test_date_format_must_render_dates() {
        let mut settings = Settings::default();

        let err = settings.set("display.date_format", "%H:%M").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(settings.display.date_format, "%d/%m/%Y");

        assert!(settings.set("display.date_format", "%Q").is_err());
        assert_eq!(settings.display.date_format, "%d/%m/%Y");

        settings.set("display.date_format", "%Y-%m-%d").unwrap();
        assert_eq!(settings.display.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_load_rejects_bad_date_format() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EmDiaPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"display":{"date_format":"%Q"}}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(err.to_string().contains("Invalid date format '%Q'"));
    }
}
