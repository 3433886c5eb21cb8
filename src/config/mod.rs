//! Configuration module for EmDia
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution for the settings file
//! - Settings sections (general, notifications, payment, WhatsApp)
//! - Display, template and logging preferences

pub mod paths;
pub mod settings;

pub use paths::EmDiaPaths;
pub use settings::{
    DisplaySettings, GeneralSettings, NotificationSettings, PaymentSettings, PixKeyType,
    Settings, TemplateSettings, WhatsappSettings,
};
