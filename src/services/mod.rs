//! Service layer for EmDia
//!
//! Services wrap a mutable borrow of the [`Session`](crate::session::Session)
//! and carry out one user action each: validation, cross-entity updates,
//! simulated sends and the notice reporting the outcome.

pub mod billing;
pub mod property;
pub mod settings;
pub mod template;
pub mod tenant;

pub use billing::{BillingService, NewCharge};
pub use property::PropertyService;
pub use settings::SettingsService;
pub use template::TemplateService;
pub use tenant::{NewTenant, TenantService};

use crate::config::Settings;
use crate::error::{EmDiaError, EmDiaResult};

/// Fail unless WhatsApp sending is switched on
pub(crate) fn ensure_whatsapp(settings: &Settings) -> EmDiaResult<()> {
    if settings.whatsapp.use_whatsapp {
        Ok(())
    } else {
        Err(EmDiaError::Channel(
            "WhatsApp is disabled (whatsapp.use_whatsapp = false)".into(),
        ))
    }
}

#[cfg(test)]
pub(crate) fn test_session() -> crate::session::Session {
    let today = chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    crate::session::Session::demo(today)
}
