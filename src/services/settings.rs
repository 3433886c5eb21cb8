//! Settings service
//!
//! Edits apply to the session only; the settings file is never rewritten.

use tracing::info;

use crate::config::Settings;
use crate::error::EmDiaResult;
use crate::notice::Notice;
use crate::session::Session;

pub struct SettingsService<'a> {
    session: &'a mut Session,
}

impl<'a> SettingsService<'a> {
    pub fn new(session: &'a mut Session) -> Self {
        Self { session }
    }

    pub fn show(&self) -> &Settings {
        &self.session.settings
    }

    /// Update one `section.field` value
    pub fn set(&mut self, key: &str, value: &str) -> EmDiaResult<&'static str> {
        let section = self.session.settings.set(key, value)?;
        info!(key, value, "Setting changed");

        self.session.notify(Notice::success(
            "Settings saved",
            format!("Your {} settings were updated.", section),
        ));

        Ok(section)
    }
}
