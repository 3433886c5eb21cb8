//! Application state for one CLI invocation or one shell run

use chrono::NaiveDate;

use crate::channels::{MessageChannel, SimulatedWhatsApp};
use crate::config::Settings;
use crate::notice::Notice;
use crate::storage::Storage;

/// Records, settings, the outbound channel and queued notices
///
/// Services borrow the session mutably for the duration of one operation.
pub struct Session {
    pub storage: Storage,
    pub settings: Settings,
    /// The date reminders and the dashboard are computed for
    pub today: NaiveDate,
    channel: Box<dyn MessageChannel>,
    notices: Vec<Notice>,
}

impl Session {
    /// Create a session that sends through the simulated WhatsApp channel
    pub fn new(storage: Storage, settings: Settings, today: NaiveDate) -> Self {
        Self {
            storage,
            settings,
            today,
            channel: Box::new(SimulatedWhatsApp::new()),
            notices: Vec::new(),
        }
    }

    /// Session over the demo data with default settings
    pub fn demo(today: NaiveDate) -> Self {
        Self::new(Storage::seeded(), Settings::default(), today)
    }

    /// Replace the outbound channel
    pub fn with_channel(mut self, channel: Box<dyn MessageChannel>) -> Self {
        self.channel = channel;
        self
    }

    pub fn channel(&self) -> &dyn MessageChannel {
        self.channel.as_ref()
    }

    pub fn channel_mut(&mut self) -> &mut dyn MessageChannel {
        self.channel.as_mut()
    }

    /// Queue a notice for the user
    pub fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Take every queued notice, oldest first
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("today", &self.today)
            .field("channel", &self.channel.name())
            .field("notices", &self.notices.len())
            .finish_non_exhaustive()
    }
}
