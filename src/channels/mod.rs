//! Simulated outbound channels
//!
//! Messages and PIX charges never leave the process: the WhatsApp channel
//! records what it would have sent, and PIX charges carry a made-up link.

pub mod pix;
pub mod whatsapp;

pub use pix::{generate_charge, PixCharge};
pub use whatsapp::SimulatedWhatsApp;

use serde::Serialize;

use crate::error::EmDiaResult;

/// A message addressed to one tenant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    /// Tenant name as shown on the ledger
    pub recipient: String,
    /// Phone number, when a registered tenant matches the name
    pub phone: Option<String>,
    pub body: String,
}

/// Receipt returned by a channel for one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub channel: &'static str,
    pub recipient: String,
    /// Position of the message in the channel's outbox, starting at 1
    pub sequence: usize,
}

/// Anything that can deliver a rendered message to a tenant
pub trait MessageChannel {
    /// Channel name used in notices and logs
    fn name(&self) -> &'static str;

    fn send(&mut self, message: &OutgoingMessage) -> EmDiaResult<Delivery>;

    /// Messages delivered so far in this session
    fn sent(&self) -> &[OutgoingMessage];
}
