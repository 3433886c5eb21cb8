//! WhatsApp channel that only records messages

use tracing::info;

use super::{Delivery, MessageChannel, OutgoingMessage};
use crate::error::{EmDiaError, EmDiaResult};

#[derive(Debug, Clone, Default)]
pub struct SimulatedWhatsApp {
    outbox: Vec<OutgoingMessage>,
}

impl SimulatedWhatsApp {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageChannel for SimulatedWhatsApp {
    fn name(&self) -> &'static str {
        "WhatsApp"
    }

    fn send(&mut self, message: &OutgoingMessage) -> EmDiaResult<Delivery> {
        if message.body.trim().is_empty() {
            return Err(EmDiaError::Channel("Refusing to send an empty message".into()));
        }

        self.outbox.push(message.clone());
        info!(
            recipient = %message.recipient,
            phone = message.phone.as_deref().unwrap_or("-"),
            chars = message.body.chars().count(),
            "Simulated WhatsApp message"
        );

        Ok(Delivery {
            channel: self.name(),
            recipient: message.recipient.clone(),
            sequence: self.outbox.len(),
        })
    }

    fn sent(&self) -> &[OutgoingMessage] {
        &self.outbox
    }
}
