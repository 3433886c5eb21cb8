//! Billing service
//!
//! Read views over the ledger plus the two actions the dashboard offers per
//! charge: generating a PIX charge and sending a reminder, plus a payment
//! receipt for paid charges. Sending a reminder is the only change ever made
//! to an existing record.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::ensure_whatsapp;
use crate::channels::{generate_charge, Delivery, OutgoingMessage, PixCharge};
use crate::error::{EmDiaError, EmDiaResult};
use crate::ledger::{self, BillingSummary, DueReminder, StatusFilter};
use crate::models::{BillingId, BillingRecord, BillingStatus, Money};
use crate::notice::Notice;
use crate::session::Session;
use crate::templates::{billing_values, render_with_policy};

/// Fields for a new charge
#[derive(Debug, Clone)]
pub struct NewCharge {
    pub tenant_name: String,
    /// Property label; the tenant's address when absent
    pub property_label: Option<String>,
    pub amount: Money,
    pub due_date: NaiveDate,
    pub status: BillingStatus,
}

/// Service for the billing ledger
pub struct BillingService<'a> {
    session: &'a mut Session,
}

impl<'a> BillingService<'a> {
    /// Create a new billing service
    pub fn new(session: &'a mut Session) -> Self {
        Self { session }
    }

    /// Records in a status bucket, in ledger order
    pub fn list(&self, filter: StatusFilter) -> Vec<&BillingRecord> {
        ledger::filter_by_status(self.session.storage.billings.all(), filter)
    }

    /// Counts and totals over the whole ledger
    pub fn summary(&self) -> BillingSummary {
        ledger::summarize(self.session.storage.billings.all())
    }

    pub fn get(&self, id: BillingId) -> Option<&BillingRecord> {
        self.session.storage.billings.get(id)
    }

    /// Find a record or fail with `NotFound`
    pub fn require(&self, id: BillingId) -> EmDiaResult<&BillingRecord> {
        debug!(id = %id, "Looking up billing record");
        self.get(id)
            .ok_or_else(|| EmDiaError::billing_not_found(id.to_string()))
    }

    /// Add a charge to the ledger
    ///
    /// Charges enter as Scheduled or Pending; Paid and Overdue are only ever
    /// assigned outside the application.
    pub fn create(&mut self, charge: &NewCharge) -> EmDiaResult<BillingRecord> {
        if !charge.status.is_initial() {
            return Err(EmDiaError::Validation(format!(
                "New charges must be pending or scheduled, not {}",
                charge.status
            )));
        }

        let property_label = match &charge.property_label {
            Some(label) => label.clone(),
            None => self
                .session
                .storage
                .tenants
                .find(|t| t.matches_name(&charge.tenant_name))
                .map(|t| t.property.clone())
                .unwrap_or_default(),
        };

        let id = self.session.storage.billings.next_id()?;
        let record = BillingRecord::new(
            id,
            &charge.tenant_name,
            property_label,
            charge.amount,
            charge.due_date,
            charge.status,
        );

        record
            .validate()
            .map_err(|e| EmDiaError::Validation(e.to_string()))?;

        self.session.storage.billings.insert(record.clone())?;
        info!(id = %record.id, tenant = %record.tenant_name, amount = %record.amount, "Charge created");

        self.session.notify(Notice::success(
            "Charge created",
            format!("{} for {}", record.amount, record.tenant_name),
        ));

        Ok(record)
    }

    /// Generate a simulated PIX charge for a record
    pub fn generate_pix(&mut self, id: BillingId) -> EmDiaResult<PixCharge> {
        let record = self.require(id)?;
        let charge = generate_charge(record, &self.session.settings.payment)?;
        let tenant = record.tenant_name.clone();

        info!(id = %id, link = %charge.link, "PIX charge generated");
        self.session.notify(Notice::success(
            "PIX generated!",
            format!("PIX code created for {}", tenant),
        ));

        Ok(charge)
    }

    /// Send a reminder for one record and flag it as reminded
    ///
    /// Overdue records use the late-notice template and may be reminded again;
    /// other unpaid records get one reminder.
    pub fn send_reminder(&mut self, id: BillingId) -> EmDiaResult<Delivery> {
        let record = self.require(id)?.clone();

        if record.is_paid() {
            return Err(EmDiaError::Validation(format!("{} is already paid", id)));
        }
        if !record.can_send_reminder() {
            return Err(EmDiaError::Validation(format!(
                "Reminder already sent for {}",
                id
            )));
        }

        ensure_whatsapp(&self.session.settings)?;

        let templates = &self.session.settings.templates;
        let template_name = if record.status == BillingStatus::Overdue {
            templates.late_notice_template.clone()
        } else {
            templates.reminder_template.clone()
        };
        let delivery = self.deliver(&record, &template_name)?;

        self.session
            .storage
            .billings
            .replace(record.with_reminder_sent())?;

        info!(id = %id, tenant = %record.tenant_name, channel = delivery.channel, "Reminder sent");
        self.session.notify(Notice::success(
            "Reminder sent!",
            format!("Charge sent to {} via {}", record.tenant_name, delivery.channel),
        ));

        Ok(delivery)
    }

    /// Send a payment confirmation for a paid record
    ///
    /// Uses the receipt template; the record itself is left unchanged.
    pub fn send_receipt(&mut self, id: BillingId) -> EmDiaResult<Delivery> {
        let record = self.require(id)?.clone();

        if !record.is_paid() {
            return Err(EmDiaError::Validation(format!(
                "{} is not paid yet ({})",
                id, record.status
            )));
        }
        if !self.session.settings.notifications.send_receipts {
            return Err(EmDiaError::Validation(
                "Receipts are disabled (notifications.send_receipts = false)".into(),
            ));
        }
        ensure_whatsapp(&self.session.settings)?;

        let template_name = self.session.settings.templates.receipt_template.clone();
        let delivery = self.deliver(&record, &template_name)?;

        info!(id = %id, tenant = %record.tenant_name, channel = delivery.channel, "Receipt sent");
        self.session.notify(Notice::success(
            "Receipt sent!",
            format!(
                "Payment confirmation sent to {} via {}",
                record.tenant_name, delivery.channel
            ),
        ));

        Ok(delivery)
    }

    /// Render a template for a record and send it to the tenant
    fn deliver(&mut self, record: &BillingRecord, template_name: &str) -> EmDiaResult<Delivery> {
        let settings = &self.session.settings;
        let template = self
            .session
            .storage
            .templates
            .find(|t| t.matches_name(template_name))
            .ok_or_else(|| EmDiaError::template_not_found(template_name))?;

        let link = generate_charge(record, &settings.payment)
            .ok()
            .map(|charge| charge.link);
        let values = billing_values(record, link.as_deref(), &settings.display.date_format);
        let body = render_with_policy(&template.body, &values, settings.templates.unresolved)?;

        // the phone is known only when a registered tenant carries the ledger name
        let phone = self
            .session
            .storage
            .tenants
            .find(|t| t.matches_name(&record.tenant_name))
            .map(|t| t.phone.clone());

        let message = OutgoingMessage {
            recipient: record.tenant_name.clone(),
            phone,
            body,
        };
        self.session.channel_mut().send(&message)
    }

    /// Send a reminder for every record that can take one
    ///
    /// Records that fail individually are skipped; the deliveries that went
    /// out are returned.
    pub fn send_all_reminders(&mut self) -> EmDiaResult<Vec<Delivery>> {
        ensure_whatsapp(&self.session.settings)?;

        let candidates: Vec<BillingId> = self
            .session
            .storage
            .billings
            .all()
            .iter()
            .filter(|r| r.can_send_reminder())
            .map(|r| r.id)
            .collect();

        let mut deliveries = Vec::new();
        for id in candidates {
            match self.send_reminder(id) {
                Ok(delivery) => deliveries.push(delivery),
                Err(e) => warn!(id = %id, error = %e, "Skipping reminder"),
            }
        }

        Ok(deliveries)
    }

    /// Records due for an upcoming or late reminder on the session's date
    pub fn due(&self) -> Vec<DueReminder<'_>> {
        ledger::due_reminders(
            self.session.storage.billings.all(),
            self.session.today,
            &self.session.settings.notifications,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::ReminderKind;
    use crate::services::test_session;
    use crate::templates::PlaceholderPolicy;

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_list_and_summary() {
        let mut session = test_session();
        let service = BillingService::new(&mut session);

        let pending: Vec<u64> = service
            .list(BillingStatus::Pending.into())
            .iter()
            .map(|r| r.id.value())
            .collect();
        assert_eq!(pending, vec![2]);
        assert_eq!(service.list(StatusFilter::All).len(), 4);

        let summary = service.summary();
        assert_eq!(summary.record_count(), 4);
        assert_eq!(summary.total, Money::from_reais(850 + 1200 + 750 + 950));
    }

    #[test]
    fn test_reminder_renders_and_flags_record() {
        let mut session = test_session();
        let delivery = BillingService::new(&mut session)
            .send_reminder(BillingId::new(4))
            .unwrap();

        assert_eq!(delivery.recipient, "Ana Paula");
        assert!(session.storage.billings.get(BillingId::new(4)).unwrap().reminder_sent);

        let sent = &session.channel().sent()[0];
        assert!(sent.body.starts_with("Olá Ana Paula, lembro que o aluguel no valor de R$ 950,00 vence no dia 15/03/2024."));
        assert!(sent.body.contains("pix:exemplo@chavepix.com.br?amount=950.00&ref=bil-4"));
        assert!(sent.phone.is_none());

        let notice = &session.notices()[0];
        assert_eq!(notice.title, "Reminder sent!");
        assert_eq!(notice.description, "Charge sent to Ana Paula via WhatsApp");
    }

    #[test]
    fn test_reminder_refused_for_paid_and_already_sent() {
        let mut session = test_session();
        let mut service = BillingService::new(&mut session);

        let paid = service.send_reminder(BillingId::new(1)).unwrap_err();
        assert!(paid.to_string().contains("already paid"));

        let repeat = service.send_reminder(BillingId::new(2)).unwrap_err();
        assert!(repeat.to_string().contains("already sent"));

        assert!(session.channel().sent().is_empty());
    }

    #[test]
    fn test_overdue_uses_late_notice_and_can_repeat() {
        let mut session = test_session();
        let mut service = BillingService::new(&mut session);

        service.send_reminder(BillingId::new(3)).unwrap();
        service.send_reminder(BillingId::new(3)).unwrap();

        let sent = session.channel().sent();
        assert_eq!(sent.len(), 2);
        assert!(sent[0].body.contains("vencido no dia 02/03/2024 ainda não foi pago"));
        assert_eq!(sent[0].phone.as_deref(), Some("(11) 77777-7777"));
    }

    #[test]
    fn test_reject_policy_blocks_unresolved() {
        let mut session = test_session();
        session.settings.templates.unresolved = PlaceholderPolicy::Reject;
        session.storage.templates = crate::storage::Repository::from_vec(vec![
            crate::models::MessageTemplate::new(
                crate::models::TemplateId::new(1),
                "Lembrete de Aluguel",
                "Olá {nome}, código {codigo}",
            ),
        ])
        .unwrap();

        let err = BillingService::new(&mut session)
            .send_reminder(BillingId::new(4))
            .unwrap_err();

        assert!(matches!(err, EmDiaError::UnresolvedPlaceholders(ref names) if names == &["codigo"]));
        assert!(!session.storage.billings.get(BillingId::new(4)).unwrap().reminder_sent);
    }

    #[test]
    fn test_missing_template_is_not_found() {
        let mut session = test_session();
        session.settings.templates.reminder_template = "Inexistente".into();

        let err = BillingService::new(&mut session)
            .send_reminder(BillingId::new(4))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_send_all_reminders() {
        let mut session = test_session();
        let sent = BillingService::new(&mut session).send_all_reminders().unwrap();

        // Pedro (overdue) and Ana (scheduled); João is paid, Maria already reminded
        let recipients: Vec<&str> = sent.iter().map(|d| d.recipient.as_str()).collect();
        assert_eq!(recipients, vec!["Pedro Costa", "Ana Paula"]);
        assert!(session.storage.billings.all().iter().all(|r| r.reminder_sent));
    }

    #[test]
    fn test_whatsapp_disabled() {
        let mut session = test_session();
        session.settings.whatsapp.use_whatsapp = false;
        let mut service = BillingService::new(&mut session);

        assert!(matches!(
            service.send_reminder(BillingId::new(4)),
            Err(EmDiaError::Channel(_))
        ));
        assert!(matches!(service.send_all_reminders(), Err(EmDiaError::Channel(_))));
    }

    #[test]
    fn test_receipt_for_paid_record() {
        let mut session = test_session();
        let delivery = BillingService::new(&mut session)
            .send_receipt(BillingId::new(1))
            .unwrap();

        let sent = &session.channel().sent()[0];
        assert_eq!(sent.recipient, delivery.recipient);
        assert!(sent.body.contains("confirmamos o recebimento do pagamento de aluguel no valor de R$ 850,00"));
        assert!(!sent.body.contains("pix:"));

        let notice = &session.notices()[0];
        assert_eq!(notice.title, "Receipt sent!");
        assert!(notice.description.starts_with("Payment confirmation sent to"));
    }

    #[test]
    fn test_receipt_refused_when_unpaid_or_disabled() {
        let mut session = test_session();
        let unpaid = BillingService::new(&mut session)
            .send_receipt(BillingId::new(3))
            .unwrap_err();
        assert!(unpaid.to_string().contains("not paid yet"));

        session.settings.notifications.send_receipts = false;
        let disabled = BillingService::new(&mut session)
            .send_receipt(BillingId::new(1))
            .unwrap_err();
        assert!(disabled.to_string().contains("Receipts are disabled"));

        assert!(session.channel().sent().is_empty());
        assert!(!session.storage.billings.get(BillingId::new(3)).unwrap().reminder_sent);
    }

    #[test]
    fn test_generate_pix() {
        let mut session = test_session();
        let mut service = BillingService::new(&mut session);

        let charge = service.generate_pix(BillingId::new(2)).unwrap();
        assert_eq!(charge.amount, Money::from_reais(1200));
        assert!(service.generate_pix(BillingId::new(1)).unwrap_err().is_validation());
        assert!(service.generate_pix(BillingId::new(99)).unwrap_err().is_not_found());

        assert_eq!(session.notices()[0].description, "PIX code created for Maria Santos");
    }

    #[test]
    fn test_create_charge() {
        let mut session = test_session();
        let mut service = BillingService::new(&mut session);

        let record = service
            .create(&NewCharge {
                tenant_name: "Maria Santos".into(),
                property_label: None,
                amount: Money::from_reais(1200),
                due_date: march(10),
                status: BillingStatus::Scheduled,
            })
            .unwrap();

        assert_eq!(record.id, BillingId::new(5));
        assert_eq!(record.property_label, "Av. Principal, 456 - Jardins");
        assert!(!record.reminder_sent);
        assert!(record.payment_date.is_none());
    }

    #[test]
    fn test_create_rejects_non_initial_status() {
        let mut session = test_session();
        let err = BillingService::new(&mut session)
            .create(&NewCharge {
                tenant_name: "Maria Santos".into(),
                property_label: None,
                amount: Money::from_reais(1200),
                due_date: march(10),
                status: BillingStatus::Paid,
            })
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_create_unknown_tenant_needs_property() {
        let mut session = test_session();
        let err = BillingService::new(&mut session)
            .create(&NewCharge {
                tenant_name: "Carla Dias".into(),
                property_label: None,
                amount: Money::from_reais(600),
                due_date: march(12),
                status: BillingStatus::Pending,
            })
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_due_uses_session_date() {
        let mut session = test_session();
        session.today = march(12);
        let service = BillingService::new(&mut session);

        let due: Vec<(u64, ReminderKind)> = service
            .due()
            .iter()
            .map(|d| (d.record.id.value(), d.kind))
            .collect();

        // Pedro is 10 days late (not a notice day); Ana is 3 days out
        assert_eq!(due, vec![(4, ReminderKind::Upcoming)]);
    }
}
