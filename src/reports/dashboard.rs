//! Dashboard Report
//!
//! The four headline cards (revenue, properties, active tenants, dues today),
//! the occupancy card, the alerts card and the recent payments list.
//!
//! Contract expiry alerts are not reported: leases carry no end date.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::{DisplaySettings, NotificationSettings};
use crate::ledger::{due_reminders, summarize};
use crate::models::{BillingRecord, Money, PropertyStatus, TenantStatus};
use crate::storage::Storage;
use crate::templates::format_date;

/// Number of records shown under "Recent payments"
pub const RECENT_PAYMENTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    /// Date the report was computed for
    pub today: NaiveDate,
    /// Sum of every charge on the ledger
    pub monthly_revenue: Money,
    pub properties: usize,
    pub active_tenants: usize,
    pub occupied: usize,
    pub vacant: usize,
    /// Occupied properties as a whole percentage of all properties
    pub occupancy_percent: u32,
    /// Charges past their due date and still unpaid
    pub overdue: usize,
    /// Reminders a reminder run would send today
    pub reminders_today: usize,
    /// Unpaid charges falling due today
    pub due_today: usize,
    pub due_today_amount: Money,
    pub recent_payments: Vec<BillingRecord>,
}

impl DashboardReport {
    /// Generate the dashboard for `today`
    pub fn generate(
        storage: &Storage,
        today: NaiveDate,
        notifications: &NotificationSettings,
    ) -> Self {
        let billings = storage.billings.all();
        let properties = storage.properties.all();

        let occupied = properties
            .iter()
            .filter(|p| p.status == PropertyStatus::Occupied)
            .count();
        let occupancy_percent = if properties.is_empty() {
            0
        } else {
            ((occupied * 100 + properties.len() / 2) / properties.len()) as u32
        };

        let due_today: Vec<&BillingRecord> = billings
            .iter()
            .filter(|r| r.due_date == today && !r.is_paid())
            .collect();

        Self {
            today,
            monthly_revenue: billings.iter().map(|r| r.amount).sum(),
            properties: properties.len(),
            active_tenants: storage
                .tenants
                .all()
                .iter()
                .filter(|t| t.status == TenantStatus::Active)
                .count(),
            occupied,
            vacant: properties.len() - occupied,
            occupancy_percent,
            overdue: summarize(billings).overdue,
            reminders_today: due_reminders(billings, today, notifications).len(),
            due_today: due_today.len(),
            due_today_amount: due_today.iter().map(|r| r.amount).sum(),
            recent_payments: billings.iter().take(RECENT_PAYMENTS).cloned().collect(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, display: &DisplaySettings) -> String {
        let money = |m: Money| m.format_with_symbol(&display.currency_symbol);
        let mut output = String::new();

        output.push_str(&format!(
            "Dashboard ({})\n",
            format_date(self.today, &display.date_format)
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        output.push_str(&format!(
            "{:<22} {:>18}\n",
            "Monthly revenue:",
            money(self.monthly_revenue)
        ));
        output.push_str(&format!("{:<22} {:>18}\n", "Properties:", self.properties));
        output.push_str(&format!(
            "{:<22} {:>18}   {}% occupancy\n",
            "Active tenants:", self.active_tenants, self.occupancy_percent
        ));
        output.push_str(&format!(
            "{:<22} {:>18}   {} to receive\n",
            "Due today:",
            self.due_today,
            money(self.due_today_amount)
        ));
        output.push('\n');

        output.push_str(&format!(
            "Occupancy: {}/{} ({}%)   {} occupied, {} vacant\n",
            self.occupied, self.properties, self.occupancy_percent, self.occupied, self.vacant
        ));
        output.push('\n');

        if self.overdue > 0 || self.reminders_today > 0 {
            output.push_str("Alerts\n");
            output.push_str(&format!("  • {} rents overdue\n", self.overdue));
            output.push_str(&format!(
                "  • {} automatic reminders go out today\n",
                self.reminders_today
            ));
            output.push('\n');
        }

        output.push_str("Recent payments\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');

        if self.recent_payments.is_empty() {
            output.push_str("No charges yet.\n");
        }
        for record in &self.recent_payments {
            output.push_str(&format!(
                "{:<16} {:<22} {:>14}  {:<10} {}\n",
                record.tenant_name,
                record.property_label,
                money(record.amount),
                record.status,
                record.due_date.format("%d/%m"),
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::{Property, PropertyId};

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn notifications() -> NotificationSettings {
        NotificationSettings::default()
    }

    #[test]
    fn test_demo_dashboard() {
        let report = DashboardReport::generate(&Storage::seeded(), march(10), &notifications());

        assert_eq!(report.monthly_revenue, Money::from_reais(850 + 1200 + 750 + 950));
        assert_eq!(report.properties, 3);
        assert_eq!(report.active_tenants, 2);
        assert_eq!(report.occupied, 3);
        assert_eq!(report.vacant, 0);
        assert_eq!(report.occupancy_percent, 100);
        assert_eq!(report.overdue, 1);
        assert_eq!(report.reminders_today, 0);
        assert_eq!(report.due_today, 1);
        assert_eq!(report.due_today_amount, Money::from_reais(1200));

        let recent: Vec<&str> = report
            .recent_payments
            .iter()
            .map(|r| r.tenant_name.as_str())
            .collect();
        assert_eq!(recent, vec!["João Silva", "Maria Santos", "Pedro Costa"]);
    }

    #[test]
    fn test_alerts_and_vacancy() {
        let mut storage = Storage::seeded();
        storage
            .properties
            .insert(Property::new(
                PropertyId::new(4),
                "Rua do Sol, 10 - Centro",
                "Kitnet",
                1,
                Money::from_reais(600),
            ))
            .unwrap();

        // Pedro Costa's charge is seven days late on the 9th
        let report = DashboardReport::generate(&storage, march(9), &notifications());
        assert_eq!(report.occupied, 3);
        assert_eq!(report.vacant, 1);
        assert_eq!(report.occupancy_percent, 75);
        assert_eq!(report.reminders_today, 1);

        let text = report.format_terminal(&DisplaySettings::default());
        assert!(text.contains("Occupancy: 3/4 (75%)   3 occupied, 1 vacant"));
        assert!(text.contains("• 1 rents overdue"));
        assert!(text.contains("• 1 automatic reminders go out today"));
    }

    #[test]
    fn test_paid_charges_not_due() {
        let report = DashboardReport::generate(&Storage::seeded(), march(5), &notifications());
        assert_eq!(report.due_today, 0);
        assert!(report.due_today_amount.is_zero());
    }

    #[test]
    fn test_empty_storage() {
        let report = DashboardReport::generate(&Storage::empty(), march(1), &notifications());
        assert_eq!(report.occupancy_percent, 0);
        assert!(report.recent_payments.is_empty());
        assert_eq!(report.vacant, 0);
        assert!(!report
            .format_terminal(&DisplaySettings::default())
            .contains("Alerts"));
        assert!(report
            .format_terminal(&DisplaySettings::default())
            .contains("No charges yet."));
    }

    #[test]
    fn test_format_terminal() {
        let report = DashboardReport::generate(&Storage::seeded(), march(10), &notifications());
        let text = report.format_terminal(&DisplaySettings::default());

        assert!(text.starts_with("Dashboard (10/03/2024)"));
        assert!(text.contains("R$ 3.750,00"));
        assert!(text.contains("100% occupancy"));
        assert!(text.contains("Maria Santos"));
    }
}
