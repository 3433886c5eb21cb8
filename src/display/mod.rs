//! Display formatting for terminal output
//!
//! Every formatter returns a `String`; printing is left to the CLI.

pub mod billing;
pub mod property;
pub mod settings;
pub mod template;
pub mod tenant;

pub use billing::{
    format_billing_details, format_billing_list, format_due_list, format_pix_charge,
    format_summary_cards,
};
pub use property::{format_property_details, format_property_list};
pub use settings::format_settings;
pub use template::{format_template_details, format_template_list, format_variables};
pub use tenant::{format_tenant_details, format_tenant_list};

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::DisplaySettings;
use crate::models::Money;

/// Render rows in the shared table style
pub(crate) fn render_table<R, I>(rows: I) -> String
where
    R: Tabled,
    I: IntoIterator<Item = R>,
{
    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

/// Format an amount with the configured currency symbol
pub(crate) fn money(amount: Money, display: &DisplaySettings) -> String {
    amount.format_with_symbol(&display.currency_symbol)
}
