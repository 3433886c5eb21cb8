//! Tenant display formatting

use tabled::Tabled;

use super::{money, render_table};
use crate::config::DisplaySettings;
use crate::models::Tenant;

#[derive(Tabled)]
struct TenantRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Property")]
    property: String,
    #[tabled(rename = "Rent")]
    rent: String,
    #[tabled(rename = "Due day")]
    due_day: u8,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format tenants as a table
pub fn format_tenant_list(tenants: &[Tenant], display: &DisplaySettings) -> String {
    if tenants.is_empty() {
        return "No tenants registered.".to_string();
    }

    render_table(tenants.iter().map(|t| TenantRow {
        id: t.id.to_string(),
        name: t.name.clone(),
        phone: t.phone.clone(),
        property: t.property.clone(),
        rent: money(t.rent, display),
        due_day: t.due_day,
        status: t.status.to_string(),
    }))
}

/// Format a single tenant
pub fn format_tenant_details(tenant: &Tenant, display: &DisplaySettings) -> String {
    let mut output = String::new();
    output.push_str(&format!("Tenant: {}\n", tenant.name));
    output.push_str(&format!("  ID:       {}\n", tenant.id));
    output.push_str(&format!("  Email:    {}\n", tenant.email));
    output.push_str(&format!("  Phone:    {}\n", tenant.phone));
    output.push_str(&format!("  Property: {}\n", tenant.property));
    output.push_str(&format!("  Rent:     {}\n", money(tenant.rent, display)));
    output.push_str(&format!("  Due day:  {}\n", tenant.due_day));
    output.push_str(&format!("  Status:   {}\n", tenant.status));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    #[test]
    fn test_tenant_list() {
        let storage = Storage::seeded();
        let text = format_tenant_list(storage.tenants.all(), &DisplaySettings::default());

        assert!(text.contains("Due day"));
        assert!(text.contains("(11) 77777-7777"));
        assert_eq!(
            format_tenant_list(&[], &DisplaySettings::default()),
            "No tenants registered."
        );
    }

    #[test]
    fn test_tenant_details_with_custom_symbol() {
        let storage = Storage::seeded();
        let display = DisplaySettings {
            currency_symbol: "BRL".into(),
            ..Default::default()
        };
        let text = format_tenant_details(&storage.tenants.all()[0], &display);
        assert!(text.contains("Rent:     BRL 850,00"));
    }
}
