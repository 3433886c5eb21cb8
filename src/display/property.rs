//! Property display formatting

use tabled::Tabled;

use super::{money, render_table};
use crate::config::DisplaySettings;
use crate::models::Property;

#[derive(Tabled)]
struct PropertyRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Rooms")]
    rooms: u32,
    #[tabled(rename = "Rent")]
    rent: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Tenant")]
    tenant: String,
}

/// Format properties as a table
pub fn format_property_list(properties: &[Property], display: &DisplaySettings) -> String {
    if properties.is_empty() {
        return "No properties registered.".to_string();
    }

    render_table(properties.iter().map(|p| PropertyRow {
        id: p.id.to_string(),
        address: p.address.clone(),
        kind: p.kind.clone(),
        rooms: p.rooms,
        rent: money(p.rent, display),
        status: p.status.to_string(),
        tenant: p.tenant.clone().unwrap_or_else(|| "-".to_string()),
    }))
}

/// Format a single property
pub fn format_property_details(property: &Property, display: &DisplaySettings) -> String {
    let mut output = String::new();
    output.push_str(&format!("Property: {}\n", property.address));
    output.push_str(&format!("  ID:     {}\n", property.id));
    output.push_str(&format!("  Type:   {}\n", property.kind));
    output.push_str(&format!("  Rooms:  {}\n", property.rooms));
    output.push_str(&format!("  Rent:   {}\n", money(property.rent, display)));
    output.push_str(&format!("  Status: {}\n", property.status));
    if let Some(tenant) = &property.tenant {
        output.push_str(&format!("  Tenant: {}\n", tenant));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    #[test]
    fn test_property_list() {
        let storage = Storage::seeded();
        let text = format_property_list(storage.properties.all(), &DisplaySettings::default());

        assert!(text.contains("Address"));
        assert!(text.contains("prop-2"));
        assert!(text.contains("R$ 1.200,00"));
        assert!(text.contains("Maria Santos"));
        assert_eq!(
            format_property_list(&[], &DisplaySettings::default()),
            "No properties registered."
        );
    }

    #[test]
    fn test_property_details() {
        let storage = Storage::seeded();
        let text = format_property_details(&storage.properties.all()[2], &DisplaySettings::default());
        assert!(text.starts_with("Property: Rua Nova, 789 - Vila Nova\n"));
        assert!(text.contains("Tenant: Pedro Costa"));
    }
}
