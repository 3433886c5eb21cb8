//! Settings display formatting

use crate::config::Settings;
use crate::error::{EmDiaError, EmDiaResult};

/// Section names accepted by `settings show <section>`
pub const SECTIONS: [&str; 6] = [
    "general",
    "notifications",
    "payment",
    "whatsapp",
    "display",
    "templates",
];

/// Format all settings, or one section, as YAML
pub fn format_settings(settings: &Settings, section: Option<&str>) -> EmDiaResult<String> {
    let value = serde_yaml::to_value(settings)?;

    let shown = match section {
        None => value,
        Some(name) => {
            let name = name.trim().to_lowercase();
            if !SECTIONS.contains(&name.as_str()) {
                return Err(EmDiaError::Validation(format!(
                    "Unknown settings section '{}' (expected one of: {})",
                    name,
                    SECTIONS.join(", ")
                )));
            }
            let mut wrapper = serde_yaml::Mapping::new();
            let inner = value.get(name.as_str()).cloned().unwrap_or_default();
            wrapper.insert(serde_yaml::Value::String(name), inner);
            serde_yaml::Value::Mapping(wrapper)
        }
    };

    Ok(serde_yaml::to_string(&shown)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_section() {
        let text = format_settings(&Settings::default(), Some("Notifications")).unwrap();
        assert!(text.starts_with("notifications:"));
        assert!(text.contains("days_before_due: 3"));
        assert!(!text.contains("pix_key"));
    }

    #[test]
    fn test_all_sections() {
        let text = format_settings(&Settings::default(), None).unwrap();
        for section in SECTIONS {
            assert!(text.contains(&format!("{}:", section)));
        }
        assert!(text.contains("unresolved: verbatim"));
    }

    #[test]
    fn test_unknown_section() {
        let err = format_settings(&Settings::default(), Some("billing")).unwrap_err();
        assert!(err.is_validation());
    }
}
