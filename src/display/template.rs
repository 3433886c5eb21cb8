//! Message template display formatting

use tabled::Tabled;

use super::render_table;
use crate::models::MessageTemplate;
use crate::templates::TemplateVariable;

/// Longest body preview shown in the template table
const PREVIEW_CHARS: usize = 48;

#[derive(Tabled)]
struct TemplateRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Placeholders")]
    placeholders: String,
    #[tabled(rename = "Message")]
    preview: String,
}

fn preview(body: &str) -> String {
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(PREVIEW_CHARS - 1).collect();
        format!("{}…", cut)
    }
}

/// Format templates as a table
pub fn format_template_list(templates: &[MessageTemplate]) -> String {
    if templates.is_empty() {
        return "No message templates.".to_string();
    }

    render_table(templates.iter().map(|t| TemplateRow {
        id: t.id.to_string(),
        name: t.name.clone(),
        placeholders: t.placeholders().join(", "),
        preview: preview(&t.body),
    }))
}

/// Format a single template with its full body
pub fn format_template_details(template: &MessageTemplate) -> String {
    format!(
        "{} ({})\n\n{}\n\nPlaceholders: {}\n",
        template.name,
        template.id,
        template.body,
        template
            .placeholders()
            .iter()
            .map(|p| format!("{{{}}}", p))
            .collect::<Vec<_>>()
            .join(" ")
    )
}

/// Format the list of standard placeholders
pub fn format_variables(variables: &[TemplateVariable]) -> String {
    variables
        .iter()
        .map(|v| format!("{:<14} {}\n", v.token(), v.description()))
        .collect()
}
