//! Placeholder substitution
//!
//! A template body is split into literal text and `{identifier}` tokens in a
//! single left-to-right pass. Substituted values are copied as-is and never
//! scanned again, so the result does not depend on the order in which keys
//! were inserted into the value map.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{EmDiaError, EmDiaResult};

/// Values for placeholder substitution, keyed by placeholder name
pub type TemplateValues = HashMap<String, String>;

/// What to do with a placeholder that has no value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderPolicy {
    /// Leave the `{token}` in the output untouched
    #[default]
    Verbatim,
    /// Fail the render, naming every unresolved placeholder
    Reject,
}

impl PlaceholderPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "verbatim" | "keep" => Some(Self::Verbatim),
            "reject" | "strict" | "error" => Some(Self::Reject),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlaceholderPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Verbatim => write!(f, "verbatim"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    /// `raw` is the full token including braces
    Placeholder { name: &'a str, raw: &'a str },
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn segments(template: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find(|c: char| !is_identifier_char(c)) {
            Some(end) if end > 0 && after[end..].starts_with('}') => {
                if open > 0 {
                    out.push(Segment::Text(&rest[..open]));
                }
                out.push(Segment::Placeholder {
                    name: &after[..end],
                    raw: &rest[open..open + end + 2],
                });
                rest = &after[end + 1..];
            }
            _ => {
                // A lone '{' is literal text; keep scanning after it
                out.push(Segment::Text(&rest[..=open]));
                rest = after;
            }
        }
    }

    if !rest.is_empty() {
        out.push(Segment::Text(rest));
    }

    out
}

/// Substitute `{key}` tokens with their values
///
/// Tokens whose key is missing from `values` are left verbatim. Never fails.
///
/// # Examples
/// ```
/// use emdia_cli::templates::{render, TemplateValues};
///
/// let mut values = TemplateValues::new();
/// values.insert("a".to_string(), "1".to_string());
/// assert_eq!(render("{a}-{b}", &values), "1-{b}");
/// ```
pub fn render(template: &str, values: &TemplateValues) -> String {
    let mut out = String::with_capacity(template.len());

    for segment in segments(template) {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Placeholder { name, raw } => match values.get(name) {
                Some(value) => out.push_str(value),
                None => out.push_str(raw),
            },
        }
    }

    out
}

/// Like [`render`], but fails if any placeholder has no value
pub fn render_strict(template: &str, values: &TemplateValues) -> EmDiaResult<String> {
    let missing: Vec<String> = placeholders(template)
        .into_iter()
        .filter(|name| !values.contains_key(*name))
        .map(str::to_string)
        .collect();

    if !missing.is_empty() {
        return Err(EmDiaError::UnresolvedPlaceholders(missing));
    }

    Ok(render(template, values))
}

/// Render according to the configured policy
pub fn render_with_policy(
    template: &str,
    values: &TemplateValues,
    policy: PlaceholderPolicy,
) -> EmDiaResult<String> {
    match policy {
        PlaceholderPolicy::Verbatim => Ok(render(template, values)),
        PlaceholderPolicy::Reject => render_strict(template, values),
    }
}

/// Distinct placeholder names in order of first appearance
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for segment in segments(template) {
        if let Segment::Placeholder { name, .. } = segment {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}
