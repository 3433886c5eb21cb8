//! Message template model
//!
//! A named message body with `{placeholder}` tokens, rendered by
//! [`crate::templates::render`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TemplateId;
use crate::storage::Record;
use crate::templates;

/// A message template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub id: TemplateId,
    pub name: String,
    pub body: String,
}

/// Partial update for a template; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct TemplateUpdate {
    pub name: Option<String>,
    pub body: Option<String>,
}

impl MessageTemplate {
    pub fn new(id: TemplateId, name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into().trim().to_string(),
            body: body.into(),
        }
    }

    /// Return a copy with the update applied
    pub fn updated(&self, update: &TemplateUpdate) -> Self {
        Self {
            id: self.id,
            name: update
                .name
                .as_deref()
                .map(|n| n.trim().to_string())
                .unwrap_or_else(|| self.name.clone()),
            body: update.body.clone().unwrap_or_else(|| self.body.clone()),
        }
    }

    /// Placeholder names used in the body, in order of first appearance
    pub fn placeholders(&self) -> Vec<&str> {
        templates::placeholders(&self.body)
    }

    /// Check if this template matches a name (case-insensitive)
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    /// Validate the template
    pub fn validate(&self) -> Result<(), TemplateValidationError> {
        if self.name.trim().is_empty() {
            return Err(TemplateValidationError::EmptyName);
        }

        if self.body.trim().is_empty() {
            return Err(TemplateValidationError::EmptyBody);
        }

        Ok(())
    }
}

impl Record for MessageTemplate {
    type Id = TemplateId;
    const ENTITY: &'static str = "Template";

    fn id(&self) -> TemplateId {
        self.id
    }
}

impl fmt::Display for MessageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateValidationError {
    EmptyName,
    EmptyBody,
}

impl fmt::Display for TemplateValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Template name cannot be empty"),
            Self::EmptyBody => write!(f, "Template message cannot be empty"),
        }
    }
}

impl std::error::Error for TemplateValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        let template = MessageTemplate::new(
            TemplateId::new(1),
            "Lembrete",
            "Olá {nome}, o aluguel de R$ {valor} vence em {vencimento}. {nome}!",
        );
        assert_eq!(template.placeholders(), vec!["nome", "valor", "vencimento"]);
    }

    #[test]
    fn test_update_and_validation() {
        let template = MessageTemplate::new(TemplateId::new(1), "Lembrete", "Olá {nome}");
        let updated = template.updated(&TemplateUpdate {
            body: Some("Oi {nome}".into()),
            ..Default::default()
        });

        assert_eq!(updated.body, "Oi {nome}");
        assert_eq!(updated.name, "Lembrete");
        assert_eq!(template.body, "Olá {nome}");

        let blank = template.updated(&TemplateUpdate {
            name: Some("  ".into()),
            ..Default::default()
        });
        assert_eq!(blank.validate(), Err(TemplateValidationError::EmptyName));

        let empty_body = MessageTemplate::new(TemplateId::new(2), "Vazio", "\n");
        assert_eq!(empty_body.validate(), Err(TemplateValidationError::EmptyBody));
    }
}
