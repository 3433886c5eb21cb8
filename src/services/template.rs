//! Message template service

use tracing::{debug, info};

use crate::error::{EmDiaError, EmDiaResult};
use crate::models::{BillingId, MessageTemplate, TemplateId, TemplateUpdate};
use crate::notice::Notice;
use crate::session::Session;
use crate::templates::{
    billing_values, render_with_policy, PlaceholderPolicy, TemplateValues, TemplateVariable,
};

/// Service for message templates
pub struct TemplateService<'a> {
    session: &'a mut Session,
}

impl<'a> TemplateService<'a> {
    /// Create a new template service
    pub fn new(session: &'a mut Session) -> Self {
        Self { session }
    }

    /// Save a new template
    pub fn create(&mut self, name: &str, body: &str) -> EmDiaResult<MessageTemplate> {
        if self.find_by_name(name).is_some() {
            return Err(EmDiaError::Duplicate {
                entity_type: "Template",
                identifier: name.trim().to_string(),
            });
        }

        let id = self.session.storage.templates.next_id()?;
        let template = MessageTemplate::new(id, name, body);

        template
            .validate()
            .map_err(|e| EmDiaError::Validation(e.to_string()))?;

        self.session.storage.templates.insert(template.clone())?;
        info!(id = %template.id, name = %template.name, "Template saved");

        self.session.notify(Notice::success(
            "Template saved",
            "Your message template was saved successfully",
        ));

        Ok(template)
    }

    /// All templates, in creation order
    pub fn list(&self) -> &[MessageTemplate] {
        self.session.storage.templates.all()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&MessageTemplate> {
        self.session.storage.templates.find(|t| t.matches_name(name))
    }

    /// Find a template by ID or name
    pub fn find(&self, identifier: &str) -> Option<&MessageTemplate> {
        debug!(identifier, "Looking up template");

        if let Ok(id) = identifier.trim().parse::<TemplateId>() {
            if let Some(template) = self.session.storage.templates.get(id) {
                return Some(template);
            }
        }

        self.find_by_name(identifier)
    }

    /// Find a template or fail with `NotFound`
    pub fn require(&self, identifier: &str) -> EmDiaResult<&MessageTemplate> {
        self.find(identifier)
            .ok_or_else(|| EmDiaError::template_not_found(identifier))
    }

    /// Apply a partial update
    pub fn update(&mut self, id: TemplateId, update: &TemplateUpdate) -> EmDiaResult<MessageTemplate> {
        if update.name.is_none() && update.body.is_none() {
            return Err(EmDiaError::Validation("Nothing to update".into()));
        }

        let updated = self.session.storage.templates.require(id)?.updated(update);
        updated
            .validate()
            .map_err(|e| EmDiaError::Validation(e.to_string()))?;

        if let Some(other) = self.find_by_name(&updated.name) {
            if other.id != id {
                return Err(EmDiaError::Duplicate {
                    entity_type: "Template",
                    identifier: updated.name.clone(),
                });
            }
        }

        self.session.storage.templates.replace(updated.clone())?;
        info!(id = %id, "Template updated");

        self.session.notify(Notice::success(
            "Template updated",
            "Your message template was updated successfully",
        ));

        Ok(updated)
    }

    /// Remove a template
    pub fn delete(&mut self, id: TemplateId) -> EmDiaResult<MessageTemplate> {
        let removed = self.session.storage.templates.remove(id)?;
        info!(id = %id, name = %removed.name, "Template removed");

        self.session.notify(Notice::success(
            "Template removed",
            "The message template was removed successfully",
        ));

        Ok(removed)
    }

    /// Render a template as it would be sent
    ///
    /// Values come from the billing record when one is given (with a PIX link
    /// for unpaid records), then from `overrides`, which win on conflicts.
    pub fn render(
        &self,
        identifier: &str,
        billing: Option<BillingId>,
        overrides: &TemplateValues,
        policy: PlaceholderPolicy,
    ) -> EmDiaResult<String> {
        let template = self.require(identifier)?;
        let settings = &self.session.settings;

        let mut values = match billing {
            Some(id) => {
                let record = self
                    .session
                    .storage
                    .billings
                    .get(id)
                    .ok_or_else(|| EmDiaError::billing_not_found(id.to_string()))?;
                let link = crate::channels::generate_charge(record, &settings.payment)
                    .ok()
                    .map(|charge| charge.link);
                billing_values(record, link.as_deref(), &settings.display.date_format)
            }
            None => TemplateValues::new(),
        };
        values.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));

        render_with_policy(&template.body, &values, policy)
    }

    /// The standard placeholders every billing record can fill
    pub fn variables(&self) -> &'static [TemplateVariable] {
        &TemplateVariable::ALL
    }
}
