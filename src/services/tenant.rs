//! Tenant service
//!
//! Registering a tenant occupies a vacant property; renaming one keeps the
//! property's occupant label in step.

use tracing::{debug, info};

use super::ensure_whatsapp;
use crate::channels::{Delivery, OutgoingMessage};
use crate::error::{EmDiaError, EmDiaResult};
use crate::models::{Money, Tenant, TenantId, TenantUpdate};
use crate::notice::Notice;
use crate::session::Session;

/// Fields collected by the tenant registration form
#[derive(Debug, Clone)]
pub struct NewTenant {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Property ID or address
    pub property: String,
    /// Monthly rent; the property's rent when absent
    pub rent: Option<Money>,
    pub due_day: u8,
}

/// Service for tenant management
pub struct TenantService<'a> {
    session: &'a mut Session,
}

impl<'a> TenantService<'a> {
    /// Create a new tenant service
    pub fn new(session: &'a mut Session) -> Self {
        Self { session }
    }

    /// Register a tenant in a vacant property
    pub fn create(&mut self, form: &NewTenant) -> EmDiaResult<Tenant> {
        if self.find_by_name(&form.name).is_some() {
            return Err(EmDiaError::Duplicate {
                entity_type: "Tenant",
                identifier: form.name.trim().to_string(),
            });
        }

        let property = super::PropertyService::new(&mut *self.session)
            .require(&form.property)?
            .clone();

        if !property.is_vacant() {
            return Err(EmDiaError::Validation(format!(
                "{} is already occupied by {}",
                property.address,
                property.tenant.as_deref().unwrap_or("another tenant")
            )));
        }

        let id = self.session.storage.tenants.next_id()?;
        let tenant = Tenant::new(
            id,
            &form.name,
            &form.email,
            &form.phone,
            &property.address,
            form.rent.unwrap_or(property.rent),
            form.due_day,
        );

        tenant
            .validate()
            .map_err(|e| EmDiaError::Validation(e.to_string()))?;

        self.session.storage.tenants.insert(tenant.clone())?;
        self.session
            .storage
            .properties
            .replace(property.occupied_by(&tenant.name))?;

        info!(id = %tenant.id, name = %tenant.name, property = %property.id, "Tenant registered");
        self.session.notify(Notice::success(
            "Tenant registered!",
            "The tenant was added successfully.",
        ));

        Ok(tenant)
    }

    /// All tenants, in registration order
    pub fn list(&self) -> &[Tenant] {
        self.session.storage.tenants.all()
    }

    pub fn get(&self, id: TenantId) -> Option<&Tenant> {
        self.session.storage.tenants.get(id)
    }

    /// Get a tenant by name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Option<&Tenant> {
        self.session.storage.tenants.find(|t| t.matches_name(name))
    }

    /// Find a tenant by ID or name
    pub fn find(&self, identifier: &str) -> Option<&Tenant> {
        debug!(identifier, "Looking up tenant");

        if let Ok(id) = identifier.trim().parse::<TenantId>() {
            if let Some(tenant) = self.get(id) {
                return Some(tenant);
            }
        }

        self.find_by_name(identifier)
    }

    /// Find a tenant or fail with `NotFound`
    pub fn require(&self, identifier: &str) -> EmDiaResult<&Tenant> {
        self.find(identifier)
            .ok_or_else(|| EmDiaError::tenant_not_found(identifier))
    }

    /// Apply a partial update
    pub fn update(&mut self, id: TenantId, update: &TenantUpdate) -> EmDiaResult<Tenant> {
        if update.is_empty() {
            return Err(EmDiaError::Validation("Nothing to update".into()));
        }

        let current = self.session.storage.tenants.require(id)?.clone();
        let updated = current.updated(update);

        updated
            .validate()
            .map_err(|e| EmDiaError::Validation(e.to_string()))?;

        if !updated.matches_name(&current.name) {
            if self.find_by_name(&updated.name).is_some() {
                return Err(EmDiaError::Duplicate {
                    entity_type: "Tenant",
                    identifier: updated.name.clone(),
                });
            }

            let home = self
                .session
                .storage
                .properties
                .find(|p| p.matches_address(&current.property))
                .map(|p| p.occupied_by(&updated.name));
            if let Some(home) = home {
                self.session.storage.properties.replace(home)?;
            }
        }

        self.session.storage.tenants.replace(updated.clone())?;
        info!(id = %id, "Tenant updated");

        self.session.notify(Notice::success(
            "Tenant updated",
            format!("{} was updated.", updated.name),
        ));

        Ok(updated)
    }

    /// Open a simulated WhatsApp conversation with a tenant
    ///
    /// Without a body only the "sending" notice is shown, as the dashboard's
    /// contact button does. With a body the message goes through the channel.
    pub fn message(&mut self, identifier: &str, body: Option<&str>) -> EmDiaResult<Option<Delivery>> {
        let tenant = self.require(identifier)?.clone();
        ensure_whatsapp(&self.session.settings)?;

        self.session.notify(Notice::info(
            "WhatsApp",
            format!("Sending message to {}...", tenant.name),
        ));

        let Some(body) = body else {
            return Ok(None);
        };

        let delivery = self.session.channel_mut().send(&OutgoingMessage {
            recipient: tenant.name.clone(),
            phone: Some(tenant.phone.clone()),
            body: body.to_string(),
        })?;

        info!(tenant = %tenant.name, "Message sent");
        Ok(Some(delivery))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PropertyId, PropertyStatus, TenantStatus};
    use crate::services::{test_session, PropertyService};

    fn form(property: &str) -> NewTenant {
        NewTenant {
            name: "Ana Paula".into(),
            email: "ana@email.com".into(),
            phone: "(11) 66666-6666".into(),
            property: property.into(),
            rent: None,
            due_day: 15,
        }
    }

    fn session_with_vacancy() -> (Session, PropertyId) {
        let mut session = test_session();
        let id = PropertyService::new(&mut session)
            .create("Casa - Centro", "Casa", 3, Money::from_reais(950))
            .unwrap()
            .id;
        session.drain_notices();
        (session, id)
    }

    #[test]
    fn test_create_occupies_property() {
        let (mut session, property_id) = session_with_vacancy();

        let tenant = TenantService::new(&mut session)
            .create(&form("casa - centro"))
            .unwrap();

        assert_eq!(tenant.id, TenantId::new(4));
        assert_eq!(tenant.status, TenantStatus::Active);
        assert_eq!(tenant.rent, Money::from_reais(950));
        assert_eq!(tenant.property, "Casa - Centro");

        let property = session.storage.properties.get(property_id).unwrap();
        assert_eq!(property.status, PropertyStatus::Occupied);
        assert_eq!(property.tenant.as_deref(), Some("Ana Paula"));
        assert_eq!(session.notices()[0].title, "Tenant registered!");
    }

    #[test]
    fn test_create_requires_vacant_property() {
        let mut session = test_session();
        let err = TenantService::new(&mut session)
            .create(&form("prop-1"))
            .unwrap_err();

        assert!(err.is_validation());
        assert!(err.to_string().contains("João Silva"));
        assert_eq!(session.storage.tenants.len(), 3);
    }

    #[test]
    fn test_create_unknown_property() {
        let mut session = test_session();
        let err = TenantService::new(&mut session)
            .create(&form("Rua Inexistente"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_create_invalid_leaves_property_vacant() {
        let (mut session, property_id) = session_with_vacancy();
        let mut bad = form(&property_id.to_string());
        bad.email = "ana.email.com".into();

        let err = TenantService::new(&mut session).create(&bad).unwrap_err();

        assert!(err.is_validation());
        assert!(session.storage.properties.get(property_id).unwrap().is_vacant());
    }

    #[test]
    fn test_rename_updates_occupant() {
        let mut session = test_session();
        let update = TenantUpdate {
            name: Some("João da Silva".into()),
            status: Some(TenantStatus::Late),
            ..Default::default()
        };

        let updated = TenantService::new(&mut session)
            .update(TenantId::new(1), &update)
            .unwrap();

        assert_eq!(updated.status, TenantStatus::Late);
        let home = session.storage.properties.get(PropertyId::new(1)).unwrap();
        assert_eq!(home.tenant.as_deref(), Some("João da Silva"));
    }

    #[test]
    fn test_message_without_body_only_notifies() {
        let mut session = test_session();
        let delivery = TenantService::new(&mut session)
            .message("maria santos", None)
            .unwrap();

        assert!(delivery.is_none());
        assert!(session.channel().sent().is_empty());
        assert_eq!(
            session.notices()[0].description,
            "Sending message to Maria Santos..."
        );
    }

    #[test]
    fn test_message_with_body_uses_channel() {
        let mut session = test_session();
        TenantService::new(&mut session)
            .message("ten-3", Some("Olá Pedro"))
            .unwrap();

        let sent = session.channel().sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].phone.as_deref(), Some("(11) 77777-7777"));
    }

    #[test]
    fn test_message_when_whatsapp_disabled() {
        let mut session = test_session();
        session.settings.whatsapp.use_whatsapp = false;

        let err = TenantService::new(&mut session)
            .message("Maria Santos", Some("Olá"))
            .unwrap_err();
        assert!(matches!(err, EmDiaError::Channel(_)));
    }
}
