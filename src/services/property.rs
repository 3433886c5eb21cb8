//! Property service
//!
//! Registration, lookup, edits and removal of rental units.

use tracing::{debug, info};

use crate::error::{EmDiaError, EmDiaResult};
use crate::models::{Money, Property, PropertyId, PropertyUpdate};
use crate::notice::Notice;
use crate::session::Session;

/// Service for property management
pub struct PropertyService<'a> {
    session: &'a mut Session,
}

impl<'a> PropertyService<'a> {
    /// Create a new property service
    pub fn new(session: &'a mut Session) -> Self {
        Self { session }
    }

    /// Register a new vacant property
    pub fn create(
        &mut self,
        address: &str,
        kind: &str,
        rooms: u32,
        rent: Money,
    ) -> EmDiaResult<Property> {
        self.ensure_address_free(address, None)?;

        let id = self.session.storage.properties.next_id()?;
        let property = Property::new(id, address, kind, rooms, rent);

        property
            .validate()
            .map_err(|e| EmDiaError::Validation(e.to_string()))?;

        self.session.storage.properties.insert(property.clone())?;
        info!(id = %property.id, address = %property.address, "Property registered");

        self.session.notify(Notice::success(
            "Property registered!",
            "The property was added successfully.",
        ));

        Ok(property)
    }

    /// All properties, in registration order
    pub fn list(&self) -> &[Property] {
        self.session.storage.properties.all()
    }

    pub fn get(&self, id: PropertyId) -> Option<&Property> {
        self.session.storage.properties.get(id)
    }

    /// Find a property by ID or address
    pub fn find(&self, identifier: &str) -> Option<&Property> {
        debug!(identifier, "Looking up property");
        let properties = &self.session.storage.properties;

        if let Ok(id) = identifier.trim().parse::<PropertyId>() {
            if let Some(property) = properties.get(id) {
                return Some(property);
            }
        }

        properties.find(|p| p.matches_address(identifier))
    }

    /// Find a property or fail with `NotFound`
    pub fn require(&self, identifier: &str) -> EmDiaResult<&Property> {
        self.find(identifier)
            .ok_or_else(|| EmDiaError::property_not_found(identifier))
    }

    /// Apply a partial update
    ///
    /// A new address also relabels the tenant living there.
    pub fn update(&mut self, id: PropertyId, update: &PropertyUpdate) -> EmDiaResult<Property> {
        if update.is_empty() {
            return Err(EmDiaError::Validation("Nothing to update".into()));
        }

        let current = self.session.storage.properties.require(id)?.clone();
        if let Some(address) = &update.address {
            self.ensure_address_free(address, Some(id))?;
        }

        let updated = current.updated(update);
        updated
            .validate()
            .map_err(|e| EmDiaError::Validation(e.to_string()))?;

        if updated.address != current.address {
            let moved: Vec<_> = self
                .session
                .storage
                .tenants
                .all()
                .iter()
                .filter(|t| current.matches_address(&t.property))
                .map(|t| {
                    let mut tenant = t.clone();
                    tenant.property = updated.address.clone();
                    tenant
                })
                .collect();
            for tenant in moved {
                self.session.storage.tenants.replace(tenant)?;
            }
        }

        self.session.storage.properties.replace(updated.clone())?;
        info!(id = %id, "Property updated");

        self.session.notify(Notice::success(
            "Property updated",
            format!("{} was updated.", updated.address),
        ));

        Ok(updated)
    }

    /// Remove a property
    pub fn delete(&mut self, id: PropertyId) -> EmDiaResult<Property> {
        let removed = self.session.storage.properties.remove(id)?;
        info!(id = %id, address = %removed.address, "Property removed");

        self.session.notify(Notice::success(
            "Property removed",
            "The property was removed successfully.",
        ));

        Ok(removed)
    }

    fn ensure_address_free(&self, address: &str, except: Option<PropertyId>) -> EmDiaResult<()> {
        let taken = self
            .session
            .storage
            .properties
            .find(|p| p.matches_address(address) && Some(p.id) != except)
            .is_some();

        if taken {
            return Err(EmDiaError::Duplicate {
                entity_type: "Property",
                identifier: address.trim().to_string(),
            });
        }
        Ok(())
    }
}
