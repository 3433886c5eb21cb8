//! Property model
//!
//! A rental unit (apartment, house, kitnet...) that can be occupied by one
//! tenant.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::PropertyId;
use super::money::Money;
use crate::storage::Record;

/// Occupancy of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    #[default]
    Vacant,
    Occupied,
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vacant => write!(f, "Vacant"),
            Self::Occupied => write!(f, "Occupied"),
        }
    }
}

/// A rental property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,

    /// Full address, also used as the property's label
    pub address: String,

    /// Free-form type: "Apartamento", "Casa", "Kitnet"...
    pub kind: String,

    pub rooms: u32,

    /// Monthly rent
    pub rent: Money,

    #[serde(default)]
    pub status: PropertyStatus,

    /// Name of the current tenant, set iff the property is occupied
    #[serde(default)]
    pub tenant: Option<String>,
}

/// Partial update for a property; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct PropertyUpdate {
    pub address: Option<String>,
    pub kind: Option<String>,
    pub rooms: Option<u32>,
    pub rent: Option<Money>,
}

impl PropertyUpdate {
    /// Check whether the update changes anything
    pub fn is_empty(&self) -> bool {
        self.address.is_none() && self.kind.is_none() && self.rooms.is_none() && self.rent.is_none()
    }
}

impl Property {
    /// Create a new vacant property
    pub fn new(
        id: PropertyId,
        address: impl Into<String>,
        kind: impl Into<String>,
        rooms: u32,
        rent: Money,
    ) -> Self {
        Self {
            id,
            address: address.into().trim().to_string(),
            kind: kind.into().trim().to_string(),
            rooms,
            rent,
            status: PropertyStatus::Vacant,
            tenant: None,
        }
    }

    /// Return a copy with the update applied
    pub fn updated(&self, update: &PropertyUpdate) -> Self {
        Self {
            address: update
                .address
                .as_deref()
                .map(|a| a.trim().to_string())
                .unwrap_or_else(|| self.address.clone()),
            kind: update
                .kind
                .as_deref()
                .map(|k| k.trim().to_string())
                .unwrap_or_else(|| self.kind.clone()),
            rooms: update.rooms.unwrap_or(self.rooms),
            rent: update.rent.unwrap_or(self.rent),
            ..self.clone()
        }
    }

    /// Return a copy occupied by the named tenant
    pub fn occupied_by(&self, tenant: impl Into<String>) -> Self {
        Self {
            status: PropertyStatus::Occupied,
            tenant: Some(tenant.into()),
            ..self.clone()
        }
    }

    pub fn is_vacant(&self) -> bool {
        self.status == PropertyStatus::Vacant
    }

    /// Check if this property is labelled by the given address (case-insensitive)
    pub fn matches_address(&self, address: &str) -> bool {
        self.address.trim().to_lowercase() == address.trim().to_lowercase()
    }

    /// Validate the property
    pub fn validate(&self) -> Result<(), PropertyValidationError> {
        if self.address.trim().is_empty() {
            return Err(PropertyValidationError::EmptyAddress);
        }

        if self.kind.trim().is_empty() {
            return Err(PropertyValidationError::EmptyKind);
        }

        if self.rent.is_negative() {
            return Err(PropertyValidationError::NegativeRent);
        }

        if self.rent > Money::MAX_AMOUNT {
            return Err(PropertyValidationError::RentTooLarge(self.rent));
        }

        if (self.status == PropertyStatus::Occupied) != self.tenant.is_some() {
            return Err(PropertyValidationError::TenantMismatch);
        }

        Ok(())
    }
}

impl Record for Property {
    type Id = PropertyId;
    const ENTITY: &'static str = "Property";

    fn id(&self) -> PropertyId {
        self.id
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

/// Validation errors for properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValidationError {
    EmptyAddress,
    EmptyKind,
    NegativeRent,
    RentTooLarge(Money),
    TenantMismatch,
}

impl fmt::Display for PropertyValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAddress => write!(f, "Property address cannot be empty"),
            Self::EmptyKind => write!(f, "Property type cannot be empty"),
            Self::NegativeRent => write!(f, "Rent cannot be negative"),
            Self::RentTooLarge(rent) => {
                write!(f, "Rent {} exceeds the limit of {}", rent, Money::MAX_AMOUNT)
            }
            Self::TenantMismatch => {
                write!(f, "An occupied property must name its tenant, a vacant one must not")
            }
        }
    }
}

impl std::error::Error for PropertyValidationError {}
