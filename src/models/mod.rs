//! Core data models for EmDia
//!
//! This module contains the value objects of the rental domain: properties,
//! tenants, billing records and message templates.

pub mod billing;
pub mod ids;
pub mod money;
pub mod property;
pub mod template;
pub mod tenant;

pub use billing::{BillingRecord, BillingStatus};
pub use ids::{BillingId, PropertyId, SequentialId, TemplateId, TenantId};
pub use money::Money;
pub use property::{Property, PropertyStatus, PropertyUpdate};
pub use template::{MessageTemplate, TemplateUpdate};
pub use tenant::{Tenant, TenantStatus, TenantUpdate};
