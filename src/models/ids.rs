//! Strongly-typed ID wrappers for all entity types
//!
//! Ids are small integers, allocated as `max(existing) + 1` by the storage
//! layer. Newtype wrappers keep a tenant id from being passed where a billing
//! id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Ids that can be allocated in sequence
pub trait SequentialId: Copy + Ord + fmt::Display {
    /// The id given to the first record of an empty collection
    fn first() -> Self;

    /// The id following this one, or `None` once the id space is used up
    fn checked_succ(self) -> Option<Self>;
}

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw id value
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Get the raw id value
            pub const fn value(&self) -> u64 {
                self.0
            }
        }

        impl SequentialId for $name {
            fn first() -> Self {
                Self(1)
            }

            fn checked_succ(self) -> Option<Self> {
                self.0.checked_add(1).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(PropertyId, "prop-");
define_id!(TenantId, "ten-");
define_id!(BillingId, "bil-");
define_id!(TemplateId, "tpl-");
