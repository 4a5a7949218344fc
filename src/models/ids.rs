//! Strongly-typed ID wrappers for record types
//!
//! Records arrive with integer identifiers assigned by the backend. Newtype
//! wrappers keep income and expense identities from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Default,
            Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw backend identifier
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Get the raw identifier
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(IncomeId);
define_id!(ExpenseId);
