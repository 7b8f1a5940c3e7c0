//! Common types shared across the provisioning crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An amount expressed in the minor units of its currency (pence, cents).
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MinorUnit(i64);

impl MinorUnit {
    /// Construct an amount from a minor unit count
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// The amount as a plain i64
    pub fn get_amount_as_i64(self) -> i64 {
        self.0
    }

    /// Whether this is a chargeable amount
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for MinorUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
