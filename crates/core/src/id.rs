//! Strongly-typed identifiers used across the domain.
//!
//! Records are keyed by small integers. `0` is reserved for "not yet
//! assigned": a record added with id `0` receives the next free id from its
//! store.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a stored record (product, list, list item).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u32);

/// Identifier of a user (list owner).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u32);

macro_rules! impl_int_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            /// The reserved "not yet assigned" identifier.
            pub const fn unassigned() -> Self {
                Self(0)
            }

            pub fn is_unassigned(&self) -> bool {
                self.0 == 0
            }

            pub fn get(&self) -> u32 {
                self.0
            }

            /// The identifier following this one.
            pub fn next(&self) -> Self {
                Self(self.0.saturating_add(1))
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u32> for $t {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u32 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<u32>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_int_newtype!(RecordId, "RecordId");
impl_int_newtype!(UserId, "UserId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_unassigned() {
        assert!(RecordId::unassigned().is_unassigned());
        assert!(!RecordId::new(3).is_unassigned());
    }

    #[test]
    fn next_increments() {
        assert_eq!(RecordId::new(7).next(), RecordId::new(8));
        assert_eq!(RecordId::new(u32::MAX).next(), RecordId::new(u32::MAX));
    }

    #[test]
    fn parses_from_str() {
        assert_eq!("42".parse::<RecordId>().unwrap(), RecordId::new(42));
        assert_eq!(" 5 ".parse::<UserId>().unwrap(), UserId::new(5));
    }

    #[test]
    fn rejects_garbage() {
        match "abc".parse::<RecordId>() {
            Err(DomainError::InvalidId(msg)) => assert!(msg.starts_with("RecordId")),
            other => panic!("expected InvalidId, got {other:?}"),
        }
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&RecordId::new(9)).unwrap();
        assert_eq!(json, "9");
    }
}
