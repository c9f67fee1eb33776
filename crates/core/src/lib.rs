//! `grocery-core` — shared building blocks for the grocery workspace.
//!
//! Identifiers, the entity contract used by the stores, and the domain error
//! model. No IO lives here.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{RecordId, UserId};
