//! Domain logic for the training-session scheduler: roster capacity and
//! registration, attendance status updates, ownership checks, session
//! and user lifecycle, and the read-only analytics rollup.
//!
//! Everything here runs against a `sea_orm` connection handed in by the
//! caller; the HTTP layer owns request mapping and this crate owns the
//! invariants.

pub mod analytics;
pub mod attendance;
pub mod authz;
pub mod error;
pub mod registration;
pub mod sessions;
pub mod users;
pub mod views;

pub use error::{DomainError, Result};
