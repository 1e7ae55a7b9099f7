//! Patient identifier utilities.
//!
//! Every patient admitted through the registration form receives an identifier that is
//! unique within the ward register, even when two admissions are recorded within the same
//! millisecond.
//!
//! Fresh identifiers use a *time-prefixed* form:
//!
//! `YYYYMMDDTHHMMSS.mmmZ-<32 lowercase hex uuid>`
//!
//! Example:
//! `20250825T080512.301Z-550e8400e29b41d4a716446655440000`
//!
//! - The timestamp prefix keeps identifiers roughly ordered by creation time.
//! - [`PatientIdGenerator`] remembers the last identifier it issued and bumps the timestamp
//!   by 1 ms whenever the clock has not advanced, so issued timestamps are strictly increasing.
//! - The UUID suffix makes the value globally unique regardless of clock behaviour.
//!
//! Identifiers that did not come from the generator (for example the short ids of the
//! seeded mock register) are still valid [`PatientId`]s; they simply carry no timestamp.

mod generator;

pub use generator::{AdmissionUid, PatientId, PatientIdGenerator, Uuid};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type IdResult<T> = Result<T, IdError>;
