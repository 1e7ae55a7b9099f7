//! # Rawat Catalog
//!
//! Static reference data for the inpatient registration module: the doctors who can be
//! assigned as responsible physician and the rooms a patient can be admitted to.
//!
//! The catalog is read-only and never changes at runtime. The registration form consumes
//! only the `{value, label}` option lists; the richer metadata (specialisation, department,
//! room type, floor, capacity, facilities) backs lookups and ward statistics.
//!
//! Submitted doctor and room values are **not** required to be catalog members. The
//! membership predicates here are informational.

mod catalog;
mod data;
mod types;

pub use catalog::{HospitalCatalog, HospitalStats, SelectOption};
pub use data::{DEPARTMENTS, DOCTORS, ROOMS, ROOM_TYPES};
pub use types::{DoctorOption, RoomOption, RoomType};

/// Errors raised when interpreting catalog values supplied from outside.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown room type: {0} (expected one of VIP, Kelas-1, Kelas-2, ICU)")]
    UnknownRoomType(String),
}
