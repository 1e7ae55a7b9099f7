//! # Rawat Core
//!
//! Core logic for inpatient registration.
//!
//! This crate contains the in-memory pieces behind the registration screens:
//! - [`validation`]: pure validation of the registration form
//! - [`store`]: the shared patient register, seeded with mock admissions
//! - [`table`]: search, sort and pagination for the patient table
//! - [`form`]: the registration form state machine
//! - [`router`]: selection between the landing page, the table and the form
//!
//! **No presentation concerns**: rendering, argument parsing and process setup belong in
//! the `rawat-inap` binary. Doctor and room catalogs live in `rawat-catalog`.

pub mod config;
pub mod constants;
pub mod error;
pub mod form;
pub mod patient;
pub mod router;
pub mod store;
pub mod table;
pub mod validation;

pub use config::CoreConfig;
pub use error::{PatientError, PatientResult};
pub use form::{AdmissionTarget, FormController, FormState, SubmitOutcome};
pub use patient::{FormField, Patient, PatientFormData};
pub use rawat_ids::PatientId;
pub use router::{RouterAction, View, ViewRouter, ViewState};
pub use store::{MockRegister, PatientSource, PatientStore, StoreState};
pub use table::{
    Pagination, PatientTable, SortDirection, SortField, SortState, TablePage, TableStatus,
};
pub use validation::{
    format_date, format_date_for_input, is_form_valid, local_today, validate_field,
    validate_patient_form, FormErrors,
};
