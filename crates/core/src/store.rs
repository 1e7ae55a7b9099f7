//! # Patient Store
//!
//! The in-memory patient register shared by the table and the form.
//!
//! The register is created once at startup, seeded with five mock admissions, and lives
//! for the rest of the process. Handles are cheap to clone; every clone sees the same
//! register.
//!
//! Patients are kept in insertion order. Searching and sorting return new vectors and
//! never reorder the register itself.
//!
//! ## Fetching
//!
//! [`PatientStore::fetch_patients`] models a network load. It raises the loading flag,
//! waits for the configured fetch latency, then repopulates the register from its
//! [`PatientSource`] only if the register is empty. Calling it again on a populated
//! register changes nothing.
//!
//! The loading flag stays up while any fetch is in flight, including overlapping ones. A
//! fetch whose future is dropped before it completes no longer counts as in flight.

use crate::config::CoreConfig;
use crate::constants::FETCH_FAILED_MESSAGE;
use crate::form::AdmissionTarget;
use crate::patient::{Patient, PatientFormData};
use crate::table::{self, SortDirection, SortField};
use crate::{PatientError, PatientResult};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use rawat_ids::{PatientId, PatientIdGenerator};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Where the register is repopulated from when a fetch finds it empty.
pub trait PatientSource: Send + Sync {
    fn load(&self) -> PatientResult<Vec<Patient>>;
}

/// The built-in mock register.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockRegister;

impl PatientSource for MockRegister {
    fn load(&self) -> PatientResult<Vec<Patient>> {
        seed_patients()
    }
}

struct SeedRow {
    id: &'static str,
    name: &'static str,
    nik: &'static str,
    diagnosis: &'static str,
    admission_date: &'static str,
    doctor: &'static str,
    room: &'static str,
}

const SEED: [SeedRow; 5] = [
    SeedRow {
        id: "1",
        name: "Ahmad Suryanto",
        nik: "3273010101850001",
        diagnosis: "Diabetes Mellitus Type 2",
        admission_date: "2025-08-25",
        doctor: "Dr. Sarah Wijaya, Sp.PD",
        room: "VIP-101",
    },
    SeedRow {
        id: "2",
        name: "Siti Nurhaliza",
        nik: "3273010201900002",
        diagnosis: "Hipertensi Grade 2",
        admission_date: "2025-08-26",
        doctor: "Dr. Budi Santoso, Sp.JP",
        room: "Kelas-1-201",
    },
    SeedRow {
        id: "3",
        name: "Muhammad Rizki",
        nik: "3273010301950003",
        diagnosis: "Pneumonia Bakterial",
        admission_date: "2025-08-27",
        doctor: "Dr. Andi Pratama, Sp.P",
        room: "ICU-001",
    },
    SeedRow {
        id: "4",
        name: "Dewi Lestari",
        nik: "3273010401880004",
        diagnosis: "Post Op Appendectomy",
        admission_date: "2025-08-28",
        doctor: "Dr. Indira Sari, Sp.B",
        room: "Kelas-2-301",
    },
    SeedRow {
        id: "5",
        name: "Joko Widodo",
        nik: "3273010501920005",
        diagnosis: "Stroke Iskemik Akut",
        admission_date: "2025-08-29",
        doctor: "Dr. Hendra Gunawan, Sp.S",
        room: "ICU-002",
    },
];

/// The five mock admissions the register starts with.
///
/// Each record's `created_at` is midnight UTC on its admission date.
pub fn seed_patients() -> PatientResult<Vec<Patient>> {
    SEED.iter()
        .map(|row| {
            let date = NaiveDate::parse_from_str(row.admission_date, "%Y-%m-%d").map_err(|e| {
                PatientError::InvalidInput(format!("seed date {}: {}", row.admission_date, e))
            })?;
            let created_at = Utc.from_utc_datetime(&date.and_time(NaiveTime::default()));

            Ok(Patient {
                id: PatientId::new(row.id)?,
                name: row.name.to_string(),
                nik: row.nik.to_string(),
                diagnosis: row.diagnosis.to_string(),
                admission_date: row.admission_date.to_string(),
                doctor: row.doctor.to_string(),
                room: row.room.to_string(),
                created_at,
            })
        })
        .collect()
}

/// Point-in-time copy of the store state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    pub patients: Vec<Patient>,
    pub is_loading: bool,
    pub error: Option<String>,
}

struct Register {
    patients: Vec<Patient>,
    error: Option<String>,
    pending_fetches: usize,
    ids: PatientIdGenerator,
}

/// Counts one in-flight fetch for as long as it lives.
struct PendingFetch<'a> {
    store: &'a PatientStore,
}

impl Drop for PendingFetch<'_> {
    fn drop(&mut self) {
        let mut reg = self.store.lock();
        reg.pending_fetches = reg.pending_fetches.saturating_sub(1);
    }
}

/// Shared handle to the patient register.
#[derive(Clone)]
pub struct PatientStore {
    cfg: Arc<CoreConfig>,
    source: Arc<dyn PatientSource>,
    inner: Arc<Mutex<Register>>,
}

impl std::fmt::Debug for PatientStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatientStore")
            .field("cfg", &self.cfg)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl PatientStore {
    /// A register seeded with the mock admissions.
    pub fn new(cfg: Arc<CoreConfig>) -> PatientResult<Self> {
        let seed = seed_patients()?;
        Ok(Self::with_source(cfg, Arc::new(MockRegister), seed))
    }

    /// A register holding `patients`, refilled from the mock admissions on fetch.
    pub fn with_patients(cfg: Arc<CoreConfig>, patients: Vec<Patient>) -> Self {
        Self::with_source(cfg, Arc::new(MockRegister), patients)
    }

    pub fn with_source(
        cfg: Arc<CoreConfig>,
        source: Arc<dyn PatientSource>,
        patients: Vec<Patient>,
    ) -> Self {
        Self {
            cfg,
            source,
            inner: Arc::new(Mutex::new(Register {
                patients,
                error: None,
                pending_fetches: 0,
                ids: PatientIdGenerator::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Register> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a new patient built from `data`.
    ///
    /// Performs no validation. The new record gets a fresh id and `created_at = now`, and
    /// any error left by a previous fetch is cleared.
    pub fn add_patient(&self, data: PatientFormData) -> Patient {
        let mut reg = self.lock();
        let id = reg.ids.next_id();
        let patient = Patient::from_form(id, data, Utc::now());

        reg.patients.push(patient.clone());
        reg.error = None;

        tracing::info!(
            patient_id = %patient.id,
            total = reg.patients.len(),
            "patient admitted"
        );
        patient
    }

    /// Simulated load of the register.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::FetchFailed` if the register was empty and the source could
    /// not supply patients. The store's `error` slot then holds a user-facing message.
    pub async fn fetch_patients(&self) -> PatientResult<()> {
        let pending = {
            let mut reg = self.lock();
            reg.pending_fetches += 1;
            reg.error = None;
            PendingFetch { store: self }
        };
        tracing::debug!("fetching patients");

        let delay = self.cfg.fetch_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let outcome = {
            let mut reg = self.lock();
            let loaded = if reg.patients.is_empty() {
                self.source.load().map(|patients| {
                    reg.patients = patients;
                    true
                })
            } else {
                Ok(false)
            };

            match loaded {
                Ok(repopulated) => {
                    tracing::info!(
                        count = reg.patients.len(),
                        repopulated,
                        "patient fetch completed"
                    );
                    Ok(())
                }
                Err(e) => {
                    tracing::warn!(error = %e, "patient fetch failed");
                    reg.error = Some(FETCH_FAILED_MESSAGE.to_string());
                    Err(PatientError::FetchFailed(e.to_string()))
                }
            }
        };

        drop(pending);
        outcome
    }

    /// Patients whose name contains `query` (ignoring case) or whose NIK contains it.
    pub fn search_patients(&self, query: &str) -> Vec<Patient> {
        table::search_patients(&self.lock().patients, query)
    }

    /// The register sorted by `field`. The register itself keeps insertion order.
    pub fn sort_patients(&self, field: SortField, direction: SortDirection) -> Vec<Patient> {
        table::sort_patients(&self.lock().patients, field, direction)
    }

    /// All patients in insertion order.
    pub fn patients(&self) -> Vec<Patient> {
        self.lock().patients.clone()
    }

    pub fn snapshot(&self) -> StoreState {
        let reg = self.lock();
        StoreState {
            patients: reg.patients.clone(),
            is_loading: reg.pending_fetches > 0,
            error: reg.error.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().patients.is_empty()
    }

    /// True while at least one fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.lock().pending_fetches > 0
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }
}

impl AdmissionTarget for PatientStore {
    fn admit(&self, data: PatientFormData) -> PatientResult<Patient> {
        Ok(self.add_patient(data))
    }
}
