//! Constants used throughout the rawat core crate.
//!
//! Validation bounds, table sizing, simulated latencies and the fixed user-facing
//! messages live here so that every module agrees on them.

/// Rows shown per table page.
pub const PAGE_SIZE: usize = 5;

/// Maximum number of page buttons shown by the pagination control.
pub const PAGE_WINDOW: usize = 5;

/// Default simulated latency of a patient fetch, in milliseconds.
pub const DEFAULT_FETCH_DELAY_MS: u64 = 500;

/// Default simulated latency of a form submission, in milliseconds.
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 1000;

/// Environment variable overriding the fetch latency.
pub const FETCH_DELAY_ENV: &str = "RAWAT_FETCH_DELAY_MS";

/// Environment variable overriding the submission latency.
pub const SUBMIT_DELAY_ENV: &str = "RAWAT_SUBMIT_DELAY_MS";

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const NIK_DIGITS: usize = 16;
pub const DIAGNOSIS_MIN_CHARS: usize = 5;
pub const DIAGNOSIS_MAX_CHARS: usize = 500;

/// How far back an admission date may lie, in calendar months.
pub const ADMISSION_LOOKBACK_MONTHS: u32 = 12;

/// Shown in the store's error slot after a failed fetch.
pub const FETCH_FAILED_MESSAGE: &str = "Gagal memuat data pasien";

/// Shown by the form after the register refused a new patient.
pub const SUBMISSION_FAILED_MESSAGE: &str = "Gagal menyimpan data pasien. Silakan coba lagi.";
