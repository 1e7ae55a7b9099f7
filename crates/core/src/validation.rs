//! Registration form validation.
//!
//! The engine is a pure function of the form buffer and the current date: the same input
//! always yields the same [`FormErrors`]. Callers supply `today` explicitly (see
//! [`local_today`]) so that date rules are reproducible in tests.
//!
//! Every field is required and every value is trimmed before it is measured. Checks within
//! a field run in order and the first failure wins, so each field carries at most one
//! message. Messages are in the application's Indonesian locale.
//!
//! | Field | Rules |
//! |---|---|
//! | name | 2–100 characters; letters, whitespace, `.`, `,`, `'` only |
//! | nik | exactly 16 ASCII digits |
//! | diagnosis | 5–500 characters |
//! | admissionDate | `YYYY-MM-DD`; not after today; not before today minus 12 months |
//! | doctor | non-empty (catalog membership is not enforced) |
//! | room | non-empty (catalog membership is not enforced) |

use crate::constants::{
    ADMISSION_LOOKBACK_MONTHS, DIAGNOSIS_MAX_CHARS, DIAGNOSIS_MIN_CHARS, NAME_MAX_CHARS,
    NAME_MIN_CHARS, NIK_DIGITS,
};
use crate::patient::{FormField, PatientFormData};
use chrono::{Datelike, Local, Months, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Field-level validation messages. An empty map means the form is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<FormField, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Errors in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// Replace one field's entry with a freshly derived result.
    pub fn set_field(&mut self, field: FormField, message: Option<String>) {
        match message {
            Some(message) => {
                self.0.insert(field, message);
            }
            None => {
                self.0.remove(&field);
            }
        }
    }

    pub fn clear_field(&mut self, field: FormField) {
        self.0.remove(&field);
    }
}

/// The sole gate for submission.
pub fn is_form_valid(errors: &FormErrors) -> bool {
    errors.is_empty()
}

/// Today's date in the local time zone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Validate the whole form.
pub fn validate_patient_form(form: &PatientFormData, today: NaiveDate) -> FormErrors {
    let mut errors = FormErrors::new();
    for field in FormField::ALL {
        errors.set_field(field, validate_field(field, form, today));
    }
    tracing::debug!(error_count = errors.len(), "validated patient form");
    errors
}

/// Validate a single field, returning its message if it is invalid.
pub fn validate_field(
    field: FormField,
    form: &PatientFormData,
    today: NaiveDate,
) -> Option<String> {
    let value = form.get(field).trim();
    match field {
        FormField::Name => check_name(value),
        FormField::Nik => check_nik(value),
        FormField::Diagnosis => check_diagnosis(value),
        FormField::AdmissionDate => check_admission_date(value, today),
        FormField::Doctor => required(value, "Dokter penanggung jawab wajib diisi"),
        FormField::Room => required(value, "Ruangan wajib diisi"),
    }
}

fn required(value: &str, message: &str) -> Option<String> {
    value.is_empty().then(|| message.to_string())
}

fn check_name(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("Nama pasien wajib diisi".into());
    }

    let len = value.chars().count();
    if len < NAME_MIN_CHARS {
        return Some(format!("Nama pasien minimal {} karakter", NAME_MIN_CHARS));
    }
    if len > NAME_MAX_CHARS {
        return Some(format!("Nama pasien maksimal {} karakter", NAME_MAX_CHARS));
    }

    let ok = value
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || matches!(c, '.' | ',' | '\''));
    if !ok {
        return Some(
            "Nama pasien hanya boleh mengandung huruf, spasi, dan tanda baca umum".into(),
        );
    }

    None
}

fn check_nik(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("NIK wajib diisi".into());
    }
    if value.len() != NIK_DIGITS || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Some(format!("NIK harus berupa {} digit angka", NIK_DIGITS));
    }
    None
}

fn check_diagnosis(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("Diagnosa masuk wajib diisi".into());
    }

    let len = value.chars().count();
    if len < DIAGNOSIS_MIN_CHARS {
        return Some(format!(
            "Diagnosa masuk minimal {} karakter",
            DIAGNOSIS_MIN_CHARS
        ));
    }
    if len > DIAGNOSIS_MAX_CHARS {
        return Some(format!(
            "Diagnosa masuk maksimal {} karakter",
            DIAGNOSIS_MAX_CHARS
        ));
    }
    None
}

fn check_admission_date(value: &str, today: NaiveDate) -> Option<String> {
    if value.is_empty() {
        return Some("Tanggal masuk wajib diisi".into());
    }

    let Ok(date) = NaiveDate::parse_from_str(value, INPUT_DATE_FORMAT) else {
        return Some("Format tanggal tidak valid".into());
    };

    if date > today {
        return Some("Tanggal masuk tidak boleh di masa depan".into());
    }

    // Month arithmetic clamps 29 Feb to 28 Feb in non-leap years.
    let earliest = today
        .checked_sub_months(Months::new(ADMISSION_LOOKBACK_MONTHS))
        .unwrap_or(NaiveDate::MIN);
    if date < earliest {
        return Some("Tanggal masuk tidak boleh lebih dari 1 tahun yang lalu".into());
    }

    None
}

/// Render an ISO date as a long Indonesian date, e.g. `25 Agustus 2025`.
///
/// Input that does not parse is returned unchanged.
pub fn format_date(iso: &str) -> String {
    match NaiveDate::parse_from_str(iso.trim(), INPUT_DATE_FORMAT) {
        Ok(date) => format!(
            "{} {} {}",
            date.day(),
            MONTHS_ID[date.month0() as usize],
            date.year()
        ),
        Err(_) => iso.to_string(),
    }
}

/// Render a date in the form input's `YYYY-MM-DD` format.
pub fn format_date_for_input(date: NaiveDate) -> String {
    date.format(INPUT_DATE_FORMAT).to_string()
}
