//! Patient records and the registration form buffer.

use crate::PatientError;
use chrono::{DateTime, Utc};
use rawat_ids::PatientId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An admitted inpatient.
///
/// Created only by the patient register; `id` and `created_at` are assigned there and
/// never change afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    /// 16-digit national identity number. Not guaranteed unique.
    pub nik: String,
    pub diagnosis: String,
    /// ISO date (`YYYY-MM-DD`) as entered on the form.
    pub admission_date: String,
    pub doctor: String,
    pub room: String,
    pub created_at: DateTime<Utc>,
}

impl Patient {
    /// Builds a record from form data. Field values are stored exactly as given.
    pub fn from_form(id: PatientId, data: PatientFormData, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: data.name,
            nik: data.nik,
            diagnosis: data.diagnosis,
            admission_date: data.admission_date,
            doctor: data.doctor,
            room: data.room,
            created_at,
        }
    }
}

/// Fields collected by the registration form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Nik,
    Diagnosis,
    AdmissionDate,
    Doctor,
    Room,
}

impl FormField {
    /// All fields in form order.
    pub const ALL: [FormField; 6] = [
        FormField::Name,
        FormField::Nik,
        FormField::Diagnosis,
        FormField::AdmissionDate,
        FormField::Doctor,
        FormField::Room,
    ];

    /// Field key as used in error maps and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Nik => "nik",
            FormField::Diagnosis => "diagnosis",
            FormField::AdmissionDate => "admissionDate",
            FormField::Doctor => "doctor",
            FormField::Room => "room",
        }
    }

    /// Form label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Nama Lengkap",
            FormField::Nik => "NIK",
            FormField::Diagnosis => "Diagnosa Masuk",
            FormField::AdmissionDate => "Tanggal Masuk",
            FormField::Doctor => "Dokter Penanggung Jawab",
            FormField::Room => "Ruangan",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = PatientError;

    /// Accepts the JSON key (`admissionDate`) as well as kebab/snake case forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        FormField::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(&key))
            .ok_or_else(|| PatientError::InvalidInput(format!("unknown form field: {}", s)))
    }
}

impl Serialize for FormField {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// The form buffer: everything a patient record holds before `id`/`created_at` exist.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientFormData {
    pub name: String,
    pub nik: String,
    pub diagnosis: String,
    pub admission_date: String,
    pub doctor: String,
    pub room: String,
}

impl PatientFormData {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Nik => &self.nik,
            FormField::Diagnosis => &self.diagnosis,
            FormField::AdmissionDate => &self.admission_date,
            FormField::Doctor => &self.doctor,
            FormField::Room => &self.room,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Nik => &mut self.nik,
            FormField::Diagnosis => &mut self.diagnosis,
            FormField::AdmissionDate => &mut self.admission_date,
            FormField::Doctor => &mut self.doctor,
            FormField::Room => &mut self.room,
        };
        *slot = value.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_field_parses_key_variants() {
        assert_eq!("admissionDate".parse::<FormField>().unwrap(), FormField::AdmissionDate);
        assert_eq!("admission-date".parse::<FormField>().unwrap(), FormField::AdmissionDate);
        assert_eq!("ADMISSION_DATE".parse::<FormField>().unwrap(), FormField::AdmissionDate);
        assert_eq!("nik".parse::<FormField>().unwrap(), FormField::Nik);
        assert!("ward".parse::<FormField>().is_err());
    }

    #[test]
    fn form_data_get_and_set_address_the_same_slot() {
        let mut data = PatientFormData::default();
        for field in FormField::ALL {
            data.set(field, field.label());
        }
        for field in FormField::ALL {
            assert_eq!(data.get(field), field.label());
        }
    }

    #[test]
    fn patient_serialises_with_camel_case_keys() {
        let data = PatientFormData {
            name: "Ahmad".into(),
            nik: "1234567890123456".into(),
            diagnosis: "Flu berat".into(),
            admission_date: "2025-08-25".into(),
            doctor: "Dr. X".into(),
            room: "VIP-101".into(),
        };
        let patient = Patient::from_form(PatientId::new("9").unwrap(), data, Utc::now());
        let json = serde_json::to_value(&patient).unwrap();

        assert_eq!(json["id"], "9");
        assert_eq!(json["admissionDate"], "2025-08-25");
        assert!(json.get("createdAt").is_some());
    }
}
