//! Read-only access to the doctor and room catalogs.

use crate::data::{DOCTORS, ROOMS};
use crate::types::{DoctorOption, RoomOption, RoomType};
use serde::Serialize;
use std::collections::BTreeMap;

/// A `{value, label}` pair for a choice input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Aggregate counts over the catalogs, shown on the landing page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HospitalStats {
    pub total_doctors: usize,
    pub total_rooms: usize,
    pub rooms_by_type: BTreeMap<RoomType, usize>,
    pub doctors_by_department: BTreeMap<&'static str, usize>,
    pub vip_rooms: usize,
    pub icu_rooms: usize,
    pub regular_rooms: usize,
}

/// Handle over the static hospital catalogs.
///
/// Cheap to copy; all data is `'static`.
#[derive(Clone, Copy, Debug)]
pub struct HospitalCatalog {
    doctors: &'static [DoctorOption],
    rooms: &'static [RoomOption],
}

impl Default for HospitalCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl HospitalCatalog {
    /// The hospital's built-in catalogs.
    pub fn standard() -> Self {
        Self {
            doctors: DOCTORS,
            rooms: ROOMS,
        }
    }

    pub fn doctors(&self) -> &'static [DoctorOption] {
        self.doctors
    }

    pub fn rooms(&self) -> &'static [RoomOption] {
        self.rooms
    }

    /// Every room is offered; occupancy is not tracked.
    pub fn available_rooms(&self) -> &'static [RoomOption] {
        self.rooms
    }

    pub fn doctor_options(&self) -> Vec<SelectOption> {
        self.doctors
            .iter()
            .map(|d| SelectOption {
                value: d.value.to_string(),
                label: d.label.to_string(),
            })
            .collect()
    }

    pub fn room_options(&self) -> Vec<SelectOption> {
        self.rooms
            .iter()
            .map(|r| SelectOption {
                value: r.value.to_string(),
                label: r.label.to_string(),
            })
            .collect()
    }

    /// Doctors whose department matches exactly.
    pub fn doctors_by_department(&self, department: &str) -> Vec<&'static DoctorOption> {
        self.doctors
            .iter()
            .filter(|d| d.department == department)
            .collect()
    }

    pub fn rooms_by_type(&self, room_type: RoomType) -> Vec<&'static RoomOption> {
        self.rooms
            .iter()
            .filter(|r| r.room_type == room_type)
            .collect()
    }

    pub fn rooms_by_floor(&self, floor: u8) -> Vec<&'static RoomOption> {
        self.rooms.iter().filter(|r| r.floor == floor).collect()
    }

    pub fn is_valid_doctor(&self, value: &str) -> bool {
        self.doctors.iter().any(|d| d.value == value)
    }

    pub fn is_valid_room(&self, value: &str) -> bool {
        self.rooms.iter().any(|r| r.value == value)
    }

    pub fn doctor_info(&self, value: &str) -> Option<&'static DoctorOption> {
        self.doctors.iter().find(|d| d.value == value)
    }

    pub fn room_info(&self, value: &str) -> Option<&'static RoomOption> {
        self.rooms.iter().find(|r| r.value == value)
    }

    pub fn stats(&self) -> HospitalStats {
        let mut rooms_by_type = BTreeMap::new();
        for room in self.rooms {
            *rooms_by_type.entry(room.room_type).or_insert(0) += 1;
        }

        let mut doctors_by_department = BTreeMap::new();
        for doctor in self.doctors {
            *doctors_by_department.entry(doctor.department).or_insert(0) += 1;
        }

        let count = |t: RoomType| rooms_by_type.get(&t).copied().unwrap_or(0);
        let vip_rooms = count(RoomType::Vip);
        let icu_rooms = count(RoomType::Icu);
        let regular_rooms = self.rooms.iter().filter(|r| r.room_type.is_regular()).count();

        HospitalStats {
            total_doctors: self.doctors.len(),
            total_rooms: self.rooms.len(),
            rooms_by_type,
            doctors_by_department,
            vip_rooms,
            icu_rooms,
            regular_rooms,
        }
    }
}
