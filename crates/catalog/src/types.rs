//! Catalog record types.

use crate::CatalogError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Ward class of a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoomType {
    /// Single-occupancy VIP suite.
    Vip,
    /// First class, two beds.
    Kelas1,
    /// Second class, four beds with shared bathroom.
    Kelas2,
    /// Intensive care.
    Icu,
}

impl RoomType {
    /// Catalog string form.
    pub fn as_str(self) -> &'static str {
        match self {
            RoomType::Vip => "VIP",
            RoomType::Kelas1 => "Kelas-1",
            RoomType::Kelas2 => "Kelas-2",
            RoomType::Icu => "ICU",
        }
    }

    fn from_wire(s: &str) -> Option<Self> {
        match s {
            "VIP" => Some(RoomType::Vip),
            "Kelas-1" => Some(RoomType::Kelas1),
            "Kelas-2" => Some(RoomType::Kelas2),
            "ICU" => Some(RoomType::Icu),
            _ => None,
        }
    }

    /// Regular wards are the two shared classes.
    pub fn is_regular(self) -> bool {
        matches!(self, RoomType::Kelas1 | RoomType::Kelas2)
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::from_wire(trimmed)
            .or_else(|| {
                // Accept case-insensitive input from the command line.
                crate::ROOM_TYPES
                    .into_iter()
                    .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
            })
            .ok_or_else(|| CatalogError::UnknownRoomType(s.to_string()))
    }
}

impl Serialize for RoomType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// A doctor who can be recorded as the responsible physician.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DoctorOption {
    pub value: &'static str,
    pub label: &'static str,
    /// Specialisation in the local language, e.g. "Penyakit Dalam".
    pub specialization: &'static str,
    /// Department name, e.g. "Internal Medicine".
    pub department: &'static str,
}

/// An inpatient room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoomOption {
    pub value: &'static str,
    pub label: &'static str,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub floor: u8,
    pub capacity: u8,
    pub facilities: &'static [&'static str],
}
