//! The hospital's doctor and room catalogs.

use crate::types::{DoctorOption, RoomOption, RoomType};

const VIP_FACILITIES: &[&str] = &[
    "AC",
    "TV LCD 42\"",
    "Kulkas Mini",
    "Sofa Bed",
    "Kamar Mandi Pribadi",
    "Wi-Fi",
];
const KELAS_1_FACILITIES: &[&str] = &["AC", "TV LCD 32\"", "Kamar Mandi Pribadi", "Wi-Fi"];
const KELAS_2_FACILITIES: &[&str] = &["AC", "TV LCD 24\"", "Kamar Mandi Bersama", "Wi-Fi"];
const ICU_FACILITIES: &[&str] = &[
    "Ventilator",
    "Monitor Vital Signs",
    "Defibrillator",
    "Infusion Pump",
    "Central Monitoring",
];

pub static DOCTORS: &[DoctorOption] = &[
    DoctorOption {
        value: "Dr. Sarah Wijaya, Sp.PD",
        label: "Dr. Sarah Wijaya, Sp.PD",
        specialization: "Penyakit Dalam",
        department: "Internal Medicine",
    },
    DoctorOption {
        value: "Dr. Budi Santoso, Sp.JP",
        label: "Dr. Budi Santoso, Sp.JP",
        specialization: "Jantung dan Pembuluh Darah",
        department: "Cardiology",
    },
    DoctorOption {
        value: "Dr. Andi Pratama, Sp.P",
        label: "Dr. Andi Pratama, Sp.P",
        specialization: "Paru-paru",
        department: "Pulmonology",
    },
    DoctorOption {
        value: "Dr. Indira Sari, Sp.B",
        label: "Dr. Indira Sari, Sp.B",
        specialization: "Bedah Umum",
        department: "General Surgery",
    },
    DoctorOption {
        value: "Dr. Hendra Gunawan, Sp.S",
        label: "Dr. Hendra Gunawan, Sp.S",
        specialization: "Saraf",
        department: "Neurology",
    },
    DoctorOption {
        value: "Dr. Maya Sari, Sp.A",
        label: "Dr. Maya Sari, Sp.A",
        specialization: "Anak",
        department: "Pediatrics",
    },
    DoctorOption {
        value: "Dr. Rahmat Hidayat, Sp.OG",
        label: "Dr. Rahmat Hidayat, Sp.OG",
        specialization: "Obstetri dan Ginekologi",
        department: "Obstetrics & Gynecology",
    },
    DoctorOption {
        value: "Dr. Lisa Andriani, Sp.M",
        label: "Dr. Lisa Andriani, Sp.M",
        specialization: "Mata",
        department: "Ophthalmology",
    },
    DoctorOption {
        value: "Dr. Rudi Hermawan, Sp.THT",
        label: "Dr. Rudi Hermawan, Sp.THT",
        specialization: "Telinga Hidung Tenggorokan",
        department: "ENT",
    },
    DoctorOption {
        value: "Dr. Sinta Dewi, Sp.KJ",
        label: "Dr. Sinta Dewi, Sp.KJ",
        specialization: "Kedokteran Jiwa",
        department: "Psychiatry",
    },
];

const fn room(
    value: &'static str,
    label: &'static str,
    room_type: RoomType,
    floor: u8,
    capacity: u8,
    facilities: &'static [&'static str],
) -> RoomOption {
    RoomOption {
        value,
        label,
        room_type,
        floor,
        capacity,
        facilities,
    }
}

pub static ROOMS: &[RoomOption] = &[
    room("VIP-101", "VIP-101", RoomType::Vip, 1, 1, VIP_FACILITIES),
    room("VIP-102", "VIP-102", RoomType::Vip, 1, 1, VIP_FACILITIES),
    room("VIP-103", "VIP-103", RoomType::Vip, 1, 1, VIP_FACILITIES),
    room("Kelas-1-201", "Kelas 1 - 201", RoomType::Kelas1, 2, 2, KELAS_1_FACILITIES),
    room("Kelas-1-202", "Kelas 1 - 202", RoomType::Kelas1, 2, 2, KELAS_1_FACILITIES),
    room("Kelas-1-203", "Kelas 1 - 203", RoomType::Kelas1, 2, 2, KELAS_1_FACILITIES),
    room("Kelas-1-204", "Kelas 1 - 204", RoomType::Kelas1, 2, 2, KELAS_1_FACILITIES),
    room("Kelas-2-301", "Kelas 2 - 301", RoomType::Kelas2, 3, 4, KELAS_2_FACILITIES),
    room("Kelas-2-302", "Kelas 2 - 302", RoomType::Kelas2, 3, 4, KELAS_2_FACILITIES),
    room("Kelas-2-303", "Kelas 2 - 303", RoomType::Kelas2, 3, 4, KELAS_2_FACILITIES),
    room("Kelas-2-304", "Kelas 2 - 304", RoomType::Kelas2, 3, 4, KELAS_2_FACILITIES),
    room("ICU-001", "ICU-001", RoomType::Icu, 4, 1, ICU_FACILITIES),
    room("ICU-002", "ICU-002", RoomType::Icu, 4, 1, ICU_FACILITIES),
    room("ICU-003", "ICU-003", RoomType::Icu, 4, 1, ICU_FACILITIES),
    room("ICU-004", "ICU-004", RoomType::Icu, 4, 1, ICU_FACILITIES),
];

pub const DEPARTMENTS: &[&str] = &[
    "Internal Medicine",
    "Cardiology",
    "Pulmonology",
    "General Surgery",
    "Neurology",
    "Pediatrics",
    "Obstetrics & Gynecology",
    "Ophthalmology",
    "ENT",
    "Psychiatry",
];

pub const ROOM_TYPES: [RoomType; 4] = [
    RoomType::Vip,
    RoomType::Kelas1,
    RoomType::Kelas2,
    RoomType::Icu,
];
