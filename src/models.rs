//! Data models for Wardroom.

use crate::db::{Category, Record};
use crate::error::HospitalError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::Date;

/// Represents a patient in the hospital management system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// The patient's unique ID.
    pub id: String,
    /// The patient's name.
    pub name: String,
    /// The patient's age, between 1 and 99.
    pub age: u8,
    /// Free-text description of the patient's disease.
    pub disease: String,
}

/// Represents a doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    /// 10-digit phone number starting with 6, 7, 8 or 9.
    pub contact: String,
}

/// Represents a non-doctor staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    /// Free-text role, e.g. Nurse, Technician, Receptionist.
    pub role: String,
    pub contact: String,
}

/// Availability of an ambulance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmbulanceStatus {
    Available,
    Booked,
}

impl fmt::Display for AmbulanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AmbulanceStatus::Available => "Available",
            AmbulanceStatus::Booked => "Booked",
        })
    }
}

impl FromStr for AmbulanceStatus {
    type Err = HospitalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(AmbulanceStatus::Available),
            "booked" => Ok(AmbulanceStatus::Booked),
            _ => Err(HospitalError::InvalidStatus(s.trim().to_string())),
        }
    }
}

/// Represents an ambulance and its single mutable status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ambulance {
    pub id: String,
    pub driver: String,
    pub status: AmbulanceStatus,
}

/// The four room categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    General,
    #[serde(rename = "Semi-Private")]
    SemiPrivate,
    Private,
    #[serde(rename = "DELUX/ICU", alias = "DELUX", alias = "ICU")]
    Deluxe,
}

impl RoomType {
    /// All room types in menu order.
    pub const ALL: [RoomType; 4] = [
        RoomType::General,
        RoomType::SemiPrivate,
        RoomType::Private,
        RoomType::Deluxe,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RoomType::General => "General",
            RoomType::SemiPrivate => "Semi-Private",
            RoomType::Private => "Private",
            RoomType::Deluxe => "DELUX/ICU",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RoomType {
    type Err = HospitalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(RoomType::General),
            "semi-private" | "semiprivate" => Ok(RoomType::SemiPrivate),
            "private" => Ok(RoomType::Private),
            "delux" | "deluxe" | "icu" | "delux/icu" => Ok(RoomType::Deluxe),
            _ => Err(HospitalError::InvalidRoomType(s.trim().to_string())),
        }
    }
}

/// Occupancy of a room. The occupant exists exactly when the room is occupied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "occupant")]
pub enum RoomStatus {
    Available,
    Occupied(String),
}

/// Represents a hospital room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub floor: u8,
    pub kind: RoomType,
    pub status: RoomStatus,
}

impl Room {
    pub fn is_available(&self) -> bool {
        matches!(self.status, RoomStatus::Available)
    }

    /// The patient occupying this room, if any.
    pub fn occupant(&self) -> Option<&str> {
        match &self.status {
            RoomStatus::Occupied(patient_id) => Some(patient_id),
            RoomStatus::Available => None,
        }
    }
}

/// A 24-hour wall-clock time with minute precision, displayed as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotTime {
    hour: u8,
    minute: u8,
}

impl SlotTime {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for SlotTime {
    type Err = HospitalError;

    /// Parses `H:MM` or `HH:MM`. Both parts must be plain ASCII digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || HospitalError::InvalidTime(s.to_string());
        let (hours, minutes) = s.trim().split_once(':').ok_or_else(invalid)?;

        let is_number = |part: &str| {
            !part.is_empty() && part.len() <= 2 && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !is_number(hours) || !is_number(minutes) {
            return Err(invalid());
        }

        let hour: u8 = hours.parse().map_err(|_| invalid())?;
        let minute: u8 = minutes.parse().map_err(|_| invalid())?;
        SlotTime::new(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for SlotTime {
    type Error = HospitalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotTime> for String {
    fn from(value: SlotTime) -> Self {
        value.to_string()
    }
}

/// Separates the fields of an appointment's store key. Record IDs never contain
/// control characters, so the joined key is unique per field tuple.
const KEY_SEPARATOR: char = '\u{1f}';

/// A booked appointment. The ID is derived from the other four fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub date: Date,
    pub time: SlotTime,
    /// Store key; `id` is display text and may repeat across different bookings.
    key: String,
}

impl Appointment {
    pub fn new(patient_id: &str, doctor_id: &str, date: Date, time: SlotTime) -> Self {
        Self {
            id: Self::natural_key(patient_id, doctor_id, date, time),
            patient_id: patient_id.to_string(),
            doctor_id: doctor_id.to_string(),
            date,
            time,
            key: format!(
                "{patient_id}{sep}{doctor_id}{sep}{date}{sep}{time}",
                sep = KEY_SEPARATOR
            ),
        }
    }

    /// The deterministic appointment ID for the given fields.
    pub fn natural_key(patient_id: &str, doctor_id: &str, date: Date, time: SlotTime) -> String {
        format!("{patient_id}{doctor_id}{date}_{time}")
    }

    /// Whether this appointment holds the given doctor/date/time slot.
    pub fn holds_slot(&self, doctor_id: &str, date: Date, time: SlotTime) -> bool {
        self.doctor_id == doctor_id && self.date == date && self.time == time
    }
}

/// Represents a pharmaceutical product for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: String,
    pub name: String,
    /// Positive decimal price, kept as entered.
    pub price: String,
}

/// An entry in the medicine purchase ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    /// Ledger sequence number.
    pub id: i64,
    pub patient_id: String,
    pub medicine_id: String,
    pub medicine_name: String,
    pub price: String,
    /// `YYYY-MM-DD HH:MM:SS`.
    pub purchased_at: String,
}

impl Record for Patient {
    const CATEGORY: Category = Category::Patient;
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Doctor {
    const CATEGORY: Category = Category::Doctor;
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for StaffMember {
    const CATEGORY: Category = Category::Staff;
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Ambulance {
    const CATEGORY: Category = Category::Ambulance;
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Room {
    const CATEGORY: Category = Category::Room;
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Appointment {
    const CATEGORY: Category = Category::Appointment;
    fn id(&self) -> &str {
        &self.key
    }
}

impl Record for Medicine {
    const CATEGORY: Category = Category::Medicine;
    fn id(&self) -> &str {
        &self.id
    }
}
