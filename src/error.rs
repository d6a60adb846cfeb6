//! Domain errors raised by the hospital services.

use crate::db::DbError;
use crate::models::RoomType;
use thiserror::Error;

/// Errors produced by allocation, scheduling and registry operations.
///
/// Every variant except `Store` describes operator input that can be corrected and
/// retried from the same screen.
#[derive(Error, Debug)]
pub enum HospitalError {
    #[error("Patient ID {0} not found")]
    UnknownPatient(String),

    #[error("Doctor ID {0} not found")]
    UnknownDoctor(String),

    #[error("Medicine ID {0} not found")]
    UnknownMedicine(String),

    #[error("{kind} ID {id} not found")]
    UnknownRecord { kind: &'static str, id: String },

    #[error("{kind} ID {id} already exists")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Patient {patient_id} is already occupying room {room_id}")]
    AlreadyOccupying { patient_id: String, room_id: String },

    #[error("No {0} rooms available at the moment")]
    NoRoomAvailable(RoomType),

    #[error("Invalid room ID {0} or the room is already available")]
    InvalidRoom(String),

    #[error("Unknown room type: {0}")]
    InvalidRoomType(String),

    #[error("No ambulances are available at the moment")]
    NoAmbulanceAvailable,

    #[error("Invalid date '{0}': use YYYY-MM-DD, today or later")]
    InvalidDate(String),

    #[error("Invalid time '{0}': use 24-hour HH:MM")]
    InvalidTime(String),

    #[error("Doctor {doctor_id} is already booked at {time} on {date}")]
    SlotConflict {
        doctor_id: String,
        date: String,
        time: String,
    },

    #[error("Invalid age '{0}': must be a number between 1 and 99")]
    InvalidAge(String),

    #[error("Invalid phone number '{0}': 10 digits starting with 9, 8, 7 or 6")]
    InvalidPhone(String),

    #[error("Invalid price '{0}': must be a positive number")]
    InvalidPrice(String),

    #[error("Invalid status '{0}': use Available or Booked")]
    InvalidStatus(String),

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error(transparent)]
    Store(#[from] DbError),
}

pub type HospitalResult<T> = Result<T, HospitalError>;
