//! Room allotment and release.
//!
//! Allotment is first-fit: rooms are scanned in stored order and the first available
//! room of the requested type is taken. A patient holds at most one room.

use crate::db::Database;
use crate::error::{HospitalError, HospitalResult};
use crate::models::{Patient, Room, RoomStatus, RoomType};
use tracing::info;

/// Rooms created per type by [`initialize`].
const ROOMS_PER_TYPE: usize = 5;

/// The result of a successful allotment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allotment {
    pub room_id: String,
    pub floor: u8,
    pub kind: RoomType,
}

/// Assigns the first available room of type `kind` to a patient.
///
/// # Errors
///
/// * [`HospitalError::UnknownPatient`] if the patient does not exist.
/// * [`HospitalError::AlreadyOccupying`] if the patient already holds any room.
/// * [`HospitalError::NoRoomAvailable`] if every room of this type is occupied.
pub fn allot(db: &mut Database, patient_id: &str, kind: RoomType) -> HospitalResult<Allotment> {
    let patient_id = patient_id.trim();
    let allotment = db.transaction(|store| {
        if !store.exists::<Patient>(patient_id)? {
            return Err(HospitalError::UnknownPatient(patient_id.to_string()));
        }

        let rooms = store.all::<Room>()?;
        if let Some(held) = rooms.iter().find(|room| room.occupant() == Some(patient_id)) {
            return Err(HospitalError::AlreadyOccupying {
                patient_id: patient_id.to_string(),
                room_id: held.id.clone(),
            });
        }

        let mut room = rooms
            .into_iter()
            .find(|room| room.kind == kind && room.is_available())
            .ok_or(HospitalError::NoRoomAvailable(kind))?;

        room.status = RoomStatus::Occupied(patient_id.to_string());
        store.put(&room)?;

        Ok(Allotment {
            room_id: room.id,
            floor: room.floor,
            kind,
        })
    })?;

    info!(
        patient_id,
        room_id = %allotment.room_id,
        floor = allotment.floor,
        kind = %kind,
        "Allotted room"
    );
    Ok(allotment)
}

/// Frees an occupied room.
///
/// # Returns
///
/// The ID of the patient who was released.
///
/// # Errors
///
/// [`HospitalError::InvalidRoom`] if the room does not exist or is already available.
pub fn release(db: &mut Database, room_id: &str) -> HospitalResult<String> {
    let room_id = room_id.trim();
    let occupant = db.transaction(|store| {
        let mut room = store
            .get::<Room>(room_id)?
            .ok_or_else(|| HospitalError::InvalidRoom(room_id.to_string()))?;

        let occupant = match std::mem::replace(&mut room.status, RoomStatus::Available) {
            RoomStatus::Occupied(patient_id) => patient_id,
            RoomStatus::Available => return Err(HospitalError::InvalidRoom(room_id.to_string())),
        };
        store.put(&room)?;
        Ok(occupant)
    })?;

    info!(room_id, patient_id = %occupant, "Released room");
    Ok(occupant)
}

/// Every room in stored order.
pub fn room_status(db: &Database) -> HospitalResult<Vec<Room>> {
    Ok(db.store().all()?)
}

/// The room a patient currently occupies, if any.
pub fn room_of(db: &Database, patient_id: &str) -> HospitalResult<Option<Room>> {
    Ok(db
        .store()
        .all::<Room>()?
        .into_iter()
        .find(|room| room.occupant() == Some(patient_id)))
}

/// The standard room table: R001 to R020, five rooms of each type, one type per
/// floor.
pub fn default_rooms() -> Vec<Room> {
    RoomType::ALL
        .iter()
        .enumerate()
        .flat_map(|(floor_index, &kind)| {
            (0..ROOMS_PER_TYPE).map(move |n| {
                let number = floor_index * ROOMS_PER_TYPE + n + 1;
                Room {
                    id: format!("R{number:03}"),
                    floor: floor_index as u8 + 1,
                    kind,
                    status: RoomStatus::Available,
                }
            })
        })
        .collect()
}

/// Replaces the room table with [`default_rooms`]. Every occupancy is cleared.
pub fn initialize(db: &mut Database) -> HospitalResult<Vec<Room>> {
    let rooms = default_rooms();
    db.transaction(|store| store.replace_all(&rooms))?;
    info!(count = rooms.len(), "Initialized rooms");
    Ok(rooms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::registry;

    fn setup() -> Database {
        let mut db = Database::open_in_memory().unwrap();
        for (id, name) in [("P1", "Alice"), ("P2", "Bob"), ("P3", "Carol")] {
            let patient = registry::patient(id, name, "30", "Flu").unwrap();
            registry::add(&mut db, &patient).unwrap();
        }
        initialize(&mut db).unwrap();
        db
    }

    fn occupants(db: &Database, patient_id: &str) -> usize {
        room_status(db)
            .unwrap()
            .iter()
            .filter(|room| room.occupant() == Some(patient_id))
            .count()
    }

    #[test]
    fn test_default_rooms_layout() {
        let rooms = default_rooms();
        assert_eq!(rooms.len(), 20);
        assert_eq!(rooms[0].id, "R001");
        assert_eq!(rooms[19].id, "R020");
        assert_eq!(rooms[5].kind, RoomType::SemiPrivate);
        assert_eq!(rooms[5].floor, 2);
        assert_eq!(rooms[15].kind, RoomType::Deluxe);
        assert_eq!(rooms[15].floor, 4);
        assert!(rooms.iter().all(Room::is_available));
    }

    #[test]
    fn test_allot_is_first_fit() {
        let mut db = setup();

        let first = allot(&mut db, "P1", RoomType::Private).unwrap();
        assert_eq!(first.room_id, "R011");
        assert_eq!(first.floor, 3);

        let second = allot(&mut db, "P2", RoomType::Private).unwrap();
        assert_eq!(second.room_id, "R012");
        assert_eq!(occupants(&db, "P1"), 1);
    }

    #[test]
    fn test_allot_unknown_patient() {
        let mut db = setup();
        assert!(matches!(
            allot(&mut db, "P404", RoomType::General),
            Err(HospitalError::UnknownPatient(_))
        ));
    }

    #[test]
    fn test_allot_twice_fails_for_any_type() {
        let mut db = setup();
        allot(&mut db, "P1", RoomType::General).unwrap();

        for kind in RoomType::ALL {
            let err = allot(&mut db, "P1", kind).unwrap_err();
            assert!(
                matches!(&err, HospitalError::AlreadyOccupying { room_id, .. } if room_id == "R001"),
                "{kind}: {err}"
            );
        }
        assert_eq!(occupants(&db, "P1"), 1);
    }

    #[test]
    fn test_no_room_available() {
        let mut db = setup();
        db.store()
            .replace_all(&[Room {
                id: "R100".to_string(),
                floor: 4,
                kind: RoomType::Deluxe,
                status: RoomStatus::Available,
            }])
            .unwrap();

        allot(&mut db, "P1", RoomType::Deluxe).unwrap();
        assert!(matches!(
            allot(&mut db, "P2", RoomType::Deluxe),
            Err(HospitalError::NoRoomAvailable(RoomType::Deluxe))
        ));
        assert!(matches!(
            allot(&mut db, "P2", RoomType::General),
            Err(HospitalError::NoRoomAvailable(RoomType::General))
        ));
    }

    #[test]
    fn test_release_and_reuse() {
        let mut db = setup();
        db.store()
            .replace_all(&[Room {
                id: "R001".to_string(),
                floor: 1,
                kind: RoomType::General,
                status: RoomStatus::Available,
            }])
            .unwrap();

        allot(&mut db, "P1", RoomType::General).unwrap();
        assert_eq!(release(&mut db, "R001").unwrap(), "P1");

        let reused = allot(&mut db, "P2", RoomType::General).unwrap();
        assert_eq!(reused.room_id, "R001");
        assert_eq!(room_of(&db, "P2").unwrap().unwrap().id, "R001");
        assert!(room_of(&db, "P1").unwrap().is_none());
    }

    #[test]
    fn test_release_invalid_room() {
        let mut db = setup();
        assert!(matches!(release(&mut db, "R999"), Err(HospitalError::InvalidRoom(_))));
        assert!(matches!(release(&mut db, "R001"), Err(HospitalError::InvalidRoom(_))));
    }

    #[test]
    fn test_initialize_clears_occupancy() {
        let mut db = setup();
        allot(&mut db, "P1", RoomType::General).unwrap();
        initialize(&mut db).unwrap();
        assert_eq!(occupants(&db, "P1"), 0);
    }
}
