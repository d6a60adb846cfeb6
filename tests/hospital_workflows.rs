use proptest::prelude::*;
use std::collections::HashSet;
use time::macros::date;
use time::Date;
use wardroom::db::Database;
use wardroom::error::HospitalError;
use wardroom::models::{Ambulance, AmbulanceStatus, Appointment, Room, RoomType};
use wardroom::services::appointments::{self, AppointmentRequest};
use wardroom::services::{ambulances, registry, rooms, symptoms};

const TODAY: Date = date!(2025 - 05 - 20);

fn hospital(patients: &[&str], doctors: &[&str]) -> Database {
    let mut db = Database::open_in_memory().unwrap();
    for id in patients {
        registry::add(&mut db, &registry::patient(id, "Patient", "40", "Flu").unwrap()).unwrap();
    }
    for id in doctors {
        registry::add(&mut db, &registry::doctor(id, "Doctor", "General", "9123456780").unwrap())
            .unwrap();
    }
    db
}

#[test]
fn test_rooms_fill_first_fit_and_refuse_when_full() {
    let ids: Vec<String> = (1..=6).map(|n| format!("P{n}")).collect();
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let mut db = hospital(&refs, &[]);
    rooms::initialize(&mut db).unwrap();

    let allotted: Vec<String> = refs[..5]
        .iter()
        .map(|p| rooms::allot(&mut db, p, RoomType::Deluxe).unwrap().room_id)
        .collect();
    assert_eq!(allotted, ["R016", "R017", "R018", "R019", "R020"]);

    let err = rooms::allot(&mut db, "P6", RoomType::Deluxe).unwrap_err();
    assert!(matches!(err, HospitalError::NoRoomAvailable(RoomType::Deluxe)));

    // Releasing a middle room makes it the next one handed out.
    assert_eq!(rooms::release(&mut db, "R018").unwrap(), "P3");
    assert_eq!(
        rooms::allot(&mut db, "P6", RoomType::Deluxe).unwrap().room_id,
        "R018"
    );
}

#[test]
fn test_room_occupancy_matches_patients() {
    let mut db = hospital(&["P1", "P2"], &[]);
    rooms::initialize(&mut db).unwrap();

    rooms::allot(&mut db, "P1", RoomType::General).unwrap();
    assert!(matches!(
        rooms::allot(&mut db, "P1", RoomType::Private),
        Err(HospitalError::AlreadyOccupying { .. })
    ));
    assert!(matches!(
        rooms::allot(&mut db, "P9", RoomType::Private),
        Err(HospitalError::UnknownPatient(_))
    ));
    assert!(matches!(
        rooms::release(&mut db, "R002"),
        Err(HospitalError::InvalidRoom(_))
    ));

    let occupied: Vec<Room> = rooms::room_status(&db)
        .unwrap()
        .into_iter()
        .filter(|r| !r.is_available())
        .collect();
    assert_eq!(occupied.len(), 1);
    assert_eq!(occupied[0].occupant(), Some("P1"));
}

#[test]
fn test_ambulances_are_booked_in_order_until_none_left() {
    let mut db = Database::open_in_memory().unwrap();
    registry::add(&mut db, &registry::ambulance("A1", "Ravi", "Booked").unwrap()).unwrap();
    registry::add(&mut db, &registry::ambulance("A2", "Meena", "").unwrap()).unwrap();
    registry::add(&mut db, &registry::ambulance("A3", "Joe", "available").unwrap()).unwrap();

    assert_eq!(ambulances::book(&mut db).unwrap().ambulance_id, "A2");
    assert_eq!(ambulances::book(&mut db).unwrap().ambulance_id, "A3");
    assert!(matches!(
        ambulances::book(&mut db),
        Err(HospitalError::NoAmbulanceAvailable)
    ));

    let statuses: Vec<AmbulanceStatus> = registry::list::<Ambulance>(&db)
        .unwrap()
        .into_iter()
        .map(|a| a.status)
        .collect();
    assert!(statuses.iter().all(|s| *s == AmbulanceStatus::Booked));
}

#[test]
fn test_symptom_report_matches_in_table_order() {
    assert_eq!(
        symptoms::identify_diseases("I have nausea and severe headache"),
        ["Hypertension", "Dengue", "Food Poisoning", "Migraine"]
    );
    assert!(symptoms::identify_diseases("").is_empty());
}

#[test]
fn test_deleting_a_patient_keeps_dependent_records() {
    let mut db = hospital(&["P1"], &["D1"]);
    rooms::initialize(&mut db).unwrap();
    rooms::allot(&mut db, "P1", RoomType::General).unwrap();
    appointments::schedule(
        &mut db,
        AppointmentRequest {
            patient_id: "P1",
            doctor_id: "D1",
            date: "2025-06-01",
            time: "10:00",
        },
        TODAY,
    )
    .unwrap();

    registry::delete::<wardroom::models::Patient>(&mut db, "P1").unwrap();

    assert_eq!(rooms::room_of(&db, "P1").unwrap().unwrap().id, "R001");
    assert_eq!(appointments::appointments_for_patient(&db, "P1").unwrap().len(), 1);
}

fn slot_strategy() -> impl Strategy<Value = (usize, usize, u32, u8, u8)> {
    (0usize..3, 0usize..2, 0u32..3, 8u8..10, prop_oneof![Just(0u8), Just(30u8)])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_no_two_appointments_share_a_slot(
        attempts in proptest::collection::vec(slot_strategy(), 1..25)
    ) {
        let patients = ["P1", "P2", "P3"];
        let doctors = ["D1", "D2"];
        let mut db = hospital(&patients, &doctors);

        for (p, d, day, hour, minute) in attempts {
            let date = (TODAY + time::Duration::days(i64::from(day))).to_string();
            // Alternate padded and unpadded hours; both name the same slot.
            let time = if hour % 2 == 0 {
                format!("{hour:02}:{minute:02}")
            } else {
                format!("{hour}:{minute:02}")
            };
            let result = appointments::schedule(
                &mut db,
                AppointmentRequest {
                    patient_id: patients[p],
                    doctor_id: doctors[d],
                    date: &date,
                    time: &time,
                },
                TODAY,
            );
            let accepted = matches!(result, Ok(_) | Err(HospitalError::SlotConflict { .. }));
            prop_assert!(accepted);
        }

        let booked = db.store().all::<Appointment>().unwrap();
        let slots: HashSet<_> = booked
            .iter()
            .map(|a| (a.doctor_id.clone(), a.date, a.time))
            .collect();
        prop_assert_eq!(slots.len(), booked.len());
    }
}
