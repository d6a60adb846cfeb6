use std::fs;
use tempfile::tempdir;
use time::macros::{date, datetime};
use wardroom::db::Database;
use wardroom::models::{Doctor, Medicine, Patient};
use wardroom::services::appointments::{self, AppointmentRequest};
use wardroom::services::{pharmacy, registry, rooms};

#[test]
fn test_records_survive_reopen_in_stored_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hospital.db");

    {
        let mut db = Database::open(&path).unwrap();
        for (id, name) in [("P2", "Bob"), ("P1", "Alice"), ("P3", "Carol")] {
            registry::add(&mut db, &registry::patient(id, name, "30", "Flu").unwrap()).unwrap();
        }
        // An update keeps the record in place.
        registry::update(&mut db, &registry::patient("P2", "Bobby", "31", "Cold").unwrap())
            .unwrap();
        registry::add(&mut db, &registry::doctor("D1", "House", "General", "9876543210").unwrap())
            .unwrap();
        registry::add(&mut db, &registry::medicine("M1", "Paracetamol", "12.5").unwrap()).unwrap();

        rooms::initialize(&mut db).unwrap();
        rooms::allot(&mut db, "P1", wardroom::models::RoomType::Private).unwrap();
        appointments::schedule(
            &mut db,
            AppointmentRequest {
                patient_id: "P1",
                doctor_id: "D1",
                date: "2025-06-01",
                time: "9:00",
            },
            date!(2025 - 05 - 20),
        )
        .unwrap();
        pharmacy::purchase(&mut db, "P1", "M1", datetime!(2025-05-20 12:00:00 UTC)).unwrap();
    }

    let db = Database::open(&path).unwrap();
    let patients = registry::list::<Patient>(&db).unwrap();
    let names: Vec<&str> = patients.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Bobby", "Alice", "Carol"]);
    assert_eq!(patients[0].age, 31);

    assert_eq!(registry::find::<Doctor>(&db, "D1").unwrap().name, "House");
    assert_eq!(registry::find::<Medicine>(&db, "M1").unwrap().price, "12.5");
    assert_eq!(rooms::room_of(&db, "P1").unwrap().unwrap().id, "R011");

    let listing = appointments::appointments_for_patient(&db, "P1").unwrap();
    let summary = listing.iter().next().unwrap();
    assert_eq!(summary.doctor_name, "House");
    assert_eq!(summary.time.to_string(), "09:00");

    assert_eq!(pharmacy::purchases_for_patient(&db, "P1").unwrap().len(), 1);
}

#[test]
fn test_unreadable_file_is_set_aside() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hospital.db");
    fs::write(&path, "patients,P1,Alice,30,Flu\n".repeat(64)).unwrap();

    let mut db = Database::open(&path).unwrap();
    assert!(registry::list::<Patient>(&db).unwrap().is_empty());
    assert!(dir.path().join("hospital.db.corrupt").exists());

    registry::add(&mut db, &registry::patient("P1", "Alice", "30", "Flu").unwrap()).unwrap();
    drop(db);

    let db = Database::open(&path).unwrap();
    assert_eq!(registry::list::<Patient>(&db).unwrap().len(), 1);
}

#[test]
fn test_admin_seed_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hospital.db");

    let db = Database::open(&path).unwrap();
    assert!(db.seed_admin("admin", "secret").unwrap());
    assert!(!db.seed_admin("admin", "changed").unwrap());
    drop(db);

    let db = Database::open(&path).unwrap();
    assert!(db.authenticate_user("admin", "secret").is_ok());
    assert!(db.authenticate_user("admin", "changed").is_err());
}
