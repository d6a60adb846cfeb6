//! Create, read, update and delete for the administrator-managed categories.
//!
//! The constructors at the bottom turn raw form input into validated records; the
//! generic operations then store them.

use crate::db::{Database, DbError, Record};
use crate::error::{HospitalError, HospitalResult};
use crate::models::{Ambulance, AmbulanceStatus, Doctor, Medicine, Patient, StaffMember};
use crate::validation;
use tracing::info;

fn unknown<R: Record>(id: &str) -> HospitalError {
    HospitalError::UnknownRecord {
        kind: R::CATEGORY.label(),
        id: id.to_string(),
    }
}

/// Adds a record whose ID is not yet taken.
pub fn add<R: Record>(db: &mut Database, record: &R) -> HospitalResult<()> {
    db.transaction(|store| match store.insert(record) {
        Err(DbError::Duplicate { .. }) => Err(HospitalError::DuplicateId {
            kind: R::CATEGORY.label(),
            id: record.id().to_string(),
        }),
        other => other.map_err(HospitalError::from),
    })?;
    info!(category = R::CATEGORY.as_str(), id = record.id(), "Added record");
    Ok(())
}

/// Every record of the category, in stored order.
pub fn list<R: Record>(db: &Database) -> HospitalResult<Vec<R>> {
    Ok(db.store().all()?)
}

/// Looks a record up by ID.
pub fn find<R: Record>(db: &Database, id: &str) -> HospitalResult<R> {
    db.store().get(id.trim())?.ok_or_else(|| unknown::<R>(id.trim()))
}

/// Replaces an existing record.
pub fn update<R: Record>(db: &mut Database, record: &R) -> HospitalResult<()> {
    db.transaction(|store| match store.put(record) {
        Err(DbError::NotFound { .. }) => Err(unknown::<R>(record.id())),
        other => other.map_err(HospitalError::from),
    })?;
    info!(category = R::CATEGORY.as_str(), id = record.id(), "Updated record");
    Ok(())
}

/// Deletes a record. Nothing that references it is touched.
pub fn delete<R: Record>(db: &mut Database, id: &str) -> HospitalResult<()> {
    let id = id.trim();
    let removed = db.transaction(|store| store.remove::<R>(id))?;
    if !removed {
        return Err(unknown::<R>(id));
    }
    info!(category = R::CATEGORY.as_str(), id, "Deleted record");
    Ok(())
}

pub fn patient(id: &str, name: &str, age: &str, disease: &str) -> HospitalResult<Patient> {
    Ok(Patient {
        id: validation::required("Patient ID", id)?,
        name: validation::required("Name", name)?,
        age: validation::age(age)?,
        disease: validation::required("Disease", disease)?,
    })
}

pub fn doctor(id: &str, name: &str, specialty: &str, contact: &str) -> HospitalResult<Doctor> {
    Ok(Doctor {
        id: validation::required("Doctor ID", id)?,
        name: validation::required("Name", name)?,
        specialty: validation::required("Specialty", specialty)?,
        contact: validation::phone(contact)?,
    })
}

pub fn staff_member(id: &str, name: &str, role: &str, contact: &str) -> HospitalResult<StaffMember> {
    Ok(StaffMember {
        id: validation::required("Staff ID", id)?,
        name: validation::required("Name", name)?,
        role: validation::required("Role", role)?,
        contact: validation::phone(contact)?,
    })
}

/// Builds an ambulance. A blank status means `Available`.
pub fn ambulance(id: &str, driver: &str, status: &str) -> HospitalResult<Ambulance> {
    let status = if status.trim().is_empty() {
        AmbulanceStatus::Available
    } else {
        status.parse()?
    };
    Ok(Ambulance {
        id: validation::required("Ambulance ID", id)?,
        driver: validation::required("Driver name", driver)?,
        status,
    })
}

pub fn medicine(id: &str, name: &str, price: &str) -> HospitalResult<Medicine> {
    Ok(Medicine {
        id: validation::required("Medicine ID", id)?,
        name: validation::required("Name", name)?,
        price: validation::price(price)?,
    })
}
