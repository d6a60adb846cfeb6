//! Appointment scheduling.
//!
//! A slot is a (doctor, date, time) triple and is held by at most one appointment.
//! The same patient may book several doctors at the same time.

use crate::db::Database;
use crate::error::{HospitalError, HospitalResult};
use crate::models::{Appointment, Doctor, Patient, SlotTime};
use crate::validation;
use std::collections::HashMap;
use time::Date;
use tracing::{info, warn};

/// Raw appointment input as typed by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppointmentRequest<'a> {
    pub patient_id: &'a str,
    pub doctor_id: &'a str,
    pub date: &'a str,
    pub time: &'a str,
}

/// Books an appointment after validating it against the current records.
///
/// Checks run in this order: patient exists, doctor exists, date is ISO and not
/// before `today`, time is `HH:MM`, slot is free.
pub fn schedule(
    db: &mut Database,
    request: AppointmentRequest<'_>,
    today: Date,
) -> HospitalResult<Appointment> {
    let patient_id = request.patient_id.trim();
    let doctor_id = request.doctor_id.trim();

    let result = db.transaction(|store| {
        if !store.exists::<Patient>(patient_id)? {
            return Err(HospitalError::UnknownPatient(patient_id.to_string()));
        }
        if !store.exists::<Doctor>(doctor_id)? {
            return Err(HospitalError::UnknownDoctor(doctor_id.to_string()));
        }

        let date = validation::appointment_date(request.date, today)?;
        let time = validation::appointment_time(request.time)?;

        let taken = store
            .all::<Appointment>()?
            .iter()
            .any(|existing| existing.holds_slot(doctor_id, date, time));
        if taken {
            return Err(HospitalError::SlotConflict {
                doctor_id: doctor_id.to_string(),
                date: date.to_string(),
                time: time.to_string(),
            });
        }

        let appointment = Appointment::new(patient_id, doctor_id, date, time);
        store.insert(&appointment)?;
        Ok(appointment)
    });

    match &result {
        Ok(appointment) => info!(
            appointment_id = %appointment.id,
            patient_id,
            doctor_id,
            "Scheduled appointment"
        ),
        Err(e) => warn!(patient_id, doctor_id, error = %e, "Appointment rejected"),
    }
    result
}

/// Dates on which a doctor has at least one appointment, sorted and deduplicated.
pub fn booked_dates(db: &Database, doctor_id: &str) -> HospitalResult<Vec<Date>> {
    let mut dates: Vec<Date> = db
        .store()
        .all::<Appointment>()?
        .into_iter()
        .filter(|a| a.doctor_id == doctor_id)
        .map(|a| a.date)
        .collect();
    dates.sort();
    dates.dedup();
    Ok(dates)
}

/// One line of a patient's appointment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppointmentSummary<'a> {
    /// The doctor's name, or the doctor ID if the doctor has since been deleted.
    pub doctor_name: &'a str,
    pub date: Date,
    pub time: SlotTime,
}

/// A patient's appointments.
///
/// Iterating yields [`AppointmentSummary`] values in booking order. The list can be
/// iterated any number of times; an empty list is a normal result.
#[derive(Debug, Clone, Default)]
pub struct PatientAppointments {
    appointments: Vec<Appointment>,
    doctor_names: HashMap<String, String>,
}

impl PatientAppointments {
    pub fn iter(&self) -> impl Iterator<Item = AppointmentSummary<'_>> + '_ {
        self.appointments.iter().map(|a| AppointmentSummary {
            doctor_name: self
                .doctor_names
                .get(&a.doctor_id)
                .map(String::as_str)
                .unwrap_or(a.doctor_id.as_str()),
            date: a.date,
            time: a.time,
        })
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }
}

impl<'a> IntoIterator for &'a PatientAppointments {
    type Item = AppointmentSummary<'a>;
    type IntoIter = Box<dyn Iterator<Item = AppointmentSummary<'a>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Collects the appointments booked for `patient_id`.
pub fn appointments_for_patient(db: &Database, patient_id: &str) -> HospitalResult<PatientAppointments> {
    let store = db.store();
    let patient_id = patient_id.trim();

    let appointments: Vec<Appointment> = store
        .all::<Appointment>()?
        .into_iter()
        .filter(|a| a.patient_id == patient_id)
        .collect();

    let doctor_names = store
        .all::<Doctor>()?
        .into_iter()
        .map(|d| (d.id, d.name))
        .collect();

    Ok(PatientAppointments {
        appointments,
        doctor_names,
    })
}
