//! Ambulance dispatch.
//!
//! Booking takes the first available ambulance in stored order and marks it booked.
//! There is no operation returning an ambulance to service; an administrator changes
//! the status by hand through the ambulance update screen.

use crate::db::Database;
use crate::error::{HospitalError, HospitalResult};
use crate::models::{Ambulance, AmbulanceStatus};
use tracing::{info, warn};

/// A booked ambulance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub ambulance_id: String,
    pub driver: String,
}

/// Books the first available ambulance.
///
/// # Errors
///
/// [`HospitalError::NoAmbulanceAvailable`] if every ambulance is booked.
pub fn book(db: &mut Database) -> HospitalResult<Dispatch> {
    let result = db.transaction(|store| {
        let mut ambulance = store
            .all::<Ambulance>()?
            .into_iter()
            .find(|a| a.status == AmbulanceStatus::Available)
            .ok_or(HospitalError::NoAmbulanceAvailable)?;

        ambulance.status = AmbulanceStatus::Booked;
        store.put(&ambulance)?;
        Ok(Dispatch {
            ambulance_id: ambulance.id,
            driver: ambulance.driver,
        })
    });

    match &result {
        Ok(dispatch) => info!(
            ambulance_id = %dispatch.ambulance_id,
            driver = %dispatch.driver,
            "Ambulance booked"
        ),
        Err(e) => warn!(error = %e, "Ambulance booking failed"),
    }
    result
}
