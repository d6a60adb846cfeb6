//! Medicine purchases.

use crate::db::{Database, NewPurchase};
use crate::error::{HospitalError, HospitalResult};
use crate::models::{Medicine, Patient, Purchase};
use crate::utils;
use time::OffsetDateTime;

/// Records that `patient_id` bought `medicine_id` at `at`.
///
/// The purchase is appended to the ledger with the medicine's current name and price.
pub fn purchase(
    db: &mut Database,
    patient_id: &str,
    medicine_id: &str,
    at: OffsetDateTime,
) -> HospitalResult<Purchase> {
    let patient_id = patient_id.trim();
    let medicine_id = medicine_id.trim();
    let purchased_at = utils::timestamp(at);

    db.transaction(|store| {
        if !store.exists::<Patient>(patient_id)? {
            return Err(HospitalError::UnknownPatient(patient_id.to_string()));
        }
        let medicine: Medicine = store
            .get(medicine_id)?
            .ok_or_else(|| HospitalError::UnknownMedicine(medicine_id.to_string()))?;

        Ok(store.append_purchase(&NewPurchase {
            patient_id,
            medicine_id,
            medicine_name: &medicine.name,
            price: &medicine.price,
            purchased_at: &purchased_at,
        })?)
    })
}

/// A patient's purchases, oldest first.
pub fn purchases_for_patient(db: &Database, patient_id: &str) -> HospitalResult<Vec<Purchase>> {
    Ok(db.store().purchases_for_patient(patient_id.trim())?)
}

/// Every purchase by every patient, oldest first.
pub fn ledger(db: &Database) -> HospitalResult<Vec<Purchase>> {
    Ok(db.store().all_purchases()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::registry;
    use time::macros::datetime;

    fn setup() -> Database {
        let mut db = Database::open_in_memory().unwrap();
        registry::add(&mut db, &registry::patient("P1", "Alice", "30", "Flu").unwrap()).unwrap();
        registry::add(&mut db, &registry::medicine("M1", "Paracetamol", "12.5").unwrap()).unwrap();
        db
    }

    #[test]
    fn test_purchase_appends_to_ledger() {
        let mut db = setup();
        let bought = purchase(&mut db, "P1", "M1", datetime!(2025-06-01 10:00:00 UTC)).unwrap();

        assert_eq!(bought.medicine_name, "Paracetamol");
        assert_eq!(bought.price, "12.5");
        assert_eq!(bought.purchased_at, "2025-06-01 10:00:00");
        assert_eq!(purchases_for_patient(&db, "P1").unwrap(), vec![bought.clone()]);
        assert_eq!(ledger(&db).unwrap(), vec![bought]);
    }

    #[test]
    fn test_ledger_keeps_price_at_purchase_time() {
        let mut db = setup();
        purchase(&mut db, "P1", "M1", datetime!(2025-06-01 10:00:00 UTC)).unwrap();
        registry::update(&mut db, &registry::medicine("M1", "Paracetamol", "20").unwrap()).unwrap();

        assert_eq!(purchases_for_patient(&db, "P1").unwrap()[0].price, "12.5");
    }

    #[test]
    fn test_unknown_ids() {
        let mut db = setup();
        let at = datetime!(2025-06-01 10:00:00 UTC);
        assert!(matches!(
            purchase(&mut db, "P9", "M1", at),
            Err(HospitalError::UnknownPatient(_))
        ));
        assert!(matches!(
            purchase(&mut db, "P1", "M9", at),
            Err(HospitalError::UnknownMedicine(_))
        ));
        assert!(purchases_for_patient(&db, "P1").unwrap().is_empty());
    }
}
