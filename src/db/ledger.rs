//! Append-only medicine purchase ledger.
//!
//! The table rejects `UPDATE` and `DELETE` through triggers, and this module offers
//! no way to issue either.

use super::{DbResult, Store};
use crate::models::Purchase;
use rusqlite::{params, Row};
use tracing::info;

/// A purchase about to be appended to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchase<'a> {
    pub patient_id: &'a str,
    pub medicine_id: &'a str,
    pub medicine_name: &'a str,
    pub price: &'a str,
    pub purchased_at: &'a str,
}

fn purchase_from_row(row: &Row<'_>) -> rusqlite::Result<Purchase> {
    Ok(Purchase {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        medicine_id: row.get(2)?,
        medicine_name: row.get(3)?,
        price: row.get(4)?,
        purchased_at: row.get(5)?,
    })
}

impl Store<'_> {
    /// Appends a purchase and returns it with its ledger sequence number.
    pub fn append_purchase(&self, purchase: &NewPurchase<'_>) -> DbResult<Purchase> {
        self.conn.execute(
            "INSERT INTO medicine_purchases (patient_id, medicine_id, medicine_name, price, purchased_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                purchase.patient_id,
                purchase.medicine_id,
                purchase.medicine_name,
                purchase.price,
                purchase.purchased_at,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(
            ledger_id = id,
            patient_id = purchase.patient_id,
            medicine_id = purchase.medicine_id,
            "Recorded medicine purchase"
        );

        Ok(Purchase {
            id,
            patient_id: purchase.patient_id.to_string(),
            medicine_id: purchase.medicine_id.to_string(),
            medicine_name: purchase.medicine_name.to_string(),
            price: purchase.price.to_string(),
            purchased_at: purchase.purchased_at.to_string(),
        })
    }

    /// Purchases made by one patient, oldest first.
    pub fn purchases_for_patient(&self, patient_id: &str) -> DbResult<Vec<Purchase>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, patient_id, medicine_id, medicine_name, price, purchased_at FROM medicine_purchases WHERE patient_id = ?1 ORDER BY id",
        )?;
        let purchases = stmt
            .query_map(params![patient_id], purchase_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(purchases)
    }

    /// The whole ledger, oldest first.
    pub fn all_purchases(&self) -> DbResult<Vec<Purchase>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, patient_id, medicine_id, medicine_name, price, purchased_at FROM medicine_purchases ORDER BY id",
        )?;
        let purchases = stmt
            .query_map([], purchase_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(purchases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn sample<'a>(patient_id: &'a str) -> NewPurchase<'a> {
        NewPurchase {
            patient_id,
            medicine_id: "M1",
            medicine_name: "Paracetamol",
            price: "12.5",
            purchased_at: "2025-06-01 10:15:00",
        }
    }

    #[test]
    fn test_append_and_read_back() {
        let db = Database::open_in_memory().unwrap();
        let store = db.store();

        let first = store.append_purchase(&sample("P1")).unwrap();
        let second = store.append_purchase(&sample("P2")).unwrap();
        store.append_purchase(&sample("P1")).unwrap();

        assert!(second.id > first.id);
        assert_eq!(store.purchases_for_patient("P1").unwrap().len(), 2);
        assert_eq!(store.all_purchases().unwrap().len(), 3);
    }

    #[test]
    fn test_ledger_rejects_rewrites() {
        let db = Database::open_in_memory().unwrap();
        db.store().append_purchase(&sample("P1")).unwrap();

        assert!(db
            .conn
            .execute("UPDATE medicine_purchases SET price = '0'", [])
            .is_err());
        assert!(db.conn.execute("DELETE FROM medicine_purchases", []).is_err());
        assert_eq!(db.store().all_purchases().unwrap()[0].price, "12.5");
    }
}
