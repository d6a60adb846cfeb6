//! Hospital operations built on the record store.
//!
//! Each function takes the [`Database`](crate::db::Database) it works on; nothing here
//! holds state of its own. Mutations run their checks and writes inside one
//! transaction.

pub mod ambulances;
pub mod appointments;
pub mod pharmacy;
pub mod registry;
pub mod rooms;
pub mod symptoms;
