//! Wardroom: a terminal hospital record keeper.
//!
//! Patients, doctors, staff, ambulances, rooms, medicines and appointments live in
//! a single SQLite file. The [`services`] modules hold the hospital rules (room
//! allotment, ambulance dispatch, appointment scheduling, symptom matching and
//! medicine purchases); [`app`] and [`components`] put a ratatui interface on top.

pub mod app;
pub mod auth;
pub mod components;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod tui;
pub mod utils;
pub mod validation;
