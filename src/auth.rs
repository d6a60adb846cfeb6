use crate::db::Database;
use crate::models::Patient;
use crate::services::symptoms;
use anyhow::{anyhow, Result};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Who is using the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Admin {
        username: String,
    },
    Patient {
        patient_id: String,
        name: String,
        /// Diseases matched from the symptoms reported at login.
        possible_diseases: Vec<&'static str>,
    },
}

impl Session {
    pub fn display_name(&self) -> &str {
        match self {
            Session::Admin { username } => username.as_str(),
            Session::Patient { name, .. } => name.as_str(),
        }
    }

    /// The patient ID for patient sessions.
    pub fn patient_id(&self) -> Option<&str> {
        match self {
            Session::Admin { .. } => None,
            Session::Patient { patient_id, .. } => Some(patient_id.as_str()),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Session::Admin { .. })
    }
}

/// Logs an administrator in.
pub fn login(db: &Database, credentials: Credentials) -> Result<Session> {
    match db.authenticate_user(&credentials.username, &credentials.password) {
        Ok(user_id) => {
            let username = db.get_username(user_id)?;
            info!(%username, "Administrator logged in");
            Ok(Session::Admin { username })
        }
        Err(e) => {
            warn!(username = %credentials.username, "Administrator login failed");
            Err(anyhow::Error::new(e).context("Authentication failed"))
        }
    }
}

/// Opens a self-service session for an existing patient.
///
/// The symptom report is matched against the known diseases; an empty report yields
/// no matches.
pub fn patient_login(db: &Database, patient_id: &str, symptoms: &str) -> Result<Session> {
    let patient_id = patient_id.trim();
    let patient: Patient = db
        .store()
        .get(patient_id)?
        .ok_or_else(|| anyhow!("Patient ID {patient_id} not found"))?;

    let possible_diseases = symptoms::identify_diseases(symptoms);
    info!(patient_id, matched = possible_diseases.len(), "Patient logged in");

    Ok(Session::Patient {
        patient_id: patient.id,
        name: patient.name,
        possible_diseases,
    })
}
