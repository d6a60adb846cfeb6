use crate::app::SelectedApp;
use crate::auth::Session;
use crate::components::widgets::{self, ACCENT, ERROR, MUTED, TEXT, TITLE};
use crate::components::Component;
use crate::db::Database;
use crate::models::Patient;
use crate::services::{appointments, pharmacy, registry, rooms};
use crate::tui::Frame;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{prelude::*, widgets::*};

/// The signed-in patient's record with their room, appointment count, purchases and
/// symptom-check result.
pub struct PatientProfile {
    patient: Patient,
    room: Option<String>,
    appointments: usize,
    purchases: usize,
    possible_diseases: Vec<&'static str>,
}

impl PatientProfile {
    pub fn new(session: &Session, db: &Database) -> Result<Self> {
        let Session::Patient {
            patient_id,
            possible_diseases,
            ..
        } = session
        else {
            anyhow::bail!("My Information is only available to patients");
        };

        let patient = registry::find::<Patient>(db, patient_id)?;
        let room = rooms::room_of(db, patient_id)?
            .map(|room| format!("{} ({}, floor {})", room.id, room.kind, room.floor));

        Ok(Self {
            patient,
            room,
            appointments: appointments::appointments_for_patient(db, patient_id)?.len(),
            purchases: pharmacy::purchases_for_patient(db, patient_id)?.len(),
            possible_diseases: possible_diseases.clone(),
        })
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let field = |label: &str, value: String, color: Color| {
            Line::from(vec![
                Span::styled(
                    format!("{label:<18}"),
                    Style::default().fg(TITLE).add_modifier(Modifier::BOLD),
                ),
                Span::styled(value, Style::default().fg(color)),
            ])
        };

        let diseases = if self.possible_diseases.is_empty() {
            "None identified".to_string()
        } else {
            self.possible_diseases.join(", ")
        };

        vec![
            field("Patient ID", self.patient.id.clone(), TEXT),
            field("Name", self.patient.name.clone(), TEXT),
            field("Age", self.patient.age.to_string(), TEXT),
            field("Disease", self.patient.disease.clone(), TEXT),
            Line::from(""),
            field(
                "Room",
                self.room.clone().unwrap_or_else(|| "No room allotted".to_string()),
                if self.room.is_some() { ACCENT } else { MUTED },
            ),
            field("Appointments", self.appointments.to_string(), TEXT),
            field("Purchases", self.purchases.to_string(), TEXT),
            field(
                "Possible diseases",
                diseases,
                if self.possible_diseases.is_empty() { MUTED } else { ERROR },
            ),
        ]
    }
}

impl Component for PatientProfile {
    fn handle_input(&mut self, event: KeyEvent, _db: &mut Database) -> Result<Option<SelectedApp>> {
        match event.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('b') => Ok(Some(SelectedApp::None)),
            _ => Ok(None),
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = widgets::page(frame, "👤 MY INFORMATION", "Esc/Enter: Back");
        let card = widgets::centered_rect(60, 80, area);
        frame.render_widget(
            Paragraph::new(self.lines())
                .block(widgets::panel(&self.patient.name, true).padding(Padding::uniform(1)))
                .wrap(Wrap { trim: true }),
            card,
        );
    }
}
