//! Task screens opened from the home menu.
//!
//! [`HospitalApp`] holds whichever screen is active and forwards input and rendering
//! to it.

use crate::app::SelectedApp;
use crate::auth::Session;
use crate::components::Component;
use crate::db::Database;
use crate::tui::Frame;
use anyhow::{bail, Result};
use crossterm::event::KeyEvent;

pub mod appointments;
pub mod pharmacy;
pub mod profile;
pub mod records;
pub mod rooms;

pub struct HospitalApp {
    screen: Box<dyn Component>,
}

impl HospitalApp {
    /// Builds the screen for `selected` as seen by `session`.
    ///
    /// # Errors
    ///
    /// Fails if the screen's data cannot be loaded, or if `selected` does not name a
    /// screen available to this session.
    pub fn new(selected: SelectedApp, session: &Session, db: &Database) -> Result<Self> {
        let admin_only = matches!(
            selected,
            SelectedApp::Records(..) | SelectedApp::PurchaseLedger
        );
        if admin_only && !session.is_admin() {
            bail!("{selected:?} requires an administrator");
        }

        let screen: Box<dyn Component> = match selected {
            SelectedApp::Records(kind, action) => records::screen(kind, action, db)?,
            SelectedApp::PurchaseLedger => Box::new(pharmacy::PurchaseLedger::new(db)?),
            SelectedApp::RoomStatus => Box::new(rooms::RoomStatusView::new(session, db)?),
            SelectedApp::RoomAllot => Box::new(rooms::AllotRoom::new(session)),
            SelectedApp::RoomRelease => Box::new(rooms::ReleaseRoom::new(session, db)?),
            SelectedApp::AppointmentSchedule => {
                Box::new(appointments::ScheduleAppointment::new(session, db)?)
            }
            SelectedApp::AppointmentList => {
                Box::new(appointments::AppointmentList::new(session, db)?)
            }
            SelectedApp::BuyMedicine => match session.patient_id() {
                Some(patient_id) => Box::new(pharmacy::BuyMedicine::new(patient_id, db)?),
                None => bail!("Only patients can buy medicine"),
            },
            SelectedApp::MyInformation => Box::new(profile::PatientProfile::new(session, db)?),
            SelectedApp::None | SelectedApp::Quit => bail!("{selected:?} is not a screen"),
        };
        Ok(Self { screen })
    }
}

impl Component for HospitalApp {
    fn handle_input(&mut self, event: KeyEvent, db: &mut Database) -> Result<Option<SelectedApp>> {
        self.screen.handle_input(event, db)
    }

    fn render(&self, frame: &mut Frame) {
        self.screen.render(frame);
    }

    fn tick(&mut self) {
        self.screen.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{RecordAction, RecordKind};
    use ratatui::{backend::TestBackend, Terminal};

    fn render_text(app: &HospitalApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_every_admin_screen_opens_and_renders() {
        let db = Database::open_in_memory().unwrap();
        let admin = Session::Admin {
            username: "admin".to_string(),
        };

        let kinds = [
            RecordKind::Patient,
            RecordKind::Doctor,
            RecordKind::Staff,
            RecordKind::Ambulance,
            RecordKind::Medicine,
        ];
        let actions = [
            RecordAction::Add,
            RecordAction::List,
            RecordAction::Update,
            RecordAction::Delete,
        ];
        let mut screens: Vec<SelectedApp> = kinds
            .iter()
            .flat_map(|&k| actions.iter().map(move |&a| SelectedApp::Records(k, a)))
            .collect();
        screens.extend([
            SelectedApp::PurchaseLedger,
            SelectedApp::RoomStatus,
            SelectedApp::RoomAllot,
            SelectedApp::RoomRelease,
            SelectedApp::AppointmentSchedule,
            SelectedApp::AppointmentList,
        ]);

        for selected in screens {
            let app = HospitalApp::new(selected, &admin, &db).unwrap();
            assert!(!render_text(&app).trim().is_empty(), "{selected:?}");
        }
    }

    #[test]
    fn test_patient_cannot_open_admin_screens() {
        let mut db = Database::open_in_memory().unwrap();
        crate::services::registry::add(
            &mut db,
            &crate::services::registry::patient("P1", "Alice", "30", "Flu").unwrap(),
        )
        .unwrap();
        let patient = Session::Patient {
            patient_id: "P1".to_string(),
            name: "Alice".to_string(),
            possible_diseases: Vec::new(),
        };

        assert!(HospitalApp::new(
            SelectedApp::Records(RecordKind::Doctor, RecordAction::Delete),
            &patient,
            &db
        )
        .is_err());
        assert!(HospitalApp::new(SelectedApp::PurchaseLedger, &patient, &db).is_err());

        let app = HospitalApp::new(SelectedApp::BuyMedicine, &patient, &db).unwrap();
        assert!(render_text(&app).contains("BUY MEDICINE"));
        assert!(HospitalApp::new(SelectedApp::MyInformation, &patient, &db).is_ok());
    }
}
