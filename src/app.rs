//! The main application state and logic for Wardroom.
//!
//! This module owns the database handle and the signed-in session, moves between
//! the login, home and task screens, and forwards input to whichever is active.

use crate::auth::Session;
use crate::components::hospital::HospitalApp;
use crate::components::{home::Home, login::Login, Component};
use crate::db::Database;
use crate::tui::{self, Tui};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, error, info};

/// The kinds of record an administrator manages through the generic screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Patient,
    Doctor,
    Staff,
    Ambulance,
    Medicine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordAction {
    Add,
    List,
    Update,
    Delete,
}

/// The task screens reachable from the home menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedApp {
    Records(RecordKind, RecordAction),
    /// Every medicine purchase, newest last.
    PurchaseLedger,
    RoomStatus,
    RoomAllot,
    RoomRelease,
    AppointmentSchedule,
    AppointmentList,
    BuyMedicine,
    MyInformation,
    /// Leave the current screen.
    None,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Login,
    Home,
    Running(SelectedApp),
}

/// Main application struct for Wardroom.
pub struct App {
    pub state: AppState,
    pub should_quit: bool,
    db: Database,
    session: Option<Session>,
    login: Login,
    home: Option<Home>,
    hospital: Option<HospitalApp>,
}

impl App {
    pub fn new(db: Database) -> Self {
        Self {
            state: AppState::Login,
            should_quit: false,
            db,
            session: None,
            login: Login::new(),
            home: None,
            hospital: None,
        }
    }

    /// Runs the draw and input loop until the user quits.
    pub fn run(&mut self, tui: &mut Tui) -> Result<()> {
        while !self.should_quit {
            tui.draw(|frame| self.render_ui(frame))?;
            match tui.next_event()? {
                tui::Event::Input(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    self.handle_key(key)?;
                }
                tui::Event::Input(_) => {}
                tui::Event::Tick => self.tick(),
            }
        }
        Ok(())
    }

    /// Routes a key press to the active screen and applies the resulting transition.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        match self.state {
            AppState::Login => match self.login.handle_input(key, &mut self.db)? {
                Some(SelectedApp::Quit) => self.should_quit = true,
                Some(SelectedApp::None) => {
                    if let Some(session) = self.login.take_session() {
                        self.home = Some(Home::new(&session));
                        self.session = Some(session);
                        self.state = AppState::Home;
                    }
                }
                _ => {}
            },
            AppState::Home => {
                let Some(home) = &mut self.home else {
                    self.logout();
                    return Ok(());
                };
                match home.handle_input(key, &mut self.db)? {
                    Some(SelectedApp::Quit) => self.should_quit = true,
                    Some(SelectedApp::None) => self.logout(),
                    Some(selected) => self.open(selected),
                    None => {}
                }
            }
            AppState::Running(_) => {
                let Some(hospital) = &mut self.hospital else {
                    self.state = AppState::Home;
                    return Ok(());
                };
                match hospital.handle_input(key, &mut self.db) {
                    Ok(Some(SelectedApp::Quit)) => self.should_quit = true,
                    Ok(Some(SelectedApp::None)) => {
                        self.hospital = None;
                        self.state = AppState::Home;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!(error = %e, "Screen failed");
                        self.hospital = None;
                        self.state = AppState::Home;
                        if let Some(home) = &mut self.home {
                            home.report_error(format!("{e:#}"));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn open(&mut self, selected: SelectedApp) {
        let Some(session) = &self.session else {
            self.logout();
            return;
        };
        match HospitalApp::new(selected, session, &self.db) {
            Ok(hospital) => {
                debug!(?selected, "Opened screen");
                self.hospital = Some(hospital);
                self.state = AppState::Running(selected);
            }
            Err(e) => {
                error!(?selected, error = %e, "Could not open screen");
                if let Some(home) = &mut self.home {
                    home.report_error(format!("{e:#}"));
                }
            }
        }
    }

    fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            info!(user = session.display_name(), "Logged out");
        }
        self.home = None;
        self.hospital = None;
        self.state = AppState::Login;
    }

    fn tick(&mut self) {
        match self.state {
            AppState::Login => self.login.tick(),
            AppState::Home => {
                if let Some(home) = &mut self.home {
                    home.tick();
                }
            }
            AppState::Running(_) => {
                if let Some(hospital) = &mut self.hospital {
                    hospital.tick();
                }
            }
        }
    }

    fn render_ui(&self, frame: &mut tui::Frame<'_>) {
        match self.state {
            AppState::Login => self.login.render(frame),
            AppState::Home => {
                if let Some(home) = &self.home {
                    home.render(frame);
                }
            }
            AppState::Running(_) => {
                if let Some(hospital) = &self.hospital {
                    hospital.render(frame);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::registry;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_patient_session_flow() {
        let mut db = Database::open_in_memory().unwrap();
        registry::add(&mut db, &registry::patient("P1", "Alice", "30", "Flu").unwrap()).unwrap();
        let mut app = App::new(db);

        // Switch the login mode to Patient.
        app.handle_key(key(KeyCode::Up)).unwrap();
        app.handle_key(key(KeyCode::Right)).unwrap();
        app.handle_key(key(KeyCode::Down)).unwrap();
        type_text(&mut app, "P1");
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.state, AppState::Home);

        // My Account -> My Information
        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.state, AppState::Running(SelectedApp::MyInformation));

        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.state, AppState::Home);

        // Logout.
        app.handle_key(key(KeyCode::Esc)).unwrap();
        app.handle_key(key(KeyCode::Esc)).unwrap();
        app.handle_key(key(KeyCode::Char('y'))).unwrap();
        assert_eq!(app.state, AppState::Login);
        assert!(app.session.is_none());
    }

    #[test]
    fn test_screen_that_cannot_open_is_reported_on_home() {
        let mut db = Database::open_in_memory().unwrap();
        registry::add(&mut db, &registry::patient("P1", "Alice", "30", "Flu").unwrap()).unwrap();
        let mut app = App::new(db);

        app.handle_key(key(KeyCode::Up)).unwrap();
        app.handle_key(key(KeyCode::Right)).unwrap();
        app.handle_key(key(KeyCode::Down)).unwrap();
        type_text(&mut app, "P1");
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.state, AppState::Home);

        // The record goes away while the patient is signed in.
        registry::delete::<crate::models::Patient>(&mut app.db, "P1").unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.state, AppState::Home);
        let status = app.home.as_ref().unwrap().status();
        assert!(status.is_error());
        assert!(status.text().unwrap().contains("P1"));
    }

    #[test]
    fn test_ctrl_q_quits() {
        let mut app = App::new(Database::open_in_memory().unwrap());
        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(app.should_quit);
    }
}
