//! Appointment booking and per-patient appointment listing.

use crate::app::SelectedApp;
use crate::auth::Session;
use crate::components::widgets::{
    self, Form, FormEvent, FormField, RecordTable, StatusMessage, TableEvent, BORDER_IDLE,
    INPUT_BG, TITLE,
};
use crate::components::Component;
use crate::db::Database;
use crate::models::Doctor;
use crate::services::appointments::{self, AppointmentRequest};
use crate::services::registry;
use crate::tui::Frame;
use crate::utils;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::calendar::{CalendarEventStore, Monthly};
use ratatui::{prelude::*, widgets::*};
use time::macros::format_description;
use time::Date;

const PATIENT: usize = 0;
const DOCTOR: usize = 1;
const DATE: usize = 2;
const TIME: usize = 3;

fn patient_field(session: &Session) -> FormField {
    match session.patient_id() {
        Some(id) => FormField::new("Patient ID").with_value(id).locked(),
        None => FormField::new("Patient ID"),
    }
}

/// Books a (doctor, date, time) slot for a patient.
///
/// The doctor list and a calendar of the chosen doctor's booked days are shown next
/// to the form.
pub struct ScheduleAppointment {
    form: Form,
    doctors: RecordTable,
    doctor_names: Vec<(String, String)>,
    /// Source of today's date, read on every submit and render.
    clock: fn() -> Date,
    /// Doctor whose booked dates are in `booked`.
    calendar_doctor: String,
    booked: Vec<Date>,
}

impl ScheduleAppointment {
    pub fn new(session: &Session, db: &Database) -> Result<Self> {
        let doctors = registry::list::<Doctor>(db)?;
        let mut table = RecordTable::new(&[("ID", 25), ("Name", 40), ("Specialty", 35)]);
        table.set_rows(
            doctors
                .iter()
                .map(|d| vec![d.id.clone(), d.name.clone(), d.specialty.clone()])
                .collect(),
        );

        Ok(Self {
            form: Form::new(vec![
                patient_field(session),
                FormField::new("Doctor ID"),
                FormField::new("Date (YYYY-MM-DD)"),
                FormField::new("Time (HH:MM)"),
            ])
            .with_submit_label("Book Appointment"),
            doctors: table,
            doctor_names: doctors.into_iter().map(|d| (d.id, d.name)).collect(),
            clock: utils::today,
            calendar_doctor: String::new(),
            booked: Vec::new(),
        })
    }

    fn sync_calendar(&mut self, db: &Database) -> Result<()> {
        let doctor_id = self.form.value(DOCTOR).trim();
        if doctor_id != self.calendar_doctor {
            self.booked = appointments::booked_dates(db, doctor_id)?;
            self.calendar_doctor = doctor_id.to_string();
        }
        Ok(())
    }

    fn doctor_name<'a>(&'a self, doctor_id: &'a str) -> &'a str {
        self.doctor_names
            .iter()
            .find(|(id, _)| id == doctor_id)
            .map_or(doctor_id, |(_, name)| name.as_str())
    }

    fn submit(&mut self, db: &mut Database) -> Result<()> {
        let request = AppointmentRequest {
            patient_id: self.form.value(PATIENT),
            doctor_id: self.form.value(DOCTOR),
            date: self.form.value(DATE),
            time: self.form.value(TIME),
        };
        match appointments::schedule(db, request, (self.clock)()) {
            Ok(appointment) => {
                let message = format!(
                    "Appointment booked with Dr. {} on {} at {}",
                    self.doctor_name(&appointment.doctor_id),
                    appointment.date,
                    appointment.time
                );
                self.form.reset();
                self.form.set_value(DOCTOR, appointment.doctor_id);
                self.form.status.set_success(message);
                self.calendar_doctor.clear();
            }
            Err(e) => self.form.status.set_error(e.to_string()),
        }
        Ok(())
    }

    /// The date typed so far, if it is a valid calendar date.
    fn typed_date(&self) -> Option<Date> {
        Date::parse(
            self.form.value(DATE).trim(),
            format_description!("[year]-[month]-[day]"),
        )
        .ok()
    }

    fn render_calendar(&self, frame: &mut Frame, area: Rect) {
        let today = (self.clock)();
        let selected = self.typed_date();
        let shown = selected.unwrap_or(today);

        let mut events = CalendarEventStore::default();
        events.add(
            today,
            Style::default()
                .fg(TITLE)
                .bg(Color::Rgb(40, 120, 50))
                .add_modifier(Modifier::BOLD),
        );
        for date in &self.booked {
            events.add(
                *date,
                Style::default()
                    .fg(Color::Rgb(250, 250, 250))
                    .bg(Color::Rgb(180, 70, 40)),
            );
        }
        if let Some(date) = selected {
            events.add(
                date,
                Style::default()
                    .fg(Color::Rgb(20, 20, 50))
                    .bg(Color::Rgb(250, 250, 110))
                    .add_modifier(Modifier::BOLD),
            );
        }

        let title = if self.calendar_doctor.is_empty() {
            format!(" {} {} ", shown.month(), shown.year())
        } else {
            format!(" {} {} · {} ", shown.month(), shown.year(), self.calendar_doctor)
        };

        let month = Monthly::new(shown, events)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(title)
                    .title_style(Style::default().fg(TITLE).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(BORDER_IDLE))
                    .style(Style::default().bg(INPUT_BG)),
            )
            .show_weekdays_header(
                Style::default()
                    .fg(Color::Rgb(180, 180, 250))
                    .bg(Color::Rgb(40, 40, 60))
                    .add_modifier(Modifier::BOLD),
            )
            .default_style(
                Style::default()
                    .fg(Color::Rgb(220, 220, 240))
                    .bg(INPUT_BG),
            );
        frame.render_widget(month, area);
    }
}

impl Component for ScheduleAppointment {
    fn handle_input(&mut self, event: KeyEvent, db: &mut Database) -> Result<Option<SelectedApp>> {
        match self.form.handle_input(event) {
            Some(FormEvent::Submit) => self.submit(db)?,
            Some(FormEvent::Back) => return Ok(Some(SelectedApp::None)),
            None => {}
        }
        self.sync_calendar(db)?;
        Ok(None)
    }

    fn tick(&mut self) {
        self.form.status.check_timeout();
    }

    fn render(&self, frame: &mut Frame) {
        let area = widgets::page(
            frame,
            "📅 SCHEDULE APPOINTMENT",
            "↑/↓/Tab: Navigate | Enter: Next / Book | Esc: Back | Calendar: green today, red booked",
        );
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .spacing(2)
            .split(area);

        self.form.render(frame, columns[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(10)])
            .split(columns[1]);
        self.doctors.render(frame, right[0], "Doctors", false);
        self.render_calendar(frame, right[1]);
    }
}

/// A patient's appointments. Administrators look a patient up by ID first.
pub struct AppointmentList {
    /// Present for administrators.
    lookup: Option<Form>,
    table: RecordTable,
    status: StatusMessage,
    title: String,
}

impl AppointmentList {
    pub fn new(session: &Session, db: &Database) -> Result<Self> {
        let mut list = Self {
            lookup: None,
            table: RecordTable::new(&[("Doctor", 40), ("Date", 30), ("Time", 30)]),
            status: StatusMessage::default(),
            title: "Appointments".to_string(),
        };
        match session.patient_id() {
            Some(patient_id) => list.load(db, patient_id)?,
            None => {
                list.lookup = Some(
                    Form::new(vec![FormField::new("Patient ID")]).with_submit_label("Show"),
                );
            }
        }
        Ok(list)
    }

    fn load(&mut self, db: &Database, patient_id: &str) -> Result<()> {
        let listing = appointments::appointments_for_patient(db, patient_id)?;
        let rows: Vec<Vec<String>> = listing
            .iter()
            .map(|summary| {
                vec![
                    summary.doctor_name.to_string(),
                    summary.date.to_string(),
                    summary.time.to_string(),
                ]
            })
            .collect();

        self.title = format!("Appointments of patient {}", patient_id.trim());
        if rows.is_empty() {
            self.status.set_error("No appointments found");
        } else {
            self.status.clear();
        }
        self.table.set_rows(rows);
        Ok(())
    }
}

impl Component for AppointmentList {
    fn handle_input(&mut self, event: KeyEvent, db: &mut Database) -> Result<Option<SelectedApp>> {
        self.status.check_timeout();

        if let Some(form) = &mut self.lookup {
            let action = form.handle_input(event);
            match action {
                Some(FormEvent::Submit) => {
                    let patient_id = form.value(0).to_string();
                    self.load(db, &patient_id)?;
                }
                Some(FormEvent::Back) => return Ok(Some(SelectedApp::None)),
                None => {}
            }
            return Ok(None);
        }

        if self.table.handle_input(event) == Some(TableEvent::Back) {
            return Ok(Some(SelectedApp::None));
        }
        Ok(None)
    }

    fn tick(&mut self) {
        self.status.check_timeout();
    }

    fn render(&self, frame: &mut Frame) {
        let help = if self.lookup.is_some() {
            "Type a patient ID | Enter: Show | Esc: Back"
        } else {
            "↑/↓: Navigate | Esc: Back"
        };
        let area = widgets::page(frame, "📅 APPOINTMENTS", help);

        let form_height = self.lookup.as_ref().map_or(0, Form::height);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(form_height),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        if let Some(form) = &self.lookup {
            form.render(frame, widgets::centered_rect(60, 100, layout[0]));
        }
        self.table
            .render(frame, layout[1], &self.title, self.lookup.is_none());
        self.status.render(frame, layout[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use time::macros::date;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut dyn Component, db: &mut Database, text: &str) {
        for c in text.chars() {
            screen.handle_input(key(KeyCode::Char(c)), db).unwrap();
        }
    }

    fn setup() -> Database {
        let mut db = Database::open_in_memory().unwrap();
        registry::add(&mut db, &registry::patient("P1", "Alice", "30", "Flu").unwrap()).unwrap();
        registry::add(&mut db, &registry::doctor("D1", "House", "General", "9876543210").unwrap())
            .unwrap();
        db
    }

    fn patient() -> Session {
        Session::Patient {
            patient_id: "P1".to_string(),
            name: "Alice".to_string(),
            possible_diseases: Vec::new(),
        }
    }

    #[test]
    fn test_patient_books_appointment() {
        let mut db = setup();
        let mut screen = ScheduleAppointment::new(&patient(), &db).unwrap();
        screen.clock = || date!(2025 - 05 - 20);

        type_text(&mut screen, &mut db, "D1");
        screen.handle_input(key(KeyCode::Enter), &mut db).unwrap();
        type_text(&mut screen, &mut db, "2025-06-01");
        screen.handle_input(key(KeyCode::Enter), &mut db).unwrap();
        type_text(&mut screen, &mut db, "9:30");
        screen.handle_input(key(KeyCode::Enter), &mut db).unwrap();

        assert!(!screen.form.status.is_error());
        assert_eq!(screen.form.value(DOCTOR), "D1");
        assert_eq!(screen.booked, [date!(2025 - 06 - 01)]);

        let listing = appointments::appointments_for_patient(&db, "P1").unwrap();
        assert_eq!(listing.len(), 1);
    }

    #[test]
    fn test_past_date_is_rejected() {
        let mut db = setup();
        let mut screen = ScheduleAppointment::new(&patient(), &db).unwrap();
        screen.clock = || date!(2025 - 05 - 20);

        type_text(&mut screen, &mut db, "D1");
        screen.handle_input(key(KeyCode::Enter), &mut db).unwrap();
        type_text(&mut screen, &mut db, "2025-05-01");
        screen.handle_input(key(KeyCode::Enter), &mut db).unwrap();
        type_text(&mut screen, &mut db, "10:00");
        screen.handle_input(key(KeyCode::Enter), &mut db).unwrap();

        assert!(screen.form.status.is_error());
        assert!(appointments::appointments_for_patient(&db, "P1")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_lower_date_bound_follows_clock() {
        let mut db = setup();
        let mut screen = ScheduleAppointment::new(&patient(), &db).unwrap();
        screen.clock = || date!(2025 - 05 - 31);

        type_text(&mut screen, &mut db, "D1");
        screen.handle_input(key(KeyCode::Enter), &mut db).unwrap();
        type_text(&mut screen, &mut db, "2025-06-01");
        screen.handle_input(key(KeyCode::Enter), &mut db).unwrap();
        type_text(&mut screen, &mut db, "10:00");

        // Midnight passes twice while the form is open.
        screen.clock = || date!(2025 - 06 - 02);
        screen.handle_input(key(KeyCode::Enter), &mut db).unwrap();

        assert!(screen.form.status.is_error());
        assert!(appointments::appointments_for_patient(&db, "P1")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_admin_looks_up_patient() {
        let mut db = setup();
        appointments::schedule(
            &mut db,
            AppointmentRequest {
                patient_id: "P1",
                doctor_id: "D1",
                date: "2099-01-01",
                time: "10:00",
            },
            date!(2025 - 05 - 20),
        )
        .unwrap();

        let admin = Session::Admin {
            username: "admin".to_string(),
        };
        let mut list = AppointmentList::new(&admin, &db).unwrap();
        assert!(list.table.is_empty());

        type_text(&mut list, &mut db, "P1");
        list.handle_input(key(KeyCode::Enter), &mut db).unwrap();
        assert_eq!(list.table.row(0).unwrap(), ["House", "2099-01-01", "10:00"]);
    }
}
