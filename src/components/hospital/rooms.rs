//! Room status, allotment and release screens.

use crate::app::SelectedApp;
use crate::auth::Session;
use crate::components::widgets::{
    self, ConfirmDialog, Form, FormEvent, FormField, RecordTable, StatusMessage, TableEvent,
    ACCENT, MUTED, SUCCESS,
};
use crate::components::Component;
use crate::db::Database;
use crate::models::{Room, RoomType};
use crate::services::rooms;
use crate::tui::Frame;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{prelude::*, widgets::*};

const ROOM_TYPES: &[&str] = &["General", "Semi-Private", "Private", "DELUX/ICU"];

const ROOM_COLUMNS: &[(&str, u16)] = &[
    ("Room", 15),
    ("Floor", 10),
    ("Type", 25),
    ("Status", 20),
    ("Occupant", 30),
];

fn room_row(room: &Room) -> Vec<String> {
    vec![
        room.id.clone(),
        room.floor.to_string(),
        room.kind.to_string(),
        if room.is_available() { "Available" } else { "Occupied" }.to_string(),
        room.occupant().unwrap_or("-").to_string(),
    ]
}

/// Every room with its occupancy. Administrators can reset the room table here.
pub struct RoomStatusView {
    rooms: Vec<Room>,
    table: RecordTable,
    can_initialize: bool,
    confirm: ConfirmDialog,
    status: StatusMessage,
}

impl RoomStatusView {
    pub fn new(session: &Session, db: &Database) -> Result<Self> {
        let mut view = Self {
            rooms: Vec::new(),
            table: RecordTable::new(ROOM_COLUMNS),
            can_initialize: session.is_admin(),
            confirm: ConfirmDialog::default(),
            status: StatusMessage::default(),
        };
        view.refresh(db)?;
        Ok(view)
    }

    fn refresh(&mut self, db: &Database) -> Result<()> {
        self.rooms = rooms::room_status(db)?;
        self.table.set_rows(self.rooms.iter().map(room_row).collect());
        Ok(())
    }

    fn summary(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for kind in RoomType::ALL {
            let total = self.rooms.iter().filter(|r| r.kind == kind).count();
            let free = self
                .rooms
                .iter()
                .filter(|r| r.kind == kind && r.is_available())
                .count();
            if !spans.is_empty() {
                spans.push(Span::styled("  |  ", Style::default().fg(MUTED)));
            }
            spans.push(Span::styled(
                format!("{kind}: "),
                Style::default().fg(ACCENT),
            ));
            spans.push(Span::styled(
                format!("{free}/{total} free"),
                Style::default().fg(if free > 0 { SUCCESS } else { MUTED }),
            ));
        }
        Line::from(spans)
    }
}

impl Component for RoomStatusView {
    fn handle_input(&mut self, event: KeyEvent, db: &mut Database) -> Result<Option<SelectedApp>> {
        self.status.check_timeout();

        if self.confirm.open {
            if self.confirm.handle_input(event) == Some(true) {
                match rooms::initialize(db) {
                    Ok(created) => self
                        .status
                        .set_success(format!("{} rooms initialized", created.len())),
                    Err(e) => self.status.set_error(e.to_string()),
                }
                self.refresh(db)?;
            }
            return Ok(None);
        }

        match event.code {
            KeyCode::Char('i') | KeyCode::Char('I') if self.can_initialize => self.confirm.show(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.refresh(db)?,
            _ => {
                if self.table.handle_input(event) == Some(TableEvent::Back) {
                    return Ok(Some(SelectedApp::None));
                }
            }
        }
        Ok(None)
    }

    fn tick(&mut self) {
        self.status.check_timeout();
    }

    fn render(&self, frame: &mut Frame) {
        let help = if self.can_initialize {
            "↑/↓: Navigate | R: Refresh | I: Initialize rooms | Esc: Back"
        } else {
            "↑/↓: Navigate | R: Refresh | Esc: Back"
        };
        let area = widgets::page(frame, "🛏 ROOM STATUS", help);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new(self.summary()).alignment(Alignment::Center),
            layout[0],
        );
        self.table.render(frame, layout[1], "Rooms", true);

        if self.rooms.is_empty() && self.can_initialize && self.status.text().is_none() {
            frame.render_widget(
                Paragraph::new("No rooms yet. Press I to create the standard 20 rooms.")
                    .style(Style::default().fg(MUTED))
                    .alignment(Alignment::Center),
                layout[2],
            );
        } else {
            self.status.render(frame, layout[2]);
        }

        self.confirm.render(
            frame,
            "Initialize Rooms",
            "Recreate all 20 rooms? Every current occupancy is cleared.",
        );
    }
}

/// Assigns the first free room of the chosen type to a patient.
pub struct AllotRoom {
    form: Form,
}

const TYPE_FIELD: usize = 0;
const PATIENT_FIELD: usize = 1;

impl AllotRoom {
    pub fn new(session: &Session) -> Self {
        let patient = match session.patient_id() {
            Some(id) => FormField::new("Patient ID").with_value(id).locked(),
            None => FormField::new("Patient ID"),
        };
        Self {
            form: Form::new(vec![FormField::choice("Room Type", ROOM_TYPES), patient])
                .with_submit_label("Allot Room"),
        }
    }

    fn submit(&mut self, db: &mut Database) {
        let result = self
            .form
            .value(TYPE_FIELD)
            .parse::<RoomType>()
            .and_then(|kind| rooms::allot(db, self.form.value(PATIENT_FIELD), kind));
        match result {
            Ok(allotment) => {
                let patient_id = self.form.value(PATIENT_FIELD).trim().to_string();
                self.form.reset();
                self.form.status.set_success(format!(
                    "{} room {} on floor {} allotted to patient {patient_id}",
                    allotment.kind, allotment.room_id, allotment.floor
                ));
            }
            Err(e) => self.form.status.set_error(e.to_string()),
        }
    }
}

impl Component for AllotRoom {
    fn handle_input(&mut self, event: KeyEvent, db: &mut Database) -> Result<Option<SelectedApp>> {
        match self.form.handle_input(event) {
            Some(FormEvent::Submit) => self.submit(db),
            Some(FormEvent::Back) => return Ok(Some(SelectedApp::None)),
            None => {}
        }
        Ok(None)
    }

    fn tick(&mut self) {
        self.form.status.check_timeout();
    }

    fn render(&self, frame: &mut Frame) {
        let area = widgets::page(
            frame,
            "🛏 ALLOT ROOM",
            "←/→: Room type | ↑/↓/Tab: Navigate | Enter: Next / Submit | Esc: Back",
        );
        self.form.render(frame, widgets::centered_rect(60, 100, area));
    }
}

/// Frees an occupied room by its ID.
pub struct ReleaseRoom {
    form: Form,
}

impl ReleaseRoom {
    /// For patients the form starts with the room they currently hold, if any.
    pub fn new(session: &Session, db: &Database) -> Result<Self> {
        let mut room = FormField::new("Room ID");
        if let Some(patient_id) = session.patient_id() {
            if let Some(held) = rooms::room_of(db, patient_id)? {
                room = room.with_value(held.id);
            }
        }
        Ok(Self {
            form: Form::new(vec![room]).with_submit_label("Release Room"),
        })
    }

    fn submit(&mut self, db: &mut Database) {
        match rooms::release(db, self.form.value(0)) {
            Ok(patient_id) => {
                let room_id = self.form.value(0).trim().to_string();
                self.form.reset();
                self.form
                    .status
                    .set_success(format!("Room {room_id} released from patient {patient_id}"));
            }
            Err(e) => self.form.status.set_error(e.to_string()),
        }
    }
}

impl Component for ReleaseRoom {
    fn handle_input(&mut self, event: KeyEvent, db: &mut Database) -> Result<Option<SelectedApp>> {
        match self.form.handle_input(event) {
            Some(FormEvent::Submit) => self.submit(db),
            Some(FormEvent::Back) => return Ok(Some(SelectedApp::None)),
            None => {}
        }
        Ok(None)
    }

    fn tick(&mut self) {
        self.form.status.check_timeout();
    }

    fn render(&self, frame: &mut Frame) {
        let area = widgets::page(
            frame,
            "🛏 RELEASE ROOM",
            "Enter: Next / Submit | ↑/↓/Tab: Navigate | Esc: Back",
        );
        self.form.render(frame, widgets::centered_rect(60, 100, area));
    }
}
