//! Login screen for Wardroom.
//!
//! Administrators sign in with a username and password. Patients sign in with their
//! patient ID and may describe their symptoms, which are matched against known
//! diseases. An ambulance can be booked from here without signing in.

use crate::app::SelectedApp;
use crate::auth::{self, Credentials, Session};
use crate::components::widgets::{
    self, ConfirmDialog, StatusMessage, ACCENT, BG, BORDER_IDLE, ERROR, FOCUS, INPUT_BG, MUTED,
    TEXT, TITLE,
};
use crate::components::Component;
use crate::db::Database;
use crate::services::ambulances;
use crate::tui::Frame;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{prelude::*, widgets::*};

const BANNER: [&str; 5] = [
    "█   █   ███   ████   ████   ████    ███    ███   █   █",
    "█   █  █   █  █   █  █   █  █   █  █   █  █   █  ██ ██",
    "█ █ █  █████  ████   █   █  ████   █   █  █   █  █ █ █",
    "██ ██  █   █  █  █   █   █  █  █   █   █  █   █  █   █",
    "█   █  █   █  █   █  ████   █   █   ███    ███   █   █",
];

const MODE: usize = 0;
const FIRST: usize = 1;
const SECOND: usize = 2;
const EMERGENCY: usize = 3;
const EXIT: usize = 4;
const SLOTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    Admin,
    Patient,
}

/// Represents the login UI component.
#[derive(Debug, Default)]
pub struct Login {
    pub mode: LoginMode,
    /// Username, or patient ID in patient mode.
    pub first: String,
    /// Password, or the symptom report in patient mode.
    pub second: String,
    pub selected_index: usize,
    pub status: StatusMessage,
    exit_dialog: ConfirmDialog,
    session: Option<Session>,
}

impl Login {
    pub fn new() -> Self {
        Self {
            selected_index: FIRST,
            ..Default::default()
        }
    }

    /// Takes the session opened by the last successful login.
    pub fn take_session(&mut self) -> Option<Session> {
        self.session.take()
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            LoginMode::Admin => LoginMode::Patient,
            LoginMode::Patient => LoginMode::Admin,
        };
        self.first.clear();
        self.second.clear();
        self.status.clear();
    }

    fn attempt_login(&mut self, db: &Database) -> bool {
        if self.first.trim().is_empty() {
            let field = match self.mode {
                LoginMode::Admin => "Username",
                LoginMode::Patient => "Patient ID",
            };
            self.status.set_error(format!("{field} cannot be empty."));
            return false;
        }

        let result = match self.mode {
            LoginMode::Admin => {
                if self.second.is_empty() {
                    self.status.set_error("Password cannot be empty.");
                    return false;
                }
                auth::login(
                    db,
                    Credentials {
                        username: self.first.clone(),
                        password: self.second.clone(),
                    },
                )
            }
            LoginMode::Patient => auth::patient_login(db, &self.first, &self.second),
        };

        match result {
            Ok(session) => {
                self.session = Some(session);
                self.first.clear();
                self.second.clear();
                self.status.clear();
                self.selected_index = FIRST;
                true
            }
            Err(e) => {
                self.second.clear();
                self.status.set_error(format!("{e:#}"));
                false
            }
        }
    }

    fn book_emergency_ambulance(&mut self, db: &mut Database) {
        match ambulances::book(db) {
            Ok(dispatch) => self.status.set_success(format!(
                "Ambulance {} with driver {} is on its way.",
                dispatch.ambulance_id, dispatch.driver
            )),
            Err(e) => self.status.set_error(e.to_string()),
        }
    }

    fn first_label(&self) -> &'static str {
        match self.mode {
            LoginMode::Admin => " Username ",
            LoginMode::Patient => " Patient ID ",
        }
    }

    fn second_label(&self) -> &'static str {
        match self.mode {
            LoginMode::Admin => " Password ",
            LoginMode::Patient => " Symptoms (optional, e.g. fever, headache) ",
        }
    }
}

impl Component for Login {
    fn handle_input(&mut self, event: KeyEvent, db: &mut Database) -> Result<Option<SelectedApp>> {
        self.status.check_timeout();

        if self.exit_dialog.open {
            return Ok(match self.exit_dialog.handle_input(event) {
                Some(true) => Some(SelectedApp::Quit),
                _ => None,
            });
        }

        match event.code {
            KeyCode::Char(c) => match self.selected_index {
                FIRST => self.first.push(c),
                SECOND => self.second.push(c),
                _ => {}
            },
            KeyCode::Backspace => match self.selected_index {
                FIRST => {
                    self.first.pop();
                }
                SECOND => {
                    self.second.pop();
                }
                _ => {}
            },
            KeyCode::Left | KeyCode::Right if self.selected_index == MODE => self.toggle_mode(),
            KeyCode::Tab | KeyCode::Down => {
                self.selected_index = (self.selected_index + 1) % SLOTS;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.selected_index = (self.selected_index + SLOTS - 1) % SLOTS;
            }
            KeyCode::Enter => match self.selected_index {
                MODE => self.toggle_mode(),
                EMERGENCY => self.book_emergency_ambulance(db),
                EXIT => self.exit_dialog.show(),
                _ => {
                    if self.attempt_login(db) {
                        return Ok(Some(SelectedApp::None));
                    }
                }
            },
            KeyCode::Esc => self.exit_dialog.show(),
            _ => {}
        }
        Ok(None)
    }

    fn tick(&mut self) {
        self.status.check_timeout();
    }

    fn render(&self, frame: &mut Frame) {
        frame.render_widget(Block::default().style(Style::default().bg(BG)), frame.area());

        let vertical_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6), // Banner
                Constraint::Length(1), // Slogan
                Constraint::Length(1),
                Constraint::Length(1), // Mode selector
                Constraint::Length(1),
                Constraint::Length(3), // First input
                Constraint::Length(3), // Second input
                Constraint::Length(2), // Status
                Constraint::Length(1), // Emergency
                Constraint::Length(1), // Exit
                Constraint::Min(0),
                Constraint::Length(1), // Help
            ])
            .margin(1)
            .split(frame.area());

        let banner = Paragraph::new(Text::from(
            BANNER.iter().map(|line| Line::from(*line)).collect::<Vec<_>>(),
        ))
        .alignment(Alignment::Center)
        .style(Style::default().fg(ACCENT).bg(BG));
        frame.render_widget(banner, vertical_layout[0]);

        let slogan = Paragraph::new(Span::styled(
            "Hospital records, rooms and appointments",
            Style::default()
                .fg(MUTED)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(slogan, vertical_layout[1]);

        let mode_style = |mode: LoginMode| {
            if self.mode == mode {
                Style::default()
                    .fg(if self.selected_index == MODE { FOCUS } else { TITLE })
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(MUTED)
            }
        };
        let mode = Paragraph::new(Line::from(vec![
            Span::styled(
                if self.selected_index == MODE { "◄ " } else { "  " },
                Style::default().fg(FOCUS),
            ),
            Span::styled("Administrator", mode_style(LoginMode::Admin)),
            Span::raw("   "),
            Span::styled("Patient", mode_style(LoginMode::Patient)),
            Span::styled(
                if self.selected_index == MODE { " ►" } else { "  " },
                Style::default().fg(FOCUS),
            ),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(mode, vertical_layout[3]);

        let input_area = |area: Rect| widgets::centered_rect(60, 100, area);
        let input_block = |title: &'static str, focused: bool| {
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(Span::styled(title, Style::default().fg(TITLE)))
                .border_style(Style::default().fg(if focused { FOCUS } else { BORDER_IDLE }))
                .style(Style::default().bg(INPUT_BG))
        };

        let first = Paragraph::new(self.first.clone())
            .style(Style::default().fg(TEXT))
            .block(input_block(self.first_label(), self.selected_index == FIRST));
        frame.render_widget(first, input_area(vertical_layout[5]));

        let second_text = match self.mode {
            LoginMode::Admin => "•".repeat(self.second.chars().count()),
            LoginMode::Patient => self.second.clone(),
        };
        let second = Paragraph::new(second_text)
            .style(Style::default().fg(TEXT))
            .block(input_block(self.second_label(), self.selected_index == SECOND));
        frame.render_widget(second, input_area(vertical_layout[6]));

        self.status.render(frame, vertical_layout[7]);

        widgets::button(
            frame,
            vertical_layout[8],
            "🚑 Emergency Ambulance",
            self.selected_index == EMERGENCY,
            ERROR,
        );
        widgets::button(
            frame,
            vertical_layout[9],
            "Exit",
            self.selected_index == EXIT,
            FOCUS,
        );

        let help = Paragraph::new(
            "↑/↓/Tab: Navigate | ←/→ on mode: Switch | Enter: Login / Select | Esc: Exit",
        )
        .style(Style::default().fg(MUTED))
        .alignment(Alignment::Center);
        frame.render_widget(help, vertical_layout[11]);

        self.exit_dialog
            .render(frame, "Confirm Exit", "Are you sure you want to quit?");
    }
}
