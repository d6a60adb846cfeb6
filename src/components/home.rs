use crate::app::{RecordAction, RecordKind, SelectedApp};
use crate::auth::Session;
use crate::components::widgets::{
    ConfirmDialog, StatusMessage, ACCENT, BG, BORDER, BORDER_IDLE, ERROR, FOCUS, HELP, HIGHLIGHT_BG, INPUT_BG,
    MUTED, PANEL_BG, SUCCESS, TEXT, TITLE,
};
use crate::components::Component;
use crate::db::Database;
use crate::tui::Frame;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

struct Feature {
    icon: &'static str,
    title: &'static str,
    options: Vec<(&'static str, SelectedApp)>,
}

fn record_feature(icon: &'static str, title: &'static str, kind: RecordKind) -> Feature {
    Feature {
        icon,
        title,
        options: vec![
            ("Add", SelectedApp::Records(kind, RecordAction::Add)),
            ("List", SelectedApp::Records(kind, RecordAction::List)),
            ("Update", SelectedApp::Records(kind, RecordAction::Update)),
            ("Delete", SelectedApp::Records(kind, RecordAction::Delete)),
        ],
    }
}

fn admin_features() -> Vec<Feature> {
    let mut medicines = record_feature("💊", "Medicines", RecordKind::Medicine);
    medicines
        .options
        .push(("Purchase Ledger", SelectedApp::PurchaseLedger));

    vec![
        record_feature("📋", "Patients", RecordKind::Patient),
        record_feature("🩺", "Doctors", RecordKind::Doctor),
        record_feature("👥", "Staff", RecordKind::Staff),
        record_feature("🚑", "Ambulances", RecordKind::Ambulance),
        medicines,
        Feature {
            icon: "📅",
            title: "Appointments",
            options: vec![
                ("Schedule Appointment", SelectedApp::AppointmentSchedule),
                ("View Patient Appointments", SelectedApp::AppointmentList),
            ],
        },
        Feature {
            icon: "🛏",
            title: "Rooms",
            options: vec![
                ("Room Status", SelectedApp::RoomStatus),
                ("Allot Room", SelectedApp::RoomAllot),
                ("Release Room", SelectedApp::RoomRelease),
            ],
        },
    ]
}

fn patient_features() -> Vec<Feature> {
    vec![
        Feature {
            icon: "👤",
            title: "My Account",
            options: vec![
                ("My Information", SelectedApp::MyInformation),
                ("My Appointments", SelectedApp::AppointmentList),
            ],
        },
        Feature {
            icon: "📅",
            title: "Appointments",
            options: vec![("Schedule Appointment", SelectedApp::AppointmentSchedule)],
        },
        Feature {
            icon: "💊",
            title: "Pharmacy",
            options: vec![("Buy Medicine", SelectedApp::BuyMedicine)],
        },
        Feature {
            icon: "🛏",
            title: "Rooms",
            options: vec![
                ("Book a Room", SelectedApp::RoomAllot),
                ("Room Status", SelectedApp::RoomStatus),
                ("Release Room", SelectedApp::RoomRelease),
            ],
        },
    ]
}

pub struct Home {
    display_name: String,
    is_admin: bool,
    /// Symptom-check result shown to patients.
    diagnosis: Option<Vec<&'static str>>,
    /// 0: panels, 1: logout button.
    selection_mode: usize,
    logout_dialog: ConfirmDialog,
    /// Problems from screens that could not open or failed while running.
    status: StatusMessage,
    active_panel: usize,
    selected_feature_index: usize,
    submenu_states: Vec<ListState>,
    features: Vec<Feature>,
}

impl Home {
    /// Builds the menu for the signed-in user.
    pub fn new(session: &Session) -> Self {
        let features = if session.is_admin() {
            admin_features()
        } else {
            patient_features()
        };

        let submenu_states = features
            .iter()
            .map(|_| {
                let mut state = ListState::default();
                state.select(Some(0));
                state
            })
            .collect();

        let diagnosis = match session {
            Session::Patient {
                possible_diseases, ..
            } => Some(possible_diseases.clone()),
            Session::Admin { .. } => None,
        };

        Self {
            display_name: session.display_name().to_string(),
            is_admin: session.is_admin(),
            diagnosis,
            selection_mode: 0,
            logout_dialog: ConfirmDialog::default(),
            status: StatusMessage::default(),
            active_panel: 0,
            selected_feature_index: 0,
            submenu_states,
            features,
        }
    }

    /// Shows `message` on the status line until it times out.
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.status.set_error(message);
    }

    pub fn status(&self) -> &StatusMessage {
        &self.status
    }

    fn selected_option(&self) -> Option<SelectedApp> {
        let feature = self.features.get(self.selected_feature_index)?;
        let index = self.submenu_states[self.selected_feature_index]
            .selected()
            .unwrap_or(0);
        feature.options.get(index).map(|(_, app)| *app)
    }

    fn move_selection(&mut self, forward: bool) {
        if self.active_panel == 0 {
            let len = self.features.len();
            self.selected_feature_index = if forward {
                (self.selected_feature_index + 1) % len
            } else {
                (self.selected_feature_index + len - 1) % len
            };
        } else {
            let len = self.features[self.selected_feature_index].options.len();
            let state = &mut self.submenu_states[self.selected_feature_index];
            let i = state.selected().unwrap_or(0);
            state.select(Some(if forward {
                (i + 1) % len
            } else {
                (i + len - 1) % len
            }));
        }
    }

    fn diagnosis_text(&self) -> Option<Line<'static>> {
        let diseases = self.diagnosis.as_ref()?;
        Some(if diseases.is_empty() {
            Line::from(Span::styled(
                "No disease matched your symptoms. A doctor can help with further diagnosis.",
                Style::default().fg(MUTED),
            ))
        } else {
            Line::from(vec![
                Span::styled("Possible diseases: ", Style::default().fg(TEXT)),
                Span::styled(
                    diseases.join(", "),
                    Style::default().fg(ERROR).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    ". Schedule an appointment with a doctor for treatment.",
                    Style::default().fg(TEXT),
                ),
            ])
        })
    }
}

impl Component for Home {
    fn handle_input(&mut self, key: KeyEvent, _db: &mut Database) -> Result<Option<SelectedApp>> {
        self.status.check_timeout();

        if self.logout_dialog.open {
            return Ok(match self.logout_dialog.handle_input(key) {
                Some(true) => Some(SelectedApp::None),
                _ => None,
            });
        }

        match key.code {
            KeyCode::Tab => {
                self.selection_mode = (self.selection_mode + 1) % 2;
            }
            KeyCode::Left if self.selection_mode == 0 => self.active_panel = 0,
            KeyCode::Right if self.selection_mode == 0 => self.active_panel = 1,
            KeyCode::Up if self.selection_mode == 0 => self.move_selection(false),
            KeyCode::Down if self.selection_mode == 0 => self.move_selection(true),
            KeyCode::Enter => {
                if self.selection_mode == 1 {
                    self.logout_dialog.show();
                } else if self.active_panel == 1 {
                    return Ok(self.selected_option());
                } else {
                    self.active_panel = 1;
                }
            }
            KeyCode::Esc => {
                if self.active_panel == 1 {
                    self.active_panel = 0;
                } else {
                    self.logout_dialog.show();
                }
            }
            _ => {}
        }

        Ok(None)
    }

    fn tick(&mut self) {
        self.status.check_timeout();
    }

    fn render(&self, frame: &mut Frame) {
        frame.render_widget(Block::default().style(Style::default().bg(BG)), frame.area());

        let banner_height = if self.diagnosis.is_some() { 3 } else { 0 };
        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(banner_height),
                Constraint::Length(1),
                Constraint::Min(10),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let role = if self.is_admin { "Administrator" } else { "Patient" };
        let welcome_text = Line::from(vec![
            Span::styled(
                "Welcome to Wardroom, ",
                Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                self.display_name.clone(),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" ({role})"), Style::default().fg(MUTED)),
        ]);

        let welcome_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER))
            .style(Style::default().bg(Color::Rgb(24, 24, 40)));
        let welcome_inner = welcome_block.inner(main_layout[0]);
        frame.render_widget(welcome_block, main_layout[0]);
        frame.render_widget(
            Paragraph::new(welcome_text)
                .alignment(Alignment::Center)
                .block(Block::default().padding(Padding::new(0, 0, 1, 0))),
            welcome_inner,
        );

        if let Some(line) = self.diagnosis_text() {
            frame.render_widget(
                Paragraph::new(line)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .block(Block::default().padding(Padding::new(2, 2, 1, 0))),
                main_layout[1],
            );
        }

        if self.status.text().is_some() {
            self.status.render(frame, main_layout[2]);
        } else {
            frame.render_widget(
                Paragraph::new("Please select a task:")
                    .style(Style::default().fg(Color::Rgb(180, 190, 254)))
                    .alignment(Alignment::Center),
                main_layout[2],
            );
        }

        let content_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .spacing(2)
            .margin(1)
            .split(main_layout[3]);

        let panel_border = |panel: usize| {
            if self.active_panel == panel && self.selection_mode == 0 {
                Style::default().fg(FOCUS)
            } else {
                Style::default().fg(BORDER_IDLE)
            }
        };

        let left_panel_block = Block::default()
            .title(if self.is_admin {
                " 🏥 Hospital Management "
            } else {
                " 🏥 Patient Services "
            })
            .title_style(Style::default().fg(TITLE).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(panel_border(0))
            .style(Style::default().bg(PANEL_BG));
        let left_inner = left_panel_block.inner(content_layout[0]);
        frame.render_widget(left_panel_block, content_layout[0]);

        let feature_items: Vec<ListItem> = self
            .features
            .iter()
            .enumerate()
            .map(|(idx, feature)| {
                let selected = idx == self.selected_feature_index;
                let style = match (selected, self.active_panel == 0 && self.selection_mode == 0) {
                    (true, true) => Style::default().fg(FOCUS).add_modifier(Modifier::BOLD),
                    (true, false) => Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD),
                    _ => Style::default().fg(Color::Rgb(200, 200, 220)),
                };
                let prefix = if selected { " ► " } else { "   " };
                ListItem::new(format!("{prefix}{} {}", feature.icon, feature.title)).style(style)
            })
            .collect();
        frame.render_widget(
            List::new(feature_items).block(Block::default().padding(Padding::new(0, 0, 1, 0))),
            left_inner,
        );

        let right_panel_block = Block::default()
            .title(" Sub menu ")
            .title_style(Style::default().fg(TITLE).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(panel_border(1))
            .style(Style::default().bg(PANEL_BG));
        let right_inner = right_panel_block.inner(content_layout[1]);
        frame.render_widget(right_panel_block, content_layout[1]);

        let current = &self.features[self.selected_feature_index];
        let current_state = &self.submenu_states[self.selected_feature_index];
        let submenu_items: Vec<ListItem> = current
            .options
            .iter()
            .enumerate()
            .map(|(idx, (label, _))| {
                let selected = current_state.selected() == Some(idx);
                let style = match (selected, self.active_panel == 1 && self.selection_mode == 0) {
                    (true, true) => Style::default().fg(FOCUS).add_modifier(Modifier::BOLD),
                    (true, false) => Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                    _ => Style::default().fg(Color::Rgb(200, 200, 220)),
                };
                let prefix = if selected { " ► " } else { "   " };
                ListItem::new(format!("{prefix}{label}")).style(style)
            })
            .collect();
        frame.render_widget(
            List::new(submenu_items)
                .block(Block::default().padding(Padding::new(2, 0, 2, 0)))
                .highlight_style(Style::default().bg(HIGHLIGHT_BG)),
            right_inner,
        );

        frame.render_widget(
            Paragraph::new("←→: Switch panels | ↑↓: Navigate | Enter: Select | Tab: Logout | Esc: Back")
                .style(Style::default().fg(HELP))
                .alignment(Alignment::Center),
            main_layout[4],
        );

        let logout_focused = self.selection_mode == 1;
        let logout_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if logout_focused {
                ERROR
            } else {
                Color::Rgb(100, 100, 140)
            }))
            .style(Style::default().bg(INPUT_BG));
        let logout_inner = logout_block.inner(main_layout[5]);
        frame.render_widget(logout_block, main_layout[5]);
        frame.render_widget(
            Paragraph::new(if logout_focused { "[ Logout ]" } else { "  Logout  " })
                .style(if logout_focused {
                    Style::default().fg(ERROR).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(MUTED)
                })
                .alignment(Alignment::Center),
            logout_inner,
        );

        self.logout_dialog
            .render(frame, "Confirm Logout", "Are you sure you want to logout?");
    }
}
