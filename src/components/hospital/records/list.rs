use super::Editable;
use crate::app::SelectedApp;
use crate::components::widgets::{self, RecordTable, StatusMessage, TableEvent, TEXT, TITLE};
use crate::components::Component;
use crate::db::Database;
use crate::services::registry;
use crate::tui::Frame;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{prelude::*, widgets::*};
use std::marker::PhantomData;

/// Read-only table of every record of one kind, in stored order.
pub struct ListRecords<E: Editable> {
    table: RecordTable,
    show_details: bool,
    status: StatusMessage,
    kind: PhantomData<E>,
}

impl<E: Editable> ListRecords<E> {
    pub fn new(db: &Database) -> Result<Self> {
        let mut list = Self {
            table: RecordTable::new(E::columns()),
            show_details: false,
            status: StatusMessage::default(),
            kind: PhantomData,
        };
        list.refresh(db)?;
        Ok(list)
    }

    fn refresh(&mut self, db: &Database) -> Result<()> {
        let rows = registry::list::<E>(db)?.iter().map(E::row).collect();
        self.table.set_rows(rows);
        Ok(())
    }

    fn details(&self, index: usize) -> Vec<Line<'static>> {
        let Some(row) = self.table.row(index) else {
            return Vec::new();
        };
        E::columns()
            .iter()
            .zip(row)
            .map(|((header, _), value)| {
                Line::from(vec![
                    Span::styled(
                        format!("{header}: "),
                        Style::default().fg(TITLE).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(value.clone(), Style::default().fg(TEXT)),
                ])
            })
            .collect()
    }
}

impl<E: Editable> Component for ListRecords<E> {
    fn handle_input(&mut self, event: KeyEvent, db: &mut Database) -> Result<Option<SelectedApp>> {
        self.status.check_timeout();
        match event.code {
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.refresh(db)?;
                self.status.set_success("List refreshed");
            }
            KeyCode::Char('b') | KeyCode::Char('B') => return Ok(Some(SelectedApp::None)),
            _ => match self.table.handle_input(event) {
                Some(TableEvent::Activate(_)) => self.show_details = !self.show_details,
                Some(TableEvent::Back) => {
                    if self.show_details {
                        self.show_details = false;
                    } else {
                        return Ok(Some(SelectedApp::None));
                    }
                }
                None => {}
            },
        }
        Ok(None)
    }

    fn tick(&mut self) {
        self.status.check_timeout();
    }

    fn render(&self, frame: &mut Frame) {
        let area = widgets::page(
            frame,
            &format!("{} {} LIST", E::ICON, E::NAME.to_uppercase()),
            "↑/↓: Navigate | Enter: Toggle details | R: Refresh | Esc/B: Back",
        );

        let details_height = if self.show_details {
            E::columns().len() as u16 + 2
        } else {
            0
        };
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),
                Constraint::Length(details_height),
                Constraint::Length(1),
            ])
            .split(area);

        self.table.render(
            frame,
            layout[0],
            &format!("{} records", self.table.len()),
            true,
        );

        if self.show_details {
            if let Some(index) = self.table.selected() {
                let details = Paragraph::new(self.details(index))
                    .block(widgets::panel(&format!("{} details", E::NAME), false))
                    .wrap(Wrap { trim: true });
                frame.render_widget(details, layout[1]);
            }
        }

        self.status.render(frame, layout[2]);
    }
}
