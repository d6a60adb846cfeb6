use super::Editable;
use crate::app::SelectedApp;
use crate::components::widgets::{self, Form, FormEvent, RecordTable, StatusMessage, TableEvent};
use crate::components::Component;
use crate::db::Database;
use crate::services::registry;
use crate::tui::Frame;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::prelude::*;

/// Pick a record from the table, then edit it in a prefilled form.
pub struct UpdateRecord<E: Editable> {
    records: Vec<E>,
    table: RecordTable,
    /// The form for the record being edited, if any.
    editing: Option<Form>,
    status: StatusMessage,
}

impl<E: Editable> UpdateRecord<E> {
    pub fn new(db: &Database) -> Result<Self> {
        let mut screen = Self {
            records: Vec::new(),
            table: RecordTable::new(E::columns()),
            editing: None,
            status: StatusMessage::default(),
        };
        screen.refresh(db)?;
        Ok(screen)
    }

    fn refresh(&mut self, db: &Database) -> Result<()> {
        self.records = registry::list::<E>(db)?;
        self.table.set_rows(self.records.iter().map(E::row).collect());
        Ok(())
    }

    fn save(&mut self, db: &mut Database) -> Result<()> {
        let Some(values) = self.editing.as_ref().map(Form::values) else {
            return Ok(());
        };
        let result = E::from_form(&values).and_then(|record| {
            registry::update(db, &record)?;
            Ok(record)
        });
        match result {
            Ok(record) => {
                self.editing = None;
                self.status
                    .set_success(format!("{} {} updated successfully", E::NAME, record.id()));
                self.refresh(db)?;
            }
            Err(e) => {
                if let Some(form) = &mut self.editing {
                    form.status.set_error(e.to_string());
                }
            }
        }
        Ok(())
    }
}

impl<E: Editable> Component for UpdateRecord<E> {
    fn handle_input(&mut self, event: KeyEvent, db: &mut Database) -> Result<Option<SelectedApp>> {
        self.status.check_timeout();

        if let Some(form) = &mut self.editing {
            let action = form.handle_input(event);
            match action {
                Some(FormEvent::Submit) => self.save(db)?,
                Some(FormEvent::Back) => self.editing = None,
                None => {}
            }
            return Ok(None);
        }

        match self.table.handle_input(event) {
            Some(TableEvent::Activate(index)) => {
                if let Some(record) = self.records.get(index) {
                    self.editing = Some(Form::new(record.edit_fields()).with_submit_label("Save"));
                    self.status.clear();
                }
            }
            Some(TableEvent::Back) => return Ok(Some(SelectedApp::None)),
            None => {}
        }
        Ok(None)
    }

    fn tick(&mut self) {
        self.status.check_timeout();
        if let Some(form) = &mut self.editing {
            form.status.check_timeout();
        }
    }

    fn render(&self, frame: &mut Frame) {
        let title = format!("{} UPDATE {}", E::ICON, E::NAME.to_uppercase());

        if let Some(form) = &self.editing {
            let area = widgets::page(
                frame,
                &title,
                "↑/↓/Tab: Navigate | ←/→: Change option | Enter: Next / Save | Esc: Cancel",
            );
            form.render(frame, widgets::centered_rect(60, 100, area));
            return;
        }

        let area = widgets::page(frame, &title, "↑/↓: Navigate | Enter: Edit | Esc: Back");
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(1)])
            .split(area);
        self.table
            .render(frame, layout[0], &format!("Select a {} to edit", E::NAME), true);
        self.status.render(frame, layout[1]);
    }
}
