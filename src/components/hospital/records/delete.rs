use super::Editable;
use crate::app::SelectedApp;
use crate::components::widgets::{
    self, ConfirmDialog, RecordTable, StatusMessage, TableEvent, HELP,
};
use crate::components::Component;
use crate::db::Database;
use crate::services::registry;
use crate::tui::Frame;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{prelude::*, widgets::*};

/// Deletes one record, or every marked record, after confirmation.
///
/// Records that reference the deleted ones (rooms, appointments, purchases) are left
/// as they are.
pub struct DeleteRecord<E: Editable> {
    records: Vec<E>,
    table: RecordTable,
    confirm: ConfirmDialog,
    /// IDs awaiting confirmation.
    pending: Vec<String>,
    status: StatusMessage,
}

impl<E: Editable> DeleteRecord<E> {
    pub fn new(db: &Database) -> Result<Self> {
        let mut screen = Self {
            records: Vec::new(),
            table: RecordTable::new(E::columns()).with_marks(),
            confirm: ConfirmDialog::default(),
            pending: Vec::new(),
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

    /// Marked records, or the highlighted one when nothing is marked.
    fn targets(&self) -> Vec<String> {
        let marked = self.table.marked();
        let indices = if marked.is_empty() {
            self.table.selected().into_iter().collect()
        } else {
            marked
        };
        indices
            .into_iter()
            .filter_map(|i| self.records.get(i))
            .map(|r| r.id().to_string())
            .collect()
    }

    fn delete_pending(&mut self, db: &mut Database) -> Result<()> {
        let ids = std::mem::take(&mut self.pending);
        let mut deleted = 0;
        for id in &ids {
            match registry::delete::<E>(db, id) {
                Ok(()) => deleted += 1,
                Err(e) => self.status.set_error(e.to_string()),
            }
        }
        if deleted == ids.len() {
            self.status.set_success(if deleted == 1 {
                format!("{} {} deleted", E::NAME, ids[0])
            } else {
                format!("{deleted} records deleted")
            });
        }
        self.refresh(db)
    }

    fn confirm_message(&self) -> String {
        match self.pending.as_slice() {
            [id] => format!("Delete {} {id}?", E::NAME),
            ids => format!("Delete {} records?", ids.len()),
        }
    }
}

impl<E: Editable> Component for DeleteRecord<E> {
    fn handle_input(&mut self, event: KeyEvent, db: &mut Database) -> Result<Option<SelectedApp>> {
        self.status.check_timeout();

        if self.confirm.open {
            match self.confirm.handle_input(event) {
                Some(true) => self.delete_pending(db)?,
                Some(false) => self.pending.clear(),
                None => {}
            }
            return Ok(None);
        }

        match event.code {
            KeyCode::Char(' ') => self.table.toggle_mark(),
            KeyCode::Char('a') | KeyCode::Char('A') => self.table.toggle_all_marks(),
            _ => match self.table.handle_input(event) {
                Some(TableEvent::Activate(_)) => {
                    self.pending = self.targets();
                    if !self.pending.is_empty() {
                        self.confirm.show();
                    }
                }
                Some(TableEvent::Back) => return Ok(Some(SelectedApp::None)),
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
            &format!("{} DELETE {}", E::ICON, E::NAME.to_uppercase()),
            "↑/↓: Navigate | Space: Mark | A: Mark all | Enter: Delete | Esc: Back",
        );
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        self.table.render(frame, layout[0], "Select records to delete", true);

        let marked = self.table.marked().len();
        let hint = if marked == 0 {
            "Enter deletes the highlighted record".to_string()
        } else {
            format!("{marked} marked; Enter deletes all of them")
        };
        frame.render_widget(
            Paragraph::new(hint)
                .style(Style::default().fg(HELP))
                .alignment(Alignment::Center),
            layout[1],
        );
        self.status.render(frame, layout[2]);

        self.confirm.render(frame, "Confirm Delete", &self.confirm_message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Doctor;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn setup() -> Database {
        let mut db = Database::open_in_memory().unwrap();
        for id in ["D1", "D2", "D3"] {
            registry::add(&mut db, &registry::doctor(id, "Grey", "General", "9876543210").unwrap())
                .unwrap();
        }
        db
    }

    fn ids(db: &Database) -> Vec<String> {
        registry::list::<Doctor>(db)
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect()
    }

    #[test]
    fn test_delete_highlighted() {
        let mut db = setup();
        let mut screen = DeleteRecord::<Doctor>::new(&db).unwrap();
        screen.handle_input(key(KeyCode::Down), &mut db).unwrap();
        screen.handle_input(key(KeyCode::Enter), &mut db).unwrap();
        screen.handle_input(key(KeyCode::Char('y')), &mut db).unwrap();
        assert_eq!(ids(&db), ["D1", "D3"]);
    }

    #[test]
    fn test_delete_marked_and_cancel() {
        let mut db = setup();
        let mut screen = DeleteRecord::<Doctor>::new(&db).unwrap();
        screen.handle_input(key(KeyCode::Char(' ')), &mut db).unwrap();
        screen.handle_input(key(KeyCode::Down), &mut db).unwrap();
        screen.handle_input(key(KeyCode::Down), &mut db).unwrap();
        screen.handle_input(key(KeyCode::Char(' ')), &mut db).unwrap();

        screen.handle_input(key(KeyCode::Enter), &mut db).unwrap();
        screen.handle_input(key(KeyCode::Esc), &mut db).unwrap();
        assert_eq!(ids(&db).len(), 3);

        screen.handle_input(key(KeyCode::Enter), &mut db).unwrap();
        screen.handle_input(key(KeyCode::Char('y')), &mut db).unwrap();
        assert_eq!(ids(&db), ["D2"]);
    }
}
