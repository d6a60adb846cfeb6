use super::Editable;
use crate::app::SelectedApp;
use crate::components::widgets::{self, Form, FormEvent};
use crate::components::Component;
use crate::db::Database;
use crate::services::registry;
use crate::tui::Frame;
use anyhow::Result;
use crossterm::event::KeyEvent;
use std::marker::PhantomData;

pub struct AddRecord<E: Editable> {
    form: Form,
    kind: PhantomData<E>,
}

impl<E: Editable> AddRecord<E> {
    pub fn new() -> Self {
        Self {
            form: Form::new(E::fields()).with_submit_label("Add"),
            kind: PhantomData,
        }
    }

    fn submit(&mut self, db: &mut Database) {
        let result = E::from_form(&self.form.values()).and_then(|record| {
            registry::add(db, &record)?;
            Ok(record)
        });
        match result {
            Ok(record) => {
                self.form.reset();
                self.form
                    .status
                    .set_success(format!("{} {} added successfully", E::NAME, record.id()));
            }
            Err(e) => self.form.status.set_error(e.to_string()),
        }
    }
}

impl<E: Editable> Component for AddRecord<E> {
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
            &format!("{} ADD {}", E::ICON, E::NAME.to_uppercase()),
            "↑/↓/Tab: Navigate | Enter: Next / Submit | Esc: Back",
        );
        self.form.render(frame, widgets::centered_rect(60, 100, area));
    }
}
