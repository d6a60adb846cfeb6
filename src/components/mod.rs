use crate::app::SelectedApp;
use crate::db::Database;
use crate::tui::Frame;
use anyhow::Result;
use crossterm::event::KeyEvent;

pub mod home;
pub mod hospital;
pub mod login;
pub mod widgets;

pub trait Component {
    /// Handles a key press. `Some(SelectedApp::None)` means "go back".
    fn handle_input(&mut self, event: KeyEvent, db: &mut Database) -> Result<Option<SelectedApp>>;
    fn render(&self, frame: &mut Frame);
    /// Called when no input arrived for a while.
    fn tick(&mut self) {}
}
