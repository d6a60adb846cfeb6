//! Medicine purchases by patients and the purchase ledger view.

use crate::app::SelectedApp;
use crate::components::widgets::{
    self, ConfirmDialog, RecordTable, StatusMessage, TableEvent,
};
use crate::components::Component;
use crate::db::Database;
use crate::models::{Medicine, Purchase};
use crate::services::{pharmacy, registry};
use crate::tui::Frame;
use crate::utils;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;

const PURCHASE_COLUMNS: &[(&str, u16)] = &[
    ("#", 8),
    ("Medicine", 37),
    ("Price", 20),
    ("Purchased At", 35),
];

fn purchase_row(purchase: &Purchase) -> Vec<String> {
    vec![
        purchase.id.to_string(),
        purchase.medicine_name.clone(),
        purchase.price.clone(),
        purchase.purchased_at.clone(),
    ]
}

/// The medicine catalogue, from which the signed-in patient buys.
pub struct BuyMedicine {
    patient_id: String,
    medicines: Vec<Medicine>,
    catalogue: RecordTable,
    history: RecordTable,
    confirm: ConfirmDialog,
    status: StatusMessage,
}

impl BuyMedicine {
    pub fn new(patient_id: &str, db: &Database) -> Result<Self> {
        let mut screen = Self {
            patient_id: patient_id.to_string(),
            medicines: registry::list::<Medicine>(db)?,
            catalogue: RecordTable::new(&[("ID", 20), ("Name", 50), ("Price", 30)]),
            history: RecordTable::new(PURCHASE_COLUMNS),
            confirm: ConfirmDialog::default(),
            status: StatusMessage::default(),
        };
        screen.catalogue.set_rows(
            screen
                .medicines
                .iter()
                .map(|m| vec![m.id.clone(), m.name.clone(), m.price.clone()])
                .collect(),
        );
        screen.refresh_history(db)?;
        Ok(screen)
    }

    fn refresh_history(&mut self, db: &Database) -> Result<()> {
        let purchases = pharmacy::purchases_for_patient(db, &self.patient_id)?;
        self.history
            .set_rows(purchases.iter().map(purchase_row).collect());
        Ok(())
    }

    fn selected_medicine(&self) -> Option<&Medicine> {
        self.catalogue
            .selected()
            .and_then(|i| self.medicines.get(i))
    }

    fn buy_selected(&mut self, db: &mut Database) -> Result<()> {
        let Some(medicine_id) = self.selected_medicine().map(|m| m.id.clone()) else {
            return Ok(());
        };
        match pharmacy::purchase(db, &self.patient_id, &medicine_id, utils::now()) {
            Ok(purchase) => {
                self.status.set_success(format!(
                    "Purchased {} for {}",
                    purchase.medicine_name, purchase.price
                ));
                self.refresh_history(db)?;
            }
            Err(e) => self.status.set_error(e.to_string()),
        }
        Ok(())
    }
}

impl Component for BuyMedicine {
    fn handle_input(&mut self, event: KeyEvent, db: &mut Database) -> Result<Option<SelectedApp>> {
        self.status.check_timeout();

        if self.confirm.open {
            if self.confirm.handle_input(event) == Some(true) {
                self.buy_selected(db)?;
            }
            return Ok(None);
        }

        match self.catalogue.handle_input(event) {
            Some(TableEvent::Activate(_)) => self.confirm.show(),
            Some(TableEvent::Back) => return Ok(Some(SelectedApp::None)),
            None => {}
        }
        Ok(None)
    }

    fn tick(&mut self) {
        self.status.check_timeout();
    }

    fn render(&self, frame: &mut Frame) {
        let area = widgets::page(
            frame,
            "💊 BUY MEDICINE",
            "↑/↓: Navigate | Enter: Buy | Esc: Back",
        );
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(55),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        self.catalogue.render(frame, layout[0], "Available medicines", true);
        self.history
            .render(frame, layout[1], "Your purchases", false);
        self.status.render(frame, layout[2]);

        let message = self
            .selected_medicine()
            .map(|m| format!("Buy {} for {}?", m.name, m.price))
            .unwrap_or_default();
        self.confirm.render(frame, "Confirm Purchase", &message);
    }
}

/// Every purchase by every patient, in ledger order.
pub struct PurchaseLedger {
    table: RecordTable,
}

impl PurchaseLedger {
    pub fn new(db: &Database) -> Result<Self> {
        let mut table = RecordTable::new(&[
            ("#", 8),
            ("Patient", 15),
            ("Medicine", 32),
            ("Price", 15),
            ("Purchased At", 30),
        ]);
        table.set_rows(
            pharmacy::ledger(db)?
                .iter()
                .map(|p| {
                    vec![
                        p.id.to_string(),
                        p.patient_id.clone(),
                        p.medicine_name.clone(),
                        p.price.clone(),
                        p.purchased_at.clone(),
                    ]
                })
                .collect(),
        );
        Ok(Self { table })
    }
}

impl Component for PurchaseLedger {
    fn handle_input(&mut self, event: KeyEvent, _db: &mut Database) -> Result<Option<SelectedApp>> {
        if event.code == KeyCode::Char('b') || self.table.handle_input(event) == Some(TableEvent::Back) {
            return Ok(Some(SelectedApp::None));
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame) {
        let area = widgets::page(frame, "💊 PURCHASE LEDGER", "↑/↓: Navigate | Esc/B: Back");
        self.table.render(
            frame,
            area,
            &format!("{} purchases", self.table.len()),
            true,
        );
    }
}
