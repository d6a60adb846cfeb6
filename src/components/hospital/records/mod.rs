//! Add, list, update and delete screens shared by every administrator-managed
//! record kind.
//!
//! Each kind describes its form and table columns through [`Editable`]; the four
//! screens are generic over it.

use crate::app::{RecordAction, RecordKind};
use crate::components::widgets::FormField;
use crate::components::Component;
use crate::db::{Database, Record};
use crate::error::HospitalResult;
use crate::models::{Ambulance, Doctor, Medicine, Patient, StaffMember};
use crate::services::registry;
use anyhow::Result;

pub mod add;
pub mod delete;
pub mod list;
pub mod update;

pub use add::AddRecord;
pub use delete::DeleteRecord;
pub use list::ListRecords;
pub use update::UpdateRecord;

/// A record kind that can be edited through the generic screens.
pub trait Editable: Record + Clone + 'static {
    const NAME: &'static str;
    const ICON: &'static str;

    /// Form inputs for a new record. Their order matches [`Editable::row`].
    fn fields() -> Vec<FormField>;

    /// Form inputs for editing `self`: prefilled, with the ID locked.
    fn edit_fields(&self) -> Vec<FormField> {
        let mut fields = Self::fields();
        for (field, value) in fields.iter_mut().zip(self.row()) {
            field.value = value;
        }
        if let Some(id) = fields.first_mut() {
            *id = id.clone().locked();
        }
        fields
    }

    /// Validates form input into a record.
    fn from_form(values: &[String]) -> HospitalResult<Self>;

    /// Table headers with their width in percent.
    fn columns() -> &'static [(&'static str, u16)];

    fn row(&self) -> Vec<String>;
}

fn value(values: &[String], index: usize) -> &str {
    values.get(index).map_or("", String::as_str)
}

impl Editable for Patient {
    const NAME: &'static str = "Patient";
    const ICON: &'static str = "📋";

    fn fields() -> Vec<FormField> {
        vec![
            FormField::new("Patient ID"),
            FormField::new("Name"),
            FormField::new("Age (1-99)"),
            FormField::new("Disease"),
        ]
    }

    fn from_form(values: &[String]) -> HospitalResult<Self> {
        registry::patient(
            value(values, 0),
            value(values, 1),
            value(values, 2),
            value(values, 3),
        )
    }

    fn columns() -> &'static [(&'static str, u16)] {
        &[("ID", 15), ("Name", 35), ("Age", 10), ("Disease", 40)]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.age.to_string(),
            self.disease.clone(),
        ]
    }
}

impl Editable for Doctor {
    const NAME: &'static str = "Doctor";
    const ICON: &'static str = "🩺";

    fn fields() -> Vec<FormField> {
        vec![
            FormField::new("Doctor ID"),
            FormField::new("Name"),
            FormField::new("Specialty"),
            FormField::new("Contact (10 digits)"),
        ]
    }

    fn from_form(values: &[String]) -> HospitalResult<Self> {
        registry::doctor(
            value(values, 0),
            value(values, 1),
            value(values, 2),
            value(values, 3),
        )
    }

    fn columns() -> &'static [(&'static str, u16)] {
        &[("ID", 15), ("Name", 30), ("Specialty", 30), ("Contact", 25)]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.specialty.clone(),
            self.contact.clone(),
        ]
    }
}

impl Editable for StaffMember {
    const NAME: &'static str = "Staff Member";
    const ICON: &'static str = "👥";

    fn fields() -> Vec<FormField> {
        vec![
            FormField::new("Staff ID"),
            FormField::new("Name"),
            FormField::new("Role"),
            FormField::new("Contact (10 digits)"),
        ]
    }

    fn from_form(values: &[String]) -> HospitalResult<Self> {
        registry::staff_member(
            value(values, 0),
            value(values, 1),
            value(values, 2),
            value(values, 3),
        )
    }

    fn columns() -> &'static [(&'static str, u16)] {
        &[("ID", 15), ("Name", 30), ("Role", 30), ("Contact", 25)]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.role.clone(),
            self.contact.clone(),
        ]
    }
}

const AMBULANCE_STATUSES: &[&str] = &["Available", "Booked"];

impl Editable for Ambulance {
    const NAME: &'static str = "Ambulance";
    const ICON: &'static str = "🚑";

    /// New ambulances start out available, so only ID and driver are asked for.
    fn fields() -> Vec<FormField> {
        vec![FormField::new("Ambulance ID"), FormField::new("Driver Name")]
    }

    fn edit_fields(&self) -> Vec<FormField> {
        vec![
            FormField::new("Ambulance ID").with_value(&self.id).locked(),
            FormField::new("Driver Name").with_value(&self.driver),
            FormField::choice("Status", AMBULANCE_STATUSES).with_value(self.status.to_string()),
        ]
    }

    fn from_form(values: &[String]) -> HospitalResult<Self> {
        registry::ambulance(value(values, 0), value(values, 1), value(values, 2))
    }

    fn columns() -> &'static [(&'static str, u16)] {
        &[("ID", 20), ("Driver", 50), ("Status", 30)]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.driver.clone(),
            self.status.to_string(),
        ]
    }
}

impl Editable for Medicine {
    const NAME: &'static str = "Medicine";
    const ICON: &'static str = "💊";

    fn fields() -> Vec<FormField> {
        vec![
            FormField::new("Medicine ID"),
            FormField::new("Name"),
            FormField::new("Price"),
        ]
    }

    fn from_form(values: &[String]) -> HospitalResult<Self> {
        registry::medicine(value(values, 0), value(values, 1), value(values, 2))
    }

    fn columns() -> &'static [(&'static str, u16)] {
        &[("ID", 20), ("Name", 50), ("Price", 30)]
    }

    fn row(&self) -> Vec<String> {
        vec![self.id.clone(), self.name.clone(), self.price.clone()]
    }
}

fn open<E: Editable>(action: RecordAction, db: &Database) -> Result<Box<dyn Component>> {
    Ok(match action {
        RecordAction::Add => Box::new(AddRecord::<E>::new()),
        RecordAction::List => Box::new(ListRecords::<E>::new(db)?),
        RecordAction::Update => Box::new(UpdateRecord::<E>::new(db)?),
        RecordAction::Delete => Box::new(DeleteRecord::<E>::new(db)?),
    })
}

/// Builds the screen for `action` on records of `kind`.
pub fn screen(kind: RecordKind, action: RecordAction, db: &Database) -> Result<Box<dyn Component>> {
    match kind {
        RecordKind::Patient => open::<Patient>(action, db),
        RecordKind::Doctor => open::<Doctor>(action, db),
        RecordKind::Staff => open::<StaffMember>(action, db),
        RecordKind::Ambulance => open::<Ambulance>(action, db),
        RecordKind::Medicine => open::<Medicine>(action, db),
    }
}
