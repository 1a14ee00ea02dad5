//! Draft state for the employee form.
//!
//! The form is driven by [`FIELDS`], a declarative list of descriptors. Each
//! descriptor becomes one control; edits land in an [`EmployeeDraft`] keyed
//! by [`Field`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::employee::{Department, Employee, parse_iso_date};
use crate::error::DraftError;
use crate::states::{self, STATES};

/// Editable fields of an employee (everything except the identifier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    DateOfBirth,
    StartDate,
    Department,
    Street,
    City,
    State,
    ZipCode,
}

impl Field {
    /// JSON key and HTML `name` of the field.
    pub fn key(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::DateOfBirth => "dateOfBirth",
            Field::StartDate => "startDate",
            Field::Department => "department",
            Field::Street => "street",
            Field::City => "city",
            Field::State => "state",
            Field::ZipCode => "zipCode",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::DateOfBirth => "Date of Birth",
            Field::StartDate => "Start Date",
            Field::Department => "Department",
            Field::Street => "Street",
            Field::City => "City",
            Field::State => "State",
            Field::ZipCode => "Zip Code",
        }
    }

    pub fn is_date(self) -> bool {
        matches!(self, Field::DateOfBirth | Field::StartDate)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FIELDS
            .iter()
            .map(|d| d.field)
            .find(|f| f.key() == s)
            .ok_or_else(|| format!("unknown field: {s}"))
    }
}

/// Option lists backing select controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choices {
    Departments,
    States,
}

impl Choices {
    /// `(value, label)` pairs in display order.
    pub fn options(self) -> Vec<(&'static str, &'static str)> {
        match self {
            Choices::Departments => Department::NAMES.iter().map(|&d| (d, d)).collect(),
            Choices::States => STATES.iter().map(|s| (s.abbreviation, s.name)).collect(),
        }
    }

    /// Text of the empty leading option.
    pub fn placeholder(self) -> &'static str {
        match self {
            Choices::Departments => "Select Department",
            Choices::States => "Select State",
        }
    }
}

/// How a field is rendered and edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Select(Choices),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub label: &'static str,
    pub field: Field,
    pub kind: FieldKind,
}

const fn descriptor(field: Field, label: &'static str, kind: FieldKind) -> FieldDescriptor {
    FieldDescriptor { label, field, kind }
}

/// Form controls, in display order.
pub const FIELDS: &[FieldDescriptor] = &[
    descriptor(Field::FirstName, "First Name", FieldKind::Text),
    descriptor(Field::LastName, "Last Name", FieldKind::Text),
    descriptor(Field::DateOfBirth, "Date of Birth", FieldKind::Date),
    descriptor(Field::StartDate, "Start Date", FieldKind::Date),
    descriptor(Field::Department, "Department", FieldKind::Select(Choices::Departments)),
    descriptor(Field::Street, "Street", FieldKind::Text),
    descriptor(Field::City, "City", FieldKind::Text),
    descriptor(Field::State, "State", FieldKind::Select(Choices::States)),
    descriptor(Field::ZipCode, "Zip Code", FieldKind::Text),
];

/// In-progress form values: an employee minus its identifier, with every
/// field still editable text (dates excepted).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub department: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl EmployeeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::FirstName => Some(&mut self.first_name),
            Field::LastName => Some(&mut self.last_name),
            Field::Department => Some(&mut self.department),
            Field::Street => Some(&mut self.street),
            Field::City => Some(&mut self.city),
            Field::State => Some(&mut self.state),
            Field::ZipCode => Some(&mut self.zip_code),
            Field::DateOfBirth | Field::StartDate => None,
        }
    }

    fn date_mut(&mut self, field: Field) -> Option<&mut Option<NaiveDate>> {
        match field {
            Field::DateOfBirth => Some(&mut self.date_of_birth),
            Field::StartDate => Some(&mut self.start_date),
            _ => None,
        }
    }

    /// Apply a raw control value. Date fields take `YYYY-MM-DD`; anything
    /// unparsable clears the date.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.date_mut(field) {
            *slot = parse_iso_date(&value);
        } else if let Some(slot) = self.text_mut(field) {
            *slot = value;
        }
    }

    /// Apply a value from the date widget. Ignored for non-date fields.
    pub fn set_date(&mut self, field: Field, date: Option<NaiveDate>) {
        if let Some(slot) = self.date_mut(field) {
            *slot = date;
        }
    }

    /// Current control value; dates as `YYYY-MM-DD` or empty.
    pub fn value(&self, field: Field) -> String {
        match field {
            Field::FirstName => self.first_name.clone(),
            Field::LastName => self.last_name.clone(),
            Field::DateOfBirth => iso(self.date_of_birth),
            Field::StartDate => iso(self.start_date),
            Field::Department => self.department.clone(),
            Field::Street => self.street.clone(),
            Field::City => self.city.clone(),
            Field::State => self.state.clone(),
            Field::ZipCode => self.zip_code.clone(),
        }
    }

    pub fn date(&self, field: Field) -> Option<NaiveDate> {
        match field {
            Field::DateOfBirth => self.date_of_birth,
            Field::StartDate => self.start_date,
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Required fields that are still blank, in form order.
    pub fn missing_fields(&self, dates_required: bool) -> Vec<Field> {
        FIELDS
            .iter()
            .map(|d| d.field)
            .filter(|&f| {
                if f.is_date() {
                    dates_required && self.date(f).is_none()
                } else {
                    self.value(f).trim().is_empty()
                }
            })
            .collect()
    }

    /// Build the finished record. Values are kept exactly as entered.
    pub fn finalize(&self, id: Option<u64>, dates_required: bool) -> Result<Employee, DraftError> {
        if let Some(&field) = self.missing_fields(dates_required).first() {
            return Err(DraftError::MissingField(field));
        }
        let department = self.department.parse::<Department>()?;
        if states::by_code(&self.state).is_none() {
            return Err(DraftError::UnknownState(self.state.clone()));
        }
        Ok(Employee {
            id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            date_of_birth: self.date_of_birth,
            start_date: self.start_date,
            department,
            street: self.street.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
        })
    }

    /// Back to the empty default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn iso(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
