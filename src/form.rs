//! Submission state machine of the employee form.
//!
//! ```text
//! Editing --submit--> (published) --> ConfirmationShown
//! ConfirmationShown --dismiss--> Editing
//! ConfirmationShown --go to list--> Editing (navigated to /employees)
//! ```
//!
//! A refused submission (missing field, storage failure) stays in the
//! current phase and keeps the draft.

use chrono::NaiveDate;

use crate::draft::{EmployeeDraft, Field};
use crate::employee::Employee;
use crate::error::SubmitError;
use crate::id::{Clock, IdGenerator, SystemClock};
use crate::route::Route;
use crate::store::Roster;

/// Message shown once an employee has been published.
pub const CONFIRMATION_MESSAGE: &str = "Employee saved successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    ConfirmationShown,
}

/// Draft, phase and identifier source of one form instance.
#[derive(Debug, Clone)]
pub struct EmployeeForm<C: Clock = SystemClock> {
    draft: EmployeeDraft,
    phase: FormPhase,
    ids: IdGenerator<C>,
    dates_required: bool,
    last_saved: Option<Employee>,
}

impl EmployeeForm<SystemClock> {
    pub fn new(dates_required: bool) -> Self {
        Self::with_clock(SystemClock, dates_required)
    }
}

impl<C: Clock> EmployeeForm<C> {
    pub fn with_clock(clock: C, dates_required: bool) -> Self {
        Self {
            draft: EmployeeDraft::new(),
            phase: FormPhase::Editing,
            ids: IdGenerator::new(clock),
            dates_required,
            last_saved: None,
        }
    }

    pub fn draft(&self) -> &EmployeeDraft {
        &self.draft
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn dates_required(&self) -> bool {
        self.dates_required
    }

    /// Most recently published employee, if any.
    pub fn last_saved(&self) -> Option<&Employee> {
        self.last_saved.as_ref()
    }

    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    pub fn edit_date(&mut self, field: Field, date: Option<NaiveDate>) {
        self.draft.set_date(field, date);
    }

    /// Finalize the draft, append it to `roster`, reset the draft and show
    /// the confirmation.
    pub fn submit(&mut self, roster: &mut dyn Roster) -> Result<Employee, SubmitError> {
        let mut employee = self.draft.finalize(None, self.dates_required)?;

        self.ids.observe_all(roster.records().iter().map(|e| e.id));
        let id = self
            .ids
            .next_id()
            .ok_or(SubmitError::IdsExhausted(self.ids.last()))?;
        employee.id = Some(id);

        roster.append(employee.clone())?;
        tracing::info!(
            id = ?employee.id,
            persistence = ?roster.persistence(),
            "published employee {} {}",
            employee.first_name,
            employee.last_name
        );

        self.draft.reset();
        self.phase = FormPhase::ConfirmationShown;
        self.last_saved = Some(employee.clone());
        Ok(employee)
    }

    pub fn dismiss_confirmation(&mut self) {
        self.phase = FormPhase::Editing;
    }

    /// Leave the form for the list screen.
    pub fn go_to_list(&mut self) -> Route {
        self.phase = FormPhase::Editing;
        Route::List
    }
}
