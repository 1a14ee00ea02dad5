//! # hrnet
//!
//! Employee roster: a record form, a list projection, and the persistence
//! strategies that connect them.
//!
//! ## Overview
//!
//! - **Draft**: the form edits an [`EmployeeDraft`] driven by the declarative
//!   [`FIELDS`] list.
//! - **Submit**: [`EmployeeForm::submit`] finalizes the draft, gives it a
//!   fresh identifier, appends it to a [`Roster`] and resets.
//! - **Roster**: either [`DurableRoster`] (JSON array under one key of a
//!   [`Storage`]) or [`EphemeralRoster`] (memory only).
//! - **List**: [`TableQuery`] searches, sorts and pages the collection.
//!
//! ## Example
//!
//! ```
//! use hrnet::{DurableRoster, EmployeeForm, Field, MemoryStorage, Roster};
//!
//! let storage = MemoryStorage::new();
//! let mut roster = DurableRoster::new(storage.clone(), "employees");
//! let mut form = EmployeeForm::new(true);
//!
//! for (field, value) in [
//!     (Field::FirstName, "Ada"),
//!     (Field::LastName, "Lovelace"),
//!     (Field::DateOfBirth, "1815-12-10"),
//!     (Field::StartDate, "2024-01-01"),
//!     (Field::Department, "Engineering"),
//!     (Field::Street, "1 Infinite Loop"),
//!     (Field::City, "Cupertino"),
//!     (Field::State, "CA"),
//!     (Field::ZipCode, "94016"),
//! ] {
//!     form.edit(field, value);
//! }
//! form.submit(&mut roster).unwrap();
//!
//! // A new roster over the same storage sees the record, as after a reload.
//! let reloaded = DurableRoster::new(storage, "employees");
//! assert_eq!(reloaded.records().len(), 1);
//! assert!(form.draft().is_empty());
//! ```

pub mod config;
pub mod draft;
pub mod employee;
pub mod error;
pub mod form;
pub mod id;
pub mod route;
pub mod states;
pub mod store;
pub mod table;

pub use config::{AppConfig, DEFAULT_STORAGE_KEY, PAGE_SIZES, Persistence, load_config};
pub use draft::{Choices, EmployeeDraft, FIELDS, Field, FieldDescriptor, FieldKind};
pub use employee::{Department, Employee, display_date, parse_iso_date};
pub use error::{ConfigError, DraftError, StoreError, SubmitError};
pub use form::{CONFIRMATION_MESSAGE, EmployeeForm, FormPhase};
pub use id::{Clock, IdGenerator, ManualClock, SystemClock};
pub use route::Route;
pub use states::{STATES, UsState};
pub use store::{
    DurableRoster, EphemeralRoster, FileStorage, MemoryStorage, Roster, Storage, open_roster,
};
pub use table::{COLUMNS, Column, SortDirection, TablePage, TableQuery, TableRow};
