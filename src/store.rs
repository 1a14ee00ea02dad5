//! Persistence strategies connecting the form to the list.
//!
//! [`Storage`] is the string key-value port (browser `localStorage`, a
//! directory of files, or memory). A [`Roster`] owns the employee collection
//! and is either durable (one JSON array under one storage key) or ephemeral
//! (plain memory, gone on reload).
//!
//! The durable append is read-modify-write with no locking: two writers on
//! the same key lose updates, last writer wins.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde_json::Value;

use crate::config::Persistence;
use crate::employee::Employee;
use crate::error::StoreError;

/// String key-value storage.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory storage. Clones share the same map, so a clone handed to a
/// fresh roster behaves like the same browser storage after a reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a key, as if storage were cleared from outside the app.
    pub fn clear(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(StoreError::Backend(format!("invalid storage key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(path, value)?;
        Ok(())
    }
}

/// The employee collection as seen by the form (append) and list (read).
pub trait Roster {
    /// Every record, in insertion order. Never fails: unreadable storage
    /// yields an empty list.
    fn records(&self) -> Vec<Employee>;

    /// Like [`Roster::records`] but reports unreadable storage instead of
    /// hiding it.
    fn try_records(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.records())
    }

    /// Append one record at the end of the collection.
    fn append(&mut self, employee: Employee) -> Result<(), StoreError>;

    fn persistence(&self) -> Persistence;
}

/// Collection stored as a JSON array under one storage key.
#[derive(Debug, Clone)]
pub struct DurableRoster<S: Storage> {
    storage: S,
    key: String,
}

impl<S: Storage> DurableRoster<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The stored array with its elements undecoded. Absent key is an empty
    /// collection; anything but a JSON array is [`StoreError::Malformed`].
    pub fn read_values(&self) -> Result<Vec<Value>, StoreError> {
        match self.storage.get(&self.key)? {
            None => Ok(Vec::new()),
            Some(text) => serde_json::from_str(&text).map_err(StoreError::Malformed),
        }
    }

    /// Strict read: fails on the first element that is not an employee.
    pub fn read(&self) -> Result<Vec<Employee>, StoreError> {
        self.read_values()?
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                serde_json::from_value(value).map_err(|source| StoreError::Record { index, source })
            })
            .collect()
    }

    /// Replace the whole stored collection.
    pub fn write(&mut self, employees: &[Employee]) -> Result<(), StoreError> {
        let text = serde_json::to_string(employees).map_err(StoreError::Encode)?;
        self.storage.set(&self.key, &text)
    }

    fn write_values(&mut self, values: &[Value]) -> Result<(), StoreError> {
        let text = serde_json::to_string(values).map_err(StoreError::Encode)?;
        self.storage.set(&self.key, &text)
    }
}

impl<S: Storage> Roster for DurableRoster<S> {
    /// Elements that do not decode are skipped; the rest are returned.
    fn records(&self) -> Vec<Employee> {
        let values = match self.read_values() {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "ignoring unreadable employee collection");
                return Vec::new();
            }
        };
        let employees: Vec<Employee> = values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(employee) => Some(employee),
                Err(e) => {
                    tracing::warn!(key = %self.key, index, error = %e, "skipping unreadable employee");
                    None
                }
            })
            .collect();
        tracing::debug!(key = %self.key, count = employees.len(), "loaded employees");
        employees
    }

    fn try_records(&self) -> Result<Vec<Employee>, StoreError> {
        self.read()
    }

    /// Stored elements are written back untouched, including ones that do
    /// not decode. Only a value that is not an array at all is replaced.
    fn append(&mut self, employee: Employee) -> Result<(), StoreError> {
        let mut values = match self.read_values() {
            Ok(values) => values,
            Err(StoreError::Malformed(e)) => {
                tracing::warn!(key = %self.key, error = %e, "replacing unreadable employee collection");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        values.push(serde_json::to_value(&employee).map_err(StoreError::Encode)?);
        self.write_values(&values)?;
        tracing::debug!(key = %self.key, count = values.len(), "appended employee");
        Ok(())
    }

    fn persistence(&self) -> Persistence {
        Persistence::Durable
    }
}

/// Collection held in memory for the session only.
#[derive(Debug, Clone, Default)]
pub struct EphemeralRoster {
    employees: Vec<Employee>,
}

impl EphemeralRoster {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Roster for EphemeralRoster {
    fn records(&self) -> Vec<Employee> {
        self.employees.clone()
    }

    fn append(&mut self, employee: Employee) -> Result<(), StoreError> {
        self.employees.push(employee);
        Ok(())
    }

    fn persistence(&self) -> Persistence {
        Persistence::Ephemeral
    }
}

/// Pick the roster strategy once, at composition time.
///
/// `storage` is only used by the durable strategy.
pub fn open_roster<S>(persistence: Persistence, storage: S, key: &str) -> Box<dyn Roster>
where
    S: Storage + 'static,
{
    match persistence {
        Persistence::Durable => Box::new(DurableRoster::new(storage, key)),
        Persistence::Ephemeral => Box::new(EphemeralRoster::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::tests::ada_draft;
    use crate::employee::Department;

    const KEY: &str = "employees";

    fn employee(id: u64, first: &str) -> Employee {
        let mut e = ada_draft().finalize(Some(id), true).unwrap();
        e.first_name = first.to_string();
        e
    }

    #[test]
    fn test_absent_key_reads_empty() {
        let roster = DurableRoster::new(MemoryStorage::new(), KEY);
        assert!(roster.records().is_empty());
        assert!(roster.read().unwrap().is_empty());
    }

    #[test]
    fn test_append_onto_absent_key() {
        let storage = MemoryStorage::new();
        let mut roster = DurableRoster::new(storage.clone(), KEY);
        roster.append(employee(1, "Ada")).unwrap();

        let stored = storage.get(KEY).unwrap().unwrap();
        let parsed: Vec<Employee> = serde_json::from_str(&stored).unwrap();
        assert_eq!(parsed, vec![employee(1, "Ada")]);
    }

    #[test]
    fn test_malformed_json_reads_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(KEY, "{not json").unwrap();
        let roster = DurableRoster::new(storage, KEY);
        assert!(roster.records().is_empty());
        assert!(matches!(roster.read(), Err(StoreError::Malformed(_))));
        assert!(matches!(roster.try_records(), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn test_wrong_shape_reads_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(KEY, r#"{"firstName":"Ada"}"#).unwrap();
        assert!(DurableRoster::new(storage, KEY).records().is_empty());
    }

    #[test]
    fn test_append_after_malformed_starts_over() {
        let mut storage = MemoryStorage::new();
        storage.set(KEY, "[[[").unwrap();
        let mut roster = DurableRoster::new(storage, KEY);
        roster.append(employee(5, "Grace")).unwrap();
        assert_eq!(roster.records(), vec![employee(5, "Grace")]);
    }

    const LEGACY: &str = r#"[
        {"firstName":"Linus","lastName":"Torvalds","dateOfBirth":"1969-12-28","startDate":"","department":"engineering","street":"1 Kernel Way","city":"Portland","state":"OR","zipCode":"97201"},
        {"firstName":"Mary","lastName":"Barra","dateOfBirth":null,"startDate":null,"department":"Sales","street":"300 Renaissance Center","city":"Detroit","state":"MI","zipCode":"48243"},
        {"firstName":"Blank","lastName":"Dept","dateOfBirth":null,"startDate":null,"department":"","street":"","city":"","state":"","zipCode":""}
    ]"#;

    #[test]
    fn test_legacy_departments_survive_append() {
        let mut storage = MemoryStorage::new();
        storage.set(KEY, LEGACY).unwrap();
        let mut roster = DurableRoster::new(storage.clone(), KEY);
        assert_eq!(roster.records().len(), 3);

        let mut form = crate::form::EmployeeForm::with_clock(crate::id::ManualClock::new(7), true);
        for d in crate::draft::FIELDS {
            form.edit(d.field, ada_draft().value(d.field));
        }
        form.submit(&mut roster).unwrap();

        let rows = DurableRoster::new(storage, KEY).read().unwrap();
        let firsts: Vec<_> = rows.iter().map(|e| e.first_name.as_str()).collect();
        assert_eq!(firsts, ["Linus", "Mary", "Blank", "Ada"]);
        assert_eq!(rows[0].department, Department::Other("engineering".into()));
        assert_eq!(rows[1].department, Department::Sales);
        assert_eq!(rows[2].department, Department::Other(String::new()));
        assert_eq!(rows[3].department, Department::Engineering);
    }

    #[test]
    fn test_undecodable_element_kept_on_append() {
        let mut storage = MemoryStorage::new();
        let odd = r#"{"firstName":42}"#;
        let good = serde_json::to_string(&employee(1, "Ada")).unwrap();
        storage.set(KEY, &format!("[{good},{odd}]")).unwrap();

        let mut roster = DurableRoster::new(storage.clone(), KEY);
        assert_eq!(roster.records(), vec![employee(1, "Ada")]);
        assert!(matches!(
            roster.read(),
            Err(StoreError::Record { index: 1, .. })
        ));

        roster.append(employee(2, "Grace")).unwrap();
        let values = roster.read_values().unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values[1], serde_json::from_str::<Value>(odd).unwrap());
        assert_eq!(roster.records(), vec![employee(1, "Ada"), employee(2, "Grace")]);
    }

    #[test]
    fn test_append_refuses_when_storage_unreadable() {
        struct Unreadable(MemoryStorage);

        impl Storage for Unreadable {
            fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
                Err(StoreError::Backend("SecurityError".into()))
            }

            fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
                self.0.set(key, value)
            }
        }

        let mut inner = MemoryStorage::new();
        inner.set(KEY, "[]").unwrap();
        let mut roster = DurableRoster::new(Unreadable(inner.clone()), KEY);
        assert!(matches!(
            roster.append(employee(1, "Ada")),
            Err(StoreError::Backend(_))
        ));
        assert_eq!(inner.get(KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_durable_survives_reload_in_order() {
        let storage = MemoryStorage::new();
        let mut roster = DurableRoster::new(storage.clone(), KEY);
        let names = ["Ada", "Grace", "Edsger", "Barbara"];
        for (i, name) in names.iter().enumerate() {
            roster.append(employee(i as u64 + 1, name)).unwrap();
        }
        drop(roster);

        let reloaded = DurableRoster::new(storage, KEY);
        let firsts: Vec<_> = reloaded
            .records()
            .into_iter()
            .map(|e| e.first_name)
            .collect();
        assert_eq!(firsts, names);
    }

    #[test]
    fn test_external_clear_empties_collection() {
        let storage = MemoryStorage::new();
        let mut roster = DurableRoster::new(storage.clone(), KEY);
        roster.append(employee(1, "Ada")).unwrap();
        storage.clear(KEY);
        assert!(roster.records().is_empty());
    }

    #[test]
    fn test_keys_are_independent() {
        let storage = MemoryStorage::new();
        let mut a = DurableRoster::new(storage.clone(), "a");
        let b = DurableRoster::new(storage, "b");
        a.append(employee(1, "Ada")).unwrap();
        assert_eq!(a.records().len(), 1);
        assert!(b.records().is_empty());
    }

    #[test]
    fn test_ephemeral_lost_on_reload() {
        let mut roster = EphemeralRoster::new();
        roster.append(employee(1, "Ada")).unwrap();
        roster.append(employee(2, "Grace")).unwrap();
        assert_eq!(roster.records().len(), 2);
        assert_eq!(roster.try_records().unwrap().len(), 2);
        assert!(EphemeralRoster::new().records().is_empty());
    }

    #[test]
    fn test_open_roster_strategies() {
        let storage = MemoryStorage::new();
        let mut durable = open_roster(Persistence::Durable, storage.clone(), KEY);
        durable.append(employee(1, "Ada")).unwrap();
        assert_eq!(durable.persistence(), Persistence::Durable);
        assert!(storage.get(KEY).unwrap().is_some());

        let other = MemoryStorage::new();
        let mut ephemeral = open_roster(Persistence::Ephemeral, other.clone(), KEY);
        ephemeral.append(employee(2, "Grace")).unwrap();
        assert_eq!(ephemeral.records()[0].department, Department::Engineering);
        assert!(other.get(KEY).unwrap().is_none());
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested");
        let mut roster = DurableRoster::new(FileStorage::new(&data_dir), KEY);
        assert!(roster.records().is_empty());
        roster.append(employee(1, "Ada")).unwrap();
        assert!(data_dir.join("employees.json").exists());

        let reloaded = DurableRoster::new(FileStorage::new(&data_dir), KEY);
        assert_eq!(reloaded.records(), vec![employee(1, "Ada")]);
    }

    #[test]
    fn test_file_storage_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        assert!(matches!(
            storage.set("../escape", "[]"),
            Err(StoreError::Backend(_))
        ));
        assert!(storage.get("").is_err());
    }
}
