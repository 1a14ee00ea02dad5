//! Browser `localStorage` behind the roster's storage port.

use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use hrnet::{AppConfig, Employee, Roster, Storage, StoreError, open_roster};
use wasm_bindgen::JsValue;

/// `window.localStorage`, looked up on every call so a disabled or missing
/// storage area becomes a [`StoreError`] instead of a panic.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn js_error(e: JsValue) -> StoreError {
    StoreError::Backend(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

fn local_storage() -> Result<web_sys::Storage, StoreError> {
    gloo::utils::window()
        .local_storage()
        .map_err(js_error)?
        .ok_or_else(|| StoreError::Backend("localStorage is not available".to_string()))
}

impl Storage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        local_storage()?.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        local_storage()?.set_item(key, value).map_err(js_error)
    }
}

/// Shared handle on the roster chosen at startup.
#[derive(Clone)]
pub struct RosterHandle(Rc<RefCell<Box<dyn Roster>>>);

impl RosterHandle {
    /// Durable rosters go to `localStorage`; ephemeral ones live as long as
    /// the page.
    pub fn open(config: &AppConfig) -> Self {
        let roster = open_roster(config.persistence, BrowserStorage, &config.storage_key);
        Self(Rc::new(RefCell::new(roster)))
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Box<dyn Roster>> {
        self.0.borrow_mut()
    }

    /// Read the collection once. Unreadable storage is logged to the
    /// console; whatever records still decode are shown.
    pub fn load(&self) -> Vec<Employee> {
        let roster = self.0.borrow();
        match roster.try_records() {
            Ok(records) => records,
            Err(e) => {
                gloo::console::warn!(format!("Ignoring stored employees: {e}"));
                roster.records()
            }
        }
    }
}

impl PartialEq for RosterHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
