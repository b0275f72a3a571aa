//! Persistence for the employee collection.
//!
//! A [`KeyValueStore`] is the client-local string store (named slots holding
//! text). [`EmployeeSlot`] layers the JSON-encoded collection over one slot of
//! it and is what the list controller talks to through [`EmployeeStore`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, error, warn};

use crate::employee::Employee;
use crate::error::{StorageError, StorageResult};

/// Named string slots, local to this client.
pub trait KeyValueStore {
    /// Returns `None` when the slot has never been written.
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// The collection as seen by a list controller.
pub trait EmployeeStore {
    /// Absent or malformed content loads as an empty collection.
    fn load(&self) -> Vec<Employee>;
    fn save(&self, employees: &[Employee]) -> StorageResult<()>;
}

impl<S: EmployeeStore + ?Sized> EmployeeStore for Rc<S> {
    fn load(&self) -> Vec<Employee> {
        (**self).load()
    }

    fn save(&self, employees: &[Employee]) -> StorageResult<()> {
        (**self).save(employees)
    }
}

/// In-process slots; nothing outlives the value.
#[derive(Debug, Default)]
pub struct MemoryKv {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<slot>.json` file per slot under a root directory.
#[derive(Clone, Debug)]
pub struct FileKv {
    root: PathBuf,
}

impl FileKv {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileKv {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.slot_path(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "storage slot unreadable; treating as absent");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let write_err = |source| StorageError::Write {
            slot: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.root).map_err(write_err)?;
        let path = self.slot_path(key);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value).map_err(write_err)?;
        fs::rename(&staging, &path).map_err(write_err)?;
        Ok(())
    }
}

/// The employee collection stored as a JSON array under one named slot.
#[derive(Debug)]
pub struct EmployeeSlot<K> {
    backend: K,
    slot: String,
}

impl<K: KeyValueStore> EmployeeSlot<K> {
    pub fn new(backend: K, slot: impl Into<String>) -> Self {
        Self {
            backend,
            slot: slot.into(),
        }
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn backend(&self) -> &K {
        &self.backend
    }

    /// Slot that receives the raw text of a slot that failed to decode.
    pub fn unreadable_slot(&self) -> String {
        format!("{}.unreadable", self.slot)
    }
}

impl<K: KeyValueStore> EmployeeStore for EmployeeSlot<K> {
    fn load(&self) -> Vec<Employee> {
        let Some(raw) = self.backend.get(&self.slot) else {
            debug!(slot = %self.slot, "storage slot absent; starting empty");
            return Vec::new();
        };
        match serde_json::from_str::<Vec<Employee>>(&raw) {
            Ok(employees) => {
                debug!(slot = %self.slot, count = employees.len(), "loaded employees");
                employees
            }
            Err(err) => {
                let kept = self.unreadable_slot();
                error!(
                    slot = %self.slot,
                    kept_in = %kept,
                    error = %err,
                    "malformed storage slot; starting empty, the next save replaces it"
                );
                if let Err(err) = self.backend.set(&kept, &raw) {
                    warn!(slot = %kept, error = %err, "could not keep unreadable slot contents");
                }
                Vec::new()
            }
        }
    }

    fn save(&self, employees: &[Employee]) -> StorageResult<()> {
        let encoded = serde_json::to_string(employees).map_err(|source| StorageError::Encode {
            slot: self.slot.clone(),
            source,
        })?;
        self.backend.set(&self.slot, &encoded)?;
        debug!(slot = %self.slot, count = employees.len(), "saved employees");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::EmployeeId;
    use crate::employee::tests::fields;

    #[test]
    fn absent_slot_loads_empty() {
        let store = EmployeeSlot::new(MemoryKv::new(), "employees");
        assert!(store.load().is_empty());
    }

    #[test]
    fn malformed_slot_loads_empty() {
        let kv = MemoryKv::new();
        kv.set("employees", "{not json").unwrap();
        let store = EmployeeSlot::new(kv, "employees");
        assert!(store.load().is_empty());
    }

    #[test]
    fn undecodable_contents_are_kept_before_the_next_save() {
        let raw = r#"[{"id":"1","firstName":"Ada","lastName":"Lovelace",
            "dateOfEmployment":"2024-01-01","dateOfBirth":"1990-01-01",
            "phone":"+90 530 123 45 67","email":"ada@example.com",
            "department":"tech","position":"Senior"}]"#;
        let kv = MemoryKv::new();
        kv.set("employees", raw).unwrap();
        let store = EmployeeSlot::new(kv, "employees");

        assert!(store.load().is_empty());
        assert_eq!(store.unreadable_slot(), "employees.unreadable");
        store
            .save(&[fields("Alan", "Turing").into_employee(EmployeeId::new("2"))])
            .unwrap();
        assert_eq!(store.backend().get("employees.unreadable").as_deref(), Some(raw));
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn empty_array_text_loads_empty() {
        let kv = MemoryKv::new();
        kv.set("employees", "[]").unwrap();
        assert!(EmployeeSlot::new(kv, "employees").load().is_empty());
    }

    #[test]
    fn saved_collection_reads_back_in_order() {
        let store = EmployeeSlot::new(MemoryKv::new(), "employees");
        let employees = vec![
            fields("Ada", "Lovelace").into_employee(EmployeeId::new("1")),
            fields("Alan", "Turing").into_employee(EmployeeId::new("2")),
        ];
        store.save(&employees).unwrap();
        assert_eq!(store.load(), employees);
    }

    #[test]
    fn slots_are_independent() {
        let kv = MemoryKv::new();
        kv.set("other", "[]").unwrap();
        assert_eq!(kv.get("employees"), None);
        assert_eq!(kv.get("other").as_deref(), Some("[]"));
    }

    #[test]
    fn reads_records_written_by_hand() {
        let kv = MemoryKv::new();
        kv.set(
            "employees",
            r#"[{"id":"1714000000000","firstName":"John","lastName":"Doe",
                "dateOfEmployment":"2024-01-01","dateOfBirth":"1990-01-01",
                "phone":"+90 530 123 45 67","email":"john.doe@example.com",
                "department":"Tech","position":"Senior"}]"#,
        )
        .unwrap();
        let loaded = EmployeeSlot::new(kv, "employees").load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id.as_str(), "1714000000000");
        assert_eq!(loaded[0].full_name(), "John Doe");
    }
}
