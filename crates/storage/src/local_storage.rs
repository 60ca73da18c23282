use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use gloo_storage::Storage as GlooStorage;
use stride_domain as domain;
use stride_web_app::log;

pub struct LocalStorage;

const KEY_LOG: &str = "log";
const MAX_LOG_ENTRIES: usize = 100;

impl domain::KeyValueRepository for LocalStorage {
    fn read_value(&self, key: &str) -> Result<Option<String>, domain::ReadError> {
        gloo_storage::LocalStorage::raw()
            .get_item(key)
            .map_err(|err| domain::ReadError::Storage(storage_error(&err)))
    }

    fn write_value(&self, key: &str, value: &str) -> Result<(), domain::WriteError> {
        gloo_storage::LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| domain::WriteError::Storage(storage_error(&err)))
    }

    fn delete_value(&self, key: &str) -> Result<(), domain::WriteError> {
        gloo_storage::LocalStorage::raw()
            .remove_item(key)
            .map_err(|err| domain::WriteError::Storage(storage_error(&err)))
    }
}

fn storage_error(err: &wasm_bindgen::JsValue) -> domain::StorageError {
    domain::StorageError::Other(
        err.as_string()
            .unwrap_or_else(|| format!("{err:?}"))
            .into(),
    )
}

/// Installs the logger with the persistent log kept in local storage.
///
/// # Errors
///
/// Returns an error if a logger has already been installed.
pub fn init_log() -> Result<(), ::log::SetLoggerError> {
    log::init(Arc::new(Mutex::new(LocalStorage)))
}

impl log::Repository for LocalStorage {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        match gloo_storage::LocalStorage::get(KEY_LOG) {
            Ok(entries) => Ok(entries),
            Err(err) => match err {
                gloo_storage::errors::StorageError::KeyNotFound(_) => Ok(VecDeque::new()),
                err => Err(err),
            },
        }
        .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(MAX_LOG_ENTRIES);
        gloo_storage::LocalStorage::set(KEY_LOG, entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}
