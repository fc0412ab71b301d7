//! Durable key-value settings backed by LMDB.
//!
//! Each value is stored as a JSON scalar under a UTF-8 key in a single named
//! database. Reads of absent keys return `None`; callers pick their own
//! defaults. A value of the wrong type is treated as absent.

use std::path::{Path, PathBuf};

use lmdb::{Database, DatabaseFlags, Environment, Transaction, WriteFlags};
use log::{info, warn};
use serde_json::Value as JsonValue;

use crate::app_response::AppResponse;

const SETTINGS_DB: &str = "settings";

/// Default LMDB map size: 10 MiB is far more than a few hundred scalar keys need.
pub const DEFAULT_MAP_SIZE: usize = 10 * 1024 * 1024;

pub struct Settings {
    env: Environment,
    db: Database,
    path: PathBuf,
}

impl Settings {
    /// Opens the settings environment at `path`, creating the directory on
    /// first use.
    pub fn open(path: impl AsRef<Path>, map_size: usize) -> Result<Self, AppResponse> {
        let path = path.as_ref().to_path_buf();
        std::fs::create_dir_all(&path)?;

        let env = Environment::new()
            .set_max_dbs(1)
            .set_map_size(map_size)
            .open(&path)?;
        let db = env.create_db(Some(SETTINGS_DB), DatabaseFlags::empty())?;

        info!("Opened settings store at {}", path.display());
        Ok(Self { env, db, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self, key: &str) -> Result<Option<JsonValue>, AppResponse> {
        let txn = self.env.begin_ro_txn()?;
        let value = match txn.get(self.db, &key) {
            Ok(bytes) => match serde_json::from_slice(bytes) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Ignoring undecodable value for '{key}': {e}");
                    None
                }
            },
            Err(lmdb::Error::NotFound) => None,
            Err(e) => return Err(e.into()),
        };
        txn.commit()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &JsonValue) -> Result<(), AppResponse> {
        let bytes = serde_json::to_vec(value)?;
        let mut txn = self.env.begin_rw_txn()?;
        txn.put(self.db, &key, &bytes, WriteFlags::empty())?;
        txn.commit()?;
        Ok(())
    }

    pub fn get_integer(&self, key: &str) -> Result<Option<i64>, AppResponse> {
        Ok(self.read(key)?.and_then(|value| match value.as_i64() {
            Some(i) => Some(i),
            None => {
                warn!("Setting '{key}' is not an integer: {value}");
                None
            }
        }))
    }

    pub fn set_integer(&self, key: &str, value: i64) -> Result<(), AppResponse> {
        self.write(key, &JsonValue::from(value))
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, AppResponse> {
        Ok(self.read(key)?.and_then(|value| match value.as_bool() {
            Some(b) => Some(b),
            None => {
                warn!("Setting '{key}' is not a boolean: {value}");
                None
            }
        }))
    }

    pub fn set_bool(&self, key: &str, value: bool) -> Result<(), AppResponse> {
        self.write(key, &JsonValue::from(value))
    }

    /// Deletes `key`. Returns whether it was present.
    pub fn remove(&self, key: &str) -> Result<bool, AppResponse> {
        let mut txn = self.env.begin_rw_txn()?;
        let removed = match txn.del(self.db, &key, None) {
            Ok(()) => true,
            Err(lmdb::Error::NotFound) => false,
            Err(e) => return Err(e.into()),
        };
        txn.commit()?;
        Ok(removed)
    }

    /// Deletes every key.
    pub fn clear(&self) -> Result<(), AppResponse> {
        let mut txn = self.env.begin_rw_txn()?;
        txn.clear_db(self.db)?;
        txn.commit()?;
        Ok(())
    }

    /// Flushes to disk and releases the environment.
    pub fn close(self) -> Result<(), AppResponse> {
        self.env.sync(true)?;
        info!("Closed settings store at {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_type_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::open(dir.path(), DEFAULT_MAP_SIZE).unwrap();

        settings.set_bool("flag", true).unwrap();
        settings.set_integer("count", 4).unwrap();

        assert_eq!(settings.get_integer("flag").unwrap(), None);
        assert_eq!(settings.get_bool("count").unwrap(), None);
        assert_eq!(settings.get_bool("flag").unwrap(), Some(true));
        assert_eq!(settings.get_integer("count").unwrap(), Some(4));
    }

    #[test]
    fn remove_reports_presence() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::open(dir.path(), DEFAULT_MAP_SIZE).unwrap();

        settings.set_integer("k", 1).unwrap();
        assert!(settings.remove("k").unwrap());
        assert!(!settings.remove("k").unwrap());
        assert_eq!(settings.get_integer("k").unwrap(), None);
    }

    #[test]
    fn clear_drops_every_key() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::open(dir.path(), DEFAULT_MAP_SIZE).unwrap();

        settings.set_integer("a", 1).unwrap();
        settings.set_bool("b", true).unwrap();
        settings.clear().unwrap();

        assert_eq!(settings.get_integer("a").unwrap(), None);
        assert_eq!(settings.get_bool("b").unwrap(), None);
    }
}
