//! Store abstraction for the inventory database.
//!
//! Two store kinds are supported: File (the default `Itam.db` on disk) and
//! Memory (volatile, discarded at exit; used for demos and tests).

use crate::core::broker::DbBroker;
use crate::core::db;
use crate::core::error::AssetOsError;
use crate::core::schemas;
use std::fs;
use std::path::{Path, PathBuf};

/// Store type discriminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    /// SQLite file on disk, audited to a JSONL log beside it.
    File,
    /// SQLite in-memory database, never audited.
    Memory,
}

/// Store handle describing where inventory state lives.
#[derive(Debug, Clone)]
pub struct Store {
    pub kind: StoreKind,
    /// Database file path; `:memory:` for in-memory stores.
    pub db_path: PathBuf,
}

/// How a store is brought up.
#[derive(Debug, Clone, Copy)]
pub struct OpenOptions {
    pub seed: bool,
    pub audit_log: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            seed: true,
            audit_log: true,
        }
    }
}

impl Store {
    pub fn file(db_path: impl Into<PathBuf>) -> Self {
        Self {
            kind: StoreKind::File,
            db_path: db_path.into(),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            kind: StoreKind::Memory,
            db_path: PathBuf::from(":memory:"),
        }
    }

    /// Audit log sits next to the database file.
    pub fn audit_log_path(&self) -> Option<PathBuf> {
        match self.kind {
            StoreKind::Memory => None,
            StoreKind::File => {
                let dir = self
                    .db_path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or(Path::new("."));
                Some(dir.join(schemas::AUDIT_LOG_NAME))
            }
        }
    }

    /// Connect, create the schema and (optionally) seed, returning the broker
    /// that owns the connection for the rest of the process.
    pub fn open(&self, options: OpenOptions) -> Result<DbBroker, AssetOsError> {
        let conn = match self.kind {
            StoreKind::Memory => db::db_connect_in_memory()?,
            StoreKind::File => {
                if let Some(parent) = self.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).map_err(AssetOsError::IoError)?;
                }
                db::db_connect(&self.db_path.to_string_lossy())?
            }
        };
        let audit_log_path = if options.audit_log {
            self.audit_log_path()
        } else {
            None
        };
        let db_id = match self.kind {
            StoreKind::Memory => ":memory:".to_string(),
            StoreKind::File => self
                .db_path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
        };

        let broker = DbBroker::new(conn, db_id, audit_log_path);
        broker.with_conn("store.init", |conn| {
            db::initialize_inventory_db(conn, options.seed)
        })?;
        // An audit log that cannot be written at startup is a configuration error.
        if let Some(e) = broker.take_audit_error() {
            return Err(e);
        }
        Ok(broker)
    }
}
