use crate::core::error;
use crate::core::time;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// The DB Broker is the single owner of the inventory connection.
/// Every store operation runs through it and is appended to the audit log.
pub struct DbBroker {
    conn: Connection,
    db_id: String,
    audit_log_path: Option<PathBuf>,
    audit_error: RefCell<Option<error::AssetOsError>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BrokerEvent {
    pub ts: String,
    pub event_id: String,
    pub op: String,
    pub db_id: String,
    pub status: String,
}

impl DbBroker {
    pub fn new(conn: Connection, db_id: String, audit_log_path: Option<PathBuf>) -> Self {
        Self {
            conn,
            db_id,
            audit_log_path,
            audit_error: RefCell::new(None),
        }
    }

    pub fn audit_log_path(&self) -> Option<&Path> {
        self.audit_log_path.as_deref()
    }

    /// Execute a closure against the connection and record the outcome.
    ///
    /// The closure's result is returned as-is. A failed audit append never
    /// overrides it: the first such failure is held for [`Self::take_audit_error`].
    pub fn with_conn<F, R>(&self, op_name: &str, f: F) -> Result<R, error::AssetOsError>
    where
        F: FnOnce(&Connection) -> Result<R, error::AssetOsError>,
    {
        let result = f(&self.conn);

        let status = if result.is_ok() { "success" } else { "error" };
        if let Err(e) = self.log_event(op_name, status) {
            self.audit_error.borrow_mut().get_or_insert(e);
        }

        result
    }

    /// Pending audit-log failure since the last call, if any.
    pub fn take_audit_error(&self) -> Option<error::AssetOsError> {
        self.audit_error.borrow_mut().take()
    }

    fn log_event(&self, op: &str, status: &str) -> Result<(), error::AssetOsError> {
        let Some(path) = &self.audit_log_path else {
            return Ok(());
        };

        let ev = BrokerEvent {
            ts: time::now_epoch_z(),
            event_id: time::new_event_id(),
            op: op.to_string(),
            db_id: self.db_id.clone(),
            status: status.to_string(),
        };
        let line = serde_json::to_string(&ev).map_err(|e| {
            error::AssetOsError::ValidationError(format!("audit event encode failed: {}", e))
        })?;

        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(error::AssetOsError::IoError)?;

        writeln!(f, "{}", line).map_err(error::AssetOsError::IoError)?;
        Ok(())
    }
}

/// Read back every event in an audit log; a missing log reads as empty.
pub fn read_audit_log(path: &Path) -> Result<Vec<BrokerEvent>, error::AssetOsError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path).map_err(error::AssetOsError::IoError)?;
    content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            serde_json::from_str(l).map_err(|e| {
                error::AssetOsError::ValidationError(format!("malformed audit line: {}", e))
            })
        })
        .collect()
}
