//! User data access.

use crate::core::broker::DbBroker;
use crate::core::error::AssetOsError;
use rusqlite::{Connection, OptionalExtension, Row, params};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub department: String,
}

/// Minimal asset reference used when listing a user's holdings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    pub id: i64,
    pub asset_tag: String,
}

/// Assets currently assigned to a user and assets they last updated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserAssets {
    pub assigned: Vec<AssetRef>,
    pub updated: Vec<AssetRef>,
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        department: row.get(3)?,
    })
}

fn fetch_user(conn: &Connection, id: i64) -> Result<Option<User>, AssetOsError> {
    let user = conn
        .query_row(
            "SELECT id, name, email, department FROM users WHERE id = ?1",
            params![id],
            user_from_row,
        )
        .optional()?;
    Ok(user)
}

fn asset_refs(conn: &Connection, column: &str, user_id: i64) -> Result<Vec<AssetRef>, AssetOsError> {
    let sql = format!(
        "SELECT id, asset_tag FROM assets WHERE {} = ?1 ORDER BY id",
        column
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], |row| {
        Ok(AssetRef {
            id: row.get(0)?,
            asset_tag: row.get(1)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub struct UserService<'a> {
    broker: &'a DbBroker,
}

impl<'a> UserService<'a> {
    pub fn new(broker: &'a DbBroker) -> Self {
        Self { broker }
    }

    pub fn list_all(&self) -> Result<Vec<User>, AssetOsError> {
        self.broker.with_conn("user.list", |conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, email, department FROM users ORDER BY id")?;
            let rows = stmt.query_map([], user_from_row)?;
            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        })
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<User>, AssetOsError> {
        self.broker.with_conn("user.get", |conn| fetch_user(conn, id))
    }

    pub fn create(&self, new: &NewUser) -> Result<User, AssetOsError> {
        self.broker.with_conn("user.create", |conn| {
            conn.execute(
                "INSERT INTO users(name, email, department) VALUES(?1, ?2, ?3)",
                params![new.name, new.email, new.department],
            )?;
            Ok(User {
                id: conn.last_insert_rowid(),
                name: new.name.clone(),
                email: new.email.clone(),
                department: new.department.clone(),
            })
        })
    }

    /// Returns whether a row was affected.
    pub fn update(&self, user: &User) -> Result<bool, AssetOsError> {
        self.broker.with_conn("user.update", |conn| {
            let changed = conn.execute(
                "UPDATE users SET name = ?1, email = ?2, department = ?3 WHERE id = ?4",
                params![user.name, user.email, user.department, user.id],
            )?;
            Ok(changed > 0)
        })
    }

    /// Remove a user. Assets assigned to them become unassigned; a user still
    /// recorded as last updater of any asset cannot be removed.
    pub fn delete(&self, id: i64) -> Result<bool, AssetOsError> {
        self.broker.with_conn("user.delete", |conn| {
            if fetch_user(conn, id)?.is_none() {
                return Ok(false);
            }
            let pinned: i64 = conn.query_row(
                "SELECT COUNT(*) FROM assets WHERE last_updated_by_id = ?1",
                params![id],
                |row| row.get(0),
            )?;
            if pinned > 0 {
                return Err(AssetOsError::UserInUse { id, assets: pinned });
            }
            let removed = conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
            Ok(removed > 0)
        })
    }

    pub fn assets_for_user(&self, id: i64) -> Result<UserAssets, AssetOsError> {
        self.broker.with_conn("user.assets", |conn| {
            Ok(UserAssets {
                assigned: asset_refs(conn, "assigned_user_id", id)?,
                updated: asset_refs(conn, "last_updated_by_id", id)?,
            })
        })
    }

    pub fn count(&self) -> Result<i64, AssetOsError> {
        self.broker.with_conn("user.count", |conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?)
        })
    }
}
