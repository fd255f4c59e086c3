use crate::core::error;
use crate::core::schemas;
use crate::core::time;
use rusqlite::{Connection, OptionalExtension, params};

pub fn db_connect(db_path: &str) -> Result<Connection, error::AssetOsError> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))
        .map_err(error::AssetOsError::RusqliteError)?;
    conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))
        .map_err(error::AssetOsError::RusqliteError)?;
    conn.execute("PRAGMA foreign_keys=ON;", [])
        .map_err(error::AssetOsError::RusqliteError)?;
    Ok(conn)
}

pub fn db_connect_in_memory() -> Result<Connection, error::AssetOsError> {
    let conn = Connection::open_in_memory()?;
    conn.execute("PRAGMA foreign_keys=ON;", [])
        .map_err(error::AssetOsError::RusqliteError)?;
    Ok(conn)
}

/// Create tables and, when `seed` is set, load the starter dataset once.
///
/// The seed marker lives in `meta`, so a store whose seeded rows were later
/// deleted is never re-seeded.
pub fn initialize_inventory_db(conn: &Connection, seed: bool) -> Result<(), error::AssetOsError> {
    for stmt in schemas::all_statements() {
        conn.execute(stmt, []).map_err(|e| {
            error::AssetOsError::DatabaseInitializationError(format!("{}: {}", stmt.trim(), e))
        })?;
    }
    conn.execute(
        "INSERT OR IGNORE INTO meta(key, value) VALUES(?1, ?2)",
        params![
            schemas::META_KEY_SCHEMA_VERSION,
            schemas::SCHEMA_VERSION.to_string()
        ],
    )?;

    if seed && !is_seeded(conn)? {
        seed_inventory(conn)?;
    }
    Ok(())
}

pub fn is_seeded(conn: &Connection) -> Result<bool, error::AssetOsError> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM meta WHERE key = ?1",
            params![schemas::META_KEY_SEEDED],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value.is_some())
}

fn seed_inventory(conn: &Connection) -> Result<(), error::AssetOsError> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT OR IGNORE INTO users(id, name, email, department) VALUES(?1, ?2, ?3, ?4)",
        params![1, "Bob Johnson", "bob@company.com", "Engineering"],
    )?;
    tx.execute(
        "INSERT OR IGNORE INTO users(id, name, email, department) VALUES(?1, ?2, ?3, ?4)",
        params![2, "Alice Smith", "alice@company.com", "IT Support"],
    )?;
    tx.execute(
        "INSERT OR IGNORE INTO assets(
            id, asset_tag, serial_number, asset_type, manufacturer, model, cpu, ram, storage,
            site, physical_location, status, purchase_date, warranty_expiry, purchase_price,
            supplier, last_updated, assigned_user_id, last_updated_by_id
        ) VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
        params![
            1,
            "LAP-1001",
            "5CD92927XFL",
            "Laptop",
            "Dell",
            "Latitude 7420",
            "Intel i7-11800H",
            "16GB DDR4",
            "512GB NVMe SSD",
            "HQ - Floor 3",
            "Cubicle 4B",
            "InUse",
            "2023-01-15",
            "2026-01-15",
            "1299.99",
            "CDW",
            time::now_utc(),
            1,
            2
        ],
    )?;
    tx.execute(
        "INSERT OR REPLACE INTO meta(key, value) VALUES(?1, ?2)",
        params![schemas::META_KEY_SEEDED, time::now_epoch_z()],
    )?;
    tx.commit()?;
    Ok(())
}
