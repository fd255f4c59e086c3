//! Database schema definitions for the AssetOS inventory store.
//!
//! One SQLite database holds everything:
//! 1. users: employees that can hold or update assets.
//! 2. assets: tracked hardware, pointing at `users` twice.
//! 3. meta: key/value bookkeeping (seed marker, schema version).

pub const DEFAULT_DB_NAME: &str = "Itam.db";
pub const AUDIT_LOG_NAME: &str = "assetos.events.jsonl";
pub const SCHEMA_VERSION: u32 = 1;

pub const META_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )
";

pub const USERS_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL DEFAULT '',
        email TEXT NOT NULL DEFAULT '',
        department TEXT NOT NULL DEFAULT ''
    )
";

// assigned_user_id is cleared when the user goes away; last_updated_by_id
// pins the user until the asset is re-attributed or removed.
pub const ASSETS_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS assets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        asset_tag TEXT NOT NULL DEFAULT '',
        serial_number TEXT NOT NULL DEFAULT '',
        asset_type TEXT NOT NULL,
        manufacturer TEXT NOT NULL DEFAULT '',
        model TEXT NOT NULL DEFAULT '',
        cpu TEXT NOT NULL DEFAULT '',
        ram TEXT NOT NULL DEFAULT '',
        storage TEXT NOT NULL DEFAULT '',
        site TEXT NOT NULL DEFAULT '',
        physical_location TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL DEFAULT 'Available',
        purchase_date TEXT,
        warranty_expiry TEXT,
        purchase_price TEXT NOT NULL DEFAULT '0',
        supplier TEXT NOT NULL DEFAULT '',
        last_updated TEXT NOT NULL,
        assigned_user_id INTEGER,
        last_updated_by_id INTEGER NOT NULL,
        FOREIGN KEY(assigned_user_id) REFERENCES users(id) ON DELETE SET NULL,
        FOREIGN KEY(last_updated_by_id) REFERENCES users(id) ON DELETE RESTRICT
    )
";

pub const ASSETS_INDEX_ASSIGNED: &str =
    "CREATE INDEX IF NOT EXISTS idx_assets_assigned_user ON assets(assigned_user_id)";
pub const ASSETS_INDEX_UPDATED_BY: &str =
    "CREATE INDEX IF NOT EXISTS idx_assets_last_updated_by ON assets(last_updated_by_id)";
pub const ASSETS_INDEX_WARRANTY: &str =
    "CREATE INDEX IF NOT EXISTS idx_assets_warranty ON assets(warranty_expiry)";

pub const META_KEY_SEEDED: &str = "seeded";
pub const META_KEY_SCHEMA_VERSION: &str = "schema_version";

/// Every statement needed to bring an empty database up to date, in order.
pub fn all_statements() -> [&'static str; 6] {
    [
        META_SCHEMA,
        USERS_SCHEMA,
        ASSETS_SCHEMA,
        ASSETS_INDEX_ASSIGNED,
        ASSETS_INDEX_UPDATED_BY,
        ASSETS_INDEX_WARRANTY,
    ]
}
