//! Asset data access: typed rows, user-name joins and the warranty window query.

use crate::core::broker::DbBroker;
use crate::core::error::AssetOsError;
use crate::core::time;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Type, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Laptop,
    Desktop,
    Server,
}

impl AssetType {
    /// Menu order: entry `n` on screen is `ALL[n - 1]`.
    pub const ALL: [AssetType; 3] = [AssetType::Laptop, AssetType::Desktop, AssetType::Server];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Laptop => "Laptop",
            AssetType::Desktop => "Desktop",
            AssetType::Server => "Server",
        }
    }

    pub fn from_menu_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    InUse,
    Available,
    InRepair,
    Retired,
}

impl AssetStatus {
    /// Menu order: entry `n` on screen is `ALL[n - 1]`.
    pub const ALL: [AssetStatus; 4] = [
        AssetStatus::InUse,
        AssetStatus::Available,
        AssetStatus::InRepair,
        AssetStatus::Retired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::InUse => "InUse",
            AssetStatus::Available => "Available",
            AssetStatus::InRepair => "InRepair",
            AssetStatus::Retired => "Retired",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssetStatus::InUse => "In Use",
            AssetStatus::Available => "Available",
            AssetStatus::InRepair => "In Repair",
            AssetStatus::Retired => "Retired",
        }
    }

    pub fn from_menu_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AssetType {
    type Err = AssetOsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AssetOsError::ValidationError(format!("unknown asset type '{}'", s)))
    }
}

impl FromStr for AssetStatus {
    type Err = AssetOsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AssetOsError::ValidationError(format!("unknown asset status '{}'", s)))
    }
}

impl ToSql for AssetType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for AssetType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: AssetOsError| FromSqlError::Other(Box::new(e)))
    }
}

impl ToSql for AssetStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for AssetStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: AssetOsError| FromSqlError::Other(Box::new(e)))
    }
}

/// A stored asset. User references are plain ids; names are joined on read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub id: i64,
    pub asset_tag: String,
    pub serial_number: String,
    pub asset_type: AssetType,
    pub manufacturer: String,
    pub model: String,
    pub cpu: String,
    pub ram: String,
    pub storage: String,
    pub site: String,
    pub physical_location: String,
    pub status: AssetStatus,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    pub purchase_price: Decimal,
    pub supplier: String,
    pub last_updated: DateTime<Utc>,
    pub assigned_user_id: Option<i64>,
    pub last_updated_by_id: i64,
}

/// Input for `AssetService::create`. New assets always start Available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAsset {
    pub asset_tag: String,
    pub serial_number: String,
    pub asset_type: AssetType,
    pub manufacturer: String,
    pub model: String,
    pub cpu: String,
    pub ram: String,
    pub storage: String,
    pub site: String,
    pub physical_location: String,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    pub purchase_price: Decimal,
    pub supplier: String,
    pub assigned_user_id: Option<i64>,
    pub last_updated_by_id: i64,
}

impl NewAsset {
    pub fn new(asset_tag: &str, asset_type: AssetType, last_updated_by_id: i64) -> Self {
        Self {
            asset_tag: asset_tag.to_string(),
            serial_number: String::new(),
            asset_type,
            manufacturer: String::new(),
            model: String::new(),
            cpu: String::new(),
            ram: String::new(),
            storage: String::new(),
            site: String::new(),
            physical_location: String::new(),
            purchase_date: None,
            warranty_expiry: None,
            purchase_price: Decimal::ZERO,
            supplier: String::new(),
            assigned_user_id: None,
            last_updated_by_id,
        }
    }
}

/// An asset with the display names of the users it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    pub asset: Asset,
    pub assigned_user_name: Option<String>,
    pub last_updated_by_name: Option<String>,
}

const RECORD_SELECT: &str = "
    SELECT a.id, a.asset_tag, a.serial_number, a.asset_type, a.manufacturer, a.model,
           a.cpu, a.ram, a.storage, a.site, a.physical_location, a.status,
           a.purchase_date, a.warranty_expiry, a.purchase_price, a.supplier,
           a.last_updated, a.assigned_user_id, a.last_updated_by_id,
           au.name, lu.name
    FROM assets a
    LEFT JOIN users au ON au.id = a.assigned_user_id
    LEFT JOIN users lu ON lu.id = a.last_updated_by_id
";

fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(raw.trim())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<AssetRecord> {
    Ok(AssetRecord {
        asset: Asset {
            id: row.get(0)?,
            asset_tag: row.get(1)?,
            serial_number: row.get(2)?,
            asset_type: row.get(3)?,
            manufacturer: row.get(4)?,
            model: row.get(5)?,
            cpu: row.get(6)?,
            ram: row.get(7)?,
            storage: row.get(8)?,
            site: row.get(9)?,
            physical_location: row.get(10)?,
            status: row.get(11)?,
            purchase_date: row.get(12)?,
            warranty_expiry: row.get(13)?,
            purchase_price: decimal_column(row, 14)?,
            supplier: row.get(15)?,
            last_updated: row.get(16)?,
            assigned_user_id: row.get(17)?,
            last_updated_by_id: row.get(18)?,
        },
        assigned_user_name: row.get(19)?,
        last_updated_by_name: row.get(20)?,
    })
}

fn fetch_record(conn: &Connection, id: i64) -> Result<Option<AssetRecord>, AssetOsError> {
    let sql = format!("{} WHERE a.id = ?1", RECORD_SELECT);
    let record = conn
        .query_row(&sql, params![id], record_from_row)
        .optional()?;
    Ok(record)
}

fn asset_exists(conn: &Connection, id: i64) -> Result<bool, AssetOsError> {
    let found: Option<i64> = conn
        .query_row("SELECT id FROM assets WHERE id = ?1", params![id], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(found.is_some())
}

pub struct AssetService<'a> {
    broker: &'a DbBroker,
}

impl<'a> AssetService<'a> {
    pub fn new(broker: &'a DbBroker) -> Self {
        Self { broker }
    }

    pub fn list_all(&self) -> Result<Vec<AssetRecord>, AssetOsError> {
        self.broker.with_conn("asset.list", |conn| {
            let sql = format!("{} ORDER BY a.id", RECORD_SELECT);
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], record_from_row)?;
            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        })
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<AssetRecord>, AssetOsError> {
        self.broker
            .with_conn("asset.get", |conn| fetch_record(conn, id))
    }

    /// Insert a new asset. Status is forced to Available and `last_updated` to now.
    pub fn create(&self, new: &NewAsset) -> Result<Asset, AssetOsError> {
        self.broker.with_conn("asset.create", |conn| {
            conn.execute(
                "INSERT INTO assets(
                    asset_tag, serial_number, asset_type, manufacturer, model, cpu, ram, storage,
                    site, physical_location, status, purchase_date, warranty_expiry,
                    purchase_price, supplier, last_updated, assigned_user_id, last_updated_by_id
                ) VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
                params![
                    new.asset_tag,
                    new.serial_number,
                    new.asset_type,
                    new.manufacturer,
                    new.model,
                    new.cpu,
                    new.ram,
                    new.storage,
                    new.site,
                    new.physical_location,
                    AssetStatus::Available,
                    new.purchase_date,
                    new.warranty_expiry,
                    new.purchase_price.to_string(),
                    new.supplier,
                    time::now_utc(),
                    new.assigned_user_id,
                    new.last_updated_by_id,
                ],
            )?;
            let id = conn.last_insert_rowid();
            fetch_record(conn, id)?
                .map(|r| r.asset)
                .ok_or_else(|| AssetOsError::NotFound(format!("asset {} vanished after insert", id)))
        })
    }

    /// Overwrite every mutable field of `asset.id` and refresh `last_updated`.
    ///
    /// Returns false when the asset does not exist (or disappeared before the write).
    pub fn update(&self, asset: &Asset) -> Result<bool, AssetOsError> {
        self.broker.with_conn("asset.update", |conn| {
            if !asset_exists(conn, asset.id)? {
                return Ok(false);
            }
            let changed = conn.execute(
                "UPDATE assets SET
                    asset_tag = ?1, serial_number = ?2, asset_type = ?3, manufacturer = ?4,
                    model = ?5, cpu = ?6, ram = ?7, storage = ?8, site = ?9,
                    physical_location = ?10, status = ?11, purchase_date = ?12,
                    warranty_expiry = ?13, purchase_price = ?14, supplier = ?15,
                    last_updated = ?16, assigned_user_id = ?17, last_updated_by_id = ?18
                 WHERE id = ?19",
                params![
                    asset.asset_tag,
                    asset.serial_number,
                    asset.asset_type,
                    asset.manufacturer,
                    asset.model,
                    asset.cpu,
                    asset.ram,
                    asset.storage,
                    asset.site,
                    asset.physical_location,
                    asset.status,
                    asset.purchase_date,
                    asset.warranty_expiry,
                    asset.purchase_price.to_string(),
                    asset.supplier,
                    time::now_utc(),
                    asset.assigned_user_id,
                    asset.last_updated_by_id,
                    asset.id,
                ],
            )?;
            Ok(changed > 0)
        })
    }

    pub fn delete(&self, id: i64) -> Result<bool, AssetOsError> {
        self.broker.with_conn("asset.delete", |conn| {
            if !asset_exists(conn, id)? {
                return Ok(false);
            }
            let removed = conn.execute("DELETE FROM assets WHERE id = ?1", params![id])?;
            Ok(removed > 0)
        })
    }

    /// Assets whose warranty ends on or before `days` from today.
    ///
    /// Zero returns assets already expired or expiring today; a negative
    /// window returns nothing. Assets without a warranty date never match.
    pub fn warranty_expiring(&self, days: i64) -> Result<Vec<AssetRecord>, AssetOsError> {
        self.warranty_expiring_from(time::today_utc(), days)
    }

    pub fn warranty_expiring_from(
        &self,
        today: NaiveDate,
        days: i64,
    ) -> Result<Vec<AssetRecord>, AssetOsError> {
        let Some(cutoff) = time::window_cutoff(today, days) else {
            return Ok(Vec::new());
        };
        self.broker.with_conn("asset.warranty_expiring", |conn| {
            let sql = format!(
                "{} WHERE a.warranty_expiry IS NOT NULL AND a.warranty_expiry <= ?1
                 ORDER BY a.warranty_expiry, a.id",
                RECORD_SELECT
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![cutoff], record_from_row)?;
            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        })
    }

    pub fn count(&self) -> Result<i64, AssetOsError> {
        self.broker.with_conn("asset.count", |conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM assets", [], |row| row.get(0))?)
        })
    }
}
