use assetos::core::broker::DbBroker;
use assetos::core::error::AssetOsError;
use assetos::core::store::{OpenOptions, Store};
use assetos::core::time;
use assetos::services::asset::{AssetService, AssetStatus, AssetType, NewAsset};
use assetos::services::user::{NewUser, UserService};
use chrono::{Days, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;
use tempfile::{TempDir, tempdir};

fn open_store(seed: bool) -> (TempDir, DbBroker) {
    let tmp = tempdir().unwrap();
    let store = Store::file(tmp.path().join("itam.db"));
    let broker = store
        .open(OpenOptions {
            seed,
            audit_log: true,
        })
        .unwrap();
    (tmp, broker)
}

fn add_user(broker: &DbBroker, name: &str) -> i64 {
    UserService::new(broker)
        .create(&NewUser {
            name: name.to_string(),
            email: format!("{}@company.com", name.to_lowercase().replace(' ', ".")),
            department: "IT".to_string(),
        })
        .unwrap()
        .id
}

#[test]
fn test_seeded_asset_joins_user_names() {
    let (_tmp, broker) = open_store(true);
    let assets = AssetService::new(&broker);

    let all = assets.list_all().unwrap();
    assert_eq!(all.len(), 1);
    let record = &all[0];
    assert_eq!(record.asset.id, 1);
    assert_eq!(record.asset.asset_tag, "LAP-1001");
    assert_eq!(record.asset.asset_type, AssetType::Laptop);
    assert_eq!(record.asset.status, AssetStatus::InUse);
    assert_eq!(
        record.asset.purchase_price,
        Decimal::from_str("1299.99").unwrap()
    );
    assert_eq!(
        record.asset.warranty_expiry,
        NaiveDate::from_ymd_opt(2026, 1, 15)
    );
    assert_eq!(record.assigned_user_name.as_deref(), Some("Bob Johnson"));
    assert_eq!(record.last_updated_by_name.as_deref(), Some("Alice Smith"));
}

#[test]
fn test_get_by_id_missing_is_none() {
    let (_tmp, broker) = open_store(true);
    let assets = AssetService::new(&broker);
    assert!(assets.get_by_id(1).unwrap().is_some());
    assert!(assets.get_by_id(404).unwrap().is_none());
}

#[test]
fn test_create_forces_available_and_stamps_time() {
    let (_tmp, broker) = open_store(false);
    let admin = add_user(&broker, "Alice Smith");
    let assets = AssetService::new(&broker);

    let mut new = NewAsset::new("SRV-01", AssetType::Server, admin);
    new.purchase_price = Decimal::from_str("4500.10").unwrap();
    let before = Utc::now() - Duration::seconds(1);

    let created = assets.create(&new).unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.status, AssetStatus::Available);
    assert!(created.last_updated >= before);
    assert_eq!(created.purchase_price.to_string(), "4500.10");
    assert_eq!(created.assigned_user_id, None);

    let second = assets
        .create(&NewAsset::new("SRV-02", AssetType::Server, admin))
        .unwrap();
    assert_eq!(second.id, 2);
    assert_eq!(assets.count().unwrap(), 2);
}

#[test]
fn test_create_rejects_unknown_last_updater() {
    let (_tmp, broker) = open_store(false);
    let assets = AssetService::new(&broker);

    let err = assets
        .create(&NewAsset::new("DSK-01", AssetType::Desktop, 77))
        .unwrap_err();
    assert!(matches!(err, AssetOsError::RusqliteError(_)), "{err}");
    assert_eq!(assets.count().unwrap(), 0);
}

#[test]
fn test_update_overwrites_and_refreshes_timestamp() {
    let (_tmp, broker) = open_store(true);
    let assets = AssetService::new(&broker);

    let original = assets.get_by_id(1).unwrap().unwrap().asset;
    let mut edited = original.clone();
    edited.status = AssetStatus::InRepair;
    edited.physical_location = "Repair Bench".to_string();
    edited.assigned_user_id = None;

    assert!(assets.update(&edited).unwrap());

    let stored = assets.get_by_id(1).unwrap().unwrap();
    assert_eq!(stored.asset.status, AssetStatus::InRepair);
    assert_eq!(stored.asset.physical_location, "Repair Bench");
    assert_eq!(stored.assigned_user_name, None);
    assert_eq!(stored.asset.asset_tag, original.asset_tag);
    assert_eq!(stored.asset.serial_number, original.serial_number);
    assert_eq!(stored.asset.purchase_date, original.purchase_date);
    assert_eq!(stored.asset.purchase_price, original.purchase_price);
    assert!(stored.asset.last_updated >= original.last_updated);
}

#[test]
fn test_update_missing_asset_reports_false() {
    let (_tmp, broker) = open_store(true);
    let assets = AssetService::new(&broker);

    let mut ghost = assets.get_by_id(1).unwrap().unwrap().asset;
    ghost.id = 99;
    assert!(!assets.update(&ghost).unwrap());
    assert_eq!(assets.count().unwrap(), 1);
}

#[test]
fn test_delete_missing_leaves_table_unchanged() {
    let (_tmp, broker) = open_store(true);
    let assets = AssetService::new(&broker);

    assert!(!assets.delete(42).unwrap());
    assert_eq!(assets.count().unwrap(), 1);

    assert!(assets.delete(1).unwrap());
    assert_eq!(assets.count().unwrap(), 0);
    assert!(!assets.delete(1).unwrap());
}

#[test]
fn test_warranty_window_against_fixed_day() {
    let (_tmp, broker) = open_store(false);
    let admin = add_user(&broker, "Alice Smith");
    let assets = AssetService::new(&broker);
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

    let create = |tag: &str, warranty: Option<NaiveDate>| {
        let mut new = NewAsset::new(tag, AssetType::Laptop, admin);
        new.warranty_expiry = warranty;
        assets.create(&new).unwrap();
    };
    create("EXPIRED", today.checked_sub_days(Days::new(10)));
    create("TODAY", Some(today));
    create("SOON", today.checked_add_days(Days::new(5)));
    create("LATER", today.checked_add_days(Days::new(40)));
    create("NO-WARRANTY", None);

    let tags = |days: i64| -> Vec<String> {
        assets
            .warranty_expiring_from(today, days)
            .unwrap()
            .into_iter()
            .map(|r| r.asset.asset_tag)
            .collect()
    };

    assert_eq!(tags(0), vec!["EXPIRED", "TODAY"]);
    assert_eq!(tags(5), vec!["EXPIRED", "TODAY", "SOON"]);
    assert_eq!(tags(30), vec!["EXPIRED", "TODAY", "SOON"]);
    assert_eq!(tags(40), vec!["EXPIRED", "TODAY", "SOON", "LATER"]);
    assert!(tags(-1).is_empty());
    assert!(tags(3650).iter().all(|t| t != "NO-WARRANTY"));
}

#[test]
fn test_warranty_window_with_huge_day_count_returns_every_dated_asset() {
    let (_tmp, broker) = open_store(true);
    let admin = add_user(&broker, "Carol White");
    let assets = AssetService::new(&broker);
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

    let mut far = NewAsset::new("SRV-FAR", AssetType::Server, admin);
    far.warranty_expiry = NaiveDate::from_ymd_opt(9999, 12, 31);
    assets.create(&far).unwrap();
    assets
        .create(&NewAsset::new("DSK-NONE", AssetType::Desktop, admin))
        .unwrap();

    let tags = |days: i64| -> Vec<String> {
        assets
            .warranty_expiring_from(today, days)
            .unwrap()
            .into_iter()
            .map(|r| r.asset.asset_tag)
            .collect()
    };
    assert_eq!(tags(36_500), vec!["LAP-1001"]);
    assert_eq!(tags(1_000_000_000), vec!["LAP-1001", "SRV-FAR"]);
    assert_eq!(tags(i64::MAX), vec!["LAP-1001", "SRV-FAR"]);
}

#[test]
fn test_warranty_window_uses_current_day() {
    let (_tmp, broker) = open_store(false);
    let admin = add_user(&broker, "Alice Smith");
    let assets = AssetService::new(&broker);

    let mut new = NewAsset::new("LAP-NEAR", AssetType::Laptop, admin);
    new.warranty_expiry = time::today_utc().checked_add_days(Days::new(20));
    assets.create(&new).unwrap();

    assert!(assets.warranty_expiring(5).unwrap().is_empty());
    let hits = assets.warranty_expiring(30).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].asset.asset_tag, "LAP-NEAR");
}
