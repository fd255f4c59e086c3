use assetos::cli::Cli;
use assetos::core::broker::read_audit_log;
use assetos::core::db;
use assetos::core::error::AssetOsError;
use assetos::core::schemas;
use assetos::core::store::{OpenOptions, Store, StoreKind};
use assetos::resolve_config;
use assetos::services::asset::AssetService;
use assetos::services::user::UserService;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_file_store_creates_db_and_audit_log() {
    let tmp = tempdir().unwrap();
    let db_path = tmp.path().join("nested").join("itam.db");
    let store = Store::file(&db_path);

    let broker = store.open(OpenOptions::default()).unwrap();
    assert!(db_path.exists());

    let log_path = store.audit_log_path().unwrap();
    assert_eq!(log_path, tmp.path().join("nested").join(schemas::AUDIT_LOG_NAME));
    assert_eq!(broker.audit_log_path(), Some(log_path.as_path()));

    AssetService::new(&broker).list_all().unwrap();
    let users = UserService::new(&broker);
    assert!(users.delete(2).is_err());

    let events = read_audit_log(&log_path).unwrap();
    let ops: Vec<(&str, &str)> = events
        .iter()
        .map(|e| (e.op.as_str(), e.status.as_str()))
        .collect();
    assert_eq!(
        ops,
        vec![
            ("store.init", "success"),
            ("asset.list", "success"),
            ("user.delete", "error"),
        ]
    );
    assert!(events.iter().all(|e| e.db_id == "itam.db"));
    assert!(events.iter().all(|e| e.ts.ends_with('Z')));
    assert_ne!(events[0].event_id, events[1].event_id);
}

#[test]
fn test_audit_failure_does_not_mask_committed_write() {
    let tmp = tempdir().unwrap();
    let store = Store::file(tmp.path().join("itam.db"));
    let broker = store.open(OpenOptions::default()).unwrap();
    let log_path = store.audit_log_path().unwrap();

    // Make the log unwritable by putting a directory in its place.
    fs::remove_file(&log_path).unwrap();
    fs::create_dir(&log_path).unwrap();

    let users = UserService::new(&broker);
    let created = users
        .create(&assetos::services::user::NewUser {
            name: "Carol White".to_string(),
            email: "carol@company.com".to_string(),
            department: "Finance".to_string(),
        })
        .unwrap();
    assert_eq!(created.id, 3);
    assert_eq!(users.count().unwrap(), 3);

    let pending = broker.take_audit_error().expect("audit failure is held");
    assert!(matches!(pending, AssetOsError::IoError(_)), "{pending}");
    assert!(broker.take_audit_error().is_none());
}

#[test]
fn test_open_fails_when_audit_log_is_unwritable() {
    let tmp = tempdir().unwrap();
    let store = Store::file(tmp.path().join("itam.db"));
    fs::create_dir(store.audit_log_path().unwrap()).unwrap();
    assert!(store.open(OpenOptions::default()).is_err());

    let broker = store
        .open(OpenOptions {
            seed: true,
            audit_log: false,
        })
        .unwrap();
    assert_eq!(UserService::new(&broker).count().unwrap(), 2);
}

#[test]
fn test_audit_log_can_be_disabled() {
    let tmp = tempdir().unwrap();
    let store = Store::file(tmp.path().join("itam.db"));
    let broker = store
        .open(OpenOptions {
            seed: true,
            audit_log: false,
        })
        .unwrap();
    assert_eq!(broker.audit_log_path(), None);
    UserService::new(&broker).list_all().unwrap();
    assert!(read_audit_log(&tmp.path().join(schemas::AUDIT_LOG_NAME))
        .unwrap()
        .is_empty());
}

#[test]
fn test_memory_store_is_not_audited() {
    let store = Store::in_memory();
    assert_eq!(store.kind, StoreKind::Memory);
    assert_eq!(store.audit_log_path(), None);
    let broker = store.open(OpenOptions::default()).unwrap();
    assert_eq!(broker.audit_log_path(), None);
    assert_eq!(UserService::new(&broker).count().unwrap(), 2);
}

#[test]
fn test_connection_enforces_foreign_keys() {
    let tmp = tempdir().unwrap();
    let conn = db::db_connect(&tmp.path().join("fk.db").to_string_lossy()).unwrap();
    let fk: i64 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);

    let mem = db::db_connect_in_memory().unwrap();
    let fk: i64 = mem
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn test_seed_is_applied_only_once() {
    let tmp = tempdir().unwrap();
    let store = Store::file(tmp.path().join("itam.db"));

    {
        let broker = store.open(OpenOptions::default()).unwrap();
        let assets = AssetService::new(&broker);
        assert_eq!(assets.count().unwrap(), 1);
        assert!(assets.delete(1).unwrap());
        assert!(UserService::new(&broker).delete(1).unwrap());
    }

    let broker = store.open(OpenOptions::default()).unwrap();
    assert_eq!(AssetService::new(&broker).count().unwrap(), 0);
    let users = UserService::new(&broker).list_all().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Alice Smith");
}

#[test]
fn test_unseeded_store_stays_empty_until_seeded() {
    let conn = db::db_connect_in_memory().unwrap();
    db::initialize_inventory_db(&conn, false).unwrap();
    assert!(!db::is_seeded(&conn).unwrap());

    db::initialize_inventory_db(&conn, true).unwrap();
    assert!(db::is_seeded(&conn).unwrap());
    let users: i64 = conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .unwrap();
    assert_eq!(users, 2);

    // Re-running is idempotent.
    db::initialize_inventory_db(&conn, true).unwrap();
    let assets: i64 = conn
        .query_row("SELECT COUNT(*) FROM assets", [], |row| row.get(0))
        .unwrap();
    assert_eq!(assets, 1);
}

#[test]
fn test_config_precedence() {
    let tmp = tempdir().unwrap();
    fs::write(
        tmp.path().join("assetos.toml"),
        "database = \"from-file.db\"\nseed = false\n",
    )
    .unwrap();

    let no_env = |_: &str| None;
    let cfg = resolve_config(&Cli::default(), tmp.path(), no_env).unwrap();
    assert_eq!(cfg.database, PathBuf::from("from-file.db"));
    assert!(!cfg.seed);
    assert!(!cfg.in_memory);

    let env: HashMap<&str, &str> = [("ASSETOS_DB", "from-env.db")].into_iter().collect();
    let lookup = |k: &str| env.get(k).map(|v| v.to_string());
    let cfg = resolve_config(&Cli::default(), tmp.path(), lookup).unwrap();
    assert_eq!(cfg.database, PathBuf::from("from-env.db"));

    let cli = Cli {
        db: Some(PathBuf::from("from-flag.db")),
        in_memory: true,
        ..Cli::default()
    };
    let cfg = resolve_config(&cli, tmp.path(), lookup).unwrap();
    assert_eq!(cfg.database, PathBuf::from("from-flag.db"));
    assert!(cfg.in_memory);
    assert_eq!(cfg.store().kind, StoreKind::Memory);
}

#[test]
fn test_config_flag_and_errors() {
    let tmp = tempdir().unwrap();
    let custom = tmp.path().join("custom.toml");
    fs::write(&custom, "in_memory = true\naudit_log = false\n").unwrap();

    let cli = Cli {
        config: Some(custom),
        no_seed: true,
        ..Cli::default()
    };
    let cfg = resolve_config(&cli, tmp.path(), |_| None).unwrap();
    assert!(cfg.in_memory);
    assert!(!cfg.open_options().audit_log);
    assert!(!cfg.open_options().seed);

    fs::write(tmp.path().join("assetos.toml"), "colour = \"blue\"\n").unwrap();
    let err = resolve_config(&Cli::default(), tmp.path(), |_| None).unwrap_err();
    assert!(matches!(err, AssetOsError::ConfigError(_)));

    let missing = Cli {
        config: Some(tmp.path().join("absent.toml")),
        ..Cli::default()
    };
    assert!(resolve_config(&missing, tmp.path(), |_| None).is_err());
}
