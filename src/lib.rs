//! AssetOS: a console IT asset inventory.
//!
//! Tracks hardware assets (laptops, desktops, servers) and the employees
//! they are assigned to, through numbered menus over a local SQLite store.
//!
//! # Architecture
//!
//! Control flows top-down:
//!
//! - **Menu** (`managers::menu`): reads a selection and dispatches.
//! - **Managers** (`managers::asset`, `managers::user`): scripted prompts,
//!   input parsing, success/failure messages.
//! - **Services** (`services::asset`, `services::user`): list/get/create/
//!   update/delete plus the warranty window query.
//! - **Broker** (`core::broker`): sole owner of the SQLite connection; every
//!   operation is appended to `assetos.events.jsonl`.
//!
//! The store is opened once in [`run`] and borrowed by everything below it.
//!
//! # Examples
//!
//! ```bash
//! # Start with the default Itam.db in the working directory
//! assetos
//!
//! # Try it out without touching disk
//! assetos --in-memory
//! ```

pub mod cli;
pub mod core;
pub mod managers;
pub mod services;

use crate::cli::Cli;
use crate::core::broker::DbBroker;
use crate::core::config::AppConfig;
use crate::core::console::Console;
use crate::core::error::AssetOsError;
use crate::core::store::StoreKind;
use crate::core::tui::{BoxStyle, ItemStatus};
use crate::managers::asset::AssetManager;
use crate::managers::menu::MenuManager;
use crate::managers::user::UserManager;
use crate::services::asset::AssetService;
use crate::services::user::UserService;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::Path;

/// Combine config file, environment and flags into the effective configuration.
pub fn resolve_config<F>(cli: &Cli, dir: &Path, env: F) -> Result<AppConfig, AssetOsError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = AppConfig::load(cli.config.as_deref(), dir)?;
    config.apply_env(env)?;
    if let Some(db) = &cli.db {
        config.database = db.clone();
    }
    if cli.in_memory {
        config.in_memory = true;
    }
    if cli.no_seed {
        config.seed = false;
    }
    Ok(config)
}

/// Wire services and managers onto `broker` and run the menu loop on `console`.
pub fn run_session<R: BufRead, W: Write>(
    broker: &DbBroker,
    console: &mut Console<R, W>,
) -> Result<(), AssetOsError> {
    let asset_manager = AssetManager::new(AssetService::new(broker), UserService::new(broker));
    let user_manager = UserManager::new(UserService::new(broker));
    let menu = MenuManager::new(asset_manager, user_manager, broker);
    menu.run(console)
}

pub fn run() -> Result<(), AssetOsError> {
    let cli = Cli::parse();
    let current_dir = std::env::current_dir()?;
    let config = resolve_config(&cli, &current_dir, |k| std::env::var(k).ok())?;

    let store = config.store();
    let broker = store.open(config.open_options())?;

    let mut console = Console::stdio();
    let (style, location) = match store.kind {
        StoreKind::File => (
            BoxStyle::Info,
            format!("Database: {}", store.db_path.display()),
        ),
        StoreKind::Memory => (
            BoxStyle::Warning,
            "Database: in-memory (changes are discarded on exit)".to_string(),
        ),
    };
    console.banner("A S S E T O S", "IT Asset Management System", style)?;
    console.status(&location, ItemStatus::Info)?;

    run_session(&broker, &mut console)
}
