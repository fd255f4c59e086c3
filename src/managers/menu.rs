//! Menu state machine: Main, Asset and User menus.
//!
//! Every menu reads one line and dispatches. Bad input re-shows the same
//! menu; only Exit (or closed input) leaves the main loop.

use crate::core::broker::DbBroker;
use crate::core::console::Console;
use crate::core::error::AssetOsError;
use crate::core::output;
use crate::core::tui::ItemStatus;
use crate::managers::asset::AssetManager;
use crate::managers::input;
use crate::managers::user::UserManager;
use std::io::{self, BufRead, Write};

pub const FAREWELL: &str = "Thank you for using AssetOS!";
const INVALID_OPTION: &str = "Invalid option. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Assets,
    Users,
    WarrantyReport,
    Exit,
}

impl MainChoice {
    pub const ALL: [MainChoice; 4] = [
        MainChoice::Assets,
        MainChoice::Users,
        MainChoice::WarrantyReport,
        MainChoice::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MainChoice::Assets => "Asset Management",
            MainChoice::Users => "User Management",
            MainChoice::WarrantyReport => "Warranty Expiry Report",
            MainChoice::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetChoice {
    Add,
    UpdateEntire,
    UpdateField,
    Delete,
    List,
    View,
    Back,
}

impl AssetChoice {
    pub const ALL: [AssetChoice; 7] = [
        AssetChoice::Add,
        AssetChoice::UpdateEntire,
        AssetChoice::UpdateField,
        AssetChoice::Delete,
        AssetChoice::List,
        AssetChoice::View,
        AssetChoice::Back,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AssetChoice::Add => "Add New Asset",
            AssetChoice::UpdateEntire => "Update Entire Asset",
            AssetChoice::UpdateField => "Update Specific Asset Info",
            AssetChoice::Delete => "Delete Asset",
            AssetChoice::List => "List All Assets",
            AssetChoice::View => "View Asset Details",
            AssetChoice::Back => "Return to Main Menu",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserChoice {
    Add,
    Update,
    Delete,
    List,
    View,
    Back,
}

impl UserChoice {
    pub const ALL: [UserChoice; 6] = [
        UserChoice::Add,
        UserChoice::Update,
        UserChoice::Delete,
        UserChoice::List,
        UserChoice::View,
        UserChoice::Back,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            UserChoice::Add => "Add New User",
            UserChoice::Update => "Update User",
            UserChoice::Delete => "Delete User",
            UserChoice::List => "List All Users",
            UserChoice::View => "View User Details",
            UserChoice::Back => "Return to Main Menu",
        }
    }
}

/// Resolve a typed selection against a menu's entries (1-based).
pub fn select<T: Copy>(entries: &[T], input: &str) -> Option<T> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| entries.get(i).copied())
}

/// Outcome of reading one menu selection.
enum Selection<T> {
    Chosen(T),
    Invalid,
    Closed,
}

fn show_menu<T: Copy, R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    title: &str,
    entries: &[T],
    label: fn(&T) -> &'static str,
) -> io::Result<Selection<T>> {
    console.section(title)?;
    let labels: Vec<&str> = entries.iter().map(label).collect();
    input::list_options(console, &labels)?;
    let Some(raw) = console.prompt_or_eof("Select an option: ")? else {
        return Ok(Selection::Closed);
    };
    match select(entries, &raw) {
        Some(choice) => Ok(Selection::Chosen(choice)),
        None => {
            console.status(INVALID_OPTION, ItemStatus::Failed)?;
            Ok(Selection::Invalid)
        }
    }
}

pub struct MenuManager<'a> {
    assets: AssetManager<'a>,
    users: UserManager<'a>,
    broker: &'a DbBroker,
}

impl<'a> MenuManager<'a> {
    pub fn new(assets: AssetManager<'a>, users: UserManager<'a>, broker: &'a DbBroker) -> Self {
        Self {
            assets,
            users,
            broker,
        }
    }

    /// Print a warning if the last action could not be written to the audit log.
    /// The action itself already took effect.
    fn warn_audit_failure<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> io::Result<()> {
        let Some(e) = self.broker.take_audit_error() else {
            return Ok(());
        };
        console.status(
            &format!(
                "Warning: audit log not written: {}",
                output::compact_line(&e.to_string(), 200)
            ),
            ItemStatus::Failed,
        )
    }

    /// Run the main menu until Exit is chosen or input ends.
    pub fn run<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<(), AssetOsError> {
        loop {
            let choice = match show_menu(console, "Main Menu", &MainChoice::ALL, MainChoice::label)? {
                Selection::Chosen(choice) => choice,
                Selection::Invalid => continue,
                Selection::Closed => break,
            };
            let still_open = match choice {
                MainChoice::Assets => self.asset_menu(console)?,
                MainChoice::Users => self.user_menu(console)?,
                MainChoice::WarrantyReport => {
                    self.assets.warranty_expiry_report(console)?;
                    self.warn_audit_failure(console)?;
                    true
                }
                MainChoice::Exit => break,
            };
            if !still_open {
                break;
            }
        }
        console.blank()?;
        console.line(FAREWELL)?;
        Ok(())
    }

    /// Returns false when input closed inside the submenu.
    fn asset_menu<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<bool, AssetOsError> {
        loop {
            let choice = match show_menu(
                console,
                "Asset Management",
                &AssetChoice::ALL,
                AssetChoice::label,
            )? {
                Selection::Chosen(choice) => choice,
                Selection::Invalid => continue,
                Selection::Closed => return Ok(false),
            };
            match choice {
                AssetChoice::Add => self.assets.add_new_asset(console)?,
                AssetChoice::UpdateEntire => self.assets.update_entire_asset(console)?,
                AssetChoice::UpdateField => self.assets.update_specific_asset_info(console)?,
                AssetChoice::Delete => self.assets.delete_asset(console)?,
                AssetChoice::List => self.assets.list_all_assets(console)?,
                AssetChoice::View => self.assets.view_asset(console)?,
                AssetChoice::Back => return Ok(true),
            }
            self.warn_audit_failure(console)?;
        }
    }

    fn user_menu<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<bool, AssetOsError> {
        loop {
            let choice = match show_menu(
                console,
                "User Management",
                &UserChoice::ALL,
                UserChoice::label,
            )? {
                Selection::Chosen(choice) => choice,
                Selection::Invalid => continue,
                Selection::Closed => return Ok(false),
            };
            match choice {
                UserChoice::Add => self.users.add_new_user(console)?,
                UserChoice::Update => self.users.update_user(console)?,
                UserChoice::Delete => self.users.delete_user(console)?,
                UserChoice::List => self.users.list_users(console)?,
                UserChoice::View => self.users.view_user(console)?,
                UserChoice::Back => return Ok(true),
            }
            self.warn_audit_failure(console)?;
        }
    }
}
