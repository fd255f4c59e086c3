//! Interactive asset flows: add, edit, delete, list, view and the warranty report.

use crate::core::console::Console;
use crate::core::error::AssetOsError;
use crate::core::output;
use crate::core::time;
use crate::core::tui::ItemStatus;
use crate::managers::report;
use crate::managers::input::{
    self, Edit, ask, parse_clearable, parse_days, parse_edit, parse_id, parse_menu,
    parse_optional_date, parse_price,
};
use crate::services::asset::{Asset, AssetService, AssetStatus, AssetType, NewAsset};
use crate::services::user::UserService;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};

/// Fields offered by the "update specific info" flow, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetField {
    Tag,
    Serial,
    Type,
    Manufacturer,
    Model,
    Cpu,
    Ram,
    Storage,
    Site,
    Location,
    PurchaseDate,
    WarrantyExpiry,
    Price,
    Supplier,
    Status,
    AssignedUser,
    LastUpdatedBy,
}

impl AssetField {
    pub const ALL: [AssetField; 17] = [
        AssetField::Tag,
        AssetField::Serial,
        AssetField::Type,
        AssetField::Manufacturer,
        AssetField::Model,
        AssetField::Cpu,
        AssetField::Ram,
        AssetField::Storage,
        AssetField::Site,
        AssetField::Location,
        AssetField::PurchaseDate,
        AssetField::WarrantyExpiry,
        AssetField::Price,
        AssetField::Supplier,
        AssetField::Status,
        AssetField::AssignedUser,
        AssetField::LastUpdatedBy,
    ];

    pub fn from_menu_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssetField::Tag => "Asset Tag",
            AssetField::Serial => "Serial Number",
            AssetField::Type => "Type",
            AssetField::Manufacturer => "Manufacturer",
            AssetField::Model => "Model",
            AssetField::Cpu => "CPU",
            AssetField::Ram => "RAM",
            AssetField::Storage => "Storage",
            AssetField::Site => "Site",
            AssetField::Location => "Physical Location",
            AssetField::PurchaseDate => "Purchase Date",
            AssetField::WarrantyExpiry => "Warranty Expiry",
            AssetField::Price => "Purchase Price",
            AssetField::Supplier => "Supplier",
            AssetField::Status => "Status",
            AssetField::AssignedUser => "Assigned User ID",
            AssetField::LastUpdatedBy => "Last Updated By (User ID)",
        }
    }

    pub fn current_value(&self, asset: &Asset) -> String {
        match self {
            AssetField::Tag => asset.asset_tag.clone(),
            AssetField::Serial => asset.serial_number.clone(),
            AssetField::Type => asset.asset_type.to_string(),
            AssetField::Manufacturer => asset.manufacturer.clone(),
            AssetField::Model => asset.model.clone(),
            AssetField::Cpu => asset.cpu.clone(),
            AssetField::Ram => asset.ram.clone(),
            AssetField::Storage => asset.storage.clone(),
            AssetField::Site => asset.site.clone(),
            AssetField::Location => asset.physical_location.clone(),
            AssetField::PurchaseDate => time::format_date(asset.purchase_date),
            AssetField::WarrantyExpiry => time::format_date(asset.warranty_expiry),
            AssetField::Price => asset.purchase_price.to_string(),
            AssetField::Supplier => asset.supplier.clone(),
            AssetField::Status => asset.status.to_string(),
            AssetField::AssignedUser => asset
                .assigned_user_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "None".to_string()),
            AssetField::LastUpdatedBy => asset.last_updated_by_id.to_string(),
        }
    }

    fn text_slot<'a>(&self, asset: &'a mut Asset) -> Option<&'a mut String> {
        match self {
            AssetField::Tag => Some(&mut asset.asset_tag),
            AssetField::Serial => Some(&mut asset.serial_number),
            AssetField::Manufacturer => Some(&mut asset.manufacturer),
            AssetField::Model => Some(&mut asset.model),
            AssetField::Cpu => Some(&mut asset.cpu),
            AssetField::Ram => Some(&mut asset.ram),
            AssetField::Storage => Some(&mut asset.storage),
            AssetField::Site => Some(&mut asset.site),
            AssetField::Location => Some(&mut asset.physical_location),
            AssetField::Supplier => Some(&mut asset.supplier),
            _ => None,
        }
    }
}

fn type_labels() -> Vec<&'static str> {
    AssetType::ALL.iter().map(|t| t.as_str()).collect()
}

fn status_labels() -> Vec<&'static str> {
    AssetStatus::ALL.iter().map(|s| s.label()).collect()
}

/// Human description of where a warranty date sits relative to `today`.
pub fn warranty_note(expiry: NaiveDate, today: NaiveDate) -> String {
    let days = (expiry - today).num_days();
    match days {
        d if d < 0 => format!("EXPIRED {} day(s) ago", -d),
        0 => "expires today".to_string(),
        d => format!("{} day(s) remaining", d),
    }
}

pub struct AssetManager<'a> {
    assets: AssetService<'a>,
    users: UserService<'a>,
}

impl<'a> AssetManager<'a> {
    pub fn new(assets: AssetService<'a>, users: UserService<'a>) -> Self {
        Self { assets, users }
    }

    /// True when `id` names an existing user; otherwise explain and return false.
    fn require_user<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        id: i64,
    ) -> io::Result<bool> {
        match self.users.get_by_id(id) {
            Ok(Some(_)) => Ok(true),
            Ok(None) => {
                console.status(&format!("User {} not found.", id), ItemStatus::Failed)?;
                Ok(false)
            }
            Err(e) => {
                report(console, "looking up user", &e)?;
                Ok(false)
            }
        }
    }

    fn load_asset<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        label: &str,
    ) -> io::Result<Option<Asset>> {
        let Some(id) = ask(console, label, parse_id)? else {
            return Ok(None);
        };
        match self.assets.get_by_id(id) {
            Ok(Some(record)) => Ok(Some(record.asset)),
            Ok(None) => {
                console.status("Asset not found.", ItemStatus::Failed)?;
                Ok(None)
            }
            Err(e) => {
                report(console, "loading asset", &e)?;
                Ok(None)
            }
        }
    }

    pub fn add_new_asset<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<(), AssetOsError> {
        console.section("Add New Asset")?;

        let asset_tag = console.prompt("Asset Tag: ")?;
        let serial_number = console.prompt("Serial Number: ")?;

        console.line("Asset Type:")?;
        input::list_options(console, &type_labels())?;
        let Some(asset_type) = ask(console, "Select type: ", |s| {
            parse_menu(s, AssetType::from_menu_index)
        })?
        else {
            return Ok(());
        };

        let mut new = NewAsset::new(&asset_tag, asset_type, 0);
        new.serial_number = serial_number;
        new.manufacturer = console.prompt("Manufacturer: ")?;
        new.model = console.prompt("Model: ")?;
        new.cpu = console.prompt("CPU: ")?;
        new.ram = console.prompt("RAM: ")?;
        new.storage = console.prompt("Storage: ")?;
        new.site = console.prompt("Site: ")?;
        new.physical_location = console.prompt("Physical Location: ")?;

        let Some(purchase_date) = ask(
            console,
            "Purchase Date (YYYY-MM-DD, blank if unknown): ",
            parse_optional_date,
        )?
        else {
            return Ok(());
        };
        new.purchase_date = purchase_date;

        let Some(warranty_expiry) = ask(
            console,
            "Warranty Expiry (YYYY-MM-DD, blank if none): ",
            parse_optional_date,
        )?
        else {
            return Ok(());
        };
        new.warranty_expiry = warranty_expiry;

        let Some(price) = ask(console, "Purchase Price: ", |s| {
            if s.trim().is_empty() {
                Ok(Decimal::ZERO)
            } else {
                parse_price(s)
            }
        })?
        else {
            return Ok(());
        };
        new.purchase_price = price;
        new.supplier = console.prompt("Supplier: ")?;

        let Some(assigned) = ask(console, "Assigned User ID (blank for none): ", |s| {
            if s.trim().is_empty() {
                Ok(None)
            } else {
                parse_id(s).map(Some)
            }
        })?
        else {
            return Ok(());
        };
        if let Some(id) = assigned {
            if !self.require_user(console, id)? {
                return Ok(());
            }
        }
        new.assigned_user_id = assigned;

        let Some(updated_by) = ask(console, "Updated By (User ID): ", parse_id)? else {
            return Ok(());
        };
        if !self.require_user(console, updated_by)? {
            return Ok(());
        }
        new.last_updated_by_id = updated_by;

        match self.assets.create(&new) {
            Ok(asset) => console.status(
                &format!("Asset created successfully! ID: {}", asset.id),
                ItemStatus::Created,
            )?,
            Err(e) => report(console, "creating asset", &e)?,
        }
        Ok(())
    }

    /// Prompt for one field and apply it to `asset`. False when the answer was rejected.
    fn edit_field<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        asset: &mut Asset,
        field: AssetField,
    ) -> io::Result<bool> {
        console.line(format!("Current {}: {}", field.label(), field.current_value(asset)))?;
        let keep = "(leave blank to keep current)";
        let clear = "(blank keeps current, 'none' clears)";

        if let Some(slot) = field.text_slot(asset) {
            let answer = console.prompt(&format!("New {} {}: ", field.label(), keep))?;
            if !answer.is_empty() {
                *slot = answer;
            }
            return Ok(true);
        }

        match field {
            AssetField::Type => {
                input::list_options(console, &type_labels())?;
                let label = format!("New Type {}: ", keep);
                let Some(edit) = ask(console, &label, |s| {
                    parse_edit(s, |v| parse_menu(v, AssetType::from_menu_index))
                })?
                else {
                    return Ok(false);
                };
                edit.apply(&mut asset.asset_type);
            }
            AssetField::Status => {
                input::list_options(console, &status_labels())?;
                let label = format!("New Status {}: ", keep);
                let Some(edit) = ask(console, &label, |s| {
                    parse_edit(s, |v| parse_menu(v, AssetStatus::from_menu_index))
                })?
                else {
                    return Ok(false);
                };
                edit.apply(&mut asset.status);
            }
            AssetField::PurchaseDate | AssetField::WarrantyExpiry => {
                let label = format!("New {} (YYYY-MM-DD) {}: ", field.label(), clear);
                let Some(edit) = ask(console, &label, |s| parse_clearable(s, time::parse_date))?
                else {
                    return Ok(false);
                };
                if field == AssetField::PurchaseDate {
                    edit.apply(&mut asset.purchase_date);
                } else {
                    edit.apply(&mut asset.warranty_expiry);
                }
            }
            AssetField::Price => {
                let label = format!("New Purchase Price {}: ", keep);
                let Some(edit) = ask(console, &label, |s| parse_edit(s, parse_price))? else {
                    return Ok(false);
                };
                edit.apply(&mut asset.purchase_price);
            }
            AssetField::AssignedUser => {
                let label = format!("New Assigned User ID {}: ", clear);
                let Some(edit) = ask(console, &label, |s| parse_clearable(s, parse_id))? else {
                    return Ok(false);
                };
                if let Edit::Set(Some(id)) = edit {
                    if !self.require_user(console, id)? {
                        return Ok(false);
                    }
                }
                edit.apply(&mut asset.assigned_user_id);
            }
            AssetField::LastUpdatedBy => {
                let label = format!("Updated By (User ID) {}: ", keep);
                let Some(edit) = ask(console, &label, |s| parse_edit(s, parse_id))? else {
                    return Ok(false);
                };
                if let Edit::Set(id) = edit {
                    if !self.require_user(console, id)? {
                        return Ok(false);
                    }
                }
                edit.apply(&mut asset.last_updated_by_id);
            }
            _ => {}
        }
        Ok(true)
    }

    fn save<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        asset: &Asset,
    ) -> io::Result<()> {
        match self.assets.update(asset) {
            Ok(true) => console.status(
                &format!("Asset updated successfully! ID: {}", asset.id),
                ItemStatus::Updated,
            ),
            Ok(false) => console.status(
                "Failed to update asset: it no longer exists.",
                ItemStatus::Failed,
            ),
            Err(e) => report(console, "updating asset", &e),
        }
    }

    pub fn update_entire_asset<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<(), AssetOsError> {
        console.section("Update Entire Asset")?;
        let Some(mut asset) = self.load_asset(console, "Enter Asset ID to update: ")? else {
            return Ok(());
        };
        for field in AssetField::ALL {
            if !self.edit_field(console, &mut asset, field)? {
                return Ok(());
            }
        }
        self.save(console, &asset)?;
        Ok(())
    }

    pub fn update_specific_asset_info<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<(), AssetOsError> {
        console.section("Update Specific Asset Info")?;
        let Some(mut asset) = self.load_asset(console, "Enter Asset ID to update: ")? else {
            return Ok(());
        };

        console.line("Select the property to update:")?;
        let labels: Vec<&str> = AssetField::ALL.iter().map(|f| f.label()).collect();
        input::list_options(console, &labels)?;
        let choice = console.prompt("Property number: ")?;
        let Ok(field) = parse_menu(&choice, AssetField::from_menu_index) else {
            console.status("Invalid option. No changes made.", ItemStatus::Failed)?;
            return Ok(());
        };

        if !self.edit_field(console, &mut asset, field)? {
            return Ok(());
        }
        self.save(console, &asset)?;
        Ok(())
    }

    pub fn delete_asset<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<(), AssetOsError> {
        console.section("Delete Asset")?;
        let Some(id) = ask(console, "Enter Asset ID to delete: ", parse_id)? else {
            return Ok(());
        };
        match self.assets.delete(id) {
            Ok(true) => console.status("Asset deleted successfully!", ItemStatus::Deleted)?,
            Ok(false) => console.status("Asset not found.", ItemStatus::Failed)?,
            Err(e) => report(console, "deleting asset", &e)?,
        }
        Ok(())
    }

    pub fn list_all_assets<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<(), AssetOsError> {
        console.section("All Assets")?;
        let records = match self.assets.list_all() {
            Ok(records) => records,
            Err(e) => {
                report(console, "listing assets", &e)?;
                return Ok(());
            }
        };
        if records.is_empty() {
            console.line("No assets found.")?;
            return Ok(());
        }
        for record in &records {
            for line in output::asset_lines(record) {
                console.line(line)?;
            }
            console.line(output::RECORD_SEPARATOR)?;
        }
        Ok(())
    }

    pub fn view_asset<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<(), AssetOsError> {
        console.section("Asset Details")?;
        let Some(id) = ask(console, "Enter Asset ID: ", parse_id)? else {
            return Ok(());
        };
        match self.assets.get_by_id(id) {
            Ok(Some(record)) => {
                for line in output::asset_lines(&record) {
                    console.line(line)?;
                }
            }
            Ok(None) => console.status("Asset not found.", ItemStatus::Failed)?,
            Err(e) => report(console, "loading asset", &e)?,
        }
        Ok(())
    }

    pub fn warranty_expiry_report<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<(), AssetOsError> {
        console.section("Warranty Expiry Report")?;
        let Some(days) = ask(
            console,
            "Show warranties expiring within how many days? ",
            parse_days,
        )?
        else {
            return Ok(());
        };

        let today = time::today_utc();
        let records = match self.assets.warranty_expiring_from(today, days) {
            Ok(records) => records,
            Err(e) => {
                report(console, "running warranty report", &e)?;
                return Ok(());
            }
        };
        if records.is_empty() {
            console.line(format!(
                "No assets with warranties expiring within {} days.",
                days
            ))?;
            return Ok(());
        }

        console.line(format!(
            "{} asset(s) with warranties expiring within {} days:",
            records.len(),
            days
        ))?;
        for record in &records {
            let a = &record.asset;
            let Some(expiry) = a.warranty_expiry else {
                continue;
            };
            console.line(format!(
                "ID: {} | {} | {} {} | Warranty Expiry: {} | {} | Assigned to: {}",
                a.id,
                a.asset_tag,
                a.manufacturer,
                a.model,
                time::format_date(Some(expiry)),
                warranty_note(expiry, today),
                record.assigned_user_name.as_deref().unwrap_or("Unassigned"),
            ))?;
        }
        Ok(())
    }
}
