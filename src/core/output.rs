//! Text rendering for records shown at the terminal.
//!
//! Keeps listings uniform between the list, view and report flows.

use crate::core::time;
use crate::services::asset::AssetRecord;
use crate::services::user::{AssetRef, User, UserAssets};

pub const RECORD_SEPARATOR: &str = "----------------------------------";

/// Collapse newlines/extra whitespace and bound length for terminal display.
pub fn compact_line(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let preview: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

pub fn asset_lines(record: &AssetRecord) -> Vec<String> {
    let a = &record.asset;
    vec![
        format!("ID: {}", a.id),
        format!("Asset Tag: {}", a.asset_tag),
        format!("Serial Number: {}", a.serial_number),
        format!("Type: {}", a.asset_type),
        format!("Manufacturer: {}", a.manufacturer),
        format!("Model: {}", a.model),
        format!("CPU: {}", a.cpu),
        format!("RAM: {}", a.ram),
        format!("Storage: {}", a.storage),
        format!("Site: {}", a.site),
        format!("Location: {}", a.physical_location),
        format!("Status: {}", a.status),
        format!("Purchase Date: {}", time::format_date(a.purchase_date)),
        format!("Warranty Expiry: {}", time::format_date(a.warranty_expiry)),
        format!("Purchase Price: {}", a.purchase_price),
        format!("Supplier: {}", a.supplier),
        format!(
            "Assigned to: {}",
            record.assigned_user_name.as_deref().unwrap_or("Unassigned")
        ),
        format!(
            "Last Updated: {} by {}",
            time::format_timestamp(&a.last_updated),
            record
                .last_updated_by_name
                .as_deref()
                .unwrap_or("Unknown")
        ),
    ]
}

pub fn user_lines(user: &User) -> Vec<String> {
    vec![
        format!("ID: {}", user.id),
        format!("Name: {}", user.name),
        format!("Email: {}", user.email),
        format!("Department: {}", user.department),
    ]
}

fn tags(refs: &[AssetRef]) -> String {
    if refs.is_empty() {
        return "None".to_string();
    }
    refs.iter()
        .map(|r| format!("{} (#{})", r.asset_tag, r.id))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn user_asset_lines(assets: &UserAssets) -> Vec<String> {
    vec![
        format!("Assigned Assets: {}", tags(&assets.assigned)),
        format!("Last Updated Assets: {}", tags(&assets.updated)),
    ]
}
