//! Terminal flows layered over the services, plus the menu state machine.

pub mod asset;
pub mod input;
pub mod menu;
pub mod user;

use crate::core::console::Console;
use crate::core::error::AssetOsError;
use crate::core::output;
use crate::core::tui::ItemStatus;
use std::io::{self, BufRead, Write};

/// Print a failed operation with the underlying error text.
pub(crate) fn report<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    action: &str,
    err: &AssetOsError,
) -> io::Result<()> {
    console.status(
        &format!(
            "Error {}: {}",
            action,
            output::compact_line(&err.to_string(), 200)
        ),
        ItemStatus::Failed,
    )
}
