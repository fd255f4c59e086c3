//! Parsing of typed-in answers and the prompt helpers built on it.
//!
//! A helper that returns `Ok(None)` has already told the user what was wrong;
//! the calling flow just stops.

use crate::core::console::Console;
use crate::core::error::AssetOsError;
use crate::core::time;
use crate::core::tui::ItemStatus;
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::OnceLock;

/// Keyword that clears an optional field on edit prompts.
pub const CLEAR_KEYWORD: &str = "none";

/// Outcome of an edit prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit<T> {
    Keep,
    Set(T),
}

impl<T> Edit<T> {
    pub fn apply(self, slot: &mut T) {
        if let Edit::Set(value) = self {
            *slot = value;
        }
    }
}

pub fn parse_id(input: &str) -> Result<i64, AssetOsError> {
    match input.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AssetOsError::ValidationError(format!(
            "'{}' is not a valid ID",
            input.trim()
        ))),
    }
}

pub fn parse_days(input: &str) -> Result<i64, AssetOsError> {
    input.trim().parse::<i64>().map_err(|_| {
        AssetOsError::ValidationError(format!("'{}' is not a whole number of days", input.trim()))
    })
}

/// Map a 1-based menu number through `table`.
pub fn parse_menu<T>(input: &str, table: fn(usize) -> Option<T>) -> Result<T, AssetOsError> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(table)
        .ok_or_else(|| AssetOsError::ValidationError(format!("'{}' is not a listed option", input.trim())))
}

pub fn parse_price(input: &str) -> Result<Decimal, AssetOsError> {
    let trimmed = input.trim().trim_start_matches('$');
    let price = Decimal::from_str(trimmed)
        .map_err(|e| AssetOsError::ValidationError(format!("invalid price '{}': {}", input.trim(), e)))?;
    if price.is_sign_negative() {
        return Err(AssetOsError::ValidationError(
            "price cannot be negative".to_string(),
        ));
    }
    Ok(price)
}

/// Blank means "no date" (used when adding).
pub fn parse_optional_date(input: &str) -> Result<Option<NaiveDate>, AssetOsError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    time::parse_date(input).map(Some)
}

/// Blank keeps the current value, anything else must parse.
pub fn parse_edit<T>(
    input: &str,
    parse: impl FnOnce(&str) -> Result<T, AssetOsError>,
) -> Result<Edit<T>, AssetOsError> {
    if input.trim().is_empty() {
        return Ok(Edit::Keep);
    }
    parse(input).map(Edit::Set)
}

/// Like `parse_edit`, with `none` clearing an optional value.
pub fn parse_clearable<T>(
    input: &str,
    parse: impl FnOnce(&str) -> Result<T, AssetOsError>,
) -> Result<Edit<Option<T>>, AssetOsError> {
    if input.trim().eq_ignore_ascii_case(CLEAR_KEYWORD) {
        return Ok(Edit::Set(None));
    }
    Ok(match parse_edit(input, parse)? {
        Edit::Keep => Edit::Keep,
        Edit::Set(v) => Edit::Set(Some(v)),
    })
}

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

fn email_pattern() -> Result<&'static Regex, AssetOsError> {
    static EMAIL: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN))
        .as_ref()
        .map_err(|e| AssetOsError::ValidationError(format!("email pattern: {}", e)))
}

pub fn parse_email(input: &str) -> Result<String, AssetOsError> {
    let trimmed = input.trim();
    if email_pattern()?.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(AssetOsError::ValidationError(format!(
            "'{}' is not a valid email address",
            trimmed
        )))
    }
}

/// Prompt once and parse; on a parse failure print why and return `None`.
pub fn ask<T, R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    label: &str,
    parse: impl FnOnce(&str) -> Result<T, AssetOsError>,
) -> io::Result<Option<T>> {
    let raw = console.prompt(label)?;
    match parse(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            console.status(&format!("Invalid input: {}", e), ItemStatus::Failed)?;
            Ok(None)
        }
    }
}

/// Print a numbered option list.
pub fn list_options<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    options: &[&str],
) -> io::Result<()> {
    for (i, option) in options.iter().enumerate() {
        console.line(format!("{}. {}", i + 1, option))?;
    }
    Ok(())
}
