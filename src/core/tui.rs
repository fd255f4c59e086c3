use colored::{ColoredString, Colorize};
use std::env;
use std::io::{self, Write};

const MIN_BOX_WIDTH: usize = 40;
const MAX_BOX_WIDTH: usize = 56;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoxStyle {
    Info,
    Warning,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ItemStatus {
    Created,
    Updated,
    Deleted,
    Info,
    Failed,
}

impl ItemStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            ItemStatus::Created => "✨",
            ItemStatus::Updated => "🔄",
            ItemStatus::Deleted => "🗑",
            ItemStatus::Info => "💡",
            ItemStatus::Failed => "❌",
        }
    }

    fn paint(&self, text: &str) -> ColoredString {
        match self {
            ItemStatus::Created => text.bright_green(),
            ItemStatus::Updated | ItemStatus::Deleted => text.bright_yellow(),
            ItemStatus::Info => text.cyan(),
            ItemStatus::Failed => text.bright_red(),
        }
    }
}

impl BoxStyle {
    fn paint(&self, text: &str) -> ColoredString {
        match self {
            BoxStyle::Info => text.bright_cyan(),
            BoxStyle::Warning => text.bright_yellow(),
        }
    }
}

pub fn terminal_width() -> usize {
    env::var("TERM_WIDTH")
        .ok()
        .and_then(|w| w.parse().ok())
        .or_else(|| env::var("COLUMNS").ok().and_then(|c| c.parse().ok()))
        .unwrap_or(80)
}

fn effective_width() -> usize {
    terminal_width().clamp(MIN_BOX_WIDTH, MAX_BOX_WIDTH)
}

fn indent() -> usize {
    (terminal_width().saturating_sub(effective_width())) / 2
}

pub fn box_top(width: usize) -> String {
    let w = width.max(MIN_BOX_WIDTH);
    format!("╔{}╗", "═".repeat(w - 2))
}

pub fn box_bottom(width: usize) -> String {
    let w = width.max(MIN_BOX_WIDTH);
    format!("╚{}╝", "═".repeat(w - 2))
}

pub fn box_row(left: &str, content: &str, right: &str, width: usize) -> String {
    let w = width.max(MIN_BOX_WIDTH);
    let content_len = content.chars().count();
    let padding = w.saturating_sub(2).saturating_sub(content_len);
    let left_pad = padding / 2;
    let right_pad = padding - left_pad;
    format!(
        "{}{}{}{}{}",
        left,
        " ".repeat(left_pad),
        content,
        " ".repeat(right_pad),
        right
    )
}

/// Centered double-line box with a bold title and optional subtitle.
pub fn write_box<W: Write>(
    out: &mut W,
    title: &str,
    subtitle: &str,
    style: BoxStyle,
) -> io::Result<()> {
    let width = effective_width();
    let indent_s = " ".repeat(indent());

    writeln!(out, "{}{}", indent_s, style.paint(&box_top(width)))?;
    writeln!(
        out,
        "{}{}",
        indent_s,
        style.paint(&box_row("║", title, "║", width)).bold()
    )?;
    if !subtitle.is_empty() {
        writeln!(
            out,
            "{}{}",
            indent_s,
            style.paint(&box_row("║", subtitle, "║", width))
        )?;
    }
    writeln!(out, "{}{}", indent_s, style.paint(&box_bottom(width)))
}

pub fn write_item<W: Write>(out: &mut W, item: &str, status: ItemStatus) -> io::Result<()> {
    writeln!(out, "{} {}", status.paint(status.icon()), status.paint(item))
}

pub fn write_section<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", format!("=== {} ===", title).bold())
}
