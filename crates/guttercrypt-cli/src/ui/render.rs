//! Rendering primitives for CLI output.

use comfy_table::presets::NOTHING;
use comfy_table::{Attribute, Cell, ContentArrangement, Table as ComfyTable};

use super::context::UiContext;
use super::theme::{styled, styles, Badge};

/// Render a badge with a message colored in the badge's tone.
///
/// Pretty mode: "🔐 message"
/// Plain mode: "[OK] message"
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let symbol = kind.display(ctx.unicode && ctx.mode.is_pretty());
    let line = if message.is_empty() {
        symbol.to_string()
    } else {
        format!("{} {}", symbol, message)
    };
    styled(&line, kind.style(), ctx.color)
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let styled_key = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("  {} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line.
pub fn hint(ctx: &UiContext, text: &str) -> String {
    let text = text.strip_prefix("Hint: ").unwrap_or(text);
    if ctx.mode.is_pretty() {
        let label = styled("Hint:", styles::dim(), ctx.color);
        format!("  {} {}", label, text)
    } else {
        format!("hint={}", text)
    }
}

/// Render a bulleted list, one item per line.
pub fn bullets(ctx: &UiContext, items: &[String]) -> String {
    let bullet = if ctx.unicode && ctx.mode.is_pretty() {
        "\u{2022}"
    } else {
        "-"
    };
    items
        .iter()
        .map(|item| styled(&format!("   {} {}", bullet, item), styles::dim(), ctx.color))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a borderless table.
///
/// Pretty mode: dim headers, padded columns
/// Plain mode: tab-separated values, no header
pub fn simple_table(ctx: &UiContext, headers: &[&str], rows: &[Vec<String>]) -> String {
    if ctx.mode.is_pretty() {
        let mut table = ComfyTable::new();
        table.load_preset(NOTHING);
        table.set_content_arrangement(ContentArrangement::Dynamic);

        let header_cells: Vec<Cell> = headers
            .iter()
            .map(|h| {
                let cell = Cell::new(h);
                if ctx.color {
                    cell.add_attribute(Attribute::Dim)
                } else {
                    cell
                }
            })
            .collect();
        table.set_header(header_cells);

        for i in 0..headers.len() {
            if let Some(column) = table.column_mut(i) {
                column.set_padding((2, 1));
            }
        }

        for row in rows {
            table.add_row(row);
        }

        table.to_string()
    } else {
        rows.iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Print a non-essential line; suppressed by `--quiet`.
pub fn say(ctx: &UiContext, message: &str) {
    if !ctx.quiet {
        println!("{}", message);
    }
}

/// Print a warning to stderr.
pub fn print_warning(ctx: &UiContext, message: &str) {
    eprintln!("{}", badge(ctx, Badge::Warn, message));
}

/// Format an error message with optional hint.
///
/// Pretty mode: "❌ message" with optional "Hint: ..." on next line
/// Plain mode: "error=message" with optional "hint=suggestion"
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Err, message));
        if let Some(h) = error_hint {
            lines.push(hint(ctx, h));
        }
    } else {
        lines.push(format!("error={}", message));
        if let Some(h) = error_hint {
            lines.push(hint(ctx, h));
        }
    }

    lines.join("\n")
}

/// Print an error message to stderr with optional hint.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}
