use std::io::{self, Write};

use crossterm::{queue, style};

/// Split a menu item into `(is_key, text)` runs. Keys are the bracketed
/// parts, brackets included; an unclosed `[` runs to the end as plain text.
pub fn menu_segments(item: &str) -> Vec<(bool, &str)> {
    let mut segments = Vec::new();
    let mut rest = item;
    while !rest.is_empty() {
        let Some(open) = rest.find('[') else {
            segments.push((false, rest));
            break;
        };
        if open > 0 {
            segments.push((false, &rest[..open]));
        }
        rest = &rest[open..];
        match rest.find(']') {
            Some(close) => {
                segments.push((true, &rest[..=close]));
                rest = &rest[close + 1..];
            }
            None => {
                segments.push((false, rest));
                break;
            }
        }
    }
    segments
}

/// Print a menu item: keys bold, descriptions dim.
pub fn print_menu_item(out: &mut impl Write, item: &str) -> io::Result<()> {
    for (is_key, text) in menu_segments(item) {
        let attribute = if is_key {
            style::Attribute::Bold
        } else {
            style::Attribute::Dim
        };
        queue!(
            out,
            style::SetAttribute(attribute),
            style::Print(text),
            style::SetAttribute(style::Attribute::Reset),
        )?;
    }
    Ok(())
}
