//! Terminal preview - write highlighted tokens as ANSI-styled text.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};

use super::highlight::Token;
use crate::types::{Attr, Rgba};

fn to_color(color: Rgba) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Write `tokens` to `out` with truecolor foregrounds, then reset styling.
///
/// Whitespace is written unstyled so line breaks never carry color codes.
pub fn render_ansi<W: Write>(out: &mut W, tokens: &[Token<'_>]) -> io::Result<()> {
    for token in tokens {
        if token.text.trim().is_empty() {
            queue!(out, Print(token.text))?;
            continue;
        }

        let attrs = token.kind.attrs();
        queue!(out, SetForegroundColor(to_color(token.kind.color())))?;
        if attrs.contains(Attr::BOLD) {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if attrs.contains(Attr::ITALIC) {
            queue!(out, SetAttribute(Attribute::Italic))?;
        }
        queue!(out, Print(token.text))?;
        if !attrs.is_empty() {
            queue!(out, SetAttribute(Attribute::Reset))?;
        }
    }
    queue!(out, ResetColor, Print("\n"))?;
    out.flush()
}
