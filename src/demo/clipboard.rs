//! Clipboard Module - copy support for the live demo.
//!
//! Copies go to an internal buffer, and can additionally be forwarded to
//! the user's terminal clipboard with an OSC 52 escape sequence.
//!
//! # Example
//!
//! ```ignore
//! use spark_showcase::demo::clipboard;
//!
//! clipboard::copy("const x = 1;");
//! assert_eq!(clipboard::paste().as_deref(), Some("const x = 1;"));
//!
//! // Also hand it to the terminal emulator
//! clipboard::write_osc52(&mut std::io::stdout(), "const x = 1;")?;
//! ```

use std::cell::RefCell;
use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use crossterm::queue;
use crossterm::style::Print;

// =============================================================================
// Internal Buffer
// =============================================================================

thread_local! {
    static CLIPBOARD_BUFFER: RefCell<Option<String>> = const { RefCell::new(None) };
}

// =============================================================================
// Public API
// =============================================================================

/// Copy text to the clipboard.
///
/// Empty strings are ignored (clipboard not modified). Returns whether the
/// clipboard changed.
pub fn copy(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    CLIPBOARD_BUFFER.with(|buf| {
        *buf.borrow_mut() = Some(text.to_string());
    });
    true
}

/// Most recently copied text, or None if the clipboard is empty.
pub fn paste() -> Option<String> {
    CLIPBOARD_BUFFER.with(|buf| buf.borrow().clone())
}

/// Clear the clipboard.
pub fn clear() {
    CLIPBOARD_BUFFER.with(|buf| {
        *buf.borrow_mut() = None;
    });
}

/// Check if clipboard has content.
pub fn has_content() -> bool {
    CLIPBOARD_BUFFER.with(|buf| buf.borrow().is_some())
}

// =============================================================================
// OSC 52
// =============================================================================

/// OSC 52 sequence that sets the system clipboard to `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Write the OSC 52 sequence for `text` to `out` and flush.
pub fn write_osc52<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    queue!(out, Print(osc52_sequence(text)))?;
    out.flush()
}

// =============================================================================
// Tests
// =============================================================================
