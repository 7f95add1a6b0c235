//! Live Demo Module - the "Live Demo" panel of the page
//!
//! - **Snippets** - the static code examples shown in the tabs
//! - **Highlight** - JavaScript/JSX tokenizer with One Dark colors
//! - **Viewer** - reactive tab, copy and visibility state
//! - **View** - element tree for the panel, re-rendered by an effect
//! - **Ansi** - terminal preview of highlighted code
//! - **Clipboard** - copy buffer and OSC 52 output

mod ansi;
pub mod clipboard;
mod highlight;
mod snippets;
mod view;
mod viewer;

pub use ansi::render_ansi;
pub use highlight::{highlight_javascript, Token, TokenKind, BACKGROUND};
pub use snippets::{Snippet, SNIPPETS};
pub use view::{mount_live_demo, LiveDemoHandle};
pub use viewer::{DemoViewer, COPY_FEEDBACK, VISIBILITY_THRESHOLD};
