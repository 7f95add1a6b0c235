//! Demo Viewer - reactive state behind the live demo panel.
//!
//! Tracks which snippet is selected, whether the "Copied!" feedback is
//! showing, and whether the panel has scrolled into view. All three are
//! signals, so effects that read them re-run on change.
//!
//! Time is passed in by the caller (`copy_selected(now)`, `tick(now)`);
//! the viewer owns no timers.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Instant;
//! use spark_showcase::demo::DemoViewer;
//!
//! let viewer = DemoViewer::new();
//! viewer.select(1);
//! viewer.copy_selected(Instant::now());
//! assert_eq!(viewer.copy_label(), "Copied!");
//! ```

use std::cell::Cell;
use std::time::{Duration, Instant};

use log::debug;
use spark_signals::{signal, Signal};

use super::clipboard;
use super::highlight::{highlight_javascript, Token};
use super::snippets::{Snippet, SNIPPETS};

/// How long the "Copied!" feedback stays up.
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

/// Fraction of the panel that must be visible before it reveals.
pub const VISIBILITY_THRESHOLD: f32 = 0.1;

pub struct DemoViewer {
    snippets: &'static [Snippet],
    selected: Signal<usize>,
    copied: Signal<bool>,
    copied_until: Cell<Option<Instant>>,
    in_view: Signal<bool>,
}

impl DemoViewer {
    /// Viewer over the built-in snippets.
    pub fn new() -> Self {
        Self::with_snippets(&SNIPPETS)
    }

    pub fn with_snippets(snippets: &'static [Snippet]) -> Self {
        Self {
            snippets,
            selected: signal(0),
            copied: signal(false),
            copied_until: Cell::new(None),
            in_view: signal(false),
        }
    }

    pub fn snippets(&self) -> &'static [Snippet] {
        self.snippets
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn selected(&self) -> usize {
        self.selected.get()
    }

    pub fn selected_signal(&self) -> Signal<usize> {
        self.selected.clone()
    }

    pub fn selected_snippet(&self) -> Option<&'static Snippet> {
        self.snippets.get(self.selected())
    }

    /// Select a tab. Out-of-range indices are ignored.
    pub fn select(&self, index: usize) -> bool {
        if index >= self.snippets.len() {
            debug!("demo tab {index} out of range ({} tabs)", self.snippets.len());
            return false;
        }
        if self.selected() != index {
            self.selected.set(index);
        }
        true
    }

    /// Select the next tab, wrapping around.
    pub fn next(&self) {
        if !self.snippets.is_empty() {
            self.select((self.selected() + 1) % self.snippets.len());
        }
    }

    /// Select the previous tab, wrapping around.
    pub fn previous(&self) {
        let len = self.snippets.len();
        if len > 0 {
            self.select((self.selected() + len - 1) % len);
        }
    }

    /// Highlighted tokens of the selected snippet.
    pub fn highlighted(&self) -> Vec<Token<'static>> {
        self.selected_snippet()
            .map(|snippet| highlight_javascript(snippet.code))
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Copy
    // -------------------------------------------------------------------------

    /// Copy the selected snippet and show the feedback until
    /// `now + COPY_FEEDBACK`. Copying again extends the feedback.
    pub fn copy_selected(&self, now: Instant) -> bool {
        let Some(snippet) = self.selected_snippet() else {
            return false;
        };
        if !clipboard::copy(snippet.code) {
            return false;
        }

        self.copied_until.set(Some(now + COPY_FEEDBACK));
        if !self.copied.get() {
            self.copied.set(true);
        }
        debug!("copied demo snippet {:?}", snippet.title);
        true
    }

    /// Clear the copy feedback once its deadline has passed.
    pub fn tick(&self, now: Instant) {
        if let Some(deadline) = self.copied_until.get() {
            if now >= deadline {
                self.copied_until.set(None);
                self.copied.set(false);
            }
        }
    }

    pub fn is_copied(&self) -> bool {
        self.copied.get()
    }

    pub fn copied_signal(&self) -> Signal<bool> {
        self.copied.clone()
    }

    pub fn copy_label(&self) -> &'static str {
        if self.is_copied() { "Copied!" } else { "Copy" }
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    /// Report how much of the panel is visible (0.0 - 1.0).
    /// Latches: once in view, the panel stays revealed.
    pub fn observe_visibility(&self, ratio: f32) {
        if !self.in_view.get() && ratio >= VISIBILITY_THRESHOLD {
            self.in_view.set(true);
        }
    }

    pub fn is_in_view(&self) -> bool {
        self.in_view.get()
    }

    pub fn in_view_signal(&self) -> Signal<bool> {
        self.in_view.clone()
    }
}

impl Default for DemoViewer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        clipboard::clear();
    }

    #[test]
    fn test_select() {
        let viewer = DemoViewer::new();
        assert_eq!(viewer.selected(), 0);
        assert_eq!(viewer.selected_snippet().map(|s| s.title), Some("React Component"));

        assert!(viewer.select(2));
        assert_eq!(viewer.selected_snippet().map(|s| s.title), Some("Data Structure"));

        assert!(!viewer.select(3));
        assert_eq!(viewer.selected(), 2);
    }

    #[test]
    fn test_next_previous_wrap() {
        let viewer = DemoViewer::new();

        viewer.previous();
        assert_eq!(viewer.selected(), 2);
        viewer.next();
        assert_eq!(viewer.selected(), 0);
        viewer.next();
        assert_eq!(viewer.selected(), 1);
    }

    #[test]
    fn test_copy_and_reset() {
        setup();
        let viewer = DemoViewer::new();
        let start = Instant::now();

        viewer.select(1);
        assert!(viewer.copy_selected(start));
        assert!(viewer.is_copied());
        assert_eq!(viewer.copy_label(), "Copied!");
        assert_eq!(clipboard::paste().as_deref(), Some(SNIPPETS[1].code));

        viewer.tick(start + Duration::from_millis(1999));
        assert!(viewer.is_copied());

        viewer.tick(start + COPY_FEEDBACK);
        assert!(!viewer.is_copied());
        assert_eq!(viewer.copy_label(), "Copy");
    }

    #[test]
    fn test_copy_again_extends_feedback() {
        setup();
        let viewer = DemoViewer::new();
        let start = Instant::now();

        viewer.copy_selected(start);
        viewer.copy_selected(start + Duration::from_secs(1));

        viewer.tick(start + Duration::from_millis(2500));
        assert!(viewer.is_copied());
        viewer.tick(start + Duration::from_secs(3));
        assert!(!viewer.is_copied());
    }

    #[test]
    fn test_empty_viewer() {
        setup();
        static NONE: [Snippet; 0] = [];
        let viewer = DemoViewer::with_snippets(&NONE);

        viewer.next();
        assert!(viewer.selected_snippet().is_none());
        assert!(viewer.highlighted().is_empty());
        assert!(!viewer.copy_selected(Instant::now()));
        assert!(!clipboard::has_content());
    }

    #[test]
    fn test_visibility_latches() {
        let viewer = DemoViewer::new();

        viewer.observe_visibility(0.05);
        assert!(!viewer.is_in_view());

        viewer.observe_visibility(0.1);
        assert!(viewer.is_in_view());

        viewer.observe_visibility(0.0);
        assert!(viewer.is_in_view());
    }

    #[test]
    fn test_highlighted_matches_selection() {
        let viewer = DemoViewer::new();
        viewer.select(1);
        let joined: String = viewer.highlighted().iter().map(|t| t.text).collect();
        assert_eq!(joined, SNIPPETS[1].code);
    }
}
