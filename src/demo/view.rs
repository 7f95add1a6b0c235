//! Live Demo View - the section element tree for a [`DemoViewer`].
//!
//! Static structure (heading, toolbar, code frame) is built once. The
//! parts that depend on viewer state (tab classes, copy label, code
//! spans, reveal class) are rebuilt by `refresh`, which an effect runs
//! whenever the viewer's signals change.

use std::rc::Rc;

use log::warn;
use spark_signals::effect;

use crate::dom::{self, DomError, ElementId};
use super::highlight::BACKGROUND;
use super::viewer::DemoViewer;

const TAB_SELECTED: &str = "px-4 py-2 rounded-lg bg-indigo-100 text-indigo-700 shadow-sm";
const TAB_IDLE: &str = "px-4 py-2 rounded-lg hover:bg-gray-100";

#[derive(Debug, Clone, Copy)]
struct Parts {
    section: ElementId,
    panel: ElementId,
    tabs: ElementId,
    copy_icon: ElementId,
    copy_label: ElementId,
    code: ElementId,
}

/// A mounted live demo section.
pub struct LiveDemoHandle {
    viewer: Rc<DemoViewer>,
    parts: Parts,
    stop_effect: Option<Box<dyn FnOnce()>>,
}

impl LiveDemoHandle {
    /// The `section#examples` element.
    pub fn section(&self) -> ElementId {
        self.parts.section
    }

    /// Tab buttons in order.
    pub fn tabs(&self) -> Vec<ElementId> {
        dom::children(self.parts.tabs)
    }

    /// The copy button's label element.
    pub fn copy_label(&self) -> ElementId {
        self.parts.copy_label
    }

    /// The `code` element holding one span per token.
    pub fn code(&self) -> ElementId {
        self.parts.code
    }

    pub fn viewer(&self) -> &Rc<DemoViewer> {
        &self.viewer
    }

    /// Re-render the state-dependent parts from the viewer.
    pub fn refresh(&self) {
        refresh(&self.viewer, self.parts);
    }

    /// Stop reacting and release the section.
    pub fn unmount(mut self) {
        self.stop();
        dom::release_element(self.parts.section);
    }

    fn stop(&mut self) {
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
    }
}

impl Drop for LiveDemoHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Build the live demo section under the current parent context.
pub fn mount_live_demo(viewer: Rc<DemoViewer>) -> LiveDemoHandle {
    let parts = match build(&viewer) {
        Ok(parts) => parts,
        Err((parts, err)) => {
            warn!("live demo built partially [{}]: {err}", err.as_label());
            parts
        }
    };

    let effect_viewer = viewer.clone();
    let stop_fn = effect(move || {
        // Read every signal so the effect tracks them all
        let _ = effect_viewer.selected_signal().get();
        let _ = effect_viewer.copied_signal().get();
        let _ = effect_viewer.in_view_signal().get();
        refresh(&effect_viewer, parts);
    });

    LiveDemoHandle {
        viewer,
        parts,
        stop_effect: Some(Box::new(stop_fn)),
    }
}

// =============================================================================
// Build
// =============================================================================

fn build(viewer: &DemoViewer) -> Result<Parts, (Parts, DomError)> {
    let section = dom::create_element("section");
    let panel = dom::with_parent(section, || dom::create_element("div"));

    dom::with_parent(panel, || {
        let intro = dom::create_element("div");
        dom::with_parent(intro, || {
            let heading = dom::create_element("h2");
            let _ = dom::set_text(heading, "Live Demo");
            let blurb = dom::create_element("p");
            let _ = dom::set_text(
                blurb,
                "Experience my coding capabilities firsthand with these interactive examples.",
            );
        });
    });

    let frame = dom::with_parent(panel, || dom::create_element("div"));
    let tabs = dom::with_parent(frame, || {
        let tab_bar = dom::create_element("div");
        dom::with_parent(tab_bar, || dom::create_element("div"))
    });
    let editor = dom::with_parent(frame, || dom::create_element("div"));

    let toolbar = dom::with_parent(editor, || dom::create_element("div"));
    let copy = dom::with_parent(toolbar, || {
        let caption = dom::create_element("span");
        let _ = dom::set_text(caption, "Code Example");
        dom::create_element("button")
    });
    let (copy_icon, copy_label) = dom::with_parent(copy, || {
        (dom::create_element("span"), dom::create_element("span"))
    });
    dom::with_parent(toolbar, || {
        let run = dom::create_element("button");
        let _ = dom::set_attribute(run, "data-action", "run");
        dom::with_parent(run, || {
            let label = dom::create_element("span");
            let _ = dom::set_text(label, "Run");
        });
    });

    let pre = dom::with_parent(editor, || dom::create_element("pre"));
    let code = dom::with_parent(pre, || dom::create_element("code"));

    let parts = Parts {
        section,
        panel,
        tabs,
        copy_icon,
        copy_label,
        code,
    };

    let decorate = || -> Result<(), DomError> {
        dom::set_attribute(section, "id", "examples")?;
        dom::set_class(section, "py-20 bg-gradient-to-b from-gray-50 to-white")?;
        dom::set_attribute(copy, "data-action", "copy")?;
        dom::set_style(pre, "background", &BACKGROUND.to_css())?;
        dom::set_class(code, "language-javascript")?;
        build_tabs(viewer, tabs)
    };

    decorate().map(|()| parts).map_err(|err| (parts, err))
}

fn build_tabs(viewer: &DemoViewer, tabs: ElementId) -> Result<(), DomError> {
    dom::set_class(tabs, "flex space-x-1 p-4")?;
    dom::set_attribute(tabs, "role", "tablist")?;
    dom::with_parent(tabs, || -> Result<(), DomError> {
        for (index, snippet) in viewer.snippets().iter().enumerate() {
            let tab = dom::create_element("button");
            dom::set_text(tab, snippet.title)?;
            dom::set_attribute(tab, "role", "tab")?;
            dom::set_attribute(tab, "data-index", &index.to_string())?;
        }
        Ok(())
    })
}

// =============================================================================
// Refresh
// =============================================================================

fn refresh(viewer: &DemoViewer, parts: Parts) {
    if let Err(err) = try_refresh(viewer, parts) {
        warn!("live demo refresh failed [{}]: {err}", err.as_label());
    }
}

fn try_refresh(viewer: &DemoViewer, parts: Parts) -> Result<(), DomError> {
    let reveal = if viewer.is_in_view() { "visible" } else { "hidden" };
    dom::set_class(parts.panel, &format!("container mx-auto px-4 {reveal}"))?;

    let selected = viewer.selected();
    for (index, tab) in dom::children(parts.tabs).into_iter().enumerate() {
        let is_selected = index == selected;
        dom::set_class(tab, if is_selected { TAB_SELECTED } else { TAB_IDLE })?;
        dom::set_attribute(tab, "aria-selected", if is_selected { "true" } else { "false" })?;
    }

    let icon = if viewer.is_copied() { "icon-check text-green-400" } else { "icon-copy text-gray-400" };
    dom::set_class(parts.copy_icon, icon)?;
    dom::set_text(parts.copy_label, viewer.copy_label())?;

    dom::clear_children(parts.code)?;
    dom::with_parent(parts.code, || -> Result<(), DomError> {
        for token in viewer.highlighted() {
            let span = dom::create_element("span");
            dom::set_text(span, token.text)?;
            if let Some(class) = token.kind.css_class() {
                dom::set_class(span, class)?;
                dom::set_style(span, "color", &token.kind.color().to_css())?;
                for (property, value) in token.kind.attrs().css_declarations() {
                    dom::set_style(span, property, value)?;
                }
            }
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use crate::demo::{clipboard, SNIPPETS};

    fn setup() {
        dom::reset_dom();
        clipboard::clear();
    }

    fn code_text(handle: &LiveDemoHandle) -> String {
        dom::children(handle.code())
            .into_iter()
            .filter_map(dom::text)
            .collect()
    }

    #[test]
    fn test_mount_structure() {
        setup();
        let handle = mount_live_demo(Rc::new(DemoViewer::new()));
        handle.refresh();

        assert_eq!(dom::attribute(handle.section(), "id").as_deref(), Some("examples"));
        assert_eq!(dom::get_element_by_id("examples"), Some(handle.section()));

        let tabs = handle.tabs();
        assert_eq!(tabs.len(), 3);
        assert_eq!(dom::text(tabs[1]).as_deref(), Some("API Endpoint"));
        assert_eq!(dom::attribute(tabs[0], "aria-selected").as_deref(), Some("true"));
        assert_eq!(dom::attribute(tabs[1], "aria-selected").as_deref(), Some("false"));

        assert_eq!(dom::text(handle.copy_label()).as_deref(), Some("Copy"));
        assert_eq!(code_text(&handle), SNIPPETS[0].code);
    }

    #[test]
    fn test_selection_rerenders() {
        setup();
        let handle = mount_live_demo(Rc::new(DemoViewer::new()));

        handle.viewer().select(2);
        handle.refresh();

        let tabs = handle.tabs();
        assert_eq!(dom::class(tabs[2]).as_deref(), Some(TAB_SELECTED));
        assert_eq!(dom::class(tabs[0]).as_deref(), Some(TAB_IDLE));
        assert_eq!(code_text(&handle), SNIPPETS[2].code);
    }

    #[test]
    fn test_copy_label_follows_state() {
        setup();
        let handle = mount_live_demo(Rc::new(DemoViewer::new()));
        let now = Instant::now();

        handle.viewer().copy_selected(now);
        handle.refresh();
        assert_eq!(dom::text(handle.copy_label()).as_deref(), Some("Copied!"));

        handle.viewer().tick(now + crate::demo::COPY_FEEDBACK);
        handle.refresh();
        assert_eq!(dom::text(handle.copy_label()).as_deref(), Some("Copy"));
    }

    #[test]
    fn test_keyword_spans_styled() {
        setup();
        let handle = mount_live_demo(Rc::new(DemoViewer::new()));
        handle.refresh();

        let keyword = dom::children(handle.code())
            .into_iter()
            .find(|span| dom::text(*span).as_deref() == Some("function"))
            .unwrap();
        assert_eq!(dom::class(keyword).as_deref(), Some("hljs-keyword"));
        assert_eq!(dom::style(keyword, "color").as_deref(), Some("#c678dd"));
    }

    #[test]
    fn test_unmount_releases() {
        setup();
        let handle = mount_live_demo(Rc::new(DemoViewer::new()));
        let section = handle.section();

        handle.unmount();
        assert!(!dom::is_allocated(section));
        assert_eq!(dom::element_count(), 0);
    }

    #[test]
    fn test_effect_renders_on_mount() {
        setup();
        let handle = mount_live_demo(Rc::new(DemoViewer::new()));

        assert_eq!(dom::text(handle.copy_label()).as_deref(), Some("Copy"));
        assert_eq!(code_text(&handle), SNIPPETS[0].code);
    }

    #[test]
    fn test_selection_rerenders_without_refresh() {
        setup();
        let handle = mount_live_demo(Rc::new(DemoViewer::new()));

        handle.viewer().select(2);

        let tabs = handle.tabs();
        assert_eq!(dom::class(tabs[2]).as_deref(), Some(TAB_SELECTED));
        assert_eq!(dom::class(tabs[0]).as_deref(), Some(TAB_IDLE));
        assert_eq!(dom::attribute(tabs[2], "aria-selected").as_deref(), Some("true"));
        assert_eq!(dom::attribute(tabs[0], "aria-selected").as_deref(), Some("false"));
        assert_eq!(code_text(&handle), SNIPPETS[2].code);
    }

    #[test]
    fn test_copy_label_rerenders_without_refresh() {
        setup();
        let handle = mount_live_demo(Rc::new(DemoViewer::new()));
        let now = Instant::now();

        handle.viewer().copy_selected(now);
        assert_eq!(dom::text(handle.copy_label()).as_deref(), Some("Copied!"));

        handle.viewer().tick(now + crate::demo::COPY_FEEDBACK);
        assert_eq!(dom::text(handle.copy_label()).as_deref(), Some("Copy"));
    }

    #[test]
    fn test_visibility_reveals_without_refresh() {
        setup();
        let handle = mount_live_demo(Rc::new(DemoViewer::new()));
        let panel = dom::children(handle.section())[0];
        assert!(dom::has_class(panel, "hidden"));

        handle.viewer().observe_visibility(0.5);
        assert!(dom::has_class(panel, "visible"));
        assert!(!dom::has_class(panel, "hidden"));
    }

    #[test]
    fn test_unmount_stops_rerendering() {
        setup();
        let viewer = Rc::new(DemoViewer::new());
        let handle = mount_live_demo(viewer.clone());
        let mounted = dom::element_count();

        handle.unmount();
        assert_eq!(dom::element_count(), 0);

        // Fresh elements take over every freed index; a live effect would
        // restyle or fill them.
        let fresh: Vec<ElementId> = (0..mounted).map(|_| dom::create_element("div")).collect();
        viewer.select(1);
        viewer.copy_selected(Instant::now());
        viewer.observe_visibility(1.0);

        assert_eq!(dom::element_count(), mounted);
        for id in fresh {
            assert_eq!(dom::class(id).as_deref(), Some(""));
            assert!(dom::text(id).is_none());
            assert!(dom::children(id).is_empty());
        }
    }
}
