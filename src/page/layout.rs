//! Page layout - header, main content, in-article ad, live demo, footer.

use std::rc::Rc;

use log::{debug, warn};

use crate::ads::{ad_unit_with_sink, RequestSink};
use crate::demo::{mount_live_demo, DemoViewer, LiveDemoHandle};
use crate::dom::{self, Cleanup, DomError, ElementId};
use crate::host::GlobalAdQueue;
use super::ShowcaseConfig;

const ARTICLE_POINTS: [&str; 3] = [
    "Smart code completion and refactoring suggestions",
    "Real-time error detection and debugging assistance",
    "Context-aware documentation and best practices",
];

/// A mounted page.
///
/// Unmounting (explicitly or on drop) tears down the ad slot, stops the
/// live demo and releases every element under the root.
pub struct PageHandle {
    root: ElementId,
    viewer: Rc<DemoViewer>,
    demo: Option<LiveDemoHandle>,
    cleanups: Vec<Cleanup>,
    mounted: bool,
}

impl PageHandle {
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// State of the live demo panel.
    pub fn viewer(&self) -> &Rc<DemoViewer> {
        &self.viewer
    }

    pub fn live_demo(&self) -> Option<&LiveDemoHandle> {
        self.demo.as_ref()
    }

    /// Serialize the page to HTML.
    pub fn markup(&self) -> Result<String, DomError> {
        dom::render_markup(self.root)
    }

    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        for cleanup in self.cleanups.drain(..) {
            cleanup();
        }
        if let Some(demo) = self.demo.take() {
            demo.unmount();
        }
        dom::release_element(self.root);
        debug!("page unmounted");
    }
}

impl Drop for PageHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Mount the page with the ad unit submitting to the page-wide ad queue.
///
/// `content` runs with `main` as the parent context, before the article.
pub fn mount_page(config: &ShowcaseConfig, content: impl FnOnce()) -> PageHandle {
    mount_page_with_sink(config, Rc::new(GlobalAdQueue), content)
}

/// Mount the page with the ad unit submitting to `sink`.
pub fn mount_page_with_sink(
    config: &ShowcaseConfig,
    sink: Rc<dyn RequestSink>,
    content: impl FnOnce(),
) -> PageHandle {
    let root = dom::create_element("div");
    let viewer = Rc::new(DemoViewer::new());
    let mut cleanups = Vec::new();

    let demo = dom::with_parent(root, || {
        header(config);

        let main = dom::create_element("main");
        let demo = dom::with_parent(main, || {
            content();
            cleanups.push(article(config, sink));
            mount_live_demo(viewer.clone())
        });

        footer(config);
        if let Err(err) = decorate(root, main) {
            warn!("page decoration failed [{}]: {err}", err.as_label());
        }
        demo
    });

    debug!("page mounted at {root}");
    PageHandle {
        root,
        viewer,
        demo: Some(demo),
        cleanups,
        mounted: true,
    }
}

// =============================================================================
// Sections
// =============================================================================

fn decorate(root: ElementId, main: ElementId) -> Result<(), DomError> {
    dom::set_class(root, "min-h-screen flex flex-col bg-white")?;
    dom::set_class(main, "flex-grow")
}

fn header(config: &ShowcaseConfig) {
    let header = dom::create_element("header");
    let _ = dom::set_class(header, "sticky top-0 z-50 bg-white/80 backdrop-blur border-b border-gray-100");
    dom::with_parent(header, || {
        let nav = dom::create_element("nav");
        let _ = dom::set_class(nav, "container mx-auto px-4 py-4 flex items-center justify-between");
        dom::with_parent(nav, || {
            let title = dom::create_element("a");
            let _ = dom::set_attribute(title, "href", "/");
            let _ = dom::set_text(title, &config.site_title);

            let demo_link = dom::create_element("a");
            let _ = dom::set_attribute(demo_link, "href", "#examples");
            let _ = dom::set_text(demo_link, "Examples");
        });
    });
}

fn article(config: &ShowcaseConfig, sink: Rc<dyn RequestSink>) -> Cleanup {
    let section = dom::create_element("section");
    let _ = dom::set_class(
        section,
        "container mx-auto px-4 py-16 bg-gradient-to-b from-white to-gray-50",
    );

    let body = dom::with_parent(section, || dom::create_element("div"));
    let _ = dom::set_class(body, "max-w-4xl mx-auto");

    dom::with_parent(body, || {
        let intro = dom::create_element("div");
        let _ = dom::set_class(intro, "prose max-w-none mb-12");
        dom::with_parent(intro, || {
            let heading = dom::create_element("h2");
            let _ = dom::set_text(heading, "Supercharge Your Development Workflow");
            let lead = dom::create_element("p");
            let _ = dom::set_text(
                lead,
                "Experience the power of AI-driven development assistance that adapts to your coding style.",
            );
            let list = dom::create_element("ul");
            dom::with_parent(list, || {
                for point in ARTICLE_POINTS {
                    let item = dom::create_element("li");
                    let _ = dom::set_text(item, point);
                }
            });
        });

        let ad_cleanup = ad_unit_with_sink(config.ad_unit_props(), sink);

        let outro = dom::create_element("div");
        let _ = dom::set_class(outro, "prose max-w-none mt-12");
        dom::with_parent(outro, || {
            let heading = dom::create_element("h3");
            let _ = dom::set_text(heading, "Built for Modern Development");
            let body = dom::create_element("p");
            let _ = dom::set_text(
                body,
                "Stay ahead of the curve with an assistant that keeps pace with modern frameworks and legacy code alike.",
            );
        });

        ad_cleanup
    })
}

fn footer(config: &ShowcaseConfig) {
    let footer = dom::create_element("footer");
    let _ = dom::set_class(footer, "bg-gray-900 text-gray-400 py-12");
    dom::with_parent(footer, || {
        let note = dom::create_element("p");
        let _ = dom::set_text(note, &format!("{} - all rights reserved.", config.site_title));
    });
}
