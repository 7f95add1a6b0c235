//! Element tree - a DOM-like store of mountable elements.
//!
//! Elements are indices into a thread-local registry rather than owned
//! objects. A container handed to a component is just an [`ElementId`];
//! whoever created it owns its lifetime and releases it with
//! [`release_element`].
//!
//! # Example
//!
//! ```ignore
//! use spark_showcase::dom::{self, with_parent};
//!
//! let section = dom::create_element("section");
//! with_parent(section, || {
//!     let heading = dom::create_element("h2");
//!     let _ = dom::set_text(heading, "Live Demo");
//! });
//!
//! let html = dom::render_markup(section)?;
//! dom::release_element(section);
//! ```

use std::fmt;

use thiserror::Error;

mod element;
mod markup;
mod registry;

pub use element::{
    append_child, attribute, attributes, children, class, clear_children, has_class, parent,
    set_attribute, set_class, set_style, set_text, style, styles, tag, text,
};
pub use markup::{escape, render_markup};
pub use registry::{
    create_detached, create_element, current_parent, element_count, get_element_by_id,
    is_allocated, mutation_count, on_destroy, pop_parent_context, push_parent_context,
    release_element, reset_dom, with_parent,
};

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by components.
///
/// Call it to unmount the component and release its elements.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Element Id
// =============================================================================

/// Handle to an element in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    /// Registry index of this element.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Errors from element tree operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomError {
    /// The element was never created or has been released.
    #[error("unknown element {0}")]
    UnknownElement(ElementId),

    /// Appending would make an element its own ancestor.
    #[error("cannot append {child} under its descendant {parent}")]
    Cycle {
        parent: ElementId,
        child: ElementId,
    },
}

impl DomError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            DomError::UnknownElement(_) => "dom_unknown_element",
            DomError::Cycle { .. } => "dom_cycle",
        }
    }
}
