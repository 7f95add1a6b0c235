//! Element Registry - Index allocation and storage for the element tree.
//!
//! Manages the lifecycle of elements:
//! - Free index pool for O(1) reuse
//! - Parent context stack for nested element creation
//! - Destroy callbacks per element
//! - A structural mutation counter (children added or removed)

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use log::debug;

use super::{DomError, ElementId};

// =============================================================================
// Element Storage
// =============================================================================

/// Per-element data. Attributes and style keep insertion order so markup
/// output is stable.
#[derive(Debug, Default)]
pub(super) struct ElementData {
    pub tag: String,
    pub class: String,
    pub attributes: Vec<(String, String)>,
    pub style: Vec<(String, String)>,
    pub text: Option<String>,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
}

impl ElementData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }
}

thread_local! {
    /// Slot per index; `None` for freed indices.
    static ELEMENTS: RefCell<Vec<Option<ElementData>>> = RefCell::new(Vec::new());

    /// Pool of freed indices for reuse.
    static FREE_INDICES: RefCell<Vec<usize>> = RefCell::new(Vec::new());

    /// Stack of parent elements for nested creation.
    static PARENT_STACK: RefCell<Vec<ElementId>> = RefCell::new(Vec::new());

    /// Destroy callbacks registered per element.
    static DESTROY_CALLBACKS: RefCell<HashMap<ElementId, Vec<Box<dyn FnOnce()>>>> = RefCell::new(HashMap::new());

    /// Count of structural mutations since the last reset.
    static MUTATIONS: Cell<u64> = const { Cell::new(0) };
}

/// Run `f` against the data of a live element.
pub(super) fn with_element<R>(
    id: ElementId,
    f: impl FnOnce(&mut ElementData) -> R,
) -> Result<R, DomError> {
    ELEMENTS.with(|elements| {
        let mut elements = elements.borrow_mut();
        match elements.get_mut(id.index()).and_then(Option::as_mut) {
            Some(data) => Ok(f(data)),
            None => Err(DomError::UnknownElement(id)),
        }
    })
}

pub(super) fn record_mutation() {
    MUTATIONS.with(|m| m.set(m.get() + 1));
}

// =============================================================================
// Parent Context Stack
// =============================================================================

/// Get the element new elements are created under, if any.
pub fn current_parent() -> Option<ElementId> {
    PARENT_STACK.with(|stack| stack.borrow().last().copied())
}

/// Push a parent element onto the stack.
pub fn push_parent_context(id: ElementId) {
    PARENT_STACK.with(|stack| stack.borrow_mut().push(id));
}

/// Pop a parent element from the stack.
pub fn pop_parent_context() {
    PARENT_STACK.with(|stack| {
        stack.borrow_mut().pop();
    });
}

/// Run `f` with `parent` as the current parent context.
pub fn with_parent<R>(parent: ElementId, f: impl FnOnce() -> R) -> R {
    push_parent_context(parent);
    let result = f();
    pop_parent_context();
    result
}

// =============================================================================
// Allocation
// =============================================================================

/// Create a detached element with the given tag.
pub fn create_detached(tag: &str) -> ElementId {
    let index = FREE_INDICES.with(|free| free.borrow_mut().pop());

    ELEMENTS.with(|elements| {
        let mut elements = elements.borrow_mut();
        match index {
            Some(index) => {
                elements[index] = Some(ElementData::new(tag));
                ElementId(index)
            }
            None => {
                elements.push(Some(ElementData::new(tag)));
                ElementId(elements.len() - 1)
            }
        }
    })
}

/// Create an element and append it to the current parent context (if any).
pub fn create_element(tag: &str) -> ElementId {
    let id = create_detached(tag);
    if let Some(parent) = current_parent() {
        if let Err(err) = super::element::append_child(parent, id) {
            debug!("{id} left detached, parent context {parent} unusable: {err}");
        }
    }
    id
}

/// Release an element back to the pool.
///
/// Also recursively releases all children, and detaches the element
/// from its parent.
pub fn release_element(id: ElementId) {
    let Ok((parent, children)) = with_element(id, |data| (data.parent, data.children.clone())) else {
        return;
    };

    for child in children {
        release_element(child);
    }

    run_destroy_callbacks(id);

    if let Some(parent) = parent {
        let removed = with_element(parent, |data| {
            let before = data.children.len();
            data.children.retain(|c| *c != id);
            before != data.children.len()
        });
        if removed == Ok(true) {
            record_mutation();
        }
    }

    ELEMENTS.with(|elements| {
        if let Some(slot) = elements.borrow_mut().get_mut(id.index()) {
            *slot = None;
        }
    });
    FREE_INDICES.with(|free| free.borrow_mut().push(id.index()));
}

// =============================================================================
// Destroy Callbacks
// =============================================================================

/// Register a callback to run when the element is released.
///
/// Ignored for an element that is already gone, so a reused index never
/// inherits callbacks meant for its previous occupant.
pub fn on_destroy(id: ElementId, callback: impl FnOnce() + 'static) {
    if !is_allocated(id) {
        debug!("on_destroy for released element {id} dropped");
        return;
    }
    DESTROY_CALLBACKS.with(|callbacks| {
        callbacks
            .borrow_mut()
            .entry(id)
            .or_default()
            .push(Box::new(callback));
    });
}

fn run_destroy_callbacks(id: ElementId) {
    let callbacks = DESTROY_CALLBACKS.with(|callbacks| callbacks.borrow_mut().remove(&id));
    if let Some(callbacks) = callbacks {
        for callback in callbacks {
            callback();
        }
    }
}

// =============================================================================
// Lookups
// =============================================================================

/// Check if an element is currently allocated.
pub fn is_allocated(id: ElementId) -> bool {
    with_element(id, |_| ()).is_ok()
}

/// Count of live elements.
pub fn element_count() -> usize {
    ELEMENTS.with(|elements| elements.borrow().iter().filter(|e| e.is_some()).count())
}

/// Find the first live element whose `id` attribute equals `dom_id`.
pub fn get_element_by_id(dom_id: &str) -> Option<ElementId> {
    ELEMENTS.with(|elements| {
        elements.borrow().iter().enumerate().find_map(|(index, data)| {
            let data = data.as_ref()?;
            data.attributes
                .iter()
                .any(|(name, value)| name == "id" && value == dom_id)
                .then_some(ElementId(index))
        })
    })
}

/// Structural mutations (children added or removed) since the last reset.
pub fn mutation_count() -> u64 {
    MUTATIONS.with(Cell::get)
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Reset all element state.
pub fn reset_dom() {
    ELEMENTS.with(|elements| elements.borrow_mut().clear());
    FREE_INDICES.with(|free| free.borrow_mut().clear());
    PARENT_STACK.with(|stack| stack.borrow_mut().clear());
    DESTROY_CALLBACKS.with(|callbacks| callbacks.borrow_mut().clear());
    MUTATIONS.with(|m| m.set(0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{append_child, children};

    #[test]
    fn test_create_and_reuse() {
        reset_dom();

        let a = create_element("div");
        let b = create_element("span");
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(element_count(), 2);

        release_element(a);
        assert!(!is_allocated(a));
        assert!(is_allocated(b));

        let c = create_element("p");
        assert_eq!(c.index(), a.index());
    }

    #[test]
    fn test_parent_context() {
        reset_dom();

        let root = create_element("main");
        let child = with_parent(root, || create_element("section"));
        assert_eq!(children(root), vec![child]);
        assert_eq!(current_parent(), None);
    }

    #[test]
    fn test_release_is_recursive() {
        reset_dom();

        let root = create_element("div");
        let (mid, leaf) = with_parent(root, || {
            let mid = create_element("div");
            let leaf = with_parent(mid, || create_element("span"));
            (mid, leaf)
        });

        release_element(mid);
        assert!(!is_allocated(mid));
        assert!(!is_allocated(leaf));
        assert!(children(root).is_empty());
    }

    #[test]
    fn test_destroy_callback() {
        use std::rc::Rc;

        reset_dom();

        let called = Rc::new(Cell::new(false));
        let called_clone = called.clone();

        let id = create_element("div");
        on_destroy(id, move || called_clone.set(true));

        assert!(!called.get());
        release_element(id);
        assert!(called.get());
    }

    #[test]
    fn test_destroy_callback_on_released_id_dropped() {
        use std::rc::Rc;

        reset_dom();

        let called = Rc::new(Cell::new(false));
        let called_clone = called.clone();

        let old = create_element("div");
        release_element(old);
        on_destroy(old, move || called_clone.set(true));

        let fresh = create_element("span");
        assert_eq!(fresh, old);
        release_element(fresh);
        assert!(!called.get());
    }

    #[test]
    fn test_create_under_released_parent_stays_detached() {
        reset_dom();

        let other = create_element("div");
        let parent = create_element("div");
        release_element(parent);
        release_element(other);

        // Reuses `other`'s index, so `parent` is still unallocated
        let child = with_parent(parent, || create_element("span"));
        assert_eq!(child, other);
        assert!(!is_allocated(parent));
        assert_eq!(crate::dom::parent(child), None);
    }

    #[test]
    fn test_mutation_count() {
        reset_dom();

        let parent = create_detached("div");
        let child = create_detached("span");
        assert_eq!(mutation_count(), 0);

        append_child(parent, child).unwrap();
        assert_eq!(mutation_count(), 1);

        release_element(child);
        assert_eq!(mutation_count(), 2);
    }

    #[test]
    fn test_get_element_by_id() {
        reset_dom();

        let id = create_element("section");
        crate::dom::set_attribute(id, "id", "examples").unwrap();
        assert_eq!(get_element_by_id("examples"), Some(id));
        assert_eq!(get_element_by_id("missing"), None);
    }
}
