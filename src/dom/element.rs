//! Element operations - tree structure, attributes, class, style and text.
//!
//! Every operation takes an [`ElementId`] and fails with
//! [`DomError::UnknownElement`] once the element has been released.

use super::registry::{record_mutation, release_element, with_element};
use super::{DomError, ElementId};

// =============================================================================
// Tree Structure
// =============================================================================

/// Append `child` as the last child of `parent`.
///
/// A child that already has a parent is moved. Appending an ancestor
/// under its own descendant fails with [`DomError::Cycle`].
pub fn append_child(parent: ElementId, child: ElementId) -> Result<(), DomError> {
    with_element(child, |_| ())?;
    with_element(parent, |_| ())?;

    let mut cursor = Some(parent);
    while let Some(current) = cursor {
        if current == child {
            return Err(DomError::Cycle { parent, child });
        }
        cursor = with_element(current, |data| data.parent)?;
    }

    if let Some(old_parent) = with_element(child, |data| data.parent)? {
        with_element(old_parent, |data| data.children.retain(|c| *c != child))?;
    }

    with_element(parent, |data| data.children.push(child))?;
    with_element(child, |data| data.parent = Some(parent))?;
    record_mutation();
    Ok(())
}

/// Remove and release every child of `id` (the `innerHTML = ""` operation).
///
/// Returns the number of children removed.
pub fn clear_children(id: ElementId) -> Result<usize, DomError> {
    let children = with_element(id, |data| data.children.clone())?;
    let count = children.len();
    for child in children {
        release_element(child);
    }
    Ok(count)
}

/// Children of `id` in document order. Empty for unknown elements.
pub fn children(id: ElementId) -> Vec<ElementId> {
    with_element(id, |data| data.children.clone()).unwrap_or_default()
}

/// Parent of `id`, if attached.
pub fn parent(id: ElementId) -> Option<ElementId> {
    with_element(id, |data| data.parent).ok().flatten()
}

// =============================================================================
// Tag, Class, Attributes
// =============================================================================

/// Tag name of `id`.
pub fn tag(id: ElementId) -> Option<String> {
    with_element(id, |data| data.tag.clone()).ok()
}

/// Replace the class list.
pub fn set_class(id: ElementId, class: &str) -> Result<(), DomError> {
    with_element(id, |data| data.class = class.to_string())
}

/// Class list of `id` (space separated).
pub fn class(id: ElementId) -> Option<String> {
    with_element(id, |data| data.class.clone()).ok()
}

/// Check whether the class list contains `name`.
pub fn has_class(id: ElementId, name: &str) -> bool {
    with_element(id, |data| data.class.split_whitespace().any(|c| c == name)).unwrap_or(false)
}

/// Set an attribute, replacing any previous value in place.
pub fn set_attribute(id: ElementId, name: &str, value: &str) -> Result<(), DomError> {
    with_element(id, |data| {
        match data.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => data.attributes.push((name.to_string(), value.to_string())),
        }
    })
}

/// Attribute value of `id`.
pub fn attribute(id: ElementId, name: &str) -> Option<String> {
    with_element(id, |data| {
        data.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    })
    .ok()
    .flatten()
}

/// All attributes in insertion order.
pub fn attributes(id: ElementId) -> Vec<(String, String)> {
    with_element(id, |data| data.attributes.clone()).unwrap_or_default()
}

// =============================================================================
// Style & Text
// =============================================================================

/// Set one style declaration, replacing any previous value in place.
pub fn set_style(id: ElementId, property: &str, value: &str) -> Result<(), DomError> {
    with_element(id, |data| {
        match data.style.iter_mut().find(|(p, _)| p == property) {
            Some((_, v)) => *v = value.to_string(),
            None => data.style.push((property.to_string(), value.to_string())),
        }
    })
}

/// Style value of one property.
pub fn style(id: ElementId, property: &str) -> Option<String> {
    with_element(id, |data| {
        data.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.clone())
    })
    .ok()
    .flatten()
}

/// All style declarations in insertion order.
pub fn styles(id: ElementId) -> Vec<(String, String)> {
    with_element(id, |data| data.style.clone()).unwrap_or_default()
}

/// Set the text content rendered before any children.
pub fn set_text(id: ElementId, text: &str) -> Result<(), DomError> {
    with_element(id, |data| data.text = Some(text.to_string()))
}

/// Own text content of `id` (children not included).
pub fn text(id: ElementId) -> Option<String> {
    with_element(id, |data| data.text.clone()).ok().flatten()
}
