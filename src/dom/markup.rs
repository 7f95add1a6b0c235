//! Markup serialization - render an element subtree as HTML.

use super::element::{attributes, children, class, styles, tag, text};
use super::{DomError, ElementId};

/// Render `id` and its subtree as HTML.
///
/// Attribute order follows insertion order; `class` comes first and
/// `style` last. Text is emitted before children.
pub fn render_markup(id: ElementId) -> Result<String, DomError> {
    let mut out = String::new();
    write_element(id, &mut out)?;
    Ok(out)
}

fn write_element(id: ElementId, out: &mut String) -> Result<(), DomError> {
    let tag = tag(id).ok_or(DomError::UnknownElement(id))?;

    out.push('<');
    out.push_str(&tag);

    if let Some(class) = class(id).filter(|c| !c.is_empty()) {
        push_attribute(out, "class", &class);
    }
    for (name, value) in attributes(id) {
        push_attribute(out, &name, &value);
    }
    let styles = styles(id);
    if !styles.is_empty() {
        let style = styles
            .iter()
            .map(|(p, v)| format!("{p}: {v}"))
            .collect::<Vec<_>>()
            .join("; ");
        push_attribute(out, "style", &style);
    }
    out.push('>');

    if let Some(text) = text(id) {
        out.push_str(&escape(&text, false));
    }
    for child in children(id) {
        write_element(child, out)?;
    }

    out.push_str("</");
    out.push_str(&tag);
    out.push('>');
    Ok(())
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value, true));
    out.push('"');
}

/// Escape text for HTML. Quotes are only escaped inside attributes.
pub fn escape(input: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
