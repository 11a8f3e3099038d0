use std::fmt::Write;

use crate::element::{Content, Element};

/// Serialize a tree to HTML-like markup.
///
/// Attributes print in key order and the generated `id` is omitted, so the
/// output is stable across runs. Form values print as a `value` attribute.
pub fn to_markup(root: &Element) -> String {
    let mut out = String::new();
    write_element(root, &mut out);
    out
}

fn write_element(el: &Element, out: &mut String) {
    let _ = write!(out, "<{}", el.tag);
    if !el.classes.is_empty() {
        let _ = write!(out, " class=\"{}\"", escape(&el.classes.join(" ")));
    }
    for (key, value) in &el.attrs {
        let _ = write!(out, " {}=\"{}\"", key, escape(value));
    }
    if let Some(value) = &el.value {
        let _ = write!(out, " value=\"{}\"", escape(value));
    }
    if el.disabled {
        out.push_str(" disabled");
    }
    out.push('>');

    match &el.content {
        Content::None => {}
        Content::Text(text) => out.push_str(&escape(text)),
        Content::Children(children) => {
            for child in children {
                write_element(child, out);
            }
        }
    }

    let _ = write!(out, "</{}>", el.tag);
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
