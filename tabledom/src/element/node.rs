use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// A node in a headless document tree.
///
/// `id` is the element's identity handle. It is generated on construction
/// and survives every in-place mutation, so two handles compare equal only
/// when they name the same live element. Markers are plain string
/// attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: String,

    // Content
    pub content: Content,

    // Markup
    pub attrs: BTreeMap<String, String>,
    pub classes: Vec<String>,

    // Form state
    /// Current value of a form control (input, select, textarea).
    pub value: Option<String>,
    /// Disabled elements don't receive input.
    pub disabled: bool,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            tag: String::from("div"),
            content: Content::None,
            attrs: BTreeMap::new(),
            classes: Vec::new(),
            value: None,
            disabled: false,
        }
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            id: generate_id(&tag),
            tag,
            ..Default::default()
        }
    }

    pub fn table() -> Self {
        Self::new("table")
    }

    pub fn thead() -> Self {
        Self::new("thead")
    }

    pub fn tbody() -> Self {
        Self::new("tbody")
    }

    pub fn tfoot() -> Self {
        Self::new("tfoot")
    }

    pub fn tr() -> Self {
        Self::new("tr")
    }

    pub fn th() -> Self {
        Self::new("th")
    }

    pub fn td() -> Self {
        Self::new("td")
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Content::Text(content.into()),
            ..Self::new("span")
        }
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self {
            content: Content::Text(label.into()),
            ..Self::new("button")
        }
    }

    /// Create a text input element.
    pub fn input(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new("input")
        }
    }

    pub fn select(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new("select")
        }
    }

    pub fn textarea(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new("textarea")
        }
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // Markup
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class unless it is already present.
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    /// True for elements whose value is edited by the user.
    pub fn is_form_control(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "select" | "textarea")
    }

    /// Text content, if this element holds text.
    pub fn text_content(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            _ => self.content = Content::Children(new_children.into_iter().collect()),
        }
        self
    }

    pub fn child_elements(&self) -> &[Element] {
        self.content.children()
    }

    pub fn push_child(&mut self, child: Element) {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
    }

    /// Insert a child at `index`, clamped to the current child count.
    pub fn insert_child(&mut self, index: usize, child: Element) {
        match &mut self.content {
            Content::Children(children) => {
                let index = index.min(children.len());
                children.insert(index, child);
            }
            _ => self.content = Content::Children(vec![child]),
        }
    }

    /// Replace all children in one step.
    pub fn set_children(&mut self, children: Vec<Element>) {
        self.content = Content::Children(children);
    }

    /// Remove the first direct child matching `pred` and return it.
    pub fn remove_child_where(&mut self, pred: impl Fn(&Element) -> bool) -> Option<Element> {
        let Content::Children(children) = &mut self.content else {
            return None;
        };
        let index = children.iter().position(pred)?;
        Some(children.remove(index))
    }

    /// Swap the first direct child matching `pred` for `replacement`.
    /// Returns the element that was replaced.
    pub fn replace_child_where(
        &mut self,
        pred: impl Fn(&Element) -> bool,
        replacement: Element,
    ) -> Option<Element> {
        let Content::Children(children) = &mut self.content else {
            return None;
        };
        let slot = children.iter_mut().find(|c| pred(c))?;
        Some(std::mem::replace(slot, replacement))
    }

    pub fn find_child_mut(&mut self, pred: impl Fn(&Element) -> bool) -> Option<&mut Element> {
        match &mut self.content {
            Content::Children(children) => children.iter_mut().find(|c| pred(c)),
            _ => None,
        }
    }
}
