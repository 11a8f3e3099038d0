mod content;
mod node;

pub use content::Content;
pub use node::Element;

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    for child in root.child_elements() {
        if let Some(found) = find_element(child, id) {
            return Some(found);
        }
    }

    None
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            if let Some(found) = find_element_mut(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Chain of elements from `root` down to the element with `id`, inclusive.
fn path_to<'a>(root: &'a Element, id: &str) -> Option<Vec<&'a Element>> {
    if root.id == id {
        return Some(vec![root]);
    }

    for child in root.child_elements() {
        if let Some(mut path) = path_to(child, id) {
            path.insert(0, root);
            return Some(path);
        }
    }

    None
}

/// Find the nearest element matching `pred`, starting at the element with
/// `id` and walking up through its ancestors to `root`.
pub fn closest<'a>(
    root: &'a Element,
    id: &str,
    pred: impl Fn(&Element) -> bool,
) -> Option<&'a Element> {
    path_to(root, id)?.into_iter().rev().find(|el| pred(el))
}

/// Collect every element under `root` (including `root`) matching `pred`,
/// in document order.
pub fn query_all<'a>(root: &'a Element, pred: impl Fn(&Element) -> bool) -> Vec<&'a Element> {
    let mut found = Vec::new();
    collect(root, &pred, &mut found);
    found
}

fn collect<'a>(el: &'a Element, pred: &impl Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
    if pred(el) {
        out.push(el);
    }
    for child in el.child_elements() {
        collect(child, pred, out);
    }
}

/// Apply `f` to every element under `root` matching `pred`.
pub fn for_each_mut(
    root: &mut Element,
    pred: &impl Fn(&Element) -> bool,
    f: &mut impl FnMut(&mut Element),
) {
    if pred(root) {
        f(root);
    }
    if let Content::Children(children) = &mut root.content {
        for child in children {
            for_each_mut(child, pred, f);
        }
    }
}
