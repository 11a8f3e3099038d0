//! Interaction protocol between an event adapter and the table.
//!
//! Adapters translate native UI events into [`Event`]s and hand them to
//! [`FilterTable::dispatch`], which plays the part of the delegated listeners
//! on the header, body and footer. The typed handlers below can also be
//! called directly.

use tabledom::{Element, Event};

use crate::filter::FilterSpec;
use crate::model::{Record, RowId, Value};
use crate::table::FilterTable;
use crate::view::{COLUMN, PAGE, REMOVE_ROW, ROW_ID, SEARCH_COLUMN, UPDATED_CLASS, UPDATED_FIELD};

/// Which section of the table an event target lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Header,
    Body,
    Footer,
}

impl FilterTable {
    /// Route an adapter event. Returns true if the table acted on it.
    ///
    /// For input events the target's value is written into the tree first,
    /// so the tree mirrors what the user sees.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        let Some(region) = self.region_of(event.target()) else {
            return false;
        };

        if let Event::Input { target, value } = event {
            if let Some(el) = tabledom::find_element_mut(&mut self.root, target) {
                el.set_value(value.clone());
            }
        }

        match (region, event) {
            (Region::Header, Event::Input { target, .. }) => self.on_header_input(target),
            (Region::Body, Event::Click { target }) if self.listeners_attached => {
                self.on_body_click(target)
            }
            (Region::Body, Event::Input { target, .. }) if self.listeners_attached => {
                self.on_body_input(target)
            }
            (Region::Footer, Event::Click { target }) => self.on_footer_click(target),
            _ => false,
        }
    }

    fn region_of(&self, target: &str) -> Option<Region> {
        let contains = |section: Option<&Element>| {
            section.is_some_and(|el| tabledom::find_element(el, target).is_some())
        };
        if contains(self.header()) {
            Some(Region::Header)
        } else if contains(self.body()) {
            Some(Region::Body)
        } else if contains(self.footer()) {
            Some(Region::Footer)
        } else {
            None
        }
    }

    /// Enclosing row id of `target`, read from the row-identity marker.
    fn row_id_of(&self, target: &str) -> Option<RowId> {
        let body = self.body()?;
        tabledom::closest(body, target, |el| el.has_attr(ROW_ID))?
            .get_attr(ROW_ID)?
            .parse()
            .ok()
    }

    fn on_header_input(&mut self, target: &str) -> bool {
        let is_search = self
            .header()
            .and_then(|h| tabledom::find_element(h, target))
            .is_some_and(|el| el.has_attr(SEARCH_COLUMN));
        if !is_search {
            return false;
        }
        let spec = self.header_filter_spec();
        self.on_search_input_changed(&spec);
        true
    }

    fn on_body_click(&mut self, target: &str) -> bool {
        let wants_remove = self
            .body()
            .and_then(|body| tabledom::closest(body, target, |el| el.has_attr(REMOVE_ROW)))
            .is_some();
        if !wants_remove {
            return false;
        }
        match self.row_id_of(target) {
            Some(id) => self.on_remove_requested(id),
            None => false,
        }
    }

    /// Capture every bound control in the edited row as one patch.
    fn on_body_input(&mut self, target: &str) -> bool {
        let Some(id) = self.row_id_of(target) else {
            return false;
        };
        let Some(row_el) = self.row_element(id) else {
            return false;
        };

        let mut patch: Record = tabledom::query_all(row_el, |el| el.is_form_control())
            .into_iter()
            .filter_map(|el| {
                let column = el.get_attr(COLUMN)?;
                Some((column.to_string(), Value::from(el.value.clone().unwrap_or_default())))
            })
            .collect();
        patch.insert(UPDATED_FIELD, true);

        self.apply_edit(id, patch)
    }

    fn on_footer_click(&mut self, target: &str) -> bool {
        let Some(footer) = self.footer() else {
            return false;
        };
        let Some(button) = tabledom::closest(footer, target, |el| el.has_attr(PAGE)) else {
            return false;
        };
        if button.disabled {
            return false;
        }
        let page = button.get_attr(PAGE).map(str::to_string);
        match page.as_deref() {
            Some("prev") => self.prev_page(),
            Some("next") => self.next_page(),
            Some(n) => match n.parse() {
                Ok(number) => self.set_page(number),
                Err(_) => return false,
            },
            None => return false,
        };
        true
    }

    // -------------------------------------------------------------------------
    // Typed handlers
    // -------------------------------------------------------------------------

    /// A remove control was activated for row `id`.
    pub fn on_remove_requested(&mut self, id: RowId) -> bool {
        self.remove(id)
    }

    /// A single field of row `id` was edited in place.
    ///
    /// The store is updated and the row is marked as edited, but its element
    /// is not rebuilt, so focus and cursor state survive. The next full
    /// render brings the element back in line with the store.
    pub fn on_field_edited(&mut self, id: RowId, field: &str, value: impl Into<Value>) -> bool {
        let patch = Record::new().set(field, value).set(UPDATED_FIELD, true);
        self.apply_edit(id, patch)
    }

    /// The header's search state changed to `spec`.
    pub fn on_search_input_changed(&mut self, spec: &FilterSpec) {
        self.filter(spec);
    }

    fn apply_edit(&mut self, id: RowId, patch: Record) -> bool {
        if !self.update(id, patch, false) {
            return false;
        }
        if let Some(el) = self.row_element_mut(id) {
            el.add_class(UPDATED_CLASS);
        }
        log::debug!("[edit] row {id} updated in place");
        true
    }
}
