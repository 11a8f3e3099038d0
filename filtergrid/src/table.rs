//! The table widget: row store, filter state and pagination behind one owner.

use tabledom::Element;

use crate::config::{FilterEndHook, ListenerHook, RowTemplate, TableConfig};
use crate::error::TableError;
use crate::filter::{self, FilterSpec};
use crate::model::{Record, Row, RowId, Value};
use crate::paginator::Paginator;
use crate::store::RowStore;

/// A filterable, paginated, editable table bound to an element tree.
///
/// The row store is the source of truth; the body rows under [`table`] are
/// derived from it on every render. All mutation goes through the methods
/// here, and every method runs to completion before returning.
///
/// [`table`]: FilterTable::table
pub struct FilterTable {
    pub(crate) store: RowStore,
    pub(crate) paginator: Option<Paginator>,
    pub(crate) root: Element,
    pub(crate) body_id: String,
    pub(crate) header_id: Option<String>,
    pub(crate) footer_id: Option<String>,
    pub(crate) template: RowTemplate,
    pub(crate) listener_hook: Option<ListenerHook>,
    pub(crate) on_filter_end: Option<FilterEndHook>,
    /// Delegated listeners are attached on the first body render.
    pub(crate) listeners_attached: bool,
}

impl FilterTable {
    /// Create a table from `config`.
    ///
    /// Fails only when pagination is configured with zero rows per page.
    pub fn new(config: TableConfig) -> Result<Self, TableError> {
        let TableConfig {
            mut table,
            id_field,
            pagination,
            template,
            add_event_listeners,
            on_filter_end,
        } = config;

        let paginator = match pagination {
            Some(p) if p.per_page == 0 => return Err(TableError::InvalidPerPage),
            Some(p) => Some(Paginator::new(p.page.unwrap_or(1), p.per_page)),
            None => None,
        };

        let body_id = match table.child_elements().iter().find(|c| c.tag == "tbody") {
            Some(body) => body.id.clone(),
            None => {
                let body = Element::tbody();
                let id = body.id.clone();
                table.push_child(body);
                id
            }
        };

        log::debug!(
            "[table] created {} (id_field={:?}, pagination={:?})",
            table.id,
            id_field,
            paginator
        );

        Ok(Self {
            store: RowStore::new(id_field),
            paginator,
            root: table,
            body_id,
            header_id: None,
            footer_id: None,
            template,
            listener_hook: add_event_listeners,
            on_filter_end,
            listeners_attached: false,
        })
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Merge `records` into the table and redraw.
    ///
    /// Existing ids are shallow-merged, new ids appended. Unless
    /// `keep_filters` is set, the filtered view is reset to every row.
    pub fn ingest(
        &mut self,
        records: impl IntoIterator<Item = Record>,
        keep_filters: bool,
    ) -> &mut Self {
        self.store.ingest(records, keep_filters);
        self.render_body();
        self
    }

    /// Parse a JSON array of objects and ingest it.
    ///
    /// Nothing is ingested if any element is not an object.
    pub fn ingest_json(&mut self, json: &str, keep_filters: bool) -> Result<&mut Self, TableError> {
        let items: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let records = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                serde_json::Value::Object(map) => Ok(map
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<Record>()),
                _ => Err(TableError::not_an_object(index)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.ingest(records, keep_filters))
    }

    pub fn get(&self, id: RowId) -> Option<&Row> {
        self.store.get(id)
    }

    /// First row, in display order, whose `key` field equals `value`.
    pub fn find_by_field(&self, key: &str, value: impl Into<Value>) -> Option<&Row> {
        self.store.find_by_field(key, &value.into())
    }

    /// Delete a row. Its element is removed from the body directly, without
    /// a full redraw. Returns false for unknown ids.
    pub fn remove(&mut self, id: RowId) -> bool {
        if self.store.remove(id).is_none() {
            return false;
        }
        self.remove_row_element(id);
        true
    }

    /// Shallow-merge `patch` into a row. Returns false for unknown ids.
    ///
    /// With `reflect_in_view`, the row's element is rebuilt and swapped in
    /// place. Without it only the stored data changes, which is what edits
    /// that originate in the row's own inputs want.
    pub fn update(&mut self, id: RowId, patch: Record, reflect_in_view: bool) -> bool {
        if !self.store.update(id, &patch) {
            return false;
        }
        if reflect_in_view {
            self.replace_row_element(id);
        }
        true
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn order(&self) -> &[RowId] {
        self.store.order()
    }

    pub fn filtered_order(&self) -> &[RowId] {
        self.store.filtered_order()
    }

    /// Filtered rows paired with their ids, in filtered order.
    pub fn filtered_rows(&self) -> Vec<(RowId, &Row)> {
        self.store
            .filtered_order()
            .iter()
            .filter_map(|&id| self.store.get(id).map(|row| (id, row)))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Run a filter pass: recompute the filtered order from every row, go
    /// back to page 1, redraw, then report the result to the filter-end hook.
    pub fn filter(&mut self, spec: &FilterSpec) {
        let ids = filter::evaluate(&self.store, spec);
        self.store.set_filtered_order(ids);
        if let Some(paginator) = self.paginator.as_mut() {
            paginator.first();
        }
        self.render_body();

        if let Some(hook) = self.on_filter_end.as_mut() {
            let rows: Vec<(RowId, &Row)> = self
                .store
                .filtered_order()
                .iter()
                .filter_map(|&id| self.store.get(id).map(|row| (id, row)))
                .collect();
            hook(&rows);
        }
    }

    /// Drop the active filter, clear the header's search inputs and redraw.
    pub fn reset(&mut self) {
        self.store.reset_filter();
        self.clear_search_inputs();
        if let Some(paginator) = self.paginator.as_mut() {
            paginator.first();
        }
        self.render_body();
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Current page, always within `[1, total_pages]`; 1 when pagination
    /// is off.
    pub fn page(&self) -> usize {
        self.clamped_paginator().map(|p| p.page()).unwrap_or(1)
    }

    pub fn per_page(&self) -> Option<usize> {
        self.paginator.map(|p| p.per_page())
    }

    pub fn is_paginated(&self) -> bool {
        self.paginator.is_some()
    }

    /// Pages needed for the filtered rows; at least 1.
    pub fn total_pages(&self) -> usize {
        self.paginator
            .map(|p| p.total_pages(self.store.filtered_order().len()))
            .unwrap_or(1)
    }

    /// Ids shown on the current page. Without pagination this is the whole
    /// filtered order.
    pub fn page_slice(&self) -> &[RowId] {
        let ids = self.store.filtered_order();
        match self.clamped_paginator() {
            Some(p) => p.slice(ids),
            None => ids,
        }
    }

    /// The paginator with its page pulled back into range for the current
    /// filtered rows. Removal shrinks the rows without touching the stored
    /// page, which the next render then corrects.
    fn clamped_paginator(&self) -> Option<Paginator> {
        let len = self.store.filtered_order().len();
        self.paginator.map(|mut p| {
            p.set_page(p.page(), len);
            p
        })
    }

    /// Go to page `n`, clamped into range, and redraw.
    pub fn set_page(&mut self, n: usize) -> usize {
        self.navigate(|p, len| p.set_page(n, len))
    }

    pub fn next_page(&mut self) -> usize {
        self.navigate(|p, len| p.next(len))
    }

    pub fn prev_page(&mut self) -> usize {
        self.navigate(|p, len| p.prev(len))
    }

    pub fn first_page(&mut self) -> usize {
        self.navigate(|p, _| p.first())
    }

    pub fn last_page(&mut self) -> usize {
        self.navigate(|p, len| p.last(len))
    }

    fn navigate(&mut self, step: impl FnOnce(&mut Paginator, usize) -> usize) -> usize {
        let len = self.store.filtered_order().len();
        let Some(paginator) = self.paginator.as_mut() else {
            return 1;
        };
        let page = step(paginator, len);
        log::debug!("[table] page {page}/{}", paginator.total_pages(len));
        self.render_body();
        page
    }

    // -------------------------------------------------------------------------
    // Elements
    // -------------------------------------------------------------------------

    /// The root table element.
    pub fn table(&self) -> &Element {
        &self.root
    }

    pub fn body(&self) -> Option<&Element> {
        tabledom::find_element(&self.root, &self.body_id)
    }

    pub fn header(&self) -> Option<&Element> {
        self.header_id
            .as_deref()
            .and_then(|id| tabledom::find_element(&self.root, id))
    }

    pub fn footer(&self) -> Option<&Element> {
        self.footer_id
            .as_deref()
            .and_then(|id| tabledom::find_element(&self.root, id))
    }

    /// Element currently rendered for row `id`, if it is on screen.
    pub fn row_element(&self, id: RowId) -> Option<&Element> {
        let marker = id.to_string();
        self.body()?
            .child_elements()
            .iter()
            .find(|el| el.get_attr(crate::view::ROW_ID) == Some(marker.as_str()))
    }
}

impl std::fmt::Debug for FilterTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterTable")
            .field("rows", &self.store.len())
            .field("filtered", &self.store.filtered_order().len())
            .field("paginator", &self.paginator)
            .field("header", &self.header_id)
            .field("listeners_attached", &self.listeners_attached)
            .finish_non_exhaustive()
    }
}
