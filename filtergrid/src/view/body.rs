use tabledom::Element;

use super::ROW_ID;
use crate::model::{Row, RowId};
use crate::table::FilterTable;

impl FilterTable {
    /// Rebuild every body row for the current page (or the whole filtered
    /// order when unpaginated), then attach listeners and refresh the footer.
    ///
    /// The current page is clamped into range first, since rows may have
    /// been removed or filtered out since it was chosen. Ids with no stored
    /// row are skipped. The new rows replace the old ones in a single step.
    pub fn render_body(&mut self) {
        let len = self.store.filtered_order().len();
        if let Some(p) = self.paginator.as_mut() {
            p.set_page(p.page(), len);
        }
        let ids = self.page_slice().to_vec();
        let mut rows = Vec::with_capacity(ids.len());

        for id in ids {
            let Some(row) = self.store.get(id) else {
                log::trace!("[render] skipping stale id {id}");
                continue;
            };
            rows.push(self.build_row_element(id, row));
        }

        log::trace!("[render] {} rows on page {}", rows.len(), self.page());
        if let Some(body) = tabledom::find_element_mut(&mut self.root, &self.body_id) {
            body.set_children(rows);
        }

        self.attach_listeners();
        if self.paginator.is_some() {
            self.render_footer();
        }
    }

    fn build_row_element(&self, id: RowId, row: &Row) -> Element {
        let mut el = (self.template)(row);
        if !el.has_attr(ROW_ID) {
            el.set_attr(ROW_ID, id.to_string());
        }
        el
    }

    /// Delegated listeners go live once; the caller's hook sees the root the
    /// first time only.
    fn attach_listeners(&mut self) {
        if self.listeners_attached {
            return;
        }
        self.listeners_attached = true;
        if let Some(hook) = self.listener_hook.take() {
            hook(&mut self.root);
        }
        log::debug!("[render] listeners attached to {}", self.root.id);
    }

    pub(crate) fn row_element_mut(&mut self, id: RowId) -> Option<&mut Element> {
        let marker = id.to_string();
        tabledom::find_element_mut(&mut self.root, &self.body_id)?
            .find_child_mut(|el| el.get_attr(ROW_ID) == Some(marker.as_str()))
    }

    pub(crate) fn remove_row_element(&mut self, id: RowId) {
        let marker = id.to_string();
        if let Some(body) = tabledom::find_element_mut(&mut self.root, &self.body_id) {
            body.remove_child_where(|el| el.get_attr(ROW_ID) == Some(marker.as_str()));
        }
    }

    /// Rebuild one row's element from the store and swap it in place.
    pub(crate) fn replace_row_element(&mut self, id: RowId) {
        let Some(row) = self.store.get(id) else {
            return;
        };
        let el = self.build_row_element(id, row);
        let marker = id.to_string();
        if let Some(body) = tabledom::find_element_mut(&mut self.root, &self.body_id) {
            body.replace_child_where(|c| c.get_attr(ROW_ID) == Some(marker.as_str()), el);
        }
    }
}
