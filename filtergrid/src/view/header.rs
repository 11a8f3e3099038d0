use tabledom::Element;

use super::{FILTER_MODE, SEARCH_COLUMN};
use crate::filter::{FilterEntry, FilterMode, FilterSpec};
use crate::table::FilterTable;

impl FilterTable {
    /// Bind `header` to this table. Only one header is supported, so later
    /// calls are ignored and return false.
    ///
    /// If `header` is not already part of the table it becomes its first
    /// child. From then on, input to a search-column element in the header
    /// triggers a filter pass.
    pub fn render_header(&mut self, header: Element) -> bool {
        if self.header_id.is_some() {
            log::debug!("[header] already bound, ignoring {}", header.id);
            return false;
        }

        let id = header.id.clone();
        if tabledom::find_element(&self.root, &id).is_none() {
            self.root.insert_child(0, header);
        }
        self.header_id = Some(id);

        if self.paginator.is_some() && self.footer_id.is_some() {
            self.render_footer();
        }
        true
    }

    /// Assemble a filter spec from the header's search inputs.
    ///
    /// One mode applies to every column in the pass: the value of the
    /// header's mode control, or AND when there is none.
    pub fn header_filter_spec(&self) -> FilterSpec {
        let Some(header) = self.header() else {
            return FilterSpec::new();
        };

        let mode = tabledom::query_all(header, |el| el.has_attr(FILTER_MODE))
            .first()
            .and_then(|el| el.value.as_deref())
            .map(FilterMode::parse)
            .unwrap_or_default();

        tabledom::query_all(header, |el| el.has_attr(SEARCH_COLUMN))
            .into_iter()
            .filter_map(|el| {
                let column = el.get_attr(SEARCH_COLUMN)?;
                Some(FilterEntry::new(
                    column,
                    el.value.clone().unwrap_or_default(),
                    mode,
                ))
            })
            .collect()
    }

    pub(crate) fn clear_search_inputs(&mut self) {
        let Some(header_id) = self.header_id.clone() else {
            return;
        };
        if let Some(header) = tabledom::find_element_mut(&mut self.root, &header_id) {
            tabledom::for_each_mut(header, &|el: &Element| el.has_attr(SEARCH_COLUMN), &mut |el: &mut Element| {
                el.set_value("")
            });
        }
    }

    /// Cells in the header's first row; 1 with no header.
    pub(crate) fn column_count(&self) -> usize {
        let Some(header) = self.header() else {
            return 1;
        };
        let is_cell = |el: &Element| el.tag == "th" || el.tag == "td";
        let count = match tabledom::query_all(header, |el| el.tag == "tr").first() {
            Some(tr) => tr.child_elements().iter().filter(|el| is_cell(el)).count(),
            None => header.child_elements().iter().filter(|el| is_cell(el)).count(),
        };
        count.max(1)
    }
}
