use tabledom::Element;

use super::{PAGE, PAGINATION_CLASS};
use crate::paginator::{PageControl, page_controls};
use crate::table::FilterTable;

impl FilterTable {
    /// Rebuild the pagination footer. The footer section is created on first
    /// use and cleared on every later call.
    pub(crate) fn render_footer(&mut self) {
        let Some(paginator) = self.paginator else {
            return;
        };
        let total = paginator.total_pages(self.store.filtered_order().len());
        let controls: Vec<Element> = page_controls(paginator.page(), total)
            .into_iter()
            .map(control_element)
            .collect();

        let cell = Element::td()
            .class(PAGINATION_CLASS)
            .attr("colspan", self.column_count().to_string())
            .children(controls);
        let row = Element::tr().child(cell);

        let footer_id = match &self.footer_id {
            Some(id) => id.clone(),
            None => {
                let footer = Element::tfoot();
                let id = footer.id.clone();
                self.root.push_child(footer);
                self.footer_id = Some(id.clone());
                id
            }
        };

        if let Some(footer) = tabledom::find_element_mut(&mut self.root, &footer_id) {
            footer.set_children(vec![row]);
        }
    }
}

fn control_element(control: PageControl) -> Element {
    match control {
        PageControl::Prev { enabled } => Element::button("‹").attr(PAGE, "prev").disabled(!enabled),
        PageControl::Next { enabled } => Element::button("›").attr(PAGE, "next").disabled(!enabled),
        PageControl::Ellipsis => Element::text("…").class("ellipsis"),
        // The current page is disabled rather than only styled.
        PageControl::Page { number, current } => {
            let button = Element::button(number.to_string())
                .attr(PAGE, number.to_string())
                .disabled(current);
            if current { button.class("active") } else { button }
        }
    }
}
