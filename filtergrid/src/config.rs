//! Table configuration

use serde::Deserialize;
use serde::Serialize;
use tabledom::Element;

use crate::model::{Row, RowId};

/// Builds the element for one row. Must return a structured element; it may
/// set the row-id marker itself, otherwise the renderer stamps it.
pub type RowTemplate = Box<dyn Fn(&Row) -> Element>;

/// Called once, the first time delegated listeners are attached, with the
/// table's root element.
pub type ListenerHook = Box<dyn FnOnce(&mut Element)>;

/// Called after every filter pass with the filtered rows, in filtered order.
pub type FilterEndHook = Box<dyn FnMut(&[(RowId, &Row)])>;

/// Pagination settings. Omit from [`TableConfig`] to show every row.
///
/// Deserializes from the option object shape `{"page": 2, "perPage": 25}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationConfig {
    /// Starting page, 1-based.
    ///
    /// Default: 1
    #[serde(default)]
    pub page: Option<usize>,

    /// Rows per page. Must be greater than zero.
    pub per_page: usize,
}

impl PaginationConfig {
    pub fn new(per_page: usize) -> Self {
        Self {
            page: None,
            per_page,
        }
    }

    /// Sets the starting page.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }
}

/// Construction options for a [`FilterTable`](crate::FilterTable).
///
/// # Example
///
/// ```
/// use filtergrid::{PaginationConfig, TableConfig};
/// use tabledom::Element;
///
/// let config = TableConfig::new(|row| {
///     Element::tr().child(Element::td().child(Element::text(row.text("name"))))
/// })
/// .with_id_field("userId")
/// .with_pagination(PaginationConfig::new(25));
/// ```
pub struct TableConfig {
    /// Root table element. A body section is added if it has none.
    ///
    /// Default: an empty `table` element
    pub table: Element,

    /// Field read first when resolving an ingested record's id.
    pub id_field: Option<String>,

    pub pagination: Option<PaginationConfig>,

    pub template: RowTemplate,

    pub add_event_listeners: Option<ListenerHook>,

    pub on_filter_end: Option<FilterEndHook>,
}

impl TableConfig {
    /// Creates a config with the given row template and default values.
    pub fn new(template: impl Fn(&Row) -> Element + 'static) -> Self {
        Self {
            table: Element::table(),
            id_field: None,
            pagination: None,
            template: Box::new(template),
            add_event_listeners: None,
            on_filter_end: None,
        }
    }

    /// Sets the root table element.
    pub fn with_table(mut self, table: Element) -> Self {
        self.table = table;
        self
    }

    /// Sets the id field.
    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = Some(field.into());
        self
    }

    /// Enables pagination.
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Sets the one-time listener hook.
    pub fn with_event_listeners(mut self, hook: impl FnOnce(&mut Element) + 'static) -> Self {
        self.add_event_listeners = Some(Box::new(hook));
        self
    }

    /// Sets the filter-end callback.
    pub fn with_on_filter_end(mut self, hook: impl FnMut(&[(RowId, &Row)]) + 'static) -> Self {
        self.on_filter_end = Some(Box::new(hook));
        self
    }
}

impl std::fmt::Debug for TableConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableConfig")
            .field("table", &self.table.id)
            .field("id_field", &self.id_field)
            .field("pagination", &self.pagination)
            .field("add_event_listeners", &self.add_event_listeners.is_some())
            .field("on_filter_end", &self.on_filter_end.is_some())
            .finish_non_exhaustive()
    }
}
