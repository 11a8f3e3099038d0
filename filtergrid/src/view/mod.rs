//! Reconciling the row store into the element tree.
//!
//! Rows are rebuilt from the caller's template on every body render; the
//! element tree is a cache of the store, never the other way around (edits
//! captured from row inputs are the one exception, see `events`).

mod body;
mod footer;
mod header;

/// Row-identity marker stamped on every rendered row.
pub const ROW_ID: &str = "data-id";
/// Clicking an element carrying this marker removes its row.
pub const REMOVE_ROW: &str = "data-remove";
/// Binds a form control inside a row to a row field.
pub const COLUMN: &str = "data-column";
/// Binds a header input to the column it filters.
pub const SEARCH_COLUMN: &str = "data-search";
/// Marks the header control selecting AND/OR/NOT.
pub const FILTER_MODE: &str = "data-filter-mode";
/// Page-navigation target of a footer button: `prev`, `next` or a number.
pub const PAGE: &str = "data-page";

/// Class added to a row whose inputs were edited.
pub const UPDATED_CLASS: &str = "updated";
/// Field set on edit patches so edited rows can be told apart.
pub const UPDATED_FIELD: &str = "_updated";
/// Class of the footer's control cell.
pub const PAGINATION_CLASS: &str = "pagination";
