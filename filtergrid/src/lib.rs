//! Client-side filterable, paginated, editable table widget.
//!
//! A [`FilterTable`] owns a row store keyed by numeric id, derives a filtered
//! and paginated view from it, and reconciles that view into a
//! [`tabledom`] element tree built from a caller-supplied row template.
//! User interaction arrives as [`tabledom::Event`]s through
//! [`FilterTable::dispatch`].

pub mod config;
pub mod error;
pub mod events;
pub mod filter;
pub mod model;
pub mod paginator;
pub mod store;
pub mod view;

mod table;

pub use config::{PaginationConfig, TableConfig};
pub use error::TableError;
pub use filter::{FilterEntry, FilterMode, FilterSpec};
pub use model::{Record, Row, RowId, Value};
pub use table::FilterTable;
