//! Error types

/// Errors from setting up a table or parsing data handed to it.
///
/// Interactive operations never fail this way: unknown ids, stale rows and
/// out-of-range pages are absorbed and reported through `bool` or `Option`.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Pagination was configured with zero rows per page.
    #[error("Pagination requires at least one row per page")]
    InvalidPerPage,

    /// Ingested text was not valid JSON.
    #[error("Invalid row data: {0}")]
    Json(#[from] serde_json::Error),

    /// An element of the ingested array was not a JSON object.
    #[error("Row at index {index} is not an object")]
    NotAnObject { index: usize },
}

impl TableError {
    /// Creates a new not-an-object error.
    pub fn not_an_object(index: usize) -> Self {
        Self::NotAnObject { index }
    }
}
