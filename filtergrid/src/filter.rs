//! Column filters and their evaluation against the row store.

use serde::Deserialize;
use serde::Serialize;

use crate::model::{Row, RowId};
use crate::store::RowStore;

/// How a filter entry's match result contributes to row inclusion.
///
/// - `And`: every `And` entry must match.
/// - `Or`: at least one `Or` entry must match.
/// - `Not`: no `Not` entry may match.
///
/// The three groups are combined with AND. An empty group passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterMode {
    #[default]
    And,
    Or,
    Not,
}

impl FilterMode {
    /// Parse a mode control's value. Anything unrecognized is `And`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "OR" => FilterMode::Or,
            "NOT" => FilterMode::Not,
            _ => FilterMode::And,
        }
    }
}

/// A single column predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterEntry {
    pub column: String,
    pub value: String,
    #[serde(default)]
    pub mode: FilterMode,
}

impl FilterEntry {
    pub fn new(column: impl Into<String>, value: impl Into<String>, mode: FilterMode) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
            mode,
        }
    }

    /// Lowercased, trimmed, non-empty comma-separated alternatives.
    pub fn search_words(&self) -> Vec<String> {
        self.value
            .split(',')
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect()
    }
}

/// An active entry with its search words split out, built once per pass.
struct PreparedEntry<'a> {
    column: &'a str,
    words: Vec<String>,
    mode: FilterMode,
}

impl PreparedEntry<'_> {
    /// True if any search word occurs in the row's column text.
    fn matches(&self, row: &Row) -> bool {
        let haystack = row.text(self.column).to_lowercase();
        self.words.iter().any(|w| haystack.contains(w.as_str()))
    }
}

/// An ordered set of column predicates, rebuilt for every filter pass.
///
/// # Example
///
/// ```
/// use filtergrid::filter::{FilterMode, FilterSpec};
///
/// let spec = FilterSpec::new()
///     .with("name", "ali", FilterMode::And)
///     .with("city", "oslo,bergen", FilterMode::And);
/// assert_eq!(spec.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSpec {
    entries: Vec<FilterEntry>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry (builder pattern).
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>, mode: FilterMode) -> Self {
        self.push(FilterEntry::new(column, value, mode));
        self
    }

    pub fn push(&mut self, entry: FilterEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[FilterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when no entry would constrain anything.
    pub fn is_inactive(&self) -> bool {
        self.entries.iter().all(|e| e.value.is_empty())
    }

    /// Decide whether `row` passes every group of this spec.
    pub fn row_matches(&self, row: &Row) -> bool {
        passes(&self.prepare(), row)
    }

    /// Entries with an empty value are dropped.
    fn prepare(&self) -> Vec<PreparedEntry<'_>> {
        self.entries
            .iter()
            .filter(|e| !e.value.is_empty())
            .map(|e| PreparedEntry {
                column: &e.column,
                words: e.search_words(),
                mode: e.mode,
            })
            .collect()
    }
}

fn passes(entries: &[PreparedEntry<'_>], row: &Row) -> bool {
    let mut and_ok = true;
    let mut or_seen = false;
    let mut or_ok = false;
    let mut not_ok = true;

    for entry in entries {
        let matched = entry.matches(row);
        match entry.mode {
            FilterMode::And => and_ok &= matched,
            FilterMode::Or => {
                or_seen = true;
                or_ok |= matched;
            }
            FilterMode::Not => not_ok &= !matched,
        }
    }

    and_ok && (!or_seen || or_ok) && not_ok
}

impl FromIterator<FilterEntry> for FilterSpec {
    fn from_iter<I: IntoIterator<Item = FilterEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Compute the filtered order for `spec`.
///
/// Always starts from the full order rather than the current filtered view,
/// so loosening a filter brings rows back.
pub fn evaluate(store: &RowStore, spec: &FilterSpec) -> Vec<RowId> {
    let entries = spec.prepare();
    let ids: Vec<RowId> = store
        .order()
        .iter()
        .copied()
        .filter(|&id| store.get(id).is_some_and(|row| passes(&entries, row)))
        .collect();

    log::debug!(
        "[filter] {} entries matched {}/{} rows",
        spec.len(),
        ids.len(),
        store.order().len()
    );
    ids
}
