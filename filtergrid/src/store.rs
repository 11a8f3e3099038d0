//! Row store: rows keyed by id plus the full and filtered display orders.

use std::collections::HashMap;

use crate::model::{ID_FIELD, Record, Row, RowId, Value};

/// Owns every row of a table and the two orderings derived from them.
///
/// Invariants:
/// - every id in `order` and `filtered_order` is a key of `rows`;
/// - `filtered_order` is a subsequence of `order`;
/// - neither ordering contains duplicates.
#[derive(Debug, Default)]
pub struct RowStore {
    rows: HashMap<RowId, Row>,
    order: Vec<RowId>,
    filtered_order: Vec<RowId>,
    /// Field consulted first when resolving an ingested record's id.
    id_field: Option<String>,
    /// Highest id handed out or seen; the next auto id is one above it.
    last_id: RowId,
}

impl RowStore {
    pub fn new(id_field: Option<String>) -> Self {
        Self {
            id_field,
            ..Default::default()
        }
    }

    /// Merge `records` into the store.
    ///
    /// Records whose id already exists are shallow-merged into the stored
    /// row; others are appended to both orders. Unless `keep_filters` is set,
    /// the filtered order is reset to the full order afterwards.
    ///
    /// Returns the resolved id of each record, in input order.
    pub fn ingest(
        &mut self,
        records: impl IntoIterator<Item = Record>,
        keep_filters: bool,
    ) -> Vec<RowId> {
        let mut ids = Vec::new();
        let mut inserted = 0usize;

        for record in records {
            let id = self.resolve_id(&record);
            match self.rows.get_mut(&id) {
                Some(row) => row.merge(&record),
                None => {
                    self.rows.insert(id, Row::new(id, record));
                    self.order.push(id);
                    if !self.filtered_order.contains(&id) {
                        self.filtered_order.push(id);
                    }
                    inserted += 1;
                }
            }
            ids.push(id);
        }

        if !keep_filters {
            self.reset_filter();
        }
        self.last_id = self.rows.keys().copied().max().unwrap_or(0);

        log::debug!(
            "[store] ingested {} records ({} new), {} rows total, keep_filters={}",
            ids.len(),
            inserted,
            self.rows.len(),
            keep_filters
        );
        ids
    }

    fn resolve_id(&mut self, record: &Record) -> RowId {
        let configured = self
            .id_field
            .as_deref()
            .and_then(|field| record.get(field))
            .and_then(Value::as_row_id);

        if let Some(id) = configured.or_else(|| record.get(ID_FIELD).and_then(Value::as_row_id)) {
            self.last_id = self.last_id.max(id);
            return id;
        }

        match self.last_id.checked_add(1) {
            Some(id) => {
                self.last_id = id;
                id
            }
            None => self.lowest_free_id(),
        }
    }

    /// Smallest positive id not in use, for when the counter is exhausted.
    fn lowest_free_id(&self) -> RowId {
        let id = (1..RowId::MAX)
            .find(|id| !self.rows.contains_key(id))
            .unwrap_or(RowId::MAX);
        log::debug!("[store] auto id counter exhausted, reusing free id {id}");
        id
    }

    /// Delete a row from the store and both orders.
    pub fn remove(&mut self, id: RowId) -> Option<Row> {
        let row = self.rows.remove(&id)?;
        self.order.retain(|&i| i != id);
        self.filtered_order.retain(|&i| i != id);
        log::debug!("[store] removed row {id}");
        Some(row)
    }

    /// Shallow-merge `patch` into a stored row. Returns false for unknown ids.
    pub fn update(&mut self, id: RowId, patch: &Record) -> bool {
        match self.rows.get_mut(&id) {
            Some(row) => {
                row.merge(patch);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: RowId) -> Option<&Row> {
        self.rows.get(&id)
    }

    pub fn contains(&self, id: RowId) -> bool {
        self.rows.contains_key(&id)
    }

    /// First row, in display order, whose `key` field equals `value`.
    ///
    /// Scalars also match on their text form, so `"30"` finds a row holding
    /// the integer `30`.
    pub fn find_by_field(&self, key: &str, value: &Value) -> Option<&Row> {
        self.order
            .iter()
            .filter_map(|id| self.rows.get(id))
            .find(|row| row.get(key).is_some_and(|v| loosely_equal(v, value)))
    }

    pub fn order(&self) -> &[RowId] {
        &self.order
    }

    pub fn filtered_order(&self) -> &[RowId] {
        &self.filtered_order
    }

    /// Replace the filtered order. Ids not in the full order are dropped so
    /// the subsequence invariant holds.
    pub(crate) fn set_filtered_order(&mut self, ids: Vec<RowId>) {
        self.filtered_order = ids
            .into_iter()
            .filter(|id| self.rows.contains_key(id))
            .collect();
    }

    /// Discard the active filter view.
    pub fn reset_filter(&mut self) {
        self.filtered_order = self.order.clone();
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn loosely_equal(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    let scalar = |v: &Value| !matches!(v, Value::Null | Value::Json(_));
    scalar(a) && scalar(b) && a.to_text() == b.to_text()
}
