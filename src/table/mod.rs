//! In-memory table engine deriving row order over one fetched page.
//!
//! The engine never touches the records it is given. It only computes which
//! rows are visible and in which order, from the column model, the sort state
//! and the filters.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::client::Client;
use crate::table::column::{ColumnDef, ColumnKey, default_columns};
use crate::table::sort::{SortDirection, SortSpec, SortState};

pub mod column;
pub mod sort;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("column {0} is not sortable")]
    NotSortable(ColumnKey),
    #[error("column {0} is not filterable")]
    NotFilterable(ColumnKey),
}

#[derive(Clone, Debug)]
pub struct TableEngine {
    columns: Vec<ColumnDef>,
    sorting: SortState,
    global_filter: Option<String>,
    column_filters: BTreeMap<ColumnKey, String>,
}

impl Default for TableEngine {
    fn default() -> Self {
        Self::new(default_columns())
    }
}

/// Lower-cases a filter value, treating blanks as "no filter".
fn normalize_filter(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl TableEngine {
    pub fn new(columns: Vec<ColumnDef>) -> Self {
        Self {
            columns,
            sorting: SortState::default(),
            global_filter: None,
            column_filters: BTreeMap::new(),
        }
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    fn column(&self, key: ColumnKey) -> Result<&ColumnDef, TableError> {
        self.columns
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| TableError::UnknownColumn(key.to_string()))
    }

    pub fn set_column_visible(&mut self, key: ColumnKey, visible: bool) -> Result<(), TableError> {
        self.column(key)?;
        if let Some(column) = self.columns.iter_mut().find(|c| c.key == key) {
            column.visible = visible;
        }
        Ok(())
    }

    pub fn sort_state(&self) -> SortState {
        self.sorting
    }

    pub fn sort_direction(&self, key: ColumnKey) -> Option<SortDirection> {
        self.sorting.direction_of(key)
    }

    /// Advances the sort indicator of `key` and returns its new direction.
    pub fn toggle_sort(&mut self, key: ColumnKey) -> Result<Option<SortDirection>, TableError> {
        if !self.column(key)?.sortable {
            return Err(TableError::NotSortable(key));
        }
        Ok(self.sorting.toggle(key))
    }

    pub fn set_sort(&mut self, spec: Option<SortSpec>) -> Result<(), TableError> {
        if let Some(spec) = spec {
            if !self.column(spec.column)?.sortable {
                return Err(TableError::NotSortable(spec.column));
            }
        }
        self.sorting.set(spec);
        Ok(())
    }

    pub fn global_filter(&self) -> Option<&str> {
        self.global_filter.as_deref()
    }

    pub fn set_global_filter(&mut self, value: &str) {
        self.global_filter = normalize_filter(value);
    }

    pub fn column_filter(&self, key: ColumnKey) -> Option<&str> {
        self.column_filters.get(&key).map(String::as_str)
    }

    /// Sets or, for blank input, clears the filter of one column.
    pub fn set_column_filter(&mut self, key: ColumnKey, value: &str) -> Result<(), TableError> {
        if !self.column(key)?.filterable {
            return Err(TableError::NotFilterable(key));
        }
        match normalize_filter(value) {
            Some(filter) => self.column_filters.insert(key, filter),
            None => self.column_filters.remove(&key),
        };
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.global_filter = None;
        self.column_filters.clear();
    }

    fn matches(&self, client: &Client) -> bool {
        let global = self.global_filter.as_deref().is_none_or(|needle| {
            self.columns
                .iter()
                .filter(|c| c.visible && c.filterable)
                .any(|c| contains_ci(c.key.value(client), needle))
        });

        global
            && self
                .column_filters
                .iter()
                .all(|(key, needle)| contains_ci(key.value(client), needle))
    }

    fn compare(&self, a: &Client, b: &Client) -> Ordering {
        match self.sorting.current() {
            Some(SortSpec { column, direction }) => {
                let ordering = column
                    .value(a)
                    .to_lowercase()
                    .cmp(&column.value(b).to_lowercase());
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            }
            None => Ordering::Equal,
        }
    }

    /// Indices into `rows` of the visible rows, in display order.
    ///
    /// Ties keep their fetch order.
    pub fn row_order(&self, rows: &[Client]) -> Vec<usize> {
        let mut order: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, client)| self.matches(client))
            .map(|(index, _)| index)
            .collect();

        if self.sorting.current().is_some() {
            order.sort_by(|&a, &b| self.compare(&rows[a], &rows[b]));
        }

        order
    }

    pub fn rows<'a>(&self, rows: &'a [Client]) -> Vec<&'a Client> {
        self.row_order(rows).into_iter().map(|i| &rows[i]).collect()
    }
}
