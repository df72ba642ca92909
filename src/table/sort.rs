use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::table::TableError;
use crate::table::column::ColumnKey;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub column: ColumnKey,
    pub direction: SortDirection,
}

/// Parses `column` (ascending) or `-column` (descending).
impl FromStr for SortSpec {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (direction, name) = match s.strip_prefix('-') {
            Some(rest) => (SortDirection::Descending, rest),
            None => (SortDirection::Ascending, s),
        };
        Ok(SortSpec {
            column: name.parse()?,
            direction,
        })
    }
}

/// Single-column sort state.
///
/// Toggling one column cycles `unsorted -> ascending -> descending -> unsorted`;
/// toggling another column starts it at ascending and drops the previous one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortState(Option<SortSpec>);

impl SortState {
    pub fn current(&self) -> Option<SortSpec> {
        self.0
    }

    pub fn direction_of(&self, column: ColumnKey) -> Option<SortDirection> {
        self.0
            .filter(|spec| spec.column == column)
            .map(|spec| spec.direction)
    }

    /// Advances `column` one step and returns its new direction.
    pub fn toggle(&mut self, column: ColumnKey) -> Option<SortDirection> {
        let next = match self.direction_of(column) {
            None => Some(SortDirection::Ascending),
            Some(SortDirection::Ascending) => Some(SortDirection::Descending),
            Some(SortDirection::Descending) => None,
        };
        self.0 = next.map(|direction| SortSpec { column, direction });
        next
    }

    pub fn set(&mut self, spec: Option<SortSpec>) {
        self.0 = spec;
    }
}
