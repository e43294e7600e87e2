//! Column sorting.

use std::cmp::Ordering;

use crate::types::Task;

/// Sortable table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Title,
    Description,
    Status,
    Priority,
    CreatedAt,
    UpdatedAt,
}

impl SortColumn {
    pub const ALL: [SortColumn; 6] = [
        SortColumn::Title,
        SortColumn::Description,
        SortColumn::Status,
        SortColumn::Priority,
        SortColumn::CreatedAt,
        SortColumn::UpdatedAt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Title => "title",
            SortColumn::Description => "description",
            SortColumn::Status => "status",
            SortColumn::Priority => "priority",
            SortColumn::CreatedAt => "createdAt",
            SortColumn::UpdatedAt => "updatedAt",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// Column header text.
    pub fn header(&self) -> &'static str {
        match self {
            SortColumn::Title => "Title",
            SortColumn::Description => "Description",
            SortColumn::Status => "Status",
            SortColumn::Priority => "Priority",
            SortColumn::CreatedAt => "Created",
            SortColumn::UpdatedAt => "Updated",
        }
    }

    /// Direction used the first time a column is selected.
    pub fn first_direction(&self) -> SortDirection {
        match self {
            SortColumn::CreatedAt | SortColumn::UpdatedAt => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortColumn::Title => compare_text(&a.title, &b.title),
            SortColumn::Description => compare_text(&a.description, &b.description),
            SortColumn::Status => a.status.cmp(&b.status),
            SortColumn::Priority => a.priority.cmp(&b.priority),
            SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
            SortColumn::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

/// Active sort. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: SortColumn::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Header click: flip the active column, or switch to a new one.
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == column {
            self.direction = self.direction.flipped();
        } else {
            self.column = column;
            self.direction = column.first_direction();
        }
    }

    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let ord = self.column.compare(a, b);
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }

    /// Stable in-place sort: ties keep their incoming order.
    pub fn sort(&self, rows: &mut [&Task]) {
        rows.sort_by(|a, b| self.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_active_column() {
        let mut sort = SortState::default();
        sort.toggle(SortColumn::CreatedAt);
        assert_eq!(sort.direction, SortDirection::Asc);
        sort.toggle(SortColumn::CreatedAt);
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn new_column_starts_in_its_natural_direction() {
        let mut sort = SortState::default();
        sort.toggle(SortColumn::Title);
        assert_eq!(sort, SortState::new(SortColumn::Title, SortDirection::Asc));
        sort.toggle(SortColumn::UpdatedAt);
        assert_eq!(
            sort,
            SortState::new(SortColumn::UpdatedAt, SortDirection::Desc)
        );
    }

    #[test]
    fn column_names_round_trip() {
        for column in SortColumn::ALL {
            assert_eq!(SortColumn::from_str(column.as_str()), Some(column));
        }
        assert_eq!(SortColumn::from_str("owner"), None);
    }
}
