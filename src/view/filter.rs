//! Row filtering.

use crate::types::{Task, TaskPriority, TaskStatus};

/// Either every value, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

pub type StatusFilter = Selection<TaskStatus>;
pub type PriorityFilter = Selection<TaskPriority>;

impl StatusFilter {
    /// Parse `"all"` or a status wire value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Selection::All),
            other => TaskStatus::from_str(other).map(Selection::Only),
        }
    }
}

impl PriorityFilter {
    /// Parse `"all"` or a priority wire value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Selection::All),
            other => TaskPriority::from_str(other).map(Selection::Only),
        }
    }
}

/// Active filters. A task is shown only if it passes all three.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: StatusFilter,
    pub priority: PriorityFilter,
    /// Case-insensitive substring of title or description; empty matches all.
    pub search: String,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: PriorityFilter) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn is_active(&self) -> bool {
        self.status != Selection::All || self.priority != Selection::All || !self.search.is_empty()
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.status.matches(&task.status)
            && self.priority.matches(&task.priority)
            && matches_search(task, &self.search)
    }
}

fn matches_search(task: &Task, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    task.title.to_lowercase().contains(&needle) || task.description.to_lowercase().contains(&needle)
}
