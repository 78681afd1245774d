use chrono::{DateTime, Utc};

/// Lowest importance; 0 is the highest.
pub const PRIORITY_NONE: i32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: Option<i64>,
    pub title: String,
    /// 0 (most important) to 3.
    pub priority: i32,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(title: &str, priority: i32, due_date: Option<DateTime<Utc>>) -> Self {
        Task {
            id: None,
            title: title.to_string(),
            priority,
            due_date,
            created_at: None,
            completed_at: None,
            deleted_at: None,
        }
    }

    /// Due date in epoch millis, `0` when unset.
    pub fn due_millis(&self) -> i64 {
        self.due_date.map(|d| d.timestamp_millis()).unwrap_or(0)
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[derive(Debug, Clone)]
pub enum TaskFilter {
    All,
    /// Neither completed nor deleted.
    Exportable,
    ByIds(Vec<i64>),
}
