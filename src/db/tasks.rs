use crate::libs::messages::Message;
use crate::libs::task::{Task, TaskFilter};
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const INSERT_TASK: &str = "INSERT INTO tasks (title, priority, due_date, created_at) VALUES (?1, ?2, ?3, ?4)";
const UPDATE_TASK: &str = "UPDATE tasks SET title = ?2, priority = ?3, due_date = ?4 WHERE id = ?1";
const COMPLETE_TASK: &str = "UPDATE tasks SET completed_at = ?2 WHERE id = ?1 AND completed_at IS NULL";
const DELETE_TASK: &str = "UPDATE tasks SET deleted_at = ?2 WHERE id = ?1 AND deleted_at IS NULL";
const SELECT_TASKS: &str = "SELECT id, title, priority, due_date, created_at, completed_at, deleted_at FROM tasks";
const WHERE_EXPORTABLE: &str = "WHERE completed_at IS NULL AND deleted_at IS NULL";
const WHERE_ID: &str = "WHERE id IN";
const ORDER_BY_ID: &str = "ORDER BY id";

fn to_millis(date: Option<DateTime<Utc>>) -> Option<i64> {
    date.map(|d| d.timestamp_millis())
}

fn from_millis(millis: Option<i64>) -> Option<DateTime<Utc>> {
    millis.and_then(DateTime::from_timestamp_millis)
}

fn map_task(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        priority: row.get(2)?,
        due_date: from_millis(row.get(3)?),
        created_at: from_millis(row.get(4)?),
        completed_at: from_millis(row.get(5)?),
        deleted_at: from_millis(row.get(6)?),
    })
}

/// Task queries over a borrowed connection. Pass a transaction to group
/// several calls into one commit.
pub struct Tasks<'c> {
    conn: &'c Connection,
}

impl<'c> Tasks<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Tasks { conn }
    }

    /// Inserts `task` and returns its new id.
    pub fn insert(&self, task: &Task) -> Result<i64> {
        let created_at = task.created_at.unwrap_or_else(Utc::now);
        self.conn.execute(
            INSERT_TASK,
            params![task.title, task.priority, to_millis(task.due_date), created_at.timestamp_millis()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Task>> {
        self.conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_TASKS), params![id], map_task)
            .optional()
            .map_err(Into::into)
    }

    /// Tasks in ascending id order.
    pub fn fetch(&self, filter: TaskFilter) -> Result<Vec<Task>> {
        let (mut stmt, params) = match filter {
            TaskFilter::All => (self.conn.prepare(&format!("{} {}", SELECT_TASKS, ORDER_BY_ID))?, vec![]),
            TaskFilter::Exportable => (
                self.conn.prepare(&format!("{} {} {}", SELECT_TASKS, WHERE_EXPORTABLE, ORDER_BY_ID))?,
                vec![],
            ),
            TaskFilter::ByIds(ids) => (
                self.conn.prepare(&format!(
                    "{} {} ({}) {}",
                    SELECT_TASKS,
                    WHERE_ID,
                    vec!["?"; ids.len()].join(", "),
                    ORDER_BY_ID
                ))?,
                ids,
            ),
        };

        let tasks = stmt
            .query_map(params_from_iter(params.iter()), map_task)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(tasks)
    }

    /// Updates title, priority and due date. The id never changes.
    pub fn update(&self, task: &Task) -> Result<()> {
        let id = task.id.ok_or_else(|| msg_error_anyhow!(Message::TaskNotFoundWithId(0)))?;
        let affected = self
            .conn
            .execute(UPDATE_TASK, params![id, task.title, task.priority, to_millis(task.due_date)])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::TaskNotFoundWithId(id)));
        }
        Ok(())
    }

    /// Marks the task completed. Returns `false` if it already was.
    pub fn complete(&self, id: i64) -> Result<bool> {
        self.ensure_exists(id)?;
        let affected = self.conn.execute(COMPLETE_TASK, params![id, Utc::now().timestamp_millis()])?;
        Ok(affected > 0)
    }

    /// Soft-deletes the task. Returns `false` if it already was deleted.
    pub fn delete(&self, id: i64) -> Result<bool> {
        self.ensure_exists(id)?;
        let affected = self.conn.execute(DELETE_TASK, params![id, Utc::now().timestamp_millis()])?;
        Ok(affected > 0)
    }

    /// Soft-deletes every listed task and returns how many changed.
    pub fn delete_many(&self, ids: &[i64]) -> Result<usize> {
        let now = Utc::now().timestamp_millis();
        let tx = self.conn.unchecked_transaction()?;
        let mut deleted = 0;
        for id in ids {
            deleted += tx.execute(DELETE_TASK, params![id, now])?;
        }
        tx.commit()?;
        Ok(deleted)
    }

    fn ensure_exists(&self, id: i64) -> Result<()> {
        match self.get_by_id(id)? {
            Some(_) => Ok(()),
            None => Err(msg_error_anyhow!(Message::TaskNotFoundWithId(id))),
        }
    }
}
