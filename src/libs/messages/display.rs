//! Display implementation for taskfeed messages.
//!
//! All user-facing text lives here so that commands only ever deal with typed
//! [`Message`] values.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(id, title) => format!("Task #{} '{}' created successfully.", id, title),
            Message::TaskCompleted(id) => format!("Task #{} marked as completed.", id),
            Message::TaskDeleted(id) => format!("Task #{} deleted.", id),
            Message::TaskNotFoundWithId(id) => format!("Task with ID {} not found.", id),
            Message::TaskTagsUpdated(id, tags) if tags.is_empty() => format!("Tags cleared for task #{}.", id),
            Message::TaskTagsUpdated(id, tags) => format!("Task #{} tagged: {}", id, tags),
            Message::NoTasksFound => "No tasks found.".to_string(),
            Message::InvalidDueDate(value) => format!("Invalid due date '{}', expected YYYY-MM-DD.", value),

            // === TAG MESSAGES ===
            Message::TagCreated(name) => format!("Tag '{}' created successfully.", name),
            Message::TagDeleted(name) => format!("Tag '{}' deleted successfully.", name),
            Message::TagNotFound(name) => format!("Tag '{}' not found.", name),
            Message::TagAlreadyExists(name) => format!("Tag '{}' already exists.", name),
            Message::TagListHeader => "Tags:".to_string(),
            Message::NoTagsFound => "No tags found.".to_string(),

            // === PROVIDER MESSAGES ===
            Message::QueryResult(rows, uri) => format!("{} row(s) from {}", rows, uri),
            Message::NoRowsReturned(uri) => format!("No rows returned from {}", uri),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved(path) => format!("Configuration saved to {}", path),
            Message::ConfigParseError(error) => format!("Failed to parse configuration: {}", error),
            Message::InvalidAuthority(value) => format!("Invalid authority '{}': must be non-empty without '/', '?', '#' or spaces", value),
            Message::InvalidPaletteColor(role, value) => format!("Invalid {} color '{}' in configuration", role, value),

            // === EXPORT MESSAGES ===
            Message::ExportStarted(count) => format!("Exporting {} task(s)...", count),
            Message::ExportProgress(done, total) => format!("Exported {}/{}", done, total),
            Message::ExportCompleted(path) => format!("Export completed successfully: {}", path),
            Message::ExportFailed(error) => format!("Export failed: {}", error),

            // === MIGRATION MESSAGES ===
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("✓ Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
        };
        write!(f, "{}", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameterized_messages() {
        assert_eq!(Message::TaskCreated(4, "Buy milk".into()).to_string(), "Task #4 'Buy milk' created successfully.");
        assert_eq!(Message::TaskTagsUpdated(4, String::new()).to_string(), "Tags cleared for task #4.");
        assert_eq!(Message::TaskTagsUpdated(4, "home|work".into()).to_string(), "Task #4 tagged: home|work");
        assert_eq!(Message::QueryResult(2, "content://a/tags".into()).to_string(), "2 row(s) from content://a/tags");
    }
}
