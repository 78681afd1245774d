#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(i64, String), // id, title
    TaskCompleted(i64),
    TaskDeleted(i64),
    TaskNotFoundWithId(i64),
    TaskTagsUpdated(i64, String), // id, joined tag names
    NoTasksFound,
    InvalidDueDate(String),

    // === TAG MESSAGES ===
    TagCreated(String),
    TagDeleted(String),
    TagNotFound(String),
    TagAlreadyExists(String),
    TagListHeader,
    NoTagsFound,

    // === PROVIDER MESSAGES ===
    QueryResult(usize, String), // rows, uri
    NoRowsReturned(String),     // uri

    // === CONFIGURATION MESSAGES ===
    ConfigSaved(String), // path
    ConfigParseError(String),
    InvalidAuthority(String),
    InvalidPaletteColor(String, String), // role, value

    // === EXPORT MESSAGES ===
    ExportStarted(usize),           // task count
    ExportProgress(usize, usize),   // done, total
    ExportCompleted(String),        // path
    ExportFailed(String),

    // === MIGRATION MESSAGES ===
    DatabaseUpToDate,
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
}
