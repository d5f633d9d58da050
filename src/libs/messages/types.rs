#[derive(Debug, Clone)]
pub enum Message {
    // === BOARD MESSAGES ===
    BoardCreated(String),
    BoardUpdated(String),
    BoardDeleted(String),
    BoardArchived(String),
    BoardUnarchived(String),
    BoardNotFoundRef(String),
    BoardHasNoColumns(String),
    BoardsHeader,
    NoBoardsFound,
    ConfirmDeleteBoard(String),
    PromptBoardTitle,
    PromptBoardDescription,

    // === COLUMN MESSAGES ===
    ColumnCreated(String),
    ColumnRenamed(String, String), // old, new
    ColumnDeleted(String),
    ColumnMoved(String),
    ColumnNotFoundRef(String),
    ConfirmDeleteColumn(String, usize), // name, task count

    // === TASK MESSAGES ===
    TaskCreated(String),
    TaskUpdated(String),
    TaskDeleted(String),
    TaskMoved(String, String), // title, destination column
    TaskNotFoundRef(String),
    NoChangesDetected,
    ConfirmDeleteTask(String),
    PromptTaskTitle,
    PromptTaskDescription,
    PromptTaskDueDate,
    PromptTaskAssignee,

    // === COMMENT MESSAGES ===
    CommentAdded(String),   // task title
    CommentDeleted,
    CommentNotFoundRef(String),
    ConfirmDeleteComment,
    PromptCommentContent,

    // === MOVE MESSAGES ===
    NothingToMove,
    MoveTargetRequired,

    // === SYNC MESSAGES ===
    SyncPushed(String),     // board title
    SyncFailed(String),     // error detail
    SyncNoRemote,
    SyncingBoard(String),   // board title

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigModuleProfile,
    ConfigModuleRemote,
    PromptSelectModules,
    PromptUserId,
    PromptUserName,
    PromptRemoteApiUrl,
    PromptRemoteAuthToken,
    ConfirmDeleteConfig,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
    NothingToRollback,
    RollingBack(u32, u32),
    RollbackCompleted(u32),

    // === GENERAL MESSAGES ===
    OperationCancelled,

    // === ERROR MESSAGES ===
    RemoteStatusError(u16, String), // status, server message
    InvalidDate(String),
}
