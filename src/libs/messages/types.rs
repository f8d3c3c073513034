#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // === FORM VALIDATION MESSAGES ===
    FieldRequired,
    FieldMustEqual(String), // other field name
    InvalidChoice,

    // === AUTHENTICATION MESSAGES ===
    UsernameTaken,
    UserDoesNotMatch,
    IncorrectPassword,
    UserRegistered(String), // username
    UserLoggedIn(String),   // username
    UserLoggedOut,
    LoginRequired(String), // path
    SessionRejected(String),
    PasswordsDoNotMatch,
    UserCreated(String),

    // === POSITION MESSAGES ===
    PositionAdded,
    PositionDeleted(i64),

    // === DEPARTMENT MESSAGES ===
    DepartmentAdded,
    DepartmentDeleted(i64),
    NoParentDepartment,

    // === EMPLOYEE MESSAGES ===
    EmployeeAdded,
    EmployeeUpdated,
    EmployeeDeleted(i64),
    EmployeeNotFound(i64),
    FioTaken,
    CounterCreated(i64),

    // === LISTING MESSAGES ===
    NoPositions,
    NoDepartments,
    NoEmployees,
    PositionsHeader,
    DepartmentsHeader,
    EmployeesHeader,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigFileNotFound,
    ConfigParseError(String),
    SessionMinutesOutOfRange(i64),
    PromptBind,
    PromptDatabase,
    PromptSecretKey,
    PromptSessionMinutes,
    PromptPassword,
    PromptPasswordConfirm,

    // === SERVER MESSAGES ===
    ServerListening(String), // address
    ServerStopped,
    DefaultSecretKey,
    DatabaseReady(String), // path

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    DatabaseVersion(u32),
    MigrationHistory,
}
