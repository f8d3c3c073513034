//! Display implementation for staffdesk messages.
//!
//! Every user-facing string lives here: flash messages shown on web forms,
//! CLI output and log lines. Keeping them in one place keeps wording
//! consistent between the web views and the terminal.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let text = match self {
            // === FORM VALIDATION MESSAGES ===
            Message::FieldRequired => "This field is required.".to_string(),
            Message::FieldMustEqual(other) => format!("Field must be equal to {}.", other),
            Message::InvalidChoice => "Not a valid choice.".to_string(),

            // === AUTHENTICATION MESSAGES ===
            Message::UsernameTaken => "Please use a different username".to_string(),
            Message::UserDoesNotMatch => "User does not match".to_string(),
            Message::IncorrectPassword => "Incorrect password.".to_string(),
            Message::UserRegistered(username) => format!("User '{}' registered", username),
            Message::UserLoggedIn(username) => format!("User '{}' logged in", username),
            Message::UserLoggedOut => "Session cleared".to_string(),
            Message::LoginRequired(path) => format!("Login required for {}", path),
            Message::SessionRejected(reason) => format!("Session cookie rejected: {}", reason),
            Message::PasswordsDoNotMatch => "Passwords do not match".to_string(),
            Message::UserCreated(username) => format!("User '{}' created", username),

            // === POSITION MESSAGES ===
            Message::PositionAdded => "Position added successfully".to_string(),
            Message::PositionDeleted(id) => format!("Position {} deleted", id),

            // === DEPARTMENT MESSAGES ===
            Message::DepartmentAdded => "Department added successfully".to_string(),
            Message::DepartmentDeleted(id) => format!("Department {} deleted", id),
            Message::NoParentDepartment => "Haven't parent".to_string(),

            // === EMPLOYEE MESSAGES ===
            Message::EmployeeAdded => "Employee added successfully".to_string(),
            Message::EmployeeUpdated => "Employee updated successfully".to_string(),
            Message::EmployeeDeleted(id) => format!("Employee {} deleted", id),
            Message::EmployeeNotFound(id) => format!("Employee {} not found", id),
            Message::FioTaken => "Please enter a different fio".to_string(),
            Message::CounterCreated(id) => format!("Change counter created for employee {}", id),

            // === LISTING MESSAGES ===
            Message::NoPositions => "No positions found".to_string(),
            Message::NoDepartments => "No departments found".to_string(),
            Message::NoEmployees => "No employees found".to_string(),
            Message::PositionsHeader => "Positions".to_string(),
            Message::DepartmentsHeader => "Department hierarchy".to_string(),
            Message::EmployeesHeader => "Employees".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigFileNotFound => "Configuration file not found, using defaults".to_string(),
            Message::ConfigParseError(error) => format!("Failed to parse configuration: {}", error),
            Message::SessionMinutesOutOfRange(minutes) => {
                format!("Session lifetime of {} minutes is out of range (1 to {})", minutes, crate::libs::config::MAX_SESSION_MINUTES)
            }
            Message::PromptBind => "Address to listen on".to_string(),
            Message::PromptDatabase => "Path to the database file".to_string(),
            Message::PromptSecretKey => "Secret key for signing sessions".to_string(),
            Message::PromptSessionMinutes => "Session lifetime (minutes)".to_string(),
            Message::PromptPassword => "Password".to_string(),
            Message::PromptPasswordConfirm => "Repeat password".to_string(),

            // === SERVER MESSAGES ===
            Message::ServerListening(address) => format!("Listening on http://{}", address),
            Message::ServerStopped => "Server stopped".to_string(),
            Message::DefaultSecretKey => "Sessions are signed with the default secret key; set STAFFDESK_SECRET_KEY".to_string(),
            Message::DatabaseReady(path) => format!("Database ready at {}", path),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed".to_string(),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database needs migration".to_string(),
            Message::DatabaseVersion(version) => format!("Database version: {}", version),
            Message::MigrationHistory => "Migration history:".to_string(),
        };
        write!(f, "{}", text)
    }
}
