//! Error types for `ican_checklist`.

/// Errors that can occur while reading or writing checklist state.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A `SQLite` database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A template error occurred.
    #[error("Template error: {0}")]
    Template(String),

    /// The key-value store rejected an operation.
    #[error("Store error: {0}")]
    Store(String),

    /// A grade level string did not name one of the supported grades.
    #[error("unknown grade level: '{0}' (must be one of: 9th, 10th, 11th, 12th)")]
    UnknownGrade(String),

    /// A month string did not name a calendar month.
    #[error("unknown month: '{0}'")]
    UnknownMonth(String),

    /// A storage key did not have the `tasks_<grade>_<month>` shape.
    #[error("invalid scope key: '{0}'")]
    InvalidScopeKey(String),

    /// A required profile field was empty.
    #[error("Please fill in all fields ({0} is empty)")]
    MissingField(&'static str),

    /// The home directory could not be determined.
    #[error("could not determine a data directory; set ICAN_CHECKLIST_HOME")]
    NoDataDir,
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
