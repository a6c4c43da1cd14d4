/// Error type shared by every fallible surface of the crate
#[derive(thiserror::Error, Debug)]
pub enum GpaError {
    /// file could not be read or written
    #[error("failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),
    /// grading system id not in the system table
    #[error("unknown grading system: {0}")]
    UnknownSystem(String),
    /// study level not one of BACHELOR / MASTER / PHD
    #[error("unknown study level: {0}")]
    UnknownLevel(String),
    /// csv could not be parsed
    #[error("failed to parse csv: {0}")]
    CsvParseError(#[from] csv::Error),
    /// the transcript file is structurally unusable
    #[error("invalid transcript: {0}")]
    TranscriptError(String),
    /// regex failed to compile
    #[error("failed to parse or compile a regular expression: {0}")]
    RegexError(#[from] regex::Error),
    /// database access failed
    #[error("database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    /// schema migration failed
    #[error("failed to migrate database: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
    /// json encoding of stored match results failed
    #[error("failed to encode json: {0}")]
    JsonError(#[from] serde_json::Error),
    /// configuration value is malformed
    #[error("invalid configuration: {0}")]
    ConfigError(String),
}
