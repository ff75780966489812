use diesel::result::Error as DieselError;
use thiserror::Error;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the fund manager console.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Quote unavailable: {0}")]
    Quote(String),

    #[error("Database query failed: {0}")]
    Database(#[from] DieselError),

    #[error("Failed to connect to database: {0}")]
    Connection(#[from] diesel::result::ConnectionError),

    #[error("Failed to create database pool: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Database migration failed: {0}")]
    Migration(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Recoverable errors are shown to the operator and return control to
    /// the menu; everything else terminates the process.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_) | Error::InvalidInput(_) | Error::Quote(_)
        )
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Quote(err.to_string())
    }
}
