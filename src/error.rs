use thiserror::Error;

/// Exit code for usage, configuration and local I/O problems.
pub const EXIT_USAGE: u8 = 2;
/// Exit code for data that cannot be turned into standings.
pub const EXIT_DATA: u8 = 3;
/// Exit code for upstream fetch and terminal failures.
pub const EXIT_UPSTREAM: u8 = 4;

/// Failures of the core grouping/fitting pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StandingsError {
    #[error("malformed record #{index} ({name}): {reason}")]
    MalformedRecord {
        index: usize,
        name: String,
        reason: String,
    },

    #[error("cannot fit regression: {0}")]
    DegenerateInput(String),

    #[error("feature length mismatch: {xs} x-values vs {ys} y-values")]
    LengthMismatch { xs: usize, ys: usize },

    #[error("no team records to process")]
    EmptyInput,
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<StandingsError> for AppError {
    fn from(err: StandingsError) -> Self {
        AppError::new(EXIT_DATA, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
