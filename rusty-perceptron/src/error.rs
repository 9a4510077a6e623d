use thiserror::Error;

pub type Result<T> = std::result::Result<T, PerceptronError>;

/// Category of a [`PerceptronError`], for callers that only need to branch
/// on what kind of precondition failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    Config,
    Division,
    Plot,
}

#[derive(Debug, Error)]
pub enum PerceptronError {
    /// Input records do not match the declared shape or class values.
    #[error("Format error: {message}")]
    Format { message: String },
    /// Run configuration is unusable for this dataset.
    #[error("Config error: {message}")]
    Config { message: String },
    /// A metric denominator is zero.
    #[error("Division error: {message}")]
    Division { message: String },
    #[error("Failed to plot {path}: {message}")]
    Plot { path: String, message: String },
}

impl PerceptronError {
    pub fn format(message: impl Into<String>) -> Self {
        PerceptronError::Format {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        PerceptronError::Config {
            message: message.into(),
        }
    }

    pub fn division(message: impl Into<String>) -> Self {
        PerceptronError::Division {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PerceptronError::Format { .. } => ErrorKind::Format,
            PerceptronError::Config { .. } => ErrorKind::Config,
            PerceptronError::Division { .. } => ErrorKind::Division,
            PerceptronError::Plot { .. } => ErrorKind::Plot,
        }
    }
}
