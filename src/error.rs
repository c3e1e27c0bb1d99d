use thiserror::Error;

/// Public suffix list error types
#[derive(Error, Debug)]
pub enum RegDomError {
    #[error("Parse error at line {line}: {message}")]
    ParseErrorAtLine { line: usize, message: String },

    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl RegDomError {
    /// Line number of a parse error, if this error came from a suffix list.
    pub fn line(&self) -> Option<usize> {
        match self {
            RegDomError::ParseErrorAtLine { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RegDomError>;
