use tenon_engine::EngineError;

/// Errors during plan parsing.
///
/// Every variant carries the 1-based source line so a user can locate the
/// offending statement.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: {source}")]
    Model {
        line: usize,
        #[source]
        source: EngineError,
    },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::Syntax { line, .. } | ParseError::Model { line, .. } => *line,
        }
    }
}

/// Errors during report generation.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}
