// Error types for the threat assessment engine

use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to load rule set: {0}")]
    RuleLoad(String),

    #[error("Invalid detection pattern: {0}")]
    PatternCompile(#[from] regex::Error),

    #[error("Internal engine error: {0}")]
    Internal(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// CONVERSIONS
// =============================================================================

impl From<validator::ValidationErrors> for EngineError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid ({})", field, e.code),
                })
            })
            .collect();

        EngineError::InvalidInput(messages.join("; "))
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::RuleLoad(err.to_string())
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::RuleLoad(err.to_string())
    }
}

impl EngineError {
    /// Short machine-readable tag used in log events
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidInput(_) => "INVALID_INPUT",
            EngineError::RuleLoad(_) => "RULE_LOAD",
            EngineError::PatternCompile(_) => "PATTERN_COMPILE",
            EngineError::Internal(_) => "INTERNAL",
        }
    }
}
