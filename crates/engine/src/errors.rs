use thiserror::Error;

use crate::llm_client::LlmError;

/// Engine-level error type.
///
/// Three families, handled differently:
/// - input validation: fatal, surfaced immediately, never retried
/// - collaborator failures: either degraded to a fallback (element-level) or
///   wrapped as [`EngineError::Iteration`] and aborting the run (round-level)
/// - programmer errors such as [`EngineError::EmptyHistory`]: thrown
///   synchronously, never caught internally
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Parsing failed: {0}")]
    Parse(String),

    #[error("Semantic matching failed: {0}")]
    Matching(String),

    #[error("Recommendation generation failed: {0}")]
    Recommendation(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// A parse/match/score failure inside a round. Aborts the run, not just
    /// the round: scoring garbage silently would be worse than stopping.
    #[error("Failed to process iteration: {0}")]
    Iteration(String),

    #[error("Cannot build an optimization result from an empty history")]
    EmptyHistory,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl EngineError {
    /// Whether the application layer may sensibly retry the failed call.
    ///
    /// Transient transport shapes (timeouts, 429, 5xx) are retryable;
    /// validation and parse failures are not — the input will not get better.
    pub fn is_retryable(&self) -> bool {
        match self {
            EngineError::Llm(e) => e.is_transient(),
            EngineError::Matching(_) | EngineError::Recommendation(_) => true,
            EngineError::Validation(_)
            | EngineError::Parse(_)
            | EngineError::Iteration(_)
            | EngineError::EmptyHistory
            | EngineError::Internal(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_error_message_is_wrapped() {
        let err = EngineError::Iteration("matcher unavailable".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to process iteration: matcher unavailable"
        );
    }

    #[test]
    fn test_validation_is_not_retryable() {
        assert!(!EngineError::Validation("empty resume".into()).is_retryable());
    }

    #[test]
    fn test_matching_is_retryable() {
        assert!(EngineError::Matching("service unavailable".into()).is_retryable());
    }

    #[test]
    fn test_empty_history_is_not_retryable() {
        assert!(!EngineError::EmptyHistory.is_retryable());
    }
}
