//! Error types for tour planning.

use thiserror::Error;

/// Errors surfaced by problem construction and the search engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    /// Malformed problem data or configuration.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not permitted in the engine's current state.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias for planner operations.
pub type Result<T> = std::result::Result<T, PlannerError>;
