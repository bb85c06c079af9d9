//! Error types for engine operations.
//!
//! Three categories cover every failure:
//! - [`EngineError::Phase`]: the operation is not valid in the current phase
//! - [`EngineError::Rule`]: the input violates a rule of the game
//! - [`EngineError::StateConsistency`]: defensive; the caller and engine
//!   disagree about the state itself, not a user mistake
//!
//! Every operation is a single deterministic attempt; failures surface at
//! the operation boundary and the prior state remains untouched.

use thiserror::Error;

use crate::game::Phase;

/// Errors that can occur in the engine.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// Operation invalid for the current phase.
    #[error("{operation} is not legal during the {phase} phase")]
    Phase {
        operation: &'static str,
        phase: Phase,
    },

    /// Illegal move sequence, illegal double offer, maxed cube, invalid
    /// role assignment.
    #[error("rule violation: {reason}")]
    Rule { reason: String },

    /// The state and the request disagree in a way legal play cannot
    /// produce.
    #[error("state consistency error: {detail}")]
    StateConsistency { detail: String },
}

impl EngineError {
    /// A phase error for the named operation.
    #[must_use]
    pub fn phase(operation: &'static str, phase: Phase) -> Self {
        Self::Phase { operation, phase }
    }

    /// A rule violation with the given reason.
    #[must_use]
    pub fn rule(reason: impl Into<String>) -> Self {
        Self::Rule {
            reason: reason.into(),
        }
    }

    /// A state consistency error with the given detail.
    #[must_use]
    pub fn state_consistency(detail: impl Into<String>) -> Self {
        Self::StateConsistency {
            detail: detail.into(),
        }
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
