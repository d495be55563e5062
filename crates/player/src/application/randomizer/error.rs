//! Command errors returned by the randomizer handle.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RandomizerError {
    /// The command is not valid in the current phase
    #[error("Cannot {command} while {phase}")]
    InvalidTransition {
        command: &'static str,
        phase: &'static str,
    },
    /// The roll runtime was disposed
    #[error("Randomizer has been disposed")]
    Disposed,
}

impl RandomizerError {
    pub fn invalid_transition(command: &'static str, phase: &'static str) -> Self {
        Self::InvalidTransition { command, phase }
    }
}
