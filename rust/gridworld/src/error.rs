use crate::State;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything the environment, solvers and rollouts can report back to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Rejected before any iteration or stepping starts.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Value iteration did not converge after {sweeps} sweeps (last delta {delta})")]
    NonConvergence { sweeps: usize, delta: f64 },

    #[error("Goal is unreachable from the start (gave up after {steps} steps)")]
    UnreachableGoal { steps: usize },

    #[error("Policy has no action for state {state}")]
    PolicyUndefined { state: State },
}
