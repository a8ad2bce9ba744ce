use gridworld::{Continous, Discrete};

/// Deterministic, tabular Markov Decision Process - Sutton & Barto 2018.
///
/// States and actions are dense indices `0..n_s()` and `0..n_a()`.
pub trait Mdp {
    fn n_s(&self) -> usize;

    fn n_a(&self) -> usize;

    /// Terminal states are never backed up and have no action.
    fn is_terminal(&self, s: Discrete) -> bool;

    /// Next state and the reward for entering it.
    fn transition(&self, s: Discrete, a: Discrete) -> (Discrete, Continous);
}
