use gridworld::*;
use ndarray::Array2;
use serde::Serialize;

/// Greedy actions extracted from a solved value function.
///
/// Undefined (`None`) at the goal and at obstacles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GreedyPolicy(Array2<Option<Action>>);

impl GreedyPolicy {
    pub fn action(&self, s: &State) -> Option<Action> {
        self.0.get((s.row, s.col)).copied().flatten()
    }

    pub fn table(&self) -> &Array2<Option<Action>> {
        &self.0
    }
}

impl From<Array2<Option<Action>>> for GreedyPolicy {
    fn from(table: Array2<Option<Action>>) -> Self {
        Self(table)
    }
}

impl Policy for GreedyPolicy {
    fn policy(&mut self, s: &State) -> Option<Action> {
        self.action(s)
    }
}

impl Policy for &GreedyPolicy {
    fn policy(&mut self, s: &State) -> Option<Action> {
        self.action(s)
    }
}
