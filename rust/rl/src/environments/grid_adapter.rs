use crate::mdps::mdp::Mdp;
use gridworld::*;
use std::rc::Rc;

/// Exposes a `GridWorld` as an index based `Mdp`, cells flattened row-major.
pub struct GridAdapter {
    env: Rc<GridWorld>,
}

impl GridAdapter {
    pub fn new(env: Rc<GridWorld>) -> Self {
        Self { env }
    }
}

impl Mdp for GridAdapter {
    fn n_s(&self) -> usize {
        self.env.n_cells()
    }

    fn n_a(&self) -> usize {
        Action::ALL.len()
    }

    fn is_terminal(&self, s: Discrete) -> bool {
        let s = self.env.state(s);
        self.env.is_goal(&s) || self.env.is_obstacle(&s)
    }

    fn transition(&self, s: Discrete, a: Discrete) -> (Discrete, Continous) {
        let next = self.env.step(self.env.state(s), Action::ALL[a]);

        (self.env.index(next), self.env.reward(&next))
    }
}
