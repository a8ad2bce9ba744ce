pub mod value_iteration;

use gridworld::{Continous, Discrete, Result};

pub trait MdpSolver {
    fn v_star(&self, s: Discrete) -> Continous;

    fn q_star(&self, s: Discrete, a: Discrete) -> Option<Continous>;

    fn pi_star(&self, s: Discrete) -> Option<Discrete>;

    /// Runs until convergence below `theta`, returning the number of sweeps taken.
    fn exec(&mut self, theta: Continous, max_sweeps: Option<usize>) -> Result<usize>;
}
