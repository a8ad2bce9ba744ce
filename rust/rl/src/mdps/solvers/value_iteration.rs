use super::MdpSolver;
use crate::environments::grid_adapter::GridAdapter;
use crate::mdps::{mdp::Mdp, mdp_solver_policy::GreedyPolicy};
use gridworld::*;
use ndarray::Array2;
use serde::Serialize;
use std::rc::Rc;
use tracing::{debug, info, trace, warn};

/// Sweep budget per state when the caller gives none.
pub const SWEEP_CAP_PER_STATE: usize = 1000;

/// Synchronous value iteration: every sweep reads only the previous sweep's values.
///
/// Ref: Sutton & Barto 2018, section 4.4.
#[derive(Clone)]
pub struct ValueIteration {
    mdp: Rc<dyn Mdp>,
    gamma: Continous,
    v: Vec<Continous>,
    pi: Vec<Option<Discrete>>,
}

impl ValueIteration {
    pub fn new(mdp: Rc<dyn Mdp>, gamma: Continous) -> Result<Self> {
        if !(gamma > 0. && gamma <= 1.) {
            return Err(Error::Configuration(format!(
                "gamma must be within (0, 1], got {gamma}"
            )));
        }

        let n_s = mdp.n_s();
        Ok(Self {
            mdp,
            gamma,
            v: vec![0.; n_s],
            pi: vec![None; n_s],
        })
    }

    pub fn values(&self) -> &[Continous] {
        &self.v
    }

    fn q(&self, s: Discrete, a: Discrete) -> Continous {
        let (next, r) = self.mdp.transition(s, a);
        r + self.gamma * self.v[next]
    }

    /// Best value and the first action attaining it.
    fn backup(&self, s: Discrete) -> (Continous, Discrete) {
        (0..self.mdp.n_a()).fold((Continous::NEG_INFINITY, 0), |best, a| {
            let q = self.q(s, a);
            if q > best.0 {
                (q, a)
            } else {
                best
            }
        })
    }
}

impl MdpSolver for ValueIteration {
    fn v_star(&self, s: Discrete) -> Continous {
        self.v[s]
    }

    fn q_star(&self, s: Discrete, a: Discrete) -> Option<Continous> {
        if self.mdp.is_terminal(s) || a >= self.mdp.n_a() {
            None
        } else {
            Some(self.q(s, a))
        }
    }

    fn pi_star(&self, s: Discrete) -> Option<Discrete> {
        self.pi[s]
    }

    fn exec(&mut self, theta: Continous, max_sweeps: Option<usize>) -> Result<usize> {
        if !(theta > 0.) {
            return Err(Error::Configuration(format!(
                "theta must be positive, got {theta}"
            )));
        }

        let n_s = self.mdp.n_s();
        let max_sweeps = max_sweeps.unwrap_or(SWEEP_CAP_PER_STATE * n_s);
        let mut delta = Continous::INFINITY;
        for sweep in 1..=max_sweeps {
            let mut v = self.v.clone();
            let mut pi = vec![None; n_s];
            delta = 0.;
            for s in (0..n_s).filter(|&s| !self.mdp.is_terminal(s)) {
                let (best, a) = self.backup(s);
                delta = delta.max((self.v[s] - best).abs());
                v[s] = best;
                pi[s] = Some(a);
            }
            self.v = v;
            self.pi = pi;

            trace!(sweep, delta, "value iteration sweep");
            if delta < theta {
                debug!(sweeps = sweep, delta, "value iteration converged");
                return Ok(sweep);
            }
        }

        warn!(sweeps = max_sweeps, delta, "value iteration did not converge");
        Err(Error::NonConvergence {
            sweeps: max_sweeps,
            delta,
        })
    }
}

/// Dense row-major table of state values; goal and obstacle entries stay at zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueFunction(Array2<Continous>);

impl ValueFunction {
    pub fn value(&self, s: &State) -> Continous {
        self.0[(s.row, s.col)]
    }

    pub fn table(&self) -> &Array2<Continous> {
        &self.0
    }
}

pub fn solve(
    env: &GridWorld,
    gamma: Continous,
    theta: Continous,
) -> Result<(ValueFunction, GreedyPolicy)> {
    solve_with_cap(env, gamma, theta, None)
}

/// `max_sweeps` defaults to `SWEEP_CAP_PER_STATE` sweeps per cell.
pub fn solve_with_cap(
    env: &GridWorld,
    gamma: Continous,
    theta: Continous,
    max_sweeps: Option<usize>,
) -> Result<(ValueFunction, GreedyPolicy)> {
    let env = Rc::new(env.clone());
    let mdp = Rc::new(GridAdapter::new(Rc::clone(&env)));
    let mut vi = ValueIteration::new(mdp, gamma)?;
    let sweeps = vi.exec(theta, max_sweeps)?;
    info!(size = env.size(), gamma, theta, sweeps, "solved grid world");

    let n = env.size();
    let index = |r, c| env.index(State::new(r, c));
    let values = Array2::from_shape_fn((n, n), |(r, c)| vi.v_star(index(r, c)));
    let policy = Array2::from_shape_fn((n, n), |(r, c)| {
        vi.pi_star(index(r, c)).and_then(Action::from_index)
    });

    Ok((ValueFunction(values), GreedyPolicy::from(policy)))
}
