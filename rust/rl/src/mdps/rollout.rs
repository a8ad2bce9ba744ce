//! Drives an agent from the start to the goal, one state at a time.

use super::mdp_solver_policy::GreedyPolicy;
use gridworld::*;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, trace, warn};

/// Step budget per cell for random walks.
pub const RANDOM_STEP_CAP_PER_CELL: usize = 10_000;

/// Visited states, starting at the start and ending at the goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trajectory(Vec<State>);

impl Trajectory {
    pub fn states(&self) -> &[State] {
        &self.0
    }

    /// Number of transitions taken.
    pub fn steps(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn last(&self) -> Option<&State> {
        self.0.last()
    }
}

impl From<Vec<State>> for Trajectory {
    fn from(states: Vec<State>) -> Self {
        Self(states)
    }
}

/// Lazy sequence of the states entered by following `policy`.
///
/// Ends right after yielding the goal. Yields a single error and then ends when the
/// goal cannot be reached or the step budget runs out.
pub struct Rollout<'a, P> {
    env: &'a GridWorld,
    policy: P,
    state: State,
    steps: usize,
    max_steps: usize,
    checked: bool,
    done: bool,
}

impl<'a, P: Policy> Rollout<'a, P> {
    pub fn new(env: &'a GridWorld, policy: P, max_steps: usize) -> Self {
        let state = env.start();
        Self {
            env,
            policy,
            state,
            steps: 0,
            max_steps,
            checked: false,
            done: env.is_goal(&state),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn trajectory(self) -> Result<Trajectory> {
        let mut states = vec![self.env.start()];
        for s in self {
            states.push(s?);
        }

        Ok(states.into())
    }

    fn fail(&mut self, e: Error) -> Option<Result<State>> {
        warn!(steps = self.steps, state = %self.state, "rollout failed: {e}");
        self.done = true;
        Some(Err(e))
    }
}

impl<P: Policy> Iterator for Rollout<'_, P> {
    type Item = Result<State>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if !self.checked {
            self.checked = true;
            if !self.env.goal_reachable_from(self.state) {
                return self.fail(Error::UnreachableGoal { steps: 0 });
            }
        }

        if self.steps >= self.max_steps {
            return self.fail(Error::UnreachableGoal { steps: self.steps });
        }

        let Some(a) = self.policy.policy(&self.state) else {
            return self.fail(Error::PolicyUndefined { state: self.state });
        };

        self.state = self.env.step(self.state, a);
        self.steps += 1;
        trace!(step = self.steps, action = ?a, state = %self.state, "rollout step");

        if self.env.is_goal(&self.state) {
            debug!(steps = self.steps, "rollout reached the goal");
            self.done = true;
        }

        Some(Ok(self.state))
    }
}

/// Uniformly random actions; gives up after `RANDOM_STEP_CAP_PER_CELL` steps per cell.
pub fn random_rollout<'a, R: Rng + ?Sized>(
    env: &'a GridWorld,
    rng: &'a mut R,
) -> Rollout<'a, RandomPolicy<'a, R>> {
    let max_steps = RANDOM_STEP_CAP_PER_CELL * env.n_cells();
    Rollout::new(env, RandomPolicy::new(rng), max_steps)
}

/// Follows a solved policy; a sound one never needs more steps than there are cells.
pub fn policy_rollout<'a>(
    env: &'a GridWorld,
    policy: &'a GreedyPolicy,
) -> Rollout<'a, &'a GreedyPolicy> {
    Rollout::new(env, policy, env.n_cells())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mdps::solvers::value_iteration::solve;
    use assertor::*;
    use itertools::Itertools;
    use ndarray::Array2;
    use rand::prelude::*;

    fn s(row: Discrete, col: Discrete) -> State {
        State::new(row, col)
    }

    fn is_consistent(env: &GridWorld, t: &Trajectory) -> bool {
        t.states()
            .iter()
            .tuple_windows()
            .all(|(&a, &b)| Action::ALL.iter().any(|&act| env.step(a, act) == b))
    }

    #[test]
    fn learned_rollout_takes_a_shortest_path() {
        let env = GridWorld::with_corner_goal(6, []).unwrap();
        let (_, pi) = solve(&env, 0.9, 0.01).unwrap();

        let t = policy_rollout(&env, &pi).trajectory().unwrap();

        assert_eq!(t.states()[0], START);
        assert_eq!(t.last(), Some(&env.goal()));
        assert_eq!(t.steps(), 10);
        assert!(t.states().iter().all_unique());
        assert!(is_consistent(&env, &t));
    }

    #[test]
    fn learned_rollout_avoids_obstacles() {
        let obstacles = [s(0, 1), s(1, 1), s(2, 1), s(2, 3), s(3, 3)];
        let env = GridWorld::with_corner_goal(5, obstacles).unwrap();
        let (_, pi) = solve(&env, 0.9, 0.01).unwrap();

        let t = policy_rollout(&env, &pi).trajectory().unwrap();

        assert!(t.steps() <= env.n_cells());
        assert!(t.states().iter().all_unique());
        assert!(t.states().iter().all(|st| !env.is_obstacle(st)));
        assert!(is_consistent(&env, &t));
        assert_eq!(t.last(), Some(&env.goal()));
    }

    #[test]
    fn learned_rollout_through_single_opening() {
        let env = GridWorld::new(5, s(2, 2), [s(1, 2), s(2, 1), s(2, 3)]).unwrap();
        let (_, pi) = solve(&env, 0.9, 0.01).unwrap();

        let t = policy_rollout(&env, &pi).trajectory().unwrap();

        assert_eq!(t.steps(), 6);
        assert_eq!(t.states()[t.steps() - 1..], [s(3, 2), s(2, 2)]);
    }

    #[test]
    fn random_rollout_reaches_goal() {
        let env = GridWorld::with_corner_goal(5, [s(1, 1), s(3, 2)]).unwrap();
        let rng = &mut StdRng::seed_from_u64(2718);

        let t = random_rollout(&env, rng).trajectory().unwrap();

        assert_eq!(t.states()[0], START);
        assert_eq!(t.last(), Some(&env.goal()));
        assert!(t.steps() >= 8);
        assert!(is_consistent(&env, &t));
        assert_that!(t.states().iter().filter(|&st| env.is_goal(st)).count()).is_equal_to(1);
    }

    #[test]
    fn rollouts_restart_from_the_start() {
        let env = GridWorld::with_corner_goal(4, [s(2, 2)]).unwrap();

        let walk = |seed| {
            let rng = &mut StdRng::seed_from_u64(seed);
            random_rollout(&env, rng).trajectory().unwrap()
        };
        assert_eq!(walk(11), walk(11));

        let (_, pi) = solve(&env, 0.9, 0.01).unwrap();
        let first = policy_rollout(&env, &pi).trajectory().unwrap();
        let second = policy_rollout(&env, &pi).trajectory().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rollout_is_lazy() {
        let env = GridWorld::with_corner_goal(5, []).unwrap();
        let (_, pi) = solve(&env, 0.9, 0.01).unwrap();

        let mut rollout = policy_rollout(&env, &pi);
        let first_two = rollout.by_ref().take(2).collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(first_two, vec![s(1, 0), s(2, 0)]);
        assert_eq!(rollout.steps(), 2);
        assert_eq!(rollout.state(), s(2, 0));
        assert_eq!(rollout.count(), 6);
    }

    #[test]
    fn start_on_goal_yields_nothing() {
        let env = GridWorld::with_corner_goal(1, []).unwrap();
        let rng = &mut StdRng::seed_from_u64(1);

        let t = random_rollout(&env, rng).trajectory().unwrap();

        assert_eq!(t.states(), [START]);
        assert_eq!(t.steps(), 0);
    }

    #[test]
    fn walled_off_goal_is_unreachable() {
        let env = GridWorld::with_corner_goal(3, [s(1, 2), s(2, 1)]).unwrap();
        let (_, pi) = solve(&env, 0.9, 0.01).unwrap();

        let rng = &mut StdRng::seed_from_u64(1);
        let mut random = random_rollout(&env, rng);
        assert_eq!(random.next(), Some(Err(Error::UnreachableGoal { steps: 0 })));
        assert_eq!(random.next(), None);

        assert_eq!(
            policy_rollout(&env, &pi).trajectory(),
            Err(Error::UnreachableGoal { steps: 0 })
        );
    }

    #[test]
    fn cyclic_policy_hits_the_step_cap() {
        let env = GridWorld::with_corner_goal(3, []).unwrap();
        let pi = GreedyPolicy::from(Array2::from_elem((3, 3), Some(Action::Left)));

        let states = policy_rollout(&env, &pi).collect::<Vec<_>>();

        assert_eq!(states.len(), 10);
        assert!(states[..9].iter().all(|st| *st == Ok(START)));
        assert_eq!(states[9], Err(Error::UnreachableGoal { steps: 9 }));
    }

    #[test]
    fn missing_action_is_reported() {
        let env = GridWorld::with_corner_goal(3, []).unwrap();
        let pi = GreedyPolicy::from(Array2::from_elem((3, 3), None));

        assert_eq!(
            policy_rollout(&env, &pi).trajectory(),
            Err(Error::PolicyUndefined { state: START })
        );
    }
}
