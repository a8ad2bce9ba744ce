//! Value iteration and policy rollouts for the `gridworld` environment.
//!
//! ```no_run
//! use gridworld::GridWorld;
//! use gridworld_rl::mdps::{rollout::policy_rollout, solvers::value_iteration::solve};
//!
//! let env = GridWorld::with_corner_goal(5, []).unwrap();
//! let (values, policy) = solve(&env, 0.9, 0.01).unwrap();
//! let trajectory = policy_rollout(&env, &policy).trajectory().unwrap();
//! println!("V(start) = {}, {} steps", values.value(&env.start()), trajectory.steps());
//! ```

pub mod config;
pub mod environments;
pub mod mdps;

pub use config::Config;
pub use mdps::mdp::Mdp;
pub use mdps::mdp_solver_policy::GreedyPolicy;
pub use mdps::rollout::{policy_rollout, random_rollout, Rollout, Trajectory};
pub use mdps::solvers::value_iteration::{solve, solve_with_cap, ValueFunction, ValueIteration};
pub use mdps::solvers::MdpSolver;
