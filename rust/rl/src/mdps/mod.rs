pub mod mdp;
pub mod mdp_solver_policy;
pub mod rollout;
pub mod solvers;
