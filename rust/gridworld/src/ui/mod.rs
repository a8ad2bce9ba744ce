//! Plain-text frames for terminals and logs.
//!
//! Cells are separated by a single space and rows by a newline, with no
//! trailing newline. `A` is the agent, `G` the goal and `#` an obstacle.

use crate::*;
use itertools::Itertools;
use ndarray::Array2;

const AGENT: char = 'A';
const GOAL: char = 'G';
const OBSTACLE: char = '#';
const FREE: char = '.';

pub fn render_frame(env: &GridWorld, agent: &State) -> String {
    render_cells(env, |s| {
        if s == *agent {
            AGENT.to_string()
        } else if env.is_goal(&s) {
            GOAL.to_string()
        } else if env.is_obstacle(&s) {
            OBSTACLE.to_string()
        } else {
            FREE.to_string()
        }
    })
}

/// Values are right aligned with two decimals; goal and obstacle cells carry no value.
pub fn render_values(env: &GridWorld, values: &Array2<Continous>) -> String {
    render_cells(env, |s| {
        if env.is_goal(&s) {
            format!("{GOAL:>7}")
        } else if env.is_obstacle(&s) {
            format!("{OBSTACLE:>7}")
        } else {
            format!("{:>7.2}", values[(s.row, s.col)])
        }
    })
}

pub fn render_policy(env: &GridWorld, policy: &Array2<Option<Action>>) -> String {
    render_cells(env, |s| {
        if env.is_goal(&s) {
            GOAL.to_string()
        } else if env.is_obstacle(&s) {
            OBSTACLE.to_string()
        } else {
            policy[(s.row, s.col)]
                .map_or(FREE, Action::arrow)
                .to_string()
        }
    })
}

fn render_cells<F>(env: &GridWorld, cell: F) -> String
where
    F: Fn(State) -> String,
{
    (0..env.size())
        .map(|row| {
            (0..env.size())
                .map(|col| cell(State::new(row, col)))
                .join(" ")
        })
        .join("\n")
}
