extern crate gridworld;
extern crate insta;
mod common;

use common::*;
use gridworld::ui::*;
use gridworld::*;
use ndarray::Array2;

#[test]
fn frame_marks_agent_goal_and_obstacles() {
    let env = grid(3, &[(1, 1)]);

    insta::assert_snapshot!(render_frame(&env, &s(0, 1)), @r###"
    . A .
    . # .
    . . G
    "###);
}

#[test]
fn agent_on_goal_is_drawn_as_agent() {
    let env = grid(2, &[]);

    insta::assert_snapshot!(render_frame(&env, &s(1, 1)), @r###"
    . .
    . A
    "###);
}

#[test]
fn policy_table_uses_arrows() {
    let env = grid(3, &[(0, 1)]);
    let mut policy = Array2::from_elem((3, 3), Some(Action::Down));
    policy[(2, 0)] = Some(Action::Right);
    policy[(2, 1)] = Some(Action::Right);
    policy[(0, 2)] = None;
    policy[(1, 0)] = Some(Action::Up);
    policy[(1, 1)] = Some(Action::Left);

    insta::assert_snapshot!(render_policy(&env, &policy), @r###"
    ↓ # .
    ↑ ← ↓
    → → G
    "###);
}

#[test]
fn value_table_is_right_aligned() {
    let env = grid(2, &[(0, 1)]);
    let values = Array2::from_shape_vec((2, 2), vec![8.5, 0., 10., 0.]).unwrap();

    assert_eq!(
        render_values(&env, &values),
        "   8.50       #\n  10.00       G"
    );
}
