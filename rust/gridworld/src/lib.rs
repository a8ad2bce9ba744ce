extern crate rand;
extern crate serde;

pub mod error;
pub mod obstacles;
pub mod policy;
pub mod ui;

pub use error::{Error, Result};
pub use policy::{Policy, RandomPolicy};

use itertools::iproduct;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use std::fmt;

pub type Discrete = usize;
pub type Continous = f64;

/// Reward for entering the goal.
pub const R_GOAL: Continous = 10.;

/// Reward for entering any other cell, including bumping in place.
pub const R_STEP: Continous = -1.;

/// Every episode starts in the top-left corner.
pub const START: State = State::new(0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct State {
    pub row: Discrete,
    pub col: Discrete,
}

impl State {
    pub const fn new(row: Discrete, col: Discrete) -> Self {
        Self { row, col }
    }

    pub fn manhattan(&self, other: &State) -> Discrete {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(Discrete, Discrete)> for State {
    fn from((row, col): (Discrete, Discrete)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The declaration order is the tie-breaking order used by the solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    pub fn index(self) -> Discrete {
        self as Discrete
    }

    pub fn from_index(i: Discrete) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn arrow(self) -> char {
        match self {
            Action::Up => '↑',
            Action::Down => '↓',
            Action::Left => '←',
            Action::Right => '→',
        }
    }
}

/// Square grid with obstacles and a single absorbing goal.
///
/// Walls and obstacles never fail a move: the agent simply stays put.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridWorld {
    size: Discrete,
    goal: State,
    obstacles: BTreeSet<State>,
    #[serde(skip)]
    blocked: Array2<bool>,
}

impl GridWorld {
    pub fn new<I>(size: Discrete, goal: State, obstacles: I) -> Result<Self>
    where
        I: IntoIterator<Item = State>,
    {
        if size == 0 {
            return Err(Error::Configuration("grid size must be at least 1".into()));
        }

        let inside = |s: &State| s.row < size && s.col < size;
        if !inside(&goal) {
            return Err(Error::Configuration(format!(
                "goal {goal} lies outside the {size}x{size} grid"
            )));
        }

        let obstacles = obstacles.into_iter().collect::<BTreeSet<_>>();
        let mut blocked = Array2::from_elem((size, size), false);
        for o in &obstacles {
            if !inside(o) {
                return Err(Error::Configuration(format!(
                    "obstacle {o} lies outside the {size}x{size} grid"
                )));
            }
            if *o == START {
                return Err(Error::Configuration(format!("obstacle blocks the start {o}")));
            }
            if *o == goal {
                return Err(Error::Configuration(format!("obstacle blocks the goal {o}")));
            }
            blocked[(o.row, o.col)] = true;
        }

        Ok(Self {
            size,
            goal,
            obstacles,
            blocked,
        })
    }

    /// Goal in the bottom-right corner, opposite the start.
    pub fn with_corner_goal<I>(size: Discrete, obstacles: I) -> Result<Self>
    where
        I: IntoIterator<Item = State>,
    {
        let corner = size.saturating_sub(1);
        Self::new(size, State::new(corner, corner), obstacles)
    }

    pub fn size(&self) -> Discrete {
        self.size
    }

    pub fn n_cells(&self) -> usize {
        self.size * self.size
    }

    pub fn start(&self) -> State {
        START
    }

    pub fn goal(&self) -> State {
        self.goal
    }

    pub fn obstacles(&self) -> &BTreeSet<State> {
        &self.obstacles
    }

    pub fn contains(&self, s: &State) -> bool {
        s.row < self.size && s.col < self.size
    }

    pub fn is_obstacle(&self, s: &State) -> bool {
        self.blocked.get((s.row, s.col)).copied().unwrap_or(false)
    }

    pub fn is_goal(&self, s: &State) -> bool {
        *s == self.goal
    }

    /// Row-major index of a cell.
    pub fn index(&self, s: State) -> Discrete {
        s.row * self.size + s.col
    }

    pub fn state(&self, i: Discrete) -> State {
        State::new(i / self.size, i % self.size)
    }

    /// All cells in row-major order.
    pub fn states(&self) -> impl Iterator<Item = State> {
        iproduct!(0..self.size, 0..self.size).map(State::from)
    }

    pub fn step(&self, s: State, a: Action) -> State {
        let next = match a {
            Action::Up if s.row > 0 => State::new(s.row - 1, s.col),
            Action::Down if s.row + 1 < self.size => State::new(s.row + 1, s.col),
            Action::Left if s.col > 0 => State::new(s.row, s.col - 1),
            Action::Right if s.col + 1 < self.size => State::new(s.row, s.col + 1),
            _ => s,
        };

        if self.is_obstacle(&next) {
            s
        } else {
            next
        }
    }

    /// Depends only on the cell being entered.
    pub fn reward(&self, next: &State) -> Continous {
        if self.is_goal(next) {
            R_GOAL
        } else {
            R_STEP
        }
    }

    /// Breadth-first search over `step`.
    pub fn goal_reachable_from(&self, from: State) -> bool {
        if !self.contains(&from) || self.is_obstacle(&from) {
            return false;
        }

        let mut seen = Array2::from_elem((self.size, self.size), false);
        let mut frontier = VecDeque::from([from]);
        seen[(from.row, from.col)] = true;
        while let Some(s) = frontier.pop_front() {
            if self.is_goal(&s) {
                return true;
            }
            for a in Action::ALL {
                let next = self.step(s, a);
                if !seen[(next.row, next.col)] {
                    seen[(next.row, next.col)] = true;
                    frontier.push_back(next);
                }
            }
        }

        false
    }
}
