//! Uniform rejection sampling of obstacle cells.

use crate::*;
use rand::Rng;
use std::collections::BTreeSet;
use tracing::debug;

/// Obstacle density is a percentage of all cells.
pub const MAX_DENSITY: u32 = 50;

pub fn obstacle_count(size: Discrete, density: u32) -> usize {
    size * size * density as usize / 100
}

/// Samples `obstacle_count(size, density)` distinct cells, never the start or `goal`.
pub fn sample_obstacles<R: Rng + ?Sized>(
    size: Discrete,
    goal: State,
    density: u32,
    rng: &mut R,
) -> Result<BTreeSet<State>> {
    if density > MAX_DENSITY {
        return Err(Error::Configuration(format!(
            "obstacle density must be within 0..={MAX_DENSITY}%, got {density}%"
        )));
    }

    let n = obstacle_count(size, density);
    let free = (size * size).saturating_sub(if goal == START { 1 } else { 2 });
    if n > free {
        return Err(Error::Configuration(format!(
            "cannot place {n} obstacles on {free} free cells"
        )));
    }

    let mut obstacles = BTreeSet::new();
    while obstacles.len() < n {
        let s = State::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if s != START && s != goal {
            obstacles.insert(s);
        }
    }

    debug!(size, density, count = n, "sampled obstacles");
    Ok(obstacles)
}

/// Grid with the goal in the corner opposite the start and randomly placed obstacles.
pub fn sample_grid_world<R: Rng + ?Sized>(
    size: Discrete,
    density: u32,
    rng: &mut R,
) -> Result<GridWorld> {
    if size == 0 {
        return Err(Error::Configuration("grid size must be at least 1".into()));
    }

    let goal = State::new(size - 1, size - 1);
    let obstacles = sample_obstacles(size, goal, density, rng)?;
    GridWorld::new(size, goal, obstacles)
}
