use gridworld::obstacles::{sample_grid_world, MAX_DENSITY};
use gridworld::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Run parameters. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Grid side length.
    pub size: Discrete,
    pub gamma: Continous,
    pub theta: Continous,
    /// Percentage of cells turned into obstacles.
    pub obstacle_density: u32,
    pub seed: Option<u64>,
    /// Pause between rendered rollout steps.
    pub delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: 5,
            gamma: 0.9,
            theta: 0.01,
            obstacle_density: 20,
            seed: None,
            delay_ms: 0,
        }
    }
}

impl Config {
    pub fn from_json(settings: &str) -> Result<Self> {
        serde_json::from_str(settings)
            .map_err(|e| Error::Configuration(format!("invalid settings: {e}")))
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::Configuration("grid size must be at least 1".into()));
        }
        if !(self.gamma > 0. && self.gamma <= 1.) {
            return Err(Error::Configuration(format!(
                "gamma must be within (0, 1], got {}",
                self.gamma
            )));
        }
        if !(self.theta > 0.) {
            return Err(Error::Configuration(format!(
                "theta must be positive, got {}",
                self.theta
            )));
        }
        if self.obstacle_density > MAX_DENSITY {
            return Err(Error::Configuration(format!(
                "obstacle density must be within 0..={MAX_DENSITY}%, got {}%",
                self.obstacle_density
            )));
        }

        Ok(())
    }

    pub fn build_env<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<GridWorld> {
        self.validate()?;
        sample_grid_world(self.size, self.obstacle_density, rng)
    }
}
