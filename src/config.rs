use crate::error::{Error, Result};
use crate::Color;

pub const DEFAULT_WIDTH: u32 = 500;
pub const DEFAULT_HEIGHT: u32 = 300;
pub const DEFAULT_POPULATION: usize = 100;
pub const DEFAULT_TARGET_FPS: u32 = 120;

/// Everything needed to build a [`crate::ParticleField`].
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    /// Particles per group.
    pub population: usize,
    /// Frame limiter target; 0 runs unpaced.
    pub target_fps: u32,
    /// Fixed seed for reproducible runs, OS entropy otherwise.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            background: cgmath::vec3(1.0, 1.0, 1.0),
            population: DEFAULT_POPULATION,
            target_fps: DEFAULT_TARGET_FPS,
            seed: None,
        }
    }
}

impl FieldConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < 2 || self.height < 2 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
