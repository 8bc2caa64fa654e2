pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod field;
pub mod forces;
pub mod input;
pub mod particle;
pub mod surface;

/// Linear RGB with components in [0, 1].
pub type Color = cgmath::Vector3<f32>;

pub use clock::{FrameClock, FramePacer};
pub use config::FieldConfig;
pub use error::{Error, Result};
pub use field::{FieldState, PARTICLE_SIZE, ParticleField};
pub use forces::ForceMatrix;
pub use input::{InputEvent, InputSource, PointerButton};
pub use particle::{Group, Particle};
pub use surface::{FilledRect, RectBatch, Surface};
