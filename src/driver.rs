use crate::clock::FramePacer;
use crate::field::{FieldState, ParticleField};
use crate::input::InputSource;
use crate::surface::Surface;

/// Drives `field` until it stops, returning how many frames were stepped and rendered.
pub fn run<I, S, P>(field: &mut ParticleField, input: &mut I, surface: &mut S, pacer: &mut P) -> u64
where
    I: InputSource,
    S: Surface,
    P: FramePacer,
{
    let target_fps = field.config().target_fps;
    let mut frames = 0;

    while field.frame(input.poll(), surface) == FieldState::Running {
        frames += 1;
        pacer.tick(target_fps);
    }

    log::info!("Frame loop finished after {} frames", frames);
    frames
}
