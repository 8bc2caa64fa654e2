use cgmath::prelude::*;

use crate::Color;

/// Velocity is halved on every update, independent of frame time.
pub const DAMPING: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Group {
    Red,
    Green,
    Blue,
    Yellow,
}

impl Group {
    pub const COUNT: usize = 4;

    /// Iteration, force-matrix and draw order.
    pub const ALL: [Group; Group::COUNT] = [Group::Red, Group::Green, Group::Blue, Group::Yellow];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn color(self) -> Color {
        match self {
            Group::Red => cgmath::vec3(1.0, 0.0, 0.0),
            Group::Green => cgmath::vec3(0.0, 1.0, 0.0),
            Group::Blue => cgmath::vec3(0.0, 0.0, 1.0),
            Group::Yellow => cgmath::vec3(1.0, 1.0, 0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: cgmath::Vector2<f32>,
    pub velocity: cgmath::Vector2<f32>,
    pub group: Group,
}

impl Particle {
    pub fn at_rest(group: Group, x: f32, y: f32) -> Self {
        Self {
            position: cgmath::vec2(x, y),
            velocity: cgmath::Vector2::zero(),
            group,
        }
    }

    /// Applies one accumulated force, moves, then reflects off the walls.
    pub fn advance(&mut self, force: cgmath::Vector2<f32>, width: f32, height: f32) {
        self.velocity = (self.velocity + force) * DAMPING;
        self.position += self.velocity;
        self.reflect(width, height);
    }

    /// Snaps an escaped coordinate back inside by one unit and flips that velocity component.
    pub fn reflect(&mut self, width: f32, height: f32) {
        macro_rules! handle_boundary {
            ($coord:expr, $vel:expr, $size:expr) => {
                if $coord <= 0.0 {
                    $coord = 1.0;
                    $vel = -$vel;
                } else if $coord >= $size {
                    $coord = $size - 1.0;
                    $vel = -$vel;
                }
            };
        }

        handle_boundary!(self.position.x, self.velocity.x, width);
        handle_boundary!(self.position.y, self.velocity.y, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflects_off_left_wall() {
        let mut particle = Particle::at_rest(Group::Red, 0.0, 50.0);
        particle.velocity = cgmath::vec2(-2.0, 0.0);
        particle.reflect(500.0, 300.0);
        assert_eq!(particle.position, cgmath::vec2(1.0, 50.0));
        assert_eq!(particle.velocity, cgmath::vec2(2.0, 0.0));
    }

    #[test]
    fn reflects_off_far_walls_independently() {
        let mut particle = Particle::at_rest(Group::Blue, 501.5, 300.0);
        particle.velocity = cgmath::vec2(3.0, 0.25);
        particle.reflect(500.0, 300.0);
        assert_eq!(particle.position, cgmath::vec2(499.0, 299.0));
        assert_eq!(particle.velocity, cgmath::vec2(-3.0, -0.25));
    }

    #[test]
    fn interior_particle_is_untouched() {
        let mut particle = Particle::at_rest(Group::Green, 10.0, 10.0);
        particle.velocity = cgmath::vec2(-1.0, 1.0);
        let before = particle;
        particle.reflect(500.0, 300.0);
        assert_eq!(particle, before);
    }

    #[test]
    fn advance_damps_then_moves() {
        let mut particle = Particle::at_rest(Group::Yellow, 100.0, 100.0);
        particle.velocity = cgmath::vec2(4.0, -2.0);
        particle.advance(cgmath::vec2(2.0, 0.0), 500.0, 300.0);
        assert_eq!(particle.velocity, cgmath::vec2(3.0, -1.0));
        assert_eq!(particle.position, cgmath::vec2(103.0, 99.0));
    }

    #[test]
    fn advance_into_wall_reflects() {
        let mut particle = Particle::at_rest(Group::Red, 0.5, 100.0);
        particle.velocity = cgmath::vec2(-2.0, 0.0);
        particle.advance(cgmath::Vector2::zero(), 500.0, 300.0);
        assert_eq!(particle.position.x, 1.0);
        assert_eq!(particle.velocity.x, 1.0);
    }

    #[test]
    fn group_indices_follow_draw_order() {
        for (i, group) in Group::ALL.iter().enumerate() {
            assert_eq!(group.index(), i);
        }
    }
}
