use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::FieldConfig;
use crate::error::Result;
use crate::forces::{ForceMatrix, net_force};
use crate::input::{InputEvent, PointerButton};
use crate::particle::{Group, Particle};
use crate::surface::Surface;

/// Edge length of the square drawn for each particle.
pub const PARTICLE_SIZE: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldState {
    Running,
    Stopped,
}

/// Four particle groups, their force matrix and the random source that regenerates it.
pub struct ParticleField {
    config: FieldConfig,
    groups: [Vec<Particle>; Group::COUNT],
    forces: ForceMatrix,
    state: FieldState,
    rng: StdRng,
}

impl ParticleField {
    /// Scatters `config.population` resting particles per group and draws an initial force matrix.
    pub fn new(config: FieldConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = Self::rng_for(&config);

        let groups = Group::ALL.map(|group| spawn_group(&mut rng, group, &config));
        let forces = ForceMatrix::random(&mut rng);

        log::info!(
            "Field {}x{} with {} particles per group ({})",
            config.width,
            config.height,
            config.population,
            match config.seed {
                Some(seed) => format!("seed {}", seed),
                None => "unseeded".to_string(),
            }
        );

        Ok(Self {
            config,
            groups,
            forces,
            state: FieldState::Running,
            rng,
        })
    }

    /// Builds a field around explicit particles and forces; the seed only drives later regenerations.
    pub fn from_parts(
        config: FieldConfig,
        groups: [Vec<Particle>; Group::COUNT],
        forces: ForceMatrix,
    ) -> Result<Self> {
        config.validate()?;
        let rng = Self::rng_for(&config);

        Ok(Self {
            config,
            groups,
            forces,
            state: FieldState::Running,
            rng,
        })
    }

    fn rng_for(config: &FieldConfig) -> StdRng {
        match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn forces(&self) -> &ForceMatrix {
        &self.forces
    }

    pub fn group(&self, group: Group) -> &[Particle] {
        &self.groups[group.index()]
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.groups.iter().flatten()
    }

    pub fn regenerate_forces(&mut self) {
        self.forces = ForceMatrix::random(&mut self.rng);
        log::debug!("Regenerated forces: {:?}", self.forces.rows());
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        if self.state == FieldState::Stopped {
            return;
        }

        match event {
            InputEvent::Quit => {
                log::info!("Quit requested, stopping field");
                self.state = FieldState::Stopped;
            }
            InputEvent::PointerDown {
                button: PointerButton::Primary,
                ..
            } => self.regenerate_forces(),
            InputEvent::PointerDown { .. } => {}
        }
    }

    /// Advances every particle by one frame.
    ///
    /// Each (source, target) group pair is its own pass: a source particle
    /// gathers the force from the target group and is moved and reflected
    /// straight away, so a particle moves up to four times per frame. Within a
    /// group's self-pass later particles see the already moved earlier ones.
    pub fn step(&mut self) {
        if self.state == FieldState::Stopped {
            return;
        }

        let width = self.config.width as f32;
        let height = self.config.height as f32;

        for source in Group::ALL {
            for target in Group::ALL {
                let coefficient = self.forces.get(source, target);
                if coefficient == 0.0 {
                    continue;
                }

                if source == target {
                    let group = &mut self.groups[source.index()];
                    for i in 0..group.len() {
                        let force = net_force(coefficient, group[i].position, group.as_slice());
                        group[i].advance(force, width, height);
                    }
                } else {
                    // Source particles only read the target group here, so they are independent.
                    let (sources, targets) =
                        split_pair(&mut self.groups, source.index(), target.index());
                    sources.par_iter_mut().for_each(|particle| {
                        let force = net_force(coefficient, particle.position, targets);
                        particle.advance(force, width, height);
                    });
                }
            }
        }
    }

    pub fn render<S: Surface>(&self, surface: &mut S) {
        surface.fill(self.config.background);
        for group in Group::ALL {
            let color = group.color();
            for particle in &self.groups[group.index()] {
                surface.draw_filled_rect(
                    color,
                    particle.position.x,
                    particle.position.y,
                    PARTICLE_SIZE,
                    PARTICLE_SIZE,
                );
            }
        }
        surface.present();
    }

    /// One tick of the frame loop: drain input, then step and render unless a quit arrived.
    pub fn frame<I, S>(&mut self, events: I, surface: &mut S) -> FieldState
    where
        I: IntoIterator<Item = InputEvent>,
        S: Surface,
    {
        for event in events {
            self.handle_input(event);
        }

        if self.state == FieldState::Running {
            self.step();
            self.render(surface);
        }

        self.state
    }
}

fn spawn_group(rng: &mut StdRng, group: Group, config: &FieldConfig) -> Vec<Particle> {
    (0..config.population)
        .map(|_| {
            let x = rng.gen_range(1..=config.width - 1);
            let y = rng.gen_range(1..=config.height - 1);
            Particle::at_rest(group, x as f32, y as f32)
        })
        .collect()
}

/// Mutable access to `items[a]` alongside shared access to `items[b]`; `a != b`.
fn split_pair<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (head, tail) = items.split_at_mut(b);
        (&mut head[a], &tail[0])
    } else {
        let (head, tail) = items.split_at_mut(a);
        (&mut tail[0], &head[b])
    }
}
