//! Particles and black holes

use glam::Vec2;

use crate::config::{BH_CONSTANT, GRAV_CONSTANT, PARTICLE_CONSTANT};

/// State shared by every body.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Motion {
    position: Vec2,
    velocity: Vec2,
    size: u32,
    movable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    Particle,
    BlackHole { mass_term: f32 },
}

/// A particle or a black hole.
///
/// Fields are private so the invariants hold: size is at least 1, a
/// particle is always movable, a black hole never gains velocity, and a
/// black hole's mass term always equals `size * GRAV_CONSTANT`.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    motion: Motion,
    kind: Kind,
}

impl Body {
    pub fn particle(position: Vec2, velocity: Vec2) -> Self {
        Self {
            motion: Motion {
                position,
                velocity,
                size: 1,
                movable: true,
            },
            kind: Kind::Particle,
        }
    }

    pub fn black_hole(position: Vec2) -> Self {
        let size = 1;
        Self {
            motion: Motion {
                position,
                velocity: Vec2::ZERO,
                size,
                movable: false,
            },
            kind: Kind::BlackHole {
                mass_term: size as f32 * GRAV_CONSTANT,
            },
        }
    }

    pub fn position(&self) -> Vec2 {
        self.motion.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.motion.velocity
    }

    pub fn size(&self) -> u32 {
        self.motion.size
    }

    pub fn is_movable(&self) -> bool {
        self.motion.movable
    }

    pub fn is_black_hole(&self) -> bool {
        matches!(self.kind, Kind::BlackHole { .. })
    }

    /// `size * GRAV_CONSTANT` for black holes, `None` for particles.
    pub fn mass_term(&self) -> Option<f32> {
        match self.kind {
            Kind::BlackHole { mass_term } => Some(mass_term),
            Kind::Particle => None,
        }
    }

    /// Drawn radius in pixels.
    pub fn radius(&self) -> f32 {
        let per_size = match self.kind {
            Kind::Particle => PARTICLE_CONSTANT,
            Kind::BlackHole { .. } => BH_CONSTANT,
        };
        self.motion.size as f32 * per_size
    }

    /// Whether `point` falls inside the drawn circle.
    pub fn contains(&self, point: Vec2) -> bool {
        self.position().distance(point) <= self.radius()
    }

    /// Add `acceleration` to the velocity. Black holes keep a zero velocity.
    pub(crate) fn accelerate(&mut self, acceleration: Vec2) {
        if let Kind::Particle = self.kind {
            self.motion.velocity += acceleration;
        }
    }

    /// Move to `position` if the body is movable, otherwise do nothing.
    pub fn move_to(&mut self, position: Vec2) {
        if self.motion.movable {
            self.motion.position = position;
        }
    }

    /// Grow a black hole by one size unit. No effect on particles.
    pub fn grow(&mut self) {
        if let Kind::BlackHole { mass_term } = &mut self.kind {
            self.motion.size += 1;
            *mass_term = self.motion.size as f32 * GRAV_CONSTANT;
        }
    }

    /// Flip a black hole's movable flag. Particles stay movable.
    pub fn toggle_movable(&mut self) {
        if self.is_black_hole() {
            self.motion.movable = !self.motion.movable;
        }
    }
}
