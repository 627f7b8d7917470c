//! Black-hole attraction and forward-Euler integration
//!
//! One call to [`step`] is one tick. There is no delta time: the tick
//! period is the time unit, so a velocity is "pixels per tick".

use glam::Vec2;

use crate::body::Body;
use crate::canvas::{Color, ColorCycle};
use crate::config::MIN_DISTANCE;
use crate::vector::{add, magnitude, scale, subtract, unit};

/// How strongly a black hole pulls on a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForceLaw {
    /// `F = m * M * G`, independent of distance. The toy's default feel.
    #[default]
    DistanceIndependent,
    /// `F = m * M * G / r^2`, with `r` floored at [`MIN_DISTANCE`].
    InverseSquare,
}

impl ForceLaw {
    /// Force magnitude between a particle of `particle_size` and a black
    /// hole whose mass term is `mass_term`, separated by `displacement`.
    pub fn magnitude(self, particle_size: u32, mass_term: f32, displacement: Vec2) -> f32 {
        let base = particle_size as f32 * mass_term;
        match self {
            ForceLaw::DistanceIndependent => base,
            ForceLaw::InverseSquare => {
                let mut distance = magnitude(displacement);
                if distance == 0.0 {
                    distance = MIN_DISTANCE;
                }
                base / (distance * distance)
            }
        }
    }
}

/// The segment a particle travelled during one tick, in its palette color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSegment {
    pub from: Vec2,
    pub to: Vec2,
    pub color: Color,
}

/// Total acceleration on `particle` from every black hole.
pub fn acceleration(particle: &Body, black_holes: &[Body], law: ForceLaw) -> Vec2 {
    black_holes
        .iter()
        .filter_map(|bh| bh.mass_term().map(|mass_term| (bh.position(), mass_term)))
        .fold(Vec2::ZERO, |total, (bh_position, mass_term)| {
            let displacement = subtract(bh_position, particle.position());
            let direction = unit(displacement);
            let force = law.magnitude(particle.size(), mass_term, displacement);
            add(total, scale(force, direction))
        })
}

/// Advance every particle by one tick.
///
/// For each particle in insertion order: sum the acceleration, update the
/// velocity, compute the new position, record the travelled segment, then
/// move. Black holes are read only; they never attract each other.
pub fn step(particles: &mut [Body], black_holes: &[Body], law: ForceLaw) -> Vec<TrailSegment> {
    let mut colors = ColorCycle::new();
    let mut segments = Vec::with_capacity(particles.len());

    for particle in particles.iter_mut() {
        let total = acceleration(particle, black_holes, law);
        particle.accelerate(total);

        let old_position = particle.position();
        let new_position = add(old_position, particle.velocity());

        segments.push(TrailSegment {
            from: old_position,
            to: new_position,
            color: colors.next_color(),
        });

        particle.move_to(new_position);
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PALETTE;

    #[test]
    fn single_black_hole_pulls_along_axis() {
        let mut particles = vec![Body::particle(Vec2::new(0.0, 100.0), Vec2::ZERO)];
        let black_holes = vec![Body::black_hole(Vec2::new(100.0, 100.0))];

        let acc = acceleration(&particles[0], &black_holes, ForceLaw::DistanceIndependent);
        assert_eq!(acc, Vec2::new(1.0, 0.0));

        let segments = step(&mut particles, &black_holes, ForceLaw::DistanceIndependent);
        assert_eq!(particles[0].velocity(), Vec2::new(1.0, 0.0));
        assert_eq!(particles[0].position(), Vec2::new(1.0, 100.0));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].from, Vec2::new(0.0, 100.0));
        assert_eq!(segments[0].to, Vec2::new(1.0, 100.0));
    }

    #[test]
    fn coincident_particle_feels_no_pull() {
        let mut particles = vec![Body::particle(Vec2::new(5.0, 5.0), Vec2::ZERO)];
        let black_holes = vec![Body::black_hole(Vec2::new(5.0, 5.0))];

        for law in [ForceLaw::DistanceIndependent, ForceLaw::InverseSquare] {
            step(&mut particles, &black_holes, law);
            let v = particles[0].velocity();
            assert!(v.is_finite());
            assert_eq!(v, Vec2::ZERO);
        }
    }

    #[test]
    fn opposing_black_holes_cancel() {
        let particle = Body::particle(Vec2::new(50.0, 0.0), Vec2::ZERO);
        let black_holes = vec![
            Body::black_hole(Vec2::new(0.0, 0.0)),
            Body::black_hole(Vec2::new(100.0, 0.0)),
        ];
        let acc = acceleration(&particle, &black_holes, ForceLaw::DistanceIndependent);
        assert!(acc.length() < 1e-6);
    }

    #[test]
    fn inverse_square_attenuates_with_distance() {
        let near = ForceLaw::InverseSquare.magnitude(1, 1.0, Vec2::new(2.0, 0.0));
        let far = ForceLaw::InverseSquare.magnitude(1, 1.0, Vec2::new(4.0, 0.0));
        assert!((near - 0.25).abs() < 1e-6);
        assert!((far - 0.0625).abs() < 1e-6);

        let floored = ForceLaw::InverseSquare.magnitude(1, 1.0, Vec2::ZERO);
        assert!((floored - 1.0 / (MIN_DISTANCE * MIN_DISTANCE)).abs() < 1.0);
    }

    #[test]
    fn grown_black_hole_pulls_harder() {
        let particle = Body::particle(Vec2::ZERO, Vec2::ZERO);
        let mut bh = Body::black_hole(Vec2::new(0.0, 10.0));
        bh.grow();
        bh.grow();
        let acc = acceleration(&particle, &[bh], ForceLaw::DistanceIndependent);
        assert_eq!(acc, Vec2::new(0.0, 3.0));
    }

    #[test]
    fn segment_colors_cycle_through_palette() {
        let mut particles: Vec<Body> = (0..PALETTE.len() + 2)
            .map(|i| Body::particle(Vec2::new(i as f32, 0.0), Vec2::new(0.0, 1.0)))
            .collect();
        let segments = step(&mut particles, &[], ForceLaw::DistanceIndependent);

        assert_eq!(segments[0].color, PALETTE[0]);
        assert_eq!(segments[1].color, PALETTE[1]);
        assert_eq!(segments[PALETTE.len()].color, PALETTE[0]);
        assert_eq!(segments[PALETTE.len() + 1].color, PALETTE[1]);
    }
}
