//! Bodies and display flags

use glam::Vec2;

use crate::body::Body;
use crate::config::{MAX_BLACK_HOLES, MAX_PARTICLES};

/// The world: particles and black holes in insertion order, plus the
/// display toggles. Both sequences are capped; additions past the cap are
/// dropped without complaint.
#[derive(Debug, Clone)]
pub struct Scene {
    particles: Vec<Body>,
    black_holes: Vec<Body>,
    pub show_arrows: bool,
    pub show_trace: bool,
    pub show_trails: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            particles: Vec::with_capacity(MAX_PARTICLES),
            black_holes: Vec::with_capacity(MAX_BLACK_HOLES),
            show_arrows: false,
            show_trace: false,
            show_trails: true,
        }
    }

    pub fn particles(&self) -> &[Body] {
        &self.particles
    }

    pub fn black_holes(&self) -> &[Body] {
        &self.black_holes
    }

    /// Mutable particles next to read-only black holes, for the physics step.
    pub(crate) fn bodies_mut(&mut self) -> (&mut [Body], &[Body]) {
        (&mut self.particles, &self.black_holes)
    }

    /// Returns whether the black hole was added.
    pub fn add_black_hole(&mut self, position: Vec2) -> bool {
        if self.black_holes.len() >= MAX_BLACK_HOLES {
            log::debug!("black hole limit ({MAX_BLACK_HOLES}) reached, ignoring add");
            return false;
        }
        self.black_holes.push(Body::black_hole(position));
        true
    }

    /// Returns whether the particle was added.
    pub fn add_particle(&mut self, position: Vec2, velocity: Vec2) -> bool {
        if self.particles.len() >= MAX_PARTICLES {
            log::debug!("particle limit ({MAX_PARTICLES}) reached, ignoring add");
            return false;
        }
        self.particles.push(Body::particle(position, velocity));
        true
    }

    /// Topmost black hole under `point`. Later black holes are drawn on top.
    pub fn black_hole_at(&mut self, point: Vec2) -> Option<&mut Body> {
        self.black_holes.iter_mut().rev().find(|bh| bh.contains(point))
    }

    /// Index of the topmost black hole under `point`.
    pub fn black_hole_index_at(&self, point: Vec2) -> Option<usize> {
        self.black_holes.iter().rposition(|bh| bh.contains(point))
    }

    pub fn black_hole_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.black_holes.get_mut(index)
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.black_holes.clear();
    }

    pub fn toggle_arrows(&mut self) {
        self.show_arrows = !self.show_arrows;
    }

    pub fn toggle_trace(&mut self) {
        self.show_trace = !self.show_trace;
    }

    pub fn toggle_trails(&mut self) {
        self.show_trails = !self.show_trails;
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
