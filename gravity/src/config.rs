//! Compile-time settings for the toy

use crate::canvas::Color;
use crate::physics::ForceLaw;

/// Scales a black hole's size into its mass term.
pub const GRAV_CONSTANT: f32 = 1.0;

/// Black hole radius per unit of size, in pixels.
pub const BH_CONSTANT: f32 = 10.0;

/// Particle radius per unit of size, in pixels.
pub const PARTICLE_CONSTANT: f32 = 2.0;

pub const MAX_BLACK_HOLES: usize = 10;
pub const MAX_PARTICLES: usize = 100;

pub const MILLISECONDS_PER_FRAME: u64 = 33;

pub const CANVAS_WIDTH: u32 = 1000;
pub const CANVAS_HEIGHT: u32 = 600;

/// Height of the control strip below the canvas, in egui points.
pub const CONTROLS_HEIGHT: u32 = 40;

/// Canvas vertex buffer size. Trace lines are capped to fit inside it.
pub const MAX_CANVAS_VERTICES: usize = 600_000;

/// Distance substituted when a particle sits exactly on a black hole.
pub const MIN_DISTANCE: f32 = 0.01;

/// Spawn speed bound is `dimension / WALL_SPEED_DIVISOR` on each axis.
pub const WALL_SPEED_DIVISOR: i32 = 50;

/// Active force law. `InverseSquare` is available but off.
pub const FORCE_LAW: ForceLaw = ForceLaw::DistanceIndependent;

pub const BACKGROUND: Color = Color::rgb(0x00, 0x3d, 0x3d);

/// Window height in physical pixels: the canvas is drawn pixel for pixel,
/// the control strip below it scales with the display.
pub fn window_height(scale_factor: f64) -> u32 {
    CANVAS_HEIGHT + (CONTROLS_HEIGHT as f64 * scale_factor).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_strip_scales_with_the_display() {
        assert_eq!(window_height(1.0), 640);
        assert_eq!(window_height(2.0), 680);
        assert_eq!(window_height(1.25), 650);
        assert_eq!(window_height(1.1), 644);
    }
}
