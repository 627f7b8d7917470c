//! 2D vector helpers
//!
//! Thin wrappers over `glam::Vec2` so the physics reads like the force
//! formulas. The only non-trivial one is [`unit`], which never divides by
//! zero.

use glam::Vec2;

pub fn add(a: Vec2, b: Vec2) -> Vec2 {
    a + b
}

pub fn subtract(a: Vec2, b: Vec2) -> Vec2 {
    a - b
}

pub fn scale(scalar: f32, v: Vec2) -> Vec2 {
    v * scalar
}

pub fn magnitude(v: Vec2) -> f32 {
    v.length()
}

/// Unit vector in the direction of `v`, or the zero vector when `v` has
/// no length (or is not finite).
pub fn unit(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_of_zero_is_zero() {
        assert_eq!(unit(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn unit_has_length_one() {
        let u = unit(Vec2::new(3.0, -4.0));
        assert!((magnitude(u) - 1.0).abs() < 1e-6);
        assert!((u.x - 0.6).abs() < 1e-6);
        assert!((u.y + 0.8).abs() < 1e-6);
    }

    #[test]
    fn arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, -1.0);
        assert_eq!(add(a, b), Vec2::new(5.0, 1.0));
        assert_eq!(subtract(b, a), Vec2::new(3.0, -3.0));
        assert_eq!(scale(2.0, a), Vec2::new(2.0, 4.0));
        assert_eq!(magnitude(Vec2::new(6.0, 8.0)), 10.0);
    }
}
