//! Tick clock and particle spawning

use std::time::{Duration, Instant};

use glam::Vec2;
use rand::Rng;

use crate::config::{MILLISECONDS_PER_FRAME, WALL_SPEED_DIVISOR};

/// Self-rescheduling tick timer.
///
/// The next deadline is set from the moment a tick finishes, so a slow
/// tick pushes the following one back instead of causing a burst of
/// catch-up ticks.
#[derive(Debug, Clone)]
pub struct TickClock {
    period: Duration,
    deadline: Instant,
}

impl TickClock {
    pub fn new(now: Instant) -> Self {
        Self::with_period(Duration::from_millis(MILLISECONDS_PER_FRAME), now)
    }

    pub fn with_period(period: Duration, now: Instant) -> Self {
        Self {
            period,
            deadline: now + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Call once the tick's work is done.
    pub fn reschedule(&mut self, now: Instant) {
        self.deadline = now + self.period;
    }
}

/// Canvas edge a particle spawns on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// `y == height`
    Bottom,
    /// `x == width`
    Right,
    /// `y == 0`
    Top,
    /// `x == 0`
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub edge: Edge,
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Pick a random edge and a random point on it, with a velocity that never
/// points out of the canvas.
///
/// Speeds are whole pixels per tick, bounded by `dimension / 50` on each
/// axis. The axis facing the interior is restricted to its inward sign
/// (zero included); the other axis may go either way.
pub fn wall_hug(width: u32, height: u32, rng: &mut impl Rng) -> Spawn {
    let width = width.max(1) as i32;
    let height = height.max(1) as i32;
    let vx_max = (width / WALL_SPEED_DIVISOR).max(1);
    let vy_max = (height / WALL_SPEED_DIVISOR).max(1);

    let edge = match rng.gen_range(0..4) {
        0 => Edge::Bottom,
        1 => Edge::Right,
        2 => Edge::Top,
        _ => Edge::Left,
    };

    let (px, py, vx, vy) = match edge {
        Edge::Bottom => (
            rng.gen_range(0..width),
            height,
            rng.gen_range(-vx_max..vx_max),
            rng.gen_range(-vy_max..=0),
        ),
        Edge::Right => (
            width,
            rng.gen_range(0..height),
            rng.gen_range(-vx_max..=0),
            rng.gen_range(-vy_max..vy_max),
        ),
        Edge::Top => (
            rng.gen_range(0..width),
            0,
            rng.gen_range(-vx_max..vx_max),
            rng.gen_range(0..vy_max),
        ),
        Edge::Left => (
            0,
            rng.gen_range(0..height),
            rng.gen_range(0..vx_max),
            rng.gen_range(-vy_max..vy_max),
        ),
    };

    Spawn {
        edge,
        position: Vec2::new(px as f32, py as f32),
        velocity: Vec2::new(vx as f32, vy as f32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn tick_is_due_after_one_period() {
        let start = Instant::now();
        let clock = TickClock::new(start);
        assert_eq!(clock.period(), Duration::from_millis(33));
        assert!(!clock.due(start));
        assert!(!clock.due(start + Duration::from_millis(32)));
        assert!(clock.due(start + Duration::from_millis(33)));
    }

    #[test]
    fn slow_tick_delays_the_next_one() {
        let start = Instant::now();
        let mut clock = TickClock::new(start);

        // The tick fired on time but took 100ms to finish.
        let finished = start + Duration::from_millis(133);
        clock.reschedule(finished);
        assert_eq!(clock.deadline(), finished + Duration::from_millis(33));
        assert!(!clock.due(finished));
    }

    #[test]
    fn spawn_velocity_points_inward() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let spawn = wall_hug(1000, 600, &mut rng);
            let v = spawn.velocity;
            assert!(v.x.abs() <= 20.0 && v.y.abs() <= 12.0);
            match spawn.edge {
                Edge::Bottom => assert!(v.y <= 0.0),
                Edge::Right => assert!(v.x <= 0.0),
                Edge::Top => assert!(v.y >= 0.0),
                Edge::Left => assert!(v.x >= 0.0),
            }
        }
    }

    #[test]
    fn every_edge_gets_used() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let index = match wall_hug(1000, 600, &mut rng).edge {
                Edge::Bottom => 0,
                Edge::Right => 1,
                Edge::Top => 2,
                Edge::Left => 3,
            };
            seen[index] = true;
        }
        assert_eq!(seen, [true; 4]);
    }
}
