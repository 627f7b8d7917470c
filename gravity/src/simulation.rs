//! The per-tick update/draw cycle and the user actions that feed it

use glam::Vec2;
use rand::Rng;

use crate::body::Body;
use crate::canvas::{Canvas, Color, ColorCycle, ItemId};
use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH, FORCE_LAW};
use crate::driver::wall_hug;
use crate::physics::{self, ForceLaw};
use crate::scene::Scene;

/// Owns the scene and remembers which canvas items belong to the current
/// frame, so trace mode can delete bodies while leaving lines behind.
pub struct Simulation {
    pub scene: Scene,
    pub force_law: ForceLaw,
    body_items: Vec<ItemId>,
    arrow_items: Vec<ItemId>,
    /// Index of the black hole being carried by the pointer.
    held: Option<usize>,
}

impl Simulation {
    pub fn new() -> Self {
        Self::with_force_law(FORCE_LAW)
    }

    pub fn with_force_law(force_law: ForceLaw) -> Self {
        Self {
            scene: Scene::new(),
            force_law,
            body_items: Vec::new(),
            arrow_items: Vec::new(),
            held: None,
        }
    }

    /// One tick: wipe the last frame, step physics, draw trails, arrows and
    /// bodies.
    pub fn tick(&mut self, canvas: &mut impl Canvas) {
        if self.scene.show_trace {
            for id in self.body_items.drain(..) {
                canvas.delete(id);
            }
        } else {
            canvas.delete_all();
            self.body_items.clear();
            self.arrow_items.clear();
        }

        let draw_trails = self.scene.show_trails || self.scene.show_trace;
        let (particles, black_holes) = self.scene.bodies_mut();
        let segments = physics::step(particles, black_holes, self.force_law);
        if draw_trails {
            for segment in segments {
                canvas.draw_line(segment.from, segment.to, segment.color, false);
            }
        }

        if self.scene.show_arrows {
            self.redraw_arrows(canvas);
        }

        self.draw_bodies(canvas);
    }

    fn redraw_arrows(&mut self, canvas: &mut impl Canvas) {
        for id in self.arrow_items.drain(..) {
            canvas.delete(id);
        }
        for particle in self.scene.particles() {
            for bh in self.scene.black_holes() {
                let id = canvas.draw_line(particle.position(), bh.position(), Color::RED, true);
                self.arrow_items.push(id);
            }
        }
    }

    fn draw_bodies(&mut self, canvas: &mut impl Canvas) {
        for bh in self.scene.black_holes() {
            let id = canvas.draw_circle(bh.position(), bh.radius(), Color::WHITE, Color::BLACK);
            self.body_items.push(id);
        }

        let mut colors = ColorCycle::new();
        for particle in self.scene.particles() {
            let id = canvas.draw_circle(
                particle.position(),
                particle.radius(),
                Color::BLACK,
                colors.next_color(),
            );
            self.body_items.push(id);
        }
    }

    /// Left click on the canvas: grow the black hole under the pointer, or
    /// place a new one.
    pub fn click(&mut self, position: Vec2) {
        if let Some(bh) = self.scene.black_hole_at(position) {
            bh.grow();
            log::debug!("black hole at {:?} grew to size {}", bh.position(), bh.size());
        } else if self.scene.add_black_hole(position) {
            log::debug!("black hole added at {position:?}");
        }
    }

    /// Right click on the canvas: drop the carried black hole, or pick up
    /// the topmost one under the pointer. At most one is carried at a time.
    pub fn grab(&mut self, position: Vec2) {
        if let Some(index) = self.held.take() {
            if let Some(bh) = self.scene.black_hole_mut(index) {
                bh.toggle_movable();
                log::debug!("black hole dropped at {:?}", bh.position());
            }
            return;
        }

        let Some(index) = self.scene.black_hole_index_at(position) else {
            return;
        };
        if let Some(bh) = self.scene.black_hole_mut(index) {
            bh.toggle_movable();
            self.held = Some(index);
            log::debug!("black hole picked up at {:?}", bh.position());
        }
    }

    /// Pointer motion: the carried black hole follows it.
    pub fn drag(&mut self, position: Vec2) {
        if let Some(bh) = self.held.and_then(|index| self.scene.black_hole_mut(index)) {
            bh.move_to(position);
        }
    }

    pub fn held(&self) -> Option<&Body> {
        self.held.and_then(|index| self.scene.black_holes().get(index))
    }

    /// Spawn a particle on a random canvas edge heading inward.
    pub fn add_particle(&mut self, rng: &mut impl Rng) {
        let spawn = wall_hug(CANVAS_WIDTH, CANVAS_HEIGHT, rng);
        if self.scene.add_particle(spawn.position, spawn.velocity) {
            log::debug!("particle added at {:?} moving {:?}", spawn.position, spawn.velocity);
        }
    }

    /// Remove every body and wipe the canvas.
    pub fn clear(&mut self, canvas: &mut impl Canvas) {
        self.scene.clear();
        canvas.delete_all();
        self.body_items.clear();
        self.arrow_items.clear();
        self.held = None;
    }

    pub fn toggle_arrows(&mut self, canvas: &mut impl Canvas) {
        self.scene.toggle_arrows();
        for id in self.arrow_items.drain(..) {
            canvas.delete(id);
        }
        log::debug!("arrows: {}", self.scene.show_arrows);
    }

    pub fn toggle_trace(&mut self) {
        self.scene.toggle_trace();
        log::debug!("trace: {}", self.scene.show_trace);
    }

    pub fn toggle_trails(&mut self) {
        self.scene.toggle_trails();
        log::debug!("trails: {}", self.scene.show_trails);
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;
use crate::canvas::{DisplayList, Item};

    fn count_lines(canvas: &DisplayList) -> usize {
        canvas
            .items()
            .filter(|item| matches!(item, Item::Line { arrow: false, .. }))
            .count()
    }

    #[test]
    fn frame_without_trace_only_holds_the_latest_tick() {
        let mut sim = Simulation::new();
        let mut canvas = DisplayList::new();
        sim.scene.add_black_hole(Vec2::new(500.0, 300.0));
        sim.scene.add_particle(Vec2::new(0.0, 300.0), Vec2::ZERO);

        for _ in 0..5 {
            sim.tick(&mut canvas);
        }
        // One trail segment plus two circles.
        assert_eq!(canvas.len(), 3);
        assert_eq!(count_lines(&canvas), 1);
    }

    #[test]
    fn trace_accumulates_lines_but_not_bodies() {
        let mut sim = Simulation::new();
        let mut canvas = DisplayList::new();
        sim.scene.add_black_hole(Vec2::new(500.0, 300.0));
        sim.scene.add_particle(Vec2::new(0.0, 300.0), Vec2::ZERO);
        sim.toggle_trace();

        for _ in 0..5 {
            sim.tick(&mut canvas);
        }
        assert_eq!(count_lines(&canvas), 5);
        let circles = canvas
            .items()
            .filter(|item| matches!(item, Item::Circle { .. }))
            .count();
        assert_eq!(circles, 2);
    }

    #[test]
    fn long_trace_run_stays_bounded() {
        let mut sim = Simulation::new();
        let mut canvas = DisplayList::with_line_limit(250);
        sim.scene.add_black_hole(Vec2::new(500.0, 300.0));
        for i in 0..10 {
            sim.scene.add_particle(Vec2::new(i as f32 * 90.0, 0.0), Vec2::new(1.0, 2.0));
        }
        sim.toggle_trace();

        for tick in 0..2000 {
            sim.tick(&mut canvas);
            assert!(canvas.len() <= 250 + 11, "tick {tick}: {} items", canvas.len());
        }
        assert_eq!(count_lines(&canvas), 250);
        assert_eq!(canvas.len(), 261);
    }

    #[test]
    fn no_trails_when_both_flags_are_off() {
        let mut sim = Simulation::new();
        let mut canvas = DisplayList::new();
        sim.scene.add_particle(Vec2::new(10.0, 10.0), Vec2::new(1.0, 1.0));
        sim.toggle_trails();
        sim.tick(&mut canvas);
        assert_eq!(count_lines(&canvas), 0);
        assert_eq!(sim.scene.particles()[0].position(), Vec2::new(11.0, 11.0));
    }

    #[test]
    fn arrows_point_from_each_particle_to_each_black_hole() {
        let mut sim = Simulation::new();
        let mut canvas = DisplayList::new();
        sim.scene.add_black_hole(Vec2::new(500.0, 300.0));
        sim.scene.add_black_hole(Vec2::new(200.0, 100.0));
        sim.scene.add_particle(Vec2::new(0.0, 0.0), Vec2::ZERO);
        sim.toggle_arrows(&mut canvas);
        sim.toggle_trace();

        sim.tick(&mut canvas);
        sim.tick(&mut canvas);

        let arrows: Vec<Item> = canvas
            .items()
            .filter(|item| matches!(item, Item::Line { arrow: true, .. }))
            .copied()
            .collect();
        assert_eq!(arrows.len(), 2);
        let particle = sim.scene.particles()[0].position();
        for (arrow, bh) in arrows.iter().zip(sim.scene.black_holes()) {
            match arrow {
                Item::Line { from, to, color, .. } => {
                    assert_eq!(*from, particle);
                    assert_eq!(*to, bh.position());
                    assert_eq!(*color, Color::RED);
                }
                Item::Circle { .. } => unreachable!(),
            }
        }

        sim.toggle_arrows(&mut canvas);
        assert!(!canvas
            .items()
            .any(|item| matches!(item, Item::Line { arrow: true, .. })));
    }

    #[test]
    fn click_grows_existing_black_hole() {
        let mut sim = Simulation::new();
        sim.click(Vec2::new(100.0, 100.0));
        sim.click(Vec2::new(104.0, 98.0));
        assert_eq!(sim.scene.black_holes().len(), 1);
        assert_eq!(sim.scene.black_holes()[0].size(), 2);
        assert_eq!(sim.scene.black_holes()[0].mass_term(), Some(2.0));

        sim.click(Vec2::new(400.0, 100.0));
        assert_eq!(sim.scene.black_holes().len(), 2);
    }

    #[test]
    fn grabbed_black_hole_follows_pointer_until_dropped() {
        let mut sim = Simulation::new();
        sim.click(Vec2::new(100.0, 100.0));
        sim.grab(Vec2::new(100.0, 100.0));
        sim.drag(Vec2::new(200.0, 150.0));
        assert_eq!(sim.scene.black_holes()[0].position(), Vec2::new(200.0, 150.0));

        sim.grab(Vec2::new(200.0, 150.0));
        sim.drag(Vec2::new(300.0, 300.0));
        assert_eq!(sim.scene.black_holes()[0].position(), Vec2::new(200.0, 150.0));
    }

    #[test]
    fn carried_black_hole_drops_on_top_of_another() {
        let a = Vec2::new(100.0, 100.0);
        let b = Vec2::new(300.0, 300.0);
        let mut sim = Simulation::new();
        sim.click(a);
        sim.click(b);

        sim.grab(a);
        sim.drag(b);
        sim.grab(b);
        sim.drag(Vec2::new(700.0, 500.0));

        let holes = sim.scene.black_holes();
        assert!(sim.held().is_none());
        assert_eq!(holes[0].position(), b);
        assert!(!holes[0].is_movable());
        assert_eq!(holes[1].position(), b);
        assert!(!holes[1].is_movable());

        // The next pick-up takes the one drawn on top, and only that one moves.
        sim.grab(b);
        sim.drag(Vec2::new(700.0, 500.0));
        let holes = sim.scene.black_holes();
        assert_eq!(holes[0].position(), b);
        assert_eq!(holes[1].position(), Vec2::new(700.0, 500.0));
    }

    #[test]
    fn right_click_anywhere_drops_the_carried_black_hole() {
        let mut sim = Simulation::new();
        sim.click(Vec2::new(100.0, 100.0));
        sim.grab(Vec2::new(100.0, 100.0));
        assert_eq!(sim.held().map(|bh| bh.position()), Some(Vec2::new(100.0, 100.0)));

        sim.grab(Vec2::new(900.0, 50.0));
        assert!(sim.held().is_none());
        assert!(!sim.scene.black_holes()[0].is_movable());

        sim.grab(Vec2::new(900.0, 50.0));
        assert!(sim.held().is_none());
    }

    #[test]
    fn clear_forgets_the_carried_black_hole() {
        let mut sim = Simulation::new();
        let mut canvas = DisplayList::new();
        sim.click(Vec2::new(100.0, 100.0));
        sim.grab(Vec2::new(100.0, 100.0));
        sim.clear(&mut canvas);
        assert!(sim.held().is_none());

        sim.click(Vec2::new(400.0, 400.0));
        sim.drag(Vec2::new(10.0, 10.0));
        assert_eq!(sim.scene.black_holes()[0].position(), Vec2::new(400.0, 400.0));
    }

    #[test]
    fn bodies_are_drawn_with_their_styles() {
        let mut sim = Simulation::new();
        let mut canvas = DisplayList::new();
        sim.scene.add_black_hole(Vec2::new(500.0, 300.0));
        sim.scene.add_particle(Vec2::new(10.0, 10.0), Vec2::ZERO);
        sim.toggle_trails();
        sim.tick(&mut canvas);

        let items: Vec<Item> = canvas.items().copied().collect();
        assert!(matches!(
            items[0],
            Item::Circle { radius, outline: Color::WHITE, fill: Color::BLACK, .. } if radius == 10.0
        ));
        assert!(matches!(
            items[1],
            Item::Circle { radius, outline: Color::BLACK, .. } if radius == 2.0
        ));
    }
}
