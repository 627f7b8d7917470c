//! Retained 2D drawing surface
//!
//! Drawing calls return an [`ItemId`] handle and the item stays on the
//! canvas until it is deleted by handle or the canvas is wiped. The
//! renderer turns whatever is on the [`DisplayList`] into triangles each
//! frame, so leaving items in place is what makes trace lines pile up.
//! Lines are capped: past the limit the oldest line makes way for the new
//! one, which keeps a long trace within the vertex buffer.

use std::collections::VecDeque;

use common::Vertex;
use glam::Vec2;

use crate::config::{MAX_BLACK_HOLES, MAX_CANVAS_VERTICES, MAX_PARTICLES};
use crate::vector::{magnitude, scale, subtract, unit};

/// 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Opaque RGBA in `[0, 1]`. With `linear` set the channels are decoded
    /// from sRGB, which is what an sRGB surface format expects.
    pub fn to_rgba(self, linear: bool) -> [f32; 4] {
        let channel = |c: u8| {
            let c = c as f32 / 255.0;
            if !linear {
                c
            } else if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        [channel(self.r), channel(self.g), channel(self.b), 1.0]
    }
}

/// Particle colors, assigned by insertion order.
pub const PALETTE: [Color; 11] = [
    Color::rgb(0, 255, 0),     // green
    Color::rgb(0, 0, 255),     // blue
    Color::rgb(0, 255, 255),   // cyan
    Color::rgb(255, 255, 0),   // yellow
    Color::rgb(188, 143, 143), // rosy brown
    Color::rgb(255, 140, 0),   // dark orange
    Color::rgb(255, 105, 180), // hot pink
    Color::rgb(255, 0, 255),   // magenta
    Color::rgb(148, 0, 211),   // dark violet
    Color::rgb(147, 112, 219), // medium purple
    Color::rgb(238, 213, 183), // bisque2
];

/// Walks the palette once per pass, wrapping at the end.
#[derive(Debug, Clone, Default)]
pub struct ColorCycle {
    index: usize,
}

impl ColorCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_color(&mut self) -> Color {
        let color = PALETTE[self.index];
        self.index = (self.index + 1) % PALETTE.len();
        color
    }
}

/// Handle to something drawn on a [`Canvas`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    /// For [`Canvas`] implementations that keep their own numbering.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Item {
    Circle {
        center: Vec2,
        radius: f32,
        outline: Color,
        fill: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        arrow: bool,
    },
}

/// What the simulation needs from a drawing surface.
pub trait Canvas {
    fn draw_circle(&mut self, center: Vec2, radius: f32, outline: Color, fill: Color) -> ItemId;

    /// Line from `from` to `to`; `arrow` puts an arrowhead at `to`.
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, arrow: bool) -> ItemId;

    /// Remove one item. Unknown or already-deleted handles are ignored.
    fn delete(&mut self, id: ItemId);

    fn delete_all(&mut self);
}

/// Lines the default [`DisplayList`] keeps: whatever the vertex buffer has
/// left once every possible body is drawn.
pub const DEFAULT_LINE_LIMIT: usize =
    (MAX_CANVAS_VERTICES - (MAX_PARTICLES + MAX_BLACK_HOLES) * CIRCLE_VERTICES) / LINE_VERTICES;

/// Items in painter's order: later items draw on top.
#[derive(Debug)]
pub struct DisplayList {
    items: VecDeque<(ItemId, Item)>,
    next_id: u64,
    lines: usize,
    line_limit: usize,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::with_line_limit(DEFAULT_LINE_LIMIT)
    }

    pub fn with_line_limit(line_limit: usize) -> Self {
        Self {
            items: VecDeque::new(),
            next_id: 0,
            lines: 0,
            line_limit,
        }
    }

    pub fn line_limit(&self) -> usize {
        self.line_limit
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().map(|(_, item)| item)
    }

    fn push(&mut self, item: Item) -> ItemId {
        let id = ItemId::new(self.next_id);
        self.next_id += 1;
        if matches!(item, Item::Line { .. }) {
            if self.line_limit == 0 {
                return id;
            }
            while self.lines >= self.line_limit {
                if !self.evict_oldest_line() {
                    break;
                }
            }
            self.lines += 1;
        }
        self.items.push_back((id, item));
        id
    }

    /// Returns whether a line was removed. In trace mode the oldest line
    /// sits at the front, so the scan stops at once.
    fn evict_oldest_line(&mut self) -> bool {
        let oldest = self
            .items
            .iter()
            .position(|(_, item)| matches!(item, Item::Line { .. }));
        match oldest.and_then(|index| self.items.remove(index)) {
            Some(_) => {
                self.lines -= 1;
                true
            }
            None => false,
        }
    }

    /// Triangles for every item, in painter's order.
    pub fn tessellate(&self, linear: bool) -> Vec<Vertex> {
        let mut vertices = Vec::new();
        for item in self.items() {
            tessellate_item(item, linear, &mut vertices);
        }
        vertices
    }
}

impl Canvas for DisplayList {
    fn draw_circle(&mut self, center: Vec2, radius: f32, outline: Color, fill: Color) -> ItemId {
        self.push(Item::Circle {
            center,
            radius,
            outline,
            fill,
        })
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, arrow: bool) -> ItemId {
        self.push(Item::Line {
            from,
            to,
            color,
            arrow,
        })
    }

    fn delete(&mut self, id: ItemId) {
        // Ids are handed out in increasing order, so the list stays sorted.
        if let Ok(index) = self.items.binary_search_by_key(&id, |(item_id, _)| *item_id) {
            if let Some((_, Item::Line { .. })) = self.items.remove(index) {
                self.lines -= 1;
            }
        }
    }

    fn delete_all(&mut self) {
        self.items.clear();
        self.lines = 0;
    }
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new()
    }
}

const CIRCLE_SEGMENTS: usize = 32;
const CIRCLE_VERTICES: usize = CIRCLE_SEGMENTS * 9;
/// Shaft quad plus arrowhead.
const LINE_VERTICES: usize = 9;
const LINE_WIDTH: f32 = 1.0;
const ARROW_LENGTH: f32 = 10.0;
const ARROW_HALF_WIDTH: f32 = 4.0;

fn push_triangle(out: &mut Vec<Vertex>, points: [Vec2; 3], color: [f32; 4]) {
    for p in points {
        out.push(Vertex::new([p.x, p.y], color));
    }
}

fn push_quad(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) {
    push_triangle(out, [a, b, c], color);
    push_triangle(out, [a, c, d], color);
}

fn tessellate_item(item: &Item, linear: bool, out: &mut Vec<Vertex>) {
    match *item {
        Item::Circle {
            center,
            radius,
            outline,
            fill,
        } => {
            let fill = fill.to_rgba(linear);
            let outline = outline.to_rgba(linear);
            let inner = (radius - LINE_WIDTH * 0.5).max(0.0);
            let outer = radius + LINE_WIDTH * 0.5;

            for i in 0..CIRCLE_SEGMENTS {
                let a0 = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
                let a1 = (i + 1) as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
                let d0 = Vec2::new(a0.cos(), a0.sin());
                let d1 = Vec2::new(a1.cos(), a1.sin());

                push_triangle(out, [center, center + d0 * inner, center + d1 * inner], fill);
                push_quad(
                    out,
                    center + d0 * inner,
                    center + d0 * outer,
                    center + d1 * outer,
                    center + d1 * inner,
                    outline,
                );
            }
        }
        Item::Line {
            from,
            to,
            color,
            arrow,
        } => {
            let delta = subtract(to, from);
            let length = magnitude(delta);
            if length == 0.0 {
                return;
            }
            let color = color.to_rgba(linear);
            let direction = unit(delta);
            let normal = Vec2::new(-direction.y, direction.x);

            // The shaft stops where the arrowhead begins.
            let shaft_end = if arrow && length > ARROW_LENGTH {
                to - scale(ARROW_LENGTH, direction)
            } else {
                to
            };
            let half = scale(LINE_WIDTH * 0.5, normal);
            push_quad(out, from + half, from - half, shaft_end - half, shaft_end + half, color);

            if arrow {
                let base = to - scale(ARROW_LENGTH.min(length), direction);
                let wing = scale(ARROW_HALF_WIDTH, normal);
                push_triangle(out, [to, base + wing, base - wing], color);
            }
        }
    }
}
