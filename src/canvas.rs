/*
 * Canvas Module
 *
 * The drawing seam between the render surface and whatever actually puts
 * pixels on screen. Coordinates are surface coordinates: origin at the
 * top-left corner, y growing downwards.
 *
 * RecordingCanvas keeps the draw calls as a list of operations. It backs the
 * headless paths: tests, benchmarks and surfaces without a window.
 */

use nannou::prelude::*;

use crate::model::Bounds;
use crate::sprite::Sprite;

pub trait Canvas {
    // Everything drawn afterwards is clipped to these bounds
    fn set_clip(&mut self, bounds: Bounds);

    fn clear(&mut self, color: Rgb<u8>);

    fn fill_ellipse(&mut self, bounds: Bounds, color: Rgb<u8>);

    // Draw a pre-rendered sprite with its top-left corner at (x, y)
    fn draw_sprite(&mut self, sprite: &Sprite, x: f32, y: f32);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clip(Bounds),
    Clear(Rgb<u8>),
    Ellipse { bounds: Bounds, color: Rgb<u8> },
    Sprite { x: f32, y: f32, diameter: f32 },
}

#[derive(Debug, Default)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn reset(&mut self) {
        self.ops.clear();
    }

    pub fn sprite_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Sprite { .. }))
            .count()
    }

    pub fn ellipse_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Ellipse { .. }))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn set_clip(&mut self, bounds: Bounds) {
        self.ops.push(DrawOp::Clip(bounds));
    }

    fn clear(&mut self, color: Rgb<u8>) {
        self.ops.push(DrawOp::Clear(color));
    }

    fn fill_ellipse(&mut self, bounds: Bounds, color: Rgb<u8>) {
        self.ops.push(DrawOp::Ellipse { bounds, color });
    }

    fn draw_sprite(&mut self, sprite: &Sprite, x: f32, y: f32) {
        self.ops.push(DrawOp::Sprite {
            x,
            y,
            diameter: sprite.diameter,
        });
    }
}
