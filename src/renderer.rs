/*
 * Renderer Module
 *
 * This module draws the render surface into the nannou window. NannouCanvas
 * implements the Canvas seam on top of nannou's Draw, converting surface
 * coordinates through the Viewport.
 *
 * The view callback paints the surface first and the egui control panel on
 * top of it.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::canvas::Canvas;
use crate::model::Bounds;
use crate::sprite::Sprite;
use crate::viewport::Viewport;

pub struct NannouCanvas<'a> {
    base: &'a Draw,
    draw: Draw,
    viewport: Viewport,
}

impl<'a> NannouCanvas<'a> {
    pub fn new(draw: &'a Draw, viewport: Viewport) -> Self {
        Self {
            base: draw,
            draw: draw.clone(),
            viewport,
        }
    }
}

impl Canvas for NannouCanvas<'_> {
    fn set_clip(&mut self, bounds: Bounds) {
        self.draw = self.base.scissor(self.viewport.to_window_rect(bounds));
    }

    fn clear(&mut self, color: Rgb<u8>) {
        self.draw.background().color(color);
    }

    fn fill_ellipse(&mut self, bounds: Bounds, color: Rgb<u8>) {
        let rect = self.viewport.to_window_rect(bounds);
        self.draw.ellipse().xy(rect.xy()).wh(rect.wh()).color(color);
    }

    fn draw_sprite(&mut self, sprite: &Sprite, x: f32, y: f32) {
        let half = sprite.diameter / 2.0;
        let center = self.viewport.surface_to_window(vec2(x + half, y + half));
        for &(radius, color) in &sprite.rings {
            self.draw.ellipse().xy(center).radius(radius).color(color);
        }
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    // Begin drawing
    let draw = app.draw();

    {
        let mut canvas = NannouCanvas::new(&draw, Viewport::new(app.window_rect()));
        model.surface.borrow_mut().paint(&mut canvas);
    }

    // Finish drawing
    draw.to_frame(app, &frame).unwrap();

    // Draw the egui UI
    model.egui.draw_to_frame(&frame).unwrap();
}
