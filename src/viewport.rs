/*
 * Viewport Module
 *
 * This module defines the Viewport struct that maps surface
 * coordinates (origin top-left, y down) into nannou window coordinates
 * (origin at the window centre, y up).
 */

use nannou::prelude::*;

use crate::model::Bounds;

#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub window_rect: Rect,
}

impl Viewport {
    pub fn new(window_rect: Rect) -> Self {
        Self { window_rect }
    }

    // Convert a point from surface space to window space
    pub fn surface_to_window(&self, point: Vec2) -> Vec2 {
        vec2(
            self.window_rect.left() + point.x,
            self.window_rect.top() - point.y,
        )
    }

    // Surface rectangle as a nannou Rect
    pub fn to_window_rect(&self, bounds: Bounds) -> Rect {
        let center = self.surface_to_window(bounds.center());
        Rect::from_x_y_w_h(center.x, center.y, bounds.width, bounds.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(Rect::from_w_h(700.0, 600.0))
    }

    #[test]
    fn surface_origin_is_top_left_corner() {
        let viewport = viewport();
        assert_eq!(viewport.surface_to_window(vec2(0.0, 0.0)), vec2(-350.0, 300.0));
        assert_eq!(viewport.surface_to_window(vec2(700.0, 600.0)), vec2(350.0, -300.0));
    }

    #[test]
    fn bounds_map_to_centred_rect() {
        let rect = viewport().to_window_rect(Bounds::new(660.0, 0.0, 40.0, 40.0));
        assert_eq!(rect.x(), 330.0);
        assert_eq!(rect.y(), 280.0);
        assert_eq!(rect.w(), 40.0);
        assert_eq!(rect.h(), 40.0);
    }
}
