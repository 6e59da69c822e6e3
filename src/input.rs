/*
 * Input Module
 *
 * This module handles window events for the atom animation.
 *
 * Features:
 * - Keyboard shortcuts for every panel control
 * - Surface resize, which moves the walls and lets the timer catch its breath
 * - Forwarding raw events to egui
 */

use std::time::Instant;

use nannou::prelude::*;

use crate::app::Model;
use crate::controller::{ControlEvent, PopulationDelta};
use crate::surface::RenderStyle;

// Keyboard shortcut table
pub fn event_for_key(key: Key) -> Option<ControlEvent> {
    match key {
        Key::Return | Key::Space => Some(ControlEvent::ToggleRun),
        Key::R => Some(ControlEvent::Reset),
        Key::Equals | Key::Plus | Key::NumpadAdd => {
            Some(ControlEvent::Population(PopulationDelta::Grow))
        }
        Key::Minus | Key::NumpadSubtract => Some(ControlEvent::Population(PopulationDelta::Shrink)),
        Key::C => Some(ControlEvent::Style(RenderStyle::Color)),
        Key::G => Some(ControlEvent::Style(RenderStyle::Gradient)),
        _ => None,
    }
}

// Key pressed event handler
pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    // Typing into an egui widget is not a shortcut
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }

    if let Some(event) = event_for_key(key) {
        model.panel.sync(event);
        model.controller.dispatch(event, Instant::now());
    }
}

// Window resized event handler
pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.surface.borrow_mut().on_resize(size.x, size.y);
    model.controller.on_resize(Instant::now());
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
