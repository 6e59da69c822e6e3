/*
 * Application Module
 *
 * This module defines the nannou model for the atom animation and wires the
 * pieces together: the ensemble, its render surface, the velocity histogram
 * and the animation controller driving them through the command bus.
 *
 * nannou calls update many times per second; the controller decides from its
 * own timer whether a tick is due, so the animation rate is independent of
 * the window's frame rate.
 */

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use log::info;
use nannou::prelude::*;
use nannou_egui::Egui;

use crate::controller::AnimationController;
use crate::ensemble::Ensemble;
use crate::histogram::SpeedHistogram;
use crate::input::{key_pressed, raw_window_event, resized};
use crate::params::SimulationParams;
use crate::renderer::view;
use crate::surface::RenderSurface;
use crate::ui::{self, PanelState};

// Main model for the application
pub struct Model {
    pub egui: Egui,
    pub histogram: Rc<RefCell<SpeedHistogram>>,
    pub surface: Rc<RefCell<RenderSurface>>,
    pub controller: AnimationController,
    pub panel: PanelState,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let params = SimulationParams::default();

    // Create the main window
    let window_id = app
        .new_window()
        .title("Atom Ensemble")
        .size(params.surface_width as u32, params.surface_height as u32)
        .view(view)
        .resized(resized)
        .key_pressed(key_pressed)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    // Get the window
    let window = app.window(window_id).unwrap();

    // Create the UI
    let egui = Egui::from_window(&window);

    let ensemble = Rc::new(RefCell::new(Ensemble::new(&params)));
    let histogram = Rc::new(RefCell::new(SpeedHistogram::new(ensemble.clone(), &params)));
    let surface = Rc::new(RefCell::new(RenderSurface::new(ensemble.clone(), &params)));

    // Walls follow the actual window, which may differ from the requested size
    let (width, height) = window.inner_size_points();
    surface.borrow_mut().on_resize(width, height);

    let controller = AnimationController::new(
        &params,
        ensemble.clone(),
        surface.clone(),
        histogram.clone(),
        Instant::now(),
    );
    info!(
        "animation started at {} Hz with {} atoms",
        controller.rate().hz(),
        params.initial_atoms
    );

    let panel = PanelState::new(&params);

    Model {
        egui,
        histogram,
        surface,
        controller,
        panel,
    }
}

// Update the model
pub fn update(_app: &App, model: &mut Model, update: Update) {
    model.egui.set_elapsed_time(update.since_start);

    let events = {
        let histogram = model.histogram.borrow();
        ui::update_ui(&mut model.egui, &mut model.panel, &model.controller, &histogram)
    };

    let now = Instant::now();
    for event in events {
        model.controller.dispatch(event, now);
    }

    model.controller.poll(now);
}
