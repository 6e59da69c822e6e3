/*
 * UI Module
 *
 * This module builds the control panel with nannou_egui: run and reset
 * buttons, population buttons, the rendering style radio pair, the update
 * rate slider and the status labels with a small velocity histogram.
 *
 * The panel never touches the simulation itself. Every user action comes
 * back as a ControlEvent for the controller to dispatch.
 */

use nannou_egui::{egui, Egui};

use crate::controller::{AnimationController, ControlEvent, PopulationDelta};
use crate::histogram::{SpeedHistogram, VelocityHistogram};
use crate::params::SimulationParams;
use crate::rate::UpdateRate;
use crate::surface::RenderStyle;

// Widget state mirrored from the last dispatched events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelState {
    pub style: RenderStyle,
    pub rate_hz: u32,
}

impl PanelState {
    pub fn new(params: &SimulationParams) -> Self {
        Self {
            style: RenderStyle::default(),
            rate_hz: params.update_rate_hz,
        }
    }

    // Keep the widgets in step with events raised outside the panel
    pub fn sync(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::Style(style) => self.style = style,
            ControlEvent::Rate(hz) => self.rate_hz = hz,
            _ => {}
        }
    }

    // Snap the slider value to a whole rate step; reports a change only when
    // the snapped rate differs from the one shown before the drag
    pub fn settle_rate(&mut self, before: u32) -> Option<ControlEvent> {
        self.rate_hz = UpdateRate::snapped(self.rate_hz).hz();
        (self.rate_hz != before).then_some(ControlEvent::Rate(self.rate_hz))
    }
}

// Update the UI and return the events raised this frame
pub fn update_ui(
    egui: &mut Egui,
    panel: &mut PanelState,
    controller: &AnimationController,
    histogram: &SpeedHistogram,
) -> Vec<ControlEvent> {
    let mut events = Vec::new();
    let ctx = egui.begin_frame();

    egui::Window::new("Atoms")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(controller.run_label()).clicked() {
                    events.push(ControlEvent::ToggleRun);
                }
                if ui.button("Reset").clicked() {
                    events.push(ControlEvent::Reset);
                }
            });

            ui.horizontal(|ui| {
                if ui.button("Atoms +").clicked() {
                    events.push(ControlEvent::Population(PopulationDelta::Grow));
                }
                if ui.button("Atoms -").clicked() {
                    events.push(ControlEvent::Population(PopulationDelta::Shrink));
                }
            });

            ui.horizontal(|ui| {
                let before = panel.style;
                ui.radio_value(&mut panel.style, RenderStyle::Color, "Color");
                ui.radio_value(&mut panel.style, RenderStyle::Gradient, "Gradient");
                if panel.style != before {
                    events.push(ControlEvent::Style(panel.style));
                }
            });

            let before = panel.rate_hz;
            ui.add(
                egui::Slider::new(&mut panel.rate_hz, SimulationParams::rate_range())
                    .text("Update (Hz):"),
            );
            events.extend(panel.settle_rate(before));

            ui.separator();

            let labels = controller.labels();
            ui.label(labels.paint.as_str());
            ui.label(labels.count.as_str());
            ui.label(labels.collide.as_str());
            ui.label(labels.velocity.as_str());

            ui.collapsing("Velocity histogram", |ui| {
                let max = histogram.max_bin().max(1) as f32;
                for (index, &count) in histogram.bins().iter().enumerate() {
                    let low = index as f32 * histogram.bin_width();
                    ui.add(
                        egui::ProgressBar::new(count as f32 / max)
                            .text(format!("{:.1}: {}", low, count)),
                    );
                }
                ui.label(format!("Mean: {:.2}", histogram.average()));
            });
        });

    events
}
