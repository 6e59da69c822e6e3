/*
 * Atom Ensemble Animation - Module Definitions
 *
 * This file defines the module structure for the atom animation. The control
 * loop (command bus, timer, controller) sits at the bottom; the ensemble and
 * render surface listen on the bus; the nannou modules host it all in a
 * window.
 */

// Re-export key components for easier access
pub use app::Model;
pub use canvas::{Canvas, DrawOp, RecordingCanvas};
pub use command::{Command, CommandBus, CommandListener};
pub use controller::{AnimationController, ControlEvent, PopulationDelta};
pub use ensemble::Ensemble;
pub use histogram::{SpeedHistogram, VelocityHistogram};
pub use model::{Bounds, ParticleModel, Shape};
pub use params::SimulationParams;
pub use rate::{RateError, UpdateRate};
pub use stats::{RenderStats, StatusLabels};
pub use surface::{RenderStyle, RenderSurface};
pub use timer::Timer;

// Define modules
pub mod command;
pub mod timer;
pub mod rate;
pub mod stats;
pub mod params;
pub mod model;
pub mod sprite;
pub mod particle;
pub mod ensemble;
pub mod canvas;
pub mod surface;
pub mod histogram;
pub mod controller;
pub mod viewport;
pub mod renderer;
pub mod ui;
pub mod input;
pub mod app;
