/*
 * Render Surface Module
 *
 * The RenderSurface performs one visual frame of the ensemble and measures
 * how long it took. It listens on the command bus for style switches and
 * redraw pulses, and turns its own resize events into new model walls.
 *
 * A redraw pulse either renders straight away on an attached canvas
 * (headless use) or marks a repaint as pending for the host's next paint
 * callback. Host repaints with nothing pending redraw the current positions
 * without advancing the atoms, so a spurious repaint never double-steps the
 * model.
 */

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::{debug, trace};
use nannou::prelude::*;
use rand::Rng;

use crate::canvas::Canvas;
use crate::command::{Command, CommandListener};
use crate::model::{Bounds, SharedModel};
use crate::params::{Grid, SimulationParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    // Flat fill with the atom's own colour
    Color,
    // Pre-rendered sprite per atom
    #[default]
    Gradient,
}

// Offscreen texture of one grid cell per texel, used for the border decoration
struct BorderBuffer {
    texels: Vec<Rgb<u8>>,
}

impl BorderBuffer {
    fn new(grid: Grid) -> Self {
        let mut rng = rand::thread_rng();
        let texels = (0..grid.cols * grid.rows)
            .map(|_| rgb(200, rng.gen::<u8>(), 0))
            .collect();
        Self { texels }
    }
}

pub struct RenderSurface {
    model: SharedModel,
    width: f32,
    height: f32,
    grid: Grid,
    marker_radius: f32,
    style: RenderStyle,
    buffer: Option<BorderBuffer>,
    render_duration: Duration,
    repaint_pending: bool,
    canvas: Option<Rc<RefCell<dyn Canvas>>>,
}

impl RenderSurface {
    pub fn new(model: SharedModel, params: &SimulationParams) -> Self {
        Self {
            model,
            width: params.surface_width,
            height: params.surface_height,
            grid: params.grid,
            marker_radius: params.marker_radius,
            style: RenderStyle::default(),
            buffer: None,
            render_duration: Duration::ZERO,
            repaint_pending: false,
            canvas: None,
        }
    }

    // Render immediately on this canvas whenever a redraw pulse arrives
    pub fn attach_canvas(&mut self, canvas: Rc<RefCell<dyn Canvas>>) {
        self.canvas = Some(canvas);
    }

    pub fn style(&self) -> RenderStyle {
        self.style
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn has_buffer(&self) -> bool {
        self.buffer.is_some()
    }

    // Border texels in row-major grid order, once the first frame created them
    pub fn border_texels(&self) -> Option<&[Rgb<u8>]> {
        self.buffer.as_ref().map(|buffer| buffer.texels.as_slice())
    }

    pub fn repaint_pending(&self) -> bool {
        self.repaint_pending
    }

    // Wall-clock time of the last frame that advanced the model, in whole milliseconds.
    pub fn render_duration_ms(&self) -> u64 {
        self.render_duration.as_millis() as u64
    }

    // Advance every atom one step and draw the frame
    pub fn on_redraw(&mut self, canvas: &mut dyn Canvas) {
        self.repaint_pending = false;
        self.render(canvas, true);
    }

    // Host paint callback
    pub fn paint(&mut self, canvas: &mut dyn Canvas) {
        if self.repaint_pending {
            self.on_redraw(canvas);
        } else {
            self.render(canvas, false);
        }
    }

    pub fn on_resize(&mut self, width: f32, height: f32) {
        debug!("surface resized to {}x{}", width, height);
        self.width = width;
        self.height = height;

        self.model.borrow_mut().set_walls(self.grid.walls(width, height));
    }

    fn render(&mut self, canvas: &mut dyn Canvas, advance: bool) {
        // Initialize buffer and population the first time
        if self.buffer.is_none() {
            self.buffer = Some(BorderBuffer::new(self.grid));
        }
        {
            let mut model = self.model.borrow_mut();
            if model.particles().is_empty() {
                model.initialize_population();
            }
        }

        let start = Instant::now();

        canvas.set_clip(Bounds::new(0.0, 0.0, self.width, self.height));
        canvas.clear(BLACK);
        self.draw_markers(canvas);

        let mut model = self.model.borrow_mut();
        for index in 0..model.particles().len() {
            if advance {
                model.advance(index);
            }
            let bounds = model.shape_of(index).bounds();
            let particle = &model.particles()[index];
            match self.style {
                RenderStyle::Gradient => {
                    canvas.draw_sprite(&particle.sprite, bounds.x.trunc(), bounds.y.trunc())
                }
                RenderStyle::Color => canvas.fill_ellipse(bounds, particle.color),
            }
        }

        if advance {
            self.render_duration = start.elapsed();
            trace!(
                "rendered {} atoms in {:?}",
                model.particles().len(),
                self.render_duration
            );
        }
    }

    // Circles in the top-right and bottom-left corners
    fn draw_markers(&self, canvas: &mut dyn Canvas) {
        let diameter = 2.0 * self.marker_radius;
        let surface = Bounds::new(0.0, 0.0, self.width, self.height);
        let markers = [
            Bounds::new(self.width - diameter, 0.0, diameter, diameter),
            Bounds::new(0.0, self.height - diameter, diameter, diameter),
        ];

        for marker in markers {
            if !marker.intersection(&surface).is_empty() {
                canvas.fill_ellipse(marker, GREEN);
            }
        }
    }
}

impl CommandListener for RenderSurface {
    fn on_command(&mut self, command: Command) {
        match command {
            Command::UseColor => {
                debug!("using color");
                self.style = RenderStyle::Color;
            }
            Command::UseGradient => {
                debug!("using gradient");
                self.style = RenderStyle::Gradient;
            }
            Command::Redraw | Command::None => match self.canvas.clone() {
                Some(canvas) => self.on_redraw(&mut *canvas.borrow_mut()),
                None => self.repaint_pending = true,
            },
            _ => {}
        }
    }
}
