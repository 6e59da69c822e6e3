/*
 * Statistics Module
 *
 * This module defines the RenderStats read back after every tick and the
 * StatusLabels shown in the control panel.
 *
 * Includes:
 * - Paint time (milliseconds spent rendering the last frame)
 * - Number of atoms
 * - Collision rate as a whole percentage
 * - Average velocity from the histogram
 */

// Values pulled from the surface, model and histogram after a tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderStats {
    pub render_duration_ms: u64,
    pub particle_count: usize,
    pub collision_rate: f32,
    pub average_velocity: f32,
}

// Text of the four status labels
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusLabels {
    pub paint: String,
    pub count: String,
    pub collide: String,
    pub velocity: String,
}

impl StatusLabels {
    pub fn update(&mut self, stats: &RenderStats) {
        self.paint = format_paint(stats.render_duration_ms);
        self.count = format_count(stats.particle_count);
        self.collide = format_collision(stats.collision_rate);
        self.velocity = format_velocity(stats.average_velocity);
    }
}

// Sub-2 ms frames are below timer resolution and shown as "~1"
pub fn format_paint(render_duration_ms: u64) -> String {
    if render_duration_ms < 2 {
        "Paint: ~1".to_string()
    } else {
        format!("Paint: {}", render_duration_ms)
    }
}

pub fn format_count(particle_count: usize) -> String {
    format!("Atoms: {}", particle_count)
}

pub fn format_collision(collision_rate: f32) -> String {
    format!("Collide: {:.0}%", f64::from(collision_rate) * 100.0)
}

pub fn format_velocity(average_velocity: f32) -> String {
    format!("Velocity: {:.2}", average_velocity)
}
