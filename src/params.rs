/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct holding the fixed settings
 * of the atom ensemble: timing, surface framing and population sizes. The
 * update rate is the only value changed at run time, through the rate slider.
 */

use std::time::Duration;

use crate::model::Bounds;
use crate::rate::{DEFAULT_RATE_HZ, MAX_RATE_HZ, MIN_RATE_HZ};

// Framing grid: one cell of margin is kept between the walls and the edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub cols: u32,
    pub rows: u32,
}

impl Grid {
    // Walls for a surface of the given size, inset by one grid cell
    pub fn walls(&self, width: f32, height: f32) -> Bounds {
        let cols = self.cols as f32;
        let rows = self.rows as f32;
        Bounds::new(cols, rows, width - cols, height - rows)
    }
}

pub struct SimulationParams {
    pub update_rate_hz: u32,
    pub initial_delay: Duration,
    pub grid: Grid,
    pub marker_radius: f32,
    pub surface_width: f32,
    pub surface_height: f32,
    // Population
    pub initial_atoms: usize,
    pub population_step: usize,
    pub max_atoms: usize,
    pub atom_radius: f32,
    pub max_initial_speed: f32,
    // Rendering and readouts
    pub sprite_rings: usize,
    pub histogram_bins: usize,
    pub histogram_bin_width: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            update_rate_hz: DEFAULT_RATE_HZ,
            initial_delay: Duration::from_millis(200),
            grid: Grid { cols: 20, rows: 20 },
            marker_radius: 20.0,
            surface_width: 700.0,
            surface_height: 600.0,
            initial_atoms: 50,
            population_step: 10,
            max_atoms: 500,
            atom_radius: 8.0,
            max_initial_speed: 4.0,
            sprite_rings: 6,
            histogram_bins: 12,
            histogram_bin_width: 0.5,
        }
    }
}

impl SimulationParams {
    // Walls for the preferred surface size
    pub fn initial_walls(&self) -> Bounds {
        self.grid.walls(self.surface_width, self.surface_height)
    }

    // Get parameter ranges for UI sliders
    pub fn rate_range() -> std::ops::RangeInclusive<u32> {
        MIN_RATE_HZ..=MAX_RATE_HZ
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walls_keep_one_grid_cell_of_margin() {
        let params = SimulationParams::default();
        assert_eq!(params.grid.walls(720.0, 620.0), Bounds::new(20.0, 20.0, 700.0, 600.0));
        assert_eq!(params.initial_walls(), Bounds::new(20.0, 20.0, 680.0, 580.0));
    }
}
