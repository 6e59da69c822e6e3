/*
 * Histogram Module
 *
 * Velocity histogram of the ensemble. The controller only needs the average
 * speed and a way to ask for a refresh; the control panel also draws the bins.
 */

use crate::model::SharedModel;
use crate::params::SimulationParams;

pub trait VelocityHistogram {
    // Mean speed as of the last refresh
    fn average(&self) -> f32;

    fn refresh(&mut self);
}

pub struct SpeedHistogram {
    model: SharedModel,
    bins: Vec<usize>,
    bin_width: f32,
    average: f32,
}

impl SpeedHistogram {
    pub fn new(model: SharedModel, params: &SimulationParams) -> Self {
        Self {
            model,
            bins: vec![0; params.histogram_bins.max(1)],
            bin_width: params.histogram_bin_width,
            average: 0.0,
        }
    }

    pub fn bins(&self) -> &[usize] {
        &self.bins
    }

    pub fn bin_width(&self) -> f32 {
        self.bin_width
    }

    pub fn max_bin(&self) -> usize {
        self.bins.iter().copied().max().unwrap_or(0)
    }
}

impl VelocityHistogram for SpeedHistogram {
    fn average(&self) -> f32 {
        self.average
    }

    fn refresh(&mut self) {
        self.bins.iter_mut().for_each(|bin| *bin = 0);

        let model = self.model.borrow();
        let particles = model.particles();
        let last = self.bins.len() - 1;
        let mut total = 0.0;
        for particle in particles {
            let speed = particle.speed();
            total += speed;
            // Everything past the last bin edge piles into the last bin
            let bin = ((speed / self.bin_width) as usize).min(last);
            self.bins[bin] += 1;
        }

        self.average = if particles.is_empty() {
            0.0
        } else {
            total / particles.len() as f32
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ensemble::Ensemble;
    use crate::model::ParticleModel;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn empty_model_has_zero_average() {
        let params = SimulationParams::default();
        let model = Rc::new(RefCell::new(Ensemble::new(&params)));
        let mut histogram = SpeedHistogram::new(model, &params);

        histogram.refresh();
        assert_eq!(histogram.average(), 0.0);
        assert_eq!(histogram.max_bin(), 0);
    }

    #[test]
    fn bins_count_every_atom() {
        let params = SimulationParams::default();
        let model = Rc::new(RefCell::new(Ensemble::new(&params)));
        model.borrow_mut().initialize_population();
        let mut histogram = SpeedHistogram::new(model.clone(), &params);

        histogram.refresh();

        assert_eq!(histogram.bins().len(), 12);
        assert_eq!(histogram.bins().iter().sum::<usize>(), 50);

        let speeds: f32 = model.borrow().particles().iter().map(|p| p.speed()).sum();
        assert!((histogram.average() - speeds / 50.0).abs() < 1e-4);
        // Initial speeds are drawn from [1, 4]
        assert!(histogram.average() >= 1.0 && histogram.average() <= 4.0);
    }
}
