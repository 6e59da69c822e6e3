/*
 * Ensemble Module
 *
 * The concrete physics collaborator behind the ParticleModel trait: a box of
 * atoms bouncing off the walls and off each other.
 *
 * Each frame the render surface advances the atoms one by one, in index
 * order. Advancing atom 0 opens a new step, so the collision flags always
 * describe the last complete pass over the ensemble.
 */

use std::f32::consts::TAU;
use std::rc::Rc;

use log::debug;
use nannou::prelude::*;
use rand::Rng;

use crate::command::{Command, CommandListener};
use crate::model::{Bounds, ParticleModel, Shape};
use crate::params::SimulationParams;
use crate::particle::{collide, Particle};
use crate::sprite::Sprite;

const PALETTE: [(u8, u8, u8); 6] = [
    (230, 60, 60),
    (60, 200, 90),
    (70, 120, 240),
    (240, 200, 50),
    (60, 210, 220),
    (210, 80, 220),
];

pub struct Ensemble {
    particles: Vec<Particle>,
    collided: Vec<bool>,
    walls: Bounds,
    palette: Vec<(Rgb<u8>, Rc<Sprite>)>,
    initial_atoms: usize,
    population_step: usize,
    max_atoms: usize,
    atom_radius: f32,
    max_initial_speed: f32,
}

impl Ensemble {
    pub fn new(params: &SimulationParams) -> Self {
        let palette = PALETTE
            .iter()
            .map(|&(r, g, b)| {
                let color = rgb(r, g, b);
                let sprite = Rc::new(Sprite::gradient(params.atom_radius, color, params.sprite_rings));
                (color, sprite)
            })
            .collect();

        Self {
            particles: Vec::new(),
            collided: Vec::new(),
            walls: params.initial_walls(),
            palette,
            initial_atoms: params.initial_atoms,
            population_step: params.population_step,
            max_atoms: params.max_atoms,
            atom_radius: params.atom_radius,
            max_initial_speed: params.max_initial_speed,
        }
    }

    pub fn walls(&self) -> Bounds {
        self.walls
    }

    // Add atoms, never past the configured maximum
    pub fn grow(&mut self, count: usize) {
        let target = (self.particles.len() + count).min(self.max_atoms);
        let mut rng = rand::thread_rng();
        while self.particles.len() < target {
            let particle = self.spawn(&mut rng);
            self.particles.push(particle);
        }
        self.collided.resize(self.particles.len(), false);
    }

    // Remove atoms, always keeping at least one so the surface does not
    // mistake a shrunk ensemble for an uninitialised one
    pub fn shrink(&mut self, count: usize) {
        let len = self.particles.len();
        let keep = len.saturating_sub(count).max(1).min(len);
        self.particles.truncate(keep);
        self.collided.truncate(keep);
    }

    fn spawn(&self, rng: &mut impl Rng) -> Particle {
        let r = self.atom_radius;
        let x = sample(rng, self.walls.x + r, self.walls.right() - r);
        let y = sample(rng, self.walls.y + r, self.walls.bottom() - r);

        let angle = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(0.25 * self.max_initial_speed..=self.max_initial_speed);
        let velocity = vec2(angle.cos(), angle.sin()) * speed;

        let (color, sprite) = &self.palette[rng.gen_range(0..self.palette.len())];
        Particle::new(pt2(x, y), velocity, r, *color, sprite.clone())
    }
}

// Uniform sample in [low, high), or the midpoint when the range is empty
fn sample(rng: &mut impl Rng, low: f32, high: f32) -> f32 {
    if low < high {
        rng.gen_range(low..high)
    } else {
        (low + high) / 2.0
    }
}

fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    if i < j {
        let (head, tail) = particles.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = particles.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

impl ParticleModel for Ensemble {
    fn particles(&self) -> &[Particle] {
        &self.particles
    }

    fn advance(&mut self, index: usize) {
        if index == 0 {
            self.collided.iter_mut().for_each(|flag| *flag = false);
        }

        let walls = self.walls;
        let particle = &mut self.particles[index];
        particle.step();
        particle.bounce_off_walls(&walls);

        for other in 0..self.particles.len() {
            if other == index {
                continue;
            }
            let (a, b) = pair_mut(&mut self.particles, index, other);
            if collide(a, b) {
                self.collided[index] = true;
                self.collided[other] = true;
            }
        }
    }

    fn shape_of(&self, index: usize) -> Shape {
        self.particles[index].shape()
    }

    fn set_walls(&mut self, walls: Bounds) {
        debug!(
            "walls set to ({}, {}, {}, {})",
            walls.x, walls.y, walls.width, walls.height
        );
        self.walls = walls;
    }

    fn initialize_population(&mut self) {
        debug!("initializing {} atoms", self.initial_atoms);
        self.particles.clear();
        self.collided.clear();
        self.grow(self.initial_atoms);
    }

    fn collision_rate(&self) -> f32 {
        if self.particles.is_empty() {
            return 0.0;
        }
        let collided = self.collided.iter().filter(|&&flag| flag).count();
        collided as f32 / self.particles.len() as f32
    }
}

impl CommandListener for Ensemble {
    fn on_command(&mut self, command: Command) {
        match command {
            Command::GrowPopulation => {
                self.grow(self.population_step);
                debug!("population grown to {}", self.particles.len());
            }
            Command::ShrinkPopulation => {
                self.shrink(self.population_step);
                debug!("population shrunk to {}", self.particles.len());
            }
            // Reset only restarts the timer phase; the population is kept
            _ => {}
        }
    }
}
