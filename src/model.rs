/*
 * Model Interface Module
 *
 * The render surface and the controller only see the particle model through
 * the ParticleModel trait. Geometry here is in surface coordinates: origin at
 * the top-left corner, y growing downwards.
 */

use std::cell::RefCell;
use std::rc::Rc;

use nannou::prelude::*;

use crate::command::CommandListener;
use crate::particle::Particle;

// Axis-aligned rectangle in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn intersection(&self, other: &Bounds) -> Bounds {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Bounds::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
    }
}

// Screen shape of one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub center: Vec2,
    pub radius: f32,
}

impl Shape {
    pub fn bounds(&self) -> Bounds {
        let diameter = 2.0 * self.radius;
        Bounds::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            diameter,
            diameter,
        )
    }
}

// What the surface and controller need from the physics collaborator.
//
// `particles()` must keep a stable order within one frame; `advance` and
// `shape_of` take indices into that order.
pub trait ParticleModel: CommandListener {
    fn particles(&self) -> &[Particle];

    // Integrate one particle by one step, resolving walls and collisions
    fn advance(&mut self, index: usize);

    fn shape_of(&self, index: usize) -> Shape;

    fn set_walls(&mut self, walls: Bounds);

    // Populate from empty
    fn initialize_population(&mut self);

    // Fraction of particles that collided during the last step, in `[0, 1]`.
    fn collision_rate(&self) -> f32;

    fn particle_count(&self) -> usize {
        self.particles().len()
    }
}

pub type SharedModel = Rc<RefCell<dyn ParticleModel>>;
