/*
 * Particle Module
 *
 * This module defines the Particle struct, one atom of the ensemble.
 * Each atom moves in a straight line until it meets a wall or another atom:
 * 1. Walls reflect the velocity component normal to the wall
 * 2. Atoms of equal mass exchange the velocity component along the line
 *    joining their centres
 */

use std::rc::Rc;

use nannou::prelude::*;

use crate::model::{Bounds, Shape};
use crate::sprite::Sprite;

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Point2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: Rgb<u8>,
    pub sprite: Rc<Sprite>,
}

impl Particle {
    pub fn new(position: Point2, velocity: Vec2, radius: f32, color: Rgb<u8>, sprite: Rc<Sprite>) -> Self {
        Self {
            position,
            velocity,
            radius,
            color,
            sprite,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn shape(&self) -> Shape {
        Shape {
            center: self.position,
            radius: self.radius,
        }
    }

    // Move one step along the current velocity
    pub fn step(&mut self) {
        self.position += self.velocity;
    }

    // Reflect off any wall the atom has crossed and pull it back inside
    pub fn bounce_off_walls(&mut self, walls: &Bounds) {
        if self.position.x - self.radius < walls.x {
            self.position.x = walls.x + self.radius;
            self.velocity.x = self.velocity.x.abs();
        } else if self.position.x + self.radius > walls.right() {
            self.position.x = walls.right() - self.radius;
            self.velocity.x = -self.velocity.x.abs();
        }

        if self.position.y - self.radius < walls.y {
            self.position.y = walls.y + self.radius;
            self.velocity.y = self.velocity.y.abs();
        } else if self.position.y + self.radius > walls.bottom() {
            self.position.y = walls.bottom() - self.radius;
            self.velocity.y = -self.velocity.y.abs();
        }
    }

    pub fn overlaps(&self, other: &Particle) -> bool {
        let reach = self.radius + other.radius;
        self.position.distance_squared(other.position) < reach * reach
    }
}

// Elastic collision between two equal-mass atoms. Returns false when the
// atoms are apart or already separating.
pub fn collide(a: &mut Particle, b: &mut Particle) -> bool {
    if !a.overlaps(b) {
        return false;
    }

    let offset = b.position - a.position;
    let distance = offset.length();
    if distance <= f32::EPSILON {
        return false;
    }

    let normal = offset / distance;
    let approach = (a.velocity - b.velocity).dot(normal);
    if approach <= 0.0 {
        return false;
    }

    a.velocity -= normal * approach;
    b.velocity += normal * approach;
    true
}
