/*
 * Sprite Module
 *
 * Gradient-style atoms are drawn from pre-rendered sprites: a stack of
 * concentric rings shading from a dark rim to a bright core. Sprites are
 * built once per palette colour and shared between atoms.
 */

use nannou::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub diameter: f32,
    // (radius, colour) from the rim inwards
    pub rings: Vec<(f32, Rgb<u8>)>,
}

impl Sprite {
    pub fn gradient(radius: f32, color: Rgb<u8>, ring_count: usize) -> Self {
        let ring_count = ring_count.max(1);
        let rings = (0..ring_count)
            .map(|ring| {
                let t = ring as f32 / ring_count as f32;
                (radius * (1.0 - t), shade(color, 0.35 + 0.9 * t))
            })
            .collect();

        Self {
            diameter: 2.0 * radius,
            rings,
        }
    }
}

// Scale towards black below 1.0 and towards white above it
fn shade(color: Rgb<u8>, factor: f32) -> Rgb<u8> {
    let channel = |value: u8| -> u8 {
        let value = value as f32;
        let shaded = if factor <= 1.0 {
            value * factor
        } else {
            value + (255.0 - value) * (factor - 1.0)
        };
        shaded.round().clamp(0.0, 255.0) as u8
    };
    rgb(channel(color.red), channel(color.green), channel(color.blue))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rings_shrink_and_brighten_towards_core() {
        let sprite = Sprite::gradient(8.0, rgb(200, 100, 0), 4);
        assert_eq!(sprite.diameter, 16.0);
        assert_eq!(sprite.rings.len(), 4);
        assert_eq!(sprite.rings[0].0, 8.0);

        for pair in sprite.rings.windows(2) {
            assert!(pair[1].0 < pair[0].0);
            assert!(pair[1].1.red >= pair[0].1.red);
        }
    }
}
