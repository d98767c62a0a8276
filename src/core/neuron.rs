#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prng::RandomSource;
use crate::surface::Point;

/// Index of a neuron within its network.
pub type NeuronId = usize;

/// Initial velocity components are drawn from `[-MAX_INITIAL_SPEED, MAX_INITIAL_SPEED)`.
pub const MAX_INITIAL_SPEED: f32 = 0.25;
/// Base radius range `[MIN_RADIUS, MAX_RADIUS)`.
pub const MIN_RADIUS: f32 = 1.5;
pub const MAX_RADIUS: f32 = 3.5;
/// Pulse speed range in radians per tick.
pub const MIN_PULSE_SPEED: f32 = 0.03;
pub const MAX_PULSE_SPEED: f32 = 0.05;

/// A single animated node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Neuron {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Base radius. Pulsing scales the drawn radius, never this value.
    pub radius: f32,
    /// Distinct targets, never containing this neuron's own index.
    pub connections: Vec<NeuronId>,
    pub pulse_phase: f32,
    pub pulse_speed: f32,
}

impl Neuron {
    /// Random neuron somewhere in `[0, width] × [0, height]`.
    pub fn random(width: f32, height: f32, rng: &mut impl RandomSource) -> Self {
        Self {
            x: rng.next_f32_01() * width,
            y: rng.next_f32_01() * height,
            vx: rng.gen_range_f32(-MAX_INITIAL_SPEED, MAX_INITIAL_SPEED),
            vy: rng.gen_range_f32(-MAX_INITIAL_SPEED, MAX_INITIAL_SPEED),
            radius: rng.gen_range_f32(MIN_RADIUS, MAX_RADIUS),
            connections: Vec::new(),
            pulse_phase: rng.next_f32_01() * core::f32::consts::TAU,
            pulse_speed: rng.gen_range_f32(MIN_PULSE_SPEED, MAX_PULSE_SPEED),
        }
    }

    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn velocity(&self) -> Point {
        Point::new(self.vx, self.vy)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }

    #[inline]
    pub fn integrate(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
    }

    /// Leaving `[0, extent]` on an axis flips that axis's velocity and clamps
    /// the coordinate back onto the edge.
    pub fn reflect(&mut self, width: f32, height: f32) {
        reflect_axis(&mut self.x, &mut self.vx, width);
        reflect_axis(&mut self.y, &mut self.vy, height);
    }
}

#[inline]
fn reflect_axis(pos: &mut f32, vel: &mut f32, extent: f32) {
    if *pos < 0.0 || *pos > extent {
        *vel = -*vel;
        *pos = pos.clamp(0.0, extent.max(0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::Prng;

    #[test]
    fn random_neuron_respects_ranges() {
        let mut rng = Prng::new(5);
        for _ in 0..500 {
            let n = Neuron::random(200.0, 100.0, &mut rng);
            assert!((0.0..=200.0).contains(&n.x));
            assert!((0.0..=100.0).contains(&n.y));
            assert!(n.vx.abs() <= MAX_INITIAL_SPEED);
            assert!(n.vy.abs() <= MAX_INITIAL_SPEED);
            assert!((MIN_RADIUS..=MAX_RADIUS).contains(&n.radius));
            assert!((MIN_PULSE_SPEED..=MAX_PULSE_SPEED).contains(&n.pulse_speed));
            assert!(n.connections.is_empty());
        }
    }

    #[test]
    fn zero_area_places_neurons_at_origin() {
        let mut rng = Prng::new(5);
        let n = Neuron::random(0.0, 0.0, &mut rng);
        assert_eq!(n.position(), Point::new(0.0, 0.0));
    }

    #[test]
    fn integrate_reflects_and_clamps() {
        let mut n = Neuron {
            x: 99.5,
            y: 0.2,
            vx: 1.0,
            vy: -0.5,
            radius: 2.0,
            connections: Vec::new(),
            pulse_phase: 0.0,
            pulse_speed: 0.04,
        };
        n.integrate();
        n.reflect(100.0, 100.0);
        assert_eq!(n.x, 100.0);
        assert_eq!(n.y, 0.0);
        assert_eq!(n.vx, -1.0);
        assert_eq!(n.vy, 0.5);

        // Inside the bounds nothing flips.
        n.integrate();
        n.reflect(100.0, 100.0);
        assert_eq!(n.x, 99.0);
        assert_eq!(n.vx, -1.0);
    }
}
