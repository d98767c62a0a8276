//! The particle network: neuron state, per-frame update and drawing.
//!
//! One [`NeuralNetwork`] owns every neuron for the life of a mount. A tick
//! rewires a few connections, draws edges, then draws and moves each neuron.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{Background, ConfigError, NetworkConfig};
use crate::neuron::{Neuron, NeuronId};
use crate::prng::{Prng, RandomSource};
use crate::surface::{Point, Surface};

/// Connections longer than this are kept but not drawn.
pub const CONNECTION_CUTOFF: f32 = 150.0;
/// Per-neuron, per-tick chance of rebuilding the connection set.
pub const REWIRE_PROBABILITY: f32 = 0.005;

pub const BASE_LINE_ALPHA: f32 = 0.2;
pub const BASE_LINE_WIDTH: f32 = 0.5;
pub const BASE_NEURON_ALPHA: f32 = 0.6;

const POINTER_ALPHA_BOOST: f32 = 0.5;
const POINTER_LINE_WIDTH_BOOST: f32 = 1.5;
const POINTER_RADIUS_BOOST: f32 = 3.0;
/// Impulse magnitude at zero distance from the pointer.
pub const REPULSION_STRENGTH: f32 = 0.2;

/// Halo radius relative to the drawn neuron radius.
pub const GLOW_SCALE: f32 = 3.0;
pub const GLOW_ALPHA: f32 = 0.15;
/// Inner gradient stop: the stroke color at `0x40 / 0xFF`.
pub const GLOW_INNER_ALPHA: f32 = 64.0 / 255.0;

/// Full width of the per-tick velocity perturbation.
pub const JITTER: f32 = 0.05;
pub const DAMPING: f32 = 0.98;

/// Resolved appearance of one edge for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub alpha: f32,
    pub width: f32,
}

/// Resolved appearance of one neuron for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeuronStyle {
    pub alpha: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostics {
    pub ticks: u64,
    pub neuron_count: usize,
    /// Sum of all connection set sizes.
    pub connection_count: usize,
    /// Edges actually stroked during the last tick (within the cutoff).
    pub drawn_connections: usize,
    /// Connection sets rebuilt during the last tick.
    pub rewired_last_tick: usize,
    pub mean_speed: f32,
    pub pointer_tracked: bool,
}

#[derive(Debug, Clone)]
pub struct NeuralNetwork<R: RandomSource = Prng> {
    cfg: NetworkConfig,
    neurons: Vec<Neuron>,
    rng: R,
    pointer: Option<Point>,
    ticks: u64,
    drawn_connections: usize,
    rewired_last_tick: usize,
}

impl NeuralNetwork<Prng> {
    /// Build a network seeded from `cfg.seed` (or the clock when unset).
    pub fn new(cfg: NetworkConfig) -> Result<Self, ConfigError> {
        let rng = match cfg.seed {
            Some(seed) => Prng::new(seed),
            None => Prng::from_entropy(),
        };
        Self::with_rng(cfg, rng)
    }
}

impl<R: RandomSource> NeuralNetwork<R> {
    /// Build a network drawing all randomness from `rng`.
    pub fn with_rng(cfg: NetworkConfig, rng: R) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let mut net = Self {
            cfg,
            neurons: Vec::new(),
            rng,
            pointer: None,
            ticks: 0,
            drawn_connections: 0,
            rewired_last_tick: 0,
        };
        net.populate();
        Ok(net)
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.cfg
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Throw away every neuron and rebuild at a new size.
    ///
    /// The pointer is forgotten too: its coordinates belong to the old surface.
    pub fn reinitialize(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        let cfg = self.cfg.with_size(width, height);
        cfg.validate()?;
        self.cfg = cfg;
        self.pointer = None;
        self.ticks = 0;
        self.drawn_connections = 0;
        self.rewired_last_tick = 0;
        self.populate();
        Ok(())
    }

    /// Record the pointer position relative to the surface origin.
    /// Ignored when the network is not interactive.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if self.cfg.interactive && x.is_finite() && y.is_finite() {
            self.pointer = Some(Point::new(x, y));
        }
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    fn populate(&mut self) {
        let (w, h) = (self.cfg.width, self.cfg.height);
        let rng = &mut self.rng;
        self.neurons = (0..self.cfg.neuron_count)
            .map(|_| Neuron::random(w, h, rng))
            .collect();
        self.seed_connections();
    }

    /// Target count for a fresh connection set: uniform in
    /// `[1, max_connections]`, capped by how many other neurons exist.
    fn draw_connection_count(&mut self) -> usize {
        let available = self.neurons.len().saturating_sub(1);
        let count = 1 + self.rng.gen_range_usize(0, self.cfg.max_connections);
        count.min(available)
    }

    /// Initial wiring: uniformly random distinct targets, ignoring distance.
    fn seed_connections(&mut self) {
        let n = self.neurons.len();
        let mut candidates: Vec<NeuronId> = Vec::with_capacity(n);
        for i in 0..n {
            let count = self.draw_connection_count();
            candidates.clear();
            candidates.extend((0..n).filter(|&j| j != i));
            // Partial Fisher-Yates: the first `count` slots become the sample.
            for k in 0..count {
                let pick = self.rng.gen_range_usize(k, candidates.len());
                candidates.swap(k, pick);
            }
            self.neurons[i].connections = candidates[..count].to_vec();
        }
    }

    /// Give each neuron a `REWIRE_PROBABILITY` chance to replace its
    /// connections with its nearest neighbors. Returns how many were rebuilt.
    pub fn refresh_connections(&mut self) -> usize {
        let n = self.neurons.len();
        let mut ranked: Vec<(NeuronId, f32)> = Vec::with_capacity(n);
        let mut rewired = 0;
        for i in 0..n {
            if !self.rng.gen_bool(REWIRE_PROBABILITY) {
                continue;
            }
            let count = self.draw_connection_count();
            let origin = self.neurons[i].position();
            ranked.clear();
            ranked.extend(
                self.neurons
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(j, other)| (j, origin.distance(other.position()))),
            );
            ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
            self.neurons[i].connections = ranked.iter().take(count).map(|(j, _)| *j).collect();
            rewired += 1;
        }
        rewired
    }

    /// Proximity weight of the pointer at `p`: `1 - d / radius` inside the
    /// radius, `None` outside it or with no pointer.
    fn pointer_intensity(&self, p: Point) -> Option<f32> {
        if !self.cfg.interactive {
            return None;
        }
        let pointer = self.pointer?;
        let d = p.distance(pointer);
        (d < self.cfg.pointer_radius).then(|| 1.0 - d / self.cfg.pointer_radius)
    }

    /// Appearance of the edge `a -> b`, or `None` when it is past the cutoff.
    pub fn connection_style(&self, a: &Neuron, b: &Neuron) -> Option<LineStyle> {
        let distance = a.position().distance(b.position());
        if distance >= CONNECTION_CUTOFF {
            return None;
        }

        let mut style = LineStyle {
            alpha: BASE_LINE_ALPHA,
            width: BASE_LINE_WIDTH,
        };
        if self.cfg.pulse_enabled {
            let pulse = (a.pulse_phase + b.pulse_phase).sin().abs();
            style.alpha = 0.05 + pulse * 0.25;
            style.width = 0.5 + pulse;
        }
        if let Some(k) = self.pointer_intensity(a.position().midpoint(b.position())) {
            style.alpha = (style.alpha + k * POINTER_ALPHA_BOOST).min(1.0);
            style.width += k * POINTER_LINE_WIDTH_BOOST;
        }
        Some(style)
    }

    /// Appearance of a neuron given its current pulse phase and the pointer.
    pub fn neuron_style(&self, neuron: &Neuron) -> NeuronStyle {
        let mut style = NeuronStyle {
            alpha: BASE_NEURON_ALPHA,
            radius: neuron.radius,
        };
        if self.cfg.pulse_enabled {
            let pulse = neuron.pulse_phase.sin().abs();
            style.alpha = 0.3 + pulse * 0.5;
            style.radius = neuron.radius * (0.8 + pulse * 0.4);
        }
        if let Some(k) = self.pointer_intensity(neuron.position()) {
            style.alpha = (style.alpha + k * POINTER_ALPHA_BOOST).min(1.0);
            style.radius += k * POINTER_RADIUS_BOOST;
        }
        style
    }

    /// Run one frame: rewire, draw, move.
    ///
    /// A zero-area surface draws nothing and leaves neurons where they are.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.ticks += 1;
        if self.cfg.is_degenerate() {
            self.drawn_connections = 0;
            self.rewired_last_tick = 0;
            return;
        }

        let (w, h) = (self.cfg.width, self.cfg.height);
        surface.clear(w, h);
        if let Background::Solid(bg) = self.cfg.background {
            surface.fill_rect(0.0, 0.0, w, h, bg);
        }

        self.rewired_last_tick = self.refresh_connections();
        self.draw_connections(surface);
        self.draw_and_move_neurons(surface);
    }

    fn draw_connections<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let color = self.cfg.color;
        let mut drawn = 0;
        for a in &self.neurons {
            for &target in &a.connections {
                let b = &self.neurons[target];
                if let Some(style) = self.connection_style(a, b) {
                    surface.stroke_line(a.position(), b.position(), color, style.alpha, style.width);
                    drawn += 1;
                }
            }
        }
        self.drawn_connections = drawn;
    }

    fn draw_and_move_neurons<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let color = self.cfg.color;
        let (w, h) = (self.cfg.width, self.cfg.height);
        let half_jitter = JITTER * 0.5;

        for i in 0..self.neurons.len() {
            self.neurons[i].pulse_phase += self.neurons[i].pulse_speed;
            let style = self.neuron_style(&self.neurons[i]);

            let center = self.neurons[i].position();
            if let (Some(k), Some(pointer)) = (self.pointer_intensity(center), self.pointer) {
                let angle = (center.y - pointer.y).atan2(center.x - pointer.x);
                let force = REPULSION_STRENGTH * k;
                self.neurons[i].vx += angle.cos() * force;
                self.neurons[i].vy += angle.sin() * force;
            }

            surface.fill_circle(center, style.radius, color, style.alpha);
            surface.fill_glow(
                center,
                style.radius * GLOW_SCALE,
                color,
                GLOW_INNER_ALPHA,
                GLOW_ALPHA,
            );

            let jx = self.rng.gen_range_f32(-half_jitter, half_jitter);
            let jy = self.rng.gen_range_f32(-half_jitter, half_jitter);
            let neuron = &mut self.neurons[i];
            neuron.integrate();
            neuron.vx = (neuron.vx + jx) * DAMPING;
            neuron.vy = (neuron.vy + jy) * DAMPING;
            neuron.reflect(w, h);
        }
    }

    pub fn diagnostics(&self) -> Diagnostics {
        let neuron_count = self.neurons.len();
        let mean_speed = if neuron_count == 0 {
            0.0
        } else {
            self.neurons.iter().map(Neuron::speed).sum::<f32>() / neuron_count as f32
        };
        Diagnostics {
            ticks: self.ticks,
            neuron_count,
            connection_count: self.neurons.iter().map(|n| n.connections.len()).sum(),
            drawn_connections: self.drawn_connections,
            rewired_last_tick: self.rewired_last_tick,
            mean_speed,
            pointer_tracked: self.pointer.is_some(),
        }
    }
}
