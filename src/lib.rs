//! # neuronet
//!
//! A decorative particle-network animation: drifting "neurons" joined by
//! pulsing connections that rewire toward their nearest neighbors and shy away
//! from the pointer.
//!
//! The crate is host-agnostic. It owns the simulation and issues drawing calls
//! on a [`surface::Surface`]; hosts supply the surface and the frame clock.
//!
//! ## Quick Start
//!
//! ```
//! use neuronet::prelude::*;
//!
//! let cfg = NetworkConfig::hero(640.0, 360.0).with_seed(42);
//! let mut net = NeuralNetwork::new(cfg).unwrap();
//! let mut surface = RecordingSurface::new();
//!
//! net.pointer_moved(320.0, 180.0);
//! net.tick(&mut surface);
//!
//! assert_eq!(surface.circles().count(), 100);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialization for configs, snapshots and display lists
//!
//! ## Modules
//!
//! - [`network`]: Neuron state and the per-frame update
//! - [`animation`]: Frame scheduling, resize and teardown
//! - [`surface`]: Drawing abstraction and a recording implementation
//! - [`observer`]: Read-only snapshots

#[path = "core/config.rs"]
pub mod config;

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/neuron.rs"]
pub mod neuron;

#[path = "core/surface.rs"]
pub mod surface;

#[path = "core/network.rs"]
pub mod network;

#[path = "core/animation.rs"]
pub mod animation;

#[path = "core/svg.rs"]
pub mod svg;

pub mod observer;

/// Prelude module for convenient imports.
///
/// ```
/// use neuronet::prelude::*;
/// ```
pub mod prelude {
    pub use crate::animation::{Animation, FrameScheduler, ManualScheduler};
    pub use crate::config::{Background, Color, ConfigError, NetworkConfig};
    pub use crate::network::{Diagnostics, NeuralNetwork};
    pub use crate::neuron::{Neuron, NeuronId};
    pub use crate::observer::{NetworkAdapter, NetworkSnapshot};
    pub use crate::prng::{Prng, RandomSource};
    pub use crate::surface::{DrawCommand, Point, RecordingSurface, Surface};
    pub use crate::svg::render_svg;
}
