#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::network::{Diagnostics, NeuralNetwork};
use crate::neuron::NeuronId;
use crate::prng::RandomSource;
use crate::surface::Point;

/// A read-only snapshot of what the network is doing.
///
/// Design intent:
/// - Observers cannot mutate or steer the network.
/// - Snapshotting is *on-demand* and allocates; the tick loop stays unchanged.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NetworkSnapshot {
    pub width: f32,
    pub height: f32,
    pub diagnostics: Diagnostics,
    pub pointer: Option<Point>,
    pub neurons: Vec<NeuronView>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NeuronView {
    pub position: Point,
    pub velocity: Point,
    pub radius: f32,
    pub connections: Vec<NeuronId>,
}

pub struct NetworkAdapter<'a, R: RandomSource> {
    network: &'a NeuralNetwork<R>,
}

impl<'a, R: RandomSource> NetworkAdapter<'a, R> {
    pub fn new(network: &'a NeuralNetwork<R>) -> Self {
        Self { network }
    }

    pub fn snapshot(&self) -> NetworkSnapshot {
        let cfg = self.network.config();
        NetworkSnapshot {
            width: cfg.width,
            height: cfg.height,
            diagnostics: self.network.diagnostics(),
            pointer: self.network.pointer(),
            neurons: self
                .network
                .neurons()
                .iter()
                .map(|n| NeuronView {
                    position: n.position(),
                    velocity: n.velocity(),
                    radius: n.radius,
                    connections: n.connections.clone(),
                })
                .collect(),
        }
    }

    /// Undirected edge list with duplicates (a->b and b->a) folded together.
    pub fn edges(&self) -> Vec<(NeuronId, NeuronId)> {
        let mut edges: Vec<_> = self
            .network
            .neurons()
            .iter()
            .enumerate()
            .flat_map(|(i, n)| n.connections.iter().map(move |&t| (i.min(t), i.max(t))))
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;
    use crate::surface::RecordingSurface;

    #[test]
    fn snapshot_mirrors_network() {
        let cfg = NetworkConfig::default()
            .with_size(120.0, 80.0)
            .with_neuron_count(9)
            .with_seed(1);
        let mut net = NeuralNetwork::new(cfg).unwrap();
        net.tick(&mut RecordingSurface::new());

        let snap = NetworkAdapter::new(&net).snapshot();
        assert_eq!(snap.width, 120.0);
        assert_eq!(snap.height, 80.0);
        assert_eq!(snap.neurons.len(), 9);
        assert_eq!(snap.diagnostics.ticks, 1);
        for (view, n) in snap.neurons.iter().zip(net.neurons()) {
            assert_eq!(view.position, n.position());
            assert_eq!(view.connections, n.connections);
        }
    }

    #[test]
    fn edges_are_undirected_and_unique() {
        let cfg = NetworkConfig::default().with_neuron_count(12).with_seed(4);
        let net = NeuralNetwork::new(cfg).unwrap();
        let edges = NetworkAdapter::new(&net).edges();

        assert!(edges.iter().all(|(a, b)| a < b));
        assert!(edges.windows(2).all(|w| w[0] < w[1]));
        let directed: usize = net.neurons().iter().map(|n| n.connections.len()).sum();
        assert!(edges.len() <= directed);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn snapshot_serializes() {
        let net = NeuralNetwork::new(NetworkConfig::default().with_neuron_count(3).with_seed(2))
            .unwrap();
        let snap = NetworkAdapter::new(&net).snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        let back: NetworkSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
