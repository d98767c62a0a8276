//! Frame lifecycle around a [`NeuralNetwork`].
//!
//! Hosts own the clock. They hand an [`Animation`] a [`FrameScheduler`] (for
//! the browser, `requestAnimationFrame`) and call [`Animation::on_frame`] from
//! each callback. The animation keeps at most one frame pending and cancels it
//! on resize and teardown.

use crate::config::{ConfigError, NetworkConfig};
use crate::network::{Diagnostics, NeuralNetwork};
use crate::prng::{Prng, RandomSource};
use crate::surface::Surface;

/// Host-side frame scheduling.
pub trait FrameScheduler {
    type Handle: Copy;

    /// Ask for one more frame callback. `None` if the host refused.
    fn request_frame(&mut self) -> Option<Self::Handle>;

    fn cancel_frame(&mut self, handle: Self::Handle);
}

pub struct Animation<S: FrameScheduler, R: RandomSource = Prng> {
    scheduler: S,
    network: Option<NeuralNetwork<R>>,
    pending: Option<S::Handle>,
}

impl<S: FrameScheduler> Animation<S, Prng> {
    /// Build the network from `cfg` and schedule the first frame.
    pub fn start(cfg: NetworkConfig, scheduler: S) -> Result<Self, ConfigError> {
        Ok(Self::start_with(NeuralNetwork::new(cfg)?, scheduler))
    }
}

impl<S: FrameScheduler, R: RandomSource> Animation<S, R> {
    /// Drive an already-built network.
    pub fn start_with(network: NeuralNetwork<R>, scheduler: S) -> Self {
        let mut anim = Self {
            scheduler,
            network: Some(network),
            pending: None,
        };
        anim.schedule();
        anim
    }

    fn schedule(&mut self) {
        if self.pending.is_none() && self.network.is_some() {
            self.pending = self.scheduler.request_frame();
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    /// Frame callback: tick once, then request the next frame.
    ///
    /// Callbacks that arrive after [`teardown`](Self::teardown) do nothing.
    pub fn on_frame<D: Surface + ?Sized>(&mut self, surface: &mut D) {
        self.pending = None;
        let Some(network) = self.network.as_mut() else {
            return;
        };
        network.tick(surface);
        self.schedule();
    }

    /// Rebuild at a new size. The old neurons and any pending frame are gone.
    ///
    /// A rejected size leaves the running animation and its frame untouched.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        let Some(network) = self.network.as_mut() else {
            return Ok(());
        };
        network.reinitialize(width, height)?;
        self.cancel_pending();
        self.schedule();
        Ok(())
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if let Some(network) = self.network.as_mut() {
            network.pointer_moved(x, y);
        }
    }

    pub fn pointer_left(&mut self) {
        if let Some(network) = self.network.as_mut() {
            network.pointer_left();
        }
    }

    /// Stop scheduling and drop all neuron state. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.cancel_pending();
        self.network = None;
    }

    pub fn is_running(&self) -> bool {
        self.network.is_some()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    pub fn network(&self) -> Option<&NeuralNetwork<R>> {
        self.network.as_ref()
    }

    pub fn diagnostics(&self) -> Option<Diagnostics> {
        self.network.as_ref().map(NeuralNetwork::diagnostics)
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<S: FrameScheduler, R: RandomSource> Drop for Animation<S, R> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

/// Scheduler for hosts that pull frames themselves (fixed-step loops, tests).
///
/// It hands out sequential handles and remembers which one is outstanding.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    next: u64,
    outstanding: Option<u64>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outstanding(&self) -> Option<u64> {
        self.outstanding
    }

    pub fn requested(&self) -> u64 {
        self.requested
    }

    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn request_frame(&mut self) -> Option<u64> {
        self.next += 1;
        self.requested += 1;
        self.outstanding = Some(self.next);
        Some(self.next)
    }

    fn cancel_frame(&mut self, handle: u64) {
        if self.outstanding == Some(handle) {
            self.outstanding = None;
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn start(n: usize) -> Animation<ManualScheduler> {
        let cfg = NetworkConfig::default()
            .with_size(100.0, 100.0)
            .with_neuron_count(n)
            .with_seed(9);
        Animation::start(cfg, ManualScheduler::new()).unwrap()
    }

    #[test]
    fn start_requests_first_frame() {
        let anim = start(5);
        assert!(anim.is_running());
        assert!(anim.has_pending_frame());
        assert_eq!(anim.scheduler().outstanding(), Some(1));
    }

    #[test]
    fn each_frame_schedules_the_next() {
        let mut anim = start(5);
        let mut surface = RecordingSurface::new();
        for _ in 0..10 {
            anim.on_frame(&mut surface);
        }
        assert_eq!(anim.scheduler().requested(), 11);
        assert_eq!(anim.diagnostics().map(|d| d.ticks), Some(10));
        assert_eq!(surface.frames(), 10);
    }

    #[test]
    fn teardown_twice_is_safe_and_leaves_nothing_pending() {
        let mut anim = start(5);
        anim.teardown();
        anim.teardown();
        assert!(!anim.is_running());
        assert!(!anim.has_pending_frame());
        assert_eq!(anim.scheduler().outstanding(), None);
        assert_eq!(anim.scheduler().cancelled(), 1);
    }

    #[test]
    fn late_frame_after_teardown_is_ignored() {
        let mut anim = start(5);
        let mut surface = RecordingSurface::new();
        anim.teardown();
        anim.on_frame(&mut surface);
        assert_eq!(surface.frames(), 0);
        assert!(!anim.has_pending_frame());
        assert_eq!(anim.scheduler().requested(), 1);
    }

    #[test]
    fn resize_cancels_and_reschedules() {
        let mut anim = start(7);
        anim.pointer_moved(10.0, 10.0);
        anim.resize(320.0, 240.0).unwrap();

        assert_eq!(anim.scheduler().cancelled(), 1);
        assert_eq!(anim.scheduler().outstanding(), Some(2));
        let net = anim.network().unwrap();
        assert_eq!(net.config().width, 320.0);
        assert_eq!(net.neurons().len(), 7);
        assert!(net.pointer().is_none());
    }

    #[test]
    fn rejected_resize_keeps_the_frame_loop_alive() {
        let mut anim = start(4);
        assert!(anim.resize(-1.0, 50.0).is_err());

        assert!(anim.is_running());
        assert!(anim.has_pending_frame());
        assert_eq!(anim.scheduler().outstanding(), Some(1));
        assert_eq!(anim.scheduler().cancelled(), 0);
        assert_eq!(anim.network().map(|n| n.config().width), Some(100.0));

        anim.on_frame(&mut RecordingSurface::new());
        assert_eq!(anim.diagnostics().map(|d| d.ticks), Some(1));
    }

    #[test]
    fn pointer_events_reach_the_network() {
        let mut anim = start(3);
        anim.pointer_moved(20.0, 30.0);
        assert!(anim.diagnostics().unwrap().pointer_tracked);
        anim.pointer_left();
        assert!(!anim.diagnostics().unwrap().pointer_tracked);
    }
}
