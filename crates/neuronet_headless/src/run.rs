use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::time::{self, MissedTickBehavior};
use tracing::info;

use neuronet::animation::{Animation, ManualScheduler};
use neuronet::config::NetworkConfig;
use neuronet::network::Diagnostics;
use neuronet::observer::{NetworkAdapter, NetworkSnapshot};
use neuronet::surface::{DrawCommand, RecordingSurface};

use crate::args::Options;
use crate::error::HeadlessError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    FrameLimit,
    Signal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub frames: u64,
    pub elapsed_ms: u64,
    pub stop_reason: StopReason,
    pub config: NetworkConfig,
    pub diagnostics: Diagnostics,
    /// Distinct undirected connections in the final frame.
    pub edge_count: usize,
    /// Neuron state after the last frame.
    pub snapshot: Option<NetworkSnapshot>,
}

pub struct RunOutput {
    pub summary: RunSummary,
    /// Display list of the last rendered frame.
    pub last_frame: Vec<DrawCommand>,
}

/// Drive the animation on a tokio interval until the frame limit or Ctrl-C.
pub async fn run(cfg: NetworkConfig, opts: &Options) -> Result<RunOutput, HeadlessError> {
    let mut anim = Animation::start(cfg, ManualScheduler::new())?;
    if let Some((x, y)) = opts.pointer {
        anim.pointer_moved(x, y);
    }

    info!(
        "Running {} neurons on {}x{} at {} FPS",
        cfg.neuron_count, cfg.width, cfg.height, opts.fps
    );

    let mut surface = RecordingSurface::new();
    let mut interval = time::interval(opts.frame_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let started = Instant::now();
    let mut frames = 0u64;
    let mut stop_reason = StopReason::FrameLimit;

    while opts.frames.map_or(true, |limit| frames < limit) {
        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut ctrl_c => {
                info!("Ctrl-C: stopping after {} frames", frames);
                stop_reason = StopReason::Signal;
                break;
            }
        }

        anim.on_frame(&mut surface);
        frames += 1;

        if opts.log_every > 0 && frames % opts.log_every == 0 {
            if let Some(d) = anim.diagnostics() {
                info!(
                    "frame {}: {} connections ({} drawn), {} rewired, mean speed {:.3}",
                    d.ticks, d.connection_count, d.drawn_connections, d.rewired_last_tick, d.mean_speed
                );
            }
        }
    }

    let diagnostics = anim.diagnostics().unwrap_or_default();
    let (edge_count, snapshot) = match anim.network() {
        Some(net) => {
            let adapter = NetworkAdapter::new(net);
            (adapter.edges().len(), Some(adapter.snapshot()))
        }
        None => (0, None),
    };
    info!("Finished with {} distinct connections", edge_count);
    anim.teardown();

    Ok(RunOutput {
        summary: RunSummary {
            frames,
            elapsed_ms: started.elapsed().as_millis() as u64,
            stop_reason,
            config: cfg,
            diagnostics,
            edge_count,
            snapshot,
        },
        last_frame: surface.take_commands(),
    })
}
