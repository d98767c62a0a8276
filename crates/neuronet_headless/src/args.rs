use std::path::PathBuf;

use neuronet::config::NetworkConfig;

use crate::error::HeadlessError;

pub const DEFAULT_FPS: u32 = 60;
pub const MAX_FPS: u32 = 240;

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub config: Option<PathBuf>,
    /// Stop after this many frames; run until Ctrl-C when unset.
    pub frames: Option<u64>,
    pub fps: u32,
    pub seed: Option<u64>,
    pub size: Option<(f32, f32)>,
    pub pointer: Option<(f32, f32)>,
    pub svg: Option<PathBuf>,
    pub summary: Option<PathBuf>,
    /// Log diagnostics every N frames (0 = never).
    pub log_every: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config: None,
            frames: None,
            fps: DEFAULT_FPS,
            seed: None,
            size: None,
            pointer: None,
            svg: None,
            summary: None,
            log_every: 60,
        }
    }
}

fn parse_pair(flag: &str, v: &str) -> Result<(f32, f32), HeadlessError> {
    let bad = || HeadlessError::Args(format!("{flag} expects X,Y (got {v:?})"));
    let (a, b) = v.split_once([',', 'x']).ok_or_else(bad)?;
    let a: f32 = a.trim().parse().map_err(|_| bad())?;
    let b: f32 = b.trim().parse().map_err(|_| bad())?;
    Ok((a, b))
}

fn parse_num<T: std::str::FromStr>(flag: &str, v: &str) -> Result<T, HeadlessError> {
    v.parse()
        .map_err(|_| HeadlessError::Args(format!("{flag} expects a number (got {v:?})")))
}

impl Options {
    /// Parse CLI arguments (without the program name).
    ///
    /// Returns `Ok(None)` when help was requested.
    pub fn parse<I, S>(args: I) -> Result<Option<Self>, HeadlessError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut opts = Options::default();
        let mut it = args.into_iter();
        while let Some(arg) = it.next() {
            let arg = arg.as_ref();
            if matches!(arg, "-h" | "--help" | "help") {
                return Ok(None);
            }
            let mut value = || {
                it.next()
                    .map(|v| v.as_ref().to_string())
                    .ok_or_else(|| HeadlessError::Args(format!("{arg} expects a value")))
            };
            match arg {
                "--config" => opts.config = Some(PathBuf::from(value()?)),
                "--frames" => opts.frames = Some(parse_num(arg, &value()?)?),
                "--fps" => {
                    let fps: u32 = parse_num(arg, &value()?)?;
                    opts.fps = fps.clamp(1, MAX_FPS);
                }
                "--seed" => opts.seed = Some(parse_num(arg, &value()?)?),
                "--size" => opts.size = Some(parse_pair(arg, &value()?)?),
                "--pointer" => opts.pointer = Some(parse_pair(arg, &value()?)?),
                "--svg" => opts.svg = Some(PathBuf::from(value()?)),
                "--summary" => opts.summary = Some(PathBuf::from(value()?)),
                "--log-every" => opts.log_every = parse_num(arg, &value()?)?,
                other => return Err(HeadlessError::Args(format!("unknown argument {other:?}"))),
            }
        }
        Ok(Some(opts))
    }

    /// Load the config file (if any) and apply CLI overrides on top.
    pub fn load_config(&self) -> Result<NetworkConfig, HeadlessError> {
        let mut cfg = match &self.config {
            Some(path) => {
                let text =
                    std::fs::read_to_string(path).map_err(|e| HeadlessError::io(path, e))?;
                serde_json::from_str(&text).map_err(|source| HeadlessError::ConfigFile {
                    path: path.clone(),
                    source,
                })?
            }
            None => NetworkConfig::default(),
        };
        if let Some((w, h)) = self.size {
            cfg = cfg.with_size(w, h);
        }
        if let Some(seed) = self.seed {
            cfg = cfg.with_seed(seed);
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_micros(1_000_000 / self.fps.max(1) as u64)
    }
}

pub fn print_help() {
    println!("neuronet-headless: run the particle network without a browser");
    println!();
    println!("Usage: neuronet-headless [options]");
    println!();
    println!("  --config PATH      JSON NetworkConfig (missing fields use defaults)");
    println!("  --frames N         stop after N frames (default: run until Ctrl-C)");
    println!("  --fps N            frame rate, 1..={MAX_FPS} (default {DEFAULT_FPS})");
    println!("  --seed N           PRNG seed");
    println!("  --size W,H         override surface size");
    println!("  --pointer X,Y      hold the pointer at X,Y");
    println!("  --svg PATH         write the last frame as SVG");
    println!("  --summary PATH     write the run summary as JSON (default: stdout)");
    println!("  --log-every N      log diagnostics every N frames (0 = off)");
}
