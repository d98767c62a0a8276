//! Headless host for the neuronet particle network.
//!
//! Runs the animation on a fixed frame clock without a browser, logs
//! diagnostics, and optionally exports the last frame as SVG plus a JSON run
//! summary.
//!
//! Examples:
//!   neuronet-headless --frames 600 --svg frame.svg
//!   neuronet-headless --config hero.json --pointer 320,180 --summary run.json

use tracing::{error, info};

mod args;
mod error;
mod run;

use args::{print_help, Options};
use error::HeadlessError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let opts = match Options::parse(std::env::args().skip(1)) {
        Ok(Some(opts)) => opts,
        Ok(None) => {
            print_help();
            return Ok(());
        }
        Err(e) => {
            eprintln!("{e}");
            print_help();
            std::process::exit(2);
        }
    };

    if let Err(e) = execute(&opts).await {
        error!("{}", e);
        return Err(e.into());
    }
    Ok(())
}

async fn execute(opts: &Options) -> Result<(), HeadlessError> {
    let cfg = opts.load_config()?;
    let out = run::run(cfg, opts).await?;

    if let Some(path) = &opts.svg {
        let svg = neuronet::svg::render_svg(cfg.width, cfg.height, &out.last_frame);
        std::fs::write(path, svg).map_err(|e| HeadlessError::io(path, e))?;
        info!("Last frame written to {}", path.display());
    }

    let json = serde_json::to_string_pretty(&out.summary)?;
    match &opts.summary {
        Some(path) => {
            std::fs::write(path, json).map_err(|e| HeadlessError::io(path, e))?;
            info!("Summary written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
