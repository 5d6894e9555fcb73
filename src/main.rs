//! src/main.rs
//!
//! Entrypoint: resolve configuration, set up logging, delegate to `app::run()`.

use clap::Parser;

use weekly_graph::config::{AppConfig, Args};
use weekly_graph::{app, telemetry};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let cfg = AppConfig::resolve(&args)?;
    telemetry::init_tracing(&cfg.logging)?;
    cfg.log_summary(&args);

    app::run(&cfg)
}
