//! HVS Network Mapper
//!
//! Maps the HVS network onto OSM node IDs through an OSRM server. All
//! settings come from the environment (optionally a `.env` file); the flags
//! below only override them.

use std::path::PathBuf;

use clap::Parser;

use hvs_mapper::config::{self, MapperConfig};
use hvs_mapper::observability::init_logging;
use hvs_mapper::{Pipeline, Shutdown};

#[derive(Parser)]
#[command(name = "hvs-mapper")]
#[command(version, about = "Map HVS road geometries to OSM nodes via OSRM", long_about = None)]
struct Cli {
    /// Base TOML configuration, applied before the environment.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Environment file to load instead of ./.env
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Maximum number of features to process.
    #[arg(short, long)]
    limit: Option<usize>,

    /// Output CSV path (overrides OUTPUT_FILENAME).
    #[arg(short, long)]
    output: Option<String>,

    /// Log level when RUST_LOG is unset.
    #[arg(long)]
    log_level: Option<String>,

    /// Disable the progress bar.
    #[arg(long)]
    no_progress: bool,
}

impl Cli {
    fn apply(self, config: &mut MapperConfig) {
        if let Some(limit) = self.limit {
            config.source.feature_limit = limit;
        }
        if let Some(output) = self.output {
            config.output.filename = output;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }
        if self.no_progress {
            config.observability.progress = false;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    config::load_env_file(cli.env_file.as_deref())?;
    let mut config = config::load_config(cli.config.as_deref())?;
    cli.apply(&mut config);

    init_logging(&config.observability.log_level);
    tracing::info!("hvs-mapper v{} starting", env!("CARGO_PKG_VERSION"));

    let config = config::validated(config).inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;

    tracing::info!(
        use_url = config.source.use_url,
        osrm_server = %config.osrm.server,
        feature_limit = config.source.feature_limit,
        output = %config.output.filename,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    tokio::spawn(shutdown.clone().listen_for_ctrl_c());

    let pipeline = Pipeline::new(config)?.with_shutdown(shutdown);
    let report = pipeline.run().await.inspect_err(|e| {
        tracing::error!(error = %e, "Run failed");
    })?;

    tracing::info!(
        matched = report.matched(),
        skipped = report.skipped.len(),
        interrupted = report.interrupted,
        "Done"
    );
    Ok(())
}
