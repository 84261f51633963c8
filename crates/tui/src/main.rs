mod app;

use anyhow::Result;
use std::fs::{self, OpenOptions};

use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::{prelude::*, EnvFilter};

use orbitron_core::config::{self, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;

    let seed = if config.seed == 0 {
        Utc::now().timestamp_millis() as u64
    } else {
        config.seed
    };
    tracing::info!(seed, "wish oracle seeded");
    let rng = StdRng::seed_from_u64(seed);

    let mut app = app::OrbitronApp::new(config, rng);
    app.run().await
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("orbitron.log");

    let env_filter = EnvFilter::from_default_env();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
