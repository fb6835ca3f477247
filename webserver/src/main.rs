//! Hackathon hub webserver entry point
//!
//! Reads configuration from the command line, the environment and an
//! optional `.env` file, picks a store backend and serves the REST API.

use anyhow::Context;
use clap::Parser;
use shared::{Component, component_info, logging};
use std::net::IpAddr;
use std::path::PathBuf;

use webserver::{
    Repository, ServerConfig, WebServer, WebServerState,
    core::{AnalyticsEngine, Presenter, ScoreThresholds},
    open_store, seed_demo_data,
};

#[derive(Parser, Debug)]
#[command(name = "hackathon-webserver")]
#[command(about = "REST API and analytics for the hackathon hub")]
struct Args {
    /// Port for the HTTP server
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Directory for the persistent JSON store (in-memory when unset)
    #[arg(long, env = "DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Scores at or above this are shown as good
    #[arg(long, env = "SCORE_GOOD_THRESHOLD", default_value_t = 80)]
    good_threshold: u32,

    /// Scores at or above this are shown as warning
    #[arg(long, env = "SCORE_WARNING_THRESHOLD", default_value_t = 60)]
    warning_threshold: u32,

    /// Load demo data into an empty store
    #[arg(long, env = "SEED_DEMO_DATA")]
    seed: bool,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        ServerConfig {
            host: args.host,
            port: args.port,
            data_dir: args.data_dir,
            log_level: args.log_level,
            thresholds: ScoreThresholds {
                good: args.good_threshold,
                warning: args.warning_threshold,
            },
            seed: args.seed,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    let args = Args::parse();
    logging::init_tracing(Some(&args.log_level));

    let config = ServerConfig::from(args).validate().context("Invalid configuration")?;
    logging::log_startup(
        Component::Server,
        &format!("hackathon webserver on {}", config.bind_address()),
    );

    let store = open_store(config.data_dir.as_deref()).await;
    let repository = Repository::new(store);

    if config.seed {
        let seeded = seed_demo_data(&repository).await.context("Failed to seed demo data")?;
        component_info!(Component::Server, seeded, "Seed step finished");
    }

    let state = WebServerState::new(repository, AnalyticsEngine::new(), Presenter::new(config.thresholds));
    let webserver = WebServer::new(config, state);

    webserver.run().await.context("WebServer terminated with an error")?;
    Ok(())
}
