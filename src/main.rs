//! ebsmon - scheduled EBS hygiene monitor
//!
//! Runs one inventory sweep to completion: queries block-storage inventory
//! for unattached and unencrypted resources, publishes the derived metrics,
//! prints the invocation report as JSON on stdout and exits. Intended to be
//! invoked by a time-based trigger; no state survives between runs.
//!
//! # Environment Variables
//! - `CLOUDWATCH_NAMESPACE` - metric namespace (default: EBSMonitoring)
//! - `MODE` - inventory binding, 'mock' or 'fixture' (default: mock)
//! - `FIXTURE_PATH` - inventory JSON document, required for fixture mode
//! - `DEADLINE_SECONDS` - optional invocation budget imposed by the trigger

use anyhow::Result;
use chrono::Utc;
use ebsmon::application::handler::{self, InvocationContext};
use ebsmon::application::orchestrator::Orchestrator;
use ebsmon::config::Config;
use ebsmon::domain::report::{InvocationReport, Response};
use ebsmon::infrastructure::ServiceFactory;
use tracing::{Level, error, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("ebsmon {} starting...", env!("CARGO_PKG_VERSION"));

    let response = run().await;

    println!("{}", serde_json::to_string_pretty(&response)?);
    if response.status_code != 200 {
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Response {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {}", e);
            return InvocationReport::initialization_failure(&e.to_string()).into_response();
        }
    };
    info!(
        "Configuration loaded: Mode={:?}, Namespace={}",
        config.mode, config.namespace
    );

    let (inventory, sink) = match ServiceFactory::create_services(&config) {
        Ok(services) => services,
        Err(e) => {
            error!("Failed to bind provider capabilities: {:#}", e);
            return InvocationReport::initialization_failure(&format!("{e:#}")).into_response();
        }
    };

    let orchestrator = Orchestrator::new(inventory, sink, config.namespace.clone());
    let deadline = config
        .deadline_seconds
        .map(|secs| Utc::now() + chrono::Duration::seconds(secs as i64));

    handler::handle(
        &orchestrator,
        serde_json::json!({ "source": "schedule" }),
        InvocationContext::new(deadline),
    )
    .await
}
