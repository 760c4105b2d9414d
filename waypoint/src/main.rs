// Only overview documentation that is not relevant to one of the more specific
// crates should go here.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

//! A proxy that calls a maps and places API on behalf of browsers, adding the
//! server's API key so that it never reaches the client.
//!
//! Waypoint is split into several subcrates that work in collaboration.
//!
//! - [waypoint-integration-tests](../waypoint_integration_tests/index.html)
//! - [waypoint-maps](../waypoint_maps/index.html)
//! - [waypoint-settings](../waypoint_settings/index.html)
//! - [waypoint-web](../waypoint_web/index.html)

use anyhow::{Context, Result};
use std::net::TcpListener;
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};
use waypoint_settings::{LogFormat, Settings};

/// Primary entry point
#[actix_rt::main]
async fn main() -> Result<()> {
    let settings = Settings::load().context("Loading settings")?;
    init_logging(&settings).context("Initializing logging")?;
    let listener = TcpListener::bind(settings.http.listen).context("Binding port")?;
    let address = listener.local_addr().context("Reading bound address")?;

    let server = waypoint_web::run(listener, settings).context("Starting waypoint-web server")?;
    tracing::info!(r#type = "main.started", "Proxy server running on http://{}", address);

    server.await.context("Running waypoint-web server")?;

    Ok(())
}

/// Set up logging for Waypoint, based on settings and the `RUST_LOG` environment variable.
fn init_logging(settings: &Settings) -> Result<()> {
    LogTracer::init()?;
    let env_filter: EnvFilter = (&settings.logging.levels).into();
    let registry = tracing_subscriber::registry().with(env_filter);

    match settings.logging.format {
        LogFormat::Pretty => tracing::subscriber::set_global_default(
            registry.with(tracing_subscriber::fmt::layer().pretty()),
        )?,
        LogFormat::Json => tracing::subscriber::set_global_default(
            registry.with(tracing_subscriber::fmt::layer().json()),
        )?,
        LogFormat::Compact => tracing::subscriber::set_global_default(
            registry.with(tracing_subscriber::fmt::layer().compact()),
        )?,
    };

    Ok(())
}
