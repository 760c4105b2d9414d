#![warn(missing_docs, clippy::missing_docs_in_private_items)]

//! Web server for [Waypoint](../waypoint/index.html)'s public API.

mod debug;
mod dockerflow;
mod endpoints;
mod errors;
mod extractors;
mod logging;

#[cfg(test)]
mod test_utils;

pub use crate::errors::HandlerError;

use actix_cors::Cors;
use actix_web::{
    dev::Server,
    web::{self, Data, ServiceConfig},
    App, HttpServer,
};
use anyhow::Context;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;
use waypoint_maps::MapsClient;
use waypoint_settings::Settings;

use crate::logging::WaypointRootSpanBuilder;

/// Run the web server
///
/// The returned server is a `Future` that must either be `.await`ed, or run it
/// as a background task using `tokio::spawn`.
///
/// Most of the details from `settings` will be respected, except for those that
/// go into building the listener (the host and port). If you want to respect the
/// settings specified in that object, you must include them in the construction
/// of `listener`.
///
/// # Errors
///
/// Returns an error if the upstream client can't be configured, or if the
/// server cannot be started on the provided listener.
///
/// # Examples
///
/// Run the server in the foreground. This will only return if there is an error
/// that causes the server to shut down.
///
/// ```no_run
/// # tokio_test::block_on(async {
/// let listener = std::net::TcpListener::bind("127.0.0.1:3002")
///     .expect("Failed to bind port");
/// let settings = waypoint_settings::Settings::load()
///     .expect("Failed to load settings");
/// waypoint_web::run(listener, settings)
///     .expect("Failed to start server")
///     .await
///     .expect("Fatal error while running server");
/// # })
/// ```
///
/// Run the server as a background task. This will return immediately and process
/// requests. This is useful for tests.
///
/// ```no_run
/// use std::net::TcpListener;
///
/// let listener = TcpListener::bind("127.0.0.1:3002")
///     .expect("Failed to bind port");
/// let settings = waypoint_settings::Settings::load()
///     .expect("Failed to load settings");
/// let server = waypoint_web::run(listener, settings)
///     .expect("Failed to start server");
///
/// // The server can be stopped with `join_handle::abort()`, if needed.
/// let join_handle = tokio::spawn(server);
/// ```
pub fn run(listener: TcpListener, settings: Settings) -> anyhow::Result<Server> {
    let num_workers = settings.http.workers;
    let configure = configure_app(settings)?;

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::<WaypointRootSpanBuilder>::new())
            .wrap(Cors::permissive())
            .configure(configure.clone())
    })
    .listen(listener)
    .context("Listening for connections")?;

    if let Some(n) = num_workers {
        server = server.workers(n);
    }

    Ok(server.run())
}

/// Build the routes and shared state of the app, without any middleware.
///
/// This creates the single upstream client that every worker shares.
///
/// # Errors
///
/// Returns an error if the upstream client can't be built from `settings`,
/// such as when no API key is configured.
pub fn configure_app(
    settings: Settings,
) -> anyhow::Result<impl FnOnce(&mut ServiceConfig) + Clone + Send + 'static> {
    let maps_client =
        Data::new(MapsClient::new(&settings.maps).context("Setting up the maps client")?);
    let settings = Data::new(settings);

    Ok(move |config: &mut ServiceConfig| {
        config
            .app_data(settings)
            .app_data(maps_client)
            .app_data(extractors::query_config())
            // The proxied upstream operations
            .service(web::scope("/api").configure(endpoints::configure))
            // Add some debugging views
            .service(web::scope("/debug").configure(debug::configure))
            // Add the behavior necessary to satisfy Dockerflow.
            .configure(dockerflow::configure);
    })
}
