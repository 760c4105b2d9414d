#![warn(missing_docs, clippy::missing_docs_in_private_items)]

//! # Waypoint Settings
//!
//! Configuration is specified in several ways, with later methods overriding earlier ones.
//!
//! 1. A base configuration checked into the repository, in `config/base.yaml`.
//!    This provides the default values for most settings.
//! 2. Per-environment configuration files in the `config` directory. The
//!    environment is selected using the environment variable `WAYPOINT_ENV`. The
//!    settings for that environment are then loaded from `config/${env}.yaml`, if
//!    it exists. The default environment is "development". A "production"
//!    environment is also provided.
//! 3. A local configuration file not checked into the repository, at
//!    `config/local.yaml`. This file is in `.gitignore` and is the intended
//!    place for the upstream API key during local development.
//! 4. Environment variables that begin with `WAYPOINT_` and have a separator of
//!    `__`. For example, `Settings::maps::api_key` can be controlled from the
//!    environment variable `WAYPOINT_MAPS__API_KEY`.
//!
//! Tests should use `Settings::load_for_tests` which only reads from
//! `config/base.yaml`, `config/test.yaml`, and `config/local_test.yaml` (if it
//! exists). It does not read from environment variables.
//!
//! Configuration files are canonically YAML files. However, any format supported
//! by the [config] crate can be used, including JSON and TOML. To choose another
//! format, simply use a different extension for your file, like
//! `config/local.toml`.

mod logging;
mod maps;

pub use logging::{DirectiveWrapper, LogFormat, LoggingSettings};
pub use maps::{ApiKey, MapsSettings};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Top level settings object for Waypoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[doc(inline)]
pub struct Settings {
    /// The environment Waypoint is running in. Should only be set with the
    /// `WAYPOINT_ENV` environment variable.
    pub env: String,

    /// Enable additional features to debug the application. This should not be
    /// set to true in production environments.
    pub debug: bool,

    /// Settings for the HTTP server.
    pub http: HttpSettings,

    /// Settings for the upstream maps service.
    pub maps: MapsSettings,

    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Settings for the HTTP server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpSettings {
    /// The host and port to listen on, such as "127.0.0.1:3002" or "0.0.0.0:80".
    pub listen: SocketAddr,

    /// The number of workers to use. Optional. If no value is provided, the
    /// number of logical cores will be used.
    pub workers: Option<usize>,
}

impl Settings {
    /// Load settings from configuration files and environment variables.
    ///
    /// # Errors
    /// If any of the configured values are invalid, or if any of the required
    /// configuration files are missing.
    pub fn load() -> Result<Self, ConfigError> {
        let waypoint_env =
            std::env::var("WAYPOINT_ENV").unwrap_or_else(|_| "development".to_string());

        Config::builder()
            // Start off with the base config.
            .add_source(File::with_name("./config/base"))
            .set_override("env", waypoint_env.as_str())?
            // Merge in an environment specific config.
            .add_source(File::with_name(&format!("config/{}", waypoint_env)).required(false))
            // Add a local configuration file that is `.gitignore`ed.
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables that start with "WAYPOINT_" and have "__"
            // to separate levels. For example, `WAYPOINT_HTTP__LISTEN` maps to
            // `Settings::http::listen`.
            .add_source(
                Environment::with_prefix("WAYPOINT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Load settings from configuration files for tests.
    ///
    /// Paths are relative to a member crate of the workspace, which is the
    /// working directory `cargo test` uses.
    ///
    /// # Panics
    /// If the test configuration files are missing or invalid.
    pub fn load_for_tests() -> Self {
        Config::builder()
            .add_source(File::with_name("../config/base"))
            .set_override("env", "test")
            .expect("Could not set env for tests")
            .add_source(File::with_name("../config/test"))
            // Add a local configuration file that is `.gitignore`ed.
            .add_source(File::with_name("../config/local_test").required(false))
            .build()
            .expect("Could not load settings for tests")
            .try_deserialize()
            .expect("Could not convert settings")
    }
}
