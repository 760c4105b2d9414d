//! Errors from talking to the upstream service.

use thiserror::Error;

/// An error that happened while calling the upstream service.
///
/// None of the variants include the request URL, since it carries the
/// credential.
#[derive(Debug, Error)]
pub enum MapsError {
    /// No credential was configured.
    #[error("no API key configured for the maps service")]
    MissingCredential,

    /// The HTTP client could not be constructed.
    #[error("could not build the HTTP client")]
    Client(#[source] reqwest::Error),

    /// The upstream URL could not be built from the configured base URL.
    #[error("could not build the upstream URL")]
    InvalidUrl(#[from] url::ParseError),

    /// The request could not be sent, or no response arrived.
    #[error("the upstream request failed")]
    Request(#[source] reqwest::Error),

    /// The response body could not be read.
    #[error("could not read the upstream response body")]
    Body(#[source] reqwest::Error),

    /// The upstream body was not JSON.
    #[error("the upstream response was not valid JSON")]
    InvalidJson(#[source] serde_json::Error),
}

impl MapsError {
    /// Wrap an error from sending a request, dropping the URL it refers to.
    pub(crate) fn request(error: reqwest::Error) -> Self {
        Self::Request(error.without_url())
    }

    /// Wrap an error from reading a body, dropping the URL it refers to.
    pub(crate) fn body(error: reqwest::Error) -> Self {
        Self::Body(error.without_url())
    }
}
