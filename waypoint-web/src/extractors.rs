//! Configuration for extracting data from requests.

use actix_web::{error::QueryPayloadError, web::QueryConfig};

use crate::errors::HandlerError;

/// Report query strings that don't fit a route's parameters, usually because
/// a required parameter is missing, as JSON client errors.
pub fn query_config() -> QueryConfig {
    QueryConfig::default().error_handler(|error, _request| {
        let detail = match &error {
            QueryPayloadError::Deserialize(inner) => inner.to_string(),
            other => other.to_string(),
        };
        tracing::debug!(r#type = "web.query.invalid", %detail, "Rejecting query string");
        HandlerError::InvalidQuery(detail).into()
    })
}
