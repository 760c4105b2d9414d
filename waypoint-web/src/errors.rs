//! Any errors that waypoint-web might generate, and supporting implementations.

use std::collections::HashMap;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::Value;
use thiserror::Error;
use waypoint_maps::Operation;

/// An error that happened in a web handler.
///
/// Every variant is rendered as `{"error": "<message>"}`. Messages never
/// contain details of the underlying cause; those are logged instead.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The query string was missing a required parameter, or couldn't be read.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The upstream call for an operation failed.
    #[error("{}", .0.failure_message())]
    Upstream(Operation),
}

impl ResponseError for HandlerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HashMap::new();
        response.insert("error".to_owned(), Value::String(self.to_string()));
        HttpResponse::build(self.status_code()).json(response)
    }
}

#[cfg(test)]
mod tests {
    use super::HandlerError;
    use actix_web::{body::to_bytes, http::StatusCode, ResponseError};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use waypoint_maps::Operation;

    #[actix_rt::test]
    async fn upstream_errors_use_the_fixed_message() {
        let error = HandlerError::Upstream(Operation::TextSearch);

        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body()).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({"error": "Failed to search places by text"}));
    }

    #[test]
    fn invalid_queries_are_client_errors() {
        let error = HandlerError::InvalidQuery("missing field `query`".to_string());

        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.to_string(), "Invalid query: missing field `query`");
    }
}
