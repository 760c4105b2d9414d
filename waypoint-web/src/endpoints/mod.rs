//! Web handlers that proxy to the upstream maps service.

mod geocode;
mod places;

use std::future::Future;

use actix_web::{web, HttpResponse};
use waypoint_maps::{MapsError, Operation, UpstreamBody};

use crate::errors::HandlerError;

/// Configure the proxy routes, under a scope such as `/api`.
pub fn configure(config: &mut web::ServiceConfig) {
    config
        .configure(geocode::configure)
        .service(web::scope("/places").configure(places::configure));
}

/// Await an upstream call and turn its outcome into a response.
///
/// Every proxy route goes through here. A JSON body from upstream is returned
/// with a 200 status whatever status upstream used. Any failure is logged with
/// its cause and reported to the client only as the operation's fixed message.
async fn relay<F>(operation: Operation, upstream: F) -> Result<HttpResponse, HandlerError>
where
    F: Future<Output = Result<UpstreamBody, MapsError>>,
{
    match upstream.await {
        Ok(body) => Ok(HttpResponse::Ok()
            .content_type("application/json")
            .body(body.into_bytes())),
        Err(error) => {
            tracing::error!(
                r#type = "web.proxy.upstream-error",
                %operation,
                ?error,
                "Upstream call failed"
            );
            Err(HandlerError::Upstream(operation))
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use crate::{
        configure_app,
        test_utils::{settings_for_upstream, LogWatcher},
    };

    #[actix_rt::test]
    async fn failures_are_logged_without_the_key() {
        let upstream = MockServer::start_async().await;
        upstream
            .mock_async(|when, then| {
                when.method(GET).path("/place/details/json");
                then.status(502).body("<html>Bad Gateway</html>");
            })
            .await;
        let log_watcher = LogWatcher::default();
        let _guard = tracing::subscriber::set_default(log_watcher.subscriber());
        let app = test::init_service(
            App::new().configure(configure_app(settings_for_upstream(&upstream)).unwrap()),
        )
        .await;

        let request = test::TestRequest::get()
            .uri("/api/places/details?place_id=abc&fields=name")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body, json!({"error": "Failed to get place details"}));

        assert!(log_watcher.has(|event| {
            event.field_contains("message", "Upstream call failed")
                && event.field_contains("operation", "place-details")
                && event.field_contains("error", "InvalidJson")
        }));
        assert!(!log_watcher.raw().contains("test-api-key"));
    }

    #[actix_rt::test]
    async fn missing_required_parameters_never_reach_upstream() {
        let upstream = MockServer::start_async().await;
        let mock = upstream
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200).body("{}");
            })
            .await;
        let app = test::init_service(
            App::new().configure(configure_app(settings_for_upstream(&upstream)).unwrap()),
        )
        .await;

        for uri in [
            "/api/geocode",
            "/api/places/nearbysearch?location=1,2&radius=5",
            "/api/places/textsearch?location=1,2",
            "/api/places/details?place_id=abc",
        ] {
            let request = test::TestRequest::get().uri(uri).to_request();
            let response = test::call_service(&app, request).await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
            let body: Value = test::read_body_json(response).await;
            let message = body["error"].as_str().unwrap_or_default();
            assert!(message.starts_with("Invalid query: missing field"), "{}", message);
        }

        assert_eq!(mock.hits_async().await, 0);
    }
}
