//! Tests that browsers on any origin may call the proxy.
#![cfg(test)]

use crate::{waypoint_test, TestingTools};
use anyhow::Result;
use httpmock::Method::GET;
use pretty_assertions::assert_eq;
use reqwest::{header, StatusCode};

#[actix_rt::test]
async fn cross_origin_requests_are_allowed() -> Result<()> {
    waypoint_test(
        |_| (),
        |TestingTools {
             test_client,
             upstream_mock,
             ..
         }| async move {
            upstream_mock
                .mock_async(|when, then| {
                    when.method(GET).path("/geocode/json");
                    then.status(200).body(r#"{"results":[],"status":"OK"}"#);
                })
                .await;

            let response = test_client
                .get("/api/geocode?address=somewhere")
                .header(header::ORIGIN, "https://app.example.com")
                .send()
                .await?;

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                response
                    .headers()
                    .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                    .map(|value| value.as_bytes()),
                Some("https://app.example.com".as_bytes())
            );

            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn error_responses_carry_cors_headers() -> Result<()> {
    waypoint_test(
        |_| (),
        |TestingTools { test_client, .. }| async move {
            let response = test_client
                .get("/api/places/details")
                .header(header::ORIGIN, "https://app.example.com")
                .send()
                .await?;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert!(response
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));

            Ok(())
        },
    )
    .await
}
