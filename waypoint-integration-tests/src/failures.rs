//! Tests that upstream failures turn into a fixed error message per route.
#![cfg(test)]

use crate::{unreachable_base_url, waypoint_test, TestingTools};
use anyhow::Result;
use httpmock::Method::GET;
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Each route, a request that satisfies it, and the message it fails with.
const ROUTES: [(&str, &str); 4] = [
    ("/api/geocode?address=somewhere", "Failed to geocode address"),
    (
        "/api/places/nearbysearch?location=1,2&radius=10&type=cafe",
        "Failed to search places",
    ),
    (
        "/api/places/textsearch?query=coffee",
        "Failed to search places by text",
    ),
    (
        "/api/places/details?place_id=abc&fields=name",
        "Failed to get place details",
    ),
];

#[actix_rt::test]
async fn non_json_upstream_bodies_are_server_errors() -> Result<()> {
    waypoint_test(
        |_| (),
        |TestingTools {
             test_client,
             upstream_mock,
             ..
         }| async move {
            upstream_mock
                .mock_async(|when, then| {
                    when.method(GET);
                    then.status(502)
                        .header("content-type", "text/html")
                        .body("<html><body>Bad Gateway</body></html>");
                })
                .await;

            for (path, message) in ROUTES {
                let response = test_client.get(path).send().await?;
                assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", path);
                let body: Value = response.json().await?;
                assert_eq!(body, json!({ "error": message }), "{}", path);
            }

            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn empty_upstream_bodies_are_server_errors() -> Result<()> {
    waypoint_test(
        |_| (),
        |TestingTools {
             test_client,
             upstream_mock,
             ..
         }| async move {
            upstream_mock
                .mock_async(|when, then| {
                    when.method(GET).path("/place/details/json");
                    then.status(200);
                })
                .await;

            let response = test_client
                .get("/api/places/details?place_id=abc&fields=name")
                .send()
                .await?;

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body: Value = response.json().await?;
            assert_eq!(body, json!({"error": "Failed to get place details"}));

            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn unreachable_upstream_is_a_server_error_without_the_key() -> Result<()> {
    waypoint_test(
        |settings| settings.maps.base_url = unreachable_base_url(),
        |TestingTools { test_client, .. }| async move {
            for (path, message) in ROUTES {
                let response = test_client.get(path).send().await?;
                assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", path);
                let body = response.text().await?;
                assert!(!body.contains("test-api-key"), "{}", body);
                let body: Value = serde_json::from_str(&body)?;
                assert_eq!(body, json!({ "error": message }), "{}", path);
            }

            Ok(())
        },
    )
    .await
}
