//! Tests the geocoding proxy.
#![cfg(test)]

use crate::{waypoint_test, TestingTools};
use anyhow::Result;
use httpmock::Method::GET;
use pretty_assertions::assert_eq;
use reqwest::StatusCode;

#[actix_rt::test]
async fn geocode_adds_region_and_key() -> Result<()> {
    waypoint_test(
        |_| (),
        |TestingTools {
             test_client,
             upstream_mock,
             ..
         }| async move {
            let body = r#"{"results":[{"formatted_address":"1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA"}],"status":"OK"}"#;
            let mock = upstream_mock
                .mock_async(|when, then| {
                    when.method(GET)
                        .path("/geocode/json")
                        .query_param("address", "1600 Amphitheatre Parkway")
                        .query_param("components", "country:US")
                        .query_param("key", "test-api-key");
                    then.status(200)
                        .header("content-type", "application/json")
                        .body(body);
                })
                .await;

            let response = test_client
                .get("/api/geocode?address=1600+Amphitheatre+Parkway")
                .send()
                .await?;

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                response.headers().get("content-type").unwrap(),
                "application/json"
            );
            assert_eq!(response.text().await?, body);
            mock.assert_async().await;

            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn geocode_uses_the_configured_region() -> Result<()> {
    waypoint_test(
        |settings| settings.maps.region = "CA".to_string(),
        |TestingTools {
             test_client,
             upstream_mock,
             ..
         }| async move {
            let mock = upstream_mock
                .mock_async(|when, then| {
                    when.method(GET)
                        .path("/geocode/json")
                        .query_param("components", "country:CA");
                    then.status(200).body(r#"{"results":[],"status":"ZERO_RESULTS"}"#);
                })
                .await;

            let response = test_client
                .get("/api/geocode?address=301%20Front%20St%20W%2C%20Toronto")
                .send()
                .await?;

            assert_eq!(response.status(), StatusCode::OK);
            mock.assert_async().await;

            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn geocode_without_an_address_is_rejected() -> Result<()> {
    waypoint_test(
        |_| (),
        |TestingTools {
             test_client,
             upstream_mock,
             ..
         }| async move {
            let mock = upstream_mock
                .mock_async(|when, then| {
                    when.method(GET).path("/geocode/json");
                    then.status(200).body("{}");
                })
                .await;

            let response = test_client.get("/api/geocode").send().await?;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body: serde_json::Value = response.json().await?;
            assert!(body["error"]
                .as_str()
                .unwrap_or_default()
                .contains("address"));
            assert_eq!(mock.hits_async().await, 0);

            Ok(())
        },
    )
    .await
}
