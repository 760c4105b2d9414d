//! Tests that Waypoint conforms to [Dockerflow](https://github.com/mozilla-services/dockerflow).
#![cfg(test)]

use crate::{waypoint_test, TestingTools};
use anyhow::Result;
use pretty_assertions::assert_eq;
use reqwest::{header::CONTENT_LENGTH, StatusCode};
use serde::Deserialize;
use serde_json::Value;

#[actix_rt::test]
async fn lbheartbeat_works() -> Result<()> {
    waypoint_test(
        |_| (),
        |TestingTools { test_client, .. }| async move {
            let response = test_client.get("/__lbheartbeat__").send().await?;

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                response
                    .headers()
                    .get(CONTENT_LENGTH)
                    .map(|value| value.as_bytes()),
                Some("0".as_bytes())
            );

            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn heartbeat_works() -> Result<()> {
    waypoint_test(
        |_| (),
        |TestingTools { test_client, .. }| async move {
            let response = test_client.get("/__heartbeat__").send().await?;

            assert_eq!(response.status(), StatusCode::OK);
            let body: Value = response.json().await?;
            assert!(body["version"].is_string());

            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn version_works() -> Result<()> {
    waypoint_test(
        |_| (),
        |TestingTools { test_client, .. }| async move {
            let response = test_client.get("/__version__").send().await?;

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                response
                    .headers()
                    .get("content-type")
                    .map(|value| value.as_bytes()),
                Some("application/json".as_bytes())
            );
            let body: VersionInfo = response.json().await?;
            assert!(!body.source.is_empty());

            Ok(())
        },
    )
    .await
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct VersionInfo {
    source: String,
    version: String,
    commit: String,
    build: String,
}
