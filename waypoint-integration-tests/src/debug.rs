//! Tests the debug introspection routes.
#![cfg(test)]

use crate::{waypoint_test, TestingTools};
use anyhow::Result;
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::Value;

#[actix_rt::test]
async fn settings_are_hidden_when_debug_is_off() -> Result<()> {
    waypoint_test(
        |settings| settings.debug = false,
        |TestingTools { test_client, .. }| async move {
            let response = test_client.get("/debug/settings").send().await?;

            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert_eq!(response.text().await?, "");

            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn settings_redact_the_api_key() -> Result<()> {
    waypoint_test(
        |settings| settings.debug = true,
        |TestingTools { test_client, .. }| async move {
            let response = test_client.get("/debug/settings").send().await?;

            assert_eq!(response.status(), StatusCode::OK);
            let text = response.text().await?;
            assert!(!text.contains("test-api-key"), "{}", text);

            let body: Value = serde_json::from_str(&text)?;
            assert_eq!(body["debug"], Value::Bool(true));
            assert_eq!(body["maps"]["api_key"], Value::from("[redacted]"));
            assert_eq!(body["maps"]["region"], Value::from("US"));

            Ok(())
        },
    )
    .await
}
