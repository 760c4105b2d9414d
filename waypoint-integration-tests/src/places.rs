//! Tests the places proxies: nearby search, text search, and details.
#![cfg(test)]

use crate::{waypoint_test, TestingTools};
use anyhow::Result;
use httpmock::Method::GET;
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[actix_rt::test]
async fn nearby_search_forwards_supplied_options() -> Result<()> {
    waypoint_test(
        |_| (),
        |TestingTools {
             test_client,
             upstream_mock,
             ..
         }| async move {
            let mock = upstream_mock
                .mock_async(|when, then| {
                    when.method(GET)
                        .path("/place/nearbysearch/json")
                        .query_param("location", "37.4,-122.1")
                        .query_param("radius", "500")
                        .query_param("type", "restaurant")
                        .query_param("opennow", "true")
                        .query_param("key", "test-api-key");
                    then.status(200)
                        .json_body(json!({"results": [{"name": "Tacos"}], "status": "OK"}));
                })
                .await;

            let response = test_client
                .get("/api/places/nearbysearch?location=37.4,-122.1&radius=500&type=restaurant&opennow=true")
                .send()
                .await?;

            assert_eq!(response.status(), StatusCode::OK);
            let body: Value = response.json().await?;
            assert_eq!(body, json!({"results": [{"name": "Tacos"}], "status": "OK"}));
            mock.assert_async().await;

            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn nearby_search_forwards_price_range() -> Result<()> {
    waypoint_test(
        |_| (),
        |TestingTools {
             test_client,
             upstream_mock,
             ..
         }| async move {
            let mock = upstream_mock
                .mock_async(|when, then| {
                    when.method(GET)
                        .path("/place/nearbysearch/json")
                        .query_param("minprice", "1")
                        .query_param("maxprice", "3");
                    then.status(200).json_body(json!({"results": [], "status": "OK"}));
                })
                .await;

            let response = test_client
                .get("/api/places/nearbysearch?location=1,2&radius=50&type=cafe&minprice=1&maxprice=3")
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
async fn text_search_decodes_and_reencodes_the_query() -> Result<()> {
    waypoint_test(
        |_| (),
        |TestingTools {
             test_client,
             upstream_mock,
             ..
         }| async move {
            let mock = upstream_mock
                .mock_async(|when, then| {
                    when.method(GET)
                        .path("/place/textsearch/json")
                        .query_param("query", "fish & chips?")
                        .query_param("location", "51.5,-0.12")
                        .query_param("radius", "1000")
                        .query_param("key", "test-api-key");
                    then.status(200).json_body(json!({"results": [], "status": "OK"}));
                })
                .await;

            let response = test_client
                .get("/api/places/textsearch?query=fish%20%26%20chips%3F&location=51.5,-0.12&radius=1000")
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
async fn place_details_forwards_id_and_fields() -> Result<()> {
    waypoint_test(
        |_| (),
        |TestingTools {
             test_client,
             upstream_mock,
             ..
         }| async move {
            let mock = upstream_mock
                .mock_async(|when, then| {
                    when.method(GET)
                        .path("/place/details/json")
                        .query_param("place_id", "ChIJN1t_tDeuEmsRUsoyG83frY4")
                        .query_param("fields", "name,rating,formatted_phone_number")
                        .query_param("key", "test-api-key");
                    then.status(200)
                        .json_body(json!({"result": {"name": "Google", "rating": 4.5}, "status": "OK"}));
                })
                .await;

            let response = test_client
                .get("/api/places/details?place_id=ChIJN1t_tDeuEmsRUsoyG83frY4&fields=name,rating,formatted_phone_number")
                .send()
                .await?;

            assert_eq!(response.status(), StatusCode::OK);
            let body: Value = response.json().await?;
            assert_eq!(body["result"]["name"], json!("Google"));
            mock.assert_async().await;

            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn upstream_error_payloads_are_relayed_with_ok_status() -> Result<()> {
    waypoint_test(
        |_| (),
        |TestingTools {
             test_client,
             upstream_mock,
             ..
         }| async move {
            let body = r#"{"error_message":"You have exceeded your daily request quota for this API.","results":[],"status":"OVER_QUERY_LIMIT"}"#;
            upstream_mock
                .mock_async(|when, then| {
                    when.method(GET).path("/place/textsearch/json");
                    then.status(429).body(body);
                })
                .await;

            let response = test_client
                .get("/api/places/textsearch?query=coffee")
                .send()
                .await?;

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(response.text().await?, body);

            Ok(())
        },
    )
    .await
}
