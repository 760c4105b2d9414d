#![warn(missing_docs, clippy::missing_docs_in_private_items)]
// None of the tests are seen by the linter, so none of the utilities are marked
// as used. But docs don't generate for the below if they are `#[cfg(test)]`.
// This is a compromise.
#![allow(dead_code)]

//! Tests for Waypoint that work by reading from the external API only.
//!
//! Since the URL endpoints Waypoint exposes to the world are its public API, and
//! browser code depends on them, the paths used in tests here are important
//! details, and used to keep compatibility.
//!
//! This is structured as a separate crate so that it produces a single test
//! binary instead of one test per file like would happen if this were
//! `waypoint/tests/...`. This improves compilation and test times.
//!
//! The primary tool used by tests is [`waypoint_test`], which starts a mock
//! upstream maps service, sets up the application to talk to it, and then calls
//! the test function that is passed to it with a [`TestingTools`] argument.
//!
//! ```no_run
//! use waypoint_integration_tests::{waypoint_test, TestingTools};
//! use reqwest::StatusCode;
//!
//! #[actix_rt::test]
//! async fn lbheartbeat_works() {
//!     waypoint_test(
//!         |_| (),
//!         |TestingTools { test_client, .. }| async move {
//!             let response = test_client
//!                 .get("/__lbheartbeat__")
//!                 .send()
//!                 .await
//!                 .expect("failed to execute request");
//!
//!             assert_eq!(response.status(), StatusCode::OK);
//!         },
//!     )
//!     .await
//! }
//! ```

mod cors;
mod debug;
mod dockerflow;
mod failures;
mod geocode;
mod places;
mod utils;

pub use crate::utils::test_tools::{unreachable_base_url, waypoint_test, TestingTools};
