//! An actix-web service to implement [Dockerflow](https://github.com/mozilla-services/Dockerflow).

use std::collections::HashMap;

use actix_web::{get, web, HttpResponse};
use serde_json::Value;

/// Handles required Dockerflow Endpoints.
pub fn configure(config: &mut web::ServiceConfig) {
    config
        .service(lbheartbeat)
        .service(heartbeat)
        .service(version);
}

/// Used by the load balancer to indicate that the server can respond to
/// requests. Should just return OK.
#[get("/__lbheartbeat__")]
async fn lbheartbeat() -> HttpResponse {
    HttpResponse::Ok().body("")
}

/// Return the contents of the `version.json` file written at build time (or
/// the placeholder stored in the Git repo).
#[get("/__version__")]
async fn version() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/json")
        .body(include_str!("../version.json"))
}

/// Returns a status message indicating the current state of the server.
///
/// Waypoint has no backing services of its own, and the upstream is not
/// checked here since each check would spend quota.
#[get("/__heartbeat__")]
async fn heartbeat() -> HttpResponse {
    let mut checklist = HashMap::new();
    checklist.insert(
        "version".to_owned(),
        Value::String(env!("CARGO_PKG_VERSION").to_owned()),
    );
    HttpResponse::Ok().json(checklist)
}
