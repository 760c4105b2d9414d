//! An actix-web service to introspect Waypoint if the `debug` setting is enabled.
//! The handlers here should all verify that debug is enabled.

use actix_web::{
    get,
    web::{self, Data},
    HttpResponse,
};
use waypoint_settings::Settings;

/// Handles debug endpoints.
pub fn configure(config: &mut web::ServiceConfig) {
    config.service(settings);
}

/// In debug mode, show the settings of the app. The API key is serialized in
/// redacted form.
#[get("/settings")]
async fn settings(settings: Data<Settings>) -> HttpResponse {
    if settings.debug {
        HttpResponse::Ok().json(settings.get_ref())
    } else {
        HttpResponse::NotFound().body("")
    }
}
