//! Geocoding.

use actix_web::{
    get,
    web::{Data, Query, ServiceConfig},
    HttpResponse,
};
use waypoint_maps::{GeocodeParams, MapsClient, Operation};

use super::relay;
use crate::errors::HandlerError;

/// Configure the geocoding route.
pub fn configure(config: &mut ServiceConfig) {
    config.service(geocode);
}

/// Look up an address, restricted to the configured region.
#[get("/geocode")]
#[tracing::instrument(level = "debug", skip(params, client))]
async fn geocode(
    params: Query<GeocodeParams>,
    client: Data<MapsClient>,
) -> Result<HttpResponse, HandlerError> {
    relay(Operation::Geocode, client.geocode(&params)).await
}
