//! Place search and lookup.

use actix_web::{
    get,
    web::{Data, Query, ServiceConfig},
    HttpResponse,
};
use waypoint_maps::{
    MapsClient, NearbySearchParams, Operation, PlaceDetailsParams, TextSearchParams,
};

use super::relay;
use crate::errors::HandlerError;

/// Configure the place routes, under a scope such as `/api/places`.
pub fn configure(config: &mut ServiceConfig) {
    config
        .service(nearby_search)
        .service(text_search)
        .service(details);
}

/// Find places of a type within a radius of a location.
#[get("/nearbysearch")]
#[tracing::instrument(level = "debug", skip(params, client))]
async fn nearby_search(
    params: Query<NearbySearchParams>,
    client: Data<MapsClient>,
) -> Result<HttpResponse, HandlerError> {
    relay(Operation::NearbySearch, client.nearby_search(&params)).await
}

/// Find places matching free text, such as a cuisine.
#[get("/textsearch")]
#[tracing::instrument(level = "debug", skip(params, client))]
async fn text_search(
    params: Query<TextSearchParams>,
    client: Data<MapsClient>,
) -> Result<HttpResponse, HandlerError> {
    relay(Operation::TextSearch, client.text_search(&params)).await
}

/// Look up one place by id.
#[get("/details")]
#[tracing::instrument(level = "debug", skip(params, client))]
async fn details(
    params: Query<PlaceDetailsParams>,
    client: Data<MapsClient>,
) -> Result<HttpResponse, HandlerError> {
    relay(Operation::PlaceDetails, client.place_details(&params)).await
}
