//! Parameters accepted by each operation.
//!
//! These deserialize directly from the proxy's inbound query strings. Required
//! parameters are plain strings, so a missing one fails deserialization.
//! Values are not validated beyond that; the upstream service judges them.

use serde::Deserialize;

/// Parameters for [`Operation::Geocode`](crate::Operation::Geocode).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeocodeParams {
    /// Free text address to look up.
    pub address: String,
}

/// Parameters for [`Operation::NearbySearch`](crate::Operation::NearbySearch).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NearbySearchParams {
    /// `lat,lng` to search around.
    pub location: String,
    /// Search radius in meters.
    pub radius: String,
    /// Place type, such as `restaurant`.
    #[serde(rename = "type")]
    pub place_type: String,
    /// Only return places open now.
    pub opennow: Option<String>,
    /// Lowest price level, 0 to 4.
    pub minprice: Option<String>,
    /// Highest price level, 0 to 4.
    pub maxprice: Option<String>,
}

/// Parameters for [`Operation::TextSearch`](crate::Operation::TextSearch).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TextSearchParams {
    /// Free text search, such as `thai food in oakland`.
    pub query: String,
    /// `lat,lng` to bias results towards.
    pub location: Option<String>,
    /// Radius in meters to bias results towards.
    pub radius: Option<String>,
    /// Only return places open now.
    pub opennow: Option<String>,
    /// Lowest price level, 0 to 4.
    pub minprice: Option<String>,
    /// Highest price level, 0 to 4.
    pub maxprice: Option<String>,
}

/// Parameters for [`Operation::PlaceDetails`](crate::Operation::PlaceDetails).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlaceDetailsParams {
    /// The upstream identifier of the place.
    pub place_id: String,
    /// Comma separated list of fields to return.
    pub fields: String,
}
