//! The operations the upstream service provides.

use std::fmt;

/// One kind of upstream call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Turn an address into coordinates.
    Geocode,
    /// Search for places around a location.
    NearbySearch,
    /// Search for places matching free text.
    TextSearch,
    /// Look up the details of a single place.
    PlaceDetails,
}

impl Operation {
    /// The upstream path, relative to the configured base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Geocode => "geocode/json",
            Self::NearbySearch => "place/nearbysearch/json",
            Self::TextSearch => "place/textsearch/json",
            Self::PlaceDetails => "place/details/json",
        }
    }

    /// The message clients see when this operation fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Geocode => "Failed to geocode address",
            Self::NearbySearch => "Failed to search places",
            Self::TextSearch => "Failed to search places by text",
            Self::PlaceDetails => "Failed to get place details",
        }
    }

    /// A short name for logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Geocode => "geocode",
            Self::NearbySearch => "nearby-search",
            Self::TextSearch => "text-search",
            Self::PlaceDetails => "place-details",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
