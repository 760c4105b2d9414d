#![warn(missing_docs, clippy::missing_docs_in_private_items)]

//! A client for the upstream maps and places API.
//!
//! Every call made through [`MapsClient`] carries the server held credential,
//! which callers of the proxy never see. Inbound parameters are described by
//! one type per operation (such as [`GeocodeParams`]) and are turned into an
//! upstream query string by [`QueryBuilder`], which takes care of encoding.
//!
//! Upstream responses are not interpreted. As long as the body is valid JSON it
//! is handed back unchanged as an [`UpstreamBody`], even when the upstream
//! status code or the payload itself reports an error.

mod client;
mod error;
mod operation;
mod params;
mod query;

pub use crate::{
    client::{MapsClient, UpstreamBody},
    error::MapsError,
    operation::Operation,
    params::{GeocodeParams, NearbySearchParams, PlaceDetailsParams, TextSearchParams},
    query::QueryBuilder,
};
