//! The HTTP client for the upstream service.

use bytes::Bytes;
use serde::de::IgnoredAny;
use url::Url;
use waypoint_settings::{ApiKey, MapsSettings};

use crate::{
    GeocodeParams, MapsError, NearbySearchParams, Operation, PlaceDetailsParams, QueryBuilder,
    TextSearchParams,
};

/// User agent sent upstream.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Makes calls to the upstream service on behalf of proxy clients.
///
/// Cloning is cheap, and clones share a connection pool.
#[derive(Clone, Debug)]
pub struct MapsClient {
    /// Pooled HTTP client used for every call.
    http: reqwest::Client,
    /// Root that operation paths are resolved against.
    base_url: Url,
    /// Appended to every upstream URL.
    api_key: ApiKey,
    /// Country that geocoding is restricted to.
    region: String,
}

impl MapsClient {
    /// Build a client from settings.
    ///
    /// # Errors
    /// If no API key is configured, or the HTTP client can't be built.
    pub fn new(settings: &MapsSettings) -> Result<Self, MapsError> {
        if settings.api_key.is_empty() {
            return Err(MapsError::MissingCredential);
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(MapsError::Client)?;

        Ok(Self {
            http,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            region: settings.region.clone(),
        })
    }

    /// The upstream URL for a geocoding request.
    ///
    /// # Errors
    /// If the URL can't be built from the configured base URL.
    pub fn geocode_url(&self, params: &GeocodeParams) -> Result<Url, MapsError> {
        self.build_url(Operation::Geocode, |query| {
            query
                .text("address", &params.address)
                .value("components", &format!("country:{}", self.region));
        })
    }

    /// The upstream URL for a nearby search.
    ///
    /// # Errors
    /// If the URL can't be built from the configured base URL.
    pub fn nearby_search_url(&self, params: &NearbySearchParams) -> Result<Url, MapsError> {
        self.build_url(Operation::NearbySearch, |query| {
            query
                .value("location", &params.location)
                .value("radius", &params.radius)
                .value("type", &params.place_type)
                .optional("opennow", params.opennow.as_deref())
                .optional("minprice", params.minprice.as_deref())
                .optional("maxprice", params.maxprice.as_deref());
        })
    }

    /// The upstream URL for a text search.
    ///
    /// # Errors
    /// If the URL can't be built from the configured base URL.
    pub fn text_search_url(&self, params: &TextSearchParams) -> Result<Url, MapsError> {
        self.build_url(Operation::TextSearch, |query| {
            query
                .text("query", &params.query)
                .optional("location", params.location.as_deref())
                .optional("radius", params.radius.as_deref())
                .optional("opennow", params.opennow.as_deref())
                .optional("minprice", params.minprice.as_deref())
                .optional("maxprice", params.maxprice.as_deref());
        })
    }

    /// The upstream URL for a place details lookup.
    ///
    /// # Errors
    /// If the URL can't be built from the configured base URL.
    pub fn place_details_url(&self, params: &PlaceDetailsParams) -> Result<Url, MapsError> {
        self.build_url(Operation::PlaceDetails, |query| {
            query
                .value("place_id", &params.place_id)
                .value("fields", &params.fields);
        })
    }

    /// Geocode an address.
    ///
    /// # Errors
    /// If the upstream call fails or doesn't return JSON.
    pub async fn geocode(&self, params: &GeocodeParams) -> Result<UpstreamBody, MapsError> {
        self.fetch(Operation::Geocode, self.geocode_url(params)?)
            .await
    }

    /// Search for places near a location.
    ///
    /// # Errors
    /// If the upstream call fails or doesn't return JSON.
    pub async fn nearby_search(
        &self,
        params: &NearbySearchParams,
    ) -> Result<UpstreamBody, MapsError> {
        self.fetch(Operation::NearbySearch, self.nearby_search_url(params)?)
            .await
    }

    /// Search for places matching free text.
    ///
    /// # Errors
    /// If the upstream call fails or doesn't return JSON.
    pub async fn text_search(&self, params: &TextSearchParams) -> Result<UpstreamBody, MapsError> {
        self.fetch(Operation::TextSearch, self.text_search_url(params)?)
            .await
    }

    /// Look up one place.
    ///
    /// # Errors
    /// If the upstream call fails or doesn't return JSON.
    pub async fn place_details(
        &self,
        params: &PlaceDetailsParams,
    ) -> Result<UpstreamBody, MapsError> {
        self.fetch(Operation::PlaceDetails, self.place_details_url(params)?)
            .await
    }

    /// Resolve the operation's path and attach a query. The key always goes
    /// last.
    fn build_url<F>(&self, operation: Operation, write_query: F) -> Result<Url, MapsError>
    where
        F: FnOnce(&mut QueryBuilder),
    {
        let mut url = self.base_url.join(operation.path())?;
        let mut query = QueryBuilder::new();
        write_query(&mut query);
        query.value("key", self.api_key.expose());
        url.set_query(Some(&query.finish()));
        Ok(url)
    }

    /// Perform one GET and check that the body is JSON, whatever the upstream
    /// status code was.
    async fn fetch(&self, operation: Operation, url: Url) -> Result<UpstreamBody, MapsError> {
        tracing::debug!(r#type = "maps.request", %operation, "Calling upstream");

        let response = self.http.get(url).send().await.map_err(MapsError::request)?;
        let status = response.status();
        let body = response.bytes().await.map_err(MapsError::body)?;

        tracing::debug!(
            r#type = "maps.response",
            %operation,
            status = status.as_u16(),
            body_len = body.len(),
            "Upstream responded"
        );

        UpstreamBody::parse(body)
    }
}

/// A JSON body returned by the upstream service, kept as the exact bytes that
/// were received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamBody(Bytes);

impl UpstreamBody {
    /// Wrap `bytes` after checking that they hold a single JSON value.
    ///
    /// # Errors
    /// If `bytes` isn't valid JSON.
    pub fn parse(bytes: Bytes) -> Result<Self, MapsError> {
        serde_json::from_slice::<IgnoredAny>(&bytes).map_err(MapsError::InvalidJson)?;
        Ok(Self(bytes))
    }

    /// The raw body.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Take the raw body.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::{MapsClient, UpstreamBody};
    use crate::{
        GeocodeParams, MapsError, NearbySearchParams, PlaceDetailsParams, TextSearchParams,
    };
    use bytes::Bytes;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use waypoint_settings::{ApiKey, MapsSettings};

    fn settings(base_url: &str) -> MapsSettings {
        MapsSettings {
            base_url: base_url.parse().expect("valid base url"),
            api_key: ApiKey::new("secret-key"),
            region: "US".to_string(),
        }
    }

    fn client() -> MapsClient {
        MapsClient::new(&settings("https://maps.googleapis.com/maps/api/"))
            .expect("client should build")
    }

    #[test]
    fn geocode_url_encodes_the_address_and_restricts_the_region() {
        let url = client()
            .geocode_url(&GeocodeParams {
                address: "1600 Amphitheatre Parkway".to_string(),
            })
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://maps.googleapis.com/maps/api/geocode/json\
             ?address=1600%20Amphitheatre%20Parkway&components=country:US&key=secret-key"
        );
    }

    #[test]
    fn nearby_search_url_includes_only_supplied_optionals() {
        let url = client()
            .nearby_search_url(&NearbySearchParams {
                location: "37.4,-122.1".to_string(),
                radius: "500".to_string(),
                place_type: "restaurant".to_string(),
                opennow: Some("true".to_string()),
                ..NearbySearchParams::default()
            })
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://maps.googleapis.com/maps/api/place/nearbysearch/json\
             ?location=37.4,-122.1&radius=500&type=restaurant&opennow=true&key=secret-key"
        );
        assert!(!url.as_str().contains("minprice"));
        assert!(!url.as_str().contains("maxprice"));
    }

    #[test]
    fn nearby_search_url_with_every_optional() {
        let url = client()
            .nearby_search_url(&NearbySearchParams {
                location: "37.4,-122.1".to_string(),
                radius: "500".to_string(),
                place_type: "cafe".to_string(),
                opennow: Some("false".to_string()),
                minprice: Some("1".to_string()),
                maxprice: Some("3".to_string()),
            })
            .unwrap();

        assert_eq!(
            url.query(),
            Some(
                "location=37.4,-122.1&radius=500&type=cafe\
                 &opennow=false&minprice=1&maxprice=3&key=secret-key"
            )
        );
    }

    #[test]
    fn text_search_url_skips_empty_optionals() {
        let url = client()
            .text_search_url(&TextSearchParams {
                query: "thai food & drinks?".to_string(),
                location: Some("37.4,-122.1".to_string()),
                radius: Some(String::new()),
                maxprice: Some("2".to_string()),
                ..TextSearchParams::default()
            })
            .unwrap();

        assert_eq!(
            url.query(),
            Some(
                "query=thai%20food%20%26%20drinks%3F&location=37.4,-122.1\
                 &maxprice=2&key=secret-key"
            )
        );
    }

    #[test]
    fn place_details_url_forwards_ids_and_fields() {
        let url = client()
            .place_details_url(&PlaceDetailsParams {
                place_id: "ChIJN1t_tDeuEmsRUsoyG83frY4".to_string(),
                fields: "name,rating,formatted_phone_number".to_string(),
            })
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://maps.googleapis.com/maps/api/place/details/json\
             ?place_id=ChIJN1t_tDeuEmsRUsoyG83frY4&fields=name,rating,formatted_phone_number\
             &key=secret-key"
        );
    }

    #[test]
    fn inbound_values_cannot_replace_the_key() {
        let url = client()
            .place_details_url(&PlaceDetailsParams {
                place_id: "abc&key=attacker".to_string(),
                fields: "name".to_string(),
            })
            .unwrap();

        let keys: Vec<_> = url
            .query_pairs()
            .filter(|(name, _)| name == "key")
            .map(|(_, value)| value.into_owned())
            .collect();
        assert_eq!(keys, vec!["secret-key".to_string()]);
    }

    #[test]
    fn an_empty_key_is_rejected() {
        let mut settings = settings("https://maps.googleapis.com/maps/api/");
        settings.api_key = ApiKey::new("");

        assert!(matches!(
            MapsClient::new(&settings),
            Err(MapsError::MissingCredential)
        ));
    }

    #[test]
    fn upstream_body_rejects_non_json() {
        assert!(UpstreamBody::parse(Bytes::from_static(b"<html></html>")).is_err());
        assert!(UpstreamBody::parse(Bytes::new()).is_err());
        assert!(UpstreamBody::parse(Bytes::from_static(b"{\"a\": 1} trailing")).is_err());
        assert!(UpstreamBody::parse(Bytes::from_static(b"[1, 2]")).is_ok());
    }

    #[tokio::test]
    async fn fetch_relays_the_exact_body() {
        let server = MockServer::start_async().await;
        let body = "{ \"results\" : [],\n  \"status\" : \"ZERO_RESULTS\" }";
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/geocode/json")
                    .query_param("address", "10 Downing St")
                    .query_param("components", "country:US")
                    .query_param("key", "secret-key");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(body);
            })
            .await;
        let client = MapsClient::new(&settings(&server.url("/"))).unwrap();

        let response = client
            .geocode(&GeocodeParams {
                address: "10 Downing St".to_string(),
            })
            .await
            .expect("geocode should succeed");

        mock.assert_async().await;
        assert_eq!(response.as_bytes(), body.as_bytes());
    }

    #[tokio::test]
    async fn fetch_ignores_the_upstream_status() {
        let server = MockServer::start_async().await;
        let body = r#"{"error_message":"The provided API key is invalid.","status":"REQUEST_DENIED"}"#;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/place/details/json");
                then.status(403).body(body);
            })
            .await;
        let client = MapsClient::new(&settings(&server.url("/"))).unwrap();

        let response = client
            .place_details(&PlaceDetailsParams {
                place_id: "x".to_string(),
                fields: "name".to_string(),
            })
            .await
            .expect("upstream errors are still relayed");

        assert_eq!(response.into_bytes(), Bytes::from(body));
    }

    #[tokio::test]
    async fn fetch_fails_on_non_json() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/place/textsearch/json");
                then.status(200).body("Service Unavailable");
            })
            .await;
        let client = MapsClient::new(&settings(&server.url("/"))).unwrap();

        let result = client
            .text_search(&TextSearchParams {
                query: "pizza".to_string(),
                ..TextSearchParams::default()
            })
            .await;

        assert!(matches!(result, Err(MapsError::InvalidJson(_))));
    }

    #[tokio::test]
    async fn connection_errors_do_not_mention_the_key() {
        // Grab a free port, then close it so nothing is listening.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .and_then(|listener| listener.local_addr())
            .unwrap()
            .port();
        let client = MapsClient::new(&settings(&format!("http://127.0.0.1:{}/", port))).unwrap();

        let error = client
            .nearby_search(&NearbySearchParams {
                location: "1,2".to_string(),
                radius: "10".to_string(),
                place_type: "bar".to_string(),
                ..NearbySearchParams::default()
            })
            .await
            .expect_err("nothing is listening");

        assert!(matches!(error, MapsError::Request(_)));
        assert!(!format!("{}", error).contains("secret-key"));
        assert!(!format!("{:?}", error).contains("secret-key"));
    }
}
