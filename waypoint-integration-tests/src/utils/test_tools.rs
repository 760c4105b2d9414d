//! Tools for running tests

use httpmock::MockServer;
use reqwest::{redirect, Client, ClientBuilder, RequestBuilder};
use std::{future::Future, net::TcpListener};
use tracing::Instrument;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};
use url::Url;
use waypoint_settings::Settings;

/// Run a test with a fully configured Waypoint server.
///
/// The server will listen on a port assigned arbitrarily by the OS, and its
/// upstream maps service is an [`httpmock::MockServer`] with no mocks defined.
///
/// A suite of tools will be passed to the test function in the form of an
/// instance of [`TestingTools`]. It includes an HTTP client configured to use
/// the test server, and the mock upstream server.
///
/// # Example
///
/// ```no_run
/// # use waypoint_integration_tests::{waypoint_test, TestingTools};
/// #[actix_rt::test]
/// async fn a_test() {
///     waypoint_test(
///         |settings| settings.debug = false,
///         |TestingTools { test_client, upstream_mock, .. }| async move {
///             assert!(true) // Test goes here
///         }
///     ).await
/// }
/// ```
///
/// # Panics
/// May panic if tests could not be set up correctly.
pub async fn waypoint_test<FSettings, FTest, Fut>(
    settings_changer: FSettings,
    test: FTest,
) -> Fut::Output
where
    FSettings: FnOnce(&mut Settings),
    FTest: FnOnce(TestingTools) -> Fut,
    Fut: Future,
{
    let test_span = tracing::info_span!("waypoint_test");

    // Load settings
    let mut settings = Settings::load_for_tests();

    // Set up logging, shown only for failing tests
    let env_filter: EnvFilter = (&settings.logging.levels).into();
    let tracing_subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().compact().with_test_writer());
    let _tracing_subscriber_guard = tracing::subscriber::set_default(tracing_subscriber);

    // Set up a mock server for the upstream maps service
    let upstream_mock = MockServer::start_async().await;
    settings.maps.base_url = upstream_mock
        .url("/")
        .parse()
        .expect("mock server URL should parse");

    settings_changer(&mut settings);

    // Run server in the background
    let listener = TcpListener::bind(settings.http.listen).expect("Failed to bind to a port");
    let address = listener
        .local_addr()
        .expect("listener should have an address")
        .to_string();
    let server = waypoint_web::run(listener, settings).expect("Failed to start server");
    let server_handle = server.handle();
    tokio::spawn(server);
    let test_client = TestReqwestClient::new(address);

    // Assemble the tools
    let tools = TestingTools {
        test_client,
        upstream_mock,
    };

    // Run the test
    let rv = test(tools).instrument(test_span).await;
    server_handle.stop(false).await;
    rv
}

/// A base URL for the upstream service where nothing is listening, so every
/// upstream call fails to connect.
///
/// # Panics
/// If no local port can be reserved.
pub fn unreachable_base_url() -> Url {
    let port = TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .expect("could not reserve a port")
        .port();
    // The listener is dropped by now, so the port is closed.
    format!("http://127.0.0.1:{}/", port)
        .parse()
        .expect("valid URL")
}

/// A set of tools for tests: a client for the server under test, and the mock
/// upstream it talks to.
///
/// The fields of this struct are marked as non-exhaustive, meaning that any
/// destructuring of this struct will require a `..` "and the rest" entry, even
/// if all present items are named. This makes adding tools in the future easier,
/// since old tests won't need to be rewritten to account for the added tools.
#[non_exhaustive]
pub struct TestingTools {
    /// A wrapper around a [`reqwest::Client`] that automatically uses the Waypoint
    /// server under test.
    pub test_client: TestReqwestClient,

    /// The mock upstream maps service the server under test calls. It has no
    /// mock responses, so any needed must be added. Requests it can't match get
    /// a 404 response.
    pub upstream_mock: MockServer,
}

/// A wrapper around a [`reqwest::Client`] that automatically sends requests to
/// the test server.
///
/// This only handles `GET` requests right now, since that's all Waypoint
/// serves. The client is configured to not follow any redirects.
pub struct TestReqwestClient {
    /// The wrapped client.
    client: Client,

    /// The server address to implicitly use for all requests.
    address: String,
}

impl TestReqwestClient {
    /// Construct a new test client that uses `address` for every request given.
    pub fn new(address: String) -> Self {
        let client = ClientBuilder::new()
            .redirect(redirect::Policy::none())
            .build()
            .expect("Could not build test client");
        Self { client, address }
    }

    /// Start building a GET request to the test server with the path specified.
    ///
    /// The path should start with `/`, such as `/api/geocode?address=x`.
    pub fn get(&self, path: &str) -> RequestBuilder {
        assert!(path.starts_with('/'));
        let url = format!("http://{}{}", &self.address, path);
        self.client.get(url)
    }
}
