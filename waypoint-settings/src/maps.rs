//! Settings for the upstream maps and places service.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use url::Url;

/// Settings for the upstream maps service.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapsSettings {
    /// The root of the upstream API. Operation paths such as `geocode/json` are
    /// resolved relative to it, so it should end with a `/`.
    pub base_url: Url,

    /// The credential sent to the upstream service with every request.
    pub api_key: ApiKey,

    /// The country geocoding results are restricted to, as an ISO 3166-1
    /// alpha-2 code such as `US`.
    pub region: String,
}

/// The server held upstream credential.
///
/// Formatting this with `Debug` or serializing it never includes the key
/// itself, which keeps it out of logs and the debug settings view. The value
/// can only be read with [`ApiKey::expose`].
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

/// Text shown in place of the key.
const REDACTED: &str = "[redacted]";

impl ApiKey {
    /// Wrap a raw key.
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self(key.into())
    }

    /// The raw key, for building upstream requests.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether no key has been configured.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&REDACTED).finish()
    }
}

impl Serialize for ApiKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(REDACTED)
    }
}
