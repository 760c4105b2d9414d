//! Building upstream query strings.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in free text. This is what browsers escape in a URI
/// component, except that `'` is escaped as well since `url` would escape it
/// anyway.
const FREE_TEXT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'(')
    .remove(b')');

/// Characters escaped in structured values. Commas and colons appear in
/// coordinates, field lists and component filters, and are sent as they are.
const STRUCTURED: &AsciiSet = &FREE_TEXT.remove(b',').remove(b':');

/// Accumulates `name=value` pairs into a query string.
///
/// Every value is escaped so that it can't end its own pair early, so an
/// inbound value like `1&key=other` stays a single value upstream.
///
/// ```
/// use waypoint_maps::QueryBuilder;
///
/// let mut query = QueryBuilder::new();
/// query
///     .text("query", "pizza & beer")
///     .value("location", "37.4,-122.1")
///     .optional("radius", None);
/// assert_eq!(query.finish(), "query=pizza%20%26%20beer&location=37.4,-122.1");
/// ```
#[derive(Debug, Default)]
pub struct QueryBuilder {
    /// The query so far, without a leading `?`.
    query: String,
}

impl QueryBuilder {
    /// Start an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a free text value, such as an address or a search phrase.
    pub fn text(&mut self, name: &str, value: &str) -> &mut Self {
        self.push(name, value, FREE_TEXT)
    }

    /// Add a structured value, such as coordinates, a number or an identifier.
    pub fn value(&mut self, name: &str, value: &str) -> &mut Self {
        self.push(name, value, STRUCTURED)
    }

    /// Add a structured value only if it is present and not empty.
    pub fn optional(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(value) if !value.is_empty() => self.value(name, value),
            _ => self,
        }
    }

    /// The finished query string, without a leading `?`.
    pub fn finish(self) -> String {
        self.query
    }

    /// Append one pair, escaping both sides with `set`.
    fn push(&mut self, name: &str, value: &str, set: &'static AsciiSet) -> &mut Self {
        if !self.query.is_empty() {
            self.query.push('&');
        }
        self.query.extend(utf8_percent_encode(name, STRUCTURED));
        self.query.push('=');
        self.query.extend(utf8_percent_encode(value, set));
        self
    }
}
