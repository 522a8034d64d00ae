use std::fmt;

use dioxus::router::FromQuery;
use meem_shared::query;

/// Query string of a localized route, held as decoded pairs.
///
/// The router percent-decodes the whole query once before handing it over,
/// so a name containing `&` or `+` would be split apart if the query were
/// kept as plain text. `Display` escapes the delimiters one extra level to
/// survive that pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteQuery(Vec<(String, String)>);

impl RouteQuery {
    /// Parse an encoded `k=v&k2=v2` query, with or without a leading `?`.
    pub fn parse(encoded: &str) -> Self {
        Self(query::parse_query(encoded))
    }

    /// The query as `encodeURIComponent`-style text, without the `?`.
    pub fn encoded(&self) -> String {
        query::encode_query(&self.0)
    }
}

impl FromQuery for RouteQuery {
    fn from_query(query: &str) -> Self {
        Self::parse(query)
    }
}

impl fmt::Display for RouteQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let escaped = query::encode_query_delimiters(&self.0);
        f.write_str(&escaped.replace('%', "%25"))
    }
}
