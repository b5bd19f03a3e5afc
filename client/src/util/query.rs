//! Percent-encoding for redirect targets and form bodies.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters RFC 3986 allows unescaped in a query component, minus the
/// ones that would split or end it (`&`, `#`, `+`).
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'!')
    .remove(b'$')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b',')
    .remove(b';')
    .remove(b'=');

/// Encode a value for a URL query component.
///
/// `/empresa/acme/mis-turnos` survives unchanged as a `redirect` value.
/// `&`, `#`, `+`, `%`, whitespace and non-ASCII bytes are escaped.
#[must_use]
pub fn encode_query_value(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_VALUE).to_string()
}

/// Encode `application/x-www-form-urlencoded` fields.
#[must_use]
pub fn encode_form(fields: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}

/// Decode a query component: `%XX` escapes and `+` as space.
///
/// Malformed escapes are kept literally; invalid UTF-8 is replaced.
#[must_use]
pub fn decode_query_value(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

/// Split a query string (without the leading `?`) into decoded pairs.
#[must_use]
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_query_value(k), decode_query_value(v))
        })
        .collect()
}
