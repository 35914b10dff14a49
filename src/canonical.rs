//! Canonicalization functionality for signature generation.
//!
//! This includes the ordered header set that is signed, the path and query-string encoding used
//! in the request target, and the string-to-sign itself.
//!
//! **Stability of this module is not guaranteed except for items exposed at the crate root**.
//! The functions and types are subject to change in minor/patch versions. This is exposed for
//! testing purposes only.

use {
    crate::constants::REQUEST_TARGET,
    http::Method,
    log::trace,
    percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC},
    qualifier_attr::qualifiers,
};

/// Characters that are percent-encoded in a single path segment: everything except ASCII
/// alphanumerics and the RFC 3986 unreserved marks `-._~`.
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Characters that are percent-encoded in a path: as for a segment, but `/` is kept.
const PATH_ENCODE_SET: &AsciiSet = &PATH_SEGMENT_ENCODE_SET.remove(b'/');

/// Characters that are percent-encoded in query keys and values: everything except ASCII
/// alphanumerics, the RFC 3986 unreserved marks `-._~`, and `/`.
const QUERY_ENCODE_SET: &AsciiSet = PATH_ENCODE_SET;

/// An ordered set of headers to sign.
///
/// Iteration order is insertion order. The same order is used for the string to sign, for the
/// `headers="..."` list in the Authorization header, and for the order the headers are sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderSet {
    headers: Vec<(String, String)>,
}

impl HeaderSet {
    /// Create an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header. If a header with the same name (compared case-insensitively) is already
    /// present, its value is replaced and it keeps its original position.
    pub fn insert<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        let value = value.into();

        match self.headers.iter_mut().find(|(existing, _)| existing.eq_ignore_ascii_case(&name)) {
            Some((_, existing_value)) => *existing_value = value,
            None => self.headers.push((name, value)),
        }
    }

    /// Retrieve the value of a header, compared case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(existing, _)| existing.eq_ignore_ascii_case(name)).map(|(_, value)| value.as_str())
    }

    /// Iterate over `(name, value)` pairs in insertion order. Names are returned as inserted.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// The lower-cased header names, in insertion order.
    pub fn signed_header_names(&self) -> Vec<String> {
        self.headers.iter().map(|(name, _)| name.to_lowercase()).collect()
    }

    /// The number of headers in the set.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Indicates whether the set is empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderSet
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut result = HeaderSet::new();
        for (name, value) in iter {
            result.insert(name, value);
        }
        result
    }
}

/// Build the request target, `"<METHOD> <path-and-query>"`. The method is rendered as-is; it is
/// lower-cased along with the rest of the target when the string to sign is built.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn request_target(method: &Method, path_and_query: &str) -> String {
    format!("{} {}", method.as_str(), path_and_query)
}

/// Build the string to sign.
///
/// ```text
/// (request-target): <lower-cased request target>
/// <lower-cased header name>: <header value>
/// ...
/// ```
///
/// Lines are joined with `\n`; there is no trailing newline. Header values are not altered.
pub fn string_to_sign(request_target: &str, headers: &HeaderSet) -> String {
    let mut lines = Vec::with_capacity(headers.len() + 1);
    lines.push(format!("{}: {}", REQUEST_TARGET, request_target.to_lowercase()));

    for (name, value) in headers.iter() {
        lines.push(format!("{}: {}", name.to_lowercase(), value));
    }

    let result = lines.join("\n");
    trace!("String to sign:\n{}", result);
    result
}

/// Percent-encode a resource path, keeping `/` as the segment separator. The result contains only
/// ASCII alphanumerics, `-._~/` and `%XX` escapes, so no HTTP stack re-encodes it on the wire.
pub fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, PATH_ENCODE_SET).to_string()
}

/// Percent-encode a single path segment; `/` is escaped as `%2F`.
pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT_ENCODE_SET).to_string()
}

/// Percent-encode a single query key or value, leaving `/` unescaped. Spaces become `%20`.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn encode_query_element(element: &str) -> String {
    utf8_percent_encode(element, QUERY_ENCODE_SET).to_string()
}

/// Encode query parameters as `key=value` pairs joined by `&`, in the order given. Returns an
/// empty string (no leading `?`) when there are no parameters.
pub fn encode_query<K, V>(params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    params
        .iter()
        .map(|(key, value)| {
            format!("{}={}", encode_query_element(key.as_ref()), encode_query_element(value.as_ref()))
        })
        .collect::<Vec<String>>()
        .join("&")
}
