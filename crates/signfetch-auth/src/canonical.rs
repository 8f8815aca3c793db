//! Canonical request construction.
//!
//! The canonical request has the form:
//!
//! ```text
//! HTTPRequestMethod\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! CanonicalHeaders\n
//! \n
//! SignedHeaders\n
//! HashedPayload
//! ```
//!
//! Unlike general-purpose request signers, the signed header set here is fixed
//! (`content-type;host;x-content-sha256;x-date`) and does not depend on the
//! headers actually present on the outgoing request.

/// The signed header list as it appears in the canonical request and the
/// `Authorization` header.
pub const SIGNED_HEADERS: &str = "content-type;host;x-content-sha256;x-date";

/// Content type of every signed request body.
pub const CONTENT_TYPE: &str = "application/json";

/// Build the full canonical request string from its components.
///
/// `canonical_headers` must already end with a newline (see
/// [`build_canonical_headers`]); the blank line between the headers block and
/// the signed header list comes from that trailing newline plus the separator.
///
/// # Examples
///
/// ```
/// use signfetch_auth::canonical::{build_canonical_headers, build_canonical_request};
///
/// let headers = build_canonical_headers("example.com", "abc", "20210818T095729Z");
/// let canonical = build_canonical_request("POST", "/", "a=1", &headers, "abc");
/// assert!(canonical.starts_with("POST\n/\na=1\ncontent-type:application/json\n"));
/// assert!(canonical.ends_with("x-date:20210818T095729Z\n\ncontent-type;host;x-content-sha256;x-date\nabc"));
/// ```
#[must_use]
pub fn build_canonical_request(
    method: &str,
    path: &str,
    canonical_query: &str,
    canonical_headers: &str,
    payload_hash: &str,
) -> String {
    format!(
        "{method}\n{path}\n{canonical_query}\n{canonical_headers}\n{SIGNED_HEADERS}\n{payload_hash}"
    )
}

/// Build the canonical query string by sorting parameters by key.
///
/// Values are used raw, with no percent-encoding, and joined as `key=value`
/// with `&`. Parameters with equal keys keep their relative order.
///
/// # Examples
///
/// ```
/// use signfetch_auth::canonical::format_query;
///
/// assert_eq!(format_query([("b", "2"), ("a", "1")]), "a=1&b=2");
/// assert_eq!(format_query(Vec::<(String, String)>::new()), "");
/// ```
#[must_use]
pub fn format_query<K, V>(params: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut params: Vec<(K, V)> = params.into_iter().collect();
    params.sort_by(|(a, _), (b, _)| a.as_ref().cmp(b.as_ref()));

    params
        .iter()
        .map(|(k, v)| format!("{}={}", k.as_ref(), v.as_ref()))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the canonical headers block for the fixed signed header set.
///
/// Each header is emitted as `name:value\n`, so the result ends with a newline.
#[must_use]
pub fn build_canonical_headers(host: &str, payload_hash: &str, timestamp: &str) -> String {
    format!(
        "content-type:{CONTENT_TYPE}\nhost:{host}\nx-content-sha256:{payload_hash}\nx-date:{timestamp}\n"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_should_sort_query_parameters_by_key() {
        assert_eq!(format_query([("b", "2"), ("a", "1")]), "a=1&b=2");
        assert_eq!(
            format_query([("Version", "2022-08-31"), ("Action", "CVProcess")]),
            "Action=CVProcess&Version=2022-08-31"
        );
    }

    #[test]
    fn test_should_sort_uppercase_before_lowercase() {
        // Byte-wise ordering, not case-insensitive.
        assert_eq!(format_query([("a", "1"), ("B", "2")]), "B=2&a=1");
    }

    #[test]
    fn test_should_accept_btree_map_query() {
        let mut params = BTreeMap::new();
        params.insert("z".to_owned(), "26".to_owned());
        params.insert("m".to_owned(), "13".to_owned());
        assert_eq!(format_query(&params), "m=13&z=26");
    }

    #[test]
    fn test_should_preserve_raw_query_values() {
        assert_eq!(format_query([("q", "a b&c")]), "q=a b&c");
    }

    #[test]
    fn test_should_return_empty_for_empty_query() {
        assert_eq!(format_query(Vec::<(&str, &str)>::new()), "");
    }

    #[test]
    fn test_should_build_headers_in_fixed_order() {
        let headers = build_canonical_headers("visual.volcengineapi.com", "hash", "20210818T095729Z");
        assert_eq!(
            headers,
            "content-type:application/json\n\
             host:visual.volcengineapi.com\n\
             x-content-sha256:hash\n\
             x-date:20210818T095729Z\n"
        );
    }

    #[test]
    fn test_should_list_signed_headers_in_canonical_block_order() {
        let headers = build_canonical_headers("h", "p", "t");
        let names: Vec<&str> = headers
            .lines()
            .filter_map(|line| line.split_once(':').map(|(name, _)| name))
            .collect();
        assert_eq!(names.join(";"), SIGNED_HEADERS);
    }

    #[test]
    fn test_should_build_canonical_request_layout() {
        let headers = build_canonical_headers("h", "p", "t");
        let canonical = build_canonical_request("POST", "/", "a=1&b=2", &headers, "p");
        let expected = "POST\n\
                        /\n\
                        a=1&b=2\n\
                        content-type:application/json\n\
                        host:h\n\
                        x-content-sha256:p\n\
                        x-date:t\n\
                        \n\
                        content-type;host;x-content-sha256;x-date\n\
                        p";
        assert_eq!(canonical, expected);
    }
}
