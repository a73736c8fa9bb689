//! Subscription descriptor: the (path, filter set) pair defining what the
//! subscription currently requests, plus stream URL construction.

use crate::types::Filter;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Refresh cadence hint sent to the backend in the `poll` query parameter.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Characters escaped in filter values. Everything non-alphanumeric except
/// `- _ . ! ~ * ' ( )`, matching JavaScript's `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Immutable-per-version subscription target. Mutated only by replacement.
///
/// Two descriptors are equivalent iff their paths are equal and their filter
/// sequences are equal element-wise in order; order affects the generated
/// query string, so it must be reproduced exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriptionDescriptor {
    /// Normalized content path.
    pub path: String,
    /// Ordered filter set, encoded into the URL at connection-open time.
    pub filters: Vec<Filter>,
}

impl SubscriptionDescriptor {
    /// Build a descriptor, normalizing the path.
    pub fn new(path: &str, filters: Vec<Filter>) -> Self {
        Self {
            path: normalize_path(path),
            filters,
        }
    }

    /// Build the server-push stream URL for this descriptor.
    pub fn stream_url(&self, api_base: &str, poll_interval_secs: u64) -> String {
        format!(
            "{}/api/v1/content/{}?poll={}{}",
            api_base,
            self.path,
            poll_interval_secs,
            filter_query(&self.filters)
        )
    }
}

/// Append a trailing slash to namespace-scoped paths that lack one.
///
/// The backend's path grammar treats `namespace/X` and `namespace/X/` as
/// distinct route keys, and callers may supply either.
pub fn normalize_path(path: &str) -> String {
    if path.contains("namespace/") && !path.ends_with('/') {
        format!("{}/", path)
    } else {
        path.to_string()
    }
}

/// `&filter=` query suffix, one parameter per filter in order, each value
/// percent-encoded as `key:value`. Empty when there are no filters.
fn filter_query(filters: &[Filter]) -> String {
    if filters.is_empty() {
        return String::new();
    }

    let joined = filters
        .iter()
        .map(|f| {
            let composed = format!("{}:{}", f.key, f.value);
            format!("filter={}", utf8_percent_encode(&composed, COMPONENT))
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("&{}", joined)
}
