//! # Collection Model
//!
//! Accumulates the shapes of issued requests: one scheme/host seeded on the
//! first add, a merged header set, and an empty placeholder per
//! `method -> path`. Displayed as pretty JSON in the collection tab.

use crate::repl::error::ReqlineError;
use crate::repl::models::RequestDraft;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Placeholder recorded for a discovered endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointEntry {}

/// path -> entry, for one method
pub type EndpointMap = BTreeMap<String, EndpointEntry>;

/// The accumulated collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub scheme: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// method -> path -> entry, serialized next to the fields above
    #[serde(flatten)]
    pub endpoints: BTreeMap<String, EndpointMap>,
}

/// Parts of the request target the collection keys on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub scheme: String,
    pub host: String,
    pub path: String,
}

impl RequestTarget {
    pub fn parse(url: &str) -> Result<Self, ReqlineError> {
        let parsed = Url::parse(url).map_err(|e| ReqlineError::parse(url, e))?;
        let host = match (parsed.host_str(), parsed.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        };
        Ok(Self {
            scheme: parsed.scheme().to_string(),
            host,
            path: parsed.path().to_string(),
        })
    }
}

impl Collection {
    pub fn seeded(target: &RequestTarget, headers: &HashMap<String, String>) -> Self {
        Self {
            name: String::new(),
            scheme: target.scheme.clone(),
            host: target.host.clone(),
            headers: headers.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            endpoints: BTreeMap::new(),
        }
    }

    /// Merge headers; later values overwrite earlier ones with the same name
    pub fn merge_headers(&mut self, headers: &HashMap<String, String>) {
        for (name, value) in headers {
            self.headers.insert(name.clone(), value.clone());
        }
    }

    /// Create the `method -> path` entry if missing; returns whether it was created
    pub fn ensure_endpoint(&mut self, method: &str, path: &str) -> bool {
        let paths = self.endpoints.entry(method.to_string()).or_default();
        if paths.contains_key(path) {
            return false;
        }
        paths.insert(path.to_string(), EndpointEntry::default());
        true
    }

    pub fn has_endpoint(&self, method: &str, path: &str) -> bool {
        self.endpoints
            .get(method)
            .is_some_and(|paths| paths.contains_key(path))
    }

    /// `scheme://host` the endpoints are relative to
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    pub fn to_pretty_json(&self) -> Result<String, ReqlineError> {
        serde_json::to_string_pretty(self).map_err(|e| ReqlineError::parse("collection", e))
    }

    /// Parse the text shown in the collection tab back into a collection
    pub fn from_json(text: &str) -> Result<Self, ReqlineError> {
        serde_json::from_str(text).map_err(|e| ReqlineError::parse("collection", e))
    }
}

/// Merge a draft into the collection, creating it on first use.
///
/// The URL is parsed before anything is touched, so a parse failure leaves
/// the collection exactly as it was.
pub fn accumulate(
    collection: &mut Option<Collection>,
    draft: &RequestDraft,
) -> Result<bool, ReqlineError> {
    let target = RequestTarget::parse(draft.url())?;

    let collection =
        collection.get_or_insert_with(|| Collection::seeded(&target, draft.headers()));
    collection.merge_headers(draft.headers());
    Ok(collection.ensure_endpoint(draft.method(), &target.path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(url: &str, method: &str, headers: &[(&str, &str)]) -> RequestDraft {
        let headers = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RequestDraft::new(url, method, headers, "")
    }

    #[test]
    fn first_add_should_seed_scheme_host_and_headers() {
        let mut collection = None;
        let created = accumulate(
            &mut collection,
            &draft("https://api.example.com:8443/v1/users?page=2", "GET", &[("Accept", "*/*")]),
        )
        .unwrap();

        let collection = collection.unwrap();
        assert!(created);
        assert_eq!(collection.scheme, "https");
        assert_eq!(collection.host, "api.example.com:8443");
        assert_eq!(collection.headers.get("Accept"), Some(&"*/*".to_string()));
        assert!(collection.has_endpoint("GET", "/v1/users"));
    }

    #[test]
    fn repeated_add_should_keep_entry_and_overwrite_headers() {
        let mut collection = None;
        accumulate(&mut collection, &draft("http://h/a", "GET", &[("X-Key", "one")])).unwrap();
        let before = collection.as_ref().unwrap().endpoints.clone();

        let created =
            accumulate(&mut collection, &draft("http://h/a", "GET", &[("X-Key", "two")])).unwrap();

        let collection = collection.unwrap();
        assert!(!created);
        assert_eq!(collection.endpoints, before);
        assert_eq!(collection.headers.get("X-Key"), Some(&"two".to_string()));
    }

    #[test]
    fn later_requests_should_not_reseed_host() {
        let mut collection = None;
        accumulate(&mut collection, &draft("http://first/a", "GET", &[])).unwrap();
        accumulate(&mut collection, &draft("https://second/b", "POST", &[])).unwrap();

        let collection = collection.unwrap();
        assert_eq!(collection.host, "first");
        assert!(collection.has_endpoint("POST", "/b"));
    }

    #[test]
    fn unparsable_url_should_leave_collection_untouched() {
        let mut collection = None;
        accumulate(&mut collection, &draft("http://h/a", "GET", &[("A", "1")])).unwrap();
        let before = collection.clone();

        let err = accumulate(&mut collection, &draft("not a url", "PUT", &[("A", "2")]))
            .unwrap_err();

        assert!(matches!(err, ReqlineError::Parse { .. }));
        assert_eq!(collection, before);
    }

    #[test]
    fn json_should_place_methods_beside_metadata() {
        let mut collection = None;
        accumulate(&mut collection, &draft("http://h/a", "GET", &[])).unwrap();
        let json = collection.unwrap().to_pretty_json().unwrap();

        assert_eq!(
            json,
            "{\n  \"name\": \"\",\n  \"scheme\": \"http\",\n  \"host\": \"h\",\n  \"headers\": {},\n  \"GET\": {\n    \"/a\": {}\n  }\n}"
        );
    }

    #[test]
    fn json_should_parse_back() {
        let mut collection = None;
        accumulate(&mut collection, &draft("http://h/a", "DELETE", &[("A", "1")])).unwrap();
        let collection = collection.unwrap();

        let parsed = Collection::from_json(&collection.to_pretty_json().unwrap()).unwrap();
        assert_eq!(parsed, collection);
    }
}
