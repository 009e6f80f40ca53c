use serde::Deserialize;
use serde_json::Value;

use crate::{
    deserializers::{lenient, lenient_list},
    metadata::VenueSearchMetadata,
    util::strip_callback,
};

// Request structure is omitted since every request is a plain GET with query parameters.

/// Raw response envelope from API.
///
/// Venue bodies are kept as untyped JSON so each one is translated on its own.
/// A `meta` object that is not an object at all is dropped.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct Response {
    #[serde(deserialize_with = "lenient")]
    pub meta: Option<VenueSearchMetadata>,
    pub objects: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient_list")]
    pub not_found: Option<Vec<String>>,
}

/// Decode a response body, unwrapping a `callback(...)` wrapper if one is present.
pub fn parse(body: &str) -> Result<Response, serde_json::Error> {
    serde_json::from_str(strip_callback(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_envelope() {
        let body = r#"{"meta": {"cache-expiry": 3600}, "not_found": ["bogus"], "objects": [{"id": "a"}]}"#;
        let response = parse(body).unwrap();
        assert_eq!(response.meta.unwrap().cache_expiry, Some(3600));
        assert_eq!(response.objects.unwrap().len(), 1);
        assert_eq!(response.not_found.unwrap(), vec!["bogus".to_string()]);
    }

    #[test]
    fn parse_wrapped_envelope() {
        let body = r#"locu_cb_1({"meta": {}, "objects": []})"#;
        let response = parse(body).unwrap();
        assert!(response.objects.unwrap().is_empty());
    }

    #[test]
    fn parse_missing_keys() {
        let response = parse("{}").unwrap();
        assert!(response.meta.is_none());
        assert!(response.objects.is_none());
        assert!(response.not_found.is_none());
    }

    #[test]
    fn parse_tolerates_mistyped_meta() {
        let body = r#"{"meta": {"limit": "25", "cache-expiry": 3600.0, "next": 7}, "objects": [{"id": "a"}]}"#;
        let response = parse(body).unwrap();
        let meta = response.meta.unwrap();
        assert_eq!(meta.limit, Some(25));
        assert_eq!(meta.cache_expiry, Some(3600));
        assert_eq!(meta.next.as_deref(), Some("7"));
        assert_eq!(response.objects.unwrap().len(), 1);

        let response = parse(r#"{"meta": "none", "objects": []}"#).unwrap();
        assert!(response.meta.is_none());
    }

    #[test]
    fn parse_garbage_is_error() {
        assert!(parse("<html>Bad Gateway</html>").is_err());
        assert!(parse("").is_err());
    }
}
