use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    deserializers::{lenient_string, lenient_u64},
    venue::Venue,
};

/// Pagination and cache hints from a response's `meta` object.
///
/// Fields of the wrong type are read as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueSearchMetadata {
    #[serde(rename = "cache-expiry", deserialize_with = "lenient_u64")]
    pub cache_expiry: Option<u64>,
    #[serde(deserialize_with = "lenient_u64")]
    pub limit: Option<u64>,
    #[serde(deserialize_with = "lenient_string")]
    pub next: Option<String>,
    #[serde(deserialize_with = "lenient_u64")]
    pub offset: Option<u64>,
    #[serde(deserialize_with = "lenient_string")]
    pub previous: Option<String>,
    #[serde(deserialize_with = "lenient_u64")]
    pub total_count: Option<u64>,
}

/// Venues returned by a search or multi-venue lookup, with the response metadata.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Venues {
    venues: Vec<Venue>,
    meta: VenueSearchMetadata,
    not_found: Vec<String>,
}

impl Venues {
    pub fn new(venues: Vec<Venue>, meta: VenueSearchMetadata) -> Self {
        Self {
            venues,
            meta,
            not_found: Vec::new(),
        }
    }

    /// Attach the ids the provider reported as unknown.
    pub fn with_not_found(mut self, not_found: Vec<String>) -> Self {
        self.not_found = not_found;
        self
    }

    pub fn meta(&self) -> &VenueSearchMetadata {
        &self.meta
    }

    pub fn not_found(&self) -> &[String] {
        &self.not_found
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Venue> {
        self.venues.iter()
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    /// `{"meta": {...}, "objects": [venue.to_hash(), ...]}`
    pub fn to_hash(&self) -> Value {
        json!({
            "meta": self.meta,
            "objects": self.venues.iter().map(Venue::to_hash).collect::<Vec<_>>(),
        })
    }
}

impl IntoIterator for Venues {
    type Item = Venue;
    type IntoIter = std::vec::IntoIter<Venue>;

    fn into_iter(self) -> Self::IntoIter {
        self.venues.into_iter()
    }
}

impl<'a> IntoIterator for &'a Venues {
    type Item = &'a Venue;
    type IntoIter = std::slice::Iter<'a, Venue>;

    fn into_iter(self) -> Self::IntoIter {
        self.venues.iter()
    }
}
