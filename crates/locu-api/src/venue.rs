use chrono::{DateTime, NaiveDateTime};
use log::warn;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::{api_interfaces::venue, error::VenueError, hours::OpenHours, menu::Menu};

/// Timestamp layout of `last_updated`, e.g. `2012-07-20T13:59:15.819543`.
/// The fractional seconds are optional.
const LAST_UPDATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// `last_updated` as the provider sent it, with the timestamp it denotes
/// when that could be read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LastUpdated {
    raw: String,
    parsed: Option<NaiveDateTime>,
}

impl LastUpdated {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = parse_last_updated(&raw);
        Self { raw, parsed }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.parsed
    }
}

/// A place record returned by the directory.
///
/// Attributes missing from the feed are `None`. `menus` is empty, never
/// absent, whenever the venue reports no menu.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Venue {
    pub id: Option<String>,
    pub name: Option<String>,
    pub website_url: Option<String>,
    pub has_menu: bool,
    pub menus: Vec<Menu>,
    pub last_updated: Option<LastUpdated>,
    /// Seconds until the provider considers this record stale. Only set on
    /// single-venue lookups.
    pub cache_expiry: Option<u64>,
    pub resource_uri: Option<String>,
    pub street_address: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub open_hours: OpenHours,
    pub phone: Option<String>,
    pub facebook_url: Option<String>,
    pub twitter_id: Option<String>,
    pub factual_id: Option<String>,
}

impl Venue {
    /// Build a venue from one entry of a response's `objects` list.
    pub fn from_json(body: &Value) -> Result<Self, VenueError> {
        let raw = venue::Venue::deserialize(body)?;
        Self::try_from(raw)
    }

    /// Flatten back into a plain JSON object.
    ///
    /// Scalar attributes keep their provider names. `menus` is a list of
    /// [`Menu::to_hash`] objects when the venue has a menu and an empty
    /// object otherwise.
    pub fn to_hash(&self) -> Value {
        let mut hash = Map::new();
        hash.insert("id".to_string(), json!(self.id));
        hash.insert("name".to_string(), json!(self.name));
        hash.insert("website_url".to_string(), json!(self.website_url));
        hash.insert("has_menu".to_string(), json!(self.has_menu));
        hash.insert(
            "last_updated".to_string(),
            json!(self.last_updated.as_ref().map(LastUpdated::as_str)),
        );
        hash.insert("cache_expiry".to_string(), json!(self.cache_expiry));
        hash.insert("resource_uri".to_string(), json!(self.resource_uri));
        hash.insert("street_address".to_string(), json!(self.street_address));
        hash.insert("locality".to_string(), json!(self.locality));
        hash.insert("region".to_string(), json!(self.region));
        hash.insert("postal_code".to_string(), json!(self.postal_code));
        hash.insert("country".to_string(), json!(self.country));
        hash.insert("lat".to_string(), json!(self.lat));
        hash.insert("long".to_string(), json!(self.long));
        hash.insert("phone".to_string(), json!(self.phone));
        hash.insert("facebook_url".to_string(), json!(self.facebook_url));
        hash.insert("twitter_id".to_string(), json!(self.twitter_id));
        hash.insert("factual_id".to_string(), json!(self.factual_id));
        hash.insert("open_hours".to_string(), self.open_hours.to_hash());
        let menus = if self.has_menu {
            Value::Array(self.menus.iter().map(Menu::to_hash).collect())
        } else {
            Value::Object(Map::new())
        };
        hash.insert("menus".to_string(), menus);
        Value::Object(hash)
    }
}

impl TryFrom<venue::Venue> for Venue {
    type Error = VenueError;

    fn try_from(raw: venue::Venue) -> Result<Self, VenueError> {
        let has_menu = raw.has_menu.unwrap_or(false);
        let menus = match raw.menus {
            Some(menus) if has_menu => menus
                .into_iter()
                .map(Menu::try_from)
                .collect::<Result<_, _>>()?,
            _ => Vec::new(),
        };
        Ok(Self {
            id: raw.id,
            name: raw.name,
            website_url: raw.website_url,
            has_menu,
            menus,
            last_updated: raw.last_updated.map(LastUpdated::parse),
            cache_expiry: None,
            resource_uri: raw.resource_uri,
            street_address: raw.street_address,
            locality: raw.locality,
            region: raw.region,
            postal_code: raw.postal_code,
            country: raw.country,
            lat: raw.lat,
            long: raw.long,
            open_hours: OpenHours::from_raw(raw.open_hours.unwrap_or_default()),
            phone: raw.phone,
            facebook_url: raw.facebook_url,
            twitter_id: raw.twitter_id,
            factual_id: raw.factual_id,
        })
    }
}

fn parse_last_updated(raw: &str) -> Option<NaiveDateTime> {
    let parsed = NaiveDateTime::parse_from_str(raw, LAST_UPDATED_FORMAT).or_else(|_| {
        DateTime::parse_from_rfc3339(raw).map(|timestamp| timestamp.naive_utc())
    });
    match parsed {
        Ok(timestamp) => Some(timestamp),
        Err(e) => {
            warn!("ignoring unparseable last_updated `{}`: {}", raw, e);
            None
        }
    }
}
