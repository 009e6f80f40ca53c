use derive_builder::Builder;
use log::debug;
use reqwest::Url;
use serde_json::Value;

use crate::{
    api_interfaces::envelope,
    constants::*,
    error::GetError,
    metadata::Venues,
    search::SearchConditions,
    util::default_http_client,
    venue::Venue,
    ApiKey,
};

/// Venue lookup and search against the directory API.
///
/// Every call issues exactly one GET request and keeps no state between
/// calls, so a `Client` can be cloned and shared freely.
#[derive(Builder, Clone, Debug)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct Client {
    #[builder(default = "default_http_client()")]
    http_client: reqwest::Client,
    #[builder(default = "DEFAULT_BASE_URL.to_string()", setter(into))]
    base_url: String,
    api_key: ApiKey,
}

impl ClientBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(base_url) = &self.base_url {
            if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                return Err(format!(
                    "base URL `{}` must start with http:// or https://",
                    base_url
                ));
            }
            Url::parse(base_url)
                .map_err(|e| format!("base URL `{}` is invalid: {}", base_url, e))?;
        }
        Ok(())
    }
}

/// One venue id, or several to fetch in a single request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VenueIds {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for VenueIds {
    fn from(id: &str) -> Self {
        Self::One(id.to_string())
    }
}

impl From<String> for VenueIds {
    fn from(id: String) -> Self {
        Self::One(id)
    }
}

impl From<Vec<String>> for VenueIds {
    fn from(ids: Vec<String>) -> Self {
        Self::Many(ids)
    }
}

impl From<Vec<&str>> for VenueIds {
    fn from(ids: Vec<&str>) -> Self {
        Self::Many(ids.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for VenueIds {
    fn from(ids: &[&str]) -> Self {
        Self::Many(ids.iter().map(|id| id.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for VenueIds {
    fn from(ids: [&str; N]) -> Self {
        Self::Many(ids.iter().map(|id| id.to_string()).collect())
    }
}

/// Result of [`Client::find`], shaped after the ids that were asked for.
#[derive(Clone, Debug, PartialEq)]
pub enum Found {
    One(Venue),
    Many(Venues),
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Client against the default endpoint with the default HTTP client.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            http_client: default_http_client(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        }
    }

    /// Look up one venue or several.
    ///
    /// Returns `Ok(None)` when the provider answers with a non-success status
    /// or finds nothing.
    pub async fn find(&self, ids: impl Into<VenueIds>) -> Result<Option<Found>, GetError> {
        match ids.into() {
            VenueIds::One(id) => Ok(self.find_one(&id).await?.map(Found::One)),
            VenueIds::Many(ids) => Ok(self.find_many(&ids).await?.map(Found::Many)),
        }
    }

    /// Look up a single venue. The venue's `cache_expiry` is taken from the
    /// response metadata.
    pub async fn find_one(&self, id: &str) -> Result<Option<Venue>, GetError> {
        let Some(response) = self.lookup(id).await? else {
            return Ok(None);
        };
        let Some(body) = response.objects.unwrap_or_default().into_iter().next() else {
            return Ok(None);
        };
        let mut venue = Venue::from_json(&body)?;
        venue.cache_expiry = response.meta.and_then(|meta| meta.cache_expiry);
        Ok(Some(venue))
    }

    /// Look up several venues in one request.
    ///
    /// Ids the provider does not know are left out of the result and listed
    /// in [`Venues::not_found`].
    pub async fn find_many<S: AsRef<str>>(&self, ids: &[S]) -> Result<Option<Venues>, GetError> {
        if ids.is_empty() {
            return Ok(None);
        }
        let ids: Vec<&str> = ids.iter().map(|id| id.as_ref()).collect();
        let joined = ids.join(VENUE_ID_SEPARATOR);
        let Some(response) = self.lookup(&joined).await? else {
            return Ok(None);
        };
        let not_found = response.not_found.unwrap_or_default();
        if !not_found.is_empty() {
            debug!("venues not found: {}", not_found.join(", "));
        }
        let venues = response
            .objects
            .unwrap_or_default()
            .iter()
            .map(Venue::from_json)
            .collect::<Result<Vec<_>, _>>()?;
        let meta = response.meta.unwrap_or_default();
        Ok(Some(Venues::new(venues, meta).with_not_found(not_found)))
    }

    /// Search for venues matching the given conditions.
    ///
    /// The response status is not inspected; an error page surfaces as a
    /// parse error.
    pub async fn search(&self, conditions: &SearchConditions) -> Result<Venues, GetError> {
        let url = self.url(&[VENUE_PATH, SEARCH_PATH])?;
        debug!("GET {}", url);
        let response = self
            .http_client
            .get(url)
            .query(&conditions.query_pairs())
            .query(&self.auth_query())
            .send()
            .await?;
        let body = response.text().await.map_err(GetError::ResponseBodyError)?;
        let parsed = envelope::parse(&body)?;
        let venues = parsed
            .objects
            .ok_or(GetError::MissingObjects)?
            .iter()
            .map(Venue::from_json)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Venues::new(venues, parsed.meta.unwrap_or_default()))
    }

    /// Search with conditions given as a JSON object.
    pub async fn search_json(&self, conditions: &Value) -> Result<Venues, GetError> {
        let conditions = SearchConditions::try_from(conditions)?;
        self.search(&conditions).await
    }

    /// Fetch the envelope for `ids`, or `None` on a non-success status or an
    /// empty `objects` list.
    async fn lookup(&self, ids: &str) -> Result<Option<envelope::Response>, GetError> {
        let url = self.url(&[VENUE_PATH, ids])?;
        debug!("GET {}", url);
        let response = self
            .http_client
            .get(url)
            .query(&self.auth_query())
            .send()
            .await?;
        if !response.status().is_success() {
            debug!("lookup of {} answered {}", ids, response.status());
            return Ok(None);
        }
        let body = response.text().await.map_err(GetError::ResponseBodyError)?;
        let parsed = envelope::parse(&body)?;
        let has_objects = parsed
            .objects
            .as_ref()
            .is_some_and(|objects| !objects.is_empty());
        Ok(has_objects.then_some(parsed))
    }

    /// `base/segment/.../` with every segment percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url, GetError> {
        let invalid = || GetError::InvalidBaseUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }

    fn auth_query(&self) -> [(&str, &str); 2] {
        [
            (API_KEY_PARAM, self.api_key.get()),
            (FORMAT_PARAM, FORMAT_JSON),
        ]
    }
}
