use serde_json::{Number, Value};
use thiserror::Error;

use crate::constants::{API_KEY_PARAM, FORMAT_PARAM};

/// Condition name encoded as `"lat,long"`.
const LOCATION: &str = "location";
/// Condition name encoded as `"<lat1><long1>|<lat2>,<long2>"`.
const BOUNDS: &str = "bounds";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchConditionsError {
    #[error("search conditions should be passed as a mapping, got {0}")]
    NotAMapping(&'static str),
}

/// Filters for a venue search, already encoded as query parameters.
///
/// Insertion order is kept; setting a condition twice replaces the earlier value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchConditions(Vec<(String, String)>);

impl SearchConditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(self, lat: f64, long: f64) -> Self {
        let encoded = format!("{},{}", coordinate(lat), coordinate(long));
        self.filter(LOCATION, encoded)
    }

    // The provider expects the first corner with no separator between its
    // latitude and longitude.
    pub fn bounds(self, lat1: f64, long1: f64, lat2: f64, long2: f64) -> Self {
        let encoded = format!(
            "{}{}|{},{}",
            coordinate(lat1),
            coordinate(long1),
            coordinate(lat2),
            coordinate(long2)
        );
        self.filter(BOUNDS, encoded)
    }

    pub fn filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Query pairs to send, leaving out anything that would clash with the
    /// API key or response format parameters.
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        self.0
            .iter()
            .filter(|(name, _)| name != API_KEY_PARAM && name != FORMAT_PARAM)
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect()
    }
}

impl TryFrom<&Value> for SearchConditions {
    type Error = SearchConditionsError;

    /// Accepts a JSON object. A `location` array and a `bounds` array are
    /// joined the way the provider expects, other arrays become repeated
    /// parameters, and `null` values are dropped.
    fn try_from(value: &Value) -> Result<Self, SearchConditionsError> {
        let map = match value {
            Value::Object(map) => map,
            other => return Err(SearchConditionsError::NotAMapping(json_type(other))),
        };
        let mut pairs = Vec::new();
        for (name, value) in map {
            match (name.as_str(), value) {
                (_, Value::Null) => {}
                (LOCATION, Value::Array(parts)) => {
                    pairs.push((name.clone(), format!("{},{}", part(parts, 0), part(parts, 1))));
                }
                (BOUNDS, Value::Array(parts)) => pairs.push((
                    name.clone(),
                    format!(
                        "{}{}|{},{}",
                        part(parts, 0),
                        part(parts, 1),
                        part(parts, 2),
                        part(parts, 3)
                    ),
                )),
                (_, Value::Array(values)) => {
                    pairs.extend(values.iter().map(|v| (name.clone(), scalar(v))));
                }
                (_, other) => pairs.push((name.clone(), scalar(other))),
            }
        }
        Ok(Self(pairs))
    }
}

/// Render a coordinate the way JSON would, so `1.0` stays `1.0`.
fn coordinate(value: f64) -> String {
    Number::from_f64(value)
        .map(|number| number.to_string())
        .unwrap_or_else(|| value.to_string())
}

fn part(parts: &[Value], index: usize) -> String {
    parts.get(index).map(scalar).unwrap_or_default()
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
