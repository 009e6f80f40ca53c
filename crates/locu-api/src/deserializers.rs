use std::collections::BTreeMap;

use log::warn;
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

// The provider is loose about JSON types. Every helper here reads the raw
// value first and turns a mismatch into `None` with a warning, so one odd
// field never takes the surrounding record down with it.

/// Text field; numbers are accepted and kept in their JSON rendering.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        other => {
            warn!("ignoring `{}` where text was expected", other);
            None
        }
    })
}

/// Floating point field; numeric strings such as `"33.45"` are accepted.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok().or_else(|| {
            warn!("ignoring `{}` where a number was expected", text);
            None
        }),
        other => {
            warn!("ignoring `{}` where a number was expected", other);
            None
        }
    })
}

/// Whole non-negative number; integral floats (`3600.0`) and numeric
/// strings are accepted.
pub fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Null => return Ok(None),
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|float| *float >= 0.0 && float.fract() == 0.0 && *float <= u64::MAX as f64)
                .map(|float| float as u64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    if parsed.is_none() {
        warn!("ignoring `{}` where a count was expected", value);
    }
    Ok(parsed)
}

/// Flag; the strings `"true"` and `"false"` are accepted in any case.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Null => return Ok(None),
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => text.trim().to_ascii_lowercase().parse().ok(),
        _ => None,
    };
    if parsed.is_none() {
        warn!("ignoring `{}` where a flag was expected", value);
    }
    Ok(parsed)
}

/// List of records; entries that do not decode are skipped.
pub fn lenient_list<'de, T, D>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    T: DeserializeOwned,
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Array(entries) => Some(
            entries
                .into_iter()
                .filter_map(|entry| match serde_json::from_value(entry) {
                    Ok(decoded) => Some(decoded),
                    Err(e) => {
                        warn!("skipping undecodable list entry: {}", e);
                        None
                    }
                })
                .collect(),
        ),
        other => {
            warn!("ignoring `{}` where a list was expected", other);
            None
        }
    })
}

/// Any record; one that does not decode is dropped as a whole.
pub fn lenient<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: DeserializeOwned,
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        value => match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!("ignoring undecodable record: {}", e);
                None
            }
        },
    })
}

/// `{"Monday": ["06:00:00 - 17:00:00"]}`. Non-string periods are skipped and
/// a day whose value is not a list has no periods.
pub fn lenient_open_hours<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, Option<Vec<String>>>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Object(days) => Some(
            days.into_iter()
                .map(|(day, periods)| {
                    let periods = match periods {
                        Value::Null => None,
                        Value::Array(periods) => Some(
                            periods
                                .into_iter()
                                .filter_map(|period| match period {
                                    Value::String(period) => Some(period),
                                    other => {
                                        warn!("skipping open period `{}` on {}", other, day);
                                        None
                                    }
                                })
                                .collect(),
                        ),
                        other => {
                            warn!("ignoring open hours `{}` on {}", other, day);
                            None
                        }
                    };
                    (day, periods)
                })
                .collect(),
        ),
        other => {
            warn!("ignoring `{}` where open hours were expected", other);
            None
        }
    })
}
