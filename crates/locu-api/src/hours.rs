use std::{collections::BTreeMap, fmt, sync::LazyLock};

use log::warn;
use regex::Regex;
use serde_json::{Map, Value};

/// Separator between the opening and closing time of a period.
const PERIOD_SEPARATOR: &str = " - ";

const TIME_OF_DAY_PATTERN: &str = r"^\d{2}:\d{2}:\d{2}$";
static TIME_OF_DAY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TIME_OF_DAY_PATTERN).expect("Invalid regex pattern"));

/// A half-open `[open, close)` period within a single day.
///
/// Both ends are kept as the provider's `HH:MM:SS` strings, which order
/// correctly under plain string comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenPeriod {
    open: String,
    close: String,
}

impl OpenPeriod {
    /// Parse `"06:00:00 - 17:00:00"`. Returns `None` unless both ends are
    /// `HH:MM:SS` times and the period does not close before it opens.
    pub fn parse(raw: &str) -> Option<Self> {
        let (open, close) = raw.split_once(PERIOD_SEPARATOR)?;
        let (open, close) = (open.trim(), close.trim());
        if !TIME_OF_DAY_REGEX.is_match(open) || !TIME_OF_DAY_REGEX.is_match(close) {
            return None;
        }
        if close < open {
            return None;
        }
        Some(Self {
            open: open.to_string(),
            close: close.to_string(),
        })
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }

    pub fn contains(&self, time: &str) -> bool {
        self.open.as_str() <= time && time < self.close.as_str()
    }
}

impl fmt::Display for OpenPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.open, PERIOD_SEPARATOR, self.close)
    }
}

/// Day name to opening periods, exactly as listed by the provider.
///
/// Days are neither renamed nor filled in: a venue whose feed lists only
/// `Monday` has a single key.
///
/// Periods that run past midnight (`"22:00:00 - 02:00:00"`) cannot be held
/// as a single same-day period and are dropped with a warning, so a
/// late-night venue loses those hours.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpenHours(BTreeMap<String, Vec<OpenPeriod>>);

impl OpenHours {
    pub fn from_raw(raw: BTreeMap<String, Option<Vec<String>>>) -> Self {
        let days = raw
            .into_iter()
            .map(|(day, periods)| {
                let periods = periods
                    .unwrap_or_default()
                    .iter()
                    .filter_map(|period| {
                        let parsed = OpenPeriod::parse(period);
                        if parsed.is_none() {
                            warn!("skipping malformed open period `{}` on {}", period, day);
                        }
                        parsed
                    })
                    .collect();
                (day, periods)
            })
            .collect();
        Self(days)
    }

    pub fn get(&self, day: &str) -> Option<&[OpenPeriod]> {
        self.0.get(day).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[OpenPeriod])> {
        self.0
            .iter()
            .map(|(day, periods)| (day.as_str(), periods.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_open_at(&self, day: &str, time: &str) -> bool {
        self.get(day)
            .is_some_and(|periods| periods.iter().any(|period| period.contains(time)))
    }

    /// Render back into the provider's `{"Monday": ["06:00:00 - 17:00:00"]}` form.
    pub fn to_hash(&self) -> Value {
        let days = self
            .0
            .iter()
            .map(|(day, periods)| {
                let periods = periods
                    .iter()
                    .map(|period| Value::String(period.to_string()))
                    .collect();
                (day.clone(), Value::Array(periods))
            })
            .collect::<Map<_, _>>();
        Value::Object(days)
    }
}
