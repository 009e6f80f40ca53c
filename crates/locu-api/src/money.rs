use std::{fmt, str::FromStr, sync::LazyLock};

use log::warn;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Number of fractional digits always shown when a price is rendered.
const CANONICAL_SCALE: u32 = 2;

const AMOUNT_PATTERN: &str = r"^[+-]?\d*\.?\d+([eE][+-]?\d+)?$";
static AMOUNT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(AMOUNT_PATTERN).expect("Invalid regex pattern"));

/// A monetary amount with exact decimal semantics.
///
/// Equality is numeric, so `1.5` and `1.50` compare equal. Rendering always
/// shows at least two fractional digits (`1.50`, `10.00`) and never drops
/// significant ones (`1.255` stays `1.255`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("the price is missing")]
    Missing,
    #[error("the price `{0}` is not a number")]
    Invalid(String),
}

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Parse a price that the feed is required to carry, such as an item price.
    ///
    /// Absent, `null`, empty and non-numeric values are all errors.
    pub fn parse_required(value: Option<&Value>) -> Result<Self, MoneyError> {
        match value {
            None | Some(Value::Null) => Err(MoneyError::Missing),
            Some(Value::String(raw)) => raw.parse(),
            Some(Value::Number(number)) => number.to_string().parse(),
            Some(other) => Err(MoneyError::Invalid(other.to_string())),
        }
    }

    /// Parse a price the feed commonly omits, such as an option modifier.
    ///
    /// Anything that does not parse is treated as zero.
    pub fn parse_or_zero(value: Option<&Value>) -> Self {
        match Self::parse_required(value) {
            Ok(money) => money,
            Err(MoneyError::Missing) => Self::ZERO,
            Err(MoneyError::Invalid(raw)) => {
                warn!("treating unparseable price `{}` as zero", raw);
                Self::ZERO
            }
        }
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    /// Accepts plain and explicitly signed amounts (`10.95`, `+1.50`, `-0.25`).
    fn from_str(raw: &str) -> Result<Self, MoneyError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MoneyError::Missing);
        }
        if !AMOUNT_REGEX.is_match(trimmed) {
            return Err(MoneyError::Invalid(raw.to_string()));
        }
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        Decimal::from_str(unsigned)
            .or_else(|_| Decimal::from_scientific(unsigned))
            .map(Self)
            .map_err(|_| MoneyError::Invalid(raw.to_string()))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut amount = self.0.normalize();
        if amount.scale() < CANONICAL_SCALE {
            amount.rescale(CANONICAL_SCALE);
        }
        write!(f, "{}", amount)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn parse_plain_string() {
        let money: Money = "10.95".parse().unwrap();
        assert_eq!(money.amount(), dec!(10.95));
    }

    #[test]
    fn parse_signed_modifier() {
        assert_eq!("+1.50".parse::<Money>().unwrap().amount(), dec!(1.50));
        assert_eq!("-0.25".parse::<Money>().unwrap().amount(), dec!(-0.25));
    }

    #[test]
    fn parse_json_number() {
        let value = json!(7.25);
        let money = Money::parse_required(Some(&value)).unwrap();
        assert_eq!(money.amount(), dec!(7.25));
    }

    #[test]
    fn required_price_missing_is_error() {
        assert_eq!(Money::parse_required(None), Err(MoneyError::Missing));
        assert_eq!(
            Money::parse_required(Some(&Value::Null)),
            Err(MoneyError::Missing)
        );
        assert_eq!(
            Money::parse_required(Some(&json!(""))),
            Err(MoneyError::Missing)
        );
    }

    #[test]
    fn required_price_malformed_is_error() {
        let result = Money::parse_required(Some(&json!("market price")));
        assert_eq!(result, Err(MoneyError::Invalid("market price".to_string())));
        let result = Money::parse_required(Some(&json!(["1.00"])));
        assert!(matches!(result, Err(MoneyError::Invalid(_))));
    }

    #[test]
    fn parse_rejects_loose_number_syntax() {
        for raw in ["1_0.95", "++1", "+-1", "1.2.3", "$4.00", "10."] {
            assert_eq!(
                raw.parse::<Money>(),
                Err(MoneyError::Invalid(raw.to_string())),
                "`{}` should not parse",
                raw
            );
        }
        assert_eq!("1.5e1".parse::<Money>().unwrap().amount(), dec!(15));
    }

    #[test]
    fn optional_price_defaults_to_zero() {
        assert_eq!(Money::parse_or_zero(None), Money::ZERO);
        assert_eq!(Money::parse_or_zero(Some(&Value::Null)), Money::ZERO);
        assert_eq!(Money::parse_or_zero(Some(&json!(""))), Money::ZERO);
        assert_eq!(Money::parse_or_zero(Some(&json!("free"))), Money::ZERO);
        assert_eq!(
            Money::parse_or_zero(Some(&json!("+1.50"))).amount(),
            dec!(1.5)
        );
    }

    #[test]
    fn equality_ignores_trailing_zeros() {
        let short: Money = "1.5".parse().unwrap();
        let long: Money = "1.500".parse().unwrap();
        assert_eq!(short, long);
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!("1.5".parse::<Money>().unwrap().to_string(), "1.50");
        assert_eq!("1.500".parse::<Money>().unwrap().to_string(), "1.50");
        assert_eq!("10".parse::<Money>().unwrap().to_string(), "10.00");
        assert_eq!("+1.50".parse::<Money>().unwrap().to_string(), "1.50");
        assert_eq!("1.255".parse::<Money>().unwrap().to_string(), "1.255");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn serializes_as_canonical_string() {
        let money: Money = "10.95".parse().unwrap();
        assert_eq!(serde_json::to_value(money).unwrap(), json!("10.95"));
    }
}
