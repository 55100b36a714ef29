//! Numeric ("technical") filter entries.
//!
//! A numeric entry either pins a field to a single value (`equals`) or bounds
//! it with an optional `min` and `max` (`range`). Empty bounds are modelled as
//! `None`; on the wire they may arrive as `""`, `null`, a number, or a numeric
//! string, and are written back out only when present.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// How a numeric entry constrains its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericMode {
    /// Field must equal a single value
    #[default]
    Equals,
    /// Field must fall between optional bounds
    Range,
}

impl NumericMode {
    /// Wire name of the mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::Range => "range",
        }
    }

    /// Parse a mode name, falling back to `Equals` for anything unrecognised.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("range") {
            Self::Range
        } else {
            Self::Equals
        }
    }
}

impl fmt::Display for NumericMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'de> Deserialize<'de> for NumericMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or(Self::Equals, Self::from_name))
    }
}

/// One numeric constraint on a field.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NumericFilter {
    #[serde(default)]
    pub mode: NumericMode,
    #[serde(
        default,
        deserialize_with = "deserialize_bound",
        skip_serializing_if = "Option::is_none"
    )]
    pub equals: Option<f64>,
    #[serde(
        default,
        deserialize_with = "deserialize_bound",
        skip_serializing_if = "Option::is_none"
    )]
    pub min: Option<f64>,
    #[serde(
        default,
        deserialize_with = "deserialize_bound",
        skip_serializing_if = "Option::is_none"
    )]
    pub max: Option<f64>,
}

impl NumericFilter {
    /// An `equals` entry.
    #[must_use]
    pub fn equals(value: Option<f64>) -> Self {
        Self {
            mode: NumericMode::Equals,
            equals: finite(value),
            min: None,
            max: None,
        }
    }

    /// A `range` entry.
    #[must_use]
    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            mode: NumericMode::Range,
            equals: None,
            min: finite(min),
            max: finite(max),
        }
    }

    /// Compute the entry that results from a user edit.
    ///
    /// When `mode` differs from the prior entry's mode, any bound the caller
    /// did not supply is carried over from the prior entry: an `equals` value
    /// seeds both `min` and `max`, and a range seeds `equals` from `min`
    /// (falling back to `max`). Within the same mode the supplied bounds
    /// replace the old ones, and a missing bound means "cleared".
    #[must_use]
    pub fn updated(
        prior: Option<&Self>,
        mode: NumericMode,
        value: Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Self {
        let (value, min, max) = (finite(value), finite(min), finite(max));
        match (mode, prior) {
            (NumericMode::Equals, Some(p)) if p.mode == NumericMode::Range => {
                Self::equals(value.or(p.min).or(p.max))
            }
            (NumericMode::Range, Some(p)) if p.mode == NumericMode::Equals => {
                Self::range(min.or(p.equals), max.or(p.equals))
            }
            (NumericMode::Equals, _) => Self::equals(value),
            (NumericMode::Range, _) => Self::range(min, max),
        }
    }

    /// Whether the entry carries a usable bound for its mode.
    #[must_use]
    pub fn is_meaningful(&self) -> bool {
        match self.mode {
            NumericMode::Equals => self.equals.is_some(),
            NumericMode::Range => self.min.is_some() || self.max.is_some(),
        }
    }

    /// The entry as it goes on the wire, or `None` when it is not meaningful.
    ///
    /// Bounds that do not belong to the entry's mode are dropped.
    #[must_use]
    pub fn cleaned(&self) -> Option<Self> {
        if !self.is_meaningful() {
            return None;
        }
        Some(match self.mode {
            NumericMode::Equals => Self::equals(self.equals),
            NumericMode::Range => Self::range(self.min, self.max),
        })
    }

    /// Whether `value` satisfies this entry. Non-meaningful entries match anything.
    #[must_use]
    pub fn matches(&self, value: f64) -> bool {
        match self.mode {
            NumericMode::Equals => self.equals.map_or(true, |eq| (eq - value).abs() < f64::EPSILON),
            NumericMode::Range => {
                self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
            }
        }
    }
}

impl fmt::Display for NumericFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            NumericMode::Equals => match self.equals {
                Some(v) => write!(f, "= {v}"),
                None => write!(f, "= ?"),
            },
            NumericMode::Range => match (self.min, self.max) {
                (Some(min), Some(max)) => write!(f, "{min}..{max}"),
                (Some(min), None) => write!(f, ">= {min}"),
                (None, Some(max)) => write!(f, "<= {max}"),
                (None, None) => write!(f, "any"),
            },
        }
    }
}

/// Drop non-finite bounds and fold `-0.0` into `0.0`, so equal bounds
/// always serialize identically.
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite()).map(|v| v + 0.0)
}

/// Accept a number, a numeric string, `""` or `null` for a bound.
pub fn deserialize_bound<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawBound {
        Number(f64),
        Text(String),
    }

    let raw = Option::<RawBound>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawBound::Number(n)) => finite(Some(n)),
        Some(RawBound::Text(s)) => finite(s.trim().parse::<f64>().ok()),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_to_equals_carries_min() {
        let prior = NumericFilter::range(Some(10.0), Some(50.0));
        let next = NumericFilter::updated(Some(&prior), NumericMode::Equals, None, None, None);
        assert_eq!(next, NumericFilter::equals(Some(10.0)));
    }

    #[test]
    fn test_range_to_equals_falls_back_to_max() {
        let prior = NumericFilter::range(None, Some(50.0));
        let next = NumericFilter::updated(Some(&prior), NumericMode::Equals, None, None, None);
        assert_eq!(next.equals, Some(50.0));
    }

    #[test]
    fn test_equals_to_range_seeds_both_bounds() {
        let prior = NumericFilter::equals(Some(7.5));
        let next = NumericFilter::updated(Some(&prior), NumericMode::Range, None, None, None);
        assert_eq!(next, NumericFilter::range(Some(7.5), Some(7.5)));
    }

    #[test]
    fn test_explicit_value_wins_over_carry_over() {
        let prior = NumericFilter::range(Some(10.0), Some(50.0));
        let next = NumericFilter::updated(Some(&prior), NumericMode::Equals, Some(3.0), None, None);
        assert_eq!(next.equals, Some(3.0));
    }

    #[test]
    fn test_same_mode_update_replaces_bounds() {
        let prior = NumericFilter::range(Some(10.0), Some(50.0));
        let next = NumericFilter::updated(Some(&prior), NumericMode::Range, Some(20.0), None, None);
        assert_eq!(next, NumericFilter::range(Some(20.0), None));
    }

    #[test]
    fn test_meaningful() {
        assert!(!NumericFilter::equals(None).is_meaningful());
        assert!(NumericFilter::equals(Some(0.0)).is_meaningful());
        assert!(!NumericFilter::range(None, None).is_meaningful());
        assert!(NumericFilter::range(None, Some(1.0)).is_meaningful());
    }

    #[test]
    fn test_non_finite_values_are_empty() {
        assert!(!NumericFilter::equals(Some(f64::NAN)).is_meaningful());
        assert!(!NumericFilter::range(Some(f64::INFINITY), None).is_meaningful());
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let json = serde_json::to_string(&NumericFilter::equals(Some(-0.0))).unwrap();
        assert_eq!(json, r#"{"mode":"equals","equals":0.0}"#);
        assert!(NumericFilter::range(Some(-0.0), None)
            .min
            .is_some_and(|v| v.is_sign_positive()));
    }

    #[test]
    fn test_cleaned_drops_foreign_bounds() {
        let messy = NumericFilter {
            mode: NumericMode::Range,
            equals: Some(3.0),
            min: Some(1.0),
            max: None,
        };
        let cleaned = messy.cleaned().expect("meaningful");
        assert_eq!(cleaned.equals, None);
        assert_eq!(cleaned.min, Some(1.0));
    }

    #[test]
    fn test_deserialize_tolerates_empty_strings() {
        let filter: NumericFilter =
            serde_json::from_str(r#"{"mode":"range","min":"","max":"42"}"#).unwrap();
        assert_eq!(filter, NumericFilter::range(None, Some(42.0)));

        let filter: NumericFilter = serde_json::from_str(r#"{"mode":"bogus","equals":5}"#).unwrap();
        assert_eq!(filter, NumericFilter::equals(Some(5.0)));
    }

    #[test]
    fn test_serialize_skips_empty_bounds() {
        let json = serde_json::to_string(&NumericFilter::equals(Some(10.0))).unwrap();
        assert_eq!(json, r#"{"mode":"equals","equals":10.0}"#);
    }

    #[test]
    fn test_matches() {
        let range = NumericFilter::range(Some(10.0), Some(50.0));
        assert!(range.matches(10.0));
        assert!(range.matches(50.0));
        assert!(!range.matches(50.1));
        assert!(NumericFilter::equals(Some(3.0)).matches(3.0));
    }
}
