//! Wall-clock date-time helpers
//!
//! Drinking sessions and test appointments are local wall-clock instants, the
//! way a `datetime-local` form field reports them. They are stored as
//! [`NaiveDateTime`] and converted to fractional hours for the model.

use chrono::{NaiveDateTime, TimeDelta};

/// Accepted input layouts, tried in order
const INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Layout used when writing date-times back out
pub const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Parse a date-time in any of the accepted layouts
///
/// Both `2026-10-17T20:00` and `2026-10-17T20:00:00` are accepted, as is a
/// space instead of the `T`.
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
}

/// Signed number of hours from `from` to `to`
pub fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / MS_PER_HOUR
}

/// Shift `base` by a (fractional) number of hours
///
/// Returns `None` for non-finite offsets or when the result leaves chrono's
/// representable range.
pub fn shift_hours(base: NaiveDateTime, hours: f64) -> Option<NaiveDateTime> {
    if !hours.is_finite() {
        return None;
    }
    let ms = (hours * MS_PER_HOUR).round();
    if ms.abs() >= i64::MAX as f64 {
        return None;
    }
    let delta = TimeDelta::try_milliseconds(ms as i64)?;
    base.checked_add_signed(delta)
}

/// Serde adapter for a required [`NaiveDateTime`]
pub mod datetime {
    use super::{parse_datetime, OUTPUT_FORMAT};
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&value.format(OUTPUT_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(d)?;
        parse_datetime(&text)
            .ok_or_else(|| de::Error::custom(format!("invalid date-time: {text}")))
    }
}

/// Serde adapter for an optional [`NaiveDateTime`]; blank strings read as `None`
pub mod option_datetime {
    use super::{parse_datetime, OUTPUT_FORMAT};
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => s.collect_str(&v.format(OUTPUT_FORMAT)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(d)? {
            None => Ok(None),
            Some(text) if text.trim().is_empty() => Ok(None),
            Some(text) => parse_datetime(&text)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid date-time: {text}"))),
        }
    }
}
