//! Helpers that unify alternate wire encodings of the same logical value.
//!
//! The service is inconsistent about numbers: some ratios arrive bare, some wrapped as
//! `{"value": n}`. Point series arrive as objects keyed `"1"..="N"` instead of arrays.
//! Dates arrive as compact `YYYYMMDD` strings.

use serde::de::{
    Deserializer,
    Error as _,
    IgnoredAny,
    MapAccess,
    SeqAccess,
    Visitor,
};
use time::{
    Date,
    Month,
};

/// Error when a 1-indexed point series cannot be turned into a sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PointSeriesError {
    /// A key was not a positive integer
    #[error("point series key '{0}' is not an index")]
    NotAnIndex(String),

    /// Index 0 was used, but the series starts at 1
    #[error("point series indices start at 1, found 0")]
    ZeroIndex,

    /// The same index was given twice
    #[error("point series index {0} is duplicated")]
    Duplicate(usize),

    /// An index inside the range was skipped
    #[error("point series is missing index {0}")]
    Missing(usize),
}

/// Re-index a point series keyed from 1 to N into a 0-indexed sequence of length N.
///
/// The input may come in any order. Indices must cover exactly `1..=N`.
pub fn reindex_points<I>(points: I) -> Result<Vec<f64>, PointSeriesError>
where
    I: IntoIterator<Item = (usize, f64)>,
{
    let mut points: Vec<(usize, f64)> = points.into_iter().collect();
    points.sort_unstable_by_key(|(index, _)| *index);

    let mut sequence = Vec::with_capacity(points.len());
    for (position, (index, value)) in points.into_iter().enumerate() {
        let expected = position + 1;
        if index == 0 {
            return Err(PointSeriesError::ZeroIndex);
        }
        if index < expected {
            return Err(PointSeriesError::Duplicate(index));
        }
        if index > expected {
            return Err(PointSeriesError::Missing(expected));
        }
        sequence.push(value);
    }

    Ok(sequence)
}

/// Parse a point series key.
fn parse_index(key: &str) -> Result<usize, PointSeriesError> {
    key.parse()
        .map_err(|_| PointSeriesError::NotAnIndex(key.to_string()))
}

/// Error when a compact date cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum CompactDateError {
    /// Not exactly 8 ascii digits
    #[error("'{0}' is not an 8 digit YYYYMMDD date")]
    InvalidFormat(String),

    /// The digits do not form a calendar date
    #[error(transparent)]
    InvalidDate(#[from] time::error::ComponentRange),
}

/// Parse a compact `YYYYMMDD` date.
pub fn parse_compact_date(input: &str) -> Result<Date, CompactDateError> {
    if input.len() != 8 || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CompactDateError::InvalidFormat(input.to_string()));
    }

    // All ascii digits, these cannot fail.
    let component = |range: std::ops::Range<usize>| -> u32 {
        input[range]
            .bytes()
            .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
    };
    let year = component(0..4) as i32;
    let month = Month::try_from(component(4..6) as u8)?;
    let day = component(6..8) as u8;

    Ok(Date::from_calendar_date(year, month, day)?)
}

/// Deserialize a number that may be bare or wrapped as `{"value": n}`.
///
/// `null` decodes as `0.0`, like an absent field.
pub fn wrapped_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct WrappedF64Visitor;

    impl<'de> Visitor<'de> for WrappedF64Visitor {
        type Value = f64;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a number or an object with a numeric \"value\"")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
            Ok(v)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v as f64)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v as f64)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(0.0)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E> {
            Ok(0.0)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut value = None;
            while let Some(key) = map.next_key::<String>()? {
                if key == "value" {
                    if value.is_some() {
                        return Err(A::Error::duplicate_field("value"));
                    }
                    value = Some(map.next_value::<Option<f64>>()?.unwrap_or(0.0));
                } else {
                    map.next_value::<IgnoredAny>()?;
                }
            }

            value.ok_or_else(|| A::Error::missing_field("value"))
        }
    }

    deserializer.deserialize_any(WrappedF64Visitor)
}

/// Deserialize a point series into a 0-indexed sequence.
///
/// Objects keyed `"1"..="N"` are re-indexed; plain arrays are taken as they are.
pub fn point_series<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PointSeriesVisitor;

    impl<'de> Visitor<'de> for PointSeriesVisitor {
        type Value = Vec<f64>;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("an object keyed by 1-based indices or an array of numbers")
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut points = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(point) = seq.next_element::<f64>()? {
                points.push(point);
            }
            Ok(points)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut points = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(key) = map.next_key::<String>()? {
                let index = parse_index(&key).map_err(A::Error::custom)?;
                let value = map.next_value::<f64>()?;
                points.push((index, value));
            }

            reindex_points(points).map_err(A::Error::custom)
        }
    }

    deserializer.deserialize_any(PointSeriesVisitor)
}

/// Deserialize an optional compact date given as a string or a bare 8 digit number.
pub fn compact_date<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
where
    D: Deserializer<'de>,
{
    struct CompactDateVisitor;

    impl<'de> Visitor<'de> for CompactDateVisitor {
        type Value = Option<Date>;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a YYYYMMDD date")
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            parse_compact_date(v).map(Some).map_err(E::custom)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            self.visit_str(itoa::Buffer::new().format(v))
        }
    }

    deserializer.deserialize_any(CompactDateVisitor)
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Wrapped {
        #[serde(deserialize_with = "wrapped_f64")]
        n: f64,
    }

    #[derive(Debug, serde::Deserialize)]
    struct Series {
        #[serde(deserialize_with = "point_series")]
        points: Vec<f64>,
    }

    #[derive(Debug, serde::Deserialize)]
    struct Dated {
        #[serde(default, deserialize_with = "compact_date")]
        date: Option<Date>,
    }

    #[test]
    fn reindex_any_length() {
        for n in 0..32 {
            let points = (1..=n).rev().map(|i| (i, i as f64 * 0.5));
            let sequence = reindex_points(points).unwrap();
            assert_eq!(sequence.len(), n);
            for (i, value) in sequence.iter().enumerate() {
                assert_eq!(*value, (i + 1) as f64 * 0.5);
            }
        }
    }

    #[test]
    fn reindex_rejects_gaps() {
        assert_eq!(
            reindex_points([(1, 0.1), (3, 0.3)]),
            Err(PointSeriesError::Missing(2))
        );
        assert_eq!(
            reindex_points([(1, 0.1), (1, 0.3)]),
            Err(PointSeriesError::Duplicate(1))
        );
        assert_eq!(
            reindex_points([(0, 0.1), (1, 0.3)]),
            Err(PointSeriesError::ZeroIndex)
        );
    }

    #[test]
    fn bare_and_wrapped_numbers() {
        let bare: Wrapped = serde_json::from_str(r#"{"n": 0.25}"#).unwrap();
        assert_eq!(bare.n, 0.25);

        let int: Wrapped = serde_json::from_str(r#"{"n": 7}"#).unwrap();
        assert_eq!(int.n, 7.0);

        let wrapped: Wrapped =
            serde_json::from_str(r#"{"n": {"value": 0.5, "extra": [1, 2]}}"#).unwrap();
        assert_eq!(wrapped.n, 0.5);

        let null: Wrapped = serde_json::from_str(r#"{"n": null}"#).unwrap();
        assert_eq!(null.n, 0.0);

        assert!(serde_json::from_str::<Wrapped>(r#"{"n": {"other": 1}}"#).is_err());
        assert!(serde_json::from_str::<Wrapped>(r#"{"n": "0.5"}"#).is_err());
    }

    #[test]
    fn keyed_series_in_order() {
        let series: Series =
            serde_json::from_str(r#"{"points": {"1": 0.1, "2": 0.2, "3": 0.3}}"#).unwrap();
        assert_eq!(series.points, vec![0.1, 0.2, 0.3]);

        let shuffled: Series =
            serde_json::from_str(r#"{"points": {"3": 0.3, "1": 0.1, "2": 0.2}}"#).unwrap();
        assert_eq!(shuffled.points, vec![0.1, 0.2, 0.3]);

        let array: Series = serde_json::from_str(r#"{"points": [0.1, 0.2]}"#).unwrap();
        assert_eq!(array.points, vec![0.1, 0.2]);

        let empty: Series = serde_json::from_str(r#"{"points": {}}"#).unwrap();
        assert!(empty.points.is_empty());
    }

    #[test]
    fn keyed_series_errors() {
        let error = serde_json::from_str::<Series>(r#"{"points": {"a": 0.1}}"#).unwrap_err();
        assert!(error.to_string().contains("not an index"));

        let error = serde_json::from_str::<Series>(r#"{"points": {"2": 0.1}}"#).unwrap_err();
        assert!(error.to_string().contains("missing index 1"));
    }

    #[test]
    fn compact_dates() {
        let date = parse_compact_date("20230914").unwrap();
        assert_eq!(date.year(), 2023);
        assert_eq!(date.month(), Month::September);
        assert_eq!(date.day(), 14);

        assert!(matches!(
            parse_compact_date("2023-09-14"),
            Err(CompactDateError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_compact_date("20231340"),
            Err(CompactDateError::InvalidDate(_))
        ));

        let string: Dated = serde_json::from_str(r#"{"date": "20240101"}"#).unwrap();
        let number: Dated = serde_json::from_str(r#"{"date": 20240101}"#).unwrap();
        assert_eq!(string.date, number.date);
        assert!(string.date.is_some());

        let missing: Dated = serde_json::from_str("{}").unwrap();
        assert!(missing.date.is_none());
    }
}
