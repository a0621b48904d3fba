//! Decoding of the provenance-tagged extraction format.
//!
//! Every scalar the upstream LLM pipeline emits is wrapped in a `{value: X}`
//! object, numerics may additionally arrive as `{$numberDouble: X}` or
//! `{$numberLong: X}`, and dates as `{$date: X}`. All accessors here are
//! total: a missing or malformed field resolves to the caller's default,
//! never to an error.

use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NumericTag {
    Double,
    Long,
}

/// One resolved source field.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RawField<'a> {
    Absent,
    Wrapped(&'a Value),
    Tagged(NumericTag, &'a Value),
}

impl<'a> RawField<'a> {
    /// Resolve a field that sits directly on the record, without the
    /// `{value: X}` wrapping (e.g. `_id`, `fileSize`, `createdAt`).
    pub fn direct(value: Option<&'a Value>) -> Self {
        match value {
            Some(value) => Self::of(value),
            None => RawField::Absent,
        }
    }

    /// Walk a dotted path through the nested wrapper format. Each
    /// intermediate segment resolves through `node["value"][segment]`, and
    /// the terminal node through its own `"value"` key. A missing segment,
    /// a terminal node without a `value`, or a JSON null all resolve to
    /// [`RawField::Absent`].
    pub fn nested(root: Option<&'a Value>, path: &str) -> Self {
        let mut node = match root {
            Some(value) if !value.is_null() => value,
            _ => return RawField::Absent,
        };

        for part in path.split('.') {
            node = match node.get("value").and_then(|value| value.get(part)) {
                Some(next) if !next.is_null() => next,
                _ => return RawField::Absent,
            };
        }

        match node.get("value") {
            Some(value) if !value.is_null() => Self::of(value),
            _ => RawField::Absent,
        }
    }

    fn of(value: &'a Value) -> Self {
        if value.is_null() {
            return RawField::Absent;
        }
        if let Some(raw) = value.get("$numberDouble") {
            return RawField::Tagged(NumericTag::Double, raw);
        }
        if let Some(raw) = value.get("$numberLong") {
            return RawField::Tagged(NumericTag::Long, raw);
        }
        RawField::Wrapped(value)
    }

    /// The field as a non-empty string, or the default.
    pub fn as_str(&self, default: &str) -> String {
        self.as_opt_str().unwrap_or_else(|| default.to_string())
    }

    pub fn as_opt_str(&self) -> Option<String> {
        match self {
            RawField::Wrapped(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    /// The field as a finite number. Missing, null, empty-string and
    /// unparseable input all coerce to `0`.
    pub fn as_f64(&self) -> f64 {
        let raw = match self {
            RawField::Absent => return 0.0,
            RawField::Tagged(_, raw) => raw,
            RawField::Wrapped(value) => value,
        };

        coerce_number(raw)
    }

    /// Like [`Self::as_f64`], but for 64-bit integer fields (`fileSize`).
    pub fn as_i64(&self) -> i64 {
        let raw = match self {
            RawField::Absent => return 0,
            RawField::Tagged(_, raw) => raw,
            RawField::Wrapped(value) => value,
        };

        match raw {
            Value::Number(n) => n.as_i64().unwrap_or_else(|| coerce_number(raw) as i64),
            Value::String(s) => s
                .parse::<i64>()
                .unwrap_or_else(|_| coerce_number(raw) as i64),
            _ => 0,
        }
    }

    /// The field as a point in time: a `{$date: ...}` tag is tried first,
    /// then the plain string form. Accepted string forms are RFC 3339 and
    /// `YYYY-MM-DD` (midnight UTC).
    pub fn as_datetime(&self) -> Option<OffsetDateTime> {
        match self {
            RawField::Absent | RawField::Tagged(NumericTag::Double, _) => None,
            RawField::Tagged(NumericTag::Long, raw) => from_millis(raw),
            RawField::Wrapped(value) => match value {
                Value::String(s) => parse_datetime(s),
                Value::Object(_) => match value.get("$date") {
                    Some(Value::String(s)) => parse_datetime(s),
                    Some(inner @ Value::Object(_)) => {
                        inner.get("$numberLong").and_then(from_millis)
                    }
                    Some(raw @ Value::Number(_)) => from_millis(raw),
                    _ => None,
                },
                _ => None,
            },
        }
    }

    /// The field as an array of raw elements, empty when it is anything else.
    pub fn as_array(&self) -> &'a [Value] {
        match self {
            RawField::Wrapped(Value::Array(items)) => items,
            _ => &[],
        }
    }
}

fn coerce_number(raw: &Value) -> f64 {
    let parsed = match raw {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) if !s.is_empty() => s.parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };

    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

fn from_millis(raw: &Value) -> Option<OffsetDateTime> {
    let millis = match raw {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.parse::<i64>().ok()?,
        _ => return None,
    };

    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok()
}

fn parse_datetime(s: &str) -> Option<OffsetDateTime> {
    if let Ok(parsed) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(parsed);
    }

    Date::parse(s, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn nested_extraction() {
        let vendor = json!({"value": {"vendorName": {"value": "Acme"}}});
        assert_eq!(
            RawField::nested(Some(&vendor), "vendorName").as_str("Unknown Vendor"),
            "Acme"
        );
    }

    #[test]
    fn nested_extraction_missing_terminal_value() {
        // present parent, but the leaf lacks its own `value` wrapper
        let vendor = json!({"value": {"vendorName": {"confidence": 0.9}}});
        assert_eq!(
            RawField::nested(Some(&vendor), "vendorName").as_str("Unknown Vendor"),
            "Unknown Vendor"
        );
    }

    #[test]
    fn nested_extraction_missing_segment() {
        let vendor = json!({"value": {}});
        assert_eq!(RawField::nested(Some(&vendor), "vendorName"), RawField::Absent);
        assert_eq!(RawField::nested(None, "vendorName"), RawField::Absent);
    }

    #[test]
    fn nested_extraction_null_terminal() {
        let vendor = json!({"value": {"vendorName": {"value": null}}});
        assert_eq!(
            RawField::nested(Some(&vendor), "vendorName").as_opt_str(),
            None
        );
    }

    #[test]
    fn numeric_coercion_of_malformed_input_is_zero() {
        for value in [
            json!({"value": null}),
            json!({"value": ""}),
            json!({"value": "twelve"}),
            json!({"value": {"$numberDouble": null}}),
        ] {
            let root = json!({"value": {"total": value}});
            assert_eq!(RawField::nested(Some(&root), "total").as_f64(), 0.0);
        }

        assert_eq!(RawField::Absent.as_f64(), 0.0);
    }

    #[test]
    fn numeric_coercion_of_tagged_wrappers() {
        let root = json!({"value": {"total": {"value": {"$numberDouble": "12.5"}}}});
        assert_eq!(RawField::nested(Some(&root), "total").as_f64(), 12.5);

        let root = json!({"value": {"total": {"value": 7}}});
        assert_eq!(RawField::nested(Some(&root), "total").as_f64(), 7.0);

        let root = json!({"value": {"total": {"value": "3.25"}}});
        assert_eq!(RawField::nested(Some(&root), "total").as_f64(), 3.25);
    }

    #[test]
    fn long_tagged_file_size() {
        let size = json!({"$numberLong": "1048576"});
        assert_eq!(RawField::direct(Some(&size)).as_i64(), 1_048_576);
        assert_eq!(RawField::direct(None).as_i64(), 0);
    }

    #[test]
    fn date_coercion() {
        let tagged = json!({"$date": "2024-01-05T00:00:00.000Z"});
        assert_eq!(
            RawField::direct(Some(&tagged)).as_datetime(),
            Some(datetime!(2024-01-05 00:00:00 UTC))
        );

        let plain = json!("2024-01-05");
        assert_eq!(
            RawField::direct(Some(&plain)).as_datetime(),
            Some(datetime!(2024-01-05 00:00:00 UTC))
        );

        let bogus = json!("not-a-date");
        assert_eq!(RawField::direct(Some(&bogus)).as_datetime(), None);
    }

    #[test]
    fn date_coercion_from_millis() {
        let tagged = json!({"$date": {"$numberLong": "1704412800000"}});
        assert_eq!(
            RawField::direct(Some(&tagged)).as_datetime(),
            Some(datetime!(2024-01-05 00:00:00 UTC))
        );
    }
}
