use std::any::TypeId;
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::BoxError;
use crate::value::AnyValue;

/// A value parser turns a raw parameter string (plus the resolved delimiter)
/// into a typed intermediate value.
///
/// Contract: a blank raw value means "not provided" and must yield the
/// type's zero value without error; a non-blank value that fails to parse is
/// an error. The delimiter is only meaningful for list-shaped types.
pub type ValueParser =
    fn(value: &str, delimiter: &str) -> Result<Box<dyn AnyValue>, BoxError>;

/// Returned when a bool parameter holds an unrecognized string.
#[derive(Debug, thiserror::Error)]
#[error("unknown bool value: {0:?}")]
pub struct InvalidBoolValue(pub String);

/// Marks whether a query parameter was supplied with a non-empty value.
///
/// `Present(true)` iff the key was in the mapping and non-blank; absent and
/// blank are both `Present(false)`. Its parser never fails.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Present(pub bool);

/// Default value parsers, keyed by field type.
///
/// Integer parsers hand the setter layer an `i64` intermediate and float
/// parsers an `f64`, after validating the field's actual range — the
/// narrowing setters in [`crate::setters`] only ever truncate values that
/// already fit.
pub fn default_value_parsers() -> HashMap<TypeId, ValueParser> {
    HashMap::from([
        (TypeId::of::<String>(), string_value_parser as ValueParser),
        (TypeId::of::<Vec<String>>(), string_list_value_parser as ValueParser),
        (TypeId::of::<isize>(), int_value_parser as ValueParser),
        (TypeId::of::<i32>(), int32_value_parser as ValueParser),
        (TypeId::of::<i64>(), int64_value_parser as ValueParser),
        (TypeId::of::<f32>(), float32_value_parser as ValueParser),
        (TypeId::of::<f64>(), float64_value_parser as ValueParser),
        (TypeId::of::<DateTime<Utc>>(), time_value_parser as ValueParser),
        (TypeId::of::<bool>(), bool_value_parser as ValueParser),
        (TypeId::of::<Present>(), present_value_parser as ValueParser),
    ])
}

/// Parses a `String` field. Never fails.
pub fn string_value_parser(
    value: &str,
    _delimiter: &str,
) -> Result<Box<dyn AnyValue>, BoxError> {
    Ok(Box::new(value.to_owned()))
}

/// Parses a `Vec<String>` field by splitting on the delimiter.
/// A blank value yields an empty list.
pub fn string_list_value_parser(
    value: &str,
    delimiter: &str,
) -> Result<Box<dyn AnyValue>, BoxError> {
    if value.is_empty() {
        return Ok(Box::new(Vec::<String>::new()));
    }

    let parts: Vec<String> = value.split(delimiter).map(str::to_owned).collect();
    Ok(Box::new(parts))
}

/// Parses an `isize` field. Blank yields zero.
pub fn int_value_parser(
    value: &str,
    _delimiter: &str,
) -> Result<Box<dyn AnyValue>, BoxError> {
    if value.is_empty() {
        return Ok(Box::new(0i64));
    }

    let parsed = value.parse::<isize>()?;
    Ok(Box::new(parsed as i64))
}

/// Parses an `i32` field. Blank yields zero.
pub fn int32_value_parser(
    value: &str,
    _delimiter: &str,
) -> Result<Box<dyn AnyValue>, BoxError> {
    if value.is_empty() {
        return Ok(Box::new(0i64));
    }

    let parsed = value.parse::<i32>()?;
    Ok(Box::new(i64::from(parsed)))
}

/// Parses an `i64` field. Blank yields zero.
pub fn int64_value_parser(
    value: &str,
    _delimiter: &str,
) -> Result<Box<dyn AnyValue>, BoxError> {
    if value.is_empty() {
        return Ok(Box::new(0i64));
    }

    let parsed = value.parse::<i64>()?;
    Ok(Box::new(parsed))
}

/// Parses an `f32` field. Blank yields zero.
pub fn float32_value_parser(
    value: &str,
    _delimiter: &str,
) -> Result<Box<dyn AnyValue>, BoxError> {
    if value.is_empty() {
        return Ok(Box::new(0f64));
    }

    let parsed = value.parse::<f32>()?;
    Ok(Box::new(f64::from(parsed)))
}

/// Parses an `f64` field. Blank yields zero.
pub fn float64_value_parser(
    value: &str,
    _delimiter: &str,
) -> Result<Box<dyn AnyValue>, BoxError> {
    if value.is_empty() {
        return Ok(Box::new(0f64));
    }

    let parsed = value.parse::<f64>()?;
    Ok(Box::new(parsed))
}

/// Parses a `DateTime<Utc>` field from strict RFC 3339.
/// Blank yields the Unix epoch.
pub fn time_value_parser(
    value: &str,
    _delimiter: &str,
) -> Result<Box<dyn AnyValue>, BoxError> {
    if value.is_empty() {
        return Ok(Box::new(DateTime::<Utc>::default()));
    }

    let parsed = DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc);
    Ok(Box::new(parsed))
}

/// Parses a `bool` field.
///
/// Case-insensitive: `true`/`1`/`y`/`yes` are true; blank, `false`/`0`/`n`/
/// `no` are false; anything else is an [`InvalidBoolValue`] error.
pub fn bool_value_parser(
    value: &str,
    _delimiter: &str,
) -> Result<Box<dyn AnyValue>, BoxError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "y" | "yes" => Ok(Box::new(true)),
        "" | "false" | "0" | "n" | "no" => Ok(Box::new(false)),
        _ => Err(Box::new(InvalidBoolValue(value.to_owned()))),
    }
}

/// Parses a [`Present`] field: true iff the raw value is non-blank.
/// Never fails.
pub fn present_value_parser(
    value: &str,
    _delimiter: &str,
) -> Result<Box<dyn AnyValue>, BoxError> {
    Ok(Box::new(Present(!value.is_empty())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn downcast<T: 'static + Copy>(value: Box<dyn AnyValue>) -> T {
        *value.downcast_ref::<T>().unwrap()
    }

    #[test]
    fn string_passes_value_through() {
        let value = string_value_parser("Tom", ",").unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), "Tom");
    }

    #[test]
    fn string_list_splits_on_delimiter() {
        let value = string_list_value_parser("Tom-Jim-Frank", "-").unwrap();
        assert_eq!(
            value.downcast_ref::<Vec<String>>().unwrap(),
            &["Tom", "Jim", "Frank"]
        );
    }

    #[test]
    fn string_list_blank_is_empty_list() {
        let value = string_list_value_parser("", ",").unwrap();
        assert!(value.downcast_ref::<Vec<String>>().unwrap().is_empty());
    }

    #[test]
    fn string_list_unmatched_delimiter_is_single_element() {
        let value = string_list_value_parser("Tom-Jim-Frank", ",").unwrap();
        assert_eq!(
            value.downcast_ref::<Vec<String>>().unwrap(),
            &["Tom-Jim-Frank"]
        );
    }

    #[test]
    fn int_parsers_accept_digits_and_blank() {
        assert_eq!(downcast::<i64>(int_value_parser("26", ",").unwrap()), 26);
        assert_eq!(downcast::<i64>(int_value_parser("", ",").unwrap()), 0);
        assert_eq!(downcast::<i64>(int32_value_parser("-5", ",").unwrap()), -5);
        assert_eq!(downcast::<i64>(int64_value_parser("", ",").unwrap()), 0);
    }

    #[test]
    fn int_parsers_reject_garbage() {
        assert!(int_value_parser("abc", ",").is_err());
        assert!(int64_value_parser("12.5", ",").is_err());
    }

    #[test]
    fn int32_rejects_out_of_range() {
        assert!(int32_value_parser("4294967296", ",").is_err());
    }

    #[test]
    fn float_parsers() {
        assert_eq!(downcast::<f64>(float64_value_parser("1.5", ",").unwrap()), 1.5);
        assert_eq!(downcast::<f64>(float32_value_parser("", ",").unwrap()), 0.0);
        assert!(float64_value_parser("one", ",").is_err());
    }

    #[test]
    fn bool_truthy_table() {
        for raw in ["true", "TRUE", "1", "y", "YES"] {
            assert!(downcast::<bool>(bool_value_parser(raw, ",").unwrap()), "{raw}");
        }
        for raw in ["", "false", "FALSE", "0", "n", "No"] {
            assert!(!downcast::<bool>(bool_value_parser(raw, ",").unwrap()), "{raw}");
        }
    }

    #[test]
    fn bool_rejects_unknown_strings() {
        let err = bool_value_parser("maybe", ",").map(|_| ()).unwrap_err();
        assert!(err.downcast_ref::<InvalidBoolValue>().is_some());
    }

    #[test]
    fn time_parses_rfc3339_to_utc() {
        let value = time_value_parser("2019-02-05T13:32:02Z", ",").unwrap();
        let parsed = downcast::<DateTime<Utc>>(value);
        assert_eq!(parsed.to_rfc3339(), "2019-02-05T13:32:02+00:00");
    }

    #[test]
    fn time_blank_is_epoch() {
        let value = time_value_parser("", ",").unwrap();
        assert_eq!(downcast::<DateTime<Utc>>(value), DateTime::<Utc>::default());
    }

    #[test]
    fn time_rejects_malformed_input() {
        assert!(time_value_parser("not-a-date", ",").is_err());
    }

    #[test]
    fn present_reflects_non_blank_values() {
        assert_eq!(downcast::<Present>(present_value_parser("x", ",").unwrap()), Present(true));
        assert_eq!(downcast::<Present>(present_value_parser("", ",").unwrap()), Present(false));
    }

    #[test]
    fn default_parsers_cover_all_builtin_types() {
        let parsers = default_value_parsers();
        assert!(parsers.contains_key(&TypeId::of::<String>()));
        assert!(parsers.contains_key(&TypeId::of::<Vec<String>>()));
        assert!(parsers.contains_key(&TypeId::of::<isize>()));
        assert!(parsers.contains_key(&TypeId::of::<i32>()));
        assert!(parsers.contains_key(&TypeId::of::<i64>()));
        assert!(parsers.contains_key(&TypeId::of::<f32>()));
        assert!(parsers.contains_key(&TypeId::of::<f64>()));
        assert!(parsers.contains_key(&TypeId::of::<DateTime<Utc>>()));
        assert!(parsers.contains_key(&TypeId::of::<bool>()));
        assert!(parsers.contains_key(&TypeId::of::<Present>()));
    }
}
