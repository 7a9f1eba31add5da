//! Scalar type casting.
//!
//! Converts raw JSON scalars into declared semantic types. The caster is
//! only ever invoked on present, non-null values; `Ok(None)` means the
//! input was a blank string that the declared type treats as absence
//! (booleans, decimals, dates and times all do — blank is not false, not
//! zero, and not an error).

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Decimal digits an f64 reliably survives round-tripping through text.
const FLOAT_DIGITS: u64 = 15;

/// Literals the boolean cast recognizes as true.
const TRUE_VALUES: [&str; 7] = ["1", "t", "T", "true", "TRUE", "on", "ON"];

/// The closed set of declarable cast types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastKind {
    String,
    Integer,
    Float,
    Boolean,
    Decimal,
    Date,
    Time,
}

impl fmt::Display for CastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CastKind::String => "string",
            CastKind::Integer => "integer",
            CastKind::Float => "float",
            CastKind::Boolean => "boolean",
            CastKind::Decimal => "decimal",
            CastKind::Date => "date",
            CastKind::Time => "time",
        };
        f.write_str(name)
    }
}

/// Per-declaration options consumed by the decimal cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastOptions {
    /// Fractional digits the result is rounded to (half-up).
    pub scale: Option<i64>,
    /// Significant digits captured from floating input, capped at the f64
    /// reliable maximum.
    pub precision: Option<u64>,
}

/// A typed value produced by the caster, or carried through raw when an
/// attribute declares no cast.
#[derive(Debug, Clone, PartialEq)]
pub enum CastValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Decimal(BigDecimal),
    Date(NaiveDate),
    Time(DateTime<FixedOffset>),
    Raw(Value),
}

impl CastValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CastValue::Str(s) => Some(s),
            CastValue::Raw(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CastValue::Int(i) => Some(*i),
            CastValue::Raw(Value::Number(n)) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CastValue::Float(f) => Some(*f),
            CastValue::Int(i) => Some(*i as f64),
            CastValue::Raw(Value::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CastValue::Bool(b) => Some(*b),
            CastValue::Raw(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<&BigDecimal> {
        match self {
            CastValue::Decimal(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CastValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            CastValue::Time(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&Value> {
        match self {
            CastValue::Raw(v) => Some(v),
            _ => None,
        }
    }
}

impl From<&str> for CastValue {
    fn from(s: &str) -> Self {
        CastValue::Str(s.to_string())
    }
}

impl From<String> for CastValue {
    fn from(s: String) -> Self {
        CastValue::Str(s)
    }
}

impl From<i64> for CastValue {
    fn from(i: i64) -> Self {
        CastValue::Int(i)
    }
}

impl From<f64> for CastValue {
    fn from(f: f64) -> Self {
        CastValue::Float(f)
    }
}

impl From<bool> for CastValue {
    fn from(b: bool) -> Self {
        CastValue::Bool(b)
    }
}

impl From<BigDecimal> for CastValue {
    fn from(d: BigDecimal) -> Self {
        CastValue::Decimal(d)
    }
}

impl From<Value> for CastValue {
    fn from(v: Value) -> Self {
        CastValue::Raw(v)
    }
}

/// Cast a present, non-null raw value to `kind`. `Ok(None)` is the
/// blank-string-as-absence outcome; errors mean the value has no defined
/// conversion.
pub fn cast(kind: CastKind, value: &Value, options: &CastOptions) -> Result<Option<CastValue>, Error> {
    match kind {
        CastKind::String => cast_to_string(value).map(Some),
        CastKind::Integer => cast_to_integer(value).map(|i| Some(CastValue::Int(i))),
        CastKind::Float => cast_to_float(value).map(|f| Some(CastValue::Float(f))),
        CastKind::Boolean => Ok(cast_to_boolean(value).map(CastValue::Bool)),
        CastKind::Decimal => cast_to_decimal(value, options),
        CastKind::Date => cast_to_date(value),
        CastKind::Time => cast_to_time(value),
    }
}

fn cast_to_string(value: &Value) -> Result<CastValue, Error> {
    match value {
        Value::String(s) => Ok(CastValue::Str(s.clone())),
        Value::Number(n) => Ok(CastValue::Str(n.to_string())),
        Value::Bool(b) => Ok(CastValue::Str(b.to_string())),
        _ => Err(unsupported(CastKind::String, value)),
    }
}

fn cast_to_integer(value: &Value) -> Result<i64, Error> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if let Some(f) = n.as_f64() {
                truncate_to_i64(f).ok_or_else(|| unsupported(CastKind::Integer, value))
            } else {
                Err(unsupported(CastKind::Integer, value))
            }
        }
        Value::String(s) => {
            let text = s.trim();
            if let Ok(i) = text.parse::<i64>() {
                Ok(i)
            } else if let Ok(f) = text.parse::<f64>() {
                truncate_to_i64(f).ok_or_else(|| unsupported(CastKind::Integer, value))
            } else {
                Err(unsupported(CastKind::Integer, value))
            }
        }
        _ => Err(unsupported(CastKind::Integer, value)),
    }
}

fn truncate_to_i64(f: f64) -> Option<i64> {
    if f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

fn cast_to_float(value: &Value) -> Result<f64, Error> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| unsupported(CastKind::Float, value)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| unsupported(CastKind::Float, value)),
        _ => Err(unsupported(CastKind::Float, value)),
    }
}

fn cast_to_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(TRUE_VALUES.contains(&s.as_str())),
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_i64() == Some(1) || n.as_u64() == Some(1)),
        _ => Some(false),
    }
}

fn cast_to_decimal(value: &Value, options: &CastOptions) -> Result<Option<CastValue>, Error> {
    let parsed = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                BigDecimal::from(i)
            } else if let Some(u) = n.as_u64() {
                BigDecimal::from(u)
            } else if let Some(f) = n.as_f64() {
                float_to_decimal(f, options.precision)
            } else {
                return Err(unsupported(CastKind::Decimal, value));
            }
        }
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => {
            BigDecimal::from_str(s.trim()).unwrap_or_else(|_| BigDecimal::from(0))
        }
        _ => return Err(unsupported(CastKind::Decimal, value)),
    };
    let scaled = match options.scale {
        Some(scale) => parsed.with_scale_round(scale, RoundingMode::HalfUp),
        None => parsed,
    };
    Ok(Some(CastValue::Decimal(scaled)))
}

/// Capture a float at a bounded number of significant decimal digits.
fn float_to_decimal(f: f64, precision: Option<u64>) -> BigDecimal {
    let digits = precision.unwrap_or(FLOAT_DIGITS).clamp(1, FLOAT_DIGITS);
    let text = format!("{:.*e}", digits as usize - 1, f);
    BigDecimal::from_str(&text)
        .unwrap_or_else(|_| BigDecimal::from(0))
        .normalized()
}

fn cast_to_date(value: &Value) -> Result<Option<CastValue>, Error> {
    let Value::String(s) = value else {
        return Err(unsupported(CastKind::Date, value));
    };
    let text = s.trim();
    if text.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(Some(CastValue::Date(date)));
    }
    parse_timestamp(text)
        .map(|t| Some(CastValue::Date(t.date_naive())))
        .ok_or_else(|| unsupported(CastKind::Date, value))
}

fn cast_to_time(value: &Value) -> Result<Option<CastValue>, Error> {
    let Value::String(s) = value else {
        return Err(unsupported(CastKind::Time, value));
    };
    let text = s.trim();
    if text.is_empty() {
        return Ok(None);
    }
    parse_timestamp(text)
        .map(|t| Some(CastValue::Time(t)))
        .ok_or_else(|| unsupported(CastKind::Time, value))
}

/// Parse an ISO-8601-ish timestamp. Text without an offset is taken as
/// UTC; a bare date is midnight UTC.
fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Some(t);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc().fixed_offset());
    }
    None
}

fn unsupported(kind: CastKind, value: &Value) -> Error {
    Error::TypeCast {
        kind,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cast_plain(kind: CastKind, value: Value) -> Option<CastValue> {
        cast(kind, &value, &CastOptions::default()).unwrap()
    }

    #[test]
    fn test_string_identity_and_coercion() {
        assert_eq!(
            cast_plain(CastKind::String, json!("transit")),
            Some(CastValue::Str("transit".into()))
        );
        assert_eq!(
            cast_plain(CastKind::String, json!(42)),
            Some(CastValue::Str("42".into()))
        );
        assert_eq!(
            cast_plain(CastKind::String, json!(true)),
            Some(CastValue::Str("true".into()))
        );
    }

    #[test]
    fn test_string_rejects_containers() {
        let err = cast(CastKind::String, &json!({"a": 1}), &CastOptions::default());
        assert!(matches!(err, Err(Error::TypeCast { .. })));
    }

    #[test]
    fn test_integer() {
        assert_eq!(cast_plain(CastKind::Integer, json!(42)), Some(CastValue::Int(42)));
        assert_eq!(cast_plain(CastKind::Integer, json!("42")), Some(CastValue::Int(42)));
        assert_eq!(cast_plain(CastKind::Integer, json!(3.9)), Some(CastValue::Int(3)));
        assert_eq!(cast_plain(CastKind::Integer, json!("3.5")), Some(CastValue::Int(3)));
        assert!(cast(CastKind::Integer, &json!("abc"), &CastOptions::default()).is_err());
        assert!(cast(CastKind::Integer, &json!(""), &CastOptions::default()).is_err());
        assert!(cast(CastKind::Integer, &json!(true), &CastOptions::default()).is_err());
    }

    #[test]
    fn test_float() {
        assert_eq!(cast_plain(CastKind::Float, json!(2.5)), Some(CastValue::Float(2.5)));
        assert_eq!(cast_plain(CastKind::Float, json!("2.5")), Some(CastValue::Float(2.5)));
        assert_eq!(cast_plain(CastKind::Float, json!(7)), Some(CastValue::Float(7.0)));
        assert!(cast(CastKind::Float, &json!("x"), &CastOptions::default()).is_err());
    }

    #[test]
    fn test_boolean_truthy_set() {
        for truthy in [json!(true), json!(1), json!("1"), json!("t"), json!("T"), json!("true"), json!("TRUE"), json!("on"), json!("ON")] {
            assert_eq!(cast_plain(CastKind::Boolean, truthy), Some(CastValue::Bool(true)));
        }
    }

    #[test]
    fn test_boolean_falsy_and_blank() {
        assert_eq!(cast_plain(CastKind::Boolean, json!("no")), Some(CastValue::Bool(false)));
        assert_eq!(cast_plain(CastKind::Boolean, json!(false)), Some(CastValue::Bool(false)));
        assert_eq!(cast_plain(CastKind::Boolean, json!(2)), Some(CastValue::Bool(false)));
        // blank is absent, not false
        assert_eq!(cast_plain(CastKind::Boolean, json!("")), None);
        assert_eq!(cast_plain(CastKind::Boolean, json!("   ")), None);
    }

    #[test]
    fn test_decimal_string_with_scale() {
        let options = CastOptions {
            scale: Some(2),
            ..Default::default()
        };
        let value = cast(CastKind::Decimal, &json!("5.21"), &options).unwrap().unwrap();
        assert_eq!(value.as_decimal(), Some(&BigDecimal::from_str("5.21").unwrap()));
    }

    #[test]
    fn test_decimal_scale_rounds_half_up() {
        let options = CastOptions {
            scale: Some(2),
            ..Default::default()
        };
        let value = cast(CastKind::Decimal, &json!("2.675"), &options).unwrap().unwrap();
        assert_eq!(value.as_decimal(), Some(&BigDecimal::from_str("2.68").unwrap()));
    }

    #[test]
    fn test_decimal_preserves_large_integer_magnitude() {
        let raw: Value = serde_json::from_str("1899000000000000000000000000").unwrap();
        let value = cast_plain(CastKind::Decimal, raw).unwrap();
        assert_eq!(
            value.as_decimal(),
            Some(&BigDecimal::from_str("1899000000000000000000000000").unwrap())
        );
    }

    #[test]
    fn test_decimal_float_precision_option() {
        let options = CastOptions {
            precision: Some(4),
            ..Default::default()
        };
        let value = cast(CastKind::Decimal, &json!(1.0 / 3.0), &options).unwrap().unwrap();
        assert_eq!(value.as_decimal(), Some(&BigDecimal::from_str("0.3333").unwrap()));
    }

    #[test]
    fn test_decimal_blank_and_unparseable() {
        assert_eq!(cast_plain(CastKind::Decimal, json!("")), None);
        let value = cast_plain(CastKind::Decimal, json!("not a number")).unwrap();
        assert_eq!(value.as_decimal(), Some(&BigDecimal::from(0)));
    }

    #[test]
    fn test_date() {
        let value = cast_plain(CastKind::Date, json!("2021-03-01")).unwrap();
        assert_eq!(value.as_date(), NaiveDate::from_ymd_opt(2021, 3, 1));
        assert_eq!(cast_plain(CastKind::Date, json!("")), None);
        assert!(cast(CastKind::Date, &json!("whenever"), &CastOptions::default()).is_err());
    }

    #[test]
    fn test_time() {
        let value = cast_plain(CastKind::Time, json!("2021-03-01T10:15:00Z")).unwrap();
        let time = value.as_time().unwrap();
        assert_eq!(time.to_rfc3339(), "2021-03-01T10:15:00+00:00");

        let naive = cast_plain(CastKind::Time, json!("2021-03-01T10:15:00")).unwrap();
        assert_eq!(naive.as_time().unwrap().to_rfc3339(), "2021-03-01T10:15:00+00:00");

        assert_eq!(cast_plain(CastKind::Time, json!(" ")), None);
        assert!(cast(CastKind::Time, &json!("later"), &CastOptions::default()).is_err());
    }
}
