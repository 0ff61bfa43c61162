use chrono::{TimeZone, Utc};
use recstore_model::{CoercionError, FieldType, Value, coerce, parse_date};
use serde_json::json;
use std::cmp::Ordering;

fn ymd(y: i32, m: u32, d: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

// ── from_json / to_json ──────────────────────────────────────────

#[test]
fn from_json_primitives() {
    assert_eq!(Value::from_json(json!("a")), Value::String("a".into()));
    assert_eq!(Value::from_json(json!(2.5)), Value::Number(2.5));
    assert_eq!(Value::from_json(json!(3)), Value::Number(3.0));
    assert_eq!(Value::from_json(json!(true)), Value::Boolean(true));
}

#[test]
fn from_json_keeps_date_like_strings_as_strings() {
    assert_eq!(
        Value::from_json(json!("2024-01-01")),
        Value::String("2024-01-01".into())
    );
}

#[test]
fn from_json_nested_is_other() {
    assert_eq!(Value::from_json(json!([1, 2])), Value::Other(json!([1, 2])));
    assert_eq!(Value::from_json(json!({"a": 1})), Value::Other(json!({"a": 1})));
    assert!(Value::from_json(json!(null)).is_null());
}

#[test]
fn to_json_integral_number_has_no_fraction() {
    assert_eq!(Value::Number(3.0).to_json(), Some(json!(3)));
    assert_eq!(Value::Number(2.21).to_json(), Some(json!(2.21)));
}

#[test]
fn to_json_non_finite_is_none() {
    assert_eq!(Value::Number(f64::NAN).to_json(), None);
    assert_eq!(Value::Number(f64::INFINITY).to_json(), None);
}

#[test]
fn to_json_date_is_rfc3339_millis() {
    assert_eq!(
        Value::Date(ymd(2024, 3, 5)).to_json(),
        Some(json!("2024-03-05T00:00:00.000Z"))
    );
}

#[test]
fn to_json_date_keeps_sub_millisecond_precision() {
    let micros = ymd(2024, 3, 5) + chrono::Duration::microseconds(1_500);
    assert_eq!(Value::Date(micros).to_json(), Some(json!("2024-03-05T00:00:00.001500Z")));
    let nanos = ymd(2024, 3, 5) + chrono::Duration::nanoseconds(7);
    let json = Value::Date(nanos).to_json().unwrap();
    assert_eq!(json, json!("2024-03-05T00:00:00.000000007Z"));
    assert_eq!(parse_date(json.as_str().unwrap()), Some(nanos));
}

#[test]
fn to_json_date_outside_four_digit_years_is_none() {
    assert_eq!(Value::Date(ymd(12000, 1, 1)).to_json(), None);
    assert_eq!(Value::Date(ymd(-1, 1, 1)).to_json(), None);
    assert_eq!(Value::Date(ymd(9999, 12, 31)).to_json(), Some(json!("9999-12-31T00:00:00.000Z")));
    assert!(serde_json::to_string(&Value::Date(ymd(12000, 1, 1))).is_err());
}

#[test]
fn serialize_rejects_non_finite() {
    assert!(serde_json::to_string(&Value::Number(f64::NAN)).is_err());
    assert_eq!(serde_json::to_string(&Value::Boolean(false)).unwrap(), "false");
}

// ── kind / repr / compare ────────────────────────────────────────

#[test]
fn kind_matches_variant() {
    assert_eq!(Value::from("x").kind(), Some(FieldType::String));
    assert_eq!(Value::from(1.0).kind(), Some(FieldType::Number));
    assert_eq!(Value::from(true).kind(), Some(FieldType::Boolean));
    assert_eq!(Value::from(ymd(2020, 1, 1)).kind(), Some(FieldType::Date));
    assert_eq!(Value::Other(json!(null)).kind(), None);
}

#[test]
fn repr_of_numbers() {
    assert_eq!(Value::Number(1.0).repr(), "1");
    assert_eq!(Value::Number(-23.0).repr(), "-23");
    assert_eq!(Value::Number(2.21).repr(), "2.21");
}

#[test]
fn compare_same_kind() {
    assert_eq!(Value::from(1.0).compare(&Value::from(3.0)), Some(Ordering::Less));
    assert_eq!(Value::from("b").compare(&Value::from("a")), Some(Ordering::Greater));
    assert_eq!(Value::from(false).compare(&Value::from(true)), Some(Ordering::Less));
    assert_eq!(
        Value::from(ymd(2020, 1, 1)).compare(&Value::from(ymd(2020, 1, 1))),
        Some(Ordering::Equal)
    );
}

#[test]
fn compare_across_kinds_is_unordered() {
    assert_eq!(Value::from(1.0).compare(&Value::from("1")), None);
    assert_eq!(Value::from(f64::NAN).compare(&Value::from(1.0)), None);
}

// ── parse_date ───────────────────────────────────────────────────

#[test]
fn parse_date_layouts() {
    assert_eq!(parse_date("2024-03-05"), Some(ymd(2024, 3, 5)));
    assert_eq!(parse_date("03/05/2024"), Some(ymd(2024, 3, 5)));
    assert_eq!(parse_date("2024-03-05T00:00:00.000Z"), Some(ymd(2024, 3, 5)));
    assert_eq!(parse_date("2024-03-05T02:00:00+02:00"), Some(ymd(2024, 3, 5)));
    assert_eq!(parse_date("2024-03-05 00:00:00"), Some(ymd(2024, 3, 5)));
    assert_eq!(parse_date("2024-03-05T00:00:00"), Some(ymd(2024, 3, 5)));
}

#[test]
fn parse_date_rejects_garbage() {
    assert_eq!(parse_date("tomorrow"), None);
    assert_eq!(parse_date("2024-13-01"), None);
}

// ── coerce ───────────────────────────────────────────────────────

#[test]
fn coerce_same_kind_is_identity() {
    assert_eq!(coerce(FieldType::Number, Value::from(2.0)), Ok(Value::from(2.0)));
}

#[test]
fn coerce_null_is_left_alone() {
    assert_eq!(
        coerce(FieldType::Date, Value::Other(json!(null))),
        Ok(Value::Other(json!(null)))
    );
}

#[test]
fn coerce_string_to_date() {
    assert_eq!(
        coerce(FieldType::Date, Value::from("2024-03-05T00:00:00.000Z")),
        Ok(Value::Date(ymd(2024, 3, 5)))
    );
}

#[test]
fn coerce_millis_to_date() {
    let d = ymd(2024, 3, 5);
    assert_eq!(
        coerce(FieldType::Date, Value::Number(d.timestamp_millis() as f64)),
        Ok(Value::Date(d))
    );
}

#[test]
fn coerce_bad_date_fails() {
    let err = coerce(FieldType::Date, Value::from("soon")).unwrap_err();
    assert_eq!(err.expected, FieldType::Date);
    assert!(err.found.contains("soon"));
    assert!(err.to_string().contains("date"));
}

#[test]
fn coerce_to_number() {
    assert_eq!(coerce(FieldType::Number, Value::from(" 2.5 ")), Ok(Value::Number(2.5)));
    assert!(coerce(FieldType::Number, Value::from("NaN")).is_err());
    assert!(coerce(FieldType::Number, Value::from(true)).is_err());
}

#[test]
fn coerce_to_boolean() {
    assert_eq!(coerce(FieldType::Boolean, Value::from("true")), Ok(Value::Boolean(true)));
    assert_eq!(coerce(FieldType::Boolean, Value::from("false")), Ok(Value::Boolean(false)));
    assert!(coerce(FieldType::Boolean, Value::from("yes")).is_err());
}

#[test]
fn coerce_to_string() {
    assert_eq!(coerce(FieldType::String, Value::from(12.0)), Ok(Value::from("12")));
    assert_eq!(coerce(FieldType::String, Value::from(true)), Ok(Value::from("true")));
}

#[test]
fn coerce_nested_fails() {
    assert_eq!(
        coerce(FieldType::String, Value::Other(json!([1]))),
        Err(CoercionError {
            expected: FieldType::String,
            found: "value [1]".into(),
        })
    );
}
