use chrono::{TimeZone, Utc};
use recstore_model::{Record, RecordState, Value};
use recstore_types::RecordId;

fn make_record() -> Record {
    Record::new("Note")
        .with_id(RecordId::new(3))
        .with("title", "buy some food")
        .with("price", 2.21)
        .with("done", false)
        .with("due", Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap())
}

// ── Construction ─────────────────────────────────────────────────

#[test]
fn new_record_is_empty_and_new() {
    let r = Record::new("Note");
    assert_eq!(r.model, "Note");
    assert_eq!(r.id, None);
    assert_eq!(r.state, RecordState::New);
    assert!(r.fields.is_empty());
}

#[test]
fn with_id_sets_id() {
    assert_eq!(make_record().id, Some(RecordId::new(3)));
}

#[test]
fn default_state_is_new() {
    assert_eq!(RecordState::default(), RecordState::New);
}

// ── Field access ─────────────────────────────────────────────────

#[test]
fn get_str() {
    assert_eq!(make_record().get_str("title"), Some("buy some food"));
}

#[test]
fn get_str_wrong_type() {
    assert_eq!(make_record().get_str("price"), None);
}

#[test]
fn get_number() {
    assert_eq!(make_record().get_number("price"), Some(2.21));
}

#[test]
fn get_bool() {
    assert_eq!(make_record().get_bool("done"), Some(false));
}

#[test]
fn get_date() {
    let due = make_record().get_date("due").unwrap();
    assert_eq!(due, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
}

#[test]
fn get_missing_field() {
    let r = make_record();
    assert!(r.get("nope").is_none());
    assert_eq!(r.get_number("nope"), None);
}

#[test]
fn set_returns_previous() {
    let mut r = make_record();
    let old = r.set("title", "new");
    assert_eq!(old, Some(Value::from("buy some food")));
    assert_eq!(r.get_str("title"), Some("new"));
}

#[test]
fn set_new_field_returns_none() {
    let mut r = Record::new("Note");
    assert_eq!(r.set("x", 1i64), None);
    assert_eq!(r.get_number("x"), Some(1.0));
}

// ── Equality ─────────────────────────────────────────────────────

#[test]
fn clone_is_equal() {
    let r = make_record();
    assert_eq!(r.clone(), r);
}

#[test]
fn state_participates_in_equality() {
    let a = make_record();
    let mut b = a.clone();
    b.state = RecordState::Valid;
    assert_ne!(a, b);
}

#[test]
fn record_state_serde() {
    assert_eq!(serde_json::to_string(&RecordState::Valid).unwrap(), r#""valid""#);
}
