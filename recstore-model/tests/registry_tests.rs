use recstore_model::{
    ModelRegistry, ModelSchema, Record, RecordHandler, RecordState, SchemaField, Value,
};
use recstore_types::RecordId;
use std::collections::BTreeMap;
use std::sync::Arc;

fn registry() -> ModelRegistry {
    let mut r = ModelRegistry::new();
    r.register(ModelSchema::new("Note").with_field(SchemaField::string("title")));
    r.register(ModelSchema::new("Task").with_field(SchemaField::boolean("done")));
    r
}

struct RejectAll;
impl RecordHandler for RejectAll {
    fn validate(&self, _record: &Record) -> Result<(), String> {
        Err("nope".into())
    }
}

// ── Schemas ──────────────────────────────────────────────────────

#[test]
fn schema_lookup() {
    let r = registry();
    assert_eq!(r.schema("Note").unwrap().model, "Note");
    assert!(r.schema("Missing").is_none());
}

#[test]
fn register_replaces_and_returns_old() {
    let mut r = registry();
    let old = r.register(ModelSchema::new("Note"));
    assert_eq!(old.unwrap().fields.len(), 1);
    assert!(r.schema("Note").unwrap().fields.is_empty());
}

#[test]
fn models_lists_registered() {
    let r = registry();
    let mut models: Vec<&str> = r.models().collect();
    models.sort_unstable();
    assert_eq!(models, vec!["Note", "Task"]);
}

#[test]
fn handler_lookup() {
    let mut r = registry();
    assert!(r.handler("Note").is_none());
    r.register_with_handler(ModelSchema::new("Note"), Arc::new(RejectAll));
    let h = r.handler("Note").unwrap();
    assert!(h.validate(&Record::new("Note")).is_err());
}

#[test]
fn debug_lists_models_sorted() {
    let dbg = format!("{:?}", registry());
    assert!(dbg.contains(r#"["Note", "Task"]"#), "got: {dbg}");
}

// ── Factory ──────────────────────────────────────────────────────

#[test]
fn create_record_allocates_increasing_ids() {
    let r = registry();
    let a = r.create_record("Note").unwrap();
    let b = r.create_record("Note").unwrap();
    assert_eq!(a.id, Some(RecordId::new(1)));
    assert_eq!(b.id, Some(RecordId::new(2)));
    assert_eq!(a.state, RecordState::New);
    assert!(r.is_cached("Note", RecordId::new(2)));
}

#[test]
fn create_record_ids_are_per_model() {
    let r = registry();
    r.create_record("Note").unwrap();
    let t = r.create_record("Task").unwrap();
    assert_eq!(t.id, Some(RecordId::new(1)));
}

#[test]
fn create_record_unknown_model() {
    assert!(registry().create_record("Missing").is_none());
}

#[test]
fn instantiate_wraps_fields_and_tracks_id() {
    let r = registry();
    let mut fields = BTreeMap::new();
    fields.insert("title".to_string(), Value::from("hello"));
    let rec = r.instantiate("Note", fields, RecordId::new(40), RecordState::Valid);

    assert_eq!(rec.id, Some(RecordId::new(40)));
    assert_eq!(rec.state, RecordState::Valid);
    assert_eq!(rec.get_str("title"), Some("hello"));
    assert!(r.is_cached("Note", RecordId::new(40)));

    // Allocation continues past the highest id seen.
    let next = r.create_record("Note").unwrap();
    assert_eq!(next.id, Some(RecordId::new(41)));
}

// ── Id cache ─────────────────────────────────────────────────────

#[test]
fn forget_drops_cached_id() {
    let r = registry();
    r.track("Note", RecordId::new(5));
    assert!(r.forget("Note", RecordId::new(5)));
    assert!(!r.is_cached("Note", RecordId::new(5)));
    assert!(!r.forget("Note", RecordId::new(5)));
}

#[test]
fn forget_unknown_model_is_false() {
    assert!(!registry().forget("Missing", RecordId::new(1)));
}

#[test]
fn cached_ids_sorted() {
    let r = registry();
    r.track("Note", RecordId::new(9));
    r.track("Note", RecordId::new(2));
    assert_eq!(r.cached_ids("Note"), vec![RecordId::new(2), RecordId::new(9)]);
    assert!(r.cached_ids("Task").is_empty());
}

#[test]
fn registry_is_shareable_across_threads() {
    let r = Arc::new(registry());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let r = Arc::clone(&r);
            std::thread::spawn(move || r.create_record("Note").unwrap().id.unwrap())
        })
        .collect();
    let mut ids: Vec<RecordId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 4);
}
