//! Shared test helpers for store tests.

#![allow(dead_code)]

use recstore_model::{ModelRegistry, ModelSchema, RecordHandler, SchemaField};
use recstore_storage::{MemoryBackend, Store};
use recstore_types::KeyCodec;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

pub fn note_schema() -> ModelSchema {
    ModelSchema::new("Note")
        .with_field(SchemaField::string("title"))
        .with_field(SchemaField::number("price"))
        .with_field(SchemaField::boolean("done"))
        .with_field(SchemaField::date("due"))
}

pub fn registry() -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    registry.register(note_schema());
    registry.register(ModelSchema::new("Task").with_field(SchemaField::boolean("done")));
    registry
}

pub fn codec() -> KeyCodec {
    KeyCodec::with_default_namespace("Todo").unwrap()
}

/// A store over an empty memory backend with `Note` and `Task` registered.
pub fn memory_store() -> Store<MemoryBackend> {
    store_with(MemoryBackend::new(), registry())
}

pub fn store_with(backend: MemoryBackend, registry: ModelRegistry) -> Store<MemoryBackend> {
    Store::new(backend, codec(), Arc::new(registry)).unwrap()
}

/// A store whose `Note` model carries `handler`.
pub fn store_with_handler(handler: Arc<dyn RecordHandler>) -> Store<MemoryBackend> {
    let mut registry = registry();
    registry.register_with_handler(note_schema(), handler);
    store_with(MemoryBackend::new(), registry)
}

/// Counts ERROR-level events emitted while installed.
#[derive(Clone, Default)]
pub struct ErrorCounter(Arc<AtomicUsize>);

impl ErrorCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Runs `f` with an [`ErrorCounter`] installed and returns its result and
/// the number of error events.
pub fn count_errors<T>(f: impl FnOnce() -> T) -> (T, usize) {
    let counter = ErrorCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, counter.count())
}
