use crate::Record;

/// Optional per-model hooks run by the store around persistence.
///
/// Most models do NOT need one: the store saves and loads any record that
/// matches its schema. Implement this only for:
/// - Input validation before a save (e.g., required fields)
/// - Post-load enrichment (e.g., computing derived fields)
pub trait RecordHandler: Send + Sync {
    /// Validate a record before it is written.
    /// Return `Err(message)` to reject the write.
    fn validate(&self, record: &Record) -> Result<(), String> {
        let _ = record;
        Ok(())
    }

    /// Called after a record is rebuilt from the backend, before it is
    /// returned to the caller.
    fn on_after_load(&self, record: &mut Record) {
        let _ = record;
    }
}
