//! Backend key addressing.
//!
//! A record of model `Note` with id `12`, stored by application `Todo` under
//! the default namespace, lives at:
//!
//! ```text
//! #m#Todo_Note_12
//! ^^^              namespace
//!    ^^^^          application identity
//!        ^         separator
//!         ^^^^     model name
//!             ^    separator
//!              ^^  record id
//! ```
//!
//! The namespace, the application identity and the model name must not
//! contain the separator, so every key splits back into exactly one
//! `(model, id)` pair.

use crate::{Error, RecordId, Result};

/// Namespace prefix used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "#m#";

/// Separator between the application identity, the model name and the id.
pub const KEY_SEPARATOR: char = '_';

/// How a backend key relates to a given model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMatch {
    /// The key belongs to another application, namespace or model.
    Foreign,
    /// The key carries the model prefix but its id segment does not parse.
    Malformed,
    /// The key addresses the record with this id.
    Record(RecordId),
}

/// Builds and parses backend keys for one `(namespace, app identity)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCodec {
    namespace: String,
    app_identity: String,
    /// `namespace ++ app_identity ++ separator`, shared by every key.
    app_prefix: String,
}

impl KeyCodec {
    /// Creates a codec, rejecting identities that would make keys ambiguous.
    pub fn new(namespace: impl Into<String>, app_identity: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        let app_identity = app_identity.into();

        if namespace.contains(KEY_SEPARATOR) {
            return Err(Error::AmbiguousIdentity {
                part: "namespace",
                value: namespace,
            });
        }
        if app_identity.is_empty() || app_identity.contains(KEY_SEPARATOR) {
            return Err(Error::AmbiguousIdentity {
                part: "app identity",
                value: app_identity,
            });
        }

        let app_prefix = format!("{namespace}{app_identity}{KEY_SEPARATOR}");
        Ok(Self {
            namespace,
            app_identity,
            app_prefix,
        })
    }

    /// Creates a codec under [`DEFAULT_NAMESPACE`].
    pub fn with_default_namespace(app_identity: impl Into<String>) -> Result<Self> {
        Self::new(DEFAULT_NAMESPACE, app_identity)
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn app_identity(&self) -> &str {
        &self.app_identity
    }

    /// Checks that a model name can take part in a key without ambiguity.
    pub fn validate_model_name(model: &str) -> Result<()> {
        if model.is_empty() || model.contains(KEY_SEPARATOR) {
            return Err(Error::InvalidModelName(model.to_string()));
        }
        Ok(())
    }

    /// The prefix shared by every key of `model`, up to and including the
    /// separator before the id.
    #[must_use]
    pub fn model_prefix(&self, model: &str) -> String {
        format!("{}{model}{KEY_SEPARATOR}", self.app_prefix)
    }

    /// Composes the backend key for `(model, id)`.
    #[must_use]
    pub fn build_key(&self, model: &str, id: RecordId) -> String {
        format!("{}{model}{KEY_SEPARATOR}{id}", self.app_prefix)
    }

    /// Extracts the record id from `key` if it addresses a record of `model`.
    ///
    /// Absence is a normal outcome: unrelated entries share the backend.
    #[must_use]
    pub fn parse_key(&self, key: &str, model: &str) -> Option<RecordId> {
        match self.classify(key, model) {
            KeyMatch::Record(id) => Some(id),
            KeyMatch::Foreign | KeyMatch::Malformed => None,
        }
    }

    /// Whether `key` already carries this codec's namespace and application
    /// prefix, as opposed to being a bare id.
    #[must_use]
    pub fn looks_like_full_key(&self, key: &str) -> bool {
        key.starts_with(&self.app_prefix)
    }

    /// Classifies `key` relative to `model`.
    #[must_use]
    pub fn classify(&self, key: &str, model: &str) -> KeyMatch {
        let Some(rest) = key.strip_prefix(&self.app_prefix) else {
            return KeyMatch::Foreign;
        };
        let Some(id_segment) = rest
            .strip_prefix(model)
            .and_then(|r| r.strip_prefix(KEY_SEPARATOR))
        else {
            return KeyMatch::Foreign;
        };
        match RecordId::parse(id_segment) {
            Ok(id) => KeyMatch::Record(id),
            Err(_) => KeyMatch::Malformed,
        }
    }
}
