//! Command definitions and execution for the `recstore` binary.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use recstore_model::Record;
use recstore_query::{FindRequest, Found, find};
use recstore_storage::{Backend, Store, StoreConfig, build_record};
use recstore_types::RecordId;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "recstore")]
#[command(about = "Inspect and edit records in a recstore data file")]
pub struct Cli {
    /// Path to the store configuration (TOML)
    #[arg(short, long)]
    pub config: PathBuf,

    /// Data file, overriding `data_path` from the configuration
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List the keys of every record of a model
    Keys { model: String },

    /// Print records as JSON, by key, by query or all of them
    Find {
        model: String,
        /// Full key or bare id
        #[arg(long, conflicts_with = "query")]
        key: Option<String>,
        /// Predicate such as `price < 12`
        #[arg(long)]
        query: Option<String>,
    },

    /// Save a record from a JSON object
    Put { model: String, id: String, json: String },

    /// Delete one record
    Delete { model: String, id: String },

    /// Count the records of a model
    Count { model: String },
}

/// Opens the store described by `config`.
///
/// A configured data path selects the file backend, otherwise the store
/// lives in memory for the duration of the process.
pub fn open_store(
    mut config: StoreConfig,
    data: Option<PathBuf>,
) -> Result<Store<Box<dyn Backend>>> {
    if data.is_some() {
        config.data_path = data;
    }
    let backend: Box<dyn Backend> = match &config.data_path {
        Some(path) => Box::new(
            config
                .file_backend()
                .with_context(|| format!("Failed to open data file {}", path.display()))?,
        ),
        None => {
            info!("No data path configured, using an in-memory store");
            Box::new(config.memory_backend())
        }
    };
    let codec = config.key_codec().context("Invalid key namespace")?;
    Store::new(backend, codec, Arc::new(config.registry())).context("Invalid model configuration")
}

/// Runs `command` against `store` and returns what should be printed.
pub fn execute<B: Backend>(store: &Store<B>, command: &Command) -> Result<String> {
    match command {
        Command::Keys { model } => Ok(store.all_keys(model).join("\n")),
        Command::Count { model } => Ok(store.count(model).to_string()),
        Command::Find { model, key, query } => {
            let request = FindRequest {
                key: key.clone(),
                query: query.clone(),
            };
            let found = find(store, model, &request).context("Lookup failed")?;
            render(found)
        }
        Command::Put { model, id, json } => {
            let id = RecordId::parse(id)?;
            let schema = store
                .registry()
                .schema(model)
                .with_context(|| format!("Unknown model {model}"))?;
            let fields = build_record(json, schema).context("Invalid record JSON")?;
            let mut record = Record::new(model.as_str()).with_id(id);
            record.fields = fields;
            let key = store.try_save(&record).context("Failed to save record")?;
            Ok(key)
        }
        Command::Delete { model, id } => {
            let id = RecordId::parse(id)?;
            if !store.delete(model, id) {
                bail!("No {model} record with id {id}");
            }
            Ok(format!("deleted {}", store.codec().build_key(model, id)))
        }
    }
}

fn render(found: Found) -> Result<String> {
    let json = match found {
        Found::One(None) => serde_json::Value::Null,
        Found::One(Some(record)) => to_json(&record)?,
        Found::Many(records) => records
            .iter()
            .map(to_json)
            .collect::<Result<Vec<_>>>()?
            .into(),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

fn to_json(record: &Record) -> Result<serde_json::Value> {
    Ok(serde_json::json!({
        "id": record.id.map(|id| id.get()),
        "fields": serde_json::to_value(&record.fields)?,
    }))
}
