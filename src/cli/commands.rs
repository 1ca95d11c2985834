//! CLI command implementations
//!
//! Commands are thin bindings of the `CollectionService` API: they decode
//! JSON arguments, make one service call, and encode the result.

use std::io;
use std::path::Path;

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::Config;
use crate::document::{DocumentData, FieldFilter};
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::schema::{CollectionSchema, FieldDefinition};
use crate::service::CollectionService;

use super::args::{Cli, Command, DocAction, SchemaAction};
use super::errors::{CliError, CliResult};
use super::io::{read_input, write_outcome};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
///
/// The outcome, success or failure, is reported as one JSON line on
/// stdout; the returned error only selects the exit status.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    let outcome = load_config(cli.config.as_deref()).and_then(|config| {
        let service = CollectionService::open(&config);
        execute(&service, cli.command)
    });

    write_outcome(&mut io::stdout(), outcome)
}

/// Load the config file, or defaults without one, and apply its log level
fn load_config(path: Option<&Path>) -> CliResult<Config> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    Logger::set_min_severity(config.severity()?);

    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("data_dir", config.data_dir.as_str()),
            ("storage", config.storage.as_str()),
        ],
    );
    Ok(config)
}

/// Run one command against a service and return the response data
pub fn execute(service: &CollectionService, command: Command) -> CliResult<Value> {
    match command {
        Command::Schema { action } => schema_command(service, action),
        Command::Doc { action } => doc_command(service, action),
    }
}

fn schema_command(service: &CollectionService, action: SchemaAction) -> CliResult<Value> {
    match action {
        SchemaAction::Create { input, created_by } => {
            let mut schema: CollectionSchema = serde_json::from_value(read_input(&input)?)?;
            if let Some(creator) = created_by {
                schema = schema.created_by(creator);
            }
            to_data(&service.create_schema(schema)?)
        }
        SchemaAction::Get { name } => to_data(&service.get_schema(&name)?),
        SchemaAction::List => to_data(&service.list_schemas()?),
        SchemaAction::Update { name, input } => {
            let fields = field_list(read_input(&input)?)?;
            to_data(&service.update_schema(&name, fields)?)
        }
        SchemaAction::Delete { name } => Ok(json!({"deleted": service.delete_schema(&name)?})),
        SchemaAction::Exists { name } => Ok(json!({"exists": service.schema_exists(&name)?})),
    }
}

fn doc_command(service: &CollectionService, action: DocAction) -> CliResult<Value> {
    match action {
        DocAction::Create { collection, input } => {
            let payload = document_data(read_input(&input)?)?;
            to_data(&service.create_document(&collection, payload)?)
        }
        DocAction::Get { collection, id } => to_data(&service.get_document(&collection, &id)?),
        DocAction::List {
            collection,
            filters,
        } => {
            if filters.is_empty() {
                return to_data(&service.list_documents(&collection)?);
            }
            let filter = FieldFilter::parse_pairs(&filters).map_err(CliError::invalid_input)?;
            to_data(&service.find_documents(&collection, &filter)?)
        }
        DocAction::Update {
            collection,
            id,
            input,
        } => {
            let updates = document_data(read_input(&input)?)?;
            to_data(&service.update_document(&collection, &id, updates)?)
        }
        DocAction::Delete { collection, id } => {
            Ok(json!({"deleted": service.delete_document(&collection, &id)?}))
        }
    }
}

fn to_data<T: Serialize>(value: &T) -> CliResult<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Documents are JSON objects
fn document_data(value: Value) -> CliResult<DocumentData> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(CliError::invalid_input("Document data must be a JSON object")),
    }
}

/// Either a bare array of field definitions or a schema object's `fields`
fn field_list(value: Value) -> CliResult<Vec<FieldDefinition>> {
    let fields = match value {
        Value::Object(mut map) => map
            .remove("fields")
            .ok_or_else(|| CliError::invalid_input("Expected a 'fields' array"))?,
        other => other,
    };
    Ok(serde_json::from_value(fields)?)
}
