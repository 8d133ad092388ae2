//! Relational row-insert writer

use super::{FilterSpec, FormatterSpec, Writer, WriterBase};
use crate::core::{Event, LoggerError, Result, Value};
use crate::formatters::{DbFormatter, Formatted};
use std::collections::{BTreeMap, HashMap};

/// Opaque execute/insert capability of a relational sink
pub trait DbAdapter: Send + Sync {
    fn insert(
        &mut self,
        table: &str,
        row: &BTreeMap<String, Value>,
    ) -> std::io::Result<()>;
}

/// Maps event fields onto table columns and hands rows to a `DbAdapter`.
///
/// Nested `extra` maps are flattened to dotted keys (`extra.err.code`)
/// before the rename table applies. Every mapped value must reduce to a
/// scalar; a list that survives flattening is a `Runtime` error rather
/// than being silently stringified. Timestamps arrive as strings because
/// the default formatter renders them (sink-native representation).
pub struct DbWriter {
    base: WriterBase,
    adapter: Box<dyn DbAdapter>,
    table: String,
    /// source field name (dotted) -> column name; empty = identity
    column_map: HashMap<String, String>,
}

impl DbWriter {
    pub fn new(adapter: Box<dyn DbAdapter>, table: impl Into<String>) -> Self {
        Self {
            base: WriterBase::with_formatter(Box::new(DbFormatter::new())),
            adapter,
            table: table.into(),
            column_map: HashMap::new(),
        }
    }

    /// Rename (and restrict to) the given source fields
    #[must_use]
    pub fn with_column_map(mut self, column_map: HashMap<String, String>) -> Self {
        self.column_map = column_map;
        self
    }

    fn flatten_into(prefix: &str, value: &Value, row: &mut BTreeMap<String, Value>) {
        match value {
            Value::Map(entries) => {
                for (key, val) in entries {
                    Self::flatten_into(&format!("{}.{}", prefix, key), val, row);
                }
            }
            other => {
                row.insert(prefix.to_string(), other.clone());
            }
        }
    }

    fn event_to_row(&self, event: &Event) -> Result<BTreeMap<String, Value>> {
        let mut fields = BTreeMap::new();
        fields.insert(
            "timestamp".to_string(),
            Value::String(
                self.base
                    .formatter()
                    .timestamp_format()
                    .format(&event.timestamp),
            ),
        );
        fields.insert("priority".to_string(), Value::from(event.severity.value()));
        fields.insert(
            "priorityName".to_string(),
            Value::from(event.severity_name()),
        );
        fields.insert("message".to_string(), Value::from(event.message.clone()));
        for (key, value) in &event.extra {
            Self::flatten_into(&format!("extra.{}", key), value, &mut fields);
        }

        let mut row = BTreeMap::new();
        for (field, value) in fields {
            let column = if self.column_map.is_empty() {
                Some(field.clone())
            } else {
                self.column_map.get(&field).cloned()
            };
            let Some(column) = column else { continue };

            if !value.is_scalar() {
                return Err(LoggerError::runtime(format!(
                    "value for column '{}' does not reduce to a scalar",
                    column
                )));
            }
            row.insert(column, value);
        }
        Ok(row)
    }
}

impl Writer for DbWriter {
    fn add_filter(&mut self, spec: FilterSpec) -> Result<()> {
        self.base.add_filter(spec)
    }

    fn set_formatter(&mut self, spec: FormatterSpec) -> Result<()> {
        self.base.set_formatter(spec)
    }

    fn write(&mut self, event: &Event) -> Result<()> {
        if !self.base.accepts(event) {
            return Ok(());
        }

        let rendered = match self.base.render(event) {
            Formatted::Record(record) => record,
            // A text formatter on a row sink degrades to a message-only row
            other => Event::new(event.severity, other.into_text()),
        };

        let row = self.event_to_row(&rendered)?;
        let result = self.adapter.insert(&self.table, &row);
        self.base.guard(result)
    }

    fn name(&self) -> &str {
        "db"
    }
}
