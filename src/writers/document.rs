//! Document-store writer

use super::{FilterSpec, FormatterSpec, Writer, WriterBase};
use crate::core::{Event, Result};
use crate::formatters::{DbFormatter, Formatted};
use serde_json::json;
use std::collections::HashMap;

/// Opaque insert capability of a schemaless document sink
pub trait DocumentStore: Send + Sync {
    fn insert(&mut self, collection: &str, document: &serde_json::Value) -> std::io::Result<()>;
}

/// Stores each event as one JSON document, nesting preserved.
///
/// Unlike the row-based `DbWriter` there is no flattening and no scalar
/// restriction; the `extra` tree goes in as-is. The default formatter
/// renders timestamps to strings so the document is plain JSON.
pub struct DocumentWriter {
    base: WriterBase,
    store: Box<dyn DocumentStore>,
    collection: String,
    /// top-level document key -> stored key; unmapped keys keep their name
    field_map: HashMap<String, String>,
}

impl DocumentWriter {
    pub fn new(store: Box<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            base: WriterBase::with_formatter(Box::new(DbFormatter::new())),
            store,
            collection: collection.into(),
            field_map: HashMap::new(),
        }
    }

    /// Rename top-level document fields
    #[must_use]
    pub fn with_field_map(mut self, field_map: HashMap<String, String>) -> Self {
        self.field_map = field_map;
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn event_to_document(&self, event: &Event) -> serde_json::Value {
        let mut extra = serde_json::Map::new();
        for (key, value) in &event.extra {
            extra.insert(key.clone(), value.to_json_value());
        }
        let document = json!({
            "timestamp": event.timestamp.to_rfc3339(),
            "priority": event.severity.value(),
            "priorityName": event.severity_name(),
            "message": event.message,
            "extra": serde_json::Value::Object(extra),
        });
        if self.field_map.is_empty() {
            return document;
        }

        let serde_json::Value::Object(fields) = document else {
            unreachable!("document is always an object");
        };
        let renamed = fields
            .into_iter()
            .map(|(key, value)| {
                let key = self.field_map.get(&key).cloned().unwrap_or(key);
                (key, value)
            })
            .collect();
        serde_json::Value::Object(renamed)
    }
}

impl Writer for DocumentWriter {
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

        let document = match self.base.render(event) {
            Formatted::Record(record) => self.event_to_document(&record),
            other => self.event_to_document(&Event::new(event.severity, other.into_text())),
        };

        let result = self.store.insert(&self.collection, &document);
        self.base.guard(result)
    }

    fn name(&self) -> &str {
        "document"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Severity, Value};
    use parking_lot::Mutex;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct FakeStore(Arc<Mutex<Vec<(String, serde_json::Value)>>>);

    impl DocumentStore for FakeStore {
        fn insert(
            &mut self,
            collection: &str,
            document: &serde_json::Value,
        ) -> std::io::Result<()> {
            self.0.lock().push((collection.to_string(), document.clone()));
            Ok(())
        }
    }

    #[test]
    fn test_document_preserves_nesting() {
        let store = FakeStore::default();
        let docs = store.clone();
        let mut writer = DocumentWriter::new(Box::new(store), "events");

        let mut err = BTreeMap::new();
        err.insert("code".to_string(), Value::from(500));
        err.insert("tags".to_string(), Value::from(vec!["db", "timeout"]));
        writer
            .write(&Event::new(Severity::Error, "query failed").with_extra_field("err", Value::Map(err)))
            .unwrap();

        let inserted = docs.0.lock();
        let (collection, doc) = &inserted[0];
        assert_eq!(collection, "events");
        assert_eq!(doc["message"], "query failed");
        assert_eq!(doc["priority"], 3);
        assert_eq!(doc["extra"]["err"]["code"], 500);
        assert_eq!(doc["extra"]["err"]["tags"][1], "timeout");
    }

    #[test]
    fn test_field_map_renames_top_level_keys() {
        let store = FakeStore::default();
        let docs = store.clone();
        let mut map = HashMap::new();
        map.insert("message".to_string(), "msg".to_string());
        let mut writer = DocumentWriter::new(Box::new(store), "events").with_field_map(map);

        writer.write(&Event::new(Severity::Info, "renamed")).unwrap();

        let inserted = docs.0.lock();
        let doc = &inserted[0].1;
        assert_eq!(doc["msg"], "renamed");
        assert!(doc.get("message").is_none());
        assert_eq!(doc["priority"], 6);
    }

    #[test]
    fn test_failed_insert_is_runtime_error() {
        struct FailingStore;
        impl DocumentStore for FailingStore {
            fn insert(&mut self, _: &str, _: &serde_json::Value) -> std::io::Result<()> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "store down"))
            }
        }

        let mut writer = DocumentWriter::new(Box::new(FailingStore), "events");
        let err = writer.write(&Event::new(Severity::Error, "m")).unwrap_err();
        assert!(err.to_string().contains("Unable to write"));
    }
}
