//! Document helpers shared by every store backend

use serde_json::Value;
use shared::{Document, ID_FIELD};
use uuid::Uuid;

/// Attach a freshly generated id, discarding any client-supplied one
pub fn with_new_id(mut fields: Document) -> Document {
    fields.insert(ID_FIELD.to_string(), Value::String(Uuid::new_v4().to_string()));
    fields
}

pub fn record_id(document: &Document) -> Option<&str> {
    document.get(ID_FIELD).and_then(Value::as_str)
}

pub fn has_id(document: &Document, id: &str) -> bool {
    record_id(document) == Some(id)
}

/// Whether the string field equals `value`; non-string fields never match
pub fn field_equals(document: &Document, field: &str, value: &str) -> bool {
    document.get(field).and_then(Value::as_str) == Some(value)
}

/// Shallow merge: incoming keys overwrite, the rest stay, `id` never changes
pub fn merge(target: &mut Document, partial: Document) {
    for (key, value) in partial {
        if key == ID_FIELD {
            continue;
        }
        target.insert(key, value);
    }
}
