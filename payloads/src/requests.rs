use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// A file chosen in a form. Holds a shared handle to the bytes so drafts can
/// be cloned freely.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub content_type: Option<String>,
    pub data: Arc<[u8]>,
}

impl FileUpload {
    pub fn new(
        name: impl Into<String>,
        content_type: Option<String>,
        data: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type,
            data: data.into(),
        }
    }
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// The value of a single form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    File(FileUpload),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Loose boolean coercion used when seeding checkboxes from record data.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::Bool(b) => *b,
            Self::File(_) => true,
        }
    }

    /// Text containing only whitespace counts as blank. Booleans and files
    /// never do.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<FileUpload> for FieldValue {
    fn from(value: FileUpload) -> Self {
        Self::File(value)
    }
}

/// Files are never part of a JSON body; the client switches to multipart
/// whenever one is present. Serializing one yields its name.
impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::File(file) => serializer.serialize_str(&file.name),
        }
    }
}

/// Field name to value mapping submitted by create/edit forms.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, FieldValue>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder form of [`FormData::set`].
    pub fn with(
        mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.set(name, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the payload must be sent as multipart form data.
    pub fn has_file(&self) -> bool {
        self.0.values().any(|v| matches!(v, FieldValue::File(_)))
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for FormData {
    type Item = (String, FieldValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields_serialize_as_json_object() {
        let data = FormData::new()
            .with("name", "Widget")
            .with("featured", true);

        assert!(!data.has_file());
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "Widget", "featured": true })
        );
    }

    #[test]
    fn file_field_requires_multipart() {
        let file = FileUpload::new(
            "widget.png",
            Some("image/png".into()),
            vec![1u8, 2, 3],
        );
        let data = FormData::new().with("name", "Widget").with("image", file);

        assert!(data.has_file());
    }

    #[test]
    fn truthiness_of_seed_values() {
        assert!(!FieldValue::text("").is_truthy());
        assert!(FieldValue::text("yes").is_truthy());
        assert!(FieldValue::Bool(true).is_truthy());
        assert_eq!(FieldValue::Bool(false).as_bool(), Some(false));
        assert_eq!(FieldValue::text("true").as_bool(), None);
        assert!(FieldValue::text("   ").is_blank());
        assert!(!FieldValue::Bool(false).is_blank());
    }
}
