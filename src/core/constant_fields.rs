//! Session-wide fields appended to every dispatched record
//!
//! The mapping is shared copy-on-write: taking a [`ConstantFields::snapshot`]
//! is a reference-count bump, and the next mutation clones the map only if a
//! snapshot is still alive.

use std::collections::BTreeMap;
use std::sync::Arc;

/// Name-ordered map of constant fields, last write wins on collision.
///
/// # Example
///
/// ```
/// use rust_journal_logger::ConstantFields;
///
/// let mut fields = ConstantFields::new();
/// fields.insert("SERVICE", "billing");
/// fields.insert("SERVICE", "payments");
/// assert_eq!(fields.get("SERVICE"), Some("payments"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstantFields {
    fields: Arc<BTreeMap<String, String>>,
}

impl ConstantFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite a single field
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        Arc::make_mut(&mut self.fields).insert(name.into(), value.into());
    }

    /// Replace the whole mapping
    pub fn replace(&mut self, fields: BTreeMap<String, String>) {
        self.fields = Arc::new(fields);
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        Arc::make_mut(&mut self.fields).remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Cheap immutable view of the current mapping
    pub fn snapshot(&self) -> ConstantFields {
        self.clone()
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.fields.as_ref().clone()
    }
}

impl<K, V> FromIterator<(K, V)> for ConstantFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: Arc::new(
                iter.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl From<BTreeMap<String, String>> for ConstantFields {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self {
            fields: Arc::new(fields),
        }
    }
}
