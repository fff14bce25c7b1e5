//! Unified Result Model
//!
//! Every command maps its outcome to this model before rendering output.
//! Flatten output keeps its order: the sequence of documents is the order
//! in which the renderer concatenates them.

use serde::{Deserialize, Serialize};

/// The kind of result item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Document,
    Asset,
    Artifact,
    Dependency,
    Error,
}

/// Metadata for a result item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Discriminator of the asset group the file belongs to (None for the root document)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<usize>,

    /// Where the file came from, relative to the source tree
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// File size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Content hash (XXH3)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

/// Error information for a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemError {
    pub code: String,
    pub message: String,
}

impl ItemError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The unified result item that all commands produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    /// The kind of this result
    pub kind: Kind,

    /// File name or path, using '/' as separator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Short human-readable note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Structured data payload (doctor status and the like)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Metadata
    #[serde(default)]
    pub meta: Meta,

    /// Errors (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ItemError>,
}

impl ResultItem {
    fn with_kind(kind: Kind, path: Option<String>) -> Self {
        Self {
            kind,
            path,
            excerpt: None,
            data: None,
            meta: Meta::default(),
            errors: Vec::new(),
        }
    }

    /// Create a flattened document result
    pub fn document(name: impl Into<String>) -> Self {
        Self::with_kind(Kind::Document, Some(name.into()))
    }

    /// Create a flattened asset result
    pub fn asset(name: impl Into<String>) -> Self {
        Self::with_kind(Kind::Asset, Some(name.into()))
    }

    /// Create a produced artifact result (PDF manual, plugin package)
    pub fn artifact(path: impl Into<String>) -> Self {
        Self::with_kind(Kind::Artifact, Some(path.into()))
    }

    /// Create an external dependency status result
    pub fn dependency(name: impl Into<String>, excerpt: impl Into<String>) -> Self {
        let mut item = Self::with_kind(Kind::Dependency, None);
        item.excerpt = Some(format!("{}: {}", name.into(), excerpt.into()));
        item
    }

    /// Create a new error result
    pub fn error(error: ItemError) -> Self {
        let mut item = Self::with_kind(Kind::Error, None);
        item.errors.push(error);
        item
    }

    /// Set metadata
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Set structured data payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Add an error
    pub fn with_error(mut self, error: ItemError) -> Self {
        self.errors.push(error);
        self
    }
}

/// Ordered collection of result items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    /// Items of the given kind, in insertion order
    pub fn of_kind(&self, kind: Kind) -> impl Iterator<Item = &ResultItem> {
        self.items.iter().filter(move |item| item.kind == kind)
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultItem;
    type IntoIter = std::vec::IntoIter<ResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<ResultItem> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ResultItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
