//! Visualization data model
//!
//! Mirrors the JSON layout of the watched files and of the snapshot payload:
//!
//! ```json
//! {"files":[{"name":"shapes/a","items":[{"name":"box","polygon":{"rings":[[[0,0],[10,0]]]}}]}]}
//! ```
//!
//! Serialization is canonical: fields are written in declaration order and
//! collections in their stored order, so two equal snapshots always produce
//! identical bytes.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;

/// A single point; `[x, y]` or `[x, y, z]`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct Vertex(pub Vec<f64>);

impl Vertex {
    pub fn xy(x: f64, y: f64) -> Self {
        Self(vec![x, y])
    }

    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self(vec![x, y, z])
    }

    pub fn coords(&self) -> &[f64] {
        &self.0
    }
}

impl Serialize for Vertex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;

        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for &c in &self.0 {
            // Whole numbers are written without a fraction (`10`, not `10.0`)
            if c.fract() == 0.0 && c.abs() < 1e15 {
                seq.serialize_element(&(c as i64))?;
            } else {
                seq.serialize_element(&c)?;
            }
        }
        seq.end()
    }
}

/// Ordered vertices; the first ring of a polygon is its outer boundary
pub type Ring = Vec<Vertex>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    #[serde(default, deserialize_with = "null_as_default")]
    pub rings: Vec<Ring>,
}

/// One drawable entity
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Item {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polygon: Option<Polygon>,
}

/// The decoded content of one watched file
///
/// `name` is always the path-derived name, never the one stored in the file.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct VizFile {
    pub name: String,
    pub items: Vec<Item>,
}

/// On-disk shape of a visualization file; a stored `name` is ignored
#[derive(Debug, Deserialize)]
pub(crate) struct VizFileRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Item>,
}

impl VizFileRecord {
    pub fn into_viz_file(self, name: String) -> VizFile {
        VizFile {
            name,
            items: self.items,
        }
    }
}

/// Every watched file at one instant, in walk order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Snapshot {
    pub files: Vec<VizFile>,
}

impl Snapshot {
    pub fn new(files: Vec<VizFile>) -> Self {
        Self { files }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Canonical serialization used for both change detection and delivery
    pub fn to_payload(&self) -> Result<Payload> {
        let json = serde_json::to_string(self)?;
        Ok(Payload(Arc::from(json)))
    }
}

/// A serialized snapshot, cheap to clone and share between subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload(Arc<str>);

impl Payload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

/// Accept `null` wherever a list may also be omitted
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
