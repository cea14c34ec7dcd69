//! Flat node records and the linear store.
//!
//! The linear store is the wire-side representation: an ordered sequence of
//! records, each carrying its own id, an optional parent id, and arbitrary
//! payload fields that pass through the crate untouched.

use std::collections::HashMap;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::errors::{MalformedTreeError, TreeResult};

/// Unique node identifier within a store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// One flat node record.
///
/// `parent_id` is serialized as `parentId`; `pid` is accepted as an input
/// alias since both spellings occur in the wild. Every other field of the
/// incoming object lands in `payload` and is emitted back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    #[serde(
        rename = "parentId",
        alias = "pid",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<NodeId>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl NodeRecord {
    /// A record with no parent reference.
    pub fn root(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            payload: Map::new(),
        }
    }

    /// A record referencing `parent`.
    pub fn child(id: impl Into<NodeId>, parent: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            parent_id: Some(parent.into()),
            payload: Map::new(),
        }
    }

    /// Attach a payload field, builder-style.
    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        self.payload.insert(key.to_string(), value);
        self
    }

    /// Display label from the payload: `name`, then `title`.
    pub fn label(&self) -> Option<&str> {
        self.payload
            .get("name")
            .and_then(Value::as_str)
            .or_else(|| self.payload.get("title").and_then(Value::as_str))
    }
}

/// Ordered collection of flat node records.
///
/// Produced once by an external source (API fetch, file, generator) and
/// treated as immutable input by everything downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinearStore {
    records: Vec<NodeRecord>,
}

impl LinearStore {
    pub fn new(records: Vec<NodeRecord>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of flat records with `parentId`/`pid` parent keys.
    #[instrument(level = "debug", skip(json))]
    pub fn from_json_str(json: &str) -> TreeResult<Self> {
        Ok(Self {
            records: serde_json::from_str(json)?,
        })
    }

    /// Parse a JSON array whose parent reference lives under `parent_field`.
    ///
    /// The custom key is normalized before deserialization; all remaining
    /// fields become payload.
    #[instrument(level = "debug", skip(value))]
    pub fn from_json_value(value: Value, parent_field: &str) -> TreeResult<Self> {
        let items: Vec<Map<String, Value>> = serde_json::from_value(value)?;
        let mut records = Vec::with_capacity(items.len());
        for mut obj in items {
            if parent_field != "parentId" {
                if let Some(parent) = obj.remove(parent_field) {
                    obj.insert("parentId".to_string(), parent);
                }
            }
            records.push(serde_json::from_value(Value::Object(obj))?);
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[NodeRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NodeRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The single record with no parent reference.
    ///
    /// Fails when the store has zero or more than one root candidate; the
    /// first parentless record is never silently promoted.
    pub fn root(&self) -> Result<&NodeRecord, MalformedTreeError> {
        let mut roots = self.records.iter().filter(|r| r.parent_id.is_none());
        match (roots.next(), roots.next()) {
            (Some(root), None) => Ok(root),
            (None, _) => Err(MalformedTreeError::MissingRoot),
            (Some(_), Some(_)) => Err(MalformedTreeError::MultipleRoots(
                self.records
                    .iter()
                    .filter(|r| r.parent_id.is_none())
                    .count(),
            )),
        }
    }

    /// Records whose parent reference equals `parent`, in store order.
    pub fn children_of(
        &self,
        parent: Option<NodeId>,
    ) -> impl Iterator<Item = &NodeRecord> + '_ {
        self.records.iter().filter(move |r| r.parent_id == parent)
    }

    /// Record indices grouped by parent id, preserving store order within
    /// each group. Shared by the builder, the depth analyzer, and the
    /// linear extractor.
    pub(crate) fn children_index(&self) -> HashMap<Option<NodeId>, Vec<usize>> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.parent_id, i))
            .into_group_map()
    }
}

impl From<Vec<NodeRecord>> for LinearStore {
    fn from(records: Vec<NodeRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a LinearStore {
    type Item = &'a NodeRecord;
    type IntoIter = std::slice::Iter<'a, NodeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
