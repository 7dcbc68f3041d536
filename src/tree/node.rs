//! In-memory hierarchical tree model.
//!
//! A tree is what an open file resolves to: groups with ordered children,
//! datasets with a shape and an element type, and attributes on every node.
//! Nodes are immutable once loaded and shared via `Arc`, so the completion
//! provider can hold references without copying subtrees.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::tree::path;

/// Shared handle to a node.
pub type NodeRef = Arc<Node>;

/// Node kind: interior group or leaf dataset.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Interior node with named children. `BTreeMap` keeps key listing
    /// deterministic and already sorted for completion.
    Group { children: BTreeMap<String, NodeRef> },

    /// Leaf node carrying array metadata and an optional value preview.
    Dataset {
        shape: Vec<u64>,
        dtype: String,
        data: Option<JsonValue>,
    },
}

/// A node in a hierarchical data tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Absolute `/`-separated path of this node within its file.
    path: String,

    /// Attribute map, accessible through the `.attrs` view.
    attrs: BTreeMap<String, JsonValue>,

    /// Group or dataset payload.
    kind: NodeKind,
}

impl Node {
    /// Create a group node.
    pub fn group(
        node_path: impl Into<String>,
        attrs: BTreeMap<String, JsonValue>,
        children: BTreeMap<String, NodeRef>,
    ) -> Self {
        Self {
            path: node_path.into(),
            attrs,
            kind: NodeKind::Group { children },
        }
    }

    /// Create a dataset node.
    pub fn dataset(
        node_path: impl Into<String>,
        attrs: BTreeMap<String, JsonValue>,
        shape: Vec<u64>,
        dtype: impl Into<String>,
        data: Option<JsonValue>,
    ) -> Self {
        Self {
            path: node_path.into(),
            attrs,
            kind: NodeKind::Dataset {
                shape,
                dtype: dtype.into(),
                data,
            },
        }
    }

    /// Absolute path of this node ("/" for a file root).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path component, or "/" for the root.
    pub fn name(&self) -> &str {
        match self.path.rsplit('/').next() {
            Some("") | None => "/",
            Some(name) => name,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group { .. })
    }

    /// Human-readable kind label for messages and listings.
    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            NodeKind::Group { .. } => "group",
            NodeKind::Dataset { .. } => "dataset",
        }
    }

    /// Child names in sorted order. Empty for datasets.
    pub fn keys(&self) -> Vec<String> {
        match &self.kind {
            NodeKind::Group { children } => children.keys().cloned().collect(),
            NodeKind::Dataset { .. } => Vec::new(),
        }
    }

    /// Number of direct children. Zero for datasets.
    pub fn len(&self) -> usize {
        match &self.kind {
            NodeKind::Group { children } => children.len(),
            NodeKind::Dataset { .. } => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Direct child by name.
    pub fn child(&self, name: &str) -> Option<NodeRef> {
        match &self.kind {
            NodeKind::Group { children } => children.get(name).cloned(),
            NodeKind::Dataset { .. } => None,
        }
    }

    /// Look up a node by `/`-separated path relative to this node.
    ///
    /// A leading `/` and empty components are ignored, so `"a/b"`, `"/a/b"`
    /// and `"a//b"` all resolve the same node. The empty path resolves to
    /// `None` (callers hold the node already).
    pub fn get(self: &Arc<Self>, item_path: &str) -> Option<NodeRef> {
        let mut current = self.clone();
        let mut walked = false;
        for comp in path::components(item_path) {
            current = current.child(comp)?;
            walked = true;
        }
        walked.then_some(current)
    }

    /// Attribute names in sorted order.
    pub fn attr_names(&self) -> Vec<String> {
        self.attrs.keys().cloned().collect()
    }

    /// Attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&JsonValue> {
        self.attrs.get(name)
    }

    /// Full attribute map.
    pub fn attrs(&self) -> &BTreeMap<String, JsonValue> {
        &self.attrs
    }

    /// Dataset shape, if this node is a dataset.
    pub fn shape(&self) -> Option<&[u64]> {
        match &self.kind {
            NodeKind::Dataset { shape, .. } => Some(shape),
            NodeKind::Group { .. } => None,
        }
    }

    /// Dataset element type, if this node is a dataset.
    pub fn dtype(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Dataset { dtype, .. } => Some(dtype),
            NodeKind::Group { .. } => None,
        }
    }

    /// Total element count of a dataset (product of the shape).
    pub fn size(&self) -> Option<u64> {
        self.shape().map(|s| s.iter().product())
    }

    /// Dataset value preview, if the snapshot carried one.
    pub fn data(&self) -> Option<&JsonValue> {
        match &self.kind {
            NodeKind::Dataset { data, .. } => data.as_ref(),
            NodeKind::Group { .. } => None,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::sample_tree;
    use super::*;

    #[test]
    fn test_keys_sorted() {
        let root = sample_tree();
        assert_eq!(root.keys(), vec!["item1", "items", "readme"]);
    }

    #[test]
    fn test_get_nested_path() {
        let root = sample_tree();
        let node = root.get("item1/item2/values").unwrap();
        assert_eq!(node.path(), "/item1/item2/values");
        assert_eq!(node.shape(), Some(&[4u64][..]));
        assert_eq!(node.dtype(), Some("int32"));
    }

    #[test]
    fn test_get_tolerates_leading_and_double_separators() {
        let root = sample_tree();
        assert!(root.get("/item1/item2").is_some());
        assert!(root.get("item1//item2").is_some());
    }

    #[test]
    fn test_get_missing_path() {
        let root = sample_tree();
        assert!(root.get("item1/nope").is_none());
        assert!(root.get("items/deeper").is_none());
    }

    #[test]
    fn test_empty_path_resolves_nothing() {
        let root = sample_tree();
        assert!(root.get("").is_none());
        assert!(root.get("/").is_none());
    }

    #[test]
    fn test_dataset_has_no_keys() {
        let root = sample_tree();
        let ds = root.get("items").unwrap();
        assert!(ds.keys().is_empty());
        assert!(ds.child("anything").is_none());
    }

    #[test]
    fn test_attr_lookup() {
        let root = sample_tree();
        let grp = root.get("item1").unwrap();
        assert_eq!(grp.attr_names(), vec!["scale", "units"]);
        assert_eq!(grp.attr("units"), Some(&serde_json::json!("counts")));
        assert!(grp.attr("missing").is_none());
    }

    #[test]
    fn test_dataset_size() {
        let root = sample_tree();
        let ds = root.get("items").unwrap();
        assert_eq!(ds.size(), Some(20));
        assert!(root.get("item1").unwrap().size().is_none());
    }

    #[test]
    fn test_name() {
        let root = sample_tree();
        assert_eq!(root.name(), "/");
        assert_eq!(root.get("item1/temperature").unwrap().name(), "temperature");
    }
}
