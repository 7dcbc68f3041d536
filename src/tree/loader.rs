//! Snapshot loader: builds a tree from a JSON description.
//!
//! A snapshot is a JSON object describing one node. A node with a `children`
//! map is a group; a node with `shape`/`dtype` is a dataset. Either may carry
//! an `attrs` map. Example:
//!
//! ```json
//! {
//!   "children": {
//!     "item1": {
//!       "attrs": {"units": "counts"},
//!       "children": {
//!         "temperature": {"shape": [100], "dtype": "float64"}
//!       }
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::SnapshotError;
use crate::tree::{Node, NodeRef};

/// Raw serde form of one snapshot node.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNode {
    #[serde(default)]
    attrs: BTreeMap<String, JsonValue>,

    children: Option<BTreeMap<String, RawNode>>,

    shape: Option<Vec<u64>>,

    dtype: Option<String>,

    data: Option<JsonValue>,
}

/// Load a tree from a snapshot file.
pub fn load_file(path: &Path) -> Result<NodeRef, SnapshotError> {
    let text = fs::read_to_string(path)
        .map_err(|_| SnapshotError::FileNotFound(path.display().to_string()))?;
    let root = load_str(&text)?;
    debug!(file = %path.display(), entries = root.len(), "loaded snapshot");
    Ok(root)
}

/// Load a tree from snapshot text.
pub fn load_str(text: &str) -> Result<NodeRef, SnapshotError> {
    let raw: RawNode = serde_json::from_str(text)?;
    if raw.children.is_none() {
        return Err(SnapshotError::InvalidStructure(
            "root node must be a group".to_string(),
        ));
    }
    build("/", raw)
}

/// Recursively convert a raw node into the immutable tree form.
fn build(node_path: &str, raw: RawNode) -> Result<NodeRef, SnapshotError> {
    match (raw.children, raw.shape) {
        (Some(_), Some(_)) => Err(SnapshotError::InvalidStructure(format!(
            "'{node_path}' has both children and a shape"
        ))),
        (Some(children), None) => {
            if raw.dtype.is_some() || raw.data.is_some() {
                return Err(SnapshotError::InvalidStructure(format!(
                    "group '{node_path}' carries dataset fields"
                )));
            }
            let mut built = BTreeMap::new();
            for (name, child) in children {
                if name.is_empty() || name.contains('/') {
                    return Err(SnapshotError::InvalidStructure(format!(
                        "invalid child name '{name}' under '{node_path}'"
                    )));
                }
                let child_path = if node_path == "/" {
                    format!("/{name}")
                } else {
                    format!("{node_path}/{name}")
                };
                built.insert(name, build(&child_path, child)?);
            }
            Ok(Arc::new(Node::group(node_path, raw.attrs, built)))
        }
        (None, shape) => {
            let shape = shape.unwrap_or_default();
            let dtype = raw.dtype.unwrap_or_else(|| "unknown".to_string());
            Ok(Arc::new(Node::dataset(
                node_path, raw.attrs, shape, dtype, raw.data,
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "attrs": {"created_by": "acquisition"},
        "children": {
            "item1": {
                "attrs": {"units": "counts"},
                "children": {
                    "temperature": {"shape": [100], "dtype": "float64"},
                    "item2": {
                        "children": {
                            "values": {"shape": [4], "dtype": "int32", "data": [1, 2, 3, 4]}
                        }
                    }
                }
            },
            "readme": {"shape": [1], "dtype": "str"}
        }
    }"#;

    #[test]
    fn test_load_str_builds_paths() {
        let root = load_str(SNAPSHOT).unwrap();
        assert_eq!(root.path(), "/");
        assert_eq!(root.keys(), vec!["item1", "readme"]);

        let values = root.get("item1/item2/values").unwrap();
        assert_eq!(values.path(), "/item1/item2/values");
        assert_eq!(values.dtype(), Some("int32"));
        assert_eq!(values.data(), Some(&serde_json::json!([1, 2, 3, 4])));
    }

    #[test]
    fn test_load_str_attrs() {
        let root = load_str(SNAPSHOT).unwrap();
        assert_eq!(root.attr("created_by"), Some(&serde_json::json!("acquisition")));
        let item1 = root.get("item1").unwrap();
        assert_eq!(item1.attr("units"), Some(&serde_json::json!("counts")));
    }

    #[test]
    fn test_root_must_be_group() {
        let err = load_str(r#"{"shape": [3], "dtype": "int8"}"#).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidStructure(_)));
    }

    #[test]
    fn test_reject_group_and_dataset_mix() {
        let text = r#"{"children": {"bad": {"children": {}, "shape": [1]}}}"#;
        let err = load_str(text).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidStructure(_)));
    }

    #[test]
    fn test_reject_slash_in_child_name() {
        let text = r#"{"children": {"a/b": {"shape": [1], "dtype": "int8"}}}"#;
        let err = load_str(text).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidStructure(_)));
    }

    #[test]
    fn test_invalid_json() {
        let err = load_str("{not json").unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidJson(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = load_str(r#"{"children": {}, "blob": 1}"#).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidJson(_)));
    }

    #[test]
    fn test_load_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(SNAPSHOT.as_bytes()).unwrap();
        let root = load_file(tmp.path()).unwrap();
        assert!(root.get("item1/temperature").is_some());
    }

    #[test]
    fn test_load_file_missing() {
        let err = load_file(Path::new("/nonexistent/file.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::FileNotFound(_)));
    }
}
