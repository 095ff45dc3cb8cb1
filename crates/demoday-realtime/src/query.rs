//! Node paths and child-ordered queries

use crate::error::RealtimeError;
use serde_json::Value;
use std::fmt;

/// A slash-separated path naming one node in the document tree.
///
/// Paths are relative (no leading slash) and never empty; segments are
/// non-empty. Collection paths follow the platform convention
/// `groups/<group>/<collection>`, e.g. `groups/<id>/activities`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath(String);

impl NodePath {
    /// Parse and validate a path.
    pub fn new(path: impl Into<String>) -> Result<Self, RealtimeError> {
        let path = path.into();
        if path.is_empty()
            || path.starts_with('/')
            || path.ends_with('/')
            || path.split('/').any(str::is_empty)
        {
            return Err(RealtimeError::InvalidPath(path));
        }
        Ok(Self(path))
    }

    /// Append one child segment.
    pub fn child(&self, segment: &str) -> Result<Self, RealtimeError> {
        Self::new(format!("{}/{}", self.0, segment))
    }

    /// The raw path string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered, filtered read over one collection node.
///
/// Built fluently and executed by
/// [`RealtimeClient::query`](crate::RealtimeClient::query):
///
/// ```rust
/// # use demoday_realtime::{NodePath, Query};
/// let q = Query::at(NodePath::new("groups/g1/pledges").unwrap())
///     .order_by("offer_id")
///     .equal_to(serde_json::json!("offer-123"))
///     .limit_to_first(50);
/// # let _ = q;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Collection node to read
    pub path: NodePath,
    /// Child key to order by
    pub order_by: Option<String>,
    /// Keep only children whose ordered value equals this
    pub equal_to: Option<Value>,
    /// Keep at most this many children from the start of the order
    pub limit_to_first: Option<usize>,
}

impl Query {
    /// Query every child of `path` in key order.
    pub fn at(path: NodePath) -> Self {
        Self {
            path,
            order_by: None,
            equal_to: None,
            limit_to_first: None,
        }
    }

    /// Order children by a child value.
    pub fn order_by(mut self, child: impl Into<String>) -> Self {
        self.order_by = Some(child.into());
        self
    }

    /// Filter to children whose ordered value equals `value`.
    pub fn equal_to(mut self, value: Value) -> Self {
        self.equal_to = Some(value);
        self
    }

    /// Take at most `n` children from the start of the order.
    pub fn limit_to_first(mut self, n: usize) -> Self {
        self.limit_to_first = Some(n);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_malformed_paths() {
        assert!(NodePath::new("").is_err());
        assert!(NodePath::new("/groups").is_err());
        assert!(NodePath::new("groups/").is_err());
        assert!(NodePath::new("groups//x").is_err());
    }

    #[test]
    fn test_child_appends_segment() {
        let path = NodePath::new("groups").unwrap();
        let child = path.child("g1").unwrap();
        assert_eq!(child.as_str(), "groups/g1");
    }
}
