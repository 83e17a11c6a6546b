//! Property paths reported with violations
//!
//! A path is a list of nodes. When a container is walked the current leaf
//! is marked as iterable and receives the element's index or key, so the
//! string form reads `items[2].name` or `tags[home].<collection element>`.

use std::fmt;

use crate::types::Value;

/// Node name used for container elements that carry no name of their own
pub const COLLECTION_ELEMENT_NODE_NAME: &str = "<collection element>";
/// Node name for map keys
pub const MAP_KEY_NODE_NAME: &str = "<map key>";
pub const RETURN_VALUE_NODE_NAME: &str = "<return value>";
pub const CROSS_PARAMETER_NODE_NAME: &str = "<cross-parameter>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Bean,
    Property,
    Method,
    Parameter,
    CrossParameter,
    ReturnValue,
    ContainerElement,
}

/// One segment of a [`PropertyPath`]
#[derive(Debug, Clone, PartialEq)]
pub struct PathNode {
    name: Option<String>,
    kind: NodeKind,
    in_iterable: bool,
    index: Option<usize>,
    key: Option<Value>,
    parameter_index: Option<usize>,
}

impl PathNode {
    fn new(name: Option<String>, kind: NodeKind) -> Self {
        Self {
            name,
            kind,
            in_iterable: false,
            index: None,
            key: None,
            parameter_index: None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_in_iterable(&self) -> bool {
        self.in_iterable
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn key(&self) -> Option<&Value> {
        self.key.as_ref()
    }

    pub fn parameter_index(&self) -> Option<usize> {
        self.parameter_index
    }
}

impl fmt::Display for PathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            f.write_str(name)?;
        }
        if self.in_iterable {
            f.write_str("[")?;
            if let Some(index) = self.index {
                write!(f, "{}", index)?;
            } else if let Some(key) = &self.key {
                write!(f, "{}", key)?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

/// Restores a path to an earlier shape, see [`PropertyPath::checkpoint`]
#[derive(Debug, Clone)]
pub struct PathCheckpoint {
    len: usize,
    leaf: Option<PathNode>,
}

/// Path from the validated root to a value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyPath {
    nodes: Vec<PathNode>,
}

impl PropertyPath {
    /// Empty path, denoting the root object
    pub fn root() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    pub fn leaf(&self) -> Option<&PathNode> {
        self.nodes.last()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_bean_node(&mut self) {
        self.nodes.push(PathNode::new(None, NodeKind::Bean));
    }

    pub fn add_property_node(&mut self, name: impl Into<String>) {
        self.nodes
            .push(PathNode::new(Some(name.into()), NodeKind::Property));
    }

    pub fn add_method_node(&mut self, name: impl Into<String>) {
        self.nodes.push(PathNode::new(Some(name.into()), NodeKind::Method));
    }

    pub fn add_parameter_node(&mut self, name: impl Into<String>, index: usize) {
        let mut node = PathNode::new(Some(name.into()), NodeKind::Parameter);
        node.parameter_index = Some(index);
        self.nodes.push(node);
    }

    pub fn add_cross_parameter_node(&mut self) {
        self.nodes.push(PathNode::new(
            Some(CROSS_PARAMETER_NODE_NAME.to_string()),
            NodeKind::CrossParameter,
        ));
    }

    pub fn add_return_value_node(&mut self) {
        self.nodes.push(PathNode::new(
            Some(RETURN_VALUE_NODE_NAME.to_string()),
            NodeKind::ReturnValue,
        ));
    }

    pub fn add_container_element_node(&mut self, name: impl Into<String>) {
        self.nodes
            .push(PathNode::new(Some(name.into()), NodeKind::ContainerElement));
    }

    pub fn make_leaf_iterable(&mut self) {
        if let Some(leaf) = self.nodes.last_mut() {
            leaf.in_iterable = true;
            leaf.index = None;
            leaf.key = None;
        }
    }

    pub fn make_leaf_iterable_and_set_index(&mut self, index: usize) {
        if let Some(leaf) = self.nodes.last_mut() {
            leaf.in_iterable = true;
            leaf.index = Some(index);
            leaf.key = None;
        }
    }

    pub fn make_leaf_iterable_and_set_key(&mut self, key: Value) {
        if let Some(leaf) = self.nodes.last_mut() {
            leaf.in_iterable = true;
            leaf.index = None;
            leaf.key = Some(key);
        }
    }

    /// Capture the current shape, including the leaf's iterable state
    pub fn checkpoint(&self) -> PathCheckpoint {
        PathCheckpoint {
            len: self.nodes.len(),
            leaf: self.nodes.last().cloned(),
        }
    }

    pub fn restore(&mut self, checkpoint: &PathCheckpoint) {
        self.nodes.truncate(checkpoint.len);
        if let (Some(leaf), Some(saved)) = (self.nodes.last_mut(), &checkpoint.leaf) {
            *leaf = saved.clone();
        }
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for node in &self.nodes {
            let rendered = node.to_string();
            // bean nodes outside iterables render as nothing
            if rendered.is_empty() {
                continue;
            }
            if !first {
                f.write_str(".")?;
            }
            f.write_str(&rendered)?;
            first = false;
        }
        Ok(())
    }
}
