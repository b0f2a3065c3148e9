//! Left- and right-hand side graphs of rules.
//!
//! Items are addressed by their position, called their *index*.
//! Indices are what the delta lists of a rule refer to.

use crate::Label;
use alloc::vec::Vec;
use core::fmt::{self, Display};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub root: bool,
    pub label: Label,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub label: Label,
}

/// Graph of a rule side.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its index.
    pub fn add_node(&mut self, root: bool, label: Label) -> usize {
        self.nodes.push(Node { root, label });
        self.nodes.len() - 1
    }

    /// Add an edge between two existing nodes and return its index.
    pub fn add_edge(&mut self, source: usize, target: usize, label: Label) -> usize {
        debug_assert!(source < self.nodes.len() && target < self.nodes.len());
        self.edges.push(Edge {
            source,
            target,
            label,
        });
        self.edges.len() - 1
    }

    pub fn node(&self, i: usize) -> Option<&Node> {
        self.nodes.get(i)
    }

    pub fn edge(&self, i: usize) -> Option<&Edge> {
        self.edges.get(i)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Return true if any node of the graph is a root.
    pub fn has_root(&self) -> bool {
        self.nodes.iter().any(|n| n.root)
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, n) in self.nodes.iter().enumerate() {
            let root = if n.root { "(R)" } else { "" };
            write!(f, " (n{}{}, {})", i, root, n.label)?;
        }
        write!(f, " |")?;
        for (i, e) in self.edges.iter().enumerate() {
            write!(f, " (e{}, n{}, n{}, {})", i, e.source, e.target, e.label)?;
        }
        write!(f, " ]")
    }
}
