//! Delta lists, classifying every rule item as preserved, deleted, or added.
//!
//! Deleted edges are not stored:
//! an edge of the left-hand side is deleted iff
//! no preserved edge has it as left index.

use crate::ast::EdgeDecl;
use crate::error::LowerError as Error;
use crate::index_map::{IndexMap, IndexMaps};
use crate::Graph;
use alloc::{string::ToString, vec::Vec};
use core::fmt::{self, Display};

/// Item present in both sides of a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreservedItem {
    pub left: usize,
    pub right: usize,
    /// the right-hand label differs from the left-hand label
    pub label_changed: bool,
}

/// Graph that the index of an anchor refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    Lhs,
    Rhs,
}

/// Endpoint of an added edge.
///
/// An anchor into the left-hand side refers to a preserved node,
/// an anchor into the right-hand side refers to an added node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchor {
    pub location: Location,
    pub index: usize,
}

/// Edge created by a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NewEdge {
    /// index of the edge in the right-hand side
    pub index: usize,
    pub source: Anchor,
    pub target: Anchor,
}

impl PreservedItem {
    pub fn new(left: usize, right: usize, label_changed: bool) -> Self {
        Self {
            left,
            right,
            label_changed,
        }
    }
}

impl Anchor {
    pub fn lhs(index: usize) -> Self {
        let location = Location::Lhs;
        Self { location, index }
    }

    pub fn rhs(index: usize) -> Self {
        let location = Location::Rhs;
        Self { location, index }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Delta {
    pub preserved_nodes: Vec<PreservedItem>,
    pub preserved_edges: Vec<PreservedItem>,
    pub deleted_nodes: Vec<usize>,
    pub added_nodes: Vec<usize>,
    pub added_edges: Vec<NewEdge>,
}

fn relabels<T: PartialEq>(lhs: Option<T>, rhs: Option<T>) -> bool {
    lhs != rhs
}

impl Delta {
    /// Classify all nodes from their index maps.
    ///
    /// The maps stay in the table, because
    /// the anchors of added edges are resolved through them.
    pub fn nodes(&mut self, nodes: &IndexMaps, lhs: &Graph, rhs: &Graph) {
        for (_, map) in nodes.iter() {
            match (map.left, map.right) {
                (Some(l), Some(r)) => {
                    let lbl = |g: &Graph, i| g.node(i).map(|n| n.label.clone());
                    let changed = relabels(lbl(lhs, l), lbl(rhs, r));
                    trace!("preserve node {}: {} => {}", map.id, l, r);
                    self.preserved_nodes.push(PreservedItem::new(l, r, changed))
                }
                (Some(l), None) => {
                    trace!("delete node {}: {}", map.id, l);
                    self.deleted_nodes.push(l)
                }
                (None, Some(r)) => {
                    trace!("add node {}: {}", map.id, r);
                    self.added_nodes.push(r)
                }
                (None, None) => (),
            }
        }
    }

    /// Classify all right-hand side edges.
    ///
    /// On entry, `edges` contains only the maps of left-hand side edges.
    /// Every right-hand side edge with a left-hand counterpart
    /// (same identifier, or same endpoints if it has no identifier)
    /// that connects the same nodes is preserved, and its map removed.
    /// All other right-hand side edges are added.
    /// The maps remaining in the table are those of deleted edges.
    pub fn edges(
        &mut self,
        rhs_edges: &[EdgeDecl],
        edges: &mut IndexMaps,
        nodes: &IndexMaps,
        lhs: &Graph,
        rhs: &Graph,
    ) -> Result<(), Error> {
        let mut added = Vec::new();
        for (r, e) in rhs_edges.iter().enumerate() {
            let found = match &e.id {
                Some(id) => edges.find_by_id(id),
                None => edges.find_by_endpoints(&e.source, &e.target),
            };
            let counterpart = found.filter(|m| {
                let map = edges.get(*m);
                map.map_or(false, |map| map.left.is_some() && map.connects(&e.source, &e.target))
            });
            match counterpart.and_then(|m| edges.remove(m)).and_then(|map| map.left) {
                Some(l) => {
                    let lbl = |g: &Graph, i| g.edge(i).map(|e| e.label.clone());
                    let changed = relabels(lbl(lhs, l), lbl(rhs, r));
                    trace!("preserve edge {}: {} => {}", e.name(), l, r);
                    self.preserved_edges.push(PreservedItem::new(l, r, changed))
                }
                None => {
                    let (src, tgt) = (e.source.clone(), e.target.clone());
                    added.push(IndexMap::edge(e.name(), None, Some(r), src, tgt))
                }
            }
        }

        added.into_iter().for_each(|map| {
            edges.insert(map);
        });

        for m in edges.handles() {
            let edge = match edges.get(m) {
                Some(map) if map.left.is_none() => new_edge(map, nodes)?,
                _ => continue,
            };
            trace!("add edge {}", edge);
            self.added_edges.push(edge);
            edges.remove(m);
        }
        Ok(())
    }

    /// Return true if the left-hand side edge with the given index is deleted.
    pub fn deletes_edge(&self, i: usize) -> bool {
        !self.preserved_edges.iter().any(|p| p.left == i)
    }
}

/// Resolve the anchors of an edge that is only in the right-hand side.
fn new_edge(map: &IndexMap, nodes: &IndexMaps) -> Result<NewEdge, Error> {
    let missing = || Error::MissingIndexMap(map.id.clone());
    let anchor = |node: Option<&str>| -> Result<Anchor, Error> {
        let node = node.ok_or_else(missing)?;
        let nmap = nodes.find_by_id(node).and_then(|n| nodes.get(n));
        let nmap = nmap.ok_or_else(|| Error::MissingIndexMap(node.to_string()))?;
        match (nmap.left, nmap.right) {
            (Some(l), Some(_)) => Ok(Anchor::lhs(l)),
            (None, Some(r)) => Ok(Anchor::rhs(r)),
            _ => Err(Error::DanglingEdgeEndpoint {
                edge: map.id.clone(),
                node: node.to_string(),
            }),
        }
    };
    Ok(NewEdge {
        index: map.right.ok_or_else(missing)?,
        source: anchor(map.source.as_deref())?,
        target: anchor(map.target.as_deref())?,
    })
}

impl Display for PreservedItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} => {}", self.left, self.right)?;
        if self.label_changed {
            write!(f, " (relabelled)")?;
        }
        Ok(())
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Lhs => write!(f, "l"),
            Self::Rhs => write!(f, "r"),
        }
    }
}

impl Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.location, self.index)
    }
}

impl Display for NewEdge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.index, self.source, self.target)
    }
}
