//! Lowering of rule declarations to rules.

use crate::ast::{EdgeDecl, GraphDecl, RuleDecl};
use crate::delta::Delta;
use crate::error::{Error, LowerError};
use crate::index_map::{IndexMap, IndexMaps};
use crate::typing::Typer;
use crate::{Graph, Rule, Variables};
use alloc::{string::String, string::ToString, vec::Vec};
use fnv::FnvHashSet;

fn unique<'a>(ids: impl Iterator<Item = &'a String>) -> Result<(), LowerError> {
    let mut seen = FnvHashSet::default();
    for id in ids {
        if !seen.insert(id) {
            return Err(LowerError::DuplicateItem(id.clone()));
        }
    }
    Ok(())
}

/// Fail if two nodes or two identified edges of a rule side share an identifier.
fn unique_ids(decl: &GraphDecl) -> Result<(), LowerError> {
    unique(decl.nodes.iter().map(|n| &n.id))?;
    unique(decl.edges.iter().filter_map(|e| e.id.as_ref()))
}

/// Return the index that a node map assigns to a node in one side of a rule.
fn endpoint(
    nodes: &IndexMaps,
    edge: &EdgeDecl,
    node: &str,
    side: impl Fn(&IndexMap) -> Option<usize>,
) -> Result<usize, LowerError> {
    let map = nodes.find_by_id(node).and_then(|m| nodes.get(m));
    let map = map.ok_or_else(|| LowerError::MissingIndexMap(node.to_string()))?;
    side(map).ok_or_else(|| LowerError::DanglingEdgeEndpoint {
        edge: edge.name(),
        node: node.to_string(),
    })
}

/// Add the edges of a rule side to a graph, returning the edge indices.
fn add_edges<'d>(
    decl: &'d GraphDecl,
    graph: &mut Graph,
    nodes: &IndexMaps,
    side: impl Fn(&IndexMap) -> Option<usize> + Copy,
) -> Result<impl Iterator<Item = (usize, &'d EdgeDecl)>, LowerError> {
    let start = graph.edges().len();
    for e in &decl.edges {
        let source = endpoint(nodes, e, &e.source, side)?;
        let target = endpoint(nodes, e, &e.target, side)?;
        graph.add_edge(source, target, e.label.clone());
    }
    Ok((start..).zip(decl.edges.iter()))
}

impl RuleDecl {
    /// Construct a rule from its declaration.
    ///
    /// This either fully succeeds or fails with the first error encountered.
    ///
    /// ~~~
    /// use gprule::ast::{EdgeDecl, GraphDecl, NodeDecl, RuleDecl};
    /// use gprule::Label;
    ///
    /// let node = |id| NodeDecl::new(id, Label::default());
    /// let lhs = GraphDecl::new(vec![node("n1")], vec![]);
    /// let loop_ = EdgeDecl::new("e1", "n1", "n1");
    /// let rhs = GraphDecl::new(vec![node("n1")], vec![loop_]);
    /// let rule = RuleDecl::new("add_loop", lhs, rhs).lower()?;
    /// assert_eq!(rule.added_edges().len(), 1);
    /// assert!(!rule.is_predicate());
    /// # Ok::<_, gprule::Error>(())
    /// ~~~
    pub fn lower(self) -> Result<Rule, Error> {
        let rule = self.name.clone();
        lower(self).map_err(|kind| {
            debug!("lowering {} failed: {}", rule, kind);
            Error { rule, kind }
        })
    }
}

fn lower(decl: RuleDecl) -> Result<Rule, LowerError> {
    let RuleDecl {
        name,
        variables,
        lhs: lhs_decl,
        rhs: rhs_decl,
        condition,
    } = decl;
    debug!("lower rule {}", name);

    let mut vars = Variables::new();
    for v in variables {
        vars.add(v.name, v.ty)?;
    }
    debug!("declared {} variables", vars.count());

    unique_ids(&lhs_decl)?;
    unique_ids(&rhs_decl)?;

    let mut nodes = IndexMaps::new();
    let mut edges = IndexMaps::new();

    let mut lhs = Graph::new();
    for n in &lhs_decl.nodes {
        let l = lhs.add_node(n.root, n.label.clone());
        nodes.insert(IndexMap::node(n.id.clone(), Some(l), None));
    }
    for (l, e) in add_edges(&lhs_decl, &mut lhs, &nodes, |m| m.left)? {
        let (src, tgt) = (e.source.clone(), e.target.clone());
        edges.insert(IndexMap::edge(e.name(), Some(l), None, src, tgt));
    }
    debug!("lhs: {} nodes, {} edges", lhs.nodes().len(), lhs.edges().len());

    let mut rhs = Graph::new();
    for n in &rhs_decl.nodes {
        let r = rhs.add_node(n.root, n.label.clone());
        match nodes.find_by_id(&n.id).and_then(|m| nodes.get_mut(m)) {
            Some(map) => map.right = Some(r),
            None => {
                nodes.insert(IndexMap::node(n.id.clone(), None, Some(r)));
            }
        }
    }
    // the edge maps of the right-hand side are created with the delta lists
    add_edges(&rhs_decl, &mut rhs, &nodes, |m| m.right)?;
    debug!("rhs: {} nodes, {} edges", rhs.nodes().len(), rhs.edges().len());

    let typer = Typer {
        vars: &vars,
        nodes: &nodes,
    };
    let graphs = [&lhs, &rhs];
    let node_labels = graphs.iter().flat_map(|g| g.nodes().iter().map(|n| &n.label));
    let edge_labels = graphs.iter().flat_map(|g| g.edges().iter().map(|e| &e.label));
    node_labels.chain(edge_labels).try_for_each(|l| typer.label(l))?;

    let mut delta = Delta::default();
    delta.nodes(&nodes, &lhs, &rhs);
    delta.edges(&rhs_decl.edges, &mut edges, &nodes, &lhs, &rhs)?;
    debug!(
        "delta: {} nodes preserved, {} deleted, {} added",
        delta.preserved_nodes.len(),
        delta.deleted_nodes.len(),
        delta.added_nodes.len()
    );
    debug!(
        "delta: {} edges preserved, {} deleted, {} added",
        delta.preserved_edges.len(),
        edges.len(),
        delta.added_edges.len()
    );

    if let Some(c) = &condition {
        typer.condition(c)?;
        debug!("condition: {}", c);
    }

    Ok(Rule::new(name, vars, lhs, rhs, delta, condition))
}

/// Lower a sequence of rule declarations, stopping at the first failure.
pub fn lower_all(decls: impl IntoIterator<Item = RuleDecl>) -> Result<Vec<Rule>, Error> {
    decls.into_iter().map(RuleDecl::lower).collect()
}
