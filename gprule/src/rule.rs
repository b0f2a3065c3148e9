//! Rules, consisting of graphs, delta lists, and a condition.

use crate::condition::Host;
use crate::delta::{Delta, NewEdge, PreservedItem};
use crate::error::EvalError;
use crate::{Condition, Graph, Variables};
use alloc::string::String;
use core::fmt::{self, Display};

/// Summary of what applying a rule does to a host graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    /// the rule neither adds, deletes, nor relabels anything
    pub is_predicate: bool,
    pub deletes_nodes: bool,
    /// some node of the left-hand side is a root
    pub is_rooted: bool,
}

/// Graph transformation rule.
///
/// A rule is immutable after its construction by
/// [lowering](crate::ast::RuleDecl::lower).
/// Its flags are computed once from its delta lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    name: String,
    variables: Variables,
    lhs: Graph,
    rhs: Graph,
    delta: Delta,
    condition: Option<Condition>,
    flags: Flags,
}

impl Flags {
    fn new(delta: &Delta, lhs: &Graph) -> Self {
        let unchanged = |p: &PreservedItem| !p.label_changed;
        let deletes_edges = (0..lhs.edges().len()).any(|i| delta.deletes_edge(i));
        Self {
            is_predicate: delta.preserved_nodes.iter().all(unchanged)
                && delta.preserved_edges.iter().all(unchanged)
                && delta.deleted_nodes.is_empty()
                && delta.added_nodes.is_empty()
                && delta.added_edges.is_empty()
                && !deletes_edges,
            deletes_nodes: !delta.deleted_nodes.is_empty(),
            is_rooted: lhs.has_root(),
        }
    }
}

impl Rule {
    pub(crate) fn new(
        name: String,
        variables: Variables,
        lhs: Graph,
        rhs: Graph,
        delta: Delta,
        condition: Option<Condition>,
    ) -> Self {
        let flags = Flags::new(&delta, &lhs);
        debug!("flags of {}: {:?}", name, flags);
        Self {
            name,
            variables,
            lhs,
            rhs,
            delta,
            condition,
            flags,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn variable_count(&self) -> usize {
        self.variables.count()
    }

    pub fn lhs(&self) -> &Graph {
        &self.lhs
    }

    pub fn rhs(&self) -> &Graph {
        &self.rhs
    }

    pub fn preserved_nodes(&self) -> &[PreservedItem] {
        &self.delta.preserved_nodes
    }

    pub fn preserved_edges(&self) -> &[PreservedItem] {
        &self.delta.preserved_edges
    }

    /// Left-hand side indices of the nodes deleted by the rule.
    pub fn deleted_nodes(&self) -> &[usize] {
        &self.delta.deleted_nodes
    }

    /// Right-hand side indices of the nodes added by the rule.
    pub fn added_nodes(&self) -> &[usize] {
        &self.delta.added_nodes
    }

    pub fn added_edges(&self) -> &[NewEdge] {
        &self.delta.added_edges
    }

    /// Left-hand side indices of the edges deleted by the rule.
    ///
    /// These are all edges that are not preserved.
    pub fn deleted_edges(&self) -> impl Iterator<Item = usize> + '_ {
        let edges = 0..self.lhs.edges().len();
        edges.filter(|i| self.delta.deletes_edge(*i))
    }

    pub fn is_edge_deleted(&self, i: usize) -> bool {
        i < self.lhs.edges().len() && self.delta.deletes_edge(i)
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn is_predicate(&self) -> bool {
        self.flags.is_predicate
    }

    pub fn deletes_nodes(&self) -> bool {
        self.flags.deletes_nodes
    }

    pub fn is_rooted(&self) -> bool {
        self.flags.is_rooted
    }

    /// Evaluate the condition of the rule for a candidate match.
    ///
    /// A rule without condition admits every match.
    pub fn eval_condition(&self, host: &impl Host) -> Result<bool, EvalError> {
        match &self.condition {
            None => Ok(true),
            Some(c) => c.eval(&self.variables, host),
        }
    }

    /// Human-readable rendering of the rule, optionally with its graphs.
    pub fn dump(&self, print_graphs: bool) -> Dump<'_> {
        Dump {
            rule: self,
            print_graphs,
        }
    }
}

/// Rendering of a rule, see [`Rule::dump`].
pub struct Dump<'a> {
    rule: &'a Rule,
    print_graphs: bool,
}

fn separated<T: Display>(f: &mut fmt::Formatter, iter: impl Iterator<Item = T>) -> fmt::Result {
    let mut iter = iter.peekable();
    if iter.peek().is_none() {
        return write!(f, " -");
    }
    iter.enumerate().try_for_each(|(i, x)| {
        let sep = if i == 0 { " " } else { ", " };
        write!(f, "{}{}", sep, x)
    })
}

impl<'a> Display for Dump<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let r = self.rule;
        writeln!(f, "rule {}", r.name)?;

        write!(f, "variables:")?;
        separated(f, r.variables.iter())?;

        let Flags {
            is_predicate,
            deletes_nodes,
            is_rooted,
        } = r.flags;
        let flags = [
            (is_predicate, "predicate"),
            (deletes_nodes, "deletes nodes"),
            (is_rooted, "rooted"),
        ];
        write!(f, "\nflags:")?;
        separated(f, flags.iter().filter(|(b, _)| *b).map(|(_, s)| s))?;

        write!(f, "\npreserved nodes:")?;
        separated(f, r.preserved_nodes().iter())?;
        write!(f, "\npreserved edges:")?;
        separated(f, r.preserved_edges().iter())?;
        write!(f, "\ndeleted nodes:")?;
        separated(f, r.deleted_nodes().iter())?;
        write!(f, "\ndeleted edges:")?;
        separated(f, r.deleted_edges())?;
        write!(f, "\nadded nodes:")?;
        separated(f, r.added_nodes().iter())?;
        write!(f, "\nadded edges:")?;
        separated(f, r.added_edges().iter())?;
        write!(f, "\ncondition:")?;
        separated(f, r.condition.iter())?;

        if self.print_graphs {
            write!(f, "\nlhs: {}", r.lhs)?;
            write!(f, "\nrhs: {}", r.rhs)?;
        }
        Ok(())
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.dump(false).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::Anchor;
    use crate::{GpType, Label};
    use alloc::{string::ToString, vec, vec::Vec};

    fn graph(n: usize, edges: &[(usize, usize)]) -> Graph {
        let mut g = Graph::new();
        (0..n).for_each(|_| {
            g.add_node(false, Label::default());
        });
        for (s, t) in edges {
            g.add_edge(*s, *t, Label::default());
        }
        g
    }

    /// Rule with two nodes that deletes the first of three edges
    /// and adds a loop on a new node.
    fn rule() -> Rule {
        let mut variables = Variables::new();
        variables.add("x".to_string(), GpType::Integer).unwrap();
        let delta = Delta {
            preserved_nodes: vec![PreservedItem::new(0, 0, false), PreservedItem::new(1, 1, true)],
            preserved_edges: vec![PreservedItem::new(1, 0, false), PreservedItem::new(2, 1, false)],
            added_nodes: vec![2],
            added_edges: vec![NewEdge {
                index: 2,
                source: Anchor::rhs(2),
                target: Anchor::rhs(2),
            }],
            ..Delta::default()
        };
        let lhs = graph(2, &[(0, 1), (0, 1), (1, 0)]);
        let rhs = graph(3, &[(0, 1), (1, 0), (2, 2)]);
        let cond = Condition::IsInt("x".to_string());
        Rule::new("r".to_string(), variables, lhs, rhs, delta, Some(cond))
    }

    #[test]
    fn deleted_edges() {
        let r = rule();
        assert_eq!(r.deleted_edges().collect::<Vec<_>>(), [0]);
        // the derived set does not change between queries
        assert_eq!(r.deleted_edges().collect::<Vec<_>>(), [0]);
        assert!(r.is_edge_deleted(0));
        assert!(!r.is_edge_deleted(1));
        assert!(!r.is_edge_deleted(3));
    }

    #[test]
    fn flags() {
        let r = rule();
        let flags = Flags {
            is_predicate: false,
            deletes_nodes: false,
            is_rooted: false,
        };
        assert_eq!(r.flags(), flags);
        assert_eq!(r.variable_count(), 1);

        let id = Rule::new(
            "id".to_string(),
            Variables::new(),
            graph(1, &[]),
            graph(1, &[]),
            Delta {
                preserved_nodes: vec![PreservedItem::new(0, 0, false)],
                ..Delta::default()
            },
            None,
        );
        assert!(id.is_predicate());
        assert!(!id.deletes_nodes());
    }

    #[test]
    fn dump() {
        let r = rule();
        let expected = "rule r
variables: x : int
flags: -
preserved nodes: 0 => 0, 1 => 1 (relabelled)
preserved edges: 1 => 0, 2 => 1
deleted nodes: -
deleted edges: 0
added nodes: 2
added edges: 2: r2 -> r2
condition: int(x)";
        assert_eq!(r.to_string(), expected);

        let graphs = r.dump(true).to_string();
        assert!(graphs.starts_with(expected));
        assert!(graphs.ends_with("\nrhs: [ (n0, empty) (n1, empty) (n2, empty) | (e0, n0, n1, empty) (e1, n1, n0, empty) (e2, n2, n2, empty) ]"));
    }
}
