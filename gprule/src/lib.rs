#![no_std]
#![forbid(unsafe_code)]

//! Intermediate representation of graph transformation rules.
//!
//! A rule replaces a match of its left-hand side (LHS) graph in a host graph
//! by its right-hand side (RHS) graph, provided that its condition holds.
//! This library turns a rule declaration, as produced by a front end,
//! into a [`Rule`] that a matching engine can directly work with.
//!
//! # Usage
//!
//! A [rule declaration](ast::RuleDecl) refers to nodes and edges by identifiers.
//! Nodes and edges that share an identifier across both sides are *preserved*.
//! Lowering a declaration yields a rule that records
//! which items are preserved, deleted, and added, as indices into its graphs.
//! Lowering also checks the variables in labels and in the condition
//! against their declared [types](GpType).
//!
//! ~~~
//! use gprule::ast::{EdgeDecl, GraphDecl, NodeDecl, RuleDecl};
//! use gprule::{Atom, Condition, GpType, Label, RelOp, Variable};
//!
//! // an edge from a node labelled `x` to itself is replaced by a new node
//! let n1 = NodeDecl::new("n1", Label::list(vec![Atom::Var("x".into())]));
//! let lhs = GraphDecl::new(vec![n1.clone()], vec![EdgeDecl::new("e1", "n1", "n1")]);
//! let rhs = GraphDecl::new(vec![n1, NodeDecl::new("n2", Label::default())], vec![]);
//! let positive = Condition::Cmp(RelOp::Greater, Atom::Var("x".into()), Atom::Int(0));
//! let decl = RuleDecl::new("unloop", lhs, rhs)
//!     .with_variables(vec![Variable::new("x", GpType::Integer)])
//!     .with_condition(positive);
//!
//! let rule = decl.lower()?;
//! assert_eq!(rule.deleted_edges().collect::<Vec<_>>(), [0]);
//! assert_eq!(rule.added_nodes(), [1]);
//! assert!(!rule.is_predicate());
//! assert!(!rule.deletes_nodes());
//! # Ok::<_, gprule::Error>(())
//! ~~~
//!
//! # Organisation
//!
//! * The [`ast`] module contains the reference-free rule declarations.
//! * Lowering a declaration builds a table of [index maps](index_map)
//!   for nodes and one for edges, from which the delta lists of the rule
//!   are computed.
//! * A [`Condition`] can be evaluated for a candidate match,
//!   which is provided by implementing the [`Host`] trait.

extern crate alloc;
#[macro_use]
extern crate log;

pub mod ast;
mod condition;
mod delta;
pub mod error;
mod graph;
pub mod index_map;
mod label;
mod lower;
mod rule;
mod typing;
mod variable;

pub use condition::{Condition, Host, RelOp, Value};
pub use delta::{Anchor, Location, NewEdge, PreservedItem};
pub use error::Error;
pub use graph::{Edge, Graph, Node};
pub use label::{Atom, GList, Label, Mark};
pub use lower::lower_all;
pub use rule::{Dump, Flags, Rule};
pub use variable::{GpType, Variable, Variables};
