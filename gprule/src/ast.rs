//! Rule declarations as produced by the front end.
//!
//! These structures are reference-free and refer to items by identifiers.
//! They are the input of [lowering](RuleDecl::lower).

use crate::{Condition, Label, Variable};
use alloc::{string::String, vec::Vec};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct NodeDecl {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub root: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: Label,
}

/// Edge declaration.
///
/// An edge without identifier is known only by its incident nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct EdgeDecl {
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: Label,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct GraphDecl {
    #[cfg_attr(feature = "serde", serde(default))]
    pub nodes: Vec<NodeDecl>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub edges: Vec<EdgeDecl>,
}

/// Rule declaration.
///
/// Nodes and edges sharing an identifier across both sides are preserved.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct RuleDecl {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub variables: Vec<Variable>,
    pub lhs: GraphDecl,
    pub rhs: GraphDecl,
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<Condition>,
}

impl NodeDecl {
    pub fn new(id: impl Into<String>, label: Label) -> Self {
        let id = id.into();
        Self {
            id,
            root: false,
            label,
        }
    }

    /// Make the node a root.
    pub fn rooted(self) -> Self {
        Self { root: true, ..self }
    }
}

impl EdgeDecl {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::anonymous(source, target)
        }
    }

    pub fn anonymous(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
            label: Label::default(),
        }
    }

    pub fn with_label(self, label: Label) -> Self {
        Self { label, ..self }
    }

    /// Identifier of the edge, made up from its endpoints if it has none.
    pub fn name(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => alloc::format!("{}->{}", self.source, self.target),
        }
    }
}

impl GraphDecl {
    pub fn new(nodes: Vec<NodeDecl>, edges: Vec<EdgeDecl>) -> Self {
        Self { nodes, edges }
    }
}

impl RuleDecl {
    pub fn new(name: impl Into<String>, lhs: GraphDecl, rhs: GraphDecl) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            lhs,
            rhs,
            condition: None,
        }
    }

    pub fn with_variables(self, variables: Vec<Variable>) -> Self {
        Self { variables, ..self }
    }

    pub fn with_condition(self, condition: Condition) -> Self {
        let condition = Some(condition);
        Self { condition, ..self }
    }
}
