//! Labels of rule graphs and the atom expressions they consist of.

use alloc::{boxed::Box, string::String};
use core::fmt::{self, Display};

/// Mark attached to a label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mark {
    #[default]
    None,
    Red,
    Green,
    Blue,
    Grey,
    Dashed,
    /// matches any mark
    Any,
}

/// Atom expression.
///
/// Atoms are the elements of label lists.
/// Besides constants and variables, they may contain
/// arithmetic, string concatenation, and degree queries on left-hand side nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Atom {
    Int(i64),
    Str(String),
    Var(String),
    /// in-degree of the host node matched by the given node
    Indegree(String),
    /// out-degree of the host node matched by the given node
    Outdegree(String),
    /// length of the value bound to a variable
    Length(String),
    Neg(Box<Atom>),
    Add(Box<Atom>, Box<Atom>),
    Sub(Box<Atom>, Box<Atom>),
    Mul(Box<Atom>, Box<Atom>),
    Div(Box<Atom>, Box<Atom>),
    Concat(Box<Atom>, Box<Atom>),
}

/// List of atoms.
pub type GList = alloc::vec::Vec<Atom>;

/// Label of a node or an edge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct Label {
    #[cfg_attr(feature = "serde", serde(default))]
    pub mark: Mark,
    #[cfg_attr(feature = "serde", serde(default))]
    pub list: GList,
}

impl Label {
    pub fn new(mark: Mark, list: GList) -> Self {
        Self { mark, list }
    }

    /// Unmarked label with the given list.
    pub fn list(list: GList) -> Self {
        Self::new(Mark::None, list)
    }
}

impl From<GList> for Label {
    fn from(list: GList) -> Self {
        Self::list(list)
    }
}

impl Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Grey => "grey",
            Self::Dashed => "dashed",
            Self::Any => "any",
        };
        s.fmt(f)
    }
}

impl Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Str(s) => write!(f, "{:?}", s),
            Self::Var(x) => write!(f, "{}", x),
            Self::Indegree(n) => write!(f, "indeg({})", n),
            Self::Outdegree(n) => write!(f, "outdeg({})", n),
            Self::Length(x) => write!(f, "length({})", x),
            Self::Neg(a) => write!(f, "-{}", a),
            Self::Add(a, b) => write!(f, "({} + {})", a, b),
            Self::Sub(a, b) => write!(f, "({} - {})", a, b),
            Self::Mul(a, b) => write!(f, "({} * {})", a, b),
            Self::Div(a, b) => write!(f, "({} / {})", a, b),
            Self::Concat(a, b) => write!(f, "{} . {}", a, b),
        }
    }
}

/// Print a list as colon-separated atoms, or `empty`.
pub fn format_list(list: &[Atom], f: &mut fmt::Formatter) -> fmt::Result {
    let mut iter = list.iter();
    match iter.next() {
        None => write!(f, "empty"),
        Some(head) => {
            write!(f, "{}", head)?;
            iter.try_for_each(|a| write!(f, ":{}", a))
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        format_list(&self.list, f)?;
        match self.mark {
            Mark::None => Ok(()),
            mark => write!(f, " # {}", mark),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{string::ToString, vec};

    #[test]
    fn display() {
        let x = || Box::new(Atom::Var("x".into()));
        let label = Label::new(Mark::Red, vec![Atom::Add(x(), Box::new(Atom::Int(1))), Atom::Str("a".into())]);
        assert_eq!(label.to_string(), "(x + 1):\"a\" # red");
        assert_eq!(Label::default().to_string(), "empty");
    }

    #[test]
    fn equality() {
        let list = || vec![Atom::Int(1), Atom::Var("x".into())];
        assert_eq!(Label::from(list()), Label::list(list()));
        assert_ne!(Label::from(list()), Label::new(Mark::Any, list()));
        assert_eq!(Label::new(Mark::Dashed, vec![]).to_string(), "empty # dashed");
    }
}
