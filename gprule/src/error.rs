//! Common error types.

use crate::GpType;
use alloc::string::String;
use core::fmt::{self, Display};

/// Reason why a rule could not be constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LowerError {
    /// two variable declarations share a name
    DuplicateVariable(String),
    /// a condition or label references an undeclared variable
    UndeclaredVariable(String),
    /// an expression does not have the type its context requires
    TypeMismatch {
        item: String,
        expected: GpType,
        found: GpType,
    },
    /// two nodes or two edges of the same rule side share an identifier
    DuplicateItem(String),
    /// an item identifier has no index map
    MissingIndexMap(String),
    /// an added edge is incident to a node that is not in the right-hand side
    DanglingEdgeEndpoint { edge: String, node: String },
}

/// Construction error, attributed to the rule whose construction failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub rule: String,
    pub kind: LowerError,
}

/// Failure to evaluate a condition against a binding environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalError {
    /// a variable or node has no binding
    Unbound(String),
    /// a variable bound to a list occurs where an atom is expected
    NotAtom(String),
    NotInteger(String),
    NotString(String),
    DivisionByZero,
    Overflow,
}

impl LowerError {
    pub(crate) fn mismatch(item: impl Display, expected: GpType, found: GpType) -> Self {
        use alloc::string::ToString;
        let item = item.to_string();
        Self::TypeMismatch {
            item,
            expected,
            found,
        }
    }
}

impl Display for LowerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::DuplicateVariable(x) => write!(f, "variable {} declared twice", x),
            Self::UndeclaredVariable(x) => write!(f, "variable {} not declared", x),
            Self::TypeMismatch {
                item,
                expected,
                found,
            } => write!(f, "{} has type {}, expected {}", item, found, expected),
            Self::DuplicateItem(id) => write!(f, "item {} declared twice in one side", id),
            Self::MissingIndexMap(id) => write!(f, "no index map for item {}", id),
            Self::DanglingEdgeEndpoint { edge, node } => {
                write!(f, "edge {} is incident to node {} outside the RHS", edge, node)
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "rule {}: {}", self.rule, self.kind)
    }
}

impl Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Unbound(x) => write!(f, "{} is not bound", x),
            Self::NotAtom(x) => write!(f, "{} is not bound to an atom", x),
            Self::NotInteger(x) => write!(f, "{} does not evaluate to an integer", x),
            Self::NotString(x) => write!(f, "{} does not evaluate to a string", x),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::Overflow => write!(f, "arithmetic overflow"),
        }
    }
}
