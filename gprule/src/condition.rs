//! Rule conditions.

use crate::error::EvalError as Error;
use crate::label::format_list;
use crate::{Atom, GList, GpType, Label, Variables};
use alloc::{boxed::Box, string::String, string::ToString, vec::Vec};
use core::fmt::{self, Display};

/// Relational operator comparing two integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RelOp {
    Greater,
    GreaterEq,
    Less,
    LessEq,
}

/// Condition guarding the application of a rule.
///
/// A condition is a tree; every subcondition is owned by its parent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Condition {
    /// the variable is bound to an integer
    IsInt(String),
    /// the variable is bound to a character
    IsChar(String),
    /// the variable is bound to a string
    IsString(String),
    /// the variable is bound to an atom
    IsAtom(String),
    /// the host graph has an edge between the nodes matched by two nodes,
    /// optionally with a label
    Edge {
        source: String,
        target: String,
        label: Option<Label>,
    },
    Eq(GList, GList),
    Neq(GList, GList),
    Cmp(RelOp, Atom, Atom),
    Not(Box<Condition>),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
}

impl Condition {
    pub fn edge(source: &str, target: &str, label: Option<Label>) -> Self {
        let (source, target) = (source.to_string(), target.to_string());
        Self::Edge {
            source,
            target,
            label,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(c: Self) -> Self {
        Self::Not(Box::new(c))
    }

    pub fn and(c1: Self, c2: Self) -> Self {
        Self::And(Box::new(c1), Box::new(c2))
    }

    pub fn or(c1: Self, c2: Self) -> Self {
        Self::Or(Box::new(c1), Box::new(c2))
    }

    /// Number of nodes in the condition tree.
    pub fn size(&self) -> usize {
        match self {
            Self::Not(c) => 1 + c.size(),
            Self::And(c1, c2) | Self::Or(c1, c2) => 1 + c1.size() + c2.size(),
            _ => 1,
        }
    }
}

/// Value that a variable may be bound to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(String),
}

/// Read access to a candidate match, as provided by the matching engine.
///
/// Nodes are given by their identifiers in the rule.
pub trait Host {
    /// Values bound to a variable by the match.
    fn binding(&self, var: &str) -> Option<&[Value]>;

    /// In-degree of the host node matched by a rule node.
    fn indegree(&self, node: &str) -> Option<usize>;

    /// Out-degree of the host node matched by a rule node.
    fn outdegree(&self, node: &str) -> Option<usize>;

    /// Return true if the host graph contains an edge
    /// between the host nodes matched by two rule nodes,
    /// carrying a label that matches the given one (if any).
    fn has_edge(&self, source: &str, target: &str, label: Option<&Label>) -> bool;
}

struct Eval<'a, H> {
    vars: &'a Variables,
    host: &'a H,
}

impl<'a, H: Host> Eval<'a, H> {
    fn binding(&self, x: &str) -> Result<&'a [Value], Error> {
        self.host.binding(x).ok_or_else(|| Error::Unbound(x.to_string()))
    }

    fn degree(&self, n: &str, deg: Option<usize>) -> Result<Value, Error> {
        let deg = deg.ok_or_else(|| Error::Unbound(n.to_string()))?;
        Ok(Value::Int(i64::try_from(deg).map_err(|_| Error::Overflow)?))
    }

    /// Evaluate an atom to a single value.
    fn atom(&self, atom: &Atom) -> Result<Value, Error> {
        match atom {
            Atom::Int(i) => Ok(Value::Int(*i)),
            Atom::Str(s) => Ok(Value::Str(s.clone())),
            Atom::Var(x) => match self.binding(x)? {
                [v] => Ok(v.clone()),
                _ => Err(Error::NotAtom(x.clone())),
            },
            Atom::Indegree(n) => self.degree(n, self.host.indegree(n)),
            Atom::Outdegree(n) => self.degree(n, self.host.outdegree(n)),
            Atom::Length(x) => {
                let len = match (self.vars.lookup(x), self.binding(x)?) {
                    (Some(GpType::String | GpType::Character), [Value::Str(s)]) => s.chars().count(),
                    (Some(GpType::String | GpType::Character), _) => {
                        return Err(Error::NotString(x.clone()))
                    }
                    (_, values) => values.len(),
                };
                Ok(Value::Int(i64::try_from(len).map_err(|_| Error::Overflow)?))
            }
            Atom::Neg(a) => {
                let i = self.integer(a)?;
                Ok(Value::Int(i.checked_neg().ok_or(Error::Overflow)?))
            }
            Atom::Add(a, b) => self.arith(a, b, i64::checked_add),
            Atom::Sub(a, b) => self.arith(a, b, i64::checked_sub),
            Atom::Mul(a, b) => self.arith(a, b, i64::checked_mul),
            Atom::Div(a, b) => {
                let (a, b) = (self.integer(a)?, self.integer(b)?);
                if b == 0 {
                    return Err(Error::DivisionByZero);
                }
                Ok(Value::Int(a.checked_div(b).ok_or(Error::Overflow)?))
            }
            Atom::Concat(a, b) => {
                let mut s = self.string(a)?;
                s.push_str(&self.string(b)?);
                Ok(Value::Str(s))
            }
        }
    }

    fn arith(&self, a: &Atom, b: &Atom, f: fn(i64, i64) -> Option<i64>) -> Result<Value, Error> {
        let (a, b) = (self.integer(a)?, self.integer(b)?);
        Ok(Value::Int(f(a, b).ok_or(Error::Overflow)?))
    }

    fn integer(&self, atom: &Atom) -> Result<i64, Error> {
        match self.atom(atom)? {
            Value::Int(i) => Ok(i),
            Value::Str(_) => Err(Error::NotInteger(atom.to_string())),
        }
    }

    fn string(&self, atom: &Atom) -> Result<String, Error> {
        match self.atom(atom)? {
            Value::Str(s) => Ok(s),
            Value::Int(_) => Err(Error::NotString(atom.to_string())),
        }
    }

    /// Evaluate a list, splicing in the values of list variables.
    fn list(&self, list: &[Atom]) -> Result<Vec<Value>, Error> {
        let mut values = Vec::new();
        for atom in list {
            match atom {
                Atom::Var(x) => values.extend_from_slice(self.binding(x)?),
                _ => values.push(self.atom(atom)?),
            }
        }
        Ok(values)
    }

    fn is(&self, x: &str, f: impl Fn(&Value) -> bool) -> Result<bool, Error> {
        Ok(matches!(self.binding(x)?, [v] if f(v)))
    }

    fn condition(&self, cond: &Condition) -> Result<bool, Error> {
        use Condition::*;
        match cond {
            IsInt(x) => self.is(x, |v| matches!(v, Value::Int(_))),
            IsChar(x) => self.is(x, |v| matches!(v, Value::Str(s) if s.chars().count() == 1)),
            IsString(x) => self.is(x, |v| matches!(v, Value::Str(_))),
            IsAtom(x) => self.is(x, |_| true),
            Edge {
                source,
                target,
                label,
            } => Ok(self.host.has_edge(source, target, label.as_ref())),
            Eq(l, r) => Ok(self.list(l)? == self.list(r)?),
            Neq(l, r) => Ok(self.list(l)? != self.list(r)?),
            Cmp(op, l, r) => {
                let (l, r) = (self.integer(l)?, self.integer(r)?);
                Ok(match op {
                    RelOp::Greater => l > r,
                    RelOp::GreaterEq => l >= r,
                    RelOp::Less => l < r,
                    RelOp::LessEq => l <= r,
                })
            }
            Not(c) => Ok(!self.condition(c)?),
            And(c1, c2) => Ok(self.condition(c1)? && self.condition(c2)?),
            Or(c1, c2) => Ok(self.condition(c1)? || self.condition(c2)?),
        }
    }
}

impl Condition {
    /// Evaluate the condition for a candidate match.
    ///
    /// Conjunction and disjunction evaluate their left operand first and
    /// evaluate their right operand only if the result is not yet determined.
    ///
    /// ~~~
    /// # use gprule::{Atom, Condition, GpType, Host, Label, RelOp, Value, Variables};
    /// struct Match(Vec<Value>);
    ///
    /// impl Host for Match {
    ///     fn binding(&self, var: &str) -> Option<&[Value]> {
    ///         (var == "x").then(|| &self.0[..])
    ///     }
    ///     fn indegree(&self, _: &str) -> Option<usize> { None }
    ///     fn outdegree(&self, _: &str) -> Option<usize> { None }
    ///     fn has_edge(&self, _: &str, _: &str, _: Option<&Label>) -> bool { false }
    /// }
    ///
    /// let mut vars = Variables::new();
    /// vars.add("x".to_string(), GpType::Integer)?;
    /// let x = || Atom::Var("x".to_string());
    /// let positive = Condition::Cmp(RelOp::Greater, x(), Atom::Int(0));
    /// assert_eq!(positive.eval(&vars, &Match(vec![Value::Int(3)])), Ok(true));
    /// assert_eq!(positive.eval(&vars, &Match(vec![Value::Int(-3)])), Ok(false));
    /// # Ok::<_, gprule::error::LowerError>(())
    /// ~~~
    pub fn eval(&self, vars: &Variables, host: &impl Host) -> Result<bool, Error> {
        Eval { vars, host }.condition(self)
    }
}

impl Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::Greater => ">",
            Self::GreaterEq => ">=",
            Self::Less => "<",
            Self::LessEq => "<=",
        };
        s.fmt(f)
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::IsInt(x) => write!(f, "int({})", x),
            Self::IsChar(x) => write!(f, "char({})", x),
            Self::IsString(x) => write!(f, "string({})", x),
            Self::IsAtom(x) => write!(f, "atom({})", x),
            Self::Edge {
                source,
                target,
                label: None,
            } => write!(f, "edge({}, {})", source, target),
            Self::Edge {
                source,
                target,
                label: Some(l),
            } => write!(f, "edge({}, {}, {})", source, target, l),
            Self::Eq(l, r) | Self::Neq(l, r) => {
                format_list(l, f)?;
                let op = if matches!(self, Self::Eq(..)) { "=" } else { "!=" };
                write!(f, " {} ", op)?;
                format_list(r, f)
            }
            Self::Cmp(op, l, r) => write!(f, "{} {} {}", l, op, r),
            Self::Not(c) => write!(f, "not {}", c),
            Self::And(c1, c2) => write!(f, "({} and {})", c1, c2),
            Self::Or(c1, c2) => write!(f, "({} or {})", c1, c2),
        }
    }
}
