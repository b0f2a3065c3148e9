//! Static typing of atoms, labels, and conditions.

use crate::error::LowerError as Error;
use crate::index_map::IndexMaps;
use crate::{Atom, Condition, GpType, Label, Variables};

/// Context for typing: declared variables and the maps of the rule nodes.
pub(crate) struct Typer<'a> {
    pub vars: &'a Variables,
    pub nodes: &'a IndexMaps,
}

impl<'a> Typer<'a> {
    fn var(&self, x: &str) -> Result<GpType, Error> {
        let undeclared = || Error::UndeclaredVariable(x.into());
        self.vars.lookup(x).ok_or_else(undeclared)
    }

    /// Fail unless the node is in the left-hand side.
    fn lhs_node(&self, n: &str) -> Result<(), Error> {
        let map = self.nodes.find_by_id(n).and_then(|m| self.nodes.get(m));
        match map {
            Some(map) if map.left.is_some() => Ok(()),
            _ => Err(Error::MissingIndexMap(n.into())),
        }
    }

    /// Infer the most precise type of an atom.
    pub fn infer(&self, atom: &Atom) -> Result<GpType, Error> {
        match atom {
            Atom::Int(_) => Ok(GpType::Integer),
            Atom::Str(s) if s.chars().count() == 1 => Ok(GpType::Character),
            Atom::Str(_) => Ok(GpType::String),
            Atom::Var(x) => self.var(x),
            Atom::Indegree(n) | Atom::Outdegree(n) => {
                self.lhs_node(n)?;
                Ok(GpType::Integer)
            }
            Atom::Length(x) => match self.var(x)? {
                GpType::List | GpType::String | GpType::Character => Ok(GpType::Integer),
                ty => Err(Error::mismatch(x, GpType::List, ty)),
            },
            Atom::Neg(a) => {
                self.integer(a)?;
                Ok(GpType::Integer)
            }
            Atom::Add(a, b) | Atom::Sub(a, b) | Atom::Mul(a, b) | Atom::Div(a, b) => {
                self.integer(a)?;
                self.integer(b)?;
                Ok(GpType::Integer)
            }
            Atom::Concat(a, b) => {
                self.string(a)?;
                self.string(b)?;
                Ok(GpType::String)
            }
        }
    }

    /// Fail unless the atom is an integer.
    pub fn integer(&self, atom: &Atom) -> Result<(), Error> {
        match self.infer(atom)? {
            GpType::Integer => Ok(()),
            ty => Err(Error::mismatch(atom, GpType::Integer, ty)),
        }
    }

    /// Fail unless the atom is a string (possibly a character).
    pub fn string(&self, atom: &Atom) -> Result<(), Error> {
        match self.infer(atom)? {
            ty if GpType::String.holds(ty) => Ok(()),
            ty => Err(Error::mismatch(atom, GpType::String, ty)),
        }
    }

    pub fn list(&self, list: &[Atom]) -> Result<(), Error> {
        list.iter().try_for_each(|a| self.infer(a).map(|_| ()))
    }

    pub fn label(&self, label: &Label) -> Result<(), Error> {
        self.list(&label.list)
    }

    /// Fail if a list operand is a variable declared as integer.
    fn list_operand(&self, atom: &Atom) -> Result<(), Error> {
        match atom {
            Atom::Var(x) => match self.var(x)? {
                GpType::Integer => Err(Error::mismatch(x, GpType::List, GpType::Integer)),
                _ => Ok(()),
            },
            _ => Ok(()),
        }
    }

    /// Check that two lists may be equal.
    ///
    /// No element may be a variable declared as integer.
    /// If no side contains a list variable and both sides have equal length,
    /// the elements at the same positions must have overlapping types.
    fn comparable(&self, l: &[Atom], r: &[Atom]) -> Result<(), Error> {
        l.iter().chain(r).try_for_each(|a| self.list_operand(a))?;
        let l_tys = l.iter().map(|a| self.infer(a)).collect::<Result<alloc::vec::Vec<_>, _>>()?;
        let r_tys = r.iter().map(|a| self.infer(a)).collect::<Result<alloc::vec::Vec<_>, _>>()?;
        let open = |tys: &[GpType]| tys.contains(&GpType::List);
        if open(&l_tys) || open(&r_tys) || l_tys.len() != r_tys.len() {
            return Ok(());
        }
        let pairs = l.iter().zip(l_tys.iter().zip(r_tys.iter()));
        for (atom, (lt, rt)) in pairs {
            if !lt.overlaps(*rt) {
                return Err(Error::mismatch(atom, *rt, *lt));
            }
        }
        Ok(())
    }

    /// Fail unless a variable may hold a value of the given type.
    fn holds(&self, x: &str, ty: GpType) -> Result<(), Error> {
        match self.var(x)? {
            decl if decl.holds(ty) => Ok(()),
            decl => Err(Error::mismatch(x, ty, decl)),
        }
    }

    pub fn condition(&self, cond: &Condition) -> Result<(), Error> {
        use Condition::*;
        match cond {
            IsInt(x) => self.holds(x, GpType::Integer),
            IsChar(x) => self.holds(x, GpType::Character),
            IsString(x) => self.holds(x, GpType::String),
            IsAtom(x) => self.holds(x, GpType::Atom),
            Edge {
                source,
                target,
                label,
            } => {
                self.lhs_node(source)?;
                self.lhs_node(target)?;
                label.iter().try_for_each(|l| self.label(l))
            }
            Eq(l, r) | Neq(l, r) => self.comparable(l, r),
            Cmp(_, l, r) => {
                self.integer(l)?;
                self.integer(r)
            }
            Not(c) => self.condition(c),
            And(c1, c2) | Or(c1, c2) => {
                self.condition(c1)?;
                self.condition(c2)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index_map::IndexMap;
    use crate::RelOp;
    use alloc::{boxed::Box, string::String, vec};

    fn var(x: &str) -> Atom {
        Atom::Var(String::from(x))
    }

    fn with_typer<T>(decls: &[(&str, GpType)], f: impl FnOnce(&Typer) -> T) -> T {
        let mut vars = Variables::new();
        for (x, ty) in decls {
            vars.add(String::from(*x), *ty).unwrap();
        }
        let mut nodes = IndexMaps::new();
        nodes.insert(IndexMap::node(String::from("n1"), Some(0), Some(0)));
        nodes.insert(IndexMap::node(String::from("n2"), None, Some(1)));
        f(&Typer {
            vars: &vars,
            nodes: &nodes,
        })
    }

    #[test]
    fn infer() {
        use GpType as T;
        let decls = [("i", T::Integer), ("s", T::String), ("l", T::List), ("a", T::Atom)];
        with_typer(&decls, |t| {
            assert_eq!(t.infer(&Atom::Str("c".into())), Ok(T::Character));
            assert_eq!(t.infer(&Atom::Str("cd".into())), Ok(T::String));
            assert_eq!(t.infer(&var("a")), Ok(T::Atom));
            assert_eq!(t.infer(&Atom::Length("l".into())), Ok(T::Integer));
            assert_eq!(t.infer(&Atom::Indegree("n1".into())), Ok(T::Integer));
            let sum = Atom::Add(Box::new(var("i")), Box::new(Atom::Int(1)));
            assert_eq!(t.infer(&sum), Ok(T::Integer));
            let cat = Atom::Concat(Box::new(var("s")), Box::new(Atom::Str("x".into())));
            assert_eq!(t.infer(&cat), Ok(T::String));
        })
    }

    #[test]
    fn mismatch() {
        use GpType as T;
        let decls = [("i", T::Integer), ("s", T::String), ("a", T::Atom)];
        with_typer(&decls, |t| {
            let sum = Atom::Add(Box::new(var("s")), Box::new(Atom::Int(1)));
            assert_eq!(t.infer(&sum), Err(Error::mismatch("s", T::Integer, T::String)));
            // atoms may be strings, so they are no integers
            let neg = Atom::Neg(Box::new(var("a")));
            assert_eq!(t.infer(&neg), Err(Error::mismatch("a", T::Integer, T::Atom)));
            let len = Atom::Length("i".into());
            assert_eq!(t.infer(&len), Err(Error::mismatch("i", T::List, T::Integer)));
            let cat = Atom::Concat(Box::new(var("i")), Box::new(var("s")));
            assert_eq!(t.infer(&cat), Err(Error::mismatch("i", T::String, T::Integer)));
        })
    }

    #[test]
    fn unknown() {
        with_typer(&[], |t| {
            let undeclared = Error::UndeclaredVariable("x".into());
            assert_eq!(t.infer(&var("x")), Err(undeclared));
            // n2 is only in the right-hand side
            let missing = Error::MissingIndexMap("n2".into());
            assert_eq!(t.infer(&Atom::Outdegree("n2".into())), Err(missing));
        })
    }

    #[test]
    fn conditions() {
        use GpType as T;
        let decls = [("i", T::Integer), ("s", T::String), ("l", T::List)];
        with_typer(&decls, |t| {
            assert_eq!(t.condition(&Condition::IsInt("l".into())), Ok(()));
            let err = Error::mismatch("s", T::Integer, T::String);
            assert_eq!(t.condition(&Condition::IsInt("s".into())), Err(err));
            assert_eq!(t.condition(&Condition::IsChar("s".into())), Ok(()));

            // lists of different shape are simply unequal
            let open = Condition::Eq(vec![var("l")], vec![var("s"), Atom::Int(1)]);
            assert_eq!(t.condition(&open), Ok(()));
            let closed = Condition::Neq(vec![var("s")], vec![Atom::Int(1)]);
            let err = Error::mismatch("s", T::Integer, T::String);
            assert_eq!(t.condition(&closed), Err(err));

            // integer variables are no list operands
            let int = Error::mismatch("i", T::List, T::Integer);
            let mixed = Condition::Eq(vec![var("l")], vec![var("i"), var("s")]);
            assert_eq!(t.condition(&mixed), Err(int.clone()));
            let single = Condition::Neq(vec![var("i")], vec![Atom::Int(3)]);
            assert_eq!(t.condition(&single), Err(int));
            let lens = Condition::Eq(vec![Atom::Length("l".into())], vec![Atom::Int(3)]);
            assert_eq!(t.condition(&lens), Ok(()));

            let cmp = Condition::Cmp(RelOp::Less, var("i"), Atom::Length("s".into()));
            assert_eq!(t.condition(&cmp), Ok(()));
            let edge = Condition::edge("n1", "n2", None);
            let missing = Error::MissingIndexMap("n2".into());
            assert_eq!(t.condition(&Condition::not(edge)), Err(missing));
        })
    }
}
