//! Typed variables of a rule.

use crate::error::LowerError as Error;
use alloc::{string::String, vec::Vec};
use core::fmt::{self, Display};
use fnv::FnvHashMap;

/// Type of a rule variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GpType {
    Integer,
    Character,
    String,
    Atom,
    List,
}

impl GpType {
    /// Return true if every value of type `other` is also a value of this type.
    ///
    /// ~~~
    /// # use gprule::GpType::*;
    /// assert!(List.holds(Integer));
    /// assert!(Atom.holds(Character));
    /// assert!(String.holds(Character));
    /// assert!(!Character.holds(String));
    /// assert!(!Integer.holds(Atom));
    /// ~~~
    pub fn holds(self, other: Self) -> bool {
        use GpType::*;
        match (self, other) {
            (List, _) => true,
            (Atom, List) => false,
            (Atom, _) => true,
            (String, String | Character) => true,
            (x, y) => x == y,
        }
    }

    /// Return true if some value has both types.
    pub fn overlaps(self, other: Self) -> bool {
        self.holds(other) || other.holds(self)
    }
}

impl Display for GpType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::Integer => "int",
            Self::Character => "char",
            Self::String => "string",
            Self::Atom => "atom",
            Self::List => "list",
        };
        s.fmt(f)
    }
}

/// Variable declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct Variable {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub ty: GpType,
}

impl Variable {
    pub fn new(name: impl Into<String>, ty: GpType) -> Self {
        let name = name.into();
        Self { name, ty }
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} : {}", self.name, self.ty)
    }
}

/// Variables of a rule in declaration order.
#[derive(Clone, Debug, Default)]
pub struct Variables {
    vars: Vec<Variable>,
    /// position of every variable in `vars`
    idx: FnvHashMap<String, usize>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new variable, failing if its name is already bound.
    pub fn add(&mut self, name: String, ty: GpType) -> Result<(), Error> {
        if self.idx.contains_key(&name) {
            return Err(Error::DuplicateVariable(name));
        }
        self.idx.insert(name.clone(), self.vars.len());
        self.vars.push(Variable { name, ty });
        Ok(())
    }

    /// Return the declared type of a variable.
    pub fn lookup(&self, name: &str) -> Option<GpType> {
        self.idx.get(name).map(|i| self.vars[*i].ty)
    }

    /// Number of declared variables.
    pub fn count(&self) -> usize {
        self.vars.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.vars.iter()
    }
}

impl PartialEq for Variables {
    fn eq(&self, other: &Self) -> bool {
        self.vars == other.vars
    }
}

impl Eq for Variables {}
