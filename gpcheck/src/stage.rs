/// A stage in the processing of rule declarations.
///
/// This is useful to omit certain parts of processing.
/// Omitting one stage also omits all stages after it,
/// i.e. all stages greater than the stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Construction of rules from declarations
    Lower,
    /// Printing of rules
    Print,
}

impl core::str::FromStr for Stage {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lower" => Ok(Self::Lower),
            "print" => Ok(Self::Print),
            _ => Err("unknown stage: ".to_owned() + s),
        }
    }
}
