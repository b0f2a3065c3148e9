use crate::Stage;
use clap::Parser;
use std::path::PathBuf;

/// Lower graph transformation rules and print them
#[derive(Clone, Debug, Parser)]
pub struct Opt {
    /// Print the left- and right-hand side graphs of every rule
    #[arg(long)]
    pub graphs: bool,

    /// Perform only operations until (excluding) the given stage.
    ///
    /// Possible values are: lower, print.
    #[arg(long)]
    pub omit: Option<Stage>,

    /// Files to process
    ///
    /// Every file contains a JSON array of rule declarations.
    /// To read from standard input, use "-" as file name.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

impl Opt {
    /// Return true if the stage or any stage before it is omitted.
    pub fn omits(&self, stage: Stage) -> bool {
        self.omit.map_or(false, |omit| omit <= stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omit() {
        let opt = Opt::parse_from(["gpcheck", "--omit", "print", "rules.json"]);
        assert!(!opt.omits(Stage::Lower));
        assert!(opt.omits(Stage::Print));

        let opt = Opt::parse_from(["gpcheck", "--omit", "lower", "--graphs", "-"]);
        assert!(opt.omits(Stage::Print));
        assert!(opt.graphs);
        assert_eq!(opt.files, [PathBuf::from("-")]);
    }
}
