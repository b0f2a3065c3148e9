//! Processing of files.

use crate::{Error, Opt, PathRead, Stage};
use gprule::ast::RuleDecl;
use std::io::Read;

/// Decode the rule declarations in a reader.
pub fn parse(r: impl Read) -> Result<Vec<RuleDecl>, Error> {
    Ok(serde_json::from_reader(std::io::BufReader::new(r))?)
}

/// Lower rule declarations, printing every rule unless printing is omitted.
pub fn lower(decls: Vec<RuleDecl>, opt: &Opt, out: &mut impl std::io::Write) -> Result<(), Error> {
    for decl in decls {
        log::info!("Lower rule {}", decl.name);
        let rule = decl.lower()?;
        log::info!(
            "Rule {}: {} preserved, {} deleted, {} added nodes",
            rule.name(),
            rule.preserved_nodes().len(),
            rule.deleted_nodes().len(),
            rule.added_nodes().len()
        );
        if !opt.omits(Stage::Print) {
            writeln!(out, "{}\n", rule.dump(opt.graphs))?;
        }
    }
    Ok(())
}

/// Process all given input files.
pub fn run(opt: &Opt) -> Result<(), Error> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for file in &opt.files {
        let file = PathRead::try_from(file)?;
        let decls = parse(file.read)?;
        log::info!("Read {} rules from {}", decls.len(), file.path);

        if !opt.omits(Stage::Lower) {
            lower(decls, opt, &mut out)?
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const RULES: &str = r#"[
      {
        "name": "delete_edge",
        "lhs": {
          "nodes": [{"id": "n1"}, {"id": "n2", "root": true}],
          "edges": [{"id": "e1", "source": "n1", "target": "n2"}]
        },
        "rhs": {"nodes": [{"id": "n1"}, {"id": "n2", "root": true}]}
      },
      {
        "name": "grow",
        "variables": [{"name": "x", "type": "integer"}],
        "lhs": {"nodes": [{"id": "n1", "label": {"list": [{"var": "x"}]}}]},
        "rhs": {
          "nodes": [
            {"id": "n1", "label": {"mark": "red", "list": [{"var": "x"}]}},
            {"id": "n2"}
          ],
          "edges": [{"source": "n1", "target": "n2"}]
        },
        "condition": {"cmp": ["greater", {"var": "x"}, {"int": 0}]}
      }
    ]"#;

    #[test]
    fn decode() -> Result<(), Error> {
        let decls = parse(RULES.as_bytes())?;
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[1].rhs.edges[0].id, None);
        assert!(decls[1].condition.is_some());
        Ok(())
    }

    #[test]
    fn print() -> Result<(), Error> {
        let opt = Opt::parse_from(["gpcheck", "-"]);
        let mut out = Vec::new();
        lower(parse(RULES.as_bytes())?, &opt, &mut out)?;
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("rule delete_edge\n"));
        assert!(out.contains("flags: rooted\n"));
        assert!(out.contains("deleted edges: 0\n"));
        assert!(out.contains("preserved nodes: 0 => 0 (relabelled)\n"));
        assert!(out.contains("added edges: 0: l0 -> r1\n"));
        assert!(out.contains("condition: x > 0"));
        Ok(())
    }

    #[test]
    fn omit_print() -> Result<(), Error> {
        let opt = Opt::parse_from(["gpcheck", "--omit", "print", "-"]);
        let mut out: Vec<u8> = Vec::new();
        lower(parse(RULES.as_bytes())?, &opt, &mut out)?;
        assert!(out.is_empty());
        Ok(())
    }

    #[test]
    fn failure() {
        let rules = r#"[{"name": "bad", "lhs": {}, "rhs": {"edges": [{"source": "a", "target": "a"}]}}]"#;
        let opt = Opt::parse_from(["gpcheck", "-"]);
        let decls = parse(rules.as_bytes()).unwrap();
        match lower(decls, &opt, &mut Vec::<u8>::new()) {
            Err(Error::Lower(e)) => assert_eq!(e.to_string(), "rule bad: no index map for item a"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
