//! Conversion of the Public Suffix List text format.
//!
//! This is a private module. Its public types are re-exported by the parent
//! module.

use std::vec::Vec;

use tracing::debug;

use super::tree::SuffixTree;
use super::{Rules, Section};
use crate::error::RulesError;
use crate::idna::{self, IdnaOption};

//------------ Converter -----------------------------------------------------

/// Converts the text of the Public Suffix List into [`Rules`].
///
/// Only rules inside the ICANN and PRIVATE sections are kept. Each rule is
/// read up to the first white space and every label is converted to its
/// ASCII form using the converter's IDNA options.
#[derive(Clone, Copy, Debug)]
pub struct Converter {
    option: IdnaOption,
}

impl Converter {
    /// Creates a converter using IDNA 2008 processing.
    #[must_use]
    pub fn new() -> Self {
        Self::with_option(IdnaOption::IDNA2008_ASCII)
    }

    /// Creates a converter using the given IDNA options.
    #[must_use]
    pub fn with_option(option: IdnaOption) -> Self {
        Converter { option }
    }

    pub fn convert(&self, content: &str) -> Result<Rules, RulesError> {
        let mut icann = SuffixTree::new();
        let mut private = SuffixTree::new();
        let mut section = None;
        let mut seen_section = false;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some((begin, marker)) = section_marker(line) {
                if begin {
                    section = Some(marker);
                    seen_section = true;
                } else {
                    section = None;
                }
                continue;
            }
            if line.starts_with("//") {
                continue;
            }
            let tree = match section {
                Some(Section::Icann) => &mut icann,
                Some(Section::Private) => &mut private,
                None => continue,
            };
            let rule = line.split_whitespace().next().unwrap_or(line);
            self.add_rule(tree, rule)?;
        }

        if !seen_section {
            return Err(RulesError::MissingSection);
        }
        debug!(
            "loaded {} ICANN and {} private rules",
            icann.len(),
            private.len()
        );
        Ok(Rules::from_trees(icann, private))
    }

    fn add_rule(
        &self,
        tree: &mut SuffixTree,
        rule: &str,
    ) -> Result<(), RulesError> {
        let (exception, body) = match rule.strip_prefix('!') {
            Some(body) => (true, body),
            None => (false, rule),
        };
        let mut labels = Vec::new();
        for label in body.split('.').rev() {
            let label = idna::label_to_ascii(label, self.option).map_err(|error| {
                RulesError::InvalidRule {
                    line: rule.into(),
                    error,
                }
            })?;
            labels.push(label.into_string());
        }
        tree.insert(labels.iter().map(|label| label.as_str()), exception);
        Ok(())
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a section marker comment.
///
/// Returns whether the marker begins a section and which section it is.
fn section_marker(line: &str) -> Option<(bool, Section)> {
    let line = line.strip_prefix("// ===")?;
    let (begin, line) = match line.strip_prefix("BEGIN ") {
        Some(line) => (true, line),
        None => (false, line.strip_prefix("END ")?),
    };
    if line.starts_with("ICANN DOMAINS===") {
        Some((begin, Section::Icann))
    } else if line.starts_with("PRIVATE DOMAINS===") {
        Some((begin, Section::Private))
    } else {
        None
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    const LIST: &str = "\
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0.

outside.example

// ===BEGIN ICANN DOMAINS===

// com : https://www.iana.org/domains/root/db/com.html
com

// uk
uk
co.uk
// jp
*.kobe.jp
!city.kobe.jp

// cn
公司.cn extra words are ignored

// ===END ICANN DOMAINS===
// ===BEGIN PRIVATE DOMAINS===

// GitHub
github.io

// ===END PRIVATE DOMAINS===
";

    #[test]
    fn sections() {
        let rules = Converter::new().convert(LIST).unwrap();
        let icann = rules.section(Section::Icann);
        let private = rules.section(Section::Private);
        assert_eq!(icann.len(), 6);
        assert_eq!(private.len(), 1);
        assert_eq!(icann.suffix_len(["io", "github"].into_iter()), 0);
        assert_eq!(private.suffix_len(["io", "github", "foo"].into_iter()), 2);
        assert_eq!(icann.suffix_len(["example", "outside"].into_iter()), 0);
    }

    #[test]
    fn rules_are_ascii() {
        let rules = Converter::new().convert(LIST).unwrap();
        let icann = rules.section(Section::Icann);
        assert_eq!(icann.suffix_len(["cn", "xn--55qx5d", "a"].into_iter()), 2);
        assert_eq!(icann.suffix_len(["jp", "kobe", "city"].into_iter()), 2);
        assert_eq!(icann.suffix_len(["jp", "kobe", "c"].into_iter()), 3);
    }

    #[test]
    fn missing_sections() {
        assert!(matches!(
            Converter::new().convert("com\nnet\n"),
            Err(RulesError::MissingSection)
        ));
    }

    #[test]
    fn invalid_rule() {
        let list = "// ===BEGIN ICANN DOMAINS===\na⒈com\n";
        assert!(matches!(
            Converter::new().convert(list),
            Err(RulesError::InvalidRule { .. })
        ));
    }

    #[test]
    fn rule_label_with_full_stop() {
        let list = "// ===BEGIN ICANN DOMAINS===\n公司\u{3002}cn\n";
        match Converter::new().convert(list) {
            Err(RulesError::InvalidRule { line, error }) => {
                assert_eq!(line, "公司\u{3002}cn");
                assert!(error.errors().contains(idna::IdnaErrors::LABEL_HAS_DOT));
            }
            res => panic!("unexpected result {res:?}"),
        }
    }

    #[test]
    fn markers() {
        assert_eq!(
            section_marker("// ===BEGIN ICANN DOMAINS==="),
            Some((true, Section::Icann))
        );
        assert_eq!(
            section_marker("// ===END PRIVATE DOMAINS==="),
            Some((false, Section::Private))
        );
        assert_eq!(section_marker("// ===BEGIN OTHER DOMAINS==="), None);
        assert_eq!(section_marker("// com"), None);
    }
}
