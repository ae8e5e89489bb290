//! The rule tree of a Public Suffix List section.
//!
//! This is a private module. Its public types are re-exported by the parent
//! module.

use std::collections::BTreeMap;
use std::string::String;

use tracing::trace;

//------------ SuffixTree ----------------------------------------------------

/// The rules of one section of the Public Suffix List.
///
/// The rules are kept as a tree of labels starting at the top level label.
/// A node is marked if a rule ends there. Wildcard labels get a dedicated
/// child so that they don't clash with a literal `*` label. Exception rules
/// mark the node of their leftmost label.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SuffixTree {
    root: SuffixNode,
}

impl SuffixTree {
    #[must_use]
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a rule to the tree.
    ///
    /// The labels of the rule must be given top level label first and in
    /// their ASCII form. A label `*` is a wildcard. If `exception` is true,
    /// the rule is an exception rule with its leading `!` already removed.
    pub fn insert<'l>(
        &mut self,
        labels: impl IntoIterator<Item = &'l str>,
        exception: bool,
    ) {
        self.root.insert(labels.into_iter(), exception)
    }

    /// Returns the number of labels of the longest suffix of a domain name.
    ///
    /// The labels of the domain name must be given top level label first
    /// and in their ASCII form. If no rule matches, zero is returned.
    #[must_use]
    pub fn suffix_len<'l>(
        &self,
        labels: impl Iterator<Item = &'l str> + Clone,
    ) -> usize {
        self.root.suffix_len(labels, 0)
    }

    /// Returns whether the tree contains no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty() && self.root.wildcard.is_none()
    }

    /// Returns the number of rules in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.rule_count()
    }
}

//------------ SuffixNode ----------------------------------------------------

#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct SuffixNode {
    /// A rule ends at this node.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "is_false")
    )]
    rule: bool,

    /// An exception rule ends at this node.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "is_false")
    )]
    exception: bool,

    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "BTreeMap::is_empty")
    )]
    children: BTreeMap<String, SuffixNode>,

    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    wildcard: Option<Box<SuffixNode>>,
}

impl SuffixNode {
    fn insert<'l>(
        &mut self,
        mut labels: impl Iterator<Item = &'l str>,
        exception: bool,
    ) {
        match labels.next() {
            Some("*") => self
                .wildcard
                .get_or_insert_with(Box::default)
                .insert(labels, exception),
            Some(label) => self
                .children
                .entry(label.into())
                .or_default()
                .insert(labels, exception),
            None if exception => self.exception = true,
            None => self.rule = true,
        }
    }

    /// Returns the length of the longest match below this node.
    ///
    /// `depth` is the number of labels matched to reach this node. Both a
    /// literal child and the wildcard child are followed, the longer match
    /// wins. An exception stops the walk at the current depth.
    fn suffix_len<'l>(
        &self,
        mut labels: impl Iterator<Item = &'l str> + Clone,
        depth: usize,
    ) -> usize {
        let mut len = if self.rule { depth } else { 0 };
        let label = match labels.next() {
            Some(label) => label,
            None => return len,
        };

        if let Some(child) = self.children.get(label) {
            if child.exception {
                trace!("exception rule at '{label}', suffix length {depth}");
                return depth;
            }
            len = len.max(child.suffix_len(labels.clone(), depth + 1));
        }
        if let Some(wildcard) = self.wildcard.as_deref() {
            trace!("wildcard rule matches '{label}'");
            len = len.max(wildcard.suffix_len(labels, depth + 1));
        }
        len
    }

    fn rule_count(&self) -> usize {
        usize::from(self.rule)
            + usize::from(self.exception)
            + self.children.values().map(Self::rule_count).sum::<usize>()
            + self.wildcard.as_deref().map_or(0, Self::rule_count)
    }
}

#[cfg(feature = "serde")]
fn is_false(value: &bool) -> bool {
    !value
}

//============ Testing =======================================================
