//! Resolving domain names against the Public Suffix List.
//!
//! The [Public Suffix List] is a list of rules describing under which
//! domain names the public can register names. The list is split into an
//! ICANN section with the suffixes operated by registries and a PRIVATE
//! section with suffixes that organizations have submitted for their own
//! domains.
//!
//! [`Rules`] holds both sections of the list as [`SuffixTree`]s. It is
//! created from the text of the list by [`Rules::from_string`] or
//! [`Rules::from_path`]. Fetching and caching the list is left to the
//! application.
//!
//! ```
//! use pubsuffix::psl::Rules;
//!
//! let rules = Rules::from_string(
//!     "// ===BEGIN ICANN DOMAINS===\nuk\nco.uk\n// ===END ICANN DOMAINS===",
//! ).unwrap();
//! let domain = rules.resolve("www.example.co.uk");
//! assert_eq!(domain.suffix().value(), Some("co.uk"));
//! assert_eq!(domain.registrable_domain().value(), Some("example.co.uk"));
//! ```
//!
//! [Public Suffix List]: https://publicsuffix.org/

pub use self::convert::Converter;
pub use self::tree::SuffixTree;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, ResolveError, RulesError};
use crate::name::{DomainName, DomainSource};
use crate::resolved::{resolvable, ResolvedDomain};
use crate::suffix::{Origin, Suffix};

mod convert;
mod tree;

//------------ Section -------------------------------------------------------

/// A section of the Public Suffix List.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Section {
    Icann,
    Private,
}

impl From<Section> for Origin {
    fn from(section: Section) -> Self {
        match section {
            Section::Icann => Origin::Icann,
            Section::Private => Origin::Private,
        }
    }
}

//------------ Rules ---------------------------------------------------------

/// The rules of the Public Suffix List.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rules {
    #[cfg_attr(feature = "serde", serde(rename = "ICANN_DOMAINS"))]
    icann: SuffixTree,

    #[cfg_attr(feature = "serde", serde(rename = "PRIVATE_DOMAINS"))]
    private: SuffixTree,
}

/// # Creation
///
impl Rules {
    /// Creates the rules from the text of the Public Suffix List.
    pub fn from_string(content: &str) -> Result<Self, RulesError> {
        Converter::new().convert(content)
    }

    /// Creates the rules from a file containing the Public Suffix List.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let path = path.as_ref();
        debug!("loading public suffix list from {}", path.display());
        Self::from_string(&fs::read_to_string(path)?)
    }

    /// Creates the rules from previously converted trees.
    #[must_use]
    pub fn from_trees(icann: SuffixTree, private: SuffixTree) -> Self {
        Rules { icann, private }
    }

    /// Returns the rule tree of a section.
    #[must_use]
    pub fn section(&self, section: Section) -> &SuffixTree {
        match section {
            Section::Icann => &self.icann,
            Section::Private => &self.private,
        }
    }
}

/// # Resolving
///
impl Rules {
    /// Resolves a host against both sections.
    ///
    /// This never fails. A host that cannot be parsed results in a null
    /// domain name, a host that cannot be resolved results in a domain name
    /// with a null suffix.
    pub fn resolve(&self, host: impl Into<DomainSource>) -> ResolvedDomain {
        match self.get_cookie_domain(host) {
            Ok(resolved) => resolved,
            Err(Error::Resolve(err)) => {
                debug!("falling back to unknown suffix: {err}");
                ResolvedDomain::unknown(err.into_domain())
            }
            Err(Error::Syntax(err)) => {
                debug!("falling back to null domain: {err}");
                ResolvedDomain::unknown(DomainName::null())
            }
        }
    }

    /// Resolves a host against both sections.
    ///
    /// The longer suffix of the two sections wins, with ties going to the
    /// ICANN section. If no ICANN rule matches at all, the top level label
    /// is used as a suffix of unknown origin.
    pub fn get_cookie_domain(
        &self,
        host: impl Into<DomainSource>,
    ) -> Result<ResolvedDomain, Error> {
        let domain = resolvable(host)?;
        match self.effective_suffix(&domain)? {
            (len, Some(Section::Icann)) => ResolvedDomain::from_icann(domain, len),
            (len, Some(Section::Private)) => {
                ResolvedDomain::from_private(domain, len)
            }
            (len, None) => ResolvedDomain::from_unknown_with_len(domain, len),
        }
    }

    /// Resolves a host whose effective suffix is in the ICANN section.
    pub fn get_icann_domain(
        &self,
        host: impl Into<DomainSource>,
    ) -> Result<ResolvedDomain, Error> {
        self.get_section_domain(host, Section::Icann)
    }

    /// Resolves a host whose effective suffix is in the PRIVATE section.
    pub fn get_private_domain(
        &self,
        host: impl Into<DomainSource>,
    ) -> Result<ResolvedDomain, Error> {
        self.get_section_domain(host, Section::Private)
    }

    /// Returns the longest suffix of a host found in a single section.
    ///
    /// Unlike [`get_icann_domain`][Self::get_icann_domain], the other
    /// section is not considered. For `myblog.blogspot.com`, the ICANN
    /// suffix is `com` even though the effective suffix is the private
    /// `blogspot.com`.
    pub fn section_suffix(
        &self,
        host: impl Into<DomainSource>,
        section: Section,
    ) -> Result<Suffix, Error> {
        let domain = resolvable(host)?;
        let len = self.suffix_len(&domain, section)?;
        if len < 1 {
            return Err(ResolveError::MissingSuffix {
                domain,
                origin: section.into(),
            }
            .into());
        }
        let suffix = domain.slice(0, Some(len as isize))?;
        let suffix = match section {
            Section::Icann => Suffix::from_icann(suffix)?,
            Section::Private => Suffix::from_private(suffix)?,
        };
        Ok(suffix)
    }

    fn get_section_domain(
        &self,
        host: impl Into<DomainSource>,
        section: Section,
    ) -> Result<ResolvedDomain, Error> {
        let domain = resolvable(host)?;
        match self.effective_suffix(&domain)? {
            (len, Some(found)) if found == section => match section {
                Section::Icann => ResolvedDomain::from_icann(domain, len),
                Section::Private => ResolvedDomain::from_private(domain, len),
            },
            _ => Err(ResolveError::MissingSuffix {
                domain,
                origin: section.into(),
            }
            .into()),
        }
    }

    /// Determines the effective suffix of a domain name.
    ///
    /// Returns the number of labels of the suffix and the section it was
    /// found in.
    fn effective_suffix(
        &self,
        domain: &DomainName,
    ) -> Result<(usize, Option<Section>), Error> {
        let icann = self.suffix_len(domain, Section::Icann)?;
        let private = self.suffix_len(domain, Section::Private)?;
        if icann < 1 && private < 1 {
            Ok((1, None))
        } else if private > icann {
            Ok((private, Some(Section::Private)))
        } else {
            Ok((icann, Some(Section::Icann)))
        }
    }

    fn suffix_len(
        &self,
        domain: &DomainName,
        section: Section,
    ) -> Result<usize, Error> {
        let ascii = domain.to_ascii()?;
        Ok(self.section(section).suffix_len(ascii.iter()))
    }
}

//============ Testing =======================================================
