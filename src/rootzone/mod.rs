//! Resolving domain names against the IANA root zone database.
//!
//! IANA publishes the list of all delegated top level domains as a text
//! file with a version header followed by one top level domain per line.
//! [`TopLevelDomains`] holds the content of that file and resolves domain
//! names whose top level label is in it.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::string::String;

use time::OffsetDateTime;
use tracing::debug;

use crate::error::{Error, ResolveError, RootZoneError};
use crate::name::{DomainName, DomainSource};
use crate::resolved::{resolvable, ResolvedDomain};
use crate::suffix::Origin;

mod convert;

//------------ TopLevelDomains -----------------------------------------------

/// The top level domains of the IANA root zone database.
///
/// Top level domains are kept in their ASCII form.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopLevelDomains {
    version: String,

    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    last_updated: OffsetDateTime,

    records: BTreeSet<String>,
}

/// # Creation
///
impl TopLevelDomains {
    fn new(
        version: String,
        last_updated: OffsetDateTime,
        records: BTreeSet<String>,
    ) -> Self {
        TopLevelDomains {
            version,
            last_updated,
            records,
        }
    }

    /// Creates the top level domains from the text of the database.
    pub fn from_string(content: &str) -> Result<Self, RootZoneError> {
        convert::convert(content)
    }

    /// Creates the top level domains from a file containing the database.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RootZoneError> {
        let path = path.as_ref();
        debug!("loading root zone database from {}", path.display());
        Self::from_string(&fs::read_to_string(path)?)
    }
}

/// # Properties
///
impl TopLevelDomains {
    /// Returns the version of the database.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns when the database was last updated.
    #[must_use]
    pub fn last_updated(&self) -> OffsetDateTime {
        self.last_updated
    }

    /// Returns the number of top level domains.
    #[must_use]
    pub fn count(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns an iterator over the top level domains in ASCII form.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(String::as_str)
    }

    /// Returns whether a label is a top level domain.
    ///
    /// The label may be in either its ASCII or Unicode form.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        match DomainName::from_idna2008(label).and_then(|name| name.to_ascii())
        {
            Ok(name) => name.count() == 1
                && name.value().is_some_and(|value| self.records.contains(value)),
            Err(_) => false,
        }
    }
}

/// # Resolving
///
impl TopLevelDomains {
    /// Resolves a host against the top level domains.
    ///
    /// This never fails. A host that cannot be parsed results in a null
    /// domain name, a host that cannot be resolved results in a domain name
    /// with a null suffix.
    pub fn resolve(&self, host: impl Into<DomainSource>) -> ResolvedDomain {
        match self.get_iana_domain(host) {
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

    /// Resolves a host whose top level label is a top level domain.
    pub fn get_iana_domain(
        &self,
        host: impl Into<DomainSource>,
    ) -> Result<ResolvedDomain, Error> {
        let domain = resolvable(host)?;
        let ascii = domain.to_ascii()?;
        match ascii.label(0) {
            Some(label) if self.records.contains(label) => {
                ResolvedDomain::from_iana(domain)
            }
            _ => Err(ResolveError::MissingSuffix {
                domain,
                origin: Origin::Iana,
            }
            .into()),
        }
    }
}

//--- IntoIterator

impl<'a> IntoIterator for &'a TopLevelDomains {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

//============ Testing =======================================================
