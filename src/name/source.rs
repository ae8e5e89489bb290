//! Sources of domain names.
//!
//! This is a private module. Its public types are re-exported by the parent
//! module.

use std::string::String;

use super::domain::DomainName;
use crate::error::SyntaxError;
use crate::idna::IdnaVersion;
use crate::resolved::ResolvedDomain;
use crate::suffix::Suffix;

//------------ DomainSource --------------------------------------------------

/// Anything a domain name can be created from.
///
/// Functions that accept a host take an `impl Into<DomainSource>` so they
/// can be called with strings, with an absent value, or with any of the
/// types of this crate that carry a domain name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DomainSource {
    /// No host at all.
    Absent,

    /// A host that still needs to be parsed.
    Raw(String),

    /// An already parsed domain name.
    Name(DomainName),
}

impl DomainSource {
    /// Converts the source into a domain name using the given IDNA version.
    ///
    /// A domain name that was created with a different version is parsed
    /// again from its value.
    pub fn into_name(
        self,
        version: IdnaVersion,
    ) -> Result<DomainName, SyntaxError> {
        match self {
            DomainSource::Absent => Ok(DomainName::absent(version)),
            DomainSource::Raw(host) => DomainName::new(&host, version),
            DomainSource::Name(name) => name.with_idna_version(version),
        }
    }

    /// Converts the source into a domain name.
    ///
    /// Already parsed domain names keep their IDNA version. Everything else
    /// is parsed using `default`.
    pub fn into_domain(
        self,
        default: IdnaVersion,
    ) -> Result<DomainName, SyntaxError> {
        match self {
            DomainSource::Name(name) => Ok(name),
            other => other.into_name(default),
        }
    }
}

//--- From

impl From<&str> for DomainSource {
    fn from(host: &str) -> Self {
        DomainSource::Raw(host.into())
    }
}

impl From<String> for DomainSource {
    fn from(host: String) -> Self {
        DomainSource::Raw(host)
    }
}

impl From<&String> for DomainSource {
    fn from(host: &String) -> Self {
        DomainSource::Raw(host.clone())
    }
}

impl<T: Into<DomainSource>> From<Option<T>> for DomainSource {
    fn from(host: Option<T>) -> Self {
        match host {
            Some(host) => host.into(),
            None => DomainSource::Absent,
        }
    }
}

impl From<DomainName> for DomainSource {
    fn from(name: DomainName) -> Self {
        DomainSource::Name(name)
    }
}

impl From<&DomainName> for DomainSource {
    fn from(name: &DomainName) -> Self {
        DomainSource::Name(name.clone())
    }
}

impl From<Suffix> for DomainSource {
    fn from(suffix: Suffix) -> Self {
        DomainSource::Name(suffix.into_domain())
    }
}

impl From<&Suffix> for DomainSource {
    fn from(suffix: &Suffix) -> Self {
        DomainSource::Name(suffix.domain().clone())
    }
}

impl From<ResolvedDomain> for DomainSource {
    fn from(resolved: ResolvedDomain) -> Self {
        DomainSource::Name(resolved.into_domain())
    }
}

impl From<&ResolvedDomain> for DomainSource {
    fn from(resolved: &ResolvedDomain) -> Self {
        DomainSource::Name(resolved.domain().clone())
    }
}
