//! Error types.
//!
//! Host names are rejected with a [`SyntaxError`] if they are not well
//! formed. Well formed names that cannot be split along a suffix of the
//! requested kind produce a [`ResolveError`]. The strict resolution
//! functions combine both into [`Error`]. Loading the Public Suffix List
//! and the IANA root zone database fails with [`RulesError`] and
//! [`RootZoneError`] respectively.

use core::fmt;
use std::io;
use std::string::String;

use crate::idna::IdnaError;
use crate::name::DomainName;
use crate::suffix::Origin;

//------------ SyntaxError ---------------------------------------------------

/// A host name or label is not well formed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SyntaxError {
    /// The host is an IPv4 address rather than a domain name.
    UnsupportedType(String),

    /// The host contains URI delimiters or white space.
    InvalidCharacters(String),

    /// The host is ASCII but does not follow the registered name syntax.
    MalformedValue(String),

    /// The host could not be processed as an internationalized name.
    Idna(IdnaError),

    /// A label key is outside the labels of the domain name.
    InvalidLabelKey { domain: DomainName, key: isize },

    /// A label is missing or empty.
    InvalidLabel(String),

    /// The domain name cannot be used as a suffix of the given origin.
    InvalidSuffix {
        domain: DomainName,
        origin: Option<Origin>,
    },
}

//--- From

impl From<IdnaError> for SyntaxError {
    fn from(err: IdnaError) -> Self {
        SyntaxError::Idna(err)
    }
}

//--- Display and Error

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SyntaxError::UnsupportedType(host) => {
                write!(f, "the host '{host}' is an IP address, not a domain name")
            }
            SyntaxError::InvalidCharacters(host) => {
                write!(f, "the host '{host}' contains invalid characters")
            }
            SyntaxError::MalformedValue(host) => {
                write!(f, "the host '{host}' is malformed")
            }
            SyntaxError::Idna(err) => err.fmt(f),
            SyntaxError::InvalidLabelKey { domain, key } => {
                write!(f, "the label key '{key}' is invalid for '{domain}'")
            }
            SyntaxError::InvalidLabel(label) => {
                write!(f, "the label '{label}' is invalid")
            }
            SyntaxError::InvalidSuffix { domain, origin } => match origin {
                Some(origin) => write!(
                    f,
                    "the domain '{domain}' is an invalid {origin} suffix"
                ),
                None => write!(f, "the domain '{domain}' is an invalid suffix"),
            },
        }
    }
}

impl std::error::Error for SyntaxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyntaxError::Idna(err) => Some(err),
            _ => None,
        }
    }
}

//------------ ResolveError --------------------------------------------------

/// A domain name cannot be split along a suffix.
///
/// Each variant carries the domain name that failed to resolve.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResolveError {
    /// The domain name has no labels or ends in the root label.
    UnresolvableDomain(DomainName),

    /// The domain name has no suffix of the given origin.
    MissingSuffix { domain: DomainName, origin: Origin },

    /// The domain name is identical to its suffix.
    IdenticalValue(DomainName),

    /// The suffix is not made of the rightmost labels of the domain name.
    MismatchedSuffix {
        domain: DomainName,
        suffix: DomainName,
    },

    /// A subdomain or second level label needs a registrable domain.
    MissingRegistrableDomain(DomainName),

    /// A second level domain must consist of exactly one label.
    InvalidSecondLevelDomain(DomainName),
}

impl ResolveError {
    /// Returns the domain name that failed to resolve.
    #[must_use]
    pub fn domain(&self) -> &DomainName {
        match self {
            ResolveError::UnresolvableDomain(domain)
            | ResolveError::MissingSuffix { domain, .. }
            | ResolveError::IdenticalValue(domain)
            | ResolveError::MismatchedSuffix { domain, .. }
            | ResolveError::MissingRegistrableDomain(domain)
            | ResolveError::InvalidSecondLevelDomain(domain) => domain,
        }
    }

    /// Converts the error into the domain name that failed to resolve.
    #[must_use]
    pub fn into_domain(self) -> DomainName {
        match self {
            ResolveError::UnresolvableDomain(domain)
            | ResolveError::MissingSuffix { domain, .. }
            | ResolveError::IdenticalValue(domain)
            | ResolveError::MismatchedSuffix { domain, .. }
            | ResolveError::MissingRegistrableDomain(domain)
            | ResolveError::InvalidSecondLevelDomain(domain) => domain,
        }
    }
}

//--- Display and Error

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResolveError::UnresolvableDomain(domain) => {
                write!(f, "the domain '{domain}' can not contain a public suffix")
            }
            ResolveError::MissingSuffix { domain, origin } => write!(
                f,
                "the domain '{domain}' does not contain a {origin} suffix"
            ),
            ResolveError::IdenticalValue(domain) => write!(
                f,
                "the public suffix and the domain name are identical '{domain}'"
            ),
            ResolveError::MismatchedSuffix { domain, suffix } => write!(
                f,
                "the suffix '{suffix}' is not a suffix of the domain '{domain}'"
            ),
            ResolveError::MissingRegistrableDomain(domain) => write!(
                f,
                "cannot add subdomain without a registrable domain to '{domain}'"
            ),
            ResolveError::InvalidSecondLevelDomain(domain) => write!(
                f,
                "the second level domain '{domain}' must contain exactly one label"
            ),
        }
    }
}

impl std::error::Error for ResolveError {}

//------------ Error ---------------------------------------------------------

/// Resolving a host name failed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The host name is not well formed.
    Syntax(SyntaxError),

    /// The host name is well formed but cannot be resolved.
    Resolve(ResolveError),
}

//--- From

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Self {
        Error::Syntax(err)
    }
}

impl From<ResolveError> for Error {
    fn from(err: ResolveError) -> Self {
        Error::Resolve(err)
    }
}

impl From<IdnaError> for Error {
    fn from(err: IdnaError) -> Self {
        Error::Syntax(err.into())
    }
}

//--- Display and Error

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Syntax(err) => err.fmt(f),
            Error::Resolve(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Syntax(err) => Some(err),
            Error::Resolve(err) => Some(err),
        }
    }
}

//------------ RulesError ----------------------------------------------------

/// The Public Suffix List could not be loaded.
#[derive(Debug)]
pub enum RulesError {
    /// A rule could not be converted to its ASCII form.
    InvalidRule { line: String, error: IdnaError },

    /// The content has no ICANN or PRIVATE section.
    MissingSection,

    /// Reading the list failed.
    Io(io::Error),
}

//--- From

impl From<io::Error> for RulesError {
    fn from(err: io::Error) -> Self {
        RulesError::Io(err)
    }
}

//--- Display and Error

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RulesError::InvalidRule { line, error } => write!(
                f,
                "unable to load the public suffix list: invalid rule '{line}': {error}"
            ),
            RulesError::MissingSection => f.write_str(
                "unable to load the public suffix list: no section markers found",
            ),
            RulesError::Io(err) => {
                write!(f, "unable to load the public suffix list: {err}")
            }
        }
    }
}

impl std::error::Error for RulesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RulesError::InvalidRule { error, .. } => Some(error),
            RulesError::MissingSection => None,
            RulesError::Io(err) => Some(err),
        }
    }
}

//------------ RootZoneError -------------------------------------------------

/// The IANA root zone database could not be loaded.
#[derive(Debug)]
pub enum RootZoneError {
    /// The first line is not a valid version header.
    InvalidVersionLine(String),

    /// A comment appeared after the version header.
    InvalidLine(String),

    /// A line is not a valid top level domain.
    InvalidRootZoneDomain { line: String, error: SyntaxError },

    /// The content has no header or no top level domains.
    FailedConversion,

    /// Reading the database failed.
    Io(io::Error),
}

//--- From

impl From<io::Error> for RootZoneError {
    fn from(err: io::Error) -> Self {
        RootZoneError::Io(err)
    }
}

//--- Display and Error

impl fmt::Display for RootZoneError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RootZoneError::InvalidVersionLine(line) => write!(
                f,
                "unable to load the root zone database: invalid version line '{line}'"
            ),
            RootZoneError::InvalidLine(line) => write!(
                f,
                "unable to load the root zone database: invalid line '{line}'"
            ),
            RootZoneError::InvalidRootZoneDomain { line, error } => write!(
                f,
                "unable to load the root zone database: invalid top level domain '{line}': {error}"
            ),
            RootZoneError::FailedConversion => f.write_str(
                "unable to load the root zone database: no header or no records found",
            ),
            RootZoneError::Io(err) => {
                write!(f, "unable to load the root zone database: {err}")
            }
        }
    }
}

impl std::error::Error for RootZoneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RootZoneError::InvalidRootZoneDomain { error, .. } => Some(error),
            RootZoneError::Io(err) => Some(err),
            _ => None,
        }
    }
}
