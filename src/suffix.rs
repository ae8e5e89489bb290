//! Effective top level domains.

use core::fmt;

use crate::error::SyntaxError;
use crate::idna::IdnaVersion;
use crate::name::{DomainName, DomainSource};

//------------ Origin --------------------------------------------------------

/// Where a suffix is known from.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Origin {
    /// The ICANN section of the Public Suffix List.
    Icann,

    /// The PRIVATE section of the Public Suffix List.
    Private,

    /// The IANA root zone database.
    Iana,
}

//--- Display

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Origin::Icann => "ICANN",
            Origin::Private => "private",
            Origin::Iana => "IANA",
        })
    }
}

//------------ Suffix --------------------------------------------------------

/// An effective top level domain.
///
/// A suffix is a domain name together with the place it is known from, if
/// any. A suffix never ends in the root label. The null suffix is used for
/// domains that have no suffix at all.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Suffix {
    domain: DomainName,
    origin: Option<Origin>,
}

impl Suffix {
    fn new(
        domain: impl Into<DomainSource>,
        origin: Option<Origin>,
    ) -> Result<Self, SyntaxError> {
        let domain = domain.into().into_domain(IdnaVersion::Idna2008)?;
        if domain.label(0) == Some("") {
            return Err(SyntaxError::InvalidSuffix { domain, origin });
        }
        Ok(Suffix { domain, origin })
    }

    fn known(
        domain: impl Into<DomainSource>,
        origin: Origin,
    ) -> Result<Self, SyntaxError> {
        let suffix = Self::new(domain, Some(origin))?;
        if suffix.domain.is_empty() {
            return Err(SyntaxError::InvalidSuffix {
                domain: suffix.domain,
                origin: Some(origin),
            });
        }
        Ok(suffix)
    }

    /// Creates a suffix from the ICANN section of the Public Suffix List.
    pub fn from_icann(
        domain: impl Into<DomainSource>,
    ) -> Result<Self, SyntaxError> {
        Self::known(domain, Origin::Icann)
    }

    /// Creates a suffix from the PRIVATE section of the Public Suffix List.
    pub fn from_private(
        domain: impl Into<DomainSource>,
    ) -> Result<Self, SyntaxError> {
        Self::known(domain, Origin::Private)
    }

    /// Creates a suffix from the IANA root zone database.
    ///
    /// The suffix must consist of exactly one label.
    pub fn from_iana(
        domain: impl Into<DomainSource>,
    ) -> Result<Self, SyntaxError> {
        let suffix = Self::known(domain, Origin::Iana)?;
        if suffix.domain.count() != 1 {
            return Err(SyntaxError::InvalidSuffix {
                domain: suffix.domain,
                origin: Some(Origin::Iana),
            });
        }
        Ok(suffix)
    }

    /// Creates a suffix of unknown origin.
    ///
    /// The suffix may be null.
    pub fn from_unknown(
        domain: impl Into<DomainSource>,
    ) -> Result<Self, SyntaxError> {
        Self::new(domain, None)
    }

    /// Returns the null suffix for the given IDNA version.
    pub(crate) fn absent(version: IdnaVersion) -> Self {
        Suffix {
            domain: DomainName::absent(version),
            origin: None,
        }
    }

    /// Returns where the suffix is known from.
    #[must_use]
    pub fn origin(&self) -> Option<Origin> {
        self.origin
    }

    /// Returns whether the origin of the suffix is known.
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.origin.is_some()
    }

    /// Returns whether the suffix is from the ICANN section.
    #[must_use]
    pub fn is_icann(&self) -> bool {
        self.origin == Some(Origin::Icann)
    }

    /// Returns whether the suffix is from the PRIVATE section.
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.origin == Some(Origin::Private)
    }

    /// Returns whether the suffix is from the IANA root zone database.
    #[must_use]
    pub fn is_iana(&self) -> bool {
        self.origin == Some(Origin::Iana)
    }

    /// Returns whether the suffix is from the Public Suffix List.
    #[must_use]
    pub fn is_public_suffix(&self) -> bool {
        matches!(self.origin, Some(Origin::Icann | Origin::Private))
    }

    /// Returns the domain name of the suffix.
    #[must_use]
    pub fn domain(&self) -> &DomainName {
        &self.domain
    }

    /// Converts the suffix into its domain name.
    #[must_use]
    pub fn into_domain(self) -> DomainName {
        self.domain
    }

    /// Returns the value of the suffix or `None` for the null suffix.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.domain.value()
    }

    /// Returns the number of labels of the suffix.
    #[must_use]
    pub fn count(&self) -> usize {
        self.domain.count()
    }

    /// Returns the suffix in its ASCII form.
    pub fn to_ascii(&self) -> Result<Self, SyntaxError> {
        Ok(Suffix {
            domain: self.domain.to_ascii()?,
            origin: self.origin,
        })
    }

    /// Returns the suffix in its Unicode form.
    pub fn to_unicode(&self) -> Result<Self, SyntaxError> {
        Ok(Suffix {
            domain: self.domain.to_unicode()?,
            origin: self.origin,
        })
    }

    /// Returns the suffix in the same form as `domain`.
    ///
    /// The result uses the IDNA version of `domain` and is in its ASCII
    /// form if `domain` is and in its Unicode form otherwise.
    pub fn normalize(&self, domain: &DomainName) -> Result<Self, SyntaxError> {
        let name = self.domain.with_idna_version(domain.idna_version())?;
        let name = if domain.is_ascii() {
            name.to_ascii()?
        } else {
            name.to_unicode()?
        };
        Ok(Suffix {
            domain: name,
            origin: self.origin,
        })
    }
}

//--- Display

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.domain.fmt(f)
    }
}

//============ Testing =======================================================
