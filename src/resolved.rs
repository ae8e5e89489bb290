//! Domain names split along their suffix.

use core::fmt;

use crate::error::{Error, ResolveError, SyntaxError};
use crate::idna::IdnaVersion;
use crate::name::{DomainName, DomainSource};
use crate::suffix::Suffix;

//------------ ResolvedDomain ------------------------------------------------

/// A domain name split into its parts.
///
/// For a domain name `www.example.co.uk` with the suffix `co.uk`, the
/// registrable domain is `example.co.uk`, the second level domain is
/// `example` and the subdomain is `www`. If the suffix is null, all three
/// parts are null as well.
///
/// All parts share the IDNA version and the ASCII or Unicode form of the
/// domain name.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ResolvedDomain {
    domain: DomainName,
    suffix: Suffix,
    registrable_domain: DomainName,
    second_level_domain: DomainName,
    sub_domain: DomainName,
}

/// # Creation
///
impl ResolvedDomain {
    /// Splits a domain name along a suffix.
    ///
    /// The suffix must be made of the rightmost labels of the domain name
    /// and the domain name must have at least one more label.
    pub fn new(
        domain: impl Into<DomainSource>,
        suffix: Suffix,
    ) -> Result<Self, Error> {
        let domain = domain.into().into_domain(IdnaVersion::Idna2008)?;
        if suffix.value().is_none() {
            return Ok(Self::unsplit(domain, suffix));
        }

        if domain.count() < 2 || domain.label(0) == Some("") {
            return Err(ResolveError::UnresolvableDomain(domain).into());
        }

        let suffix = suffix.normalize(&domain)?;
        if suffix.value() == domain.value() {
            return Err(ResolveError::IdenticalValue(domain).into());
        }

        let len = suffix.count();
        if domain.count() <= len
            || domain.labels()[..len] != suffix.domain().labels()[..]
        {
            return Err(ResolveError::MismatchedSuffix {
                suffix: suffix.domain().clone(),
                domain,
            }
            .into());
        }

        let len = len as isize;
        Ok(ResolvedDomain {
            registrable_domain: domain.slice(0, Some(len + 1))?,
            second_level_domain: domain.slice(len, Some(1))?,
            sub_domain: domain.slice(len + 1, None)?,
            suffix,
            domain,
        })
    }

    /// Resolves a domain name whose rightmost `len` labels are an ICANN suffix.
    pub fn from_icann(
        domain: impl Into<DomainSource>,
        len: usize,
    ) -> Result<Self, Error> {
        let domain = domain.into().into_domain(IdnaVersion::Idna2008)?;
        let suffix = Suffix::from_icann(Self::suffix_labels(&domain, len)?)?;
        Self::new(domain, suffix)
    }

    /// Resolves a domain name whose rightmost `len` labels are a private
    /// suffix.
    pub fn from_private(
        domain: impl Into<DomainSource>,
        len: usize,
    ) -> Result<Self, Error> {
        let domain = domain.into().into_domain(IdnaVersion::Idna2008)?;
        let suffix =
            Suffix::from_private(Self::suffix_labels(&domain, len)?)?;
        Self::new(domain, suffix)
    }

    /// Resolves a domain name whose top level label is an IANA suffix.
    pub fn from_iana(domain: impl Into<DomainSource>) -> Result<Self, Error> {
        let domain = domain.into().into_domain(IdnaVersion::Idna2008)?;
        let suffix = Suffix::from_iana(Self::suffix_labels(&domain, 1)?)?;
        Self::new(domain, suffix)
    }

    /// Creates an unresolved domain name.
    ///
    /// The suffix and all parts derived from it are null.
    pub fn from_unknown(
        domain: impl Into<DomainSource>,
    ) -> Result<Self, SyntaxError> {
        let domain = domain.into().into_domain(IdnaVersion::Idna2008)?;
        Ok(Self::unknown(domain))
    }

    /// Resolves a domain name whose rightmost `len` labels are a suffix of
    /// unknown origin.
    pub fn from_unknown_with_len(
        domain: impl Into<DomainSource>,
        len: usize,
    ) -> Result<Self, Error> {
        let domain = domain.into().into_domain(IdnaVersion::Idna2008)?;
        let suffix =
            Suffix::from_unknown(Self::suffix_labels(&domain, len)?)?;
        Self::new(domain, suffix)
    }

    pub(crate) fn unknown(domain: DomainName) -> Self {
        let suffix = Suffix::absent(domain.idna_version());
        Self::unsplit(domain, suffix)
    }

    fn unsplit(domain: DomainName, suffix: Suffix) -> Self {
        let null = domain.clear();
        ResolvedDomain {
            registrable_domain: null.clone(),
            second_level_domain: null.clone(),
            sub_domain: null,
            suffix,
            domain,
        }
    }

    fn suffix_labels(
        domain: &DomainName,
        len: usize,
    ) -> Result<DomainName, SyntaxError> {
        domain.slice(0, Some(isize::try_from(len).unwrap_or(isize::MAX)))
    }
}

/// # Access to the Parts
///
impl ResolvedDomain {
    #[must_use]
    pub fn domain(&self) -> &DomainName {
        &self.domain
    }

    #[must_use]
    pub fn into_domain(self) -> DomainName {
        self.domain
    }

    #[must_use]
    pub fn suffix(&self) -> &Suffix {
        &self.suffix
    }

    /// Returns the suffix together with the label left of it.
    #[must_use]
    pub fn registrable_domain(&self) -> &DomainName {
        &self.registrable_domain
    }

    /// Returns the label left of the suffix.
    #[must_use]
    pub fn second_level_domain(&self) -> &DomainName {
        &self.second_level_domain
    }

    /// Returns all labels left of the registrable domain.
    #[must_use]
    pub fn sub_domain(&self) -> &DomainName {
        &self.sub_domain
    }
}

/// # Derived Domains
///
impl ResolvedDomain {
    /// Returns the resolved domain in its ASCII form.
    pub fn to_ascii(&self) -> Result<Self, Error> {
        Self::new(self.domain.to_ascii()?, self.suffix.to_ascii()?)
    }

    /// Returns the resolved domain in its Unicode form.
    pub fn to_unicode(&self) -> Result<Self, Error> {
        Self::new(self.domain.to_unicode()?, self.suffix.to_unicode()?)
    }

    /// Replaces the suffix.
    ///
    /// The labels left of the current suffix are kept and the new suffix
    /// is put to their right.
    pub fn with_suffix(&self, suffix: Suffix) -> Result<Self, Error> {
        let suffix = suffix.normalize(&self.domain)?;
        if suffix == self.suffix {
            return Ok(self.clone());
        }

        let len = isize::try_from(self.suffix.count()).unwrap_or(isize::MAX);
        let host = self.domain.slice(len, None)?;
        let domain = if suffix.value().is_none() {
            host
        } else {
            host.append(suffix.domain())?
        };
        Self::new(domain, suffix)
    }

    /// Replaces the subdomain.
    ///
    /// Passing an absent subdomain removes it.
    pub fn with_sub_domain(
        &self,
        sub_domain: impl Into<DomainSource>,
    ) -> Result<Self, Error> {
        if self.suffix.value().is_none() {
            return Err(ResolveError::MissingRegistrableDomain(
                self.domain.clone(),
            )
            .into());
        }

        let sub_domain = self.domain.normalize(sub_domain)?;
        if sub_domain.value() == self.sub_domain.value() {
            return Ok(self.clone());
        }

        let domain = if sub_domain.value().is_none() {
            self.registrable_domain.clone()
        } else {
            self.registrable_domain.prepend(&sub_domain)?
        };
        Self::new(domain, self.suffix.clone())
    }

    /// Replaces the second level domain.
    ///
    /// The new second level domain must consist of exactly one label.
    pub fn with_second_level_domain(
        &self,
        label: impl Into<DomainSource>,
    ) -> Result<Self, Error> {
        if self.suffix.value().is_none() {
            return Err(ResolveError::MissingRegistrableDomain(
                self.domain.clone(),
            )
            .into());
        }

        let label = self.domain.normalize(label)?;
        if label.count() != 1 {
            return Err(ResolveError::InvalidSecondLevelDomain(label).into());
        }

        let registrable = self.registrable_domain.with_label(-1, &label)?;
        if registrable.value() == self.registrable_domain.value() {
            return Ok(self.clone());
        }

        let domain = if self.sub_domain.value().is_none() {
            registrable
        } else {
            registrable.prepend(&self.sub_domain)?
        };
        Self::new(domain, self.suffix.clone())
    }
}

//--- Display

impl fmt::Display for ResolvedDomain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.domain.fmt(f)
    }
}

//------------ resolvable ----------------------------------------------------

/// Converts a host into a domain name that may contain a suffix.
///
/// The null name, the empty name and absolute names are rejected.
pub(crate) fn resolvable(
    host: impl Into<DomainSource>,
) -> Result<DomainName, Error> {
    let domain = host.into().into_domain(IdnaVersion::Idna2008)?;
    match domain.label(0) {
        None | Some("") => Err(ResolveError::UnresolvableDomain(domain).into()),
        Some(_) => Ok(domain),
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::suffix::Origin;

    fn resolved(host: &str, suffix: &str) -> ResolvedDomain {
        ResolvedDomain::new(host, Suffix::from_icann(suffix).unwrap())
            .unwrap()
    }

    #[test]
    fn split() {
        let domain = resolved("www.example.co.uk", "co.uk");
        assert_eq!(domain.domain().value(), Some("www.example.co.uk"));
        assert_eq!(domain.suffix().value(), Some("co.uk"));
        assert_eq!(domain.registrable_domain().value(), Some("example.co.uk"));
        assert_eq!(domain.second_level_domain().value(), Some("example"));
        assert_eq!(domain.sub_domain().value(), Some("www"));

        let domain = resolved("example.co.uk", "co.uk");
        assert_eq!(domain.sub_domain().value(), None);
    }

    #[test]
    fn unknown() {
        let domain = ResolvedDomain::from_unknown("localhost").unwrap();
        assert_eq!(domain.domain().value(), Some("localhost"));
        assert_eq!(domain.suffix().value(), None);
        assert_eq!(domain.registrable_domain().value(), None);
        assert_eq!(domain.second_level_domain().value(), None);
        assert_eq!(domain.sub_domain().value(), None);

        let domain =
            ResolvedDomain::from_unknown_with_len("www.example.zz", 1).unwrap();
        assert_eq!(domain.suffix().value(), Some("zz"));
        assert!(!domain.suffix().is_known());
        assert_eq!(domain.registrable_domain().value(), Some("example.zz"));
    }

    #[test]
    fn constructors() {
        let domain = ResolvedDomain::from_icann("www.example.co.uk", 2).unwrap();
        assert_eq!(domain.suffix().origin(), Some(Origin::Icann));
        let domain =
            ResolvedDomain::from_private("thephpleague.github.io", 2).unwrap();
        assert!(domain.suffix().is_private());
        assert_eq!(domain.registrable_domain().value(), Some("thephpleague.github.io"));
        let domain = ResolvedDomain::from_iana("www.example.com").unwrap();
        assert!(domain.suffix().is_iana());
        assert_eq!(domain.suffix().value(), Some("com"));
    }

    #[test]
    fn rejected() {
        let suffix = Suffix::from_icann("com").unwrap();
        assert!(matches!(
            ResolvedDomain::new("com", suffix.clone()),
            Err(Error::Resolve(ResolveError::UnresolvableDomain(_)))
        ));
        assert!(matches!(
            ResolvedDomain::new("example.com.", suffix.clone()),
            Err(Error::Resolve(ResolveError::UnresolvableDomain(_)))
        ));
        assert!(matches!(
            ResolvedDomain::new("example.org", suffix),
            Err(Error::Resolve(ResolveError::MismatchedSuffix { .. }))
        ));
        assert!(matches!(
            ResolvedDomain::new(
                "co.uk",
                Suffix::from_icann("co.uk").unwrap()
            ),
            Err(Error::Resolve(ResolveError::IdenticalValue(_)))
        ));
        assert!(matches!(
            ResolvedDomain::from_icann("www.example.com", 0),
            Err(Error::Syntax(SyntaxError::InvalidSuffix { .. }))
        ));
    }

    #[test]
    fn idna_forms() {
        let domain = resolved("www.食狮.公司.cn", "xn--55qx5d.cn");
        assert_eq!(domain.suffix().value(), Some("公司.cn"));
        assert_eq!(domain.registrable_domain().value(), Some("食狮.公司.cn"));

        let ascii = domain.to_ascii().unwrap();
        assert_eq!(ascii.domain().value(), Some("www.xn--85x722f.xn--55qx5d.cn"));
        assert_eq!(ascii.suffix().value(), Some("xn--55qx5d.cn"));
        assert!(ascii.suffix().is_icann());
        assert_eq!(ascii.to_unicode().unwrap(), domain);
    }

    #[test]
    fn with_suffix() {
        let domain = resolved("www.example.com", "com");
        let changed = domain
            .with_suffix(Suffix::from_icann("co.uk").unwrap())
            .unwrap();
        assert_eq!(changed.domain().value(), Some("www.example.co.uk"));
        assert_eq!(changed.registrable_domain().value(), Some("example.co.uk"));
        assert!(changed.suffix().is_icann());

        let same = domain
            .with_suffix(Suffix::from_icann("com").unwrap())
            .unwrap();
        assert_eq!(same, domain);

        let removed = domain
            .with_suffix(Suffix::from_unknown(None::<&str>).unwrap())
            .unwrap();
        assert_eq!(removed.domain().value(), Some("www.example"));
        assert_eq!(removed.suffix().value(), None);
    }

    #[test]
    fn with_sub_domain() {
        let domain = resolved("www.example.com", "com");
        let changed = domain.with_sub_domain("shop.eu").unwrap();
        assert_eq!(changed.domain().value(), Some("shop.eu.example.com"));
        assert_eq!(changed.sub_domain().value(), Some("shop.eu"));

        let removed = domain.with_sub_domain(None::<&str>).unwrap();
        assert_eq!(removed.domain().value(), Some("example.com"));
        assert_eq!(removed.sub_domain().value(), None);

        assert_eq!(domain.with_sub_domain("www").unwrap(), domain);

        let unknown = ResolvedDomain::from_unknown("localhost").unwrap();
        assert!(matches!(
            unknown.with_sub_domain("www"),
            Err(Error::Resolve(ResolveError::MissingRegistrableDomain(_)))
        ));
    }

    #[test]
    fn with_second_level_domain() {
        let domain = resolved("www.example.com", "com");
        let changed = domain.with_second_level_domain("acme").unwrap();
        assert_eq!(changed.domain().value(), Some("www.acme.com"));
        assert_eq!(changed.second_level_domain().value(), Some("acme"));
        assert_eq!(changed.sub_domain().value(), Some("www"));

        let changed = resolved("example.com", "com")
            .with_second_level_domain("acme")
            .unwrap();
        assert_eq!(changed.domain().value(), Some("acme.com"));

        assert!(matches!(
            domain.with_second_level_domain("foo.bar"),
            Err(Error::Resolve(ResolveError::InvalidSecondLevelDomain(_)))
        ));
        assert_eq!(domain.with_second_level_domain("example").unwrap(), domain);
    }
}
