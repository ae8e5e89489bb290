//! Public suffixes of domain names.
//!
//! This crate splits domain names into their effective top level domain,
//! their registrable domain, and everything in between. The effective top
//! level domain, or suffix, is determined by one of two sources:
//!
//! * the [Public Suffix List] through [`Rules`], which knows about the
//!   suffixes of the ICANN operated registries as well as private suffixes
//!   such as `github.io`, and
//! * the IANA root zone database through [`TopLevelDomains`], which knows
//!   about delegated top level domains only.
//!
//! Both are created from the text of their respective files. Downloading
//! and caching these files is left to the application.
//!
//! ```
//! use pubsuffix::Rules;
//!
//! let rules = Rules::from_string("\
//! // ===BEGIN ICANN DOMAINS===
//! com
//! io
//! // ===END ICANN DOMAINS===
//! // ===BEGIN PRIVATE DOMAINS===
//! github.io
//! // ===END PRIVATE DOMAINS===
//! ").unwrap();
//!
//! let domain = rules.resolve("www.PreF.github.io");
//! assert_eq!(domain.domain().value(), Some("www.pref.github.io"));
//! assert_eq!(domain.suffix().value(), Some("github.io"));
//! assert!(domain.suffix().is_private());
//! assert_eq!(domain.registrable_domain().value(), Some("pref.github.io"));
//! assert_eq!(domain.sub_domain().value(), Some("www"));
//! ```
//!
//! # Modules
//!
//! * [name] contains [`DomainName`], the normalized domain name all
//!   other types are built upon,
//! * [idna] provides the IDNA processing used to normalize names,
//! * [psl] resolves names against the Public Suffix List,
//! * [rootzone] resolves names against the IANA root zone database, and
//! * [error] contains the error types.
//!
//! # Reference of Feature Flags
//!
//! * `serde`: Enables serialization of the converted Public Suffix List
//!   and root zone database via [serde](https://serde.rs/) so they can be
//!   stored without keeping the original text around. This feature is
//!   enabled by default.
//!
//! [Public Suffix List]: https://publicsuffix.org/

#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use self::error::{Error, ResolveError, SyntaxError};
pub use self::name::{DomainName, DomainSource};
pub use self::psl::{Rules, Section};
pub use self::resolved::ResolvedDomain;
pub use self::rootzone::TopLevelDomains;
pub use self::suffix::{Origin, Suffix};

pub mod error;
pub mod idna;
pub mod name;
pub mod psl;
pub mod resolved;
pub mod rootzone;
pub mod suffix;
