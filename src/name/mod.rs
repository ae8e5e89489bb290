//! Domain names.
//!
//! This module provides [`DomainName`], an immutable, normalized domain
//! name, and [`DomainSource`], everything a domain name can be created
//! from.
//!
//! Host names are accepted in two shapes. A registered name, i.e., a plain
//! ASCII host name that possibly contains percent encoded octets, is only
//! lowercased. Any other host goes through IDNA processing and ends up in
//! its Unicode form. IPv4 addresses and hosts containing URI delimiters
//! are rejected.

pub use self::domain::DomainName;
pub use self::source::DomainSource;

mod domain;
mod parse;
mod source;
