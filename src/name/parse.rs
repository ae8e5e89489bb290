//! Parsing of host names.
//!
//! This is a private module. It provides the normalization applied to every
//! host before it becomes a [`DomainName`][super::DomainName].

use std::net::Ipv4Addr;
use std::string::String;

use percent_encoding::percent_decode_str;
use tracing::trace;

use crate::error::SyntaxError;
use crate::idna::{self, IdnaVersion};

//------------ Constants -----------------------------------------------------

/// The maximum number of labels in a registered name.
const MAX_LABELS: usize = 127;

/// The maximum number of characters in a single registered name label.
const MAX_LABEL_LEN: usize = 63;

//------------ parse_host ----------------------------------------------------

/// Normalizes a host name.
///
/// Registered names, possibly percent-encoded, are lowercased and returned.
/// Everything else is run through IDNA processing in both directions so
/// that the returned value is the Unicode form of the name.
pub(super) fn parse_host(
    host: &str,
    version: IdnaVersion,
) -> Result<String, SyntaxError> {
    if host.is_empty() {
        return Ok(String::new());
    }

    if host.parse::<Ipv4Addr>().is_ok() {
        return Err(SyntaxError::UnsupportedType(host.into()));
    }

    let decoded = percent_decode_str(host).decode_utf8_lossy();
    if is_registered_name(&decoded) {
        return Ok(decoded.to_ascii_lowercase());
    }

    if decoded.contains(is_delimiter) {
        return Err(SyntaxError::InvalidCharacters(host.into()));
    }

    if decoded.bytes().all(|ch| (0x20..=0x7F).contains(&ch)) {
        return Err(SyntaxError::MalformedValue(host.into()));
    }

    trace!("applying IDNA processing to host '{host}'");
    let ascii = idna::to_ascii(&decoded, version.ascii_option())?;
    let unicode = idna::to_unicode(ascii.as_str(), version.unicode_option())?;
    Ok(unicode.into_string())
}

/// Returns whether a host follows the registered name syntax.
///
/// A registered name consists of up to 127 dot separated labels with an
/// optional trailing dot. Each label has between 1 and 63 characters, each
/// of which is an unreserved or sub-delimiter character or a percent
/// encoded octet.
fn is_registered_name(host: &str) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host);
    let mut count = 0;
    for label in host.split('.') {
        count += 1;
        if count > MAX_LABELS || !is_registered_label(label) {
            return false;
        }
    }
    true
}

fn is_registered_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    let mut pos = 0;
    let mut len = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' => pos += 1,
            b'-' | b'_' | b'~' => pos += 1,
            b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b','
            | b';' | b'=' => pos += 1,
            b'%' if bytes.len() >= pos + 3
                && bytes[pos + 1].is_ascii_hexdigit()
                && bytes[pos + 2].is_ascii_hexdigit() =>
            {
                pos += 3
            }
            _ => return false,
        }
        len += 1;
    }
    (1..=MAX_LABEL_LEN).contains(&len)
}

/// Returns whether a character is a URI delimiter or white space.
fn is_delimiter(ch: char) -> bool {
    matches!(
        ch,
        ':' | '/' | '?' | '#' | '[' | ']' | '@' | ' ' | '\t' | '\n' | '\r'
    )
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    fn parse(host: &str) -> Result<String, SyntaxError> {
        parse_host(host, IdnaVersion::Idna2008)
    }

    #[test]
    fn registered_names() {
        assert_eq!(parse("www.Example.COM").unwrap(), "www.example.com");
        assert_eq!(parse("example.com.").unwrap(), "example.com.");
        assert_eq!(parse("").unwrap(), "");
        assert_eq!(parse("_dmarc.example.org").unwrap(), "_dmarc.example.org");
    }

    #[test]
    fn percent_encoded() {
        assert_eq!(parse("%77ww.example.com").unwrap(), "www.example.com");
        assert_eq!(
            parse("%E4%BE%8B%E5%AD%90.%E6%B5%8B%E8%AF%95").unwrap(),
            "例子.测试"
        );
    }

    #[test]
    fn internationalized() {
        assert_eq!(parse("xn--85x722f.xn--55qx5d.cn").unwrap(),
            "xn--85x722f.xn--55qx5d.cn");
        assert_eq!(parse("食狮.公司.cn").unwrap(), "食狮.公司.cn");
        assert_eq!(parse("MÜNCHEN.de").unwrap(), "münchen.de");
    }

    #[test]
    fn rejected() {
        assert!(matches!(
            parse("127.0.0.1"),
            Err(SyntaxError::UnsupportedType(_))
        ));
        assert!(matches!(
            parse("www.example.com/path"),
            Err(SyntaxError::InvalidCharacters(_))
        ));
        assert!(matches!(
            parse("www example.com"),
            Err(SyntaxError::InvalidCharacters(_))
        ));
        assert!(matches!(parse("."), Err(SyntaxError::MalformedValue(_))));
        assert!(matches!(
            parse("example..com"),
            Err(SyntaxError::MalformedValue(_))
        ));
        assert!(matches!(
            parse("a.b.c.d.e.f.g.h.i.j.k.l.m.n.o.p.q.r.s.t.u.v.w.x.y.z.\
                   a.b.c.d.e.f.g.h.i.j.k.l.m.n.o.p.q.r.s.t.u.v.w.x.y.z.\
                   a.b.c.d.e.f.g.h.i.j.k.l.m.n.o.p.q.r.s.t.u.v.w.x.y.z.\
                   a.b.c.d.e.f.g.h.i.j.k.l.m.n.o.p.q.r.s.t.u.v.w.x.y.z.\
                   a.b.c.d.e.f.g.h.i.j.k.l.m.n.o.p.q.r.s.t.u.v.w.x.y.z.\
                   a.b.c.d.e.f.g.h.i.j.k.l.m.n.o.p.q.r.s.t.u.v.w.x.y.z"),
            Err(SyntaxError::MalformedValue(_))
        ));
        assert!(matches!(parse("a⒈com"), Err(SyntaxError::Idna(_))));
    }

    #[test]
    fn label_length() {
        let label = "a".repeat(63);
        assert!(is_registered_label(&label));
        let label = "a".repeat(64);
        assert!(!is_registered_label(&label));
        assert!(is_registered_label("%41bc"));
        assert!(!is_registered_label("%4"));
    }
}
