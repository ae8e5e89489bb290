//! International Domain Names in Applications.
//!
//! This module wraps UTS #46 processing of host names. Both conversions
//! report failure through [`IdnaError`] which carries the set of rules the
//! input violated as an [`IdnaErrors`] value rather than a simple flag, so
//! that callers can give precise diagnostics.
//!
//! Processing is steered by an [`IdnaOption`] flag set. The two standard
//! configurations, IDNA 2008 and IDNA 2003, are available as presets and
//! through the [`IdnaVersion`] enum which a
//! [`DomainName`][crate::DomainName] carries along so that all names derived
//! from it are processed the same way.

use core::{fmt, ops};
use percent_encoding::percent_decode_str;
use tracing::trace;
use unicode_bidi::{bidi_class, BidiClass};
use unicode_normalization::char::{canonical_combining_class, is_combining_mark};
use unicode_normalization::is_nfc;

//------------ Constants -----------------------------------------------------

/// The ACE prefix starting every A-label.
const ACE_PREFIX: &str = "xn--";

/// The maximum length of a label in its ASCII form.
const MAX_LABEL_LEN: usize = 63;

/// The maximum length of a domain name in its ASCII form.
///
/// This excludes the optional trailing dot of the root label.
const MAX_NAME_LEN: usize = 253;

const ZWNJ: char = '\u{200C}';
const ZWJ: char = '\u{200D}';

//------------ IdnaOption ----------------------------------------------------

/// A set of flags steering UTS #46 processing.
///
/// The flag values are those used by ICU so that option values can be
/// exchanged with other implementations.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct IdnaOption(u32);

impl IdnaOption {
    /// No flags set: transitional processing without extra checks.
    pub const DEFAULT: Self = IdnaOption(0);

    /// Only allow letters, digits, and the hyphen in ASCII labels.
    pub const USE_STD3_RULES: Self = IdnaOption(0x2);

    /// Check the bidi rules of RFC 5893.
    pub const CHECK_BIDI: Self = IdnaOption(0x4);

    /// Check the CONTEXTJ rules of RFC 5892.
    pub const CHECK_CONTEXTJ: Self = IdnaOption(0x8);

    /// Use non-transitional processing when converting to ASCII.
    pub const NONTRANSITIONAL_TO_ASCII: Self = IdnaOption(0x10);

    /// Use non-transitional processing when converting to Unicode.
    pub const NONTRANSITIONAL_TO_UNICODE: Self = IdnaOption(0x20);

    /// Check the CONTEXTO rules of RFC 5892.
    pub const CHECK_CONTEXTO: Self = IdnaOption(0x40);

    /// The IDNA 2008 options for conversion to ASCII.
    pub const IDNA2008_ASCII: Self = IdnaOption(
        Self::USE_STD3_RULES.0
            | Self::CHECK_BIDI.0
            | Self::CHECK_CONTEXTJ.0
            | Self::NONTRANSITIONAL_TO_ASCII.0,
    );

    /// The IDNA 2008 options for conversion to Unicode.
    pub const IDNA2008_UNICODE: Self = IdnaOption(
        Self::USE_STD3_RULES.0
            | Self::CHECK_BIDI.0
            | Self::CHECK_CONTEXTJ.0
            | Self::NONTRANSITIONAL_TO_UNICODE.0,
    );

    /// The IDNA 2003 options for conversion to ASCII.
    pub const IDNA2003_ASCII: Self = Self::DEFAULT;

    /// The IDNA 2003 options for conversion to Unicode.
    pub const IDNA2003_UNICODE: Self = Self::DEFAULT;

    /// Creates an option set from its raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        IdnaOption(bits)
    }

    /// Returns the raw bits of the option set.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns whether all flags of `other` are set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl ops::BitOr for IdnaOption {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        IdnaOption(self.0 | other.0)
    }
}

//------------ IdnaVersion ---------------------------------------------------

/// The IDNA processing a domain name has been created with.
///
/// The version is picked once when a name is created and is then kept by
/// every name derived from it.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IdnaVersion {
    /// Transitional, IDNA 2003 compatible processing.
    Idna2003,

    /// Non-transitional processing with STD3, bidi, and CONTEXTJ checks.
    Idna2008,
}

impl IdnaVersion {
    /// Returns the options for converting names to ASCII.
    #[must_use]
    pub const fn ascii_option(self) -> IdnaOption {
        match self {
            IdnaVersion::Idna2003 => IdnaOption::IDNA2003_ASCII,
            IdnaVersion::Idna2008 => IdnaOption::IDNA2008_ASCII,
        }
    }

    /// Returns the options for converting names to Unicode.
    #[must_use]
    pub const fn unicode_option(self) -> IdnaOption {
        match self {
            IdnaVersion::Idna2003 => IdnaOption::IDNA2003_UNICODE,
            IdnaVersion::Idna2008 => IdnaOption::IDNA2008_UNICODE,
        }
    }
}

//------------ NormalizedString ----------------------------------------------

/// The successful outcome of an IDNA conversion.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct NormalizedString {
    /// The converted domain name.
    result: String,

    /// Whether transitional and non-transitional processing differ.
    transitional_different: bool,
}

impl NormalizedString {
    fn new(result: String, transitional_different: bool) -> Self {
        NormalizedString {
            result,
            transitional_different,
        }
    }

    /// Returns the converted name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.result
    }

    /// Converts the value into the converted name.
    #[must_use]
    pub fn into_string(self) -> String {
        self.result
    }

    /// Returns whether the input contained deviation characters.
    ///
    /// For these characters, transitional and non-transitional processing
    /// produce different results.
    #[must_use]
    pub fn is_transitional_different(&self) -> bool {
        self.transitional_different
    }
}

impl AsRef<str> for NormalizedString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for NormalizedString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.result)
    }
}

//------------ to_ascii and to_unicode ---------------------------------------

/// Converts a host name to its ASCII form.
///
/// The input is percent-decoded first. If the decoded name only contains
/// printable ASCII, it is lowercased and returned without further
/// processing. Otherwise, UTS #46 ToASCII processing is applied using
/// `options`.
pub fn to_ascii(
    input: &str,
    options: IdnaOption,
) -> Result<NormalizedString, IdnaError> {
    let decoded = percent_decode_str(input).decode_utf8_lossy();
    if decoded.bytes().all(|ch| (0x20..=0x7F).contains(&ch)) {
        return Ok(NormalizedString::new(decoded.to_ascii_lowercase(), false));
    }

    let nontransitional =
        options.contains(IdnaOption::NONTRANSITIONAL_TO_ASCII);
    let (mapped, _) = uts46(options, nontransitional).to_unicode(&decoded);
    let errors = check(&decoded, &mapped, options, nontransitional, true);
    if !errors.is_empty() {
        return Err(IdnaError::new(input, errors));
    }

    let result = match uts46(options, nontransitional)
        .verify_dns_length(true)
        .to_ascii(&decoded)
    {
        Ok(result) => Some(result),
        Err(err) => {
            trace!("conversion of '{decoded}' to ASCII failed: {err:?}");
            bidi_only(&mapped, options).then(|| encode(&mapped)).flatten()
        }
    };
    match result {
        Some(result) => {
            Ok(NormalizedString::new(result, has_deviation(&decoded)))
        }
        None => Err(IdnaError::new(input, IdnaErrors::DISALLOWED)),
    }
}

/// Converts a host name to its Unicode form.
///
/// If the input contains no A-label, it is returned unchanged. Otherwise,
/// UTS #46 ToUnicode processing is applied using `options`.
pub fn to_unicode(
    input: &str,
    options: IdnaOption,
) -> Result<NormalizedString, IdnaError> {
    if !contains_ace_prefix(input) {
        return Ok(NormalizedString::new(input.into(), false));
    }

    let nontransitional =
        options.contains(IdnaOption::NONTRANSITIONAL_TO_UNICODE);
    let (result, outcome) = uts46(options, nontransitional).to_unicode(input);
    let errors = check(input, &result, options, nontransitional, false);
    if !errors.is_empty() {
        return Err(IdnaError::new(input, errors));
    }
    if let Err(err) = outcome {
        trace!("conversion of '{input}' to Unicode failed: {err:?}");
        if !bidi_only(&result, options) {
            return Err(IdnaError::new(input, IdnaErrors::DISALLOWED));
        }
    }
    let transitional_different = has_deviation(&result);
    Ok(NormalizedString::new(result, transitional_different))
}

/// Converts a single label to its ASCII form.
///
/// This is [`to_ascii`] for input that must not contain more than one
/// label. Full stops, including those that UTS #46 maps to a full stop,
/// are reported as [`IdnaErrors::LABEL_HAS_DOT`].
pub fn label_to_ascii(
    label: &str,
    options: IdnaOption,
) -> Result<NormalizedString, IdnaError> {
    let has_dot = percent_decode_str(label)
        .decode_utf8_lossy()
        .contains(is_label_separator);
    match to_ascii(label, options) {
        Ok(res) if !has_dot => Ok(res),
        Ok(_) => Err(IdnaError::new(label, IdnaErrors::LABEL_HAS_DOT)),
        Err(err) if has_dot => Err(IdnaError::new(
            label,
            err.errors() | IdnaErrors::LABEL_HAS_DOT,
        )),
        Err(err) => Err(err),
    }
}

/// Returns whether a string contains the ACE prefix anywhere.
pub(crate) fn contains_ace_prefix(s: &str) -> bool {
    s.as_bytes()
        .windows(ACE_PREFIX.len())
        .any(|w| w.eq_ignore_ascii_case(ACE_PREFIX.as_bytes()))
}

fn uts46(options: IdnaOption, nontransitional: bool) -> ::idna::Config {
    ::idna::Config::default()
        .use_std3_ascii_rules(options.contains(IdnaOption::USE_STD3_RULES))
        .transitional_processing(!nontransitional)
        .check_hyphens(true)
}

/// Returns whether a failed conversion only failed the bidi rules.
///
/// The UTS #46 implementation always applies the bidi rules. Without
/// [`IdnaOption::CHECK_BIDI`] such a failure is not an error.
fn bidi_only(mapped: &str, options: IdnaOption) -> bool {
    !options.contains(IdnaOption::CHECK_BIDI) && !bidi_errors(mapped).is_empty()
}

/// Encodes the labels of a mapped name into A-labels where necessary.
fn encode(mapped: &str) -> Option<String> {
    let mut res = String::with_capacity(mapped.len());
    for (i, label) in mapped.split('.').enumerate() {
        if i > 0 {
            res.push('.');
        }
        if label.is_ascii() {
            res.push_str(label);
        } else {
            res.push_str(ACE_PREFIX);
            res.push_str(&::idna::punycode::encode_str(label)?);
        }
    }
    Some(res)
}

fn has_deviation(s: &str) -> bool {
    s.chars()
        .any(|ch| matches!(ch, '\u{00DF}' | '\u{03C2}' | ZWNJ | ZWJ))
}

fn is_label_separator(ch: char) -> bool {
    matches!(ch, '.' | '\u{3002}' | '\u{FF0E}' | '\u{FF61}')
}

fn has_ace_prefix(label: &str) -> bool {
    label.len() >= ACE_PREFIX.len()
        && label.as_bytes()[..ACE_PREFIX.len()]
            .eq_ignore_ascii_case(ACE_PREFIX.as_bytes())
}

/// Returns the length a label will have in its ASCII form.
fn ascii_len(label: &str) -> usize {
    if label.is_ascii() {
        label.len()
    } else {
        ::idna::punycode::encode_str(label)
            .map_or(usize::MAX, |s| s.len() + ACE_PREFIX.len())
    }
}

//------------ Rule Checks ---------------------------------------------------

/// Determines the rules a name violates.
///
/// `input` is the name as given, `mapped` the name after UTS #46 mapping
/// with A-labels decoded. Code points are checked on the input since
/// mapping hides where they came from. The label rules are checked on the
/// mapped labels. The length rules only apply when converting to ASCII.
fn check(
    input: &str,
    mapped: &str,
    options: IdnaOption,
    nontransitional: bool,
    ascii: bool,
) -> IdnaErrors {
    let mut errors = IdnaErrors::EMPTY;
    for label in input.split(is_label_separator) {
        errors.insert(input_label_errors(label, options, nontransitional));
    }

    let punycode = errors.contains(IdnaErrors::PUNYCODE);
    let mapped = mapped.strip_suffix('.').unwrap_or(mapped);
    let mut total = 0usize;
    for label in mapped.split('.') {
        if label.is_empty() {
            if ascii && !punycode {
                errors.insert(IdnaErrors::EMPTY_LABEL);
            }
            continue;
        }
        errors.insert(mapped_label_errors(label, ascii));
        total = total.saturating_add(ascii_len(label)).saturating_add(1);
    }
    if ascii && total.saturating_sub(1) > MAX_NAME_LEN {
        errors.insert(IdnaErrors::DOMAIN_NAME_TOO_LONG);
    }

    if options.contains(IdnaOption::CHECK_BIDI) {
        errors.insert(bidi_errors(mapped));
    }
    if nontransitional && options.contains(IdnaOption::CHECK_CONTEXTJ) {
        errors.insert(contextj_errors(mapped));
    }
    if options.contains(IdnaOption::CHECK_CONTEXTO) {
        errors.insert(contexto_errors(mapped));
    }
    errors
}

/// Checks the code points and the A-label of an input label.
fn input_label_errors(
    label: &str,
    options: IdnaOption,
    nontransitional: bool,
) -> IdnaErrors {
    let mut errors = IdnaErrors::EMPTY;
    let std3 = options.contains(IdnaOption::USE_STD3_RULES);
    for ch in label.chars() {
        if ch.is_ascii() {
            if std3 && !(ch.is_ascii_alphanumeric() || ch == '-') {
                errors.insert(IdnaErrors::DISALLOWED);
            }
        } else if is_disallowed(ch, std3, nontransitional) {
            errors.insert(IdnaErrors::DISALLOWED);
        }
    }

    if has_ace_prefix(label) {
        let encoded = label[ACE_PREFIX.len()..].to_ascii_lowercase();
        match ::idna::punycode::decode_to_string(&encoded) {
            None => errors.insert(IdnaErrors::PUNYCODE),
            Some(decoded) => {
                if decoded.is_ascii()
                    || !is_nfc(&decoded)
                    || decoded.chars().any(|ch| is_disallowed(ch, std3, true))
                {
                    errors.insert(IdnaErrors::INVALID_ACE_LABEL)
                }
            }
        }
    }
    errors
}

/// Returns whether a non-ASCII code point is disallowed.
///
/// The mapping table of the UTS #46 implementation is consulted by
/// processing the code point on its own. Combining marks and Arabic digits
/// are given a base so that the processing only fails for the code point
/// itself.
fn is_disallowed(ch: char, std3: bool, nontransitional: bool) -> bool {
    if ch == ZWJ || ch == ZWNJ || is_label_separator(ch) {
        return false;
    }
    let mut buf = String::with_capacity(8);
    if is_combining_mark(ch) {
        buf.push('a');
    } else if bidi_class(ch) == BidiClass::AN {
        buf.push('\u{05D0}');
    }
    buf.push(ch);
    ::idna::Config::default()
        .use_std3_ascii_rules(std3)
        .transitional_processing(!nontransitional)
        .to_unicode(&buf)
        .1
        .is_err()
}

/// Checks the hyphen, combining mark, and length rules of a mapped label.
fn mapped_label_errors(label: &str, ascii: bool) -> IdnaErrors {
    let mut errors = IdnaErrors::EMPTY;
    if ascii && ascii_len(label) > MAX_LABEL_LEN {
        errors.insert(IdnaErrors::LABEL_TOO_LONG);
    }
    if label.starts_with('-') {
        errors.insert(IdnaErrors::LEADING_HYPHEN);
    }
    if label.ends_with('-') {
        errors.insert(IdnaErrors::TRAILING_HYPHEN);
    }
    if label.get(2..4) == Some("--") && !has_ace_prefix(label) {
        errors.insert(IdnaErrors::HYPHEN_3_4);
    }
    if label.chars().next().is_some_and(is_combining_mark) {
        errors.insert(IdnaErrors::LEADING_COMBINING_MARK);
    }
    errors
}

/// Checks the bidi rules of RFC 5893, section 2.
///
/// The rules only apply to names with at least one right-to-left label.
fn bidi_errors(mapped: &str) -> IdnaErrors {
    use BidiClass::*;

    let is_rtl = |ch| matches!(bidi_class(ch), R | AL | AN);
    if !mapped.chars().any(is_rtl) {
        return IdnaErrors::EMPTY;
    }

    for label in mapped.split('.') {
        let Some(first) = label.chars().next() else {
            continue;
        };
        let last = label.chars().rev().find(|&ch| bidi_class(ch) != NSM);
        let valid = match bidi_class(first) {
            L => {
                label.chars().all(|ch| {
                    matches!(bidi_class(ch), L | EN | ES | CS | ET | ON | BN | NSM)
                }) && last.is_some_and(|ch| matches!(bidi_class(ch), L | EN))
            }
            R | AL => {
                label.chars().all(|ch| {
                    matches!(
                        bidi_class(ch),
                        R | AL | AN | EN | ES | CS | ET | ON | BN | NSM
                    )
                }) && last
                    .is_some_and(|ch| matches!(bidi_class(ch), R | AL | EN | AN))
                    && !(label.chars().any(|ch| bidi_class(ch) == EN)
                        && label.chars().any(|ch| bidi_class(ch) == AN))
            }
            _ => false,
        };
        if !valid {
            return IdnaErrors::BIDI;
        }
    }
    IdnaErrors::EMPTY
}

/// Checks the joiner rules of RFC 5892, appendix A.1 and A.2.
///
/// A zero width joiner must follow a virama. A zero width non-joiner must
/// follow a virama or sit between two letters.
fn contextj_errors(domain: &str) -> IdnaErrors {
    for label in domain.split(is_label_separator) {
        let chars: Vec<char> = label.chars().collect();
        for (i, &ch) in chars.iter().enumerate() {
            if ch != ZWJ && ch != ZWNJ {
                continue;
            }
            let before = i.checked_sub(1).map(|i| chars[i]);
            let after = chars.get(i + 1).copied();
            let virama =
                before.is_some_and(|ch| canonical_combining_class(ch) == 9);
            let joined = ch == ZWNJ
                && before.is_some_and(char::is_alphabetic)
                && after.is_some_and(char::is_alphabetic);
            if !virama && !joined {
                return IdnaErrors::CONTEXTJ;
            }
        }
    }
    IdnaErrors::EMPTY
}

/// Checks the CONTEXTO rules of RFC 5892, appendix A.3 to A.9.
fn contexto_errors(domain: &str) -> IdnaErrors {
    let mut errors = IdnaErrors::EMPTY;
    for label in domain.split(is_label_separator) {
        let chars: Vec<char> = label.chars().collect();
        for (i, &ch) in chars.iter().enumerate() {
            let before = i.checked_sub(1).map(|i| chars[i]);
            let after = chars.get(i + 1).copied();
            let valid = match ch {
                '\u{00B7}' => before == Some('l') && after == Some('l'),
                '\u{0375}' => after.is_some_and(is_greek),
                '\u{05F3}' | '\u{05F4}' => before.is_some_and(is_hebrew),
                '\u{30FB}' => chars
                    .iter()
                    .any(|&ch| ch != '\u{30FB}' && is_japanese(ch)),
                _ => true,
            };
            if !valid {
                errors.insert(IdnaErrors::CONTEXTO_PUNCTUATION);
            }
        }
        if chars.iter().any(|ch| ('\u{0660}'..='\u{0669}').contains(ch))
            && chars.iter().any(|ch| ('\u{06F0}'..='\u{06F9}').contains(ch))
        {
            errors.insert(IdnaErrors::CONTEXTO_DIGITS);
        }
    }
    errors
}

fn is_greek(ch: char) -> bool {
    matches!(ch, '\u{0370}'..='\u{03FF}' | '\u{1F00}'..='\u{1FFF}')
}

fn is_hebrew(ch: char) -> bool {
    matches!(ch, '\u{0591}'..='\u{05F4}' | '\u{FB1D}'..='\u{FB4F}')
}

/// Returns whether a code point is Hiragana, Katakana, or Han.
fn is_japanese(ch: char) -> bool {
    matches!(
        ch,
        '\u{3005}'
            | '\u{3007}'
            | '\u{3021}'..='\u{3029}'
            | '\u{3038}'..='\u{303B}'
            | '\u{3041}'..='\u{309F}'
            | '\u{30A1}'..='\u{30FF}'
            | '\u{31F0}'..='\u{31FF}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{4E00}'..='\u{9FFF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{FF66}'..='\u{FF9D}'
            | '\u{20000}'..='\u{3134F}'
    )
}

//============ Error Types ===================================================

//------------ IdnaErrors ----------------------------------------------------

/// The set of UTS #46 rules violated by a host name.
///
/// The bit values are those used by ICU.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct IdnaErrors(u32);

impl IdnaErrors {
    /// No rule was violated.
    pub const EMPTY: Self = IdnaErrors(0);

    /// A non-final label is empty.
    pub const EMPTY_LABEL: Self = IdnaErrors(0x1);

    /// A label is longer than 63 bytes in its ASCII form.
    pub const LABEL_TOO_LONG: Self = IdnaErrors(0x2);

    /// The name is longer than 253 bytes in its ASCII form.
    pub const DOMAIN_NAME_TOO_LONG: Self = IdnaErrors(0x4);

    /// A label starts with a hyphen.
    pub const LEADING_HYPHEN: Self = IdnaErrors(0x8);

    /// A label ends with a hyphen.
    pub const TRAILING_HYPHEN: Self = IdnaErrors(0x10);

    /// A label has hyphens in both the third and fourth position.
    pub const HYPHEN_3_4: Self = IdnaErrors(0x20);

    /// A label starts with a combining mark.
    pub const LEADING_COMBINING_MARK: Self = IdnaErrors(0x40);

    /// A label contains a disallowed character.
    pub const DISALLOWED: Self = IdnaErrors(0x80);

    /// An A-label does not contain valid Punycode.
    pub const PUNYCODE: Self = IdnaErrors(0x100);

    /// A label contains a dot after mapping.
    pub const LABEL_HAS_DOT: Self = IdnaErrors(0x200);

    /// An A-label does not decode into a valid U-label.
    pub const INVALID_ACE_LABEL: Self = IdnaErrors(0x400);

    /// A label violates the bidi rules.
    pub const BIDI: Self = IdnaErrors(0x800);

    /// A label violates the CONTEXTJ rules.
    pub const CONTEXTJ: Self = IdnaErrors(0x1000);

    /// A label violates the CONTEXTO rules for punctuation.
    pub const CONTEXTO_PUNCTUATION: Self = IdnaErrors(0x2000);

    /// A label violates the CONTEXTO rules for digits.
    pub const CONTEXTO_DIGITS: Self = IdnaErrors(0x4000);

    const DESCRIPTIONS: [(IdnaErrors, &'static str); 15] = [
        (Self::EMPTY_LABEL, "a non-final domain name label is empty"),
        (Self::LABEL_TOO_LONG, "a domain name label is longer than 63 bytes"),
        (
            Self::DOMAIN_NAME_TOO_LONG,
            "a domain name is longer than 255 bytes in its storage form",
        ),
        (Self::LEADING_HYPHEN, "a label starts with a hyphen-minus ('-')"),
        (Self::TRAILING_HYPHEN, "a label ends with a hyphen-minus ('-')"),
        (
            Self::HYPHEN_3_4,
            "a label contains hyphen-minus ('-') in the third and fourth positions",
        ),
        (
            Self::LEADING_COMBINING_MARK,
            "a label starts with a combining mark",
        ),
        (
            Self::DISALLOWED,
            "a label or domain name contains disallowed characters",
        ),
        (
            Self::PUNYCODE,
            "a label starts with \"xn--\" but does not contain valid Punycode",
        ),
        (Self::LABEL_HAS_DOT, "a label contains a dot=full stop"),
        (
            Self::INVALID_ACE_LABEL,
            "an ACE label does not contain a valid label string",
        ),
        (Self::BIDI, "a label does not meet the IDNA BiDi requirements"),
        (
            Self::CONTEXTJ,
            "a label does not meet the IDNA CONTEXTJ requirements",
        ),
        (
            Self::CONTEXTO_PUNCTUATION,
            "a label does not meet the IDNA CONTEXTO requirements for punctuation characters",
        ),
        (
            Self::CONTEXTO_DIGITS,
            "a label does not meet the IDNA CONTEXTO requirements for digits",
        ),
    ];

    /// Creates a value from its raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        IdnaErrors(bits)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns whether no rule was violated.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns whether all rules of `other` were violated.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    fn insert(&mut self, other: Self) {
        self.0 |= other.0
    }

    /// Returns an iterator over the violated rules and their descriptions.
    pub fn iter(self) -> impl Iterator<Item = (IdnaErrors, &'static str)> {
        Self::DESCRIPTIONS
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
    }
}

impl ops::BitOr for IdnaErrors {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        IdnaErrors(self.0 | other.0)
    }
}

impl fmt::Debug for IdnaErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IdnaErrors({:#x})", self.0)
    }
}

impl fmt::Display for IdnaErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for (_, description) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            f.write_str(description)?;
            first = false;
        }
        Ok(())
    }
}

//------------ IdnaError -----------------------------------------------------

/// A host name could not be processed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdnaError {
    input: String,
    errors: IdnaErrors,
}

impl IdnaError {
    fn new(input: &str, errors: IdnaErrors) -> Self {
        IdnaError {
            input: input.into(),
            errors,
        }
    }

    /// Returns the host name that failed processing.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the rules violated by the host name.
    #[must_use]
    pub fn errors(&self) -> IdnaErrors {
        self.errors
    }
}

impl fmt::Display for IdnaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "the host '{}' is invalid: {}",
            self.input, self.errors
        )
    }
}

impl std::error::Error for IdnaError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ascii_fast_path() {
        let res = to_ascii("WwW.Example.COM", IdnaOption::IDNA2008_ASCII)
            .unwrap();
        assert_eq!(res.as_str(), "www.example.com");
        assert!(!res.is_transitional_different());

        // Strict processing would reject the underscore.
        assert_eq!(
            to_ascii("_dmarc.example.com", IdnaOption::IDNA2008_ASCII)
                .unwrap()
                .as_str(),
            "_dmarc.example.com"
        );
    }

    #[test]
    fn ascii_percent_decoding() {
        assert_eq!(
            to_ascii("%E9%A3%9F%E7%8B%AE.cn", IdnaOption::IDNA2008_ASCII)
                .unwrap()
                .as_str(),
            "xn--85x722f.cn"
        );
    }

    #[test]
    fn ascii_idn() {
        assert_eq!(
            to_ascii("食狮.公司.cn", IdnaOption::IDNA2008_ASCII)
                .unwrap()
                .as_str(),
            "xn--85x722f.xn--55qx5d.cn"
        );
        assert_eq!(
            to_ascii("食狮.公司.cn", IdnaOption::IDNA2003_ASCII)
                .unwrap()
                .as_str(),
            "xn--85x722f.xn--55qx5d.cn"
        );
    }

    #[test]
    fn transitional_processing() {
        let res = to_ascii("faß.de", IdnaOption::IDNA2008_ASCII).unwrap();
        assert_eq!(res.as_str(), "xn--fa-hia.de");
        assert!(res.is_transitional_different());

        let res = to_ascii("faß.de", IdnaOption::IDNA2003_ASCII).unwrap();
        assert_eq!(res.as_str(), "fass.de");
        assert!(res.is_transitional_different());
    }

    #[test]
    fn unicode_fast_path() {
        assert_eq!(
            to_unicode("Example.COM", IdnaOption::IDNA2008_UNICODE)
                .unwrap()
                .as_str(),
            "Example.COM"
        );
    }

    #[test]
    fn unicode_idn() {
        assert_eq!(
            to_unicode(
                "xn--85x722f.xn--55qx5d.cn",
                IdnaOption::IDNA2008_UNICODE
            )
            .unwrap()
            .as_str(),
            "食狮.公司.cn"
        );
        assert_eq!(
            to_unicode("XN--85X722F.cn", IdnaOption::IDNA2003_UNICODE)
                .unwrap()
                .as_str(),
            "食狮.cn"
        );
    }

    #[test]
    fn errors() {
        let err =
            to_unicode("xn--99999999999999.com", IdnaOption::IDNA2008_UNICODE)
                .unwrap_err();
        assert_eq!(err.input(), "xn--99999999999999.com");
        assert!(err.errors().contains(IdnaErrors::PUNYCODE));

        let long = "食".repeat(64);
        let err = to_ascii(&long, IdnaOption::IDNA2008_ASCII).unwrap_err();
        assert!(err.errors().contains(IdnaErrors::LABEL_TOO_LONG));

        let err =
            to_ascii("-食狮.cn", IdnaOption::IDNA2008_ASCII).unwrap_err();
        assert!(err.errors().contains(IdnaErrors::LEADING_HYPHEN));

        let err = to_ascii("食狮..cn", IdnaOption::IDNA2008_ASCII).unwrap_err();
        assert!(err.errors().contains(IdnaErrors::EMPTY_LABEL));
    }

    fn ascii_errors(input: &str, options: IdnaOption) -> IdnaErrors {
        to_ascii(input, options).unwrap_err().errors()
    }

    #[test]
    fn disallowed() {
        assert_eq!(
            ascii_errors("a\u{FFFD}.com", IdnaOption::IDNA2003_ASCII),
            IdnaErrors::DISALLOWED
        );

        // A disallowed code point inside an otherwise valid RTL label.
        assert_eq!(
            ascii_errors("של\u{FFFD}ום.com", IdnaOption::IDNA2008_ASCII),
            IdnaErrors::DISALLOWED
        );

        let errors = ascii_errors("שלום⒈com", IdnaOption::IDNA2008_ASCII);
        assert!(errors.contains(IdnaErrors::DISALLOWED));
        assert!(!errors.contains(IdnaErrors::LABEL_HAS_DOT));

        assert_eq!(
            ascii_errors("_食狮.cn", IdnaOption::IDNA2008_ASCII),
            IdnaErrors::DISALLOWED
        );
        assert!(to_ascii("_食狮.cn", IdnaOption::IDNA2003_ASCII).is_ok());
    }

    #[test]
    fn bidi() {
        assert_eq!(
            ascii_errors("שלוםa.com", IdnaOption::IDNA2008_ASCII),
            IdnaErrors::BIDI
        );
        assert_eq!(
            ascii_errors("\u{0663}שלום.com", IdnaOption::IDNA2008_ASCII),
            IdnaErrors::BIDI
        );
        assert!(to_ascii("שלום.com", IdnaOption::IDNA2008_ASCII).is_ok());
        assert!(to_ascii("שלום1.com", IdnaOption::IDNA2008_ASCII).is_ok());

        // Without the bidi check, the name converts.
        let res = to_ascii("שלוםa.com", IdnaOption::IDNA2003_ASCII).unwrap();
        assert!(res.as_str().starts_with("xn--"));
        assert!(res.as_str().ends_with(".com"));
    }

    #[test]
    fn hyphens_and_marks() {
        assert_eq!(
            ascii_errors("食狮-.cn", IdnaOption::IDNA2008_ASCII),
            IdnaErrors::TRAILING_HYPHEN
        );
        assert_eq!(
            ascii_errors("ab--食.cn", IdnaOption::IDNA2008_ASCII),
            IdnaErrors::HYPHEN_3_4
        );
        assert_eq!(
            ascii_errors("\u{0301}食.cn", IdnaOption::IDNA2008_ASCII),
            IdnaErrors::LEADING_COMBINING_MARK
        );
    }

    #[test]
    fn lengths() {
        let long = format!("{}.食.cn", vec!["a".repeat(50); 5].join("."));
        assert_eq!(
            ascii_errors(&long, IdnaOption::IDNA2008_ASCII),
            IdnaErrors::DOMAIN_NAME_TOO_LONG
        );
        assert!(to_ascii(&long[51..], IdnaOption::IDNA2008_ASCII).is_ok());
    }

    #[test]
    fn ace_labels() {
        let err =
            to_unicode("xn--abc-.com", IdnaOption::IDNA2008_UNICODE).unwrap_err();
        assert_eq!(err.errors(), IdnaErrors::INVALID_ACE_LABEL);
        assert!(to_unicode("xn--abc-.com", IdnaOption::IDNA2003_UNICODE)
            .is_err());
    }

    #[test]
    fn contextj() {
        assert_eq!(
            ascii_errors("a\u{200D}b.com", IdnaOption::IDNA2008_ASCII),
            IdnaErrors::CONTEXTJ
        );
        // Transitional processing removes the joiner.
        assert_eq!(
            to_ascii("a\u{200D}b.com", IdnaOption::IDNA2003_ASCII)
                .unwrap()
                .as_str(),
            "ab.com"
        );
    }

    #[test]
    fn contexto() {
        let options = IdnaOption::IDNA2008_ASCII | IdnaOption::CHECK_CONTEXTO;
        assert_eq!(
            ascii_errors("a\u{00B7}b.com", options),
            IdnaErrors::CONTEXTO_PUNCTUATION
        );
        assert!(to_ascii("l\u{00B7}l.com", options).is_ok());
        assert!(to_ascii("a\u{00B7}b.com", IdnaOption::IDNA2008_ASCII).is_ok());

        assert_eq!(
            ascii_errors("\u{30FB}ab.com", options),
            IdnaErrors::CONTEXTO_PUNCTUATION
        );
        assert!(to_ascii("食\u{30FB}狮.com", options).is_ok());

        let options = IdnaOption::USE_STD3_RULES
            | IdnaOption::NONTRANSITIONAL_TO_ASCII
            | IdnaOption::CHECK_CONTEXTO;
        assert_eq!(
            ascii_errors("\u{0663}\u{06F3}.com", options),
            IdnaErrors::CONTEXTO_DIGITS
        );
    }

    #[test]
    fn single_label() {
        assert_eq!(
            label_to_ascii("公司", IdnaOption::IDNA2008_ASCII)
                .unwrap()
                .as_str(),
            "xn--55qx5d"
        );
        for label in ["a.b", "公司\u{3002}cn", "a%2Eb"] {
            let err =
                label_to_ascii(label, IdnaOption::IDNA2008_ASCII).unwrap_err();
            assert_eq!(err.input(), label);
            assert!(err.errors().contains(IdnaErrors::LABEL_HAS_DOT));
        }
        let err =
            label_to_ascii("-食\u{3002}cn", IdnaOption::IDNA2008_ASCII).unwrap_err();
        assert_eq!(
            err.errors(),
            IdnaErrors::LEADING_HYPHEN | IdnaErrors::LABEL_HAS_DOT
        );
    }

    #[test]
    fn error_display() {
        let errors = IdnaErrors::EMPTY_LABEL | IdnaErrors::LEADING_HYPHEN;
        assert_eq!(errors.iter().count(), 2);
        assert_eq!(
            errors.to_string(),
            "a non-final domain name label is empty; \
             a label starts with a hyphen-minus ('-')"
        );
        assert_eq!(errors.bits(), 0x9);
    }

    #[test]
    fn options() {
        assert!(IdnaOption::IDNA2008_ASCII.contains(IdnaOption::CHECK_BIDI));
        assert!(!IdnaOption::IDNA2008_ASCII
            .contains(IdnaOption::NONTRANSITIONAL_TO_UNICODE));
        assert_eq!(IdnaOption::IDNA2003_ASCII.bits(), 0);
        assert_eq!(
            IdnaVersion::Idna2008.unicode_option(),
            IdnaOption::IDNA2008_UNICODE
        );
        assert_eq!(IdnaOption::IDNA2008_ASCII.bits(), 0x1e);
    }
}
