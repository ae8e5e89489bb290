//! Normalized domain names.
//!
//! This is a private module. Its public types are re-exported by the parent
//! module.

use core::fmt;
use core::str::FromStr;
use std::string::String;
use std::vec::Vec;

use super::parse::parse_host;
use super::source::DomainSource;
use crate::error::SyntaxError;
use crate::idna::{self, contains_ace_prefix, IdnaVersion};

//------------ DomainName ----------------------------------------------------

/// A normalized domain name.
///
/// A domain name is either null, i.e., it has no value and no labels at all,
/// or it has a normalized string value and the labels making up that value.
/// The value of a name created from plain ASCII input is lowercased. Any
/// other input is converted to its Unicode form using IDNA processing.
///
/// Labels are kept right to left, i.e., the label with key 0 is the top
/// level label. Negative keys count from the leftmost label, so -1 is the
/// leftmost label. A name that ends in a dot has an empty label at key 0.
///
/// Each name remembers the [`IdnaVersion`] it has been created with. All
/// names derived from it, for instance through [`with_label`] or
/// [`to_ascii`], use the same version.
///
/// Domain names are immutable. All operations that change a name return a
/// new value.
///
/// [`with_label`]: DomainName::with_label
/// [`to_ascii`]: DomainName::to_ascii
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct DomainName {
    /// The normalized name or `None` for the null name.
    value: Option<String>,

    /// The labels of the name, rightmost label first.
    labels: Vec<String>,

    /// The IDNA processing used for this name.
    version: IdnaVersion,
}

/// # Creation
///
impl DomainName {
    /// Creates a domain name from a host using the given IDNA version.
    pub fn new(host: &str, version: IdnaVersion) -> Result<Self, SyntaxError> {
        let value = parse_host(host, version)?;
        Ok(Self::from_value(value, version))
    }

    /// Creates a domain name using IDNA 2003 processing.
    pub fn from_idna2003(
        host: impl Into<DomainSource>,
    ) -> Result<Self, SyntaxError> {
        host.into().into_name(IdnaVersion::Idna2003)
    }

    /// Creates a domain name using IDNA 2008 processing.
    pub fn from_idna2008(
        host: impl Into<DomainSource>,
    ) -> Result<Self, SyntaxError> {
        host.into().into_name(IdnaVersion::Idna2008)
    }

    /// Returns the null domain name using IDNA 2008 processing.
    #[must_use]
    pub fn null() -> Self {
        Self::absent(IdnaVersion::Idna2008)
    }

    /// Returns the null domain name for the given IDNA version.
    pub(crate) fn absent(version: IdnaVersion) -> Self {
        DomainName {
            value: None,
            labels: Vec::new(),
            version,
        }
    }

    /// Creates a name from an already normalized value.
    fn from_value(value: String, version: IdnaVersion) -> Self {
        DomainName {
            labels: value.split('.').rev().map(Into::into).collect(),
            value: Some(value),
            version,
        }
    }

    /// Creates a name from labels taken from an existing name.
    fn from_labels(labels: Vec<String>, version: IdnaVersion) -> Self {
        if labels.is_empty() {
            return Self::absent(version);
        }
        DomainName {
            value: Some(join(&labels)),
            labels,
            version,
        }
    }

    /// Returns the same name processed with a different IDNA version.
    ///
    /// If the version differs from the current one, the name is parsed
    /// again from its value.
    pub fn with_idna_version(
        &self,
        version: IdnaVersion,
    ) -> Result<Self, SyntaxError> {
        if self.version == version {
            return Ok(self.clone());
        }
        match self.value.as_deref() {
            Some(value) => Self::new(value, version),
            None => Ok(Self::absent(version)),
        }
    }
}

/// # Properties
///
impl DomainName {
    /// Returns the normalized value or `None` for the null name.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the number of labels.
    #[must_use]
    pub fn count(&self) -> usize {
        self.labels.len()
    }

    /// Returns whether this is the null name.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the labels, rightmost label first.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns an iterator over the labels, rightmost label first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> + Clone + '_ {
        self.labels.iter().map(String::as_str)
    }

    /// Returns the label with the given key.
    ///
    /// Non-negative keys count from the rightmost label, negative keys
    /// from the leftmost label.
    #[must_use]
    pub fn label(&self, key: isize) -> Option<&str> {
        self.index(key).map(|index| self.labels[index].as_str())
    }

    /// Returns the keys of all labels equal to `label`.
    #[must_use]
    pub fn keys(&self, label: &str) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, item)| item.as_str() == label)
            .map(|(index, _)| index)
            .collect()
    }

    /// Returns whether the name is in its ASCII form.
    ///
    /// The null name is considered ASCII.
    #[must_use]
    pub fn is_ascii(&self) -> bool {
        self.value.as_deref().map_or(true, str::is_ascii)
    }

    /// Returns whether the name ends in the empty root label.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.labels.len() > 1 && self.labels[0].is_empty()
    }

    /// Returns the IDNA version the name was created with.
    #[must_use]
    pub fn idna_version(&self) -> IdnaVersion {
        self.version
    }

    /// Converts a label key into an index into `self.labels`.
    fn index(&self, key: isize) -> Option<usize> {
        let count = self.signed_count();
        let key = if key < 0 { count + key } else { key };
        if (0..count).contains(&key) {
            Some(key as usize)
        } else {
            None
        }
    }

    fn signed_count(&self) -> isize {
        isize::try_from(self.labels.len()).unwrap_or(isize::MAX)
    }
}

/// # Conversion
///
impl DomainName {
    /// Returns the ASCII form of the name.
    pub fn to_ascii(&self) -> Result<Self, SyntaxError> {
        let value = match self.value.as_deref() {
            Some(value) if !value.is_ascii() => value,
            _ => return Ok(self.clone()),
        };
        let ascii = idna::to_ascii(value, self.version.ascii_option())?;
        Ok(Self::from_value(ascii.into_string(), self.version))
    }

    /// Returns the Unicode form of the name.
    pub fn to_unicode(&self) -> Result<Self, SyntaxError> {
        let value = match self.value.as_deref() {
            Some(value) if contains_ace_prefix(value) => value,
            _ => return Ok(self.clone()),
        };
        let unicode =
            idna::to_unicode(value, self.version.unicode_option())?;
        Ok(Self::from_value(unicode.into_string(), self.version))
    }

    /// Creates a domain name in the same form as this name.
    ///
    /// The host is parsed with the IDNA version of this name. The result
    /// is converted to ASCII if this name is ASCII and to Unicode otherwise.
    pub fn normalize(
        &self,
        host: impl Into<DomainSource>,
    ) -> Result<Self, SyntaxError> {
        let name = host.into().into_name(self.version)?;
        if self.is_ascii() {
            name.to_ascii()
        } else {
            name.to_unicode()
        }
    }
}

/// # Derived Names
///
impl DomainName {
    /// Returns a name with the given label added on the left.
    pub fn prepend(
        &self,
        label: impl Into<DomainSource>,
    ) -> Result<Self, SyntaxError> {
        self.with_label(self.signed_count(), label)
    }

    /// Returns a name with the given label added on the right.
    pub fn append(
        &self,
        label: impl Into<DomainSource>,
    ) -> Result<Self, SyntaxError> {
        self.with_label(-self.signed_count() - 1, label)
    }

    /// Returns a name with the label at `key` replaced.
    ///
    /// A key equal to the number of labels adds the label on the left, a
    /// key of minus the number of labels minus one adds it on the right.
    /// The label may itself consist of several labels. It is normalized to
    /// the form of this name before being added.
    pub fn with_label(
        &self,
        key: isize,
        label: impl Into<DomainSource>,
    ) -> Result<Self, SyntaxError> {
        let count = self.signed_count();
        if key < -count - 1 || key > count {
            return Err(SyntaxError::InvalidLabelKey {
                domain: self.clone(),
                key,
            });
        }

        let label = self
            .normalize(label)?
            .value
            .ok_or_else(|| SyntaxError::InvalidLabel(String::new()))?;

        let mut labels = self.labels.clone();
        if key == count {
            labels.push(label);
        } else if key == -count - 1 {
            labels.insert(0, label);
        } else {
            let index = (if key < 0 { count + key } else { key }) as usize;
            if labels[index] == label {
                return Ok(self.clone());
            }
            labels[index] = label;
        }
        Self::new(&join(&labels), self.version)
    }

    /// Returns a name with the labels at the given keys removed.
    ///
    /// Removing all labels results in the null name.
    pub fn without_label(&self, keys: &[isize]) -> Result<Self, SyntaxError> {
        let mut removed = Vec::with_capacity(keys.len());
        for &key in keys {
            match self.index(key) {
                Some(index) => removed.push(index),
                None => {
                    return Err(SyntaxError::InvalidLabelKey {
                        domain: self.clone(),
                        key,
                    })
                }
            }
        }
        if removed.is_empty() {
            return Ok(self.clone());
        }

        let labels = self
            .labels
            .iter()
            .enumerate()
            .filter(|(index, _)| !removed.contains(index))
            .map(|(_, label)| label.clone())
            .collect();
        Ok(Self::from_labels(labels, self.version))
    }

    /// Returns the name with a trailing root label.
    pub fn with_root_label(&self) -> Result<Self, SyntaxError> {
        if self.label(0) == Some("") {
            return Ok(self.clone());
        }
        let value = format!("{}.", self.value.as_deref().unwrap_or_default());
        Self::new(&value, self.version)
    }

    /// Returns the name without a trailing root label.
    #[must_use]
    pub fn without_root_label(&self) -> Self {
        if !self.is_absolute() {
            return self.clone();
        }
        Self::from_labels(self.labels[1..].to_vec(), self.version)
    }

    /// Returns the null name with the same IDNA version.
    #[must_use]
    pub fn clear(&self) -> Self {
        Self::absent(self.version)
    }

    /// Returns a name made of a range of labels.
    ///
    /// The range starts at the label with key `offset`, which may be
    /// negative to count from the left. If `length` is `None`, all
    /// remaining labels are taken. A negative `length` stops that many
    /// labels short of the leftmost label.
    pub fn slice(
        &self,
        offset: isize,
        length: Option<isize>,
    ) -> Result<Self, SyntaxError> {
        let count = self.signed_count();
        if offset < -count || offset > count {
            return Err(SyntaxError::InvalidLabelKey {
                domain: self.clone(),
                key: offset,
            });
        }

        let start = if offset < 0 { count + offset } else { offset };
        let end = match length {
            None => count,
            Some(length) if length >= 0 => start.saturating_add(length).min(count),
            Some(length) => (count + length).max(start),
        };
        Ok(Self::from_labels(
            self.labels[start as usize..end as usize].to_vec(),
            self.version,
        ))
    }
}

//--- Default

impl Default for DomainName {
    fn default() -> Self {
        Self::null()
    }
}

//--- FromStr

impl FromStr for DomainName {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s, IdnaVersion::Idna2008)
    }
}

//--- Display

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.value.as_deref().unwrap_or_default())
    }
}

//------------ Helper Functions ----------------------------------------------

/// Joins right to left labels into a domain name.
fn join(labels: &[String]) -> String {
    let labels: Vec<&str> = labels.iter().rev().map(String::as_str).collect();
    labels.join(".")
}

//============ Testing =======================================================
