use core::fmt::{self, Debug, Display};
use core::ops::Deref;
use core::str::FromStr;

use parsing::is_sid_string;

use crate::{Error, utils};

/// Textual security identifier matching `S(-[0-9]+)+`.
///
/// The leading `S` is stored upper case, so equal SIDs compare and hash equal
/// whatever the case they were written in.
///
/// # Examples
/// ```rust
/// # use win_sddl::SidString;
/// let sid: SidString = "s-1-5-32-544".parse().unwrap();
/// assert_eq!(sid.as_str(), "S-1-5-32-544");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SidString(String);

impl SidString {
    /// Validates and canonicalizes a SID string.
    ///
    /// # Errors
    /// [`Error::InvalidSidFormat`] when `value` is not a SID string.
    #[inline]
    pub fn new(value: &str) -> Result<Self, Error> {
        if !is_sid_string(value) {
            return Err(Error::InvalidSidFormat {
                input: value.to_owned(),
            });
        }
        let digits = value.get(1..).unwrap_or_default();
        Ok(Self(format!("S{digits}")))
    }

    /// Appends a relative identifier, e.g. a domain SID and `512`.
    #[must_use]
    #[inline]
    pub fn with_rid(&self, rid: u32) -> Self {
        Self(format!("{}-{rid}", self.0))
    }

    /// Canonical text.
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for SidString {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        utils::debug_print::<Self>(stringify!(SidString), self, f)
    }
}

impl Display for SidString {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SidString {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for SidString {
    type Error = Error;

    #[inline]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Deref for SidString {
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for SidString {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<SidString> for String {
    #[inline]
    fn from(value: SidString) -> Self {
        value.0
    }
}
