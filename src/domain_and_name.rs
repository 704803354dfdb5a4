use core::fmt::{self, Display};
use core::str::FromStr;

use thiserror::Error;

/// The text is not `DOMAIN\Name` or `Name`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
#[error("Failed to parse domain and name")]
pub struct DomainParsingError;

/// Account name of a resolved principal.
///
/// The domain is empty for principals that live outside any domain, e.g.
/// `Everyone`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DomainAndName {
    /// Domain or machine name.
    pub domain: String,
    /// Account name.
    pub name: String,
}

impl DomainAndName {
    /// Builds a name from its parts.
    #[inline]
    pub fn new<D: Into<String>, N: Into<String>>(domain: D, name: N) -> Self {
        Self {
            domain: domain.into(),
            name: name.into(),
        }
    }

    /// Case-insensitive comparison, as Windows compares account names.
    #[must_use]
    #[inline]
    pub fn matches(&self, other: &Self) -> bool {
        self.domain.eq_ignore_ascii_case(&other.domain) && self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Display for DomainAndName {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.domain.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}\\{}", self.domain, self.name)
        }
    }
}

impl FromStr for DomainAndName {
    type Err = DomainParsingError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (domain, name) = s.split_once('\\').unwrap_or(("", s));
        if name.is_empty() || name.contains('\\') {
            return Err(DomainParsingError);
        }
        Ok(Self::new(domain, name))
    }
}

#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let account: DomainAndName = "CONTOSO\\alice".parse().unwrap();
        assert_eq!(account, DomainAndName::new("CONTOSO", "alice"));
        assert_eq!(account.to_string(), "CONTOSO\\alice");

        let bare: DomainAndName = "Everyone".parse().unwrap();
        assert_eq!(bare.domain, "");
        assert_eq!(bare.to_string(), "Everyone");
    }

    #[test]
    fn rejections() {
        for text in ["", "CONTOSO\\", "A\\B\\C"] {
            assert_eq!(text.parse::<DomainAndName>(), Err(DomainParsingError));
        }
    }

    #[test]
    fn matches_ignores_case() {
        assert!(DomainAndName::new("contoso", "ALICE").matches(&DomainAndName::new("CONTOSO", "alice")));
    }
}
