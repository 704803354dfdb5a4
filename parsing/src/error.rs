use core::fmt::{self, Display};

use thiserror::Error;

/// Category of a lexical failure.
///
/// Grammar violations (`Malformed*`, `InvalidSidFormat`) are kept apart from
/// well-shaped tokens that name something outside the closed vocabulary
/// (`UnknownAceType`, `UnknownTrustee`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxErrorKind {
    /// The top-level `O:G:D:S:` layout is wrong.
    MalformedSecurityDescriptor,
    /// An ACL body does not match `flags(ace)(ace)...`.
    MalformedAcl,
    /// An ACE does not have the six `;` separated fields.
    MalformedAce,
    /// A flag, right or GUID token is not recognized.
    MalformedToken,
    /// A trustee starting with `S-` is not a SID string.
    InvalidSidFormat,
    /// The ACE type is missing or not one of the eight known types.
    UnknownAceType,
    /// A trustee abbreviation is not in the well-known table.
    UnknownTrustee,
}

impl Display for SyntaxErrorKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MalformedSecurityDescriptor => "Invalid security descriptor format",
            Self::MalformedAcl => "Invalid ACL format",
            Self::MalformedAce => "Invalid ACE format",
            Self::MalformedToken => "Unrecognized token",
            Self::InvalidSidFormat => "Invalid format for Sid",
            Self::UnknownAceType => "Unknown ACE type",
            Self::UnknownTrustee => "Unknown trustee abbreviation",
        })
    }
}

/// Error returned by the lexical layer.
///
/// It borrows the offending fragment of the input so no allocation is needed
/// to report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind}: {fragment:?}")]
pub struct SyntaxError<'a> {
    /// What went wrong.
    pub kind: SyntaxErrorKind,
    /// The part of the input that was rejected.
    pub fragment: &'a str,
}

impl<'a> SyntaxError<'a> {
    pub(crate) const fn new(kind: SyntaxErrorKind, fragment: &'a str) -> Self {
        Self { kind, fragment }
    }
}
