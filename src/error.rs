use parsing::{SyntaxError, SyntaxErrorKind};
use thiserror::Error;

/// Category of an [`Error`], without its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Top-level layout of a security descriptor string.
    MalformedSecurityDescriptor,
    /// ACL flags or `(ace)` list shape.
    MalformedAcl,
    /// ACE field count or empty trustee.
    MalformedAce,
    /// Unknown flag or right, bad hex literal or bad GUID.
    MalformedToken,
    /// Trustee starting with `S-` that is not a SID string.
    InvalidSidFormat,
    /// Empty or unknown ACE type.
    UnknownAceType,
    /// Unknown trustee abbreviation.
    UnknownTrustee,
    /// The resolver does not know the principal.
    ResolutionFailed,
    /// The resolver could not be reached.
    ResolverUnavailable,
}

/// Error of the SDDL codec and the trustee resolution.
///
/// Every variant carries the offending input so that callers can report it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The string is not `[O:owner][G:group][D:dacl][S:sacl]`.
    #[error("malformed security descriptor near {input:?}")]
    MalformedSecurityDescriptor {
        /// Offending section text.
        input: String,
    },
    /// An ACL body has bad flags or a bad `(ace)` list.
    #[error("malformed ACL {input:?}")]
    MalformedAcl {
        /// Offending ACL body.
        input: String,
    },
    /// An ACE does not have six fields or has an empty trustee.
    #[error("malformed ACE {input:?}")]
    MalformedAce {
        /// Offending ACE text.
        input: String,
    },
    /// A flag, right, hex literal or GUID is not recognized.
    #[error("malformed token {token:?}")]
    MalformedToken {
        /// Offending token.
        token: String,
    },
    /// A SID string does not match `S(-[0-9]+)+`.
    #[error("invalid SID format {input:?}")]
    InvalidSidFormat {
        /// Offending SID text.
        input: String,
    },
    /// The ACE type field is empty or unknown.
    #[error("unknown ACE type {token:?}")]
    UnknownAceType {
        /// Offending type token.
        token: String,
    },
    /// The trustee is neither a SID string nor a known abbreviation.
    #[error("unknown trustee {token:?}")]
    UnknownTrustee {
        /// Offending trustee token.
        token: String,
    },
    /// The resolver answered that the principal does not exist.
    #[error("could not resolve {principal:?}")]
    ResolutionFailed {
        /// Name, SID or category that was asked for.
        principal: String,
    },
    /// The resolver could not answer. Retrying may succeed.
    #[error("trustee resolver unavailable: {reason}")]
    ResolverUnavailable {
        /// Reason reported by the resolver.
        reason: String,
    },
}

impl Error {
    /// Category of the error.
    #[must_use]
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedSecurityDescriptor { .. } => ErrorKind::MalformedSecurityDescriptor,
            Self::MalformedAcl { .. } => ErrorKind::MalformedAcl,
            Self::MalformedAce { .. } => ErrorKind::MalformedAce,
            Self::MalformedToken { .. } => ErrorKind::MalformedToken,
            Self::InvalidSidFormat { .. } => ErrorKind::InvalidSidFormat,
            Self::UnknownAceType { .. } => ErrorKind::UnknownAceType,
            Self::UnknownTrustee { .. } => ErrorKind::UnknownTrustee,
            Self::ResolutionFailed { .. } => ErrorKind::ResolutionFailed,
            Self::ResolverUnavailable { .. } => ErrorKind::ResolverUnavailable,
        }
    }

    /// Whether the same call may succeed later.
    #[must_use]
    #[inline]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ResolverUnavailable { .. })
    }
}

impl From<SyntaxError<'_>> for Error {
    #[inline]
    fn from(value: SyntaxError<'_>) -> Self {
        let fragment = value.fragment.to_owned();
        match value.kind {
            SyntaxErrorKind::MalformedSecurityDescriptor => {
                Self::MalformedSecurityDescriptor { input: fragment }
            }
            SyntaxErrorKind::MalformedAcl => Self::MalformedAcl { input: fragment },
            SyntaxErrorKind::MalformedAce => Self::MalformedAce { input: fragment },
            SyntaxErrorKind::MalformedToken => Self::MalformedToken { token: fragment },
            SyntaxErrorKind::InvalidSidFormat => Self::InvalidSidFormat { input: fragment },
            SyntaxErrorKind::UnknownAceType => Self::UnknownAceType { token: fragment },
            SyntaxErrorKind::UnknownTrustee => Self::UnknownTrustee { token: fragment },
        }
    }
}
