use core::fmt::{self, Debug, Display};
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use parsing::{TrusteeToken, parse_trustee};
use tracing::debug;

use crate::{
    Error, ResolveError, ResolvedAccount, SidString, SidType, TrusteeResolver, WellKnownSidType,
    utils,
};

#[derive(Debug, Clone)]
enum Repr {
    Sid(SidString),
    WellKnown {
        kind: WellKnownSidType,
        sid: Option<SidString>,
    },
    Resolved {
        account: ResolvedAccount,
        kind: Option<WellKnownSidType>,
    },
}

/// Security principal named by an entry, an owner or a group.
///
/// A trustee is a raw SID, a well-known category or an account resolved
/// through a [`TrusteeResolver`]. Two trustees are equal when they are written
/// with the same SDDL token: the abbreviation when there is one, the SID
/// otherwise. A domain-relative category such as `DA` is therefore the same
/// trustee whether or not its SID was resolved.
///
/// # Examples
/// ```rust
/// # use win_sddl::Trustee;
/// let admins: Trustee = "BA".parse().unwrap();
/// let same: Trustee = "s-1-5-32-544".parse().unwrap();
/// assert_eq!(admins, same);
/// assert_eq!(same.to_canonical_token(), "BA");
/// ```
#[derive(Clone)]
pub struct Trustee {
    repr: Repr,
}

fn resolve_error(err: ResolveError, principal: &str) -> Error {
    debug!(principal, error = %err, "trustee resolution failed");
    match err {
        ResolveError::NotFound => Error::ResolutionFailed {
            principal: principal.to_owned(),
        },
        ResolveError::Unavailable(reason) => Error::ResolverUnavailable { reason },
    }
}

impl Trustee {
    /// Trustee for a SID string such as `S-1-5-21-1-2-3-1104`.
    ///
    /// # Errors
    /// [`Error::InvalidSidFormat`] when `sid` is not a SID string.
    #[inline]
    pub fn from_sid_string(sid: &str) -> Result<Self, Error> {
        SidString::new(sid).map(Self::from)
    }

    /// Trustee for an ACE trustee field: a SID string when it starts with
    /// `S-`, a well-known abbreviation otherwise.
    ///
    /// # Errors
    /// - [`Error::InvalidSidFormat`] for a bad SID string.
    /// - [`Error::UnknownTrustee`] for an unknown abbreviation.
    #[inline]
    pub fn from_abbreviation_or_sid(token: &str) -> Result<Self, Error> {
        Self::from_token(parse_trustee(token)?)
    }

    pub(crate) fn from_token(token: TrusteeToken<'_>) -> Result<Self, Error> {
        match token {
            TrusteeToken::Sid(sid) => Self::from_sid_string(sid),
            TrusteeToken::WellKnown(entry) => {
                let kind = WellKnownSidType::from_entry(entry).ok_or_else(|| {
                    Error::UnknownTrustee {
                        token: entry.abbreviation.unwrap_or_default().to_owned(),
                    }
                })?;
                Self::well_known_unresolved(kind)
            }
        }
    }

    fn well_known_unresolved(kind: WellKnownSidType) -> Result<Self, Error> {
        let sid = kind.sid().map(SidString::new).transpose()?;
        Ok(Self {
            repr: Repr::WellKnown { kind, sid },
        })
    }

    /// Trustee for an account name, `DOMAIN\Name` or `Name`.
    ///
    /// # Errors
    /// - [`Error::ResolutionFailed`] when the resolver does not know `name`.
    /// - [`Error::ResolverUnavailable`] when the resolver could not answer.
    #[inline]
    pub fn from_name<R: TrusteeResolver + ?Sized>(name: &str, resolver: &R) -> Result<Self, Error> {
        debug!(name, "resolving account name");
        let account = resolver
            .resolve_name(name)
            .map_err(|err| resolve_error(err, name))?;
        Ok(Self::from(account))
    }

    /// Trustee for a well-known category.
    ///
    /// Fixed SIDs come from the table. Domain-relative categories ask the
    /// resolver for the domain SID.
    ///
    /// # Errors
    /// Same as [`Trustee::from_name`].
    #[inline]
    pub fn from_well_known<R: TrusteeResolver + ?Sized>(
        kind: WellKnownSidType,
        resolver: &R,
    ) -> Result<Self, Error> {
        if kind.sid().is_some() {
            return Self::well_known_unresolved(kind);
        }
        debug!(?kind, "resolving well-known SID");
        let sid = resolver
            .well_known_sid(kind)
            .map_err(|err| resolve_error(err, kind.display_name()))?;
        Ok(Self {
            repr: Repr::WellKnown {
                kind,
                sid: Some(sid),
            },
        })
    }

    /// Same principal with its account name looked up.
    ///
    /// A trustee that is already resolved is returned as is.
    ///
    /// # Errors
    /// Same as [`Trustee::from_name`].
    #[inline]
    pub fn with_display_name<R: TrusteeResolver + ?Sized>(&self, resolver: &R) -> Result<Self, Error> {
        let sid = match &self.repr {
            Repr::Resolved { .. } => return Ok(self.clone()),
            Repr::Sid(sid)
            | Repr::WellKnown {
                sid: Some(sid), ..
            } => sid.clone(),
            Repr::WellKnown { kind, sid: None } => Self::from_well_known(*kind, resolver)?
                .sid()
                .cloned()
                .ok_or_else(|| Error::ResolutionFailed {
                    principal: kind.display_name().to_owned(),
                })?,
        };
        debug!(%sid, "resolving account name of SID");
        let name = resolver
            .resolve_sid(&sid)
            .map_err(|err| resolve_error(err, sid.as_str()))?;
        let kind = self.well_known();
        let sid_type = if kind.is_some() {
            SidType::WellKnownGroup
        } else {
            SidType::Unknown
        };
        Ok(Self {
            repr: Repr::Resolved {
                account: ResolvedAccount {
                    sid,
                    name,
                    sid_type,
                },
                kind,
            },
        })
    }

    /// SID of the principal, `None` for an unresolved domain-relative category.
    #[must_use]
    #[inline]
    pub const fn sid(&self) -> Option<&SidString> {
        match &self.repr {
            Repr::Sid(sid) => Some(sid),
            Repr::Resolved { account, .. } => Some(&account.sid),
            Repr::WellKnown { sid, .. } => sid.as_ref(),
        }
    }

    /// Well-known category of the principal, if any.
    #[must_use]
    #[inline]
    pub fn well_known(&self) -> Option<WellKnownSidType> {
        match &self.repr {
            Repr::WellKnown { kind, .. } => Some(*kind),
            Repr::Resolved {
                kind: Some(kind), ..
            } => Some(*kind),
            Repr::Sid(sid)
            | Repr::Resolved {
                account: ResolvedAccount { sid, .. },
                kind: None,
            } => WellKnownSidType::from_sid(sid),
        }
    }

    /// Whether the principal is a well-known category.
    #[must_use]
    #[inline]
    pub fn is_well_known(&self) -> bool {
        self.well_known().is_some()
    }

    /// SDDL abbreviation of the principal, if it has one.
    #[must_use]
    #[inline]
    pub fn abbreviation(&self) -> Option<&'static str> {
        self.well_known().and_then(WellKnownSidType::abbreviation)
    }

    /// Resolved account, if the trustee was resolved.
    #[must_use]
    #[inline]
    pub const fn account(&self) -> Option<&ResolvedAccount> {
        match &self.repr {
            Repr::Resolved { account, .. } => Some(account),
            _ => None,
        }
    }

    /// Human readable name: the account name when resolved, the category
    /// name when well-known.
    #[must_use]
    #[inline]
    pub fn display_name(&self) -> Option<String> {
        match &self.repr {
            Repr::Resolved { account, .. } => Some(account.name.to_string()),
            _ => self.well_known().map(|kind| kind.display_name().to_owned()),
        }
    }

    /// SDDL token of the principal: its abbreviation when it has one, its SID
    /// otherwise. Never the display name.
    #[must_use]
    #[inline]
    pub fn to_canonical_token(&self) -> &str {
        if let Some(abbreviation) = self.abbreviation() {
            return abbreviation;
        }
        self.sid().map_or("", SidString::as_str)
    }

}

impl From<SidString> for Trustee {
    #[inline]
    fn from(value: SidString) -> Self {
        Self {
            repr: Repr::Sid(value),
        }
    }
}

impl From<ResolvedAccount> for Trustee {
    #[inline]
    fn from(value: ResolvedAccount) -> Self {
        Self {
            repr: Repr::Resolved {
                account: value,
                kind: None,
            },
        }
    }
}

impl PartialEq for Trustee {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.to_canonical_token() == other.to_canonical_token()
    }
}

impl Eq for Trustee {}

impl Hash for Trustee {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_canonical_token().hash(state);
    }
}

impl Debug for Trustee {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        utils::debug_print::<Self>(stringify!(Trustee), self, f)
    }
}

impl Display for Trustee {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_canonical_token())
    }
}

impl FromStr for Trustee {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_abbreviation_or_sid(s)
    }
}
