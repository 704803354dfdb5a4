//! Boundary between the codec and account lookups.
//!
//! The codec never looks accounts up by itself. Operations that need a name
//! or a domain SID take a [`TrusteeResolver`]; [`InMemoryResolver`] is an
//! offline implementation.

mod in_memory;

use thiserror::Error;

pub use in_memory::InMemoryResolver;

use crate::{DomainAndName, SidString, SidType, WellKnownSidType};

/// Failure reported by a [`TrusteeResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The principal does not exist.
    #[error("principal not found")]
    NotFound,
    /// The resolver could not answer, e.g. the directory is unreachable.
    #[error("resolver unavailable: {0}")]
    Unavailable(String),
}

/// Account returned by a name lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedAccount {
    /// SID of the account.
    pub sid: SidString,
    /// `DOMAIN\Name` of the account.
    pub name: DomainAndName,
    /// Kind of account.
    pub sid_type: SidType,
}

/// Account lookups used by trustee construction and the renderer.
///
/// Implementations may block. No timeout is applied by the callers.
pub trait TrusteeResolver {
    /// Finds the account named `name`, written `DOMAIN\Name` or `Name`.
    ///
    /// # Errors
    /// [`ResolveError::NotFound`] for an unknown name,
    /// [`ResolveError::Unavailable`] when the lookup could not run.
    fn resolve_name(&self, name: &str) -> Result<ResolvedAccount, ResolveError>;

    /// Finds the account name of `sid`.
    ///
    /// # Errors
    /// Same as [`TrusteeResolver::resolve_name`].
    fn resolve_sid(&self, sid: &SidString) -> Result<DomainAndName, ResolveError>;

    /// Builds the SID of a well-known category, domain-relative ones included.
    ///
    /// # Errors
    /// [`ResolveError::NotFound`] when the category has no SID in this
    /// context, [`ResolveError::Unavailable`] when the lookup could not run.
    fn well_known_sid(&self, kind: WellKnownSidType) -> Result<SidString, ResolveError>;
}

impl<T: TrusteeResolver + ?Sized> TrusteeResolver for &T {
    #[inline]
    fn resolve_name(&self, name: &str) -> Result<ResolvedAccount, ResolveError> {
        (**self).resolve_name(name)
    }

    #[inline]
    fn resolve_sid(&self, sid: &SidString) -> Result<DomainAndName, ResolveError> {
        (**self).resolve_sid(sid)
    }

    #[inline]
    fn well_known_sid(&self, kind: WellKnownSidType) -> Result<SidString, ResolveError> {
        (**self).well_known_sid(kind)
    }
}
