use crate::{
    DomainAndName, ResolveError, ResolvedAccount, SidString, SidType, TrusteeResolver,
    WellKnownSidType,
};

/// Offline resolver over a fixed set of accounts.
///
/// Well-known categories are always known. Domain-relative ones need a domain
/// SID set with [`InMemoryResolver::with_domain_sid`].
///
/// # Examples
/// ```rust
/// # use win_sddl::{DomainAndName, InMemoryResolver, SidType, Trustee, WellKnownSidType};
/// let resolver = InMemoryResolver::new()
///     .with_domain_sid("S-1-5-21-1-2-3".parse().unwrap())
///     .with_account(
///         DomainAndName::new("CONTOSO", "alice"),
///         "S-1-5-21-1-2-3-1104".parse().unwrap(),
///         SidType::User,
///     );
/// let alice = Trustee::from_name("CONTOSO\\alice", &resolver).unwrap();
/// assert_eq!(alice.to_canonical_token(), "S-1-5-21-1-2-3-1104");
///
/// let admins = Trustee::from_well_known(WellKnownSidType::AccountDomainAdmins, &resolver).unwrap();
/// assert_eq!(admins.sid().unwrap().as_str(), "S-1-5-21-1-2-3-512");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryResolver {
    domain_sid: Option<SidString>,
    accounts: Vec<ResolvedAccount>,
    unavailable: Option<String>,
}

impl InMemoryResolver {
    /// A resolver knowing only the fixed well-known SIDs.
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver failing every call with [`ResolveError::Unavailable`].
    #[must_use]
    #[inline]
    pub fn unavailable<R: Into<String>>(reason: R) -> Self {
        Self {
            unavailable: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Sets the account domain SID.
    #[must_use]
    #[inline]
    pub fn with_domain_sid(self, domain_sid: SidString) -> Self {
        Self {
            domain_sid: Some(domain_sid),
            ..self
        }
    }

    /// Adds an account.
    #[must_use]
    #[inline]
    pub fn with_account(mut self, name: DomainAndName, sid: SidString, sid_type: SidType) -> Self {
        self.accounts.push(ResolvedAccount {
            sid,
            name,
            sid_type,
        });
        self
    }

    fn check_available(&self) -> Result<(), ResolveError> {
        match &self.unavailable {
            Some(reason) => Err(ResolveError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }

    fn domain_relative(&self, kind: WellKnownSidType) -> Option<SidString> {
        let rid = kind.domain_rid()?;
        self.domain_sid.as_ref().map(|domain| domain.with_rid(rid))
    }

    fn well_known_account(&self, kind: WellKnownSidType) -> Option<ResolvedAccount> {
        let sid = match kind.sid() {
            Some(sid) => SidString::new(sid).ok()?,
            None => self.domain_relative(kind)?,
        };
        Some(ResolvedAccount {
            sid,
            name: DomainAndName::new("", kind.display_name()),
            sid_type: SidType::WellKnownGroup,
        })
    }
}

impl TrusteeResolver for InMemoryResolver {
    #[inline]
    fn resolve_name(&self, name: &str) -> Result<ResolvedAccount, ResolveError> {
        self.check_available()?;
        let wanted: DomainAndName = name.parse().map_err(|_| ResolveError::NotFound)?;
        let account = self.accounts.iter().find(|account| {
            if wanted.domain.is_empty() {
                account.name.name.eq_ignore_ascii_case(&wanted.name)
            } else {
                account.name.matches(&wanted)
            }
        });
        if let Some(account) = account {
            return Ok(account.clone());
        }
        if !wanted.domain.is_empty() {
            return Err(ResolveError::NotFound);
        }
        WellKnownSidType::all()
            .filter(|kind| kind.display_name().eq_ignore_ascii_case(&wanted.name))
            .find_map(|kind| self.well_known_account(kind))
            .ok_or(ResolveError::NotFound)
    }

    #[inline]
    fn resolve_sid(&self, sid: &SidString) -> Result<DomainAndName, ResolveError> {
        self.check_available()?;
        if let Some(account) = self.accounts.iter().find(|account| &account.sid == sid) {
            return Ok(account.name.clone());
        }
        WellKnownSidType::all()
            .find_map(|kind| {
                self.well_known_account(kind)
                    .filter(|account| &account.sid == sid)
            })
            .map(|account| account.name)
            .ok_or(ResolveError::NotFound)
    }

    #[inline]
    fn well_known_sid(&self, kind: WellKnownSidType) -> Result<SidString, ResolveError> {
        self.check_available()?;
        self.well_known_account(kind)
            .map(|account| account.sid)
            .ok_or(ResolveError::NotFound)
    }
}

#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
#[cfg(test)]
mod tests {
    use super::*;

    fn contoso() -> InMemoryResolver {
        InMemoryResolver::new()
            .with_domain_sid(SidString::new("S-1-5-21-1-2-3").unwrap())
            .with_account(
                DomainAndName::new("CONTOSO", "alice"),
                SidString::new("S-1-5-21-1-2-3-1104").unwrap(),
                SidType::User,
            )
    }

    #[test]
    fn names() {
        let resolver = contoso();
        let alice = resolver.resolve_name("contoso\\ALICE").unwrap();
        assert_eq!(alice.sid.as_str(), "S-1-5-21-1-2-3-1104");
        assert_eq!(resolver.resolve_name("alice").unwrap(), alice);
        assert_eq!(
            resolver.resolve_name("FABRIKAM\\alice"),
            Err(ResolveError::NotFound)
        );
        assert_eq!(
            resolver.resolve_name("Everyone").unwrap().sid.as_str(),
            "S-1-1-0"
        );
    }

    #[test]
    fn sids() {
        let resolver = contoso();
        let name = resolver
            .resolve_sid(&SidString::new("S-1-5-21-1-2-3-512").unwrap())
            .unwrap();
        assert_eq!(name.to_string(), "Domain Administrators");
        assert_eq!(
            resolver.resolve_sid(&SidString::new("S-1-5-21-9-9-9-9").unwrap()),
            Err(ResolveError::NotFound)
        );
    }

    #[test]
    fn domain_relative_needs_a_domain() {
        assert_eq!(
            InMemoryResolver::new().well_known_sid(WellKnownSidType::AccountDomainUsers),
            Err(ResolveError::NotFound)
        );
        assert_eq!(
            contoso()
                .well_known_sid(WellKnownSidType::AccountDomainUsers)
                .unwrap()
                .as_str(),
            "S-1-5-21-1-2-3-513"
        );
        assert_eq!(
            InMemoryResolver::new()
                .well_known_sid(WellKnownSidType::World)
                .unwrap()
                .as_str(),
            "S-1-1-0"
        );
    }

    #[test]
    fn unavailable() {
        let resolver = InMemoryResolver::unavailable("directory offline");
        assert_eq!(
            resolver.well_known_sid(WellKnownSidType::World),
            Err(ResolveError::Unavailable("directory offline".to_owned()))
        );
    }
}
