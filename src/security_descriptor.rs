use core::fmt::{self, Display};
use core::str::FromStr;

use parsing::parse_descriptor;
use tracing::{debug, trace};

use crate::{AccessControlList, Error, Trustee};

/// Owner, group, discretionary ACL and system ACL of a securable object.
///
/// Every part is optional. Formatting writes `O:`, `G:`, `D:` and `S:` in that
/// order and leaves out missing parts and ACLs without entries.
///
/// # Examples
/// ```rust
/// # use win_sddl::SecurityDescriptor;
/// let descriptor: SecurityDescriptor = "O:BAG:SYD:PAI(A;;FA;;;SY)".parse().unwrap();
/// assert_eq!(descriptor.owner().unwrap().to_canonical_token(), "BA");
/// assert_eq!(descriptor.dacl().unwrap().len(), 1);
/// assert!(descriptor.sacl().is_none());
/// assert_eq!(descriptor.to_string(), "O:BAG:SYD:PAI(A;;FA;;;SY)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SecurityDescriptor {
    owner: Option<Trustee>,
    group: Option<Trustee>,
    dacl: Option<AccessControlList>,
    sacl: Option<AccessControlList>,
}

impl SecurityDescriptor {
    /// Descriptor with no part set.
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self {
            owner: None,
            group: None,
            dacl: None,
            sacl: None,
        }
    }

    /// Same descriptor with `owner`.
    #[must_use]
    #[inline]
    pub fn with_owner(self, owner: Trustee) -> Self {
        Self {
            owner: Some(owner),
            ..self
        }
    }

    /// Same descriptor with `group`.
    #[must_use]
    #[inline]
    pub fn with_group(self, group: Trustee) -> Self {
        Self {
            group: Some(group),
            ..self
        }
    }

    /// Same descriptor with a discretionary ACL.
    #[must_use]
    #[inline]
    pub fn with_dacl(self, dacl: AccessControlList) -> Self {
        Self {
            dacl: Some(dacl),
            ..self
        }
    }

    /// Same descriptor with a system ACL.
    #[must_use]
    #[inline]
    pub fn with_sacl(self, sacl: AccessControlList) -> Self {
        Self {
            sacl: Some(sacl),
            ..self
        }
    }

    /// Owner.
    #[must_use]
    #[inline]
    pub const fn owner(&self) -> Option<&Trustee> {
        self.owner.as_ref()
    }

    /// Primary group.
    #[must_use]
    #[inline]
    pub const fn group(&self) -> Option<&Trustee> {
        self.group.as_ref()
    }

    /// Discretionary ACL.
    #[must_use]
    #[inline]
    pub const fn dacl(&self) -> Option<&AccessControlList> {
        self.dacl.as_ref()
    }

    /// System ACL.
    #[must_use]
    #[inline]
    pub const fn sacl(&self) -> Option<&AccessControlList> {
        self.sacl.as_ref()
    }
}

impl FromStr for SecurityDescriptor {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        trace!(sddl = s, "parsing security descriptor");
        let result = parse_descriptor(s).map_err(Error::from).and_then(|raw| {
            Ok(Self {
                owner: raw.owner.map(Trustee::from_token).transpose()?,
                group: raw.group.map(Trustee::from_token).transpose()?,
                dacl: raw.dacl.map(AccessControlList::from_raw).transpose()?,
                sacl: raw.sacl.map(AccessControlList::from_raw).transpose()?,
            })
        });
        if let Err(err) = &result {
            debug!(sddl = s, kind = ?err.kind(), "rejected security descriptor");
        }
        result
    }
}

impl Display for SecurityDescriptor {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(owner) = &self.owner {
            write!(f, "O:{owner}")?;
        }
        if let Some(group) = &self.group {
            write!(f, "G:{group}")?;
        }
        for (prefix, acl) in [("D:", &self.dacl), ("S:", &self.sacl)] {
            if let Some(acl) = acl.as_ref().filter(|acl| !acl.is_empty()) {
                write!(f, "{prefix}{acl}")?;
            }
        }
        Ok(())
    }
}

#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
#[cfg(test)]
pub mod test {
    use super::*;
    use crate::acl::test::arb_acl;
    use crate::{ErrorKind, InMemoryResolver};
    use crate::trustee::test::arb_trustee;
    use proptest::prelude::*;

    pub fn arb_security_descriptor() -> impl Strategy<Value = SecurityDescriptor> {
        (
            proptest::option::of(arb_trustee()),
            proptest::option::of(arb_trustee()),
            proptest::option::of(arb_acl()),
            proptest::option::of(arb_acl()),
        )
            .prop_map(|(owner, group, dacl, sacl)| SecurityDescriptor {
                owner,
                group,
                dacl,
                sacl,
            })
    }

    #[test]
    fn owner_and_group_only() {
        let descriptor: SecurityDescriptor = "O:BAG:SY".parse().unwrap();
        assert_eq!(descriptor.owner().unwrap().to_canonical_token(), "BA");
        assert_eq!(descriptor.group().unwrap().to_canonical_token(), "SY");
        assert!(descriptor.dacl().is_none());
        assert!(descriptor.sacl().is_none());
        assert_eq!(descriptor.to_string(), "O:BAG:SY");
    }

    #[test]
    fn sid_owner() {
        let descriptor: SecurityDescriptor = "O:S-1-5-21-1-2-3-500D:(A;;GA;;;WD)".parse().unwrap();
        assert_eq!(
            descriptor.owner().unwrap().sid().unwrap().as_str(),
            "S-1-5-21-1-2-3-500"
        );
        assert_eq!(descriptor.to_string(), "O:S-1-5-21-1-2-3-500D:(A;;GA;;;WD)");
    }

    #[test]
    fn empty_parts() {
        assert_eq!("".parse::<SecurityDescriptor>().unwrap(), SecurityDescriptor::new());
        let descriptor: SecurityDescriptor = "O:BAD:".parse().unwrap();
        assert!(descriptor.dacl().is_none());

        let empty_acl = SecurityDescriptor::new()
            .with_owner("BA".parse().unwrap())
            .with_dacl(AccessControlList::new());
        assert_eq!(empty_acl.to_string(), "O:BA");
    }

    #[test]
    fn resolved_domain_owner_round_trips() {
        let resolver = InMemoryResolver::new().with_domain_sid("S-1-5-21-1-2-3".parse().unwrap());
        let owner = Trustee::from_abbreviation_or_sid("DA")
            .unwrap()
            .with_display_name(&resolver)
            .unwrap();
        let descriptor = SecurityDescriptor::new().with_owner(owner);
        let text = descriptor.to_string();
        assert_eq!(text, "O:DA");
        assert_eq!(text.parse::<SecurityDescriptor>().unwrap(), descriptor);
    }

    #[test]
    fn rejections() {
        let kind = |text: &str| text.parse::<SecurityDescriptor>().unwrap_err().kind();
        assert_eq!(kind("G:SYO:BA"), ErrorKind::MalformedSecurityDescriptor);
        assert_eq!(kind("O:BAO:SY"), ErrorKind::MalformedSecurityDescriptor);
        assert_eq!(kind("Q:BA"), ErrorKind::MalformedSecurityDescriptor);
        assert_eq!(kind("O:ZZ"), ErrorKind::UnknownTrustee);
        assert_eq!(kind("D:(X;;GA;;;WD)"), ErrorKind::UnknownAceType);
        assert_eq!(kind("D:P"), ErrorKind::MalformedAcl);
    }

    proptest! {
        #[test]
        fn any_text_gives_a_value_or_an_error(
            text in prop_oneof![any::<String>(), "[OGDS:()A-Z;0-9\\-\u{e9}]*"]
        ) {
            let parsed = text.parse::<SecurityDescriptor>();
            let validated = parsing::validate_sddl(&text);
            prop_assert_eq!(parsed.is_ok(), validated.is_ok());
            if let (Err(parse_error), Err(syntax_error)) = (parsed, validated) {
                prop_assert_eq!(parse_error.kind(), Error::from(syntax_error).kind());
            }
        }

        #[test]
        fn format_then_parse(descriptor in arb_security_descriptor()) {
            let text = descriptor.to_string();
            let parsed: SecurityDescriptor = text.parse().unwrap();
            prop_assert_eq!(&parsed, &descriptor);
            prop_assert_eq!(parsed.to_string(), text);
        }
    }
}
