use core::fmt::{self, Display};
use core::str::FromStr;

use parsing::{RawAce, parse_ace};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::{AceFlags, AceRights, AceType, Error, Trustee};

/// One access-control entry: `type;flags;rights;object_guid;inherit_object_guid;trustee`.
///
/// Parsing then formatting gives the canonical form: flags and rights in table
/// order, tokens upper case, well-known trustees abbreviated. The nil GUID is
/// the same as no GUID.
///
/// # Examples
/// ```rust
/// # use win_sddl::{AccessControlEntry, AceFlags, AceRights, AceType};
/// let ace: AccessControlEntry = "a;oici;fa;;;ba".parse().unwrap();
/// assert_eq!(ace.ace_type(), AceType::AccessAllowed);
/// assert_eq!(ace.flags(), AceFlags::CONTAINER_INHERIT | AceFlags::OBJECT_INHERIT);
/// assert_eq!(ace.rights(), AceRights::FILE_ALL);
/// assert_eq!(ace.to_string(), "A;CIOI;FA;;;BA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccessControlEntry {
    ace_type: AceType,
    flags: AceFlags,
    rights: AceRights,
    object_guid: Option<Uuid>,
    inherit_object_guid: Option<Uuid>,
    trustee: Trustee,
}

fn non_nil(guid: Uuid) -> Option<Uuid> {
    (!guid.is_nil()).then_some(guid)
}

fn parse_guid(text: Option<&str>) -> Result<Option<Uuid>, Error> {
    text.map(|text| {
        Uuid::parse_str(text).map_err(|_| Error::MalformedToken {
            token: text.to_owned(),
        })
    })
    .transpose()
    .map(|guid| guid.and_then(non_nil))
}

impl AccessControlEntry {
    /// Entry without flags nor GUIDs.
    #[must_use]
    #[inline]
    pub const fn new(ace_type: AceType, rights: AceRights, trustee: Trustee) -> Self {
        Self {
            ace_type,
            flags: AceFlags::empty(),
            rights,
            object_guid: None,
            inherit_object_guid: None,
            trustee,
        }
    }

    /// Same entry with `flags`.
    #[must_use]
    #[inline]
    pub fn with_flags(self, flags: AceFlags) -> Self {
        Self { flags, ..self }
    }

    /// Same entry with an object GUID. The nil GUID clears it.
    #[must_use]
    #[inline]
    pub fn with_object_guid(self, guid: Uuid) -> Self {
        Self {
            object_guid: non_nil(guid),
            ..self
        }
    }

    /// Same entry with an inherited object GUID. The nil GUID clears it.
    #[must_use]
    #[inline]
    pub fn with_inherit_object_guid(self, guid: Uuid) -> Self {
        Self {
            inherit_object_guid: non_nil(guid),
            ..self
        }
    }

    /// Kind of entry.
    #[must_use]
    #[inline]
    pub const fn ace_type(&self) -> AceType {
        self.ace_type
    }

    /// Inheritance and audit flags.
    #[must_use]
    #[inline]
    pub const fn flags(&self) -> AceFlags {
        self.flags
    }

    /// Rights mask, unnamed bits included.
    #[must_use]
    #[inline]
    pub const fn rights(&self) -> AceRights {
        self.rights
    }

    /// Named rights of the mask, ascending.
    #[inline]
    pub fn rights_iter(&self) -> impl Iterator<Item = AceRights> + use<> {
        self.rights.rights_iter()
    }

    /// Object GUID.
    #[must_use]
    #[inline]
    pub const fn object_guid(&self) -> Option<Uuid> {
        self.object_guid
    }

    /// Inherited object GUID.
    #[must_use]
    #[inline]
    pub const fn inherit_object_guid(&self) -> Option<Uuid> {
        self.inherit_object_guid
    }

    /// Principal the entry applies to.
    #[must_use]
    #[inline]
    pub const fn trustee(&self) -> &Trustee {
        &self.trustee
    }

    pub(crate) fn from_raw(raw: RawAce<'_>) -> Result<Self, Error> {
        let ace_type = AceType::from_entry(raw.ace_type).ok_or_else(|| Error::UnknownAceType {
            token: raw.ace_type.token.to_owned(),
        })?;
        Ok(Self {
            ace_type,
            flags: AceFlags::from_bits_retain(raw.flags),
            rights: AceRights::from_bits_retain(raw.rights),
            object_guid: parse_guid(raw.object_guid)?,
            inherit_object_guid: parse_guid(raw.inherit_object_guid)?,
            trustee: Trustee::from_token(raw.trustee)?,
        })
    }
}

impl FromStr for AccessControlEntry {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        trace!(ace = s, "parsing ACE");
        let raw = parse_ace(s).map_err(|err| {
            debug!(ace = s, kind = %err.kind, "rejected ACE");
            Error::from(err)
        })?;
        Self::from_raw(raw)
    }
}

struct OptionalGuid(Option<Uuid>);

impl Display for OptionalGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(guid) => Display::fmt(&guid.hyphenated(), f),
            None => Ok(()),
        }
    }
}

impl Display for AccessControlEntry {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};{};{};{}",
            self.ace_type,
            self.flags,
            self.rights,
            OptionalGuid(self.object_guid),
            OptionalGuid(self.inherit_object_guid),
            self.trustee
        )
    }
}

#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
#[cfg(test)]
pub mod test {
    use super::*;
    use crate::ErrorKind;
    use crate::ace_flags::test::arb_ace_flags;
    use crate::ace_rights::test::arb_ace_rights;
    use crate::ace_type::test::arb_ace_type;
    use crate::trustee::test::arb_trustee;
    use proptest::prelude::*;

    fn arb_guid() -> impl Strategy<Value = Uuid> {
        any::<u128>().prop_map(Uuid::from_u128)
    }

    pub fn arb_ace() -> impl Strategy<Value = AccessControlEntry> {
        (
            arb_ace_type(),
            arb_ace_flags(),
            arb_ace_rights(),
            proptest::option::of(arb_guid()),
            proptest::option::of(arb_guid()),
            arb_trustee(),
        )
            .prop_map(|(ace_type, flags, rights, object_guid, inherit_object_guid, trustee)| {
                let mut ace = AccessControlEntry::new(ace_type, rights, trustee).with_flags(flags);
                if let Some(guid) = object_guid {
                    ace = ace.with_object_guid(guid);
                }
                if let Some(guid) = inherit_object_guid {
                    ace = ace.with_inherit_object_guid(guid);
                }
                ace
            })
    }

    #[test]
    fn object_ace() {
        let text = "OA;CIIO;RPWP;bf967aba-0de6-11d0-a285-00aa003049e2;;S-1-5-21-1-2-3-1104";
        let ace: AccessControlEntry = text.parse().unwrap();
        assert_eq!(ace.ace_type(), AceType::ObjectAccessAllowed);
        assert_eq!(
            ace.object_guid(),
            Some(Uuid::from_u128(0xbf96_7aba_0de6_11d0_a285_00aa_0030_49e2))
        );
        assert_eq!(ace.inherit_object_guid(), None);
        assert_eq!(ace.to_string(), text);
    }

    #[test]
    fn canonical_form() {
        let ace: AccessControlEntry = "a;IOCI;GRGA;;;s-1-1-0".parse().unwrap();
        assert_eq!(ace.to_string(), "A;CIIO;GAGR;;;WD");
    }

    #[test]
    fn nil_guid_is_absent() {
        let ace: AccessControlEntry = "OA;;CR;00000000-0000-0000-0000-000000000000;;WD"
            .parse()
            .unwrap();
        assert_eq!(ace.object_guid(), None);
        assert_eq!(ace.to_string(), "OA;;CR;;;WD");
    }

    #[test]
    fn rights_enumeration() {
        let ace: AccessControlEntry = "A;;0x1e0100;;;BA".parse().unwrap();
        let tokens: Vec<_> = ace.rights_iter().filter_map(AceRights::token).collect();
        assert_eq!(tokens, ["RP", "FA", "FR", "FW", "FX"]);
        assert_eq!(ace.to_string(), "A;;RPFAFRFWFX;;;BA");
    }

    #[test]
    fn builders() {
        let ace = AccessControlEntry::new(
            AceType::AccessDenied,
            AceRights::FILE_EXECUTE,
            "WD".parse().unwrap(),
        )
        .with_flags(AceFlags::INHERITED)
        .with_object_guid(Uuid::nil());
        assert_eq!(ace.to_string(), "D;ID;FX;;;WD");
    }

    #[test]
    fn rejection_kinds() {
        let kind = |text: &str| text.parse::<AccessControlEntry>().unwrap_err().kind();
        assert_eq!(kind("X;;;;;WD"), ErrorKind::UnknownAceType);
        assert_eq!(kind("A;ZZ;GA;;;WD"), ErrorKind::MalformedToken);
        assert_eq!(kind("A;;GA;;;"), ErrorKind::MalformedAce);
        assert_eq!(kind("A;;GA;;WD"), ErrorKind::MalformedAce);
        assert_eq!(kind("A;;GA;not-a-guid;;WD"), ErrorKind::MalformedToken);
        assert_eq!(kind("A;;GA;;;QQ"), ErrorKind::UnknownTrustee);
    }

    proptest! {
        #[test]
        fn format_then_parse(ace in arb_ace()) {
            let text = ace.to_string();
            let parsed: AccessControlEntry = text.parse().unwrap();
            prop_assert_eq!(&parsed, &ace);
            prop_assert_eq!(parsed.to_string(), text);
        }
    }
}
