use core::fmt::{self, Display};
use core::slice;
use core::str::FromStr;

use delegate::delegate;
use parsing::{RawAcl, parse_acl};
use tracing::{debug, trace};

use crate::{AccessControlEntry, AclFlags, Error};

/// Access-control list: flags followed by `(ace)` groups.
///
/// Entries keep the order they were written or added in. Nothing is
/// reordered, merged or deduplicated.
///
/// # Examples
/// ```rust
/// # use win_sddl::{AccessControlList, AclFlags};
/// let acl: AccessControlList = "PAI(A;;FA;;;SY)(A;;FR;;;BU)".parse().unwrap();
/// assert_eq!(acl.flags(), AclFlags::PROTECTED | AclFlags::INHERITED);
/// assert_eq!(acl.len(), 2);
/// assert_eq!(acl.get(1).unwrap().to_string(), "A;;FR;;;BU");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct AccessControlList {
    flags: AclFlags,
    entries: Vec<AccessControlEntry>,
}

impl AccessControlList {
    /// Empty list without flags.
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self {
            flags: AclFlags::empty(),
            entries: Vec::new(),
        }
    }

    /// Same list with `flags`.
    #[must_use]
    #[inline]
    pub fn with_flags(self, flags: AclFlags) -> Self {
        Self { flags, ..self }
    }

    /// Same list with `entry` appended.
    #[must_use]
    #[inline]
    pub fn with_entry(mut self, entry: AccessControlEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Control flags.
    #[must_use]
    #[inline]
    pub const fn flags(&self) -> AclFlags {
        self.flags
    }

    /// Entries in order.
    #[must_use]
    #[inline]
    pub fn entries(&self) -> &[AccessControlEntry] {
        &self.entries
    }

    delegate! {
        to self.entries {
            /// Number of entries.
            #[must_use]
            #[inline]
            pub fn len(&self) -> usize;
            /// Whether the list has no entry.
            #[must_use]
            #[inline]
            pub fn is_empty(&self) -> bool;
            /// Entries in order.
            #[inline]
            pub fn iter(&self) -> slice::Iter<'_, AccessControlEntry>;
            /// Entry at `index`.
            #[must_use]
            #[inline]
            pub fn get(&self, index: usize) -> Option<&AccessControlEntry>;
        }
    }

    pub(crate) fn from_raw(raw: RawAcl<'_>) -> Result<Self, Error> {
        let entries = raw
            .entries()
            .map(|entry| entry.map_err(Error::from).and_then(AccessControlEntry::from_raw))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            flags: AclFlags::from_bits_retain(raw.flags),
            entries,
        })
    }
}

impl FromStr for AccessControlList {
    type Err = Error;

    /// Parses the body written after `D:` or `S:`.
    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        trace!(acl = s, "parsing ACL");
        let raw = parse_acl(s).map_err(|err| {
            debug!(acl = s, kind = %err.kind, "rejected ACL");
            Error::from(err)
        })?;
        Self::from_raw(raw)
    }
}

impl Display for AccessControlList {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.flags, f)?;
        self.entries
            .iter()
            .try_for_each(|entry| write!(f, "({entry})"))
    }
}

impl<'a> IntoIterator for &'a AccessControlList {
    type Item = &'a AccessControlEntry;
    type IntoIter = slice::Iter<'a, AccessControlEntry>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for AccessControlList {
    type Item = AccessControlEntry;
    type IntoIter = std::vec::IntoIter<AccessControlEntry>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<AccessControlEntry> for AccessControlList {
    #[inline]
    fn from_iter<T: IntoIterator<Item = AccessControlEntry>>(iter: T) -> Self {
        Self {
            flags: AclFlags::empty(),
            entries: iter.into_iter().collect(),
        }
    }
}

#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
#[cfg(test)]
pub mod test {
    use super::*;
    use crate::ace::test::arb_ace;
    use crate::acl_flags::test::arb_acl_flags;
    use crate::{AceRights, AceType, ErrorKind};
    use proptest::prelude::*;

    pub fn arb_acl() -> impl Strategy<Value = AccessControlList> {
        (arb_acl_flags(), proptest::collection::vec(arb_ace(), 1..6))
            .prop_map(|(flags, entries)| entries.into_iter().collect::<AccessControlList>().with_flags(flags))
    }

    #[test]
    fn order_is_preserved() {
        let text = "(D;;GA;;;WD)(A;;GA;;;WD)(D;;GA;;;WD)";
        let acl: AccessControlList = text.parse().unwrap();
        let types: Vec<_> = acl.iter().map(AccessControlEntry::ace_type).collect();
        assert_eq!(
            types,
            [AceType::AccessDenied, AceType::AccessAllowed, AceType::AccessDenied]
        );
        assert_eq!(acl.to_string(), text);
    }

    #[test]
    fn flags_are_written_in_fixed_order() {
        let acl: AccessControlList = "AIARP(A;;GA;;;WD)".parse().unwrap();
        assert_eq!(acl.to_string(), "PARAI(A;;GA;;;WD)");
    }

    #[test]
    fn builders() {
        let acl = AccessControlList::new()
            .with_flags(AclFlags::PROTECTED)
            .with_entry(AccessControlEntry::new(
                AceType::AccessAllowed,
                AceRights::GENERIC_ALL,
                "SY".parse().unwrap(),
            ));
        assert_eq!(acl.to_string(), "P(A;;GA;;;SY)");
        assert_eq!((&acl).into_iter().count(), 1);
    }

    #[test]
    fn rejections() {
        let kind = |text: &str| text.parse::<AccessControlList>().unwrap_err().kind();
        assert_eq!(kind("P"), ErrorKind::MalformedAcl);
        assert_eq!(kind("PX(A;;GA;;;WD)"), ErrorKind::MalformedAcl);
        assert_eq!(kind("(A;;GA;;;WD)garbage"), ErrorKind::MalformedAcl);
        assert_eq!(kind("(A;;GA;;;WD)(X;;GA;;;WD)"), ErrorKind::UnknownAceType);
        assert_eq!(kind("(A;;GA;;;WD)(A;;GA;;;)"), ErrorKind::MalformedAce);
    }

    proptest! {
        #[test]
        fn format_then_parse(acl in arb_acl()) {
            let text = acl.to_string();
            let parsed: AccessControlList = text.parse().unwrap();
            prop_assert_eq!(parsed.to_string(), text);
            prop_assert_eq!(parsed, acl);
        }
    }
}
