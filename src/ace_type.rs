use core::fmt::{self, Display};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use parsing::tables::{ACE_TYPES, TokenEntry};

/// Kind of an access-control entry.
///
/// Discriminants are the positions in the ACE type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum AceType {
    /// `A`
    AccessAllowed = 0,
    /// `D`
    AccessDenied = 1,
    /// `OA`
    ObjectAccessAllowed = 2,
    /// `OD`
    ObjectAccessDenied = 3,
    /// `AU`
    Audit = 4,
    /// `AL`
    Alarm = 5,
    /// `OU`
    ObjectAudit = 6,
    /// `OL`
    ObjectAlarm = 7,
}

impl AceType {
    fn entry(self) -> Option<&'static TokenEntry> {
        ACE_TYPES.by_bits(u32::from(u8::from(self)))
    }

    /// SDDL token, e.g. `"OA"`.
    #[must_use]
    #[inline]
    pub fn token(self) -> &'static str {
        self.entry().map_or("", |entry| entry.token)
    }

    /// Human readable name, e.g. `"Object Access Allowed"`.
    #[must_use]
    #[inline]
    pub fn description(self) -> &'static str {
        self.entry().map_or("", |entry| entry.description)
    }

    /// Finds the type of an SDDL token, ignoring ASCII case.
    #[must_use]
    #[inline]
    pub fn from_token(token: &str) -> Option<Self> {
        ACE_TYPES.lookup(token).and_then(Self::from_entry)
    }

    pub(crate) fn from_entry(entry: &TokenEntry) -> Option<Self> {
        u8::try_from(entry.bits)
            .ok()
            .and_then(|value| Self::try_from(value).ok())
    }

    /// Whether entries of this type carry object GUIDs.
    #[must_use]
    #[inline]
    pub const fn is_object(self) -> bool {
        matches!(
            self,
            Self::ObjectAccessAllowed
                | Self::ObjectAccessDenied
                | Self::ObjectAudit
                | Self::ObjectAlarm
        )
    }
}

impl Display for AceType {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
