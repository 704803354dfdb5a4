//! Token tables shared by the parser, the serializer and the descriptive renderer.
//!
//! Every table is ordered: the position of an entry is its canonical
//! serialization position, and for the bit-set tables the entry at position
//! `n` owns bit `n`.

use crate::{SyntaxError, SyntaxErrorKind};

/// One token of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenEntry {
    /// The SDDL token, upper case.
    pub token: &'static str,
    /// Enumeration value (ACE type) or bit mask (flags and rights).
    pub bits: u32,
    /// Human readable description.
    pub description: &'static str,
}

impl TokenEntry {
    const fn new(token: &'static str, bits: u32, description: &'static str) -> Self {
        Self {
            token,
            bits,
            description,
        }
    }
}

/// Ordered, immutable mapping between tokens and values.
#[derive(Debug, Clone, Copy)]
pub struct TokenTable {
    entries: &'static [TokenEntry],
}

impl TokenTable {
    const fn new(entries: &'static [TokenEntry]) -> Self {
        Self { entries }
    }

    /// Entries in canonical order.
    #[must_use]
    #[inline]
    pub const fn entries(&self) -> &'static [TokenEntry] {
        self.entries
    }

    /// Finds the entry of a token, ignoring ASCII case.
    #[must_use]
    #[inline]
    pub fn lookup(&self, token: &str) -> Option<&'static TokenEntry> {
        self.entries
            .iter()
            .find(|entry| entry.token.eq_ignore_ascii_case(token))
    }

    /// Finds the entry holding exactly `bits`.
    #[must_use]
    #[inline]
    pub fn by_bits(&self, bits: u32) -> Option<&'static TokenEntry> {
        self.entries.iter().find(|entry| entry.bits == bits)
    }

    /// Union of every value of the table.
    #[must_use]
    #[inline]
    pub fn known_bits(&self) -> u32 {
        self.entries.iter().fold(0, |acc, entry| acc | entry.bits)
    }

    /// Decodes a concatenation of two-character tokens into a bit mask.
    ///
    /// # Errors
    /// [`SyntaxErrorKind::MalformedToken`] carrying the first chunk that is
    /// not in the table, or the dangling character of an odd-length input.
    #[inline]
    pub fn decode_pairs<'a>(&self, text: &'a str) -> Result<u32, SyntaxError<'a>> {
        let mut bits = 0;
        let mut rest = text;
        while !rest.is_empty() {
            let Some(chunk) = rest.get(..2) else {
                return Err(SyntaxError::new(SyntaxErrorKind::MalformedToken, rest));
            };
            let entry = self
                .lookup(chunk)
                .ok_or(SyntaxError::new(SyntaxErrorKind::MalformedToken, chunk))?;
            bits |= entry.bits;
            rest = rest.get(2..).unwrap_or_default();
        }
        Ok(bits)
    }
}

/// ACE type values, in table order.
pub mod ace_type {
    /// `A`
    pub const ACCESS_ALLOWED: u32 = 0;
    /// `D`
    pub const ACCESS_DENIED: u32 = 1;
    /// `OA`
    pub const OBJECT_ACCESS_ALLOWED: u32 = 2;
    /// `OD`
    pub const OBJECT_ACCESS_DENIED: u32 = 3;
    /// `AU`
    pub const AUDIT: u32 = 4;
    /// `AL`
    pub const ALARM: u32 = 5;
    /// `OU`
    pub const OBJECT_AUDIT: u32 = 6;
    /// `OL`
    pub const OBJECT_ALARM: u32 = 7;
}

/// ACE flag bits.
pub mod ace_flag {
    /// `CI`
    pub const CONTAINER_INHERIT: u32 = 1 << 0;
    /// `OI`
    pub const OBJECT_INHERIT: u32 = 1 << 1;
    /// `NP`
    pub const NO_PROPAGATE: u32 = 1 << 2;
    /// `IO`
    pub const INHERIT_ONLY: u32 = 1 << 3;
    /// `ID`
    pub const INHERITED: u32 = 1 << 4;
    /// `SA`
    pub const AUDIT_SUCCESS: u32 = 1 << 5;
    /// `FA`
    pub const AUDIT_FAILURE: u32 = 1 << 6;
}

/// ACE right bits.
pub mod ace_right {
    /// `GA`
    pub const GENERIC_ALL: u32 = 1 << 0;
    /// `GR`
    pub const GENERIC_READ: u32 = 1 << 1;
    /// `GW`
    pub const GENERIC_WRITE: u32 = 1 << 2;
    /// `GX`
    pub const GENERIC_EXECUTE: u32 = 1 << 3;
    /// `RC`
    pub const READ_CONTROL: u32 = 1 << 4;
    /// `SD`
    pub const DELETE: u32 = 1 << 5;
    /// `WD`
    pub const WRITE_DAC: u32 = 1 << 6;
    /// `WO`
    pub const WRITE_OWNER: u32 = 1 << 7;
    /// `RP`
    pub const READ_PROPERTY: u32 = 1 << 8;
    /// `WP`
    pub const WRITE_PROPERTY: u32 = 1 << 9;
    /// `CC`
    pub const CREATE_CHILD: u32 = 1 << 10;
    /// `DC`
    pub const DELETE_CHILD: u32 = 1 << 11;
    /// `LC`
    pub const LIST_CHILDREN: u32 = 1 << 12;
    /// `SW`
    pub const SELF_WRITE: u32 = 1 << 13;
    /// `LO`
    pub const LIST_OBJECT: u32 = 1 << 14;
    /// `DT`
    pub const DELETE_TREE: u32 = 1 << 15;
    /// `CR`
    pub const CONTROL_ACCESS: u32 = 1 << 16;
    /// `FA`
    pub const FILE_ALL: u32 = 1 << 17;
    /// `FR`
    pub const FILE_READ: u32 = 1 << 18;
    /// `FW`
    pub const FILE_WRITE: u32 = 1 << 19;
    /// `FX`
    pub const FILE_EXECUTE: u32 = 1 << 20;
    /// `KA`
    pub const KEY_ALL: u32 = 1 << 21;
    /// `KR`
    pub const KEY_READ: u32 = 1 << 22;
    /// `KW`
    pub const KEY_WRITE: u32 = 1 << 23;
    /// `KX`
    pub const KEY_EXECUTE: u32 = 1 << 24;
}

/// ACL flag bits.
pub mod acl_flag {
    /// `P`
    pub const PROTECTED: u32 = 1 << 0;
    /// `AR`
    pub const MUST_INHERIT: u32 = 1 << 1;
    /// `AI`
    pub const INHERITED: u32 = 1 << 2;
}

/// ACE types.
pub static ACE_TYPES: TokenTable = TokenTable::new(&[
    TokenEntry::new("A", ace_type::ACCESS_ALLOWED, "Access Allowed"),
    TokenEntry::new("D", ace_type::ACCESS_DENIED, "Access Denied"),
    TokenEntry::new("OA", ace_type::OBJECT_ACCESS_ALLOWED, "Object Access Allowed"),
    TokenEntry::new("OD", ace_type::OBJECT_ACCESS_DENIED, "Object Access Denied"),
    TokenEntry::new("AU", ace_type::AUDIT, "System Audit"),
    TokenEntry::new("AL", ace_type::ALARM, "System Alarm"),
    TokenEntry::new("OU", ace_type::OBJECT_AUDIT, "Object System Audit"),
    TokenEntry::new("OL", ace_type::OBJECT_ALARM, "Object System Alarm"),
]);

/// ACE flags.
pub static ACE_FLAGS: TokenTable = TokenTable::new(&[
    TokenEntry::new("CI", ace_flag::CONTAINER_INHERIT, "Container Inherit"),
    TokenEntry::new("OI", ace_flag::OBJECT_INHERIT, "Object Inherit"),
    TokenEntry::new("NP", ace_flag::NO_PROPAGATE, "No Propagate"),
    TokenEntry::new("IO", ace_flag::INHERIT_ONLY, "Inheritance Only"),
    TokenEntry::new("ID", ace_flag::INHERITED, "Inherited"),
    TokenEntry::new("SA", ace_flag::AUDIT_SUCCESS, "Successful Access Audit"),
    TokenEntry::new("FA", ace_flag::AUDIT_FAILURE, "Failed Access Audit"),
]);

/// ACE rights: generic, directory, file and registry key rights.
pub static ACE_RIGHTS: TokenTable = TokenTable::new(&[
    TokenEntry::new("GA", ace_right::GENERIC_ALL, "Generic All"),
    TokenEntry::new("GR", ace_right::GENERIC_READ, "Generic Read"),
    TokenEntry::new("GW", ace_right::GENERIC_WRITE, "Generic Write"),
    TokenEntry::new("GX", ace_right::GENERIC_EXECUTE, "Generic Execute"),
    TokenEntry::new("RC", ace_right::READ_CONTROL, "Read Permissions"),
    TokenEntry::new("SD", ace_right::DELETE, "Delete"),
    TokenEntry::new("WD", ace_right::WRITE_DAC, "Modify Permissions"),
    TokenEntry::new("WO", ace_right::WRITE_OWNER, "Modify Owner"),
    TokenEntry::new("RP", ace_right::READ_PROPERTY, "Read All Properties"),
    TokenEntry::new("WP", ace_right::WRITE_PROPERTY, "Write All Properties"),
    TokenEntry::new("CC", ace_right::CREATE_CHILD, "Create All Child Objects"),
    TokenEntry::new("DC", ace_right::DELETE_CHILD, "Delete All Child Objects"),
    TokenEntry::new("LC", ace_right::LIST_CHILDREN, "List Contents"),
    TokenEntry::new("SW", ace_right::SELF_WRITE, "All Validated Writes"),
    TokenEntry::new("LO", ace_right::LIST_OBJECT, "List Object"),
    TokenEntry::new("DT", ace_right::DELETE_TREE, "Delete Subtree"),
    TokenEntry::new("CR", ace_right::CONTROL_ACCESS, "All Extended Rights"),
    TokenEntry::new("FA", ace_right::FILE_ALL, "File All Access"),
    TokenEntry::new("FR", ace_right::FILE_READ, "File Generic Read"),
    TokenEntry::new("FW", ace_right::FILE_WRITE, "File Generic Write"),
    TokenEntry::new("FX", ace_right::FILE_EXECUTE, "File Generic Execute"),
    TokenEntry::new("KA", ace_right::KEY_ALL, "Key All Access"),
    TokenEntry::new("KR", ace_right::KEY_READ, "Key Read"),
    TokenEntry::new("KW", ace_right::KEY_WRITE, "Key Write"),
    TokenEntry::new("KX", ace_right::KEY_EXECUTE, "Key Execute"),
]);

/// ACL flags, in the order they are serialized.
pub static ACL_FLAGS: TokenTable = TokenTable::new(&[
    TokenEntry::new("P", acl_flag::PROTECTED, "Protected"),
    TokenEntry::new("AR", acl_flag::MUST_INHERIT, "Auto Inherit Required"),
    TokenEntry::new("AI", acl_flag::INHERITED, "Auto Inherited"),
]);

#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_tables_are_positional() {
        for table in [&ACE_FLAGS, &ACE_RIGHTS] {
            for (index, entry) in table.entries().iter().enumerate() {
                assert_eq!(entry.bits, 1 << index, "{} is out of place", entry.token);
            }
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(ACE_RIGHTS.lookup("ga").unwrap().bits, ace_right::GENERIC_ALL);
        assert_eq!(ACE_TYPES.lookup("oa").unwrap().bits, ace_type::OBJECT_ACCESS_ALLOWED);
        assert!(ACE_FLAGS.lookup("ZZ").is_none());
    }

    #[test]
    fn decode_pairs_accumulates() {
        assert_eq!(
            ACE_FLAGS.decode_pairs("OICI").unwrap(),
            ace_flag::CONTAINER_INHERIT | ace_flag::OBJECT_INHERIT
        );
        assert_eq!(ACE_RIGHTS.decode_pairs("").unwrap(), 0);
    }

    #[test]
    fn decode_pairs_reports_offending_chunk() {
        let err = ACE_FLAGS.decode_pairs("CIZZ").unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::MalformedToken);
        assert_eq!(err.fragment, "ZZ");

        let err = ACE_FLAGS.decode_pairs("CIO").unwrap_err();
        assert_eq!(err.fragment, "O");
    }

    #[test]
    fn known_bits_cover_table() {
        assert_eq!(ACE_RIGHTS.known_bits(), (1 << 25) - 1);
        assert_eq!(ACL_FLAGS.known_bits(), 0b111);
    }
}
