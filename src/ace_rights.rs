use core::fmt::{self, Display};
use core::str::FromStr;

use bitflags::bitflags;
use parsing::decode_rights;
use parsing::tables::{ACE_RIGHTS, ace_right};

use crate::{Error, utils};

bitflags! {
    /// Access rights of an access-control entry.
    ///
    /// Bit `n` is the right at position `n` of the rights table. A mask read
    /// from a `0x` literal keeps every bit, including bits with no token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AceRights: u32 {
        /// `GA`
        const GENERIC_ALL = ace_right::GENERIC_ALL;
        /// `GR`
        const GENERIC_READ = ace_right::GENERIC_READ;
        /// `GW`
        const GENERIC_WRITE = ace_right::GENERIC_WRITE;
        /// `GX`
        const GENERIC_EXECUTE = ace_right::GENERIC_EXECUTE;
        /// `RC`
        const READ_CONTROL = ace_right::READ_CONTROL;
        /// `SD`
        const DELETE = ace_right::DELETE;
        /// `WD`
        const WRITE_DAC = ace_right::WRITE_DAC;
        /// `WO`
        const WRITE_OWNER = ace_right::WRITE_OWNER;
        /// `RP`
        const READ_PROPERTY = ace_right::READ_PROPERTY;
        /// `WP`
        const WRITE_PROPERTY = ace_right::WRITE_PROPERTY;
        /// `CC`
        const CREATE_CHILD = ace_right::CREATE_CHILD;
        /// `DC`
        const DELETE_CHILD = ace_right::DELETE_CHILD;
        /// `LC`
        const LIST_CHILDREN = ace_right::LIST_CHILDREN;
        /// `SW`
        const SELF_WRITE = ace_right::SELF_WRITE;
        /// `LO`
        const LIST_OBJECT = ace_right::LIST_OBJECT;
        /// `DT`
        const DELETE_TREE = ace_right::DELETE_TREE;
        /// `CR`
        const CONTROL_ACCESS = ace_right::CONTROL_ACCESS;
        /// `FA`
        const FILE_ALL = ace_right::FILE_ALL;
        /// `FR`
        const FILE_READ = ace_right::FILE_READ;
        /// `FW`
        const FILE_WRITE = ace_right::FILE_WRITE;
        /// `FX`
        const FILE_EXECUTE = ace_right::FILE_EXECUTE;
        /// `KA`
        const KEY_ALL = ace_right::KEY_ALL;
        /// `KR`
        const KEY_READ = ace_right::KEY_READ;
        /// `KW`
        const KEY_WRITE = ace_right::KEY_WRITE;
        /// `KX`
        const KEY_EXECUTE = ace_right::KEY_EXECUTE;
    }
}

impl AceRights {
    /// Every named right set in the mask, one flag per item, ascending.
    ///
    /// Bits with no token are skipped.
    #[inline]
    pub fn rights_iter(self) -> impl Iterator<Item = Self> {
        utils::contained_entries(&ACE_RIGHTS, self.bits()).map(|entry| Self::from_bits_retain(entry.bits))
    }

    /// SDDL token of a single right, `None` for an empty or combined mask.
    #[must_use]
    #[inline]
    pub fn token(self) -> Option<&'static str> {
        ACE_RIGHTS.by_bits(self.bits()).map(|entry| entry.token)
    }

    /// Descriptions of the named rights, ascending.
    #[inline]
    pub fn descriptions(self) -> impl Iterator<Item = &'static str> {
        utils::contained_entries(&ACE_RIGHTS, self.bits()).map(|entry| entry.description)
    }

    /// Whether the mask holds bits with no token.
    #[must_use]
    #[inline]
    pub const fn has_unnamed_bits(self) -> bool {
        self.bits() & !Self::all().bits() != 0
    }
}

impl Display for AceRights {
    /// Tokens in canonical order, or a `0x` literal when some bit has no token.
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_unnamed_bits() {
            write!(f, "{:#x}", self.bits())
        } else {
            utils::write_tokens(f, &ACE_RIGHTS, self.bits())
        }
    }
}

impl FromStr for AceRights {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_bits_retain(decode_rights(s)?))
    }
}

#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
#[cfg(test)]
pub mod test {
    use super::*;
    use proptest::prelude::*;

    pub fn arb_ace_rights() -> impl Strategy<Value = AceRights> {
        prop_oneof![
            4 => any::<u32>().prop_map(AceRights::from_bits_truncate),
            1 => any::<u32>().prop_map(AceRights::from_bits_retain),
        ]
    }

    #[test]
    fn enumerates_ascending() {
        let rights: AceRights = "WPRPCC".parse().unwrap();
        let tokens: Vec<_> = rights.rights_iter().filter_map(AceRights::token).collect();
        assert_eq!(tokens, ["RP", "WP", "CC"]);
        assert_eq!(rights.to_string(), "RPWPCC");
    }

    #[test]
    fn enumerate_skips_unnamed_bits() {
        let rights = AceRights::from_bits_retain(AceRights::KEY_READ.bits() | 1 << 30);
        assert_eq!(rights.rights_iter().collect::<Vec<_>>(), [AceRights::KEY_READ]);
        assert_eq!(AceRights::empty().rights_iter().count(), 0);
    }

    #[test]
    fn hex_literals() {
        let rights: AceRights = "0x1F".parse().unwrap();
        assert_eq!(rights.to_string(), "GAGRGWGXRC");

        let named: AceRights = "0x1f01ff".parse().unwrap();
        assert!(!named.has_unnamed_bits());
        assert_eq!(named.to_string(), "GAGRGWGXRCSDWDWORPCRFAFRFWFX");

        let raw: AceRights = "0x40000001".parse().unwrap();
        assert!(raw.has_unnamed_bits());
        assert_eq!(raw.to_string(), "0x40000001");
    }

    #[test]
    fn unknown_token() {
        assert!(matches!(
            "GAZZ".parse::<AceRights>(),
            Err(Error::MalformedToken { token }) if token == "ZZ"
        ));
    }

    proptest! {
        #[test]
        fn display_then_parse(rights in arb_ace_rights()) {
            prop_assert_eq!(rights.to_string().parse::<AceRights>().unwrap(), rights);
        }
    }
}
