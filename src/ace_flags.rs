use core::fmt::{self, Display};
use core::str::FromStr;

use bitflags::bitflags;
use parsing::tables::{ACE_FLAGS, ace_flag};

use crate::{Error, utils};

bitflags! {
    /// Inheritance and audit flags of an access-control entry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AceFlags: u32 {
        /// `CI`: inherited by child containers.
        const CONTAINER_INHERIT = ace_flag::CONTAINER_INHERIT;
        /// `OI`: inherited by child objects.
        const OBJECT_INHERIT = ace_flag::OBJECT_INHERIT;
        /// `NP`: inheritance stops at the first generation.
        const NO_PROPAGATE = ace_flag::NO_PROPAGATE;
        /// `IO`: applies only to children.
        const INHERIT_ONLY = ace_flag::INHERIT_ONLY;
        /// `ID`: the entry was inherited.
        const INHERITED = ace_flag::INHERITED;
        /// `SA`: audit successful access.
        const AUDIT_SUCCESS = ace_flag::AUDIT_SUCCESS;
        /// `FA`: audit failed access.
        const AUDIT_FAILURE = ace_flag::AUDIT_FAILURE;
    }
}

impl AceFlags {
    /// Descriptions of the set flags, in canonical order.
    #[inline]
    pub fn descriptions(self) -> impl Iterator<Item = &'static str> {
        utils::contained_entries(&ACE_FLAGS, self.bits()).map(|entry| entry.description)
    }
}

impl Display for AceFlags {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        utils::write_tokens(f, &ACE_FLAGS, self.bits())
    }
}

impl FromStr for AceFlags {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_bits_retain(ACE_FLAGS.decode_pairs(s)?))
    }
}
