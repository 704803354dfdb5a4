use core::fmt::{self, Display};

use bitflags::bitflags;
use parsing::tables::{ACL_FLAGS, acl_flag};

use crate::utils;

bitflags! {
    /// Control flags written before the entries of an ACL.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AclFlags: u32 {
        /// `P`: inheritable entries from parents are blocked.
        const PROTECTED = acl_flag::PROTECTED;
        /// `AR`: auto-inheritance was requested.
        const MUST_INHERIT = acl_flag::MUST_INHERIT;
        /// `AI`: the ACL was set up for auto-inheritance.
        const INHERITED = acl_flag::INHERITED;
    }
}

impl Display for AclFlags {
    /// `P`, `AR` and `AI`, in that order.
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        utils::write_tokens(f, &ACL_FLAGS, self.bits())
    }
}
