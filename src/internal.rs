//! Support items for the `sddl!` macro. Not part of the public API.
#![doc(hidden)]

use crate::SddlString;

/// Wraps a literal the macro has already validated.
#[must_use]
#[inline]
pub const fn sddl_string_from_validated(value: &'static str) -> SddlString {
    SddlString::from_validated(value)
}
