//! Lexical layer of the `win-sddl` project.
//!
//! Splits SDDL strings into borrowed raw pieces and checks every token
//! against the static tables. It allocates nothing and is shared by the
//! `win-sddl` crate and its `sddl!` macro.
#![cfg_attr(not(feature = "std"), no_std)]

mod ace;
mod acl;
mod descriptor;
mod error;
mod sid;
pub mod tables;
pub mod well_known;

pub use ace::{ACE_FIELD_COUNT, RawAce, TrusteeToken, decode_rights, parse_ace, parse_trustee};
pub use acl::{AceTokens, RawAcl, parse_acl};
pub use descriptor::{RawDescriptor, parse_descriptor, validate_sddl};
pub use error::{SyntaxError, SyntaxErrorKind};
pub use sid::{is_guid_string, is_sid_string};
