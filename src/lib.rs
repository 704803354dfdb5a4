//! # Security Descriptor Definition Language (SDDL) for Rust
//!
//! Parses SDDL strings into a typed access-control model and writes the model
//! back as canonical SDDL. The crate provides:
//! - [`SecurityDescriptor`]: owner, group, discretionary and system ACLs.
//! - [`AccessControlList`] and [`AccessControlEntry`]: ordered entries with
//!   their [`AceType`], [`AceFlags`], [`AceRights`] and object GUIDs.
//! - [`Trustee`]: the principal of an entry, as a SID, a well-known category
//!   ([`WellKnownSidType`]) or an account resolved through a
//!   [`TrusteeResolver`].
//! - [`SddlString`]: validated SDDL text, and the `sddl!` macro (feature
//!   `macro`) to validate a literal at compile time.
//! - [`explain`]: a best-effort human readable rendering.
//!
//! ## Canonical form
//! Parsing then formatting is stable, not byte-identical: tokens are written
//! upper case, flags and rights in table order, ACL flags as `P`, `AR`, `AI`,
//! well-known SIDs as their abbreviation and ACLs without entries are left out.
//! Entries always keep their order.
//!
//! ## Examples
//! ### Parse and inspect
//! ```rust
//! use win_sddl::{AceRights, AceType, SecurityDescriptor};
//!
//! let descriptor: SecurityDescriptor = "O:BAG:SYD:(A;;GA;;;WD)".parse().unwrap();
//! let entry = &descriptor.dacl().unwrap().entries()[0];
//! assert_eq!(entry.ace_type(), AceType::AccessAllowed);
//! assert_eq!(entry.rights(), AceRights::GENERIC_ALL);
//! assert_eq!(entry.trustee().display_name().as_deref(), Some("Everyone"));
//! ```
//!
//! ### Build and format
//! ```rust
//! use win_sddl::{AccessControlEntry, AccessControlList, AceFlags, AceRights, AceType, AclFlags, SecurityDescriptor};
//!
//! let dacl = AccessControlList::new()
//!     .with_flags(AclFlags::PROTECTED)
//!     .with_entry(
//!         AccessControlEntry::new(AceType::AccessAllowed, AceRights::FILE_ALL, "SY".parse().unwrap())
//!             .with_flags(AceFlags::CONTAINER_INHERIT | AceFlags::OBJECT_INHERIT),
//!     );
//! let descriptor = SecurityDescriptor::new().with_owner("BA".parse().unwrap()).with_dacl(dacl);
//! assert_eq!(descriptor.to_string(), "O:BAD:P(A;CIOI;FA;;;SY)");
//! ```
//!
//! ## Features
//! - `serde`: every model type serializes as its SDDL text.
//! - `macro`: re-exports the `sddl!` macro.
//!
//! ## Logging
//! Parse failures and resolver calls are reported through [`tracing`] at the
//! `debug` and `trace` levels. The crate never prints.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]

mod ace;
mod ace_flags;
mod ace_rights;
mod ace_type;
mod acl;
mod acl_flags;
mod domain_and_name;
mod error;
mod explain;
mod resolver;
mod sddl_string;
mod security_descriptor;
mod sid_string;
mod sid_type;
mod trustee;
pub mod internal;
pub mod well_known;

#[cfg(feature = "serde")]
mod serde_impl;

/// Internal utilities for formatting.
pub(crate) mod utils;

pub use ace::AccessControlEntry;
pub use ace_flags::AceFlags;
pub use ace_rights::AceRights;
pub use ace_type::AceType;
pub use acl::AccessControlList;
pub use acl_flags::AclFlags;
/// `DOMAIN\Name` of a resolved account.
pub use domain_and_name::{DomainAndName, DomainParsingError};
pub use error::{Error, ErrorKind};
pub use explain::{ExplainOptions, explain, explain_with_resolver};
pub use resolver::{InMemoryResolver, ResolveError, ResolvedAccount, TrusteeResolver};
pub use sddl_string::SddlString;
pub use security_descriptor::SecurityDescriptor;
pub use sid_string::SidString;
/// Rust representation of `SID_NAME_USE`.
pub use sid_type::SidType;
pub use trustee::Trustee;
pub use well_known::WellKnownSidType;

/// Builds a [`SddlString`] from a literal validated at compile time.
///
/// An invalid literal is a compile error.
#[cfg(feature = "macro")]
pub use sddl_macro::sddl;
