use arrayvec::ArrayVec;

use crate::tables::{ACE_FLAGS, ACE_RIGHTS, ACE_TYPES, TokenEntry};
use crate::well_known::{self, WellKnownSid};
use crate::{SyntaxError, SyntaxErrorKind, is_guid_string, is_sid_string};

/// Number of `;` separated fields of an ACE string.
pub const ACE_FIELD_COUNT: usize = 6;

/// Trustee field, classified but not resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrusteeToken<'a> {
    /// A SID string matching `S(-[0-9]+)+`.
    Sid(&'a str),
    /// A well-known SDDL abbreviation.
    WellKnown(&'static WellKnownSid),
}

/// Classifies a trustee token.
///
/// Anything starting with `S-` must be a SID string, everything else must be
/// a known abbreviation.
///
/// # Errors
/// - [`SyntaxErrorKind::InvalidSidFormat`] for a bad SID string.
/// - [`SyntaxErrorKind::UnknownTrustee`] for an unknown abbreviation.
#[inline]
pub fn parse_trustee(token: &str) -> Result<TrusteeToken<'_>, SyntaxError<'_>> {
    let is_sid_like = token
        .get(..2)
        .is_some_and(|head| head.eq_ignore_ascii_case("s-"));
    if is_sid_like {
        return if is_sid_string(token) {
            Ok(TrusteeToken::Sid(token))
        } else {
            Err(SyntaxError::new(SyntaxErrorKind::InvalidSidFormat, token))
        };
    }
    well_known::by_abbreviation(token)
        .map(TrusteeToken::WellKnown)
        .ok_or(SyntaxError::new(SyntaxErrorKind::UnknownTrustee, token))
}

/// Decodes the rights field: either two-letter tokens or a `0x` hex literal.
///
/// # Errors
/// [`SyntaxErrorKind::MalformedToken`] for an unknown token or a bad literal.
#[inline]
pub fn decode_rights(text: &str) -> Result<u32, SyntaxError<'_>> {
    let hex = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"));
    match hex {
        Some(digits) => {
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(SyntaxError::new(SyntaxErrorKind::MalformedToken, text));
            }
            u32::from_str_radix(digits, 16)
                .map_err(|_| SyntaxError::new(SyntaxErrorKind::MalformedToken, text))
        }
        None => ACE_RIGHTS.decode_pairs(text),
    }
}

/// An ACE split into its fields, with every token checked against the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawAce<'a> {
    /// Entry of [`ACE_TYPES`].
    pub ace_type: &'static TokenEntry,
    /// Bits of [`ACE_FLAGS`].
    pub flags: u32,
    /// Bits of [`ACE_RIGHTS`], or a raw mask from a hex literal.
    pub rights: u32,
    /// Object GUID text, `None` when the field is empty.
    pub object_guid: Option<&'a str>,
    /// Inherited object GUID text, `None` when the field is empty.
    pub inherit_object_guid: Option<&'a str>,
    /// Trustee.
    pub trustee: TrusteeToken<'a>,
}

fn optional_guid(field: &str) -> Result<Option<&str>, SyntaxError<'_>> {
    if field.is_empty() {
        Ok(None)
    } else if is_guid_string(field) {
        Ok(Some(field))
    } else {
        Err(SyntaxError::new(SyntaxErrorKind::MalformedToken, field))
    }
}

/// Parses the text between the parentheses of one ACE.
///
/// # Errors
/// - [`SyntaxErrorKind::MalformedAce`] when there are not exactly six fields,
///   the type is not alphabetic or the trustee is empty.
/// - [`SyntaxErrorKind::UnknownAceType`] for an empty or unknown type.
/// - [`SyntaxErrorKind::MalformedToken`] for a bad flag, right or GUID.
/// - Trustee errors from [`parse_trustee`].
#[inline]
pub fn parse_ace(text: &str) -> Result<RawAce<'_>, SyntaxError<'_>> {
    let malformed = SyntaxError::new(SyntaxErrorKind::MalformedAce, text);
    let mut fields = ArrayVec::<&str, ACE_FIELD_COUNT>::new();
    for field in text.split(';') {
        fields.try_push(field).map_err(|_| malformed)?;
    }
    let [ace_type, flags, rights, object_guid, inherit_object_guid, trustee] =
        fields.into_inner().map_err(|_| malformed)?;

    if !ace_type.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(malformed);
    }
    let ace_type = ACE_TYPES
        .lookup(ace_type)
        .ok_or(SyntaxError::new(SyntaxErrorKind::UnknownAceType, ace_type))?;
    let flags = ACE_FLAGS.decode_pairs(flags)?;
    let rights = decode_rights(rights)?;
    let object_guid = optional_guid(object_guid)?;
    let inherit_object_guid = optional_guid(inherit_object_guid)?;
    if trustee.is_empty() {
        return Err(malformed);
    }
    let trustee = parse_trustee(trustee)?;

    Ok(RawAce {
        ace_type,
        flags,
        rights,
        object_guid,
        inherit_object_guid,
        trustee,
    })
}
