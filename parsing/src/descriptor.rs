use crate::{RawAcl, SyntaxError, SyntaxErrorKind, TrusteeToken, parse_acl, parse_trustee};

/// Section prefixes in the only order they may appear.
const SECTION_ORDER: [u8; 4] = [b'O', b'G', b'D', b'S'];

/// A security descriptor string split into its sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawDescriptor<'a> {
    /// `O:` value.
    pub owner: Option<TrusteeToken<'a>>,
    /// `G:` value.
    pub group: Option<TrusteeToken<'a>>,
    /// `D:` body; `None` when the section is missing or empty.
    pub dacl: Option<RawAcl<'a>>,
    /// `S:` body; `None` when the section is missing or empty.
    pub sacl: Option<RawAcl<'a>>,
}

/// Splits `text` into `(prefix, value)` sections, checking the top-level layout.
fn split_sections(text: &str) -> Result<[Option<&str>; 4], SyntaxError<'_>> {
    let mut sections = [None; 4];
    let mut next_slot = 0;
    let mut rest = text;
    while !rest.is_empty() {
        let malformed = SyntaxError::new(SyntaxErrorKind::MalformedSecurityDescriptor, rest);
        let (prefix, tail) = rest.split_at_checked(2).ok_or(malformed)?;
        let &[letter, b':'] = prefix.as_bytes() else {
            return Err(malformed);
        };
        let slot = SECTION_ORDER
            .iter()
            .position(|&known| known == letter)
            .filter(|&slot| slot >= next_slot)
            .ok_or(malformed)?;
        // A value runs up to the letter that precedes the next colon.
        let end = match tail.find(':') {
            Some(colon) => tail
                .get(..colon)
                .and_then(|head| head.char_indices().next_back())
                .map(|(start, _)| start)
                .ok_or(malformed)?,
            None => tail.len(),
        };
        let (value, after) = tail.split_at_checked(end).ok_or(malformed)?;
        if let Some(section) = sections.get_mut(slot) {
            *section = Some(value);
        }
        next_slot = slot + 1;
        rest = after;
    }
    Ok(sections)
}

fn section_trustee(value: Option<&str>) -> Result<Option<TrusteeToken<'_>>, SyntaxError<'_>> {
    match value {
        None => Ok(None),
        Some("") => Err(SyntaxError::new(
            SyntaxErrorKind::MalformedSecurityDescriptor,
            "",
        )),
        Some(value) => parse_trustee(value).map(Some),
    }
}

fn section_acl(value: Option<&str>) -> Result<Option<RawAcl<'_>>, SyntaxError<'_>> {
    match value {
        None | Some("") => Ok(None),
        Some(body) => parse_acl(body).map(Some),
    }
}

/// Parses the top-level layout `[O:owner][G:group][D:dacl][S:sacl]`.
///
/// ACE contents are not decoded here; iterate [`RawAcl::entries`] for that.
///
/// # Errors
/// - [`SyntaxErrorKind::MalformedSecurityDescriptor`] for unknown, duplicated
///   or out-of-order sections, leftover input, or an empty owner or group.
/// - Trustee errors for the owner and group, ACL shape errors for the bodies.
#[inline]
pub fn parse_descriptor(text: &str) -> Result<RawDescriptor<'_>, SyntaxError<'_>> {
    let [owner, group, dacl, sacl] = split_sections(text)?;
    Ok(RawDescriptor {
        owner: section_trustee(owner)?,
        group: section_trustee(group)?,
        dacl: section_acl(dacl)?,
        sacl: section_acl(sacl)?,
    })
}

/// Fully validates a security descriptor string, entries included.
///
/// # Errors
/// The first error found, in textual order.
#[inline]
pub fn validate_sddl(text: &str) -> Result<(), SyntaxError<'_>> {
    let descriptor = parse_descriptor(text)?;
    for acl in [descriptor.dacl, descriptor.sacl].into_iter().flatten() {
        for entry in acl.entries() {
            entry?;
        }
    }
    Ok(())
}

#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_all_sections() {
        let descriptor = parse_descriptor("O:BAG:SYD:(A;;GA;;;WD)S:(AU;SA;GA;;;WD)").unwrap();
        assert!(matches!(descriptor.owner, Some(TrusteeToken::WellKnown(entry)) if entry.abbreviation == Some("BA")));
        assert!(matches!(descriptor.group, Some(TrusteeToken::WellKnown(entry)) if entry.abbreviation == Some("SY")));
        assert_eq!(descriptor.dacl.unwrap().ace_tokens().count(), 1);
        assert_eq!(descriptor.sacl.unwrap().ace_tokens().count(), 1);
    }

    #[test]
    fn sid_owner_before_group() {
        let descriptor = parse_descriptor("O:S-1-5-21-1-2-3-500G:DU").unwrap();
        assert_eq!(descriptor.owner, Some(TrusteeToken::Sid("S-1-5-21-1-2-3-500")));
    }

    #[test]
    fn empty_input_and_empty_acl() {
        assert_eq!(parse_descriptor("").unwrap(), RawDescriptor::default());
        assert_eq!(parse_descriptor("D:").unwrap().dacl, None);
    }

    #[test]
    fn layout_rejections() {
        for text in [
            "G:SYO:BA",
            "O:BAO:BA",
            "X:BA",
            "O:",
            "O::",
            "O:BAX:SY",
            "BA",
            "D:(A;;GA;;;WD)junk",
        ] {
            let err = parse_descriptor(text).unwrap_err();
            assert!(
                matches!(
                    err.kind,
                    SyntaxErrorKind::MalformedSecurityDescriptor | SyntaxErrorKind::MalformedAcl
                ),
                "{text} gave {err}"
            );
        }
    }

    #[test]
    fn multibyte_before_colon_is_rejected() {
        for text in ["O:\u{e9}:", "D:(A;;GA;;;WD)\u{e9}:", "\u{e9}:BA", "O:BA\u{1f600}:SY"] {
            assert_eq!(
                parse_descriptor(text).unwrap_err().kind,
                SyntaxErrorKind::MalformedSecurityDescriptor,
                "{text}"
            );
            assert!(validate_sddl(text).is_err(), "{text}");
        }
    }

    #[test]
    fn validate_reaches_entries() {
        assert!(validate_sddl("D:PAI(A;CI;FA;;;BA)(D;;FX;;;WD)").is_ok());
        assert_eq!(
            validate_sddl("D:(A;;GA;;;WD)(A;ZZ;GA;;;WD)").unwrap_err().kind,
            SyntaxErrorKind::MalformedToken
        );
    }
}
