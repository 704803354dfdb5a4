use core::iter::FusedIterator;

use crate::tables::ACL_FLAGS;
use crate::{RawAce, SyntaxError, SyntaxErrorKind, parse_ace};

/// An ACL body split into its flags and its parenthesized ACE list.
///
/// The ACE list shape is checked on construction; the entries themselves are
/// decoded lazily by [`RawAcl::entries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawAcl<'a> {
    /// Bits of [`ACL_FLAGS`].
    pub flags: u32,
    ace_list: &'a str,
}

impl<'a> RawAcl<'a> {
    /// Text of every ACE, without the parentheses, in textual order.
    #[must_use]
    #[inline]
    pub const fn ace_tokens(&self) -> AceTokens<'a> {
        AceTokens {
            rest: self.ace_list,
        }
    }

    /// Decoded entries in textual order.
    #[inline]
    pub fn entries(self) -> impl Iterator<Item = Result<RawAce<'a>, SyntaxError<'a>>> {
        self.ace_tokens().map(parse_ace)
    }

    /// Whether the body holds no ACE.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.ace_list.is_empty()
    }
}

/// Iterator over the ACE strings of an ACE list.
#[derive(Debug, Clone)]
pub struct AceTokens<'a> {
    rest: &'a str,
}

impl<'a> Iterator for AceTokens<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (ace, rest) = self.rest.strip_prefix('(')?.split_once(')')?;
        self.rest = rest;
        Some(ace)
    }
}

impl FusedIterator for AceTokens<'_> {}

fn decode_acl_flags(text: &str) -> Result<u32, SyntaxError<'_>> {
    let mut flags = 0;
    let mut rest = text;
    'outer: while !rest.is_empty() {
        for len in [1, 2] {
            let entry = rest.get(..len).and_then(|chunk| ACL_FLAGS.lookup(chunk));
            if let Some(entry) = entry {
                flags |= entry.bits;
                rest = rest.get(len..).unwrap_or_default();
                continue 'outer;
            }
        }
        return Err(SyntaxError::new(SyntaxErrorKind::MalformedAcl, text));
    }
    Ok(flags)
}

fn check_ace_list(text: &str) -> bool {
    let mut rest = text;
    while !rest.is_empty() {
        let Some((ace, tail)) = rest.strip_prefix('(').and_then(|r| r.split_once(')')) else {
            return false;
        };
        if ace.is_empty() {
            return false;
        }
        rest = tail;
    }
    true
}

/// Parses the body following `D:` or `S:`.
///
/// An empty body gives an empty ACL. A non-empty body needs at least one ACE.
///
/// # Errors
/// [`SyntaxErrorKind::MalformedAcl`] when the flags prefix holds anything but
/// `P`, `AR` and `AI`, or when the rest is not a list of `(ace)` groups.
#[inline]
pub fn parse_acl(body: &str) -> Result<RawAcl<'_>, SyntaxError<'_>> {
    let (flags, ace_list) = body.split_at(body.find('(').unwrap_or(body.len()));
    let flags = decode_acl_flags(flags)?;
    if !body.is_empty() && (ace_list.is_empty() || !check_ace_list(ace_list)) {
        return Err(SyntaxError::new(SyntaxErrorKind::MalformedAcl, body));
    }
    Ok(RawAcl { flags, ace_list })
}

#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::acl_flag;

    #[test]
    fn flags_and_order() {
        let acl = parse_acl("PAI(A;CI;FA;;;BA)(D;;FX;;;WD)").unwrap();
        assert_eq!(acl.flags, acl_flag::PROTECTED | acl_flag::INHERITED);
        let tokens: Vec<_> = acl.ace_tokens().collect();
        assert_eq!(tokens, ["A;CI;FA;;;BA", "D;;FX;;;WD"]);
        assert!(acl.entries().all(|entry| entry.is_ok()));
    }

    #[test]
    fn flag_combinations() {
        assert_eq!(
            parse_acl("ARAIP(A;;GA;;;WD)").unwrap().flags,
            acl_flag::PROTECTED | acl_flag::MUST_INHERIT | acl_flag::INHERITED
        );
        assert_eq!(parse_acl("(A;;GA;;;WD)").unwrap().flags, 0);
    }

    #[test]
    fn empty_body() {
        let acl = parse_acl("").unwrap();
        assert!(acl.is_empty());
        assert_eq!(acl.flags, 0);
    }

    #[test]
    fn rejections() {
        for body in [
            "P",
            "PX(A;;GA;;;WD)",
            "PA(A;;GA;;;WD)",
            "A(A;;GA;;;WD)",
            "(A;;GA;;;WD)x",
            "(A;;GA;;;WD)()",
            "(A;;GA;;;WD",
            "junk",
        ] {
            assert_eq!(
                parse_acl(body).unwrap_err().kind,
                SyntaxErrorKind::MalformedAcl,
                "{body} should be rejected"
            );
        }
    }

    #[test]
    fn entry_errors_surface_lazily() {
        let acl = parse_acl("(A;;GA;;;WD)(X;;GA;;;WD)").unwrap();
        let kinds: Vec<_> = acl
            .entries()
            .map(|entry| entry.err().map(|err| err.kind))
            .collect();
        assert_eq!(kinds, [None, Some(SyntaxErrorKind::UnknownAceType)]);
    }
}
