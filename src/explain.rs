//! Human readable rendering of SDDL strings.
//!
//! The renderer reads the raw text section by section without building the
//! typed model, so it also works on strings the parser rejects. Tokens with
//! no known description are written as they appear.
//!
//! ```rust
//! # use win_sddl::{ExplainOptions, explain};
//! let options = ExplainOptions {
//!     line_separator: "\n".into(),
//!     indent: "  ".into(),
//! };
//! let text = explain("O:BAD:(A;CI;GA;;;WD)", &options);
//! assert_eq!(
//!     text,
//!     "Owner: Built-in Administrators\n\
//!      DACL\n\
//!      ## 1 of 1\n  \
//!      Type: Access Allowed\n  \
//!      Inheritance: Container Inherit\n  \
//!      Permissions: Generic All\n  \
//!      Trustee: Everyone\n"
//! );
//! ```

use core::fmt::{self, Display};
use core::iter;

use parsing::decode_rights;
use parsing::tables::{ACE_FLAGS, ACE_RIGHTS, ACE_TYPES, TokenTable};
use tracing::trace;

use crate::{AceRights, Trustee, TrusteeResolver};

/// Separators used by [`explain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainOptions {
    /// Written after every line. Defaults to `"\r\n"`.
    pub line_separator: String,
    /// Written before every line of an entry. Defaults to `"\t"`.
    pub indent: String,
}

impl Default for ExplainOptions {
    #[inline]
    fn default() -> Self {
        Self {
            line_separator: "\r\n".to_owned(),
            indent: "\t".to_owned(),
        }
    }
}

/// Renders `sddl` without account lookups.
///
/// Never fails: unknown tokens are written verbatim.
#[must_use]
#[inline]
pub fn explain(sddl: &str, options: &ExplainOptions) -> String {
    Explanation {
        sddl,
        options,
        resolver: None,
    }
    .to_string()
}

/// Renders `sddl`, naming SID trustees through `resolver`.
///
/// Never fails: trustees the resolver cannot name are written verbatim.
#[must_use]
#[inline]
pub fn explain_with_resolver<R: TrusteeResolver>(
    sddl: &str,
    options: &ExplainOptions,
    resolver: &R,
) -> String {
    Explanation {
        sddl,
        options,
        resolver: Some(resolver),
    }
    .to_string()
}

struct Explanation<'a> {
    sddl: &'a str,
    options: &'a ExplainOptions,
    resolver: Option<&'a dyn TrusteeResolver>,
}

/// Sections of `sddl`: each one starts at the character before a colon.
///
/// Text ahead of the first section comes out as a section of its own.
fn sections(sddl: &str) -> impl Iterator<Item = &str> {
    let mut starts = sddl
        .match_indices(':')
        .filter_map(|(colon, _)| {
            sddl.get(..colon)
                .and_then(|head| head.char_indices().next_back())
                .map(|(start, _)| start)
        })
        .peekable();
    let first = starts.peek().copied().unwrap_or(sddl.len());
    let mut current = (first > 0).then_some(0).or_else(|| starts.next());
    iter::from_fn(move || {
        let start = current?;
        current = starts.next();
        sddl.get(start..current.unwrap_or(sddl.len()))
    })
}

/// Two-character chunks of `text`, the last one may be shorter.
fn pairs(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let split = rest.char_indices().nth(2).map_or(rest.len(), |(index, _)| index);
        let (chunk, tail) = rest.split_at(split);
        rest = tail;
        Some(chunk)
    })
}

fn describe<'a>(table: &TokenTable, token: &'a str) -> &'a str {
    table.lookup(token).map_or_else(
        || {
            trace!(token, "no description, written verbatim");
            token
        },
        |entry| entry.description,
    )
}

fn write_joined<I>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
    I: IntoIterator,
    I::Item: Display,
{
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            f.write_str("|")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Explanation<'_> {
    fn trustee_name(&self, token: &str) -> String {
        let Ok(trustee) = Trustee::from_abbreviation_or_sid(token) else {
            trace!(token, "unrecognized trustee, written verbatim");
            return token.to_owned();
        };
        let resolved = self
            .resolver
            .and_then(|resolver| trustee.with_display_name(resolver).ok());
        resolved
            .as_ref()
            .unwrap_or(&trustee)
            .display_name()
            .unwrap_or_else(|| token.to_owned())
    }

    fn write_line(&self, f: &mut fmt::Formatter<'_>, line: fmt::Arguments<'_>) -> fmt::Result {
        write!(f, "{line}{}", self.options.line_separator)
    }

    fn write_entry_line(&self, f: &mut fmt::Formatter<'_>, line: fmt::Arguments<'_>) -> fmt::Result {
        write!(f, "{}{line}{}", self.options.indent, self.options.line_separator)
    }

    fn write_rights(f: &mut fmt::Formatter<'_>, rights: &str) -> fmt::Result {
        let is_hex = rights.starts_with("0x") || rights.starts_with("0X");
        match decode_rights(rights) {
            Ok(bits) if is_hex => {
                let mask = AceRights::from_bits_retain(bits);
                let unnamed = bits & !ACE_RIGHTS.known_bits();
                let literal = (unnamed != 0).then(|| format!("{unnamed:#x}"));
                write_joined(f, mask.descriptions().map(str::to_owned).chain(literal))
            }
            _ => write_joined(f, pairs(rights).map(|chunk| describe(&ACE_RIGHTS, chunk))),
        }
    }

    fn write_acl(&self, f: &mut fmt::Formatter<'_>, body: &str) -> fmt::Result {
        let count = body.matches('(').count();
        for (index, ace) in body.split('(').skip(1).enumerate() {
            self.write_line(f, format_args!("# {} of {count}", index + 1))?;
            let mut fields = ace.trim_end_matches(')').split(';');
            let ace_type = fields.next().unwrap_or_default();
            let flags = fields.next().unwrap_or_default();
            let rights = fields.next().unwrap_or_default();
            let trustee = fields.nth(2).unwrap_or_default();

            self.write_entry_line(f, format_args!("Type: {}", describe(&ACE_TYPES, ace_type)))?;
            if !flags.is_empty() {
                write!(f, "{}Inheritance: ", self.options.indent)?;
                write_joined(f, pairs(flags).map(|chunk| describe(&ACE_FLAGS, chunk)))?;
                f.write_str(&self.options.line_separator)?;
            }
            write!(f, "{}Permissions: ", self.options.indent)?;
            Self::write_rights(f, rights)?;
            f.write_str(&self.options.line_separator)?;
            self.write_entry_line(f, format_args!("Trustee: {}", self.trustee_name(trustee)))?;
        }
        Ok(())
    }
}

impl Display for Explanation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in sections(self.sddl) {
            let mut chars = section.chars();
            let letter = chars.next();
            let Some(value) = chars.as_str().strip_prefix(':') else {
                trace!(section, "text outside any section, written verbatim");
                self.write_line(f, format_args!("{section}"))?;
                continue;
            };
            match letter {
                Some('O') => self.write_line(f, format_args!("Owner: {}", self.trustee_name(value)))?,
                Some('G') => self.write_line(f, format_args!("Group: {}", self.trustee_name(value)))?,
                Some('D') => {
                    self.write_line(f, format_args!("DACL"))?;
                    self.write_acl(f, value)?;
                }
                Some('S') => {
                    self.write_line(f, format_args!("SACL"))?;
                    self.write_acl(f, value)?;
                }
                _ => {
                    trace!(section, "unknown section, written verbatim");
                    self.write_line(f, format_args!("{section}"))?;
                }
            }
        }
        Ok(())
    }
}

#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DomainAndName, InMemoryResolver, SidType};
    use proptest::prelude::*;

    fn unix() -> ExplainOptions {
        ExplainOptions {
            line_separator: "\n".to_owned(),
            indent: "  ".to_owned(),
        }
    }

    #[test]
    fn sections_split_before_colons() {
        let found: Vec<_> = sections("O:BAG:SYD:(A;;GA;;;WD)S:").collect();
        assert_eq!(found, ["O:BA", "G:SY", "D:(A;;GA;;;WD)", "S:"]);
        assert_eq!(sections("").count(), 0);
    }

    #[test]
    fn leading_text_is_kept() {
        let found: Vec<_> = sections("XO:BA").collect();
        assert_eq!(found, ["X", "O:BA"]);
        assert_eq!(sections("garbage").collect::<Vec<_>>(), ["garbage"]);
        assert_eq!(explain("garbage", &unix()), "garbage\n");
        assert_eq!(explain("XO:BA", &unix()), "X\nOwner: Built-in Administrators\n");
        assert_eq!(explain("Ozz", &unix()), "Ozz\n");
    }

    proptest! {
        #[test]
        fn any_text_renders(text in prop_oneof![any::<String>(), "[OGDS:()A-Z;0-9\\-\u{e9}]*"]) {
            let rendered = explain(&text, &unix());
            prop_assert_eq!(rendered.is_empty(), text.is_empty());
        }
    }

    #[test]
    fn default_separators() {
        assert_eq!(
            explain("O:SY", &ExplainOptions::default()),
            "Owner: Local System\r\n"
        );
    }

    #[test]
    fn entries_are_numbered() {
        let text = explain("D:PAI(A;CIOI;FA;;;BA)(D;;FXFR;;;WD)", &unix());
        assert_eq!(
            text,
            "DACL\n\
             # 1 of 2\n  \
             Type: Access Allowed\n  \
             Inheritance: Container Inherit|Object Inherit\n  \
             Permissions: File All Access\n  \
             Trustee: Built-in Administrators\n\
             # 2 of 2\n  \
             Type: Access Denied\n  \
             Permissions: File Generic Execute|File Generic Read\n  \
             Trustee: Everyone\n"
        );
    }

    #[test]
    fn unknown_tokens_are_verbatim() {
        let text = explain("D:(XX;QQ;GAZZ;;;S-1-5-21-9)", &unix());
        assert_eq!(
            text,
            "DACL\n\
             # 1 of 1\n  \
             Type: XX\n  \
             Inheritance: QQ\n  \
             Permissions: Generic All|ZZ\n  \
             Trustee: S-1-5-21-9\n"
        );
    }

    #[test]
    fn hex_rights() {
        let text = explain("S:(AU;SA;0x40000011;;;WD)", &unix());
        assert!(
            text.contains("Permissions: Generic All|Read Permissions|0x40000000\n"),
            "{text}"
        );
        assert!(text.starts_with("SACL\n"), "{text}");
    }

    #[test]
    fn resolver_names_sids() {
        let resolver = InMemoryResolver::new().with_account(
            DomainAndName::new("CONTOSO", "alice"),
            "S-1-5-21-1-2-3-1104".parse().unwrap(),
            SidType::User,
        );
        let text = explain_with_resolver("O:S-1-5-21-1-2-3-1104", &unix(), &resolver);
        assert_eq!(text, "Owner: CONTOSO\\alice\n");
        let text = explain("O:S-1-5-21-1-2-3-1104", &unix());
        assert_eq!(text, "Owner: S-1-5-21-1-2-3-1104\n");
    }

    #[test]
    fn unavailable_resolver_falls_back() {
        let resolver = InMemoryResolver::unavailable("offline");
        assert_eq!(
            explain_with_resolver("G:DU", &unix(), &resolver),
            "Group: Domain Users\n"
        );
    }
}
