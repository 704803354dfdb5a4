/// Checks the SDDL SID grammar: `S` followed by one or more `-digits` groups.
///
/// The leading `S` is accepted in either case, as `ConvertStringSidToSid` does.
#[must_use]
#[inline]
pub fn is_sid_string(s: &str) -> bool {
    let mut parts = s.split('-');
    if !parts
        .next()
        .is_some_and(|head| head.eq_ignore_ascii_case("s"))
    {
        return false;
    }
    let mut groups = 0usize;
    for part in parts {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        groups += 1;
    }
    groups > 0
}

/// Checks the registry GUID form `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`.
#[must_use]
#[inline]
pub fn is_guid_string(s: &str) -> bool {
    const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];
    let mut parts = s.split('-');
    for len in GROUPS {
        match parts.next() {
            Some(part) if part.len() == len && part.bytes().all(|b| b.is_ascii_hexdigit()) => {}
            _ => return false,
        }
    }
    parts.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sid_grammar() {
        assert!(is_sid_string("S-1-5-32-544"));
        assert!(is_sid_string("s-1-5"));
        assert!(is_sid_string("S-1"));
        assert!(!is_sid_string("S"));
        assert!(!is_sid_string("S-"));
        assert!(!is_sid_string("S-1--5"));
        assert!(!is_sid_string("S-1-5-"));
        assert!(!is_sid_string("S-1-x"));
        assert!(!is_sid_string("X-1-5"));
        assert!(!is_sid_string("BA"));
    }

    #[test]
    fn guid_grammar() {
        assert!(is_guid_string("bf967aba-0de6-11d0-a285-00aa003049e2"));
        assert!(is_guid_string("BF967ABA-0DE6-11D0-A285-00AA003049E2"));
        assert!(!is_guid_string("bf967aba0de611d0a28500aa003049e2"));
        assert!(!is_guid_string("bf967aba-0de6-11d0-a285-00aa003049e2-00"));
        assert!(!is_guid_string("zf967aba-0de6-11d0-a285-00aa003049e2"));
        assert!(!is_guid_string(""));
    }
}
