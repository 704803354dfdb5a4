//! Well-known SIDs and their SDDL abbreviations.
//!
//! Source: https://learn.microsoft.com/windows/win32/secauthz/well-known-sids
//! and https://learn.microsoft.com/windows/win32/secauthz/sid-strings
//!
//! The table is indexed by the Windows `WELL_KNOWN_SID_TYPE` value. Account
//! domain SIDs have no fixed string: they are the domain SID followed by a
//! relative identifier.

/// One row of the well-known SID table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellKnownSid {
    /// `WELL_KNOWN_SID_TYPE` value.
    pub value: i32,
    /// Fixed SID string, if the SID does not depend on a domain or a session.
    pub sid: Option<&'static str>,
    /// Relative identifier appended to the domain SID for account domain SIDs.
    pub domain_rid: Option<u32>,
    /// SDDL abbreviation.
    pub abbreviation: Option<&'static str>,
    /// Display name.
    pub display_name: &'static str,
}

const fn fixed(
    value: i32,
    sid: &'static str,
    abbreviation: Option<&'static str>,
    display_name: &'static str,
) -> WellKnownSid {
    WellKnownSid {
        value,
        sid: Some(sid),
        domain_rid: None,
        abbreviation,
        display_name,
    }
}

const fn domain(
    value: i32,
    rid: u32,
    abbreviation: Option<&'static str>,
    display_name: &'static str,
) -> WellKnownSid {
    WellKnownSid {
        value,
        sid: None,
        domain_rid: Some(rid),
        abbreviation,
        display_name,
    }
}

/// Every well-known SID, ordered by `value`.
pub static WELL_KNOWN_SIDS: [WellKnownSid; 77] = [
    fixed(0, "S-1-0-0", None, "Null SID"),
    fixed(1, "S-1-1-0", Some("WD"), "Everyone"),
    fixed(2, "S-1-2-0", None, "Local"),
    fixed(3, "S-1-3-0", Some("CO"), "Creator Owner"),
    fixed(4, "S-1-3-1", Some("CG"), "Creator Group"),
    fixed(5, "S-1-3-2", None, "Creator Owner Server"),
    fixed(6, "S-1-3-3", None, "Creator Group Server"),
    fixed(7, "S-1-5", None, "NT Pseudo Domain"),
    fixed(8, "S-1-5-1", None, "Dialup"),
    fixed(9, "S-1-5-2", Some("NU"), "Network Logon User"),
    fixed(10, "S-1-5-3", None, "Batch"),
    fixed(11, "S-1-5-4", Some("IU"), "Interactively logged-on user"),
    fixed(12, "S-1-5-6", Some("SU"), "Service Logon User"),
    fixed(13, "S-1-5-7", Some("AN"), "Anonymous Logon"),
    fixed(14, "S-1-5-8", None, "Proxy"),
    fixed(15, "S-1-5-9", Some("ED"), "Enterprise Domain Controllers"),
    fixed(16, "S-1-5-10", Some("PS"), "Self"),
    fixed(17, "S-1-5-11", Some("AU"), "Authenticated Users"),
    fixed(18, "S-1-5-12", Some("RC"), "Restricted Code"),
    fixed(19, "S-1-5-13", None, "Terminal Server User"),
    fixed(20, "S-1-5-14", None, "Remote Interactive Logon"),
    WellKnownSid {
        value: 21,
        sid: None,
        domain_rid: None,
        abbreviation: None,
        display_name: "Logon Session",
    },
    fixed(22, "S-1-5-18", Some("SY"), "Local System"),
    fixed(23, "S-1-5-19", Some("LS"), "Local Service Account"),
    fixed(24, "S-1-5-20", Some("NS"), "Network Service Account"),
    fixed(25, "S-1-5-32", None, "Builtin Domain"),
    fixed(26, "S-1-5-32-544", Some("BA"), "Built-in Administrators"),
    fixed(27, "S-1-5-32-545", Some("BU"), "Built-in Users"),
    fixed(28, "S-1-5-32-546", Some("BG"), "Built-in Guests"),
    fixed(29, "S-1-5-32-547", Some("PU"), "Power Users"),
    fixed(30, "S-1-5-32-548", Some("AO"), "Account Operators"),
    fixed(31, "S-1-5-32-549", Some("SO"), "Server Operators"),
    fixed(32, "S-1-5-32-550", Some("PO"), "Printer Operators"),
    fixed(33, "S-1-5-32-551", Some("BO"), "Backup Operators"),
    fixed(34, "S-1-5-32-552", Some("RE"), "Replicator"),
    fixed(35, "S-1-5-32-554", Some("RU"), "Alias to allow previous Windows 2000"),
    fixed(36, "S-1-5-32-555", Some("RD"), "Terminal Server Users"),
    fixed(37, "S-1-5-32-556", Some("NO"), "Network Configuration Operators"),
    domain(38, 500, Some("LA"), "Local Administrator"),
    domain(39, 501, Some("LG"), "Local Guest"),
    domain(40, 502, None, "Kerberos Ticket Granting Account"),
    domain(41, 512, Some("DA"), "Domain Administrators"),
    domain(42, 513, Some("DU"), "Domain Users"),
    domain(43, 514, Some("DG"), "Domain Guests"),
    domain(44, 515, Some("DC"), "Domain Computers"),
    domain(45, 516, Some("DD"), "Domain Controllers"),
    domain(46, 517, Some("CA"), "Certificate Server Administrators"),
    domain(47, 518, Some("SA"), "Schema Administrators"),
    domain(48, 519, Some("EA"), "Enterprise Administrators"),
    domain(49, 520, Some("PA"), "Group Policy Administrators"),
    domain(50, 553, Some("RS"), "RAS Servers group"),
    fixed(51, "S-1-5-64-10", None, "NTLM Authentication"),
    fixed(52, "S-1-5-64-21", None, "Digest Authentication"),
    fixed(53, "S-1-5-64-14", None, "SChannel Authentication"),
    fixed(54, "S-1-5-15", None, "This Organization"),
    fixed(55, "S-1-5-1000", None, "Other Organization"),
    fixed(56, "S-1-5-32-557", None, "Incoming Forest Trust Builders"),
    fixed(57, "S-1-5-32-558", Some("MU"), "Performance Monitor Users"),
    fixed(58, "S-1-5-32-559", Some("LU"), "Performance Log Users"),
    fixed(59, "S-1-5-32-560", None, "Windows Authorization Access Group"),
    fixed(60, "S-1-5-32-561", None, "Terminal Server License Servers"),
    fixed(61, "S-1-5-32-562", None, "Distributed COM Users"),
    fixed(62, "S-1-5-32-568", Some("IS"), "IIS_IUSRS"),
    fixed(63, "S-1-5-17", None, "IUSR"),
    fixed(64, "S-1-5-32-569", Some("CY"), "Cryptographic Operators"),
    fixed(65, "S-1-16-0", None, "Untrusted Mandatory Level"),
    fixed(66, "S-1-16-4096", Some("LW"), "Low Mandatory Level"),
    fixed(67, "S-1-16-8192", Some("ME"), "Medium Mandatory Level"),
    fixed(68, "S-1-16-12288", Some("HI"), "High Mandatory Level"),
    fixed(69, "S-1-16-16384", Some("SI"), "System Mandatory Level"),
    fixed(70, "S-1-5-33", Some("WR"), "Write Restricted Code"),
    fixed(71, "S-1-3-4", Some("OW"), "Owner Rights"),
    domain(72, 571, None, "Cacheable Principals Group"),
    domain(73, 572, None, "Non-cacheable Principals Group"),
    domain(74, 498, Some("RO"), "Enterprise Read-only Domain Controllers"),
    domain(75, 521, None, "Read-only Domain Controllers"),
    fixed(76, "S-1-5-32-573", Some("ER"), "Event Log Readers"),
];

/// Finds the row of an SDDL abbreviation, ignoring ASCII case.
#[must_use]
#[inline]
pub fn by_abbreviation(abbreviation: &str) -> Option<&'static WellKnownSid> {
    WELL_KNOWN_SIDS.iter().find(|entry| {
        entry
            .abbreviation
            .is_some_and(|known| known.eq_ignore_ascii_case(abbreviation))
    })
}

/// Finds the row whose fixed SID string equals `sid`, ignoring ASCII case.
#[must_use]
#[inline]
pub fn by_sid(sid: &str) -> Option<&'static WellKnownSid> {
    WELL_KNOWN_SIDS
        .iter()
        .find(|entry| entry.sid.is_some_and(|known| known.eq_ignore_ascii_case(sid)))
}

/// Finds the row of a `WELL_KNOWN_SID_TYPE` value.
#[must_use]
#[inline]
pub fn by_value(value: i32) -> Option<&'static WellKnownSid> {
    usize::try_from(value)
        .ok()
        .and_then(|index| WELL_KNOWN_SIDS.get(index))
}

#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::is_sid_string;

    #[test]
    fn table_is_indexed_by_value() {
        for (index, entry) in WELL_KNOWN_SIDS.iter().enumerate() {
            assert_eq!(usize::try_from(entry.value).unwrap(), index);
        }
    }

    #[test]
    fn fixed_sids_are_valid() {
        for sid in WELL_KNOWN_SIDS.iter().filter_map(|entry| entry.sid) {
            assert!(is_sid_string(sid), "{sid} is not a SID string");
        }
    }

    #[test]
    fn abbreviations_are_unique() {
        let abbreviations: Vec<_> = WELL_KNOWN_SIDS
            .iter()
            .filter_map(|entry| entry.abbreviation)
            .collect();
        for (index, abbreviation) in abbreviations.iter().enumerate() {
            assert!(
                !abbreviations.iter().skip(index + 1).any(|other| other == abbreviation),
                "{abbreviation} is duplicated"
            );
        }
    }

    #[test]
    fn lookups() {
        assert_eq!(by_abbreviation("ba").unwrap().sid, Some("S-1-5-32-544"));
        assert_eq!(by_sid("s-1-5-18").unwrap().abbreviation, Some("SY"));
        assert_eq!(by_abbreviation("DA").unwrap().domain_rid, Some(512));
        assert!(by_abbreviation("ZZ").is_none());
        assert!(by_value(77).is_none());
        assert!(by_value(-1).is_none());
    }
}
