//! Well-known SID categories
//!
//! Source: https://learn.microsoft.com/windows/win32/api/winnt/ne-winnt-well_known_sid_type
//!
//! Each variant of [`WellKnownSidType`] has the value of the matching Windows
//! `WELL_KNOWN_SID_TYPE` constant. Categories of the account domain have no
//! fixed SID; a [`TrusteeResolver`](crate::TrusteeResolver) builds it from
//! the domain SID and [`WellKnownSidType::domain_rid`].

use core::fmt::{self, Display};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use parsing::well_known::{self, WELL_KNOWN_SIDS, WellKnownSid};

/// Category of a well-known security principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(i32)]
pub enum WellKnownSidType {
    /// S-1-0-0
    Null = 0,
    /// `WD`: Everyone (S-1-1-0)
    World = 1,
    /// S-1-2-0
    Local = 2,
    /// `CO`: Creator Owner (S-1-3-0)
    CreatorOwner = 3,
    /// `CG`: Creator Group (S-1-3-1)
    CreatorGroup = 4,
    /// S-1-3-2
    CreatorOwnerServer = 5,
    /// S-1-3-3
    CreatorGroupServer = 6,
    /// S-1-5
    NtAuthority = 7,
    /// S-1-5-1
    Dialup = 8,
    /// `NU`: S-1-5-2
    Network = 9,
    /// S-1-5-3
    Batch = 10,
    /// `IU`: S-1-5-4
    Interactive = 11,
    /// `SU`: S-1-5-6
    Service = 12,
    /// `AN`: S-1-5-7
    Anonymous = 13,
    /// S-1-5-8
    Proxy = 14,
    /// `ED`: S-1-5-9
    EnterpriseControllers = 15,
    /// `PS`: S-1-5-10
    SelfSid = 16,
    /// `AU`: S-1-5-11
    AuthenticatedUser = 17,
    /// `RC`: S-1-5-12
    RestrictedCode = 18,
    /// S-1-5-13
    TerminalServer = 19,
    /// S-1-5-14
    RemoteLogonId = 20,
    /// Logon session, S-1-5-5-X-Y.
    LogonIds = 21,
    /// `SY`: S-1-5-18
    LocalSystem = 22,
    /// `LS`: S-1-5-19
    LocalService = 23,
    /// `NS`: S-1-5-20
    NetworkService = 24,
    /// S-1-5-32
    BuiltinDomain = 25,
    /// `BA`: S-1-5-32-544
    BuiltinAdministrators = 26,
    /// `BU`: S-1-5-32-545
    BuiltinUsers = 27,
    /// `BG`: S-1-5-32-546
    BuiltinGuests = 28,
    /// `PU`: S-1-5-32-547
    BuiltinPowerUsers = 29,
    /// `AO`: S-1-5-32-548
    BuiltinAccountOperators = 30,
    /// `SO`: S-1-5-32-549
    BuiltinSystemOperators = 31,
    /// `PO`: S-1-5-32-550
    BuiltinPrintOperators = 32,
    /// `BO`: S-1-5-32-551
    BuiltinBackupOperators = 33,
    /// `RE`: S-1-5-32-552
    BuiltinReplicator = 34,
    /// `RU`: S-1-5-32-554
    BuiltinPreWindows2000CompatibleAccess = 35,
    /// `RD`: S-1-5-32-555
    BuiltinRemoteDesktopUsers = 36,
    /// `NO`: S-1-5-32-556
    BuiltinNetworkConfigurationOperators = 37,
    /// `LA`: domain RID 500
    AccountAdministrator = 38,
    /// `LG`: domain RID 501
    AccountGuest = 39,
    /// Domain RID 502
    AccountKrbtgt = 40,
    /// `DA`: domain RID 512
    AccountDomainAdmins = 41,
    /// `DU`: domain RID 513
    AccountDomainUsers = 42,
    /// `DG`: domain RID 514
    AccountDomainGuests = 43,
    /// `DC`: domain RID 515
    AccountComputers = 44,
    /// `DD`: domain RID 516
    AccountControllers = 45,
    /// `CA`: domain RID 517
    AccountCertAdmins = 46,
    /// `SA`: domain RID 518
    AccountSchemaAdmins = 47,
    /// `EA`: domain RID 519
    AccountEnterpriseAdmins = 48,
    /// `PA`: domain RID 520
    AccountPolicyAdmins = 49,
    /// `RS`: domain RID 553
    AccountRasAndIasServers = 50,
    /// S-1-5-64-10
    NtlmAuthentication = 51,
    /// S-1-5-64-21
    DigestAuthentication = 52,
    /// S-1-5-64-14
    SChannelAuthentication = 53,
    /// S-1-5-15
    ThisOrganization = 54,
    /// S-1-5-1000
    OtherOrganization = 55,
    /// S-1-5-32-557
    BuiltinIncomingForestTrustBuilders = 56,
    /// `MU`: S-1-5-32-558
    BuiltinPerfMonitoringUsers = 57,
    /// `LU`: S-1-5-32-559
    BuiltinPerfLoggingUsers = 58,
    /// S-1-5-32-560
    BuiltinAuthorizationAccess = 59,
    /// S-1-5-32-561
    BuiltinTerminalServerLicenseServers = 60,
    /// S-1-5-32-562
    BuiltinDcomUsers = 61,
    /// `IS`: S-1-5-32-568
    BuiltinIUsers = 62,
    /// S-1-5-17
    IUser = 63,
    /// `CY`: S-1-5-32-569
    BuiltinCryptoOperators = 64,
    /// S-1-16-0
    UntrustedLabel = 65,
    /// `LW`: S-1-16-4096
    LowLabel = 66,
    /// `ME`: S-1-16-8192
    MediumLabel = 67,
    /// `HI`: S-1-16-12288
    HighLabel = 68,
    /// `SI`: S-1-16-16384
    SystemLabel = 69,
    /// `WR`: S-1-5-33
    WriteRestrictedCode = 70,
    /// `OW`: S-1-3-4
    CreatorOwnerRights = 71,
    /// Domain RID 571
    CacheablePrincipalsGroup = 72,
    /// Domain RID 572
    NonCacheablePrincipalsGroup = 73,
    /// `RO`: domain RID 498
    EnterpriseReadonlyControllers = 74,
    /// Domain RID 521
    AccountReadonlyControllers = 75,
    /// `ER`: S-1-5-32-573
    BuiltinEventLogReaders = 76,
}

impl WellKnownSidType {
    fn entry(self) -> Option<&'static WellKnownSid> {
        well_known::by_value(self.into())
    }

    pub(crate) fn from_entry(entry: &WellKnownSid) -> Option<Self> {
        Self::try_from(entry.value).ok()
    }

    /// Every category, ordered by value.
    #[inline]
    pub fn all() -> impl Iterator<Item = Self> {
        WELL_KNOWN_SIDS.iter().filter_map(Self::from_entry)
    }

    /// Fixed SID string, `None` for domain-relative and session categories.
    #[must_use]
    #[inline]
    pub fn sid(self) -> Option<&'static str> {
        self.entry().and_then(|entry| entry.sid)
    }

    /// Relative identifier appended to the account domain SID.
    #[must_use]
    #[inline]
    pub fn domain_rid(self) -> Option<u32> {
        self.entry().and_then(|entry| entry.domain_rid)
    }

    /// Two-letter SDDL abbreviation, if the category has one.
    #[must_use]
    #[inline]
    pub fn abbreviation(self) -> Option<&'static str> {
        self.entry().and_then(|entry| entry.abbreviation)
    }

    /// Default display name.
    #[must_use]
    #[inline]
    pub fn display_name(self) -> &'static str {
        self.entry().map_or("", |entry| entry.display_name)
    }

    /// Finds the category of an SDDL abbreviation, ignoring ASCII case.
    #[must_use]
    #[inline]
    pub fn from_abbreviation(abbreviation: &str) -> Option<Self> {
        well_known::by_abbreviation(abbreviation).and_then(Self::from_entry)
    }

    /// Finds the category whose fixed SID is `sid`, ignoring ASCII case.
    #[must_use]
    #[inline]
    pub fn from_sid(sid: &str) -> Option<Self> {
        well_known::by_sid(sid).and_then(Self::from_entry)
    }
}

impl Display for WellKnownSidType {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
