use core::fmt;
use core::marker::PhantomData;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{
    AccessControlEntry, AccessControlList, AceFlags, AceRights, DomainAndName, SddlString,
    SecurityDescriptor, SidString, Trustee,
};

// Generic helper to deserialize types written as their SDDL text
fn deserialize_sddl_like<'de, D, T>(deserializer: D, expecting: &'static str) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    <T as FromStr>::Err: fmt::Display,
{
    struct Visitor<T> {
        expecting: &'static str,
        _marker: PhantomData<T>,
    }

    impl<T> de::Visitor<'_> for Visitor<T>
    where
        T: FromStr,
        <T as FromStr>::Err: fmt::Display,
    {
        type Value = T;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str(self.expecting)
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            T::from_str(v).map_err(|err| E::custom(format_args!("invalid value {v:?}: {err}")))
        }
    }

    deserializer.deserialize_str(Visitor::<T> {
        expecting,
        _marker: PhantomData,
    })
}

macro_rules! serde_via_str {
    ($($ty:ty => $expecting:literal),+ $(,)?) => {
        $(
            impl Serialize for $ty {
                #[inline]
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: Serializer,
                {
                    serializer.collect_str(self)
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                #[inline]
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    deserialize_sddl_like(deserializer, $expecting)
                }
            }
        )+
    };
}

serde_via_str! {
    SidString => "a SID string (e.g., \"S-1-5-32-544\")",
    Trustee => "a SID string or a well-known SDDL abbreviation",
    DomainAndName => "a domain and name in the format 'DOMAIN\\NAME'",
    AceFlags => "SDDL ACE flags (e.g., \"CIOI\")",
    AceRights => "SDDL ACE rights (e.g., \"GAGR\" or \"0x1f01ff\")",
    AccessControlEntry => "an SDDL ACE (e.g., \"A;;GA;;;WD\")",
    AccessControlList => "an SDDL ACL body (e.g., \"P(A;;GA;;;WD)\")",
    SecurityDescriptor => "an SDDL security descriptor string",
    SddlString => "an SDDL security descriptor string",
}
