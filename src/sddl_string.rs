use core::fmt::{self, Debug, Display};
use core::ops::Deref;
use core::str::FromStr;
use std::borrow::Cow;

use parsing::validate_sddl;

use crate::{Error, ExplainOptions, SecurityDescriptor, TrusteeResolver, explain, utils};

/// Text already known to be a well-formed security descriptor string.
///
/// The text is kept as written. Use [`SddlString::to_security_descriptor`] to
/// work on the typed model, or the `sddl!` macro (feature `macro`) to check a
/// literal at compile time.
///
/// # Examples
/// ```rust
/// # use win_sddl::SddlString;
/// let sddl = SddlString::new("O:BAG:SYD:(A;;GA;;;WD)").unwrap();
/// let descriptor = sddl.to_security_descriptor().unwrap();
/// assert_eq!(descriptor.dacl().unwrap().len(), 1);
/// assert!(SddlString::new("D:(A;;GA;;;").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SddlString(Cow<'static, str>);

impl SddlString {
    /// Validates `value`, entries included.
    ///
    /// # Errors
    /// The same errors as parsing a [`SecurityDescriptor`].
    #[inline]
    pub fn new<S: Into<Cow<'static, str>>>(value: S) -> Result<Self, Error> {
        let value = value.into();
        validate_sddl(&value).map_err(Error::from)?;
        Ok(Self(value))
    }

    /// Wraps text that was validated at compile time.
    pub(crate) const fn from_validated(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }

    /// Text as written.
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Typed model of the descriptor.
    ///
    /// # Errors
    /// Only if the text stopped being valid, which validation rules out.
    #[inline]
    pub fn to_security_descriptor(&self) -> Result<SecurityDescriptor, Error> {
        self.0.parse()
    }

    /// Human readable rendering, see [`explain`](crate::explain()).
    #[must_use]
    #[inline]
    pub fn explain(&self, options: &ExplainOptions) -> String {
        explain::explain(&self.0, options)
    }

    /// Human readable rendering naming SIDs through `resolver`.
    #[must_use]
    #[inline]
    pub fn explain_with_resolver<R: TrusteeResolver>(&self, options: &ExplainOptions, resolver: &R) -> String {
        explain::explain_with_resolver(&self.0, options, resolver)
    }
}

impl Debug for SddlString {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        utils::debug_print::<Self>(stringify!(SddlString), self, f)
    }
}

impl Display for SddlString {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SddlString {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl From<&SecurityDescriptor> for SddlString {
    #[inline]
    fn from(value: &SecurityDescriptor) -> Self {
        Self(Cow::Owned(value.to_string()))
    }
}

impl Deref for SddlString {
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for SddlString {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::security_descriptor::test::arb_security_descriptor;
    use proptest::prelude::*;

    #[test]
    fn keeps_text_as_written() {
        let sddl: SddlString = "O:ba".parse().unwrap();
        assert_eq!(sddl.as_str(), "O:ba");
        assert_eq!(
            sddl.to_security_descriptor().unwrap().to_string(),
            "O:BA"
        );
    }

    #[test]
    fn validation_reaches_entries() {
        assert_eq!(
            SddlString::new("D:(A;;GA;;;WD)(A;;GA;;;QQ)").unwrap_err().kind(),
            ErrorKind::UnknownTrustee
        );
    }

    #[test]
    fn debug() {
        let sddl = SddlString::new("G:SY").unwrap();
        assert_eq!(format!("{sddl:?}"), "SddlString(G:SY)");
    }

    proptest! {
        #[test]
        fn descriptor_text_is_valid(descriptor in arb_security_descriptor()) {
            let sddl = SddlString::from(&descriptor);
            prop_assert!(SddlString::new(sddl.to_string()).is_ok());
            prop_assert_eq!(sddl.to_security_descriptor().unwrap(), descriptor);
        }
    }
}
