use crate::constants::BASE_DOMAIN;
use ecsign_core::utils::Redact;
use ecsign_core::{Error, Result, SigningCredential};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Marketplaces supported by the Product Advertising API.
///
/// Each locale maps to its own service endpoint; the signature is computed
/// over that endpoint's host, so a locale mismatch makes every request fail
/// verification.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    /// United Kingdom (`co.uk`)
    CoUk,
    /// United States (`com`)
    Com,
    /// Canada (`ca`)
    Ca,
    /// Brazil (`com.br`)
    ComBr,
    /// Germany (`de`)
    De,
    /// Spain (`es`)
    Es,
    /// France (`fr`)
    Fr,
    /// India (`in`)
    In,
    /// Italy (`it`)
    It,
    /// Japan (`co.jp`)
    CoJp,
    /// Mexico (`com.mx`)
    ComMx,
}

impl Locale {
    const ALL: &'static [Locale] = &[
        Locale::CoUk,
        Locale::Com,
        Locale::Ca,
        Locale::ComBr,
        Locale::De,
        Locale::Es,
        Locale::Fr,
        Locale::In,
        Locale::It,
        Locale::CoJp,
        Locale::ComMx,
    ];

    /// The marketplace suffix, e.g. `co.uk`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::CoUk => "co.uk",
            Locale::Com => "com",
            Locale::Ca => "ca",
            Locale::ComBr => "com.br",
            Locale::De => "de",
            Locale::Es => "es",
            Locale::Fr => "fr",
            Locale::In => "in",
            Locale::It => "it",
            Locale::CoJp => "co.jp",
            Locale::ComMx => "com.mx",
        }
    }

    /// The service endpoint host for this marketplace,
    /// e.g. `webservices.amazon.co.uk`.
    pub fn host(&self) -> String {
        format!("{}.{}", BASE_DOMAIN, self.as_str())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Locale::ALL
            .iter()
            .find(|l| l.as_str() == s)
            .copied()
            .ok_or_else(|| {
                Error::config_invalid(format!(
                    "invalid locale \"{s}\", possible locales are: {}",
                    Locale::ALL
                        .iter()
                        .map(|l| l.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Debug for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credential that holds the access key, secret key and associate tag.
#[derive(Clone)]
pub struct Credential {
    /// Access key for the Product Advertising API.
    pub access_key: String,
    /// Secret key. Sensitive: never logged, never part of any output.
    pub secret_key: String,
    /// Associate tag identifying the caller's affiliate account.
    pub associate_tag: String,
    /// Marketplace the requests are signed for.
    pub locale: Locale,
}

impl Credential {
    /// Create a new credential, validating it eagerly.
    ///
    /// Fails fast with a configuration error when the access key or secret
    /// key is empty, instead of failing on the first signed request.
    pub fn new(
        access_key: &str,
        secret_key: &str,
        associate_tag: &str,
        locale: Locale,
    ) -> Result<Self> {
        if access_key.is_empty() || secret_key.is_empty() {
            return Err(Error::config_invalid(
                "no access key or secret key has been set",
            ));
        }

        Ok(Self {
            access_key: access_key.to_string(),
            secret_key: secret_key.to_string(),
            associate_tag: associate_tag.to_string(),
            locale,
        })
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key", &Redact::from(&self.access_key))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("associate_tag", &self.associate_tag)
            .field("locale", &self.locale)
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.access_key.is_empty() && !self.secret_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_str() {
        assert_eq!("co.uk".parse::<Locale>().expect("must parse"), Locale::CoUk);
        assert_eq!("com".parse::<Locale>().expect("must parse"), Locale::Com);
        assert_eq!("co.jp".parse::<Locale>().expect("must parse"), Locale::CoJp);

        let err = "xx".parse::<Locale>().unwrap_err();
        assert_eq!(err.kind(), ecsign_core::ErrorKind::ConfigInvalid);
        assert!(err.to_string().contains("co.uk"));
    }

    #[test]
    fn test_locale_host() {
        assert_eq!(Locale::Com.host(), "webservices.amazon.com");
        assert_eq!(Locale::CoUk.host(), "webservices.amazon.co.uk");
        assert_eq!(Locale::ComMx.host(), "webservices.amazon.com.mx");
    }

    #[test]
    fn test_credential_validates_eagerly() {
        assert!(Credential::new("ak", "sk", "tag-20", Locale::Com).is_ok());

        let err = Credential::new("", "sk", "tag-20", Locale::Com).unwrap_err();
        assert_eq!(err.kind(), ecsign_core::ErrorKind::ConfigInvalid);
        let err = Credential::new("ak", "", "tag-20", Locale::Com).unwrap_err();
        assert_eq!(err.kind(), ecsign_core::ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_credential_debug_redacts_secret() {
        let cred = Credential::new("AKIDEXAMPLEKEY", "super-secret-key", "tag-20", Locale::Com)
            .expect("must be valid");

        let repr = format!("{cred:?}");
        assert!(!repr.contains("super-secret-key"));
        assert!(repr.contains("tag-20"));
    }
}
