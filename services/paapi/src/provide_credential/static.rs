use crate::Credential;
use async_trait::async_trait;
use ecsign_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider provides a fixed credential.
///
/// This provider is used when you have the keys directly and want to use
/// them without any dynamic loading. The credential is validated once, at
/// construction of the provider's output, not per request.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider from an already validated credential.
    pub fn new(credential: Credential) -> Self {
        Self { credential }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Locale;

    #[tokio::test]
    async fn test_static_credential_provider() -> Result<()> {
        let ctx = Context::new();

        let cred = Credential::new("access_key", "secret_key", "tag-20", Locale::Com)?;
        let provider = StaticCredentialProvider::new(cred);

        let cred = provider
            .provide_credential(&ctx)
            .await?
            .expect("credential must be present");
        assert_eq!(cred.access_key, "access_key");
        assert_eq!(cred.secret_key, "secret_key");
        assert_eq!(cred.associate_tag, "tag-20");
        assert_eq!(cred.locale, Locale::Com);

        Ok(())
    }
}
