use crate::constants::*;
use ecsign_core::Context;

/// Config carries all the configuration for the Product Advertising API.
///
/// Secret-bearing fields are plain `Option<String>` here; they only gain
/// redaction once turned into a [`Credential`](crate::Credential).
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// `access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AMAZON_ACCESS_KEY`]
    pub access_key: Option<String>,
    /// `secret_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AMAZON_SECRET_KEY`]
    pub secret_key: Option<String>,
    /// `associate_tag` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AMAZON_ASSOCIATE_TAG`]
    pub associate_tag: Option<String>,
    /// `locale` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AMAZON_LOCALE`]
    pub locale: Option<String>,
    /// Default search index for item searches, e.g. `All`.
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AMAZON_SEARCH_INDEX`]
    pub search_index: Option<String>,
    /// Default response group list, e.g. `Images,ItemAttributes`.
    ///
    /// Whitespace is stripped on load: the service rejects response group
    /// lists containing spaces.
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AMAZON_RESPONSE_GROUP`]
    pub response_group: Option<String>,
}

impl Config {
    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(AMAZON_ACCESS_KEY) {
            self.access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AMAZON_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AMAZON_ASSOCIATE_TAG) {
            self.associate_tag.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AMAZON_LOCALE) {
            self.locale.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AMAZON_SEARCH_INDEX) {
            self.search_index.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AMAZON_RESPONSE_GROUP) {
            self.response_group
                .get_or_insert(v.replace(char::is_whitespace, ""));
        }

        self
    }
}
