//! Per-request configuration resolution.

use std::env;
use std::sync::{Mutex, PoisonError};

use url::Url;

use crate::accounts::CredentialSource;
use crate::error::{Error, Result};

/// API root used when neither the builder nor the environment overrides it.
pub(crate) const DEFAULT_API_ROOT: &str = "https://www.googleapis.com";

/// Environment variable replacing the default API root.
pub const ENV_API_ROOT: &str = "YOUTUBE_CLIENT_APIROOT";

/// Environment variable that, when present, forces unauthenticated mode no
/// matter what the account provider would report.
pub const ENV_IGNORE_ACCOUNTS: &str = "YOUTUBE_CLIENT_IGNORE_ACCOUNTS";

const ACCEPT: &str = "application/json";

/// One resolved configuration snapshot.
///
/// Rebuilt from scratch for every request so the client always reflects the
/// latest login state; requests already in flight keep the snapshot they were
/// built with.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) api_root: Url,
    pub(crate) api_key: String,
    pub(crate) authenticated: bool,
    pub(crate) access_token: String,
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
    pub(crate) accept: String,
    pub(crate) user_agent: String,
}

/// Produces a fresh [`Config`] per request from builder settings, environment
/// overrides, and the credential source.
pub(crate) struct ConfigResolver {
    api_key: String,
    user_agent: String,
    /// Explicit root supplied at construction; wins over the env override.
    root_override: Option<Url>,
    /// Shared slot. The lock is held for the duration of one synchronous
    /// resolution and released before any I/O is dispatched.
    source: Mutex<CredentialSource>,
}

impl ConfigResolver {
    pub(crate) fn new(
        api_key: String,
        user_agent: String,
        root_override: Option<Url>,
        source: CredentialSource,
    ) -> Self {
        Self {
            api_key,
            user_agent,
            root_override,
            source: Mutex::new(source),
        }
    }

    /// Resolve a fresh snapshot of the client configuration.
    ///
    /// Provider failures are not masked: they fail the resolution, and with
    /// it the operation that asked for it.
    pub(crate) fn resolve(&self) -> Result<Config> {
        let source = self.source.lock().unwrap_or_else(PoisonError::into_inner);

        let api_root = match &self.root_override {
            Some(root) => root.clone(),
            None => {
                let root = env::var(ENV_API_ROOT).unwrap_or_else(|_| DEFAULT_API_ROOT.to_owned());
                Url::parse(&root).map_err(|e| Error::InvalidApiRoot(e.to_string()))?
            }
        };

        let mut config = Config {
            api_root,
            api_key: self.api_key.clone(),
            authenticated: false,
            access_token: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            accept: ACCEPT.to_owned(),
            user_agent: self.user_agent.clone(),
        };

        if env::var_os(ENV_IGNORE_ACCOUNTS).is_some() {
            tracing::debug!("account lookup disabled by {ENV_IGNORE_ACCOUNTS}");
            return Ok(config);
        }

        let statuses = match &*source {
            CredentialSource::Recreate(factory) => factory()
                .map_err(Error::Accounts)?
                .service_statuses()
                .map_err(Error::Accounts)?,
            CredentialSource::Refresh(provider) => {
                provider.refresh().map_err(Error::Accounts)?;
                provider.service_statuses().map_err(Error::Accounts)?
            }
            CredentialSource::None => Vec::new(),
        };

        for status in statuses {
            if status.service_authenticated {
                config.authenticated = true;
                config.access_token = status.access_token;
                config.client_id = status.client_id;
                config.client_secret = status.client_secret;
                break;
            }
        }

        if config.authenticated {
            tracing::debug!(
                client_id = %config.client_id,
                has_client_secret = !config.client_secret.is_empty(),
                "resolved an authenticated session"
            );
        } else {
            tracing::debug!("no authenticated session, falling back to api key");
        }

        Ok(config)
    }
}
