//! Interface to the account system that supplies bearer tokens.
//!
//! The client never runs an OAuth flow itself. On every request it asks an
//! [`AccountProvider`] for the current service statuses, copies the first
//! authenticated entry into its configuration, and otherwise falls back to
//! API-key-only requests.

use std::fmt;

/// Failures reported by an [`AccountProvider`] or its factory.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Authentication state of one account service session.
#[derive(Debug, Clone, Default)]
pub struct ServiceStatus {
    /// Whether this session currently holds a valid login.
    pub service_authenticated: bool,
    /// OAuth access token for the session; empty when unauthenticated.
    pub access_token: String,
    /// OAuth client id the session was established with.
    pub client_id: String,
    /// OAuth client secret the session was established with.
    pub client_secret: String,
}

/// Source of login state for the platform account.
///
/// Implementations typically wrap a desktop account service or a stored OAuth
/// token. Failures are propagated to the operation that triggered the
/// resolution; they are never masked into "unauthenticated".
pub trait AccountProvider: Send + Sync {
    /// Bring the provider's view of the account sessions up to date.
    fn refresh(&self) -> Result<(), ProviderError>;

    /// Current state of every known session.
    fn service_statuses(&self) -> Result<Vec<ServiceStatus>, ProviderError>;
}

/// Factory producing a fresh [`AccountProvider`] for one resolution.
pub type ProviderFactory =
    Box<dyn Fn() -> Result<Box<dyn AccountProvider>, ProviderError> + Send + Sync>;

/// How the client obtains an up-to-date provider view for each request.
pub enum CredentialSource {
    /// Construct a brand-new provider every time credentials are resolved.
    ///
    /// Suits account services whose refresh call cannot be trusted to observe
    /// new logins; re-creating the provider is the reliable (if wasteful) way
    /// to see them.
    Recreate(ProviderFactory),

    /// Keep one provider and call [`AccountProvider::refresh`] before each
    /// status query.
    Refresh(Box<dyn AccountProvider>),

    /// Never consult a provider; every request is signed with the API key.
    None,
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recreate(_) => f.write_str("CredentialSource::Recreate"),
            Self::Refresh(_) => f.write_str("CredentialSource::Refresh"),
            Self::None => f.write_str("CredentialSource::None"),
        }
    }
}
