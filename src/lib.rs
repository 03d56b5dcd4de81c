//! Asynchronous client for the YouTube Data API v3.
//!
//! This crate wraps the REST API behind typed, future-returning operations:
//! search, guide categories, channels, playlists, subscriptions, comments and
//! ratings. It centralizes the three concerns every endpoint shares:
//!
//! - **Request construction** — each request is signed with a bearer token
//!   when an account session is available, falling back to an API-key query
//!   parameter otherwise. Login state is re-resolved from the
//!   [`CredentialSource`] on every request, so the client always reflects the
//!   latest session.
//! - **Response handling** — gzip-encoded bodies are decompressed by the
//!   transport, bodies are parsed leniently (a 204 No Content is not an
//!   error), and HTTP statuses are classified uniformly into success, domain
//!   error, or transport error.
//! - **Cancellation** — [`Client::cancel`] raises a client-wide flag that
//!   aborts every in-flight operation and fails all subsequent ones.
//!
//! Operations return a [`Pending`] handle immediately. The handle is a
//! `Future`, and also offers a blocking [`Pending::wait`] for synchronous
//! callers; all I/O and decoding run on a dedicated worker thread owned by
//! the client. Dropping the client joins that worker.
//!
//! # Example
//!
//! ```rust,no_run
//! use youtube_client::Client;
//!
//! # fn main() -> youtube_client::Result<()> {
//! let client = Client::new("api-key")?;
//! let videos = client.search("crab rave", Some(10), None).wait()?;
//! for video in videos {
//!     println!("{}: {}", video.id, video.snippet.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod accounts;
mod cancel;
pub mod client;
mod config;
mod error;
mod executor;
pub mod models;
mod request;

pub use accounts::{AccountProvider, CredentialSource, ProviderError, ProviderFactory, ServiceStatus};
pub use client::{Client, ClientBuilder, Rating};
pub use config::{ENV_API_ROOT, ENV_IGNORE_ACCOUNTS};
pub use error::{Error, Result};
pub use executor::Pending;

// Re-export the model types endpoint signatures are written in.
pub use models::{
    Channel, ChannelSection, CommentThread, GuideCategory, Playlist, PlaylistItem, Resource,
    ResourceId, Subscription, Video,
};
