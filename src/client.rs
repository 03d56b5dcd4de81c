//! The client: endpoint façade, shared dispatch, and response decoding.

use std::sync::Arc;

use reqwest::{Response, StatusCode};
use serde_json::{Value, json};
use tracing::instrument;
use url::Url;

use crate::accounts::CredentialSource;
use crate::cancel::CancelFlag;
use crate::config::ConfigResolver;
use crate::error::{Error, Result};
use crate::executor::{Executor, Pending};
use crate::models::{
    Channel, ChannelSection, CommentThread, GuideCategory, Playlist, PlaylistItem, Subscription,
    Video, is_successful, typed_list,
};
use crate::request::RequestDescriptor;

/// Whether an operation follows the read or the write classification rules.
///
/// Reads succeed only on 200; writes (including override-deletes) also accept
/// 201 Created and 204 No Content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallKind {
    Get,
    Post,
    Delete,
}

/// Video rating values accepted by [`Client::rate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Like,
    Dislike,
}

impl Rating {
    fn as_str(self) -> &'static str {
        match self {
            Rating::Like => "like",
            Rating::Dislike => "dislike",
        }
    }
}

/// Asynchronous client for the YouTube Data API v3.
///
/// Every operation returns a [`Pending`] handle immediately; the request is
/// driven to completion by the client's dedicated I/O worker, and response
/// decoding runs there too. Configuration — including the login state
/// obtained from the [`CredentialSource`] — is re-resolved for every request,
/// so the client always signs with the freshest credentials available.
///
/// Dropping the client stops the worker and joins it; operations still in
/// flight settle with [`Error::Cancelled`].
pub struct Client {
    http: reqwest::Client,
    resolver: ConfigResolver,
    executor: Executor,
    cancel: Arc<CancelFlag>,
}

/// Configures and constructs a [`Client`].
pub struct ClientBuilder {
    api_key: String,
    api_root: Option<String>,
    user_agent: Option<String>,
    credentials: CredentialSource,
}

impl ClientBuilder {
    /// Replace the default API root, e.g. to point at a mock server.
    ///
    /// Takes precedence over the `YOUTUBE_CLIENT_APIROOT` environment
    /// override.
    pub fn api_root(mut self, root: impl Into<String>) -> Self {
        self.api_root = Some(root.into());
        self
    }

    /// Replace the default `User-Agent` product string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Supply the source of account credentials.
    ///
    /// Without one the client signs every request with the API key only.
    pub fn credentials(mut self, source: CredentialSource) -> Self {
        self.credentials = source;
        self
    }

    /// Build the client and start its I/O worker.
    pub fn build(self) -> Result<Client> {
        let root_override = self
            .api_root
            .map(|root| {
                let url =
                    Url::parse(&root).map_err(|e| Error::InvalidApiRoot(e.to_string()))?;
                if url.cannot_be_a_base() {
                    return Err(Error::InvalidApiRoot(format!("{url} cannot be a base")));
                }
                Ok(url)
            })
            .transpose()?;
        let user_agent = self.user_agent.unwrap_or_else(|| {
            format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        });

        let cancel = Arc::new(CancelFlag::default());
        Ok(Client {
            http: reqwest::Client::builder().build()?,
            resolver: ConfigResolver::new(
                self.api_key,
                user_agent,
                root_override,
                self.credentials,
            ),
            executor: Executor::new(Arc::clone(&cancel))?,
            cancel,
        })
    }
}

impl Client {
    /// Start building a client that signs requests with `api_key` whenever no
    /// authenticated session is available.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            api_key: api_key.into(),
            api_root: None,
            user_agent: None,
            credentials: CredentialSource::None,
        }
    }

    /// A key-only client with default configuration.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    /// Abort every in-flight operation and fail all subsequent ones.
    ///
    /// Irreversible: a cancelled client can only be discarded.
    pub fn cancel(&self) {
        tracing::debug!("client cancelled");
        self.cancel.cancel();
    }

    /// Whether [`Client::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Whether the latest resolved configuration carries an authenticated
    /// session.
    ///
    /// Re-resolves on every call, so this reflects logins and logouts that
    /// happened after the client was built.
    pub fn authenticated(&self) -> Result<bool> {
        Ok(self.resolver.resolve()?.authenticated)
    }

    // ---- endpoint façade -------------------------------------------------

    /// Search for videos matching `query`.
    ///
    /// `max_results` and `category_id` are omitted from the request entirely
    /// when unset; the API rejects an empty category id.
    pub fn search(
        &self,
        query: &str,
        max_results: Option<u32>,
        category_id: Option<&str>,
    ) -> Pending<Vec<Video>> {
        let mut params = vec![
            ("part", "snippet".to_owned()),
            ("type", "video".to_owned()),
            ("q", query.to_owned()),
        ];
        if let Some(max_results) = max_results {
            params.push(("maxResults", max_results.to_string()));
        }
        if let Some(category_id) = category_id {
            params.push(("videoCategoryId", category_id.to_owned()));
        }
        self.get(&["youtube", "v3", "search"], params, typed_list::<Video>)
    }

    /// List the guide categories for a region and interface language.
    ///
    /// Region and locale are always sent, even when blank; the API
    /// substitutes its own defaults.
    pub fn guide_categories(
        &self,
        region_code: &str,
        locale: &str,
    ) -> Pending<Vec<GuideCategory>> {
        let params = vec![
            ("part", "snippet".to_owned()),
            ("regionCode", region_code.to_owned()),
            ("hl", locale.to_owned()),
        ];
        self.get(
            &["youtube", "v3", "guideCategories"],
            params,
            typed_list::<GuideCategory>,
        )
    }

    /// Subscriptions of the authenticated user.
    pub fn my_subscriptions(&self) -> Pending<Vec<Subscription>> {
        let params = vec![
            ("part", "snippet".to_owned()),
            ("mine", "true".to_owned()),
            ("maxResults", "50".to_owned()),
        ];
        self.get(
            &["youtube", "v3", "subscriptions"],
            params,
            typed_list::<Subscription>,
        )
    }

    /// Channels owned by the authenticated user, with statistics and related
    /// playlists.
    pub fn my_channels(&self) -> Pending<Vec<Channel>> {
        let params = vec![
            ("part", "snippet,contentDetails,statistics".to_owned()),
            ("mine", "true".to_owned()),
        ];
        self.get(&["youtube", "v3", "channels"], params, typed_list::<Channel>)
    }

    /// Resolve the id of a channel's uploads playlist.
    ///
    /// Empty when the channel exposes no uploads playlist.
    pub fn uploads_playlist(&self, channel_id: &str) -> Pending<String> {
        let params = vec![
            ("part", "snippet,contentDetails".to_owned()),
            ("id", channel_id.to_owned()),
        ];
        self.get(&["youtube", "v3", "channels"], params, |root| {
            Ok(root
                .pointer("/items/0/contentDetails/relatedPlaylists/uploads")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned())
        })
    }

    /// Entries of a playlist, in playlist order.
    pub fn playlist_items(&self, playlist_id: &str) -> Pending<Vec<PlaylistItem>> {
        let params = vec![
            ("part", "snippet,contentDetails".to_owned()),
            ("playlistId", playlist_id.to_owned()),
            ("maxResults", "50".to_owned()),
        ];
        self.get(
            &["youtube", "v3", "playlistItems"],
            params,
            typed_list::<PlaylistItem>,
        )
    }

    /// Channels belonging to a guide category.
    pub fn channels_by_category(&self, category_id: &str) -> Pending<Vec<Channel>> {
        let params = vec![
            ("part", "snippet,statistics".to_owned()),
            ("categoryId", category_id.to_owned()),
        ];
        self.get(&["youtube", "v3", "channels"], params, typed_list::<Channel>)
    }

    /// Statistics for one channel.
    pub fn channel_statistics(&self, channel_id: &str) -> Pending<Vec<Channel>> {
        let params = vec![
            ("part", "statistics,snippet".to_owned()),
            ("id", channel_id.to_owned()),
        ];
        self.get(&["youtube", "v3", "channels"], params, typed_list::<Channel>)
    }

    /// Content shelves featured on a channel.
    pub fn channel_sections(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> Pending<Vec<ChannelSection>> {
        let params = vec![
            ("part", "contentDetails".to_owned()),
            ("channelId", channel_id.to_owned()),
            ("maxResults", max_results.to_string()),
        ];
        self.get(
            &["youtube", "v3", "channelSections"],
            params,
            typed_list::<ChannelSection>,
        )
    }

    /// A channel's videos, most viewed first.
    pub fn channel_videos(&self, channel_id: &str) -> Pending<Vec<Video>> {
        let params = vec![
            ("part", "snippet".to_owned()),
            ("type", "video".to_owned()),
            ("order", "viewCount".to_owned()),
            ("channelId", channel_id.to_owned()),
        ];
        self.get(&["youtube", "v3", "search"], params, typed_list::<Video>)
    }

    /// Videos from a chart such as `mostPopular`, for a region.
    ///
    /// `category_id` is omitted from the request entirely when unset.
    pub fn chart_videos(
        &self,
        chart: &str,
        region_code: &str,
        category_id: Option<&str>,
    ) -> Pending<Vec<Video>> {
        let mut params = vec![
            ("part", "snippet".to_owned()),
            ("regionCode", region_code.to_owned()),
            ("chart", chart.to_owned()),
        ];
        if let Some(category_id) = category_id {
            params.push(("videoCategoryId", category_id.to_owned()));
        }
        self.get(&["youtube", "v3", "videos"], params, typed_list::<Video>)
    }

    /// Details and statistics for one video.
    pub fn video_details(&self, video_id: &str) -> Pending<Vec<Video>> {
        let params = vec![
            ("part", "snippet,statistics".to_owned()),
            ("id", video_id.to_owned()),
        ];
        self.get(&["youtube", "v3", "videos"], params, typed_list::<Video>)
    }

    /// Playlists maintained by a channel.
    pub fn channel_playlists(&self, channel_id: &str) -> Pending<Vec<Playlist>> {
        let params = vec![
            ("part", "snippet,contentDetails".to_owned()),
            ("channelId", channel_id.to_owned()),
        ];
        self.get(&["youtube", "v3", "playlists"], params, typed_list::<Playlist>)
    }

    /// Most recent comment threads on a video, as plain text.
    pub fn video_comments(&self, video_id: &str) -> Pending<Vec<CommentThread>> {
        let params = vec![
            ("part", "snippet".to_owned()),
            ("order", "time".to_owned()),
            ("videoId", video_id.to_owned()),
            ("textFormat", "plainText".to_owned()),
            ("maxResults", "15".to_owned()),
        ];
        self.get(
            &["youtube", "v3", "commentThreads"],
            params,
            typed_list::<CommentThread>,
        )
    }

    /// The authenticated user's subscription to a channel, if any.
    pub fn subscription_for_channel(&self, channel_id: &str) -> Pending<Vec<Subscription>> {
        let params = vec![
            ("part", "snippet".to_owned()),
            ("mine", "true".to_owned()),
            ("forChannelId", channel_id.to_owned()),
        ];
        self.get(
            &["youtube", "v3", "subscriptions"],
            params,
            typed_list::<Subscription>,
        )
    }

    /// Post a top-level comment on a video.
    ///
    /// Resolves to whether the API acknowledged the new thread.
    pub fn post_comment(&self, video_id: &str, text: &str) -> Pending<bool> {
        let body = json!({
            "snippet": {
                "topLevelComment": {
                    "snippet": {
                        "textOriginal": text,
                        "videoId": video_id,
                    }
                }
            }
        });
        self.post(
            &["youtube", "v3", "commentThreads"],
            vec![("part", "snippet".to_owned())],
            Some(body),
            |root| Ok(is_successful(root)),
        )
    }

    /// Rate a video.
    pub fn rate(&self, video_id: &str, rating: Rating) -> Pending<bool> {
        let params = vec![
            ("id", video_id.to_owned()),
            ("rating", rating.as_str().to_owned()),
        ];
        self.post(&["youtube", "v3", "videos", "rate"], params, None, |root| {
            Ok(is_successful(root))
        })
    }

    /// Subscribe the authenticated user to a channel.
    pub fn subscribe(&self, channel_id: &str) -> Pending<bool> {
        let body = json!({
            "snippet": {
                "resourceId": {
                    "channelId": channel_id,
                    "kind": "youtube#channel",
                }
            }
        });
        self.post(
            &["youtube", "v3", "subscriptions"],
            vec![("part", "snippet".to_owned())],
            Some(body),
            |root| Ok(is_successful(root)),
        )
    }

    /// Remove a subscription by its subscription id (not the channel id).
    pub fn unsubscribe(&self, subscription_id: &str) -> Pending<bool> {
        self.delete(
            &["youtube", "v3", "subscriptions"],
            vec![("id", subscription_id.to_owned())],
            |root| Ok(is_successful(root)),
        )
    }

    /// Append a video to one of the user's playlists.
    pub fn add_to_playlist(&self, video_id: &str, playlist_id: &str) -> Pending<bool> {
        let body = json!({
            "snippet": {
                "playlistId": playlist_id,
                "resourceId": {
                    "kind": "youtube#video",
                    "videoId": video_id,
                }
            }
        });
        self.post(
            &["youtube", "v3", "playlistItems"],
            vec![("part", "snippet".to_owned())],
            Some(body),
            |root| Ok(is_successful(root)),
        )
    }

    // ---- shared plumbing -------------------------------------------------

    fn get<T, P>(&self, path: &[&str], params: Vec<(&'static str, String)>, project: P) -> Pending<T>
    where
        T: Send + 'static,
        P: FnOnce(&Value) -> Result<T> + Send + 'static,
    {
        self.dispatch(CallKind::Get, path, params, None, project)
    }

    fn post<T, P>(
        &self,
        path: &[&str],
        params: Vec<(&'static str, String)>,
        body: Option<Value>,
        project: P,
    ) -> Pending<T>
    where
        T: Send + 'static,
        P: FnOnce(&Value) -> Result<T> + Send + 'static,
    {
        self.dispatch(CallKind::Post, path, params, body, project)
    }

    fn delete<T, P>(
        &self,
        path: &[&str],
        params: Vec<(&'static str, String)>,
        project: P,
    ) -> Pending<T>
    where
        T: Send + 'static,
        P: FnOnce(&Value) -> Result<T> + Send + 'static,
    {
        self.dispatch(CallKind::Delete, path, params, None, project)
    }

    /// Resolve configuration, build the request, and hand it to the worker.
    ///
    /// Resolution and request construction happen synchronously on the
    /// calling thread, so the descriptor captures the login state as of the
    /// moment of the call; their failures are delivered through the returned
    /// handle like any other operation failure.
    #[instrument(level = "debug", skip(self, body, project))]
    fn dispatch<T, P>(
        &self,
        kind: CallKind,
        path: &[&str],
        params: Vec<(&'static str, String)>,
        body: Option<Value>,
        project: P,
    ) -> Pending<T>
    where
        T: Send + 'static,
        P: FnOnce(&Value) -> Result<T> + Send + 'static,
    {
        let prepared = self.resolver.resolve().and_then(|config| match kind {
            CallKind::Get => RequestDescriptor::get(&config, path, &params),
            CallKind::Post => RequestDescriptor::post(&config, path, &params, body.as_ref()),
            CallKind::Delete => RequestDescriptor::delete(&config, path, &params),
        });

        let http = self.http.clone();
        self.executor.submit(async move {
            let descriptor = prepared?;
            let response = send(&http, descriptor).await?;
            let status = response.status();
            // A decompression or connection failure while reading the body
            // is a transport error, never a fallback to raw bytes.
            let body = response.bytes().await?;
            decode(kind, status, &body, project)
        })
    }
}

async fn send(http: &reqwest::Client, descriptor: RequestDescriptor) -> Result<Response> {
    let RequestDescriptor {
        method,
        url,
        headers,
        body,
    } = descriptor;

    let mut request = http.request(method, url).headers(headers);
    if let Some(body) = body {
        request = request.body(body);
    }
    Ok(request.send().await?)
}

/// Decode one response on the worker: parse the body leniently, classify the
/// status, and run the caller's projection.
fn decode<T, P>(kind: CallKind, status: StatusCode, body: &[u8], project: P) -> Result<T>
where
    P: FnOnce(&Value) -> Result<T>,
{
    // Lenient parse: empty and malformed bodies (204 No Content in
    // particular) become null rather than failing the operation.
    let root: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

    let accepted = match kind {
        CallKind::Get => status == StatusCode::OK,
        CallKind::Post | CallKind::Delete => {
            status == StatusCode::OK
                || status == StatusCode::CREATED
                || status == StatusCode::NO_CONTENT
        }
    };
    if !accepted {
        let message = root
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        tracing::debug!(%status, %message, "api rejected request");
        return Err(Error::Api { status, message });
    }

    project(&root)
}
