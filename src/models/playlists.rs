//! Playlist and playlist-item resources.

use serde::Deserialize;

use super::{Resource, ResourceId};

/// A `playlist` resource.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlists#resource>
#[derive(Debug, Deserialize)]
pub struct Playlist {
    /// The ID that YouTube uses to uniquely identify the playlist.
    pub id: String,
    /// Basic details about the playlist.
    pub snippet: PlaylistSnippet,
    /// Only present when the `contentDetails` part was requested.
    #[serde(rename = "contentDetails")]
    pub content_details: Option<PlaylistContentDetails>,
}

impl Resource for Playlist {
    const KIND: &'static str = "youtube#playlist";
}

/// Basic details about the playlist.
#[derive(Debug, Deserialize)]
pub struct PlaylistSnippet {
    /// The playlist's title.
    pub title: String,
    /// The playlist's description.
    #[serde(default)]
    pub description: String,
}

/// Size information for the playlist.
#[derive(Debug, Deserialize)]
pub struct PlaylistContentDetails {
    /// The number of videos in the playlist.
    #[serde(rename = "itemCount")]
    pub item_count: Option<u32>,
}

/// A `playlistItem` resource: one entry of a playlist.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#resource>
#[derive(Debug, Deserialize)]
pub struct PlaylistItem {
    /// The ID that YouTube uses to uniquely identify the playlist item.
    pub id: String,
    /// Basic details about the entry and the video it points at.
    pub snippet: PlaylistItemSnippet,
}

impl Resource for PlaylistItem {
    const KIND: &'static str = "youtube#playlistItem";
}

/// Basic details about the playlist entry.
#[derive(Debug, Deserialize)]
pub struct PlaylistItemSnippet {
    /// The entry's title (normally the video title).
    pub title: String,
    /// The entry's description.
    #[serde(default)]
    pub description: String,
    /// The playlist the entry belongs to.
    #[serde(default, rename = "playlistId")]
    pub playlist_id: String,
    /// The entry's position within the playlist.
    pub position: Option<u32>,
    /// Reference to the video the entry points at.
    #[serde(rename = "resourceId")]
    pub resource_id: Option<ResourceId>,
}
