//! Channel and channel-section resources.

use serde::Deserialize;

use super::Resource;

/// A `channel` resource.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#resource>
#[derive(Debug, Deserialize)]
pub struct Channel {
    /// The ID that YouTube uses to uniquely identify the channel.
    pub id: String,
    /// Basic details about the channel.
    pub snippet: ChannelSnippet,
    /// Subscriber and view counters; only present when the `statistics` part
    /// was requested.
    pub statistics: Option<ChannelStatistics>,
    /// Playlist references; only present when the `contentDetails` part was
    /// requested.
    #[serde(rename = "contentDetails")]
    pub content_details: Option<ChannelContentDetails>,
}

impl Resource for Channel {
    const KIND: &'static str = "youtube#channel";
}

/// Basic details about the channel.
#[derive(Debug, Deserialize)]
pub struct ChannelSnippet {
    /// The channel's title.
    pub title: String,
    /// The channel's description.
    #[serde(default)]
    pub description: String,
}

/// Counters for the channel.
///
/// The API serializes all counters as strings.
#[derive(Debug, Deserialize)]
pub struct ChannelStatistics {
    /// The number of subscribers the channel has.
    #[serde(rename = "subscriberCount")]
    pub subscriber_count: Option<String>,
    /// The number of public videos uploaded to the channel.
    #[serde(rename = "videoCount")]
    pub video_count: Option<String>,
    /// The number of times the channel has been viewed.
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
}

/// Channel data describing related playlists.
#[derive(Debug, Deserialize)]
pub struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists")]
    pub related_playlists: Option<RelatedPlaylists>,
}

/// Well-known playlists the channel maintains.
#[derive(Debug, Deserialize)]
pub struct RelatedPlaylists {
    /// Playlist collecting the channel's uploads.
    pub uploads: Option<String>,
    /// Playlist collecting videos the channel liked.
    pub likes: Option<String>,
}

/// A `channelSection` resource: one shelf of content featured on a channel.
///
/// See: <https://developers.google.com/youtube/v3/docs/channelSections#resource>
#[derive(Debug, Deserialize)]
pub struct ChannelSection {
    /// The ID that YouTube uses to uniquely identify the section.
    pub id: String,
    /// The content the section features.
    #[serde(rename = "contentDetails")]
    pub content_details: Option<ChannelSectionContentDetails>,
}

impl Resource for ChannelSection {
    const KIND: &'static str = "youtube#channelSection";
}

/// The playlists and channels a section features.
#[derive(Debug, Deserialize)]
pub struct ChannelSectionContentDetails {
    /// Featured playlist ids.
    #[serde(default)]
    pub playlists: Vec<String>,
    /// Featured channel ids.
    #[serde(default)]
    pub channels: Vec<String>,
}
