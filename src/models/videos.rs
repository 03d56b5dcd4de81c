//! Video resources.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::Resource;

/// A `video` resource, as returned by `videos.list` and, in search-result
/// form, `search.list`.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#resource>
#[derive(Debug, Deserialize)]
pub struct Video {
    /// The ID that YouTube uses to uniquely identify the video.
    ///
    /// `videos.list` returns it as a plain string while `search.list` nests
    /// it inside an object; both forms deserialize to the bare id.
    #[serde(deserialize_with = "video_id")]
    pub id: String,
    /// Basic details: title, description, owning channel.
    pub snippet: VideoSnippet,
    /// Engagement counters; only present when the `statistics` part was
    /// requested.
    pub statistics: Option<VideoStatistics>,
}

impl Resource for Video {
    const KIND: &'static str = "youtube#video";
}

/// Basic details about the video.
#[derive(Debug, Deserialize)]
pub struct VideoSnippet {
    /// The video's title.
    pub title: String,
    /// The video's description.
    #[serde(default)]
    pub description: String,
    /// The ID of the channel the video was uploaded to.
    #[serde(default, rename = "channelId")]
    pub channel_id: String,
    /// Display title of that channel.
    #[serde(default, rename = "channelTitle")]
    pub channel_title: String,
}

/// Engagement counters for the video.
///
/// The API serializes all counters as strings.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#statistics>
#[derive(Debug, Deserialize)]
pub struct VideoStatistics {
    /// The number of times the video has been viewed.
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    /// The number of users who have indicated that they liked the video.
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
    /// The number of comments on the video.
    #[serde(rename = "commentCount")]
    pub comment_count: Option<String>,
}

fn video_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Object(id) => id
            .get("videoId")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| serde::de::Error::custom("search-result id without videoId")),
        other => Err(serde::de::Error::custom(format!(
            "unsupported video id shape: {other}"
        ))),
    }
}
