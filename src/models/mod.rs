//! Value objects returned by the API, and the kind-based extraction used to
//! pull them out of heterogeneous `items` arrays.

pub mod categories;
pub mod channels;
pub mod comments;
pub mod playlists;
pub mod subscriptions;
pub mod videos;

pub use categories::GuideCategory;
pub use channels::{Channel, ChannelSection};
pub use comments::CommentThread;
pub use playlists::{Playlist, PlaylistItem};
pub use subscriptions::Subscription;
pub use videos::Video;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

/// Marker for models that appear in `items` arrays under a `kind` value.
pub trait Resource: DeserializeOwned {
    /// The `kind` discriminator identifying this resource.
    const KIND: &'static str;
}

/// Search results wrap their effective kind one level down, under `id.kind`.
const SEARCH_RESULT_KIND: &str = "youtube#searchResult";

/// Identifier of the resource that another resource points at.
#[derive(Debug, Deserialize)]
pub struct ResourceId {
    /// Kind of the referenced resource.
    #[serde(default)]
    pub kind: String,
    /// Set when the reference is to a video.
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
    /// Set when the reference is to a channel.
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
    /// Set when the reference is to a playlist.
    #[serde(rename = "playlistId")]
    pub playlist_id: Option<String>,
}

/// Extract every item of kind `T::KIND` from a response's `items` array,
/// preserving order and skipping entries of any other kind.
///
/// A missing or non-array `items` yields an empty list; an item that matches
/// the kind but not the model's shape fails the extraction.
pub(crate) fn typed_list<T: Resource>(root: &Value) -> Result<Vec<T>> {
    let items = root.get("items").and_then(Value::as_array);
    let mut results = Vec::new();
    for item in items.into_iter().flatten() {
        let mut kind = item.get("kind").and_then(Value::as_str).unwrap_or_default();
        if kind == SEARCH_RESULT_KIND {
            kind = item
                .pointer("/id/kind")
                .and_then(Value::as_str)
                .unwrap_or_default();
        }
        if kind == T::KIND {
            results.push(serde_json::from_value(item.clone())?);
        }
    }
    Ok(results)
}

/// Success payload check for write-style endpoints.
///
/// A null body counts as success (the server answers ratings with
/// 204 No Content); otherwise the payload must identify the created or
/// affected resource through a non-empty `id` or `kind`.
pub(crate) fn is_successful(root: &Value) -> bool {
    if root.is_null() {
        return true;
    }
    let non_empty =
        |field: &str| root.get(field).and_then(Value::as_str).is_some_and(|s| !s.is_empty());
    non_empty("id") || non_empty("kind")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn typed_list_filters_mixed_kinds_in_order() {
        let root = json!({
            "items": [
                {"kind": "youtube#video", "id": "v1", "snippet": {"title": "first"}},
                {"kind": "youtube#channel", "id": "c1", "snippet": {"title": "not a video"}},
                {"kind": "youtube#video", "id": "v2", "snippet": {"title": "second"}},
            ]
        });

        let videos: Vec<Video> = typed_list(&root).unwrap();
        let ids: Vec<&str> = videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["v1", "v2"]);
    }

    #[test]
    fn search_results_classify_by_their_nested_kind() {
        let root = json!({
            "items": [
                {
                    "kind": "youtube#searchResult",
                    "id": {"kind": "youtube#video", "videoId": "v1"},
                    "snippet": {"title": "a video"}
                },
                {
                    "kind": "youtube#searchResult",
                    "id": {"kind": "youtube#channel", "channelId": "c1"},
                    "snippet": {"title": "a channel"}
                },
            ]
        });

        let videos: Vec<Video> = typed_list(&root).unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].id, "v1");
    }

    #[test]
    fn missing_or_null_items_yield_an_empty_list() {
        let videos: Vec<Video> = typed_list(&json!({})).unwrap();
        assert!(videos.is_empty());

        let videos: Vec<Video> = typed_list(&Value::Null).unwrap();
        assert!(videos.is_empty());
    }

    #[test]
    fn malformed_matching_item_fails_extraction() {
        // Right kind, but no snippet.
        let root = json!({"items": [{"kind": "youtube#video", "id": "v1"}]});
        assert!(typed_list::<Video>(&root).is_err());
    }

    #[test]
    fn is_successful_truth_table() {
        assert!(is_successful(&Value::Null));
        assert!(is_successful(&json!({"id": "abc"})));
        assert!(is_successful(&json!({"kind": "youtube#video"})));
        assert!(!is_successful(&json!({})));
        assert!(!is_successful(&json!({"id": ""})));
        assert!(!is_successful(&json!({"error": "quota exceeded"})));
    }
}
