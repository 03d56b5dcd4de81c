//! Comment-thread resources.

use serde::Deserialize;

use super::Resource;

/// A `commentThread` resource: a top-level comment and reply metadata.
///
/// See: <https://developers.google.com/youtube/v3/docs/commentThreads#resource>
#[derive(Debug, Deserialize)]
pub struct CommentThread {
    /// The ID that YouTube uses to uniquely identify the thread.
    pub id: String,
    /// The thread's top-level comment and reply counters.
    pub snippet: CommentThreadSnippet,
}

impl Resource for CommentThread {
    const KIND: &'static str = "youtube#commentThread";
}

/// Details of the thread.
#[derive(Debug, Deserialize)]
pub struct CommentThreadSnippet {
    /// The thread's top-level comment.
    #[serde(rename = "topLevelComment")]
    pub top_level_comment: Option<Comment>,
    /// The number of replies to the top-level comment.
    #[serde(rename = "totalReplyCount")]
    pub total_reply_count: Option<u32>,
}

/// One comment.
#[derive(Debug, Deserialize)]
pub struct Comment {
    /// The ID that YouTube uses to uniquely identify the comment.
    #[serde(default)]
    pub id: String,
    /// The comment's author and text.
    pub snippet: CommentSnippet,
}

/// Author and text of a comment.
#[derive(Debug, Deserialize)]
pub struct CommentSnippet {
    /// Display name of the comment's author.
    #[serde(default, rename = "authorDisplayName")]
    pub author_display_name: String,
    /// The comment text in the requested format.
    #[serde(rename = "textDisplay")]
    pub text_display: Option<String>,
    /// The comment text as originally written.
    #[serde(rename = "textOriginal")]
    pub text_original: Option<String>,
    /// The video the comment is attached to.
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}
