//! Subscription resources.

use serde::Deserialize;

use super::{Resource, ResourceId};

/// A `subscription` resource: one channel the user is subscribed to.
///
/// See: <https://developers.google.com/youtube/v3/docs/subscriptions#resource>
#[derive(Debug, Deserialize)]
pub struct Subscription {
    /// The ID that YouTube uses to uniquely identify the subscription.
    ///
    /// This is the id to pass when unsubscribing, not the channel id.
    pub id: String,
    /// Basic details about the subscription.
    pub snippet: SubscriptionSnippet,
}

impl Resource for Subscription {
    const KIND: &'static str = "youtube#subscription";
}

/// Basic details about the subscription.
#[derive(Debug, Deserialize)]
pub struct SubscriptionSnippet {
    /// Title of the subscribed channel.
    pub title: String,
    /// Description of the subscribed channel.
    #[serde(default)]
    pub description: String,
    /// Reference to the subscribed channel.
    #[serde(rename = "resourceId")]
    pub resource_id: Option<ResourceId>,
}
