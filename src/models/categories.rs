//! Guide-category resources.

use serde::Deserialize;

use super::Resource;

/// A `guideCategory` resource: a browsing category curated by YouTube.
#[derive(Debug, Deserialize)]
pub struct GuideCategory {
    /// The ID that YouTube uses to uniquely identify the category.
    pub id: String,
    /// Basic details about the category.
    pub snippet: GuideCategorySnippet,
}

impl Resource for GuideCategory {
    const KIND: &'static str = "youtube#guideCategory";
}

/// Basic details about the category.
#[derive(Debug, Deserialize)]
pub struct GuideCategorySnippet {
    /// The category's title.
    pub title: String,
}
