//! Tag filtering, sorting and view selection for post listings.

use crate::post::Post;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of posts shown by the `recent` and `popular` views
pub const DISPLAY_LIMIT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    /// Newest first
    #[default]
    Date,
    /// Alphabetical, case-insensitive
    Title,
    /// Shortest first
    ReadingTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// The first few posts of the sorted list
    #[default]
    Recent,
    /// The longest reads
    Popular,
    /// Everything
    All,
}

/// Every distinct tag, in order of first appearance
pub fn all_tags(posts: &[Post]) -> Vec<String> {
    let mut seen = HashSet::new();
    posts
        .iter()
        .flat_map(|post| post.tags.iter())
        .filter(|tag| seen.insert(*tag))
        .cloned()
        .collect()
}

/// Posts carrying at least one of the selected tags; all posts when none are selected
pub fn filter_by_tags<'a>(posts: &'a [Post], selected: &[String]) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|post| selected.is_empty() || selected.iter().any(|tag| post.tags.contains(tag)))
        .collect()
}

pub fn sort_posts(posts: &mut [&Post], sort: SortBy) {
    match sort {
        SortBy::Date => posts.sort_by(|a, b| b.date.cmp(&a.date)),
        // lowercase code point order; matches locale collation for Hangul and ASCII titles
        SortBy::Title => posts.sort_by_cached_key(|post| post.title.to_lowercase()),
        SortBy::ReadingTime => posts.sort_by_key(|post| post.reading_time),
    }
}

/// Posts to show on a listing page
pub fn display<'a>(
    posts: &'a [Post],
    selected_tags: &[String],
    sort: SortBy,
    view: ViewMode,
) -> Vec<&'a Post> {
    let mut listed = filter_by_tags(posts, selected_tags);
    sort_posts(&mut listed, sort);

    match view {
        ViewMode::Recent => listed.truncate(DISPLAY_LIMIT),
        ViewMode::Popular => {
            listed.sort_by(|a, b| b.reading_time.cmp(&a.reading_time));
            listed.truncate(DISPLAY_LIMIT);
        }
        ViewMode::All => {}
    }

    listed
}
