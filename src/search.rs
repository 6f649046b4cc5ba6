use crate::loader::ContentLoader;
use crate::locale::Locale;
use crate::post::Post;
use crate::ranking::{MatchType, RelevanceWeights};
use serde::Serialize;

/// A matched post with its relevance
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(flatten)]
    pub post: Post,
    pub relevance: u32,
    pub match_type: MatchType,
}

/// Rank posts by case-insensitive substring matches of `query`.
///
/// A blank query matches nothing. Posts with zero relevance are dropped and
/// equal scores keep their input order.
pub fn search(posts: &[Post], query: &str) -> Vec<SearchResult> {
    search_with(posts, query, &RelevanceWeights::default())
}

/// [`search`] with custom weights
pub fn search_with(posts: &[Post], query: &str, weights: &RelevanceWeights) -> Vec<SearchResult> {
    let normalized = query.trim().to_lowercase();
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<SearchResult> = posts
        .iter()
        .filter_map(|post| {
            let (relevance, match_type) = weights.score(post, &normalized);
            (relevance > 0).then(|| SearchResult {
                post: post.clone(),
                relevance,
                match_type,
            })
        })
        .collect();

    results.sort_by(|a, b| b.relevance.cmp(&a.relevance));
    results
}

/// Search over one locale's loaded posts
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    posts: Vec<Post>,
    weights: RelevanceWeights,
}

impl SearchEngine {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts,
            weights: RelevanceWeights::default(),
        }
    }

    /// Load all posts of `locale` and search over them
    pub fn load(loader: &ContentLoader, locale: Locale) -> Self {
        Self::new(loader.load_all(locale))
    }

    pub fn with_weights(mut self, weights: RelevanceWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        search_with(&self.posts, query, &self.weights)
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
