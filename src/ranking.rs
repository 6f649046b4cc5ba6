use crate::post::Post;
use serde::{Deserialize, Serialize};

/// Which field made a post match. Only the first of title, excerpt and tag
/// that matches is reported; posts matching only in the body report `Content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Title,
    Excerpt,
    Tag,
    Content,
}

/// Relevance weights per matched field
#[derive(Debug, Clone, Copy)]
pub struct RelevanceWeights {
    pub title: u32,
    pub excerpt: u32,
    pub tag: u32,
    pub content: u32,
    pub exact_title: u32,
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            title: 10,
            excerpt: 7,
            tag: 5,
            content: 2,
            exact_title: 20,
        }
    }
}

impl RelevanceWeights {
    /// Score a post against an already trimmed and lowercased query
    pub fn score(&self, post: &Post, normalized_query: &str) -> (u32, MatchType) {
        let mut relevance = 0;
        let mut match_type = MatchType::Content;

        let title = post.title.to_lowercase();
        if title.contains(normalized_query) {
            relevance += self.title;
            match_type = MatchType::Title;
        }

        let excerpt_matches = post
            .excerpt
            .as_ref()
            .is_some_and(|excerpt| excerpt.to_lowercase().contains(normalized_query));
        if excerpt_matches {
            relevance += self.excerpt;
            if match_type == MatchType::Content {
                match_type = MatchType::Excerpt;
            }
        }

        if post
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(normalized_query))
        {
            relevance += self.tag;
            if match_type == MatchType::Content {
                match_type = MatchType::Tag;
            }
        }

        if post.content.to_lowercase().contains(normalized_query) {
            relevance += self.content;
        }

        if title == normalized_query {
            relevance += self.exact_title;
        }

        (relevance, match_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, excerpt: Option<&str>, tags: &[&str], content: &str) -> Post {
        Post {
            slug: "p".to_string(),
            title: title.to_string(),
            date: "2024-01-01".to_string(),
            excerpt: excerpt.map(str::to_string),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            content: content.to_string(),
            reading_time: 1,
            featured_image: None,
        }
    }

    #[test]
    fn test_exact_title_bonus() {
        let weights = RelevanceWeights::default();
        let (score, kind) = weights.score(&post("Hello World", None, &[], ""), "hello world");
        assert_eq!(score, 30);
        assert_eq!(kind, MatchType::Title);
    }

    #[test]
    fn test_excerpt_and_content() {
        let weights = RelevanceWeights::default();
        let p = post("Other", Some("all about rust"), &["misc"], "rust body");
        assert_eq!(weights.score(&p, "rust"), (9, MatchType::Excerpt));
    }

    #[test]
    fn test_excerpt_wins_over_tag() {
        let weights = RelevanceWeights::default();
        let p = post("Other", Some("rust"), &["Rustacean"], "");
        assert_eq!(weights.score(&p, "rust"), (12, MatchType::Excerpt));
    }

    #[test]
    fn test_tag_and_content_only() {
        let weights = RelevanceWeights::default();
        assert_eq!(
            weights.score(&post("x", None, &["검색"], ""), "검색"),
            (5, MatchType::Tag)
        );
        assert_eq!(
            weights.score(&post("x", None, &[], "body with query"), "query"),
            (2, MatchType::Content)
        );
        assert_eq!(
            weights.score(&post("x", None, &[], "nothing"), "query"),
            (0, MatchType::Content)
        );
    }
}
