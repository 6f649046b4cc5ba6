use crate::error::ContentError;
use crate::front_matter;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

const WORDS_PER_MINUTE: usize = 200;

/// A single blog post: front matter fields, body and derived values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub content: String,
    pub reading_time: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
}

impl Post {
    /// Build a post from the raw text of `<slug>.mdx`
    pub fn from_source(slug: &str, source: &str) -> Result<Self, ContentError> {
        let (front_matter, body) = front_matter::parse(source)?;

        let date = non_blank(front_matter.date).unwrap_or_else(|| {
            tracing::warn!(slug, "post has no date, using load time");
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
        });

        Ok(Self {
            slug: slug.to_string(),
            title: non_blank(front_matter.title).unwrap_or_else(|| slug.to_string()),
            date,
            excerpt: front_matter.excerpt,
            tags: front_matter.tags.unwrap_or_default(),
            content: body.to_string(),
            reading_time: reading_time(body),
            featured_image: front_matter.featured_image,
        })
    }

    /// Short description for listings: the excerpt, or the start of the body without markup symbols
    pub fn summary(&self, max_chars: usize) -> String {
        match self.excerpt.as_deref().filter(|e| !e.trim().is_empty()) {
            Some(excerpt) => excerpt.to_string(),
            None => self
                .content
                .chars()
                .take(max_chars)
                .filter(|c| !matches!(c, '#' | '*' | '`'))
                .collect(),
        }
    }
}

/// An empty or whitespace-only field counts as absent
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Estimated minutes to read `content`, never less than one
pub fn reading_time(content: &str) -> u32 {
    let words = content.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}
