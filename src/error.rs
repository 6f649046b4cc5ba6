use thiserror::Error;

/// Errors raised while reading and parsing blog content
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed front matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),

    #[error("front matter block is not closed")]
    UnterminatedFrontMatter,

    #[error("unknown locale '{0}' (expected one of: ko, en)")]
    UnknownLocale(String),
}
