pub mod archive;
pub mod browse;
pub mod error;
pub mod front_matter;
pub mod highlight;
pub mod loader;
pub mod locale;
pub mod post;
pub mod ranking;
pub mod search;

// Re-export commonly used types
pub use archive::Archive;
pub use error::ContentError;
pub use front_matter::FrontMatter;
pub use highlight::{highlight, snippet, DEFAULT_SNIPPET_LENGTH};
pub use loader::ContentLoader;
pub use locale::Locale;
pub use post::Post;
pub use ranking::{MatchType, RelevanceWeights};
pub use search::{search, SearchEngine, SearchResult};

// Re-export error types
pub use anyhow::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
