use crate::error::ContentError;
use crate::locale::Locale;
use crate::post::Post;
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of post sources
pub const POST_EXTENSION: &str = "mdx";

/// Default content root, relative to the working directory
pub const DEFAULT_CONTENT_DIR: &str = "content";

/// Reads posts from `<root>/<locale>/<slug>.mdx`
#[derive(Debug, Clone)]
pub struct ContentLoader {
    root: PathBuf,
}

impl ContentLoader {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn locale_dir(&self, locale: Locale) -> PathBuf {
        self.root.join(locale.code())
    }

    fn post_path(&self, locale: Locale, slug: &str) -> PathBuf {
        self.locale_dir(locale)
            .join(format!("{}.{}", slug, POST_EXTENSION))
    }

    /// Load every post of a locale, newest first.
    ///
    /// Never fails: a missing directory yields no posts and posts that fail
    /// to load are logged and skipped.
    pub fn load_all(&self, locale: Locale) -> Vec<Post> {
        let dir = self.locale_dir(locale);

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                if err.kind() == std::io::ErrorKind::NotFound {
                    tracing::debug!(dir = %dir.display(), "no content directory for locale");
                } else {
                    tracing::error!(dir = %dir.display(), error = %err, "failed to list content directory");
                }
                return Vec::new();
            }
        };

        let mut posts: Vec<Post> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.file_name()),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable directory entry");
                    None
                }
            })
            .filter_map(|name| {
                let name = name.to_str()?;
                name.strip_suffix(&format!(".{}", POST_EXTENSION))
                    .map(str::to_string)
            })
            .filter_map(|slug| self.load_one(locale, &slug))
            .collect();

        // ISO-8601 strings of equal shape sort chronologically
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        tracing::debug!(%locale, count = posts.len(), "loaded posts");
        posts
    }

    /// Load a single post. `None` when it does not exist or cannot be parsed.
    pub fn load_one(&self, locale: Locale, slug: &str) -> Option<Post> {
        match self.try_load_one(locale, slug) {
            Ok(post) => post,
            Err(err) => {
                tracing::error!(%locale, slug, error = %err, "error reading post");
                None
            }
        }
    }

    /// Like [`load_one`](Self::load_one) but reports read and parse errors
    pub fn try_load_one(&self, locale: Locale, slug: &str) -> Result<Option<Post>, ContentError> {
        if !is_valid_slug(slug) {
            tracing::warn!(%locale, slug, "rejected invalid slug");
            return Ok(None);
        }

        let path = self.post_path(locale, slug);
        if !path.is_file() {
            return Ok(None);
        }

        let source = fs::read_to_string(&path)?;
        Post::from_source(slug, &source).map(Some)
    }

    /// Locales in which a post with this slug exists
    pub fn alternates(&self, slug: &str) -> Vec<Locale> {
        if !is_valid_slug(slug) {
            return Vec::new();
        }

        Locale::ALL
            .into_iter()
            .filter(|locale| self.post_path(*locale, slug).is_file())
            .collect()
    }
}

impl Default for ContentLoader {
    fn default() -> Self {
        Self::new(DEFAULT_CONTENT_DIR)
    }
}

/// A slug must name a file directly inside the locale directory
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.starts_with('.') && !slug.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result};
    use tempfile::TempDir;

    fn write_post(root: &Path, locale: &str, slug: &str, source: &str) -> Result<()> {
        let dir = root.join(locale);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{}.mdx", slug)), source)?;
        Ok(())
    }

    fn dated(date: &str) -> String {
        format!("---\ntitle: Post {}\ndate: {}\n---\nbody text", date, date)
    }

    #[test]
    fn test_missing_locale_dir() -> Result<()> {
        let tmp = TempDir::new()?;
        let loader = ContentLoader::new(tmp.path());
        assert!(loader.load_all(Locale::Ko).is_empty());
        assert!(loader.load_all(Locale::En).is_empty());
        Ok(())
    }

    #[test]
    fn test_load_all_sorted_by_date_desc() -> Result<()> {
        let tmp = TempDir::new()?;
        write_post(tmp.path(), "en", "a", &dated("2024-01-01"))?;
        write_post(tmp.path(), "en", "b", &dated("2024-06-15"))?;
        write_post(tmp.path(), "en", "c", &dated("2023-12-31"))?;

        let loader = ContentLoader::new(tmp.path());
        let dates: Vec<String> = loader
            .load_all(Locale::En)
            .into_iter()
            .map(|p| p.date)
            .collect();
        assert_eq!(dates, vec!["2024-06-15", "2024-01-01", "2023-12-31"]);
        Ok(())
    }

    #[test]
    fn test_load_all_skips_bad_and_foreign_files() -> Result<()> {
        let tmp = TempDir::new()?;
        write_post(tmp.path(), "ko", "good", &dated("2024-01-01"))?;
        write_post(tmp.path(), "ko", "broken", "---\ntitle: [oops\n---\nbody")?;
        write_post(tmp.path(), "ko", "open", "---\ntitle: never closed\n")?;
        fs::write(tmp.path().join("ko").join("notes.md"), "ignored")?;

        let loader = ContentLoader::new(tmp.path());
        let posts = loader.load_all(Locale::Ko);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "good");
        Ok(())
    }

    #[test]
    fn test_blank_date_still_listed() -> Result<()> {
        let tmp = TempDir::new()?;
        write_post(tmp.path(), "en", "undated", "---\ntitle: ''\ndate: ''\n---\n")?;
        write_post(tmp.path(), "en", "old", &dated("2020-01-01"))?;

        let loader = ContentLoader::new(tmp.path());
        let posts = loader.load_all(Locale::En);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].slug, "undated");
        assert_eq!(posts[0].title, "undated");
        assert_eq!(posts[0].reading_time, 1);
        Ok(())
    }

    #[test]
    fn test_locales_are_independent() -> Result<()> {
        let tmp = TempDir::new()?;
        write_post(tmp.path(), "ko", "only-ko", &dated("2024-01-01"))?;

        let loader = ContentLoader::new(tmp.path());
        assert_eq!(loader.load_all(Locale::Ko).len(), 1);
        assert!(loader.load_all(Locale::En).is_empty());
        Ok(())
    }

    #[test]
    fn test_load_one() -> Result<()> {
        let tmp = TempDir::new()?;
        write_post(
            tmp.path(),
            "ko",
            "hello",
            "---\ntitle: 안녕하세요\ndate: 2024-03-01\ntags: [인사]\n---\n본문 입니다",
        )?;

        let loader = ContentLoader::new(tmp.path());
        let post = loader
            .load_one(Locale::Ko, "hello")
            .context("post should load")?;
        assert_eq!(post.slug, "hello");
        assert_eq!(post.title, "안녕하세요");
        assert_eq!(post.tags, vec!["인사"]);
        assert_eq!(post.content, "본문 입니다");
        assert_eq!(post.reading_time, 1);

        assert!(loader.load_one(Locale::Ko, "missing").is_none());
        assert!(loader.load_one(Locale::En, "hello").is_none());
        Ok(())
    }

    #[test]
    fn test_try_load_one_reports_errors() -> Result<()> {
        let tmp = TempDir::new()?;
        write_post(tmp.path(), "en", "broken", "---\ntitle: [oops\n---\n")?;

        let loader = ContentLoader::new(tmp.path());
        assert!(matches!(
            loader.try_load_one(Locale::En, "broken"),
            Err(ContentError::FrontMatter(_))
        ));
        assert!(loader.load_one(Locale::En, "broken").is_none());
        Ok(())
    }

    #[test]
    fn test_rejects_path_traversal() -> Result<()> {
        let tmp = TempDir::new()?;
        write_post(tmp.path(), "en", "secret", &dated("2024-01-01"))?;

        let loader = ContentLoader::new(tmp.path());
        assert!(loader.load_one(Locale::Ko, "../en/secret").is_none());
        assert!(loader.load_one(Locale::Ko, "").is_none());
        assert!(loader.load_one(Locale::Ko, ".hidden").is_none());
        Ok(())
    }

    #[test]
    fn test_alternates() -> Result<()> {
        let tmp = TempDir::new()?;
        write_post(tmp.path(), "ko", "both", &dated("2024-01-01"))?;
        write_post(tmp.path(), "en", "both", &dated("2024-01-01"))?;
        write_post(tmp.path(), "en", "english", &dated("2024-01-01"))?;

        let loader = ContentLoader::new(tmp.path());
        assert_eq!(loader.alternates("both"), vec![Locale::Ko, Locale::En]);
        assert_eq!(loader.alternates("english"), vec![Locale::En]);
        assert!(loader.alternates("nothing").is_empty());
        Ok(())
    }
}
