use anyhow::{Context, Result};
use bhlog::browse::{self, SortBy, ViewMode};
use bhlog::{highlight, snippet, Archive, ContentLoader, Locale, SearchEngine, DEFAULT_SNIPPET_LENGTH};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Browse and search a bilingual markdown blog", long_about = None)]
struct Args {
    /// Root directory holding one folder per locale
    #[arg(short, long, env = "BHLOG_CONTENT_DIR", default_value = bhlog::loader::DEFAULT_CONTENT_DIR)]
    content_dir: PathBuf,

    /// Content locale (ko or en)
    #[arg(short, long, default_value = "ko")]
    locale: Locale,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List posts
    List {
        #[arg(long, value_enum, default_value_t = SortBy::Date)]
        sort: SortBy,
        #[arg(long, value_enum, default_value_t = ViewMode::All)]
        view: ViewMode,
        /// Only posts with any of these tags
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// Show a single post
    Show { slug: String },
    /// Search posts
    Search {
        query: String,
        /// Wrap matches in <mark> elements
        #[arg(long)]
        html: bool,
    },
    /// List every tag
    Tags,
    /// Posts grouped by year and month
    Archive,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bhlog=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let loader = ContentLoader::new(&args.content_dir);
    tracing::debug!(root = %loader.root().display(), locale = %args.locale, "using content root");

    match args.command {
        Command::List { sort, view, tags } => {
            let posts = loader.load_all(args.locale);
            let listed = browse::display(&posts, &tags, sort, view);

            if args.json {
                return print_json(&listed);
            }
            for post in listed {
                println!(
                    "{}\t{}\t{} min\t{}",
                    post.date, post.slug, post.reading_time, post.title
                );
            }
        }
        Command::Show { slug } => {
            let post = loader
                .load_one(args.locale, &slug)
                .with_context(|| format!("Post '{}' not found in locale '{}'", slug, args.locale))?;

            if args.json {
                return print_json(&post);
            }
            println!("{}", post.title);
            println!("{} · {} min read", post.date, post.reading_time);
            if !post.tags.is_empty() {
                println!("tags: {}", post.tags.join(", "));
            }
            let alternates: Vec<String> = loader
                .alternates(&slug)
                .into_iter()
                .filter(|locale| *locale != args.locale)
                .map(|locale| locale.to_string())
                .collect();
            if !alternates.is_empty() {
                println!("also in: {}", alternates.join(", "));
            }
            println!();
            println!("{}", post.content);
        }
        Command::Search { query, html } => {
            let engine = SearchEngine::load(&loader, args.locale);

            let start = Instant::now();
            let results = engine.search(&query);
            tracing::info!(
                query = %query,
                matches = results.len(),
                elapsed = ?start.elapsed(),
                "search finished"
            );

            if args.json {
                return print_json(&results);
            }
            for result in &results {
                let title = if html {
                    highlight(&result.post.title, &query)
                } else {
                    result.post.title.clone()
                };
                let excerpt = snippet(&result.post.content, &query, DEFAULT_SNIPPET_LENGTH);
                let excerpt = if html { highlight(&excerpt, &query) } else { excerpt };

                println!(
                    "[{} {:?}] {} ({})",
                    result.relevance, result.match_type, title, result.post.slug
                );
                println!("    {}", excerpt.replace('\n', " "));
            }
        }
        Command::Tags => {
            let posts = loader.load_all(args.locale);
            let tags = browse::all_tags(&posts);

            if args.json {
                return print_json(&tags);
            }
            for tag in tags {
                println!("{}", tag);
            }
        }
        Command::Archive => {
            let posts = loader.load_all(args.locale);
            let archive = Archive::build(&posts, args.locale);

            if args.json {
                return print_json(&archive);
            }
            for year in &archive.years {
                println!("{}", year.year);
                for month in &year.months {
                    println!("  {} ({})", month.name, month.posts.len());
                    for post in &month.posts {
                        println!("    {}\t{}", post.date, post.title);
                    }
                }
            }
        }
    }

    Ok(())
}
