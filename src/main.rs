// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_blog::{
    sort_posts, BlogCommand, BlogConfig, BlogService, CommandLineInput, NotionHttpClient,
    NotionRepository, Post, PostDetail, TagFilterItem,
};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_blog.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    // Logs go to stderr so --json output stays machine-readable
    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_level)))
                .build("console", Box::new(console_appender)),
        )
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Runs one subcommand against the blog's database.
async fn run(command: BlogCommand, service: &BlogService) -> anyhow::Result<()> {
    match command {
        BlogCommand::Posts { tag, sort, json } => {
            let mut posts = service
                .published_posts(tag.as_deref())
                .await
                .context("Failed to load published posts")?;
            sort_posts(&mut posts, sort);
            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
            } else {
                print_posts(&posts);
            }
        }
        BlogCommand::Tags { json } => {
            let tags = service.tags().await.context("Failed to load tags")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tags)?);
            } else {
                print_tags(&tags);
            }
        }
        BlogCommand::Post { slug, json } => {
            let detail = service.post_by_slug(&slug).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&detail)?);
            } else {
                print_post(&detail);
            }
        }
    }
    Ok(())
}

fn print_posts(posts: &[Post]) {
    if posts.is_empty() {
        println!("No published posts.");
        return;
    }
    for post in posts {
        let date = post.sort_key().get(..10).unwrap_or_else(|| post.sort_key());
        let tags = if post.tags().is_empty() {
            String::new()
        } else {
            format!("  [{}]", post.tags().join(", "))
        };
        println!("{:<10}  {}  ({}){}", date, post.title, post.slug, tags);
    }
}

fn print_tags(tags: &[TagFilterItem]) {
    for tag in tags {
        println!("{:>4}  {}", tag.count, tag.name);
    }
}

fn print_post(detail: &PostDetail) {
    let post = &detail.metadata;
    println!("# {}", post.title);

    let byline: Vec<&str> = [post.author.as_deref(), post.date.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !byline.is_empty() {
        println!("_{}_", byline.join(" · "));
    }
    if let Some(description) = &post.description {
        println!("> {}", description);
    }
    println!();

    for line in &detail.content {
        println!("{}", line);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = BlogConfig::resolve(&cli)?;
    log::debug!(
        "Using database {} via {} (timeout {:?})",
        config.database_id,
        config.api_base_url,
        config.request_timeout
    );

    let client: Arc<dyn NotionRepository> = Arc::new(NotionHttpClient::from_config(&config)?);
    let service = BlogService::new(client, config.database_id.clone());

    run(cli.command, &service).await
}
