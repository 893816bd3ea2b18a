use anyhow::{Error, Result};
use log::info;
use std::time::Instant;
use structopt::StructOpt;
use unsplash_gallery::{
    build_session,
    catalog::{self, CATEGORY_TAGS, CURATED_COLLECTIONS, DEFAULT_QUERY},
    config::Config,
    session::SessionSnapshot,
};

#[derive(StructOpt, Debug)]
#[structopt(name = "unsplash_search")]
struct Opt {
    /// Search query string
    #[structopt(short, long)]
    query: Option<String>,

    /// Page number, starting at 1
    #[structopt(short, long, default_value = "1")]
    page: u32,

    /// Search one of the category tags
    #[structopt(long, conflicts_with_all = &["query", "collection"])]
    category: Option<String>,

    /// Search a curated collection by title
    #[structopt(long, conflicts_with = "query")]
    collection: Option<String>,

    /// Print the category tags and curated collections, then exit
    #[structopt(long)]
    list: bool,

    /// Print the session snapshot as JSON
    #[structopt(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let options = Opt::from_args();

    if options.list {
        print_catalog();
        return Ok(());
    }

    let query = resolve_query(&options)?;
    let config = Config::from_env()?;

    let start = Instant::now();
    let mut session = build_session(&config, &query, options.page)?;

    if let Some(handle) = session.load() {
        handle.await?;
    }

    let snapshot = session.snapshot();
    info!("done: {:?}", start.elapsed());

    if options.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", render_snapshot(&snapshot));
    }

    match snapshot.error {
        Some(error) => Err(anyhow::anyhow!(error)),
        None => Ok(()),
    }
}

fn resolve_query(options: &Opt) -> Result<String> {
    if let Some(category) = &options.category {
        return catalog::active_category(category)
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("unknown category {:?}", category));
    }

    if let Some(title) = &options.collection {
        return catalog::find_collection(title)
            .map(|collection| collection.query.to_string())
            .ok_or_else(|| anyhow::anyhow!("unknown collection {:?}", title));
    }

    let query = options.query.as_deref().unwrap_or(DEFAULT_QUERY).trim();
    if query.is_empty() {
        return Err(anyhow::anyhow!("query is required"));
    }

    Ok(query.to_string())
}

fn print_catalog() {
    println!("Categories:");
    for tag in CATEGORY_TAGS {
        println!("  {}", tag);
    }

    println!("Collections:");
    for collection in CURATED_COLLECTIONS.iter() {
        println!(
            "  {} [{}] - {} (query: {:?})",
            collection.title, collection.vibe, collection.description, collection.query
        );
    }
}

fn render_snapshot(snapshot: &SessionSnapshot) -> String {
    let mut lines = vec![format!(
        "{:?}: {} results, page {} of {}",
        snapshot.query, snapshot.total_results, snapshot.page, snapshot.total_pages
    )];

    if let Some(category) = snapshot.active_category {
        lines.push(format!("Active mood: {}", category));
    }

    // Failures are reported once, by the error `main` returns.
    if snapshot.error.is_some() {
        return lines.join("\n");
    }

    if snapshot.photos.is_empty() {
        lines.push(format!(
            "No images found for {:?}. Try another keyword.",
            snapshot.query
        ));
    }

    for photo in &snapshot.photos {
        lines.push(format!(
            "- {} by {} ({} likes)\n  {}\n  {}",
            photo.alt_text(),
            photo.author_label(),
            photo.like_count,
            photo.permalink,
            photo.thumbnail_url
        ));
    }

    let pages: Vec<String> = snapshot
        .pages
        .iter()
        .map(|page| {
            if *page == snapshot.page {
                format!("[{}]", page)
            } else {
                page.to_string()
            }
        })
        .collect();
    lines.push(format!("Pages: {}", pages.join(" ")));

    lines.join("\n")
}
