use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use visual_matcher::{Catalog, MatcherOptions, ScoredProduct, SearchSession};

const DEFAULT_CATALOG: &str = "data/products.json";

#[derive(Parser, Debug)]
#[command(name = "visual-matcher", version, about = "Find catalog products matching an image by its filename")]
#[command(group(ArgGroup::new("input").required(true).args(["file", "url"])))]
struct Cli {
    /// Product catalog (JSON array of products).
    #[arg(long, default_value = DEFAULT_CATALOG)]
    catalog: PathBuf,

    /// Local image file; only its name is used.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Image URL; only the part after the last `/` is used.
    #[arg(long)]
    url: Option<String>,

    /// Return at most this many products.
    #[arg(long)]
    limit: Option<usize>,

    /// Minimum number of matching tags.
    #[arg(long, default_value_t = 1)]
    min_score: usize,

    /// Print results as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only results.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let catalog = Catalog::load(&cli.catalog)
        .with_context(|| format!("loading catalog {}", cli.catalog.display()))?;

    let options = MatcherOptions {
        min_score: cli.min_score,
        limit: cli.limit,
    };
    let mut session = SearchSession::with_options(&catalog, options);

    let results = match (&cli.file, &cli.url) {
        (Some(file), _) => {
            session.select_file(file.to_string_lossy());
            session.search_file()?
        }
        (None, Some(url)) => session.search_url(url)?,
        (None, None) => anyhow::bail!("either --file or --url is required"),
    };
    info!(matched = results.len(), "search finished");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else {
        print_table(results);
    }
    Ok(())
}

fn print_table(results: &[ScoredProduct<'_>]) {
    if results.is_empty() {
        println!("No matching products found.");
        return;
    }
    println!("{:>5}  {:<12}  {:<32}  PRICE", "SCORE", "ID", "NAME");
    for r in results {
        println!(
            "{:>5}  {:<12}  {:<32}  {}",
            r.score,
            r.product.id.to_string(),
            r.product.name,
            r.product.price
        );
    }
}
