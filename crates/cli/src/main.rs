use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{Recommender, RecommenderConfig};
use pipeline::{ContentTypeFilter, Recommendation, RecommendQuery};
use rand::Rng;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// Titles per row in the recommendation grid
const GRID_COLUMNS: usize = 5;
/// Characters per grid cell
const CELL_WIDTH: usize = 30;

const EMPTY_MESSAGE: &str = "No recommendations found. Try another title or genre.";

/// ReelMatch - Movie & TV Show Recommender
#[derive(Parser)]
#[command(name = "reelmatch")]
#[command(about = "Content-based movie and TV show recommendations", long_about = None)]
struct Cli {
    /// Path to the catalog CSV
    #[arg(short, long, env = "REELMATCH_CATALOG", default_value = engine::config::DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,

    /// JSON config file (overrides --catalog)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend titles similar to a title or genre
    Recommend {
        /// Title to find similar titles for (exact, case-insensitive)
        #[arg(long, default_value = "")]
        title: String,

        /// Genre filter, or "All"
        #[arg(long, default_value = "All")]
        genre: String,

        /// Content type: Both, Movie or "TV Show"
        #[arg(long = "type", default_value = "Both")]
        content_type: String,

        /// Number of recommendations to return
        #[arg(long)]
        limit: Option<usize>,

        /// Print results as JSON instead of a grid
        #[arg(long)]
        json: bool,
    },

    /// List the genre choices
    Genres,

    /// Search for titles (case-insensitive substring match)
    Search {
        #[arg(long)]
        title: String,
    },

    /// Show how similar two titles are
    Similarity {
        #[arg(long)]
        first: String,

        #[arg(long)]
        second: String,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RecommenderConfig::from_json_file(path)?,
        None => RecommenderConfig::new(&cli.catalog),
    };

    // Load catalog and build the index (this may take a moment)
    println!("Loading catalog from {}...", config.catalog_path.display());
    let start = Instant::now();
    let recommender = Recommender::load(&config).context("Failed to start recommender")?;
    println!(
        "{} Ready in {:?} ({} titles)",
        "✓".green(),
        start.elapsed(),
        recommender.catalog().len()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            title,
            genre,
            content_type,
            limit,
            json,
        } => handle_recommend(&recommender, &title, &genre, &content_type, limit, json)?,
        Commands::Genres => handle_genres(&recommender),
        Commands::Search { title } => handle_search(&recommender, &title),
        Commands::Similarity { first, second } => handle_similarity(&recommender, &first, &second)?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(recommender, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    recommender: &Recommender,
    title: &str,
    genre: &str,
    content_type: &str,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let recommendations = recommender.recommend(title, genre, content_type, limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
        return Ok(());
    }

    if recommendations.is_empty() {
        println!("{}", EMPTY_MESSAGE.yellow());
        return Ok(());
    }

    println!("{}", "Recommendations:".bold().blue());
    print!("{}", render_grid(&recommendations));
    Ok(())
}

/// Handle the 'genres' command
fn handle_genres(recommender: &Recommender) {
    println!("{}", "Genres:".bold().blue());
    for genre in recommender.genre_options() {
        println!("{}{}", "• ".green(), genre);
    }
    println!("{}", "Content types:".bold().blue());
    for option in ContentTypeFilter::OPTIONS {
        println!("{}{}", "• ".green(), option);
    }
}

/// Handle the 'search' command
fn handle_search(recommender: &Recommender, title: &str) {
    let matches = recommender.catalog().search_titles(title);
    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("{}", "No titles found.".yellow());
        return;
    }
    // Display top 20 results
    for item in matches.iter().take(20) {
        println!(
            "{}: {} [{}] {} - {}",
            item.id.to_string().green(),
            item,
            item.genres,
            item.kind,
            item.director
        );
    }
    if matches.len() > 20 {
        println!("... and {} more", matches.len() - 20);
    }
}

/// Handle the 'similarity' command
fn handle_similarity(recommender: &Recommender, first: &str, second: &str) -> Result<()> {
    let scores = recommender.similarity_between(first, second)?;
    println!("{}", format!("'{}' vs '{}':", first, second).bold().blue());
    println!("{}Content similarity: {:.3}", "• ".cyan(), scores.content);
    println!("{}Genre similarity:   {:.3}", "• ".cyan(), scores.genre);
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(recommender: Recommender, requests: usize, concurrent: usize) -> Result<()> {
    let catalog_len = recommender.catalog().len();

    // Random existing titles with a random content type
    let queries: Vec<RecommendQuery> = {
        let mut rng = rand::rng();
        (0..requests)
            .map(|_| {
                let id = rng.random_range(0..catalog_len);
                let title = recommender
                    .catalog()
                    .get(id)
                    .map(|item| item.title.clone())
                    .unwrap_or_default();
                let content_type = ContentTypeFilter::OPTIONS[rng.random_range(0..ContentTypeFilter::OPTIONS.len())];
                RecommendQuery::new(title)
                    .with_content_type(content_type)
                    .with_top_n(recommender.default_top_n())
            })
            .collect()
    };

    let permits = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_start = Instant::now();

    // Queries are CPU-bound, so run them on the blocking pool
    let mut handles = vec![];
    for query in queries {
        let recommender = recommender.clone();
        let permits = permits.clone();
        let handle = tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            tokio::task::spawn_blocking(move || {
                let start = Instant::now();
                recommender.recommend_query(&query)?;
                Ok::<_, anyhow::Error>(start.elapsed())
            })
            .await?
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let wall_time = wall_start.elapsed();

    if timings.is_empty() {
        println!("No requests made.");
        return Ok(());
    }

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = percentile(&timings, 0.50);
    let p95 = percentile(&timings, 0.95);
    let p99 = percentile(&timings, 0.99);
    let throughput = requests as f64 / wall_time.as_secs_f64();

    println!("Benchmark results:");
    println!("Total time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Value at fraction `p` of a sorted, non-empty slice
fn percentile(sorted: &[Duration], p: f64) -> Duration {
    let idx = ((sorted.len() as f64 * p) as usize).min(sorted.len() - 1);
    sorted[idx]
}

/// Caption under a poster: "Title (Year)"
fn caption(rec: &Recommendation) -> String {
    let title = if rec.item.title.trim().is_empty() {
        "Unknown Title"
    } else {
        rec.item.title.as_str()
    };
    format!("{} ({})", title, rec.item.display_year())
}

/// Cut to `width` characters, marking the cut with "…"
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        format!("{:<width$}", text)
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Lay results out in rows of five: caption line, then poster line
fn render_grid(recommendations: &[Recommendation]) -> String {
    let mut out = String::new();
    for row in recommendations.chunks(GRID_COLUMNS) {
        let captions: Vec<String> = row.iter().map(|r| fit(&caption(r), CELL_WIDTH)).collect();
        let posters: Vec<String> = row.iter().map(|r| fit(&r.item.poster_url, CELL_WIDTH)).collect();
        out.push_str(captions.join("  ").trim_end());
        out.push('\n');
        out.push_str(posters.join("  ").trim_end());
        out.push_str("\n\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Catalog, LoadOptions, RawRecord, DEFAULT_PLACEHOLDER_POSTER};

    fn recommendations(rows: &[(&str, Option<&str>)]) -> Vec<Recommendation> {
        let records = rows
            .iter()
            .map(|(title, year)| RawRecord {
                title: Some(title.to_string()),
                release_year: year.map(str::to_string),
                ..RawRecord::default()
            })
            .collect();
        let catalog = Catalog::from_records(records, &LoadOptions::default()).unwrap();
        catalog
            .items()
            .iter()
            .map(|item| Recommendation {
                item: item.clone(),
                score: 0.5,
                strategy: "title_match",
            })
            .collect()
    }

    #[test]
    fn test_caption() {
        let recs = recommendations(&[("Roma", Some("2018")), ("Mystery", None)]);
        assert_eq!(caption(&recs[0]), "Roma (2018)");
        assert_eq!(caption(&recs[1]), "Mystery (Unknown)");
    }

    #[test]
    fn test_caption_blank_title() {
        let mut recs = recommendations(&[("Roma", Some("2018"))]);
        recs[0].item.title = " ".to_string();
        assert_eq!(caption(&recs[0]), "Unknown Title (2018)");
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdefgh", 5), "abcd…");
    }

    #[test]
    fn test_grid_rows_of_five() {
        let rows: Vec<(String, Option<&str>)> =
            (0..7).map(|i| (format!("T{i}"), Some("2020"))).collect();
        let rows: Vec<(&str, Option<&str>)> = rows.iter().map(|(t, y)| (t.as_str(), *y)).collect();
        let grid = render_grid(&recommendations(&rows));

        let lines: Vec<&str> = grid.lines().collect();
        // caption, poster, blank for each of the two rows
        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("T0 (2020)") && lines[0].contains("T4 (2020)"));
        assert!(!lines[0].contains("T5"));
        assert!(lines[1].starts_with(&DEFAULT_PLACEHOLDER_POSTER[..CELL_WIDTH - 1]));
        assert!(lines[3].contains("T6 (2020)"));
    }

    #[test]
    fn test_percentile() {
        let sorted: Vec<Duration> = (1..=100).map(Duration::from_millis).collect();
        assert_eq!(percentile(&sorted, 0.5), Duration::from_millis(51));
        assert_eq!(percentile(&sorted, 0.99), Duration::from_millis(100));
        assert_eq!(percentile(&sorted[..1], 0.95), Duration::from_millis(1));
    }
}
