use data_loader::{Catalog, LoadOptions};
use std::path::PathBuf;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/movies_with_posters.csv"));

    println!("Loading catalog from {}...\n", path.display());

    let start = Instant::now();
    let catalog = Catalog::load_from_file(&path, &LoadOptions::default())?;
    let elapsed = start.elapsed();

    let known_years = catalog
        .items()
        .iter()
        .filter(|item| item.release_year.is_some())
        .count();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Titles: {}", catalog.len());
    println!("Titles with a release year: {}", known_years);
    println!("Main genres: {}", catalog.main_genres().len());
    println!("\nPerformance: {:.0} titles/second",
             catalog.len() as f64 / elapsed.as_secs_f64());
    Ok(())
}
