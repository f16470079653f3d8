use data_loader::DataIndex;
use std::path::Path;
use std::time::Instant;

fn main() {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let data_dir = Path::new("data");

    println!("Loading ratings and genres...\n");

    let start = Instant::now();
    let index = DataIndex::load_from_files(data_dir)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let (users, items, ratings) = index.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Users: {}", users);
    println!("Items: {}", items);
    println!("Ratings: {}", ratings);
    println!("Genre dimensions: {}", index.genre_dimensionality());
    println!("\nPerformance: {:.0} ratings/second",
             ratings as f64 / elapsed.as_secs_f64());
}
