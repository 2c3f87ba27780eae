use data_loader::Dataset;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data");

    println!("Loading catalog and similarity matrix...\n");

    let start = Instant::now();
    let dataset = Dataset::load_from_files(data_dir)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let (movies, dimension) = dataset.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", movies);
    println!("Matrix: {}x{}", dimension, dimension);
    println!("\nPerformance: {:.0} scores/second",
             (dimension * dimension) as f64 / elapsed.as_secs_f64());
}
