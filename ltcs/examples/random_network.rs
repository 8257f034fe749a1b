//! Compute LTCS for randomly generated flux modes and print the summary

use ltcs::report::write_summary;
use ltcs::{compute, LoadOptions, LtcsConfig, ReactionMasks, SignMatrix};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;

fn main() -> ltcs::Result<()> {
    let modes = 5_000;
    let reactions = 16;
    let threads = std::thread::available_parallelism().map_or(1, |n| n.get());

    println!("Generating {modes} flux modes over {reactions} reactions...");
    let mut rng = StdRng::seed_from_u64(1);
    let rows: Vec<Vec<f64>> = (0..modes)
        .map(|_| {
            (0..reactions)
                .map(|_| match rng.gen_range(0..5) {
                    0 => rng.gen_range(0.1..10.0),
                    1 => -rng.gen_range(0.1..10.0),
                    _ => 0.0,
                })
                .collect()
        })
        .collect();

    let start = Instant::now();
    let loaded = SignMatrix::load(&rows, ReactionMasks::all_reversible(reactions), LoadOptions::default())?;
    println!(
        "Encoded in {:.3}ms, {} reactions retained",
        start.elapsed().as_secs_f64() * 1000.0,
        loaded.retained_reactions().len()
    );

    let start = Instant::now();
    let result = compute(&loaded, &LtcsConfig::with_threads(threads))?;
    println!(
        "{} candidates, {} LTCS in {:.3}ms with {threads} threads",
        result.candidates(),
        result.sets().len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    write_summary(&mut std::io::stdout(), &result.run_summary())
        .map_err(|source| ltcs::Error::Io {
            path: "stdout".into(),
            source,
        })?;
    Ok(())
}
