//! Performance benchmark comparing serial and parallel staging

use std::time::Instant;

use rand::{SeedableRng, rngs::StdRng};
use tile_life::{ConwayRule, Grid, Simulation, StepMode};

const SEED: u64 = 42;

fn benchmark_mode(mode: StepMode, size: usize, iterations: u64) -> f64 {
    let mut rng = StdRng::seed_from_u64(SEED);
    let grid = match Grid::random(size, size, 0.3, &mut rng) {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("cannot build {size}x{size} grid: {err}");
            return 0.0;
        }
    };
    let mut sim = Simulation::with_mode(grid, Box::new(ConwayRule), mode);

    let start = Instant::now();
    sim.advance(iterations);
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    println!("=== Game of Life Performance Benchmark ===\n");

    let sizes = [10, 100, 250, 500, 1000, 2000];
    let iterations = 20;

    println!("{:>10} {:>12} {:>12} {:>10}", "Size", "Serial", "Parallel", "Speedup");
    println!("{:-<48}", "");

    for size in sizes {
        let serial_ms = benchmark_mode(StepMode::Serial, size, iterations);
        let parallel_ms = benchmark_mode(StepMode::Parallel, size, iterations);

        let speedup_str = if parallel_ms > 0.0 {
            format!("{:>9.1}x", serial_ms / parallel_ms)
        } else {
            format!("{:>10}", "-")
        };

        println!(
            "{:>10} {:>12.3} {:>12.3} {}",
            format!("{}x{}", size, size),
            serial_ms,
            parallel_ms,
            speedup_str
        );
    }

    println!("\n=== Throughput at 1000x1000 ===\n");

    let cells = 1000 * 1000;
    for mode in StepMode::all() {
        let ms = benchmark_mode(mode, 1000, iterations);
        println!(
            "{:<10} {:.2} ms/gen, {:.1}M cells/sec",
            mode.name(),
            ms,
            (cells as f64) / (ms / 1000.0) / 1_000_000.0
        );
    }
}
