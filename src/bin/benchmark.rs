//! Tick throughput: serial vs row-parallel evolution

use std::time::Instant;

use life_canvas::domain::Grid;
use rand::{SeedableRng, rngs::StdRng};

fn random_grid(size: usize) -> Grid {
    let mut grid = Grid::new(size, size).expect("benchmark sizes are non-zero");
    grid.randomize(&mut StdRng::seed_from_u64(size as u64));
    grid
}

/// Milliseconds per generation, double-buffered like `Simulation::tick`
fn benchmark(size: usize, iterations: u32, evolve: fn(&Grid, &mut Grid)) -> f64 {
    let mut current = random_grid(size);
    let mut next = current.clone();

    let start = Instant::now();
    for _ in 0..iterations {
        evolve(&current, &mut next);
        std::mem::swap(&mut current, &mut next);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    println!("=== Game of Life Tick Benchmark ===\n");

    let sizes = [50, 100, 200, 500, 1000, 2000];
    let iterations = 20;

    println!("{:>10} {:>12} {:>12} {:>10}", "Size", "Serial", "Parallel", "Speedup");
    println!("{:-<48}", "");

    for size in sizes {
        let serial_ms = benchmark(size, iterations, Grid::evolve_into_serial);
        let parallel_ms = benchmark(size, iterations, Grid::evolve_into_parallel);

        println!(
            "{:>10} {:>10.3}ms {:>10.3}ms {:>9.1}x",
            format!("{size}x{size}"),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms
        );
    }

    println!(
        "\nSimulation::tick switches to the parallel path at {} cells.",
        life_canvas::domain::PARALLEL_THRESHOLD
    );
}
