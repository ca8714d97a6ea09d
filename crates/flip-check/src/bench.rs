use std::hint::black_box;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use reversi_flip::count_last_flip::count_last_flip;
use reversi_flip::flip::flip;
use reversi_flip::square::Square;

use crate::verify::{random_last_move, random_position};

/// Positions drawn up front and cycled through while timing.
const POOL_SIZE: usize = 4096;

pub fn execute(iterations: u64, seed: u64) -> Result<()> {
    if iterations == 0 {
        bail!("--iterations must be positive");
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let moves: Vec<(Square, u64, u64)> = (0..POOL_SIZE).map(|_| random_position(&mut rng)).collect();
    let last_moves: Vec<(Square, u64)> = (0..POOL_SIZE).map(|_| random_last_move(&mut rng)).collect();

    let strategies = reversi_flip::target::strategies();
    tracing::info!(iterations, seed, flip = strategies.flip, "benchmarking flip");
    let flip_time = time(iterations, |i| {
        let (sq, p, o) = moves[i % POOL_SIZE];
        flip(sq, black_box(p), black_box(o))
    });
    report("flip", strategies.flip, iterations, flip_time);

    tracing::info!(iterations, seed, count_last_flip = strategies.count_last_flip, "benchmarking count_last_flip");
    let last_flip_time = time(iterations, |i| {
        let (sq, player) = last_moves[i % POOL_SIZE];
        count_last_flip(black_box(player), sq) as u64
    });
    report("count_last_flip", strategies.count_last_flip, iterations, last_flip_time);

    Ok(())
}

fn time<F: FnMut(usize) -> u64>(iterations: u64, mut f: F) -> Duration {
    let start = Instant::now();
    let mut acc = 0u64;
    for i in 0..iterations as usize {
        acc ^= f(i);
    }
    black_box(acc);
    start.elapsed()
}

fn report(name: &str, strategy: &str, iterations: u64, elapsed: Duration) {
    let secs = elapsed.as_secs_f64();
    let rate = if secs > 0.0 { iterations as f64 / secs / 1e6 } else { f64::INFINITY };
    println!(
        "{name:<16} [{strategy:<12}] {iterations} calls in {:.3} s: {rate:.1} M/s, {:.2} ns/call",
        secs,
        secs * 1e9 / iterations as f64
    );
}
