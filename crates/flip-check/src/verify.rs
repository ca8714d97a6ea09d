use anyhow::{Result, bail};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reversi_flip::bit::{self, popcount};
use reversi_flip::count_last_flip::{count_last_flip, count_last_flip_portable};
use reversi_flip::flip::{flip, flip_portable};
use reversi_flip::square::Square;

use crate::oracle;
use crate::pattern::Hex;

/// Positions between two progress lines.
const PROGRESS_INTERVAL: u64 = 1 << 20;

/// Mismatches reported in full before the rest are only counted.
const MAX_REPORTED: u64 = 16;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub positions: u64,
    pub flip_mismatches: u64,
    pub last_flip_mismatches: u64,
}

impl Report {
    pub fn mismatches(&self) -> u64 {
        self.flip_mismatches + self.last_flip_mismatches
    }
}

pub fn execute(positions: u64, seed: u64) -> Result<()> {
    let strategies = reversi_flip::target::strategies();
    tracing::info!(
        positions,
        seed,
        flip = strategies.flip,
        count_last_flip = strategies.count_last_flip,
        "verifying"
    );

    let report = run(positions, seed);
    if report.mismatches() != 0 {
        bail!(
            "{} flip and {} last-flip mismatches in {} positions",
            report.flip_mismatches,
            report.last_flip_mismatches,
            report.positions
        );
    }

    tracing::info!(positions = report.positions, "all kernels agree");
    println!("ok: {} positions", report.positions);
    Ok(())
}

/// Draws `positions` random positions and compares every kernel with the
/// reference on each one.
pub fn run(positions: u64, seed: u64) -> Report {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut report = Report::default();

    for i in 0..positions {
        let (sq, p, o) = random_position(&mut rng);
        let expected = oracle::flip(sq, p, o);
        let got = flip(sq, p, o);
        let portable = flip_portable(sq, p, o);
        if got != expected || portable != expected {
            report.flip_mismatches += 1;
            if report.flip_mismatches <= MAX_REPORTED {
                tracing::error!(
                    %sq,
                    p = %Hex(p),
                    o = %Hex(o),
                    expected = %Hex(expected),
                    got = %Hex(got),
                    portable = %Hex(portable),
                    "flip mismatch"
                );
            }
        }

        let (sq, player) = random_last_move(&mut rng);
        let expected = 2 * popcount(oracle::flip(sq, player, !player & !sq.bitboard())) as i32;
        let got = count_last_flip(player, sq);
        let portable = count_last_flip_portable(player, sq);
        if got != expected || portable != expected {
            report.last_flip_mismatches += 1;
            if report.last_flip_mismatches <= MAX_REPORTED {
                tracing::error!(
                    %sq,
                    player = %Hex(player),
                    expected,
                    got,
                    portable,
                    "last flip mismatch"
                );
            }
        }

        report.positions += 1;
        if (i + 1) % PROGRESS_INTERVAL == 0 {
            tracing::info!(done = i + 1, total = positions, mismatches = report.mismatches(), "progress");
        }
    }

    report
}

fn next_u64<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.next_u64()
}

/// Disjoint player and opponent patterns with a random empty square to play.
///
/// Every third position is thinned out so that open rays and short runs show
/// up as often as dense boards.
pub fn random_position<R: Rng + ?Sized>(rng: &mut R) -> (Square, u64, u64) {
    let mut a = next_u64(rng);
    let mut b = next_u64(rng);
    if next_u64(rng) % 3 == 0 {
        a &= next_u64(rng);
        b &= next_u64(rng);
    }

    let p = a;
    let o = b & !a;
    let empty = !(p | o);
    // a full board frees a random square
    let sq = bit::random_bit(if empty == 0 { u64::MAX } else { empty }, rng);
    (sq, p & !sq.bitboard(), o & !sq.bitboard())
}

/// A random player pattern on a board whose only empty square is returned.
pub fn random_last_move<R: Rng + ?Sized>(rng: &mut R) -> (Square, u64) {
    let sq = bit::random_bit(u64::MAX, rng);
    (sq, next_u64(rng) & !sq.bitboard())
}
