//! Precomputed per-square masks.
//!
//! Every table is built by a `const fn` at compile time, so there is no runtime
//! initialization and all threads share the same read-only data.
//!
//! Directions are named by the index delta of one step:
//!
//! ```text
//!  -9  -8  -7
//!  -1   x  +1
//!  +7  +8  +9
//! ```
//!
//! Rays toward bit 0 (`-1`, `-7`, `-8`, `-9`) are scanned with a leading-zero
//! count; rays toward bit 63 (`+1`, `+7`, `+8`, `+9`) use carry propagation.

use crate::lanes::U64x2;

/// Squares of the A file.
pub const A_FILE: u64 = 0x0101010101010101;

/// Squares of the first rank.
pub const RANK_1: u64 = 0x00000000000000ff;

/// Corner squares A1, H1, A8 and H8.
pub const CORNERS: u64 = 0x8100000000000081;

/// `(dx, dy)` steps for `-1`, `-7`, `-8`, `-9`, in table column order.
const REVERSE_STEPS: [(i32, i32); 4] = [(-1, 0), (1, -1), (0, -1), (-1, -1)];

/// `(dx, dy)` steps for `+1`, `+7`, `+8`, `+9`, in table column order.
const FORWARD_STEPS: [(i32, i32); 4] = [(1, 0), (-1, 1), (0, 1), (1, 1)];

/// Single-bit mask of each square.
pub static SQUARE_BIT: [u64; 64] = build_square_bits();

/// Squares reachable from each square along `-1`, `-7`, `-8` and `-9`,
/// stopping at the board edge. The square itself is excluded.
pub static RAY_REVERSE: [[u64; 4]; 64] = build_rays(REVERSE_STEPS);

/// [`RAY_REVERSE`] without the farthest square of each ray.
///
/// XORing the masked opponent pattern with the full ray leaves the edge square
/// set as a guardian bit, so a leading-zero count over a non-empty ray never
/// sees zero.
pub static RAY_REVERSE_INNER: [[u64; 4]; 64] = build_inner_reverse_rays();

/// Complemented rays along `+1`/`+7` (first pair) and `+8`/`+9` (second pair),
/// packed as lanes.
///
/// Every square outside the ray is set, so adding one to `O | mask` carries
/// through the square itself and the run of opponent discs on the ray.
pub static FORWARD_GUARD: [[U64x2; 2]; 64] = build_forward_guards();

/// The two diagonals through each square, the square included: the `±7` line
/// in the low lane and the `±9` line in the high lane.
pub static DIAGONALS: [U64x2; 64] = build_diagonals();

const fn build_square_bits() -> [u64; 64] {
    let mut bits = [0u64; 64];
    let mut sq = 0;
    while sq < 64 {
        bits[sq] = 1u64 << sq;
        sq += 1;
    }
    bits
}

/// Squares reachable from `sq` by repeating `(dx, dy)` until the edge.
pub const fn ray(sq: usize, dx: i32, dy: i32) -> u64 {
    let mut x = (sq % 8) as i32 + dx;
    let mut y = (sq / 8) as i32 + dy;
    let mut bits = 0u64;
    while x >= 0 && x < 8 && y >= 0 && y < 8 {
        bits |= 1u64 << (y * 8 + x) as u32;
        x += dx;
        y += dy;
    }
    bits
}

const fn build_rays(steps: [(i32, i32); 4]) -> [[u64; 4]; 64] {
    let mut rays = [[0u64; 4]; 64];
    let mut sq = 0;
    while sq < 64 {
        let mut d = 0;
        while d < 4 {
            rays[sq][d] = ray(sq, steps[d].0, steps[d].1);
            d += 1;
        }
        sq += 1;
    }
    rays
}

const fn build_inner_reverse_rays() -> [[u64; 4]; 64] {
    let mut rays = build_rays(REVERSE_STEPS);
    let mut sq = 0;
    while sq < 64 {
        let mut d = 0;
        while d < 4 {
            // the farthest square of a reverse ray is its lowest bit
            let r = rays[sq][d];
            rays[sq][d] = r & r.wrapping_sub(1);
            d += 1;
        }
        sq += 1;
    }
    rays
}

const fn build_forward_guards() -> [[U64x2; 2]; 64] {
    let rays = build_rays(FORWARD_STEPS);
    let mut guards = [[U64x2::new(0, 0); 2]; 64];
    let mut sq = 0;
    while sq < 64 {
        guards[sq][0] = U64x2::new(rays[sq][0], rays[sq][1]).complement();
        guards[sq][1] = U64x2::new(rays[sq][2], rays[sq][3]).complement();
        sq += 1;
    }
    guards
}

const fn build_diagonals() -> [U64x2; 64] {
    let mut diagonals = [U64x2::new(0, 0); 64];
    let mut sq = 0;
    while sq < 64 {
        let bit = 1u64 << sq;
        let d7 = bit | ray(sq, 1, -1) | ray(sq, -1, 1);
        let d9 = bit | ray(sq, -1, -1) | ray(sq, 1, 1);
        diagonals[sq] = U64x2::new(d7, d9);
        sq += 1;
    }
    diagonals
}
