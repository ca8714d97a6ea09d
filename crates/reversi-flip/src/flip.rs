//! Disc flip calculation for move execution.
//!
//! Each of the eight directions from the move square is one of two families:
//!
//! * toward bit 0 (`-1`, `-7`, `-8`, `-9`): a leading-zero count finds the first
//!   square on the ray that is not an opponent disc. If it holds a player disc,
//!   `-outflank * 2` masked by the ray is exactly the run in between.
//! * toward bit 63 (`+1`, `+7`, `+8`, `+9`): adding one to `O | !ray` carries
//!   through the opponent run and stops on the outflanking square. The four rays
//!   are processed as two pairs of lanes.
//!
//! Both strategies below compute the same thing; the portable one is always
//! compiled and is the reference for the SIMD one.

use cfg_if::cfg_if;

use crate::masks::{RAY_REVERSE, RAY_REVERSE_INNER};
use crate::square::Square;

mod flip_bitscan;
#[cfg(target_arch = "x86_64")]
#[allow(dead_code)]
mod flip_sse2;

cfg_if! {
    if #[cfg(all(target_arch = "x86_64", target_feature = "sse2", not(feature = "portable")))] {
        /// Name of the compiled-in flip strategy.
        pub const FLIP_STRATEGY: &str = "sse2";
    } else {
        /// Name of the compiled-in flip strategy.
        pub const FLIP_STRATEGY: &str = "bitscan";
    }
}

cfg_if! {
    if #[cfg(all(target_arch = "x86_64", target_feature = "lzcnt", not(feature = "portable")))] {
        /// Name of the compiled-in reverse scan.
        pub const REVERSE_SCAN_STRATEGY: &str = "lzcnt";
    } else {
        /// Name of the compiled-in reverse scan.
        pub const REVERSE_SCAN_STRATEGY: &str = "guardian";
    }
}

/// Number of leading squares, counted from bit 63, before the first
/// non-opponent square of the ray. 64 when there is none.
#[inline(always)]
#[cfg_attr(not(target_arch = "x86_64"), allow(dead_code))]
fn count_opp_reverse_lzcnt(o: u64, _inner: u64, ray: u64) -> u32 {
    (!o & ray).leading_zeros()
}

/// Same count as [`count_opp_reverse_lzcnt`] for a non-empty ray. The edge
/// square of the ray is always reported as non-opponent; an empty ray gives 64.
#[inline(always)]
fn count_opp_reverse_guardian(o: u64, inner: u64, ray: u64) -> u32 {
    ((o & inner) ^ ray).leading_zeros()
}

/// Calculates which opponent discs would be flipped by placing a disc at the given square.
///
/// # Arguments
///
/// * `sq` - The square where the disc is being placed. Must be empty in both patterns.
/// * `p` - Bitboard representing the current player's discs
/// * `o` - Bitboard representing the opponent's discs
///
/// # Returns
///
/// A bitboard representing all opponent discs that would be flipped by this move.
/// Returns 0 if no discs would be flipped (invalid move).
#[inline(always)]
pub fn flip(sq: Square, p: u64, o: u64) -> u64 {
    debug_assert!(sq != Square::None, "flip called on Square::None");
    debug_assert!(p & o == 0, "player and opponent patterns overlap");

    cfg_if! {
        if #[cfg(all(target_arch = "x86_64", target_feature = "sse2", not(feature = "portable")))] {
            unsafe { flip_sse2::flip(sq, p, o) }
        } else {
            flip_bitscan::flip_forward(sq, p, o) | flip_reverse(sq, p, o)
        }
    }
}

/// The portable flip strategy: lane-pair carries and the guardian reverse
/// scan, whatever the build target.
///
/// Always returns the same value as [`flip`].
#[inline]
pub fn flip_portable(sq: Square, p: u64, o: u64) -> u64 {
    flip_bitscan::flip_forward(sq, p, o) | flip_reverse_by(sq, p, o, count_opp_reverse_guardian)
}

/// Flipped discs along the four rays toward bit 0, with the compiled-in scan.
#[inline(always)]
fn flip_reverse(sq: Square, p: u64, o: u64) -> u64 {
    cfg_if! {
        if #[cfg(all(target_arch = "x86_64", target_feature = "lzcnt", not(feature = "portable")))] {
            flip_reverse_by(sq, p, o, count_opp_reverse_lzcnt)
        } else {
            flip_reverse_by(sq, p, o, count_opp_reverse_guardian)
        }
    }
}

/// Reverse scan with `lzcnt` enabled whatever the build target.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "lzcnt")]
#[allow(dead_code)]
fn flip_reverse_lzcnt(sq: Square, p: u64, o: u64) -> u64 {
    flip_reverse_by(sq, p, o, count_opp_reverse_lzcnt)
}

#[inline(always)]
fn flip_reverse_by(sq: Square, p: u64, o: u64, count_opp: fn(u64, u64, u64) -> u32) -> u64 {
    let ray = crate::uget!(RAY_REVERSE; sq.index());
    let inner = crate::uget!(RAY_REVERSE_INNER; sq.index());

    let mut flipped = 0;
    for d in 0..4 {
        // a count of 64 wraps the shift to 0; an outflank at bit 63 doubles to zero
        let outflank = 0x8000000000000000u64.wrapping_shr(count_opp(o, inner[d], ray[d])) & p;
        flipped |= outflank.wrapping_neg().wrapping_mul(2) & ray[d];
    }
    flipped
}
