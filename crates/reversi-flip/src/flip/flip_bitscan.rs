//! Portable forward flip: lane-pair carries toward bit 63.

use crate::lanes::U64x2;
use crate::masks::FORWARD_GUARD;
use crate::square::Square;
use crate::uget;

/// Flipped discs along the four rays toward bit 63.
///
/// # Arguments
///
/// * `sq` - Empty square the disc is placed on.
/// * `p` - Player's disc pattern.
/// * `o` - Opponent's disc pattern.
#[inline(always)]
pub fn flip_forward(sq: Square, p: u64, o: u64) -> u64 {
    let pp = U64x2::splat(p);
    let oo = U64x2::splat(o);
    let [guard0, guard1] = *uget!(FORWARD_GUARD; sq.index());

    (flip_forward_pair(guard0, pp, oo) | flip_forward_pair(guard1, pp, oo)).fold()
}

/// Flipped discs on two forward rays at once.
///
/// `guard` has every square outside the ray set, so `(o | guard) + 1` carries
/// up to the first square of the ray that is not an opponent disc.
#[inline(always)]
fn flip_forward_pair(guard: U64x2, p: U64x2, o: U64x2) -> U64x2 {
    let minus_one = U64x2::splat(u64::MAX);

    let outflank = guard.andnot((o | guard) - minus_one) & p;
    // all ones when the lane has no outflank, which cancels the borrow below
    let none = outflank.eq_halves();
    guard.andnot(outflank - (none - minus_one))
}
