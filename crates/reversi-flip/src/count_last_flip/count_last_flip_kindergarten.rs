//! Kindergarten last-flip counting: each line through the square is collapsed
//! into one byte with a multiplication.

use crate::masks::{A_FILE, DIAGONALS};
use crate::square::Square;
use crate::uget;

use super::lookup;

/// Gathers every A-file square into the top byte, rank order.
const FILE_GATHER: u64 = 0x0102040810204080;

/// Sums the bytes of a pattern into the top byte. At most one bit per file may
/// be set, so no carries occur.
const BYTE_GATHER: u64 = 0x0101010101010101;

/// Counts last flipped discs when playing on `sq`.
///
/// # Arguments
///
/// * `p` - Player's disc pattern.
/// * `sq` - The last empty square.
///
/// # Returns
///
/// Twice the flipped disc count.
#[inline(always)]
pub fn count_last_flip(p: u64, sq: Square) -> i32 {
    let index = sq.index();
    let x = index & 7;
    let y = index >> 3;
    let diagonals = uget!(DIAGONALS; index);

    let row = (p >> (index & 56)) as u8;
    let col = (((p >> x) & A_FILE).wrapping_mul(FILE_GATHER) >> 56) as u8;
    let d7 = ((p & diagonals.lo()).wrapping_mul(BYTE_GATHER) >> 56) as u8;
    let d9 = ((p & diagonals.hi()).wrapping_mul(BYTE_GATHER) >> 56) as u8;

    lookup(x, row) + lookup(y, col) + lookup(x, d7) + lookup(x, d9)
}
