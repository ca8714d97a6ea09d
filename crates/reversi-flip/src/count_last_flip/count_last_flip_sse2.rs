use std::arch::x86_64::*;

use crate::masks::DIAGONALS;
use crate::square::Square;
use crate::uget;

use super::lookup;

/// SSE2 last-flip counting.
///
/// The column and both diagonals are gathered in rank order with byte masks,
/// the row with a plain shift.
#[target_feature(enable = "sse2")]
#[inline]
pub fn count_last_flip(p: u64, sq: Square) -> i32 {
    let index = sq.index();
    let x = index & 7;
    let y = index >> 3;

    let pp = _mm_cvtsi64_si128(p as i64);

    // move file x to the sign bit of every byte
    let col = _mm_movemask_epi8(_mm_sll_epi64(pp, _mm_cvtsi32_si128((x ^ 7) as i32))) as u8;

    let diagonals = uget!(DIAGONALS; index).to_m128i();
    let on_diagonal = _mm_and_si128(_mm_unpacklo_epi64(pp, pp), diagonals);
    let d = !(_mm_movemask_epi8(_mm_cmpeq_epi8(on_diagonal, _mm_setzero_si128())) as u32);

    lookup(x, (p >> (index & 56)) as u8) + lookup(y, col) + lookup(y, d as u8) + lookup(y, (d >> 8) as u8)
}
