use std::arch::x86_64::*;

use crate::masks::{A_FILE, DIAGONALS};
use crate::square::Square;
use crate::uget;

use super::lookup;

/// AVX2 last-flip counting.
///
/// Lanes hold `[d7, d9, file, 0]`; one byte compare gathers all three lines in
/// rank order.
#[target_feature(enable = "avx2")]
#[inline]
pub fn count_last_flip(p: u64, sq: Square) -> i32 {
    let index = sq.index();
    let x = index & 7;
    let y = index >> 3;
    let diagonals = uget!(DIAGONALS; index);

    let pp = _mm256_broadcastq_epi64(_mm_cvtsi64_si128(p as i64));
    let lines = _mm256_set_epi64x(
        0,
        (A_FILE << x) as i64,
        diagonals.hi() as i64,
        diagonals.lo() as i64,
    );
    let t = !(_mm256_movemask_epi8(_mm256_cmpeq_epi8(
        _mm256_and_si256(pp, lines),
        _mm256_setzero_si256(),
    )) as u32);

    lookup(x, (p >> (index & 56)) as u8)
        + lookup(y, t as u8)
        + lookup(y, (t >> 8) as u8)
        + lookup(y, (t >> 16) as u8)
}
