use std::arch::x86_64::*;

use crate::masks::FORWARD_GUARD;
use crate::square::Square;
use crate::uget;

/// SSE2 flip. The forward rays run as two `__m128i` lane pairs; the reverse
/// rays reuse the scalar scan.
#[target_feature(enable = "sse2")]
#[inline]
pub fn flip(sq: Square, p: u64, o: u64) -> u64 {
    let pp = _mm_set1_epi64x(p as i64);
    let oo = _mm_set1_epi64x(o as i64);
    let minus_one = _mm_set1_epi32(-1);
    let [guard0, guard1] = *uget!(FORWARD_GUARD; sq.index());

    let flipped = _mm_or_si128(
        flip_forward_pair(guard0.to_m128i(), pp, oo, minus_one),
        flip_forward_pair(guard1.to_m128i(), pp, oo, minus_one),
    );
    let flipped = _mm_or_si128(flipped, _mm_shuffle_epi32::<0x4e>(flipped));

    _mm_cvtsi128_si64(flipped) as u64 | super::flip_reverse(sq, p, o)
}

#[target_feature(enable = "sse2")]
#[inline]
fn flip_forward_pair(guard: __m128i, p: __m128i, o: __m128i, minus_one: __m128i) -> __m128i {
    let outflank = _mm_and_si128(
        _mm_andnot_si128(guard, _mm_sub_epi64(_mm_or_si128(o, guard), minus_one)),
        p,
    );
    // compare each 32-bit half with its swapped partner: all ones in empty lanes
    let none = _mm_cmpeq_epi32(outflank, _mm_shuffle_epi32::<0xb1>(outflank));
    _mm_andnot_si128(guard, _mm_sub_epi64(outflank, _mm_sub_epi64(none, minus_one)))
}
