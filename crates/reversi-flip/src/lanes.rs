//! A pair of 64-bit lanes processed together.
//!
//! The portable flip path works on [`U64x2`] directly. SIMD paths convert to and
//! from a vector register with the explicit accessors below; the bit layout of a
//! lane pair never leaks into the public API.

use std::ops::{BitAnd, BitOr, Not, Sub};

/// Two independent `u64` lanes. Lane operations never carry across lanes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct U64x2 {
    lo: u64,
    hi: u64,
}

impl U64x2 {
    #[inline(always)]
    pub const fn new(lo: u64, hi: u64) -> Self {
        U64x2 { lo, hi }
    }

    #[inline(always)]
    pub const fn splat(v: u64) -> Self {
        U64x2 { lo: v, hi: v }
    }

    #[inline(always)]
    pub const fn lo(self) -> u64 {
        self.lo
    }

    #[inline(always)]
    pub const fn hi(self) -> u64 {
        self.hi
    }

    /// Lane-wise complement, usable in `const` table builders.
    #[inline(always)]
    pub const fn complement(self) -> Self {
        U64x2 {
            lo: !self.lo,
            hi: !self.hi,
        }
    }

    /// Lane-wise `!self & other`, the same operand order as `_mm_andnot_si128`.
    #[inline(always)]
    pub fn andnot(self, other: Self) -> Self {
        U64x2 {
            lo: !self.lo & other.lo,
            hi: !self.hi & other.hi,
        }
    }

    /// All ones in every lane whose upper and lower 32-bit halves are equal,
    /// zero in the others.
    ///
    /// A lane holding zero or a single set bit is all ones exactly when it holds
    /// zero, which turns "no outflank found" into a full mask without a branch.
    #[inline(always)]
    pub fn eq_halves(self) -> Self {
        #[inline(always)]
        fn lane(v: u64) -> u64 {
            ((v as u32 == (v >> 32) as u32) as u64).wrapping_neg()
        }
        U64x2 {
            lo: lane(self.lo),
            hi: lane(self.hi),
        }
    }

    /// ORs the two lanes into one value.
    #[inline(always)]
    pub const fn fold(self) -> u64 {
        self.lo | self.hi
    }

    /// Loads both lanes into an SSE2 register, `lo` in element 0.
    #[cfg(target_arch = "x86_64")]
    #[target_feature(enable = "sse2")]
    #[inline]
    pub fn to_m128i(self) -> std::arch::x86_64::__m128i {
        use std::arch::x86_64::_mm_set_epi64x;
        _mm_set_epi64x(self.hi as i64, self.lo as i64)
    }

    /// Reads both lanes back out of an SSE2 register.
    #[cfg(target_arch = "x86_64")]
    #[target_feature(enable = "sse2")]
    #[inline]
    pub fn from_m128i(v: std::arch::x86_64::__m128i) -> Self {
        use std::arch::x86_64::{_mm_cvtsi128_si64, _mm_unpackhi_epi64};
        U64x2 {
            lo: _mm_cvtsi128_si64(v) as u64,
            hi: _mm_cvtsi128_si64(_mm_unpackhi_epi64(v, v)) as u64,
        }
    }
}

impl BitOr for U64x2 {
    type Output = U64x2;

    #[inline(always)]
    fn bitor(self, rhs: U64x2) -> U64x2 {
        U64x2::new(self.lo | rhs.lo, self.hi | rhs.hi)
    }
}

impl BitAnd for U64x2 {
    type Output = U64x2;

    #[inline(always)]
    fn bitand(self, rhs: U64x2) -> U64x2 {
        U64x2::new(self.lo & rhs.lo, self.hi & rhs.hi)
    }
}

impl Not for U64x2 {
    type Output = U64x2;

    #[inline(always)]
    fn not(self) -> U64x2 {
        self.complement()
    }
}

/// Lane-wise wrapping subtraction.
impl Sub for U64x2 {
    type Output = U64x2;

    #[inline(always)]
    fn sub(self, rhs: U64x2) -> U64x2 {
        U64x2::new(self.lo.wrapping_sub(rhs.lo), self.hi.wrapping_sub(rhs.hi))
    }
}
