//! Bit primitives over 64-bit grid patterns.
//!
//! A grid pattern has one bit per square, bit 0 = A1 (top-left) and bit 63 = H8.
//! Population count and bit scans have a native and a software strategy; which one
//! is compiled in depends only on the build target. The software versions are
//! always built and serve as the reference in tests.

use std::fmt;
use std::io;

use cfg_if::cfg_if;
use rand::Rng;

use crate::masks::CORNERS;
use crate::square::Square;

/// De Bruijn sequence used by the software bit scans.
const DEBRUIJN: u64 = 0x03f79d71b4cb0a89;

/// Maps the top six bits of `isolated_bit * DEBRUIJN` back to the bit index.
static DEBRUIJN_INDEX: [u8; 64] = build_debruijn_index();

const fn build_debruijn_index() -> [u8; 64] {
    let mut index = [0u8; 64];
    let mut i = 0;
    while i < 64 {
        index[((1u64 << i).wrapping_mul(DEBRUIJN) >> 58) as usize] = i as u8;
        i += 1;
    }
    index
}

cfg_if! {
    if #[cfg(all(any(target_feature = "popcnt", target_arch = "aarch64"), not(feature = "portable")))] {
        /// Name of the compiled-in population count strategy.
        pub const POPCOUNT_STRATEGY: &str = "native";

        /// Returns the number of set bits.
        #[inline(always)]
        pub fn popcount(b: u64) -> u32 {
            b.count_ones()
        }
    } else {
        /// Name of the compiled-in population count strategy.
        pub const POPCOUNT_STRATEGY: &str = "swar";

        /// Returns the number of set bits.
        #[inline(always)]
        pub fn popcount(b: u64) -> u32 {
            popcount_swar(b)
        }
    }
}

cfg_if! {
    if #[cfg(all(any(target_arch = "x86_64", target_arch = "aarch64"), not(feature = "portable")))] {
        /// Name of the compiled-in bit scan strategy.
        pub const BIT_SCAN_STRATEGY: &str = "native";

        /// Returns the index of the lowest set bit.
        ///
        /// The result is unspecified when `b` is zero; callers must guard.
        #[inline(always)]
        pub fn first_bit(b: u64) -> u32 {
            debug_assert!(b != 0, "first_bit called on an empty pattern");
            b.trailing_zeros()
        }

        /// Returns the index of the highest set bit.
        ///
        /// The result is unspecified when `b` is zero; callers must guard.
        #[inline(always)]
        pub fn last_bit(b: u64) -> u32 {
            debug_assert!(b != 0, "last_bit called on an empty pattern");
            63 ^ b.leading_zeros()
        }
    } else {
        /// Name of the compiled-in bit scan strategy.
        pub const BIT_SCAN_STRATEGY: &str = "debruijn";

        /// Returns the index of the lowest set bit.
        ///
        /// The result is unspecified when `b` is zero; callers must guard.
        #[inline(always)]
        pub fn first_bit(b: u64) -> u32 {
            debug_assert!(b != 0, "first_bit called on an empty pattern");
            first_bit_debruijn(b)
        }

        /// Returns the index of the highest set bit.
        ///
        /// The result is unspecified when `b` is zero; callers must guard.
        #[inline(always)]
        pub fn last_bit(b: u64) -> u32 {
            debug_assert!(b != 0, "last_bit called on an empty pattern");
            last_bit_debruijn(b)
        }
    }
}

/// Software population count (SWAR).
#[inline]
pub const fn popcount_swar(mut b: u64) -> u32 {
    b -= (b >> 1) & 0x5555555555555555;
    b = (b & 0x3333333333333333) + ((b >> 2) & 0x3333333333333333);
    b = (b + (b >> 4)) & 0x0f0f0f0f0f0f0f0f;
    (b.wrapping_mul(0x0101010101010101) >> 56) as u32
}

/// Software lowest-set-bit scan. Returns 0 for an empty pattern.
#[inline]
pub fn first_bit_debruijn(b: u64) -> u32 {
    let isolated = b & b.wrapping_neg();
    *crate::uget!(DEBRUIJN_INDEX; (isolated.wrapping_mul(DEBRUIJN) >> 58) as usize) as u32
}

/// Software highest-set-bit scan. Returns 0 for an empty pattern.
#[inline]
pub fn last_bit_debruijn(mut b: u64) -> u32 {
    b |= b >> 1;
    b |= b >> 2;
    b |= b >> 4;
    b |= b >> 8;
    b |= b >> 16;
    b |= b >> 32;
    first_bit_debruijn(b ^ (b >> 1))
}

/// Population count where each corner square counts twice.
#[inline]
pub fn corner_weighted_count(b: u64) -> u32 {
    popcount(b) + popcount(b & CORNERS)
}

/// Clears the lowest set bit. Returns 0 for an empty pattern.
#[inline(always)]
pub const fn clear_lsb(b: u64) -> u64 {
    b & b.wrapping_sub(1)
}

/// Iterates over the set bits of `b` from lowest to highest.
#[inline]
pub fn iter_bits(b: u64) -> BitIter {
    BitIter::new(b)
}

/// An iterator that yields each set bit of a pattern as a `Square`.
///
/// The iterator consumes its own copy of the pattern; the caller's value is
/// untouched.
#[derive(Debug, Clone)]
pub struct BitIter {
    bits: u64,
}

impl BitIter {
    #[inline(always)]
    pub fn new(bits: u64) -> BitIter {
        BitIter { bits }
    }
}

impl Iterator for BitIter {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Square> {
        if self.bits == 0 {
            return None;
        }

        let sq = Square::from_u32_unchecked(first_bit(self.bits));
        self.bits = clear_lsb(self.bits);
        Some(sq)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = popcount(self.bits) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitIter {}

impl std::iter::FusedIterator for BitIter {}

/// Mirrors the pattern top to bottom (rank 1 <-> rank 8).
#[inline]
pub fn flip_vertical(b: u64) -> u64 {
    b.swap_bytes()
}

/// Mirrors the pattern left to right (A file <-> H file).
#[inline]
pub fn flip_horizontal(mut b: u64) -> u64 {
    const MASK1: u64 = 0x5555555555555555;
    const MASK2: u64 = 0x3333333333333333;
    const MASK3: u64 = 0x0f0f0f0f0f0f0f0f;

    b = ((b >> 1) & MASK1) | ((b & MASK1) << 1);
    b = ((b >> 2) & MASK2) | ((b & MASK2) << 2);
    b = ((b >> 4) & MASK3) | ((b & MASK3) << 4);
    b
}

/// Reflects the pattern across the A1-H8 diagonal; square (file, rank) moves to
/// (rank, file).
#[inline]
pub fn transpose(b: u64) -> u64 {
    flip_diag_a1h8(b)
}

/// Reflects the pattern across the A1-H8 diagonal.
#[inline]
pub fn flip_diag_a1h8(mut b: u64) -> u64 {
    b = delta_swap(b, 0x0f0f0f0f00000000, 28);
    b = delta_swap(b, 0x3333000033330000, 14);
    b = delta_swap(b, 0x5500550055005500, 7);
    b
}

/// Reflects the pattern across the A8-H1 anti-diagonal.
#[inline]
pub fn flip_diag_a8h1(mut b: u64) -> u64 {
    b = delta_swap(b, 0xf0f0f0f000000000, 36);
    b = delta_swap(b, 0xcccc0000cccc0000, 18);
    b = delta_swap(b, 0xaa00aa00aa00aa00, 9);
    b
}

#[inline]
pub fn rotate_90_clockwise(b: u64) -> u64 {
    flip_vertical(flip_diag_a8h1(b))
}

#[inline]
pub fn rotate_180_clockwise(b: u64) -> u64 {
    b.reverse_bits()
}

#[inline]
pub fn rotate_270_clockwise(b: u64) -> u64 {
    flip_vertical(flip_diag_a1h8(b))
}

/// Swaps the bit pairs `delta` apart selected by `mask`.
#[inline(always)]
fn delta_swap(bits: u64, mask: u64, delta: u32) -> u64 {
    let tmp = mask & (bits ^ (bits << delta));
    bits ^ tmp ^ (tmp >> delta)
}

/// Picks one set bit of `b` uniformly at random.
///
/// The randomness comes from the caller's generator, so concurrent callers never
/// share generator state. `b` must not be zero.
///
/// # Arguments
///
/// * `b` - Non-empty pattern to choose from.
/// * `rng` - Caller-owned random source.
pub fn random_bit<R: Rng + ?Sized>(b: u64, rng: &mut R) -> Square {
    debug_assert!(b != 0, "random_bit called on an empty pattern");
    // multiply-high maps a 64-bit draw onto 0..count
    let n = ((rng.next_u64() as u128 * popcount(b) as u128) >> 64) as u32;
    Square::from_u32_unchecked(select_bit(b, n))
}

/// Index of the `n`-th lowest set bit of `b`; `n` < popcount(b).
#[inline]
fn select_bit(b: u64, n: u32) -> u32 {
    cfg_if! {
        if #[cfg(all(target_arch = "x86_64", target_feature = "bmi2", not(feature = "portable")))] {
            unsafe { select_bit_pdep(b, n) }
        } else {
            select_bit_loop(b, n)
        }
    }
}

#[inline]
#[cfg_attr(all(target_arch = "x86_64", target_feature = "bmi2", not(feature = "portable")), allow(dead_code))]
fn select_bit_loop(mut b: u64, n: u32) -> u32 {
    for _ in 0..n {
        b = clear_lsb(b);
    }
    first_bit(b)
}

// compiled on every x86_64 build and tested against the loop
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "bmi2")]
#[allow(dead_code)]
fn select_bit_pdep(b: u64, n: u32) -> u32 {
    use std::arch::x86_64::_pdep_u64;
    _pdep_u64(1u64 << n, b).trailing_zeros()
}

/// Writes `b` as an 8×8 grid, `X` for set bits and `.` for clear ones.
///
/// ```text
///   A B C D E F G H
/// 1 X . . . . . . . 1
/// ...
/// 8 . . . . . . . X 8
///   A B C D E F G H
/// ```
pub fn write_bitboard<W: io::Write + ?Sized>(b: u64, out: &mut W) -> io::Result<()> {
    write!(out, "{}", BitboardGrid(b))
}

/// `Display` adapter printing a pattern in the [`write_bitboard`] layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitboardGrid(pub u64);

impl fmt::Display for BitboardGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  A B C D E F G H")?;
        for rank in 0..8 {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = if (self.0 >> (rank * 8 + file)) & 1 != 0 { 'X' } else { '.' };
                write!(f, "{c} ")?;
            }
            writeln!(f, "{}", rank + 1)?;
        }
        writeln!(f, "  A B C D E F G H")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_popcount() {
        assert_eq!(popcount(0), 0);
        assert_eq!(popcount(u64::MAX), 64);
        assert_eq!(popcount(0x8100000000000081), 4);
        assert_eq!(popcount_swar(0), 0);
        assert_eq!(popcount_swar(u64::MAX), 64);
        assert_eq!(popcount_swar(0x0123456789abcdef), 32);
    }

    #[test]
    fn test_corner_weighted_count() {
        assert_eq!(corner_weighted_count(0), 0);
        assert_eq!(corner_weighted_count(CORNERS), 8);
        assert_eq!(corner_weighted_count(0x0000001818000000), 4);
        assert_eq!(corner_weighted_count(u64::MAX), 68);
    }

    #[test]
    fn test_bit_scans() {
        assert_eq!(first_bit(1), 0);
        assert_eq!(last_bit(1), 0);
        assert_eq!(first_bit(0x8000000000000000), 63);
        assert_eq!(last_bit(0x8000000000000000), 63);
        assert_eq!(first_bit(0x0000001818000000), 27);
        assert_eq!(last_bit(0x0000001818000000), 36);
    }

    #[test]
    fn test_debruijn_scans_every_single_bit() {
        for i in 0..64 {
            let b = 1u64 << i;
            assert_eq!(first_bit_debruijn(b), i);
            assert_eq!(last_bit_debruijn(b), i);
            assert_eq!(first_bit_debruijn(b | 0x8000000000000000), i);
            assert_eq!(last_bit_debruijn(b | 1), i);
        }
    }

    #[test]
    fn test_clear_lsb() {
        assert_eq!(clear_lsb(0b1000), 0);
        assert_eq!(clear_lsb(0b11010100), 0b11010000);
        assert_eq!(clear_lsb(0), 0);
        assert_eq!(clear_lsb(0xABCDEF0123456780), 0xABCDEF0123456700);
    }

    #[test]
    fn test_iter_bits() {
        let squares: Vec<Square> = iter_bits(Square::D5.bitboard() | Square::A1.bitboard()).collect();
        assert_eq!(squares, vec![Square::A1, Square::D5]);
        assert_eq!(iter_bits(0).next(), None);
        assert_eq!(iter_bits(u64::MAX).len(), 64);
    }

    #[test]
    fn test_flip_vertical() {
        assert_eq!(flip_vertical(0x0102030405060708), 0x0807060504030201);
        assert_eq!(flip_vertical(0xff), 0xff00000000000000);
        assert_eq!(flip_vertical(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_flip_horizontal() {
        assert_eq!(flip_horizontal(0x0101010101010101), 0x8080808080808080);
        assert_eq!(flip_horizontal(0x0f0f0f0f0f0f0f0f), 0xf0f0f0f0f0f0f0f0);
        assert_eq!(flip_horizontal(0xff), 0xff);
    }

    #[test]
    fn test_transpose() {
        assert_eq!(transpose(0x8040201008040201), 0x8040201008040201);
        assert_eq!(transpose(0x00000000000000ff), 0x0101010101010101);
        assert_eq!(transpose(Square::B1.bitboard()), Square::A2.bitboard());
        assert_eq!(transpose(Square::H1.bitboard()), Square::A8.bitboard());
    }

    #[test]
    fn test_flip_diag_a8h1() {
        assert_eq!(flip_diag_a8h1(0x0102040810204080), 0x0102040810204080);
        assert_eq!(flip_diag_a8h1(0x0000000000000001), 0x8000000000000000);
    }

    #[test]
    fn test_rotations() {
        assert_eq!(rotate_90_clockwise(0x0000000000000001), 0x0000000000000080);
        assert_eq!(rotate_90_clockwise(0x0000000000000080), 0x8000000000000000);
        assert_eq!(rotate_180_clockwise(0x00000000000000ff), 0xff00000000000000);
        assert_eq!(rotate_270_clockwise(0x0000000000000001), 0x0100000000000000);

        let b = 0x123456789abcdef0u64;
        assert_eq!(
            rotate_270_clockwise(b),
            rotate_90_clockwise(rotate_90_clockwise(rotate_90_clockwise(b)))
        );
        assert_eq!(rotate_180_clockwise(b), flip_horizontal(flip_vertical(b)));
    }

    #[test]
    fn test_random_bit_stays_in_pattern() {
        let mut rng = StdRng::seed_from_u64(42);
        let b = 0x8100000000000081u64;
        let mut seen = 0u64;
        for _ in 0..400 {
            let sq = random_bit(b, &mut rng);
            assert!(b & sq.bitboard() != 0);
            seen |= sq.bitboard();
        }
        assert_eq!(seen, b, "every corner should be drawn at least once");

        assert_eq!(random_bit(Square::E5.bitboard(), &mut rng), Square::E5);
    }

    #[test]
    fn test_random_bit_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(7);
        let b = Square::A1.bitboard() | Square::D4.bitboard() | Square::H8.bitboard() | Square::C7.bitboard();
        let mut counts = [0u32; 64];
        for _ in 0..40_000 {
            counts[random_bit(b, &mut rng).index()] += 1;
        }
        for sq in iter_bits(b) {
            let c = counts[sq.index()];
            assert!((9_000..11_000).contains(&c), "{sq}: {c}");
        }
    }

    #[test]
    fn test_select_bit() {
        let b = 0b1011_0100u64;
        assert_eq!(select_bit(b, 0), 2);
        assert_eq!(select_bit(b, 1), 4);
        assert_eq!(select_bit(b, 2), 5);
        assert_eq!(select_bit(b, 3), 7);
        assert_eq!(select_bit_loop(b, 2), 5);
        assert_eq!(select_bit_loop(1u64 << 63, 0), 63);
        assert_eq!(select_bit_loop(u64::MAX, 63), 63);
    }

    #[test]
    #[cfg(target_arch = "x86_64")]
    fn test_select_bit_pdep_matches_loop() {
        if !is_x86_feature_detected!("bmi2") {
            return;
        }

        let mut rng = StdRng::seed_from_u64(0xb312);
        for _ in 0..1_000 {
            let b = rng.next_u64() | 1;
            for n in 0..popcount(b) {
                let pdep = unsafe { select_bit_pdep(b, n) };
                assert_eq!(pdep, select_bit_loop(b, n), "b={b:#x} n={n}");
            }
        }
        assert_eq!(unsafe { select_bit_pdep(u64::MAX, 63) }, 63);
    }

    #[test]
    fn test_write_bitboard() {
        let mut out = Vec::new();
        write_bitboard(Square::A1.bitboard() | Square::H8.bitboard(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let expected = "  A B C D E F G H\n\
                        1 X . . . . . . . 1\n\
                        2 . . . . . . . . 2\n\
                        3 . . . . . . . . 3\n\
                        4 . . . . . . . . 4\n\
                        5 . . . . . . . . 5\n\
                        6 . . . . . . . . 6\n\
                        7 . . . . . . . . 7\n\
                        8 . . . . . . . X 8\n  \
                        A B C D E F G H\n";
        assert_eq!(text, expected);
        assert_eq!(BitboardGrid(Square::A1.bitboard() | Square::H8.bitboard()).to_string(), expected);
    }

    proptest! {
        #[test]
        fn prop_symmetries_are_involutions(b: u64) {
            prop_assert_eq!(flip_vertical(flip_vertical(b)), b);
            prop_assert_eq!(flip_horizontal(flip_horizontal(b)), b);
            prop_assert_eq!(transpose(transpose(b)), b);
            prop_assert_eq!(flip_diag_a8h1(flip_diag_a8h1(b)), b);
        }

        #[test]
        fn prop_symmetries_keep_popcount(b: u64) {
            prop_assert_eq!(popcount(flip_vertical(b)), popcount(b));
            prop_assert_eq!(popcount(flip_horizontal(b)), popcount(b));
            prop_assert_eq!(popcount(transpose(b)), popcount(b));
        }

        #[test]
        fn prop_popcount_matches_iteration(b: u64) {
            prop_assert_eq!(iter_bits(b).count() as u32, popcount(b));
            prop_assert_eq!(popcount_swar(b), b.count_ones());
        }

        #[test]
        fn prop_iteration_is_ascending_and_exact(b: u64) {
            let mut rebuilt = 0u64;
            let mut last = None;
            for sq in iter_bits(b) {
                prop_assert!(last.is_none_or(|l: usize| l < sq.index()));
                last = Some(sq.index());
                rebuilt |= sq.bitboard();
            }
            prop_assert_eq!(rebuilt, b);
        }

        #[test]
        fn prop_scans_match_software(b in 1u64..) {
            prop_assert_eq!(first_bit(b), first_bit_debruijn(b));
            prop_assert_eq!(last_bit(b), last_bit_debruijn(b));
            prop_assert_eq!(first_bit(b), b.trailing_zeros());
            prop_assert_eq!(last_bit(b), 63 - b.leading_zeros());
        }
    }
}
