//! Last move flip counting optimized for endgame.
//!
//! When a square is the only empty one left, every non-player square is an
//! opponent disc, so the flip count of each line depends on the player's 8-bit
//! line pattern and the move's position on the line alone.

use cfg_if::cfg_if;

use crate::square::Square;

mod count_last_flip_kindergarten;
// compiled on every x86_64 build and tested against the kindergarten version
#[cfg(target_arch = "x86_64")]
#[allow(dead_code)]
mod count_last_flip_avx2;
#[cfg(target_arch = "x86_64")]
#[allow(dead_code)]
mod count_last_flip_sse2;

/// Twice the number of discs flipped on one line, indexed by the move's
/// position on the line and the player's line pattern.
///
/// Every line square other than the move square that is not a player disc is
/// treated as an opponent disc. The player bit at the move position is ignored.
pub static COUNT_FLIP: [[i8; 256]; 8] = build_count_flip();

const fn build_count_flip() -> [[i8; 256]; 8] {
    let mut table = [[0i8; 256]; 8];
    let mut x = 0;
    while x < 8 {
        let mut pattern = 0;
        while pattern < 256 {
            table[x][pattern] = (2 * (count_toward(pattern, x, -1) + count_toward(pattern, x, 1))) as i8;
            pattern += 1;
        }
        x += 1;
    }
    table
}

/// Opponent squares between position `x` and the nearest player bit in
/// direction `dir`, or 0 when the edge comes first.
const fn count_toward(pattern: usize, x: usize, dir: i32) -> i32 {
    let mut i = x as i32 + dir;
    let mut run = 0;
    while i >= 0 && i < 8 {
        if pattern & (1 << i) != 0 {
            return run;
        }
        run += 1;
        i += dir;
    }
    0
}

cfg_if! {
    if #[cfg(all(target_arch = "x86_64", target_feature = "avx2", not(feature = "portable")))] {
        /// Name of the compiled-in last-flip strategy.
        pub const COUNT_LAST_FLIP_STRATEGY: &str = "avx2";
    } else if #[cfg(all(target_arch = "x86_64", target_feature = "sse2", not(feature = "portable")))] {
        /// Name of the compiled-in last-flip strategy.
        pub const COUNT_LAST_FLIP_STRATEGY: &str = "sse2";
    } else {
        /// Name of the compiled-in last-flip strategy.
        pub const COUNT_LAST_FLIP_STRATEGY: &str = "kindergarten";
    }
}

/// Counts the number of discs that would be flipped by the last move.
///
/// # Arguments
///
/// * `player` - Current player's disc pattern.
/// * `sq` - Square where the last move is played. It must be the only empty square.
///
/// # Returns
///
/// Returns twice the actual number of flipped discs for optimization purposes.
#[inline(always)]
pub fn count_last_flip(player: u64, sq: Square) -> i32 {
    debug_assert!(sq != Square::None, "count_last_flip called on Square::None");

    cfg_if! {
        if #[cfg(all(target_arch = "x86_64", target_feature = "avx2", not(feature = "portable")))] {
            unsafe { count_last_flip_avx2::count_last_flip(player, sq) }
        } else if #[cfg(all(target_arch = "x86_64", target_feature = "sse2", not(feature = "portable")))] {
            unsafe { count_last_flip_sse2::count_last_flip(player, sq) }
        } else {
            count_last_flip_kindergarten::count_last_flip(player, sq)
        }
    }
}

/// The portable last-flip strategy, independent of the build target.
#[inline]
pub fn count_last_flip_portable(player: u64, sq: Square) -> i32 {
    count_last_flip_kindergarten::count_last_flip(player, sq)
}

#[inline(always)]
fn lookup(pos: usize, pattern: u8) -> i32 {
    *crate::uget!(COUNT_FLIP; pos, pattern as usize) as i32
}
