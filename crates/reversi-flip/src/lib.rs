//! Bitboard move kernels for 8×8 Othello.
//!
//! A position is two `u64` patterns, one per side, with bit `i` standing for
//! square `i` (A1 = 0, H1 = 7, H8 = 63). The crate computes the discs flipped
//! by a move ([`flip::flip`]), counts flips of the last move of a game without
//! building the mask ([`count_last_flip::count_last_flip`]), and provides the
//! bit primitives both rely on. Hardware-specific strategies are chosen at
//! build time; [`target::strategies`] reports which ones were compiled in.

pub mod bit;
pub mod count_last_flip;
pub mod flip;
mod lanes;
pub mod masks;
pub mod square;
pub mod target;
mod util;
