use anyhow::{Context, Result, bail};
use colored::Colorize;
use reversi_flip::bit::popcount;
use reversi_flip::flip::flip;
use reversi_flip::square::Square;

use crate::pattern::{self, Hex};

pub fn execute(sq: Square, mover: &str, opponent: &str) -> Result<()> {
    let p = pattern::parse(mover).context("invalid mover pattern")?;
    let o = pattern::parse(opponent).context("invalid opponent pattern")?;

    if p & o != 0 {
        bail!("mover and opponent overlap at {}", Hex(p & o));
    }
    if (p | o) & sq.bitboard() != 0 {
        bail!("square {sq} is occupied");
    }

    let flipped = flip(sq, p, o);
    tracing::debug!(%sq, flipped = %Hex(flipped), "play");

    print_board(sq, p, o, flipped);
    if flipped == 0 {
        println!("{sq} is not a legal move");
    } else {
        println!("{sq} flips {} discs: {}", popcount(flipped), Hex(flipped));
    }
    Ok(())
}

/// Prints the position after the move, flipped discs highlighted.
fn print_board(sq: Square, p: u64, o: u64, flipped: u64) {
    println!("      a   b   c   d   e   f   g   h");
    println!("    ┌───┬───┬───┬───┬───┬───┬───┬───┐");
    for y in 0..8 {
        print!("  {} │", y + 1);
        for x in 0..8 {
            let bit = Square::from_usize_unchecked(y * 8 + x).bitboard();
            let symbol = if bit == sq.bitboard() {
                " X ".on_bright_black().bright_green()
            } else if flipped & bit != 0 {
                " X ".bright_cyan()
            } else if p & bit != 0 {
                " X ".bright_green()
            } else if o & bit != 0 {
                " O ".bright_yellow()
            } else {
                "   ".black()
            };
            print!("{symbol}│");
        }
        println!();
        if y < 7 {
            println!("    ├───┼───┼───┼───┼───┼───┼───┼───┤");
        }
    }
    println!("    └───┴───┴───┴───┴───┴───┴───┴───┘");
}
