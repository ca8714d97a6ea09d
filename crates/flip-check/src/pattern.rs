use std::fmt;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;
use reversi_flip::bit;

/// Symmetry applied before printing a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transform {
    None,
    Vertical,
    Horizontal,
    Transpose,
}

impl Transform {
    pub fn apply(self, b: u64) -> u64 {
        match self {
            Transform::None => b,
            Transform::Vertical => bit::flip_vertical(b),
            Transform::Horizontal => bit::flip_horizontal(b),
            Transform::Transpose => bit::transpose(b),
        }
    }
}

/// Displays a pattern as zero-padded hex.
pub struct Hex(pub u64);

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Parses a hexadecimal pattern, with or without a `0x` prefix.
pub fn parse(s: &str) -> Result<u64> {
    let s = s.trim();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
        .replace('_', "");
    u64::from_str_radix(&digits, 16).with_context(|| format!("invalid hex pattern '{s}'"))
}

pub fn dump(pattern: &str, transform: Transform) -> Result<()> {
    let b = transform.apply(parse(pattern)?);
    tracing::debug!(pattern = %Hex(b), ?transform, "dump");

    let mut out = io::stdout().lock();
    bit::write_bitboard(b, &mut out).context("failed to write pattern")?;
    writeln!(out, "{} discs", bit::popcount(b)).context("failed to write pattern")?;
    Ok(())
}
