//! Report of the strategies selected for the current build target.

use std::fmt;

use crate::bit::{BIT_SCAN_STRATEGY, POPCOUNT_STRATEGY};
use crate::count_last_flip::COUNT_LAST_FLIP_STRATEGY;
use crate::flip::{FLIP_STRATEGY, REVERSE_SCAN_STRATEGY};

/// Compiled-in strategy names, one per hardware-dependent concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategies {
    pub popcount: &'static str,
    pub bit_scan: &'static str,
    pub reverse_scan: &'static str,
    pub flip: &'static str,
    pub count_last_flip: &'static str,
}

/// Returns the strategies chosen at build time.
pub const fn strategies() -> Strategies {
    Strategies {
        popcount: POPCOUNT_STRATEGY,
        bit_scan: BIT_SCAN_STRATEGY,
        reverse_scan: REVERSE_SCAN_STRATEGY,
        flip: FLIP_STRATEGY,
        count_last_flip: COUNT_LAST_FLIP_STRATEGY,
    }
}

impl fmt::Display for Strategies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "popcount:        {}", self.popcount)?;
        writeln!(f, "bit scan:        {}", self.bit_scan)?;
        writeln!(f, "reverse scan:    {}", self.reverse_scan)?;
        writeln!(f, "flip:            {}", self.flip)?;
        write!(f, "count last flip: {}", self.count_last_flip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategies_display() {
        let s = strategies();
        let text = s.to_string();
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains(s.flip));
        assert!(text.ends_with(s.count_last_flip));
    }

    #[test]
    #[cfg(feature = "portable")]
    fn test_portable_feature_selects_fallbacks() {
        let s = strategies();
        assert_eq!(s.popcount, "swar");
        assert_eq!(s.bit_scan, "debruijn");
        assert_eq!(s.reverse_scan, "guardian");
        assert_eq!(s.flip, "bitscan");
        assert_eq!(s.count_last_flip, "kindergarten");
    }

    #[test]
    #[cfg(all(target_arch = "x86_64", not(feature = "portable")))]
    fn test_x86_64_uses_simd_flip() {
        // sse2 is part of the x86_64 baseline
        assert_eq!(strategies().flip, "sse2");
        assert_ne!(strategies().count_last_flip, "kindergarten");
    }
}
