use reversi_flip::square::Square;

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Flipped discs found by stepping outward one square at a time.
///
/// Same walk as the reference in `reversi_flip::flip` tests; keep the two identical.
pub fn flip(sq: Square, p: u64, o: u64) -> u64 {
    let mut flipped = 0;
    for (dx, dy) in DIRECTIONS {
        let mut x = sq.file() as i32 + dx;
        let mut y = sq.rank() as i32 + dy;
        let mut run = 0u64;
        while (0..8).contains(&x) && (0..8).contains(&y) {
            let bit = 1u64 << (y * 8 + x);
            if o & bit == 0 {
                if p & bit != 0 {
                    flipped |= run;
                }
                break;
            }
            run |= bit;
            x += dx;
            y += dy;
        }
    }
    flipped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oracle_initial_position() {
        let p = Square::D5.bitboard() | Square::E4.bitboard();
        let o = Square::D4.bitboard() | Square::E5.bitboard();
        assert_eq!(flip(Square::C4, p, o), Square::D4.bitboard());
        assert_eq!(flip(Square::F5, p, o), Square::E5.bitboard());
        assert_eq!(flip(Square::A1, p, o), 0);
    }

    #[test]
    fn test_oracle_stops_at_edge() {
        let o = 0x00000000000000feu64;
        assert_eq!(flip(Square::A1, 0, o), 0);
        assert_eq!(flip(Square::A1, Square::D1.bitboard(), o & 0x06), 0x06);
    }

    #[test]
    fn test_oracle_matches_library_flip() {
        let p = 0x8142241818244281u64 & !0x0000001818000000;
        let o = (0x0000001818000000u64 | 0x003c7e66667e3c00) & !p;
        for sq in Square::iter() {
            if (p | o) & sq.bitboard() != 0 {
                continue;
            }
            assert_eq!(flip(sq, p, o), reversi_flip::flip::flip_portable(sq, p, o), "{sq}");
        }
    }
}
