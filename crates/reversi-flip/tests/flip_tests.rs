use reversi_flip::bit::{self, BitboardGrid, popcount};
use reversi_flip::count_last_flip::{count_last_flip, count_last_flip_portable};
use reversi_flip::flip::{flip, flip_portable};
use reversi_flip::square::Square;
use reversi_flip::target;

/// Parses 64 characters of `X` (player), `O` (opponent) and `-` (empty), A1 first.
fn from_string(s: &str) -> (u64, u64) {
    assert_eq!(s.len(), 64);
    let mut p = 0;
    let mut o = 0;
    for (i, c) in s.chars().enumerate() {
        match c {
            'X' => p |= 1u64 << i,
            'O' => o |= 1u64 << i,
            '-' => {}
            _ => panic!("unexpected character {c:?}"),
        }
    }
    (p, o)
}

fn bits(squares: &[Square]) -> u64 {
    squares.iter().fold(0, |acc, sq| acc | sq.bitboard())
}

#[test]
fn test_scenario_two_by_two() {
    let p = bits(&[Square::E4, Square::F4]);
    let o = bits(&[Square::D3, Square::E3]);

    assert_eq!(flip(Square::F5, p, o), 0);
    assert_eq!(flip(Square::E2, p, o), Square::E3.bitboard());
    assert_eq!(flip(Square::D2, p, o), Square::E3.bitboard());
    assert_eq!(flip(Square::C2, p, o), Square::D3.bitboard());
}

#[test]
fn test_flip_does_not_wrap_rows() {
    let p = Square::A2.bitboard();
    let o = Square::H1.bitboard();
    assert_eq!(flip(Square::G1, p, o), 0);

    let p = Square::H3.bitboard();
    let o = Square::A3.bitboard();
    assert_eq!(flip(Square::H2, p, o), 0);
    assert_eq!(flip(Square::B3, p, o), 0);
}

#[test]
fn test_flip_endgame_position() {
    let (p, o) =
        from_string("--O--O----OOOOO-XOOOOOOOXXOOXOOOXXXXXOXXXOXXOOXXXXXXOXOXXOOOOOOX");
    let empty = !(p | o);

    let mut legal = 0;
    for sq in bit::iter_bits(empty) {
        let flipped = flip(sq, p, o);
        assert_eq!(flipped, flip_portable(sq, p, o), "{sq}");
        assert_eq!(flipped & !o, 0, "{sq}");
        if flipped != 0 {
            legal += 1;
        }
    }
    assert_eq!(legal, 8);
    assert_eq!(popcount(flip(Square::D1, p, o)), 8);
    assert_eq!(flip(Square::A1, p, o), 0);
}

#[test]
fn test_last_flip_equivalence_every_square() {
    let (p, _) =
        from_string("XOXXOOXOOXOXXOOXXXOOXOXOOXOXXXOOXOOOXXOXOXOXXOOOXOXXOOXXOXOXOXXO");
    for sq in Square::iter() {
        let player = p & !sq.bitboard();
        let opponent = !player & !sq.bitboard();
        let expected = 2 * popcount(flip(sq, player, opponent)) as i32;
        assert_eq!(count_last_flip(player, sq), expected, "{sq}");
        assert_eq!(count_last_flip_portable(player, sq), expected, "{sq}");
    }
}

#[test]
fn test_last_flip_three_lines() {
    // H1 is the last empty square; row 1 is opponent back to A1, H2 and G2 are
    // single opponent discs
    let filler = !0x0000_0000_0000_00ffu64 & !bits(&[Square::G2, Square::H2]);
    let player = filler | Square::A1.bitboard();
    let opponent = !player & !Square::H1.bitboard();

    assert_eq!(popcount(flip(Square::H1, player, opponent)), 8);
    assert_eq!(count_last_flip(player, Square::H1), 16);
}

#[test]
fn test_bitboard_grid_marks_flipped_discs() {
    let p = bits(&[Square::E4, Square::F4]);
    let o = bits(&[Square::D3, Square::E3]);
    let text = BitboardGrid(flip(Square::E2, p, o)).to_string();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "  A B C D E F G H");
    assert_eq!(lines[3], "3 . . . . X . . . 3");
    assert_eq!(text.matches('X').count(), 1);
}

#[test]
fn test_strategies_are_reported() {
    let s = target::strategies();
    assert!(!s.flip.is_empty());
    assert!(!s.count_last_flip.is_empty());
    assert!(s.to_string().contains("flip:"));
}
