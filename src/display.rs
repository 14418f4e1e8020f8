// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board_layout, matrix, play_scorer};
use std::fmt::Write;

#[inline(always)]
pub fn empty_label(board_layout: &board_layout::BoardLayout, row: i8, col: i8) -> &'static str {
    if row == board_layout.star_row() && col == board_layout.star_col() {
        return "*";
    }
    let premium = board_layout.premium_at(row, col);
    match (premium.word_multiplier, premium.tile_multiplier) {
        (3, _) => "=",
        (2, _) => "-",
        (_, 3) => "\"",
        (_, 2) => "\'",
        _ => " ",
    }
}

#[inline(always)]
pub fn board_label(
    alphabet: &alphabet::Alphabet,
    board_layout: &board_layout::BoardLayout,
    board_tiles: &[u8],
    row: i8,
    col: i8,
) -> &'static str {
    alphabet
        .from_board(board_tiles[board_layout.dim().at_row_col(row, col)])
        .unwrap_or_else(|| empty_label(board_layout, row, col))
}

fn column_header(s: &mut String, dim: matrix::Dim) {
    s.push_str("  ");
    for c in 0..dim.cols {
        write!(s, " {}", ((c as u8) + 0x61) as char).ok();
    }
    s.push('\n');
}

fn rule(s: &mut String, dim: matrix::Dim) {
    s.push_str("  +");
    for _ in 1..dim.cols {
        s.push_str("--");
    }
    s.push_str("-+\n");
}

pub fn board_to_string(
    alphabet: &alphabet::Alphabet,
    board_layout: &board_layout::BoardLayout,
    board_tiles: &[u8],
) -> String {
    let dim = board_layout.dim();
    let mut s = String::new();
    column_header(&mut s, dim);
    rule(&mut s, dim);
    for r in 0..dim.rows {
        write!(s, "{:2}|", r + 1).ok();
        for c in 0..dim.cols {
            if c > 0 {
                s.push(' ');
            }
            s.push_str(board_label(alphabet, board_layout, board_tiles, r, c));
        }
        writeln!(s, "|{}", r + 1).ok();
    }
    rule(&mut s, dim);
    column_header(&mut s, dim);
    s
}

// 8G for across plays, G8 for down plays.
pub fn play_position(candidate: &play_scorer::CandidatePlay, dim: matrix::Dim) -> String {
    let play = &candidate.play;
    let (row, col) = dim.row_col(play.orientation, play.lane, play.idx);
    let col_label = ((col as u8) + 0x61).to_ascii_uppercase() as char;
    match play.orientation {
        matrix::Orientation::Across => format!("{}{}", row + 1, col_label),
        matrix::Orientation::Down => format!("{}{}", col_label, row + 1),
    }
}

// play-through squares shown as dots, like "8G CA.S 12".
pub fn candidate_to_string(
    alphabet: &alphabet::Alphabet,
    candidate: &play_scorer::CandidatePlay,
    dim: matrix::Dim,
) -> String {
    let mut s = play_position(candidate, dim);
    s.push(' ');
    for &tile in candidate.play.word.iter() {
        s.push_str(if tile == 0 {
            "."
        } else {
            alphabet.from_board(tile).unwrap_or("?")
        });
    }
    write!(s, " {}", candidate.score).ok();
    s
}
