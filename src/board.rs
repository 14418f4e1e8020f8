// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board_layout, error, matrix};

// Everything on a board snapshot is locked; 0 is an empty square.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    dim: matrix::Dim,
    tiles: Box<[u8]>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Square {
    pub row: i8,
    pub col: i8,
    pub tile: Option<u8>,
    pub premium: board_layout::Premium,
}

impl Board {
    pub fn new(dim: matrix::Dim) -> Board {
        Board {
            dim,
            tiles: vec![0; dim.num_squares()].into_boxed_slice(),
        }
    }

    pub fn from_tiles(dim: matrix::Dim, tiles: Box<[u8]>) -> error::Returns<Board> {
        if tiles.len() != dim.num_squares() {
            return_error!(format!(
                "{} tiles for a {}x{} board",
                tiles.len(),
                dim.rows,
                dim.cols
            ));
        }
        Ok(Board { dim, tiles })
    }

    // One line per row, cells between pipes: "| |C|a|T| |".
    // Uppercase is a tile, lowercase a blank standing for that letter.
    pub fn parse(alphabet: &alphabet::Alphabet, dim: matrix::Dim, text: &str) -> error::Returns<Board> {
        let mut board = Board::new(dim);
        let mut row = 0;
        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if row >= dim.rows {
                return_error!(format!("more than {} rows", dim.rows));
            }
            let Some(cells) = line
                .strip_prefix('|')
                .and_then(|line| line.strip_suffix('|'))
            else {
                return_error!(format!("row {} is not enclosed in pipes: {line:?}", row + 1));
            };
            let mut col = 0;
            for cell in cells.split('|') {
                if col >= dim.cols {
                    return_error!(format!("row {} has more than {} columns", row + 1, dim.cols));
                }
                let mut chars = cell.chars();
                let tile = match (chars.next(), chars.next()) {
                    (None, _) | (Some(' '), None) => 0,
                    (Some(c), None) => match alphabet.tile_of_board_label(c) {
                        Some(tile) => tile,
                        None => {
                            return_error!(format!("invalid tile {c:?} at row {} col {}", row + 1, col + 1));
                        }
                    },
                    _ => {
                        return_error!(format!("invalid cell {cell:?} at row {} col {}", row + 1, col + 1));
                    }
                };
                board.tiles[dim.at_row_col(row, col)] = tile;
                col += 1;
            }
            if col != dim.cols {
                return_error!(format!("row {} has {col} columns, expected {}", row + 1, dim.cols));
            }
            row += 1;
        }
        if row != dim.rows {
            return_error!(format!("{row} rows, expected {}", dim.rows));
        }
        Ok(board)
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    #[inline(always)]
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.iter().all(|&tile| tile == 0)
    }

    pub fn tile_at(&self, row: i8, col: i8) -> Option<u8> {
        if !self.dim.contains(row, col) {
            return None;
        }
        match self.tiles[self.dim.at_row_col(row, col)] {
            0 => None,
            tile => Some(tile),
        }
    }

    pub fn set_tile(&mut self, row: i8, col: i8, tile: u8) -> error::Returns<()> {
        if !self.dim.contains(row, col) {
            return_error!(format!("({row}, {col}) is off the board"));
        }
        self.tiles[self.dim.at_row_col(row, col)] = tile;
        Ok(())
    }

    pub fn square(&self, board_layout: &board_layout::BoardLayout, row: i8, col: i8) -> Option<Square> {
        self.dim.contains(row, col).then(|| Square {
            row,
            col,
            tile: self.tile_at(row, col),
            premium: board_layout.premium_at(row, col),
        })
    }

    // Empty squares next to a tile, in row-major order. Every play covers one.
    // The generator works these out from its cross sets instead.
    pub fn anchors(&self, board_layout: &board_layout::BoardLayout) -> Vec<(i8, i8)> {
        if self.is_empty() {
            return vec![(board_layout.star_row(), board_layout.star_col())];
        }
        let mut ret = Vec::new();
        for row in 0..self.dim.rows {
            for col in 0..self.dim.cols {
                if self.tile_at(row, col).is_none()
                    && [(-1, 0), (1, 0), (0, -1), (0, 1)]
                        .iter()
                        .any(|&(dr, dc)| self.tile_at(row + dr, col + dc).is_some())
                {
                    ret.push((row, col));
                }
            }
        }
        ret
    }

    // same format parse reads.
    pub fn to_text(&self, alphabet: &alphabet::Alphabet) -> String {
        let mut s = String::new();
        for row in 0..self.dim.rows {
            s.push('|');
            for col in 0..self.dim.cols {
                s.push_str(
                    alphabet
                        .from_board(self.tiles[self.dim.at_row_col(row, col)])
                        .unwrap_or(" "),
                );
                s.push('|');
            }
            s.push('\n');
        }
        s
    }
}
