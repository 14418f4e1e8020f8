// Copyright (C) 2020-2026 Andy Kurnia.

use super::matrix;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Premium {
    pub word_multiplier: i8,
    pub tile_multiplier: i8,
}

const TWS: Premium = Premium {
    word_multiplier: 3,
    tile_multiplier: 1,
};
const DWS: Premium = Premium {
    word_multiplier: 2,
    tile_multiplier: 1,
};
const TLS: Premium = Premium {
    word_multiplier: 1,
    tile_multiplier: 3,
};
const DLS: Premium = Premium {
    word_multiplier: 1,
    tile_multiplier: 2,
};
const FVS: Premium = Premium {
    word_multiplier: 1,
    tile_multiplier: 1,
};

static STANDARD_PREMIUMS: [Premium; 225] = [
    TWS, FVS, FVS, DLS, FVS, FVS, FVS, TWS, FVS, FVS, FVS, DLS, FVS, FVS, TWS, //
    FVS, DWS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, DWS, FVS, //
    FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, //
    DLS, FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, DLS, //
    FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, FVS, //
    FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, //
    FVS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, FVS, //
    TWS, FVS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, FVS, TWS, //
    FVS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, FVS, //
    FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, //
    FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, FVS, //
    DLS, FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, DLS, //
    FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, //
    FVS, DWS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, DWS, FVS, //
    TWS, FVS, FVS, DLS, FVS, FVS, FVS, TWS, FVS, FVS, FVS, DLS, FVS, FVS, TWS, //
];

static WWF_PREMIUMS: [Premium; 225] = [
    FVS, FVS, FVS, TWS, FVS, FVS, TLS, FVS, TLS, FVS, FVS, TWS, FVS, FVS, FVS, //
    FVS, FVS, DLS, FVS, FVS, DWS, FVS, FVS, FVS, DWS, FVS, FVS, DLS, FVS, FVS, //
    FVS, DLS, FVS, FVS, DLS, FVS, FVS, FVS, FVS, FVS, DLS, FVS, FVS, DLS, FVS, //
    TWS, FVS, FVS, TLS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, TLS, FVS, FVS, TWS, //
    FVS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, FVS, //
    FVS, DWS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, DWS, FVS, //
    TLS, FVS, FVS, FVS, DLS, FVS, FVS, FVS, FVS, FVS, DLS, FVS, FVS, FVS, TLS, //
    FVS, FVS, FVS, DWS, FVS, FVS, FVS, FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, //
    TLS, FVS, FVS, FVS, DLS, FVS, FVS, FVS, FVS, FVS, DLS, FVS, FVS, FVS, TLS, //
    FVS, DWS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, DWS, FVS, //
    FVS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, FVS, //
    TWS, FVS, FVS, TLS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, TLS, FVS, FVS, TWS, //
    FVS, DLS, FVS, FVS, DLS, FVS, FVS, FVS, FVS, FVS, DLS, FVS, FVS, DLS, FVS, //
    FVS, FVS, DLS, FVS, FVS, DWS, FVS, FVS, FVS, DWS, FVS, FVS, DLS, FVS, FVS, //
    FVS, FVS, FVS, TWS, FVS, FVS, TLS, FVS, TLS, FVS, FVS, TWS, FVS, FVS, FVS, //
];

pub struct StaticBoardLayout {
    premiums: Box<[Premium]>,
    dim: matrix::Dim,
    star_row: i8,
    star_col: i8,
}

pub enum BoardLayout {
    Static(StaticBoardLayout),
}

impl BoardLayout {
    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        match self {
            BoardLayout::Static(x) => x.dim,
        }
    }

    #[inline(always)]
    pub fn star_row(&self) -> i8 {
        match self {
            BoardLayout::Static(x) => x.star_row,
        }
    }

    #[inline(always)]
    pub fn star_col(&self) -> i8 {
        match self {
            BoardLayout::Static(x) => x.star_col,
        }
    }

    // indexed the same way as the board tiles.
    #[inline(always)]
    pub fn premiums(&self) -> &[Premium] {
        match self {
            BoardLayout::Static(x) => &x.premiums,
        }
    }

    #[inline(always)]
    pub fn premium_at(&self, row: i8, col: i8) -> Premium {
        self.premiums()[self.dim().at_row_col(row, col)]
    }
}

pub fn make_standard_board_layout() -> BoardLayout {
    BoardLayout::Static(StaticBoardLayout {
        premiums: Box::new(STANDARD_PREMIUMS),
        dim: matrix::Dim { rows: 15, cols: 15 },
        star_row: 7,
        star_col: 7,
    })
}

// star square carries no premium.
pub fn make_wwf_board_layout() -> BoardLayout {
    BoardLayout::Static(StaticBoardLayout {
        premiums: Box::new(WWF_PREMIUMS),
        dim: matrix::Dim { rows: 15, cols: 15 },
        star_row: 7,
        star_col: 7,
    })
}

// no premium squares, star in the middle.
pub fn make_plain_board_layout(rows: i8, cols: i8) -> BoardLayout {
    let dim = matrix::Dim { rows, cols };
    BoardLayout::Static(StaticBoardLayout {
        premiums: vec![FVS; dim.num_squares()].into_boxed_slice(),
        dim,
        star_row: rows / 2,
        star_col: cols / 2,
    })
}
