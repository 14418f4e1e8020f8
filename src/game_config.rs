// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board_layout};

pub struct StaticGameConfig {
    alphabet: alphabet::Alphabet,
    board_layout: board_layout::BoardLayout,
    rack_size: i8,
    full_rack_bonus: i16,
}

pub enum GameConfig {
    Static(StaticGameConfig),
}

impl GameConfig {
    #[inline(always)]
    pub fn alphabet(&self) -> &alphabet::Alphabet {
        match self {
            GameConfig::Static(x) => &x.alphabet,
        }
    }

    #[inline(always)]
    pub fn board_layout(&self) -> &board_layout::BoardLayout {
        match self {
            GameConfig::Static(x) => &x.board_layout,
        }
    }

    #[inline(always)]
    pub fn rack_size(&self) -> i8 {
        match self {
            GameConfig::Static(x) => x.rack_size,
        }
    }

    #[inline(always)]
    pub fn num_played_bonus(&self, num_played: i8) -> i16 {
        match self {
            GameConfig::Static(x) => {
                // branchless
                x.full_rack_bonus & -((num_played >= x.rack_size) as i16)
            }
        }
    }
}

impl std::fmt::Debug for GameConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GameConfig({}x{}, rack {})",
            self.board_layout().dim().rows,
            self.board_layout().dim().cols,
            self.rack_size()
        )
    }
}

pub fn make_game_config(
    alphabet: alphabet::Alphabet,
    board_layout: board_layout::BoardLayout,
    rack_size: i8,
    full_rack_bonus: i16,
) -> GameConfig {
    GameConfig::Static(StaticGameConfig {
        alphabet,
        board_layout,
        rack_size,
        full_rack_bonus,
    })
}

pub fn make_english_game_config() -> GameConfig {
    make_game_config(
        alphabet::make_english_alphabet(),
        board_layout::make_standard_board_layout(),
        7,
        50,
    )
}

pub fn make_wwf_game_config() -> GameConfig {
    make_game_config(
        alphabet::make_wwf_alphabet(),
        board_layout::make_wwf_board_layout(),
        7,
        35,
    )
}
