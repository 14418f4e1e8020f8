// Copyright (C) 2020-2026 Andy Kurnia.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tileplay::lexicon::Dictionary;
use tileplay::{
    alphabet, board, board_layout, controller, error, game_config, kwg, lexicon, matrix,
};

pub const SMALL_WORDS: &[&str] = &[
    "AA", "AB", "AD", "AE", "AG", "AH", "AI", "AL", "AM", "AN", "AR", "AS", "AT", "AW", "AX",
    "AY", "BA", "BE", "BI", "BO", "BY", "DA", "DE", "DO", "ED", "EF", "EH", "EL", "EM", "EN",
    "ER", "ES", "EX", "FA", "FE", "GO", "HA", "HE", "HI", "HO", "ID", "IF", "IN", "IS", "IT",
    "JO", "KA", "KI", "LA", "LI", "LO", "MA", "ME", "MI", "MO", "MU", "MY", "NA", "NE", "NO",
    "NU", "OD", "OE", "OF", "OH", "OI", "OM", "ON", "OP", "OR", "OS", "OW", "OX", "OY", "PA",
    "PE", "PI", "QI", "RE", "SH", "SI", "SO", "TA", "TI", "TO", "UH", "UM", "UN", "UP", "US",
    "UT", "WE", "WO", "XI", "XU", "YA", "YE", "YO", "ZA", "ZO", "ACE", "ACT", "ADS", "AGE",
    "AID", "AIR", "ALE", "ANT", "APE", "ARC", "ARE", "ART", "ATE", "BAT", "BED", "BET", "CAR",
    "CAT", "COT", "DOE", "DOT", "EAR", "EAT", "ERA", "ETA", "GAS", "HAT", "HEN", "HOT", "ICE",
    "ION", "JOT", "NET", "NOT", "OAT", "ONE", "ORE", "PAT", "PEN", "PET", "POT", "QAT", "RAN",
    "RAT", "RED", "ROT", "SAT", "SEA", "SET", "SIT", "TAN", "TAR", "TEA", "TEN", "TIE", "TIN",
    "TOE", "TON", "ZOA", "ACTS", "CRAG", "EATS", "IRON", "NEAT", "NOTE", "QUIT", "RATE", "REST",
    "SEAT", "STEP", "TEAR", "TONE", "ZERO", "ZETA", "ATONE", "IRATE", "STARE", "TEARS",
];

pub fn english() -> Arc<game_config::GameConfig> {
    Arc::new(game_config::make_english_game_config())
}

// every letter worth one, for boards where premiums are the point.
pub fn flat_english() -> Arc<game_config::GameConfig> {
    Arc::new(game_config::make_game_config(
        game_config::make_english_game_config()
            .alphabet()
            .rescored(|tile| (tile != 0) as i8),
        board_layout::make_standard_board_layout(),
        7,
        50,
    ))
}

pub fn wwf() -> Arc<game_config::GameConfig> {
    Arc::new(game_config::make_wwf_game_config())
}

// Words With Friends board and bingo, every letter worth one.
pub fn flat_wwf() -> Arc<game_config::GameConfig> {
    Arc::new(game_config::make_game_config(
        alphabet::make_wwf_alphabet().rescored(|tile| (tile != 0) as i8),
        board_layout::make_wwf_board_layout(),
        7,
        35,
    ))
}

pub fn word_graph(game_config: &game_config::GameConfig, words: &[&str]) -> lexicon::WordGraph {
    lexicon::WordGraph::from_words("test", game_config.alphabet(), words.iter().copied()).unwrap()
}

pub fn dictionary(game_config: &game_config::GameConfig, words: &[&str]) -> lexicon::DictionaryHandle {
    lexicon::DictionaryHandle::Loaded(Arc::new(word_graph(game_config, words)))
}

pub fn dim(game_config: &game_config::GameConfig) -> matrix::Dim {
    game_config.board_layout().dim()
}

pub fn parse_board(game_config: &game_config::GameConfig, rows: &[&str]) -> board::Board {
    board::Board::parse(game_config.alphabet(), dim(game_config), &rows.join("\n")).unwrap()
}

pub fn empty_board(game_config: &game_config::GameConfig) -> board::Board {
    board::Board::new(dim(game_config))
}

// CRAG with its C over ACTS, and TOP/STEP alongside.
pub fn crag_board(game_config: &game_config::GameConfig) -> board::Board {
    parse_board(
        game_config,
        &[
            "| | | | | | | | | | | | | | | |",
            "| | | | | | | | | | | | | | | |",
            "| | | | | | | | | | | | | | | |",
            "| | | | | | | | | | | | | | | |",
            "| | | | | | | | | | | | | | | |",
            "| | | | | | | | | | | | | | | |",
            "| | | | |G| | | | | | | | | | |",
            "| | | |C|R|A| | | | | | | | | |",
            "| | | |T|O| | | | | | | | | | |",
            "| | | |S|T|E|P| | | | | | | | |",
            "| | | | | | | | | | | | | | | |",
            "| | | | | | | | | | | | | | | |",
            "| | | | | | | | | | | | | | | |",
            "| | | | | | | | | | | | | | | |",
            "| | | | | | | | | | | | | | | |",
        ],
    )
}

// only the top-left corner is open: QUIT across row 2 or QI down column 1.
pub fn quit_board(game_config: &game_config::GameConfig) -> board::Board {
    let mut rows = vec![
        "| | |X|Y|Y|Y|X|X|X|X|X|X|X|X|X|",
        "| |U|I|T| |Y|X|X|X|X|X|X|X|X|X|",
        "| | |X|Y|Y|Y|X|X|X|X|X|X|X|X|X|",
        "| |X|X|X|Y|X|X|X|X|X|X|X|X|X|X|",
    ];
    rows.resize(15, "|X|X|X|X|X|X|X|X|X|X|X|X|X|X|X|");
    parse_board(game_config, &rows)
}

// QUIT down the left edge, with QI across the top row.
pub fn quit_across_board(game_config: &game_config::GameConfig) -> board::Board {
    let mut rows = vec![
        "| | | |Y|Y|Y|X|X|X|X|X|X|X|X|X|",
        "|U| |X|X|X|Y|X|X|X|X|X|X|X|X|X|",
        "|I|X|X|Y|Y|Y|X|X|X|X|X|X|X|X|X|",
        "|T|X|X|X|Y|X|X|X|X|X|X|X|X|X|X|",
        "| |X|X|X|X|X|X|X|X|X|X|X|X|X|X|",
    ];
    rows.resize(15, "|X|X|X|X|X|X|X|X|X|X|X|X|X|X|X|");
    parse_board(game_config, &rows)
}

// WIG in a clearing, with room for S on either side and a word across it.
pub fn wig_board(game_config: &game_config::GameConfig) -> board::Board {
    let mut rows = vec!["|X|X|X|X|X|X|X|X|X|X|X|X|X|X|X|"; 5];
    rows.extend([
        "|X|X|X|X|X| |X|X|X| |X|X|X|X|X|",
        "|X|X|X|X| | | |X| | | |X|X|X|X|",
        "|X|X|X|X| | |W|I|G| | |X|X|X|X|",
        "|X|X|X|X| | | |X| | | |X|X|X|X|",
        "|X|X|X|X|X| |X|X|X| |X|X|X|X|X|",
    ]);
    rows.resize(15, "|X|X|X|X|X|X|X|X|X|X|X|X|X|X|X|");
    parse_board(game_config, &rows)
}

// SENSORY across row 8 from column 5.
pub fn sensory_board(game_config: &game_config::GameConfig) -> board::Board {
    let mut board = empty_board(game_config);
    let word = game_config.alphabet().read_word("SENSORY").unwrap();
    for (col, tile) in (5..).zip(word) {
        board.set_tile(8, col, tile).unwrap();
    }
    board
}

pub fn request(
    game_config: &Arc<game_config::GameConfig>,
    board: board::Board,
    rack: &str,
    dictionary: lexicon::DictionaryHandle,
) -> controller::SearchRequest {
    let rack = game_config.alphabet().read_rack(rack).unwrap();
    controller::SearchRequest::new(Arc::clone(game_config), board, rack, dictionary)
}

// Takes its time on every lookup.
pub struct SlowDictionary {
    pub inner: lexicon::WordGraph,
    pub delay: Duration,
}

impl lexicon::Dictionary for SlowDictionary {
    fn name(&self) -> &str {
        "slow"
    }

    fn kwg(&self) -> Result<&kwg::Kwg, error::SearchError> {
        std::thread::sleep(self.delay);
        self.inner.kwg()
    }
}

// Works for the first few lookups, then goes away.
pub struct FlakyDictionary {
    pub inner: lexicon::WordGraph,
    pub remaining: AtomicUsize,
}

impl FlakyDictionary {
    pub fn new(inner: lexicon::WordGraph, lookups: usize) -> Self {
        Self {
            inner,
            remaining: AtomicUsize::new(lookups),
        }
    }
}

impl lexicon::Dictionary for FlakyDictionary {
    fn name(&self) -> &str {
        "flaky"
    }

    fn kwg(&self) -> Result<&kwg::Kwg, error::SearchError> {
        if self
            .remaining
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .is_err()
        {
            return Err(error::SearchError::dictionary_unavailable("lexicon server went away"));
        }
        self.inner.kwg()
    }
}

// Brings the worker down with it.
pub struct PanickingDictionary;

impl lexicon::Dictionary for PanickingDictionary {
    fn name(&self) -> &str {
        "panicking"
    }

    fn kwg(&self) -> Result<&kwg::Kwg, error::SearchError> {
        panic!("corrupt lexicon");
    }
}
