// Copyright (C) 2020-2026 Andy Kurnia.

use super::{error, kwg, matrix, movegen};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    pub row: i8,
    pub col: i8,
    pub letter: String,
    pub is_blank: bool,
    pub score: i8, // face value, 0 for blanks
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FormedWord {
    pub word: String,
    pub score: i16,
}

// words lists the perpendicular words in placement order, then the main word.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CandidatePlay {
    pub play: movegen::Play,
    pub placements: Vec<Placement>,
    pub words: Vec<FormedWord>,
    pub score: i16,
}

#[derive(Default)]
pub struct PlayScorer {
    main_tiles: Vec<u8>,
    perpendicular_tiles: Vec<u8>,
}

impl PlayScorer {
    pub fn new() -> Self {
        Self::default()
    }

    // Geometry only, words are not looked up.
    pub fn check_placement(
        &self,
        board_snapshot: &movegen::BoardSnapshot<'_>,
        play: &movegen::Play,
    ) -> Result<(), error::SearchError> {
        let game_config = board_snapshot.game_config;
        let alphabet = game_config.alphabet();
        let dim = game_config.board_layout().dim();
        if board_snapshot.board_tiles.len() != dim.num_squares() {
            return Err(error::SearchError::malformed(format_args!(
                "board has {} squares, expected {}",
                board_snapshot.board_tiles.len(),
                dim.num_squares()
            )));
        }
        if !(0..dim.num_lanes(play.orientation)).contains(&play.lane) {
            return Err(error::SearchError::malformed(format_args!(
                "{:?} lane {} is off the board",
                play.orientation, play.lane
            )));
        }
        let strider = dim.lane(play.orientation, play.lane);
        if play.word.is_empty()
            || play.idx < 0
            || play.idx as usize + play.word.len() > strider.len() as usize
        {
            return Err(error::SearchError::malformed(format_args!(
                "{} tiles at {} do not fit in {:?} lane {}",
                play.word.len(),
                play.idx,
                play.orientation,
                play.lane
            )));
        }
        let idx_right = play.idx + play.word.len() as i8;
        if (play.idx > 0 && board_snapshot.board_tiles[strider.at(play.idx - 1)] != 0)
            || (idx_right < strider.len() && board_snapshot.board_tiles[strider.at(idx_right)] != 0)
        {
            return Err(error::SearchError::malformed(
                "word does not include adjacent tiles",
            ));
        }
        let mut num_played = 0;
        for (i, &tile) in (play.idx..).zip(play.word.iter()) {
            let b = board_snapshot.board_tiles[strider.at(i)];
            if tile == 0 {
                if b == 0 {
                    return Err(error::SearchError::malformed(format_args!(
                        "nothing to play through at {:?}",
                        dim.row_col(play.orientation, play.lane, i)
                    )));
                }
            } else {
                if b != 0 {
                    return Err(error::SearchError::malformed(format_args!(
                        "square {:?} is already occupied",
                        dim.row_col(play.orientation, play.lane, i)
                    )));
                }
                if tile & 0x7f == 0 || tile & 0x7f >= alphabet.len() {
                    return Err(error::SearchError::malformed(format_args!(
                        "invalid tile {tile}"
                    )));
                }
                num_played += 1;
            }
        }
        if num_played == 0 {
            return Err(error::SearchError::malformed("no tile is placed"));
        }
        Ok(())
    }

    // Calls found_word for every word of at least 2 tiles, main word last.
    // Assume play fits on the board.
    fn walk_words<FoundWord: FnMut(&[u8], i16)>(
        &mut self,
        board_snapshot: &movegen::BoardSnapshot<'_>,
        play: &movegen::Play,
        mut found_word: FoundWord,
    ) -> i16 {
        let game_config = board_snapshot.game_config;
        let alphabet = game_config.alphabet();
        let board_layout = game_config.board_layout();
        let premiums = board_layout.premiums();
        let dim = board_layout.dim();
        let strider = dim.lane(play.orientation, play.lane);
        let mut num_played = 0;
        let mut recounted_score = 0;

        self.main_tiles.clear();
        let main_score = {
            let mut word_multiplier = 1;
            let mut word_score = 0i16;
            for (i, &tile) in (play.idx..).zip(play.word.iter()) {
                let strider_at_i = strider.at(i);
                let tile_multiplier;
                let premium = premiums[strider_at_i];
                let placed_tile = if tile != 0 {
                    num_played += 1;
                    word_multiplier *= premium.word_multiplier;
                    tile_multiplier = premium.tile_multiplier;
                    tile
                } else {
                    tile_multiplier = 1;
                    board_snapshot.board_tiles[strider_at_i]
                };
                self.main_tiles.push(placed_tile);
                word_score += alphabet.score(placed_tile) as i16 * tile_multiplier as i16;
            }
            word_score * word_multiplier as i16
        };

        for (i, &tile) in (play.idx..).zip(play.word.iter()) {
            if tile == 0 {
                continue;
            }
            let perpendicular_strider = dim.lane(play.orientation.perpendicular(), i);
            let mut j = play.lane;
            while j > 0 && board_snapshot.board_tiles[perpendicular_strider.at(j - 1)] != 0 {
                j -= 1;
            }
            let perpendicular_strider_len = perpendicular_strider.len();
            if j == play.lane
                && (j + 1 >= perpendicular_strider_len
                    || board_snapshot.board_tiles[perpendicular_strider.at(j + 1)] == 0)
            {
                // no perpendicular tile
                continue;
            }
            self.perpendicular_tiles.clear();
            let mut word_multiplier = 1;
            let mut word_score = 0i16;
            for j in j..perpendicular_strider_len {
                let perpendicular_strider_at_j = perpendicular_strider.at(j);
                let tile_multiplier;
                let premium = premiums[perpendicular_strider_at_j];
                let placed_tile = if j == play.lane {
                    word_multiplier *= premium.word_multiplier;
                    tile_multiplier = premium.tile_multiplier;
                    tile
                } else {
                    tile_multiplier = 1;
                    board_snapshot.board_tiles[perpendicular_strider_at_j]
                };
                if placed_tile == 0 {
                    break;
                }
                self.perpendicular_tiles.push(placed_tile);
                word_score += alphabet.score(placed_tile) as i16 * tile_multiplier as i16;
            }
            let multiplied_word_score = word_score * word_multiplier as i16;
            found_word(&self.perpendicular_tiles, multiplied_word_score);
            recounted_score += multiplied_word_score;
        }

        // a lone tile only counts for its perpendicular word.
        if self.main_tiles.len() >= 2 {
            found_word(&self.main_tiles, main_score);
            recounted_score += main_score;
        }
        recounted_score + game_config.num_played_bonus(num_played)
    }

    // Assume play is valid.
    pub fn compute_score(
        &mut self,
        board_snapshot: &movegen::BoardSnapshot<'_>,
        play: &movegen::Play,
    ) -> i16 {
        self.walk_words(board_snapshot, play, |_, _| {})
    }

    pub fn evaluate(
        &mut self,
        board_snapshot: &movegen::BoardSnapshot<'_>,
        play: &movegen::Play,
    ) -> Result<CandidatePlay, error::SearchError> {
        self.check_placement(board_snapshot, play)?;
        let game_config = board_snapshot.game_config;
        let alphabet = game_config.alphabet();
        let mut words = Vec::new();
        let score = self.walk_words(board_snapshot, play, |tiles, score| {
            words.push(FormedWord {
                word: alphabet.word_to_string(tiles),
                score,
            })
        });
        let placements = play
            .placed_tiles(game_config.board_layout().dim())
            .map(|(row, col, tile)| Placement {
                row,
                col,
                letter: alphabet
                    .from_board(tile & 0x7f)
                    .unwrap_or_default()
                    .to_string(),
                is_blank: tile & 0x80 != 0,
                score: alphabet.score(tile),
            })
            .collect();
        Ok(CandidatePlay {
            play: play.clone(),
            placements,
            words,
            score,
        })
    }

    // Fits, connects, and forms only words the graph accepts.
    pub fn play_is_valid(
        &mut self,
        board_snapshot: &movegen::BoardSnapshot<'_>,
        kwg: &kwg::Kwg,
        play: &movegen::Play,
    ) -> bool {
        if self.check_placement(board_snapshot, play).is_err() {
            return false;
        }
        let board_layout = board_snapshot.game_config.board_layout();
        let dim = board_layout.dim();
        let board_is_empty = board_snapshot.board_tiles.iter().all(|&tile| tile == 0);
        if board_is_empty
            && !play.placed_tiles(dim).any(|(row, col, _)| {
                row == board_layout.star_row() && col == board_layout.star_col()
            })
        {
            return false;
        }
        let mut num_words = 0;
        let mut all_accepted = true;
        self.walk_words(board_snapshot, play, |tiles, _| {
            num_words += 1;
            all_accepted &= kwg.accepts_word(tiles);
        });
        let plays_through = play.word.iter().any(|&tile| tile == 0);
        let connected = board_is_empty || plays_through || num_words > 1 || {
            // a single perpendicular word made by a lone tile.
            play.num_played() == 1 && num_words == 1
        };
        all_accepted && num_words > 0 && connected
    }
}

// (row, col) of the first tile placed, 1-based, as players read boards.
pub fn first_placement_coordinates(candidate: &CandidatePlay, dim: matrix::Dim) -> Option<(i8, i8)> {
    candidate
        .play
        .placed_tiles(dim)
        .next()
        .map(|(row, col, _)| (row + 1, col + 1))
}
