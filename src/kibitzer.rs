// Copyright (C) 2020-2026 Andy Kurnia.

use super::{advisor, board, controller, display, error, game_config, game_timers, lexicon, play_scorer};
use std::sync::Arc;
use std::time::Duration;

// rack: letters, '?' for blank.
// board: one string per row in the "| |C|a|T| |" format, lowercase for blanks.
// lexicon: name of lexicon.kwg or lexicon.txt under the lexicon directory.
// budget_ms overrides whatever the timer allows.
#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct Question {
    pub lexicon: String,
    pub rack: String,
    pub board: Vec<String>,
    #[serde(default)]
    pub timer: game_timers::Timer,
    #[serde(default)]
    pub budget_ms: Option<u64>,
    #[serde(default)]
    pub player: Option<String>,
}

impl Question {
    pub fn budget(&self) -> Duration {
        match self.budget_ms {
            Some(ms) => Duration::from_millis(ms),
            None => self.timer.search_budget(),
        }
    }
}

// One JSON object per line on the way out.
#[derive(serde::Serialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Answer {
    Candidate {
        position: String,
        score: i16,
        words: Vec<play_scorer::FormedWord>,
        placements: Vec<play_scorer::Placement>,
    },
    Done {
        outcome: controller::SearchOutcome,
        best: Option<advisor::Suggestion>,
    },
    Error {
        message: String,
    },
}

impl Answer {
    pub fn candidate(candidate: &play_scorer::CandidatePlay, request: &controller::SearchRequest) -> Self {
        Answer::Candidate {
            position: display::play_position(candidate, request.game_config.board_layout().dim()),
            score: candidate.score,
            words: candidate.words.clone(),
            placements: candidate.placements.clone(),
        }
    }
}

pub struct Kibitzer {
    pub available_tally: Vec<u8>,
}

impl Default for Kibitzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Kibitzer {
    pub fn new() -> Self {
        Self {
            available_tally: Vec::new(),
        }
    }

    fn take(&mut self, game_config: &game_config::GameConfig, tile: u8) -> error::Returns<()> {
        let alphabet = game_config.alphabet();
        if self.available_tally[tile as usize] > 0 {
            self.available_tally[tile as usize] -= 1;
            Ok(())
        } else {
            return_error!(format!(
                "too many tile {} (bag contains only {})",
                alphabet.from_rack(tile).unwrap_or("?"),
                alphabet.freq(tile),
            ));
        }
    }

    // Rack and board together must fit in one bag.
    pub fn prepare(
        &mut self,
        game_config: &game_config::GameConfig,
        question: &Question,
    ) -> error::Returns<(board::Board, Vec<u8>)> {
        let alphabet = game_config.alphabet();
        self.available_tally.clear();
        self.available_tally
            .extend((0..alphabet.len()).map(|tile| alphabet.freq(tile)));

        let rack = alphabet.read_rack(&question.rack)?;
        if rack.len() > game_config.rack_size() as usize {
            return_error!(format!(
                "rack has {} tiles, rack size is {}",
                rack.len(),
                game_config.rack_size()
            ));
        }
        for &tile in &rack {
            self.take(game_config, tile)?;
        }

        let expected_dim = game_config.board_layout().dim();
        let board = board::Board::parse(alphabet, expected_dim, &question.board.join("\n"))?;
        for &tile in board.tiles() {
            if tile != 0 {
                // blanks come out of the bag as blanks.
                self.take(game_config, if tile & 0x80 != 0 { 0 } else { tile })?;
            }
        }
        Ok((board, rack))
    }

    pub fn to_request(
        &mut self,
        game_config: Arc<game_config::GameConfig>,
        platform: Arc<dyn lexicon::Platform>,
        question: &Question,
    ) -> error::Returns<controller::SearchRequest> {
        let (board, rack) = self.prepare(&game_config, question)?;
        let mut request = controller::SearchRequest::new(
            game_config,
            board,
            rack,
            lexicon::DictionaryHandle::Named {
                platform,
                name: question.lexicon.clone(),
            },
        );
        request.player = question.player.clone();
        Ok(request)
    }
}
