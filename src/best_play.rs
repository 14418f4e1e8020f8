// Copyright (C) 2020-2026 Andy Kurnia.

use super::{error, lexicon, matrix, movegen, play_scorer};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchSummary {
    pub num_plays: usize,
    pub num_improvements: usize,
    pub best_score: Option<i16>,
    pub aborted: bool,
}

// State of one search. Plays are reported in board scan order, by lane and
// then by the first square they cover, and only when they beat everything
// reported before them. Of equally-scoring plays the first in that order is
// kept.
pub struct SearchSession {
    move_generator: movegen::MoveGenerator,
    play_scorer: play_scorer::PlayScorer,
    // (first placed square, score, play) of the current lane.
    lane_plays: Vec<(usize, i16, movegen::Play)>,
    summary: SearchSummary,
}

impl SearchSession {
    pub fn new(board_snapshot: &movegen::BoardSnapshot<'_>) -> Self {
        Self {
            move_generator: movegen::MoveGenerator::new(board_snapshot.game_config),
            play_scorer: play_scorer::PlayScorer::new(),
            lane_plays: Vec::new(),
            summary: SearchSummary::default(),
        }
    }

    fn check_input(
        board_snapshot: &movegen::BoardSnapshot<'_>,
        rack: &[u8],
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
        if let Some(&tile) = board_snapshot
            .board_tiles
            .iter()
            .find(|&&tile| tile != 0 && (tile & 0x7f == 0 || tile & 0x7f >= alphabet.len()))
        {
            return Err(error::SearchError::malformed(format_args!(
                "invalid board tile {tile}"
            )));
        }
        if rack.len() > game_config.rack_size() as usize {
            return Err(error::SearchError::malformed(format_args!(
                "rack has {} tiles, capacity is {}",
                rack.len(),
                game_config.rack_size()
            )));
        }
        if let Some(&tile) = rack.iter().find(|&&tile| tile >= alphabet.len()) {
            return Err(error::SearchError::malformed(format_args!(
                "invalid rack tile {tile}"
            )));
        }
        Ok(())
    }

    // The dictionary is consulted again for every lane.
    pub fn run<OnImproved: FnMut(&play_scorer::CandidatePlay)>(
        &mut self,
        board_snapshot: &movegen::BoardSnapshot<'_>,
        rack: &[u8],
        dictionary: &dyn lexicon::Dictionary,
        abort: &AtomicBool,
        mut on_improved: OnImproved,
    ) -> Result<SearchSummary, error::SearchError> {
        Self::check_input(board_snapshot, rack)?;
        self.summary = SearchSummary::default();
        self.move_generator
            .prepare(board_snapshot, dictionary.kwg()?, rack);
        let dim = board_snapshot.game_config.board_layout().dim();
        for orientation in matrix::Orientation::BOTH {
            for lane in 0..dim.num_lanes(orientation) {
                if abort.load(Ordering::Relaxed) {
                    self.summary.aborted = true;
                    return Ok(self.summary);
                }
                let kwg = dictionary.kwg()?;
                let Self {
                    move_generator,
                    play_scorer,
                    lane_plays,
                    summary,
                } = self;
                let best_so_far = summary.best_score;
                move_generator.gen_lane(board_snapshot, kwg, orientation, lane, abort, |play| {
                    summary.num_plays += 1;
                    let score = play_scorer.compute_score(board_snapshot, &play);
                    if best_so_far.is_none_or(|best_score| score > best_score) {
                        let first_square = play
                            .placed_tiles(dim)
                            .next()
                            .map_or(usize::MAX, |(row, col, _)| dim.at_row_col(row, col));
                        lane_plays.push((first_square, score, play));
                    }
                });
                if abort.load(Ordering::Relaxed) {
                    lane_plays.clear();
                    summary.aborted = true;
                    return Ok(*summary);
                }
                // stable, so plays from one square keep their generation order.
                lane_plays.sort_by_key(|&(first_square, score, _)| {
                    (first_square, std::cmp::Reverse(score))
                });
                for (_, score, play) in lane_plays.drain(..) {
                    if summary.best_score.is_some_and(|best_score| score <= best_score) {
                        continue;
                    }
                    let candidate = play_scorer.evaluate(board_snapshot, &play)?;
                    summary.best_score = Some(score);
                    summary.num_improvements += 1;
                    on_improved(&candidate);
                }
            }
        }
        Ok(self.summary)
    }
}

pub fn find_best_play<OnImproved: FnMut(&play_scorer::CandidatePlay)>(
    board_snapshot: &movegen::BoardSnapshot<'_>,
    rack: &[u8],
    dictionary: &dyn lexicon::Dictionary,
    abort: &AtomicBool,
    on_improved: OnImproved,
) -> Result<SearchSummary, error::SearchError> {
    SearchSession::new(board_snapshot).run(board_snapshot, rack, dictionary, abort, on_improved)
}
