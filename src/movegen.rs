// Copyright (C) 2020-2026 Andy Kurnia.

use super::{game_config, kwg, matrix};
use std::sync::atomic::{AtomicBool, Ordering};

// 0: nothing perpendicular, any tile may go here.
// bit 0 set: perpendicular tiles, only the other set bits may go here.
type CrossBits = u64;

// across plays: lane=row, idx=col. down plays: lane=col, idx=row.
// word: 0 for play-through, tile for placed tile, tile | 0x80 for blank.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Play {
    pub orientation: matrix::Orientation,
    pub lane: i8,
    pub idx: i8,
    pub word: Box<[u8]>,
}

impl Play {
    pub fn num_played(&self) -> i8 {
        self.word.iter().filter(|&&tile| tile != 0).count() as i8
    }

    // (row, col, tile) of each tile taken from the rack.
    pub fn placed_tiles(&self, dim: matrix::Dim) -> impl Iterator<Item = (i8, i8, u8)> + '_ {
        (self.idx..)
            .zip(self.word.iter())
            .filter(|&(_, &tile)| tile != 0)
            .map(move |(idx, &tile)| {
                let (row, col) = dim.row_col(self.orientation, self.lane, idx);
                (row, col, tile)
            })
    }
}

pub struct BoardSnapshot<'a> {
    pub board_tiles: &'a [u8],
    pub game_config: &'a game_config::GameConfig,
}

struct WorkingBuffer {
    rack_tally: Box<[u8]>,                        // 27 for ?A-Z
    word_buffer: Box<[u8]>,                       // max(r, c)
    cross_bits_for_across_plays: Box<[CrossBits]>, // r*c
    cross_bits_for_down_plays: Box<[CrossBits]>,   // c*r
}

impl WorkingBuffer {
    fn new(game_config: &game_config::GameConfig) -> Box<Self> {
        let dim = game_config.board_layout().dim();
        Box::new(Self {
            rack_tally: vec![0u8; game_config.alphabet().len() as usize].into_boxed_slice(),
            word_buffer: vec![0u8; std::cmp::max(dim.rows, dim.cols) as usize].into_boxed_slice(),
            cross_bits_for_across_plays: vec![0; dim.num_squares()].into_boxed_slice(),
            cross_bits_for_down_plays: vec![0; dim.num_squares()].into_boxed_slice(),
        })
    }
}

fn gen_cross_set(
    board_tiles: &[u8],
    kwg: &kwg::Kwg,
    strider: matrix::Strider,
    cross_bits: &mut [CrossBits],
    output_strider: matrix::Strider,
) {
    let len = strider.len();
    for i in 0..output_strider.len() {
        cross_bits[output_strider.at(i)] = 0;
    }

    let mut p = 1;
    let mut k = len;
    for j in (0..len).rev() {
        let b = board_tiles[strider.at(j)];
        if b != 0 {
            if p >= 0 {
                p = kwg.seek(p, b & 0x7f);
            }
            if j == 0 || board_tiles[strider.at(j - 1)] == 0 {
                // tiles from j inclusive to k exclusive.
                if k < len && !(k + 1 < len && board_tiles[strider.at(k + 1)] != 0) {
                    // board[k + 1] is empty, so only this run is next to board[k].
                    let mut bits = 1;
                    if p > 0 {
                        // p = DCBA, q = DCBA@
                        let q = kwg.seek(p, 0);
                        if q > 0 {
                            let mut q = kwg[q].arc_index();
                            if q > 0 {
                                loop {
                                    if kwg[q].accepts() {
                                        bits |= 1 << kwg[q].tile();
                                    }
                                    if kwg[q].is_end() {
                                        break;
                                    }
                                    q += 1;
                                }
                            }
                        }
                    }
                    cross_bits[output_strider.at(k)] = bits;
                }
                if j > 0 {
                    // board[j - 1] is empty, board[j - 2] may be another run.
                    let mut bits = 1;
                    if p > 0 {
                        p = kwg[p].arc_index();
                        if p > 0 {
                            loop {
                                let tile = kwg[p].tile();
                                if tile != 0 {
                                    let mut q = p;
                                    for i in (0..j - 1).rev() {
                                        let b = board_tiles[strider.at(i)];
                                        if b == 0 {
                                            break;
                                        }
                                        q = kwg.seek(q, b & 0x7f);
                                        if q <= 0 {
                                            break;
                                        }
                                    }
                                    if q > 0 && kwg[q].accepts() {
                                        bits |= 1 << tile;
                                    }
                                }
                                if kwg[p].is_end() {
                                    break;
                                }
                                p += 1;
                            }
                        }
                    }
                    cross_bits[output_strider.at(j - 1)] = bits;
                }
            }
        } else {
            p = 1;
            k = j; // last seen empty square
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn gen_place_moves<FoundPlaceMove: FnMut(i8, &[u8])>(
    board_tiles: &[u8],
    kwg: &kwg::Kwg,
    cross_bits: &[CrossBits],
    rack_tally: &mut [u8],
    strider: matrix::Strider,
    word_buffer: &mut [u8],
    single_tile_plays: bool,
    abort: &AtomicBool,
    found_place_move: FoundPlaceMove,
) {
    let len = strider.len();

    struct Env<'a, FoundPlaceMove: FnMut(i8, &[u8])> {
        board_tiles: &'a [u8],
        kwg: &'a kwg::Kwg,
        cross_bits: &'a [CrossBits],
        rack_tally: &'a mut [u8],
        strider: matrix::Strider,
        abort: &'a AtomicBool,
        found_place_move: FoundPlaceMove,
        word_buffer: &'a mut [u8],
        anchor: i8,
        leftmost: i8,
        rightmost: i8,
        num_played: i8,
        idx_left: i8,
    }

    let mut env = Env {
        board_tiles,
        kwg,
        cross_bits,
        rack_tally,
        strider,
        abort,
        found_place_move,
        word_buffer,
        anchor: 0,
        leftmost: 0,
        rightmost: 0,
        num_played: 0,
        idx_left: 0,
    };

    fn record<FoundPlaceMove: FnMut(i8, &[u8])>(
        env: &mut Env<'_, FoundPlaceMove>,
        idx_left: i8,
        idx_right: i8,
    ) {
        (env.found_place_move)(
            idx_left,
            &env.word_buffer[(idx_left as usize)..(idx_right as usize)],
        );
    }

    // is_unique: a single-tile play here would not be found in the other direction.
    fn play_right<FoundPlaceMove: FnMut(i8, &[u8])>(
        env: &mut Env<'_, FoundPlaceMove>,
        mut idx: i8,
        mut p: i32,
        is_unique: bool,
    ) {
        if env.abort.load(Ordering::Relaxed) {
            return;
        }
        // tail-recurse placing current sequence of tiles
        while idx < env.rightmost {
            let b = env.board_tiles[env.strider.at(idx)];
            if b == 0 {
                break;
            }
            p = env.kwg.seek(p, b & 0x7f);
            if p <= 0 {
                return;
            }
            idx += 1;
        }
        if idx > env.anchor + 1
            && (env.num_played + is_unique as i8) >= 2
            && idx - env.idx_left >= 2
            && env.kwg[p].accepts()
        {
            record(env, env.idx_left, idx);
        }
        if idx >= env.rightmost {
            return;
        }

        p = env.kwg[p].arc_index();
        if p <= 0 {
            return;
        }
        let this_cross_bits = env.cross_bits[idx as usize];
        if this_cross_bits == 1 {
            // nothing fits here
            return;
        }
        let (allowed_bits, placed_is_unique) = if this_cross_bits != 0 {
            (this_cross_bits, is_unique)
        } else {
            (!1, true)
        };
        loop {
            let node = env.kwg[p];
            let tile = node.tile();
            if tile != 0 && allowed_bits & (1 << tile) != 0 {
                if env.rack_tally[tile as usize] > 0 {
                    env.rack_tally[tile as usize] -= 1;
                    env.num_played += 1;
                    env.word_buffer[idx as usize] = tile;
                    play_right(env, idx + 1, p, placed_is_unique);
                    env.num_played -= 1;
                    env.rack_tally[tile as usize] += 1;
                }
                if env.rack_tally[0] > 0 {
                    env.rack_tally[0] -= 1;
                    env.num_played += 1;
                    env.word_buffer[idx as usize] = tile | 0x80;
                    play_right(env, idx + 1, p, placed_is_unique);
                    env.num_played -= 1;
                    env.rack_tally[0] += 1;
                }
            }
            if node.is_end() {
                break;
            }
            p += 1;
        }
    }

    fn play_left<FoundPlaceMove: FnMut(i8, &[u8])>(
        env: &mut Env<'_, FoundPlaceMove>,
        mut idx: i8,
        mut p: i32,
        is_unique: bool,
    ) {
        if env.abort.load(Ordering::Relaxed) {
            return;
        }
        // tail-recurse placing current sequence of tiles
        while idx >= env.leftmost {
            let b = env.board_tiles[env.strider.at(idx)];
            if b == 0 {
                break;
            }
            p = env.kwg.seek(p, b & 0x7f);
            if p <= 0 {
                return;
            }
            idx -= 1;
        }
        if (env.num_played + is_unique as i8) >= 2
            && env.anchor - idx >= 2
            && env.kwg[p].accepts()
        {
            record(env, idx + 1, env.anchor + 1);
        }

        p = env.kwg[p].arc_index();
        if p <= 0 {
            return;
        }
        // only a separator can be taken once past leftmost.
        let (allowed_bits, placed_is_unique) = if idx < env.leftmost {
            (0, is_unique)
        } else {
            match env.cross_bits[idx as usize] {
                0 => (!1, true),
                bits => (bits, is_unique),
            }
        };
        loop {
            let node = env.kwg[p];
            let tile = node.tile();
            if tile == 0 {
                env.idx_left = idx + 1;
                play_right(env, env.anchor + 1, p, is_unique);
            } else if allowed_bits & (1 << tile) != 0 {
                if env.rack_tally[tile as usize] > 0 {
                    env.rack_tally[tile as usize] -= 1;
                    env.num_played += 1;
                    env.word_buffer[idx as usize] = tile;
                    play_left(env, idx - 1, p, placed_is_unique);
                    env.num_played -= 1;
                    env.rack_tally[tile as usize] += 1;
                }
                if env.rack_tally[0] > 0 {
                    env.rack_tally[0] -= 1;
                    env.num_played += 1;
                    env.word_buffer[idx as usize] = tile | 0x80;
                    play_left(env, idx - 1, p, placed_is_unique);
                    env.num_played -= 1;
                    env.rack_tally[0] += 1;
                }
            }
            if node.is_end() {
                break;
            }
            p += 1;
        }
    }

    fn gen_moves_from<FoundPlaceMove: FnMut(i8, &[u8])>(
        env: &mut Env<'_, FoundPlaceMove>,
        single_tile_plays: bool,
    ) {
        play_left(env, env.anchor, 1, single_tile_plays);
    }

    let mut rightmost = len; // processed up to here
    let mut leftmost = len;
    loop {
        while leftmost > 0 && board_tiles[strider.at(leftmost - 1)] == 0 {
            leftmost -= 1;
        }
        if leftmost > 0 {
            // board[leftmost - 1] is the last tile of a run.
            env.anchor = leftmost - 1;
            env.leftmost = 0;
            env.rightmost = rightmost;
            gen_moves_from(&mut env, single_tile_plays);
        }
        {
            let mut leftmost = leftmost; // shadowing
            if leftmost > 0 {
                leftmost += 1; // do not touch that run
            }
            for anchor in (leftmost..rightmost).rev() {
                let anchor_bits = cross_bits[anchor as usize];
                if anchor_bits != 0 {
                    if rightmost - leftmost < 2 {
                        // not enough room for 2-tile words
                        break;
                    }
                    if anchor_bits != 1 {
                        env.anchor = anchor;
                        env.leftmost = leftmost;
                        env.rightmost = rightmost;
                        gen_moves_from(&mut env, single_tile_plays);
                    }
                    rightmost = anchor; // prevent duplicates
                }
            }
        }
        while leftmost > 0 && board_tiles[strider.at(leftmost - 1)] != 0 {
            leftmost -= 1;
        }
        if leftmost <= 1 {
            break;
        }
        rightmost = leftmost - 1; // prevent touching leftmost tile
    }
}

pub struct MoveGenerator {
    working_buffer: Box<WorkingBuffer>,
}

impl MoveGenerator {
    pub fn new(game_config: &game_config::GameConfig) -> Self {
        Self {
            working_buffer: WorkingBuffer::new(game_config),
        }
    }

    // rack and board tiles must be valid for the alphabet.
    pub fn prepare(&mut self, board_snapshot: &BoardSnapshot<'_>, kwg: &kwg::Kwg, rack: &[u8]) {
        let working_buffer = &mut *self.working_buffer;
        working_buffer.rack_tally.iter_mut().for_each(|m| *m = 0);
        for &tile in rack {
            working_buffer.rack_tally[tile as usize] += 1;
        }

        let board_layout = board_snapshot.game_config.board_layout();
        let dim = board_layout.dim();
        for col in 0..dim.cols {
            gen_cross_set(
                board_snapshot.board_tiles,
                kwg,
                dim.down(col),
                &mut working_buffer.cross_bits_for_across_plays,
                matrix::Strider::new(col as i16, dim.cols, dim.rows),
            );
        }
        for row in 0..dim.rows {
            gen_cross_set(
                board_snapshot.board_tiles,
                kwg,
                dim.across(row),
                &mut working_buffer.cross_bits_for_down_plays,
                matrix::Strider::new(row as i16, dim.rows, dim.cols),
            );
        }

        if board_snapshot.board_tiles.iter().all(|&tile| tile == 0) {
            // empty board activates the star in both directions.
            let star_row = board_layout.star_row();
            let star_col = board_layout.star_col();
            working_buffer.cross_bits_for_across_plays[dim.at_row_col(star_row, star_col)] = !1;
            working_buffer.cross_bits_for_down_plays
                [(star_col as usize) * (dim.rows as usize) + (star_row as usize)] = !1;
        }
    }

    // prepare must have been called with the same snapshot and rack.
    // returns early, with the lane partly generated, once abort is set.
    #[allow(clippy::too_many_arguments)]
    pub fn gen_lane<FoundPlay: FnMut(Play)>(
        &mut self,
        board_snapshot: &BoardSnapshot<'_>,
        kwg: &kwg::Kwg,
        orientation: matrix::Orientation,
        lane: i8,
        abort: &AtomicBool,
        mut found_play: FoundPlay,
    ) {
        let dim = board_snapshot.game_config.board_layout().dim();
        let strider = dim.lane(orientation, lane);
        let len = strider.len() as usize;
        let working_buffer = &mut *self.working_buffer;
        let cross_bits = match orientation {
            matrix::Orientation::Across => &working_buffer.cross_bits_for_across_plays,
            matrix::Orientation::Down => &working_buffer.cross_bits_for_down_plays,
        };
        let word_buffer = &mut working_buffer.word_buffer[..len];
        word_buffer.iter_mut().for_each(|m| *m = 0);
        gen_place_moves(
            board_snapshot.board_tiles,
            kwg,
            &cross_bits[(lane as usize) * len..][..len],
            &mut working_buffer.rack_tally,
            strider,
            word_buffer,
            // single-tile plays are reported by across lanes unless unique.
            orientation == matrix::Orientation::Across,
            abort,
            |idx, word| {
                found_play(Play {
                    orientation,
                    lane,
                    idx,
                    word: word.into(),
                })
            },
        );
    }

    pub fn gen_moves_alloc(
        &mut self,
        board_snapshot: &BoardSnapshot<'_>,
        kwg: &kwg::Kwg,
        rack: &[u8],
    ) -> Vec<Play> {
        let mut plays = Vec::new();
        let never = AtomicBool::new(false);
        self.prepare(board_snapshot, kwg, rack);
        let dim = board_snapshot.game_config.board_layout().dim();
        for orientation in matrix::Orientation::BOTH {
            for lane in 0..dim.num_lanes(orientation) {
                self.gen_lane(board_snapshot, kwg, orientation, lane, &never, |play| {
                    plays.push(play)
                });
            }
        }
        plays
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{board, lexicon::Dictionary, lexicon::WordGraph, play_scorer};

    fn gen_plays(
        game_config: &game_config::GameConfig,
        board_tiles: &[u8],
        words: &[&str],
        rack: &[u8],
    ) -> (Vec<Play>, WordGraph) {
        let word_graph =
            WordGraph::from_words("test", game_config.alphabet(), words.iter().copied()).unwrap();
        let board_snapshot = BoardSnapshot {
            board_tiles,
            game_config,
        };
        let plays = MoveGenerator::new(game_config).gen_moves_alloc(
            &board_snapshot,
            word_graph.kwg().unwrap(),
            rack,
        );
        (plays, word_graph)
    }

    fn placements(play: &Play, dim: matrix::Dim) -> Vec<(i8, i8)> {
        let mut v = play
            .placed_tiles(dim)
            .map(|(row, col, _)| (row, col))
            .collect::<Vec<_>>();
        v.sort_unstable();
        v
    }

    #[test]
    fn empty_board_goes_through_star() {
        let game_config = game_config::make_english_game_config();
        let dim = game_config.board_layout().dim();
        let (plays, _) = gen_plays(&game_config, &[0; 225], &["CAT", "ACT"], &[3, 1, 20]);
        // CAT and ACT, 3 positions each, both directions.
        assert_eq!(plays.len(), 12);
        for play in &plays {
            assert_eq!(play.num_played(), 3);
            assert!(placements(play, dim).contains(&(7, 7)));
        }
        assert_eq!(
            plays
                .iter()
                .filter(|play| play.orientation == matrix::Orientation::Across)
                .count(),
            6
        );
    }

    #[test]
    fn blanks_stand_for_any_letter() {
        let game_config = game_config::make_english_game_config();
        let (plays, _) = gen_plays(&game_config, &[0; 225], &["AA", "QI", "ZO"], &[0, 0]);
        assert_eq!(plays.len(), 12);
        let distinct = plays.iter().collect::<std::collections::HashSet<_>>();
        assert_eq!(distinct.len(), plays.len());
        assert!(
            plays
                .iter()
                .all(|play| play.word.iter().all(|&tile| tile & 0x80 != 0))
        );
    }

    #[test]
    fn single_tiles_are_reported_once() {
        let game_config = game_config::make_english_game_config();
        let dim = game_config.board_layout().dim();
        let mut board_tiles = vec![0u8; 225];
        board_tiles[dim.at_row_col(7, 7)] = 1;
        board_tiles[dim.at_row_col(8, 8)] = 1;
        let (plays, _) = gen_plays(&game_config, &board_tiles, &["AT", "TA"], &[20]);
        let mut squares = plays
            .iter()
            .map(|play| placements(play, dim))
            .collect::<Vec<_>>();
        squares.sort_unstable();
        assert_eq!(
            squares,
            vec![
                vec![(6, 7)],
                vec![(7, 6)],
                vec![(7, 8)],
                vec![(8, 7)],
                vec![(8, 9)],
                vec![(9, 8)],
            ]
        );
    }

    #[test]
    fn generated_plays_are_valid() {
        let game_config = game_config::make_english_game_config();
        let alphabet = game_config.alphabet();
        let board = board::Board::parse(
            alphabet,
            dim_of(&game_config),
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
            ]
            .join("\n"),
        )
        .unwrap();
        let words = [
            "ACTS", "CRAG", "CRA", "AG", "AR", "ARC", "CAR", "RAG", "TOP", "STEP", "ROT",
            "ART", "RAT", "TAR", "CAT", "ACT", "GAR", "SAC", "ARCS", "CARS", "CART", "RACK",
        ];
        let rack = alphabet.read_rack("ACR?").unwrap();
        let (plays, word_graph) = gen_plays(&game_config, board.tiles(), &words, &rack);
        assert!(!plays.is_empty());
        let board_snapshot = BoardSnapshot {
            board_tiles: board.tiles(),
            game_config: &game_config,
        };
        let mut play_scorer = play_scorer::PlayScorer::new();
        let anchors = board.anchors(game_config.board_layout());
        for play in &plays {
            assert!(
                play_scorer.play_is_valid(&board_snapshot, word_graph.kwg().unwrap(), play),
                "{play:?}"
            );
            assert!(
                placements(play, dim_of(&game_config))
                    .iter()
                    .any(|square| anchors.contains(square)),
                "{play:?}"
            );
        }
        let distinct = plays.iter().collect::<std::collections::HashSet<_>>();
        assert_eq!(distinct.len(), plays.len());
        // the ACTS/CRAG hook is among them.
        assert!(plays.contains(&Play {
            orientation: matrix::Orientation::Across,
            lane: 6,
            idx: 1,
            word: Box::new([3, 18, 1, 0]),
        }));
    }

    #[test]
    fn aborted_lane_generates_nothing() {
        let game_config = game_config::make_english_game_config();
        let word_graph = WordGraph::from_words("cat", game_config.alphabet(), ["CAT"]).unwrap();
        let kwg = word_graph.kwg().unwrap();
        let board_tiles = [0u8; 225];
        let board_snapshot = BoardSnapshot {
            board_tiles: &board_tiles,
            game_config: &game_config,
        };
        let mut move_generator = MoveGenerator::new(&game_config);
        move_generator.prepare(&board_snapshot, kwg, &[3, 1, 20]);
        let abort = AtomicBool::new(false);
        let mut num_plays = 0;
        move_generator.gen_lane(&board_snapshot, kwg, matrix::Orientation::Across, 7, &abort, |_| {
            num_plays += 1
        });
        assert_eq!(num_plays, 3);

        // stopping from inside the lane cuts it short.
        let mut num_plays = 0;
        move_generator.gen_lane(&board_snapshot, kwg, matrix::Orientation::Across, 7, &abort, |_| {
            num_plays += 1;
            abort.store(true, Ordering::Relaxed);
        });
        assert_eq!(num_plays, 1);
        move_generator.gen_lane(&board_snapshot, kwg, matrix::Orientation::Down, 7, &abort, |_| {
            num_plays += 1
        });
        assert_eq!(num_plays, 1);
    }

    fn dim_of(game_config: &game_config::GameConfig) -> matrix::Dim {
        game_config.board_layout().dim()
    }
}
