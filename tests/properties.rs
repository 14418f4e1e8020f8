// Copyright (C) 2020-2026 Andy Kurnia.

mod common;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use std::sync::atomic::AtomicBool;
use tileplay::lexicon::Dictionary;
use tileplay::{best_play, board, game_config, lexicon, movegen, play_scorer};

fn full_bag(game_config: &game_config::GameConfig) -> Vec<u8> {
    let alphabet = game_config.alphabet();
    (0..alphabet.len())
        .flat_map(|tile| std::iter::repeat_n(tile, alphabet.freq(tile) as usize))
        .collect()
}

fn search(
    game_config: &game_config::GameConfig,
    board: &board::Board,
    rack: &[u8],
    word_graph: &lexicon::WordGraph,
) -> (Vec<play_scorer::CandidatePlay>, best_play::SearchSummary) {
    let board_snapshot = movegen::BoardSnapshot {
        board_tiles: board.tiles(),
        game_config,
    };
    let mut found = Vec::new();
    let summary = best_play::find_best_play(
        &board_snapshot,
        rack,
        word_graph,
        &AtomicBool::new(false),
        |candidate| found.push(candidate.clone()),
    )
    .unwrap();
    (found, summary)
}

// Plays out a few turns of self-play, checking every search along the way.
fn self_play(seed: u64, num_turns: usize) {
    let game_config = common::english();
    let alphabet = game_config.alphabet();
    let word_graph = common::word_graph(&game_config, common::SMALL_WORDS);
    let kwg = word_graph.kwg().unwrap();
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
    let mut bag = full_bag(&game_config);
    bag.shuffle(&mut rng);
    let mut board = common::empty_board(&game_config);
    let mut rack = Vec::new();
    let mut move_generator = movegen::MoveGenerator::new(&game_config);
    let mut play_scorer = play_scorer::PlayScorer::new();

    for turn in 0..num_turns {
        while rack.len() < game_config.rack_size() as usize {
            match bag.pop() {
                Some(tile) => rack.push(tile),
                None => break,
            }
        }
        let board_before = board.clone();
        let rack_before = rack.clone();
        let (found, summary) = search(&game_config, &board, &rack, &word_graph);
        let context = format!("seed {seed} turn {turn} rack {rack:?}\n{}", board.to_text(alphabet));

        assert_eq!(board, board_before, "{context}");
        assert_eq!(rack, rack_before, "{context}");
        assert!(
            found.windows(2).all(|w| w[0].score < w[1].score),
            "{context}"
        );
        assert_eq!(summary.best_score, found.last().map(|c| c.score), "{context}");

        let board_snapshot = movegen::BoardSnapshot {
            board_tiles: board.tiles(),
            game_config: &game_config,
        };
        let anchors = board.anchors(game_config.board_layout());
        for candidate in &found {
            assert!(
                play_scorer.play_is_valid(&board_snapshot, kwg, &candidate.play),
                "{context}{candidate:?}"
            );
            assert!(
                candidate
                    .placements
                    .iter()
                    .any(|p| anchors.contains(&(p.row, p.col))),
                "{context}{candidate:?}"
            );
            for formed_word in &candidate.words {
                let tiles = alphabet.read_word(&formed_word.word).unwrap();
                assert!(word_graph.has_word(&tiles).unwrap(), "{context}{formed_word:?}");
            }
            assert_eq!(
                candidate.score,
                play_scorer.compute_score(&board_snapshot, &candidate.play),
                "{context}"
            );
        }

        // the stream ends at the true maximum.
        let best = move_generator
            .gen_moves_alloc(&board_snapshot, kwg, &rack)
            .iter()
            .map(|play| play_scorer.compute_score(&board_snapshot, play))
            .max();
        assert_eq!(best, summary.best_score, "{context}");

        // same question, same answers.
        let (again, summary_again) = search(&game_config, &board, &rack, &word_graph);
        assert_eq!(again, found, "{context}");
        assert_eq!(summary_again, summary, "{context}");

        let Some(best) = found.last() else {
            break;
        };
        let dim = common::dim(&game_config);
        for (row, col, tile) in best.play.placed_tiles(dim) {
            board.set_tile(row, col, tile).unwrap();
            let from_rack = if tile & 0x80 != 0 { 0 } else { tile };
            let idx = rack.iter().position(|&t| t == from_rack).unwrap();
            rack.swap_remove(idx);
        }
    }
}

#[test]
fn self_play_seed_0() {
    self_play(0, 8);
}

#[test]
fn self_play_seed_1() {
    self_play(1, 8);
}

#[test]
fn self_play_seed_2026() {
    self_play(2026, 8);
}

#[test]
fn random_racks_on_fixed_board() {
    let game_config = common::english();
    let word_graph = common::word_graph(&game_config, common::SMALL_WORDS);
    let board = common::crag_board(&game_config);
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
    let mut bag = full_bag(&game_config);
    for _ in 0..20 {
        bag.shuffle(&mut rng);
        let rack = &bag[..7];
        let (found, summary) = search(&game_config, &board, rack, &word_graph);
        assert!(found.windows(2).all(|w| w[0].score < w[1].score));
        assert!(summary.num_plays >= found.len());
        assert_eq!(summary.num_improvements, found.len());
    }
}
