// Copyright (C) 2020-2026 Andy Kurnia.

#[macro_use]
pub mod error;

pub mod advisor;
pub mod alphabet;
pub mod best_play;
pub mod board;
pub mod board_layout;
pub mod build;
pub mod controller;
pub mod display;
pub mod game_config;
pub mod game_timers;
pub mod kibitzer;
pub mod kwg;
pub mod lexicon;
pub mod matrix;
pub mod movegen;
pub mod play_scorer;
