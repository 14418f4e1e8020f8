// Copyright (C) 2020-2026 Andy Kurnia.

use std::time::Duration;

// used whenever the game's timer does not give a per-turn allowance.
pub const DEFAULT_SEARCH_BUDGET: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Timer {
    #[default]
    Untimed,
    PerTurn {
        minutes: u32,
    },
    WholeGame {
        minutes: u32,
    },
}

impl Timer {
    pub fn search_budget(&self) -> Duration {
        match *self {
            Timer::PerTurn { minutes } if minutes > 0 => {
                Duration::from_secs(u64::from(minutes) * 60)
            }
            _ => DEFAULT_SEARCH_BUDGET,
        }
    }
}
