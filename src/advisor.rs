// Copyright (C) 2020-2026 Andy Kurnia.

use super::{controller, error, play_scorer};
use std::time::Duration;

// What a player is told: the words, where the first tile goes (1-based),
// and the score.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Suggestion {
    pub words: Vec<String>,
    pub row: i8,
    pub col: i8,
    pub score: i16,
}

impl Suggestion {
    pub fn from_candidate(candidate: &play_scorer::CandidatePlay, request: &controller::SearchRequest) -> Option<Self> {
        let (row, col) = play_scorer::first_placement_coordinates(
            candidate,
            request.game_config.board_layout().dim(),
        )?;
        Some(Self {
            words: candidate.words.iter().map(|w| w.word.clone()).collect(),
            row,
            col,
            score: candidate.score,
        })
    }
}

impl std::fmt::Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at row {} column {} for {}",
            self.words.join(","),
            self.row,
            self.col,
            self.score
        )
    }
}

async fn best_candidate(
    request: &controller::SearchRequest,
    budget: Duration,
) -> Result<Option<play_scorer::CandidatePlay>, error::SearchError> {
    let mut best = None;
    let outcome = controller::find_best_play(request.clone(), budget, |candidate| {
        best = Some(candidate);
    })
    .await?;
    tracing::debug!(player = ?request.player, ?outcome, found = best.is_some(), "best candidate");
    Ok(best)
}

// None means no play was found in time.
pub async fn hint(
    request: &controller::SearchRequest,
    budget: Duration,
) -> Result<Option<Suggestion>, error::SearchError> {
    Ok(best_candidate(request, budget)
        .await?
        .and_then(|candidate| Suggestion::from_candidate(&candidate, request)))
}

// Only speaks up when the player could have done strictly better.
pub async fn advise(
    request: &controller::SearchRequest,
    budget: Duration,
    their_score: i16,
) -> Result<Option<Suggestion>, error::SearchError> {
    Ok(hint(request, budget)
        .await?
        .filter(|suggestion| suggestion.score > their_score))
}
