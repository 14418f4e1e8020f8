// Copyright (C) 2020-2026 Andy Kurnia.

use super::{best_play, board, error, game_config, game_timers, lexicon, movegen, play_scorer};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{mpsc, watch};

// Everything a worker needs, owned, so the caller's game is never touched.
#[derive(Clone, Debug)]
pub struct SearchRequest {
    pub game_config: Arc<game_config::GameConfig>,
    pub board: board::Board,
    pub rack: Box<[u8]>,
    pub dictionary: lexicon::DictionaryHandle,
    pub player: Option<String>,
}

impl SearchRequest {
    pub fn new(
        game_config: Arc<game_config::GameConfig>,
        board: board::Board,
        rack: impl Into<Box<[u8]>>,
        dictionary: lexicon::DictionaryHandle,
    ) -> Self {
        Self {
            game_config,
            board,
            rack: rack.into(),
            dictionary,
            player: None,
        }
    }
}

enum WorkerMessage {
    Candidate(play_scorer::CandidatePlay),
    Done(best_play::SearchSummary),
    Failed(error::SearchError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Running,
    Completed,
    TimedOut,
    Cancelled,
    Errored,
}

impl SearchState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SearchState::Idle | SearchState::Running)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    Completed,
    TimedOut,
    Cancelled,
}

impl From<SearchOutcome> for SearchState {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Completed => SearchState::Completed,
            SearchOutcome::TimedOut => SearchState::TimedOut,
            SearchOutcome::Cancelled => SearchState::Cancelled,
        }
    }
}

#[derive(Clone)]
pub struct CancelHandle(Arc<watch::Sender<bool>>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.send_replace(true);
    }
}

pub struct BestPlayController {
    budget: Duration,
    state: watch::Sender<SearchState>,
    cancelled: Arc<watch::Sender<bool>>,
}

impl BestPlayController {
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            state: watch::Sender::new(SearchState::Idle),
            cancelled: Arc::new(watch::Sender::new(false)),
        }
    }

    pub fn for_timer(timer: &game_timers::Timer) -> Self {
        Self::new(timer.search_budget())
    }

    #[inline(always)]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn state(&self) -> SearchState {
        *self.state.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(Arc::clone(&self.cancelled))
    }

    // Improving candidates go to the listener as soon as they arrive.
    // Resolves once; timing out or being cancelled is not an error.
    pub async fn find_best_play<Listener: FnMut(play_scorer::CandidatePlay)>(
        &mut self,
        request: SearchRequest,
        mut listener: Listener,
    ) -> Result<SearchOutcome, error::SearchError> {
        if self.state() != SearchState::Idle {
            return Err(error::SearchError::ExecutionContextFailure(format!(
                "controller is {:?}, not idle",
                self.state()
            )));
        }
        self.state.send_replace(SearchState::Running);
        let result = self.run(request, &mut listener).await;
        self.state.send_replace(match &result {
            Ok(outcome) => (*outcome).into(),
            Err(_) => SearchState::Errored,
        });
        result
    }

    async fn run<Listener: FnMut(play_scorer::CandidatePlay)>(
        &self,
        request: SearchRequest,
        listener: &mut Listener,
    ) -> Result<SearchOutcome, error::SearchError> {
        let mut cancelled = self.cancelled.subscribe();
        if *cancelled.borrow_and_update() {
            tracing::debug!("search cancelled before it started");
            return Ok(SearchOutcome::Cancelled);
        }
        let sleep = tokio::time::sleep(self.budget);
        tokio::pin!(sleep);
        let abort = Arc::new(AtomicBool::new(false));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let player = request.player.clone();
        spawn_worker(request, Arc::clone(&abort), tx)?;

        let outcome = loop {
            tokio::select! {
                biased;
                _ = &mut sleep => {
                    tracing::warn!(?player, budget = ?self.budget, "search timed out");
                    break Ok(SearchOutcome::TimedOut);
                }
                Ok(()) = cancelled.changed() => {
                    if *cancelled.borrow_and_update() {
                        tracing::debug!(?player, "search cancelled");
                        break Ok(SearchOutcome::Cancelled);
                    }
                }
                message = rx.recv() => match message {
                    Some(WorkerMessage::Candidate(candidate)) => listener(candidate),
                    Some(WorkerMessage::Done(summary)) => {
                        tracing::debug!(?player, ?summary, "search completed");
                        break Ok(SearchOutcome::Completed);
                    }
                    Some(WorkerMessage::Failed(e)) => {
                        tracing::debug!(?player, %e, "search failed");
                        break Err(e);
                    }
                    None => {
                        tracing::warn!(?player, "search worker vanished");
                        break Err(error::SearchError::ExecutionContextFailure(
                            "search worker stopped without finishing".into(),
                        ));
                    }
                },
            }
        };

        // the worker may still be running; it stops at its next check and
        // anything it sends from now on is dropped with the receiver.
        abort.store(true, Ordering::Relaxed);
        rx.close();
        outcome
    }
}

fn spawn_worker(
    request: SearchRequest,
    abort: Arc<AtomicBool>,
    tx: mpsc::UnboundedSender<WorkerMessage>,
) -> Result<(), error::SearchError> {
    std::thread::Builder::new()
        .name("best-play".into())
        .spawn(move || {
            let message = match run_search(&request, &abort, &tx) {
                Ok(summary) => WorkerMessage::Done(summary),
                Err(e) => WorkerMessage::Failed(e),
            };
            tx.send(message).ok();
        })
        .map(|_| ())
        .map_err(|e| {
            error::SearchError::ExecutionContextFailure(format!("cannot start search worker: {e}"))
        })
}

fn run_search(
    request: &SearchRequest,
    abort: &AtomicBool,
    tx: &mpsc::UnboundedSender<WorkerMessage>,
) -> Result<best_play::SearchSummary, error::SearchError> {
    let game_config = &*request.game_config;
    let dictionary = request.dictionary.open(game_config.alphabet())?;
    if request.board.dim() != game_config.board_layout().dim() {
        return Err(error::SearchError::malformed(format_args!(
            "board is {}x{}, layout is {}x{}",
            request.board.dim().rows,
            request.board.dim().cols,
            game_config.board_layout().dim().rows,
            game_config.board_layout().dim().cols
        )));
    }
    tracing::debug!(
        dictionary = dictionary.name(),
        rack = request.rack.len(),
        anchors = request.board.anchors(game_config.board_layout()).len(),
        "search started"
    );
    let board_snapshot = movegen::BoardSnapshot {
        board_tiles: request.board.tiles(),
        game_config,
    };
    best_play::find_best_play(
        &board_snapshot,
        &request.rack,
        dictionary.as_ref(),
        abort,
        |candidate| {
            if tx.send(WorkerMessage::Candidate(candidate.clone())).is_err() {
                // nobody is listening any more.
                abort.store(true, Ordering::Relaxed);
            }
        },
    )
}

pub async fn find_best_play<Listener: FnMut(play_scorer::CandidatePlay)>(
    request: SearchRequest,
    budget: Duration,
    listener: Listener,
) -> Result<SearchOutcome, error::SearchError> {
    BestPlayController::new(budget)
        .find_best_play(request, listener)
        .await
}
