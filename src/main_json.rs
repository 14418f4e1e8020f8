// Copyright (C) 2020-2026 Andy Kurnia.

use std::io::{Read, Write};
use std::sync::Arc;
use tileplay::{advisor, controller, display, error, game_config, kibitzer, lexicon};

// usage: json [question.json|-] [lexicon dir, default lexbin]
// example question:
// {
//   "lexicon": "CSW21",
//   "rack": "AEINST?",
//   "board": [ "| | | | | | | | | | | | | | | |", ... 15 rows ... ],
//   "timer": { "type": "per_turn", "minutes": 1 },
//   "player": "alice"
// }
// writes one JSON answer per line: candidates as they improve, then done.

fn print_answer(answer: &kibitzer::Answer) -> error::Returns<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer(&mut out, answer)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn read_question(path: Option<&str>) -> error::Returns<kibitzer::Question> {
    let data = match path {
        None | Some("-") => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s)?;
            s
        }
        Some(path) => std::fs::read_to_string(path)?,
    };
    Ok(serde_json::from_str::<kibitzer::Question>(&data)?)
}

#[tokio::main]
async fn main() -> error::Returns<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = std::env::args().collect::<Vec<_>>();
    let question = read_question(args.get(1).map(String::as_str))?;
    let lexicon_dir = args.get(2).map(String::as_str).unwrap_or("lexbin");

    let game_config = Arc::new(game_config::make_english_game_config());
    let platform: Arc<dyn lexicon::Platform> = Arc::new(lexicon::FilePlatform::new(lexicon_dir));
    let request = kibitzer::Kibitzer::new().to_request(Arc::clone(&game_config), platform, &question)?;
    tracing::debug!(
        "board:\n{}",
        display::board_to_string(
            game_config.alphabet(),
            game_config.board_layout(),
            request.board.tiles()
        )
    );

    let t0 = std::time::Instant::now();
    let mut best = None;
    let result = controller::BestPlayController::new(question.budget())
        .find_best_play(request.clone(), |candidate| {
            tracing::info!(
                "{}",
                display::candidate_to_string(
                    game_config.alphabet(),
                    &candidate,
                    game_config.board_layout().dim()
                )
            );
            if let Err(e) = print_answer(&kibitzer::Answer::candidate(&candidate, &request)) {
                tracing::warn!("cannot write candidate: {e}");
            }
            best = Some(candidate);
        })
        .await;
    tracing::info!("search took {:?}", t0.elapsed());

    match result {
        Ok(outcome) => print_answer(&kibitzer::Answer::Done {
            outcome,
            best: best
                .as_ref()
                .and_then(|candidate| advisor::Suggestion::from_candidate(candidate, &request)),
        }),
        Err(e) => {
            print_answer(&kibitzer::Answer::Error {
                message: e.to_string(),
            })?;
            Err(e.into())
        }
    }
}
