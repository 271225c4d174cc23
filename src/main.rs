//! LegalQuest Engine - terminal driver
//!
//! Loads the content catalog (falling back to the bundled dataset), then
//! plays the mini-games from stdin commands and syncs progress.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use legalquest_engine::application::services::{
    BoardGameSession, ContentCatalog, LessonStep, ModuleWalkthrough, QuestionView, SnapQuizSession,
    SyncStatus, WheelSession, WritQuest,
};
use legalquest_engine::domain::entities::GameResult;
use legalquest_engine::domain::services::RollOutcome;
use legalquest_engine::domain::value_objects::{LanguageCode, ModuleId, OptionId};
use legalquest_engine::infrastructure::config::AppConfig;
use legalquest_engine::infrastructure::state::AppState;

const HELP: &str = "\
commands:
  modules                 list modules
  learn <module-id>       walk through a module
  board | snap | wheel | writ
                          start a mini-game
  roll | spin | undo | reset
  answer <option-id>      answer the current question
  timeout | review | next
  lang <code>             switch language
  progress | flush | help | quit";

enum Game {
    Idle,
    Board(BoardGameSession),
    Snap(SnapQuizSession),
    Wheel(WheelSession),
    Writ(WritQuest),
    Lesson(ModuleWalkthrough),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "legalquest_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting LegalQuest Engine");

    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Content API: {}", config.content_api_url);
    tracing::info!("  Progress API: {}", config.progress_api_url);

    let state = AppState::new(config)?;
    let mut language = state.config.language();

    let catalog = state.content_service.load_catalog().await;
    if let Some(notice) = &catalog.notice {
        println!("! {}", notice.message);
    }
    if let Err(e) = state.progress_service.load().await {
        println!("! Progress not loaded ({}), starting fresh", e);
    }

    println!("{}", HELP);
    let mut game = Game::Idle;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let argument = words.next();

        match command {
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            "modules" => list_modules(&catalog, &language),
            "lang" => match argument {
                Some(code) => {
                    language = LanguageCode::new(code);
                    println!("language: {}", language);
                    switch_language(&mut game, &language);
                }
                None => println!("usage: lang <code>"),
            },
            "progress" => {
                let profile = state.progress_service.profile().await;
                println!(
                    "points {} | badges {:?} | modules {} | concepts {}",
                    profile.points,
                    profile.badges,
                    profile.completed_modules.len(),
                    profile.learned_concepts.len()
                );
            }
            "flush" => println!("sync: {:?}", state.progress_service.flush().await),
            "board" => {
                game = Game::Board(state.board_session(&catalog, language.clone()));
                println!("Snakes & Ladders: {} cells. `roll` to start.", catalog.board.cell_count());
            }
            "snap" => {
                let session = state.snap_session(&catalog, language.clone());
                show_snap_card(&session);
                game = Game::Snap(session);
            }
            "wheel" => {
                game = Game::Wheel(state.wheel_session(&catalog, language.clone()));
                println!("Wheel of Rights. `spin` to play.");
            }
            "writ" => {
                let quest = state.writ_quest(&catalog, language.clone());
                show_question(&quest.question());
                game = Game::Writ(quest);
            }
            "learn" => {
                let Some(module_id) = argument else {
                    println!("usage: learn <module-id>");
                    continue;
                };
                match state.walkthrough(&catalog, &ModuleId::new(module_id), language.clone()) {
                    Some(lesson) => {
                        if let Some(question) = lesson.current() {
                            show_question(&question);
                        }
                        game = Game::Lesson(lesson);
                    }
                    None => println!("unknown module {}", module_id),
                }
            }
            _ => {
                let results = play(&mut game, command, argument, &state, &language).await;
                for result in results {
                    record(&state, &result).await;
                }
            }
        }
    }

    if state.progress_service.is_dirty().await {
        let status = state.progress_service.flush().await;
        tracing::info!("Final progress sync: {:?}", status);
    }
    Ok(())
}

/// Apply an in-game command; returns results to record
async fn play(
    game: &mut Game,
    command: &str,
    argument: Option<&str>,
    state: &AppState,
    language: &LanguageCode,
) -> Vec<GameResult> {
    let answer = argument.map(OptionId::new);
    let mut results = Vec::new();

    match (&mut *game, command) {
        (Game::Board(session), "roll") => match session.roll() {
            Ok(RollOutcome::GateOpened { roll, landed, .. }) => {
                println!("rolled {} -> cell {}", roll, landed);
                if let Some(gate) = session.current_question() {
                    println!("{} to {}! Answer to decide.", gate.kind_name, gate.target);
                    show_question(&gate.question);
                }
            }
            Ok(outcome) => println!("{:?} (score {})", outcome, session.state().score),
            Err(e) => println!("! {}", e),
        },
        (Game::Board(session), "answer") => match answer {
            Some(id) => match session.answer(&id) {
                Ok(gate) => {
                    println!("{} {}", verdict(gate.feedback.correct), gate.feedback.message);
                    println!("now at cell {} (score {})", gate.outcome.position, session.state().score);
                }
                Err(e) => println!("! {}", e),
            },
            None => println!("usage: answer <option-id>"),
        },
        (Game::Board(session), "undo") => match session.undo() {
            Ok(snapshot) => println!("back to cell {}", snapshot.position),
            Err(e) => println!("! {}", e),
        },
        (Game::Board(session), "reset") => session.reset(),
        (Game::Snap(session), "answer") => match answer.map(|id| session.answer(&id)) {
            Some(Ok(feedback)) => {
                println!(
                    "{} {} ({:+}, streak {})",
                    verdict(feedback.feedback.correct),
                    feedback.feedback.message,
                    feedback.evaluation.delta,
                    feedback.evaluation.new_state.streak
                );
                results.extend(feedback.badge_result);
            }
            Some(Err(e)) => println!("! {}", e),
            None => println!("usage: answer <option-id>"),
        },
        (Game::Snap(session), "timeout") => match session.time_out() {
            Ok(scoring) => println!("time's up (score {})", scoring.score),
            Err(e) => println!("! {}", e),
        },
        (Game::Snap(session), "review") => match session.toggle_review_later() {
            Ok(marked) => println!("review later: {}", marked),
            Err(e) => println!("! {}", e),
        },
        (Game::Snap(session), "next") => match session.advance() {
            Ok(Some(summary)) => {
                println!(
                    "deck done: {} points, {}/{} correct",
                    summary.score, summary.correct, summary.cards
                );
                results.push(summary.result);
            }
            Ok(None) => show_snap_card(session),
            Err(e) => println!("! {}", e),
        },
        (Game::Wheel(session), "spin") => {
            let spin = session.spin();
            println!("{:.0}° -> {}", spin.angle, spin.category.name(language));
            match &spin.question {
                Some(question) => show_question(question),
                None => println!("no question for this category, spin again"),
            }
        }
        (Game::Wheel(session), "answer") => match answer.map(|id| session.answer(&id)) {
            Some(Ok(outcome)) => {
                println!("{} {}", verdict(outcome.feedback.correct), outcome.feedback.message);
                results.extend(outcome.result);
            }
            Some(Err(e)) => println!("! {}", e),
            None => println!("usage: answer <option-id>"),
        },
        (Game::Writ(quest), "answer") => match answer.map(|id| quest.answer(&id)) {
            Some(Ok(outcome)) => {
                println!("{} {}", verdict(outcome.feedback.correct), outcome.feedback.message);
                results.extend(outcome.result);
            }
            Some(Err(e)) => println!("! {}", e),
            None => println!("usage: answer <option-id>"),
        },
        (Game::Lesson(lesson), "answer") => match answer.map(|id| lesson.answer(&id)) {
            Some(Ok(outcome)) => {
                println!("{} {}", verdict(outcome.feedback.correct), outcome.feedback.message);
                println!("{}", outcome.feedback.explanation);
                results.extend(outcome.result);
            }
            Some(Err(e)) => println!("! {}", e),
            None => println!("usage: answer <option-id>"),
        },
        (Game::Lesson(lesson), "next") => {
            let profile = state.progress_service.profile().await;
            match lesson.advance(&profile) {
                Ok(LessonStep::Next { .. }) => {
                    if let Some(question) = lesson.current() {
                        show_question(&question);
                    }
                }
                Ok(LessonStep::Completed { result }) => {
                    println!("module complete!");
                    results.extend(result);
                }
                Err(e) => println!("! {}", e),
            }
        }
        (_, other) => println!("'{}' does nothing here; try `help`", other),
    }

    if let Game::Board(session) = game {
        results.extend(session.take_result());
    }
    results
}

/// Apply a language change to the running game and re-show its question
fn switch_language(game: &mut Game, language: &LanguageCode) {
    match game {
        Game::Idle => {}
        Game::Board(session) => {
            session.set_language(language.clone());
            if let Some(gate) = session.current_question() {
                show_question(&gate.question);
            }
        }
        Game::Snap(session) => {
            session.set_language(language.clone());
            show_snap_card(session);
        }
        Game::Wheel(session) => {
            session.set_language(language.clone());
            if let Some(question) = session.current_question() {
                show_question(&question);
            }
        }
        Game::Writ(quest) => {
            quest.set_language(language.clone());
            show_question(&quest.question());
        }
        Game::Lesson(lesson) => {
            lesson.set_language(language.clone());
            if let Some(question) = lesson.current() {
                show_question(&question);
            }
        }
    }
}

async fn record(state: &AppState, result: &GameResult) {
    let outcome = state.progress_service.record(result).await;
    if let Some(badge) = &result.badge {
        println!("badge earned: {}", badge);
    }
    match outcome.sync {
        SyncStatus::Pending(reason) => println!("! progress saved locally ({})", reason),
        SyncStatus::Saved | SyncStatus::Skipped => {}
    }
    println!("total points: {}", outcome.profile.points);
}

fn list_modules(catalog: &ContentCatalog, language: &LanguageCode) {
    for module in &catalog.modules {
        let translation = module.translations.resolve(language);
        println!(
            "{} {:<28} {} ({} scenarios)",
            module.icon,
            module.id.as_str(),
            translation.title,
            module.scenario_ids.len()
        );
    }
}

fn show_snap_card(session: &SnapQuizSession) {
    match session.current_card() {
        Some(card) => {
            println!("card {}/{}", card.index + 1, card.total);
            show_question(&card.question);
        }
        None => println!("no cards to play"),
    }
}

fn show_question(question: &QuestionView) {
    if !question.concept.is_empty() && question.concept != question.prompt {
        println!("[{}]", question.concept);
    }
    println!("{}", question.prompt);
    for option in &question.options {
        println!("  {}) {}", option.id, option.text);
    }
}

fn verdict(correct: bool) -> &'static str {
    if correct {
        "Correct."
    } else {
        "Incorrect."
    }
}
