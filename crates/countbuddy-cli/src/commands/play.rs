//! The `countbuddy play` command.
//!
//! Drives the navigation state machine from the welcome screen into the
//! chosen game, then reads one command per line from stdin. Scheduled
//! feedback fires in real time: between lines the loop sleeps until the
//! session's next deadline.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use uuid::Uuid;

use countbuddy_core::config::load_config_from;
use countbuddy_core::rounds::{ChoiceRound, Slot};
use countbuddy_core::session::{Feedback, Game, TapOutcome, Verdict};
use countbuddy_core::{Action, App, GameMode, GameSession, ProfileStore};

pub async fn execute(
    profile: String,
    game: String,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let mode: GameMode = game.parse().map_err(anyhow::Error::msg)?;

    let store = ProfileStore::open_file(&config.profiles_path);
    let mut app = match seed {
        Some(seed) => App::with_seed(store, config.timings, seed),
        None => App::new(store, config.timings),
    };

    app.dispatch(Action::Start)?;
    let id = resolve_profile(&app, &profile)?;
    app.dispatch(Action::SelectProfile(id))?;
    app.dispatch(Action::StartGame)?;
    app.dispatch(Action::SelectGame(mode))?;

    if let Some(selected) = app.selected_profile() {
        println!(
            "{} {}, let's play {}! (plays: {})",
            selected.avatar,
            selected.name,
            mode.title(),
            selected.game_stats.get(mode)
        );
    }
    println!("{}", help(mode));
    print_session(&app);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last = Instant::now();

    loop {
        let wait = app.time_to_next_deadline();
        tokio::select! {
            line = lines.next_line() => {
                let now = Instant::now();
                let fired = app.advance(now - last);
                last = now;
                if fired > 0 {
                    print_session(&app);
                }

                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match Command::parse(&line) {
                    Command::Quit => break,
                    Command::Help => println!("{}", help(mode)),
                    Command::Unknown(text) => {
                        println!("Unknown command '{text}'. Type 'help' for commands.");
                    }
                    command => {
                        if let Some(session) = app.session_mut() {
                            match apply(session, command) {
                                Ok(Some(message)) => println!("{message}"),
                                Ok(None) => {}
                                Err(e) => println!("{e}"),
                            }
                        }
                        print_session(&app);
                    }
                }
            }
            _ = tokio::time::sleep(wait.unwrap_or(Duration::MAX)), if wait.is_some() => {
                let now = Instant::now();
                let fired = app.advance(now - last);
                last = now;
                if fired > 0 {
                    print_session(&app);
                }
            }
        }
    }

    app.dispatch(Action::Back)?;
    if let Some(selected) = app.selected_profile() {
        println!(
            "Bye {}! {} plays of {} so far.",
            selected.name,
            selected.game_stats.get(mode),
            mode.title()
        );
    }
    Ok(())
}

/// Find a profile by id, falling back to a case-insensitive name match.
fn resolve_profile(app: &App, query: &str) -> Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(query) {
        if app.store().get(id).is_some() {
            return Ok(id);
        }
    }
    match app.store().find_by_name(query) {
        Some(profile) => Ok(profile.id),
        None => bail!("no profile named or with id '{query}'"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Next,
    Previous,
    /// A 1-based object or choice number.
    Pick(usize),
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let line = line.trim().to_lowercase();
        match line.as_str() {
            "n" | "next" => Command::Next,
            "p" | "prev" | "previous" => Command::Previous,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "back" => Command::Quit,
            other => {
                let number = other
                    .strip_prefix("tap ")
                    .or_else(|| other.strip_prefix("pick "))
                    .unwrap_or(other);
                match number.trim().parse::<usize>() {
                    Ok(n) if n >= 1 => Command::Pick(n),
                    _ => Command::Unknown(line.clone()),
                }
            }
        }
    }
}

fn apply(session: &mut GameSession, command: Command) -> Result<Option<String>> {
    let message = match (session.mode(), command) {
        (GameMode::Counting, Command::Next) => {
            (!session.next_number()?).then(|| "That's the biggest number!".to_string())
        }
        (GameMode::Counting, Command::Previous) => {
            (!session.previous_number()?).then(|| "That's the smallest number!".to_string())
        }
        (GameMode::TapCount, Command::Pick(n)) => match session.tap(n - 1)? {
            TapOutcome::Counted(count) => Some(format!("{count}!")),
            TapOutcome::Completed | TapOutcome::Ignored => None,
        },
        (GameMode::MatchNumber | GameMode::MissingNumber, Command::Pick(n)) => {
            match session.select_choice(n - 1)? {
                Verdict::Ignored => Some("Wait for the next round.".to_string()),
                Verdict::Correct | Verdict::Incorrect => None,
            }
        }
        (mode, _) => Some(help(mode).to_string()),
    };
    Ok(message)
}

fn help(mode: GameMode) -> &'static str {
    match mode {
        GameMode::Counting => "Commands: next (n), previous (p), quit (q)",
        GameMode::TapCount => "Commands: <number> to tap that object, quit (q)",
        GameMode::MatchNumber | GameMode::MissingNumber => {
            "Commands: <number> to pick that choice, quit (q)"
        }
    }
}

fn print_session(app: &App) {
    if let Some(session) = app.session() {
        println!("{}", render(session));
    }
}

fn feedback_line(feedback: Feedback) -> Option<&'static str> {
    match feedback {
        Feedback::Idle => None,
        Feedback::Success => Some("🎉 Great job!"),
        Feedback::TryAgain => Some("💪 Try again!"),
    }
}

fn repeat(object: &str, n: u32) -> String {
    vec![object; n as usize].join(" ")
}

/// Plain-text view of the current game state.
fn render(session: &GameSession) -> String {
    let mut out = match session.game() {
        Game::Counting(game) => format!(
            "Number {}: {}",
            game.current(),
            repeat(game.object(), game.visible())
        ),
        Game::TapCount(game) => {
            let objects: Vec<String> = (0..game.level() as usize)
                .map(|i| {
                    if game.is_tapped(i) {
                        format!("[{}✓]", i + 1)
                    } else {
                        format!("[{}{}]", i + 1, game.object())
                    }
                })
                .collect();
            format!(
                "Level {}: tap all {} ({}/{})\n{}",
                game.level(),
                game.level(),
                game.tapped_count(),
                game.level(),
                objects.join(" ")
            )
        }
        Game::MatchNumber(game) => {
            let round = game.round();
            let choices: Vec<String> = round
                .choices()
                .iter()
                .enumerate()
                .map(|(i, c)| format!("  {}) {}", i + 1, repeat(round.object, c.value)))
                .collect();
            format!(
                "Round {}: find the group with {} objects\n{}",
                game.round_number(),
                round.target,
                choices.join("\n")
            )
        }
        Game::MissingNumber(game) => {
            let round = game.round();
            let sequence: Vec<String> = round
                .slots()
                .iter()
                .map(|slot| match slot {
                    Slot::Shown(v) => v.to_string(),
                    Slot::Missing => "_".to_string(),
                })
                .collect();
            let choices: Vec<String> = round
                .choices()
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{}) {}", i + 1, c.value))
                .collect();
            format!(
                "Round {}: what number is missing?  {}\n  {}",
                game.round_number(),
                sequence.join(" "),
                choices.join("   ")
            )
        }
    };
    if let Some(line) = feedback_line(session.feedback()) {
        out.push('\n');
        out.push_str(line);
    }
    out
}
