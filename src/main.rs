use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rps_arena::api::client::{GameApiClient, RemoteOpponent};
use rps_arena::config::Config;
use rps_arena::display::output::{
    display_choices, display_error, display_health, display_history, display_info,
    display_round, display_scoreboard, display_stats, display_success, display_warning,
};
use rps_arena::error::AppError;
use rps_arena::game::choice::Choice;
use rps_arena::game::source::{ChoiceSource, RngSource, ScriptedSource};
use rps_arena::opponent::computer::computer_stats;
use rps_arena::opponent::config::OpponentConfig;
use rps_arena::opponent::{ComputerOpponent, FixedOpponent, Opponent};
use rps_arena::service;
use rps_arena::session::state::Session;
use rps_arena::storage::file::FileStore;
use rps_arena::storage::memory::MemoryStore;
use rps_arena::storage::Store;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rps")]
#[command(about = "Play Rock-Paper-Scissors against an adaptive computer opponent", long_about = None)]
struct Args {
    /// Opponent strategy: random or strategic (default: random)
    #[arg(short, long, global = true)]
    strategy: Option<String>,

    /// Chance (0-1) that the strategic opponent counters your habits (default: 0.5)
    #[arg(short, long, global = true)]
    difficulty: Option<f64>,

    /// Full opponent settings as JSON, e.g. '{"strategy":"strategic","difficulty":0.8}'
    #[arg(long, global = true)]
    opponent: Option<String>,

    /// Practice against an opponent that always throws this choice
    #[arg(long, global = true)]
    against: Option<String>,

    /// Play against a remote game server (API base URL)
    #[arg(long, global = true)]
    remote: Option<String>,

    /// Where scores, history and stats are kept (default: ~/.rps_arena)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep everything in memory for this run
    #[arg(long, global = true)]
    no_save: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one round
    Play {
        /// rock, paper or scissors (any case)
        choice: String,
    },

    /// Let a scripted player cycle through a pattern for many rounds
    Simulate {
        /// Number of rounds to play
        #[arg(short, long, default_value = "100")]
        rounds: usize,

        /// Comma separated moves the scripted player repeats
        #[arg(short, long, default_value = "rock,rock,paper", value_delimiter = ',')]
        pattern: Vec<String>,
    },

    /// Show score, statistics and streaks
    Stats,

    /// Show the most recent rounds
    History {
        /// Number of rounds to show (max 50)
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Reset saved data (everything unless a narrower flag is given)
    Reset {
        /// Only reset the scoreboard
        #[arg(long)]
        scores: bool,

        /// Only clear the round history
        #[arg(long)]
        history: bool,

        /// Only reset the statistics
        #[arg(long)]
        stats: bool,
    },

    /// List valid choices
    Choices,

    /// Check that the game service is alive
    Health,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    // Load configuration
    let mut config = Config::from_env().context("loading configuration")?;
    if let Some(strategy) = &args.strategy {
        config.strategy = strategy.parse()?;
    }
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(remote) = &args.remote {
        config.server_url = Some(remote.clone());
    }
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }

    match &args.command {
        Command::Play { choice } => {
            let mut opponent = build_opponent(&args, &config)?;
            let mut session = open_session(&args, &config);

            let report = session
                .play_round(choice, opponent.as_mut())
                .with_context(|| format!("playing \"{}\"", choice))?;

            display_round(&report.round, &opponent.name());
            display_scoreboard(&report.score);
            show_warnings(&report.warnings);
        }
        Command::Simulate { rounds, pattern } => {
            let moves = pattern
                .iter()
                .map(|token| token.parse::<Choice>())
                .collect::<Result<Vec<_>, AppError>>()
                .context("parsing --pattern")?;
            if moves.is_empty() {
                anyhow::bail!("--pattern needs at least one move");
            }

            let mut opponent = build_opponent(&args, &config)?;
            let mut session = open_session(&args, &config);
            let mut player = ScriptedSource::new(moves);

            display_info(&format!(
                "Simulating {} rounds against {}",
                rounds,
                opponent.name()
            ));

            let pb = ProgressBar::new(*rounds as u64);
            if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}") {
                pb.set_style(style);
            }
            pb.set_message("playing");

            let mut storage_warnings = 0;
            for _ in 0..*rounds {
                let token = player.next_choice();
                let report = session
                    .play_round(token.as_str(), opponent.as_mut())
                    .context("simulated round failed")?;
                storage_warnings += report.warnings.len();
                pb.inc(1);
            }
            pb.finish_with_message("✓ done");

            display_scoreboard(session.score());
            show_session_stats(&session);
            if storage_warnings > 0 {
                display_warning(&format!(
                    "{} storage writes failed; results are kept in memory only",
                    storage_warnings
                ));
            }
        }
        Command::Stats => {
            let session = open_session(&args, &config);
            display_scoreboard(session.score());
            show_session_stats(&session);
        }
        Command::History { limit } => {
            let session = open_session(&args, &config);
            display_history(&session.recent_rounds(*limit));
        }
        Command::Reset {
            scores,
            history,
            stats,
        } => {
            let mut session = open_session(&args, &config);
            let mut warnings = Vec::new();

            if *scores {
                warnings.extend(session.reset_scores());
                display_success("Scores reset");
            }
            if *history {
                warnings.extend(session.reset_history());
                display_success("History cleared");
            }
            if *stats {
                warnings.extend(session.reset_stats());
                display_success("Statistics reset");
            }
            if !(*scores || *history || *stats) {
                warnings.extend(session.reset_all());
                display_success("All data reset");
            }
            show_warnings(&warnings);
        }
        Command::Choices => {
            let choices = match &config.server_url {
                Some(url) => GameApiClient::new(url).choices()?.choices,
                None => service::choices().choices,
            };
            display_choices(&choices);
        }
        Command::Health => {
            let health = match &config.server_url {
                Some(url) => GameApiClient::new(url)
                    .health()
                    .with_context(|| format!("checking {}", url))?,
                None => service::health(),
            };
            display_health(&health);
        }
    }

    Ok(())
}

fn build_opponent(args: &Args, config: &Config) -> anyhow::Result<Box<dyn Opponent>> {
    if let Some(token) = &args.against {
        return Ok(Box::new(FixedOpponent::new(token.parse()?)));
    }

    if let Some(url) = &config.server_url {
        return Ok(Box::new(RemoteOpponent::new(GameApiClient::new(url))));
    }

    let opponent_config = match &args.opponent {
        Some(json) => OpponentConfig::from_json(json).context("parsing --opponent")?,
        None => config.opponent_config()?,
    };
    Ok(Box::new(ComputerOpponent::new(
        opponent_config,
        RngSource::from_entropy(),
    )))
}

fn open_session(args: &Args, config: &Config) -> Session {
    let store: Box<dyn Store> = if args.no_save {
        Box::new(MemoryStore::new())
    } else {
        Box::new(FileStore::new(config.data_dir.clone()))
    };

    let (session, warnings) = Session::load(store);
    show_warnings(&warnings);
    session
}

fn show_session_stats(session: &Session) {
    let computer_moves: Vec<&str> = session
        .history()
        .computer_choices()
        .iter()
        .map(|c| c.as_str())
        .collect();
    display_stats(
        session.stats(),
        &session.current_streak(),
        &computer_stats(&computer_moves),
    );
}

fn show_warnings(warnings: &[AppError]) {
    for warning in warnings {
        display_warning(&warning.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_flags() {
        let args = Args::try_parse_from(["rps", "reset", "--scores", "--stats"]).unwrap();
        match args.command {
            Command::Reset {
                scores,
                history,
                stats,
            } => assert!(scores && !history && stats),
            other => panic!("unexpected command {:?}", other),
        }

        // the last-round view only lives inside a running session
        assert!(Args::try_parse_from(["rps", "reset", "--round"]).is_err());
    }

    #[test]
    fn test_simulate_pattern_splits_on_commas() {
        let args =
            Args::try_parse_from(["rps", "--no-save", "simulate", "-p", "rock,paper"]).unwrap();
        assert!(args.no_save);
        match args.command {
            Command::Simulate { rounds, pattern } => {
                assert_eq!(rounds, 100);
                assert_eq!(pattern, vec!["rock", "paper"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
