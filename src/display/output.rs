use crate::analysis::stats::Stats;
use crate::analysis::streak::Streak;
use crate::api::models::HealthResponse;
use crate::game::choice::{Choice, Outcome};
use crate::opponent::computer::MoveDistribution;
use crate::session::round::Round;
use crate::session::score::Score;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct RoundRow {
    #[tabled(rename = "#")]
    number: String,
    player: String,
    computer: String,
    result: String,
    played: String,
}

#[derive(Tabled)]
struct ChoiceRow {
    choice: String,
    played: String,
    won: String,
    win_rate: String,
    computer_share: String,
}

fn colored_outcome(outcome: Outcome) -> String {
    match outcome {
        Outcome::Win => "WIN".green().bold().to_string(),
        Outcome::Lose => "LOSE".red().bold().to_string(),
        Outcome::Tie => "TIE".yellow().bold().to_string(),
    }
}

fn choice_icon(choice: Choice) -> &'static str {
    match choice {
        Choice::Rock => "🪨",
        Choice::Paper => "📄",
        Choice::Scissors => "✂️",
    }
}

pub fn display_round(round: &Round, opponent_name: &str) {
    println!(
        "\n{} {} {}  vs  {} {} {}",
        "You:".bold(),
        choice_icon(round.player_choice),
        round.player_choice,
        choice_icon(round.computer_choice),
        round.computer_choice,
        format!("({})", opponent_name).dimmed()
    );
    println!("{} {}\n", "Result:".bold(), colored_outcome(round.result));
}

pub fn display_scoreboard(score: &Score) {
    println!("{}", "🏆 SCOREBOARD".bold().cyan());
    println!("{}", "=".repeat(40).cyan());
    println!(
        "{} {}   {} {}   {} {}   {} {}%\n",
        "You:".bold(),
        score.player_score().to_string().green(),
        "Computer:".bold(),
        score.computer_score().to_string().red(),
        "Games:".bold(),
        score.games_played(),
        "Win rate:".bold(),
        score.win_rate()
    );
}

pub fn display_stats(stats: &Stats, streak: &Streak, computer_moves: &MoveDistribution) {
    println!("\n{}", "📊 STATISTICS".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if stats.total_games == 0 {
        println!("{}", "No games played yet".yellow());
        return;
    }

    println!(
        "{} {} W / {} L / {} T ({:.1}% WR over {} games)",
        "📈 Overall:".bold(),
        stats.wins.to_string().green(),
        stats.losses.to_string().red(),
        stats.ties.to_string().yellow(),
        stats.win_percentage(),
        stats.total_games
    );
    println!(
        "{} win {} (best {}), loss {} (best {})",
        "🔥 Streaks:".bold(),
        stats.win_streak,
        stats.max_win_streak,
        stats.loss_streak,
        stats.max_loss_streak
    );
    match streak.kind {
        Some(kind) => println!(
            "{} {} x{}",
            "⏱  Current run:".bold(),
            colored_outcome(kind),
            streak.count
        ),
        None => println!("{} none", "⏱  Current run:".bold()),
    }
    if let Some(favorite) = stats.favorite_choice {
        println!(
            "{} {} {}",
            "❤️  Favorite:".bold(),
            choice_icon(favorite),
            favorite
        );
    }
    if let Some(last) = stats.last_played_at {
        println!("{} {}", "🕒 Last played:".bold(), last.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    println!();

    let rows: Vec<ChoiceRow> = Choice::ALL
        .iter()
        .map(|choice| {
            let entry = stats.choice(*choice);
            let share = computer_moves.percentages.get(choice).copied().unwrap_or(0);
            ChoiceRow {
                choice: format!("{} {}", choice_icon(*choice), choice),
                played: entry.played.to_string(),
                won: entry.won.to_string(),
                win_rate: format!("{:.1}%", entry.win_rate() * 100.0),
                computer_share: format!("{}%", share),
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    println!("\n{}", "Interpretation".bold().yellow());
    println!("• Win Rate: rounds won with this choice out of rounds played with it");
    println!(
        "• Computer Share: how often the computer threw it (last {} rounds)\n",
        computer_moves.total_moves
    );
}

pub fn display_history(rounds: &[Round]) {
    println!(
        "\n{}",
        format!("📜 RECENT ROUNDS (Last {})", rounds.len()).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    if rounds.is_empty() {
        println!("{}", "No rounds recorded".yellow());
        return;
    }

    let rows: Vec<RoundRow> = rounds
        .iter()
        .enumerate()
        .map(|(idx, round)| RoundRow {
            number: format!("{}", idx + 1),
            player: round.player_choice.to_string(),
            computer: round.computer_choice.to_string(),
            result: colored_outcome(round.result),
            played: round.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_choices(choices: &[Choice]) {
    let names: Vec<String> = choices
        .iter()
        .map(|c| format!("{} {}", choice_icon(*c), c))
        .collect();
    println!("{} {}", "Valid choices:".bold(), names.join(", "));
}

pub fn display_health(health: &HealthResponse) {
    println!(
        "{} {} ({}) at {}",
        "✓".green(),
        health.status.bold(),
        health.service,
        health.timestamp.to_rfc3339()
    );
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_warning(message: &str) {
    eprintln!("{} {}", "⚠️ Warning:".yellow().bold(), message);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
