use super::config::{OpponentConfig, Strategy};
use crate::analysis::rounded_percent;
use crate::game::choice::Choice;
use crate::game::source::ChoiceSource;
use serde::Serialize;
use std::collections::BTreeMap;

pub fn available_strategies() -> [&'static str; 2] {
    [Strategy::Random.as_str(), Strategy::Strategic.as_str()]
}

pub fn generate_random_move(source: &mut dyn ChoiceSource) -> Choice {
    source.next_choice()
}

/// Most played choice in `history`. Equal counts resolve to the earliest
/// choice in canonical order (rock, paper, scissors); this is a fixed
/// precedence, not a random pick.
pub fn most_frequent(history: &[Choice]) -> Option<Choice> {
    let mut counts = [0usize; 3];
    for choice in history {
        counts[choice.index()] += 1;
    }

    let mut best: Option<(Choice, usize)> = None;
    for choice in Choice::ALL {
        let count = counts[choice.index()];
        if count == 0 {
            continue;
        }
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((choice, count)),
        }
    }
    best.map(|(choice, _)| choice)
}

/// Counter the player's most frequent move, or play randomly when there
/// is nothing to learn from.
pub fn generate_strategic_move(history: &[Choice], source: &mut dyn ChoiceSource) -> Choice {
    match most_frequent(history) {
        Some(favorite) => favorite.counter(),
        None => generate_random_move(source),
    }
}

pub fn choose_move(config: &OpponentConfig, source: &mut dyn ChoiceSource) -> Choice {
    match config.strategy() {
        Strategy::Random => generate_random_move(source),
        Strategy::Strategic => {
            if source.next_unit() < config.difficulty() {
                log::debug!(
                    "strategic branch over {} recorded moves",
                    config.player_history().len()
                );
                generate_strategic_move(config.player_history(), source)
            } else {
                log::debug!("strategic opponent fell back to random play");
                generate_random_move(source)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveDistribution {
    pub total_moves: usize,
    pub distribution: BTreeMap<Choice, usize>,
    pub percentages: BTreeMap<Choice, u32>,
}

/// Summarise a sequence of move tokens. Unrecognised tokens are ignored.
pub fn computer_stats<S: AsRef<str>>(moves: &[S]) -> MoveDistribution {
    let valid: Vec<Choice> = moves
        .iter()
        .filter_map(|token| token.as_ref().parse::<Choice>().ok())
        .collect();

    let mut distribution: BTreeMap<Choice, usize> = Choice::ALL.iter().map(|c| (*c, 0)).collect();
    for choice in &valid {
        *distribution.entry(*choice).or_insert(0) += 1;
    }

    let total_moves = valid.len();
    let percentages = distribution
        .iter()
        .map(|(choice, count)| (*choice, rounded_percent(*count, total_moves)))
        .collect();

    MoveDistribution {
        total_moves,
        distribution,
        percentages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::source::{RngSource, ScriptedSource};

    #[test]
    fn test_most_frequent_counts() {
        let history = [
            Choice::Rock,
            Choice::Rock,
            Choice::Rock,
            Choice::Paper,
            Choice::Scissors,
        ];
        assert_eq!(most_frequent(&history), Some(Choice::Rock));
        assert_eq!(most_frequent(&[]), None);
    }

    #[test]
    fn test_most_frequent_tie_uses_canonical_order() {
        assert_eq!(
            most_frequent(&[Choice::Scissors, Choice::Paper]),
            Some(Choice::Paper)
        );
        assert_eq!(
            most_frequent(&[Choice::Scissors, Choice::Rock, Choice::Paper]),
            Some(Choice::Rock)
        );
    }

    #[test]
    fn test_full_difficulty_always_counters() {
        let config = OpponentConfig::strategic(1.0).unwrap().with_history(vec![
            Choice::Rock,
            Choice::Rock,
            Choice::Rock,
            Choice::Paper,
            Choice::Scissors,
        ]);
        let mut source = RngSource::seeded(42);
        for _ in 0..100 {
            assert_eq!(choose_move(&config, &mut source), Choice::Paper);
        }
    }

    #[test]
    fn test_zero_difficulty_never_uses_history() {
        let config = OpponentConfig::strategic(0.0)
            .unwrap()
            .with_history(vec![Choice::Rock; 10]);
        // unit draw 0.0 is not < 0.0, so the scripted rock comes straight through
        let mut source = ScriptedSource::new(vec![Choice::Rock]).with_units(vec![0.0]);
        assert_eq!(choose_move(&config, &mut source), Choice::Rock);
    }

    #[test]
    fn test_difficulty_threshold_selects_branch() {
        let config = OpponentConfig::strategic(0.5)
            .unwrap()
            .with_history(vec![Choice::Scissors, Choice::Scissors]);

        let mut strategic = ScriptedSource::new(vec![Choice::Paper]).with_units(vec![0.2]);
        assert_eq!(choose_move(&config, &mut strategic), Choice::Rock);

        let mut random = ScriptedSource::new(vec![Choice::Paper]).with_units(vec![0.8]);
        assert_eq!(choose_move(&config, &mut random), Choice::Paper);
    }

    #[test]
    fn test_empty_history_falls_back_to_random() {
        let config = OpponentConfig::strategic(1.0).unwrap();
        let mut source = ScriptedSource::new(vec![Choice::Scissors]);
        assert_eq!(choose_move(&config, &mut source), Choice::Scissors);
    }

    #[test]
    fn test_invalid_history_falls_back_to_random() {
        let config =
            OpponentConfig::from_tokens("strategic", &["lizard", "spock"][..], 1.0).unwrap();
        assert!(config.player_history().is_empty());
        let mut source = ScriptedSource::new(vec![Choice::Paper]);
        assert_eq!(choose_move(&config, &mut source), Choice::Paper);
    }

    #[test]
    fn test_random_strategy_is_roughly_uniform() {
        let config = OpponentConfig::random();
        let mut source = RngSource::seeded(2024);
        let mut counts = [0usize; 3];
        for _ in 0..1000 {
            counts[choose_move(&config, &mut source).index()] += 1;
        }
        for count in counts {
            assert!((233..=433).contains(&count), "count {} out of range", count);
        }
    }

    #[test]
    fn test_available_strategies() {
        assert_eq!(available_strategies(), ["random", "strategic"]);
    }

    #[test]
    fn test_computer_stats_distribution() {
        let stats = computer_stats(&["rock", "ROCK", "paper", "lizard"][..]);
        assert_eq!(stats.total_moves, 3);
        assert_eq!(stats.distribution[&Choice::Rock], 2);
        assert_eq!(stats.distribution[&Choice::Paper], 1);
        assert_eq!(stats.distribution[&Choice::Scissors], 0);
        assert_eq!(stats.percentages[&Choice::Rock], 67);
        assert_eq!(stats.percentages[&Choice::Paper], 33);
        assert_eq!(stats.percentages[&Choice::Scissors], 0);
    }

    #[test]
    fn test_computer_stats_empty() {
        let stats = computer_stats::<&str>(&[]);
        assert_eq!(stats.total_moves, 0);
        assert!(stats.distribution.values().all(|c| *c == 0));
        assert!(stats.percentages.values().all(|p| *p == 0));
    }
}
