use crate::game::choice::Outcome;
use serde::Serialize;

/// Run of identical outcomes ending at the most recent round. Unlike the
/// aggregate win/loss streaks, a run of ties counts here too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Streak {
    pub kind: Option<Outcome>,
    pub count: usize,
}

impl Streak {
    pub fn none() -> Self {
        Streak {
            kind: None,
            count: 0,
        }
    }
}

/// `outcomes` must be newest first.
pub fn current_streak<I>(outcomes: I) -> Streak
where
    I: IntoIterator<Item = Outcome>,
{
    let mut outcomes = outcomes.into_iter();
    let Some(kind) = outcomes.next() else {
        return Streak::none();
    };

    let count = 1 + outcomes.take_while(|outcome| *outcome == kind).count();
    Streak {
        kind: Some(kind),
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        assert_eq!(current_streak(Vec::new()), Streak::none());
    }

    #[test]
    fn test_counts_leading_run_only() {
        let outcomes = vec![Outcome::Win, Outcome::Win, Outcome::Lose, Outcome::Win];
        assert_eq!(
            current_streak(outcomes),
            Streak {
                kind: Some(Outcome::Win),
                count: 2
            }
        );
    }

    #[test]
    fn test_ties_form_a_streak() {
        let outcomes = vec![Outcome::Tie, Outcome::Tie, Outcome::Tie];
        assert_eq!(
            current_streak(outcomes),
            Streak {
                kind: Some(Outcome::Tie),
                count: 3
            }
        );
    }
}
