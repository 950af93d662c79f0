use super::choice::Choice;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Entropy capability handed to anything that needs to pick at random.
pub trait ChoiceSource {
    /// Uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    fn next_choice(&mut self) -> Choice {
        let idx = (self.next_unit() * Choice::ALL.len() as f64) as usize;
        Choice::ALL[idx.min(Choice::ALL.len() - 1)]
    }
}

pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        RngSource { rng }
    }
}

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        RngSource::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        RngSource::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ChoiceSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn next_choice(&mut self) -> Choice {
        Choice::ALL[self.rng.gen_range(0..Choice::ALL.len())]
    }
}

/// Replays a fixed list of choices in a loop. `next_unit` walks its own
/// list of draws (all zero when none were given).
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    choices: Vec<Choice>,
    units: Vec<f64>,
    choice_pos: usize,
    unit_pos: usize,
}

impl ScriptedSource {
    pub fn new(choices: Vec<Choice>) -> Self {
        ScriptedSource {
            choices,
            units: Vec::new(),
            choice_pos: 0,
            unit_pos: 0,
        }
    }

    pub fn with_units(mut self, units: Vec<f64>) -> Self {
        self.units = units;
        self
    }
}

impl ChoiceSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.units.is_empty() {
            return 0.0;
        }
        let unit = self.units[self.unit_pos % self.units.len()];
        self.unit_pos += 1;
        unit
    }

    fn next_choice(&mut self) -> Choice {
        if self.choices.is_empty() {
            let unit = self.next_unit();
            let idx = (unit * Choice::ALL.len() as f64) as usize;
            return Choice::ALL[idx.min(Choice::ALL.len() - 1)];
        }
        let choice = self.choices[self.choice_pos % self.choices.len()];
        self.choice_pos += 1;
        choice
    }
}
