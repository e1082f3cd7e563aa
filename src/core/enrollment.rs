use crate::domain::ports::StatusSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// How a candidate's enrollment flag is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum StatusPolicy {
    /// Coin flip, independent of the admission score.
    #[default]
    Random,
    /// Enrolled exactly when admitted.
    Admitted,
}

impl StatusPolicy {
    pub const NAMES: [&'static str; 2] = ["random", "admitted"];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusPolicy::Random => "random",
            StatusPolicy::Admitted => "admitted",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "random" => Some(StatusPolicy::Random),
            "admitted" => Some(StatusPolicy::Admitted),
            _ => None,
        }
    }

    pub fn into_source(self, seed: Option<u64>) -> Box<dyn StatusSource> {
        match self {
            StatusPolicy::Random => Box::new(match seed {
                Some(seed) => RandomStatus::seeded(seed),
                None => RandomStatus::from_entropy(),
            }),
            StatusPolicy::Admitted => Box::new(AdmissionDerived),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RandomStatus {
    rng: StdRng,
}

impl RandomStatus {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl StatusSource for RandomStatus {
    fn initial_status(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

/// Every candidate starts enrolled; the directory clears the flag on rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdmissionDerived;

impl StatusSource for AdmissionDerived {
    fn initial_status(&mut self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedStatus(pub bool);

impl StatusSource for FixedStatus {
    fn initial_status(&mut self) -> bool {
        self.0
    }
}
