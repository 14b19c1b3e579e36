use serde::{Deserialize, Serialize};

/// Distribution of the number of secondary infections per case.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "distribution", rename_all = "snake_case")]
pub enum OffspringDistribution {
    /// Every case infects exactly `value` others.
    Constant { value: usize },

    Poisson { mean: f64 },

    /// Overdispersed offspring with a gamma distributed Poisson rate. Lower
    /// `dispersion` concentrates transmission in fewer cases.
    NegativeBinomial { mean: f64, dispersion: f64 },

    /// Normal draws rounded to the nearest whole number and clamped at zero.
    RoundedNormal { mean: f64, std_dev: f64 },
}

/// Distribution of the delay between the onset of a donor and the onset of a
/// case it infected.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "distribution", rename_all = "snake_case")]
pub enum DelayDistribution {
    Constant { value: f64 },
    Exponential { rate: f64 },
    Gamma { shape: f64, scale: f64 },
    LogNormal { mu: f64, sigma: f64 },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Parameters {
    /// The number of secondary infections of each case.
    pub r0: OffspringDistribution,

    /// The delay after which each secondary infection becomes symptomatic.
    pub infectivity: DelayDistribution,
}
