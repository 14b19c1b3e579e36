//! Parameters sampled from configured probability distributions.

use derivative::Derivative;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Gamma, LogNormal, Normal, Poisson};

use super::EpiParameters;
use crate::config::{DelayDistribution, OffspringDistribution, Parameters};
use crate::errors::{OutbreakError, Result};

#[derive(Debug)]
enum OffspringSampler {
    Constant(f64),
    Poisson(Poisson<f64>),
    /// Gamma distributed rate of a Poisson distribution.
    NegativeBinomial(Gamma<f64>),
    RoundedNormal(Normal<f64>),
}

#[derive(Debug)]
enum DelaySampler {
    Constant(f64),
    Exponential(Exp<f64>),
    Gamma(Gamma<f64>),
    LogNormal(LogNormal<f64>),
}

fn invalid(name: &str, error: impl std::fmt::Display) -> OutbreakError {
    OutbreakError::InvalidParameter(format!("{name}: {error}"))
}

impl TryFrom<&OffspringDistribution> for OffspringSampler {
    type Error = OutbreakError;

    fn try_from(distribution: &OffspringDistribution) -> Result<Self> {
        let sampler = match *distribution {
            OffspringDistribution::Constant { value } => Self::Constant(value as f64),
            // without any expected offspring there is nothing to sample
            OffspringDistribution::Poisson { mean } if mean == 0. => Self::Constant(0.),
            OffspringDistribution::NegativeBinomial { mean, .. } if mean == 0. => {
                Self::Constant(0.)
            }
            OffspringDistribution::Poisson { mean } => {
                Self::Poisson(Poisson::new(mean).map_err(|error| invalid("poisson", error))?)
            }
            OffspringDistribution::NegativeBinomial { mean, dispersion } => {
                let mixing = Gamma::new(dispersion, mean / dispersion)
                    .map_err(|error| invalid("negative binomial", error))?;
                Self::NegativeBinomial(mixing)
            }
            OffspringDistribution::RoundedNormal { mean, std_dev } => {
                if !std_dev.is_finite() || std_dev < 0. {
                    return Err(invalid(
                        "rounded normal",
                        "std_dev must be finite and non-negative",
                    ));
                }
                Self::RoundedNormal(
                    Normal::new(mean, std_dev).map_err(|error| invalid("rounded normal", error))?,
                )
            }
        };
        Ok(sampler)
    }
}

impl OffspringSampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Constant(value) => *value,
            Self::Poisson(dist) => dist.sample(rng),
            Self::NegativeBinomial(mixing) => match Poisson::new(mixing.sample(rng)) {
                Ok(dist) => dist.sample(rng),
                // a rate of 0 => no offspring
                Err(_) => 0.,
            },
            Self::RoundedNormal(dist) => dist.sample(rng).round().max(0.),
        }
    }
}

impl TryFrom<&DelayDistribution> for DelaySampler {
    type Error = OutbreakError;

    fn try_from(distribution: &DelayDistribution) -> Result<Self> {
        let sampler = match *distribution {
            DelayDistribution::Constant { value } => {
                if !value.is_finite() || value < 0. {
                    return Err(invalid("constant", "delay must be finite and non-negative"));
                }
                Self::Constant(value)
            }
            DelayDistribution::Exponential { rate } => {
                if rate.is_nan() || rate <= 0. {
                    return Err(invalid("exponential", "rate must be positive"));
                }
                Self::Exponential(Exp::new(rate).map_err(|error| invalid("exponential", error))?)
            }
            DelayDistribution::Gamma { shape, scale } => {
                Self::Gamma(Gamma::new(shape, scale).map_err(|error| invalid("gamma", error))?)
            }
            DelayDistribution::LogNormal { mu, sigma } => {
                if !sigma.is_finite() || sigma < 0. {
                    return Err(invalid("log-normal", "sigma must be finite and non-negative"));
                }
                Self::LogNormal(
                    LogNormal::new(mu, sigma).map_err(|error| invalid("log-normal", error))?,
                )
            }
        };
        Ok(sampler)
    }
}

impl DelaySampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Constant(value) => *value,
            Self::Exponential(dist) => dist.sample(rng),
            Self::Gamma(dist) => dist.sample(rng),
            Self::LogNormal(dist) => dist.sample(rng),
        }
    }
}

/// Parameters drawing from the distributions of a [`Parameters`]
/// configuration with their own random number generator.
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct DistributionParameters<R: Rng> {
    r0: OffspringSampler,
    infectivity: DelaySampler,
    #[derivative(Debug = "ignore")]
    rng: R,
}

impl<R: Rng> DistributionParameters<R> {
    pub fn new(parameters: &Parameters, rng: R) -> Result<Self> {
        Ok(Self {
            r0: OffspringSampler::try_from(&parameters.r0)?,
            infectivity: DelaySampler::try_from(&parameters.infectivity)?,
            rng,
        })
    }
}

impl DistributionParameters<StdRng> {
    /// Create reproducible parameters from a seed.
    pub fn seeded(parameters: &Parameters, seed: u64) -> Result<Self> {
        Self::new(parameters, StdRng::seed_from_u64(seed))
    }

    pub fn from_os_rng(parameters: &Parameters) -> Result<Self> {
        Self::new(parameters, StdRng::from_os_rng())
    }
}

impl<R: Rng> EpiParameters for DistributionParameters<R> {
    fn r0(&mut self) -> f64 {
        self.r0.sample(&mut self.rng)
    }

    fn infectivity(&mut self) -> f64 {
        self.infectivity.sample(&mut self.rng)
    }
}
