//! Settings module.

use super::parameters::Parameters;
use crate::core::{Horizon, Outbreak};
use crate::errors::Result;
use crate::providers::DistributionParameters;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    pub parameters: Parameters,
    pub horizon: Horizon,

    /// Stop growing once the outbreak holds this many cases.
    #[serde(default)]
    pub max_cases: Option<usize>,

    /// Seed of the random number generator, drawn from the OS if absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub enum SettingsError {
    IoError(std::io::Error),
    YamlError(serde_yaml::Error),
}

impl std::error::Error for SettingsError {}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::IoError(error) => write!(formatter, "IO error: {}", error),
            SettingsError::YamlError(error) => write!(formatter, "YAML error: {}", error),
        }
    }
}

impl std::fmt::Display for Settings {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let output = serde_yaml::to_string(self).map_err(|_| std::fmt::Error)?;
        write!(formatter, "{}", output)
    }
}

impl Settings {
    pub fn write(&self, writer: &mut dyn std::io::Write) -> std::result::Result<(), SettingsError> {
        serde_yaml::to_writer(writer, self).map_err(SettingsError::YamlError)
    }

    pub fn read(reader: &mut dyn std::io::Read) -> std::result::Result<Settings, SettingsError> {
        serde_yaml::from_reader(reader).map_err(SettingsError::YamlError)
    }

    pub fn write_to_file(&self, filename: &str) -> std::result::Result<(), SettingsError> {
        let file = fs::File::create(filename).map_err(SettingsError::IoError)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write(&mut writer)
    }

    pub fn read_from_file(filename: &str) -> std::result::Result<Settings, SettingsError> {
        let file = fs::File::open(filename).map_err(SettingsError::IoError)?;
        let mut reader = std::io::BufReader::new(file);
        Self::read(&mut reader)
    }

    /// Create an outbreak with a fresh index case from these settings.
    pub fn build_outbreak(&self) -> Result<Outbreak<DistributionParameters<StdRng>>> {
        let parameters = match self.seed {
            Some(seed) => DistributionParameters::seeded(&self.parameters, seed)?,
            None => DistributionParameters::from_os_rng(&self.parameters)?,
        };
        log::debug!("Building outbreak with parameters {:?}", self.parameters);

        let outbreak = Outbreak::new(parameters);
        Ok(match self.max_cases {
            Some(max_cases) => outbreak.with_case_limit(max_cases),
            None => outbreak,
        })
    }
}
