//! All errors that can occur while growing an outbreak.

use std::fmt;

use crate::core::CaseKey;

pub type Result<T> = std::result::Result<T, OutbreakError>;

#[derive(Clone, Debug, PartialEq)]
pub enum OutbreakError {
    /// The offspring sampler returned something that is not a non-negative whole number.
    InvalidTransmissionCount(f64),
    /// The infectivity sampler returned a negative or non-finite delay.
    InvalidDelay(f64),
    /// A time horizon that is negative or not finite.
    InvalidHorizon(f64),
    InvalidParameter(String),
    NotFound(CaseKey),
}

impl fmt::Display for OutbreakError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutbreakError::InvalidTransmissionCount(count) => {
                write!(f, "InvalidTransmissionCount: {}", count)
            }
            OutbreakError::InvalidDelay(delay) => write!(f, "InvalidDelay: {}", delay),
            OutbreakError::InvalidHorizon(days) => write!(f, "InvalidHorizon: {}", days),
            OutbreakError::InvalidParameter(message) => {
                write!(f, "InvalidParameter: {}", message)
            }
            OutbreakError::NotFound(key) => write!(f, "NotFound: {}", key),
        }
    }
}

impl std::error::Error for OutbreakError {}
