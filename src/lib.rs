//! Branching-process simulation of outbreak transmission trees.
//!
//! An outbreak starts from an index case. Every case independently infects a
//! random number of secondary cases, each with an onset that is delayed by a
//! random amount from the onset of its donor. Both random draws come from an
//! [`EpiParameters`](providers::EpiParameters) implementation.
//!
//! ```
//! use transmission_sim::core::Outbreak;
//! use transmission_sim::providers::FnParameters;
//!
//! let mut outbreak = Outbreak::new(FnParameters::new(|| 2., || 1.));
//! outbreak.spread_generations(3).unwrap();
//! assert_eq!(outbreak.n_cases(), 15);
//! ```

pub mod config;
pub mod core;
pub mod errors;
pub mod providers;
pub mod references;
pub mod stats;
