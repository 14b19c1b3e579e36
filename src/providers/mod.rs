//! Epidemiological parameters that drive transmission.
//!
//! An outbreak only needs two samplers: one for the number of secondary
//! infections of a case, and one for the delay between the onset of a donor
//! and the onset of each case it infects. Both are drawn through the
//! `EpiParameters` trait.

mod closure;
mod distribution;

pub use closure::FnParameters;
pub use distribution::DistributionParameters;

/// Source of random draws for transmission.
///
/// Draws are returned as `f64` and checked by the caller: `r0` has to be a
/// non-negative whole number and `infectivity` a finite, non-negative delay.
pub trait EpiParameters {
    /// Draw the number of secondary infections caused by a case.
    fn r0(&mut self) -> f64;

    /// Draw the delay between the onset of a donor and a secondary case.
    fn infectivity(&mut self) -> f64;
}

impl<P: EpiParameters + ?Sized> EpiParameters for &mut P {
    fn r0(&mut self) -> f64 {
        (**self).r0()
    }

    fn infectivity(&mut self) -> f64 {
        (**self).infectivity()
    }
}
