//! Growth of the transmission tree
//!
//! An outbreak grows in rounds. In each round every case of the frontier
//! transmits once and the snapshot is refreshed, so the new cases become
//! visible to the next round. Growth is bounded either by a number of
//! generations or by a horizon in simulated time.

use serde::{Deserialize, Serialize};

use super::Outbreak;
use crate::errors::{OutbreakError, Result};
use crate::providers::EpiParameters;
use crate::references::CaseRef;

/// Number of consecutive rounds without progress in simulated time after
/// which a time-bounded spread gives up.
pub const STALL_ROUNDS: usize = 10;

/// How far an outbreak should grow.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "until", rename_all = "snake_case")]
pub enum Horizon {
    /// Grow by a fixed number of generations.
    Generations { levels: usize },
    /// Grow until simulated time has advanced by a number of days.
    Days { days: f64 },
}

/// Reason why an outbreak stopped growing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Termination {
    /// The requested horizon was reached or no case could transmit anymore.
    #[default]
    Completed,
    /// For [`STALL_ROUNDS`] rounds in a row, new cases were created but none
    /// of them advanced simulated time.
    Stalled,
    CaseLimitReached,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpreadReport {
    /// Number of transmission rounds that were run.
    pub rounds: usize,
    pub new_cases: usize,
    pub termination: Termination,
}

impl<P: EpiParameters> Outbreak<P> {
    pub fn spread(&mut self, horizon: Horizon) -> Result<SpreadReport> {
        match horizon {
            Horizon::Generations { levels } => self.spread_generations(levels),
            Horizon::Days { days } => self.spread_days(days),
        }
    }

    /// Grow the outbreak by `levels` generations.
    ///
    /// Each round the cases at the deepest level of the snapshot that have
    /// not transmitted yet form the frontier. Exactly `levels` rounds are run
    /// unless the case limit is hit first; a round with an empty frontier
    /// does nothing.
    pub fn spread_generations(&mut self, levels: usize) -> Result<SpreadReport> {
        let mut report = SpreadReport::default();
        if levels == 0 {
            return Ok(report);
        }

        // reveal cases hidden by an earlier horizon
        self.refresh();

        for _ in 0..levels {
            if self.case_limit_reached() {
                report.termination = Termination::CaseLimitReached;
                break;
            }

            let max_level = self.deepest_level_before(f64::INFINITY);
            let frontier: Vec<CaseRef> = self
                .case_list
                .iter()
                .filter(|case| {
                    let case = case.borrow();
                    case.get_level() == max_level && !case.has_transmitted()
                })
                .cloned()
                .collect();

            log::debug!(
                "Transmitting from {} cases at level {}...",
                frontier.len(),
                max_level
            );
            report.new_cases += self.transmit_frontier(&frontier)?;
            report.rounds += 1;
        }

        self.log_report(&report);
        Ok(report)
    }

    /// Grow the outbreak until simulated time has advanced by `days`.
    ///
    /// The horizon is `days` after the latest onset of the snapshot. Each
    /// round every case before the horizon that has not transmitted yet forms
    /// the frontier. Since no case transmits twice, this is exactly the
    /// newest generation. Growth ends once no case is left to transmit, once
    /// [`STALL_ROUNDS`] rounds in a row did not advance simulated time, or
    /// once the case limit is hit.
    /// Afterwards, cases at or beyond the horizon are hidden from the
    /// snapshot but stay in the tree.
    pub fn spread_days(&mut self, days: f64) -> Result<SpreadReport> {
        if !days.is_finite() || days < 0. {
            return Err(OutbreakError::InvalidHorizon(days));
        }

        let mut report = SpreadReport::default();
        let mut idle_rounds = 0;
        if days == 0. {
            return Ok(report);
        }

        let current_time = self.latest_onset();
        let target_time = current_time + days;

        // reveal cases hidden by an earlier horizon
        self.refresh();

        loop {
            if self.case_limit_reached() {
                report.termination = Termination::CaseLimitReached;
                break;
            }

            let frontier: Vec<CaseRef> = self
                .case_list
                .iter()
                .filter(|case| {
                    let case = case.borrow();
                    case.get_onset() < target_time && !case.has_transmitted()
                })
                .cloned()
                .collect();

            if frontier.is_empty() {
                break;
            }

            log::debug!(
                "Transmitting from {} cases up to level {} (time {} of {})...",
                frontier.len(),
                self.deepest_level_before(target_time),
                current_time,
                target_time
            );
            report.new_cases += self.transmit_frontier(&frontier)?;
            report.rounds += 1;

            if advances_time(&frontier, target_time) {
                idle_rounds = 0;
            } else if infects_before(&frontier, target_time) {
                idle_rounds += 1;
                if idle_rounds >= STALL_ROUNDS {
                    log::warn!(
                        "Outbreak stalled after {} rounds, simulated time did not advance for {} rounds.",
                        report.rounds,
                        idle_rounds
                    );
                    report.termination = Termination::Stalled;
                    break;
                }
            }
        }

        self.hide_from(target_time);
        self.log_report(&report);
        Ok(report)
    }

    /// Transmit every case of `frontier` and refresh the snapshot.
    ///
    /// The snapshot is refreshed even if a transmission fails, in which case
    /// the cases created before the failure remain in the tree.
    fn transmit_frontier(&mut self, frontier: &[CaseRef]) -> Result<usize> {
        let result = frontier.iter().try_fold(0, |created, donor| {
            donor
                .transmit(&mut self.parameters)
                .map(|n_transmissions| created + n_transmissions)
        });
        self.refresh();
        result
    }

    fn case_limit_reached(&self) -> bool {
        self.max_cases
            .is_some_and(|max_cases| self.case_list.len() >= max_cases)
    }

    fn latest_onset(&self) -> f64 {
        self.case_list
            .iter()
            .map(|case| case.borrow().get_onset())
            .fold(f64::NEG_INFINITY, f64::max)
    }

    fn deepest_level_before(&self, time: f64) -> usize {
        self.case_list
            .iter()
            .map(|case| case.borrow())
            .filter(|case| case.get_onset() < time)
            .map(|case| case.get_level())
            .max()
            .unwrap_or_default()
    }

    fn log_report(&self, report: &SpreadReport) {
        if report.termination == Termination::CaseLimitReached {
            log::warn!(
                "Case limit of {:?} reached after {} rounds.",
                self.max_cases,
                report.rounds
            );
        }
        log::info!(
            "Spread {} new cases in {} rounds, {} cases visible.",
            report.new_cases,
            report.rounds,
            self.case_list.len()
        );
    }
}

/// Whether any donor caused a case that is later than itself and before the
/// horizon.
fn advances_time(frontier: &[CaseRef], target_time: f64) -> bool {
    frontier.iter().any(|donor| {
        let donor = donor.borrow();
        donor.get_children().iter().any(|child| {
            let onset = child.borrow().get_onset();
            onset > donor.get_onset() && onset < target_time
        })
    })
}

/// Whether any donor caused a case before the horizon.
fn infects_before(frontier: &[CaseRef], target_time: f64) -> bool {
    frontier.iter().any(|donor| {
        donor
            .borrow()
            .get_children()
            .iter()
            .any(|child| child.borrow().get_onset() < target_time)
    })
}
