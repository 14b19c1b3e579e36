//! Outbreak container
//!
//! The `Outbreak` owns the index case of a transmission tree together with
//! the epidemiological parameters that drive its growth. It keeps a flattened
//! pre-order snapshot of the tree and an index from `CaseKey` to case. Every
//! change the outbreak makes to the tree is followed by a refresh of both, so
//! the read accessors never observe a stale snapshot.
//!
//! Keys are handed out the first time a case enters the snapshot and are
//! never reused, so a key stays valid for the lifetime of the outbreak. They
//! are drawn from a counter shared by the whole tree, so outbreaks over
//! different parts of one tree never hand out the same key.

mod spread;

use std::collections::HashMap;
use std::fmt;

use super::{Case, CaseKey, Postorder, Preorder};
use crate::errors::{OutbreakError, Result};
use crate::providers::EpiParameters;
use crate::references::CaseRef;

pub use spread::{Horizon, STALL_ROUNDS, SpreadReport, Termination};

pub struct Outbreak<P: EpiParameters> {
    parameters: P,
    index_case: CaseRef,
    case_list: Vec<CaseRef>,
    case_map: HashMap<CaseKey, CaseRef>,
    max_cases: Option<usize>,
}

impl<P: EpiParameters> Outbreak<P> {
    /// Start an outbreak from a fresh index case at onset 0.
    pub fn new(parameters: P) -> Self {
        Self::with_index_case(parameters, Case::index())
    }

    /// Start an outbreak from an existing case and any cases below it.
    ///
    /// Keys already carried by the cases are kept, new keys continue after
    /// every key handed out in the tree so far.
    pub fn with_index_case(parameters: P, index_case: CaseRef) -> Self {
        let mut outbreak = Self {
            parameters,
            index_case,
            case_list: Vec::new(),
            case_map: HashMap::new(),
            max_cases: None,
        };
        outbreak.refresh();
        outbreak
    }

    /// Stop spreading once the tree holds at least `max_cases` cases.
    ///
    /// The limit is checked between growth rounds, so the final round may
    /// overshoot it.
    pub fn with_case_limit(mut self, max_cases: usize) -> Self {
        self.max_cases = Some(max_cases);
        self
    }

    pub fn epi_parameters(&self) -> &P {
        &self.parameters
    }

    pub fn index_case(&self) -> &CaseRef {
        &self.index_case
    }

    pub fn get_case_limit(&self) -> Option<usize> {
        self.max_cases
    }

    pub fn preorder(&self) -> Preorder {
        self.index_case.preorder()
    }

    pub fn postorder(&self) -> Postorder {
        self.index_case.postorder()
    }

    /// Get a copy of the current snapshot of cases in pre-order.
    pub fn cases(&self) -> Vec<CaseRef> {
        self.case_list.clone()
    }

    /// Get the cases of the snapshot that have not caused any infection.
    pub fn external_cases(&self) -> Vec<CaseRef> {
        self.case_list
            .iter()
            .filter(|case| case.borrow().get_children().is_empty())
            .cloned()
            .collect()
    }

    /// Number of cases in the current snapshot.
    pub fn n_cases(&self) -> usize {
        self.case_list.len()
    }

    pub fn get_case(&self, key: CaseKey) -> Result<CaseRef> {
        self.case_map
            .get(&key)
            .cloned()
            .ok_or(OutbreakError::NotFound(key))
    }

    /// Let a single case of the snapshot transmit and refresh the snapshot.
    pub fn transmit_case(&mut self, key: CaseKey) -> Result<usize> {
        let case = self.get_case(key)?;
        let result = case.transmit(&mut self.parameters);
        self.refresh();
        result
    }

    /// Rebuild the snapshot and key index from the tree.
    fn refresh(&mut self) {
        self.case_list = self.index_case.preorder().collect();
        self.case_map = self
            .case_list
            .iter()
            .map(|case| {
                let key = case.borrow_mut().get_or_assign_key();
                (key, case.clone())
            })
            .collect();
    }

    /// Hide cases with an onset at or after `time` from the snapshot.
    ///
    /// The cases stay in the tree and reappear with the next refresh.
    fn hide_from(&mut self, time: f64) {
        self.case_list.retain(|case| case.borrow().get_onset() < time);
        self.case_map.retain(|_, case| case.borrow().get_onset() < time);
    }
}

impl<P: EpiParameters> fmt::Debug for Outbreak<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Outbreak")
            .field("n_cases", &self.case_list.len())
            .field("max_cases", &self.max_cases)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DelayDistribution, OffspringDistribution, Parameters};
    use crate::providers::{DistributionParameters, FnParameters};
    use rand::rngs::StdRng;

    fn stochastic_outbreak(seed: u64) -> Outbreak<DistributionParameters<StdRng>> {
        let parameters = Parameters {
            r0: OffspringDistribution::Poisson { mean: 2. },
            infectivity: DelayDistribution::Gamma {
                shape: 2.,
                scale: 1.,
            },
        };
        Outbreak::new(DistributionParameters::seeded(&parameters, seed).unwrap())
    }

    #[test]
    fn initiate_outbreak() {
        let outbreak = Outbreak::new(FnParameters::new(|| 1., || 1.));

        assert_eq!(outbreak.n_cases(), 1);
        assert_eq!(outbreak.cases(), vec![outbreak.index_case().clone()]);
        assert_eq!(outbreak.external_cases(), outbreak.cases());

        let index = outbreak.get_case(CaseKey::from(0)).unwrap();
        assert_eq!(&index, outbreak.index_case());
        assert_eq!(index.borrow().get_key(), Some(CaseKey::from(0)));
        assert_eq!(index.borrow().get_onset(), 0.);
        assert_eq!(index.borrow().get_level(), 0);
    }

    #[test]
    fn get_unknown_case() {
        let outbreak = Outbreak::new(FnParameters::new(|| 1., || 1.));

        assert_eq!(
            outbreak.get_case(CaseKey::from(42)),
            Err(OutbreakError::NotFound(CaseKey::from(42)))
        );
    }

    #[test]
    fn keys_are_unique_and_stable() {
        let mut outbreak = Outbreak::new(FnParameters::new(|| 2., || 1.));
        outbreak.spread_generations(1).unwrap();
        let keys: Vec<Option<CaseKey>> = outbreak
            .cases()
            .iter()
            .map(|case| case.borrow().get_key())
            .collect();

        outbreak.spread_generations(2).unwrap();

        for (position, key) in keys.iter().enumerate() {
            let key = key.unwrap();
            assert_eq!(usize::from(key), position);
            assert_eq!(outbreak.get_case(key).unwrap().borrow().get_key(), Some(key));
        }

        let mut all_keys: Vec<CaseKey> = outbreak
            .cases()
            .iter()
            .filter_map(|case| case.borrow().get_key())
            .collect();
        all_keys.sort();
        all_keys.dedup();
        assert_eq!(all_keys.len(), outbreak.n_cases());
    }

    #[test]
    fn cases_are_a_snapshot() {
        let mut outbreak = Outbreak::new(FnParameters::new(|| 2., || 1.));
        outbreak.spread_generations(2).unwrap();

        let mut cases = outbreak.cases();
        cases.clear();

        assert_eq!(outbreak.n_cases(), 7);
        assert_eq!(outbreak.cases(), outbreak.cases());
    }

    #[test]
    fn external_cases() {
        let mut outbreak = stochastic_outbreak(3);
        outbreak.spread_generations(4).unwrap();

        let external = outbreak.external_cases();
        let expected: Vec<CaseRef> = outbreak
            .cases()
            .into_iter()
            .filter(|case| case.borrow().get_children().is_empty())
            .collect();

        assert_eq!(external, expected);
        assert!(
            external
                .iter()
                .all(|case| case.borrow().get_children().is_empty())
        );
    }

    #[test]
    fn traversals_visit_every_case() {
        for seed in 0..5 {
            let mut outbreak = stochastic_outbreak(seed);
            outbreak.spread_generations(4).unwrap();

            let preorder: Vec<CaseRef> = outbreak.preorder().collect();
            let postorder: Vec<CaseRef> = outbreak.postorder().collect();

            assert_eq!(preorder.len(), outbreak.n_cases());
            assert_eq!(postorder.len(), outbreak.n_cases());
            assert_eq!(preorder.first(), Some(outbreak.index_case()));
            assert_eq!(postorder.last(), Some(outbreak.index_case()));
            assert_eq!(preorder, outbreak.cases());
        }
    }

    #[test]
    fn cases_follow_their_donors() {
        for seed in 0..5 {
            let mut outbreak = stochastic_outbreak(seed);
            outbreak.spread_generations(4).unwrap();

            for case in outbreak.cases() {
                let case = case.borrow();
                match case.get_parent() {
                    None => assert_eq!(case.get_level(), 0),
                    Some(parent) => {
                        let parent = parent.borrow();
                        assert_eq!(case.get_level(), parent.get_level() + 1);
                        assert!(case.get_onset() >= parent.get_onset());
                    }
                }
            }
        }
    }

    #[test]
    fn outbreak_from_existing_case() {
        let index = Case::new(10., None, 0);
        index
            .transmit(&mut FnParameters::new(|| 2., || 1.))
            .unwrap();

        let outbreak = Outbreak::with_index_case(FnParameters::new(|| 1., || 1.), index.clone());

        assert_eq!(outbreak.index_case(), &index);
        assert_eq!(outbreak.n_cases(), 3);
        assert_eq!(outbreak.external_cases().len(), 2);
        assert_eq!(outbreak.get_case(CaseKey::from(0)).unwrap(), index);
    }

    #[test]
    fn keys_continue_after_existing_keys() {
        let mut first = Outbreak::new(FnParameters::new(|| 1., || 1.));
        first.spread_generations(2).unwrap();
        let index = first.index_case().clone();

        let mut second = Outbreak::with_index_case(FnParameters::new(|| 1., || 1.), index);
        second.spread_generations(1).unwrap();

        let newest = second.cases().last().unwrap().clone();
        assert_eq!(newest.borrow().get_key(), Some(CaseKey::from(3)));
        assert_eq!(second.get_case(CaseKey::from(3)).unwrap(), newest);
    }

    #[test]
    fn outbreaks_sharing_a_tree_keep_keys_unique() {
        let mut whole = Outbreak::new(FnParameters::new(|| 2., || 1.));
        whole.spread_generations(1).unwrap();
        let branch = whole.get_case(CaseKey::from(1)).unwrap();

        let mut part = Outbreak::with_index_case(FnParameters::new(|| 2., || 1.), branch);
        part.spread_generations(1).unwrap();
        whole.transmit_case(CaseKey::from(2)).unwrap();
        part.spread_generations(1).unwrap();
        whole.spread_generations(1).unwrap();

        let mut keys: Vec<CaseKey> = whole
            .cases()
            .iter()
            .filter_map(|case| case.borrow().get_key())
            .collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), whole.n_cases());
        for case in whole.cases() {
            let key = case.borrow().get_key().unwrap();
            assert_eq!(whole.get_case(key).unwrap(), case);
        }
    }

    #[test]
    fn transmit_single_case() {
        let mut outbreak = Outbreak::new(FnParameters::new(|| 2., || 0.5));

        assert_eq!(outbreak.transmit_case(CaseKey::from(0)), Ok(2));
        assert_eq!(outbreak.n_cases(), 3);

        let child = outbreak.get_case(CaseKey::from(2)).unwrap();
        assert_eq!(child.borrow().get_onset(), 0.5);
        assert_eq!(
            outbreak.transmit_case(CaseKey::from(9)),
            Err(OutbreakError::NotFound(CaseKey::from(9)))
        );
    }
}
