use itertools::Itertools;

use crate::references::CaseRef;

/// Trait extension to summarize a list of cases
pub trait CaseStatistics {
    fn level_sizes(&self) -> Vec<usize>;
    fn mean_offspring(&self) -> Option<f64>;
    fn onset_range(&self) -> Option<(f64, f64)>;
}

impl CaseStatistics for [CaseRef] {
    /// Count the cases at each level, indexed by level.
    fn level_sizes(&self) -> Vec<usize> {
        let counts = self.iter().map(|case| case.borrow().get_level()).counts();
        let depth = counts.keys().max().map_or(0, |level| level + 1);
        (0..depth)
            .map(|level| counts.get(&level).copied().unwrap_or(0))
            .collect()
    }

    /// Compute the mean number of secondary infections among the cases that
    /// have transmitted, i.e. the empirical reproduction number.
    fn mean_offspring(&self) -> Option<f64> {
        let (donors, offspring) = self
            .iter()
            .map(|case| case.borrow())
            .filter(|case| case.has_transmitted())
            .fold((0usize, 0usize), |(donors, offspring), case| {
                (donors + 1, offspring + case.get_children().len())
            });

        (donors > 0).then(|| offspring as f64 / donors as f64)
    }

    /// Earliest and latest onset.
    fn onset_range(&self) -> Option<(f64, f64)> {
        self.iter()
            .map(|case| case.borrow().get_onset())
            .minmax_by(|a, b| a.total_cmp(b))
            .into_option()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Outbreak;
    use crate::providers::FnParameters;

    #[test]
    fn level_sizes() {
        let mut outbreak = Outbreak::new(FnParameters::new(|| 3., || 1.));
        outbreak.spread_generations(2).unwrap();

        assert_eq!(outbreak.cases().level_sizes(), vec![1, 3, 9]);
    }

    #[test]
    fn mean_offspring() {
        let mut offspring = [2., 0., 4.].into_iter().cycle();
        let mut outbreak = Outbreak::new(FnParameters::new(
            move || offspring.next().unwrap_or(0.),
            || 1.,
        ));
        assert_eq!(outbreak.cases().mean_offspring(), None);

        outbreak.spread_generations(2).unwrap();

        // index: 2, children: 0 and 4
        assert_eq!(outbreak.cases().mean_offspring(), Some(2.));
    }

    #[test]
    fn onset_range() {
        let mut delays = [3., 1., 2.].into_iter();
        let mut outbreak = Outbreak::new(FnParameters::new(
            || 3.,
            move || delays.next().unwrap_or(0.),
        ));
        assert_eq!(outbreak.cases().onset_range(), Some((0., 0.)));

        outbreak.spread_generations(1).unwrap();

        assert_eq!(outbreak.cases().onset_range(), Some((0., 3.)));
        assert_eq!(Vec::<CaseRef>::new().onset_range(), None);
    }
}
