//! Case representation and transmission
//!
//! A `Case` represents a single infected individual as a node of the
//! transmission tree. Each case holds strong references to the secondary
//! cases it caused and a weak reference back to its donor, so the tree is
//! owned from the index case downwards and dropped together with it.
//!
//! Cases only ever gain children: a case is created fully initialized during
//! transmission and attached to its donor afterwards.

use std::cell::Cell;
use std::rc::Rc;

use derivative::Derivative;
use derive_more::{Display, From, Into};

use crate::errors::{OutbreakError, Result};
use crate::providers::EpiParameters;
use crate::references::{CaseRef, CaseWeak};

/// Identifier of a case within an outbreak.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
#[display("case {_0}")]
pub struct CaseKey(usize);

/// Counter shared by all cases of one tree, so keys stay unique across every
/// outbreak that covers a part of the tree.
#[derive(Clone, Debug, Default)]
struct KeySource(Rc<Cell<usize>>);

impl KeySource {
    fn next_key(&self) -> CaseKey {
        let key = self.0.get();
        self.0.set(key + 1);
        CaseKey(key)
    }
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct Case {
    #[derivative(Debug = "ignore")]
    reference: CaseWeak,
    #[derivative(Debug = "ignore")]
    parent: Option<CaseWeak>,
    #[derivative(Debug = "ignore")]
    keys: KeySource,
    onset: f64,
    level: usize,
    key: Option<CaseKey>,
    transmitted: bool,
    children: Vec<CaseRef>,
}

impl Case {
    /// Create a case with onset `onset` at generation `level`.
    ///
    /// The donor is only referenced, the new case is not added to its
    /// children. It does share the keys of the donor's tree.
    #[allow(clippy::new_ret_no_self)]
    pub fn new(onset: f64, donor: Option<&CaseRef>, level: usize) -> CaseRef {
        let keys = donor.map_or_else(KeySource::default, |donor| donor.borrow().keys.clone());
        Self::with_parent(onset, donor.map(CaseRef::get_weak), level, keys)
    }

    /// Create an index case at onset 0.
    pub fn index() -> CaseRef {
        Self::new(0., None, 0)
    }

    fn with_parent(
        onset: f64,
        parent: Option<CaseWeak>,
        level: usize,
        keys: KeySource,
    ) -> CaseRef {
        CaseRef::new_cyclic(|reference| Self {
            reference: reference.clone(),
            parent,
            keys,
            onset,
            level,
            key: None,
            transmitted: false,
            children: Vec::new(),
        })
    }

    /// Draw secondary infections and attach them as children.
    ///
    /// The number of infections is drawn from `r0` and a delay from
    /// `infectivity` for each of them. All draws are checked before the first
    /// child is attached, so a failing sampler leaves the case untouched.
    /// Calling this twice appends a second batch of children.
    pub fn transmit<P: EpiParameters + ?Sized>(&mut self, parameters: &mut P) -> Result<usize> {
        let n_transmissions = checked_count(parameters.r0())?;
        let delays = (0..n_transmissions)
            .map(|_| checked_delay(parameters.infectivity()))
            .collect::<Result<Vec<f64>>>()?;

        let children: Vec<CaseRef> = delays
            .into_iter()
            .map(|delay| {
                Self::with_parent(
                    self.onset + delay,
                    Some(self.reference.clone()),
                    self.level + 1,
                    self.keys.clone(),
                )
            })
            .collect();

        log::trace!(
            "Case at level {} with onset {} transmitted to {} cases",
            self.level,
            self.onset,
            n_transmissions
        );

        self.children.extend(children);
        self.transmitted = true;
        Ok(n_transmissions)
    }

    pub fn get_onset(&self) -> f64 {
        self.onset
    }

    pub fn get_level(&self) -> usize {
        self.level
    }

    pub fn get_key(&self) -> Option<CaseKey> {
        self.key
    }

    /// Get the donor of this case, if it is still alive.
    pub fn get_parent(&self) -> Option<CaseRef> {
        self.parent.as_ref().and_then(CaseWeak::upgrade)
    }

    pub fn get_children(&self) -> &[CaseRef] {
        &self.children
    }

    /// Whether this case started its tree, i.e. has no donor and sits at
    /// level 0.
    pub fn is_index(&self) -> bool {
        self.parent.is_none() && self.level == 0
    }

    pub fn has_transmitted(&self) -> bool {
        self.transmitted
    }

    /// Return the key of this case, drawing a fresh one for its tree if the
    /// case has none yet.
    pub(super) fn get_or_assign_key(&mut self) -> CaseKey {
        *self.key.get_or_insert_with(|| self.keys.next_key())
    }
}

/// Largest number of secondary infections a single transmission may draw.
const MAX_TRANSMISSIONS: f64 = u32::MAX as f64;

fn checked_count(sample: f64) -> Result<usize> {
    if !(0. ..=MAX_TRANSMISSIONS).contains(&sample) || sample.fract() != 0. {
        return Err(OutbreakError::InvalidTransmissionCount(sample));
    }
    Ok(sample as usize)
}

fn checked_delay(sample: f64) -> Result<f64> {
    if !sample.is_finite() || sample < 0. {
        return Err(OutbreakError::InvalidDelay(sample));
    }
    Ok(sample)
}
