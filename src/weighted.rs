//! Weighted sets: a real-valued weight for every assignment of fixed arity.
//!
//! A [`WeightedSet`] of arity `n` maps each of the `2^n` assignments over `n`
//! boolean variables to a weight. Depending on the usage, the weight is
//!
//! - a tally (prior and rejection sampling),
//! - an accumulated likelihood weight (likelihood weighting),
//! - a probability (a CPT, or any set after [`normalize`][WeightedSet::normalize]).
//!
//! The domain is fixed at construction: every assignment starts at `0.0` and no
//! entry is ever added or removed. Lookups with an assignment of another arity
//! fail with [`Error::ArityMismatch`].

use std::fmt;

use crate::assignment::Assignment;
use crate::enumerate::AssignmentEnumerator;
use crate::error::{Error, Result};

/// A weight for each of the `2^n` assignments of arity `n`.
///
/// Weights are stored densely, indexed by [`Assignment::index`].
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedSet {
    arity: usize,
    weights: Vec<f64>,
}

impl WeightedSet {
    /// Creates a set containing every assignment of arity `n`, all with weight `0.0`.
    ///
    /// # Panics
    ///
    /// Panics if `n > Assignment::MAX_ARITY`.
    pub fn new(n: usize) -> Self {
        let domain = AssignmentEnumerator::new(n);
        Self {
            arity: n,
            weights: vec![0.0; domain.len()],
        }
    }

    /// Returns the arity of the assignments in the domain.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Returns the number of entries, always `2^arity`.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always false: even arity `0` has one (empty) assignment.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Resolves an assignment to its slot, failing if it is foreign to the domain.
    fn slot(&self, event: &Assignment) -> Result<usize> {
        if event.arity() != self.arity {
            return Err(Error::ArityMismatch {
                expected: self.arity,
                found: event.arity(),
            });
        }
        Ok(event.index() as usize)
    }

    /// Sets the weight of `event`, overwriting the previous weight.
    pub fn add_event(&mut self, event: &Assignment, weight: f64) -> Result<()> {
        let slot = self.slot(event)?;
        self.weights[slot] = weight;
        Ok(())
    }

    /// Adds `amount` to the weight of `event`.
    pub fn increment(&mut self, event: &Assignment, amount: f64) -> Result<()> {
        let slot = self.slot(event)?;
        self.weights[slot] += amount;
        Ok(())
    }

    /// Returns the weight of `event`.
    pub fn weight(&self, event: &Assignment) -> Result<f64> {
        let slot = self.slot(event)?;
        Ok(self.weights[slot])
    }

    /// Returns the sum of all weights.
    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Returns true if every weight is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.weights.iter().all(|&w| w == 0.0)
    }

    /// Rescales the weights so they sum to one.
    ///
    /// If the weights sum to zero the set is left unchanged and `false` is returned.
    pub fn normalize(&mut self) -> bool {
        let sum = self.total();
        if sum > 0.0 {
            for w in &mut self.weights {
                *w /= sum;
            }
            true
        } else {
            false
        }
    }

    /// Returns every assignment in the domain, in canonical order.
    pub fn events(&self) -> AssignmentEnumerator {
        AssignmentEnumerator::new(self.arity)
    }

    /// Returns `(assignment, weight)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Assignment, f64)> + '_ {
        self.events().zip(self.weights.iter().copied())
    }

    /// Returns the raw weights, indexed by [`Assignment::index`].
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub(crate) fn weights_mut(&mut self) -> &mut [f64] {
        &mut self.weights
    }
}

impl fmt::Display for WeightedSet {
    /// One `assignment --> weight` line per entry.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (event, weight) in self.iter() {
            writeln!(f, "{} --> {}", event, weight)?;
        }
        Ok(())
    }
}
