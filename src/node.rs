//! Boolean random variables and their conditional probability tables.
//!
//! A [`Node`] owns a CPT stored as a [`WeightedSet`] of arity `parents + 1`.
//! Position `i < parents` of a CPT row holds the value of the `i`-th parent and
//! the last position holds the value of the node itself. To obtain
//! `P(node = true | parents)` the node looks up the row whose parent positions
//! match the current parent values and whose last position is `true`.
//!
//! Both halves of the table are stored. A valid CPT has, for every parent
//! configuration, a `true` row and a `false` row that are probabilities summing
//! to one; this is checked when the network is built.
//!
//! Nodes do not hold a sampled value. Values of all nodes in one trial live in a
//! [`Trial`], indexed by node position, so a network can be shared between
//! independent trials.

use std::fmt;

use rand::Rng;

use crate::assignment::Assignment;
use crate::error::{Error, Result};
use crate::weighted::WeightedSet;

/// Tolerance for the `P(true) + P(false) = 1` check on CPT rows.
pub const CPT_TOLERANCE: f64 = 1e-9;

/// Caller-side description of a node: parents are referenced by name.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDescriptor {
    pub name: String,
    pub parents: Vec<String>,
    pub cpt: WeightedSet,
}

impl NodeDescriptor {
    /// Creates a descriptor from a fully populated CPT of arity `parents.len() + 1`.
    pub fn new<S: Into<String>>(name: impl Into<String>, parents: impl IntoIterator<Item = S>, cpt: WeightedSet) -> Self {
        Self {
            name: name.into(),
            parents: parents.into_iter().map(Into::into).collect(),
            cpt,
        }
    }

    /// Creates a root node with prior `P(true) = p`.
    pub fn root(name: impl Into<String>, p: f64) -> Self {
        let mut cpt = WeightedSet::new(1);
        cpt.weights_mut()[0] = 1.0 - p;
        cpt.weights_mut()[1] = p;
        Self {
            name: name.into(),
            parents: Vec::new(),
            cpt,
        }
    }

    /// Creates a node from `P(true | parent row)` for each parent configuration.
    ///
    /// `probabilities[r]` is used for the parent assignment with canonical index `r`,
    /// i.e. the `r`-th assignment produced by
    /// [`AssignmentEnumerator`][crate::enumerate::AssignmentEnumerator] over the parents.
    /// Both the `true` and the `false` rows are filled in.
    pub fn with_probabilities<S: Into<String>>(
        name: impl Into<String>,
        parents: impl IntoIterator<Item = S>,
        probabilities: &[f64],
    ) -> Result<Self> {
        let name = name.into();
        let parents: Vec<String> = parents.into_iter().map(Into::into).collect();
        let k = parents.len();
        if k >= Assignment::MAX_ARITY {
            return Err(Error::TooManyParents {
                node: name,
                count: k,
                max: Assignment::MAX_ARITY - 1,
            });
        }
        let expected = 1usize << k;
        if probabilities.len() != expected {
            return Err(Error::RowCount {
                node: name,
                expected,
                found: probabilities.len(),
            });
        }

        let mut cpt = WeightedSet::new(k + 1);
        let weights = cpt.weights_mut();
        for (row, &p) in probabilities.iter().enumerate() {
            weights[row] = 1.0 - p;
            weights[row | expected] = p;
        }

        Ok(Self { name, parents, cpt })
    }
}

/// Values of every node during one sampling pass, indexed by node position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trial {
    values: Assignment,
}

impl Trial {
    /// Creates bindings for `n` nodes, all `false`.
    pub fn new(n: usize) -> Self {
        Self {
            values: Assignment::new(n),
        }
    }

    /// Returns the value of the node at `index`.
    #[inline]
    pub fn value(&self, index: usize) -> bool {
        self.values.get(index)
    }

    /// Pins the node at `index` to `value`.
    #[inline]
    pub fn set_value(&mut self, index: usize, value: bool) {
        self.values.set(index, value);
    }

    /// Returns all values as an assignment in network order.
    pub fn values(&self) -> &Assignment {
        &self.values
    }
}

/// A boolean random variable in a network.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    index: usize,
    parents: Vec<usize>,
    cpt: WeightedSet,
}

impl Node {
    /// Builds a node at position `index` with resolved parent positions, validating its CPT.
    pub(crate) fn new(index: usize, name: String, parents: Vec<usize>, cpt: WeightedSet) -> Result<Self> {
        let node = Self {
            name,
            index,
            parents,
            cpt,
        };
        node.check_cpt()?;
        Ok(node)
    }

    fn check_cpt(&self) -> Result<()> {
        let k = self.parents.len();
        if self.cpt.arity() != k + 1 {
            return Err(Error::CptArity {
                node: self.name.clone(),
                expected: k + 1,
                found: self.cpt.arity(),
            });
        }

        let half = 1usize << k;
        let weights = self.cpt.weights();
        for row in 0..half {
            let p_false = weights[row];
            let p_true = weights[row | half];
            for (slot, p) in [(row, p_false), (row | half, p_true)] {
                if !(0.0..=1.0).contains(&p) {
                    return Err(Error::InvalidProbability {
                        node: self.name.clone(),
                        row: Assignment::from_index(k + 1, slot as u64).to_string(),
                        value: p,
                    });
                }
            }
            let sum = p_false + p_true;
            if (sum - 1.0).abs() > CPT_TOLERANCE {
                return Err(Error::InconsistentCpt {
                    node: self.name.clone(),
                    row: format!("[{}]", Assignment::from_index(k, row as u64)),
                    sum,
                });
            }
        }
        Ok(())
    }

    /// Returns the name of the variable.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the position of the node in its network.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the positions of the parents, in CPT order.
    pub fn parents(&self) -> &[usize] {
        &self.parents
    }

    /// Returns true if the node has no parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns the conditional probability table.
    pub fn cpt(&self) -> &WeightedSet {
        &self.cpt
    }

    /// Returns the value of this node in `trial`.
    pub fn value(&self, trial: &Trial) -> bool {
        trial.value(self.index)
    }

    /// Forces the value of this node in `trial` without sampling.
    pub fn set_value(&self, trial: &mut Trial, value: bool) {
        trial.set_value(self.index, value);
    }

    /// Returns `P(self = true | parent values in trial)`.
    ///
    /// For a root node this is the stored prior.
    pub fn probability(&self, trial: &Trial) -> Result<f64> {
        let k = self.parents.len();
        let mut row = Assignment::new(k + 1);
        for (i, &parent) in self.parents.iter().enumerate() {
            row.set(i, trial.value(parent));
        }
        row.set(k, true);
        self.cpt.weight(&row)
    }

    /// Samples a value given the parent values in `trial`, stores it in `trial` and returns it.
    ///
    /// Draws `r` uniformly from `[0, 1)` and yields `true` iff `r <= P(true | parents)`.
    /// Every parent must already have a value for this trial.
    pub fn sample<R: Rng + ?Sized>(&self, trial: &mut Trial, rng: &mut R) -> Result<bool> {
        let r: f64 = rng.random();
        let value = r <= self.probability(trial)?;
        trial.set_value(self.index, value);
        Ok(value)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        write!(f, "cpt:\n{}", self.cpt)
    }
}

/// An RNG whose every draw is zero, so `random::<f64>()` yields exactly `0.0`.
#[cfg(test)]
pub(crate) struct ZeroRng;

#[cfg(test)]
impl rand::RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use test_log::test;

    fn storm() -> Node {
        let d = NodeDescriptor::root("Storm", 0.7);
        Node::new(0, d.name, vec![], d.cpt).unwrap()
    }

    fn rain() -> Node {
        // P(Rain | Storm=F) = 0.3, P(Rain | Storm=T) = 0.7
        let d = NodeDescriptor::with_probabilities("Rain", ["Storm"], &[0.3, 0.7]).unwrap();
        Node::new(1, d.name, vec![0], d.cpt).unwrap()
    }

    #[test]
    fn test_root_probability_is_prior() {
        let node = storm();
        let mut trial = Trial::new(2);
        assert_eq!(node.probability(&trial).unwrap(), 0.7);
        trial.set_value(1, true);
        trial.set_value(0, true);
        assert_eq!(node.probability(&trial).unwrap(), 0.7);
    }

    #[test]
    fn test_child_probability_follows_parent() {
        let node = rain();
        let mut trial = Trial::new(2);
        assert_eq!(node.probability(&trial).unwrap(), 0.3);
        trial.set_value(0, true);
        assert_eq!(node.probability(&trial).unwrap(), 0.7);
    }

    #[test]
    fn test_sample_threshold_is_inclusive() {
        // r = 0.0, so even P = 0.0 samples true.
        let d = NodeDescriptor::root("Never", 0.0);
        let node = Node::new(0, d.name, vec![], d.cpt).unwrap();
        let mut trial = Trial::new(1);
        let mut rng = ZeroRng;
        assert!(node.sample(&mut trial, &mut rng).unwrap());
        assert!(node.value(&trial));
    }

    #[test]
    fn test_sample_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let d = NodeDescriptor::root("Always", 1.0);
        let always = Node::new(0, d.name, vec![], d.cpt).unwrap();
        let mut trial = Trial::new(1);
        for _ in 0..1000 {
            assert!(always.sample(&mut trial, &mut rng).unwrap());
        }
    }

    #[test]
    fn test_set_value_pins() {
        let node = rain();
        let mut trial = Trial::new(2);
        node.set_value(&mut trial, true);
        assert!(node.value(&trial));
        assert_eq!(trial.values(), &Assignment::from([false, true]));
    }

    #[test]
    fn test_with_probabilities_fills_both_halves() {
        let d = NodeDescriptor::with_probabilities("Rain", ["Storm"], &[0.25, 0.75]).unwrap();
        let cpt = &d.cpt;
        assert_eq!(cpt.weight(&Assignment::from([false, true])).unwrap(), 0.25);
        assert_eq!(cpt.weight(&Assignment::from([false, false])).unwrap(), 0.75);
        assert_eq!(cpt.weight(&Assignment::from([true, true])).unwrap(), 0.75);
        assert_eq!(cpt.weight(&Assignment::from([true, false])).unwrap(), 0.25);
    }

    #[test]
    fn test_with_probabilities_row_count() {
        let err = NodeDescriptor::with_probabilities("X", ["A", "B"], &[0.1, 0.2]).unwrap_err();
        assert_eq!(
            err,
            Error::RowCount {
                node: "X".to_string(),
                expected: 4,
                found: 2
            }
        );
    }

    #[test]
    fn test_with_probabilities_too_many_parents() {
        let parents: Vec<String> = (0..64).map(|i| format!("P{}", i)).collect();
        let err = NodeDescriptor::with_probabilities("X", parents, &[0.5]).unwrap_err();
        assert_eq!(
            err,
            Error::TooManyParents {
                node: "X".to_string(),
                count: 64,
                max: 62
            }
        );

        let parents: Vec<String> = (0..63).map(|i| format!("P{}", i)).collect();
        let err = NodeDescriptor::with_probabilities("X", parents, &[0.5]).unwrap_err();
        assert!(matches!(err, Error::TooManyParents { count: 63, .. }));
    }

    #[test]
    fn test_cpt_arity_checked() {
        let err = Node::new(0, "X".to_string(), vec![], WeightedSet::new(2)).unwrap_err();
        assert!(matches!(err, Error::CptArity { expected: 1, found: 2, .. }));
    }

    #[test]
    fn test_inconsistent_cpt_rejected() {
        let mut cpt = WeightedSet::new(1);
        cpt.add_event(&Assignment::from([true]), 0.7).unwrap();
        let err = Node::new(0, "X".to_string(), vec![], cpt).unwrap_err();
        assert!(matches!(err, Error::InconsistentCpt { .. }));
    }

    #[test]
    fn test_invalid_probability_rejected() {
        let mut cpt = WeightedSet::new(1);
        cpt.add_event(&Assignment::from([true]), 1.5).unwrap();
        cpt.add_event(&Assignment::from([false]), -0.5).unwrap();
        let err = Node::new(0, "X".to_string(), vec![], cpt).unwrap_err();
        assert!(matches!(err, Error::InvalidProbability { .. }));
    }

    #[test]
    fn test_display() {
        let s = storm().to_string();
        assert!(s.starts_with("Storm\ncpt:\n"));
        assert!(s.contains("T --> 0.7"));
    }
}
