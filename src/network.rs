//! Bayesian networks and approximate inference by sampling.
//!
//! A [`BayesianNetwork`] is an ordered list of [`Node`]s in which every node
//! comes after all of its parents. Three estimators of a posterior
//! `P(query | evidence)` are provided:
//!
//! - [prior sampling][BayesianNetwork::prior_sample] draws every node from its CPT
//!   and ignores the evidence, yielding the marginal over the query variables;
//! - [rejection sampling][BayesianNetwork::rejection_sample] draws every node and
//!   keeps only the trials that agree with the evidence;
//! - [likelihood weighting][BayesianNetwork::likelihood_weighting] pins evidence
//!   nodes to their observed values and weights each trial by the probability of
//!   the pinned values given their parents.
//!
//! Each estimator returns a normalized [`WeightedSet`] over the query variables.
//! If no trial contributes any weight (zero samples, or evidence that is never
//! observed) the result is all-zero.
//!
//! # Result bit order
//!
//! Position `i` of a result assignment is the `i`-th query variable **in network
//! order**, not in the order the variables were listed in the [`Query`].
//!
//! # Example
//!
//! ```
//! use bayes_rs::assignment::Assignment;
//! use bayes_rs::network::BayesianNetwork;
//! use bayes_rs::node::NodeDescriptor;
//! use bayes_rs::query::Query;
//! use rand::SeedableRng;
//!
//! let net = BayesianNetwork::new(vec![
//!     NodeDescriptor::root("Storm", 0.7),
//!     NodeDescriptor::with_probabilities("Rain", ["Storm"], &[0.3, 0.7]).unwrap(),
//! ])
//! .unwrap();
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let q = Query::new(["Rain"]).given("Storm", false);
//! let res = net.likelihood_weighting(&q, 10_000, &mut rng).unwrap();
//! let p = res.weight(&Assignment::from([true])).unwrap();
//! assert!((p - 0.3).abs() < 0.03);
//! ```

use std::collections::HashMap;
use std::fmt;

use log::debug;
use rand::Rng;

use crate::assignment::Assignment;
use crate::error::{Error, Result};
use crate::node::{Node, NodeDescriptor, Trial};
use crate::query::Query;
use crate::weighted::WeightedSet;

/// Sampling estimator used by [`BayesianNetwork::query`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Algorithm {
    Prior,
    Rejection,
    LikelihoodWeighting,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Prior, Algorithm::Rejection, Algorithm::LikelihoodWeighting];
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Prior => write!(f, "prior"),
            Algorithm::Rejection => write!(f, "rejection"),
            Algorithm::LikelihoodWeighting => write!(f, "likelihood-weighting"),
        }
    }
}

/// What a node contributes to a trial under a given query.
#[derive(Debug, Copy, Clone, Default)]
struct Role {
    /// Number of times the node is listed among the query variables.
    query_hits: usize,
    /// Observed value, if the node is an evidence variable.
    evidence: Option<bool>,
}

/// A query resolved against the node positions of a network.
#[derive(Debug)]
struct Plan {
    roles: Vec<Role>,
    arity: usize,
}

impl Plan {
    /// Writes `value` into the next `hits` result positions starting at `*slot`.
    #[inline]
    fn record(result: &mut Assignment, slot: &mut usize, hits: usize, value: bool) {
        for _ in 0..hits {
            result.set(*slot, value);
            *slot += 1;
        }
    }
}

/// A Bayesian network of boolean random variables, stored in topological order.
#[derive(Debug, Clone)]
pub struct BayesianNetwork {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

impl BayesianNetwork {
    /// Builds a network from node descriptors listed in topological order.
    ///
    /// Fails if a name is repeated, a parent is unknown or listed after its
    /// child, or a CPT is malformed.
    pub fn new(descriptors: Vec<NodeDescriptor>) -> Result<Self> {
        let mut index: HashMap<String, usize> = HashMap::with_capacity(descriptors.len());
        let mut nodes = Vec::with_capacity(descriptors.len());

        for (i, d) in descriptors.iter().enumerate() {
            if index.contains_key(&d.name) {
                return Err(Error::DuplicateNode(d.name.clone()));
            }

            let mut parents = Vec::with_capacity(d.parents.len());
            for p in &d.parents {
                match index.get(p) {
                    Some(&j) => parents.push(j),
                    None if descriptors[i..].iter().any(|later| &later.name == p) => {
                        return Err(Error::NotTopological {
                            node: d.name.clone(),
                            parent: p.clone(),
                        });
                    }
                    None => return Err(Error::UnknownNode(p.clone())),
                }
            }

            debug!("new: node {} = {} with parents {:?}", i, d.name, d.parents);
            nodes.push(Node::new(i, d.name.clone(), parents, d.cpt.clone())?);
            index.insert(d.name.clone(), i);
        }

        Ok(Self { nodes, index })
    }

    /// Returns the nodes in topological order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the node with the given name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.index.get(name).map(|&i| &self.nodes[i])
    }

    /// Returns the position of the node with the given name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Creates fresh bindings for one trial over this network.
    pub fn new_trial(&self) -> Trial {
        Trial::new(self.nodes.len())
    }

    fn plan(&self, q: &Query) -> Result<Plan> {
        let mut roles = vec![Role::default(); self.nodes.len()];
        for v in &q.query_variables {
            let i = self.index_of(v).ok_or_else(|| Error::UnknownNode(v.clone()))?;
            roles[i].query_hits += 1;
        }
        for (v, &value) in &q.evidence {
            let i = self.index_of(v).ok_or_else(|| Error::UnknownNode(v.clone()))?;
            roles[i].evidence = Some(value);
        }
        Ok(Plan {
            roles,
            arity: q.query_variables.len(),
        })
    }

    /// Samples every node once. Returns the query assignment and whether the trial agrees with the evidence.
    fn sample_all<R: Rng + ?Sized>(&self, plan: &Plan, trial: &mut Trial, rng: &mut R) -> Result<(Assignment, bool)> {
        let mut result = Assignment::new(plan.arity);
        let mut slot = 0;
        let mut consistent = true;
        for (node, role) in self.nodes.iter().zip(&plan.roles) {
            let value = node.sample(trial, rng)?;
            if let Some(observed) = role.evidence {
                if value != observed {
                    consistent = false;
                }
            }
            Plan::record(&mut result, &mut slot, role.query_hits, value);
        }
        Ok((result, consistent))
    }

    /// Samples non-evidence nodes and pins evidence nodes. Returns the query assignment and the trial weight.
    fn sample_weighted<R: Rng + ?Sized>(&self, plan: &Plan, trial: &mut Trial, rng: &mut R) -> Result<(Assignment, f64)> {
        let mut result = Assignment::new(plan.arity);
        let mut slot = 0;
        let mut weight = 1.0;
        for (node, role) in self.nodes.iter().zip(&plan.roles) {
            let value = match role.evidence {
                Some(observed) => {
                    let p = node.probability(trial)?;
                    weight *= if observed { p } else { 1.0 - p };
                    node.set_value(trial, observed);
                    observed
                }
                None => node.sample(trial, rng)?,
            };
            Plan::record(&mut result, &mut slot, role.query_hits, value);
        }
        Ok((result, weight))
    }

    /// Runs a single prior-sampling trial and returns the sampled query assignment.
    pub fn prior_trial<R: Rng + ?Sized>(&self, q: &Query, rng: &mut R) -> Result<Assignment> {
        let plan = self.plan(q)?;
        let mut trial = self.new_trial();
        let (result, _) = self.sample_all(&plan, &mut trial, rng)?;
        Ok(result)
    }

    /// Runs a single likelihood-weighting trial and returns the query assignment with its weight.
    pub fn weighted_trial<R: Rng + ?Sized>(&self, q: &Query, rng: &mut R) -> Result<(Assignment, f64)> {
        let plan = self.plan(q)?;
        let mut trial = self.new_trial();
        self.sample_weighted(&plan, &mut trial, rng)
    }

    /// Estimates the marginal over the query variables by sampling the whole network.
    ///
    /// Evidence in `q` is ignored.
    pub fn prior_sample<R: Rng + ?Sized>(&self, q: &Query, num_samples: usize, rng: &mut R) -> Result<WeightedSet> {
        debug!("prior_sample(query = {:?}, samples = {})", q.query_variables, num_samples);
        for node in &self.nodes {
            debug!("{}", node);
        }

        let plan = self.plan(q)?;
        let mut results = WeightedSet::new(plan.arity);
        let mut trial = self.new_trial();
        for _ in 0..num_samples {
            let (result, _) = self.sample_all(&plan, &mut trial, rng)?;
            results.increment(&result, 1.0)?;
        }

        Self::finish("prior_sample", results)
    }

    /// Estimates `P(query | evidence)` by discarding trials that disagree with the evidence.
    pub fn rejection_sample<R: Rng + ?Sized>(&self, q: &Query, num_samples: usize, rng: &mut R) -> Result<WeightedSet> {
        debug!(
            "rejection_sample(query = {:?}, evidence = {:?}, samples = {})",
            q.query_variables, q.evidence, num_samples
        );

        let plan = self.plan(q)?;
        let mut results = WeightedSet::new(plan.arity);
        let mut trial = self.new_trial();
        let mut accepted = 0usize;
        for _ in 0..num_samples {
            let (result, consistent) = self.sample_all(&plan, &mut trial, rng)?;
            if consistent {
                results.increment(&result, 1.0)?;
                accepted += 1;
            }
        }
        debug!("rejection_sample: accepted {} of {} trials", accepted, num_samples);

        Self::finish("rejection_sample", results)
    }

    /// Estimates `P(query | evidence)` by pinning evidence and weighting each trial by its likelihood.
    pub fn likelihood_weighting<R: Rng + ?Sized>(&self, q: &Query, num_samples: usize, rng: &mut R) -> Result<WeightedSet> {
        debug!(
            "likelihood_weighting(query = {:?}, evidence = {:?}, samples = {})",
            q.query_variables, q.evidence, num_samples
        );

        let plan = self.plan(q)?;
        let mut results = WeightedSet::new(plan.arity);
        let mut trial = self.new_trial();
        for _ in 0..num_samples {
            let (result, weight) = self.sample_weighted(&plan, &mut trial, rng)?;
            results.increment(&result, weight)?;
        }
        debug!("likelihood_weighting: total weight {}", results.total());

        Self::finish("likelihood_weighting", results)
    }

    /// Runs the given estimator.
    pub fn query<R: Rng + ?Sized>(&self, q: &Query, algorithm: Algorithm, num_samples: usize, rng: &mut R) -> Result<WeightedSet> {
        match algorithm {
            Algorithm::Prior => self.prior_sample(q, num_samples, rng),
            Algorithm::Rejection => self.rejection_sample(q, num_samples, rng),
            Algorithm::LikelihoodWeighting => self.likelihood_weighting(q, num_samples, rng),
        }
    }

    fn finish(name: &str, mut results: WeightedSet) -> Result<WeightedSet> {
        if !results.normalize() {
            debug!("{}: no weight accumulated, result is all-zero", name);
        }
        Ok(results)
    }
}
