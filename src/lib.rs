//! # bayes-rs: Approximate Inference in Bayesian Networks
//!
//! **`bayes-rs`** estimates posterior distributions in **Bayesian networks of boolean
//! random variables** by sampling.
//!
//! ## What is a Bayesian network?
//!
//! A Bayesian network is a directed acyclic graph in which each node is a random
//! variable and each node carries a **conditional probability table (CPT)** giving
//! `P(node = true | parents)` for every configuration of its parents. The joint
//! distribution factorizes as the product of these local tables.
//!
//! ## Key Features
//!
//! - **Three estimators**: prior (direct) sampling, rejection sampling and likelihood weighting,
//!   all behind [`BayesianNetwork`][crate::network::BayesianNetwork].
//! - **Explicit randomness**: every sampling call takes a `&mut impl Rng`, so seeded runs are reproducible.
//! - **Shareable networks**: nodes are immutable; the values of one sampling pass live in a
//!   [`Trial`][crate::node::Trial], indexed by node position.
//! - **Validated construction**: duplicate names, unknown or out-of-order parents and
//!   malformed CPTs are rejected up front.
//!
//! ## Basic Usage
//!
//! ```rust
//! use bayes_rs::assignment::Assignment;
//! use bayes_rs::network::BayesianNetwork;
//! use bayes_rs::node::NodeDescriptor;
//! use bayes_rs::query::Query;
//! use rand::SeedableRng;
//!
//! // 1. Describe the nodes in topological order
//! let net = BayesianNetwork::new(vec![
//!     NodeDescriptor::root("Storm", 0.7),
//!     // P(Rain | Storm=F) = 0.3, P(Rain | Storm=T) = 0.7
//!     NodeDescriptor::with_probabilities("Rain", ["Storm"], &[0.3, 0.7]).unwrap(),
//! ])
//! .unwrap();
//!
//! // 2. Ask p(Storm)
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let res = net.prior_sample(&Query::new(["Storm"]), 10_000, &mut rng).unwrap();
//!
//! // 3. Read the estimate
//! let p = res.weight(&Assignment::from([true])).unwrap();
//! assert!((p - 0.7).abs() < 0.02);
//! ```
//!
//! ## Core Components
//!
//! - **[`assignment`]**: fixed-arity boolean vectors used as table keys and trial bindings.
//! - **[`enumerate`]**: enumeration of all `2^n` assignments in binary-counting order.
//! - **[`weighted`]**: [`WeightedSet`][crate::weighted::WeightedSet], the table behind CPTs and results.
//! - **[`node`]**: boolean random variables and CPT lookup.
//! - **[`network`]**: the network and the three estimators.
//!
//! Parsing textual queries such as `p(Rain | !Storm)` is not part of this crate;
//! callers build a [`Query`][crate::query::Query] directly.

pub mod assignment;
pub mod enumerate;
pub mod error;
pub mod network;
pub mod node;
pub mod query;
pub mod weighted;
