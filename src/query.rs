//! Pre-parsed queries.
//!
//! A [`Query`] names the variables whose joint posterior is requested and the
//! evidence that conditions it. Building a query from text (e.g. `p(Rain | !Storm)`)
//! is left to the caller.

use std::collections::BTreeMap;

/// A posterior query `P(query variables | evidence)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Variables whose distribution is requested.
    pub query_variables: Vec<String>,
    /// Observed variables and their required values.
    pub evidence: BTreeMap<String, bool>,
}

impl Query {
    /// Creates an unconditioned query over the given variables.
    pub fn new<S: Into<String>>(variables: impl IntoIterator<Item = S>) -> Self {
        Self {
            query_variables: variables.into_iter().map(Into::into).collect(),
            evidence: BTreeMap::new(),
        }
    }

    /// Adds the observation `name = value`.
    pub fn given(mut self, name: impl Into<String>, value: bool) -> Self {
        self.evidence.insert(name.into(), value);
        self
    }

    /// Returns the names of the evidence variables.
    pub fn evidence_variables(&self) -> impl Iterator<Item = &str> {
        self.evidence.keys().map(String::as_str)
    }

    /// Returns the required value of an evidence variable, if it is one.
    pub fn evidence_value(&self, name: &str) -> Option<bool> {
        self.evidence.get(name).copied()
    }

    /// Returns true if `name` is a query variable.
    pub fn is_query_variable(&self, name: &str) -> bool {
        self.query_variables.iter().any(|v| v == name)
    }

    /// Returns the number of query variables, i.e. the arity of the result.
    pub fn arity(&self) -> usize {
        self.query_variables.len()
    }
}
