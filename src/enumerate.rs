//! Enumeration of every assignment over `n` boolean variables.
//!
//! The enumerator counts in binary from `0` to `2^n - 1`, interpreting position
//! `0` as the least-significant bit. The sequence for `n = 2` is therefore
//! `FF`, `TF`, `FT`, `TT`.
//!
//! # Example
//!
//! ```
//! use bayes_rs::assignment::Assignment;
//! use bayes_rs::enumerate::AssignmentEnumerator;
//!
//! let all: Vec<Assignment> = AssignmentEnumerator::new(2).collect();
//! assert_eq!(all.len(), 4);
//! assert_eq!(all[1], Assignment::from([true, false]));
//! ```
//!
//! Note: the sequence is exponential in `n`.

use crate::assignment::Assignment;

/// Lazy iterator over all `2^n` assignments of arity `n`, in ascending index order.
#[derive(Debug, Clone)]
pub struct AssignmentEnumerator {
    arity: usize,
    next: u64,
    end: u64,
}

impl AssignmentEnumerator {
    /// Creates an enumerator over assignments of the given arity.
    ///
    /// # Panics
    ///
    /// Panics if `arity > Assignment::MAX_ARITY`.
    pub fn new(arity: usize) -> Self {
        assert!(
            arity <= Assignment::MAX_ARITY,
            "Cannot enumerate arity {} (maximum is {})",
            arity,
            Assignment::MAX_ARITY
        );
        Self {
            arity,
            next: 0,
            end: 1u64 << arity,
        }
    }

    /// Returns the arity of the enumerated assignments.
    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl Iterator for AssignmentEnumerator {
    type Item = Assignment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let a = Assignment::from_index(self.arity, self.next);
        self.next += 1;
        Some(a)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AssignmentEnumerator {}

impl Assignment {
    /// Returns an enumerator over all assignments of the given arity.
    pub fn all(arity: usize) -> AssignmentEnumerator {
        AssignmentEnumerator::new(arity)
    }
}
