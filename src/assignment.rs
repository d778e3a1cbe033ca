//! Fixed-arity boolean vectors.
//!
//! An [`Assignment`] holds one boolean value per variable in some ordered set
//! of variables. The same type serves as a CPT row key, a query result key,
//! and the per-trial bindings of a whole network.
//!
//! Bits are packed into `u64` words. Position `0` is the least-significant bit
//! of the canonical [index][Assignment::index], which is the order used by
//! [`AssignmentEnumerator`][crate::enumerate::AssignmentEnumerator] and by every
//! table lookup in this crate.

use std::fmt;

/// A fixed-length ordered sequence of boolean values.
///
/// Equality and hashing are structural: two assignments of the same arity with
/// identical bits are interchangeable as map keys.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Assignment {
    /// Storage: each u64 holds 64 bits
    words: Vec<u64>,
    /// Number of variables (fixed at creation)
    arity: usize,
}

impl Assignment {
    /// Number of bits per word.
    const BITS_PER_WORD: usize = 64;

    /// Largest arity whose full domain can be enumerated (`2^arity` must fit in a `u64`).
    pub const MAX_ARITY: usize = 63;

    /// Creates an all-false assignment over `arity` variables.
    pub fn new(arity: usize) -> Self {
        let num_words = (arity + Self::BITS_PER_WORD - 1) / Self::BITS_PER_WORD;
        Self {
            words: vec![0; num_words],
            arity,
        }
    }

    /// Creates an assignment from a slice of booleans, position `i` taking `bits[i]`.
    pub fn from_bits(bits: &[bool]) -> Self {
        let mut a = Self::new(bits.len());
        for (i, &b) in bits.iter().enumerate() {
            a.set(i, b);
        }
        a
    }

    /// Creates the assignment whose canonical index is `index`.
    ///
    /// # Panics
    ///
    /// Panics if `arity > MAX_ARITY` or `index >= 2^arity`.
    pub fn from_index(arity: usize, index: u64) -> Self {
        assert!(arity <= Self::MAX_ARITY, "Arity {} exceeds maximum {}", arity, Self::MAX_ARITY);
        assert!(index < (1u64 << arity), "Index {} out of range for arity {}", index, arity);
        let mut a = Self::new(arity);
        if arity > 0 {
            a.words[0] = index;
        }
        a
    }

    /// Returns the number of variables.
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Returns true if the assignment has no variables.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arity == 0
    }

    /// Returns the canonical index: `sum(bit_i * 2^i)`.
    ///
    /// # Panics
    ///
    /// Panics if `arity > MAX_ARITY`.
    pub fn index(&self) -> u64 {
        assert!(self.arity <= Self::MAX_ARITY, "Arity {} exceeds maximum {}", self.arity, Self::MAX_ARITY);
        self.words.first().copied().unwrap_or(0)
    }

    /// Gets the word index and bit position for a given bit index.
    #[inline]
    fn word_and_bit(index: usize) -> (usize, usize) {
        let word = index / Self::BITS_PER_WORD;
        let bit = index % Self::BITS_PER_WORD;
        (word, bit)
    }

    /// Returns the value at position `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= arity`.
    #[inline]
    pub fn get(&self, i: usize) -> bool {
        assert!(i < self.arity, "Position {} out of bounds for arity {}", i, self.arity);
        let (word_idx, bit_idx) = Self::word_and_bit(i);
        (self.words[word_idx] >> bit_idx) & 1 != 0
    }

    /// Sets the value at position `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= arity`.
    #[inline]
    pub fn set(&mut self, i: usize, value: bool) {
        assert!(i < self.arity, "Position {} out of bounds for arity {}", i, self.arity);
        let (word_idx, bit_idx) = Self::word_and_bit(i);
        let mask = 1u64 << bit_idx;
        if value {
            self.words[word_idx] |= mask;
        } else {
            self.words[word_idx] &= !mask;
        }
    }

    /// Resets every position to false.
    pub fn clear(&mut self) {
        for word in &mut self.words {
            *word = 0;
        }
    }

    /// Returns the number of positions set to true.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns an iterator over the values, position `0` first.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.arity).map(move |i| self.get(i))
    }
}

impl From<&[bool]> for Assignment {
    fn from(bits: &[bool]) -> Self {
        Self::from_bits(bits)
    }
}

impl<const N: usize> From<[bool; N]> for Assignment {
    fn from(bits: [bool; N]) -> Self {
        Self::from_bits(&bits)
    }
}

impl fmt::Display for Assignment {
    /// Renders the bits in order as `T`/`F`, e.g. `TFT`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.iter() {
            f.write_str(if b { "T" } else { "F" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    use test_log::test;

    #[test]
    fn test_new_is_all_false() {
        let a = Assignment::new(5);
        assert_eq!(a.arity(), 5);
        assert!((0..5).all(|i| !a.get(i)));
        assert_eq!(a.count_ones(), 0);
    }

    #[test]
    fn test_set_get() {
        let mut a = Assignment::new(3);
        a.set(1, true);
        assert!(!a.get(0));
        assert!(a.get(1));
        assert!(!a.get(2));
        a.set(1, false);
        assert!(!a.get(1));
    }

    #[test]
    fn test_multi_word() {
        let mut a = Assignment::new(130);
        a.set(0, true);
        a.set(64, true);
        a.set(129, true);
        assert_eq!(a.count_ones(), 3);
        assert!(a.get(64));
        assert!(!a.get(65));
        assert!(a.get(129));
    }

    #[test]
    fn test_index_roundtrip() {
        let a = Assignment::from_bits(&[true, false, true]);
        assert_eq!(a.index(), 0b101);
        assert_eq!(Assignment::from_index(3, 0b101), a);
    }

    #[test]
    fn test_structural_equality() {
        let mut a = Assignment::new(2);
        a.set(0, true);
        let b = Assignment::from([true, false]);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_different_arity_not_equal() {
        assert_ne!(Assignment::new(2), Assignment::new(3));
    }

    #[test]
    fn test_display() {
        let a = Assignment::from([true, false, false, true]);
        assert_eq!(a.to_string(), "TFFT");
        assert_eq!(Assignment::new(0).to_string(), "");
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_out_of_bounds_panics() {
        Assignment::new(2).get(2);
    }

    #[test]
    fn test_clear() {
        let mut a = Assignment::from([true, true, true]);
        a.clear();
        assert_eq!(a, Assignment::new(3));
    }
}
