/*
 * Created on Wed Jan 10 2024
 *
 * This file is a part of Skytable
 * Skytable (formerly known as TerrabaseDB or Skybase) is a free and open-source
 * NoSQL database written by Sayan Nandan ("the Author") with the
 * vision to provide flexibility in data modelling without compromising
 * on performance, queryability or scalability.
 *
 * Copyright (c) 2024, Sayan Nandan <nandansayan@outlook.com>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 *
*/

const WORD_BITS: usize = u64::BITS as usize;

/// A dense, fixed-capacity bitset keyed by small nonnegative integers (piece numbers).
///
/// `insert` is idempotent: reinserting an index already present does not change [`Self::count`].
/// This idempotence is load-bearing: [`Self::union_with`] and every derived count in
/// [`crate::classify::ClassificationResult`] assume it. Queries beyond capacity return `false`;
/// insertions beyond capacity are a caller bug (see [`crate::error::Error::OutOfRangeInsert`]).
///
/// Not thread-safe by design: every `IntSet` is a short-lived, per-call object owned by one
/// classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntSet {
    words: Vec<u64>,
    capacity: usize,
    count: usize,
}

impl IntSet {
    /// Allocate an empty set with room for indices `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0u64; (capacity + WORD_BITS - 1) / WORD_BITS.max(1)],
            capacity,
            count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        if index >= self.capacity {
            return false;
        }
        let (word, bit) = Self::locate(index);
        (self.words[word] >> bit) & 1 == 1
    }

    /// Try to insert `index`. Returns `true` if it was newly inserted, `false` if it was
    /// already present or out of range.
    ///
    /// # Panics
    /// Panics (debug-checked) if `index >= capacity()`. Callers that cannot guarantee `index`
    /// is in range up front should use [`Self::try_insert`] instead, which reports the
    /// violation as a [`crate::error::Error::OutOfRangeInsert`] rather than panicking.
    pub fn insert(&mut self, index: usize) -> bool {
        debug_assert!(
            index < self.capacity,
            "IntSet::insert: index {index} out of range for capacity {}",
            self.capacity
        );
        let (word, bit) = Self::locate(index);
        let mask = 1u64 << bit;
        let was_set = self.words[word] & mask != 0;
        self.words[word] |= mask;
        if !was_set {
            self.count += 1;
        }
        !was_set
    }

    /// Fallible counterpart to [`Self::insert`] for call sites that must not panic on a
    /// caller-supplied index (used by [`crate::classify::classify`] at its precondition
    /// boundary).
    pub fn try_insert(&mut self, index: usize) -> Result<bool, crate::error::Error> {
        if index >= self.capacity {
            return Err(crate::error::Error::OutOfRangeInsert {
                index,
                capacity: self.capacity,
            });
        }
        Ok(self.insert(index))
    }

    /// Logical OR this set with `other` in place. `count` is recomputed as the true
    /// population of the union, not the sum of the two input counts.
    pub fn union_with(&mut self, other: &Self) {
        debug_assert_eq!(
            self.capacity, other.capacity,
            "union_with requires matching capacity"
        );
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a |= b;
        }
        self.count = self.words.iter().map(|w| w.count_ones() as usize).sum();
    }

    /// Logical AND, returning a fresh set rather than mutating in place (used by
    /// `unhealthy ∩ retrievable` in [`crate::classify::classify`]).
    pub fn intersection(&self, other: &Self) -> Self {
        debug_assert_eq!(
            self.capacity, other.capacity,
            "intersection requires matching capacity"
        );
        let words: Vec<u64> = self
            .words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| a & b)
            .collect();
        let count = words.iter().map(|w| w.count_ones() as usize).sum();
        Self {
            words,
            capacity: self.capacity,
            count,
        }
    }

    /// Iterate the set indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.capacity).filter(move |&i| self.contains(i))
    }

    fn locate(index: usize) -> (usize, usize) {
        (index / WORD_BITS, index % WORD_BITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let mut s = IntSet::new(10);
        assert!(s.insert(3));
        assert!(!s.insert(3));
        assert_eq!(s.count(), 1);
    }

    #[test]
    fn contains_out_of_range_is_false() {
        let s = IntSet::new(4);
        assert!(!s.contains(4));
        assert!(!s.contains(1000));
    }

    #[test]
    fn try_insert_reports_out_of_range() {
        let mut s = IntSet::new(4);
        assert_eq!(
            s.try_insert(4),
            Err(crate::error::Error::OutOfRangeInsert {
                index: 4,
                capacity: 4
            })
        );
    }

    #[test]
    fn union_recomputes_true_population() {
        let mut a = IntSet::new(70);
        a.insert(0);
        a.insert(65);
        let mut b = IntSet::new(70);
        b.insert(65);
        b.insert(66);
        a.union_with(&b);
        assert_eq!(a.count(), 3);
        assert!(a.contains(0));
        assert!(a.contains(65));
        assert!(a.contains(66));
    }

    #[test]
    fn intersection_is_bitwise_and() {
        let mut a = IntSet::new(10);
        a.insert(1);
        a.insert(2);
        let mut b = IntSet::new(10);
        b.insert(2);
        b.insert(3);
        let c = a.intersection(&b);
        assert_eq!(c.count(), 1);
        assert!(c.contains(2));
        assert!(!c.contains(1));
        assert!(!c.contains(3));
    }

    #[test]
    fn zero_capacity_set_is_inert() {
        let s = IntSet::new(0);
        assert_eq!(s.capacity(), 0);
        assert!(!s.contains(0));
        assert_eq!(s.count(), 0);
    }

    #[test]
    fn iter_yields_ascending_indices() {
        let mut s = IntSet::new(20);
        for i in [17, 3, 9] {
            s.insert(i);
        }
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![3, 9, 17]);
    }
}
