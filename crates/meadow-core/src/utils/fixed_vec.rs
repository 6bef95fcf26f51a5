// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A vector with a compile-time capacity ceiling.

use std::fmt;
use std::ops::Index;

/// Returned by [`FixedVec::push`] when the collection is already full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError {
    /// The fixed capacity that was exceeded.
    pub capacity: usize,
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "capacity of {} elements exceeded", self.capacity)
    }
}

impl std::error::Error for CapacityError {}

/// A growable collection that never holds more than `N` elements.
///
/// Its length is the "used" count: shaders and framebuffers declare fixed
/// arrays of `N` slots, and only the first `len()` of them are meaningful.
/// A push beyond `N` is rejected and leaves the collection untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedVec<T, const N: usize> {
    items: Vec<T>,
}

impl<T, const N: usize> FixedVec<T, N> {
    /// The maximum number of elements.
    pub const CAPACITY: usize = N;

    /// Creates an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends `value`, returning the index it was stored at.
    pub fn push(&mut self, value: T) -> Result<usize, CapacityError> {
        if self.items.len() >= N {
            return Err(CapacityError { capacity: N });
        }
        self.items.push(value);
        Ok(self.items.len() - 1)
    }

    /// Returns `true` if another push would fail.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= N
    }

    /// Number of stored elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The maximum number of elements, `N`.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns the element at `index`, if it is in use.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Returns a mutable reference to the element at `index`, if it is in use.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// The used elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterates over the used elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Mutably iterates over the used elements.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Removes every element, yielding them in order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, T> {
        self.items.drain(..)
    }
}

impl<T, const N: usize> Default for FixedVec<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Index<usize> for FixedVec<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a FixedVec<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_returns_slot_index() {
        let mut v: FixedVec<u32, 3> = FixedVec::new();
        assert_eq!(v.push(10), Ok(0));
        assert_eq!(v.push(20), Ok(1));
        assert_eq!(v.len(), 2);
        assert_eq!(v[1], 20);
    }

    #[test]
    fn push_past_capacity_is_rejected_without_side_effects() {
        let mut v: FixedVec<u32, 2> = FixedVec::new();
        v.push(1).unwrap();
        v.push(2).unwrap();
        assert!(v.is_full());

        assert_eq!(v.push(3), Err(CapacityError { capacity: 2 }));
        assert_eq!(v.len(), 2);
        assert_eq!(v.as_slice(), &[1, 2]);
    }

    #[test]
    fn capacity_is_the_const_parameter() {
        let v: FixedVec<u8, 7> = FixedVec::default();
        assert_eq!(v.capacity(), 7);
        assert_eq!(FixedVec::<u8, 7>::CAPACITY, 7);
        assert!(v.is_empty());
    }
}
