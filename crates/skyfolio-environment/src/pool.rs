//! Fixed-capacity arena with recycle-in-place semantics.

use crate::error::EnvironmentError;

/// A pool of `T` allocated once and never resized.
///
/// Elements are addressed by index. There is no insert or remove: the only
/// way to change the world is to mutate an element in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool<T> {
    items: Box<[T]>,
}

impl<T> Pool<T> {
    /// Builds a pool of `capacity` elements, calling `init` with each index.
    pub fn new(
        name: &'static str,
        capacity: usize,
        init: impl FnMut(usize) -> T,
    ) -> Result<Self, EnvironmentError> {
        if capacity == 0 {
            return Err(EnvironmentError::EmptyPool { pool: name });
        }
        Ok(Self {
            items: (0..capacity).map(init).collect(),
        })
    }

    /// Number of elements. Constant for the life of the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`: construction rejects empty pools.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Element at `index`.
    ///
    /// An out-of-range index is a programming error: debug builds panic,
    /// release builds clamp to the last element.
    #[must_use]
    pub fn get(&self, index: usize) -> &T {
        &self.items[self.clamp_index(index)]
    }

    /// Mutable element at `index`, with the same bounds policy as [`get`](Self::get).
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        let index = self.clamp_index(index);
        &mut self.items[index]
    }

    /// Iterates over all elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Iterates mutably over all elements.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// All elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    fn clamp_index(&self, index: usize) -> usize {
        debug_assert!(
            index < self.items.len(),
            "pool index {index} out of range for {} elements",
            self.items.len()
        );
        index.min(self.items.len() - 1)
    }
}

impl<'a, T> IntoIterator for &'a Pool<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Pool<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
