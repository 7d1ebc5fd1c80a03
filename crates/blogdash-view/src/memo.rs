//! Single-entry memoization keyed on a collection fingerprint.

use std::sync::Arc;

/// Caches the last derived value together with the key it was derived from.
///
/// A lookup with an equal key returns the cached value; any other key
/// recomputes and replaces it.
#[derive(Debug)]
pub struct Memo<K, V> {
    entry: Option<(K, Arc<V>)>,
    computations: u64,
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self {
            entry: None,
            computations: 0,
        }
    }

    /// Return the value for `key`, running `compute` only on a key change.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> Arc<V> {
        if let Some((cached_key, value)) = &self.entry
            && *cached_key == key
        {
            return Arc::clone(value);
        }

        let value = Arc::new(compute());
        self.computations += 1;
        self.entry = Some((key, Arc::clone(&value)));
        value
    }

    /// How many times a value has been computed.
    pub fn computations(&self) -> u64 {
        self.computations
    }
}

impl<K: PartialEq, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_reuses_value() {
        let mut memo: Memo<u64, String> = Memo::new();
        let a = memo.get_or_compute(1, || "one".to_string());
        let b = memo.get_or_compute(1, || unreachable!());

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(memo.computations(), 1);
    }

    #[test]
    fn new_key_recomputes() {
        let mut memo: Memo<(u64, usize), usize> = Memo::new();
        memo.get_or_compute((1, 1), || 10);
        let v = memo.get_or_compute((1, 2), || 20);

        assert_eq!(*v, 20);
        assert_eq!(memo.computations(), 2);
    }
}
