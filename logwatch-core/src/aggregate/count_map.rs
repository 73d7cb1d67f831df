use ahash::RandomState;
use std::collections::HashMap;

/// Frequency counter keyed by category value.
///
/// Reads never insert: [`CountMap::get`] on an unknown key returns 0 and leaves
/// the map untouched.
#[derive(Debug, Clone, Default)]
pub struct CountMap {
    counts: HashMap<String, u64, RandomState>,
}

impl CountMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(key: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.increment(key);
        map
    }

    pub fn increment(&mut self, key: impl Into<String>) {
        self.add(key, 1);
    }

    pub fn add(&mut self, key: impl Into<String>, count: u64) {
        if count == 0 {
            return;
        }
        *self.counts.entry(key.into()).or_insert(0) += count;
    }

    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Pointwise sum.
    pub fn merge(&mut self, other: &CountMap) {
        for (key, count) in &other.counts {
            self.add(key.as_str(), *count);
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// The `n` most frequent keys, highest count first, ties broken by key.
    pub fn top(&self, n: usize) -> Vec<(String, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|(ka, ca), (kb, cb)| cb.cmp(ca).then_with(|| ka.cmp(kb)));
        entries
            .into_iter()
            .take(n)
            .map(|(k, c)| (k.to_string(), c))
            .collect()
    }
}

impl PartialEq for CountMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, c)| other.get(k) == c)
    }
}

impl Eq for CountMap {}

impl<K: Into<String>> FromIterator<(K, u64)> for CountMap {
    fn from_iter<T: IntoIterator<Item = (K, u64)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (key, count) in iter {
            map.add(key, count);
        }
        map
    }
}
