use std::collections::BTreeMap;

/// Resources built on demand and shared by key afterwards, like one mesh per road type. Iteration
/// order follows the keys.
pub struct ResourceCache<K: Ord, V> {
    entries: BTreeMap<K, V>,
    hits: usize,
    misses: usize,
}

impl<K: Ord, V> ResourceCache<K, V> {
    pub fn new() -> ResourceCache<K, V> {
        ResourceCache {
            entries: BTreeMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the resource for this key, building it first if it's not cached yet.
    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, build: F) -> &mut V {
        if self.entries.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        self.entries.entry(key).or_insert_with(build)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    /// (hits, misses)
    pub fn usage(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }
}

impl<K: Ord, V> Default for ResourceCache<K, V> {
    fn default() -> Self {
        ResourceCache::new()
    }
}
