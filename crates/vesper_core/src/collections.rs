use rustc_hash::FxHashMap;

/// A string-keyed map that iterates in insertion order.
///
/// Post-process registries depend on a deterministic "first" entry, so the
/// entries live in a `Vec` and the hash map only stores positions.
/// Overwriting an existing key keeps its original position.
#[derive(Debug, Clone)]
pub struct NamedMap<T> {
    entries: Vec<(String, T)>,
    lookup: FxHashMap<String, usize>,
}

impl<T> Default for NamedMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NamedMap<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            lookup: FxHashMap::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        let index = *self.lookup.get(name)?;
        Some(&self.entries[index].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        let index = *self.lookup.get(name)?;
        Some(&mut self.entries[index].1)
    }

    /// Inserts `value` under `name`, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: T) -> Option<T> {
        let name = name.into();
        if let Some(&index) = self.lookup.get(&name) {
            return Some(std::mem::replace(&mut self.entries[index].1, value));
        }
        self.lookup.insert(name.clone(), self.entries.len());
        self.entries.push((name, value));
        None
    }

    /// Removes `name`, keeping the relative order of the remaining entries.
    pub fn remove(&mut self, name: &str) -> Option<T> {
        let index = self.lookup.remove(name)?;
        let (_, value) = self.entries.remove(index);
        for (key, _) in &self.entries[index..] {
            if let Some(slot) = self.lookup.get_mut(key) {
                *slot -= 1;
            }
        }
        Some(value)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.lookup.clear();
    }

    #[must_use]
    pub fn first(&self) -> Option<(&str, &T)> {
        self.entries.first().map(|(k, v)| (k.as_str(), v))
    }

    pub fn first_mut(&mut self) -> Option<(&str, &mut T)> {
        self.entries.first_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut T)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().map(|(_, v)| v)
    }

    /// Removes every entry, yielding them in insertion order.
    pub fn drain(&mut self) -> impl Iterator<Item = (String, T)> + '_ {
        self.lookup.clear();
        self.entries.drain(..)
    }
}
