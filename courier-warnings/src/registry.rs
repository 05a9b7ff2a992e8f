use std::collections::BTreeMap;

use crate::Category;

/// Identity of a warning occurrence as far as deduplication is concerned.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegistryKey {
    pub message: String,
    pub category: Category,
    pub line: u32,
}

impl RegistryKey {
    pub fn new(message: impl Into<String>, category: Category, line: u32) -> Self {
        Self { message: message.into(), category, line }
    }

    /// The key the `module` action dedups on: same message and category on any line.
    pub fn without_line(&self) -> Self {
        Self { line: 0, ..self.clone() }
    }
}

/// Per-module dedup cache.
///
/// Maps each already-seen [`RegistryKey`] to the number of times it was
/// encountered. A registry remembers the filters version it was filled under;
/// entries recorded under an older version are discarded before the next use.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registry {
    version: u64,
    seen: BTreeMap<RegistryKey, u32>,
}

impl Registry {
    pub(crate) fn new(version: u64) -> Self {
        Self { version, seen: BTreeMap::new() }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn contains(&self, key: &RegistryKey) -> bool {
        self.seen.contains_key(key)
    }

    pub fn occurrences(&self, key: &RegistryKey) -> u32 {
        self.seen.get(key).copied().unwrap_or(0)
    }

    pub fn keys(&self) -> impl Iterator<Item = &RegistryKey> {
        self.seen.keys()
    }

    /// Empties the registry, including the filters version it was filled under.
    pub fn clear(&mut self) {
        self.seen.clear();
        self.version = 0;
    }

    pub(crate) fn ensure_version(&mut self, version: u64) {
        if self.version != version {
            self.seen.clear();
            self.version = version;
        }
    }

    /// Counts another occurrence of `key` if it was seen before.
    pub(crate) fn note_repeat(&mut self, key: &RegistryKey) -> bool {
        match self.seen.get_mut(key) {
            Some(count) => {
                *count = count.saturating_add(1);
                true
            }
            None => false,
        }
    }

    pub(crate) fn mark(&mut self, key: RegistryKey) {
        self.seen.entry(key).or_insert(1);
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;
    use crate::category::HTTP_WARNING;

    fn key() -> RegistryKey {
        RegistryKey::new("insecure", HTTP_WARNING, 42)
    }

    #[test]
    fn should_count_repeats_of_marked_keys() {
        let mut registry = Registry::new(1);

        assert_that!(registry.note_repeat(&key()), eq(false));
        registry.mark(key());
        assert_that!(registry.note_repeat(&key()), eq(true));

        assert_that!(registry.occurrences(&key()), eq(2));
        assert_that!(registry.len(), eq(1));
    }

    #[test]
    fn should_forget_entries_recorded_under_another_version() {
        let mut registry = Registry::new(1);
        registry.mark(key());

        registry.ensure_version(1);
        assert_that!(registry.contains(&key()), eq(true));

        registry.ensure_version(2);
        assert_that!(registry.is_empty(), eq(true));
        assert_that!(registry.version(), eq(2));
    }

    #[test]
    fn should_keep_copies_independent() {
        let mut registry = Registry::new(1);
        registry.mark(key());

        let copy = registry.clone();
        registry.clear();

        assert_that!(registry.is_empty(), eq(true));
        assert_that!(copy.contains(&key()), eq(true));
        assert_that!(copy.version(), eq(1));
    }

    #[test]
    fn should_drop_line_for_module_key() {
        assert_that!(key().without_line(), eq(RegistryKey::new("insecure", HTTP_WARNING, 0)));
    }
}
