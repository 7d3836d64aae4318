// Settings - the ordered collection of boxes

use crate::error::StoreError;
use crate::pair::Pair;
use crate::section::Section;

/// Top-level settings tree: uniquely-named boxes, each holding pairs.
///
/// Boxes keep their insertion order, which is also the order
/// [`Settings::write`] emits them in. `Clone` copies the whole tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub(crate) sections: Vec<Section>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the box called `name`, appending an empty one if it is absent.
    ///
    /// ```
    /// use boxkv_core::Settings;
    ///
    /// let mut settings = Settings::new();
    /// settings.section("network").entry("port").set(8080);
    /// assert_eq!(settings.section("network").entry("port").as_i32(), 8080);
    /// ```
    pub fn section(&mut self, name: &str) -> &mut Section {
        let idx = self.section_index(name);
        &mut self.sections[idx]
    }

    /// Index of the box called `name`, creating it when missing.
    pub(crate) fn section_index(&mut self, name: &str) -> usize {
        match self.position(name) {
            Some(idx) => idx,
            None => {
                log::trace!("new box '{}'", name);
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Look up `section.pair` without creating anything.
    pub fn value(&self, section: &str, pair: &str) -> Option<&Pair> {
        self.get(section).and_then(|s| s.get(pair))
    }

    /// Like [`Settings::value`], but reports which part of the path is missing.
    pub fn require(&self, section: &str, pair: &str) -> Result<&Pair, StoreError> {
        let found = self
            .get(section)
            .ok_or_else(|| StoreError::UnknownBox(section.to_string()))?;
        found.get(pair).ok_or_else(|| StoreError::UnknownPair {
            section: section.to_string(),
            pair: pair.to_string(),
        })
    }

    /// Remove a box and all its pairs, keeping the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<Section> {
        self.position(name).map(|idx| self.sections.remove(idx))
    }

    pub fn clear(&mut self) {
        self.sections.clear();
    }

    /// Boxes in insertion order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Copy every box and pair of `other` into this tree through
    /// find-or-create, overwriting values that already exist.
    pub fn merge(&mut self, other: &Settings) {
        for section in other.sections() {
            let target = self.section(section.name());
            for pair in section.pairs() {
                target.entry(pair.name()).set(pair.as_str());
            }
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.name() == name)
    }
}
