// Section - a named box of uniquely-named pairs

use crate::pair::Pair;

/// A named, ordered group of pairs (a "box" in the file format).
///
/// Pair names are unique within a section. Uniqueness is kept by
/// [`Section::entry`], which returns the existing pair instead of adding a
/// second one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    pairs: Vec<Pair>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pairs: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Find the pair called `name`, appending an empty one if it is absent.
    pub fn entry(&mut self, name: &str) -> &mut Pair {
        let idx = match self.position(name) {
            Some(idx) => idx,
            None => {
                log::trace!("box '{}': new pair '{}'", self.name, name);
                self.pairs.push(Pair::new(name));
                self.pairs.len() - 1
            }
        };
        &mut self.pairs[idx]
    }

    pub fn get(&self, name: &str) -> Option<&Pair> {
        self.pairs.iter().find(|p| p.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Pair> {
        self.pairs.iter_mut().find(|p| p.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Remove a pair, keeping the order of the remaining ones.
    pub fn remove(&mut self, name: &str) -> Option<Pair> {
        self.position(name).map(|idx| self.pairs.remove(idx))
    }

    /// Pairs in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = &Pair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.pairs.iter().position(|p| p.name() == name)
    }
}
