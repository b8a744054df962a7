use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Matching key for a component name: trimmed and case-folded.
pub fn fold_component(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The caller-selected components to tally, in caller order.
///
/// Names are stored trimmed with their original casing; entries that fold to
/// the same key keep the first spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct InterestSet {
    entries: Vec<(String, String)>,
}

impl InterestSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for name in names {
            set.insert(name.as_ref());
        }
        set
    }

    /// Add a component. Returns false for blanks and duplicates.
    pub fn insert(&mut self, name: &str) -> bool {
        let display = name.trim();
        if display.is_empty() {
            return false;
        }
        let key = fold_component(display);
        if self.entries.iter().any(|(k, _)| *k == key) {
            return false;
        }
        self.entries.push((key, display.to_string()));
        true
    }

    /// Caller-cased name of the interest entry matching `cell`, if any.
    pub fn lookup(&self, cell: &str) -> Option<&str> {
        let key = fold_component(cell);
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, display)| display.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, display)| display.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<String>> for InterestSet {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl From<InterestSet> for Vec<String> {
    fn from(set: InterestSet) -> Self {
        set.entries.into_iter().map(|(_, display)| display).collect()
    }
}

/// Per-component row counts from one detail page, in first-match order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentCount {
    counts: IndexMap<String, usize>,
}

impl ComponentCount {
    pub fn increment(&mut self, component: &str) {
        *self.counts.entry(component.to_string()).or_insert(0) += 1;
    }

    pub fn get(&self, component: &str) -> usize {
        self.counts.get(component).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
