//! Symbol types and name interning for automata.

use indexmap::IndexSet;

/// A symbol identifier: the index of the symbol's name in the alphabet.
pub type SymbolId = u32;

/// The symbol name treated as epsilon unless configured otherwise.
pub const EPSILON: &str = "eps";

/// Maps names to dense ids and back, in insertion order.
///
/// States and alphabet symbols are both stored this way; the id of a name is
/// its position in the table.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    names: IndexSet<String>,
}

impl Interner {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of `name`, adding it first if needed.
    pub fn intern(&mut self, name: &str) -> u32 {
        if let Some(id) = self.names.get_index_of(name) {
            return id as u32;
        }
        let (id, _) = self.names.insert_full(name.to_owned());
        id as u32
    }

    /// Look up the id of a name.
    pub fn id(&self, name: &str) -> Option<u32> {
        self.names.get_index_of(name).map(|id| id as u32)
    }

    /// Look up the name of an id.
    pub fn name(&self, id: u32) -> Option<&str> {
        self.names.get_index(id as usize).map(String::as_str)
    }

    /// Get the number of names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Check if the table holds a name.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Make `id` valid by appending placeholder names `<prefix><n>`.
    ///
    /// A placeholder already taken by another id gets primes appended.
    pub fn ensure(&mut self, id: u32, prefix: &str) {
        while self.names.len() <= id as usize {
            let mut name = format!("{prefix}{}", self.names.len());
            while self.names.contains(&name) {
                name.push('\'');
            }
            self.names.insert(name);
        }
    }

    /// Iterate over `(id, name)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(id, name)| (id as u32, name.as_str()))
    }
}

// Order matters: ids are positions, so two tables are only interchangeable
// when they list the same names in the same order.
impl PartialEq for Interner {
    fn eq(&self, other: &Self) -> bool {
        self.names.iter().eq(other.names.iter())
    }
}

impl Eq for Interner {}

impl<S: AsRef<str>> FromIterator<S> for Interner {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = Self::new();
        for name in iter {
            table.intern(name.as_ref());
        }
        table
    }
}
