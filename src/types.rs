//! Attribute tokens and attribute sets.
//!
//! Attributes are opaque, comparable tokens. The default token [`Attr`] is a
//! newtype over `String`, so multi-character names (`roll_no`, `name`) work
//! just as well as the classic single letters. Every other type in this crate
//! is generic over the token, with `Attr` as the default.
use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

/// A named attribute of a relation.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Attr(String);

impl Attr {
    /// Creates a new attribute with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Attr(name.into())
    }

    /// Returns the attribute name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Attr {
    fn from(name: &str) -> Self {
        Attr(name.to_string())
    }
}

impl From<String> for Attr {
    fn from(name: String) -> Self {
        Attr(name)
    }
}

impl From<char> for Attr {
    fn from(c: char) -> Self {
        Attr(c.to_string())
    }
}

/// An ordered set of attributes.
///
/// Ordering is the token ordering, which makes iteration (and everything built
/// on top of it) deterministic.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct AttrSet<A = Attr>(BTreeSet<A>);

impl<A> AttrSet<A> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, A> {
        self.0.iter()
    }
}

impl<A: Ord> AttrSet<A> {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        AttrSet(BTreeSet::new())
    }

    /// Creates a set holding a single attribute.
    pub fn single(attr: A) -> Self {
        let mut set = BTreeSet::new();
        set.insert(attr);
        AttrSet(set)
    }

    pub fn contains(&self, attr: &A) -> bool {
        self.0.contains(attr)
    }

    /// Adds an attribute. Returns true if it was not present before.
    pub fn insert(&mut self, attr: A) -> bool {
        self.0.insert(attr)
    }

    pub fn is_subset(&self, other: &AttrSet<A>) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn is_superset(&self, other: &AttrSet<A>) -> bool {
        self.0.is_superset(&other.0)
    }

    /// Returns the single attribute of a one-element set.
    pub fn as_single(&self) -> Option<&A> {
        if self.0.len() == 1 {
            self.0.iter().next()
        } else {
            None
        }
    }
}

impl<A: Ord + Clone> AttrSet<A> {
    /// Adds every attribute of `other`. Returns the number of newly added attributes.
    pub fn extend_from(&mut self, other: &AttrSet<A>) -> usize {
        let before = self.0.len();
        self.0.extend(other.0.iter().cloned());
        self.0.len() - before
    }

    pub fn union(&self, other: &AttrSet<A>) -> AttrSet<A> {
        AttrSet(self.0.union(&other.0).cloned().collect())
    }
}

impl<A: Ord> Default for AttrSet<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Ord> FromIterator<A> for AttrSet<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        AttrSet(iter.into_iter().collect())
    }
}

impl<A: Ord> Extend<A> for AttrSet<A> {
    fn extend<I: IntoIterator<Item = A>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl<A> IntoIterator for AttrSet<A> {
    type Item = A;
    type IntoIter = btree_set::IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, A> IntoIterator for &'a AttrSet<A> {
    type Item = &'a A;
    type IntoIter = btree_set::Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<A: fmt::Display> fmt::Display for AttrSet<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, attr) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", attr)?;
        }
        write!(f, "}}")
    }
}

/// Builds an [`AttrSet<Attr>`] from single-letter names, e.g. `attrs("ABE")`.
///
/// Whitespace is skipped. Mostly useful in tests and demos.
pub fn attrs(letters: &str) -> AttrSet<Attr> {
    letters.chars().filter(|c| !c.is_whitespace()).map(Attr::from).collect()
}
