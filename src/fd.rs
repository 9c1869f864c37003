//! Functional dependencies and dependency sets.
//!
//! A dependency `lhs -> rhs` says that the values of the `lhs` attributes
//! determine the values of the `rhs` attributes. Before simplification the
//! right-hand side may hold several attributes, which is shorthand for one
//! dependency per attribute sharing the same left-hand side.
//!
//! Construction is fail-closed: a batch containing a trivial dependency
//! (`X -> X`) is rejected as a whole, see [`FdSet::try_from_pairs`] and
//! [`FdSetBuilder`].

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

use log::debug;

use crate::types::{Attr, AttrSet};

/// Error type for dependency construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FdError {
    /// The left-hand side has no attributes.
    EmptyLhs,
    /// The right-hand side has no attributes.
    EmptyRhs,
    /// Left- and right-hand sides are the same set (rendered).
    Trivial(String),
}

impl fmt::Display for FdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FdError::EmptyLhs => write!(f, "dependency has an empty left-hand side"),
            FdError::EmptyRhs => write!(f, "dependency has an empty right-hand side"),
            FdError::Trivial(attrs) => write!(f, "trivial dependency {} -> {}", attrs, attrs),
        }
    }
}

impl std::error::Error for FdError {}

/// A functional dependency `lhs -> rhs`.
///
/// Dependencies are ordered by left-hand side first, then right-hand side.
/// This order is the enumeration order of an [`FdSet`].
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Fd<A = Attr> {
    lhs: AttrSet<A>,
    rhs: AttrSet<A>,
}

impl<A: Ord + Clone + fmt::Display> Fd<A> {
    /// Creates a new dependency.
    ///
    /// Fails if either side is empty, or if both sides are the same set.
    pub fn new(lhs: AttrSet<A>, rhs: AttrSet<A>) -> Result<Self, FdError> {
        if lhs.is_empty() {
            return Err(FdError::EmptyLhs);
        }
        if rhs.is_empty() {
            return Err(FdError::EmptyRhs);
        }
        if lhs == rhs {
            return Err(FdError::Trivial(lhs.to_string()));
        }
        Ok(Fd { lhs, rhs })
    }
}

impl<A> Fd<A> {
    pub fn lhs(&self) -> &AttrSet<A> {
        &self.lhs
    }

    pub fn rhs(&self) -> &AttrSet<A> {
        &self.rhs
    }
}

impl<A: Ord + Clone> Fd<A> {
    /// Creates a dependency with a single right-hand attribute, skipping validation.
    ///
    /// RHS decomposition of `A -> AB` legitimately yields the reflexive `A -> A`.
    pub(crate) fn unit(lhs: AttrSet<A>, attr: A) -> Self {
        Fd {
            lhs,
            rhs: AttrSet::single(attr),
        }
    }

    /// Returns true if the right-hand side is a single attribute.
    pub fn is_singleton(&self) -> bool {
        self.rhs.len() == 1
    }

    /// Returns true if the right-hand side is contained in the left-hand side.
    pub fn is_reflexive(&self) -> bool {
        self.rhs.is_subset(&self.lhs)
    }

    /// All attributes mentioned on either side.
    pub fn attrs(&self) -> AttrSet<A> {
        self.lhs.union(&self.rhs)
    }
}

/// A set of functional dependencies.
///
/// Equality is set equality. Iteration follows the [`Fd`] ordering.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct FdSet<A = Attr>(BTreeSet<Fd<A>>);

impl<A: Ord + Clone + fmt::Display> FdSet<A> {
    /// Builds a dependency set from `(lhs, rhs)` pairs.
    ///
    /// The first invalid pair fails the whole batch: no partial set is produced.
    pub fn try_from_pairs<I>(pairs: I) -> Result<Self, FdError>
    where
        I: IntoIterator<Item = (AttrSet<A>, AttrSet<A>)>,
    {
        let mut builder = FdSetBuilder::new();
        for (lhs, rhs) in pairs {
            builder.add(lhs, rhs)?;
        }
        builder.build()
    }
}

impl<A> FdSet<A> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Fd<A>> {
        self.0.iter()
    }
}

impl<A: Ord + Clone> FdSet<A> {
    pub fn new() -> Self {
        FdSet(BTreeSet::new())
    }

    pub fn contains(&self, fd: &Fd<A>) -> bool {
        self.0.contains(fd)
    }

    /// Adds a dependency. Returns true if it was not present before.
    pub fn insert(&mut self, fd: Fd<A>) -> bool {
        self.0.insert(fd)
    }

    /// Removes a dependency. Returns true if it was present.
    pub fn remove(&mut self, fd: &Fd<A>) -> bool {
        self.0.remove(fd)
    }

    /// Returns a copy of this set with exactly `fd` removed.
    pub fn without(&self, fd: &Fd<A>) -> FdSet<A> {
        let mut rest = self.clone();
        rest.remove(fd);
        rest
    }

    /// Returns true if every dependency has a single right-hand attribute.
    pub fn is_simple(&self) -> bool {
        self.0.iter().all(Fd::is_singleton)
    }

    /// All attributes mentioned by any dependency.
    pub fn attrs(&self) -> AttrSet<A> {
        let mut all = AttrSet::new();
        for fd in &self.0 {
            all.extend_from(fd.lhs());
            all.extend_from(fd.rhs());
        }
        all
    }
}

impl<A: Ord> Default for FdSet<A> {
    fn default() -> Self {
        FdSet(BTreeSet::new())
    }
}

impl<A: Ord> FromIterator<Fd<A>> for FdSet<A> {
    fn from_iter<I: IntoIterator<Item = Fd<A>>>(iter: I) -> Self {
        FdSet(iter.into_iter().collect())
    }
}

impl<A> IntoIterator for FdSet<A> {
    type Item = Fd<A>;
    type IntoIter = btree_set::IntoIter<Fd<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, A> IntoIterator for &'a FdSet<A> {
    type Item = &'a Fd<A>;
    type IntoIter = btree_set::Iter<'a, Fd<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Incremental, fail-closed producer of an [`FdSet`].
///
/// A rejected dependency discards everything added so far and poisons the
/// builder: later additions are ignored and [`build`][FdSetBuilder::build]
/// reports the first error.
#[derive(Debug, Clone)]
pub struct FdSetBuilder<A = Attr> {
    fds: FdSet<A>,
    error: Option<FdError>,
}

impl<A: Ord + Clone + fmt::Display> FdSetBuilder<A> {
    pub fn new() -> Self {
        Self {
            fds: FdSet::new(),
            error: None,
        }
    }

    /// Adds `lhs -> rhs`.
    pub fn add(&mut self, lhs: AttrSet<A>, rhs: AttrSet<A>) -> Result<(), FdError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        match Fd::new(lhs, rhs) {
            Ok(fd) => {
                self.fds.insert(fd);
                Ok(())
            }
            Err(err) => {
                debug!("add: {}, discarding {} dependencies", err, self.fds.len());
                self.fds = FdSet::new();
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Number of dependencies collected so far (zero once poisoned).
    pub fn len(&self) -> usize {
        self.fds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fds.is_empty()
    }

    pub fn is_poisoned(&self) -> bool {
        self.error.is_some()
    }

    pub fn build(self) -> Result<FdSet<A>, FdError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.fds),
        }
    }
}

impl<A: Ord + Clone + fmt::Display> Default for FdSetBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}
