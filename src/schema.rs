//! Relation schema: the attribute universe of a reduction run.

use std::collections::BTreeSet;
use std::fmt;

use crate::types::{Attr, AttrSet};

/// Error type for schema construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The relation has no attributes.
    Empty,
    /// The attribute is declared more than once.
    Duplicate(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::Empty => write!(f, "relation has no attributes"),
            SchemaError::Duplicate(attr) => write!(f, "attribute {} declared more than once", attr),
        }
    }
}

impl std::error::Error for SchemaError {}

/// A relation schema: unique attributes in declaration order.
///
/// # Invariants
///
/// - At least one attribute
/// - No attribute appears twice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema<A = Attr> {
    attrs: Vec<A>,
    members: BTreeSet<A>,
}

impl<A: Ord + Clone + fmt::Display> Schema<A> {
    /// Creates a schema from the given attributes, keeping their order.
    pub fn new(attrs: impl IntoIterator<Item = A>) -> Result<Self, SchemaError> {
        let mut order = Vec::new();
        let mut members = BTreeSet::new();
        for attr in attrs {
            if !members.insert(attr.clone()) {
                return Err(SchemaError::Duplicate(attr.to_string()));
            }
            order.push(attr);
        }
        if order.is_empty() {
            return Err(SchemaError::Empty);
        }
        Ok(Self { attrs: order, members })
    }
}

impl<A: Ord + Clone> Schema<A> {
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Always false for a constructed schema; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn contains(&self, attr: &A) -> bool {
        self.members.contains(attr)
    }

    /// Returns true if every attribute of `set` belongs to the schema.
    pub fn contains_all(&self, set: &AttrSet<A>) -> bool {
        set.iter().all(|attr| self.members.contains(attr))
    }

    /// Attributes in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, A> {
        self.attrs.iter()
    }

    pub fn to_attr_set(&self) -> AttrSet<A> {
        self.members.iter().cloned().collect()
    }
}

impl<A: fmt::Display> fmt::Display for Schema<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R(")?;
        for (i, attr) in self.attrs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", attr)?;
        }
        write!(f, ")")
    }
}
