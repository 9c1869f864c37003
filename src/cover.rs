//! Canonical (minimal) cover of a dependency set.
//!
//! The cover is derived in three stages:
//!
//! 1. [`simplify`] splits every right-hand side into single attributes.
//! 2. [`filter_to_schema`] drops dependencies mentioning attributes outside the relation.
//! 3. [`remove_redundant`] drops dependencies implied by the remaining ones.
//!
//! [`MinimalCover`] runs the stages on demand and caches each result.
//!
//! # Single-pass redundancy elimination
//!
//! Redundancy elimination visits the filtered dependencies once, in
//! [`Fd`] order, testing each one against the working set as it stands at
//! that moment (earlier removals are already applied). It does not iterate to
//! a fixpoint. When several dependencies can substitute for each other, which
//! of them survive depends on the visiting order, and a retained dependency is
//! only guaranteed to have been non-redundant when it was tested.

use std::cell::OnceCell;
use std::fmt;

use log::debug;

use crate::closure::closure;
use crate::fd::{Fd, FdSet};
use crate::schema::Schema;
use crate::types::{Attr, AttrSet};

/// Splits every dependency into single-attribute right-hand sides.
///
/// `A -> BE` becomes `A -> B` and `A -> E`. Attributes outside any schema
/// are kept; the result is equivalent to the input.
pub fn simplify<A: Ord + Clone>(fds: &FdSet<A>) -> FdSet<A> {
    let mut simplified = FdSet::new();
    for fd in fds {
        if fd.is_singleton() {
            simplified.insert(fd.clone());
        } else {
            for attr in fd.rhs() {
                simplified.insert(Fd::unit(fd.lhs().clone(), attr.clone()));
            }
        }
    }
    debug!("simplify: {} -> {} dependencies", fds.len(), simplified.len());
    simplified
}

/// Keeps only the dependencies whose attributes all belong to `schema`.
///
/// Dropped dependencies are not an error.
pub fn filter_to_schema<A: Ord + Clone + fmt::Display>(fds: &FdSet<A>, schema: &Schema<A>) -> FdSet<A> {
    let mut filtered = FdSet::new();
    for fd in fds {
        if schema.contains_all(fd.lhs()) && schema.contains_all(fd.rhs()) {
            filtered.insert(fd.clone());
        } else {
            debug!("filter: drop {}", fd);
        }
    }
    filtered
}

/// A single redundancy test made during elimination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedundancyCheck<A = Attr> {
    /// The dependency under test.
    pub fd: Fd<A>,
    /// Closure of `fd.lhs` under the working set without `fd`, at test time.
    pub closure: AttrSet<A>,
    /// Whether `fd` was removed.
    pub redundant: bool,
}

/// Result of redundancy elimination together with its decision trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction<A = Attr> {
    pub cover: FdSet<A>,
    /// One entry per input dependency, in visiting order.
    pub steps: Vec<RedundancyCheck<A>>,
}

/// Removes redundant dependencies in a single pass, recording every decision.
///
/// See the [module documentation](self) for the order sensitivity.
pub fn remove_redundant_traced<A: Ord + Clone + fmt::Display>(fds: &FdSet<A>) -> Reduction<A> {
    // Visit a snapshot of the input while the working set shrinks.
    let snapshot: Vec<Fd<A>> = fds.iter().cloned().collect();
    let mut working = fds.clone();
    let mut steps = Vec::with_capacity(snapshot.len());

    for fd in snapshot {
        let rest = working.without(&fd);
        let lhs_closure = closure(&rest, fd.lhs());
        let redundant = lhs_closure.is_superset(fd.rhs());
        if redundant {
            debug!("redundant: {} (closure {})", fd, lhs_closure);
            working = rest;
        } else {
            debug!("keep: {} (closure {})", fd, lhs_closure);
        }
        steps.push(RedundancyCheck {
            fd,
            closure: lhs_closure,
            redundant,
        });
    }

    Reduction { cover: working, steps }
}

/// Removes redundant dependencies in a single pass.
pub fn remove_redundant<A: Ord + Clone + fmt::Display>(fds: &FdSet<A>) -> FdSet<A> {
    remove_redundant_traced(fds).cover
}

/// Computes the canonical cover of `fds` over `schema` in one go.
pub fn canonical_cover<A: Ord + Clone + fmt::Display>(fds: &FdSet<A>, schema: &Schema<A>) -> FdSet<A> {
    let simplified = simplify(fds);
    let filtered = filter_to_schema(&simplified, schema);
    remove_redundant(&filtered)
}

/// Staged canonical-cover computation with cached intermediate results.
///
/// Each stage is computed at most once, pulling in the earlier stages as
/// needed; repeated calls return the cached set. One instance serves one
/// reduction run.
///
/// ```
/// use fd_cover::cover::MinimalCover;
/// use fd_cover::fd::FdSet;
/// use fd_cover::schema::Schema;
/// use fd_cover::types::{attrs, Attr};
///
/// let schema = Schema::new("ABC".chars().map(Attr::from)).unwrap();
/// let fds = FdSet::try_from_pairs(vec![
///     (attrs("A"), attrs("B")),
///     (attrs("B"), attrs("C")),
///     (attrs("A"), attrs("C")),
/// ])
/// .unwrap();
///
/// let mc = MinimalCover::new(fds, schema);
/// assert_eq!(mc.canonical_cover().len(), 2);
/// ```
#[derive(Debug)]
pub struct MinimalCover<A = Attr> {
    fds: FdSet<A>,
    schema: Schema<A>,
    simplified: OnceCell<FdSet<A>>,
    filtered: OnceCell<FdSet<A>>,
    reduction: OnceCell<Reduction<A>>,
}

impl<A: Ord + Clone + fmt::Display> MinimalCover<A> {
    pub fn new(fds: FdSet<A>, schema: Schema<A>) -> Self {
        Self {
            fds,
            schema,
            simplified: OnceCell::new(),
            filtered: OnceCell::new(),
            reduction: OnceCell::new(),
        }
    }

    /// The raw input dependencies.
    pub fn input(&self) -> &FdSet<A> {
        &self.fds
    }

    pub fn schema(&self) -> &Schema<A> {
        &self.schema
    }

    /// Stage 1: single-attribute right-hand sides.
    pub fn simplified(&self) -> &FdSet<A> {
        self.simplified.get_or_init(|| simplify(&self.fds))
    }

    /// Stage 2: stage 1 restricted to the schema.
    pub fn filtered(&self) -> &FdSet<A> {
        self.filtered
            .get_or_init(|| filter_to_schema(self.simplified(), &self.schema))
    }

    fn reduction(&self) -> &Reduction<A> {
        self.reduction
            .get_or_init(|| remove_redundant_traced(self.filtered()))
    }

    /// Stage 3: stage 2 without redundant dependencies.
    pub fn reduced(&self) -> &FdSet<A> {
        &self.reduction().cover
    }

    /// The redundancy decisions taken in stage 3.
    pub fn trace(&self) -> &[RedundancyCheck<A>] {
        &self.reduction().steps
    }

    /// The canonical cover (same as [`reduced`][MinimalCover::reduced]).
    pub fn canonical_cover(&self) -> &FdSet<A> {
        self.reduced()
    }

    /// Consumes the reducer and returns the canonical cover.
    pub fn into_cover(self) -> FdSet<A> {
        self.reduction();
        self.reduction.into_inner().map(|r| r.cover).unwrap_or_default()
    }
}
