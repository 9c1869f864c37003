//! Attribute-set closure under a dependency set.
//!
//! The closure `X⁺` of `X` under `F` is the smallest superset of `X` such that
//! for every `lhs -> rhs` in `F`, `lhs ⊆ X⁺` implies `rhs ⊆ X⁺`. It is computed
//! by fixpoint iteration and never stored.

use std::fmt;

use log::debug;

use crate::fd::{Fd, FdSet};
use crate::types::AttrSet;

/// Computes the closure of `seed` under the given dependencies.
///
/// Dependencies are scanned in the order the iterator yields them, for at most
/// `|F|` passes, stopping at the first pass that adds nothing. The result does
/// not depend on that order.
pub fn closure<'a, A, I>(fds: I, seed: &AttrSet<A>) -> AttrSet<A>
where
    A: Ord + Clone + 'a,
    I: IntoIterator<Item = &'a Fd<A>>,
{
    let fds: Vec<&Fd<A>> = fds.into_iter().collect();
    let mut result = seed.clone();

    for _ in 0..fds.len() {
        let mut added = 0;
        for fd in &fds {
            if fd.lhs().is_subset(&result) {
                added += result.extend_from(fd.rhs());
            }
        }
        if added == 0 {
            break;
        }
    }

    result
}

/// Returns true if `fd` follows from `fds`, i.e. `fd.rhs ⊆ closure(fds, fd.lhs)`.
pub fn implies<'a, A, I>(fds: I, fd: &Fd<A>) -> bool
where
    A: Ord + Clone + 'a,
    I: IntoIterator<Item = &'a Fd<A>>,
{
    closure(fds, fd.lhs()).is_superset(fd.rhs())
}

/// Returns true if `f` and `g` imply each other.
pub fn is_equivalent<A: Ord + Clone>(f: &FdSet<A>, g: &FdSet<A>) -> bool {
    g.iter().all(|fd| implies(f, fd)) && f.iter().all(|fd| implies(g, fd))
}

impl<A: Ord + Clone + fmt::Display> FdSet<A> {
    /// Computes the closure of `seed` under this set.
    pub fn closure(&self, seed: &AttrSet<A>) -> AttrSet<A> {
        let result = closure(self, seed);
        debug!("closure(seed = {}) = {}", seed, result);
        result
    }

    /// Returns true if `fd` follows from this set.
    pub fn implies(&self, fd: &Fd<A>) -> bool {
        implies(self, fd)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::types::attrs;

    fn fd(lhs: &str, rhs: &str) -> Fd {
        Fd::new(attrs(lhs), attrs(rhs)).unwrap()
    }

    fn set(pairs: &[(&str, &str)]) -> FdSet {
        pairs.iter().map(|(l, r)| fd(l, r)).collect()
    }

    #[test]
    fn test_closure_chain() {
        let f = set(&[("A", "B"), ("B", "C")]);
        assert_eq!(f.closure(&attrs("A")), attrs("ABC"));
        assert_eq!(f.closure(&attrs("B")), attrs("BC"));
        assert_eq!(f.closure(&attrs("C")), attrs("C"));
    }

    #[test]
    fn test_closure_empty_set() {
        let f = FdSet::new();
        assert_eq!(f.closure(&attrs("AB")), attrs("AB"));
    }

    #[test]
    fn test_closure_composite_lhs() {
        let f = set(&[("AB", "C"), ("A", "D")]);
        assert_eq!(f.closure(&attrs("A")), attrs("AD"));
        assert_eq!(f.closure(&attrs("AB")), attrs("ABCD"));
    }

    #[test]
    fn test_closure_worst_order() {
        // Listed so that each pass in iteration order fires exactly one dependency
        let chain = vec![fd("D", "E"), fd("C", "D"), fd("B", "C"), fd("A", "B")];
        assert_eq!(closure(&chain, &attrs("A")), attrs("ABCDE"));
    }

    #[test]
    fn test_closure_does_not_mutate_inputs() {
        let f = set(&[("A", "B")]);
        let seed = attrs("A");
        let before = f.clone();
        let _ = f.closure(&seed);
        assert_eq!(seed, attrs("A"));
        assert_eq!(f, before);
    }

    #[test]
    fn test_closure_generic_tokens() {
        let f: FdSet<u32> = [(1, 2), (2, 3)]
            .into_iter()
            .map(|(l, r)| Fd::new(AttrSet::single(l), AttrSet::single(r)).unwrap())
            .collect();
        let result = f.closure(&AttrSet::single(1));
        assert_eq!(result.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_implies() {
        let f = set(&[("A", "B"), ("B", "C")]);
        assert!(f.implies(&fd("A", "C")));
        assert!(f.implies(&fd("A", "BC")));
        assert!(!f.implies(&fd("C", "A")));
    }

    #[test]
    fn test_equivalence() {
        let f = set(&[("A", "B"), ("B", "C"), ("A", "C")]);
        let g = set(&[("A", "B"), ("B", "C")]);
        let h = set(&[("A", "B")]);
        assert!(is_equivalent(&f, &g));
        assert!(is_equivalent(&g, &f));
        assert!(!is_equivalent(&f, &h));
    }

    #[test]
    fn test_closure_monotone_and_idempotent() {
        let f = set(&[("A", "B"), ("BC", "D"), ("D", "E"), ("E", "A")]);
        let seeds = ["A", "B", "C", "AB", "AC", "BC", "ABC", "DE"];
        for x in seeds {
            let cx = f.closure(&attrs(x));
            assert!(cx.is_superset(&attrs(x)));
            assert_eq!(f.closure(&cx), cx, "idempotence for {}", x);
            for y in seeds {
                if attrs(x).is_subset(&attrs(y)) {
                    assert!(cx.is_subset(&f.closure(&attrs(y))), "monotonicity for {} ⊆ {}", x, y);
                }
            }
        }
    }
}
