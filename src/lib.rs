//! # fd-cover: Canonical covers of functional dependencies
//!
//! **`fd-cover`** computes the **canonical (minimal) cover** of a set of functional
//! dependencies over a relation schema, the classic normalization step from
//! relational database theory.
//!
//! ## What is a canonical cover?
//!
//! Given a relation `R` and dependencies `lhs -> rhs`, the canonical cover is an
//! equivalent set in which every right-hand side is a single attribute, every
//! attribute belongs to `R`, and no dependency follows from the others.
//! For `A -> B`, `B -> C`, `A -> C` the cover is `A -> B`, `B -> C`: the last
//! dependency is implied by the first two.
//!
//! ## Basic Usage
//!
//! ```rust
//! use fd_cover::cover::MinimalCover;
//! use fd_cover::format::{parse_fd_set, parse_schema, FormatConfig};
//!
//! let config = FormatConfig::compact();
//! let schema = parse_schema("ABCDE", &config).unwrap();
//! let fds = parse_fd_set("A -> BE\nA -> C\nC -> B\nD -> F\nC -> R", &config).unwrap();
//!
//! let mc = MinimalCover::new(fds, schema);
//!
//! // 1. Split right-hand sides
//! assert_eq!(mc.simplified().len(), 6);
//! // 2. Drop D -> F and C -> R (F and R are not in the relation)
//! assert_eq!(mc.filtered().len(), 4);
//! // 3. Drop A -> B (A -> C -> B)
//! assert_eq!(mc.canonical_cover().to_string(), "{A -> C, A -> E, C -> B}");
//! ```
//!
//! ## Core Components
//!
//! - **[`types`]**: attribute tokens ([`Attr`][crate::types::Attr]) and attribute sets.
//! - **[`schema`]**: the relation, i.e. the attribute universe.
//! - **[`fd`]**: dependencies and fail-closed dependency-set construction.
//! - **[`closure`]**: attribute-set closure, implication and equivalence.
//! - **[`cover`]**: the three reduction stages and the caching [`MinimalCover`][crate::cover::MinimalCover].
//! - **[`format`]**: textual notation, parsing and rendering.
//!
//! Left-hand sides are never minimized: extraneous left-hand attributes are kept as given.

pub mod closure;
pub mod cover;
pub mod fd;
pub mod format;
pub mod schema;
pub mod types;
