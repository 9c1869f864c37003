//! Textual notation for relations and dependency sets.
//!
//! A dependency is written `lhs -> rhs`, one per line in a dependency file:
//!
//! ```text
//! # students
//! roll_no -> name, age
//! name age -> roll_no
//! ```
//!
//! Attributes are separated by commas and/or whitespace. In compact mode every
//! non-whitespace character is an attribute of its own, which gives the
//! classic textbook notation:
//!
//! ```
//! use fd_cover::format::{parse_fd_set, FormatConfig};
//!
//! let config = FormatConfig::compact();
//! let fds = parse_fd_set("A -> BE\nC -> B", &config).unwrap();
//! assert_eq!(fds.len(), 2);
//! assert_eq!(fds.to_string(), "{A -> B E, C -> B}");
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use log::debug;

use crate::fd::{Fd, FdError, FdSet, FdSetBuilder};
use crate::schema::{Schema, SchemaError};
use crate::types::{Attr, AttrSet};

/// Configuration options for reading and writing dependencies.
///
/// # Examples
///
/// ```
/// use fd_cover::format::{render_fd_set, FormatConfig};
/// use fd_cover::fd::FdSet;
/// use fd_cover::types::attrs;
///
/// let fds = FdSet::try_from_pairs(vec![(attrs("AB"), attrs("C"))]).unwrap();
/// let config = FormatConfig {
///     arrow: "→",
///     separator: ",",
///     compact: false,
/// };
/// assert_eq!(render_fd_set(&fds, &config), "{A,B → C}");
/// ```
#[derive(Debug, Clone)]
pub struct FormatConfig {
    /// Arrow between the two sides (default: "->")
    pub arrow: &'static str,
    /// Separator between rendered attributes (default: " ")
    pub separator: &'static str,
    /// Single-character attributes, written without separators (default: false)
    pub compact: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            arrow: "->",
            separator: " ",
            compact: false,
        }
    }
}

impl FormatConfig {
    /// Textbook notation: `AB -> CE`.
    pub fn compact() -> Self {
        Self {
            compact: true,
            ..Self::default()
        }
    }
}

/// What went wrong while parsing a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The line has no arrow.
    MissingArrow,
    /// The line has more than one arrow.
    ExtraArrow,
    /// The dependency itself is invalid.
    Fd(FdError),
    /// The relation is invalid.
    Schema(SchemaError),
}

/// Parse error with the 1-based line it occurred on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::MissingArrow => write!(f, "line {}: missing arrow", self.line),
            ParseErrorKind::ExtraArrow => write!(f, "line {}: more than one arrow", self.line),
            ParseErrorKind::Fd(e) => write!(f, "line {}: {}", self.line, e),
            ParseErrorKind::Schema(e) => write!(f, "line {}: {}", self.line, e),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseErrorKind::MissingArrow | ParseErrorKind::ExtraArrow => None,
            ParseErrorKind::Fd(e) => Some(e),
            ParseErrorKind::Schema(e) => Some(e),
        }
    }
}

/// Error type for loading dependency files.
#[derive(Debug)]
pub enum LoadError {
    /// File I/O error.
    Io(io::Error),
    /// Parse error.
    Parse(ParseError),
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<ParseError> for LoadError {
    fn from(e: ParseError) -> Self {
        LoadError::Parse(e)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "I/O error: {}", e),
            LoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for LoadError {}

// ─── Parsing ───

/// Splits `text` into attribute names, keeping their order and repetitions.
fn split_attrs(text: &str, config: &FormatConfig) -> Vec<Attr> {
    if config.compact {
        text.chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(Attr::from)
            .collect()
    } else {
        text.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(Attr::from)
            .collect()
    }
}

/// Parses an attribute set such as `A, B` (or `AB` in compact mode).
pub fn parse_attrs(text: &str, config: &FormatConfig) -> AttrSet {
    split_attrs(text, config).into_iter().collect()
}

fn parse_fd_line(line: &str, config: &FormatConfig) -> Result<(AttrSet, AttrSet), ParseErrorKind> {
    let (lhs, rhs) = line.split_once(config.arrow).ok_or(ParseErrorKind::MissingArrow)?;
    if rhs.contains(config.arrow) {
        return Err(ParseErrorKind::ExtraArrow);
    }
    Ok((parse_attrs(lhs, config), parse_attrs(rhs, config)))
}

/// Parses a single dependency such as `A -> B, E`.
pub fn parse_fd(line: &str, config: &FormatConfig) -> Result<Fd, ParseError> {
    let wrap = |kind| ParseError { line: 1, kind };
    let (lhs, rhs) = parse_fd_line(line, config).map_err(wrap)?;
    Fd::new(lhs, rhs).map_err(|e| wrap(ParseErrorKind::Fd(e)))
}

/// Parses a dependency set, one dependency per line.
///
/// Blank lines and lines starting with `#` are skipped. Any bad line fails
/// the whole set.
pub fn parse_fd_set(text: &str, config: &FormatConfig) -> Result<FdSet, ParseError> {
    let mut builder = FdSetBuilder::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let wrap = |kind| ParseError { line: index + 1, kind };
        let (lhs, rhs) = parse_fd_line(line, config).map_err(wrap)?;
        builder.add(lhs, rhs).map_err(|e| wrap(ParseErrorKind::Fd(e)))?;
    }
    let fds = builder
        .build()
        .map_err(|e| ParseError { line: 0, kind: ParseErrorKind::Fd(e) })?;
    debug!("parse_fd_set: {} dependencies", fds.len());
    Ok(fds)
}

/// Parses a relation such as `A, B, C` (or `ABC` in compact mode).
pub fn parse_schema(text: &str, config: &FormatConfig) -> Result<Schema, ParseError> {
    Schema::new(split_attrs(text, config)).map_err(|e| ParseError {
        line: 1,
        kind: ParseErrorKind::Schema(e),
    })
}

/// Reads a dependency file.
pub fn load_fd_set<P: AsRef<Path>>(path: P, config: &FormatConfig) -> Result<FdSet, LoadError> {
    let content = fs::read_to_string(path)?;
    Ok(parse_fd_set(&content, config)?)
}

// ─── Rendering ───

fn write_attrs<A: fmt::Display>(out: &mut impl fmt::Write, attrs: &AttrSet<A>, config: &FormatConfig) -> fmt::Result {
    let separator = if config.compact { "" } else { config.separator };
    for (i, attr) in attrs.iter().enumerate() {
        if i > 0 {
            out.write_str(separator)?;
        }
        write!(out, "{}", attr)?;
    }
    Ok(())
}

fn write_fd<A: fmt::Display>(out: &mut impl fmt::Write, fd: &Fd<A>, config: &FormatConfig) -> fmt::Result {
    write_attrs(out, fd.lhs(), config)?;
    write!(out, " {} ", config.arrow)?;
    write_attrs(out, fd.rhs(), config)
}

fn write_fd_set<A: fmt::Display>(out: &mut impl fmt::Write, fds: &FdSet<A>, config: &FormatConfig) -> fmt::Result {
    out.write_str("{")?;
    for (i, fd) in fds.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write_fd(out, fd, config)?;
    }
    out.write_str("}")
}

/// Renders an attribute set, e.g. `A B` (or `AB` in compact mode).
pub fn render_attrs<A: fmt::Display>(attrs: &AttrSet<A>, config: &FormatConfig) -> String {
    let mut out = String::new();
    let _ = write_attrs(&mut out, attrs, config);
    out
}

/// Renders one dependency, e.g. `A B -> C`.
pub fn render_fd<A: fmt::Display>(fd: &Fd<A>, config: &FormatConfig) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_fd(&mut out, fd, config);
    out
}

/// Renders a dependency set, e.g. `{A -> B, B -> C}`.
pub fn render_fd_set<A: fmt::Display>(fds: &FdSet<A>, config: &FormatConfig) -> String {
    let mut out = String::new();
    let _ = write_fd_set(&mut out, fds, config);
    out
}

/// Renders a dependency set as a dependency file that [`parse_fd_set`] reads back.
pub fn to_fd_file<A: fmt::Display>(fds: &FdSet<A>, config: &FormatConfig) -> String {
    let mut out = String::new();
    for fd in fds {
        out.push_str(&render_fd(fd, config));
        out.push('\n');
    }
    out
}

impl<A: fmt::Display> fmt::Display for Fd<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fd(f, self, &FormatConfig::default())
    }
}

impl<A: fmt::Display> fmt::Display for FdSet<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fd_set(f, self, &FormatConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::types::attrs;

    #[test]
    fn test_parse_attrs() {
        let config = FormatConfig::default();
        let set = parse_attrs("roll_no, name  age", &config);
        assert_eq!(set.len(), 3);
        assert!(set.contains(&Attr::from("roll_no")));

        let compact = FormatConfig::compact();
        assert_eq!(parse_attrs("A B,E", &compact), attrs("ABE"));
        assert_eq!(parse_attrs("BE", &compact), attrs("BE"));
    }

    #[test]
    fn test_parse_fd() {
        let fd = parse_fd("roll_no -> name, age", &FormatConfig::default()).unwrap();
        assert_eq!(fd.lhs().len(), 1);
        assert_eq!(fd.rhs().len(), 2);
        assert_eq!(fd.to_string(), "roll_no -> age name");
    }

    #[test]
    fn test_parse_fd_errors() {
        let config = FormatConfig::compact();
        assert_eq!(
            parse_fd("AB", &config),
            Err(ParseError {
                line: 1,
                kind: ParseErrorKind::MissingArrow
            })
        );
        let err = parse_fd("AB -> BA", &config).unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::Fd(FdError::Trivial(_))));
        let err = parse_fd(" -> A", &config).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Fd(FdError::EmptyLhs));
    }

    #[test]
    fn test_parse_fd_rejects_chained_arrows() {
        let err = parse_fd("A -> B -> C", &FormatConfig::compact()).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExtraArrow);
        let err = parse_fd("a -> b -> c", &FormatConfig::default()).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExtraArrow);
        assert_eq!(err.to_string(), "line 1: more than one arrow");

        let err = parse_fd_set("A -> B\nB -> C -> D\n", &FormatConfig::compact()).unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, ParseErrorKind::ExtraArrow);
    }

    #[test]
    fn test_parse_fd_set() {
        let text = "# comment\nA -> BE\n\nA -> C\nC -> B\n";
        let fds = parse_fd_set(text, &FormatConfig::compact()).unwrap();
        assert_eq!(fds.len(), 3);
        assert_eq!(fds.to_string(), "{A -> B E, A -> C, C -> B}");
    }

    #[test]
    fn test_parse_fd_set_fails_closed() {
        let text = "A -> B\nC -> D\nAB -> AB\nE -> F\n";
        let err = parse_fd_set(text, &FormatConfig::compact()).unwrap_err();
        assert_eq!(err.line, 3);
        assert!(matches!(err.kind, ParseErrorKind::Fd(FdError::Trivial(_))));
        assert_eq!(err.to_string(), "line 3: trivial dependency {A, B} -> {A, B}");
    }

    #[test]
    fn test_parse_schema() {
        let schema = parse_schema("ABCDE", &FormatConfig::compact()).unwrap();
        assert_eq!(schema.len(), 5);
        // Without compact mode the same text is one attribute
        let schema = parse_schema("ABCDE", &FormatConfig::default()).unwrap();
        assert_eq!(schema.len(), 1);
        let err = parse_schema("A, B, A", &FormatConfig::default()).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Schema(SchemaError::Duplicate("A".to_string())));
    }

    #[test]
    fn test_render() {
        let fds = parse_fd_set("AB -> C\nD -> EF", &FormatConfig::compact()).unwrap();
        assert_eq!(render_fd_set(&fds, &FormatConfig::compact()), "{AB -> C, D -> EF}");
        assert_eq!(render_fd_set(&fds, &FormatConfig::default()), "{A B -> C, D -> E F}");
        let first = fds.iter().next().unwrap();
        assert_eq!(render_fd(first, &FormatConfig::compact()), "AB -> C");
    }

    #[test]
    fn test_render_generic_tokens() {
        let fds: FdSet<u32> = [(1, 2), (2, 3)]
            .into_iter()
            .map(|(l, r)| Fd::new(AttrSet::single(l), AttrSet::single(r)).unwrap())
            .collect();
        assert_eq!(fds.to_string(), "{1 -> 2, 2 -> 3}");
        assert_eq!(render_fd_set(&fds, &FormatConfig::compact()), "{1 -> 2, 2 -> 3}");
        let first = fds.iter().next().unwrap();
        assert_eq!(first.to_string(), "1 -> 2");
        assert_eq!(render_attrs(first.rhs(), &FormatConfig::default()), "2");
    }

    #[test]
    fn test_render_attrs() {
        let set = attrs("ABE");
        assert_eq!(render_attrs(&set, &FormatConfig::compact()), "ABE");
        assert_eq!(render_attrs(&set, &FormatConfig::default()), "A B E");
    }

    #[test]
    fn test_fd_file_reads_back() {
        let config = FormatConfig::default();
        let fds = parse_fd_set("roll_no -> name, age\nname age -> roll_no", &config).unwrap();
        let text = to_fd_file(&fds, &config);
        assert_eq!(parse_fd_set(&text, &config).unwrap(), fds);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_fd_set("/nonexistent/dependencies.fd", &FormatConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
