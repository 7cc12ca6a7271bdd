//! Statement-head matchers for Python source.
//!
//! Each matcher inspects one logical line and either declines or returns a
//! tagged [`Construct`] carrying the captured pieces. Extractors combine them
//! through [`classify`] and never slice statement text themselves.

use std::sync::LazyLock;

use regex::Regex;

static IMPORT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)^import\s+(.*)$").unwrap());

static FROM_IMPORT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^from\s+(\.+[\w.]*|[\w.]+)\s*import\b\s*(.*)$").unwrap()
});

static DEF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(async\s+)?def\s+([^\W\d]\w*)\s*(.*)$").unwrap());

static CLASS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^class\s+([^\W\d]\w*)").unwrap());

static DECORATOR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)^@\s*(.+)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructKind {
    Import,
    FromImport,
    Def,
    Class,
    Decorator,
}

/// A recognised statement head with its captured groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct<'s> {
    /// `import a.b as c, d`: `modules` is everything after the keyword.
    Import { modules: &'s str },
    /// `from .pkg import (x, y)`: `names` may still carry parentheses.
    FromImport { module: &'s str, names: &'s str },
    /// `signature` starts at the parameter list (or a type parameter list).
    Def {
        is_async: bool,
        name: &'s str,
        signature: &'s str,
    },
    Class { name: &'s str },
    Decorator { expression: &'s str },
}

impl<'s> Construct<'s> {
    pub fn kind(&self) -> ConstructKind {
        match self {
            Construct::Import { .. } => ConstructKind::Import,
            Construct::FromImport { .. } => ConstructKind::FromImport,
            Construct::Def { .. } => ConstructKind::Def,
            Construct::Class { .. } => ConstructKind::Class,
            Construct::Decorator { .. } => ConstructKind::Decorator,
        }
    }

    /// Name of the indented block this construct opens, if any.
    pub fn block_name(&self) -> Option<&'s str> {
        match self {
            Construct::Def { name, .. } | Construct::Class { name } => Some(*name),
            _ => None,
        }
    }
}

pub type Matcher = for<'s> fn(&'s str) -> Option<Construct<'s>>;

/// Tried in order; the first match wins.
pub const MATCHERS: &[Matcher] = &[
    match_from_import,
    match_import,
    match_def,
    match_class,
    match_decorator,
];

pub fn classify(statement: &str) -> Option<Construct<'_>> {
    MATCHERS.iter().find_map(|matcher| matcher(statement))
}

pub fn match_import(statement: &str) -> Option<Construct<'_>> {
    let caps = IMPORT_REGEX.captures(statement)?;
    Some(Construct::Import {
        modules: caps.get(1)?.as_str().trim(),
    })
}

pub fn match_from_import(statement: &str) -> Option<Construct<'_>> {
    let caps = FROM_IMPORT_REGEX.captures(statement)?;
    Some(Construct::FromImport {
        module: caps.get(1)?.as_str(),
        names: caps.get(2)?.as_str().trim(),
    })
}

pub fn match_def(statement: &str) -> Option<Construct<'_>> {
    let caps = DEF_REGEX.captures(statement)?;
    Some(Construct::Def {
        is_async: caps.get(1).is_some(),
        name: caps.get(2)?.as_str(),
        signature: caps.get(3)?.as_str(),
    })
}

pub fn match_class(statement: &str) -> Option<Construct<'_>> {
    let caps = CLASS_REGEX.captures(statement)?;
    Some(Construct::Class {
        name: caps.get(1)?.as_str(),
    })
}

pub fn match_decorator(statement: &str) -> Option<Construct<'_>> {
    let caps = DECORATOR_REGEX.captures(statement)?;
    Some(Construct::Decorator {
        expression: caps.get(1)?.as_str().trim(),
    })
}
