use crate::core::data::Severity;

/// Built-in code families, following ruff's rule prefixes.
const DEFAULT_RULES: &[(&str, Severity)] = &[
    ("E9", Severity::Error),
    ("F", Severity::Error),
    ("PLE", Severity::Error),
    ("E", Severity::Warning),
    ("W", Severity::Warning),
    ("PLW", Severity::Warning),
    ("C90", Severity::Info),
    ("D", Severity::Info),
    ("I", Severity::Info),
    ("PLC", Severity::Info),
    ("PLR", Severity::Info),
];

/// Immutable mapping from rule-code prefix to severity.
///
/// The longest matching prefix wins. A prefix ending in a letter only
/// matches codes whose next character is a digit, so `F` covers `F401` but
/// not `FBT001`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityMap {
    rules: Vec<(String, Severity)>,
    fallback: Severity,
}

impl SeverityMap {
    /// A map with no prefixes; every code gets `fallback`.
    pub fn empty(fallback: Severity) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    /// Add or replace the severity for `prefix`.
    pub fn with_rule(mut self, prefix: impl Into<String>, severity: Severity) -> Self {
        let prefix = prefix.into();
        match self.rules.iter_mut().find(|(p, _)| *p == prefix) {
            Some(entry) => entry.1 = severity,
            None => self.rules.push((prefix, severity)),
        }
        self
    }

    pub fn with_fallback(mut self, fallback: Severity) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn severity_of(&self, code: &str) -> Severity {
        self.rules
            .iter()
            .filter(|(prefix, _)| prefix_matches(prefix, code))
            .max_by_key(|(prefix, _)| prefix.len())
            .map_or(self.fallback, |(_, severity)| *severity)
    }
}

impl Default for SeverityMap {
    fn default() -> Self {
        DEFAULT_RULES
            .iter()
            .fold(Self::empty(Severity::Warning), |map, (prefix, severity)| {
                map.with_rule(*prefix, *severity)
            })
    }
}

fn prefix_matches(prefix: &str, code: &str) -> bool {
    let Some(rest) = code.strip_prefix(prefix) else {
        return false;
    };
    prefix.is_empty()
        || prefix.ends_with(|c: char| c.is_ascii_digit())
        || rest.is_empty()
        || rest.starts_with(|c: char| c.is_ascii_digit())
}
