//! Parameter list and return annotation parsing for `def` headers.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::data::{Parameter, ParameterKind};
use crate::core::scanner::{find_top_level, matching_close, split_top_level};

static IDENTIFIER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\W\d]\w*$").unwrap());

/// What follows the function name in a `def` header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    pub parameters: Vec<Parameter>,
    pub return_annotation: Option<String>,
    /// False when the parameter text could not be parsed; `parameters` is
    /// then empty.
    pub parsed: bool,
}

/// Parse `(params) -> ret:` (optionally preceded by a `[T]` type parameter
/// list) into parameters and return annotation.
pub fn parse_signature(signature: &str) -> Signature {
    let mut rest = signature.trim_start();

    if rest.starts_with('[') {
        let Some(close) = matching_close(rest, 0) else {
            return Signature::default();
        };
        rest = rest[close + 1..].trim_start();
    }

    if !rest.starts_with('(') {
        return Signature::default();
    }
    let Some(close) = matching_close(rest, 0) else {
        return Signature::default();
    };

    let Some(parameters) = parse_parameters(&rest[1..close]) else {
        return Signature::default();
    };

    Signature {
        parameters,
        return_annotation: parse_return_annotation(&rest[close + 1..]),
        parsed: true,
    }
}

fn parse_return_annotation(after_params: &str) -> Option<String> {
    let head = match find_top_level(after_params, ':') {
        Some(colon) => &after_params[..colon],
        None => after_params,
    };
    let annotation = head.trim().strip_prefix("->")?.trim();
    (!annotation.is_empty()).then(|| annotation.to_string())
}

/// Parse the text between a header's parentheses.
///
/// Returns `None` for unbalanced text or a parameter whose name is not an
/// identifier. Bare `*` and `/` markers only change the kind of the
/// parameters around them.
pub fn parse_parameters(list: &str) -> Option<Vec<Parameter>> {
    let pieces = split_top_level(list, ',')?;
    let positional_only_end = pieces.iter().position(|p| *p == "/");

    let mut keyword_only = false;
    let mut parameters = Vec::with_capacity(pieces.len());

    for (index, piece) in pieces.iter().enumerate() {
        match *piece {
            "/" => continue,
            "*" => {
                keyword_only = true;
                continue;
            }
            _ => {}
        }

        let (kind, piece) = if let Some(rest) = piece.strip_prefix("**") {
            (ParameterKind::VarKeyword, rest)
        } else if let Some(rest) = piece.strip_prefix('*') {
            keyword_only = true;
            (ParameterKind::VarPositional, rest)
        } else if positional_only_end.is_some_and(|end| index < end) {
            (ParameterKind::PositionalOnly, *piece)
        } else if keyword_only {
            (ParameterKind::KeywordOnly, *piece)
        } else {
            (ParameterKind::Positional, *piece)
        };

        parameters.push(parse_parameter(kind, piece)?);
    }

    Some(parameters)
}

fn parse_parameter(kind: ParameterKind, piece: &str) -> Option<Parameter> {
    let (head, default) = match find_top_level(piece, '=') {
        Some(eq) => (&piece[..eq], Some(piece[eq + 1..].trim())),
        None => (piece, None),
    };
    let (name, annotation) = match find_top_level(head, ':') {
        Some(colon) => (head[..colon].trim(), Some(head[colon + 1..].trim())),
        None => (head.trim(), None),
    };

    if !IDENTIFIER_REGEX.is_match(name) {
        return None;
    }

    Some(Parameter {
        name: name.to_string(),
        kind,
        annotation: annotation.filter(|a| !a.is_empty()).map(str::to_string),
        has_default: default.is_some(),
        default: default.filter(|d| !d.is_empty()).map(str::to_string),
    })
}
