use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::core::data::{ImportRecord, ModuleImport, SourceLocation};
use crate::core::patterns::{Construct, classify};
use crate::core::scanner::{Scanner, Statement};

/// `name`, `pkg.mod`, `*`, optionally followed by `as alias`.
static NAME_SPEC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\*|[^\W\d][\w.]*)(?:\s+as\s+([^\W\d]\w*))?").unwrap());

/// Extract every import statement from `source`.
///
/// Each statement yields one record located at its first line; `import a, b`
/// lists both modules in `modules`. A parenthesised list left open at
/// end-of-text yields the names that could be read before the text ran out.
pub fn extract_imports(file_path: &str, source: &str) -> Vec<ImportRecord> {
    let mut records = Vec::new();

    for statement in Scanner::new(source).statements() {
        match classify(&statement.text) {
            Some(Construct::Import { modules }) => {
                records.extend(module_import(file_path, &statement, modules));
            }
            Some(Construct::FromImport { module, names }) => {
                records.push(ImportRecord {
                    module: module.to_string(),
                    names: parse_from_names(names, &statement),
                    alias: None,
                    modules: Vec::new(),
                    location: SourceLocation::new(file_path, statement.start),
                });
            }
            _ => {}
        }
    }

    records.sort_by_key(|r| r.location.line);
    records
}

fn module_import(file_path: &str, statement: &Statement, list: &str) -> Option<ImportRecord> {
    let modules: Vec<ModuleImport> = parse_name_specs(list)
        .into_iter()
        .filter(|(name, _)| *name != "*")
        .map(|(name, alias)| ModuleImport {
            name: name.to_string(),
            alias: alias.map(str::to_string),
        })
        .collect();
    let first = modules.first()?;

    Some(ImportRecord {
        module: first.name.clone(),
        names: Vec::new(),
        alias: first.alias.clone(),
        location: SourceLocation::new(file_path, statement.start),
        modules,
    })
}

fn parse_from_names(names: &str, statement: &Statement) -> Vec<String> {
    let inner = names.strip_prefix('(').unwrap_or(names);
    let inner = inner.strip_suffix(')').unwrap_or(inner);

    if !statement.terminated {
        debug!(
            line = statement.start,
            "import list not closed before end of text"
        );
    }

    parse_name_specs(inner)
        .into_iter()
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Read comma separated name specs until one does not parse cleanly.
///
/// A piece with trailing junk (the rest of the file after an unclosed list)
/// ends the list and is not taken.
fn parse_name_specs(list: &str) -> Vec<(&str, Option<&str>)> {
    let mut specs = Vec::new();
    for piece in list.split(',') {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        let Some(caps) = NAME_SPEC_REGEX.captures(piece) else {
            break;
        };
        let Some(name) = caps.get(1) else {
            break;
        };
        let whole = caps.get(0).map_or(0, |m| m.end());
        if !piece[whole..].trim().is_empty() {
            break;
        }
        specs.push((name.as_str(), caps.get(2).map(|m| m.as_str())));
    }
    specs
}
