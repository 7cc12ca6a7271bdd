use tracing::debug;

use super::params::parse_signature;
use crate::core::data::{FunctionRecord, SourceLocation};
use crate::core::patterns::{Construct, classify};
use crate::core::scanner::Scanner;

/// An open class or function header.
#[derive(Debug)]
struct Scope<'s> {
    indent: usize,
    name: &'s str,
}

/// Extract every `def` / `async def` in `source`.
///
/// A definition is nested when an enclosing class or function header is
/// still open at a smaller indentation. Decorators directly above a
/// definition are attached to it.
pub fn extract_functions(file_path: &str, source: &str) -> Vec<FunctionRecord> {
    let statements: Vec<_> = Scanner::new(source).statements().collect();

    let mut scopes: Vec<Scope<'_>> = Vec::new();
    let mut decorators: Vec<&str> = Vec::new();
    let mut records = Vec::new();

    for statement in &statements {
        while scopes.last().is_some_and(|s| s.indent >= statement.indent) {
            scopes.pop();
        }

        let Some(construct) = classify(&statement.text) else {
            decorators.clear();
            continue;
        };

        match construct {
            Construct::Decorator { expression } => {
                decorators.push(expression);
                continue;
            }
            Construct::Def {
                is_async,
                name,
                signature,
            } => {
                let parsed = parse_signature(signature);
                if !parsed.parsed {
                    debug!(
                        file = file_path,
                        line = statement.start,
                        function = name,
                        "could not parse parameter list"
                    );
                }

                records.push(FunctionRecord {
                    name: name.to_string(),
                    parameters: parsed.parameters,
                    return_annotation: parsed.return_annotation,
                    location: SourceLocation::new(file_path, statement.start),
                    is_nested: !scopes.is_empty(),
                    scope: scopes.last().map(|s| s.name.to_string()),
                    is_async,
                    is_decorated: !decorators.is_empty(),
                    decorators: decorators.drain(..).map(str::to_string).collect(),
                });
            }
            _ => {}
        }

        if let Some(name) = construct.block_name() {
            scopes.push(Scope {
                indent: statement.indent,
                name,
            });
        }
        decorators.clear();
    }

    records.sort_by_key(|r| r.location.line);
    records
}
