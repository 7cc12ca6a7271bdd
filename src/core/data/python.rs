use serde::Serialize;

use super::source::SourceLocation;

/// One `import` / `from ... import` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRecord {
    /// Module path exactly as written, including leading dots of relative
    /// imports. For `import a, b` this is the first module.
    pub module: String,
    /// Names bound by a `from` import, in source order. Empty for `import module`.
    /// A wildcard import is the single name `*`.
    pub names: Vec<String>,
    /// `import numpy as np` keeps `np` here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Every module of an `import a, b as c` statement, in source order.
    /// Empty for `from` imports.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<ModuleImport>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleImport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// How a parameter binds arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParameterKind {
    /// Declared before a bare `/`.
    PositionalOnly,
    Positional,
    /// Declared after `*` or `*args`.
    KeywordOnly,
    /// `*args`
    VarPositional,
    /// `**kwargs`
    VarKeyword,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Name without the `*` / `**` prefix.
    pub name: String,
    pub kind: ParameterKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    pub has_default: bool,
    /// Default expression text, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionRecord {
    pub name: String,
    pub parameters: Vec<Parameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_annotation: Option<String>,
    /// Line of the `def` keyword, not of the first decorator.
    pub location: SourceLocation,
    /// True when defined inside a class or another function.
    pub is_nested: bool,
    /// Name of the nearest enclosing class or function header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub is_async: bool,
    pub is_decorated: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<String>,
}
