use std::sync::LazyLock;

use regex::Regex;

static PATH_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z]:)?[\w\-.~/\\]*[\w\-~]\.[A-Za-z][A-Za-z0-9]{0,7}$").unwrap()
});

/// Files TeX currently has open, recovered from the parentheses it writes
/// around each input file.
///
/// A `(` followed by a path-like token opens a named frame. Any other `(`
/// opens an anonymous frame so that its `)` does not close a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStack {
    frames: Vec<Option<String>>,
}

impl FileStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Innermost named file.
    pub fn current(&self) -> Option<&str> {
        self.frames.iter().rev().find_map(|frame| frame.as_deref())
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// True when `line` starts by opening or closing a file, so it belongs
    /// to the stack rather than to a wrapped message.
    pub fn is_file_event(line: &str) -> bool {
        let line = line.trim_start();
        if line.starts_with(')') {
            return true;
        }
        let Some(after) = line.strip_prefix('(') else {
            return false;
        };
        let token_len = after
            .find(|c: char| c.is_whitespace() || c == '(' || c == ')')
            .unwrap_or(after.len());
        is_path_like(&after[..token_len])
    }

    pub fn track(&mut self, text: &str) {
        let mut rest = text;
        while let Some(i) = rest.find(['(', ')']) {
            if rest[i..].starts_with(')') {
                self.frames.pop();
                rest = &rest[i + 1..];
                continue;
            }

            let after = &rest[i + 1..];
            let token_len = after
                .find(|c: char| c.is_whitespace() || c == '(' || c == ')')
                .unwrap_or(after.len());
            let token = &after[..token_len];
            if is_path_like(token) {
                self.frames.push(Some(token.to_string()));
                rest = &after[token_len..];
            } else {
                self.frames.push(None);
                rest = after;
            }
        }
    }
}

fn is_path_like(token: &str) -> bool {
    PATH_TOKEN_REGEX.is_match(token)
}
