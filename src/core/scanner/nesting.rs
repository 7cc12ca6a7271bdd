//! Bracket depth and string-literal tracking for Python text.
//!
//! Only what the extractors need is modelled: `()[]{}` nesting, single and
//! triple quoted literals with backslash escapes, and `#` comments. String
//! prefixes (`r`, `b`, `f`) need no special handling because they precede the
//! quote character.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Quote {
    delimiter: char,
    triple: bool,
}

fn triple_of(delimiter: char) -> &'static str {
    if delimiter == '"' { "\"\"\"" } else { "'''" }
}

/// Carries nesting across the physical lines of one construct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NestingState {
    depth: usize,
    quote: Option<Quote>,
    underflow: bool,
}

/// Result of feeding one physical line into a [`NestingState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFeed<'l> {
    /// The line with any trailing comment and explicit `\` continuation removed.
    pub code: &'l str,
    /// The construct continues on the next physical line.
    pub continues: bool,
}

impl NestingState {
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn in_string(&self) -> bool {
        self.quote.is_some()
    }

    pub fn in_triple_string(&self) -> bool {
        self.quote.is_some_and(|q| q.triple)
    }

    /// No open bracket, no open literal, and no stray closer seen.
    pub fn is_balanced(&self) -> bool {
        self.depth == 0 && self.quote.is_none() && !self.underflow
    }

    /// Walk `text`, calling `visit(index, char, depth)` for every character
    /// outside string literals. `depth` is the nesting before the character
    /// applies, so an opener is reported at its outer depth and its matching
    /// closer at `outer + 1`.
    ///
    /// Returns the byte index of a `#` comment, where the walk stops.
    pub fn walk(&mut self, text: &str, mut visit: impl FnMut(usize, char, usize)) -> Option<usize> {
        let mut chars = text.char_indices();
        while let Some((i, c)) = chars.next() {
            if let Some(quote) = self.quote {
                if c == '\\' {
                    chars.next();
                } else if c == quote.delimiter {
                    if !quote.triple {
                        self.quote = None;
                    } else if text[i..].starts_with(triple_of(c)) {
                        self.quote = None;
                        chars.next();
                        chars.next();
                    }
                }
                continue;
            }

            match c {
                '#' => return Some(i),
                '"' | '\'' => {
                    let triple = text[i..].starts_with(triple_of(c));
                    if triple {
                        chars.next();
                        chars.next();
                    }
                    self.quote = Some(Quote {
                        delimiter: c,
                        triple,
                    });
                }
                '(' | '[' | '{' => {
                    visit(i, c, self.depth);
                    self.depth += 1;
                }
                ')' | ']' | '}' => {
                    visit(i, c, self.depth);
                    if self.depth == 0 {
                        self.underflow = true;
                    } else {
                        self.depth -= 1;
                    }
                }
                _ => visit(i, c, self.depth),
            }
        }
        None
    }

    /// Feed one physical line of a logical line.
    pub fn feed_line<'l>(&mut self, line: &'l str) -> LineFeed<'l> {
        let comment = self.walk(line, |_, _, _| {});
        let code = match comment {
            Some(i) => &line[..i],
            None => line,
        };
        let trimmed = code.trim_end();
        let explicit = comment.is_none() && trimmed.ends_with('\\') && !self.in_triple_string();

        // A single-quoted literal cannot span lines without a backslash.
        if self.quote.is_some_and(|q| !q.triple) && !explicit {
            self.quote = None;
        }

        let code = if explicit && self.quote.is_none() {
            &trimmed[..trimmed.len() - 1]
        } else if self.in_triple_string() {
            code
        } else {
            trimmed
        };

        LineFeed {
            code,
            continues: explicit || self.depth > 0 || self.quote.is_some(),
        }
    }
}

/// Split on `sep` where it appears outside brackets and string literals.
///
/// Pieces are trimmed and empty pieces (a trailing comma) are dropped.
/// Returns `None` when the text is unbalanced.
pub fn split_top_level(text: &str, sep: char) -> Option<Vec<&str>> {
    let mut state = NestingState::default();
    let mut cuts = Vec::new();
    let end = state
        .walk(text, |i, c, depth| {
            if c == sep && depth == 0 {
                cuts.push(i);
            }
        })
        .unwrap_or(text.len());

    if !state.is_balanced() {
        return None;
    }

    let mut pieces = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts {
        pieces.push(text[start..cut].trim());
        start = cut + sep.len_utf8();
    }
    pieces.push(text[start..end].trim());
    pieces.retain(|p| !p.is_empty());
    Some(pieces)
}

/// Byte index of the first `target` outside brackets and string literals.
pub fn find_top_level(text: &str, target: char) -> Option<usize> {
    let mut state = NestingState::default();
    let mut found = None;
    state.walk(text, |i, c, depth| {
        if found.is_none() && c == target && depth == 0 {
            found = Some(i);
        }
    });
    found
}

/// Byte index of the bracket closing the opener at `open`.
pub fn matching_close(text: &str, open: usize) -> Option<usize> {
    let tail = text.get(open..)?;
    if !tail.starts_with(['(', '[', '{']) {
        return None;
    }

    let mut state = NestingState::default();
    let mut found = None;
    state.walk(tail, |i, c, depth| {
        if found.is_none() && matches!(c, ')' | ']' | '}') && depth == 1 {
            found = Some(open + i);
        }
    });
    found
}
