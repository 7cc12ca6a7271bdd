//! Recognition of the markers that start a diagnostic in a TeX log.

use std::sync::LazyLock;

use regex::Regex;

static ERROR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^!\s*(.*)$").unwrap());

/// `-file-line-error` style: `./chapter.tex:12: Undefined control sequence.`
static FILE_LINE_ERROR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:[A-Za-z]:)?[^\s:()]+\.[A-Za-z][A-Za-z0-9]*):(\d+):\s+(.*)$").unwrap()
});

static WARNING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:LaTeX(?P<font> Font)? Warning|Package (?P<package>\S+) Warning|Class (?P<class>\S+) Warning|pdfTeX warning)",
    )
    .unwrap()
});

static BAD_BOX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:Underfull|Overfull) \\[hv]box").unwrap());

static BOX_LINES_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bat lines? (\d+)(?:--(\d+))?").unwrap());

static INPUT_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*on input line (\d+)\.?").unwrap());

static CONTEXT_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^l\.(\d+)").unwrap());

static LINE_WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bline (\d+)").unwrap());

/// How a warning may wrap onto the following log lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// Continuation lines start with `(<name>)`.
    Prefixed(String),
    /// The message wraps until it ends with a full stop.
    Sentence,
    Single,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker<'l> {
    /// `! Undefined control sequence.`
    Error { message: &'l str },
    FileLineError {
        file: &'l str,
        line: usize,
        message: &'l str,
    },
    Warning {
        /// Byte offset of the marker; text before it is ordinary log output.
        start: usize,
        text: &'l str,
        continuation: Continuation,
    },
    BadBox {
        text: &'l str,
        line: Option<usize>,
        end_line: Option<usize>,
    },
}

pub fn match_marker(line: &str) -> Option<Marker<'_>> {
    if let Some(caps) = ERROR_REGEX.captures(line) {
        return Some(Marker::Error {
            message: caps.get(1).map_or("", |m| m.as_str().trim_end()),
        });
    }

    if let Some(caps) = FILE_LINE_ERROR_REGEX.captures(line)
        && let Ok(number) = caps[2].parse::<usize>()
        && number >= 1
    {
        return Some(Marker::FileLineError {
            file: caps.get(1).map_or("", |m| m.as_str()),
            line: number,
            message: caps.get(3).map_or("", |m| m.as_str().trim_end()),
        });
    }

    if BAD_BOX_REGEX.is_match(line) {
        let caps = BOX_LINES_REGEX.captures(line);
        let group = |i: usize| -> Option<usize> {
            caps.as_ref()
                .and_then(|c| c.get(i))
                .and_then(|m| m.as_str().parse().ok())
        };
        return Some(Marker::BadBox {
            text: line.trim_end(),
            line: group(1),
            end_line: group(2),
        });
    }

    let caps = WARNING_REGEX.captures(line)?;
    let start = caps.get(0)?.start();
    let continuation = if let Some(name) = caps.name("package").or(caps.name("class")) {
        Continuation::Prefixed(name.as_str().to_string())
    } else if caps.name("font").is_some() {
        Continuation::Prefixed("Font".to_string())
    } else if caps[0].starts_with("LaTeX") {
        Continuation::Sentence
    } else {
        Continuation::Single
    };

    Some(Marker::Warning {
        start,
        text: line[start..].trim_end(),
        continuation,
    })
}

/// Split `on input line N` out of a warning message.
pub fn split_input_line(message: &str) -> (String, Option<usize>) {
    let Some(caps) = INPUT_LINE_REGEX.captures(message) else {
        return (message.trim_end_matches('.').to_string(), None);
    };
    let line = caps[1].parse().ok().filter(|n| *n >= 1);
    let cleaned = INPUT_LINE_REGEX.replace(message, "");
    (cleaned.trim().trim_end_matches('.').to_string(), line)
}

/// `l.42 \foo` context line.
pub fn context_line(line: &str) -> Option<usize> {
    CONTEXT_LINE_REGEX
        .captures(line)
        .and_then(|c| c[1].parse().ok())
        .filter(|n| *n >= 1)
}

/// `... line 42 ...` anywhere in the text.
pub fn line_word(line: &str) -> Option<usize> {
    LINE_WORD_REGEX
        .captures(line)
        .and_then(|c| c[1].parse().ok())
        .filter(|n| *n >= 1)
}
