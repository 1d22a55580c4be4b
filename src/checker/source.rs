//! Text model of one checked file.
//!
//! Checks work on raw text with regular expressions, not on a syntax tree.
//! To keep brace counting and keyword matching from tripping over string
//! literals and comments, `SourceFile` also keeps a *masked* copy of every
//! line where literal and comment contents are replaced by spaces. Line and
//! column positions are identical between the two views.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::config::Category;

/// Exported function/class/binding definitions.
static EXPORT_DEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*export\s+(?:default\s+)?(?:declare\s+)?(?:async\s+)?(?:function\s*\*?\s*|class\s+|(?:const|let|var)\s+)([A-Za-z_$][\w$]*)",
    )
    .expect("Invalid regex")
});

/// Exported bindings built by a store factory call.
static STORE_DEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*export\s+(?:const|let)\s+([A-Za-z_$][\w$]*)\s*(?::[^=]+)?=\s*(?:create|createStore|defineStore)\b",
    )
    .expect("Invalid regex")
});

/// Arrow-function bindings: `export const x = (...) =>` / `export const x = async y =>`.
static ARROW_DEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*export\s+(?:const|let)\s+[A-Za-z_$][\w$]*\s*(?::[^=]+)?=\s*(?:async\s*)?(?:<[^>]*>\s*)?(?:\([^)]*\)|[A-Za-z_$][\w$]*)\s*(?::[^=]+)?=>",
    )
    .expect("Invalid regex")
});

/// An exported definition found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    /// 1-based line of the definition.
    pub line: usize,
    /// Defined as an arrow function bound to a variable.
    pub arrow: bool,
}

/// One file under check: raw lines plus the masked view.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    category: Category,
    text: String,
    masked: Vec<String>,
    block_comment_lines: Vec<usize>,
}

impl SourceFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, category: Category, text: impl Into<String>) -> Self {
        let text = text.into();
        let masked = mask(&text, category);
        Self {
            path: path.into(),
            category,
            text,
            masked: masked.lines,
            block_comment_lines: masked.block_comment_lines,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Raw lines, paired with their 1-based line numbers.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.text.lines().enumerate().map(|(i, l)| (i + 1, l))
    }

    /// Masked lines (literals and comments blanked), paired with 1-based numbers.
    pub fn code_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.masked
            .iter()
            .enumerate()
            .map(|(i, l)| (i + 1, l.as_str()))
    }

    /// Raw text of a 1-based line.
    #[must_use]
    pub fn line(&self, number: usize) -> Option<&str> {
        number.checked_sub(1).and_then(|i| self.text.lines().nth(i))
    }

    /// Lines on which a block comment (`/*`) opens.
    #[must_use]
    pub fn block_comment_lines(&self) -> &[usize] {
        &self.block_comment_lines
    }

    /// 1-based line containing a byte offset of the raw text.
    #[must_use]
    pub fn line_of_offset(&self, offset: usize) -> usize {
        let end = offset.min(self.text.len());
        self.text.as_bytes()[..end]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            + 1
    }

    /// Raw text of `count` lines starting at the 1-based line `start`.
    #[must_use]
    pub fn window(&self, start: usize, count: usize) -> String {
        self.text
            .lines()
            .skip(start.saturating_sub(1))
            .take(count)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Exported definitions of the shape relevant to the file's category.
    ///
    /// Store files report only bindings built by a store factory call; other
    /// script categories report every exported function, class or binding.
    /// Stylesheets and locale bundles have no definitions.
    #[must_use]
    pub fn definitions(&self) -> Vec<Definition> {
        let shape: &Regex = match self.category {
            Category::Store => &STORE_DEF,
            Category::Hook => &EXPORT_DEF,
            Category::Style | Category::Locale => return Vec::new(),
        };

        self.code_lines()
            .filter_map(|(line, code)| {
                shape.captures(code).map(|caps| Definition {
                    name: caps[1].to_string(),
                    line,
                    arrow: ARROW_DEF.is_match(code),
                })
            })
            .collect()
    }
}

struct Masked {
    lines: Vec<String>,
    block_comment_lines: Vec<usize>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Str(char),
}

/// Blank out string literals and comments, keeping line structure.
///
/// Locale bundles are JSON and are returned unmasked.
fn mask(text: &str, category: Category) -> Masked {
    if category == Category::Locale {
        return Masked {
            lines: text.lines().map(str::to_string).collect(),
            block_comment_lines: Vec::new(),
        };
    }

    let mut lines = Vec::new();
    let mut block_comment_lines = Vec::new();
    let mut state = State::Code;

    for (idx, raw) in text.lines().enumerate() {
        let chars: Vec<char> = raw.chars().collect();
        let mut out = String::with_capacity(raw.len());
        let mut i = 0;

        if state == State::LineComment {
            state = State::Code;
        }

        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();
            match state {
                State::Code => {
                    if c == '/' && next == Some('*') {
                        block_comment_lines.push(idx + 1);
                        state = State::BlockComment;
                        out.push_str("  ");
                        i += 2;
                        continue;
                    }
                    if c == '/' && next == Some('/') && starts_line_comment(&chars, i, category) {
                        state = State::LineComment;
                        out.push(' ');
                    } else if matches!(c, '"' | '\'' | '`') {
                        state = State::Str(c);
                        out.push(c);
                    } else {
                        out.push(c);
                    }
                }
                State::LineComment => out.push(' '),
                State::BlockComment => {
                    if c == '*' && next == Some('/') {
                        state = State::Code;
                        out.push_str("  ");
                        i += 2;
                        continue;
                    }
                    out.push(' ');
                }
                State::Str(quote) => {
                    if c == '\\' {
                        out.push(' ');
                        if next.is_some() {
                            out.push(' ');
                        }
                        i += 2;
                        continue;
                    }
                    if c == quote {
                        state = State::Code;
                        out.push(c);
                    } else {
                        out.push(' ');
                    }
                }
            }
            i += 1;
        }

        // Plain quotes do not span lines; an unterminated one ends here.
        if matches!(state, State::Str('"' | '\'')) {
            state = State::Code;
        }
        lines.push(out);
    }

    Masked {
        lines,
        block_comment_lines,
    }
}

/// In stylesheets `//` only opens a comment at a token boundary, so that
/// `url(http://...)` stays code.
fn starts_line_comment(chars: &[char], i: usize, category: Category) -> bool {
    if category != Category::Style {
        return true;
    }
    i == 0 || chars[i - 1].is_whitespace() || matches!(chars[i - 1], ';' | '{' | '}')
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
