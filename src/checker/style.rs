//! Code-style checks: comment shape, function form, brace nesting and
//! stylesheet selector depth.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{Category, RuleTemplate};
use crate::error::Result;

use super::{Check, CheckResult, SourceFile, Violation, ensure_configured};

/// Lines above a definition searched for a section delimiter.
pub const SECTION_LOOKBACK: usize = 3;

/// `// ---`, `// ===`, `// ***`, `// ###`, `// region`, `// #region`.
static SECTION_DELIMITER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*//\s*(?:[-=*#]{3,}|#?region\b)").expect("Invalid regex")
});

pub struct CommentConventionCheck;

impl CommentConventionCheck {
    pub const NAME: &'static str = "comment-convention";

    fn header_violation(source: &SourceFile) -> Option<Violation> {
        let (line, text) = source.lines().find(|(_, text)| !text.trim().is_empty())?;
        if text.trim_start().starts_with("//") {
            return None;
        }
        Some(
            Violation::at(line, "file does not open with a '//' comment")
                .with_suggestion("start the file with a '//' header comment"),
        )
    }

    fn section_violations(source: &SourceFile) -> Vec<Violation> {
        source
            .definitions()
            .into_iter()
            .filter(|def| {
                let from = def.line.saturating_sub(SECTION_LOOKBACK).max(1);
                !(from..def.line)
                    .filter_map(|n| source.line(n))
                    .any(|text| SECTION_DELIMITER.is_match(text))
            })
            .map(|def| {
                Violation::at(def.line, format!("'{}' has no section comment", def.name))
                    .with_suggestion("add a '// ---' delimiter comment above the definition")
            })
            .collect()
    }
}

impl Check for CommentConventionCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn missing_field(&self, template: &RuleTemplate) -> Option<&'static str> {
        (!template.single_line_comment_only() && !template.require_section_comment())
            .then_some("code_style.single_line_comment_only")
    }

    fn evaluate(&self, template: &RuleTemplate, source: &SourceFile) -> Result<CheckResult> {
        ensure_configured(self, template)?;
        let mut violations = Vec::new();

        if template.single_line_comment_only() {
            violations.extend(Self::header_violation(source));
            violations.extend(source.block_comment_lines().iter().map(|&line| {
                Violation::at(line, "block comment").with_suggestion("use '//' comments")
            }));
        }
        if template.require_section_comment() {
            violations.extend(Self::section_violations(source));
        }

        violations.sort_by_key(|v| v.line);
        violations.dedup();
        Ok(CheckResult::new(Self::NAME, violations))
    }
}

/// Exported functions are declared with `function`, not bound arrows.
pub struct FunctionFormCheck;

impl FunctionFormCheck {
    pub const NAME: &'static str = "function-form";
}

impl Check for FunctionFormCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn missing_field(&self, template: &RuleTemplate) -> Option<&'static str> {
        (!template.prefer_declarative_function_form())
            .then_some("code_style.prefer_declarative_function_form")
    }

    fn evaluate(&self, template: &RuleTemplate, source: &SourceFile) -> Result<CheckResult> {
        ensure_configured(self, template)?;
        let violations = source
            .definitions()
            .into_iter()
            .filter(|def| def.arrow)
            .map(|def| {
                Violation::at(def.line, format!("'{}' is an arrow function binding", def.name))
                    .with_suggestion(format!("use 'export function {}'", def.name))
            })
            .collect();
        Ok(CheckResult::new(Self::NAME, violations))
    }
}

/// Brace nesting outside literals and comments stays within the limit.
///
/// One violation per excursion above the limit, located where the limit is
/// first exceeded and carrying the deepest level reached.
pub struct NestingDepthCheck;

impl NestingDepthCheck {
    pub const NAME: &'static str = "nesting-depth";
}

impl Check for NestingDepthCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn missing_field(&self, template: &RuleTemplate) -> Option<&'static str> {
        template
            .max_nesting_depth()
            .is_none()
            .then_some("code_style.max_nesting_depth")
    }

    fn evaluate(&self, template: &RuleTemplate, source: &SourceFile) -> Result<CheckResult> {
        ensure_configured(self, template)?;
        let Some(max) = template.max_nesting_depth() else {
            return Ok(CheckResult::pass(Self::NAME));
        };

        let excursion = |start: usize, peak: usize| {
            Violation::at(start, format!("nesting depth {peak} exceeds {max}"))
                .with_suggestion("extract the inner block into a function")
        };

        let mut violations = Vec::new();
        let mut depth = 0usize;
        // (start line, peak depth) of the excursion in progress
        let mut open: Option<(usize, usize)> = None;

        for (line, code) in source.code_lines() {
            for c in code.chars() {
                match c {
                    '{' => {
                        depth += 1;
                        if depth > max {
                            let peak = &mut open.get_or_insert((line, depth)).1;
                            *peak = (*peak).max(depth);
                        }
                    }
                    '}' => {
                        depth = depth.saturating_sub(1);
                        if depth <= max
                            && let Some((start, peak)) = open.take()
                        {
                            violations.push(excursion(start, peak));
                        }
                    }
                    _ => {}
                }
            }
        }
        if let Some((start, peak)) = open {
            violations.push(excursion(start, peak));
        }

        Ok(CheckResult::new(Self::NAME, violations))
    }
}

/// Stylesheet selectors stay within the configured compound depth.
pub struct SelectorDepthCheck;

impl SelectorDepthCheck {
    pub const NAME: &'static str = "selector-depth";
}

/// A rule head (text before `{`) and the line it starts on.
struct RuleHead {
    line: usize,
    text: String,
}

/// Collect rule heads from masked stylesheet lines.
///
/// Declarations end at `;`, blocks at `}`; `#{...}` interpolation is kept
/// inside the head.
fn rule_heads(source: &SourceFile) -> Vec<RuleHead> {
    let mut heads = Vec::new();
    let mut current = String::new();
    let mut start = 0usize;
    let mut interpolating = false;
    let mut prev = ' ';

    for (line, code) in source.code_lines() {
        for c in code.chars() {
            if interpolating {
                current.push(c);
                if c == '}' {
                    interpolating = false;
                }
            } else if c == '{' && prev == '#' {
                interpolating = true;
                current.push(c);
            } else if c == '{' {
                heads.push(RuleHead {
                    line: if start == 0 { line } else { start },
                    text: std::mem::take(&mut current),
                });
                start = 0;
            } else if c == ';' || c == '}' {
                current.clear();
                start = 0;
            } else {
                if start == 0 && !c.is_whitespace() {
                    start = line;
                }
                current.push(c);
            }
            prev = c;
        }
        current.push(' ');
        prev = ' ';
    }
    heads
}

/// Split on `sep` outside parentheses and brackets.
fn split_top_level(text: &str, is_sep: impl Fn(char) -> bool) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if depth == 0 && is_sep(c) {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    parts.push(current);
    parts
}

/// Number of compound selectors joined by descendant or explicit combinators.
fn selector_depth(selector: &str) -> usize {
    split_top_level(selector, |c| c.is_whitespace() || matches!(c, '>' | '+' | '~'))
        .iter()
        .filter(|part| !part.trim().is_empty())
        .count()
}

impl Check for SelectorDepthCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn missing_field(&self, template: &RuleTemplate) -> Option<&'static str> {
        template
            .max_selector_depth()
            .is_none()
            .then_some("code_style.max_selector_depth")
    }

    fn evaluate(&self, template: &RuleTemplate, source: &SourceFile) -> Result<CheckResult> {
        ensure_configured(self, template)?;
        let Some(max) = template.max_selector_depth() else {
            return Ok(CheckResult::pass(Self::NAME));
        };
        if source.category() != Category::Style {
            return Ok(CheckResult::pass(Self::NAME));
        }

        let mut violations = Vec::new();
        for head in rule_heads(source) {
            let text = head.text.trim();
            // at-rules and nested property groups (`font: {`)
            if text.is_empty() || text.starts_with('@') || text.ends_with(':') {
                continue;
            }
            for selector in split_top_level(text, |c| c == ',') {
                let depth = selector_depth(&selector);
                if depth > max {
                    let shown = selector.split_whitespace().collect::<Vec<_>>().join(" ");
                    violations.push(
                        Violation::at(
                            head.line,
                            format!("selector '{shown}' has depth {depth} (max {max})"),
                        )
                        .with_suggestion("flatten the selector or introduce a dedicated class"),
                    );
                }
            }
        }
        Ok(CheckResult::new(Self::NAME, violations))
    }
}

#[cfg(test)]
#[path = "style_tests.rs"]
mod tests;
