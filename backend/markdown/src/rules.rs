//! Rewrite Rules
//!
//! Each rule is a named pattern contract: match shape, capture, replacement.
//! Patterns are compiled once and run on the `regex` crate's automaton engine,
//! so every rule is linear in the length of its input.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

/// Pipeline stage a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Line-anchored structure: headings, rules, quotes, list markers.
    Block,
    /// Spans within a line: emphasis, code, images, links.
    Inline,
    /// Whole-text normalisation after every deletion has happened.
    Cleanup,
}

/// A single named rewrite.
#[derive(Debug)]
pub struct Rule {
    name: &'static str,
    stage: Stage,
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    fn compile(name: &'static str, stage: Stage, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            stage,
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Applies the rule to every match in `text`.
    ///
    /// Borrows the input untouched when nothing matches.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.pattern.replace_all(text, self.replacement)
    }

    /// Like [`Rule::apply`], also returning how many spans were rewritten.
    pub fn apply_counted<'t>(&self, text: &'t str) -> (Cow<'t, str>, usize) {
        let mut hits = 0;
        let out = self.pattern.replace_all(text, |caps: &Captures| {
            hits += 1;
            let mut dst = String::new();
            caps.expand(self.replacement, &mut dst);
            dst
        });
        (out, hits)
    }
}

/// Bullet glyph every list marker is normalised to.
pub const BULLET: &str = "• ";

/// The standard pipeline, in execution order.
///
/// Line-anchored rules run before span rules: `*` and `_` are both list or
/// rule markers and emphasis delimiters, and the span rules would otherwise
/// eat the markers. Within the inline stage wider delimiters come first
/// (`***` before `**` before `*`), and images come before links because an
/// image is a link with a leading `!`.
pub(crate) static STANDARD_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    use Stage::*;
    vec![
        Rule::compile("heading", Block, r"(?m)^#{1,6}[ \t]+", ""),
        Rule::compile(
            "horizontal_rule",
            Block,
            r"(?m)^[ \t]*(?:-{3,}|\*{3,}|_{3,})[ \t\r]*$",
            "",
        ),
        Rule::compile("blockquote", Block, r"(?m)^>[ \t]+", ""),
        Rule::compile("unordered_list", Block, r"(?m)^[ \t]*[-*+][ \t]+", BULLET),
        Rule::compile("ordered_list", Block, r"(?m)^[ \t]*[0-9]+\.[ \t]+", BULLET),
        Rule::compile("strong_emphasis_asterisk", Inline, r"\*\*\*(.+?)\*\*\*", "${1}"),
        Rule::compile("strong_emphasis_underscore", Inline, r"___(.+?)___", "${1}"),
        Rule::compile("bold_asterisk", Inline, r"\*\*(.+?)\*\*", "${1}"),
        Rule::compile("bold_underscore", Inline, r"__(.+?)__", "${1}"),
        Rule::compile("italic_asterisk", Inline, r"\*(.+?)\*", "${1}"),
        Rule::compile("italic_underscore", Inline, r"_(.+?)_", "${1}"),
        Rule::compile("strikethrough", Inline, r"~~(.+?)~~", "${1}"),
        Rule::compile("inline_code", Inline, r"`(.+?)`", "${1}"),
        Rule::compile("image", Inline, r"!\[([^\]\n]*)\]\([^)\n]*\)", "${1}"),
        Rule::compile("link", Inline, r"\[([^\]\n]*)\]\([^)\n]*\)", "${1}"),
        Rule::compile("blank_lines", Cleanup, r"\n(?:[ \t\r]*\n){2,}", "\n\n"),
    ]
});

/// Looks up a standard rule by name.
pub fn standard_rule(name: &str) -> Option<&'static Rule> {
    STANDARD_RULES.iter().find(|rule| rule.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(name: &str, text: &str) -> String {
        standard_rule(name).unwrap().apply(text).into_owned()
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<_> = STANDARD_RULES.iter().map(Rule::name).collect();
        let pos = |n: &str| names.iter().position(|x| *x == n).unwrap();

        assert!(pos("strong_emphasis_asterisk") < pos("bold_asterisk"));
        assert!(pos("bold_asterisk") < pos("italic_asterisk"));
        assert!(pos("strong_emphasis_underscore") < pos("bold_underscore"));
        assert!(pos("bold_underscore") < pos("italic_underscore"));
        assert!(pos("image") < pos("link"));
        assert!(pos("blockquote") < pos("unordered_list"));
        assert_eq!(names.last(), Some(&"blank_lines"));
    }

    #[test]
    fn test_stages_are_contiguous() {
        let stages: Vec<_> = STANDARD_RULES.iter().map(Rule::stage).collect();
        let mut sorted = stages.clone();
        sorted.sort_by_key(|s| match s {
            Stage::Block => 0,
            Stage::Inline => 1,
            Stage::Cleanup => 2,
        });
        assert_eq!(stages, sorted);
    }

    #[test]
    fn test_heading() {
        assert_eq!(apply("heading", "# Title"), "Title");
        assert_eq!(apply("heading", "###### Deep\n## Two"), "Deep\nTwo");
        assert_eq!(apply("heading", "####### seven"), "####### seven");
        assert_eq!(apply("heading", "#hashtag"), "#hashtag");
        assert_eq!(apply("heading", "text # not"), "text # not");
    }

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(apply("horizontal_rule", "a\n---\nb"), "a\n\nb");
        assert_eq!(apply("horizontal_rule", "  *****  "), "");
        assert_eq!(apply("horizontal_rule", "___\r\nx"), "\nx");
        assert_eq!(apply("horizontal_rule", "-*-"), "-*-");
        assert_eq!(apply("horizontal_rule", "--"), "--");
    }

    #[test]
    fn test_list_markers() {
        assert_eq!(apply("unordered_list", "- a\n  * b\n+ c"), "• a\n• b\n• c");
        assert_eq!(apply("unordered_list", "-nospace"), "-nospace");
        assert_eq!(apply("ordered_list", "1. a\n   10. b"), "• a\n• b");
        assert_eq!(apply("ordered_list", "1.5 apples"), "1.5 apples");
    }

    #[test]
    fn test_blockquote_is_single_level() {
        assert_eq!(apply("blockquote", "> quoted"), "quoted");
        assert_eq!(apply("blockquote", "> > twice"), "> twice");
        assert_eq!(apply("blockquote", ">>tight"), ">>tight");
    }

    #[test]
    fn test_emphasis_needs_content() {
        assert_eq!(apply("bold_asterisk", "****"), "****");
        assert_eq!(apply("italic_asterisk", "a * b"), "a * b");
        assert_eq!(apply("italic_underscore", "_x_ and _y_"), "x and y");
    }

    #[test]
    fn test_emphasis_stays_on_one_line() {
        assert_eq!(apply("italic_asterisk", "*a\nb*"), "*a\nb*");
    }

    #[test]
    fn test_image_and_link() {
        assert_eq!(apply("image", "see ![a cat](cat.png)!"), "see a cat!");
        assert_eq!(apply("link", "[](http://x) and [y](z)"), " and y");
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(apply("blank_lines", "a\n\nb"), "a\n\nb");
        assert_eq!(apply("blank_lines", "a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(apply("blank_lines", "a\n  \n\t\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_apply_counted() {
        let rule = standard_rule("strikethrough").unwrap();
        let (out, hits) = rule.apply_counted("~~a~~ b ~~c~~");
        assert_eq!(out, "a b c");
        assert_eq!(hits, 2);

        let (out, hits) = rule.apply_counted("plain");
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(hits, 0);
    }

    #[test]
    fn test_unknown_rule() {
        assert!(standard_rule("tables").is_none());
    }
}
