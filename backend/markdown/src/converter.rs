//! Plain Text Converter
//!
//! Runs the ordered rule pipeline over every prose segment, splices fence
//! bodies back in verbatim, then normalises blank lines across the result.

use std::borrow::Cow;
use std::ops::Range;

use serde::Serialize;
use tracing::{debug, trace};

use crate::fence::{split_fences, Segment};
use crate::rules::{Rule, Stage, STANDARD_RULES};

/// Hit count for one rule over a whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleHits {
    pub rule: &'static str,
    pub stage: Stage,
    pub hits: usize,
}

/// What a conversion did, rule by rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub rules: Vec<RuleHits>,
    pub fences: usize,
    pub input_lines: usize,
    pub output_lines: usize,
}

impl ConversionReport {
    /// Hits recorded for `rule`, zero if the rule is unknown.
    pub fn hits(&self, rule: &str) -> usize {
        self.rules
            .iter()
            .find(|r| r.rule == rule)
            .map(|r| r.hits)
            .unwrap_or(0)
    }

    /// Total rewrites across all rules.
    pub fn total_hits(&self) -> usize {
        self.rules.iter().map(|r| r.hits).sum()
    }
}

/// Markdown to plain text converter.
///
/// Holds only a reference to the compiled pipeline, so it is cheap to copy
/// and safe to share across threads.
#[derive(Debug, Clone, Copy)]
pub struct Converter {
    rules: &'static [Rule],
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    pub fn new() -> Self {
        Self {
            rules: STANDARD_RULES.as_slice(),
        }
    }

    /// The rules in execution order.
    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Converts `markdown` to plain text.
    pub fn convert(&self, markdown: &str) -> String {
        if markdown.is_empty() {
            return String::new();
        }
        let (out, _) = self.run(markdown, |_, _| {});
        out
    }

    /// Converts `markdown` and reports how often each rule fired.
    pub fn convert_with_report(&self, markdown: &str) -> (String, ConversionReport) {
        let mut report = ConversionReport {
            rules: self
                .rules
                .iter()
                .map(|rule| RuleHits {
                    rule: rule.name(),
                    stage: rule.stage(),
                    hits: 0,
                })
                .collect(),
            input_lines: markdown.lines().count(),
            ..Default::default()
        };
        if markdown.is_empty() {
            return (String::new(), report);
        }

        let (out, fences) = self.run(markdown, |idx, hits| {
            let entry = &mut report.rules[idx];
            trace!(rule = entry.rule, hits, "Rule applied");
            entry.hits += hits;
        });
        report.fences = fences;
        report.output_lines = out.lines().count();
        debug!(
            fences = report.fences,
            rewrites = report.total_hits(),
            input_lines = report.input_lines,
            output_lines = report.output_lines,
            "Converted markdown"
        );
        (out, report)
    }

    /// One pass over the document. `on_hit` receives the index of each rule
    /// that fired and its match count. Returns the text and the fence count.
    ///
    /// Block and inline rules see prose only. Cleanup rules run afterwards on
    /// the joined output, so blank runs left by deleted fence delimiters are
    /// collapsed too; only the interior lines of fences are held back.
    fn run<F>(&self, markdown: &str, mut on_hit: F) -> (String, usize)
    where
        F: FnMut(usize, usize),
    {
        let mut joined = String::with_capacity(markdown.len());
        let mut bodies: Vec<Range<usize>> = Vec::new();

        for segment in split_fences(markdown) {
            match segment {
                Segment::Prose(text) => {
                    let mut current = Cow::Borrowed(text);
                    for (idx, rule) in self.rules.iter().enumerate() {
                        if rule.stage() == Stage::Cleanup {
                            continue;
                        }
                        if let Some(next) = apply_rule(rule, idx, &current, &mut on_hit) {
                            current = Cow::Owned(next);
                        }
                    }
                    joined.push_str(&current);
                }
                Segment::Fence { info, body } => {
                    trace!(info, bytes = body.len(), "Kept fenced block");
                    let start = joined.len();
                    joined.push_str(body);
                    bodies.push(start..joined.len());
                }
            }
        }

        let fences = bodies.len();
        let mut out = String::with_capacity(joined.len());
        let mut cursor = 0;
        for body in bodies.iter().filter(|body| !body.is_empty()) {
            // The body's last newline ends its final line; it stays with the
            // following text so a blank run starting there still collapses.
            let held_end = if joined[..body.end].ends_with('\n') {
                body.end - 1
            } else {
                body.end
            };
            out.push_str(&self.cleanup(&joined[cursor..body.start], &mut on_hit));
            out.push_str(&joined[body.start..held_end]);
            cursor = held_end;
        }
        out.push_str(&self.cleanup(&joined[cursor..], &mut on_hit));
        (out, fences)
    }

    fn cleanup<'t, F>(&self, text: &'t str, on_hit: &mut F) -> Cow<'t, str>
    where
        F: FnMut(usize, usize),
    {
        let mut current = Cow::Borrowed(text);
        for (idx, rule) in self.rules.iter().enumerate() {
            if rule.stage() != Stage::Cleanup {
                continue;
            }
            if let Some(next) = apply_rule(rule, idx, &current, on_hit) {
                current = Cow::Owned(next);
            }
        }
        current
    }
}

/// Applies `rule`, returning the new text only when something matched.
fn apply_rule<F>(rule: &Rule, idx: usize, text: &str, on_hit: &mut F) -> Option<String>
where
    F: FnMut(usize, usize),
{
    match rule.apply_counted(text) {
        (Cow::Owned(next), hits) => {
            on_hit(idx, hits);
            Some(next)
        }
        (Cow::Borrowed(_), _) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_short_circuits() {
        let converter = Converter::new();
        assert_eq!(converter.convert(""), "");
        let (text, report) = converter.convert_with_report("");
        assert_eq!(text, "");
        assert_eq!(report.total_hits(), 0);
        assert_eq!(report.rules.len(), converter.rules().len());
    }

    #[test]
    fn test_report_counts_hits() {
        let (text, report) =
            Converter::new().convert_with_report("# T\n\n- **a**\n- *b*\n\n```\n# raw\n```\n");
        assert_eq!(text, "T\n\n• a\n• b\n\n# raw\n");
        assert_eq!(report.hits("heading"), 1);
        assert_eq!(report.hits("unordered_list"), 2);
        assert_eq!(report.hits("bold_asterisk"), 1);
        assert_eq!(report.hits("italic_asterisk"), 1);
        assert_eq!(report.hits("link"), 0);
        assert_eq!(report.fences, 1);
        assert_eq!(report.input_lines, 8);
        assert_eq!(report.output_lines, 6);
    }

    #[test]
    fn test_report_counts_collapse_across_fence() {
        let (text, report) = Converter::new().convert_with_report("a\n\n\n```\n```\n\n\nb");
        assert_eq!(text, "a\n\nb");
        assert_eq!(report.fences, 1);
        assert_eq!(report.hits("blank_lines"), 1);

        let (text, report) =
            Converter::new().convert_with_report("p\n\n\n\n```\nx\n\n\n\ny\n```\n\n\nq");
        assert_eq!(text, "p\n\nx\n\n\n\ny\n\nq");
        assert_eq!(report.hits("blank_lines"), 2);
    }

    #[test]
    fn test_report_matches_plain_convert() {
        let input = "> quote with [link](x)\n\n\n\n1. one\n---\n~~gone~~ `code`";
        let converter = Converter::new();
        let (text, _) = converter.convert_with_report(input);
        assert_eq!(text, converter.convert(input));
    }

    #[test]
    fn test_report_serializes() {
        let (_, report) = Converter::new().convert_with_report("**x**");
        let json = serde_json::to_value(&report).unwrap();
        let bold = json["rules"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["rule"] == "bold_asterisk")
            .unwrap();
        assert_eq!(bold["hits"], 1);
        assert_eq!(bold["stage"], "inline");
    }
}
