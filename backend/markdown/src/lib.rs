//! Markdown to Plain Text Conversion
//!
//! Strips a constrained subset of Markdown down to readable plain text with
//! an ordered pipeline of named pattern rewrites. Fenced code blocks are cut
//! out first and passed through untouched.
//!
//! ```
//! assert_eq!(mdplain_markdown::convert("*em* and **strong**"), "em and strong");
//! assert_eq!(mdplain_markdown::convert("1. a\n2. b"), "• a\n• b");
//! ```

pub mod converter;
pub mod fence;
pub mod rules;

pub use converter::{ConversionReport, Converter, RuleHits};
pub use fence::{split_fences, Segment};
pub use rules::{standard_rule, Rule, Stage, BULLET};

/// Converts `markdown` to plain text with the standard pipeline.
///
/// Total: every input, however malformed, yields a best-effort result.
pub fn convert(markdown: &str) -> String {
    Converter::new().convert(markdown)
}
