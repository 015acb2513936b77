//! Fenced Code Blocks
//!
//! Splits a document into prose and fenced segments before any rewrite runs,
//! so fence interiors stay opaque to every rule.

const FENCE: &str = "```";

/// A contiguous slice of the input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Ordinary Markdown, subject to the rewrite rules.
    Prose(&'a str),
    /// Interior of a fenced block with both delimiter lines removed.
    Fence {
        /// Text after the opening backticks, e.g. `rust`.
        info: &'a str,
        body: &'a str,
    },
}

fn is_opening(line: &str) -> bool {
    line.trim_start().starts_with(FENCE)
}

fn is_closing(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= FENCE.len() && trimmed.bytes().all(|b| b == b'`')
}

/// Partitions `text` into prose and fence segments.
///
/// Segments are returned in document order and always start at a line
/// boundary. Concatenating prose text, fence bodies, and the dropped
/// delimiter lines reproduces the input. An opening fence without a closing
/// line is left in the prose.
pub fn split_fences(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut lines = text.split_inclusive('\n');
    let mut offset = 0;
    let mut prose_start = 0;

    while let Some(line) = lines.next() {
        let line_start = offset;
        offset += line.len();

        if !is_opening(line) {
            continue;
        }

        // Find the closing delimiter without consuming lines on failure.
        let body_start = offset;
        let mut cursor = offset;
        let mut close = None;
        for candidate in text[body_start..].split_inclusive('\n') {
            if is_closing(candidate) {
                close = Some((cursor, cursor + candidate.len()));
                break;
            }
            cursor += candidate.len();
        }

        let Some((body_end, after_close)) = close else {
            break;
        };

        if prose_start < line_start {
            segments.push(Segment::Prose(&text[prose_start..line_start]));
        }
        let info = line.trim().trim_start_matches('`').trim();
        segments.push(Segment::Fence {
            info,
            body: &text[body_start..body_end],
        });

        while offset < after_close {
            match lines.next() {
                Some(skipped) => offset += skipped.len(),
                None => break,
            }
        }
        prose_start = after_close;
    }

    if prose_start < text.len() {
        segments.push(Segment::Prose(&text[prose_start..]));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_fence() {
        assert_eq!(split_fences("# a\nb"), vec![Segment::Prose("# a\nb")]);
        assert!(split_fences("").is_empty());
    }

    #[test]
    fn test_single_fence() {
        let segments = split_fences("intro\n```rust\nlet *x* = 1;\n```\noutro");
        assert_eq!(
            segments,
            vec![
                Segment::Prose("intro\n"),
                Segment::Fence { info: "rust", body: "let *x* = 1;\n" },
                Segment::Prose("outro"),
            ]
        );
    }

    #[test]
    fn test_fence_at_end_without_newline() {
        let segments = split_fences("```\n*not emphasis*\n```");
        assert_eq!(
            segments,
            vec![Segment::Fence { info: "", body: "*not emphasis*\n" }]
        );
    }

    #[test]
    fn test_empty_fence() {
        assert_eq!(
            split_fences("```\n```\n"),
            vec![Segment::Fence { info: "", body: "" }]
        );
    }

    #[test]
    fn test_unclosed_fence_is_prose() {
        let text = "a\n```\ncode *x*\n";
        assert_eq!(split_fences(text), vec![Segment::Prose(text)]);
    }

    #[test]
    fn test_info_line_does_not_close() {
        let segments = split_fences("```\n```js\n```\n");
        assert_eq!(
            segments,
            vec![Segment::Fence { info: "", body: "```js\n" }]
        );
    }

    #[test]
    fn test_two_fences() {
        let segments = split_fences("```\na\n```\nmid\n  ```\nb\n  ```\n");
        assert_eq!(
            segments,
            vec![
                Segment::Fence { info: "", body: "a\n" },
                Segment::Prose("mid\n"),
                Segment::Fence { info: "", body: "b\n" },
            ]
        );
    }
}
