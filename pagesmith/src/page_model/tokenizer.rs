//! Inline markup tokenizer
//!
//! Segments a single line of text into plain and styled spans. The
//! recognized markers overlap (a bold `**` delimiter also looks like two
//! italic `*` delimiters), so matching runs in two steps: a combined
//! alternation finds the earliest, leftmost marker of any kind, then the
//! matched text is re-tested against the rules in priority order to decide
//! the span's shape. Marker bodies are never re-tokenized, so nested
//! markup stays literal.

use super::text_span::{Style, TextSpan};
use regex::Regex;
use std::sync::OnceLock;

/// What a matched marker turns into
#[derive(Debug, Clone, Copy)]
enum MarkerKind {
    /// `[label](url)` hyperlink
    Link,
    /// Styled run with a single annotation
    Styled(Style),
}

/// One inline markup rule: the pattern and the span it produces
struct MarkerRule {
    pattern: Regex,
    kind: MarkerKind,
}

/// Marker patterns in priority order. Order matters twice: the combined
/// alternation tries alternatives left to right on a shared start
/// position, and classification takes the first rule that re-matches.
/// Bodies are non-greedy so adjacent markers never merge.
const MARKER_PATTERNS: [(&str, MarkerKind); 7] = [
    (r"\[([^\]]+)\]\(([^)]+)\)", MarkerKind::Link),
    (r"\*\*(.*?)\*\*", MarkerKind::Styled(Style::Bold)),
    (r"__(.*?)__", MarkerKind::Styled(Style::Bold)),
    (r"\*(.*?)\*", MarkerKind::Styled(Style::Italic)),
    (r"_(.*?)_", MarkerKind::Styled(Style::Italic)),
    (r"~~(.*?)~~", MarkerKind::Styled(Style::Strikethrough)),
    (r"`(.*?)`", MarkerKind::Styled(Style::Code)),
];

/// Compiled rules in priority order
fn marker_rules() -> &'static [MarkerRule] {
    static RULES: OnceLock<Vec<MarkerRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        MARKER_PATTERNS
            .iter()
            .map(|(pattern, kind)| MarkerRule {
                pattern: Regex::new(pattern).expect("invalid marker pattern"),
                kind: *kind,
            })
            .collect()
    })
}

/// Single alternation over every marker pattern, used for the scan
fn combined_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let alternation = MARKER_PATTERNS
            .iter()
            .map(|(pattern, _)| *pattern)
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&alternation).expect("invalid combined marker pattern")
    })
}

/// Segment one line of text into plain and styled spans.
///
/// Scans left to right for the earliest marker match; text between
/// matches becomes plain spans (only when non-empty), matched markers
/// become styled or link spans. A line with no markers yields a single
/// plain span, an empty line yields no spans at all. Dangling delimiters
/// never match a complete pattern and stay literal.
pub fn tokenize(line: &str) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for matched in combined_pattern().find_iter(line) {
        if matched.start() > cursor {
            spans.push(TextSpan::plain(line[cursor..matched.start()].to_string()));
        }
        spans.push(classify(matched.as_str()));
        cursor = matched.end();
    }

    if cursor < line.len() {
        spans.push(TextSpan::plain(line[cursor..].to_string()));
    }

    spans
}

/// Decide a matched marker's span shape by re-testing the rules in
/// priority order. The first rule matching at the start of the text wins,
/// which resolves overlaps such as a bold delimiter also satisfying the
/// italic pattern.
fn classify(matched: &str) -> TextSpan {
    for rule in marker_rules() {
        let Some(caps) = rule.pattern.captures(matched) else {
            continue;
        };
        if caps.get(0).is_some_and(|m| m.start() != 0) {
            continue;
        }
        return match rule.kind {
            MarkerKind::Link => TextSpan::link(caps[1].to_string(), caps[2].to_string()),
            MarkerKind::Styled(style) => TextSpan::styled(caps[1].to_string(), style),
        };
    }

    // Unreachable for text produced by the combined alternation; keeps
    // the tokenizer total regardless.
    TextSpan::plain(matched.to_string())
}
