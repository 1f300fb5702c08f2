//! Line-oriented block classifier and assembler
//!
//! Consumes a document line by line, deciding each line's block type and
//! running the inline tokenizer over the line's text content. Multi-line
//! state (an open code fence, numbered-list continuity) lives in the
//! parser and resets where the dialect demands it. Every input string
//! converts without error; malformed markup degrades to literal text.

use super::blocks::Block;
use super::tokenizer::tokenize;
use regex::Regex;
use std::sync::OnceLock;

/// Language tag used when a fence opener carries none
const DEFAULT_FENCE_LANGUAGE: &str = "plain text";

/// `<digits>. <rest>` ordered-list prefix
fn numbered_item_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d+)\.\s+(.+)").expect("invalid list item pattern"))
}

/// Parser state for converting lines to blocks
///
/// All state is scoped to a single conversion call and discarded with the
/// parser; concurrent conversions share nothing.
pub struct DocumentParser {
    /// Blocks emitted so far, in source order
    blocks: Vec<Block>,

    /// Whether the current line is inside an open code fence
    in_code_fence: bool,

    /// Language tag captured from the fence opener
    fence_language: String,

    /// Lines accumulated since the fence opened
    fence_buffer: Vec<String>,

    /// Consecutive numbered-list lines seen, reset by blank lines
    numbered_run_length: usize,
}

impl DocumentParser {
    /// Create a parser with empty state
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            in_code_fence: false,
            fence_language: String::new(),
            fence_buffer: Vec::new(),
            numbered_run_length: 0,
        }
    }

    /// Convert a whole document into an ordered block sequence.
    ///
    /// # Parameters
    /// * `content` - Raw markup content, any string accepted
    ///
    /// # Returns
    /// * `Vec<Block>` - Blocks in source-line order; blank lines emit
    ///   nothing and an unterminated trailing fence is dropped
    pub fn parse(content: &str) -> Vec<Block> {
        let mut parser = Self::new();

        for line in content.lines() {
            parser.process_line(line.trim());
        }

        // Lines still buffered here belong to a fence that never closed;
        // they are dropped rather than reported.
        parser.blocks
    }

    /// Classify a single trimmed line and emit its block, if any
    fn process_line(&mut self, line: &str) {
        if let Some(tag) = line.strip_prefix("```") {
            self.toggle_fence(tag);
        } else if self.in_code_fence {
            self.fence_buffer.push(line.to_string());
        } else if line.is_empty() {
            self.reset_numbered_run();
        } else if let Some(rest) = line.strip_prefix("### ") {
            self.blocks.push(Block::Heading3 {
                rich_text: tokenize(rest),
            });
        } else if let Some(rest) = line.strip_prefix("## ") {
            self.blocks.push(Block::Heading2 {
                rich_text: tokenize(rest),
            });
        } else if let Some(rest) = line.strip_prefix("# ") {
            self.blocks.push(Block::Heading1 {
                rich_text: tokenize(rest),
            });
        } else if let Some(caps) = numbered_item_pattern().captures(line) {
            // The declared numeral (group 1) is discarded; items are
            // positional and the run length only tracks continuity.
            self.blocks.push(Block::NumberedListItem {
                rich_text: tokenize(&caps[2]),
            });
            self.numbered_run_length += 1;
        } else if let Some(rest) = line.strip_prefix("- ") {
            self.blocks.push(Block::BulletedListItem {
                rich_text: tokenize(rest),
            });
        } else if let Some(rest) = line.strip_prefix("> ") {
            self.blocks.push(Block::Quote {
                rich_text: tokenize(rest),
            });
        } else if line == "---" {
            self.blocks.push(Block::Divider);
        } else {
            self.blocks.push(Block::Paragraph {
                rich_text: tokenize(line),
            });
        }
    }

    /// Open a fence, or close it and emit the buffered code block
    fn toggle_fence(&mut self, tag: &str) {
        if self.in_code_fence {
            let body = self.fence_buffer.join("\n");
            self.blocks
                .push(Block::code(body, std::mem::take(&mut self.fence_language)));
            self.fence_buffer.clear();
            self.in_code_fence = false;
        } else {
            self.in_code_fence = true;
            let tag = tag.trim();
            self.fence_language = if tag.is_empty() {
                DEFAULT_FENCE_LANGUAGE.to_string()
            } else {
                tag.to_string()
            };
        }
    }

    /// Blank line: numbered-list continuity ends here
    fn reset_numbered_run(&mut self) {
        if self.numbered_run_length > 0 {
            log::debug!(
                "numbered list run ended after {} items",
                self.numbered_run_length
            );
            self.numbered_run_length = 0;
        }
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert markup content into an ordered block sequence.
///
/// The document-level entry point; see [`DocumentParser::parse`].
pub fn parse_document(content: &str) -> Vec<Block> {
    DocumentParser::parse(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page_model::TextSpan;

    /// The single plain-span content of a structural block
    fn plain_text(block: &Block) -> &str {
        let spans = block.rich_text().expect("block should carry rich text");
        assert_eq!(spans.len(), 1);
        &spans[0].content
    }

    #[test]
    fn test_totality_on_degenerate_inputs() {
        // None of these may panic, whatever they produce
        for content in [
            "",
            "   \n\t\n  ",
            "```",
            "```\nnever closed",
            "***",
            "1.",
            "> ",
            "- ",
            "#",
            "\u{0}\u{1}weird bytes",
        ] {
            let _ = parse_document(content);
        }

        assert!(parse_document("").is_empty());
        assert!(parse_document("   \n\n  ").is_empty());
    }

    #[test]
    fn test_heading_precedence() {
        let blocks = parse_document("### Title");
        assert!(matches!(blocks[0], Block::Heading3 { .. }));
        assert_eq!(plain_text(&blocks[0]), "Title");

        let blocks = parse_document("## Title");
        assert!(matches!(blocks[0], Block::Heading2 { .. }));

        let blocks = parse_document("# Title");
        assert!(matches!(blocks[0], Block::Heading1 { .. }));
    }

    #[test]
    fn test_list_items() {
        let blocks = parse_document("1. Buy milk");
        assert!(matches!(blocks[0], Block::NumberedListItem { .. }));
        assert_eq!(plain_text(&blocks[0]), "Buy milk");

        let blocks = parse_document("- Buy milk");
        assert!(matches!(blocks[0], Block::BulletedListItem { .. }));
        assert_eq!(plain_text(&blocks[0]), "Buy milk");
    }

    #[test]
    fn test_quote_and_paragraph() {
        let blocks = parse_document("> wise words\nordinary words");

        assert!(matches!(blocks[0], Block::Quote { .. }));
        assert_eq!(plain_text(&blocks[0]), "wise words");
        assert!(matches!(blocks[1], Block::Paragraph { .. }));
        assert_eq!(plain_text(&blocks[1]), "ordinary words");
    }

    #[test]
    fn test_divider_emits_no_rich_text() {
        let blocks = parse_document("---");

        assert_eq!(blocks, vec![Block::Divider]);
        assert!(blocks[0].rich_text().is_none());
    }

    #[test]
    fn test_fence_round_trip() {
        // Arrange: a fenced block with a language tag
        let blocks = parse_document("```py\nx = 1\ny = 2\n```");

        // Assert: exactly one code block, verbatim body, tagged language
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Code { rich_text, language } => {
                assert_eq!(language, "py");
                assert_eq!(rich_text, &[TextSpan::plain("x = 1\ny = 2".to_string())]);
            }
            other => panic!("expected Code block, got {:?}", other),
        }
    }

    #[test]
    fn test_fence_default_language() {
        let blocks = parse_document("```\nhello\n```");

        match &blocks[0] {
            Block::Code { language, .. } => assert_eq!(language, "plain text"),
            other => panic!("expected Code block, got {:?}", other),
        }
    }

    #[test]
    fn test_fence_keeps_blank_lines() {
        let blocks = parse_document("```\nfirst\n\nlast\n```");

        match &blocks[0] {
            Block::Code { rich_text, .. } => {
                assert_eq!(rich_text[0].content, "first\n\nlast");
            }
            other => panic!("expected Code block, got {:?}", other),
        }
    }

    #[test]
    fn test_fence_lines_are_not_classified() {
        // Heading and list markers inside a fence stay literal
        let blocks = parse_document("```\n# not a heading\n- not a list\n```");

        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Code { rich_text, .. } => {
                assert_eq!(rich_text[0].content, "# not a heading\n- not a list");
            }
            other => panic!("expected Code block, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_fence_is_dropped() {
        let blocks = parse_document("before\n```rust\nfn lost() {}\n");

        assert_eq!(blocks.len(), 1);
        assert!(matches!(blocks[0], Block::Paragraph { .. }));
        assert_eq!(plain_text(&blocks[0]), "before");
    }

    #[test]
    fn test_blank_line_emits_nothing_and_resets_run() {
        // Arrange: feed lines directly to observe the run counter
        let mut parser = DocumentParser::new();
        parser.process_line("1. first");
        parser.process_line("2. second");
        assert_eq!(parser.numbered_run_length, 2);

        // Act: a blank line ends the run
        parser.process_line("");

        // Assert: counter reset, no block emitted for the blank line
        assert_eq!(parser.numbered_run_length, 0);
        assert_eq!(parser.blocks.len(), 2);
    }

    #[test]
    fn test_numbered_runs_separated_by_blank_line() {
        let blocks = parse_document("1. a\n2. b\n\n1. c");

        // Three items either way; the blank line only resets continuity
        assert_eq!(blocks.len(), 3);
        assert!(blocks
            .iter()
            .all(|block| matches!(block, Block::NumberedListItem { .. })));
    }

    #[test]
    fn test_malformed_numbered_prefix_is_a_paragraph() {
        let blocks = parse_document("1.missing space");

        assert!(matches!(blocks[0], Block::Paragraph { .. }));
    }

    #[test]
    fn test_lines_are_trimmed_before_classification() {
        let blocks = parse_document("   ## Indented Heading   ");

        assert!(matches!(blocks[0], Block::Heading2 { .. }));
        assert_eq!(plain_text(&blocks[0]), "Indented Heading");
    }

    #[test]
    fn test_block_order_follows_source_order() {
        // Arrange: one document exercising every block type
        let content = "# Notes\n\nIntro paragraph with **bold** text.\n\n## Steps\n1. gather\n2. build\n\n- check\n> remember this\n\n---\n\n```sh\nmake all\n```";

        // Act
        let blocks = parse_document(content);

        // Assert: kinds appear in exactly the source order
        let kinds: Vec<&str> = blocks.iter().map(Block::kind).collect();
        assert_eq!(
            kinds,
            vec![
                "heading_1",
                "paragraph",
                "heading_2",
                "numbered_list_item",
                "numbered_list_item",
                "bulleted_list_item",
                "quote",
                "divider",
                "code",
            ]
        );
    }

    #[test]
    fn test_inline_markup_flows_into_blocks() {
        let blocks = parse_document("## A **bold** plan");

        let spans = blocks[0].rich_text().unwrap();
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].content, "A ");
        assert!(spans[1].annotations.bold);
        assert_eq!(spans[2].content, " plan");
    }

    #[test]
    fn test_closing_fence_tag_is_ignored() {
        // A closing line may carry trailing text after the backticks; the
        // fence still closes and the text is not a new language tag
        let blocks = parse_document("```py\ncode\n``` leftover\nafter");

        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0], Block::Code { .. }));
        assert!(matches!(blocks[1], Block::Paragraph { .. }));
    }
}
