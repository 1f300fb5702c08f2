//! Page content model and markup converter
//!
//! This module defines the structured content model consumed by the page
//! API (blocks of styled text spans) and the pure converter that builds
//! it from a Markdown-like dialect: a per-line inline tokenizer and a
//! line-oriented block classifier. Conversion is total: every input
//! string yields a block sequence, never an error.

// Submodules
mod blocks;
mod parser;
mod text_span;
mod tokenizer;

// Re-export public types
pub use blocks::Block;
pub use parser::{parse_document, DocumentParser};
pub use text_span::{Annotations, Color, Link, Style, TextSpan};
pub use tokenizer::tokenize;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_converts_to_wire_json() {
        // Arrange: a small document covering inline and block features
        let content = "# Trip\n\nPack **warm** clothes.\n\n```txt\nsocks\n```";

        // Act: convert and serialize the way a page-create request would
        let blocks = parse_document(content);
        let value = serde_json::to_value(&blocks).unwrap();

        // Assert: full wire shape, end to end
        assert_eq!(
            value,
            json!([
                {
                    "type": "heading_1",
                    "heading_1": { "rich_text": [
                        {
                            "type": "text",
                            "text": { "content": "Trip" },
                            "annotations": {
                                "bold": false, "italic": false, "strikethrough": false,
                                "underline": false, "code": false, "color": "default"
                            }
                        }
                    ]}
                },
                {
                    "type": "paragraph",
                    "paragraph": { "rich_text": [
                        {
                            "type": "text",
                            "text": { "content": "Pack " },
                            "annotations": {
                                "bold": false, "italic": false, "strikethrough": false,
                                "underline": false, "code": false, "color": "default"
                            }
                        },
                        {
                            "type": "text",
                            "text": { "content": "warm" },
                            "annotations": {
                                "bold": true, "italic": false, "strikethrough": false,
                                "underline": false, "code": false, "color": "default"
                            }
                        },
                        {
                            "type": "text",
                            "text": { "content": " clothes." },
                            "annotations": {
                                "bold": false, "italic": false, "strikethrough": false,
                                "underline": false, "code": false, "color": "default"
                            }
                        }
                    ]}
                },
                {
                    "type": "code",
                    "code": {
                        "rich_text": [
                            {
                                "type": "text",
                                "text": { "content": "socks" },
                                "annotations": {
                                    "bold": false, "italic": false, "strikethrough": false,
                                    "underline": false, "code": false, "color": "default"
                                }
                            }
                        ],
                        "language": "txt"
                    }
                }
            ])
        );
    }
}
