//! Block-level content elements
//!
//! This module defines the structured representation of a converted
//! document at the block level (paragraphs, headings, lists, quotes,
//! dividers, code blocks). Blocks serialize to the page API's tagged
//! shape: a `type` discriminant plus a payload under the same name.

use super::text_span::TextSpan;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One structural unit of a converted document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A paragraph of formatted text
    Paragraph {
        /// Formatted spans comprising the paragraph content
        rich_text: Vec<TextSpan>,
    },

    /// A top-level heading (`# `)
    Heading1 {
        /// Formatted spans comprising the heading content
        rich_text: Vec<TextSpan>,
    },

    /// A second-level heading (`## `)
    Heading2 {
        /// Formatted spans comprising the heading content
        rich_text: Vec<TextSpan>,
    },

    /// A third-level heading (`### `)
    Heading3 {
        /// Formatted spans comprising the heading content
        rich_text: Vec<TextSpan>,
    },

    /// An unordered list entry (`- `)
    BulletedListItem {
        /// Formatted spans comprising the item content
        rich_text: Vec<TextSpan>,
    },

    /// An ordered list entry (`1. `)
    ///
    /// Each item is emitted independently; the numeral written in the
    /// source line is discarded and list identity is positional.
    NumberedListItem {
        /// Formatted spans comprising the item content
        rich_text: Vec<TextSpan>,
    },

    /// A block quote (`> `)
    Quote {
        /// Formatted spans comprising the quoted content
        rich_text: Vec<TextSpan>,
    },

    /// A horizontal rule (`---`), no payload
    Divider,

    /// A fenced code block
    Code {
        /// Exactly one plain span holding the verbatim fence body
        rich_text: Vec<TextSpan>,
        /// Language tag from the fence opener ("plain text" when absent)
        language: String,
    },
}

impl Block {
    /// Build a code block from a fence body and language tag
    pub fn code(body: String, language: String) -> Self {
        Self::Code {
            rich_text: vec![TextSpan::plain(body)],
            language,
        }
    }

    /// The API's type discriminant for this block
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Paragraph { .. } => "paragraph",
            Block::Heading1 { .. } => "heading_1",
            Block::Heading2 { .. } => "heading_2",
            Block::Heading3 { .. } => "heading_3",
            Block::BulletedListItem { .. } => "bulleted_list_item",
            Block::NumberedListItem { .. } => "numbered_list_item",
            Block::Quote { .. } => "quote",
            Block::Divider => "divider",
            Block::Code { .. } => "code",
        }
    }

    /// The block's formatted spans, if its type carries any
    pub fn rich_text(&self) -> Option<&[TextSpan]> {
        match self {
            Block::Paragraph { rich_text }
            | Block::Heading1 { rich_text }
            | Block::Heading2 { rich_text }
            | Block::Heading3 { rich_text }
            | Block::BulletedListItem { rich_text }
            | Block::NumberedListItem { rich_text }
            | Block::Quote { rich_text }
            | Block::Code { rich_text, .. } => Some(rich_text),
            Block::Divider => None,
        }
    }
}

/// Wire shape: `{"type": <kind>, <kind>: <payload>}` where the payload is
/// `{"rich_text": [..]}` for structural blocks, `{}` for dividers, and
/// `{"rich_text": [..], "language": ..}` for code blocks.
impl Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(serde::Serialize)]
        struct RichTextPayload<'a> {
            rich_text: &'a [TextSpan],
        }

        #[derive(serde::Serialize)]
        struct CodePayload<'a> {
            rich_text: &'a [TextSpan],
            language: &'a str,
        }

        #[derive(serde::Serialize)]
        struct EmptyPayload {}

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", self.kind())?;
        match self {
            Block::Divider => {
                map.serialize_entry(self.kind(), &EmptyPayload {})?;
            }
            Block::Code { rich_text, language } => {
                map.serialize_entry(
                    self.kind(),
                    &CodePayload {
                        rich_text,
                        language,
                    },
                )?;
            }
            Block::Paragraph { rich_text }
            | Block::Heading1 { rich_text }
            | Block::Heading2 { rich_text }
            | Block::Heading3 { rich_text }
            | Block::BulletedListItem { rich_text }
            | Block::NumberedListItem { rich_text }
            | Block::Quote { rich_text } => {
                map.serialize_entry(self.kind(), &RichTextPayload { rich_text })?;
            }
        }
        map.end()
    }
}
