//! Styled text span representation
//!
//! A text span is a run of text carrying one style annotation (or a link
//! target). Spans are the atoms of every block's rich text and serialize
//! to the exact rich-text shape the page API consumes.

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Inline style produced by a single markup marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Bold (`**text**` or `__text__`)
    Bold,
    /// Italic (`*text*` or `_text_`)
    Italic,
    /// Strikethrough (`~~text~~`)
    Strikethrough,
    /// Inline code (`` `text` ``)
    Code,
}

/// Text color in the page API's vocabulary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Color {
    /// No explicit color
    #[default]
    Default,
    Gray,
    Brown,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Red,
}

/// Style annotations carried by a span
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Annotations {
    /// Bold formatting
    pub bold: bool,

    /// Italic formatting
    pub italic: bool,

    /// Strikethrough formatting
    pub strikethrough: bool,

    /// Underline formatting (the markup dialect never produces it, but the
    /// page API requires the field)
    pub underline: bool,

    /// Inline code formatting
    pub code: bool,

    /// Text color
    pub color: Color,
}

impl Annotations {
    /// Check if any style annotation is set
    pub fn has_formatting(&self) -> bool {
        self.bold || self.italic || self.strikethrough || self.underline || self.code
    }
}

/// Hyperlink target attached to a span
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Link {
    /// Link destination as written in the source markup
    pub url: String,
}

/// A run of text with uniform styling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    /// The text content
    pub content: String,

    /// Style annotations applied to the whole run
    pub annotations: Annotations,

    /// Link target (if this run is a hyperlink)
    pub link: Option<Link>,
}

impl TextSpan {
    /// Create a plain span with no styling
    pub fn plain(content: String) -> Self {
        Self {
            content,
            annotations: Annotations::default(),
            link: None,
        }
    }

    /// Create a span carrying exactly one style annotation
    pub fn styled(content: String, style: Style) -> Self {
        let mut annotations = Annotations::default();
        match style {
            Style::Bold => annotations.bold = true,
            Style::Italic => annotations.italic = true,
            Style::Strikethrough => annotations.strikethrough = true,
            Style::Code => annotations.code = true,
        }
        Self {
            content,
            annotations,
            link: None,
        }
    }

    /// Create a link span with no style annotations
    pub fn link(content: String, url: String) -> Self {
        Self {
            content,
            annotations: Annotations::default(),
            link: Some(Link { url }),
        }
    }
}

/// Wire shape: `{"type": "text", "text": {"content", "link"?}, "annotations": {..}}`
/// with the `link` key omitted entirely when the span is not a hyperlink.
impl Serialize for TextSpan {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(serde::Serialize)]
        struct TextPayload<'a> {
            content: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            link: Option<&'a Link>,
        }

        let mut state = serializer.serialize_struct("TextSpan", 3)?;
        state.serialize_field("type", "text")?;
        state.serialize_field(
            "text",
            &TextPayload {
                content: &self.content,
                link: self.link.as_ref(),
            },
        )?;
        state.serialize_field("annotations", &self.annotations)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_span_wire_shape() {
        let span = TextSpan::plain("hello".to_string());

        let value = serde_json::to_value(&span).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "text",
                "text": { "content": "hello" },
                "annotations": {
                    "bold": false,
                    "italic": false,
                    "strikethrough": false,
                    "underline": false,
                    "code": false,
                    "color": "default",
                }
            })
        );
    }

    #[test]
    fn test_styled_span_wire_shape() {
        let span = TextSpan::styled("loud".to_string(), Style::Bold);

        let value = serde_json::to_value(&span).unwrap();

        assert_eq!(value["annotations"]["bold"], json!(true));
        assert_eq!(value["annotations"]["italic"], json!(false));
        assert_eq!(value["text"]["content"], json!("loud"));
        // Non-link spans must not carry a link key at all
        assert!(value["text"].get("link").is_none());
    }

    #[test]
    fn test_link_span_wire_shape() {
        let span = TextSpan::link("go".to_string(), "https://example.com".to_string());

        let value = serde_json::to_value(&span).unwrap();

        assert_eq!(value["text"]["link"]["url"], json!("https://example.com"));
        assert!(!span.annotations.has_formatting());
    }

    #[test]
    fn test_each_style_sets_exactly_one_flag() {
        for style in [Style::Bold, Style::Italic, Style::Strikethrough, Style::Code] {
            let span = TextSpan::styled("x".to_string(), style);
            let flags = [
                span.annotations.bold,
                span.annotations.italic,
                span.annotations.strikethrough,
                span.annotations.underline,
                span.annotations.code,
            ];
            assert_eq!(flags.iter().filter(|set| **set).count(), 1);
        }
    }
}
