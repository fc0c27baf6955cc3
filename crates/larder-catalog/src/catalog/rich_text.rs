//! Rich-text descriptions as typed content blocks.
//!
//! The content store delivers descriptions as a flat array of styled
//! blocks with marked spans. We decode that wire shape into a tagged
//! union so renderers can dispatch on block kind instead of matching on
//! style strings.

use serde::{Deserialize, Serialize};

/// A block of rich-text content.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A plain paragraph.
    Paragraph(Vec<Span>),
    /// A heading; `level` is 1..=4.
    Heading { level: u8, spans: Vec<Span> },
    /// A block quote.
    Quote(Vec<Span>),
    /// A list item.
    ListItem { kind: ListKind, spans: Vec<Span> },
}

impl Block {
    /// Concatenate the plain text of this block.
    pub fn plain_text(&self) -> String {
        let spans = match self {
            Block::Paragraph(spans) => spans,
            Block::Heading { spans, .. } => spans,
            Block::Quote(spans) => spans,
            Block::ListItem { spans, .. } => spans,
        };
        spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// List flavor for list-item blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Number,
}

/// A run of text with inline marks.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub marks: Vec<Mark>,
}

impl Span {
    /// A span with no marks.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }
}

/// Inline formatting marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Strong,
    Emphasis,
    Code,
    Underline,
    Strike,
}

impl Mark {
    fn from_store(mark: &str) -> Option<Self> {
        match mark {
            "strong" => Some(Mark::Strong),
            "em" => Some(Mark::Emphasis),
            "code" => Some(Mark::Code),
            "underline" => Some(Mark::Underline),
            "strike-through" => Some(Mark::Strike),
            _ => None,
        }
    }
}

/// Wire shape of a block as the store sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawBlock {
    #[serde(default)]
    style: Option<String>,
    #[serde(default, rename = "listItem")]
    list_item: Option<String>,
    #[serde(default)]
    children: Vec<RawSpan>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawSpan {
    #[serde(default)]
    text: String,
    #[serde(default)]
    marks: Vec<String>,
}

impl From<RawSpan> for Span {
    fn from(raw: RawSpan) -> Self {
        Span {
            text: raw.text,
            marks: raw.marks.iter().filter_map(|m| Mark::from_store(m)).collect(),
        }
    }
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        let spans: Vec<Span> = raw.children.into_iter().map(Span::from).collect();

        if let Some(item) = raw.list_item.as_deref() {
            let kind = match item {
                "number" => ListKind::Number,
                _ => ListKind::Bullet,
            };
            return Block::ListItem { kind, spans };
        }

        match raw.style.as_deref() {
            Some("h1") => Block::Heading { level: 1, spans },
            Some("h2") => Block::Heading { level: 2, spans },
            Some("h3") => Block::Heading { level: 3, spans },
            Some("h4") => Block::Heading { level: 4, spans },
            Some("blockquote") => Block::Quote(spans),
            // "normal" and anything unrecognized degrade to a paragraph.
            _ => Block::Paragraph(spans),
        }
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        RawBlock::deserialize(deserializer).map(Block::from)
    }
}

impl Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        fn raw_span(span: &Span) -> RawSpan {
            RawSpan {
                text: span.text.clone(),
                marks: span
                    .marks
                    .iter()
                    .map(|m| {
                        match m {
                            Mark::Strong => "strong",
                            Mark::Emphasis => "em",
                            Mark::Code => "code",
                            Mark::Underline => "underline",
                            Mark::Strike => "strike-through",
                        }
                        .to_string()
                    })
                    .collect(),
            }
        }

        let raw = match self {
            Block::Paragraph(spans) => RawBlock {
                style: Some("normal".to_string()),
                list_item: None,
                children: spans.iter().map(raw_span).collect(),
            },
            Block::Heading { level, spans } => RawBlock {
                style: Some(format!("h{}", level)),
                list_item: None,
                children: spans.iter().map(raw_span).collect(),
            },
            Block::Quote(spans) => RawBlock {
                style: Some("blockquote".to_string()),
                list_item: None,
                children: spans.iter().map(raw_span).collect(),
            },
            Block::ListItem { kind, spans } => RawBlock {
                style: Some("normal".to_string()),
                list_item: Some(
                    match kind {
                        ListKind::Bullet => "bullet",
                        ListKind::Number => "number",
                    }
                    .to_string(),
                ),
                children: spans.iter().map(raw_span).collect(),
            },
        };
        raw.serialize(serializer)
    }
}

/// Concatenate the plain text of a description, blocks joined by newlines.
pub fn plain_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::plain_text)
        .collect::<Vec<_>>()
        .join("\n")
}
