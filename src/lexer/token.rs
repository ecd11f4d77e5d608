//! Lexical events handed to the tree builder.

use std::fmt;

use compact_str::CompactString;

use crate::error::LexError;

/// One lexical event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Run of character data, already decoded unless inside a raw-text
    /// element
    Text(String),
    /// `<name` of an opening tag, as written
    OpenTagName(CompactString),
    /// Attribute name, as written
    AttributeName(CompactString),
    /// Attribute value fragment
    AttributeData(String),
    /// Current attribute is complete
    AttributeEnd,
    /// `>` of an opening tag
    OpenTagEnd,
    /// `/>` of an opening tag
    SelfClosingTag,
    /// `</name>`
    CloseTag(CompactString),
    /// Text between `<!` and `>`
    Declaration(String),
    /// Text between `<?` and `>`
    ProcessingInstruction(String),
    /// Comment content fragment
    Comment(String),
    /// `-->`
    CommentEnd,
    /// Text between `<![CDATA[` and `]]>`
    CharacterData(String),
    /// Fatal scan error; nothing follows
    Error(LexError),
    /// End of input
    End,
}

impl Event {
    /// Short name used in trace output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::OpenTagName(_) => "opentagname",
            Self::AttributeName(_) => "attribname",
            Self::AttributeData(_) => "attribdata",
            Self::AttributeEnd => "attribend",
            Self::OpenTagEnd => "opentagend",
            Self::SelfClosingTag => "selfclosingtag",
            Self::CloseTag(_) => "closetag",
            Self::Declaration(_) => "declaration",
            Self::ProcessingInstruction(_) => "processinginstruction",
            Self::Comment(_) => "comment",
            Self::CommentEnd => "commentend",
            Self::CharacterData(_) => "cdata",
            Self::Error(_) => "error",
            Self::End => "end",
        }
    }
}

/// An event with the source offsets it covers.
///
/// `start` is where the construct began. `index` is the scan offset at
/// emission: the closing `>` for delimited constructs, the exclusive end
/// for text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub event: Event,
    pub start: usize,
    pub index: usize,
}

impl Token {
    /// Create a token.
    pub fn new(event: Event, start: usize, index: usize) -> Self {
        Self { event, start, index }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}..{}", self.event.name(), self.start, self.index)
    }
}
