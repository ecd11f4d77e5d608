//! Stack-based tree construction from a token stream.

use std::mem;

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::attr::AttributeParser;
use crate::error::LexError;
use crate::lexer::{Event, Token};
use crate::node::{CharacterData, Comment, Directive, Document, Element, NodeId, NodeKind};

use super::ParseOptions;
use super::position::PositionTracker;
use super::tables;

fn lower(name: &str) -> CompactString {
    CompactString::new(name.to_ascii_lowercase())
}

/// Opening tag between its name and its `>`.
#[derive(Debug)]
struct PendingTag {
    name: CompactString,
    /// Offset of the `<`
    start: usize,
    /// Raw attributes, first occurrence of each name only
    attributes: Vec<(CompactString, String)>,
}

/// Attribute being accumulated across name / data / end events.
#[derive(Debug, Default)]
enum AttributeState {
    #[default]
    Idle,
    Name(CompactString),
    Value { name: CompactString, partial: String },
}

/// Consumes [`Token`]s and assembles a [`Document`].
///
/// Feed tokens in source order with [`feed`](Self::feed), then call
/// [`finish`](Self::finish). Elements still open at the end are closed,
/// so the result is always well formed.
#[derive(Debug)]
pub struct TreeBuilder<'a> {
    source: &'a str,
    parser: AttributeParser,
    doc: Document,
    tracker: PositionTracker,
    /// Open elements, innermost last
    stack: Vec<NodeId>,
    /// Tag names of open elements, plus the pending tag once named
    tag_names: SmallVec<[CompactString; 16]>,
    pending: Option<PendingTag>,
    attribute: AttributeState,
    /// Comment still receiving fragments
    open_comment: Option<NodeId>,
}

impl<'a> TreeBuilder<'a> {
    /// Builder for tokens scanned from `source`.
    pub fn new(source: &'a str, options: &ParseOptions) -> Self {
        Self {
            source,
            parser: options.attribute_parser(),
            doc: Document::new(),
            tracker: PositionTracker::new(),
            stack: Vec::new(),
            tag_names: SmallVec::new(),
            pending: None,
            attribute: AttributeState::Idle,
            open_comment: None,
        }
    }

    /// Feed every token, then finish.
    pub fn build<I>(mut self, tokens: I) -> Result<Document, LexError>
    where
        I: IntoIterator<Item = Token>,
    {
        for token in tokens {
            self.feed(token)?;
        }
        Ok(self.finish())
    }

    /// Apply one token. A lexical error aborts construction.
    pub fn feed(&mut self, token: Token) -> Result<(), LexError> {
        log::trace!(target: "hast::builder", "{token}");
        let Token { event, start, index } = token;
        match event {
            Event::Text(value) => self.on_text(value, start, index),
            Event::OpenTagName(name) => self.on_open_tag_name(&name, start),
            Event::AttributeName(name) => self.on_attribute_name(&name),
            Event::AttributeData(data) => self.on_attribute_data(data),
            Event::AttributeEnd => self.on_attribute_end(),
            Event::OpenTagEnd | Event::SelfClosingTag => self.on_open_tag_end(index),
            Event::CloseTag(name) => self.on_close_tag(&name, start, index),
            Event::Declaration(content) => {
                let directive = Directive::declaration(&content);
                self.on_leaf(NodeKind::Directive(directive), start, index);
            }
            Event::ProcessingInstruction(content) => {
                let directive = Directive::processing_instruction(&content);
                self.on_leaf(NodeKind::Directive(directive), start, index);
            }
            Event::CharacterData(value) => {
                self.on_leaf(NodeKind::CharacterData(CharacterData::new(value)), start, index);
            }
            Event::Comment(fragment) => self.on_comment(fragment, start, index),
            Event::CommentEnd => self.on_comment_end(index),
            Event::Error(err) => {
                log::debug!(target: "hast::builder", "aborting: {err}");
                return Err(err);
            }
            Event::End => self.on_end(),
        }
        Ok(())
    }

    /// Close everything still open and hand over the document.
    pub fn finish(mut self) -> Document {
        self.on_end();
        self.doc
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tree plumbing
    // ─────────────────────────────────────────────────────────────────────────

    /// Node currently accepting children.
    fn current(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(NodeId::ROOT)
    }

    fn insert(&mut self, id: NodeId) {
        if let Some(comment) = self.open_comment.take() {
            self.exit(comment);
        }
        let parent = self.current();
        self.doc.push_child(parent, id);
    }

    /// Stamp the start of the current span on `id` and its first child.
    fn enter(&mut self, id: NodeId) {
        let start = self.tracker.start();
        self.doc.set_position_start(id, start);
        if let Some(first) = self.doc.first_child(id) {
            self.doc.set_position_start(first, start);
        }
    }

    /// Stamp the end of the current span on `id`.
    fn exit(&mut self, id: NodeId) {
        self.doc.set_position_end(id, self.tracker.end());
    }

    fn close_current(&mut self) {
        self.tag_names.pop();
        if let Some(id) = self.stack.pop() {
            self.exit(id);
        }
    }

    fn close_implied_by(&mut self, name: &str) {
        let closes = tables::implicitly_closes(name);
        while let Some(top) = self.tag_names.last() {
            if !closes.iter().any(|tag| *tag == top.as_str()) {
                break;
            }
            log::debug!(target: "hast::builder", "<{name}> implicitly closes <{top}>");
            self.close_current();
        }
    }

    fn discard_pending(&mut self) {
        if let Some(tag) = self.pending.take() {
            log::debug!(target: "hast::builder", "discarding unfinished <{}>", tag.name);
            if !tables::is_void(&tag.name) {
                self.tag_names.pop();
            }
        }
        self.attribute = AttributeState::Idle;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    fn on_text(&mut self, value: String, start: usize, index: usize) {
        if self.open_comment.is_none() {
            if let Some(tail) = self.doc.last_child(self.current()) {
                if let Some(NodeKind::Text(text)) = self.doc.kind_mut(tail) {
                    text.push_str(&value);
                    self.tracker.extend(self.source, index, false);
                    self.exit(tail);
                    return;
                }
            }
        }

        let id = self.doc.create_text(value);
        self.tracker.advance(self.source, start, index, false);
        self.insert(id);
        self.enter(id);
        self.exit(id);
    }

    fn on_open_tag_name(&mut self, name: &str, start: usize) {
        self.discard_pending();
        let name = lower(name);
        self.close_implied_by(&name);
        if !tables::is_void(&name) {
            self.tag_names.push(name.clone());
        }
        self.pending = Some(PendingTag { name, start, attributes: Vec::new() });
    }

    fn on_attribute_name(&mut self, name: &str) {
        self.on_attribute_end();
        self.attribute = AttributeState::Name(lower(name));
    }

    fn on_attribute_data(&mut self, data: String) {
        self.attribute = match mem::take(&mut self.attribute) {
            AttributeState::Idle => {
                log::trace!(target: "hast::builder", "attribute data without a name");
                AttributeState::Idle
            }
            AttributeState::Name(name) => AttributeState::Value { name, partial: data },
            AttributeState::Value { name, mut partial } => {
                partial.push_str(&data);
                AttributeState::Value { name, partial }
            }
        };
    }

    fn on_attribute_end(&mut self) {
        let (name, value) = match mem::take(&mut self.attribute) {
            AttributeState::Idle => return,
            AttributeState::Name(name) => (name, String::new()),
            AttributeState::Value { name, partial } => (name, partial),
        };
        let Some(tag) = self.pending.as_mut() else {
            return;
        };
        if tag.attributes.iter().any(|(existing, _)| *existing == name) {
            log::debug!(target: "hast::builder", "ignoring duplicate `{name}` on <{}>", tag.name);
            return;
        }
        tag.attributes.push((name, value));
    }

    fn on_open_tag_end(&mut self, index: usize) {
        self.on_attribute_end();
        let Some(tag) = self.pending.take() else {
            log::trace!(target: "hast::builder", "tag end without a tag");
            return;
        };
        self.tracker.advance(self.source, tag.start, index, true);

        let properties = self
            .parser
            .parse(tag.attributes.iter().map(|(name, value)| (name.as_str(), value.as_str())));
        let void = tables::is_void(&tag.name);
        let id = self.doc.create_element(Element { tag_name: tag.name, properties });
        self.insert(id);
        self.enter(id);
        if void {
            self.exit(id);
        } else {
            self.stack.push(id);
        }
    }

    fn on_close_tag(&mut self, name: &str, start: usize, index: usize) {
        let name = lower(name);
        self.tracker.advance(self.source, start, index, true);

        if !tables::is_void(&name) {
            if let Some(depth) = self.tag_names.iter().rposition(|open| *open == name) {
                while self.tag_names.len() > depth {
                    self.close_current();
                }
                return;
            }
        }

        if tables::is_tolerated_stray_close(&name) {
            log::debug!(target: "hast::builder", "stray </{name}> becomes an empty <{name}>");
            self.close_implied_by(&name);
            let id = self.doc.create_element(Element::new(&name));
            self.insert(id);
            self.enter(id);
            self.exit(id);
        } else {
            log::debug!(target: "hast::builder", "dropping unmatched </{name}>");
        }
    }

    /// Childless nodes: opened and closed in the same step.
    fn on_leaf(&mut self, kind: NodeKind, start: usize, index: usize) {
        let id = self.doc.create(kind);
        self.tracker.advance(self.source, start, index, true);
        self.insert(id);
        self.enter(id);
        self.exit(id);
    }

    fn on_comment(&mut self, fragment: String, start: usize, index: usize) {
        if let Some(id) = self.open_comment {
            if let Some(NodeKind::Comment(comment)) = self.doc.kind_mut(id) {
                comment.push_str(&fragment);
            }
            self.tracker.extend(self.source, index, false);
            return;
        }

        let id = self.doc.create(NodeKind::Comment(Comment::new(fragment)));
        self.tracker.advance(self.source, start, index, false);
        self.insert(id);
        self.enter(id);
        self.open_comment = Some(id);
    }

    fn on_comment_end(&mut self, index: usize) {
        if let Some(id) = self.open_comment.take() {
            self.tracker.extend(self.source, index, true);
            self.exit(id);
        }
    }

    fn on_end(&mut self) {
        self.discard_pending();
        if let Some(id) = self.open_comment.take() {
            self.exit(id);
        }
        while !self.stack.is_empty() {
            self.close_current();
        }
        self.tag_names.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::PropertyValue;
    use crate::builder::parse;
    use crate::node::Point;

    fn tag(doc: &Document, id: NodeId) -> &str {
        doc.element(id).map(|e| e.tag_name.as_str()).unwrap_or("")
    }

    fn root_tags(doc: &Document) -> Vec<&str> {
        doc.children(doc.root()).iter().map(|&id| tag(doc, id)).collect()
    }

    #[test]
    fn test_text_fragments_coalesce() {
        let mut builder = TreeBuilder::new("ab", &ParseOptions::DEFAULT);
        builder.feed(Token::new(Event::Text("a".into()), 0, 1)).unwrap();
        builder.feed(Token::new(Event::Text("b".into()), 1, 2)).unwrap();
        let doc = builder.finish();

        let children = doc.children(doc.root());
        assert_eq!(children.len(), 1);
        assert_eq!(doc.text(children[0]).unwrap().value(), "ab");
        let pos = doc.position(children[0]).unwrap();
        assert_eq!(pos.start, Point::START);
        assert_eq!(pos.end, Point::new(1, 3, 2));
    }

    #[test]
    fn test_void_elements() {
        let doc = parse("<br>x<img src=a.png/>").unwrap();
        let children = doc.children(doc.root()).to_vec();
        assert_eq!(children.len(), 3);
        assert_eq!(tag(&doc, children[0]), "br");
        assert!(doc.children(children[0]).is_empty());
        assert_eq!(doc.text(children[1]).unwrap().value(), "x");
        assert_eq!(tag(&doc, children[2]), "img");
    }

    #[test]
    fn test_implicit_paragraph_close() {
        let doc = parse("<p>one<p>two").unwrap();
        assert_eq!(root_tags(&doc), vec!["p", "p"]);

        let children = doc.children(doc.root());
        let first = doc.position(children[0]).unwrap();
        let second = doc.position(children[1]).unwrap();
        assert_eq!(first.start, Point::START);
        assert_eq!(first.end, Point::new(1, 7, 6));
        assert_eq!(second.start, Point::new(1, 7, 6));
        assert_eq!(second.end, Point::new(1, 13, 12));
    }

    #[test]
    fn test_implicit_list_and_table_close() {
        let doc = parse("<ul><li>a<li>b</ul>").unwrap();
        let ul = doc.children(doc.root())[0];
        let items: Vec<_> = doc.children(ul).iter().map(|&id| tag(&doc, id)).collect();
        assert_eq!(items, vec!["li", "li"]);

        let doc = parse("<table><tr><td>1<td>2<tr><td>3</table>").unwrap();
        let table = doc.children(doc.root())[0];
        assert_eq!(doc.children(table).len(), 2);
        assert_eq!(doc.children(doc.children(table)[0]).len(), 2);
    }

    #[test]
    fn test_close_tag_closes_intervening() {
        let doc = parse("<div><span>x</div>y").unwrap();
        let children = doc.children(doc.root()).to_vec();
        assert_eq!(children.len(), 2);
        let span = doc.children(children[0])[0];
        assert_eq!(tag(&doc, span), "span");
        assert_eq!(doc.text(children[1]).unwrap().value(), "y");
    }

    #[test]
    fn test_unmatched_close_tags() {
        let doc = parse("<div>a</span>b</div>").unwrap();
        let div = doc.children(doc.root())[0];
        assert_eq!(doc.children(div).len(), 1);
        assert_eq!(doc.text_content(div), "ab");

        let doc = parse("a</p>").unwrap();
        let children = doc.children(doc.root());
        assert_eq!(tag(&doc, children[1]), "p");
        assert!(doc.children(children[1]).is_empty());

        let doc = parse("<div></br></div>").unwrap();
        let div = doc.children(doc.root())[0];
        assert_eq!(tag(&doc, doc.children(div)[0]), "br");

        let doc = parse("<div></img></div>").unwrap();
        let div = doc.children(doc.root())[0];
        assert!(doc.children(div).is_empty());
    }

    #[test]
    fn test_attributes() {
        let doc = parse(r#"<INPUT ID="1" id="2" Disabled class="a  b" style="color: red">"#).unwrap();
        let input = doc.element(doc.children(doc.root())[0]).unwrap();
        assert_eq!(input.tag_name, "input");
        assert_eq!(input.id(), Some("1"));
        assert_eq!(input.properties.get("disabled"), Some(&PropertyValue::Bool(true)));
        assert_eq!(input.class_names(), ["a", "b"]);
        assert_eq!(
            input.properties.get("style").and_then(|s| s.style_property("color")),
            Some("red")
        );
    }

    #[test]
    fn test_attribute_data_fragments() {
        let mut builder = TreeBuilder::new("<a title=xy>", &ParseOptions::DEFAULT);
        for event in [
            Event::OpenTagName("a".into()),
            Event::AttributeName("title".into()),
            Event::AttributeData("x".into()),
            Event::AttributeData("y".into()),
            Event::AttributeEnd,
        ] {
            builder.feed(Token::new(event, 0, 0)).unwrap();
        }
        builder.feed(Token::new(Event::OpenTagEnd, 0, 11)).unwrap();
        let doc = builder.finish();
        let a = doc.element(doc.children(doc.root())[0]).unwrap();
        assert_eq!(a.properties.get("title"), Some(&PropertyValue::from("xy")));
    }

    #[test]
    fn test_comment_fragments() {
        let source = "<!--ab-->";
        let mut builder = TreeBuilder::new(source, &ParseOptions::DEFAULT);
        builder.feed(Token::new(Event::Comment("a".into()), 0, 5)).unwrap();
        builder.feed(Token::new(Event::Comment("b".into()), 5, 6)).unwrap();
        builder.feed(Token::new(Event::CommentEnd, 6, 8)).unwrap();
        let doc = builder.finish();

        let children = doc.children(doc.root());
        assert_eq!(children.len(), 1);
        let comment = doc.kind(children[0]).and_then(NodeKind::as_comment).unwrap();
        assert_eq!(comment.value(), "ab");
        assert_eq!(doc.position(children[0]).unwrap().end, Point::new(1, 10, 9));

        let doc = parse("<!--a--><!--b-->").unwrap();
        assert_eq!(doc.children(doc.root()).len(), 2);
    }

    #[test]
    fn test_directives_and_cdata() {
        let doc = parse("<!DOCTYPE html><?xml v?><![CDATA[x<y]]>").unwrap();
        let kinds: Vec<_> = doc
            .children(doc.root())
            .iter()
            .map(|&id| doc.kind(id).unwrap().clone())
            .collect();
        assert_eq!(kinds[0].as_directive().unwrap().name, "!doctype");
        assert_eq!(kinds[1].as_directive().unwrap().value, "?xml v?");
        assert_eq!(kinds[2].as_character_data().unwrap().value(), "x<y");
    }

    #[test]
    fn test_positions() {
        let doc = parse("<a>b</a>\n<i>").unwrap();
        let children = doc.children(doc.root()).to_vec();
        let a = doc.position(children[0]).unwrap();
        assert_eq!((a.start, a.end), (Point::START, Point::new(1, 9, 8)));

        let b = doc.position(doc.children(children[0])[0]).unwrap();
        assert_eq!((b.start, b.end), (Point::new(1, 4, 3), Point::new(1, 5, 4)));

        let newline = doc.position(children[1]).unwrap();
        assert_eq!(newline.end, Point::new(2, 1, 9));

        let i = doc.position(children[2]).unwrap();
        assert_eq!((i.start, i.end), (Point::new(2, 1, 9), Point::new(2, 4, 12)));
    }

    #[test]
    fn test_lexical_error_is_fatal() {
        assert_eq!(
            parse("<div><!-- never closed"),
            Err(LexError::UnexpectedEof { construct: "comment", offset: 5 })
        );
    }

    #[test]
    fn test_raw_text_content() {
        let doc = parse("<script>a<b</script>").unwrap();
        let script = doc.children(doc.root())[0];
        assert_eq!(doc.text_content(script), "a<b");
    }
}
