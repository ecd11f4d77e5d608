//! Forgiving single-pass HTML tokenizer.
//!
//! Not an HTML5 state machine: it recognizes tags, attributes, comments,
//! CDATA sections, declarations and processing instructions, and treats
//! `script`/`style` content as raw text. A tag, comment or CDATA section
//! still open at end of input is reported as [`LexError::UnexpectedEof`];
//! an unterminated `<!` or `<?` is kept as text.

use std::collections::VecDeque;

use compact_str::CompactString;
use memchr::{memchr, memmem};

use crate::builder::tables::raw_text_tag;
use crate::entities;
use crate::error::LexError;

use super::{Event, Token};

const COMMENT_START: &str = "<!--";
const CDATA_START: &str = "<![CDATA[";

fn eof(construct: &'static str, offset: usize) -> LexError {
    LexError::UnexpectedEof { construct, offset }
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0C')
}

/// Iterator of [`Token`]s over a complete source string.
///
/// The last token is always [`Event::End`] or [`Event::Error`].
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    source: &'a str,
    pos: usize,
    queue: VecDeque<Token>,
    /// Set after `<script>` / `<style>` until the matching close tag
    raw_text: Option<&'static str>,
    decode: bool,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    /// Tokenize `source`, decoding character references.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            queue: VecDeque::new(),
            raw_text: None,
            decode: true,
            finished: false,
        }
    }

    /// Builder: whether text and attribute values are entity-decoded.
    pub fn decode_entities(mut self, decode: bool) -> Self {
        self.decode = decode;
        self
    }

    /// The source being scanned.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Current absolute scan offset.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// The part of the source not scanned yet.
    pub fn remaining(&self) -> &'a str {
        self.source.get(self.pos..).unwrap_or_default()
    }

    fn emit(&mut self, event: Event, start: usize, index: usize) {
        self.queue.push_back(Token::new(event, start, index));
    }

    fn fail(&mut self, err: LexError) {
        let len = self.source.len();
        self.emit(Event::Error(err), self.pos, len);
        self.pos = len;
        self.finished = true;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dispatch
    // ─────────────────────────────────────────────────────────────────────────

    fn scan(&mut self) {
        let len = self.source.len();
        if self.pos >= len {
            self.emit(Event::End, len, len);
            self.finished = true;
            return;
        }
        if let Some(tag) = self.raw_text.take() {
            self.scan_raw_text(tag);
            return;
        }
        if self.begins_markup(self.pos) {
            if let Err(err) = self.scan_markup(self.pos) {
                self.fail(err);
            }
            return;
        }
        self.scan_text();
    }

    /// Whether the `<` at `i` opens a construct rather than being literal.
    fn begins_markup(&self, i: usize) -> bool {
        let bytes = self.source.as_bytes();
        if bytes.get(i) != Some(&b'<') {
            return false;
        }
        match bytes.get(i + 1) {
            Some(b'!' | b'?') => true,
            Some(b'/') => bytes
                .get(i + 2)
                .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'>'),
            Some(b) => b.is_ascii_alphabetic(),
            None => false,
        }
    }

    fn scan_markup(&mut self, start: usize) -> Result<(), LexError> {
        match self.source.as_bytes()[start + 1] {
            b'/' => self.scan_close_tag(start),
            b'!' => self.scan_bang(start),
            b'?' => self.scan_processing_instruction(start),
            _ => self.scan_open_tag(start),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Text
    // ─────────────────────────────────────────────────────────────────────────

    fn scan_text(&mut self) {
        let bytes = self.source.as_bytes();
        let start = self.pos;
        let mut search = start + 1;
        let end = loop {
            match memchr(b'<', &bytes[search..]) {
                Some(rel) if self.begins_markup(search + rel) => break search + rel,
                Some(rel) => search += rel + 1,
                None => break bytes.len(),
            }
        };

        let raw = &self.source[start..end];
        let text = if self.decode { entities::decode(raw) } else { raw.to_owned() };
        self.emit(Event::Text(text), start, end);
        self.pos = end;
    }

    fn scan_raw_text(&mut self, tag: &'static str) {
        let start = self.pos;
        let end = self.find_raw_close(start, tag).unwrap_or(self.source.len());
        if end > start {
            self.emit(Event::Text(self.source[start..end].to_owned()), start, end);
        }
        self.pos = end;
    }

    /// Offset of the `</tag` that ends a raw-text element.
    fn find_raw_close(&self, from: usize, tag: &str) -> Option<usize> {
        let bytes = self.source.as_bytes();
        let mut search = from;
        while let Some(rel) = memchr(b'<', &bytes[search..]) {
            let i = search + rel;
            let name_end = i + 2 + tag.len();
            let matches = bytes.get(i + 1) == Some(&b'/')
                && bytes
                    .get(i + 2..name_end)
                    .is_some_and(|name| name.eq_ignore_ascii_case(tag.as_bytes()))
                && bytes
                    .get(name_end)
                    .map_or(true, |&b| b == b'>' || b == b'/' || is_space(b));
            if matches {
                return Some(i);
            }
            search = i + 1;
        }
        None
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tags
    // ─────────────────────────────────────────────────────────────────────────

    fn scan_open_tag(&mut self, start: usize) -> Result<(), LexError> {
        let name_end = self.name_end(start + 1);
        let name = CompactString::new(&self.source[start + 1..name_end]);
        let raw_text = raw_text_tag(&name);
        self.emit(Event::OpenTagName(name), start, name_end);

        let bytes = self.source.as_bytes();
        let mut i = name_end;
        loop {
            i = self.skip_space(i);
            match bytes.get(i) {
                None => return Err(eof("tag", start)),
                Some(b'>') => {
                    self.emit(Event::OpenTagEnd, start, i);
                    self.pos = i + 1;
                    self.raw_text = raw_text;
                    return Ok(());
                }
                Some(b'/') if bytes.get(i + 1) == Some(&b'>') => {
                    self.emit(Event::SelfClosingTag, start, i + 1);
                    self.pos = i + 2;
                    return Ok(());
                }
                Some(b'/') => i += 1,
                Some(_) => i = self.scan_attribute(i, start)?,
            }
        }
    }

    /// Scan one attribute starting at `start`; returns the offset after it.
    fn scan_attribute(&mut self, start: usize, tag_start: usize) -> Result<usize, LexError> {
        let bytes = self.source.as_bytes();
        // The first byte always belongs to the name, even if it is `=`.
        let mut name_end = start + 1;
        while name_end < bytes.len() && !matches!(bytes[name_end], b'=' | b'>' | b'/') && !is_space(bytes[name_end]) {
            name_end += 1;
        }
        let name = CompactString::new(&self.source[start..name_end]);
        self.emit(Event::AttributeName(name), start, name_end);

        let mut i = self.skip_space(name_end);
        if bytes.get(i) == Some(&b'=') {
            i = self.skip_space(i + 1);
            match bytes.get(i) {
                Some(&quote @ (b'"' | b'\'')) => {
                    let close = memchr(quote, &bytes[i + 1..])
                        .map(|rel| i + 1 + rel)
                        .ok_or(eof("attribute value", i))?;
                    self.emit_attribute_data(i + 1, close);
                    i = close + 1;
                }
                Some(_) => {
                    let value_start = i;
                    while i < bytes.len() && bytes[i] != b'>' && !is_space(bytes[i]) {
                        i += 1;
                    }
                    self.emit_attribute_data(value_start, i);
                }
                None => return Err(eof("tag", tag_start)),
            }
        }
        self.emit(Event::AttributeEnd, start, i);
        Ok(i)
    }

    fn emit_attribute_data(&mut self, start: usize, end: usize) {
        let raw = &self.source[start..end];
        let value = if self.decode { entities::decode(raw) } else { raw.to_owned() };
        self.emit(Event::AttributeData(value), start, end);
    }

    fn scan_close_tag(&mut self, start: usize) -> Result<(), LexError> {
        let name_start = start + 2;
        let close = self.find_byte(b'>', name_start).ok_or(eof("close tag", start))?;
        self.pos = close + 1;
        if close == name_start {
            log::trace!(target: "hast::lexer", "skipping empty close tag at {start}");
            return Ok(());
        }
        let name_end = self.name_end(name_start).min(close);
        let name = CompactString::new(&self.source[name_start..name_end]);
        self.emit(Event::CloseTag(name), start, close);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Comments, CDATA, declarations, processing instructions
    // ─────────────────────────────────────────────────────────────────────────

    fn scan_bang(&mut self, start: usize) -> Result<(), LexError> {
        let rest = &self.source[start..];
        let bytes = self.source.as_bytes();

        if rest.starts_with(COMMENT_START) {
            // Searching from `<!` lets `<!-->` and `<!--->` close immediately.
            let end = memmem::find(&bytes[start + 2..], b"-->")
                .map(|rel| start + 2 + rel)
                .ok_or(eof("comment", start))?;
            let content = self.source.get(start + COMMENT_START.len()..end).unwrap_or_default();
            self.emit(Event::Comment(content.to_owned()), start, end);
            self.emit(Event::CommentEnd, end, end + 2);
            self.pos = end + 3;
        } else if rest.starts_with(CDATA_START) {
            let body = start + CDATA_START.len();
            let end = memmem::find(&bytes[body..], b"]]>")
                .map(|rel| body + rel)
                .ok_or(eof("CDATA section", start))?;
            self.emit(Event::CharacterData(self.source[body..end].to_owned()), start, end + 2);
            self.pos = end + 3;
        } else {
            let Some(close) = self.find_byte(b'>', start + 2) else {
                self.scan_trailing_text(start, "declaration");
                return Ok(());
            };
            self.emit(Event::Declaration(self.source[start + 2..close].to_owned()), start, close);
            self.pos = close + 1;
        }
        Ok(())
    }

    fn scan_processing_instruction(&mut self, start: usize) -> Result<(), LexError> {
        let Some(close) = self.find_byte(b'>', start + 2) else {
            self.scan_trailing_text(start, "processing instruction");
            return Ok(());
        };
        self.emit(
            Event::ProcessingInstruction(self.source[start + 2..close].to_owned()),
            start,
            close,
        );
        self.pos = close + 1;
        Ok(())
    }

    /// Everything from `start` to end of input as one text run.
    fn scan_trailing_text(&mut self, start: usize, construct: &str) {
        log::debug!(target: "hast::lexer", "unterminated {construct} at {start} kept as text");
        let end = self.source.len();
        let raw = &self.source[start..];
        let text = if self.decode { entities::decode(raw) } else { raw.to_owned() };
        self.emit(Event::Text(text), start, end);
        self.pos = end;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scanning helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn find_byte(&self, needle: u8, from: usize) -> Option<usize> {
        let bytes = self.source.as_bytes();
        memchr(needle, bytes.get(from..)?).map(|rel| from + rel)
    }

    /// End of a tag name starting at `from`.
    fn name_end(&self, from: usize) -> usize {
        let bytes = self.source.as_bytes();
        let mut i = from;
        while i < bytes.len() && !matches!(bytes[i], b'/' | b'>') && !is_space(bytes[i]) {
            i += 1;
        }
        i
    }

    fn skip_space(&self, from: usize) -> usize {
        let bytes = self.source.as_bytes();
        let mut i = from;
        while i < bytes.len() && is_space(bytes[i]) {
            i += 1;
        }
        i
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                log::trace!(target: "hast::lexer", "{token}");
                return Some(token);
            }
            if self.finished {
                return None;
            }
            self.scan();
        }
    }
}
