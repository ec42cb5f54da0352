//! Streaming `<lastmod>` rewrite.
//!
//! Events are read with quick-xml and written straight back, so markup,
//! attributes, comments and whitespace between elements keep their bytes.
//! The writer does normalize the inside of a few tags: whitespace before the
//! `>` of an end tag (`</url >`) and in a `<!DOCTYPE>` declaration. While
//! inside a selected `lastmod`, its content (text, CDATA, stray children) is
//! swallowed and the new date is emitted right before the closing tag.

use super::{SitemapKind, XmlError};
use quick_xml::{
    Reader, Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};

const LASTMOD: &[u8] = b"lastmod";
const BOM: &str = "\u{feff}";

/// Result of a rewrite.
#[derive(Debug)]
pub struct Rewrite {
    /// Serialized document.
    pub xml: Vec<u8>,
    pub kind: SitemapKind,
    /// Number of `lastmod` elements that received the new date.
    pub updated: usize,
    /// Previous contents of each updated `lastmod`, in document order.
    pub previous: Vec<String>,
}

impl Rewrite {
    /// True if the rewrite produced the same bytes it was given.
    pub fn is_unchanged(&self, original: &str) -> bool {
        self.xml == original.as_bytes()
    }
}

/// Replace the content of every entry-level `<lastmod>` with `date`.
pub fn rewrite_lastmod(xml: &str, date: &str) -> Result<Rewrite, XmlError> {
    // Keep a leading BOM out of the parser and put it back verbatim
    let (bom, body) = match xml.strip_prefix(BOM) {
        Some(rest) => (BOM, rest),
        None => ("", xml),
    };

    let mut buf = Vec::with_capacity(xml.len());
    buf.extend_from_slice(bom.as_bytes());

    let mut rewriter = LastmodRewriter {
        writer: Writer::new(buf),
        date,
        stack: Vec::new(),
        kind: None,
        replacing: None,
        current: String::new(),
        previous: Vec::new(),
    };

    let mut reader = Reader::from_str(body);
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(event) => {
                if rewriter.is_outside_root(&event) {
                    let position = reader.buffer_position() as u64;
                    return Err(XmlError::TextOutsideRoot(position));
                }
                rewriter.handle(event)?;
            }
            Err(source) => {
                return Err(XmlError::Syntax {
                    position: reader.error_position() as u64,
                    source,
                });
            }
        }
    }

    rewriter.finish()
}

struct LastmodRewriter<'d> {
    writer: Writer<Vec<u8>>,
    date: &'d str,
    /// Local names of the currently open elements.
    stack: Vec<Vec<u8>>,
    kind: Option<SitemapKind>,
    /// Stack depth of the `lastmod` being replaced, if any.
    replacing: Option<usize>,
    /// Text collected from the `lastmod` being replaced.
    current: String,
    previous: Vec<String>,
}

impl LastmodRewriter<'_> {
    fn handle(&mut self, event: Event<'_>) -> Result<(), XmlError> {
        match event {
            Event::Start(elem) => self.start(elem),
            Event::Empty(elem) => self.empty(elem),
            Event::End(elem) => self.end(elem),
            Event::Text(text) if self.replacing.is_some() => {
                self.current.push_str(&String::from_utf8_lossy(&text));
                Ok(())
            }
            Event::CData(data) if self.replacing.is_some() => {
                self.current.push_str(&String::from_utf8_lossy(&data));
                Ok(())
            }
            // Comments, entity refs, PIs inside a replaced lastmod are dropped
            _ if self.replacing.is_some() => Ok(()),
            event => Ok(self.writer.write_event(event)?),
        }
    }

    fn start(&mut self, elem: BytesStart<'_>) -> Result<(), XmlError> {
        if self.stack.is_empty() {
            self.detect_root(&elem)?;
        }

        let selected = self.replacing.is_none() && self.is_selected(&elem);
        self.stack.push(elem.local_name().as_ref().to_vec());

        if self.replacing.is_some() {
            return Ok(());
        }

        self.writer.write_event(Event::Start(elem))?;
        if selected {
            self.replacing = Some(self.stack.len());
            self.current.clear();
        }
        Ok(())
    }

    fn empty(&mut self, elem: BytesStart<'_>) -> Result<(), XmlError> {
        if self.stack.is_empty() {
            self.detect_root(&elem)?;
        }
        if self.replacing.is_some() {
            return Ok(());
        }

        if self.is_selected(&elem) {
            // <lastmod/> becomes <lastmod>DATE</lastmod>
            let end = elem.to_end().into_owned();
            self.writer.write_event(Event::Start(elem))?;
            self.write_date()?;
            self.writer.write_event(Event::End(end))?;
            self.previous.push(String::new());
            return Ok(());
        }

        Ok(self.writer.write_event(Event::Empty(elem))?)
    }

    fn end(&mut self, elem: BytesEnd<'_>) -> Result<(), XmlError> {
        let depth = self.stack.len();
        self.stack.pop();

        match self.replacing {
            Some(target) if target == depth => {
                self.replacing = None;
                self.write_date()?;
                self.previous.push(std::mem::take(&mut self.current));
                Ok(self.writer.write_event(Event::End(elem))?)
            }
            Some(_) => Ok(()),
            None => Ok(self.writer.write_event(Event::End(elem))?),
        }
    }

    /// Character data at the top level, where only markup and whitespace may appear.
    fn is_outside_root(&self, event: &Event<'_>) -> bool {
        if !self.stack.is_empty() {
            return false;
        }
        match event {
            Event::Text(text) => !text.iter().all(u8::is_ascii_whitespace),
            Event::CData(_) | Event::GeneralRef(_) => true,
            _ => false,
        }
    }

    fn detect_root(&mut self, elem: &BytesStart<'_>) -> Result<(), XmlError> {
        if self.kind.is_some() {
            return Err(XmlError::ExtraRoot(
                String::from_utf8_lossy(elem.name().as_ref()).into_owned(),
            ));
        }
        let name = elem.local_name();
        match SitemapKind::from_root(name.as_ref()) {
            Some(kind) => {
                self.kind = Some(kind);
                Ok(())
            }
            None => Err(XmlError::UnexpectedRoot(
                String::from_utf8_lossy(elem.name().as_ref()).into_owned(),
            )),
        }
    }

    /// `lastmod` whose direct parent is the entry element of this kind.
    fn is_selected(&self, elem: &BytesStart<'_>) -> bool {
        let Some(kind) = self.kind else {
            return false;
        };
        elem.local_name().as_ref() == LASTMOD
            && self
                .stack
                .last()
                .is_some_and(|parent| parent.as_slice() == kind.entry_tag().as_bytes())
    }

    fn write_date(&mut self) -> Result<(), XmlError> {
        self.writer
            .write_event(Event::Text(BytesText::new(self.date)))?;
        Ok(())
    }

    fn finish(self) -> Result<Rewrite, XmlError> {
        if let Some(open) = self.stack.last() {
            return Err(XmlError::Unclosed(
                String::from_utf8_lossy(open).into_owned(),
            ));
        }
        let kind = self.kind.ok_or(XmlError::MissingRoot)?;

        Ok(Rewrite {
            xml: self.writer.into_inner(),
            kind,
            updated: self.previous.len(),
            previous: self.previous,
        })
    }
}
