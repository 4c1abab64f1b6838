// src/dom/parse.rs
// Deliberately naive, tolerant HTML parsing: byte scanning, ASCII
// case-insensitive tag names, no validation and no repair beyond stack
// recovery on mismatched closing tags. Never fails; garbage input just
// yields a sparse tree. Entities are kept as written.

use super::{is_void, Document, NodeId};

/// Parse an HTML string into a [`Document`]. Comments, doctypes and
/// processing instructions are skipped; `<script>`/`<style>` bodies are
/// captured raw; unknown closing tags are ignored.
pub fn parse_html(html: &str) -> Document {
    Parser::new(html).run()
}

struct Parser<'a> {
    s: &'a str,
    b: &'a [u8],
    i: usize,
    doc: Document,
    stack: Vec<NodeId>,
}

impl<'a> Parser<'a> {
    fn new(s: &'a str) -> Self {
        let doc = Document::new();
        let root = doc.root();
        Parser { s, b: s.as_bytes(), i: 0, doc, stack: vec![root] }
    }

    fn run(mut self) -> Document {
        let n = self.b.len();
        while self.i < n {
            match self.b[self.i] {
                b'<' => self.tag(),
                _ => self.text(),
            }
        }
        self.doc
    }

    /// Accumulate text up to the next '<' and attach it to the current
    /// element: its `text` before any child, the last child's `tail` after.
    fn text(&mut self) {
        let start = self.i;
        while self.i < self.b.len() && self.b[self.i] != b'<' {
            self.i += 1;
        }
        let chunk = &self.s[start..self.i];
        if chunk.is_empty() {
            return;
        }
        self.add_text(chunk);
    }

    fn add_text(&mut self, chunk: &str) {
        let top = *self.stack.last().unwrap();
        let slot = match self.doc.children(top).last().copied() {
            Some(last) => self.doc.node_mut(last).tail.get_or_insert_with(String::new),
            None => self.doc.node_mut(top).text.get_or_insert_with(String::new),
        };
        slot.push_str(chunk);
    }

    fn tag(&mut self) {
        // self.b[self.i] == b'<'
        if self.starts_with("<!--") {
            self.skip_past("-->");
        } else if self.starts_with("<!") || self.starts_with("<?") {
            self.skip_past(">");
        } else if self.starts_with("</") {
            self.close_tag();
        } else if self.i + 1 < self.b.len() && self.b[self.i + 1].is_ascii_alphabetic() {
            self.open_tag();
        } else {
            // Stray '<' in text.
            self.add_text("<");
            self.i += 1;
        }
    }

    fn close_tag(&mut self) {
        self.i += 2;
        let name = self.tag_name();
        self.skip_past(">");
        // Unwind to the matching open element; ignore an unmatched close.
        if let Some(depth) = self
            .stack
            .iter()
            .rposition(|&id| self.doc.node(id).tag == name)
        {
            if depth > 0 {
                self.stack.truncate(depth);
            }
        }
    }

    fn open_tag(&mut self) {
        self.i += 1;
        let name = self.tag_name();
        let el = self.doc.new_element(&name);
        self.attrs(el);

        let self_closed = self.b.get(self.i) == Some(&b'/');
        while self.i < self.b.len() && self.b[self.i] != b'>' {
            self.i += 1;
        }
        self.i = (self.i + 1).min(self.b.len());

        let top = *self.stack.last().unwrap();
        self.doc.append_child(top, el);

        if name == "script" || name == "style" {
            self.raw_body(el, &name);
        } else if !self_closed && !is_void(&name) {
            self.stack.push(el);
        }
    }

    /// Capture everything up to the matching close tag as raw text.
    fn raw_body(&mut self, el: NodeId, name: &str) {
        let close = format!("</{name}");
        let lower = self.s[self.i..].to_ascii_lowercase();
        let end = lower.find(&close).unwrap_or(self.s.len() - self.i);
        let body = &self.s[self.i..self.i + end];
        if !body.is_empty() {
            self.doc.node_mut(el).text = Some(s!(body));
        }
        self.i += end;
        if self.i < self.b.len() {
            self.skip_past(">");
        }
    }

    fn tag_name(&mut self) -> String {
        let start = self.i;
        while self.i < self.b.len() {
            match self.b[self.i] {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' => self.i += 1,
                _ => break,
            }
        }
        self.s[start..self.i].to_ascii_lowercase()
    }

    fn attrs(&mut self, el: NodeId) {
        loop {
            self.skip_ws();
            match self.b.get(self.i) {
                None | Some(&b'>') | Some(&b'/') => return,
                _ => {}
            }
            let name = self.attr_name();
            if name.is_empty() {
                self.i += 1; // junk byte; don't loop forever
                continue;
            }
            self.skip_ws();
            let value = if self.b.get(self.i) == Some(&b'=') {
                self.i += 1;
                self.skip_ws();
                self.attr_value()
            } else {
                String::new()
            };
            self.doc.node_mut(el).attrs.push((name, value));
        }
    }

    fn attr_name(&mut self) -> String {
        let start = self.i;
        while self.i < self.b.len() {
            match self.b[self.i] {
                b'=' | b'>' | b'/' | b' ' | b'\t' | b'\r' | b'\n' => break,
                _ => self.i += 1,
            }
        }
        self.s[start..self.i].to_ascii_lowercase()
    }

    fn attr_value(&mut self) -> String {
        match self.b.get(self.i) {
            Some(&q @ (b'"' | b'\'')) => {
                self.i += 1;
                let start = self.i;
                while self.i < self.b.len() && self.b[self.i] != q {
                    self.i += 1;
                }
                let v = s!(&self.s[start..self.i]);
                self.i = (self.i + 1).min(self.b.len());
                v
            }
            _ => {
                let start = self.i;
                while self.i < self.b.len() {
                    match self.b[self.i] {
                        b'>' | b'/' | b' ' | b'\t' | b'\r' | b'\n' => break,
                        _ => self.i += 1,
                    }
                }
                s!(&self.s[start..self.i])
            }
        }
    }

    fn skip_ws(&mut self) {
        while self.i < self.b.len() && self.b[self.i].is_ascii_whitespace() {
            self.i += 1;
        }
    }

    fn starts_with(&self, pat: &str) -> bool {
        self.s[self.i..].starts_with(pat)
    }

    fn skip_past(&mut self, pat: &str) {
        match self.s[self.i..].find(pat) {
            Some(p) => self.i += p + pat.len(),
            None => self.i = self.s.len(),
        }
    }
}
