// src/mine.rs
// Page mining: strip everything a subject page shares with reference pages
// from the same template, then surface the survivors as cleaned text.

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::sanitize::{has_alnum, is_blank, normalize_entities, normalize_ws};
use crate::dom::clean::{brs_to_paragraphs, preprocess, remove_empty_tags};
use crate::dom::{parse_html, Document, NodeId};
use crate::strip::{strip_template_marked, StripMarks};

/// Decorative tags unwrapped from mined blocks (contents kept).
const DROP_TAGS: &[&str] = &[
    "a", "area", "b", "center", "font", "form", "img", "input", "map", "small", "sub", "sup",
    "topic",
];

/// Widget tags removed from mined blocks wholesale, contents included.
const DROP_TREES: &[&str] = &[
    "applet", "button", "embed", "iframe", "object", "select", "textarea",
];

/// Presentation attributes stripped from every element of a mined block.
const DROP_ATTRS: &[&str] = &[
    "background", "border", "cellpadding", "cellspacing", "class", "clear", "id", "rel",
    "style", "target",
];

lazy_static! {
    /// Character and numeric entity references, matched so they don't count
    /// as visible text ("&nbsp;" must not pass an alphanumeric check).
    static ref ENTITY: Regex = Regex::new("&#?[A-Za-z0-9]+;").unwrap();
}

/// What made a surviving piece of the subject page unique.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FragmentKind {
    /// An attribute value differed from the references.
    Attribute,
    /// Element text (or tail) differed while the structure matched.
    Text,
    /// A run of sibling elements with no structural counterpart at all.
    MultiTagBlock,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub value: String,
}

impl Fragment {
    fn new(kind: FragmentKind, value: impl Into<String>) -> Self {
        Fragment { kind, value: value.into() }
    }
}

/// Diff `subject` against every reference page in order and return the
/// typed fragments unique to the subject, in document order.
pub fn extract_fragments(subject: &str, references: &[&str]) -> Vec<Fragment> {
    let mut doc = parse_html(subject);
    preprocess(&mut doc, &[], &[], &[]);

    let mut marks = StripMarks::default();
    for reference in references {
        let mut other = parse_html(reference);
        preprocess(&mut other, &[], &[], &[]);
        strip_template_marked(&mut doc, &mut other, true, &mut marks);
    }

    let mut out = Vec::new();
    collect(&doc, &marks, doc.root(), &mut out);
    out
}

/// Walk the stripped subject tree. Aligned elements contribute their
/// recorded attribute/text differences; consecutive never-aligned siblings
/// are grouped into one serialized block.
fn collect(doc: &Document, marks: &StripMarks, id: NodeId, out: &mut Vec<Fragment>) {
    let kids = doc.children(id);
    let mut i = 0;
    while i < kids.len() {
        let c = kids[i];
        if marks.shared.contains(&c) {
            if let Some(names) = marks.attr_diffs.get(&c) {
                for name in names {
                    let value = doc.node(c).attr(name).unwrap_or_default();
                    out.push(Fragment::new(FragmentKind::Attribute, value));
                }
            }
            if marks.text_diffs.contains(&c) {
                if let Some(text) = &doc.node(c).text {
                    out.push(Fragment::new(FragmentKind::Text, text.as_str()));
                }
            }
            collect(doc, marks, c, out);
            if marks.tail_diffs.contains(&c) {
                if let Some(tail) = &doc.node(c).tail {
                    out.push(Fragment::new(FragmentKind::Text, tail.as_str()));
                }
            }
            i += 1;
        } else {
            let start = i;
            while i < kids.len() && !marks.shared.contains(&kids[i]) {
                i += 1;
            }
            let mut html = String::new();
            for &u in &kids[start..i] {
                html.push_str(&doc.to_html(u));
                if let Some(tail) = &doc.node(u).tail {
                    html.push_str(tail);
                }
            }
            out.push(Fragment::new(FragmentKind::MultiTagBlock, html));
        }
    }
}

/// Mine the page-unique text of `subject` given reference pages from the
/// same template family. Attribute differences and fragments with no
/// visible alphanumeric content are dropped; block fragments get their
/// markup cleaned before serialization.
pub fn mine_page(subject: &str, references: &[&str]) -> Vec<String> {
    let mut result = Vec::new();
    for fragment in extract_fragments(subject, references) {
        if fragment.kind == FragmentKind::Attribute || is_blank(Some(fragment.value.as_str())) {
            continue;
        }
        let cleaned = match fragment.kind {
            FragmentKind::MultiTagBlock => match clean_block(&fragment.value) {
                Some(html) => html,
                None => continue,
            },
            _ => {
                if !visible_alnum(&fragment.value) {
                    continue;
                }
                fragment.value
            }
        };
        let squashed = squash(&cleaned);
        if !squashed.is_empty() {
            result.push(squashed);
        }
    }
    result
}

/// Re-parse a block fragment and scrub it for display: decorative tags and
/// attributes go, `<br>` runs become paragraphs, empty wrappers disappear.
/// Returns None when nothing visibly alphanumeric remains.
fn clean_block(html: &str) -> Option<String> {
    let mut doc = parse_html(html);
    preprocess(&mut doc, DROP_TAGS, DROP_TREES, DROP_ATTRS);
    remove_empty_tags(&mut doc, &["br"]);
    let root = doc.root();
    brs_to_paragraphs(&mut doc, root);
    if !visible_alnum(&doc.text_content(root)) {
        return None;
    }
    Some(doc.to_html(root))
}

/// Alphanumeric visibility with entity references masked out, so a bare
/// "&nbsp;" or "&#8212;" doesn't read as content.
fn visible_alnum(s: &str) -> bool {
    has_alnum(&ENTITY.replace_all(s, " "))
}

/// Final whitespace cleanup applied to every surfaced fragment.
fn squash(s: &str) -> String {
    normalize_ws(&normalize_entities(s))
}
