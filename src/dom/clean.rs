// src/dom/clean.rs
// Destructive cleanup passes run over a parsed tree before mining.
// All of them preserve surrounding text by going through the tail-aware
// removal primitives on Document.

use super::{Document, NodeId};
use crate::core::sanitize::is_blank;

/// Tags whose whole subtree is always discarded, markup and text alike.
const ALWAYS_DROP: &[&str] = &["style", "link", "meta", "script", "noscript"];

/// Strip a freshly parsed tree down to content-bearing markup.
///
/// `drop_trees` lose their entire subtree, `drop_tags` lose only the tag
/// itself (contents are spliced into the parent), and `drop_attrs` are
/// removed from every surviving element along with any namespaced
/// attribute.
pub fn preprocess(
    doc: &mut Document,
    drop_tags: &[&str],
    drop_trees: &[&str],
    drop_attrs: &[&str],
) {
    let snapshot = doc.descendants(doc.root());
    for id in snapshot {
        if !doc.is_attached(id) {
            continue;
        }
        let tag = doc.node(id).tag.clone();
        if ALWAYS_DROP.contains(&tag.as_str()) || drop_trees.contains(&tag.as_str()) {
            doc.drop_tree(id);
        } else if drop_tags.contains(&tag.as_str()) {
            doc.drop_tag(id);
        } else {
            doc.node_mut(id)
                .attrs
                .retain(|(k, _)| !k.contains(':') && !drop_attrs.contains(&k.as_str()));
        }
    }
}

/// Repeatedly remove elements with no children and no text until a full
/// sweep removes nothing. Tags in `ignore` (e.g. "br") are kept even when
/// empty; the root is never removed. Tails survive removal.
pub fn remove_empty_tags(doc: &mut Document, ignore: &[&str]) {
    loop {
        let mut removed = false;
        for id in doc.descendants(doc.root()) {
            if !doc.is_attached(id) {
                continue;
            }
            let n = doc.node(id);
            if ignore.contains(&n.tag.as_str()) {
                continue;
            }
            if n.children.is_empty() && is_blank(n.text.as_deref()) {
                doc.drop_tree(id);
                removed = true;
            }
        }
        if !removed {
            return;
        }
    }
}

/// Rewrite `<br>`-separated runs of text under `id` into `<p>` elements,
/// recursing into elements that contain no `<br>` of their own.
pub fn brs_to_paragraphs(doc: &mut Document, id: NodeId) {
    let kids: Vec<NodeId> = doc.children(id).to_vec();
    let has_br = kids.iter().any(|&c| doc.node(c).tag == "br");
    if !has_br {
        for c in kids {
            brs_to_paragraphs(doc, c);
        }
        return;
    }

    let mut rebuilt = Vec::new();
    if let Some(text) = doc.node_mut(id).text.take() {
        if !is_blank(Some(text.as_str())) {
            rebuilt.push(paragraph(doc, text));
        }
    }
    for c in kids {
        if doc.node(c).tag == "br" {
            if let Some(tail) = doc.node_mut(c).tail.take() {
                if !is_blank(Some(tail.as_str())) {
                    rebuilt.push(paragraph(doc, tail));
                }
            }
        } else {
            rebuilt.push(c);
            if let Some(tail) = doc.node_mut(c).tail.take() {
                if !is_blank(Some(tail.as_str())) {
                    rebuilt.push(paragraph(doc, tail));
                } else {
                    doc.node_mut(c).tail = Some(tail);
                }
            }
            brs_to_paragraphs(doc, c);
        }
    }
    doc.replace_children(id, rebuilt);
}

fn paragraph(doc: &mut Document, text: String) -> NodeId {
    let p = doc.new_element("p");
    doc.node_mut(p).text = Some(text);
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn preprocess_drops_scripts_and_unwraps_tags() {
        let mut doc = parse_html("<div><script>x()</script><b>bold</b> plain</div>");
        preprocess(&mut doc, &["b"], &[], &[]);
        let root = doc.root();
        assert_eq!(doc.to_html(root), "<div>bold plain</div>");
    }

    #[test]
    fn preprocess_drop_trees_removes_content_too() {
        let mut doc = parse_html("<div><iframe>junk</iframe>after</div>");
        preprocess(&mut doc, &[], &["iframe"], &[]);
        assert_eq!(doc.text_content(doc.root()), "after");
    }

    #[test]
    fn preprocess_strips_denied_and_namespaced_attrs() {
        let mut doc = parse_html(r#"<div class="x" xml:lang="en" title="keep">t</div>"#);
        preprocess(&mut doc, &[], &[], &["class"]);
        let div = doc.children(doc.root())[0];
        assert_eq!(doc.node(div).attrs, vec![(s!("title"), s!("keep"))]);
    }

    #[test]
    fn empty_tags_are_removed_reductively() {
        // Once the inner span goes, the div is empty too.
        let mut doc = parse_html("<p>a</p><div><span></span></div><p>b</p>");
        remove_empty_tags(&mut doc, &[]);
        assert_eq!(doc.to_html(doc.root()), "<p>a</p><p>b</p>");
    }

    #[test]
    fn empty_tag_removal_honors_ignore_list_and_tails() {
        let mut doc = parse_html("<p>a</p><br><span></span>kept tail");
        remove_empty_tags(&mut doc, &["br"]);
        assert_eq!(doc.to_html(doc.root()), "<p>a</p><br>kept tail");
    }

    #[test]
    fn brs_become_paragraphs() {
        let mut doc = parse_html("<div>one<br>two<br>three</div>");
        let div = doc.children(doc.root())[0];
        brs_to_paragraphs(&mut doc, div);
        assert_eq!(doc.to_html(div), "<div><p>one</p><p>two</p><p>three</p></div>");
    }

    #[test]
    fn br_conversion_keeps_elements_and_wraps_their_tails() {
        let mut doc = parse_html("<div><em>lead</em> trailing<br>next</div>");
        let div = doc.children(doc.root())[0];
        brs_to_paragraphs(&mut doc, div);
        assert_eq!(
            doc.to_html(div),
            "<div><em>lead</em><p> trailing</p><p>next</p></div>"
        );
    }

    #[test]
    fn blank_br_tails_produce_no_paragraphs() {
        let mut doc = parse_html("<div>a<br>  <br>b</div>");
        let div = doc.children(doc.root())[0];
        brs_to_paragraphs(&mut doc, div);
        assert_eq!(doc.to_html(div), "<div><p>a</p><p>b</p></div>");
    }
}
