// src/dom/mod.rs
// Arena-backed HTML element tree with the lxml-style text/tail model:
// `text` is the content before the first child, `tail` the content after
// the element's own closing tag. The template/brain machinery never
// touches this module; only the tree differ and the mining pipeline do.

pub mod clean;
mod parse;

pub use parse::parse_html;

pub type NodeId = usize;

/// Tags that never take a closing tag or children.
pub const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link",
    "meta", "param", "source", "track", "wbr",
];

pub fn is_void(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

#[derive(Clone, Debug, Default)]
pub struct Node {
    pub tag: String,
    /// Attributes in source order, names lowercased.
    pub attrs: Vec<(String, String)>,
    pub text: Option<String>,
    pub tail: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Attribute sets compare order-insensitively.
    pub fn attrs_equal(&self, other: &Node) -> bool {
        self.attrs.len() == other.attrs.len()
            && self.attrs.iter().all(|(k, v)| other.attr(k) == Some(v.as_str()))
    }
}

/// One parsed HTML document. Nodes live in an arena; detached subtrees
/// simply become unreachable, so NodeIds held by callers stay valid for
/// the document's lifetime.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    /// An empty document: just the synthetic root container.
    pub fn new() -> Self {
        let root = Node { tag: s!("#document"), ..Node::default() };
        Document { nodes: vec![root], root: 0 }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// Allocate a detached element.
    pub fn new_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Node { tag: s!(tag), ..Node::default() });
        self.nodes.len() - 1
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes[child].parent.is_none());
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    /// Unlink a subtree from its parent. The element's own tail goes with
    /// it; callers that need the tail preserved use [`Document::drop_tree`].
    pub fn detach(&mut self, id: NodeId) {
        if let Some(p) = self.nodes[id].parent.take() {
            self.nodes[p].children.retain(|&c| c != id);
        }
    }

    /// Remove an element and its children, joining its tail onto the
    /// previous sibling's tail (or the parent's text when it is the first
    /// child), so no surrounding text is lost.
    pub fn drop_tree(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id].parent else { return };
        let pos = self.position(parent, id);
        let tail = self.nodes[id].tail.take();
        self.detach(id);
        if let Some(tail) = tail {
            self.join_text_at(parent, pos, &tail);
        }
    }

    /// Remove an element but keep its contents: text and children are
    /// spliced into the parent at the element's position, tails included.
    pub fn drop_tag(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id].parent else { return };
        let pos = self.position(parent, id);
        let text = self.nodes[id].text.take();
        let tail = self.nodes[id].tail.take();
        let inner = std::mem::take(&mut self.nodes[id].children);
        self.detach(id);

        if let Some(text) = text {
            self.join_text_at(parent, pos, &text);
        }
        for (i, child) in inner.iter().enumerate() {
            self.nodes[*child].parent = Some(parent);
            self.nodes[parent].children.insert(pos + i, *child);
        }
        if let Some(tail) = tail {
            self.join_text_at(parent, pos + inner.len(), &tail);
        }
    }

    /// Replace an element's child list wholesale. The new children must
    /// already be detached.
    pub fn replace_children(&mut self, parent: NodeId, new: Vec<NodeId>) {
        let old = std::mem::take(&mut self.nodes[parent].children);
        for c in old {
            self.nodes[c].parent = None;
        }
        for &c in &new {
            debug_assert!(self.nodes[c].parent.is_none());
            self.nodes[c].parent = Some(parent);
        }
        self.nodes[parent].children = new;
    }

    /// True while the node is still reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut cur = id;
        loop {
            if cur == self.root {
                return true;
            }
            match self.nodes[cur].parent {
                Some(p) => cur = p,
                None => return false,
            }
        }
    }

    /// Attached descendants of `id` in document (pre-)order, excluding
    /// `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id].children.iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.nodes[n].children.iter().rev());
        }
        out
    }

    /// Concatenated text content of the subtree: text and child tails, in
    /// document order. Entities are left as written.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(t) = &self.nodes[id].text {
            out.push_str(t);
        }
        for &c in &self.nodes[id].children {
            self.collect_text(c, out);
            if let Some(t) = &self.nodes[c].tail {
                out.push_str(t);
            }
        }
    }

    /// Serialize one element, children and tails included, own tail
    /// excluded. The synthetic root serializes as its contents.
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// Serialize an element's contents only (no wrapping tags).
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_inner(id, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let node = &self.nodes[id];
        if node.tag == "#document" {
            self.write_inner(id, out);
            return;
        }
        out.push('<');
        out.push_str(&node.tag);
        for (k, v) in &node.attrs {
            out.push(' ');
            out.push_str(k);
            out.push_str("=\"");
            out.push_str(&v.replace('"', "&quot;"));
            out.push('"');
        }
        out.push('>');
        if is_void(&node.tag) {
            return;
        }
        self.write_inner(id, out);
        out.push_str("</");
        out.push_str(&node.tag);
        out.push('>');
    }

    fn write_inner(&self, id: NodeId, out: &mut String) {
        if let Some(t) = &self.nodes[id].text {
            out.push_str(t);
        }
        for &c in &self.nodes[id].children {
            self.write_node(c, out);
            if let Some(t) = &self.nodes[c].tail {
                out.push_str(t);
            }
        }
    }

    fn position(&self, parent: NodeId, child: NodeId) -> usize {
        self.nodes[parent]
            .children
            .iter()
            .position(|&c| c == child)
            .unwrap_or(0)
    }

    /// Join text into the slot before child position `pos`: the previous
    /// sibling's tail, or the parent's text when there is none.
    fn join_text_at(&mut self, parent: NodeId, pos: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        if pos > 0 {
            let prev = self.nodes[parent].children[pos - 1];
            let tail = self.nodes[prev].tail.get_or_insert_with(String::new);
            tail.push_str(text);
        } else {
            let slot = self.nodes[parent].text.get_or_insert_with(String::new);
            slot.push_str(text);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_tail_round_trip() {
        let html = "<div>a<p>b</p>c<p>d</p>e</div>";
        let doc = parse_html(html);
        assert_eq!(doc.to_html(doc.root()), html);
        let div = doc.children(doc.root())[0];
        assert_eq!(doc.node(div).text.as_deref(), Some("a"));
        let p1 = doc.children(div)[0];
        assert_eq!(doc.node(p1).text.as_deref(), Some("b"));
        assert_eq!(doc.node(p1).tail.as_deref(), Some("c"));
        assert_eq!(doc.text_content(doc.root()), "abcde");
    }

    #[test]
    fn drop_tree_keeps_the_tail() {
        let mut doc = parse_html("<div>a<p>b</p>c</div>");
        let div = doc.children(doc.root())[0];
        let p = doc.children(div)[0];
        doc.drop_tree(p);
        assert_eq!(doc.to_html(doc.root()), "<div>ac</div>");
        assert!(!doc.is_attached(p));
    }

    #[test]
    fn drop_tag_keeps_the_contents() {
        let mut doc = parse_html("<div>a<b>bold</b>c</div>");
        let div = doc.children(doc.root())[0];
        let b = doc.children(div)[0];
        doc.drop_tag(b);
        assert_eq!(doc.to_html(doc.root()), "<div>aboldc</div>");
    }

    #[test]
    fn detach_drops_the_tail_with_the_subtree() {
        let mut doc = parse_html("<div><p>b</p>tail</div>");
        let div = doc.children(doc.root())[0];
        let p = doc.children(div)[0];
        doc.detach(p);
        assert_eq!(doc.to_html(doc.root()), "<div></div>");
    }

    #[test]
    fn attrs_compare_as_a_set() {
        let a = parse_html(r#"<p id="x" class="y"></p>"#);
        let b = parse_html(r#"<p class="y" id="x"></p>"#);
        let (pa, pb) = (a.children(a.root())[0], b.children(b.root())[0]);
        assert!(a.node(pa).attrs_equal(b.node(pb)));
    }

    #[test]
    fn descendants_in_document_order() {
        let doc = parse_html("<div><p>a</p><span><i>b</i></span></div>");
        let tags: Vec<String> = doc
            .descendants(doc.root())
            .into_iter()
            .map(|n| doc.node(n).tag.clone())
            .collect();
        assert_eq!(tags, ["div", "p", "span", "i"]);
    }
}
