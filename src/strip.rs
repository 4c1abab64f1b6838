// src/strip.rs
// Structural diff over two parsed trees: aligns sibling lists by cheap
// element signatures, then detaches subtrees that are deep-equal on both
// sides. Both trees are mutated in place.

use std::collections::{HashMap, HashSet};

use crate::core::align::longest_common_run;
use crate::core::sanitize::is_blank;
use crate::dom::{Document, NodeId};

/// (tag, id attribute, class attribute). Cheap stand-in for full element
/// comparison when aligning sibling lists.
pub type Signature = (String, Option<String>, Option<String>);

pub fn signature(doc: &Document, id: NodeId) -> Signature {
    let n = doc.node(id);
    (
        n.tag.clone(),
        n.attr("id").map(String::from),
        n.attr("class").map(String::from),
    )
}

/// Full structural equality: tag, attribute set, text, tail and
/// recursively-equal children.
pub fn deep_equal(da: &Document, a: NodeId, db: &Document, b: NodeId) -> bool {
    let na = da.node(a);
    let nb = db.node(b);
    na.tag == nb.tag
        && na.attrs_equal(nb)
        && na.text == nb.text
        && na.tail == nb.tail
        && na.children().len() == nb.children().len()
        && na
            .children()
            .iter()
            .zip(nb.children())
            .all(|(&ca, &cb)| deep_equal(da, ca, db, cb))
}

/// What one diff pass observed about the subject tree. Survives stripping
/// so callers can tell structure-shared elements from page-unique ones.
#[derive(Debug, Default)]
pub struct StripMarks {
    /// Subject elements that aligned against a reference element.
    pub shared: HashSet<NodeId>,
    /// Differing attribute names per aligned-but-unequal subject element.
    pub attr_diffs: HashMap<NodeId, Vec<String>>,
    /// Aligned subject elements whose text differed.
    pub text_diffs: HashSet<NodeId>,
    /// Aligned subject elements whose tail differed.
    pub tail_diffs: HashSet<NodeId>,
}

/// One round's worth of planned mutations. Collected fully before being
/// applied so node snapshots taken during the scan stay valid.
#[derive(Default)]
struct Round {
    removals: Vec<(NodeId, NodeId)>,
    tail_blanks: Vec<(NodeId, NodeId)>,
}

/// Strip the content shared between `a` and `b` from both trees.
///
/// With `check_ids`, elements carrying the same non-blank `id` attribute
/// seed extra comparison pairs, which catches repeated substructure even
/// when it sits at different depths in the two trees. Returns the number
/// of removed pairs.
pub fn strip_template(a: &mut Document, b: &mut Document, check_ids: bool) -> usize {
    let mut marks = StripMarks::default();
    strip_template_marked(a, b, check_ids, &mut marks)
}

/// As [`strip_template`], additionally recording [`StripMarks`] for the
/// subject (`a`) side.
pub fn strip_template_marked(
    a: &mut Document,
    b: &mut Document,
    check_ids: bool,
    marks: &mut StripMarks,
) -> usize {
    let mut seeds: Vec<(NodeId, NodeId)> = vec![(a.root(), b.root())];
    if check_ids {
        seeds.extend(id_anchor_pairs(a, b));
    }

    let mut removed = 0;
    for (pa, pb) in seeds {
        // Removal can expose new boilerplate one level shallower, so each
        // seed pair is re-scanned until a round removes nothing.
        loop {
            if !a.is_attached(pa) || !b.is_attached(pb) {
                break;
            }
            let seed = (a.children(pa).to_vec(), b.children(pb).to_vec());
            let round = scan(a, b, seed, marks);
            if round.removals.is_empty() {
                break;
            }
            logd!(
                "strip: removing {} pairs, blanking {} tails",
                round.removals.len(),
                round.tail_blanks.len()
            );
            for (ta, tb) in round.tail_blanks {
                a.node_mut(ta).tail = Some(s!());
                b.node_mut(tb).tail = Some(s!());
            }
            for (ra, rb) in round.removals {
                if a.is_attached(ra) {
                    a.detach(ra);
                }
                if b.is_attached(rb) {
                    b.detach(rb);
                }
                removed += 1;
            }
        }
    }
    removed
}

/// For every non-blank `id` present in both trees, pair up the parents of
/// the two carriers.
fn id_anchor_pairs(a: &Document, b: &Document) -> Vec<(NodeId, NodeId)> {
    let mut by_id: HashMap<String, NodeId> = HashMap::new();
    for id in b.descendants(b.root()) {
        if let Some(v) = b.node(id).attr("id") {
            if !v.trim().is_empty() {
                by_id.entry(s!(v.trim())).or_insert(id);
            }
        }
    }
    let mut pairs = Vec::new();
    for id in a.descendants(a.root()) {
        if let Some(v) = a.node(id).attr("id") {
            if let Some(&other) = by_id.get(v.trim()) {
                if let (Some(pa), Some(pb)) = (a.node(id).parent(), b.node(other).parent()) {
                    pairs.push((pa, pb));
                }
            }
        }
    }
    pairs
}

/// One scan over a pair of sibling lists and everything they expose.
/// Flattens the natural recursion into an explicit worklist of sibling-list
/// pairs, producing planned mutations without touching either tree.
fn scan(
    a: &Document,
    b: &Document,
    seed: (Vec<NodeId>, Vec<NodeId>),
    marks: &mut StripMarks,
) -> Round {
    let mut round = Round::default();
    let mut pending = vec![seed];

    while let Some((la, lb)) = pending.pop() {
        if la.is_empty() && lb.is_empty() {
            continue;
        }
        let sa: Vec<Signature> = la.iter().map(|&id| signature(a, id)).collect();
        let sb: Vec<Signature> = lb.iter().map(|&id| signature(b, id)).collect();
        let run = longest_common_run(&sa, &sb);
        if run.len == 0 {
            continue;
        }
        let (o1, o2) = (run.off_a, run.off_b);

        if o1 > 0 && o2 > 0 {
            pending.push((la[..o1].to_vec(), lb[..o2].to_vec()));
        }
        for i in 0..run.len {
            let (ca, cb) = (la[o1 + i], lb[o2 + i]);
            marks.shared.insert(ca);
            if deep_equal(a, ca, b, cb) {
                round.removals.push((ca, cb));
                if i > 0 {
                    let (prev_a, prev_b) = (la[o1 + i - 1], lb[o2 + i - 1]);
                    if a.node(prev_a).tail == b.node(prev_b).tail {
                        round.tail_blanks.push((prev_a, prev_b));
                    }
                }
            } else {
                record_diffs(a, ca, b, cb, marks);
                pending.push((a.children(ca).to_vec(), b.children(cb).to_vec()));
            }
        }
        if o1 + run.len < la.len() && o2 + run.len < lb.len() {
            pending.push((la[o1 + run.len..].to_vec(), lb[o2 + run.len..].to_vec()));
        }
    }
    round
}

fn record_diffs(a: &Document, ca: NodeId, b: &Document, cb: NodeId, marks: &mut StripMarks) {
    let na = a.node(ca);
    let nb = b.node(cb);
    let mut names: Vec<String> = Vec::new();
    for (k, v) in &na.attrs {
        if nb.attr(k) != Some(v.as_str()) {
            names.push(k.clone());
        }
    }
    for (k, _) in &nb.attrs {
        if na.attr(k).is_none() {
            names.push(k.clone());
        }
    }
    if !names.is_empty() {
        names.sort();
        names.dedup();
        marks.attr_diffs.insert(ca, names);
    }
    if na.text != nb.text && !is_blank(na.text.as_deref()) {
        marks.text_diffs.insert(ca);
    }
    if na.tail != nb.tail && !is_blank(na.tail.as_deref()) {
        marks.tail_diffs.insert(ca);
    }
}
