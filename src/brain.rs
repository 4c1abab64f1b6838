// src/brain.rs
// Ordered literal+hole representation of a learned template.

use serde::{Deserialize, Serialize};

use crate::error::{MineError, Result};
use crate::hole::Hole;

/// Marker substituted for holes by the default [`Brain::as_text`] rendering.
pub const HOLE_MARKER: &str = "{{ HOLE }}";

/// One brain member: a run of literal text or a typed hole.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Item {
    Literal(String),
    Hole(Hole),
}

/// Atomic diff token: one literal character or an opaque hole. Holes
/// compare structurally, so a hole only ever matches an identical hole,
/// never literal text.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Tok {
    Ch(char),
    Hole(Hole),
}

/// Ordered sequence of literal runs and holes.
///
/// The item list is kept canonical: consecutive literals are merged on
/// every insertion, and holes are never merged with each other or folded
/// into a neighboring literal. The raw list is deliberately not exposed
/// for mutation; all writes go through [`Brain::push_literal`] and
/// [`Brain::push_hole`] so the invariant holds mechanically.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brain {
    items: Vec<Item>,
}

impl Brain {
    pub fn new() -> Self {
        Self::default()
    }

    /// A brain consisting of one literal run (no holes). An empty string
    /// yields an empty brain.
    pub fn from_literal(text: &str) -> Self {
        let mut brain = Brain::new();
        brain.push_literal(text);
        brain
    }

    /// Read-only view of the members.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append literal text, merging into a trailing literal run if there
    /// is one. Empty text is a no-op.
    pub fn push_literal(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.items.last_mut() {
            Some(Item::Literal(run)) => run.push_str(text),
            _ => self.items.push(Item::Literal(s!(text))),
        }
    }

    pub fn push_hole(&mut self, hole: Hole) {
        self.items.push(Item::Hole(hole));
    }

    /// Merge consecutive literal items and drop empty ones. Brains built
    /// through the push API are already canonical; this exists for brains
    /// restored from serialized form. Idempotent.
    pub fn canonicalize(&mut self) {
        let items = std::mem::take(&mut self.items);
        for item in items {
            match item {
                Item::Literal(run) => self.push_literal(&run),
                Item::Hole(hole) => self.push_hole(hole),
            }
        }
    }

    /// Display-friendly rendering: literal runs verbatim, every hole
    /// replaced by `marker`.
    pub fn as_text(&self, marker: &str) -> String {
        let mut out = String::new();
        for item in &self.items {
            match item {
                Item::Literal(run) => out.push_str(run),
                Item::Hole(_) => out.push_str(marker),
            }
        }
        out
    }

    /// Number of holes of any variant.
    pub fn num_holes(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i, Item::Hole(_)))
            .count()
    }

    /// Regular expression (as a string) matching text formatted with this
    /// brain. Literal runs are escaped; holes contribute their fragment.
    /// `(?s)` lets wildcard holes span newlines.
    pub fn match_regex(&self) -> String {
        let mut regex = s!("(?s)^");
        for item in &self.items {
            match item {
                Item::Literal(run) => regex.push_str(&regex::escape(run)),
                Item::Hole(hole) => regex.push_str(&hole.regex_fragment()),
            }
        }
        regex.push('$');
        regex
    }

    /// Serialize to a printable, self-describing tagged encoding. The
    /// format is version-local: round-trips are byte-exact within one
    /// build, with no cross-version guarantee.
    pub fn serialize(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a brain produced by [`Brain::serialize`]. Corrupt or
    /// foreign blobs fail loudly; a restored brain is re-canonicalized so
    /// the literal-merge invariant holds even for hand-crafted input.
    pub fn from_serialized(blob: &str) -> Result<Self> {
        let mut brain: Brain = serde_json::from_str(blob)
            .map_err(|e| MineError::Corrupt(e.to_string()))?;
        brain.canonicalize();
        Ok(brain)
    }

    /// Explode into diff tokens: literal runs become one token per char,
    /// holes stay atomic.
    pub(crate) fn to_tokens(&self) -> Vec<Tok> {
        let mut toks = Vec::new();
        for item in &self.items {
            match item {
                Item::Literal(run) => toks.extend(run.chars().map(Tok::Ch)),
                Item::Hole(hole) => toks.push(Tok::Hole(hole.clone())),
            }
        }
        toks
    }

    /// Rebuild from diff tokens; canonical by construction.
    pub(crate) fn from_tokens(toks: Vec<Tok>) -> Self {
        let mut brain = Brain::new();
        for tok in toks {
            match tok {
                Tok::Ch(c) => {
                    let mut buf = [0u8; 4];
                    brain.push_literal(c.encode_utf8(&mut buf));
                }
                Tok::Hole(hole) => brain.push_hole(hole),
            }
        }
        brain
    }
}
