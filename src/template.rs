// src/template.rs
// Incremental template learning and extraction over sample strings.

use regex::Regex;

use crate::brain::{Brain, Tok};
use crate::core::align::longest_common_run;
use crate::error::{MineError, Result};
use crate::hole::Hole;

/// Learns a [`Brain`] from sample strings of the same (unknown) template
/// and extracts the varying parts from further strings.
///
/// One template owns at most one brain. `learn` replaces the brain
/// wholesale; there are no partial-update or rollback semantics.
#[derive(Clone, Debug, Default)]
pub struct Template {
    brain: Option<Brain>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_brain(brain: Brain) -> Self {
        Self { brain: Some(brain) }
    }

    /// Restore a template from a serialized brain blob.
    pub fn from_serialized(blob: &str) -> Result<Self> {
        Ok(Self::from_brain(Brain::from_serialized(blob)?))
    }

    pub fn brain(&self) -> Option<&Brain> {
        self.brain.as_ref()
    }

    /// Fold one sample string into the template. The first sample becomes
    /// the brain verbatim; each later sample is diffed against the brain's
    /// token stream, and the regions that disagree become wildcard holes.
    /// Existing holes ride along as opaque tokens, so a hole only ever
    /// aligns with an identical hole, never with literal text.
    pub fn learn(&mut self, sample: &str) {
        let tokens: Vec<Tok> = sample.chars().map(Tok::Ch).collect();
        self.brain = Some(match self.brain.take() {
            None => Brain::from_literal(sample),
            Some(brain) => Brain::from_tokens(diff(&brain.to_tokens(), &tokens)),
        });
    }

    /// Display-friendly rendering; every hole becomes `marker`. Empty
    /// string until something has been learned.
    pub fn as_text(&self, marker: &str) -> String {
        self.brain
            .as_ref()
            .map(|b| b.as_text(marker))
            .unwrap_or_default()
    }

    pub fn num_holes(&self) -> usize {
        self.brain.as_ref().map_or(0, Brain::num_holes)
    }

    /// Extract the hole contents from `text`, one string per captured
    /// group, left to right. A zero-hole template matches with an empty
    /// result; text that does not fit the template is [`MineError::NoMatch`].
    pub fn extract(&self, text: &str) -> Result<Vec<String>> {
        let brain = self.brain.as_ref().ok_or(MineError::Unlearned)?;
        let re = Regex::new(&brain.match_regex())?;
        match re.captures(text) {
            Some(caps) => Ok((1..caps.len())
                .map(|i| caps.get(i).map_or_else(String::new, |m| s!(m.as_str())))
                .collect()),
            None => Err(MineError::NoMatch),
        }
    }
}

/// Diff two token sequences into one, inserting a wildcard hole wherever
/// they disagree.
///
/// Around the longest common run, leftover on both sides recurses; leftover
/// on only one side becomes a single hole, since there is nothing left to
/// align it against. No run at all collapses the whole region to one hole.
fn diff(a: &[Tok], b: &[Tok]) -> Vec<Tok> {
    if a.is_empty() && b.is_empty() {
        return Vec::new();
    }
    let run = longest_common_run(a, b);
    if run.len == 0 {
        return vec![Tok::Hole(Hole::Wildcard)];
    }

    let mut out = Vec::new();
    if run.off_a > 0 && run.off_b > 0 {
        out.extend(diff(&a[..run.off_a], &b[..run.off_b]));
    } else if run.off_a > 0 || run.off_b > 0 {
        out.push(Tok::Hole(Hole::Wildcard));
    }
    out.extend_from_slice(&a[run.off_a..run.off_a + run.len]);

    let (end_a, end_b) = (run.off_a + run.len, run.off_b + run.len);
    if end_a < a.len() && end_b < b.len() {
        out.extend(diff(&a[end_a..], &b[end_b..]));
    } else if end_a < a.len() || end_b < b.len() {
        out.push(Tok::Hole(Hole::Wildcard));
    }
    out
}
