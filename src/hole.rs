// src/hole.rs
// Typed template holes. A hole marks a spot where learned samples varied.

use serde::{Deserialize, Serialize};

/// Closed set of hole variants.
///
/// Equality is structural: any Wildcard equals any other Wildcard, an
/// Alternation equals one with the same choices in the same order, and a
/// Pattern equals one with the same fragment and capture flag. The variants
/// are matched exhaustively everywhere so adding one is a compile error
/// until every site handles it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hole {
    /// Matches anything, lazily, and captures it: `(.*?)`.
    Wildcard,
    /// Matches exactly one of a fixed set of literal choices, capturing
    /// which one. Choice order is preserved in the regex.
    Alternation(Vec<String>),
    /// Matches a caller-supplied regex fragment, emitted verbatim. Whether
    /// the fragment captures is up to the caller; the flag only reports it.
    Pattern { regex: String, capture: bool },
    /// Matches anything but captures nothing: `.*?`, no parentheses.
    Ignore,
}

impl Hole {
    /// The regex fragment this hole contributes to [`crate::brain::Brain::match_regex`].
    pub fn regex_fragment(&self) -> String {
        match self {
            Hole::Wildcard => s!("(.*?)"),
            Hole::Alternation(choices) => {
                let escaped: Vec<String> =
                    choices.iter().map(|c| regex::escape(c)).collect();
                format!("({})", escaped.join("|"))
            }
            Hole::Pattern { regex, .. } => regex.clone(),
            Hole::Ignore => s!(".*?"),
        }
    }

    /// Whether this hole contributes a capture group to extract() output.
    pub fn captures(&self) -> bool {
        match self {
            Hole::Wildcard | Hole::Alternation(_) => true,
            Hole::Pattern { capture, .. } => *capture,
            Hole::Ignore => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_structural() {
        assert_eq!(Hole::Wildcard, Hole::Wildcard);
        assert_ne!(Hole::Wildcard, Hole::Ignore);
        assert_eq!(
            Hole::Alternation(vec![s!("a"), s!("b")]),
            Hole::Alternation(vec![s!("a"), s!("b")]),
        );
        // Choice order matters.
        assert_ne!(
            Hole::Alternation(vec![s!("a"), s!("b")]),
            Hole::Alternation(vec![s!("b"), s!("a")]),
        );
        assert_ne!(
            Hole::Pattern { regex: s!(r"\d+"), capture: true },
            Hole::Pattern { regex: s!(r"\d+"), capture: false },
        );
    }

    #[test]
    fn regex_fragments() {
        assert_eq!(Hole::Wildcard.regex_fragment(), "(.*?)");
        assert_eq!(Hole::Ignore.regex_fragment(), ".*?");
        assert_eq!(
            Hole::Pattern { regex: s!(r"(\d+)"), capture: true }.regex_fragment(),
            r"(\d+)",
        );
    }

    #[test]
    fn alternation_escapes_choices() {
        let hole = Hole::Alternation(vec![s!("a.m."), s!("p.m.")]);
        assert_eq!(hole.regex_fragment(), r"(a\.m\.|p\.m\.)");
    }

    #[test]
    fn capture_flags() {
        assert!(Hole::Wildcard.captures());
        assert!(Hole::Alternation(vec![s!("x")]).captures());
        assert!(!Hole::Ignore.captures());
        assert!(!Hole::Pattern { regex: s!(".*"), capture: false }.captures());
    }
}
