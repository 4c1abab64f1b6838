// src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MineError {
    /// The text does not match the learned template. Deliberately distinct
    /// from a successful match that captured zero holes.
    #[error("text does not match the template")]
    NoMatch,
    /// Extraction was attempted before any sample was learned.
    #[error("template has not learned anything yet")]
    Unlearned,
    /// A serialized brain blob that cannot be restored.
    #[error("corrupt brain blob: {0}")]
    Corrupt(String),
    #[error("brain serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    /// A synthesized match regex the regex crate refused to compile. Only
    /// reachable through a Pattern hole carrying a bad fragment.
    #[error("bad match regex: {0}")]
    BadRegex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, MineError>;
