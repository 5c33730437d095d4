use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct CandidateId(String);

crate::impl_string_newtype!(CandidateId);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct DisplayText(String);

crate::impl_string_newtype!(DisplayText);

/// A selectable word supplied by the ranking service.
///
/// The engine never reorders candidates; position in the sequence decides
/// which ring and slot a candidate lands in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub text: DisplayText,
    #[serde(default)]
    pub weight: f64,
}

impl Candidate {
    pub fn new(id: impl Into<String>, text: impl Into<String>, weight: f64) -> Self {
        Self {
            id: CandidateId::new(id),
            text: DisplayText::new(text),
            weight,
        }
    }

    /// A candidate whose identifier is its own text.
    pub fn word(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(text.clone(), text, 0.0)
    }
}
