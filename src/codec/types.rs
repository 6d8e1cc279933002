use serde::{Deserialize, Serialize};
use std::fmt;

/// Translation identifier used when none is configured
pub const DEFAULT_TRANSLATION: &str = "fin-33-38";

/// One verse record
///
/// `chapter` and `verse` are kept as decimal strings because that is how they
/// are compared and displayed; the predicate engine parses `verse` on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    pub id: String,
    /// Short book name (e.g. "1 Moos"), matched alongside `book`
    #[serde(default)]
    pub alias: String,
    pub book: String,
    pub chapter: String,
    pub verse: String,
    pub text: String,
}

impl Passage {
    pub fn new(
        id: impl Into<String>,
        alias: impl Into<String>,
        book: impl Into<String>,
        chapter: impl Into<String>,
        verse: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            alias: alias.into(),
            book: book.into(),
            chapter: chapter.into(),
            verse: verse.into(),
            text: text.into(),
        }
    }

    /// `chapter:verse` reference as shown next to the text
    pub fn reference(&self) -> String {
        format!("{}:{}", self.chapter, self.verse)
    }
}

/// Key of a stored passage collection and stem of its flat file
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translation(String);

impl Translation {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the flat-file source for this translation
    pub fn source_file_name(&self) -> String {
        format!("{}.txt", self.0)
    }
}

impl Default for Translation {
    fn default() -> Self {
        Self(DEFAULT_TRANSLATION.to_string())
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Translation {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
