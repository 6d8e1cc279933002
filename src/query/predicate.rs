use crate::codec::Passage;
use crate::query::parser::PassageQuery;

/// Check whether a passage satisfies every field present in the query
pub fn matches(passage: &Passage, query: &PassageQuery) -> bool {
    if let Some(book) = &query.book {
        let by_name = passage.book.to_lowercase().starts_with(book.as_str());
        if !by_name && !passage.alias.to_lowercase().starts_with(book.as_str()) {
            return false;
        }
    }

    if let Some(chapter) = &query.chapter {
        if passage.chapter != *chapter {
            return false;
        }
    }

    if let Some(verses) = &query.verses {
        // A verse that is not a number matches no verse query
        let Ok(verse) = passage.verse.parse::<u32>() else {
            return false;
        };
        if !verses.iter().any(|v| v.contains(verse)) {
            return false;
        }
    }

    if let Some(text) = &query.text {
        if !passage.text.to_lowercase().contains(text.as_str()) {
            return false;
        }
    }

    true
}
