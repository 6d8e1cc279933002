use crate::query::cursor::Cursor;
use serde::Serialize;

/// A single verse (`to` absent) or an inclusive verse range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerseQuery {
    pub from: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<u32>,
}

impl VerseQuery {
    pub fn single(verse: u32) -> Self {
        Self { from: verse, to: None }
    }

    pub fn range(from: u32, to: u32) -> Self {
        Self { from, to: Some(to) }
    }

    /// Check whether a verse number falls inside this query
    pub fn contains(&self, verse: u32) -> bool {
        match self.to {
            Some(to) => self.from <= verse && verse <= to,
            None => verse == self.from,
        }
    }
}

/// One parsed clause. An absent field places no constraint on passages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verses: Option<Vec<VerseQuery>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl PassageQuery {
    /// Check if no field is set (the clause matches every passage)
    pub fn is_unconstrained(&self) -> bool {
        self.book.is_none() && self.chapter.is_none() && self.verses.is_none() && self.text.is_none()
    }
}

/// Parse a query string into clauses
///
/// The input is lower-cased and split on `;`; blank clauses are dropped.
/// Parsing never fails: unreadable parts of a clause leave the matching
/// field unset.
pub fn parse_query_string(input: &str) -> Vec<PassageQuery> {
    split_clauses(&input.to_lowercase())
        .map(parse_clause)
        .collect()
}

/// Split a lower-cased query into trimmed, non-empty clauses
pub(crate) fn split_clauses(input: &str) -> impl Iterator<Item = &str> {
    input.split(';').map(str::trim).filter(|c| !c.is_empty())
}

/// Parse a single clause. The clause is expected to be lower-cased and trimmed.
pub fn parse_clause(clause: &str) -> PassageQuery {
    let mut cursor = Cursor::new(clause);
    let mut query = PassageQuery::default();

    let book = read_book(&mut cursor).trim();
    cursor.skip_spaces();

    // A purely numeric leading token is a chapter, not a book prefix
    let chapter = if !book.is_empty() && book.chars().all(is_digit) {
        if cursor.peek() == Some(':') {
            cursor.advance();
        }
        book
    } else {
        if !book.is_empty() {
            query.book = Some(book.to_string());
        }
        read_chapter(&mut cursor).trim()
    };
    cursor.skip_spaces();
    if !chapter.is_empty() {
        query.chapter = Some(chapter.to_string());
    }

    let mut verses = Vec::new();
    while !cursor.at_end() {
        match read_verse(&mut cursor) {
            VerseRead::More(verse) => verses.push(verse),
            VerseRead::Last(verse) => {
                verses.push(verse);
                break;
            }
            VerseRead::NoMatch => break,
        }
    }
    if !verses.is_empty() {
        query.verses = Some(verses);
    }

    cursor.skip_spaces();
    let text = read_text(&mut cursor);
    if !text.is_empty() {
        query.text = Some(text.to_string());
    }

    query
}

/// Outcome of one verse-range read
#[derive(Debug, PartialEq, Eq)]
enum VerseRead {
    /// Token ended with `,`; another may follow
    More(VerseQuery),
    /// Token ended the verse list
    Last(VerseQuery),
    /// Nothing numeric at the cursor
    NoMatch,
}

fn read_book<'a>(cursor: &mut Cursor<'a>) -> &'a str {
    cursor.mark();
    let mut seen_non_digit = false;

    while let Some(ch) = cursor.peek() {
        if is_digit(ch) {
            // Leading digits belong to names like "1 moos"
            if seen_non_digit {
                break;
            }
        } else if is_alpha(ch) || is_space(ch) {
            seen_non_digit = true;
        } else {
            break;
        }
        cursor.advance();
    }

    cursor.slice()
}

fn read_chapter<'a>(cursor: &mut Cursor<'a>) -> &'a str {
    cursor.mark();

    while let Some(ch) = cursor.peek() {
        if ch == ':' {
            let chapter = cursor.slice();
            cursor.advance();
            return chapter;
        }
        if !is_digit(ch) {
            break;
        }
        cursor.advance();
    }

    cursor.slice()
}

fn read_verse(cursor: &mut Cursor<'_>) -> VerseRead {
    let mut from: Option<u32> = None;
    cursor.mark();

    while let Some(ch) = cursor.peek() {
        match ch {
            c if is_digit(c) || is_space(c) => cursor.advance(),
            '-' => {
                let Some(value) = parse_verse_number(cursor.slice()) else {
                    return VerseRead::NoMatch;
                };
                from = Some(value);
                cursor.advance();
                cursor.mark();
            }
            ',' => {
                let pending = parse_verse_number(cursor.slice());
                cursor.advance();
                return match finalize(from, pending) {
                    Some(verse) => VerseRead::More(verse),
                    None => VerseRead::NoMatch,
                };
            }
            _ => break,
        }
    }

    match finalize(from, parse_verse_number(cursor.slice())) {
        Some(verse) => VerseRead::Last(verse),
        None => VerseRead::NoMatch,
    }
}

/// Combine a range start (if a `-` was seen) with the pending number
fn finalize(from: Option<u32>, pending: Option<u32>) -> Option<VerseQuery> {
    match (from, pending) {
        (Some(from), to) => Some(VerseQuery { from, to }),
        (None, Some(value)) => Some(VerseQuery::single(value)),
        (None, None) => None,
    }
}

fn read_text<'a>(cursor: &mut Cursor<'a>) -> &'a str {
    cursor.mark();
    if cursor.peek() != Some('"') {
        return "";
    }

    cursor.advance();
    cursor.mark();
    while let Some(ch) = cursor.peek() {
        if ch == '"' {
            break;
        }
        cursor.advance();
    }

    cursor.slice()
}

/// Leading run of digits of the trimmed slice, like a lenient integer parse
fn parse_verse_number(slice: &str) -> Option<u32> {
    let trimmed = slice.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

/// Letters of the source alphabet: a-z plus the umlaut vowels
fn is_alpha(ch: char) -> bool {
    ch.is_ascii_lowercase() || matches!(ch, 'ä' | 'ö' | 'Ä' | 'Ö')
}

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_space(ch: char) -> bool {
    ch == ' '
}
