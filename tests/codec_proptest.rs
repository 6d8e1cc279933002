//! Property-based tests for the flat-file codec
//!
//! - Well-formed collections survive encode then decode unchanged
//! - Decoding arbitrary marker/text sequences numbers chapters and verses
//!   consistently and never panics

use proptest::prelude::*;
use versefind::codec::{decode, decode_with, encode, DecodeOptions, Passage};

/// Verse text that cannot be mistaken for a header or chapter marker
fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z][A-Za-z ,.:]{0,40}",
        "[a-zäö][a-zäö ]{0,20}",
        "[0-9]{1,3} [a-z]{1,10}",
    ]
}

/// One book: verse counts per chapter, chapters numbered from 1
fn book_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec(text_strategy(), 1..6), 1..5)
}

/// A collection of distinct books laid out the way the decoder numbers them
fn collection_strategy() -> impl Strategy<Value = Vec<Passage>> {
    prop::collection::vec(book_strategy(), 0..4).prop_map(|books| {
        let mut passages = Vec::new();
        for (b, chapters) in books.iter().enumerate() {
            for (c, verses) in chapters.iter().enumerate() {
                for (v, text) in verses.iter().enumerate() {
                    passages.push(Passage::new(
                        format!("B{}", b),
                        format!("Bk{}", b),
                        format!("Book {}", b),
                        (c + 1).to_string(),
                        (v + 1).to_string(),
                        text.clone(),
                    ));
                }
            }
        }
        passages
    })
}

/// Raw flat-file lines: headers, chapter markers and text
fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(";".to_string()),
        1 => Just("+".to_string()),
        4 => text_strategy(),
    ]
}

proptest! {
    #[test]
    fn test_encode_decode_roundtrip(passages in collection_strategy()) {
        let encoded = encode(&passages).unwrap();
        prop_assert_eq!(decode(&encoded), passages);
    }

    #[test]
    fn test_marker_like_text_is_rejected(
        passages in collection_strategy(),
        index in any::<prop::sample::Index>(),
        text in "[;+][a-z ]{0,10}",
    ) {
        prop_assume!(!passages.is_empty());
        let mut passages = passages;
        let i = index.index(passages.len());
        passages[i].text = text;
        prop_assert!(encode(&passages).is_err());
    }

    #[test]
    fn test_encoded_collection_is_strictly_valid(passages in collection_strategy()) {
        let encoded = encode(&passages).unwrap();
        let strict = decode_with(&encoded, DecodeOptions { strict: true });
        prop_assert!(strict.is_ok());
    }

    #[test]
    fn test_decode_numbering(lines in prop::collection::vec(line_strategy(), 0..40)) {
        // Give every header its own id so header blocks can be told apart
        let lines: Vec<String> = lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| if line == ";" { format!(";H{};Book {};B{}", i, i, i) } else { line })
            .collect();
        let input = lines.join("\n");
        let passages = decode(&input);

        let text_lines = lines.iter().filter(|l| !l.starts_with(';') && !l.starts_with('+')).count();
        prop_assert_eq!(passages.len(), text_lines);

        // Within one header block chapters never decrease, and verses count
        // up from 1 inside each chapter
        for pair in passages.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.id != next.id {
                continue;
            }
            let prev_chapter: u32 = prev.chapter.parse().unwrap();
            let next_chapter: u32 = next.chapter.parse().unwrap();
            prop_assert!(next_chapter >= prev_chapter);

            let next_verse: u32 = next.verse.parse().unwrap();
            if next_chapter == prev_chapter {
                let prev_verse: u32 = prev.verse.parse().unwrap();
                prop_assert!(next_verse == prev_verse + 1 || next_verse == 1);
            } else {
                prop_assert_eq!(next_verse, 1);
            }
        }
    }

    #[test]
    fn test_decode_never_panics(input in ".{0,200}") {
        let _ = decode(&input);
        let _ = decode_with(&input, DecodeOptions { strict: true });
    }
}
