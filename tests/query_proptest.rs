//! Property-based tests for query parsing and filtering

use proptest::prelude::*;
use versefind::codec::Passage;
use versefind::query::{
    filter_passages, filter_passages_with, matches, parse_query_string, FilterOptions, UnionMode,
};

fn collection() -> Vec<Passage> {
    let books = [
        ("GEN", "1 Moos", "1. Mooseksen kirja"),
        ("PSA", "Ps", "Psalmit"),
        ("JHN", "Joh", "Evankeliumi Johanneksen mukaan"),
    ];
    let words = ["valo", "sana", "armo", "elämä", "totuus"];

    let mut passages = Vec::new();
    for (b, (id, alias, book)) in books.iter().enumerate() {
        for chapter in 1..=3 {
            for verse in 1..=8 {
                let word = words[(b + chapter + verse) % words.len()];
                passages.push(Passage::new(
                    *id,
                    *alias,
                    *book,
                    chapter.to_string(),
                    verse.to_string(),
                    format!("Jae {} {} {}", chapter, verse, word),
                ));
            }
        }
    }
    passages
}

/// Queries built from the grammar's pieces
fn clause_strategy() -> impl Strategy<Value = String> {
    let book = prop_oneof![Just(""), Just("joh"), Just("ps"), Just("1 moos"), Just("gen"), Just("ev")];
    let chapter = prop::option::of(1u32..5);
    let verses = prop::collection::vec((1u32..10, prop::option::of(1u32..10)), 0..3);
    let text = prop::option::of(prop_oneof![Just("valo"), Just("sana"), Just("jae 2")]);

    (book, chapter, verses, text).prop_map(|(book, chapter, verses, text)| {
        let mut clause = book.to_string();
        if let Some(chapter) = chapter {
            clause.push_str(&format!(" {}", chapter));
            if !verses.is_empty() {
                let list: Vec<String> = verses
                    .iter()
                    .map(|(from, to)| match to {
                        Some(to) => format!("{}-{}", from, to),
                        None => from.to_string(),
                    })
                    .collect();
                clause.push_str(&format!(":{}", list.join(",")));
            }
        }
        if let Some(text) = text {
            clause.push_str(&format!(" \"{}\"", text));
        }
        clause
    })
}

fn query_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(clause_strategy(), 0..4).prop_map(|clauses| clauses.join("; "))
}

proptest! {
    #[test]
    fn test_parser_is_total(input in "\\PC{0,80}") {
        let clauses = parse_query_string(&input);
        prop_assert!(clauses.len() <= input.matches(';').count() + 1);
        for clause in &clauses {
            if let Some(verses) = &clause.verses {
                prop_assert!(!verses.is_empty());
            }
        }
    }

    #[test]
    fn test_parser_is_case_insensitive(query in query_strategy()) {
        prop_assert_eq!(
            parse_query_string(&query.to_uppercase()),
            parse_query_string(&query)
        );
    }

    #[test]
    fn test_results_satisfy_some_clause(query in query_strategy()) {
        let passages = collection();
        let clauses = parse_query_string(&query);
        for passage in filter_passages(&passages, &query) {
            prop_assert!(clauses.iter().any(|c| matches(passage, c)));
        }
    }

    #[test]
    fn test_concatenation_counts(query in query_strategy()) {
        let passages = collection();
        let clauses = parse_query_string(&query);
        let expected: usize = clauses
            .iter()
            .map(|c| passages.iter().filter(|p| matches(p, c)).count())
            .sum();
        prop_assert_eq!(filter_passages(&passages, &query).len(), expected);
    }

    #[test]
    fn test_distinct_has_no_duplicates(query in query_strategy()) {
        let passages = collection();
        let options = FilterOptions { union: UnionMode::Distinct };
        let distinct = filter_passages_with(&passages, &query, options);
        let all = filter_passages(&passages, &query);

        prop_assert!(distinct.len() <= all.len());
        for (i, a) in distinct.iter().enumerate() {
            for b in &distinct[i + 1..] {
                prop_assert!(!std::ptr::eq(*a, *b));
            }
        }
    }

    #[test]
    fn test_exact_reference_finds_passage(index in 0usize..72) {
        let passages = collection();
        let target = &passages[index];
        let query = format!("{} {}:{}", target.alias, target.chapter, target.verse);

        let results = filter_passages(&passages, &query);
        prop_assert_eq!(results.len(), 1);
        prop_assert!(std::ptr::eq(results[0], target));
    }
}
