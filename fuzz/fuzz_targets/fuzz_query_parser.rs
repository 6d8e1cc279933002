#![no_main]

use libfuzzer_sys::fuzz_target;
use versefind::query::{parse_query_string, parse_query_string_strict};

fuzz_target!(|data: &str| {
    // Parsing is total: any input yields clauses, never a panic
    let clauses = parse_query_string(data);
    for clause in &clauses {
        if let Some(verses) = &clause.verses {
            assert!(!verses.is_empty());
        }
    }
    let _ = parse_query_string_strict(data);
});
