use crate::codec::Passage;
use crate::query::parser::{parse_query_string, PassageQuery};
use crate::query::predicate::matches;
use serde::{Deserialize, Serialize};

/// How matches of several clauses are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnionMode {
    /// Append each clause's matches; a passage matched by two clauses appears twice
    #[default]
    Concatenate,
    /// Keep only the first occurrence of each passage
    Distinct,
}

/// Filter options
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterOptions {
    pub union: UnionMode,
}

/// Filter passages with a raw query string
///
/// Each clause scans the whole list; results are appended clause by clause,
/// keeping passage order within a clause. An empty query yields nothing.
pub fn filter_passages<'a>(passages: &'a [Passage], query: &str) -> Vec<&'a Passage> {
    filter_passages_with(passages, query, FilterOptions::default())
}

pub fn filter_passages_with<'a>(
    passages: &'a [Passage],
    query: &str,
    options: FilterOptions,
) -> Vec<&'a Passage> {
    let clauses = parse_query_string(query);
    filter_clauses(passages, &clauses, options)
}

/// Filter passages with already parsed clauses
pub fn filter_clauses<'a>(
    passages: &'a [Passage],
    clauses: &[PassageQuery],
    options: FilterOptions,
) -> Vec<&'a Passage> {
    let mut results = Vec::new();

    match options.union {
        UnionMode::Concatenate => {
            for clause in clauses {
                results.extend(passages.iter().filter(|p| matches(p, clause)));
            }
        }
        UnionMode::Distinct => {
            let mut emitted = vec![false; passages.len()];
            for clause in clauses {
                for (i, passage) in passages.iter().enumerate() {
                    if !emitted[i] && matches(passage, clause) {
                        emitted[i] = true;
                        results.push(passage);
                    }
                }
            }
        }
    }

    results
}
