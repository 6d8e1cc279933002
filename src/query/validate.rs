//! Optional strict checks layered on top of the permissive parser.
//!
//! The parser itself never rejects input because it runs on every
//! keystroke. Callers that want hard errors (the CLI `--strict` flag) parse
//! first and then validate each clause here.

use crate::query::parser::{parse_clause, split_clauses, PassageQuery};
use std::fmt;
use thiserror::Error;

/// Something in a parsed clause the permissive matcher would accept silently
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryIssue {
    /// A verse range whose end lies before its start; it can never match
    ReversedRange { from: u32, to: u32 },
    /// Nothing recognisable in the clause; it matches every passage
    Unconstrained,
}

impl fmt::Display for QueryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryIssue::ReversedRange { from, to } => {
                write!(f, "verse range {}-{} is reversed", from, to)
            }
            QueryIssue::Unconstrained => f.write_str("clause has no book, chapter, verse or quoted text"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("clause {index} ({clause:?}): {issue}")]
pub struct QueryError {
    /// 1-based clause position in the query string
    pub index: usize,
    pub clause: String,
    pub issue: QueryIssue,
}

/// List every issue found in a clause
pub fn validate_clause(query: &PassageQuery) -> Vec<QueryIssue> {
    let mut issues = Vec::new();

    if query.is_unconstrained() {
        issues.push(QueryIssue::Unconstrained);
    }

    for verse in query.verses.iter().flatten() {
        if let Some(to) = verse.to {
            if verse.from > to {
                issues.push(QueryIssue::ReversedRange { from: verse.from, to });
            }
        }
    }

    issues
}

/// Parse like [`parse_query_string`](crate::query::parse_query_string) but
/// fail on the first clause with an issue
pub fn parse_query_string_strict(input: &str) -> Result<Vec<PassageQuery>, QueryError> {
    let lowered = input.to_lowercase();
    let mut clauses = Vec::new();

    for (i, clause) in split_clauses(&lowered).enumerate() {
        let query = parse_clause(clause);
        if let Some(issue) = validate_clause(&query).into_iter().next() {
            return Err(QueryError {
                index: i + 1,
                clause: clause.to_string(),
                issue,
            });
        }
        clauses.push(query);
    }

    Ok(clauses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parser::parse_query_string;

    #[test]
    fn test_valid_query_has_no_issues() {
        let clauses = parse_query_string("gen 1:1-3,5");
        assert!(validate_clause(&clauses[0]).is_empty());
    }

    #[test]
    fn test_reversed_range() {
        let clauses = parse_query_string("gen 1:5-2");
        assert_eq!(
            validate_clause(&clauses[0]),
            vec![QueryIssue::ReversedRange { from: 5, to: 2 }]
        );
    }

    #[test]
    fn test_unconstrained() {
        assert_eq!(
            validate_clause(&PassageQuery::default()),
            vec![QueryIssue::Unconstrained]
        );
    }

    #[test]
    fn test_strict_matches_permissive_on_good_input() {
        let input = "Gen 1:1-3; \"valo\"";
        assert_eq!(
            parse_query_string_strict(input).unwrap(),
            parse_query_string(input)
        );
    }

    #[test]
    fn test_strict_reports_clause_position() {
        let err = parse_query_string_strict("gen 1:1; ps 23:6-1").unwrap_err();
        assert_eq!(err.index, 2);
        assert_eq!(err.clause, "ps 23:6-1");
        assert_eq!(err.issue, QueryIssue::ReversedRange { from: 6, to: 1 });
        assert!(err.to_string().contains("reversed"));
    }

    #[test]
    fn test_strict_empty_query_is_ok() {
        assert!(parse_query_string_strict("").unwrap().is_empty());
    }
}
