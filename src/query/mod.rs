pub mod cursor;
pub mod executor;
pub mod parser;
pub mod predicate;
pub mod validate;

pub use cursor::Cursor;
pub use executor::{filter_clauses, filter_passages, filter_passages_with, FilterOptions, UnionMode};
pub use parser::{parse_clause, parse_query_string, PassageQuery, VerseQuery};
pub use predicate::matches;
pub use validate::{parse_query_string_strict, validate_clause, QueryError, QueryIssue};
