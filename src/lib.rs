//! # versefind - Passage codec and reference filter
//!
//! versefind stores a translated scripture text in a compact line-oriented
//! flat file and filters it with short reference queries such as
//! `joh 3:16`, `ps 23:1-4,6` or `gen 1 "valo"`.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`codec`] - Flat-file encoding and decoding of passages
//! - [`query`] - Query parsing, passage predicates and filtering
//! - [`store`] / [`source`] / [`loader`] - Cache-or-fetch loading of a translation
//! - [`session`] / [`worker`] / [`debounce`] - Query state for one-shot and interactive use
//! - [`output`] - Result formatting with chapter headers
//! - `tui` - Interactive terminal UI (feature `interactive`)
//! - [`utils`] - Configuration, timing and progress helpers
//!
//! ## Quick Start
//!
//! ```
//! use versefind::codec::decode;
//! use versefind::query::filter_passages;
//!
//! let passages = decode(";JHN;Johannes;Joh\nAlussa oli Sana\n");
//! let results = filter_passages(&passages, "joh 1:1");
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].reference(), "1:1");
//! ```

pub mod codec;
pub mod debounce;
pub mod loader;
pub mod output;
pub mod query;
pub mod session;
pub mod source;
pub mod stats;
pub mod store;
#[cfg(feature = "interactive")]
pub mod tui;
pub mod utils;
pub mod worker;
