//! Flat-file passage codec.
//!
//! The format is line oriented. A header line `;<id>;<book>;<alias>` opens a
//! book, a bare `+` advances to the next chapter, and every other line is the
//! text of the next verse:
//!
//! ```text
//! ;GEN;1. Mooseksen kirja;1 Moos
//! Alussa loi Jumala taivaan ja maan.
//! Ja maa oli autio ja tyhjä.
//! +
//! Niin valmistettiin taivas ja maa.
//! ```
//!
//! Chapter and verse numbers are never stored; they are reconstructed from
//! the position of each text line.

pub mod reader;
pub mod types;
pub mod writer;

pub use reader::{decode, decode_with, CodecError, DecodeOptions, Decoder, LineKind};
pub use types::*;
pub use writer::{encode, PassageWriter};
