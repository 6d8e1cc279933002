use crate::codec::types::Passage;
use thiserror::Error;

/// Errors reported by strict decoding. Permissive decoding never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("line {line}: malformed book header {content:?}")]
    MalformedHeader { line: usize, content: String },

    #[error("line {line}: passage data before the first book header")]
    MissingHeader { line: usize },

    #[error("line {line}: empty passage text")]
    EmptyLine { line: usize },
}

/// Decoding options
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Reject lines the permissive decoder would silently accept
    pub strict: bool,
}

/// What a single line means to the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header,
    NextChapter,
    Text,
}

impl LineKind {
    pub fn classify(line: &str) -> Self {
        if line.starts_with(';') {
            LineKind::Header
        } else if line.starts_with('+') {
            LineKind::NextChapter
        } else {
            LineKind::Text
        }
    }
}

/// Line-by-line decoding state machine
#[derive(Debug, Clone)]
pub struct Decoder {
    id: String,
    book: String,
    alias: String,
    chapter: u32,
    verse: u32,
    seen_header: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            id: String::new(),
            book: String::new(),
            alias: String::new(),
            chapter: 1,
            verse: 1,
            seen_header: false,
        }
    }

    /// Feed one line (without its newline); returns a passage for text lines
    pub fn feed(&mut self, line: &str) -> Option<Passage> {
        match LineKind::classify(line) {
            LineKind::Header => {
                // Both `;id;book;alias` and the older `;id;book` occur in data files
                let mut fields = line.split(';').skip(1);
                self.id = fields.next().unwrap_or_default().to_string();
                self.book = fields.next().unwrap_or_default().to_string();
                self.alias = fields.next().unwrap_or_default().to_string();
                self.chapter = 1;
                self.verse = 1;
                self.seen_header = true;
                None
            }
            LineKind::NextChapter => {
                self.chapter += 1;
                self.verse = 1;
                None
            }
            LineKind::Text => {
                let passage = Passage {
                    id: self.id.clone(),
                    alias: self.alias.clone(),
                    book: self.book.clone(),
                    chapter: self.chapter.to_string(),
                    verse: self.verse.to_string(),
                    text: line.to_string(),
                };
                self.verse += 1;
                Some(passage)
            }
        }
    }

    /// Check a line against the strict rules before feeding it
    fn check(&self, line: &str, line_no: usize) -> Result<(), CodecError> {
        match LineKind::classify(line) {
            LineKind::Header => {
                if line.split(';').count() < 3 {
                    return Err(CodecError::MalformedHeader {
                        line: line_no,
                        content: line.to_string(),
                    });
                }
            }
            LineKind::NextChapter => {
                if !self.seen_header {
                    return Err(CodecError::MissingHeader { line: line_no });
                }
            }
            LineKind::Text => {
                if !self.seen_header {
                    return Err(CodecError::MissingHeader { line: line_no });
                }
                if line.is_empty() {
                    return Err(CodecError::EmptyLine { line: line_no });
                }
            }
        }
        Ok(())
    }
}

/// Split the input into lines, dropping the empty element left by the
/// terminal newline
fn lines(input: &str) -> impl Iterator<Item = &str> {
    let mut lines: Vec<&str> = input.split('\n').collect();
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.into_iter()
}

/// Decode the flat-file format, accepting any input
pub fn decode(input: &str) -> Vec<Passage> {
    let mut decoder = Decoder::new();
    lines(input).filter_map(|line| decoder.feed(line)).collect()
}

/// Decode with options; only strict mode can return an error
pub fn decode_with(input: &str, options: DecodeOptions) -> Result<Vec<Passage>, CodecError> {
    if !options.strict {
        return Ok(decode(input));
    }

    let mut decoder = Decoder::new();
    let mut passages = Vec::new();
    for (i, line) in lines(input).enumerate() {
        decoder.check(line, i + 1)?;
        if let Some(passage) = decoder.feed(line) {
            passages.push(passage);
        }
    }
    Ok(passages)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = ";GEN;1. Mooseksen kirja;1 Moos\n\
                          Alussa\n\
                          maa\n\
                          +\n\
                          valmis\n\
                          ;EXO;2. Mooseksen kirja;2 Moos\n\
                          nimet\n";

    #[test]
    fn test_decode_reconstructs_chapters_and_verses() {
        let passages = decode(SAMPLE);
        assert_eq!(passages.len(), 4);

        let refs: Vec<(String, String, String)> = passages
            .iter()
            .map(|p| (p.book.clone(), p.chapter.clone(), p.verse.clone()))
            .collect();
        assert_eq!(
            refs,
            vec![
                ("1. Mooseksen kirja".into(), "1".into(), "1".into()),
                ("1. Mooseksen kirja".into(), "1".into(), "2".into()),
                ("1. Mooseksen kirja".into(), "2".into(), "1".into()),
                ("2. Mooseksen kirja".into(), "1".into(), "1".into()),
            ]
        );
        assert_eq!(passages[0].id, "GEN");
        assert_eq!(passages[0].alias, "1 Moos");
        assert_eq!(passages[2].text, "valmis");
        assert_eq!(passages[3].id, "EXO");
    }

    #[test]
    fn test_decode_legacy_header_without_alias() {
        let passages = decode(";GEN;Genesis\nIn the beginning\n");
        assert_eq!(passages.len(), 1);
        assert_eq!(passages[0].book, "Genesis");
        assert_eq!(passages[0].alias, "");
    }

    #[test]
    fn test_decode_keeps_last_line_without_newline() {
        let passages = decode(";G;g;g\na\nb");
        assert_eq!(passages.len(), 2);
        assert_eq!(passages[1].text, "b");
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(decode("").is_empty());
        assert!(decode("\n").is_empty());
    }

    #[test]
    fn test_decode_permissive_accepts_garbage() {
        // Text before any header and blank lines are passages too
        let passages = decode("orphan\n\n;G;g;g\n");
        assert_eq!(passages.len(), 2);
        assert_eq!(passages[0].book, "");
        assert_eq!(passages[0].verse, "1");
        assert_eq!(passages[1].text, "");
        assert_eq!(passages[1].verse, "2");
    }

    #[test]
    fn test_decode_multiple_chapter_markers() {
        let passages = decode(";G;g;g\n+\n+\nx\n");
        assert_eq!(passages[0].chapter, "3");
        assert_eq!(passages[0].verse, "1");
    }

    #[test]
    fn test_decode_with_permissive_matches_decode() {
        let passages = decode_with(SAMPLE, DecodeOptions::default()).unwrap();
        assert_eq!(passages, decode(SAMPLE));
    }

    #[test]
    fn test_strict_accepts_well_formed_input() {
        let passages = decode_with(SAMPLE, DecodeOptions { strict: true }).unwrap();
        assert_eq!(passages.len(), 4);
    }

    #[test]
    fn test_strict_rejects_text_before_header() {
        let err = decode_with("orphan\n;G;g;g\n", DecodeOptions { strict: true }).unwrap_err();
        assert_eq!(err, CodecError::MissingHeader { line: 1 });
    }

    #[test]
    fn test_strict_rejects_chapter_marker_before_header() {
        let err = decode_with("+\n;G;g;g\na\n", DecodeOptions { strict: true }).unwrap_err();
        assert_eq!(err, CodecError::MissingHeader { line: 1 });

        // Permissive decoding just advances the chapter, which the header then resets
        let passages = decode("+\n;G;g;g\na\n");
        assert_eq!(passages.len(), 1);
        assert_eq!(passages[0].chapter, "1");
    }

    #[test]
    fn test_strict_rejects_empty_line() {
        let err = decode_with(";G;g;g\na\n\nb\n", DecodeOptions { strict: true }).unwrap_err();
        assert_eq!(err, CodecError::EmptyLine { line: 3 });
    }

    #[test]
    fn test_strict_rejects_short_header() {
        let err = decode_with(";G\na\n", DecodeOptions { strict: true }).unwrap_err();
        assert!(matches!(err, CodecError::MalformedHeader { line: 1, .. }));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_line_kind() {
        assert_eq!(LineKind::classify(";a;b;c"), LineKind::Header);
        assert_eq!(LineKind::classify("+"), LineKind::NextChapter);
        assert_eq!(LineKind::classify("+ plus"), LineKind::NextChapter);
        assert_eq!(LineKind::classify("text"), LineKind::Text);
        assert_eq!(LineKind::classify(""), LineKind::Text);
    }

    #[test]
    fn test_decoder_feed() {
        let mut decoder = Decoder::new();
        assert!(decoder.feed(";G;g;a").is_none());
        let p = decoder.feed("hello").unwrap();
        assert_eq!((p.chapter.as_str(), p.verse.as_str()), ("1", "1"));
        assert!(decoder.feed("+").is_none());
        let p = decoder.feed("world").unwrap();
        assert_eq!((p.chapter.as_str(), p.verse.as_str()), ("2", "1"));
    }
}
