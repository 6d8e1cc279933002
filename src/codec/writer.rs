use crate::codec::reader::LineKind;
use crate::codec::types::Passage;
use std::io::{self, Write};

/// Streaming encoder for the flat-file format
///
/// Passages must arrive grouped by book; a book that reappears later simply
/// opens a second header block.
pub struct PassageWriter<W: Write> {
    out: W,
    book: Option<String>,
    chapter: String,
    written: usize,
}

impl<W: Write> PassageWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            book: None,
            chapter: String::new(),
            written: 0,
        }
    }

    /// Write one passage, preceded by a header or chapter marker when needed
    ///
    /// Text that would read back as a header, a chapter marker or more than
    /// one line is rejected with `InvalidData` before anything is written.
    pub fn write_passage(&mut self, passage: &Passage) -> io::Result<()> {
        check_text(passage)?;

        if self.book.as_deref() != Some(passage.book.as_str()) {
            writeln!(self.out, ";{};{};{}", passage.id, passage.book, passage.alias)?;
            self.book = Some(passage.book.clone());
            self.chapter = "1".to_string();
        }

        if passage.chapter != self.chapter {
            writeln!(self.out, "+")?;
            self.chapter.clone_from(&passage.chapter);
        }

        writeln!(self.out, "{}", passage.text)?;
        self.written += 1;
        Ok(())
    }

    pub fn write_all<'a, I>(&mut self, passages: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a Passage>,
    {
        for passage in passages {
            self.write_passage(passage)?;
        }
        Ok(())
    }

    /// Number of passages written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

fn check_text(passage: &Passage) -> io::Result<()> {
    let kind = LineKind::classify(&passage.text);
    if kind != LineKind::Text || passage.text.contains('\n') {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "{} {}:{}: verse text {:?} cannot be stored as a text line",
                passage.book, passage.chapter, passage.verse, passage.text
            ),
        ));
    }
    Ok(())
}

/// Encode a passage list into the flat-file format
pub fn encode(passages: &[Passage]) -> io::Result<String> {
    let mut writer = PassageWriter::new(Vec::new());
    writer.write_all(passages)?;
    String::from_utf8(writer.finish()?).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
