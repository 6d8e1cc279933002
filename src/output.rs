//! Result formatting: chapter header labels and verse rows

use crate::codec::Passage;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Language profile for chapter header labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderLocale {
    En,
    #[default]
    Fi,
}

impl std::str::FromStr for HeaderLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" => Ok(HeaderLocale::En),
            "fi" => Ok(HeaderLocale::Fi),
            other => Err(format!("unknown locale '{}' (expected en or fi)", other)),
        }
    }
}

/// Label of the header row that opens a chapter
pub fn format_header(locale: HeaderLocale, passage: &Passage) -> String {
    match locale {
        HeaderLocale::En => format!("{}, chapter {}", passage.book, passage.chapter),
        HeaderLocale::Fi => format!("{}, {}. luku", passage.book, passage.chapter),
    }
}

/// One displayed row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row<'a> {
    Header(String),
    Verse { reference: String, passage: &'a Passage },
}

/// Lay out passages as rows, inserting a header whenever book or chapter changes
pub fn layout_rows<'a, I>(passages: I, locale: HeaderLocale) -> Vec<Row<'a>>
where
    I: IntoIterator<Item = &'a Passage>,
{
    let mut rows = Vec::new();
    let mut current: Option<(&str, &str)> = None;

    for passage in passages {
        let key = (passage.book.as_str(), passage.chapter.as_str());
        if current != Some(key) {
            rows.push(Row::Header(format_header(locale, passage)));
            current = Some(key);
        }
        rows.push(Row::Verse {
            reference: passage.reference(),
            passage,
        });
    }

    rows
}

/// Print passages with chapter headers
pub fn print_passages(passages: &[&Passage], locale: HeaderLocale, choice: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);
    write_rows(&mut stdout, &layout_rows(passages.iter().copied(), locale))
}

/// Write laid out rows to any color-capable writer
pub fn write_rows<W: WriteColor>(out: &mut W, rows: &[Row<'_>]) -> io::Result<()> {
    let mut first = true;

    for row in rows {
        match row {
            Row::Header(label) => {
                if !first {
                    // Blank line between chapters
                    writeln!(out)?;
                }
                out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
                writeln!(out, "{}", label)?;
                out.reset()?;
            }
            Row::Verse { reference, passage } => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                write!(out, "{}", reference)?;
                out.reset()?;
                writeln!(out, "  {}", passage.text)?;
            }
        }
        first = false;
    }

    Ok(())
}

/// Print passages as a JSON array
pub fn print_json(passages: &[&Passage]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    serde_json::to_writer_pretty(&mut lock, passages)?;
    writeln!(lock)
}

/// Print only the match count
pub fn print_count(count: usize) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    writeln!(stdout, "{}", count)?;
    stdout.reset()
}
