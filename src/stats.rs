use crate::codec::{Passage, Translation};
use crate::store::{FileStore, PassageStore};
use anyhow::{bail, Result};
use std::collections::HashSet;
use std::path::Path;

/// Summary counts of a passage collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionStats {
    pub books: usize,
    pub chapters: usize,
    pub verses: usize,
    /// Verse count per book, in collection order
    pub per_book: Vec<(String, usize)>,
}

impl CollectionStats {
    pub fn from_passages(passages: &[Passage]) -> Self {
        let mut chapters = HashSet::new();
        let mut per_book: Vec<(String, usize)> = Vec::new();

        for passage in passages {
            chapters.insert((passage.id.as_str(), passage.chapter.as_str()));
            match per_book.last_mut() {
                Some((book, count)) if *book == passage.book => *count += 1,
                _ => per_book.push((passage.book.clone(), 1)),
            }
        }

        let books = passages
            .iter()
            .map(|p| p.id.as_str())
            .collect::<HashSet<_>>()
            .len();

        Self {
            books,
            chapters: chapters.len(),
            verses: passages.len(),
            per_book,
        }
    }
}

/// Display statistics of a stored translation
pub fn show_stats(store_dir: &Path, translation: &Translation) -> Result<()> {
    let store = FileStore::in_dir(store_dir, translation);
    let Some(passages) = store.get_all()? else {
        bail!(
            "Translation {} is not stored yet. Run a query with it first.",
            translation
        );
    };
    let stats = CollectionStats::from_passages(&passages);

    println!("Translation Statistics");
    println!("======================");
    println!();
    println!("Translation:      {}", translation);
    println!("Store location:   {}", store.path().display());
    println!("Books:            {}", stats.books);
    println!("Chapters:         {}", stats.chapters);
    println!("Verses:           {}", stats.verses);

    println!();
    println!("Verses by book:");
    for (book, count) in stats.per_book.iter().take(15) {
        println!("  {:30} {}", book, count);
    }
    if stats.per_book.len() > 15 {
        println!("  ... and {} more", stats.per_book.len() - 15);
    }

    if let Ok(meta) = std::fs::metadata(store.path()) {
        println!();
        println!("Store size:       {}", format_size(meta.len()));
    }

    Ok(())
}

/// List all stored translations
pub fn list_stores(store_dir: &Path) -> Result<()> {
    let stored = FileStore::list(store_dir)?;

    if stored.is_empty() {
        println!("No stored translations found.");
        return Ok(());
    }

    println!("Stored Translations");
    println!("===================");
    println!();

    for entry in stored {
        println!("  {}  ({})", entry.translation, format_size(entry.size));
        println!("    Store: {}", entry.path.display());
        println!();
    }

    Ok(())
}

/// Format byte size to human readable
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
