//! Persistent passage collections keyed by translation.
//!
//! A store holds one whole collection per translation: it is written once
//! after the first successful fetch and read back whole on later runs.

use crate::codec::{Passage, Translation};
use crate::utils::get_store_dir;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Durable list of passages for one translation
pub trait PassageStore {
    /// Replace the stored collection
    fn put(&mut self, passages: &[Passage]) -> Result<()>;

    /// Read the whole collection; `None` if it was never stored
    fn get_all(&self) -> Result<Option<Vec<Passage>>>;
}

/// JSON file per translation under a store directory
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open the store for a translation in the application data directory
    pub fn open(translation: &Translation) -> Result<Self> {
        let dir = get_store_dir()?;
        Ok(Self::in_dir(&dir, translation))
    }

    /// Open the store for a translation in an explicit directory
    pub fn in_dir(dir: &Path, translation: &Translation) -> Self {
        Self {
            path: dir.join(format!("{}.json", translation)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the stored collection; returns whether anything was removed
    pub fn remove(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        Ok(true)
    }

    /// List translations stored in a directory, sorted by name
    pub fn list(dir: &Path) -> Result<Vec<StoredTranslation>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut stored = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                stored.push(StoredTranslation {
                    translation: Translation::new(stem),
                    size: entry.metadata()?.len(),
                    path,
                });
            }
        }

        stored.sort_by(|a, b| a.translation.cmp(&b.translation));
        Ok(stored)
    }
}

impl PassageStore for FileStore {
    fn put(&mut self, passages: &[Passage]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        write_json_atomic(&self.path, passages)?;
        tracing::debug!(path = %self.path.display(), count = passages.len(), "stored passages");
        Ok(())
    }

    fn get_all(&self) -> Result<Option<Vec<Passage>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        let passages: Vec<Passage> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(Some(passages))
    }
}

/// Serialize into `<path>.tmp` and rename it over `path`, so a crash never
/// leaves half a collection. The temp file is removed when writing fails.
fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    if let Err(e) = write_json(&tmp_path, value) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    fs::rename(&tmp_path, path).with_context(|| format!("Failed to write {}", path.display()))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value).context("Failed to serialize passages")?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Information about a stored translation
#[derive(Debug, Clone)]
pub struct StoredTranslation {
    pub translation: Translation,
    pub path: PathBuf,
    pub size: u64,
}

/// In-process store for a single collection, used by tests and one-shot runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    passages: Option<Vec<Passage>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PassageStore for MemoryStore {
    fn put(&mut self, passages: &[Passage]) -> Result<()> {
        self.passages = Some(passages.to_vec());
        Ok(())
    }

    fn get_all(&self) -> Result<Option<Vec<Passage>>> {
        Ok(self.passages.clone())
    }
}

impl<S: PassageStore + ?Sized> PassageStore for Box<S> {
    fn put(&mut self, passages: &[Passage]) -> Result<()> {
        (**self).put(passages)
    }

    fn get_all(&self) -> Result<Option<Vec<Passage>>> {
        (**self).get_all()
    }
}
