//! Where raw flat-file text comes from when a translation is not stored yet

use crate::codec::Translation;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Supplier of raw flat-file text for a translation
pub trait PassageSource {
    fn fetch(&self, translation: &Translation) -> Result<String>;
}

/// Reads `<dir>/<translation>.txt`
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PassageSource for DirectorySource {
    fn fetch(&self, translation: &Translation) -> Result<String> {
        let path = self.dir.join(translation.source_file_name());
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read translation file {}", path.display()))
    }
}

/// Source backed by a string, for tests and piped input
#[derive(Debug, Clone)]
pub struct StaticSource(pub String);

impl PassageSource for StaticSource {
    fn fetch(&self, _translation: &Translation) -> Result<String> {
        Ok(self.0.clone())
    }
}

impl<S: PassageSource + ?Sized> PassageSource for Box<S> {
    fn fetch(&self, translation: &Translation) -> Result<String> {
        (**self).fetch(translation)
    }
}
