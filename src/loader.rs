use crate::codec::{decode, Passage, Translation};
use crate::source::PassageSource;
use crate::store::PassageStore;
use crate::utils::timed;
use anyhow::{Context, Result};

/// Where a loaded collection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Read back from the store
    Store,
    /// Fetched from the source, decoded and stored
    Source,
}

/// Load a translation, preferring the store and filling it on first use
pub fn load_passages<S, R>(
    store: &mut S,
    source: &R,
    translation: &Translation,
) -> Result<(Vec<Passage>, LoadOrigin)>
where
    S: PassageStore + ?Sized,
    R: PassageSource + ?Sized,
{
    if let Some(passages) = timed("load", || store.get_all())? {
        tracing::info!(%translation, count = passages.len(), "loaded passages from store");
        return Ok((passages, LoadOrigin::Store));
    }

    let raw = timed("fetch", || source.fetch(translation))
        .with_context(|| format!("Failed to fetch translation {}", translation))?;
    let passages = timed("decode", || decode(&raw));
    if passages.is_empty() {
        tracing::warn!(%translation, "source decoded to zero passages");
    }

    timed("put", || store.put(&passages))
        .with_context(|| format!("Failed to store translation {}", translation))?;
    tracing::info!(%translation, count = passages.len(), "fetched and stored passages");

    Ok((passages, LoadOrigin::Source))
}
