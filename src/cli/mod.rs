//! CLI infrastructure for the dilemma toolkit
//!
//! Command-line interface for training a Q-learning agent against a fixed
//! opponent and evaluating the saved table.

pub mod commands;
pub mod output;

use std::path::Path;

use anyhow::{Context, Result};

use crate::{
    adapters::StorageFormat,
    q_learning::SavedQTable,
};

/// Initialise the `log` backend. `RUST_LOG` overrides the default `info` level.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .try_init();
}

/// Storage format from an explicit flag, falling back to the file extension.
pub(crate) fn resolve_format(path: &Path, format: Option<StorageFormat>) -> StorageFormat {
    format.unwrap_or_else(|| StorageFormat::from_path(path))
}

pub(crate) fn load_saved_table(path: &Path, format: Option<StorageFormat>) -> Result<SavedQTable> {
    let repository = resolve_format(path, format).repository();
    let saved = repository
        .load(path)
        .with_context(|| format!("Failed to load Q-table from {}", path.display()))?;
    log::info!("loaded Q-table with {} states from {}", saved.table.len(), path.display());
    Ok(saved)
}

pub(crate) fn save_table(
    saved: &SavedQTable,
    path: &Path,
    format: Option<StorageFormat>,
) -> Result<()> {
    let repository = resolve_format(path, format).repository();
    repository
        .save(saved, path)
        .with_context(|| format!("Failed to save Q-table to {}", path.display()))?;
    log::info!("saved Q-table with {} states to {}", saved.table.len(), path.display());
    Ok(())
}
