//! MessagePack implementation of the Q-table repository.
//!
//! This adapter implements the QTableRepository port using rmp_serde for
//! compact binary serialization.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{Result, error::Error, ports::QTableRepository, q_learning::SavedQTable};

/// MessagePack-based Q-table repository.
///
/// # Examples
///
/// ```no_run
/// use dilemma::adapters::MsgPackRepository;
/// use dilemma::ports::QTableRepository;
/// use dilemma::q_learning::{QTable, SavedQTable, TrainingMetadata};
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// let saved = SavedQTable::new(QTable::new(), TrainingMetadata::default());
///
/// repo.save(&saved, Path::new("qtable.msgpack"))?;
/// let loaded = repo.load(Path::new("qtable.msgpack"))?;
/// # Ok::<(), dilemma::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl QTableRepository for MsgPackRepository {
    fn save(&self, saved: &SavedQTable, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write_named(&mut writer, saved).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize Q-table to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush file {path:?}"),
            source,
        })?;

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedQTable> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let saved: SavedQTable = rmp_serde::decode::from_read(BufReader::new(file)).map_err(
            |e| Error::SerializationContext {
                operation: "deserialize Q-table from MessagePack".to_string(),
                message: e.to_string(),
            },
        )?;
        saved.check_version()?;

        Ok(saved)
    }
}
