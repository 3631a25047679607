//! JSON implementation of the Q-table repository.
//!
//! Human-readable alternative to the MessagePack adapter. The table is written
//! as a plain `"state" -> {"C": value, "D": value}` object.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{Result, error::Error, ports::QTableRepository, q_learning::SavedQTable};

/// Pretty-printed JSON Q-table repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRepository;

impl JsonRepository {
    pub fn new() -> Self {
        Self
    }
}

impl QTableRepository for JsonRepository {
    fn save(&self, saved: &SavedQTable, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, saved)?;
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

        let saved: SavedQTable =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                Error::SerializationContext {
                    operation: "deserialize Q-table from JSON".to_string(),
                    message: e.to_string(),
                }
            })?;
        saved.check_version()?;

        Ok(saved)
    }
}
