//! Adapters implementing domain ports.
//!
//! Infrastructure implementations of the traits defined in the ports module.

pub mod json_repository;
pub mod msgpack_repository;

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use json_repository::JsonRepository;
pub use msgpack_repository::MsgPackRepository;

use crate::ports::QTableRepository;

/// On-disk format for saved Q-tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageFormat {
    #[default]
    Msgpack,
    Json,
}

impl StorageFormat {
    /// Guess the format from a file extension, defaulting to MessagePack.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => StorageFormat::Json,
            _ => StorageFormat::Msgpack,
        }
    }

    /// Repository adapter for this format.
    pub fn repository(self) -> Box<dyn QTableRepository> {
        match self {
            StorageFormat::Msgpack => Box::new(MsgPackRepository::new()),
            StorageFormat::Json => Box::new(JsonRepository::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            StorageFormat::from_path(Path::new("run/qtable.JSON")),
            StorageFormat::Json
        );
        assert_eq!(
            StorageFormat::from_path(Path::new("qtable.msgpack")),
            StorageFormat::Msgpack
        );
        assert_eq!(
            StorageFormat::from_path(Path::new("qtable")),
            StorageFormat::Msgpack
        );
    }
}
