//! Ports (trait boundaries) for external dependencies.
//!
//! The domain owns these traits; adapters and pipeline observers implement them.

pub mod observer;
pub mod repository;

pub use observer::{Observer, RoundObservation};
pub use repository::QTableRepository;
