//! Subcommands of the `dilemma` binary

pub mod evaluate;
pub mod train;
