// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`process`] holds the blocking runners that spawn a `std::process::Command`
//!   and collect or forward its output.
//! - [`executor`] provides the `Executor` trait and `CommandExecutor`, which
//!   wraps those runners with progress and error logging into two sinks.

pub mod executor;
pub mod process;

pub use executor::{CommandExecutor, Executor, MSG_FAILED, MSG_PROCESSED, MSG_PROCESSING};
