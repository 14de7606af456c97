//! Calculator engine.
//!
//! This module provides:
//! - Decoding of logical input tokens
//! - A pure reducer from (state, input) to the next state
//! - Number formatting for the display
//! - Copying results to the clipboard

mod clipboard;
mod engine;
mod format;
mod history;
mod input;
mod operations;
mod reducer;
mod state;

pub use clipboard::copy_to_clipboard;
pub use engine::Calculator;
pub use format::{format_number, group_digits, parse_display};
pub use history::{DEFAULT_HISTORY_LIMIT, History, HistoryEntry};
pub use input::{BinaryOp, Digit, Input, MemoryCommand, ParseInputError, UnaryFn, tokenize};
pub use operations::{AngleUnit, CalcError, MAX_FACTORIAL, combine, factorial};
pub use reducer::{reduce, replay, update};
pub use state::{CalcState, DEFAULT_ERROR_TEXT, EngineSettings, PendingOperation, Snapshot};
