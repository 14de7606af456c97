//! zcalc: a keystroke-driven calculator engine.
//!
//! The engine consumes already-decoded input tokens (digits, operators,
//! functions, memory and reset commands) and reduces them into a running
//! display value, a pending binary operation, a memory register and a
//! bounded history of completed calculations.

pub mod calculator;
pub mod config;

pub use calculator::{Calculator, CalcState, Input, Snapshot};
pub use config::Config;
