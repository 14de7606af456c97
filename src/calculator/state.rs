//! Calculator state and its read-only snapshot.

use super::format::format_number;
use super::history::{DEFAULT_HISTORY_LIMIT, History, HistoryEntry};
use super::input::BinaryOp;
use super::operations::{AngleUnit, MAX_FACTORIAL};
use serde::{Serialize, Serializer};

/// Default text shown while in the error mode.
pub const DEFAULT_ERROR_TEXT: &str = "Error";

/// Fixed parameters of an engine, read by the reducer but never changed by it.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineSettings {
    /// Maximum number of history entries kept.
    pub history_limit: usize,
    /// Sentinel shown on the display in the error mode.
    pub error_text: String,
    /// Largest accepted factorial input, capped at [`MAX_FACTORIAL`].
    pub factorial_limit: u32,
    /// Unit for trigonometric input.
    pub angle_unit: AngleUnit,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            error_text: DEFAULT_ERROR_TEXT.to_string(),
            factorial_limit: MAX_FACTORIAL,
            angle_unit: AngleUnit::Radians,
        }
    }
}

/// A captured first operand and the operator waiting for its second operand.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PendingOperation {
    #[serde(serialize_with = "serialize_number")]
    pub operand: f64,
    pub operator: BinaryOp,
}

/// Everything the engine owns.
///
/// Fields are only changed through the reducer; outside the calculator
/// module the state is read through accessors or a [`Snapshot`].
#[derive(Clone, Debug, PartialEq)]
pub struct CalcState {
    pub(super) display: String,
    pub(super) pending: Option<PendingOperation>,
    pub(super) awaiting_new_entry: bool,
    pub(super) error: bool,
    pub(super) memory: f64,
    pub(super) history: History,
    pub(super) settings: EngineSettings,
}

impl Default for CalcState {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

impl CalcState {
    /// Fresh state; a blank `error_text` falls back to [`DEFAULT_ERROR_TEXT`].
    pub fn new(mut settings: EngineSettings) -> Self {
        if settings.error_text.trim().is_empty() {
            settings.error_text = DEFAULT_ERROR_TEXT.to_string();
        }
        Self {
            display: "0".to_string(),
            pending: None,
            awaiting_new_entry: false,
            error: false,
            memory: 0.0,
            history: History::with_capacity(settings.history_limit),
            settings,
        }
    }

    /// Text currently on the display.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The operation waiting for its second operand, if any.
    pub fn pending(&self) -> Option<PendingOperation> {
        self.pending
    }

    /// Whether the next digit replaces the display instead of extending it.
    pub fn is_awaiting_new_entry(&self) -> bool {
        self.awaiting_new_entry
    }

    /// Whether the display shows the error sentinel.
    pub fn is_error(&self) -> bool {
        self.error
    }

    /// Value of the memory register.
    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// Completed calculations, newest first.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Owned copy of everything a renderer needs.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display: self.display.clone(),
            pending: self.pending,
            memory: self.memory,
            error: self.error,
            awaiting_new_entry: self.awaiting_new_entry,
            history: self.history.iter().cloned().collect(),
        }
    }
}

/// Owned copy of the state for renderers, taken after an operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub display: String,
    pub pending: Option<PendingOperation>,
    #[serde(serialize_with = "serialize_number")]
    pub memory: f64,
    pub error: bool,
    pub awaiting_new_entry: bool,
    /// Newest first.
    pub history: Vec<HistoryEntry>,
}

/// Finite numbers stay JSON numbers; NaN and infinities, which JSON cannot
/// hold, are written as their display text.
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_str(&format_number(*value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = CalcState::default();
        assert_eq!(state.display(), "0");
        assert!(state.pending().is_none());
        assert!(!state.is_error());
        assert!(!state.is_awaiting_new_entry());
        assert_eq!(state.memory(), 0.0);
        assert!(state.history().is_empty());
        assert_eq!(state.history().capacity(), 10);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = CalcState::default();
        state.pending = Some(PendingOperation {
            operand: 3.0,
            operator: BinaryOp::Add,
        });
        state.history.push(HistoryEntry::new("1 + 2", "3"));

        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["display"], "0");
        assert_eq!(json["pending"]["operator"], "+");
        assert_eq!(json["pending"]["operand"], 3.0);
        assert_eq!(json["history"][0]["expression"], "1 + 2");
        assert_eq!(json["error"], false);
    }

    #[test]
    fn test_snapshot_keeps_non_finite_values() {
        let mut state = CalcState::default();
        state.memory = f64::NAN;
        state.pending = Some(PendingOperation {
            operand: f64::NEG_INFINITY,
            operator: BinaryOp::Multiply,
        });

        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["memory"], "NaN");
        assert_eq!(json["pending"]["operand"], "-Infinity");
    }

    #[test]
    fn test_blank_error_text_falls_back() {
        let state = CalcState::new(EngineSettings {
            error_text: " ".to_string(),
            ..EngineSettings::default()
        });
        assert_eq!(state.settings.error_text, DEFAULT_ERROR_TEXT);
    }
}
