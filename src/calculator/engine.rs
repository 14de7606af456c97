//! The calculator engine.
//!
//! [`Calculator`] owns a [`CalcState`] and exposes one method per user
//! operation. Each method runs the reducer to completion before returning;
//! renderers read [`Calculator::snapshot`] afterwards.

use super::history::{History, HistoryEntry};
use super::input::{BinaryOp, Digit, Input, MemoryCommand, UnaryFn};
use super::reducer;
use super::state::{CalcState, EngineSettings, PendingOperation, Snapshot};

/// Calculator engine, driven one input at a time by a single owner.
#[derive(Clone, Debug, Default)]
pub struct Calculator {
    state: CalcState,
}

impl Calculator {
    /// Engine with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with the given settings.
    pub fn with_settings(settings: EngineSettings) -> Self {
        Self {
            state: CalcState::new(settings),
        }
    }

    /// Feed one input token.
    pub fn press(&mut self, input: Input) {
        reducer::update(&mut self.state, input);
    }

    /// Feed a sequence of input tokens in order.
    pub fn press_all(&mut self, inputs: impl IntoIterator<Item = Input>) {
        for input in inputs {
            self.press(input);
        }
    }

    /// Append a digit, or start a new entry with it.
    pub fn enter_digit(&mut self, digit: Digit) {
        self.press(Input::Digit(digit));
    }

    /// Add a decimal point unless the entry already has one.
    pub fn enter_decimal_point(&mut self) {
        self.press(Input::DecimalPoint);
    }

    /// Remove the last character of the display.
    pub fn backspace(&mut self) {
        self.press(Input::Backspace);
    }

    /// Resolve any pending operation and leave `op` pending.
    pub fn apply_operator(&mut self, op: BinaryOp) {
        self.press(Input::Operator(op));
    }

    /// Resolve the pending operation, if any.
    pub fn equals(&mut self) {
        self.press(Input::Equals);
    }

    /// Apply a scientific function to the display value.
    pub fn apply_function(&mut self, func: UnaryFn) {
        self.press(Input::Function(func));
    }

    /// `MC`: reset memory to zero.
    pub fn memory_clear(&mut self) {
        self.press(Input::Memory(MemoryCommand::Clear));
    }

    /// `MR`: show the memory value.
    pub fn memory_recall(&mut self) {
        self.press(Input::Memory(MemoryCommand::Recall));
    }

    /// `MS`: store the display value.
    pub fn memory_store(&mut self) {
        self.press(Input::Memory(MemoryCommand::Store));
    }

    /// `M+`: add the display value to memory.
    pub fn memory_add(&mut self) {
        self.press(Input::Memory(MemoryCommand::Add));
    }

    /// `M-`: subtract the display value from memory.
    pub fn memory_subtract(&mut self) {
        self.press(Input::Memory(MemoryCommand::Subtract));
    }

    /// Reset the display and drop the pending operation.
    pub fn clear(&mut self) {
        self.press(Input::Clear);
    }

    /// Reset everything, including memory and history.
    pub fn all_clear(&mut self) {
        self.press(Input::AllClear);
    }

    /// Show the result of the history entry at `index` (0 is newest).
    pub fn recall_history_entry(&mut self, index: usize) {
        self.press(Input::RecallHistory(index));
    }

    /// Text currently on the display.
    pub fn display(&self) -> &str {
        self.state.display()
    }

    /// The operation waiting for its second operand, if any.
    pub fn pending(&self) -> Option<PendingOperation> {
        self.state.pending()
    }

    /// Value of the memory register.
    pub fn memory(&self) -> f64 {
        self.state.memory()
    }

    /// Whether the engine is in the error mode.
    pub fn is_error(&self) -> bool {
        self.state.is_error()
    }

    /// Completed calculations, newest first.
    pub fn history(&self) -> &History {
        self.state.history()
    }

    /// Newest history entry, if any.
    pub fn last_entry(&self) -> Option<&HistoryEntry> {
        self.state.history().get(0)
    }

    /// Owned copy of the current state for renderers.
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }
}
