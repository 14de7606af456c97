//! Calculator reducer.
//!
//! Every state change happens here: `reduce(state, input)` maps the current
//! state and one input token to the next state. An input either applies all
//! of its effects or, when an operation fails, only the error-mode effects.
//!
//! Unary functions leave a pending binary operation in place, so
//! `2 + 9 sqrt =` evaluates to `5`.

use super::format::{format_number, parse_display};
use super::history::HistoryEntry;
use super::input::{BinaryOp, Digit, Input, MemoryCommand, UnaryFn};
use super::operations::{CalcError, combine};
use super::state::{CalcState, PendingOperation};
use tracing::{debug, trace};

/// Produce the state that follows `input`.
pub fn reduce(mut state: CalcState, input: Input) -> CalcState {
    update(&mut state, input);
    state
}

/// Fold a sequence of inputs over `state`.
pub fn replay(state: CalcState, inputs: impl IntoIterator<Item = Input>) -> CalcState {
    inputs.into_iter().fold(state, reduce)
}

/// In-place form of [`reduce`].
pub fn update(state: &mut CalcState, input: Input) {
    trace!(?input, display = %state.display, "reducing input");

    if state.error && !allowed_in_error_mode(input) {
        trace!(?input, "ignored while in error mode");
        return;
    }

    match input {
        Input::Digit(digit) => enter_digit(state, digit),
        Input::DecimalPoint => enter_decimal_point(state),
        Input::Backspace => backspace(state),
        Input::Operator(op) => apply_operator(state, op),
        Input::Equals => equals(state),
        Input::Function(func) => apply_function(state, func),
        Input::Memory(command) => apply_memory(state, command),
        Input::Clear => clear(state),
        Input::AllClear => all_clear(state),
        Input::RecallHistory(index) => recall_history(state, index),
    }
}

/// Inputs processed while the display holds the error sentinel.
fn allowed_in_error_mode(input: Input) -> bool {
    matches!(
        input,
        Input::Digit(_)
            | Input::DecimalPoint
            | Input::Clear
            | Input::AllClear
            | Input::Memory(MemoryCommand::Clear)
    )
}

// ============================================================================
// Entry
// ============================================================================

fn enter_digit(state: &mut CalcState, digit: Digit) {
    if state.error {
        state.error = false;
        state.display = "0".to_string();
        state.awaiting_new_entry = false;
    }

    let c = digit.as_char();
    if state.awaiting_new_entry {
        state.display = c.to_string();
        state.awaiting_new_entry = false;
    } else if state.display == "0" {
        state.display = c.to_string();
    } else {
        state.display.push(c);
    }
}

fn enter_decimal_point(state: &mut CalcState) {
    if state.error || state.awaiting_new_entry {
        state.error = false;
        state.awaiting_new_entry = false;
        state.display = "0.".to_string();
    } else if !state.display.contains('.') {
        state.display.push('.');
    }
}

/// Drop the last character; anything left that no longer reads as a
/// number (empty, a lone `-`, a clipped `Infinity`) becomes `0`.
fn backspace(state: &mut CalcState) {
    state.display.pop();
    if state.display.parse::<f64>().is_err() {
        state.display = "0".to_string();
    }
}

// ============================================================================
// Binary operations
// ============================================================================

fn apply_operator(state: &mut CalcState, op: BinaryOp) {
    let current = parse_display(&state.display);

    let operand = match state.pending {
        None => current,
        Some(pending) => match resolve(state, pending, current) {
            Ok(result) => result,
            Err(err) => return enter_error(state, err),
        },
    };

    state.pending = Some(PendingOperation {
        operand,
        operator: op,
    });
    state.awaiting_new_entry = true;
}

fn equals(state: &mut CalcState) {
    let Some(pending) = state.pending else {
        return;
    };

    let current = parse_display(&state.display);
    if let Err(err) = resolve(state, pending, current) {
        return enter_error(state, err);
    }

    state.pending = None;
    state.awaiting_new_entry = true;
}

/// Combine the pending operation with `current`, show the result and log it.
fn resolve(
    state: &mut CalcState,
    pending: PendingOperation,
    current: f64,
) -> Result<f64, CalcError> {
    let result = combine(pending.operand, current, pending.operator)?;
    let expression = format!(
        "{} {} {}",
        format_number(pending.operand),
        pending.operator,
        format_number(current)
    );
    show_result(state, expression, result);
    Ok(result)
}

// ============================================================================
// Scientific functions
// ============================================================================

fn apply_function(state: &mut CalcState, func: UnaryFn) {
    let input = parse_display(&state.display);
    let settings = &state.settings;

    match func.apply(input, settings.angle_unit, settings.factorial_limit) {
        Ok(result) => {
            let expression = if func.is_constant() {
                func.label().to_string()
            } else {
                format!("{}({})", func.label(), format_number(input))
            };
            show_result(state, expression, result);
            state.awaiting_new_entry = true;
        }
        Err(err) => enter_error(state, err),
    }
}

// ============================================================================
// Memory, resets and history
// ============================================================================

fn apply_memory(state: &mut CalcState, command: MemoryCommand) {
    match command {
        MemoryCommand::Clear => state.memory = 0.0,
        MemoryCommand::Recall => {
            state.display = format_number(state.memory);
            state.awaiting_new_entry = true;
        }
        MemoryCommand::Store => state.memory = parse_display(&state.display),
        MemoryCommand::Add => state.memory += parse_display(&state.display),
        MemoryCommand::Subtract => state.memory -= parse_display(&state.display),
    }
}

fn clear(state: &mut CalcState) {
    state.display = "0".to_string();
    state.pending = None;
    state.awaiting_new_entry = false;
    state.error = false;
}

fn all_clear(state: &mut CalcState) {
    clear(state);
    state.memory = 0.0;
    state.history.clear();
}

fn recall_history(state: &mut CalcState, index: usize) {
    match state.history.get(index) {
        Some(entry) => {
            state.display = entry.result.clone();
            state.awaiting_new_entry = true;
        }
        None => debug!(index, "no history entry to recall"),
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn show_result(state: &mut CalcState, expression: String, result: f64) {
    let text = format_number(result);
    state.history.push(HistoryEntry::new(expression, text.clone()));
    state.display = text;
}

fn enter_error(state: &mut CalcState, err: CalcError) {
    debug!(error = %err, "entering error mode");
    state.display = state.settings.error_text.clone();
    state.error = true;
    state.pending = None;
    state.awaiting_new_entry = false;
}
