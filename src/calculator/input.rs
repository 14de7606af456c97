//! Logical input tokens consumed by the calculator.
//!
//! Raw key or pointer events are decoded elsewhere; the engine only ever
//! sees the tokens defined here. A small text decoder is provided so that
//! shells can feed typed lines such as `12 + 3 =` or `5 fact`.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

lazy_static! {
    /// Splits a typed line into candidate tokens.
    ///
    /// Alternation is leftmost-first, so memory commands and `ac` win over
    /// the generic word rule, and digits are always single characters.
    static ref TOKEN: Regex = Regex::new(
        r"(?i)m[crs+\-]|ac|@\d+|[a-z]+|\d|[.+\-*/^=!<]"
    ).unwrap();
}

/// Errors produced while decoding text into input tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseInputError {
    #[error("unknown token `{0}`")]
    UnknownToken(String),
    #[error("invalid history reference `{0}`")]
    InvalidHistoryIndex(String),
}

/// A single decimal digit, `0` through `9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self(d as u8))
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

/// Binary operators that can be left pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOp {
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Power => '^',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '^' => Some(Self::Power),
            _ => None,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Serialize for BinaryOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.symbol())
    }
}

/// Single-argument functions applied immediately to the display value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryFn {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Sqrt,
    Factorial,
    Reciprocal,
    Square,
    Pi,
    E,
}

impl UnaryFn {
    /// Label used when recording the call in history.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Sqrt => "√",
            Self::Factorial => "!",
            Self::Reciprocal => "1/",
            Self::Square => "sqr",
            Self::Pi => "π",
            Self::E => "e",
        }
    }

    /// Constants ignore the display value entirely.
    pub fn is_constant(self) -> bool {
        matches!(self, Self::Pi | Self::E)
    }
}

/// Memory register commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryCommand {
    /// `MC`
    Clear,
    /// `MR`
    Recall,
    /// `MS`
    Store,
    /// `M+`
    Add,
    /// `M-`
    Subtract,
}

/// A pre-decoded logical input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Digit(Digit),
    DecimalPoint,
    Backspace,
    Operator(BinaryOp),
    Equals,
    Function(UnaryFn),
    Memory(MemoryCommand),
    /// Soft reset: display and pending operation only.
    Clear,
    /// Hard reset: also memory and history.
    AllClear,
    /// Recall a history entry by position, 0 being the newest.
    RecallHistory(usize),
}

impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();

        if let Some(index) = token.strip_prefix('@') {
            return index
                .parse()
                .map(Input::RecallHistory)
                .map_err(|_| ParseInputError::InvalidHistoryIndex(s.to_string()));
        }

        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(digit) = Digit::from_char(c) {
                return Ok(Input::Digit(digit));
            }
            if let Some(op) = BinaryOp::from_symbol(c) {
                return Ok(Input::Operator(op));
            }
        }

        let input = match token.as_str() {
            "." => Input::DecimalPoint,
            "=" => Input::Equals,
            "<" | "back" => Input::Backspace,
            "c" => Input::Clear,
            "ac" => Input::AllClear,
            "sin" => Input::Function(UnaryFn::Sin),
            "cos" => Input::Function(UnaryFn::Cos),
            "tan" => Input::Function(UnaryFn::Tan),
            "log" => Input::Function(UnaryFn::Log),
            "ln" => Input::Function(UnaryFn::Ln),
            "sqrt" => Input::Function(UnaryFn::Sqrt),
            "!" | "fact" => Input::Function(UnaryFn::Factorial),
            "inv" => Input::Function(UnaryFn::Reciprocal),
            "sqr" => Input::Function(UnaryFn::Square),
            "pi" => Input::Function(UnaryFn::Pi),
            "e" => Input::Function(UnaryFn::E),
            "mc" => Input::Memory(MemoryCommand::Clear),
            "mr" => Input::Memory(MemoryCommand::Recall),
            "ms" => Input::Memory(MemoryCommand::Store),
            "m+" => Input::Memory(MemoryCommand::Add),
            "m-" => Input::Memory(MemoryCommand::Subtract),
            _ => return Err(ParseInputError::UnknownToken(s.to_string())),
        };

        Ok(input)
    }
}

/// Decode a typed line into input tokens.
///
/// Multi-digit numbers become one token per digit, so `12+3=` yields five
/// tokens. Any character that does not belong to a token fails the whole
/// line; callers never see a partial decode.
pub fn tokenize(line: &str) -> Result<Vec<Input>, ParseInputError> {
    let mut inputs: Vec<Input> = Vec::new();
    let mut last_end = 0;

    for m in TOKEN.find_iter(line) {
        check_gap(&line[last_end..m.start()])?;
        inputs.push(m.as_str().parse::<Input>()?);
        last_end = m.end();
    }
    check_gap(&line[last_end..])?;

    Ok(inputs)
}

fn check_gap(gap: &str) -> Result<(), ParseInputError> {
    let stray = gap.trim();
    if stray.is_empty() {
        Ok(())
    } else {
        Err(ParseInputError::UnknownToken(stray.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(d: u8) -> Input {
        Input::Digit(Digit::new(d).unwrap())
    }

    #[test]
    fn test_digit_bounds() {
        assert!(Digit::new(9).is_some());
        assert!(Digit::new(10).is_none());
        assert_eq!(Digit::from_char('7').map(Digit::as_char), Some('7'));
        assert!(Digit::from_char('x').is_none());
    }

    #[test]
    fn test_single_tokens() {
        assert_eq!("5".parse::<Input>(), Ok(digit(5)));
        assert_eq!("-".parse::<Input>(), Ok(Input::Operator(BinaryOp::Subtract)));
        assert_eq!("SQRT".parse::<Input>(), Ok(Input::Function(UnaryFn::Sqrt)));
        assert_eq!("!".parse::<Input>(), Ok(Input::Function(UnaryFn::Factorial)));
        assert_eq!("M+".parse::<Input>(), Ok(Input::Memory(MemoryCommand::Add)));
        assert_eq!("ac".parse::<Input>(), Ok(Input::AllClear));
        assert_eq!("@3".parse::<Input>(), Ok(Input::RecallHistory(3)));
    }

    #[test]
    fn test_bad_tokens() {
        assert_eq!(
            "cosh".parse::<Input>(),
            Err(ParseInputError::UnknownToken("cosh".to_string()))
        );
        assert!(matches!(
            "@x".parse::<Input>(),
            Err(ParseInputError::InvalidHistoryIndex(_))
        ));
    }

    #[test]
    fn test_tokenize_line() {
        let inputs = tokenize("12 + 3 =").unwrap();
        assert_eq!(
            inputs,
            vec![
                digit(1),
                digit(2),
                Input::Operator(BinaryOp::Add),
                digit(3),
                Input::Equals,
            ]
        );
    }

    #[test]
    fn test_tokenize_words_and_memory() {
        let inputs = tokenize("5 fact ms mc mr").unwrap();
        assert_eq!(
            inputs,
            vec![
                digit(5),
                Input::Function(UnaryFn::Factorial),
                Input::Memory(MemoryCommand::Store),
                Input::Memory(MemoryCommand::Clear),
                Input::Memory(MemoryCommand::Recall),
            ]
        );
        assert_eq!(
            tokenize("m-").unwrap(),
            vec![Input::Memory(MemoryCommand::Subtract)]
        );
    }

    #[test]
    fn test_tokenize_rejects_whole_line() {
        assert_eq!(
            tokenize("1 + # 2"),
            Err(ParseInputError::UnknownToken("#".to_string()))
        );
        assert!(tokenize("2 banana").is_err());
        assert_eq!(tokenize("   ").unwrap(), vec![]);
    }
}
