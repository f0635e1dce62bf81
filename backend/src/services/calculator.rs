//! Keypad calculator with chained operations and a result history.
//!
//! The calculator mirrors a pocket calculator: digits build up the display,
//! a binary operator stores the left operand, pressing another operator
//! chains (evaluates the pending operation first), and `=` completes the
//! expression and records it in the history. Arithmetic follows IEEE-754,
//! so `1 ÷ 0` shows `Infinity` and `√-1` shows `NaN`.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Most history entries kept; older ones fall off the end.
pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "−",
            BinaryOp::Multiply => "×",
            BinaryOp::Divide => "÷",
            BinaryOp::Power => "^",
        }
    }

    pub fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Subtract => lhs - rhs,
            BinaryOp::Multiply => lhs * rhs,
            BinaryOp::Divide => lhs / rhs,
            BinaryOp::Power => lhs.powf(rhs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Sqrt,
    Square,
    Exp,
    Ln,
    Log10,
    Reciprocal,
    Negate,
}

impl UnaryOp {
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            UnaryOp::Sqrt => x.sqrt(),
            UnaryOp::Square => x * x,
            UnaryOp::Exp => x.exp(),
            UnaryOp::Ln => x.ln(),
            UnaryOp::Log10 => x.log10(),
            UnaryOp::Reciprocal => 1.0 / x,
            UnaryOp::Negate => -x,
        }
    }

    /// How the operation is written in the history.
    fn describe(&self, operand: &str) -> String {
        match self {
            UnaryOp::Sqrt => format!("√{}", operand),
            UnaryOp::Square => format!("{}²", operand),
            UnaryOp::Exp => format!("e^{}", operand),
            UnaryOp::Ln => format!("ln({})", operand),
            UnaryOp::Log10 => format!("log({})", operand),
            UnaryOp::Reciprocal => format!("1/{}", operand),
            UnaryOp::Negate => format!("−({})", operand),
        }
    }
}

/// One keypad press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "snake_case")]
pub enum Key {
    Digit(u8),
    Decimal,
    Binary(BinaryOp),
    Unary(UnaryOp),
    Equals,
    Clear,
    Backspace,
}

impl Key {
    /// Map a keyboard event key name to a keypad press.
    pub fn from_keyboard(key: &str) -> Option<Key> {
        let key = match key {
            "Enter" | "=" => Key::Equals,
            "Escape" | "c" | "C" => Key::Clear,
            "Backspace" => Key::Backspace,
            "." | "," => Key::Decimal,
            "+" => Key::Binary(BinaryOp::Add),
            "-" => Key::Binary(BinaryOp::Subtract),
            "*" | "x" => Key::Binary(BinaryOp::Multiply),
            "/" => Key::Binary(BinaryOp::Divide),
            "^" => Key::Binary(BinaryOp::Power),
            "s" | "S" => Key::Unary(UnaryOp::Sqrt),
            "n" | "N" => Key::Unary(UnaryOp::Negate),
            _ => {
                let mut chars = key.chars();
                let digit = chars.next()?.to_digit(10)?;
                if chars.next().is_some() {
                    return None;
                }
                Key::Digit(digit as u8)
            }
        };
        Some(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: String,
}

/// Render a number the way the display shows it.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculator {
    display: String,
    expression: String,
    previous: Option<f64>,
    operation: Option<BinaryOp>,
    /// Next digit starts a fresh number instead of appending.
    new_number: bool,
    history: VecDeque<HistoryEntry>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            expression: String::new(),
            previous: None,
            operation: None,
            new_number: true,
            history: VecDeque::new(),
        }
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// The pending expression, e.g. `12 × 3`.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Newest first.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    /// Numeric value of the display.
    pub fn value(&self) -> f64 {
        self.display.parse().unwrap_or(0.0)
    }

    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(d) => self.input_digit(d),
            Key::Decimal => self.input_decimal(),
            Key::Binary(op) => self.apply_binary(op),
            Key::Unary(op) => self.apply_unary(op),
            Key::Equals => self.equals(),
            Key::Clear => self.clear(),
            Key::Backspace => self.backspace(),
        }
    }

    /// Press a sequence of keys in order.
    pub fn press_all<I: IntoIterator<Item = Key>>(&mut self, keys: I) {
        for key in keys {
            self.press(key);
        }
    }

    pub fn input_digit(&mut self, digit: u8) {
        if digit > 9 {
            return;
        }
        let digit = char::from(b'0' + digit);
        if self.new_number || self.display == "0" {
            self.display = digit.to_string();
        } else {
            self.display.push(digit);
        }
        self.new_number = false;
        self.refresh_expression();
    }

    pub fn input_decimal(&mut self) {
        if self.new_number {
            self.display = "0.".to_string();
        } else if !self.display.contains('.') {
            self.display.push('.');
        } else {
            return;
        }
        self.new_number = false;
        self.refresh_expression();
    }

    /// Store the display as the left operand, evaluating any pending
    /// operation first when a right operand has been entered.
    pub fn apply_binary(&mut self, op: BinaryOp) {
        let current = self.value();
        let lhs = match (self.previous, self.operation) {
            (Some(prev), Some(pending)) if !self.new_number => {
                let result = pending.apply(prev, current);
                self.display = format_number(result);
                result
            }
            _ => current,
        };
        self.previous = Some(lhs);
        self.operation = Some(op);
        self.expression = format!("{} {} ", format_number(lhs), op.symbol());
        self.new_number = true;
    }

    /// Complete the pending operation. Does nothing without one.
    pub fn equals(&mut self) {
        let (Some(prev), Some(op)) = (self.previous, self.operation) else {
            return;
        };
        let current = self.value();
        let result = format_number(op.apply(prev, current));
        let expression = format!(
            "{} {} {}",
            format_number(prev),
            op.symbol(),
            format_number(current)
        );

        self.display = result.clone();
        self.expression.clear();
        self.previous = None;
        self.operation = None;
        self.new_number = true;
        self.record(expression, result);
    }

    /// Apply a one-operand function to the display and record it.
    pub fn apply_unary(&mut self, op: UnaryOp) {
        let current = self.value();
        let result = format_number(op.apply(current));
        let expression = op.describe(&format_number(current));

        self.display = result.clone();
        self.expression.clear();
        self.new_number = true;
        self.record(expression, result);
    }

    /// Reset the display and pending operation. History is kept.
    pub fn clear(&mut self) {
        self.display = "0".to_string();
        self.expression.clear();
        self.previous = None;
        self.operation = None;
        self.new_number = true;
    }

    pub fn backspace(&mut self) {
        let mut shortened = self.display.clone();
        shortened.pop();
        if shortened.is_empty() || shortened == "-" {
            self.display = "0".to_string();
            self.new_number = true;
        } else {
            self.display = shortened;
        }
        self.refresh_expression();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Put a history result back on the display. `index` 0 is the newest.
    pub fn recall(&mut self, index: usize) -> Option<&str> {
        let result = self.history.get(index)?.result.clone();
        self.display = result;
        self.new_number = true;
        Some(&self.display)
    }

    fn record(&mut self, expression: String, result: String) {
        self.history.push_front(HistoryEntry { expression, result });
        self.history.truncate(HISTORY_LIMIT);
    }

    fn refresh_expression(&mut self) {
        if let (Some(prev), Some(op)) = (self.previous, self.operation) {
            let rhs = if self.new_number { "" } else { self.display.as_str() };
            self.expression = format!("{} {} {}", format_number(prev), op.symbol(), rhs);
        }
    }
}
