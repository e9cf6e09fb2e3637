//! Auxiliary calculator: display state machine and expression evaluator.
//!
//! A malformed expression never fails the session; evaluation replaces the
//! display with the literal `Error` instead.

/// Display text shown for any failed evaluation.
pub const ERROR_DISPLAY: &str = "Error";

const OPERATOR_CHARS: [char; 6] = ['+', '-', '*', '/', '×', '÷'];

/// Calculator display state.
///
/// Keys append to the display string; `equals` evaluates it in place.
#[derive(Debug, Clone)]
pub struct Calculator {
    display: String,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// Appends a digit or decimal point. A lone leading `0` is replaced.
    pub fn press_value(&mut self, value: char) {
        if self.display == "0" || self.display == ERROR_DISPLAY {
            self.display = value.to_string();
        } else {
            self.display.push(value);
        }
    }

    /// Appends an operator, replacing a trailing operator instead of
    /// stacking two.
    pub fn press_operator(&mut self, op: char) {
        if self.display == ERROR_DISPLAY {
            self.display = "0".to_string();
        }
        if let Some(last) = self.display.chars().last() {
            if OPERATOR_CHARS.contains(&last) {
                self.display.pop();
            }
        }
        self.display.push(op);
    }

    /// Resets the display to `0`.
    pub fn clear(&mut self) {
        self.display = "0".to_string();
    }

    /// Removes the last character; an emptied display becomes `0`.
    pub fn backspace(&mut self) {
        self.display.pop();
        if self.display.is_empty() {
            self.display = "0".to_string();
        }
    }

    /// Evaluates the display expression, writing the result (or `Error`)
    /// back into the display.
    pub fn equals(&mut self) {
        self.display = match evaluate(&self.display) {
            Ok(value) => format_result(value),
            Err(()) => ERROR_DISPLAY.to_string(),
        };
    }
}

/// Evaluates an infix arithmetic expression with `+ - * /` precedence.
///
/// The display symbols `×` and `÷` are normalized first.
pub fn evaluate(expression: &str) -> Result<f64, ()> {
    let normalized: String = expression
        .chars()
        .map(|c| match c {
            '×' => '*',
            '÷' => '/',
            other => other,
        })
        .collect();
    let mut parser = Parser {
        chars: normalized.chars().collect(),
        pos: 0,
    };
    let value = parser.expression()?;
    parser.skip_whitespace();
    if parser.pos != parser.chars.len() {
        return Err(());
    }
    Ok(value)
}

fn format_result(value: f64) -> String {
    if !value.is_finite() {
        return ERROR_DISPLAY.to_string();
    }
    // Shortest round-trip formatting; integers come out without a dot.
    format!("{value}")
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn expression(&mut self) -> Result<f64, ()> {
        let mut value = self.term()?;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('+') => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some('-') => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, ()> {
        let mut value = self.factor()?;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('*') => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                Some('/') => {
                    self.pos += 1;
                    value /= self.factor()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn factor(&mut self) -> Result<f64, ()> {
        self.skip_whitespace();
        match self.peek() {
            Some('-') => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some('(') => {
                self.pos += 1;
                let value = self.expression()?;
                self.skip_whitespace();
                if self.peek() != Some(')') {
                    return Err(());
                }
                self.pos += 1;
                Ok(value)
            }
            _ => self.number(),
        }
    }

    fn number(&mut self) -> Result<f64, ()> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(());
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        literal.parse().map_err(|_| ())
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }
}
