//! Parser for rectangular impedance text such as `4+2i` or `0.6-2i`.
//!
//! ```text
//! impedance = [sign] real [sign imag 'i']
//!           | [sign] imag 'i'
//! imag      = [number]
//! number    = digit+ ['.' digit*] [('e'|'E') ['-'|'+'] digit+]
//!           | '.' digit+ [exponent]
//! ```
//!
//! Whitespace is allowed around the operator and at either end.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::{FaultError, Result};
use crate::phasor::Complex64;

struct Cursor<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    column: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            column: 1,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn advance(&mut self) -> Option<char> {
        let next = self.chars.next().map(|(_, c)| c);
        if next.is_some() {
            self.column += 1;
        }
        next
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn error(&self, message: impl Into<String>) -> FaultError {
        FaultError::impedance_syntax(self.input, self.column, message)
    }

    /// Consume a leading `+` or `-`, returning the multiplier.
    fn sign(&mut self) -> Option<f64> {
        match self.peek() {
            Some('+') => {
                self.advance();
                Some(1.0)
            }
            Some('-') => {
                self.advance();
                Some(-1.0)
            }
            _ => None,
        }
    }

    fn number(&mut self) -> Result<f64> {
        let start_column = self.column;
        let mut text = String::new();

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' {
                text.push(c);
                self.advance();
            } else if (c == 'e' || c == 'E') && !text.is_empty() {
                text.push(c);
                self.advance();
                if let Some(s @ ('+' | '-')) = self.peek() {
                    text.push(s);
                    self.advance();
                }
            } else {
                break;
            }
        }

        if text.is_empty() {
            return Err(self.error("expected a number"));
        }

        text.parse::<f64>().map_err(|_| {
            FaultError::impedance_syntax(
                self.input,
                start_column,
                format!("malformed number '{}'", text),
            )
        })
    }

    fn expect_end(&mut self) -> Result<()> {
        self.skip_whitespace();
        match self.peek() {
            None => Ok(()),
            Some(c) => Err(self.error(format!("unexpected character '{}'", c))),
        }
    }

    /// Imaginary magnitude up to and including the `i`; a bare `i` means 1.
    fn imaginary(&mut self) -> Result<f64> {
        let value = if self.peek() == Some('i') {
            1.0
        } else {
            self.number()?
        };
        self.skip_whitespace();
        if self.peek() != Some('i') {
            return Err(self.error("expected 'i' after the imaginary part"));
        }
        self.advance();
        Ok(value)
    }
}

/// Parse an impedance written as `<real>[+|-]<imag>i`.
pub fn parse_impedance(text: &str) -> Result<Complex64> {
    let mut cursor = Cursor::new(text);
    cursor.skip_whitespace();

    if cursor.peek().is_none() {
        return Err(cursor.error("empty impedance"));
    }

    let lead = cursor.sign().unwrap_or(1.0);

    if cursor.peek() == Some('i') {
        cursor.advance();
        cursor.expect_end()?;
        return Ok(Complex64::new(0.0, lead));
    }

    let first = lead * cursor.number()?;
    cursor.skip_whitespace();

    match cursor.peek() {
        None => Ok(Complex64::new(first, 0.0)),
        Some('i') => {
            cursor.advance();
            cursor.expect_end()?;
            Ok(Complex64::new(0.0, first))
        }
        Some('+') | Some('-') => {
            let sign = cursor.sign().unwrap_or(1.0);
            cursor.skip_whitespace();
            let imag = sign * cursor.imaginary()?;
            cursor.expect_end()?;
            Ok(Complex64::new(first, imag))
        }
        Some(c) => Err(cursor.error(format!("unexpected character '{}'", c))),
    }
}

/// Render an impedance in the form accepted by [`parse_impedance`].
pub fn format_impedance(z: Complex64) -> String {
    if z.im < 0.0 {
        format!("{}-{}i", z.re, -z.im)
    } else {
        format!("{}+{}i", z.re, z.im)
    }
}
