//! Numeric tokenizer.
//!
//! Splits an argument string such as `"10-5.5.5e2,3"` into numbers. The
//! grammar allows numbers to run together whenever a sign or decimal point
//! can only start a new number, and arc flags may be packed with no
//! separator at all (`"a10 10 0 01 5 5"`).

use crate::{ParseError, ParseResult};
use tracing::trace;

/// Positions, modulo `stride`, at which a lone `0` or `1` is a complete
/// flag value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagLayout {
    pub indices: &'static [usize],
    pub stride: usize,
}

/// Flag layout of the elliptical arc command: `large-arc-flag` and
/// `sweep-flag` are arguments 3 and 4 of every group of 7.
pub const ARC_FLAGS: FlagLayout = FlagLayout {
    indices: &[3, 4],
    stride: 7,
};

/// Tokenization state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Separator,
    Integer,
    Float,
    Exponent,
}

/// Number tokenizer over a single argument string.
pub struct Tokenizer<'a> {
    input: &'a str,
    flags: Option<FlagLayout>,
    state: State,
    seen_comma: bool,
    number: String,
    number_start: usize,
    exponent: String,
    numbers: Vec<f64>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            flags: None,
            state: State::Separator,
            seen_comma: true,
            number: String::new(),
            number_start: 0,
            exponent: String::new(),
            numbers: Vec::new(),
        }
    }

    /// Decode single-character flags at the positions given by `layout`.
    pub fn with_flags(mut self, layout: FlagLayout) -> Self {
        self.flags = Some(layout);
        self
    }

    pub fn tokenize(mut self) -> ParseResult<Vec<f64>> {
        let mut end = 0;
        for (index, ch) in self.input.chars().enumerate() {
            self.step(index, ch)?;
            end = index + 1;
        }

        // Input may end mid-number.
        self.finish_number(end)?;
        trace!(count = self.numbers.len(), "tokenized arguments");
        Ok(self.numbers)
    }

    fn flag_due(&self) -> bool {
        self.flags.is_some_and(|layout| {
            layout.stride > 0 && layout.indices.contains(&(self.numbers.len() % layout.stride))
        })
    }

    fn step(&mut self, index: usize, ch: char) -> ParseResult<()> {
        if self.number.is_empty() && is_flag(ch) && self.flag_due() {
            // A flag is a whole number on its own. Stay in the integer
            // state so a following comma is not read as a second comma.
            self.begin(State::Integer, index, ch);
            self.finish_number(index)?;
            return Ok(());
        }

        match self.state {
            State::Separator => {
                if is_whitespace(ch) {
                    return Ok(());
                }
                if ch.is_ascii_digit() || is_sign(ch) {
                    self.begin(State::Integer, index, ch);
                    return Ok(());
                }
                if ch == '.' {
                    self.begin(State::Float, index, ch);
                    return Ok(());
                }
                if ch == ',' {
                    if self.seen_comma {
                        return Err(ParseError::DoubleComma { index });
                    }
                    self.seen_comma = true;
                }
            }
            State::Integer => {
                if ch.is_ascii_digit() {
                    self.push(index, ch);
                    return Ok(());
                }
                if ch == '.' {
                    self.push(index, ch);
                    self.state = State::Float;
                    return Ok(());
                }
                if is_exponent(ch) {
                    self.state = State::Exponent;
                    return Ok(());
                }
                // "-+1" is an error; "-1-2" is two numbers.
                if is_sign(ch) && self.number.len() == 1 && self.number.starts_with(is_sign) {
                    return Err(ParseError::DoubleSign { ch, index });
                }
            }
            State::Float => {
                if ch.is_ascii_digit() {
                    self.number.push(ch);
                    return Ok(());
                }
                if is_exponent(ch) {
                    self.state = State::Exponent;
                    return Ok(());
                }
                // "1..2" is an error; "1.5.5" is two numbers.
                if ch == '.' && self.number.ends_with('.') {
                    return Err(ParseError::DoubleDecimalPoint { index });
                }
            }
            State::Exponent => {
                if ch.is_ascii_digit() {
                    self.exponent.push(ch);
                    return Ok(());
                }
                if is_sign(ch) {
                    if self.exponent.is_empty() {
                        self.exponent.push(ch);
                        return Ok(());
                    }
                    if self.exponent.len() == 1 && self.exponent.starts_with(is_sign) {
                        return Err(ParseError::DoubleExponentSign { ch, index });
                    }
                }
            }
        }

        self.end_number(index, ch)
    }

    /// `ch` cannot extend the current number: it must separate or start one.
    fn end_number(&mut self, index: usize, ch: char) -> ParseResult<()> {
        if is_whitespace(ch) {
            self.finish_number(index)?;
            self.state = State::Separator;
            self.seen_comma = false;
        } else if ch == ',' {
            self.finish_number(index)?;
            self.state = State::Separator;
            self.seen_comma = true;
        } else if is_sign(ch) {
            self.finish_number(index)?;
            self.begin(State::Integer, index, ch);
        } else if ch == '.' {
            self.finish_number(index)?;
            self.begin(State::Float, index, ch);
        } else {
            return Err(ParseError::UnexpectedCharacter { ch, index });
        }
        Ok(())
    }

    fn begin(&mut self, state: State, index: usize, ch: char) {
        self.state = state;
        self.number.clear();
        self.number.push(ch);
        self.number_start = index;
    }

    fn push(&mut self, index: usize, ch: char) {
        if self.number.is_empty() {
            self.number_start = index;
        }
        self.number.push(ch);
    }

    fn finish_number(&mut self, index: usize) -> ParseResult<()> {
        if self.number.is_empty() {
            self.exponent.clear();
            return Ok(());
        }

        let text = if self.exponent.is_empty() {
            std::mem::take(&mut self.number)
        } else {
            format!("{}e{}", self.number, self.exponent)
        };
        self.number.clear();
        self.exponent.clear();

        let value = text.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
            text: text.clone(),
            index: self.number_start.min(index),
        })?;
        self.numbers.push(value);
        Ok(())
    }
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

fn is_sign(ch: char) -> bool {
    matches!(ch, '-' | '+')
}

fn is_exponent(ch: char) -> bool {
    matches!(ch, 'e' | 'E')
}

fn is_flag(ch: char) -> bool {
    matches!(ch, '0' | '1')
}

/// Tokenize `input` into numbers.
pub fn parse_floats(input: &str) -> ParseResult<Vec<f64>> {
    Tokenizer::new(input).tokenize()
}

/// Tokenize `input`, decoding packed flags at the positions in `layout`.
pub fn parse_floats_with_flags(input: &str, layout: FlagLayout) -> ParseResult<Vec<f64>> {
    Tokenizer::new(input).with_flags(layout).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_and_commas() {
        assert_eq!(parse_floats("1,2 -3-4").unwrap(), vec![1.0, 2.0, -3.0, -4.0]);
        assert_eq!(parse_floats(" 10 , 20\t30\n40 ").unwrap(), vec![10.0, 20.0, 30.0, 40.0]);
        assert_eq!(parse_floats("").unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn test_implicit_separators() {
        assert_eq!(parse_floats("1.5.5").unwrap(), vec![1.5, 0.5]);
        assert_eq!(parse_floats("-.5-.5").unwrap(), vec![-0.5, -0.5]);
        assert_eq!(parse_floats("0.5+2").unwrap(), vec![0.5, 2.0]);
    }

    #[test]
    fn test_exponent() {
        assert_eq!(parse_floats("1e2-3").unwrap(), vec![100.0, -3.0]);
        assert_eq!(parse_floats("1.5E-3").unwrap(), vec![0.0015]);
        assert_eq!(parse_floats("2e+1,4").unwrap(), vec![20.0, 4.0]);
        assert_eq!(parse_floats("-3e1.5").unwrap(), vec![-30.0, 0.5]);
    }

    #[test]
    fn test_packed_arc_flags() {
        let numbers = parse_floats_with_flags("10 10 0 01 5 5", ARC_FLAGS).unwrap();
        assert_eq!(numbers, vec![10.0, 10.0, 0.0, 0.0, 1.0, 5.0, 5.0]);

        let numbers = parse_floats_with_flags("10,10,0,1,0,5,5", ARC_FLAGS).unwrap();
        assert_eq!(numbers, vec![10.0, 10.0, 0.0, 1.0, 0.0, 5.0, 5.0]);

        let numbers = parse_floats_with_flags("1 1 0 1120 2 2 2 0 0030 4", ARC_FLAGS).unwrap();
        assert_eq!(
            numbers,
            vec![1.0, 1.0, 0.0, 1.0, 1.0, 20.0, 2.0, 2.0, 2.0, 0.0, 0.0, 0.0, 30.0, 4.0]
        );
    }

    #[test]
    fn test_flags_ignored_without_layout() {
        assert_eq!(parse_floats("10 10 0 01 5 5").unwrap(), vec![10.0, 10.0, 0.0, 1.0, 5.0, 5.0]);
    }

    #[test]
    fn test_double_comma() {
        assert!(matches!(parse_floats("1,,2"), Err(ParseError::DoubleComma { index: 2 })));
        assert!(matches!(parse_floats("1, ,2"), Err(ParseError::DoubleComma { index: 3 })));
        assert!(matches!(parse_floats(",1"), Err(ParseError::DoubleComma { index: 0 })));
    }

    #[test]
    fn test_double_sign() {
        assert!(matches!(
            parse_floats("-+1"),
            Err(ParseError::DoubleSign { ch: '+', index: 1 })
        ));
    }

    #[test]
    fn test_double_decimal_point() {
        assert!(matches!(
            parse_floats("1..2"),
            Err(ParseError::DoubleDecimalPoint { index: 2 })
        ));
    }

    #[test]
    fn test_double_exponent_sign() {
        assert!(matches!(
            parse_floats("1e-+2"),
            Err(ParseError::DoubleExponentSign { ch: '+', index: 3 })
        ));
    }

    #[test]
    fn test_unexpected_character() {
        assert!(matches!(
            parse_floats("1 2 #"),
            Err(ParseError::UnexpectedCharacter { ch: '#', index: 4 })
        ));
    }

    #[test]
    fn test_incomplete_number() {
        assert!(matches!(parse_floats("3 -"), Err(ParseError::InvalidNumber { .. })));
    }
}
