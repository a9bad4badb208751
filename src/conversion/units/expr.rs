use std::str::FromStr;

use rust_decimal::Decimal;

use super::registry::UnitRegistry;
use super::Quantity;

/// Evaluation result: either a dimensionless number or a quantity carrying
/// the unit of its leading term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Number(Decimal),
    Quantity(Quantity),
}

/// Why an expression didn't evaluate.
///
/// `NotAQuantity` is the silent case: the text isn't shaped like a quantity
/// expression at all (or uses algebra the engine doesn't support), so the
/// token is skipped without a reply. `UnknownUnit` means the structure was
/// right but a unit word isn't in the registry; that one gets reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    NotAQuantity,
    UnknownUnit(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Lexeme {
    Number(Decimal),
    Word(String),
    Plus,
    Minus,
    Star,
    Slash,
}

fn lex(input: &str) -> Result<Vec<Lexeme>, ExprError> {
    let mut lexemes = Vec::new();
    let mut chars = input.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c.is_ascii_digit() || c == '.' {
            let mut text = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_digit() || c == '.' {
                    text.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            let number = Decimal::from_str(&text).map_err(|_| ExprError::NotAQuantity)?;
            lexemes.push(Lexeme::Number(number));
        } else if c.is_alphabetic() || c == '°' || c == '_' {
            let mut text = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_alphanumeric() || c == '°' || c == '_' {
                    text.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            lexemes.push(Lexeme::Word(text));
        } else {
            lexemes.push(match c {
                '+' => Lexeme::Plus,
                '-' => Lexeme::Minus,
                '*' => Lexeme::Star,
                '/' => Lexeme::Slash,
                _ => return Err(ExprError::NotAQuantity),
            });
            chars.next();
        }
    }
    Ok(lexemes)
}

struct Parser<'a> {
    registry: &'a UnitRegistry,
    lexemes: Vec<Lexeme>,
    position: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Lexeme> {
        self.lexemes.get(self.position)
    }

    fn advance(&mut self) -> Option<Lexeme> {
        let lexeme = self.lexemes.get(self.position).cloned();
        if lexeme.is_some() {
            self.position += 1;
        }
        lexeme
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<Value, ExprError> {
        let mut left = self.term()?;
        while let Some(op) = self.peek() {
            let subtract = match op {
                Lexeme::Plus => false,
                Lexeme::Minus => true,
                _ => break,
            };
            self.advance();
            let right = self.term()?;
            left = add(self.registry, left, right, subtract)?;
        }
        Ok(left)
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> Result<Value, ExprError> {
        let mut left = self.factor()?;
        while let Some(op) = self.peek() {
            let divide = match op {
                Lexeme::Star => false,
                Lexeme::Slash => true,
                _ => break,
            };
            self.advance();
            let right = self.factor()?;
            left = multiply(left, right, divide)?;
        }
        Ok(left)
    }

    // factor := ['-'] number [unit]
    fn factor(&mut self) -> Result<Value, ExprError> {
        let negative = matches!(self.peek(), Some(Lexeme::Minus));
        if negative {
            self.advance();
        }
        let magnitude = match self.advance() {
            Some(Lexeme::Number(n)) => n,
            _ => return Err(ExprError::NotAQuantity),
        };
        let magnitude = if negative { -magnitude } else { magnitude };

        if let Some(Lexeme::Word(_)) = self.peek() {
            let Some(Lexeme::Word(word)) = self.advance() else {
                unreachable!()
            };
            let unit = self
                .registry
                .resolve(&word)
                .ok_or(ExprError::UnknownUnit(word))?;
            return Ok(Value::Quantity(Quantity { magnitude, unit }));
        }
        Ok(Value::Number(magnitude))
    }
}

fn add(
    registry: &UnitRegistry,
    left: Value,
    right: Value,
    subtract: bool,
) -> Result<Value, ExprError> {
    // Overflowing the decimal range is not reportable as anything more
    // specific than "not a convertible quantity".
    let combine = |a: Decimal, b: Decimal| {
        if subtract {
            a.checked_sub(b)
        } else {
            a.checked_add(b)
        }
        .ok_or(ExprError::NotAQuantity)
    };
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(combine(a, b)?)),
        (Value::Quantity(a), Value::Quantity(b)) => {
            // The sum keeps the left term's unit.
            let b = registry.convert(b, a.unit).ok_or(ExprError::NotAQuantity)?;
            Ok(Value::Quantity(Quantity {
                magnitude: combine(a.magnitude, b.magnitude)?,
                unit: a.unit,
            }))
        }
        _ => Err(ExprError::NotAQuantity),
    }
}

fn multiply(left: Value, right: Value, divide: bool) -> Result<Value, ExprError> {
    // `checked_div` covers both division by zero and overflow.
    let scale = |magnitude: Decimal, by: Decimal, divide: bool| {
        if divide {
            magnitude.checked_div(by)
        } else {
            magnitude.checked_mul(by)
        }
        .ok_or(ExprError::NotAQuantity)
    };
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(scale(a, b, divide)?)),
        (Value::Quantity(a), Value::Number(b)) => Ok(Value::Quantity(Quantity {
            magnitude: scale(a.magnitude, b, divide)?,
            unit: a.unit,
        })),
        // A number divided by a quantity would be a reciprocal unit, and a
        // quantity times a quantity a compound one. Neither is supported.
        (Value::Number(a), Value::Quantity(b)) if !divide => Ok(Value::Quantity(Quantity {
            magnitude: scale(a, b.magnitude, false)?,
            unit: b.unit,
        })),
        _ => Err(ExprError::NotAQuantity),
    }
}

/// Parses and evaluates a quantity/arithmetic expression.
///
/// Supports `+ - * /` over decimal literals and `<number> <unit>` terms,
/// like `5min+27s + 4min+34s` or plain `2 + 7`.
pub fn evaluate(registry: &UnitRegistry, input: &str) -> Result<Value, ExprError> {
    let lexemes = lex(input)?;
    if lexemes.is_empty() {
        return Err(ExprError::NotAQuantity);
    }
    let mut parser = Parser {
        registry,
        lexemes,
        position: 0,
    };
    let value = parser.expr()?;
    if parser.peek().is_some() {
        return Err(ExprError::NotAQuantity);
    }
    Ok(value)
}
