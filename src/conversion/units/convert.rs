use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::conversion::ConversionError;

use super::expr::{self, ExprError, Value};
use super::registry::UnitRegistry;
use super::Quantity;

/// Imperial length shorthand: `5'`, `11"`, `5' 11"`, `5'11"`. Feet must be
/// an integer; inches may be decimal; the space is only legal between the
/// two. Alternatives are spelled out because the grammar differs slightly
/// for each arrangement.
static IMPERIAL_SHORTHAND_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?:(?P<feet_only>\d+)'|(?P<inches_only>\d+|\d*\.\d+)"|(?P<feet>\d+)' ?(?P<inches>\d+|\d*\.\d+)")$"#,
    )
    .unwrap()
});

/// A successfully handled quantity token.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityOutcome {
    /// Unit conversion: two quantities already in rendering order.
    Converted { first: Quantity, second: Quantity },
    /// Dimensionless arithmetic: the original expression text and its value.
    Dimensionless { value: Decimal },
}

/// A failed quantity token.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityError {
    /// Not shaped like a quantity at all; skip silently.
    NotAQuantity,
    /// Reportable failure (unknown unit, unmapped unit, bad target).
    Report(ConversionError),
}

impl From<ConversionError> for QuantityError {
    fn from(error: ConversionError) -> Self {
        QuantityError::Report(error)
    }
}

fn parse_imperial_shorthand(registry: &UnitRegistry, input: &str) -> Option<Quantity> {
    let captures = IMPERIAL_SHORTHAND_PATTERN.captures(input)?;
    let group = |name: &str| {
        captures
            .name(name)
            .and_then(|m| m.as_str().parse::<Decimal>().ok())
    };

    if let Some(feet) = group("feet_only") {
        return Some(Quantity {
            magnitude: feet,
            unit: registry.resolve("ft")?,
        });
    }
    if let Some(inches) = group("inches_only") {
        return Some(Quantity {
            magnitude: inches,
            unit: registry.resolve("in")?,
        });
    }
    let feet = group("feet")?;
    let inches = group("inches")?;
    Some(Quantity {
        magnitude: feet + inches / dec!(12),
        unit: registry.resolve("ft")?,
    })
}

/// Parses a token's left-hand string as a quantity and converts it.
///
/// Tries the imperial feet/inches shorthand first, then the general
/// expression grammar. Without an explicit target the pair map supplies the
/// counterpart unit; with one, the named unit wins.
///
/// # Arguments
/// - `left`: trimmed left-hand token text (used verbatim in error messages)
/// - `target`: explicit target unit name, if the token supplied one
///
/// # Returns
/// - `Ok(QuantityOutcome)`: converted pair or dimensionless result
/// - `Err(QuantityError::NotAQuantity)`: silent fallthrough
/// - `Err(QuantityError::Report(_))`: user-facing per-token error
pub fn convert_measurement(
    registry: &UnitRegistry,
    left: &str,
    target: Option<&str>,
) -> Result<QuantityOutcome, QuantityError> {
    let quantity = match parse_imperial_shorthand(registry, left) {
        Some(quantity) => quantity,
        None => match expr::evaluate(registry, left) {
            Ok(Value::Quantity(quantity)) => quantity,
            Ok(Value::Number(value)) => {
                if let Some(target) = target {
                    // A bare number can't be converted into a unit.
                    return Err(ConversionError::IncompatibleTarget {
                        from: left.to_string(),
                        to: target.to_string(),
                    }
                    .into());
                }
                return Ok(QuantityOutcome::Dimensionless { value });
            }
            Err(ExprError::UnknownUnit(unit)) => {
                return Err(ConversionError::UnknownUnit(unit).into())
            }
            Err(ExprError::NotAQuantity) => return Err(QuantityError::NotAQuantity),
        },
    };

    if let Some(target) = target {
        let target = target.trim();
        let to = registry
            .resolve(target)
            .ok_or_else(|| ConversionError::UnknownUnit(target.to_string()))?;
        if registry.def(quantity.unit).dimension != registry.def(to).dimension {
            return Err(ConversionError::IncompatibleTarget {
                from: registry.def(quantity.unit).symbol.to_string(),
                to: target.to_string(),
            }
            .into());
        }
        // Same dimension, so a failure here is decimal overflow; skip the
        // token silently like any other non-quantity.
        let converted = registry
            .convert(quantity, to)
            .ok_or(QuantityError::NotAQuantity)?;
        return Ok(QuantityOutcome::Converted {
            first: quantity,
            second: converted,
        });
    }

    let counterpart = registry.pairs().counterpart(quantity.unit).ok_or_else(|| {
        ConversionError::UnmappedUnit {
            quantity: left.to_string(),
            unit: registry.def(quantity.unit).symbol.to_string(),
        }
    })?;
    // Pairs always share a dimension, so this only fails on overflow.
    let converted = registry
        .convert(quantity, counterpart.unit)
        .ok_or(QuantityError::NotAQuantity)?;

    let (first, second) = if counterpart.converted_first {
        (converted, quantity)
    } else {
        (quantity, converted)
    };
    Ok(QuantityOutcome::Converted { first, second })
}
