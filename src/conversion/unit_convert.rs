use super::notices::Notices;
use super::token::{Target, Token};
use super::units::{convert_measurement, QuantityError, QuantityOutcome, UnitRegistry};

/// Converts every token the time parser rejected.
///
/// Each token is handled independently: successes become rendered
/// `(original, converted)` line pairs, reportable failures go into the
/// notices, and anything that isn't quantity-shaped is skipped silently.
///
/// # Arguments
/// - `registry`: the unit registry
/// - `tokens`: tokens that fell through time parsing, in message order
/// - `notices`: per-message accumulator for errors
///
/// # Returns
/// Rendered line pairs in message order.
pub fn convert_quantities(
    registry: &UnitRegistry,
    tokens: &[Token],
    notices: &mut Notices,
) -> Vec<(String, String)> {
    let mut lines = Vec::new();
    for token in tokens {
        let target = match &token.target {
            Target::Default => None,
            Target::Explicit(target) => Some(target.as_str()),
            // Suppressed tokens never reach the orchestrators.
            Target::Suppress => continue,
        };

        match convert_measurement(registry, &token.left, target) {
            Ok(QuantityOutcome::Converted { first, second }) => {
                lines.push((registry.render(first), registry.render(second)));
            }
            Ok(QuantityOutcome::Dimensionless { value }) => {
                lines.push((token.left.clone(), value.normalize().to_string()));
            }
            Err(QuantityError::NotAQuantity) => {
                tracing::debug!("Token {:?} is neither a time nor a quantity", token.left);
            }
            Err(QuantityError::Report(error)) => {
                tracing::info!("Conversion failed for {:?}: {error}", token.left);
                notices.push_error(error);
            }
        }
    }
    lines
}
