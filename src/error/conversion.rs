use thiserror::Error;

/// User-facing failures from the inline conversion engine.
///
/// These are reported per token (except `UserTimezoneUnset`, reported at
/// most once per message) and never abort processing of the remaining
/// tokens. The expected "not a time, not a quantity" fallthrough is not an
/// error at all and never reaches this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Quantity-like text whose unit word isn't in the registry.
    #[error("Unknown unit \"{0}\"")]
    UnknownUnit(String),

    /// A known unit with no counterpart in the pair map and no explicit
    /// target supplied. Distinct from `UnknownUnit` by design.
    #[error(
        "\"{unit}\" doesn't have a default conversion. Try naming one, like \
         {{{quantity} > another_unit}}"
    )]
    UnmappedUnit { quantity: String, unit: String },

    /// Explicit target names a unit of a different dimension.
    #[error("Can't convert \"{from}\" into \"{to}\"")]
    IncompatibleTarget { from: String, to: String },

    /// A timezone hint or target didn't fuzzy-resolve to any known zone.
    #[error("Timezone \"{0}\" not found")]
    TimezoneNotFound(String),

    /// The asking user has no stored timezone and the token gave no hint.
    #[error("Your timezone is not set. Set it in your profile so your times can be localized.")]
    UserTimezoneUnset,
}
