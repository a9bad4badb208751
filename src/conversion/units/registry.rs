use std::collections::HashMap;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::pairs::UnitPairMap;
use super::Quantity;

/// Handle into a [`UnitRegistry`]'s unit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitId(usize);

impl UnitId {
    #[cfg(test)]
    pub(crate) fn test(index: usize) -> Self {
        UnitId(index)
    }
}

/// Physical dimension of a unit. Conversion is only defined within one
/// dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Length,
    Area,
    Speed,
    Mass,
    Volume,
    Pressure,
    Temperature,
    Energy,
    Angle,
    Time,
}

/// One unit definition.
///
/// The scale is kept as a numerator/denominator pair so ratios like the
/// Fahrenheit 5/9 stay exact under decimal arithmetic. Temperature units
/// additionally carry an offset: `base = (value + offset) * num / den`.
pub struct UnitDef {
    pub symbol: &'static str,
    pub dimension: Dimension,
    scale_num: Decimal,
    scale_den: Decimal,
    offset: Decimal,
}

/// Immutable unit registry: definitions, aliases, and the default pair map.
pub struct UnitRegistry {
    units: Vec<UnitDef>,
    aliases: HashMap<&'static str, UnitId>,
    pairs: UnitPairMap,
}

struct RegistryBuilder {
    units: Vec<UnitDef>,
    aliases: HashMap<&'static str, UnitId>,
}

impl RegistryBuilder {
    fn add(
        &mut self,
        symbol: &'static str,
        dimension: Dimension,
        scale_num: Decimal,
        scale_den: Decimal,
        offset: Decimal,
        aliases: &[&'static str],
    ) -> UnitId {
        let id = UnitId(self.units.len());
        self.units.push(UnitDef {
            symbol,
            dimension,
            scale_num,
            scale_den,
            offset,
        });
        for alias in aliases {
            let previous = self.aliases.insert(alias, id);
            debug_assert!(previous.is_none(), "duplicate unit alias {alias}");
        }
        id
    }

    fn linear(
        &mut self,
        symbol: &'static str,
        dimension: Dimension,
        scale: Decimal,
        aliases: &[&'static str],
    ) -> UnitId {
        self.add(symbol, dimension, scale, Decimal::ONE, Decimal::ZERO, aliases)
    }
}

impl UnitRegistry {
    /// Builds the standard registry with every unit the bot understands and
    /// the default imperial↔metric pair map.
    pub fn standard() -> Self {
        let mut b = RegistryBuilder {
            units: Vec::new(),
            aliases: HashMap::new(),
        };

        // Length (base: meter)
        let km = b.linear(
            "km",
            Dimension::Length,
            dec!(1000),
            &["km", "kilometer", "kilometers", "kilometre", "kilometres"],
        );
        let m = b.linear(
            "m",
            Dimension::Length,
            dec!(1),
            &["m", "meter", "meters", "metre", "metres"],
        );
        let cm = b.linear(
            "cm",
            Dimension::Length,
            dec!(0.01),
            &["cm", "centimeter", "centimeters", "centimetre", "centimetres"],
        );
        b.linear(
            "mm",
            Dimension::Length,
            dec!(0.001),
            &["mm", "millimeter", "millimeters", "millimetre", "millimetres"],
        );
        let mi = b.linear("mi", Dimension::Length, dec!(1609.344), &["mi", "mile", "miles"]);
        let ft = b.linear("ft", Dimension::Length, dec!(0.3048), &["ft", "foot", "feet"]);
        let inch = b.linear("in", Dimension::Length, dec!(0.0254), &["in", "inch", "inches"]);
        let yd = b.linear("yd", Dimension::Length, dec!(0.9144), &["yd", "yard", "yards"]);

        // Area (base: square meter)
        let hectare = b.linear(
            "ha",
            Dimension::Area,
            dec!(10000),
            &["ha", "hectare", "hectares"],
        );
        let acre = b.linear("acre", Dimension::Area, dec!(4046.8564224), &["acre", "acres"]);

        // Speed (base: meter/second)
        let kph = b.add(
            "km/h",
            Dimension::Speed,
            dec!(5),
            dec!(18),
            Decimal::ZERO,
            &["kph", "kmh"],
        );
        let mph = b.linear("mph", Dimension::Speed, dec!(0.44704), &["mph"]);
        let mps = b.linear("m/s", Dimension::Speed, dec!(1), &["mps"]);
        let fps = b.linear("ft/s", Dimension::Speed, dec!(0.3048), &["fps"]);

        // Mass (base: kilogram)
        let g = b.linear("g", Dimension::Mass, dec!(0.001), &["g", "gram", "grams"]);
        let kg = b.linear(
            "kg",
            Dimension::Mass,
            dec!(1),
            &["kg", "kilogram", "kilograms"],
        );
        let oz = b.linear(
            "oz",
            Dimension::Mass,
            dec!(0.028349523125),
            &["oz", "ounce", "ounces"],
        );
        let lb = b.linear(
            "lb",
            Dimension::Mass,
            dec!(0.45359237),
            &["lb", "lbs", "pound", "pounds"],
        );
        let stone = b.linear(
            "stone",
            Dimension::Mass,
            dec!(6.35029318),
            &["st", "stone", "stones"],
        );

        // Volume (base: liter)
        let liter = b.linear(
            "L",
            Dimension::Volume,
            dec!(1),
            &["l", "liter", "liters", "litre", "litres"],
        );
        let ml = b.linear(
            "mL",
            Dimension::Volume,
            dec!(0.001),
            &["ml", "milliliter", "milliliters", "millilitre", "millilitres"],
        );
        let gal = b.linear(
            "gal",
            Dimension::Volume,
            dec!(3.785411784),
            &["gal", "gallon", "gallons"],
        );
        let cup = b.linear("cup", Dimension::Volume, dec!(0.2365882365), &["cup", "cups"]);
        let pint = b.linear(
            "pt",
            Dimension::Volume,
            dec!(0.473176473),
            &["pt", "pint", "pints"],
        );
        let floz = b.linear("fl oz", Dimension::Volume, dec!(0.0295735295625), &["floz"]);
        b.linear(
            "hogshead",
            Dimension::Volume,
            dec!(238.480942392),
            &["hogshead", "hogsheads"],
        );

        // Pressure (base: pascal)
        let pa = b.linear("Pa", Dimension::Pressure, dec!(1), &["pa", "pascal", "pascals"]);
        let psi = b.linear("psi", Dimension::Pressure, dec!(6894.757293168361), &["psi"]);
        let atm = b.linear(
            "atm",
            Dimension::Pressure,
            dec!(101325),
            &["atm", "atmosphere", "atmospheres"],
        );
        let bar = b.linear("bar", Dimension::Pressure, dec!(100000), &["bar", "bars"]);

        // Temperature (base: kelvin). Celsius and Fahrenheit are affine.
        let celsius = b.add(
            "°C",
            Dimension::Temperature,
            dec!(1),
            dec!(1),
            dec!(273.15),
            &["c", "C", "°c", "°C", "degc", "degC", "celsius"],
        );
        let fahrenheit = b.add(
            "°F",
            Dimension::Temperature,
            dec!(5),
            dec!(9),
            dec!(459.67),
            &["f", "F", "°f", "°F", "degf", "degF", "fahrenheit"],
        );
        let kelvin = b.linear("K", Dimension::Temperature, dec!(1), &["K", "kelvin", "kelvins"]);

        // Energy (base: joule)
        let joule = b.linear("J", Dimension::Energy, dec!(1), &["j", "J", "joule", "joules"]);
        let ftlb = b.linear(
            "ft·lb",
            Dimension::Energy,
            dec!(1.3558179483314004),
            &["ftlb", "foot_pound", "foot_pounds"],
        );

        // Angle (base: radian)
        let rad = b.linear("rad", Dimension::Angle, dec!(1), &["rad", "radian", "radians"]);
        let deg = b.linear(
            "deg",
            Dimension::Angle,
            dec!(0.0174532925199432957692369077),
            &["deg", "degree", "degrees", "°"],
        );

        // Time (base: second)
        let s = b.linear(
            "s",
            Dimension::Time,
            dec!(1),
            &["s", "sec", "secs", "second", "seconds"],
        );
        let min = b.linear(
            "min",
            Dimension::Time,
            dec!(60),
            &["min", "mins", "minute", "minutes"],
        );
        let hour = b.linear(
            "h",
            Dimension::Time,
            dec!(3600),
            &["h", "hr", "hrs", "hour", "hours"],
        );
        let day = b.linear("day", Dimension::Time, dec!(86400), &["day", "days"]);
        let week = b.linear("week", Dimension::Time, dec!(604800), &["wk", "week", "weeks"]);

        let pairs = UnitPairMap::new(
            // Two-way defaults: either side converts to the other.
            &[
                (km, mi),
                (m, ft),
                (cm, inch),
                (hectare, acre),
                (kph, mph),
                (g, oz),
                (kg, lb),
                (liter, gal),
                (ml, cup),
                (pa, psi),
                (celsius, fahrenheit),
                (joule, ftlb),
                (rad, deg),
            ],
            // One-way defaults.
            &[
                (yd, m),
                (mps, kph),
                (fps, mph),
                (stone, kg),
                (pint, liter),
                (floz, ml),
                (atm, psi),
                (bar, psi),
                (kelvin, celsius),
                (s, min),
                (min, hour),
                (hour, day),
                (day, week),
            ],
        );

        UnitRegistry {
            units: b.units,
            aliases: b.aliases,
            pairs,
        }
    }

    pub fn def(&self, id: UnitId) -> &UnitDef {
        &self.units[id.0]
    }

    pub fn pairs(&self) -> &UnitPairMap {
        &self.pairs
    }

    /// Looks a unit up by name. Matching is case-sensitive first (so `K`
    /// stays kelvin while `C` stays Celsius), then falls back to lowercase.
    pub fn resolve(&self, name: &str) -> Option<UnitId> {
        if let Some(&id) = self.aliases.get(name) {
            return Some(id);
        }
        self.aliases.get(name.to_lowercase().as_str()).copied()
    }

    /// Converts a quantity into another unit of the same dimension.
    ///
    /// Goes through the dimension's base unit; for temperatures the affine
    /// offsets make this an absolute conversion rather than a bare rescale.
    ///
    /// # Returns
    /// - `Some(Quantity)` in the target unit
    /// - `None` if the dimensions differ or the arithmetic overflows the
    ///   decimal range
    pub fn convert(&self, quantity: Quantity, to: UnitId) -> Option<Quantity> {
        let from_def = self.def(quantity.unit);
        let to_def = self.def(to);
        if from_def.dimension != to_def.dimension {
            return None;
        }
        let base = quantity
            .magnitude
            .checked_add(from_def.offset)?
            .checked_mul(from_def.scale_num)?
            .checked_div(from_def.scale_den)?;
        let magnitude = base
            .checked_mul(to_def.scale_den)?
            .checked_div(to_def.scale_num)?
            .checked_sub(to_def.offset)?;
        Some(Quantity { magnitude, unit: to })
    }

    /// Renders a quantity to exactly two decimal places with its symbol.
    pub fn render(&self, quantity: Quantity) -> String {
        let rounded = quantity
            .magnitude
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.2} {}", rounded, self.def(quantity.unit).symbol)
    }
}
