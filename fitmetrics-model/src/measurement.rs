use strum::{Display, EnumString};

pub const CENTIMETERS_PER_INCH: f64 = 2.54;
pub const KILOGRAMS_PER_POUND: f64 = 0.45359237;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Unit {
    Metric,
    Imperial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Height,
    Weight,
}

/// A unit-tagged magnitude, e.g. a height of 68.9 inches. Callers are
/// expected to supply a positive value; the formulas reject non-positive
/// canonical magnitudes on their own.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    value: f64,
    unit: Unit,
}

impl Measurement {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Canonical magnitude: centimeters for heights, kilograms for weights.
    /// Metric input is already canonical and passes through untouched.
    pub fn to_canonical(&self, kind: Kind) -> f64 {
        match (self.unit, kind) {
            (Unit::Metric, _) => self.value,
            (Unit::Imperial, Kind::Height) => self.value * CENTIMETERS_PER_INCH,
            (Unit::Imperial, Kind::Weight) => self.value * KILOGRAMS_PER_POUND,
        }
    }
}
