use strum::Display;

use crate::measurement::{Kind, Measurement};
use crate::subject::{Sex, Subject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid inputs")]
    InvalidInput,
}

type Result<T> = std::result::Result<T, Error>;

/// Body Mass Index from canonical units: `weight_kg / (height_cm / 100)^2`.
/// Full floating-point precision, no rounding.
pub fn bmi(weight_kg: f64, height_cm: f64) -> Result<f64> {
    if weight_kg <= 0.0 || height_cm <= 0.0 {
        return Err(Error::InvalidInput);
    }
    let height_m = height_cm / 100.0;
    Ok(weight_kg / (height_m * height_m))
}

/// Deurenberg body fat percentage estimate. The regression is not clamped,
/// so extreme but valid BMI/age combinations can produce values outside
/// [0, 100]; callers must not assume otherwise.
pub fn bfp_deurenberg(bmi: f64, age: u32, sex: Sex) -> Result<f64> {
    if bmi <= 0.0 || age == 0 {
        return Err(Error::InvalidInput);
    }
    let sex_factor = match sex {
        Sex::Male => 1.0,
        Sex::Female => 0.0,
    };
    Ok(1.20 * bmi + 0.23 * f64::from(age) - 10.8 * sex_factor - 5.4)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BfpCategory {
    #[strum(serialize = "Below essential")]
    #[cfg_attr(feature = "serde", serde(rename = "Below essential"))]
    BelowEssential,
    Essential,
    Athletes,
    Fitness,
    Average,
    Obese,
}

/// WHO bands, upper bound exclusive except the open-ended top band.
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Sex-specific bands, upper bound inclusive.
pub fn classify_bfp(sex: Sex, bfp: f64) -> BfpCategory {
    match sex {
        Sex::Male => {
            if bfp < 2.0 {
                BfpCategory::BelowEssential
            } else if bfp <= 5.0 {
                BfpCategory::Essential
            } else if bfp <= 13.0 {
                BfpCategory::Athletes
            } else if bfp <= 17.0 {
                BfpCategory::Fitness
            } else if bfp <= 24.0 {
                BfpCategory::Average
            } else {
                BfpCategory::Obese
            }
        }
        Sex::Female => {
            if bfp < 10.0 {
                BfpCategory::BelowEssential
            } else if bfp <= 13.0 {
                BfpCategory::Essential
            } else if bfp <= 20.0 {
                BfpCategory::Athletes
            } else if bfp <= 24.0 {
                BfpCategory::Fitness
            } else if bfp <= 31.0 {
                BfpCategory::Average
            } else {
                BfpCategory::Obese
            }
        }
    }
}

/// Fixed-point with exactly one fractional digit and a `.` decimal point
/// regardless of locale.
pub fn format_one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

/// A computed value paired with its category. Produced fresh on every
/// calculation and never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricResult<C> {
    pub value: f64,
    pub category: C,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assessment {
    pub bmi: MetricResult<BmiCategory>,
    pub bfp: MetricResult<BfpCategory>,
}

/// Full calculation path: canonicalize, BMI, BFP, classify both. Fails on
/// the first invalid input with no partial output.
pub fn assess(height: Measurement, weight: Measurement, subject: Subject) -> Result<Assessment> {
    let height_cm = height.to_canonical(Kind::Height);
    let weight_kg = weight.to_canonical(Kind::Weight);

    let bmi_value = bmi(weight_kg, height_cm)?;
    let bfp_value = bfp_deurenberg(bmi_value, subject.age(), subject.sex())?;

    Ok(Assessment {
        bmi: MetricResult {
            value: bmi_value,
            category: classify_bmi(bmi_value),
        },
        bfp: MetricResult {
            value: bfp_value,
            category: classify_bfp(subject.sex(), bfp_value),
        },
    })
}
