use std::io::Write;

use clap::Parser;
use log::debug;

use fitmetrics_model::measurement::{Measurement, Unit};
use fitmetrics_model::metrics::{self, Assessment};
use fitmetrics_model::subject::{Sex, Subject};

/// Compute Body Mass Index and estimated Body Fat Percentage.
#[derive(Debug, Parser)]
#[command(name = "fitmetrics", version)]
pub struct Args {
    /// Age in whole years
    #[arg(long)]
    pub age: u32,

    /// Biological sex used by the body fat estimate: male or female
    #[arg(long)]
    pub sex: Sex,

    /// Height, in centimeters (metric) or inches (imperial)
    #[arg(long, allow_negative_numbers = true)]
    pub height: f64,

    /// Weight, in kilograms (metric) or pounds (imperial)
    #[arg(long, allow_negative_numbers = true)]
    pub weight: f64,

    /// Unit system of the height and weight values
    #[arg(long, default_value = "metric")]
    pub units: Unit,

    /// Emit results as a JSON object instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} must be a positive number")]
    NotPositive(&'static str),
    #[error(transparent)]
    Calculation(#[from] metrics::Error),
    #[error("failed to write output")]
    Output(#[from] std::io::Error),
    #[error("failed to encode output")]
    Encoding(#[from] serde_json::Error),
}

type Result<T> = std::result::Result<T, Error>;

/// Validate the raw inputs, run the calculation, and render the four output
/// values. Any failure aborts before anything is written.
pub fn run(args: &Args, out: &mut impl Write) -> Result<()> {
    if args.age == 0 {
        return Err(Error::NotPositive("age"));
    }
    if !args.height.is_finite() || args.height <= 0.0 {
        return Err(Error::NotPositive("height"));
    }
    if !args.weight.is_finite() || args.weight <= 0.0 {
        return Err(Error::NotPositive("weight"));
    }

    debug!(
        "Assessing subject: age={}, sex={}, height={} {}, weight={} {}",
        args.age, args.sex, args.height, args.units, args.weight, args.units
    );
    let assessment = metrics::assess(
        Measurement::new(args.height, args.units),
        Measurement::new(args.weight, args.units),
        Subject::new(args.age, args.sex),
    )?;

    if args.json {
        render_json(&assessment, out)
    } else {
        render_text(&assessment, out)
    }
}

fn render_text(assessment: &Assessment, out: &mut impl Write) -> Result<()> {
    writeln!(out, "BMI: {}", metrics::format_one_decimal(assessment.bmi.value))?;
    writeln!(out, "BMI category: {}", assessment.bmi.category)?;
    writeln!(out, "BFP: {}", metrics::format_one_decimal(assessment.bfp.value))?;
    writeln!(out, "BFP category: {}", assessment.bfp.category)?;
    Ok(())
}

fn render_json(assessment: &Assessment, out: &mut impl Write) -> Result<()> {
    let body = serde_json::json!({
        "bmi": round_one_decimal(assessment.bmi.value),
        "bmiCategory": assessment.bmi.category,
        "bfp": round_one_decimal(assessment.bfp.value),
        "bfpCategory": assessment.bfp.category,
    });
    writeln!(out, "{}", body)?;
    Ok(())
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::parse_from(std::iter::once(&"fitmetrics").chain(args))
    }

    fn run_to_string(args: &Args) -> Result<String> {
        let mut out = Vec::new();
        run(args, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn renders_four_output_lines() {
        let args = parse(&[
            "--age", "30", "--sex", "male", "--height", "175", "--weight", "70",
        ]);
        let output = run_to_string(&args).unwrap();
        assert_eq!(
            output,
            "BMI: 22.9\nBMI category: Normal\nBFP: 18.1\nBFP category: Average\n"
        );
    }

    #[test]
    fn imperial_units_are_converted_before_computing() {
        let args = parse(&[
            "--age", "30", "--sex", "male", "--height", "68.9", "--weight", "154",
            "--units", "imperial",
        ]);
        let output = run_to_string(&args).unwrap();
        assert!(output.contains("BMI category: Normal"), "{}", output);
        assert!(output.contains("BFP category: Average"), "{}", output);
    }

    #[test]
    fn json_output_matches_calc_response_shape() {
        let args = parse(&[
            "--age", "30", "--sex", "male", "--height", "175", "--weight", "70",
            "--json",
        ]);
        let output = run_to_string(&args).unwrap();
        let body: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "bmi": 22.9,
                "bmiCategory": "Normal",
                "bfp": 18.1,
                "bfpCategory": "Average",
            })
        );
    }

    #[test]
    fn rejects_non_positive_magnitudes_before_computing() {
        let test_data = [
            ["--age", "30", "--sex", "male", "--height", "0", "--weight", "70"],
            ["--age", "30", "--sex", "male", "--height", "175", "--weight", "-1"],
            ["--age", "0", "--sex", "male", "--height", "175", "--weight", "70"],
            ["--age", "30", "--sex", "male", "--height", "NaN", "--weight", "70"],
        ];

        for (i, raw) in test_data.into_iter().enumerate() {
            let args = parse(&raw);
            let mut out = Vec::new();
            let result = run(&args, &mut out);
            assert!(matches!(result, Err(Error::NotPositive(_))), "Test case #{}", i);
            assert!(out.is_empty(), "Test case #{}: partial output", i);
        }
    }

    #[test]
    fn below_essential_label_is_rendered_verbatim() {
        // Extreme but valid inputs drive the unclamped estimate below the
        // essential-fat band.
        let args = parse(&[
            "--age", "1", "--sex", "male", "--height", "175", "--weight", "20",
        ]);
        let output = run_to_string(&args).unwrap();
        assert!(output.contains("BFP category: Below essential"), "{}", output);
    }

    #[test]
    fn sex_argument_rejects_unknown_values() {
        let result = Args::try_parse_from([
            "fitmetrics", "--age", "30", "--sex", "unknown", "--height", "175",
            "--weight", "70",
        ]);
        assert!(result.is_err());
    }
}
