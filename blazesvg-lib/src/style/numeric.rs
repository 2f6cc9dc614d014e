//! Canonical form for numeric style values.
//!
//! Numerically equal values (`12px`, `12.0px`, `12`) must print the same so that
//! the declarations holding them collapse into one class. Anything that is not a
//! plain number with an optional unit (colors, keywords, `url(...)`) is returned
//! untouched.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::Options;

static NUMERIC_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?)(px|pt|pc|mm|cm|m|in|ft|em|ex|%)?$")
        .expect("numeric value pattern is valid")
});

/// Pixels per unit for the absolute units that may be rewritten as pixels.
fn px_per_unit(unit: &str) -> Option<f64> {
    match unit {
        "in" => Some(96.0),
        "cm" => Some(96.0 / 2.54),
        "mm" => Some(9600.0 / 2.54),
        "pt" => Some(4.0 / 3.0),
        "pc" => Some(16.0),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericCanonicalizer {
    float_precision: u32,
    leading_zero: bool,
    default_px: bool,
    convert_to_px: bool,
}

impl Default for NumericCanonicalizer {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}

impl NumericCanonicalizer {
    pub fn new(options: &Options) -> Self {
        Self {
            float_precision: options.float_precision,
            leading_zero: options.leading_zero,
            default_px: options.default_px,
            convert_to_px: options.convert_to_px,
        }
    }

    /// Returns the canonical spelling of `value`.
    pub fn canonicalize(&self, value: &str) -> String {
        let Some(caps) = NUMERIC_VALUE.captures(value) else {
            return value.to_string();
        };
        let magnitude = match caps[1].parse::<f64>() {
            Ok(magnitude) if magnitude.is_finite() => magnitude,
            _ => return value.to_string(),
        };
        let mut unit = caps.get(2).map_or("", |m| m.as_str());
        let mut number = self.round(magnitude);

        if self.convert_to_px {
            if let Some(factor) = px_per_unit(unit) {
                let px = self.round(factor * magnitude);
                let unit_len = if self.default_px { 0 } else { "px".len() };
                // The pixel form must be strictly shorter than the source text.
                if format_number(px).len() + unit_len < value.len() {
                    number = px;
                    unit = "px";
                }
            }
        }

        let mut text = format_number(number);
        if self.leading_zero {
            text = strip_leading_zero(text);
        }
        if self.default_px && unit == "px" {
            unit = "";
        }
        text.push_str(unit);
        text
    }

    /// Rounds half away from zero to `float_precision` decimal digits.
    fn round(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.float_precision as i32);
        let scaled = value * scale;
        // From 2^52 up every f64 is a whole number: nothing is left to round.
        if !scaled.is_finite() || scaled.abs() >= 4_503_599_627_370_496.0 {
            return value;
        }
        let rounded = scaled.round() / scale;
        // Never print `-0`.
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }
}

/// Shortest text that reads back as `value`: `12` not `12.0`, `0.5` not `0.500`, and
/// `1e25` rather than twenty-five digits.
///
/// Scientific notation wins only when it is strictly shorter than the decimal form, even
/// after the decimal form loses its leading zero, so `100` and `0.001` stay decimal.
fn format_number(value: f64) -> String {
    let decimal = value.to_string();
    let scientific = format!("{:e}", value);
    if scientific.len() < strip_leading_zero(decimal.clone()).len() {
        scientific
    } else {
        decimal
    }
}

fn strip_leading_zero(text: String) -> String {
    if let Some(rest) = text.strip_prefix("0.") {
        format!(".{}", rest)
    } else if let Some(rest) = text.strip_prefix("-0.") {
        format!("-.{}", rest)
    } else {
        text
    }
}
