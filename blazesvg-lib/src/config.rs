//! Options for the styles-to-classes pass.

use crate::error::ConfigError;

/// Largest accepted `float_precision`. Beyond this the `10^n` scale factor used
/// for rounding no longer fits the integer range of an `f64`.
pub const MAX_FLOAT_PRECISION: u32 = 20;

/// Largest accepted indentation width for the generated stylesheet.
pub const MAX_INDENT: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Spaces per indentation level in the generated `<style>` text.
    pub indent: usize,
    /// Properties dropped from every generated class.
    pub remove_css_styles: Vec<String>,
    /// Decimal digits numeric values are rounded to.
    pub float_precision: u32,
    /// Strip the redundant `0` in `0.5`.
    pub leading_zero: bool,
    /// Drop the implicit `px` unit.
    pub default_px: bool,
    /// Convert `cm`, `mm`, `in`, `pt` and `pc` to pixels when that is shorter.
    pub convert_to_px: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            indent: 4,
            remove_css_styles: Vec::new(),
            float_precision: 3,
            leading_zero: true,
            default_px: true,
            convert_to_px: true,
        }
    }
}

impl Options {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.float_precision > MAX_FLOAT_PRECISION {
            return Err(ConfigError::FloatPrecisionOutOfRange(self.float_precision));
        }
        if self.indent > MAX_INDENT {
            return Err(ConfigError::IndentOutOfRange(self.indent));
        }
        let is_malformed =
            |name: &String| name.trim().is_empty() || name.contains(|c: char| c == ':' || c == ';');
        if let Some(bad) = self.remove_css_styles.iter().find(|&name| is_malformed(name)) {
            return Err(ConfigError::InvalidRemovedProperty(bad.clone()));
        }
        Ok(())
    }

    /// The indentation unit as a string of spaces.
    pub fn indent_str(&self) -> String {
        " ".repeat(self.indent)
    }
}
