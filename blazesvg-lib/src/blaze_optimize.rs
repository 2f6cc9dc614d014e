use crate::config::Options;
use crate::error::BlazeSvgError;
use crate::parser::{blaze_svg, serialize};
use crate::style::extract::{self, ExtractionReport};

pub mod blaze_svg_optimize {
    use super::*;

    /// Parses `svg_content`, moves its inline styles into classes and serializes
    /// the result. Input without an `<svg>` element is returned unchanged.
    ///
    /// Fails with [`BlazeSvgError::ContentOutsideSvg`] instead of dropping markup the
    /// parser could not keep inside the `<svg>` element.
    pub fn optimize(svg_content: &str, options: &Options) -> Result<String, BlazeSvgError> {
        optimize_with_report(svg_content, options).map(|(svg, _)| svg)
    }

    pub fn optimize_with_report(
        svg_content: &str,
        options: &Options,
    ) -> Result<(String, ExtractionReport), BlazeSvgError> {
        options.validate()?;
        let dom_tree = blaze_svg::create_dom_tree(svg_content);
        if let Some(stray) = serialize::content_outside_svg(&dom_tree) {
            log::error!("Refusing to optimize: {} is outside the <svg> element", stray);
            return Err(BlazeSvgError::ContentOutsideSvg(stray));
        }
        let report = extract::extract_styles_to_classes(&dom_tree, options)?;
        let output =
            serialize::serialize_svg(&dom_tree).unwrap_or_else(|| svg_content.to_string());
        Ok((output, report))
    }
}
