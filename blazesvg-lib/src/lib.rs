//! BlazeSVG: moves inline `style` attributes of an SVG document into shared
//! classes and emits one consolidated stylesheet.

pub mod blaze_optimize;
pub mod config;
pub mod dom;
pub mod error;
pub mod parser;
pub mod style;

pub use config::Options;
pub use error::{BlazeSvgError, ConfigError, DomError};
pub use style::class_registry::ClassRegistry;
pub use style::extract::{extract_styles_to_classes, DocumentHost, ExtractionReport};
