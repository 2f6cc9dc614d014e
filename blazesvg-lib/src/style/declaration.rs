//! Parsing of a flat `property: value; ...` style attribute.

use indexmap::IndexMap;

/// Property name to raw value, in first-seen order.
pub type Declaration = IndexMap<String, String>;

/// Parses the value of a `style` attribute.
///
/// Fragments without a `:` or with an empty property name are dropped. A repeated
/// property keeps its first position and takes the last value.
pub fn parse_declaration(style: &str) -> Declaration {
    let mut declaration = Declaration::new();
    for fragment in style.split(';') {
        let Some((property, value)) = fragment.split_once(':') else {
            continue;
        };
        let property = property.trim();
        if property.is_empty() {
            continue;
        }
        declaration.insert(property.to_string(), value.trim().to_string());
    }
    declaration
}
