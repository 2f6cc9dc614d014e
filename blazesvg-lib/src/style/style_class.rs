use indexmap::IndexMap;

use crate::style::declaration::parse_declaration;
use crate::style::numeric::NumericCanonicalizer;

/// One distinct, canonicalized set of style properties and the class name it is
/// emitted under.
#[derive(Debug, Clone)]
pub struct StyleClass {
    id: String,
    properties: IndexMap<String, String>,
}

impl StyleClass {
    /// Builds a class from a raw `style` attribute: every value is canonicalized,
    /// then any property listed in `removed` is dropped.
    pub fn from_style(
        id: String,
        style: &str,
        canonicalizer: &NumericCanonicalizer,
        removed: &[String],
    ) -> Self {
        let properties = parse_declaration(style)
            .into_iter()
            .filter(|(property, _)| !removed.iter().any(|r| r == property))
            .map(|(property, value)| {
                let value = canonicalizer.canonicalize(&value);
                (property, value)
            })
            .collect();
        StyleClass { id, properties }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn properties(&self) -> &IndexMap<String, String> {
        &self.properties
    }

    /// True when both classes hold the same properties with the same canonical
    /// values. Property order and class names are ignored.
    pub fn equal_to(&self, other: &StyleClass) -> bool {
        self.properties.len() == other.properties.len()
            && self
                .properties
                .iter()
                .all(|(property, value)| other.properties.get(property) == Some(value))
    }

    /// Renders the class as a stylesheet rule, properties in first-seen order.
    pub fn serialize(&self, indent: &str) -> String {
        let body = self
            .properties
            .iter()
            .map(|(property, value)| format!("{indent}{indent}{property}: {value}"))
            .collect::<Vec<_>>()
            .join(";\n");
        format!("\n{indent}.{id} {{\n{body};\n{indent}}}", id = self.id)
    }
}
