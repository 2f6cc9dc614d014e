use crate::config::Options;
use crate::error::ConfigError;
use crate::style::numeric::NumericCanonicalizer;
use crate::style::style_class::StyleClass;

/// Deduplicating store of the classes generated during one pass.
///
/// Identifiers are handed out as `c0`, `c1`, ... in the order distinct
/// declarations are first added; they are never reused or renumbered.
#[derive(Debug)]
pub struct ClassRegistry {
    /// Kept in ascending identifier order.
    classes: Vec<StyleClass>,
    next_class: usize,
    canonicalizer: NumericCanonicalizer,
    removed: Vec<String>,
    indent: String,
}

impl ClassRegistry {
    pub fn new(options: &Options) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self {
            classes: Vec::new(),
            next_class: 0,
            canonicalizer: NumericCanonicalizer::new(options),
            // Declarations are matched by trimmed property name.
            removed: options
                .remove_css_styles
                .iter()
                .map(|name| name.trim().to_string())
                .collect(),
            indent: options.indent_str(),
        })
    }

    /// Returns the identifier of the class matching `style`, registering a new
    /// class when no existing one is equal.
    pub fn add(&mut self, style: &str) -> String {
        let candidate_id = format!("c{}", self.next_class);
        let candidate =
            StyleClass::from_style(candidate_id, style, &self.canonicalizer, &self.removed);

        if let Some(existing) = self.classes.iter().find(|class| class.equal_to(&candidate)) {
            log::debug!("Reusing class {} for style {:?}", existing.id(), style);
            return existing.id().to_string();
        }

        self.next_class += 1;
        let id = candidate.id().to_string();
        log::debug!("Registered class {} for style {:?}", id, style);
        self.classes.push(candidate);
        id
    }

    pub fn get(&self, id: &str) -> Option<&StyleClass> {
        self.classes.iter().find(|class| class.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleClass> {
        self.classes.iter()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// All rules in identifier order, separated by newlines.
    pub fn serialize(&self) -> String {
        self.classes
            .iter()
            .map(|class| class.serialize(&self.indent))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
