pub mod class_registry;
pub mod declaration;
pub mod extract;
pub mod numeric;
pub mod style_class;
