//! The styles-to-classes pass.
//!
//! Every `style` attribute in the document is replaced by a reference to a shared
//! class, and the classes are written into a `<style type="text/css">` element at
//! the front of the SVG's `<defs>`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::Options;
use crate::dom::dom_tree::{self, Document, Node};
use crate::error::{BlazeSvgError, DomError};
use crate::style::class_registry::ClassRegistry;

/// The document operations the pass needs.
///
/// Shaped like html5ever's `TreeSink`: nodes are opaque handles and all methods
/// take `&self`, so implementations use interior mutability.
pub trait DocumentHost {
    type Handle: Clone;

    fn root(&self) -> Self::Handle;

    /// Child nodes in document order.
    fn children_of(&self, node: &Self::Handle) -> Vec<Self::Handle>;

    fn is_element_named(&self, node: &Self::Handle, name: &str) -> bool;

    fn is_text(&self, node: &Self::Handle) -> bool;

    /// `None` for missing attributes and for non-element nodes.
    fn get_attribute(&self, node: &Self::Handle, name: &str) -> Option<String>;

    fn has_attribute(&self, node: &Self::Handle, name: &str) -> bool {
        self.get_attribute(node, name).is_some()
    }

    fn set_attribute(&self, node: &Self::Handle, name: &str, value: &str)
        -> Result<(), DomError>;

    fn remove_attribute(&self, node: &Self::Handle, name: &str) -> Result<(), DomError>;

    /// A new, detached, empty element.
    fn create_element(&self, name: &str) -> Self::Handle;

    /// A new, detached, empty text node.
    fn create_text(&self) -> Self::Handle;

    fn insert_child_at(
        &self,
        parent: &Self::Handle,
        index: usize,
        child: Self::Handle,
    ) -> Result<(), DomError>;

    fn append_child(&self, parent: &Self::Handle, child: Self::Handle) -> Result<(), DomError>;

    fn append_text_content(&self, node: &Self::Handle, text: &str) -> Result<(), DomError>;

    fn first_child_named(&self, node: &Self::Handle, name: &str) -> Option<Self::Handle> {
        self.children_of(node)
            .into_iter()
            .find(|child| self.is_element_named(child, name))
    }
}

impl DocumentHost for Document {
    type Handle = Rc<RefCell<Node>>;

    fn root(&self) -> Self::Handle {
        self.root.clone()
    }

    fn children_of(&self, node: &Self::Handle) -> Vec<Self::Handle> {
        node.borrow().children().cloned().unwrap_or_default()
    }

    fn is_element_named(&self, node: &Self::Handle, name: &str) -> bool {
        node.borrow().is_element_named(name)
    }

    fn is_text(&self, node: &Self::Handle) -> bool {
        matches!(*node.borrow(), Node::Text(_))
    }

    fn get_attribute(&self, node: &Self::Handle, name: &str) -> Option<String> {
        match &*node.borrow() {
            Node::Element(elem) => elem.get_attribute(name).map(str::to_string),
            _ => None,
        }
    }

    fn set_attribute(
        &self,
        node: &Self::Handle,
        name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        match &mut *node.borrow_mut() {
            Node::Element(elem) => {
                elem.set_attribute(name, value.to_string());
                Ok(())
            }
            _ => Err(DomError::NotAnElement(name.to_string())),
        }
    }

    fn remove_attribute(&self, node: &Self::Handle, name: &str) -> Result<(), DomError> {
        match &mut *node.borrow_mut() {
            Node::Element(elem) => {
                elem.remove_attribute(name);
                Ok(())
            }
            _ => Err(DomError::NotAnElement(name.to_string())),
        }
    }

    fn create_element(&self, name: &str) -> Self::Handle {
        dom_tree::new_svg_element(name)
    }

    fn create_text(&self) -> Self::Handle {
        Rc::new(RefCell::new(Node::Text(String::new())))
    }

    fn insert_child_at(
        &self,
        parent: &Self::Handle,
        index: usize,
        child: Self::Handle,
    ) -> Result<(), DomError> {
        let mut parent_borrow = parent.borrow_mut();
        let children = parent_borrow
            .children_mut()
            .ok_or(DomError::NotAContainer)?;
        let index = index.min(children.len());
        children.insert(index, child);
        Ok(())
    }

    fn append_child(&self, parent: &Self::Handle, child: Self::Handle) -> Result<(), DomError> {
        let mut parent_borrow = parent.borrow_mut();
        let children = parent_borrow
            .children_mut()
            .ok_or(DomError::NotAContainer)?;
        children.push(child);
        Ok(())
    }

    fn append_text_content(&self, node: &Self::Handle, text: &str) -> Result<(), DomError> {
        match &mut *node.borrow_mut() {
            Node::Text(existing) => {
                existing.push_str(text);
                Ok(())
            }
            _ => Err(DomError::NotAContainer),
        }
    }
}

/// What a pass did to the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Nodes whose `class` attribute gained a generated class.
    pub nodes_rewritten: usize,
    /// Nodes whose `style` attribute was removed, including empty ones.
    pub styles_removed: usize,
    /// Distinct classes written to the stylesheet.
    pub classes: usize,
}

/// Runs the styles-to-classes pass over `host`.
///
/// The options are validated before any node is touched. When the document has no
/// `<svg>` element nothing is changed.
pub fn extract_styles_to_classes<H: DocumentHost>(
    host: &H,
    options: &Options,
) -> Result<ExtractionReport, BlazeSvgError> {
    let mut registry = ClassRegistry::new(options)?;
    let root = host.root();

    let Some(svg) = find_first_element(host, &root, "svg") else {
        log::warn!("No <svg> element found, leaving the document untouched");
        return Ok(ExtractionReport::default());
    };

    let mut report = ExtractionReport::default();
    walk_nodes(host, &root, |node| {
        extract_style_to_class(host, node, &mut registry, &mut report)
    })?;

    let stylesheet = ensure_stylesheet(host, &svg)?;
    let text = ensure_text_child(host, &stylesheet)?;
    host.append_text_content(&text, &registry.serialize())?;

    report.classes = registry.len();
    log::info!(
        "Extracted {} style attributes into {} classes",
        report.nodes_rewritten,
        report.classes
    );
    Ok(report)
}

fn extract_style_to_class<H: DocumentHost>(
    host: &H,
    node: &H::Handle,
    registry: &mut ClassRegistry,
    report: &mut ExtractionReport,
) -> Result<(), DomError> {
    let Some(style) = host.get_attribute(node, "style") else {
        return Ok(());
    };

    let style = style.trim();
    if !style.is_empty() {
        let class_attr = host.get_attribute(node, "class").unwrap_or_default();
        let mut classes: Vec<String> = class_attr.split_whitespace().map(str::to_string).collect();
        classes.push(registry.add(style));
        host.set_attribute(node, "class", &classes.join(" "))?;
        report.nodes_rewritten += 1;
    }

    host.remove_attribute(node, "style")?;
    report.styles_removed += 1;
    Ok(())
}

/// Visits every node below `root` in document order, parents before children.
pub fn walk_nodes<H, F>(host: &H, root: &H::Handle, mut visit: F) -> Result<(), DomError>
where
    H: DocumentHost,
    F: FnMut(&H::Handle) -> Result<(), DomError>,
{
    let mut stack: Vec<H::Handle> = host.children_of(root).into_iter().rev().collect();
    while let Some(node) = stack.pop() {
        visit(&node)?;
        stack.extend(host.children_of(&node).into_iter().rev());
    }
    Ok(())
}

/// First element named `name` below `root`, in document order.
pub fn find_first_element<H: DocumentHost>(
    host: &H,
    root: &H::Handle,
    name: &str,
) -> Option<H::Handle> {
    let mut stack: Vec<H::Handle> = host.children_of(root).into_iter().rev().collect();
    while let Some(node) = stack.pop() {
        if host.is_element_named(&node, name) {
            return Some(node);
        }
        stack.extend(host.children_of(&node).into_iter().rev());
    }
    None
}

/// The `<style>` element inside the SVG's `<defs>`, creating either when missing.
fn ensure_stylesheet<H: DocumentHost>(host: &H, svg: &H::Handle) -> Result<H::Handle, DomError> {
    let defs = match host.first_child_named(svg, "defs") {
        Some(defs) => defs,
        None => {
            let defs = host.create_element("defs");
            host.insert_child_at(svg, 0, defs.clone())?;
            defs
        }
    };

    match host.first_child_named(&defs, "style") {
        Some(style) => Ok(style),
        None => {
            let style = host.create_element("style");
            host.set_attribute(&style, "type", "text/css")?;
            host.insert_child_at(&defs, 0, style.clone())?;
            Ok(style)
        }
    }
}

fn ensure_text_child<H: DocumentHost>(host: &H, node: &H::Handle) -> Result<H::Handle, DomError> {
    if let Some(text) = host
        .children_of(node)
        .into_iter()
        .find(|child| host.is_text(child))
    {
        return Ok(text);
    }
    let text = host.create_text();
    host.append_child(node, text.clone())?;
    Ok(text)
}
