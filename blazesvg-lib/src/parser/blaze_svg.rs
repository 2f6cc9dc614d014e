//! This module contains functions and types for parsing SVG markup into a custom DOM tree.
//!
//! It uses html5ever as the parser. An `<svg>` element is parsed as foreign content, so
//! SVG element and attribute names keep their case (`viewBox`, `linearGradient`). The
//! resulting tree is defined in the `crate::dom::dom_tree` module.

use crate::dom::dom_tree;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{
    interface::{ElemName, NodeOrText, QuirksMode, TreeSink},
    LocalName, Namespace, QualName,
};
use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

/// Creates a DOM tree from the provided markup.
///
/// # Arguments
///
/// * `content` - A string slice containing the SVG document to parse.
///
/// # Returns
///
/// A `dom_tree::Document` representing the parsed markup.
pub fn create_dom_tree(content: &str) -> dom_tree::Document {
    let tree_sink = BlazeSvgTreeSink::new();
    html5ever::parse_document(tree_sink, Default::default()).one(content.to_string())
}

/// A custom TreeSink for building the DOM tree used by the optimizer.
pub struct BlazeSvgTreeSink {
    document: dom_tree::Document,
}

impl BlazeSvgTreeSink {
    /// Creates a new `BlazeSvgTreeSink` with an empty document.
    pub fn new() -> Self {
        Self {
            document: dom_tree::new_document(),
        }
    }
}

impl Default for BlazeSvgTreeSink {
    fn default() -> Self {
        Self::new()
    }
}

/// A simple implementation of the `ElemName` trait for our elements.
#[derive(Debug)]
pub struct SvgElemName {
    ns: Namespace,
    local: LocalName,
}

impl ElemName for SvgElemName {
    fn local_name(&self) -> &LocalName {
        &self.local
    }

    fn ns(&self) -> &Namespace {
        &self.ns
    }
}

/// Attribute key as written in the source, including any namespace prefix (`xlink:href`).
///
/// The tree builder gives a bare `xmlns` an empty prefix, which must not turn into `:xmlns`.
fn attribute_key(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, name.local),
        _ => name.local.to_string(),
    }
}

impl TreeSink for BlazeSvgTreeSink {
    type Handle = Rc<RefCell<dom_tree::Node>>;
    type Output = dom_tree::Document;
    type ElemName<'a>
        = SvgElemName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self.document
    }

    /// Parse errors are recoverable; the tree builder carries on.
    fn parse_error(&self, msg: Cow<'static, str>) {
        log::debug!("Parse error: {}", msg);
    }

    fn get_document(&self) -> Self::Handle {
        self.document.root.clone()
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        if let dom_tree::Node::Element(ref elem) = *target.borrow() {
            SvgElemName {
                ns: elem.qual_name.ns.clone(),
                local: elem.qual_name.local.clone(),
            }
        } else {
            panic!("elem_name called on non-element node")
        }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<html5ever::Attribute>,
        _flags: html5ever::interface::ElementFlags,
    ) -> Self::Handle {
        let mut element_node = dom_tree::ElementNode::new(name.local.to_string(), name);
        element_node.attributes = attrs
            .into_iter()
            .map(|attr| (attribute_key(&attr.name), attr.value.to_string()))
            .collect();
        Rc::new(RefCell::new(dom_tree::Node::Element(element_node)))
    }

    /// Comments are dropped: they become empty text nodes that `append` skips.
    ///
    /// The HTML tokenizer reads `<?xml ...?>` as a bogus comment whose text starts with
    /// `?xml`; the first one is kept as the document's XML declaration.
    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        if text.starts_with("?xml") {
            let mut declaration = self.document.xml_declaration.borrow_mut();
            if declaration.is_none() {
                *declaration = Some(format!("<{}>", &*text));
            }
        }
        Rc::new(RefCell::new(dom_tree::Node::Text(String::new())))
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Self::Handle {
        Rc::new(RefCell::new(dom_tree::Node::Text(String::new())))
    }

    /// Appends a child node or text to the given parent node, merging adjacent text.
    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let mut parent_borrow = parent.borrow_mut();
        let Some(children) = parent_borrow.children_mut() else {
            // Text nodes cannot have children.
            return;
        };

        match child {
            NodeOrText::AppendText(text) => {
                if let Some(last) = children.last() {
                    if let dom_tree::Node::Text(ref mut existing) = *last.borrow_mut() {
                        existing.push_str(&text);
                        return;
                    }
                }
                children.push(Rc::new(RefCell::new(dom_tree::Node::Text(
                    text.to_string(),
                ))));
            }
            NodeOrText::AppendNode(node) => {
                let is_empty_text = matches!(&*node.borrow(), dom_tree::Node::Text(t) if t.is_empty());
                if !is_empty_text {
                    children.push(node);
                }
            }
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        _prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        self.append(element, child);
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    ) {
        *self.document.doctype.borrow_mut() = Some(dom_tree::Doctype {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        });
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        target.clone()
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        Rc::ptr_eq(x, y)
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        log::trace!("Quirks mode: {:?}", mode);
    }

    /// Only reached through table foster parenting, which SVG content never triggers.
    fn append_before_sibling(&self, _sibling: &Self::Handle, _child: NodeOrText<Self::Handle>) {}

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<html5ever::Attribute>) {
        if let dom_tree::Node::Element(ref mut elem) = *target.borrow_mut() {
            for attr in attrs {
                let key = attribute_key(&attr.name);
                if !elem.has_attribute(&key) {
                    elem.attributes.push((key, attr.value.to_string()));
                }
            }
        }
    }

    fn remove_from_parent(&self, _target: &Self::Handle) {}

    fn reparent_children(&self, _node: &Self::Handle, _new_parent: &Self::Handle) {}
}
