//! Writes a DOM subtree back out as SVG markup.

use crate::dom::dom_tree::{Doctype, Document, Node};
use std::cell::RefCell;
use std::rc::Rc;

/// Elements the tree builder wraps around a standalone SVG file.
const SCAFFOLDING: [&str; 3] = ["html", "head", "body"];

/// Serializes the first `<svg>` element of the document (in document order), preceded by
/// the XML declaration and doctype when the source had them, each on its own line.
///
/// Returns `None` when the document has no `<svg>` element. The html/head/body
/// scaffolding the tree builder wraps around a standalone SVG file is never emitted.
pub fn serialize_svg(document: &Document) -> Option<String> {
    let svg = find_svg(&document.root)?;

    let mut out = String::new();
    if let Some(declaration) = document.xml_declaration.borrow().as_deref() {
        out.push_str(declaration);
        out.push('\n');
    }
    if let Some(doctype) = document.doctype.borrow().as_ref() {
        out.push_str(&doctype_markup(doctype));
        out.push('\n');
    }
    write_node(&svg.borrow(), &mut out);
    Some(out)
}

/// Describes the first piece of content that lies outside the first `<svg>` element and
/// would therefore be lost on output. Whitespace and the html/head/body scaffolding do
/// not count.
///
/// HTML breakout tags (`<p>`, `<br>`, `<font color>`, ...) close every open SVG element
/// while parsing, so the rest of the drawing lands after the `<svg>` and shows up here.
pub fn content_outside_svg(document: &Document) -> Option<String> {
    let svg = find_svg(&document.root)?;
    find_stray(&document.root, &svg)
}

/// Serializes a node and its subtree.
pub fn serialize_node(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn find_svg(node: &Rc<RefCell<Node>>) -> Option<Rc<RefCell<Node>>> {
    let borrowed = node.borrow();
    if borrowed.is_element_named("svg") {
        return Some(node.clone());
    }
    borrowed
        .children()
        .and_then(|children| children.iter().find_map(find_svg))
}

fn find_stray(node: &Rc<RefCell<Node>>, svg: &Rc<RefCell<Node>>) -> Option<String> {
    if Rc::ptr_eq(node, svg) {
        return None;
    }
    let borrowed = node.borrow();
    match &*borrowed {
        Node::Text(text) if text.trim().is_empty() => None,
        Node::Text(text) => Some(format!("text {:?}", text.trim())),
        Node::Element(elem) if !SCAFFOLDING.contains(&elem.tag.as_str()) => {
            Some(format!("<{}>", elem.tag))
        }
        _ => borrowed
            .children()
            .and_then(|children| children.iter().find_map(|child| find_stray(child, svg))),
    }
}

fn doctype_markup(doctype: &Doctype) -> String {
    match (doctype.public_id.is_empty(), doctype.system_id.is_empty()) {
        (false, _) => format!(
            "<!DOCTYPE {} PUBLIC \"{}\" \"{}\">",
            doctype.name, doctype.public_id, doctype.system_id
        ),
        (true, false) => format!("<!DOCTYPE {} SYSTEM \"{}\">", doctype.name, doctype.system_id),
        (true, true) => format!("<!DOCTYPE {}>", doctype.name),
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::DocumentRoot(root) => {
            for child in &root.children {
                write_node(&child.borrow(), out);
            }
        }
        Node::Element(elem) => {
            out.push('<');
            out.push_str(&elem.tag);
            for (key, value) in &elem.attributes {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                out.push_str(&escape(value, true));
                out.push('"');
            }

            if elem.children.is_empty() {
                out.push_str("/>");
            } else {
                out.push('>');
                for child in &elem.children {
                    write_node(&child.borrow(), out);
                }
                out.push_str("</");
                out.push_str(&elem.tag);
                out.push('>');
            }
        }
        Node::Text(text) => out.push_str(&escape(text, false)),
    }
}

fn escape(text: &str, in_attribute: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if in_attribute => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
